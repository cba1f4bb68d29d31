use crate::{LanguageModelInput, LanguageModelResult, ModelResponse};

/// A remote generative model that turns an input into a single response.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse>;
}
