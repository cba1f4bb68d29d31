use crate::{
    prompt::{
        recipe_image_prompt, recipe_names_schema, recipe_names_user_prompt,
        RECIPE_NAMES_SYSTEM_PROMPT,
    },
    ChefError, ChefResult, SuggestionRequest,
};
use async_trait::async_trait;
use fridgechef_genai::{
    LanguageModel, LanguageModelInput, Message, Modality, Part, ResponseFormatJson,
    ResponseFormatOption,
};
use serde::Deserialize;
use std::sync::Arc;

/// The two generative capabilities FridgeChef relies on.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Ask for recipe names matching the request.
    ///
    /// `Ok(None)` means the model answered without a usable name list, which
    /// callers treat as "nothing found". Call failures and output that does
    /// not match the schema are `ChefError::Generation`.
    async fn suggest_names(&self, request: &SuggestionRequest)
        -> ChefResult<Option<Vec<String>>>;

    /// Generate a picture of the dish and return a reference to it (URL or
    /// `data:` URI).
    async fn generate_image(&self, recipe_name: &str) -> ChefResult<String>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeNamesOutput {
    #[serde(default)]
    recipe_names: Option<Vec<Option<String>>>,
}

/// [`RecipeGenerator`] backed by language models: one for structured text,
/// one able to answer with images.
pub struct ModelRecipeGenerator {
    text_model: Arc<dyn LanguageModel>,
    image_model: Arc<dyn LanguageModel>,
}

impl ModelRecipeGenerator {
    #[must_use]
    pub fn new(text_model: Arc<dyn LanguageModel>, image_model: Arc<dyn LanguageModel>) -> Self {
        Self {
            text_model,
            image_model,
        }
    }
}

#[async_trait]
impl RecipeGenerator for ModelRecipeGenerator {
    async fn suggest_names(
        &self,
        request: &SuggestionRequest,
    ) -> ChefResult<Option<Vec<String>>> {
        let input = LanguageModelInput {
            system_prompt: Some(RECIPE_NAMES_SYSTEM_PROMPT.to_string()),
            messages: vec![Message::user(vec![Part::text(recipe_names_user_prompt(
                request,
            ))])],
            response_format: Some(ResponseFormatOption::Json(ResponseFormatJson {
                name: "recipe_names".to_string(),
                description: Some("Recipe names suggested for the available ingredients.".into()),
                schema: Some(recipe_names_schema()),
            })),
            ..Default::default()
        };

        tracing::debug!(
            model = %self.text_model.model_id(),
            "requesting recipe names"
        );
        let response = self.text_model.generate(input).await?;

        let Some(text) = response.text() else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let output: RecipeNamesOutput = serde_json::from_str(&text).map_err(|error| {
            ChefError::Generation(format!(
                "Model output does not match the recipe name schema: {error}"
            ))
        })?;

        Ok(output
            .recipe_names
            .map(|names| names.into_iter().flatten().collect()))
    }

    async fn generate_image(&self, recipe_name: &str) -> ChefResult<String> {
        let input = LanguageModelInput {
            messages: vec![Message::user(vec![Part::text(recipe_image_prompt(
                recipe_name,
            ))])],
            modalities: Some(vec![Modality::Text, Modality::Image]),
            ..Default::default()
        };

        tracing::debug!(
            model = %self.image_model.model_id(),
            recipe = recipe_name,
            "requesting recipe image"
        );
        let response = self.image_model.generate(input).await?;

        let image = response.first_image().ok_or_else(|| {
            ChefError::Generation(format!("No image returned for \"{recipe_name}\""))
        })?;

        Ok(image.to_data_uri()?)
    }
}
