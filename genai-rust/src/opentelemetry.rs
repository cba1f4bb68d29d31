use crate::{LanguageModelInput, LanguageModelResult, ModelResponse, ModelUsage, Modality};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct LmSpan {
    span: Span,
    usage: Option<ModelUsage>,
    start_time: Instant,
    ended: bool,
}

impl LmSpan {
    pub fn new(provider: &str, model_id: &str, input: &LanguageModelInput) -> Self {
        let span = info_span!("fridgechef_genai.generate");
        span.set_attribute("gen_ai.operation.name", "generate_content");
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());

        if let Some(max_tokens) = input.max_tokens {
            span.set_attribute("gen_ai.request.max_tokens", i64::from(max_tokens));
        }
        if let Some(temperature) = input.temperature {
            span.set_attribute("gen_ai.request.temperature", temperature);
        }
        let wants_image = input
            .modalities
            .as_ref()
            .is_some_and(|modalities| modalities.contains(&Modality::Image));
        span.set_attribute("fridgechef_genai.image_output", wants_image);

        Self {
            span,
            usage: None,
            start_time: Instant::now(),
            ended: false,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_response(&mut self, response: &ModelResponse) {
        if let Some(usage) = &response.usage {
            self.usage = Some(usage.clone());
        }
        self.span.set_attribute(
            "fridgechef_genai.parts",
            i64::try_from(response.content.len()).unwrap_or(i64::MAX),
        );
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        tracing::debug!(parent: &self.span, error = %error, "model generation failed");
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        if let Some(usage) = &self.usage {
            self.span
                .set_attribute("gen_ai.usage.input_tokens", i64::from(usage.input_tokens));
            self.span
                .set_attribute("gen_ai.usage.output_tokens", i64::from(usage.output_tokens));
        }
        self.span.set_attribute(
            "fridgechef_genai.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

impl Drop for LmSpan {
    fn drop(&mut self) {
        self.on_end();
    }
}

pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    input: LanguageModelInput,
    f: F,
) -> LanguageModelResult<ModelResponse>
where
    F: FnOnce(LanguageModelInput) -> Fut,
    Fut: std::future::Future<Output = LanguageModelResult<ModelResponse>>,
{
    let mut span = LmSpan::new(provider, model_id, &input);
    let result = f(input).instrument(span.span()).await;

    match &result {
        Ok(response) => span.on_response(response),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
