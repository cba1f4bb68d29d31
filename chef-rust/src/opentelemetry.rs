use crate::WorkflowResult;
use opentelemetry::trace::Status;
use std::future::Future;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Clone, Copy)]
pub enum WorkflowSpanMethod {
    SuggestRecipes,
    GetRecipeDetails,
}

impl WorkflowSpanMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::SuggestRecipes => "suggest_recipes",
            Self::GetRecipeDetails => "get_recipe_details",
        }
    }
}

/// Payloads that can report a size on the workflow span.
pub trait SpanPayload {
    fn item_count(&self) -> usize;
}

impl<T> SpanPayload for Vec<T> {
    fn item_count(&self) -> usize {
        self.len()
    }
}

impl SpanPayload for crate::RecipeDetail {
    fn item_count(&self) -> usize {
        self.ingredients.len()
    }
}

pub fn workflow_span(method: WorkflowSpanMethod) -> Span {
    let span = match method {
        WorkflowSpanMethod::SuggestRecipes => info_span!("fridgechef.suggest_recipes"),
        WorkflowSpanMethod::GetRecipeDetails => info_span!("fridgechef.get_recipe_details"),
    };
    span.set_attribute("fridgechef.method", method.as_str());
    span
}

pub async fn trace_workflow<T, Fut>(method: WorkflowSpanMethod, future: Fut) -> WorkflowResult<T>
where
    T: SpanPayload,
    Fut: Future<Output = WorkflowResult<T>>,
{
    let span = workflow_span(method);
    let result = future.instrument(span.clone()).await;

    match &result {
        WorkflowResult::Success { payload, .. } => {
            span.set_attribute(
                "fridgechef.result.items",
                i64::try_from(payload.item_count()).unwrap_or(i64::MAX),
            );
        }
        WorkflowResult::Failure { error } => {
            span.set_attribute("exception.message", error.clone());
            span.set_status(Status::error(error.clone()));
        }
    }

    result
}
