use crate::{
    config::DEFAULT_REQUEST_TIMEOUT,
    directory::{MealDbClient, MealDbClientOptions},
    generator::ModelRecipeGenerator,
    images::attach_images,
    names::suggest_names,
    opentelemetry::{trace_workflow, WorkflowSpanMethod},
    validation::validate_recipe_name,
    ChefConfig, ChefError, RecipeDetail, RecipeDirectory, RecipeGenerator, RecipeSuggestion,
    SuggestionRequest, WorkflowResult,
};
use fridgechef_genai::google::{GoogleModel, GoogleModelOptions};
use reqwest::Client;
use std::{sync::Arc, time::Duration};

pub const SUGGESTIONS_FOUND_MESSAGE: &str = "Here are your recipe suggestions!";
pub const NO_SUGGESTIONS_MESSAGE: &str =
    "No recipes found for these ingredients. Try different options!";

/// The two end-to-end FridgeChef operations over injected collaborators.
pub struct FridgeChef {
    generator: Arc<dyn RecipeGenerator>,
    directory: Arc<dyn RecipeDirectory>,
    request_timeout: Duration,
}

impl FridgeChef {
    #[must_use]
    pub fn new(params: FridgeChefParams) -> Self {
        Self {
            generator: params.generator,
            directory: params.directory,
            request_timeout: params.request_timeout,
        }
    }

    pub fn builder(
        generator: Arc<dyn RecipeGenerator>,
        directory: Arc<dyn RecipeDirectory>,
    ) -> FridgeChefParams {
        FridgeChefParams::new(generator, directory)
    }

    /// Wire Gemini and TheMealDB clients from configuration. All clients
    /// share one HTTP connection pool.
    #[must_use]
    pub fn from_config(config: &ChefConfig) -> Self {
        let client = Client::new();
        let model_options = GoogleModelOptions {
            api_key: config.google_api_key.clone(),
            base_url: config.google_base_url.clone(),
            client: Some(client.clone()),
            ..Default::default()
        };

        let generator = ModelRecipeGenerator::new(
            Arc::new(GoogleModel::new(
                config.text_model_id.clone(),
                model_options.clone(),
            )),
            Arc::new(GoogleModel::new(config.image_model_id.clone(), model_options)),
        );
        let directory = MealDbClient::new(MealDbClientOptions {
            base_url: Some(config.mealdb_base_url.clone()),
            client: Some(client),
        });

        Self::builder(Arc::new(generator), Arc::new(directory))
            .request_timeout(config.request_timeout)
            .build()
    }

    /// Suggest recipes with pictures for the ingredients in `request`.
    pub async fn suggest_recipes(
        &self,
        request: SuggestionRequest,
    ) -> WorkflowResult<Vec<RecipeSuggestion>> {
        trace_workflow(
            WorkflowSpanMethod::SuggestRecipes,
            self.run_suggest_recipes(request),
        )
        .await
    }

    async fn run_suggest_recipes(
        &self,
        request: SuggestionRequest,
    ) -> WorkflowResult<Vec<RecipeSuggestion>> {
        let request = match request.validate() {
            Ok(request) => request,
            Err(error) => return WorkflowResult::failure(error.user_message()),
        };

        let names =
            match suggest_names(self.generator.as_ref(), &request, self.request_timeout).await {
                Ok(names) => names,
                Err(error) => {
                    tracing::error!(%error, "recipe suggestion failed");
                    return WorkflowResult::failure(error.user_message());
                }
            };

        if names.is_empty() {
            return WorkflowResult::success_with_message(Vec::new(), NO_SUGGESTIONS_MESSAGE);
        }

        let suggestions = attach_images(self.generator.as_ref(), names, self.request_timeout).await;
        WorkflowResult::success_with_message(suggestions, SUGGESTIONS_FOUND_MESSAGE)
    }

    /// Fetch the full recipe for one suggested name.
    pub async fn get_recipe_details(&self, recipe_name: &str) -> WorkflowResult<RecipeDetail> {
        trace_workflow(
            WorkflowSpanMethod::GetRecipeDetails,
            self.run_get_recipe_details(recipe_name),
        )
        .await
    }

    async fn run_get_recipe_details(&self, recipe_name: &str) -> WorkflowResult<RecipeDetail> {
        let name = match validate_recipe_name(recipe_name) {
            Ok(name) => name,
            Err(error) => return WorkflowResult::failure(error.user_message()),
        };

        let lookup = tokio::time::timeout(self.request_timeout, self.directory.lookup_by_name(name))
            .await
            .unwrap_or_else(|_| {
                Err(ChefError::upstream(
                    name,
                    format!("TheMealDB did not answer within {:?}", self.request_timeout),
                ))
            });

        match lookup {
            Ok(detail) => WorkflowResult::success(detail),
            Err(error) => {
                tracing::error!(recipe = name, %error, "recipe detail lookup failed");
                WorkflowResult::failure(error.user_message())
            }
        }
    }
}

/// Parameters required to create a [`FridgeChef`].
/// # Default Values
/// - `request_timeout`: 30 seconds
pub struct FridgeChefParams {
    pub generator: Arc<dyn RecipeGenerator>,
    pub directory: Arc<dyn RecipeDirectory>,
    /// Upper bound for every single outbound call.
    pub request_timeout: Duration,
}

impl FridgeChefParams {
    pub fn new(generator: Arc<dyn RecipeGenerator>, directory: Arc<dyn RecipeDirectory>) -> Self {
        Self {
            generator,
            directory,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    #[must_use]
    pub fn build(self) -> FridgeChef {
        FridgeChef::new(self)
    }
}
