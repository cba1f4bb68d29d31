use crate::{ChefError, ChefResult, RecipeDetail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// TheMealDB spreads ingredients over `strIngredient1..20` and
/// `strMeasure1..20`.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

pub const MISSING_INSTRUCTIONS: &str = "No instructions provided.";

/// A searchable recipe database.
#[async_trait]
pub trait RecipeDirectory: Send + Sync {
    /// Look a recipe up by its exact name and return the first match.
    async fn lookup_by_name(&self, name: &str) -> ChefResult<RecipeDetail>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    meals: Option<Vec<Meal>>,
}

/// One record of TheMealDB search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub str_meal: String,
    #[serde(default)]
    pub str_instructions: Option<String>,
    #[serde(default)]
    pub str_source: Option<String>,
    #[serde(default)]
    pub str_youtube: Option<String>,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    /// Every other field, including the numbered ingredient and measure slots.
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Meal {
    fn slot(&self, prefix: &str, position: usize) -> Option<&str> {
        self.fields
            .get(&format!("{prefix}{position}"))
            .and_then(Value::as_str)
    }

    /// `(ingredient, measure)` for positions `1..=MAX_INGREDIENT_SLOTS`.
    pub fn ingredient_slots(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> + '_ {
        (1..=MAX_INGREDIENT_SLOTS).map(move |position| {
            (
                self.slot("strIngredient", position),
                self.slot("strMeasure", position),
            )
        })
    }

    #[must_use]
    pub fn into_recipe_detail(self) -> RecipeDetail {
        let ingredients = reconcile_ingredients(self.ingredient_slots());

        RecipeDetail {
            recipe_name: self.str_meal,
            ingredients,
            instructions: non_blank(self.str_instructions)
                .unwrap_or_else(|| MISSING_INSTRUCTIONS.to_string()),
            // TheMealDB has no reliable timing or yield data.
            prep_time: None,
            cook_time: None,
            servings: None,
            source_url: non_blank(self.str_source).or_else(|| non_blank(self.str_youtube)),
            image_url: non_blank(self.str_meal_thumb),
        }
    }
}

/// Merge sparse `(ingredient, measure)` slots into ordered
/// `"<measure> <ingredient>"` lines, skipping slots without an ingredient.
pub fn reconcile_ingredients<'a, I>(slots: I) -> Vec<String>
where
    I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
{
    slots
        .into_iter()
        .filter_map(|(ingredient, measure)| {
            let ingredient = ingredient.map(str::trim).filter(|i| !i.is_empty())?;
            match measure.map(str::trim).filter(|m| !m.is_empty()) {
                Some(measure) => Some(format!("{measure} {ingredient}")),
                None => Some(ingredient.to_string()),
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone, Default)]
pub struct MealDbClientOptions {
    pub base_url: Option<String>,
    pub client: Option<Client>,
}

/// [`RecipeDirectory`] backed by the public TheMealDB API.
pub struct MealDbClient {
    base_url: String,
    client: Client,
}

impl MealDbClient {
    #[must_use]
    pub fn new(options: MealDbClientOptions) -> Self {
        let MealDbClientOptions { base_url, client } = options;

        Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_MEALDB_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: client.unwrap_or_else(Client::new),
        }
    }
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new(MealDbClientOptions::default())
    }
}

#[async_trait]
impl RecipeDirectory for MealDbClient {
    async fn lookup_by_name(&self, name: &str) -> ChefResult<RecipeDetail> {
        let url = format!("{}/search.php", self.base_url);
        tracing::debug!(recipe = name, %url, "searching TheMealDB");

        let response = self
            .client
            .get(&url)
            .query(&[("s", name)])
            .send()
            .await
            .map_err(|error| ChefError::upstream(name, format!("Request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChefError::upstream_status(name, status));
        }

        let body = response.bytes().await.map_err(|error| {
            ChefError::upstream(name, format!("Failed to read response: {error}"))
        })?;
        let search: SearchResponse = serde_json::from_slice(&body).map_err(|error| {
            ChefError::upstream(name, format!("Unexpected response format: {error}"))
        })?;

        search
            .meals
            .and_then(|meals| meals.into_iter().next())
            .map(Meal::into_recipe_detail)
            .ok_or_else(|| ChefError::NotFound {
                name: name.to_string(),
            })
    }
}
