mod config;
mod directory;
mod errors;
mod generator;
mod images;
mod names;
mod opentelemetry;
mod prompt;
mod types;
mod validation;
mod workflow;

pub use config::{ChefConfig, DEFAULT_IMAGE_MODEL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TEXT_MODEL};
pub use directory::{
    reconcile_ingredients, Meal, MealDbClient, MealDbClientOptions, RecipeDirectory,
    DEFAULT_MEALDB_BASE_URL, MAX_INGREDIENT_SLOTS, MISSING_INSTRUCTIONS,
};
pub use errors::{ChefError, ChefResult, GENERATION_FAILED_MESSAGE};
pub use generator::{ModelRecipeGenerator, RecipeGenerator};
pub use images::{attach_images, placeholder_image_url};
pub use names::{normalize_names, suggest_names, MAX_RECIPE_NAMES};
pub use prompt::{recipe_names_schema, RECIPE_NAMES_KEY};
pub use types::*;
pub use validation::{
    validate_recipe_name, INGREDIENTS_TOO_SHORT_MESSAGE, MIN_INGREDIENTS_LEN,
    MISSING_RECIPE_NAME_MESSAGE,
};
pub use workflow::{FridgeChef, FridgeChefParams, NO_SUGGESTIONS_MESSAGE, SUGGESTIONS_FOUND_MESSAGE};
