use crate::{ChefError, ChefResult, SuggestionRequest};

pub const MIN_INGREDIENTS_LEN: usize = 3;

pub const INGREDIENTS_TOO_SHORT_MESSAGE: &str =
    "Please enter at least one ingredient (minimum 3 characters).";

pub const MISSING_RECIPE_NAME_MESSAGE: &str = "Please provide a recipe name.";

impl SuggestionRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_dietary_restrictions(mut self, restrictions: impl Into<String>) -> Self {
        self.dietary_restrictions = Some(restrictions.into());
        self
    }

    #[must_use]
    pub fn with_cuisine_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.cuisine_preferences = Some(preferences.into());
        self
    }

    /// Check the request and return its normalized form: every field trimmed,
    /// blank optional fields removed.
    pub fn validate(self) -> ChefResult<Self> {
        let ingredients = self.ingredients.trim();
        if ingredients.chars().count() < MIN_INGREDIENTS_LEN {
            return Err(ChefError::Validation(
                INGREDIENTS_TOO_SHORT_MESSAGE.to_string(),
            ));
        }

        Ok(Self {
            ingredients: ingredients.to_string(),
            dietary_restrictions: non_blank(self.dietary_restrictions),
            cuisine_preferences: non_blank(self.cuisine_preferences),
        })
    }
}

/// Trim a recipe name for lookup, rejecting blank names.
pub fn validate_recipe_name(name: &str) -> ChefResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(ChefError::Validation(MISSING_RECIPE_NAME_MESSAGE.to_string()))
    } else {
        Ok(name)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
