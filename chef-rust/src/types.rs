use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user has in the fridge and what they would like to eat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Free text, usually a comma-separated list of ingredients.
    #[serde(default)]
    pub ingredients: String,
    /// E.g. "vegetarian, gluten-free".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    /// E.g. "Italian, Mexican".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_preferences: Option<String>,
}

/// A candidate dish name, suitable for searching a recipe directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct RecipeName(String);

impl RecipeName {
    /// Returns `None` for blank names.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == name.len() {
            Some(Self(name))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecipeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecipeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One suggestion card: a name and an image that always resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    pub name: String,
    /// An absolute URL or a `data:` URI.
    pub image_url: String,
}

/// Full detail of one recipe, normalized from the recipe directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub recipe_name: String,
    /// Ordered `"<measure> <ingredient>"` lines.
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Outcome of a workflow call. Exactly one of payload and error is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowResult<T> {
    Success {
        payload: T,
        /// Informational status for the user.
        message: Option<String>,
    },
    Failure {
        /// A single user-facing error message.
        error: String,
    },
}

impl<T> WorkflowResult<T> {
    pub fn success(payload: T) -> Self {
        Self::Success {
            payload,
            message: None,
        }
    }

    pub fn success_with_message(payload: T, message: impl Into<String>) -> Self {
        Self::Success {
            payload,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Wire payload of the suggestion workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub recipes: Vec<RecipeSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<WorkflowResult<Vec<RecipeSuggestion>>> for SuggestionResponse {
    fn from(result: WorkflowResult<Vec<RecipeSuggestion>>) -> Self {
        match result {
            WorkflowResult::Success { payload, message } => Self {
                recipes: payload,
                error: None,
                message,
            },
            WorkflowResult::Failure { error } => Self {
                recipes: Vec::new(),
                error: Some(error),
                message: None,
            },
        }
    }
}

/// Wire payload of the detail lookup workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_details: Option<RecipeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<WorkflowResult<RecipeDetail>> for DetailResponse {
    fn from(result: WorkflowResult<RecipeDetail>) -> Self {
        match result {
            WorkflowResult::Success { payload, .. } => Self {
                recipe_details: Some(payload),
                error: None,
            },
            WorkflowResult::Failure { error } => Self {
                recipe_details: None,
                error: Some(error),
            },
        }
    }
}
