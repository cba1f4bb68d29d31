use reqwest::StatusCode;
use thiserror::Error;

/// Message shown to the user whenever recipe name generation fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate recipes. The culinary AI might be busy. Please try again.";

const MAX_DISPLAYABLE_DETAIL_LEN: usize = 200;

const INTERNAL_INDICATORS: &[&str] = &[
    "internal",
    "server",
    "stack",
    "status",
    "http",
    "panic",
    "exception",
    "api key",
    // Parser and provider diagnostics.
    "invariant",
    "schema",
    "json",
    "parse",
    "expected",
    "invalid type",
    "column",
    "base64",
    "transport",
];

#[derive(Debug, Error)]
pub enum ChefError {
    /// The caller supplied malformed or missing input.
    #[error("{0}")]
    Validation(String),
    /// The model failed to produce recipe names.
    #[error("Recipe generation failed: {0}")]
    Generation(String),
    /// The recipe directory has no match for the name.
    #[error("No recipe details found for \"{name}\".")]
    NotFound { name: String },
    /// The recipe directory answered with a failure or an unreadable body.
    #[error("Failed to fetch details for \"{name}\": {message}")]
    Upstream {
        name: String,
        status: Option<StatusCode>,
        message: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ChefResult<T> = Result<T, ChefError>;

impl ChefError {
    pub fn upstream(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            name: name.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn upstream_status(name: impl Into<String>, status: StatusCode) -> Self {
        Self::Upstream {
            name: name.into(),
            status: Some(status),
            message: format!("TheMealDB API request failed with status {}", status.as_u16()),
        }
    }

    /// The message to show to the end user.
    ///
    /// Generation failures only surface their detail when it looks like a
    /// short, user-facing sentence; anything else falls back to
    /// [`GENERATION_FAILED_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(detail) if is_displayable_detail(detail) => {
                format!("{GENERATION_FAILED_MESSAGE} ({detail})")
            }
            Self::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<fridgechef_genai::LanguageModelError> for ChefError {
    fn from(error: fridgechef_genai::LanguageModelError) -> Self {
        Self::Generation(error.to_string())
    }
}

/// Whether a technical detail is safe and useful to show to a user.
pub(crate) fn is_displayable_detail(detail: &str) -> bool {
    let detail = detail.trim();
    if detail.is_empty() || detail.len() > MAX_DISPLAYABLE_DETAIL_LEN || detail.contains('\n') {
        return false;
    }
    let lowered = detail.to_lowercase();
    !INTERNAL_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}
