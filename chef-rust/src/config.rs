use crate::{directory::DEFAULT_MEALDB_BASE_URL, ChefError, ChefResult};
use std::{env, time::Duration};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings needed to wire a [`crate::FridgeChef`] against the real services.
/// # Default Values
/// - `google_api_key`: empty
/// - `text_model_id`: `gemini-2.0-flash`
/// - `image_model_id`: `gemini-2.0-flash-exp`
/// - `mealdb_base_url`: TheMealDB public v1 endpoint
/// - `request_timeout`: 30 seconds per outbound call
#[derive(Debug, Clone)]
pub struct ChefConfig {
    pub google_api_key: String,
    pub google_base_url: Option<String>,
    pub text_model_id: String,
    pub image_model_id: String,
    pub mealdb_base_url: String,
    pub request_timeout: Duration,
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            google_api_key: String::new(),
            google_base_url: None,
            text_model_id: DEFAULT_TEXT_MODEL.to_string(),
            image_model_id: DEFAULT_IMAGE_MODEL.to_string(),
            mealdb_base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ChefConfig {
    /// Read the configuration from the process environment.
    ///
    /// `GOOGLE_API_KEY` is required. `GOOGLE_BASE_URL`,
    /// `FRIDGECHEF_TEXT_MODEL`, `FRIDGECHEF_IMAGE_MODEL`, `MEALDB_BASE_URL`
    /// and `FRIDGECHEF_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> ChefResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> ChefResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let google_api_key = get("GOOGLE_API_KEY")
            .ok_or_else(|| ChefError::Config("GOOGLE_API_KEY is not set".to_string()))?;

        let request_timeout = match get("FRIDGECHEF_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    ChefError::Config(format!(
                        "FRIDGECHEF_TIMEOUT_SECS must be a whole number of seconds, got '{value}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(ChefError::Config(
                        "FRIDGECHEF_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            google_api_key,
            google_base_url: get("GOOGLE_BASE_URL"),
            text_model_id: get("FRIDGECHEF_TEXT_MODEL").unwrap_or(defaults.text_model_id),
            image_model_id: get("FRIDGECHEF_IMAGE_MODEL").unwrap_or(defaults.image_model_id),
            mealdb_base_url: get("MEALDB_BASE_URL").unwrap_or(defaults.mealdb_base_url),
            request_timeout,
        })
    }
}
