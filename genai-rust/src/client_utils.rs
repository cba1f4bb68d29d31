use crate::LanguageModelError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Returns an error on any non-success status code or on a body that does
/// not deserialize into `R`.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
    provider: &'static str,
) -> Result<R, LanguageModelError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LanguageModelError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ));
    }

    let body = response.bytes().await?;
    serde_json::from_slice::<R>(&body).map_err(|error| {
        LanguageModelError::Invariant(provider, format!("Failed to parse response: {error}"))
    })
}
