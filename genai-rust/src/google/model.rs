use super::api::{
    Blob, Content, GenerateContentConfig, GenerateContentParameters, GenerateContentResponse,
    Part as GooglePart, UsageMetadata,
};
use crate::{
    client_utils, ImagePart, LanguageModel, LanguageModelError, LanguageModelInput,
    LanguageModelResult, Message, Modality, ModelResponse, ModelUsage, Part,
    ResponseFormatOption,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "google";

pub struct GoogleModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: String,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            headers,
        }
    }

    fn request_headers(&self) -> LanguageModelResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&self.api_key).map_err(|error| {
            LanguageModelError::InvalidInput(format!("Invalid Google API key: {error}"))
        })?;
        headers.insert(HeaderName::from_static("x-goog-api-key"), api_key);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                LanguageModelError::InvalidInput(format!(
                    "Invalid Google header name '{key}': {error}"
                ))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                LanguageModelError::InvalidInput(format!(
                    "Invalid Google header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl LanguageModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let params = convert_to_generate_content_parameters(input);

                let url = format!("{}/models/{}:generateContent", self.base_url, self.model_id);

                let headers = self.request_headers()?;
                let response: GenerateContentResponse =
                    client_utils::send_json(&self.client, &url, &params, headers, PROVIDER)
                        .await?;

                map_google_response(response)
            },
        )
        .await
    }
}

fn convert_to_generate_content_parameters(input: LanguageModelInput) -> GenerateContentParameters {
    let mut params = GenerateContentParameters {
        contents: convert_to_google_contents(input.messages),
        ..Default::default()
    };

    if let Some(system_prompt) = input.system_prompt {
        params.system_instruction = Some(Content {
            role: Some("system".to_string()),
            parts: Some(vec![GooglePart {
                text: Some(system_prompt),
                ..Default::default()
            }]),
        });
    }

    let mut config = GenerateContentConfig {
        temperature: input.temperature,
        top_p: input.top_p,
        top_k: input.top_k,
        max_output_tokens: input.max_tokens,
        seed: input.seed,
        ..Default::default()
    };

    if let Some(response_format) = input.response_format {
        let (response_mime_type, response_json_schema) =
            convert_to_google_response_schema(response_format);
        config.response_mime_type = Some(response_mime_type);
        config.response_json_schema = response_json_schema;
    }

    if let Some(modalities) = input.modalities {
        config.response_modalities = Some(
            modalities
                .into_iter()
                .map(|m| match m {
                    Modality::Text => "TEXT".to_string(),
                    Modality::Image => "IMAGE".to_string(),
                })
                .collect(),
        );
    }

    params.generation_config = Some(config);
    params.extra = input.extra;

    params
}

fn convert_to_google_contents(messages: Vec<Message>) -> Vec<Content> {
    messages
        .into_iter()
        .map(|message| {
            let Message::User(user_message) = message;
            Content {
                role: Some("user".to_string()),
                parts: Some(
                    user_message
                        .content
                        .into_iter()
                        .map(convert_to_google_part)
                        .collect(),
                ),
            }
        })
        .collect()
}

fn convert_to_google_part(part: Part) -> GooglePart {
    match part {
        Part::Text(text_part) => GooglePart {
            text: Some(text_part.text),
            ..Default::default()
        },
        Part::Image(image_part) => GooglePart {
            inline_data: Some(Blob {
                data: Some(image_part.data),
                mime_type: Some(image_part.mime_type),
            }),
            ..Default::default()
        },
    }
}

fn convert_to_google_response_schema(
    response_format: ResponseFormatOption,
) -> (String, Option<serde_json::Value>) {
    match response_format {
        ResponseFormatOption::Text => ("text/plain".to_string(), None),
        ResponseFormatOption::Json(json_format) => {
            ("application/json".to_string(), json_format.schema)
        }
    }
}

fn map_google_response(response: GenerateContentResponse) -> LanguageModelResult<ModelResponse> {
    if let Some(block_reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_ref())
    {
        let detail = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason_message.clone())
            .unwrap_or_default();
        return Err(LanguageModelError::Refusal(
            format!("Prompt blocked ({block_reason}) {detail}")
                .trim_end()
                .to_string(),
        ));
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| {
            LanguageModelError::Invariant(PROVIDER, "No candidate in response".to_string())
        })?;

    let parts = candidate.content.and_then(|c| c.parts).unwrap_or_default();
    if parts.is_empty() && candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(LanguageModelError::Refusal(
            "Candidate blocked for safety reasons".to_string(),
        ));
    }

    Ok(ModelResponse {
        content: map_google_content(parts)?,
        usage: response.usage_metadata.as_ref().map(map_google_usage_metadata),
    })
}

fn map_google_content(parts: Vec<GooglePart>) -> LanguageModelResult<Vec<Part>> {
    parts
        .into_iter()
        .filter_map(|part| {
            if let Some(text) = part.text {
                // Thought summaries are not part of the answer.
                if part.thought.unwrap_or(false) {
                    None
                } else {
                    Some(Ok(Part::text(text)))
                }
            } else if let Some(inline_data) = part.inline_data {
                match (inline_data.data, inline_data.mime_type) {
                    (Some(data), Some(mime_type)) if mime_type.starts_with("image/") => {
                        Some(Ok(Part::Image(ImagePart::new(data, mime_type))))
                    }
                    (Some(_), Some(_)) => None,
                    _ => Some(Err(LanguageModelError::Invariant(
                        PROVIDER,
                        "Inline data missing data or mime type".to_string(),
                    ))),
                }
            } else {
                None
            }
        })
        .collect()
}

fn map_google_usage_metadata(usage: &UsageMetadata) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
    }
}
