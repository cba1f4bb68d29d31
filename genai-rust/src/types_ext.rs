use crate::{
    ImagePart, LanguageModelError, LanguageModelResult, Message, ModelResponse,
    Part, TextPart, UserMessage,
};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};

impl TextPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ImagePart {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Build an image part from raw bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(BASE64_STANDARD.encode(bytes), mime_type)
    }

    /// Render the image as a `data:` URI.
    /// Fails when the payload is empty or is not valid base64.
    pub fn to_data_uri(&self) -> LanguageModelResult<String> {
        if self.data.is_empty() {
            return Err(LanguageModelError::Invariant(
                "image",
                "Image part has no data".to_string(),
            ));
        }
        BASE64_STANDARD.decode(&self.data).map_err(|error| {
            LanguageModelError::Invariant("image", format!("Invalid base64 image data: {error}"))
        })?;
        Ok(format!("data:{};base64,{}", self.mime_type, self.data))
    }
}

impl From<TextPart> for Part {
    fn from(value: TextPart) -> Self {
        Self::Text(value)
    }
}

impl From<ImagePart> for Part {
    fn from(value: ImagePart) -> Self {
        Self::Image(value)
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart::new(text))
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Image(ImagePart::new(data, mime_type))
    }
}

impl UserMessage {
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        Self {
            content: parts.into_iter().map(Into::into).collect(),
        }
    }
}

impl Message {
    pub fn user<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        Self::User(UserMessage::new(parts))
    }
}

impl ModelResponse {
    /// Concatenated text of all text parts, or `None` if the response has no
    /// text part.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|part| match part {
                Part::Text(text_part) => Some(text_part.text.as_str()),
                Part::Image(_) => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// The first image part of the response.
    #[must_use]
    pub fn first_image(&self) -> Option<&ImagePart> {
        self.content.iter().find_map(|part| match part {
            Part::Image(image_part) => Some(image_part),
            Part::Text(_) => None,
        })
    }
}
