//! Pulling the generated image out of a chat completions response

use base64::Engine;
use base64::engine::general_purpose;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::NanoBananaError;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<MessageContent>,
    #[serde(default)]
    images: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<Value>),
}

/// Content entries we care about; anything else is skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentItem {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrlRef },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ImageUrlRef {
    #[serde(default)]
    url: String,
}

/// What the model said, and the image it made if any.
#[derive(Debug)]
pub struct ModelReply {
    /// Text the model returned, in order
    pub texts: Vec<String>,
    /// Data URL of the generated image
    pub image: Option<String>,
    raw: String,
}

impl ModelReply {
    /// Parses a raw response body.
    ///
    /// Fails on invalid JSON or an empty `choices` list. A reply without an
    /// image is still returned so its text can be shown. Plain string content
    /// is a text-only answer, any `images[]` next to it are ignored.
    pub fn parse(body: &[u8]) -> Result<Self, NanoBananaError> {
        let value: Value = serde_json::from_slice(body)?;
        let raw = serde_json::to_string_pretty(&value)?;
        let parsed: ChatCompletionResponse = serde_json::from_value(value)?;

        let Some(choice) = parsed.choices.unwrap_or_default().into_iter().next() else {
            return Err(NanoBananaError::EmptyResponse { response: raw });
        };
        let message = choice.message.unwrap_or_default();

        let parts = match message.content {
            Some(MessageContent::Text(text)) => {
                return Ok(Self {
                    texts: vec![text],
                    image: None,
                    raw,
                });
            }
            Some(MessageContent::Parts(parts)) => parts,
            None => Vec::new(),
        };

        let mut texts = Vec::new();
        let mut content_image = None;
        for part in parts {
            // non-object entries and unknown shapes are ignored
            match serde_json::from_value::<ResponseContentItem>(part) {
                Ok(ResponseContentItem::Text { text }) if !text.is_empty() => texts.push(text),
                Ok(ResponseContentItem::ImageUrl { image_url }) => {
                    if content_image.is_none() && is_data_url(&image_url.url) {
                        content_image = Some(image_url.url);
                    }
                }
                Ok(_) => {}
                Err(err) => debug!("Skipping content part: {err}"),
            }
        }

        let image = message
            .images
            .unwrap_or_default()
            .iter()
            .filter_map(descriptor_url)
            .find(|url| is_data_url(url))
            .or(content_image);

        Ok(Self { texts, image, raw })
    }

    /// Decodes the located image, or fails with `NoImage`.
    pub fn image_bytes(&self) -> Result<Vec<u8>, NanoBananaError> {
        let Some(url) = &self.image else {
            return Err(NanoBananaError::NoImage {
                response: self.raw.clone(),
            });
        };
        decode_data_url(url)
    }
}

/// `{"type": "image_url", "image_url": {"url": ...}}`, tolerating a bare
/// string `image_url` or a top-level `url`.
fn descriptor_url(descriptor: &Value) -> Option<String> {
    let url = match descriptor.get("image_url") {
        Some(Value::String(url)) => Some(url.as_str()),
        Some(inner) => inner.get("url").and_then(Value::as_str),
        None => descriptor.get("url").and_then(Value::as_str),
    }?;
    Some(url.to_string())
}

fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Decodes the base64 payload of a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, NanoBananaError> {
    let Some((_header, payload)) = url.split_once(',') else {
        return Err(NanoBananaError::InvalidImageData(
            "data URL has no payload".to_string(),
        ));
    };
    let payload: String = payload.split_whitespace().collect();
    general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| NanoBananaError::InvalidImageData(format!("bad base64: {err}")))
}
