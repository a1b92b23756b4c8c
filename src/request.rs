//! Building the chat completions request body

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose;
use serde::Serialize;
use tracing::debug;

use crate::constants::MAX_INPUT_IMAGES;
use crate::error::NanoBananaError;
use crate::resolution::Resolution;

/// What the caller asked for, before any files are touched.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    /// Text prompt, sent verbatim
    pub prompt: String,
    /// Images to edit or compose, in order
    pub input_images: Vec<PathBuf>,
    /// Requested output size
    pub resolution: Resolution,
    /// OpenRouter model ID
    pub model: String,
}

/// One input image, re-encoded as a PNG data URL.
#[derive(Clone, Debug)]
pub struct EncodedImagePart {
    /// Where it was loaded from
    pub source: PathBuf,
    /// `data:image/png;base64,...`
    pub data_url: String,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
}

impl EncodedImagePart {
    /// Reads, decodes and re-encodes an image file as PNG.
    pub fn load(path: &Path) -> Result<Self, NanoBananaError> {
        let load_error = |source: image::ImageError| NanoBananaError::ImageLoad {
            path: path.to_path_buf(),
            source,
        };

        let image = image::ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| load_error(err.into()))?
            .decode()
            .map_err(load_error)?;

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(load_error)?;
        let png = png.into_inner();
        debug!(
            "Encoded {} ({}x{}) as {} bytes of PNG",
            path.display(),
            image.width(),
            image.height(),
            png.len()
        );

        Ok(Self {
            source: path.to_path_buf(),
            data_url: format!(
                "data:image/png;base64,{}",
                general_purpose::STANDARD.encode(&png)
            ),
            width: image.width(),
            height: image.height(),
        })
    }

    /// The longer of the two sides.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}

/// Request body for POST /api/v1/chat/completions
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    /// Model ID
    pub model: String,
    /// Always a single user message
    pub messages: Vec<ChatMessage>,
    /// Requested output types
    pub modalities: Vec<Modality>,
    /// Output size directive
    pub image_config: ImageConfig,
}

/// A chat message.
#[derive(Serialize, Debug)]
pub struct ChatMessage {
    /// Message author, `user` for us
    pub role: &'static str,
    /// Image parts first, then the prompt
    pub content: Vec<ContentPart>,
}

/// A typed entry in a message's content list.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Inline image reference
    ImageUrl {
        /// The image location
        image_url: ImageUrl,
    },
    /// Plain text
    Text {
        /// The text itself
        text: String,
    },
}

/// An image location, for us always a data URL.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl {
    /// `data:` URL
    pub url: String,
}

/// Output types the model may produce.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Image output
    Image,
    /// Text output
    Text,
}

/// Image generation settings.
#[derive(Serialize, Debug)]
pub struct ImageConfig {
    /// Target output size
    pub image_size: Resolution,
}

/// A finished request body plus what went into it.
#[derive(Debug)]
pub struct BuiltRequest {
    /// Ready to POST
    pub body: ChatCompletionRequest,
    /// The encoded inputs, in order
    pub inputs: Vec<EncodedImagePart>,
    /// The resolution actually sent
    pub resolution: Resolution,
    /// Set when the resolution came from the inputs, carries the max dimension
    pub inferred_from: Option<u32>,
}

impl GenerationRequest {
    /// Are we editing existing images rather than generating from scratch?
    pub fn is_edit(&self) -> bool {
        !self.input_images.is_empty()
    }

    /// Loads every input image and assembles the request body.
    ///
    /// The count limit is checked before any file is opened, and any input
    /// that fails to load aborts the whole build.
    pub fn build(&self) -> Result<BuiltRequest, NanoBananaError> {
        self.build_with(|_| {})
    }

    /// Like [`GenerationRequest::build`], calling `on_loaded` as soon as each
    /// input has been encoded, before the next one is read.
    pub fn build_with(
        &self,
        mut on_loaded: impl FnMut(&EncodedImagePart),
    ) -> Result<BuiltRequest, NanoBananaError> {
        if self.input_images.len() > MAX_INPUT_IMAGES {
            return Err(NanoBananaError::TooManyInputImages(
                self.input_images.len(),
            ));
        }

        let mut inputs = Vec::with_capacity(self.input_images.len());
        for path in &self.input_images {
            let part = EncodedImagePart::load(path)?;
            on_loaded(&part);
            inputs.push(part);
        }

        let max_dimension = inputs.iter().map(EncodedImagePart::max_dimension).max();
        let (resolution, inferred) = self.resolution.resolve(max_dimension);

        let mut content: Vec<ContentPart> = inputs
            .iter()
            .map(|part| ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: part.data_url.clone(),
                },
            })
            .collect();
        content.push(ContentPart::Text {
            text: self.prompt.clone(),
        });

        Ok(BuiltRequest {
            body: ChatCompletionRequest {
                model: self.model.clone(),
                messages: vec![ChatMessage {
                    role: "user",
                    content,
                }],
                modalities: vec![Modality::Image, Modality::Text],
                image_config: ImageConfig {
                    image_size: resolution,
                },
            },
            inputs,
            resolution,
            inferred_from: if inferred { max_dimension } else { None },
        })
    }
}
