//! Error handling

use std::path::PathBuf;

use crate::constants::{API_KEY_ENV, MAX_INPUT_IMAGES};

/// Everything that can stop a generation run. None of them are retried.
#[derive(Debug)]
pub enum NanoBananaError {
    /// Neither `--api-key` nor the env var supplied a key
    MissingCredential,
    /// More input images than the model accepts
    TooManyInputImages(usize),
    /// An input image couldn't be read or decoded
    ImageLoad {
        /// The offending input path
        path: PathBuf,
        /// What went wrong reading or decoding it
        source: image::ImageError,
    },
    /// The API answered with a non-2xx status
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// DNS, connection, timeout or body read failures
    Transport(reqwest::Error),
    /// A 2xx body that isn't the JSON we expect
    MalformedResponse(serde_json::Error),
    /// The response had no choices
    EmptyResponse {
        /// Pretty-printed raw response
        response: String,
    },
    /// No image could be found in the response
    NoImage {
        /// Pretty-printed raw response
        response: String,
    },
    /// The located image payload couldn't be decoded
    InvalidImageData(String),
    /// Writing the output file failed
    Output {
        /// Where we tried to write
        path: PathBuf,
        /// Why it failed
        source: image::ImageError,
    },
}

impl NanoBananaError {
    /// The raw API response, for errors where it's worth showing to the user.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::EmptyResponse { response } | Self::NoImage { response } => Some(response),
            _ => None,
        }
    }
}

impl std::fmt::Display for NanoBananaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => write!(
                f,
                "No API key provided. Either pass --api-key or set the {API_KEY_ENV} environment variable"
            ),
            Self::TooManyInputImages(count) => write!(
                f,
                "Too many input images ({count}). Maximum is {MAX_INPUT_IMAGES}."
            ),
            Self::ImageLoad { path, source } => {
                write!(f, "Error loading input image '{}': {source}", path.display())
            }
            Self::ApiStatus { status, body } => write!(f, "API error {status}: {body}"),
            Self::Transport(err) => write!(f, "Request error: {err}"),
            Self::MalformedResponse(err) => write!(f, "Failed to parse API response: {err}"),
            Self::EmptyResponse { .. } => write!(f, "Empty response from API."),
            Self::NoImage { .. } => write!(f, "No image was generated in the response."),
            Self::InvalidImageData(message) => {
                write!(f, "Generated image data is invalid: {message}")
            }
            Self::Output { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for NanoBananaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::Output { source, .. } => Some(source),
            Self::Transport(err) => Some(err),
            Self::MalformedResponse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NanoBananaError {
    fn from(err: reqwest::Error) -> Self {
        NanoBananaError::Transport(err)
    }
}

impl From<serde_json::Error> for NanoBananaError {
    fn from(err: serde_json::Error) -> Self {
        NanoBananaError::MalformedResponse(err)
    }
}
