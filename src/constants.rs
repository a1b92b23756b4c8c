//! Shared constants for talking to OpenRouter
//!

use std::time::Duration;

/// Chat completions endpoint used for every request.
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used when `--model` isn't given.
pub const DEFAULT_MODEL: &str = "google/gemini-3.1-flash-image-preview";

/// Env var holding the API key when `--api-key` isn't given.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Attribution header, OpenRouter uses it to identify the calling app.
pub const HTTP_REFERER: &str = "https://eggent.app";

/// Attribution header carrying the app title.
pub const X_TITLE: &str = "Eggent Nano Banana Pro";

/// The model accepts at most this many input images per request.
pub const MAX_INPUT_IMAGES: usize = 14;

/// Upper bound on the whole request/response exchange.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Inputs at least this large (on their longest side) get 4K output.
pub const INFER_4K_MIN_DIMENSION: u32 = 3000;

/// Inputs at least this large (on their longest side) get 2K output.
pub const INFER_2K_MIN_DIMENSION: u32 = 1500;

/// Prefix the orchestrating harness looks for to attach produced media.
pub const MEDIA_TOKEN: &str = "MEDIA:";
