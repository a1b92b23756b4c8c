//! CLI parser
use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::constants::{API_KEY_ENV, DEFAULT_MODEL, OPENROUTER_URL};
use crate::error::NanoBananaError;
use crate::request::GenerationRequest;
use crate::resolution::Resolution;

#[derive(Parser, Debug)]
#[command(name = "nanobanana")]
#[command(about = "Generate or edit images with Gemini image models via OpenRouter")]
/// CLI Options
pub struct CliOptions {
    #[clap(long, short)]
    /// Image description/prompt
    pub prompt: String,

    #[clap(long, short)]
    /// Output filename (e.g. sunset-mountains.png), written as PNG
    pub filename: PathBuf,

    #[clap(long = "input-image", short = 'i', value_name = "IMAGE")]
    /// Input image path(s) for editing/composition. Repeat for up to 14 images.
    pub input_images: Vec<PathBuf>,

    #[clap(long, short, value_enum, default_value_t = Resolution::OneK)]
    /// Output resolution. Left at 1K, it's inferred from the largest input image.
    pub resolution: Resolution,

    #[clap(long, short = 'k', env = API_KEY_ENV, hide_env_values = true)]
    /// OpenRouter API key.
    /// Env: OPENROUTER_API_KEY
    pub api_key: Option<String>,

    #[clap(long, short, default_value = DEFAULT_MODEL)]
    /// OpenRouter model ID
    pub model: String,

    #[clap(long, help = "Enable debug logging", env = "NANOBANANA_DEBUG")]
    /// Enable debug logging. Env: NANOBANANA_DEBUG
    pub debug: bool,

    #[clap(long, hide = true, default_value = OPENROUTER_URL, env = "NANOBANANA_ENDPOINT")]
    /// Chat completions endpoint, for proxies and tests.
    /// Env: NANOBANANA_ENDPOINT
    pub endpoint: Url,
}

impl CliOptions {
    /// The bearer token to send, as given. Blank keys count as missing.
    pub fn credential(&self) -> Result<&str, NanoBananaError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(NanoBananaError::MissingCredential)
    }

    /// Everything the request builder needs, minus the key.
    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            input_images: self.input_images.clone(),
            resolution: self.resolution,
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        let mut argv = vec!["nanobanana"];
        argv.extend_from_slice(args);
        CliOptions::try_parse_from(argv).expect("parse args")
    }

    #[test]
    fn short_flags_and_defaults() {
        let cli = parse(&["-p", "a cat", "-f", "out.png", "-k", "sk-test"]);
        assert_eq!(cli.prompt, "a cat");
        assert_eq!(cli.filename, PathBuf::from("out.png"));
        assert!(cli.input_images.is_empty());
        assert_eq!(cli.resolution, Resolution::OneK);
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert_eq!(cli.endpoint.as_str(), OPENROUTER_URL);
        assert_eq!(cli.credential().expect("key"), "sk-test");
    }

    #[test]
    fn repeated_input_images_keep_order() {
        let cli = parse(&[
            "--prompt",
            "merge",
            "--filename",
            "out.png",
            "-i",
            "a.png",
            "--input-image",
            "b.jpg",
            "-r",
            "0.5K",
            "-m",
            "some/model",
        ]);
        assert_eq!(
            cli.input_images,
            vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]
        );
        assert_eq!(cli.resolution, Resolution::HalfK);
        assert_eq!(cli.model, "some/model");
    }

    #[test]
    fn rejects_unknown_resolution() {
        let result =
            CliOptions::try_parse_from(["nanobanana", "-p", "x", "-f", "o.png", "-r", "8K"]);
        assert!(result.is_err());
    }

    #[test]
    fn prompt_and_filename_are_required() {
        assert!(CliOptions::try_parse_from(["nanobanana", "-f", "o.png"]).is_err());
        assert!(CliOptions::try_parse_from(["nanobanana", "-p", "x"]).is_err());
    }

    #[test]
    fn key_is_sent_as_given() {
        let cli = parse(&["-p", "x", "-f", "o.png", "-k", " sk-padded "]);
        assert_eq!(cli.credential().expect("key"), " sk-padded ");
    }

    #[test]
    fn blank_key_is_missing() {
        let mut cli = parse(&["-p", "x", "-f", "o.png", "-k", "sk"]);
        cli.api_key = Some("   ".to_string());
        assert!(matches!(
            cli.credential(),
            Err(NanoBananaError::MissingCredential)
        ));
        cli.api_key = None;
        assert!(matches!(
            cli.credential(),
            Err(NanoBananaError::MissingCredential)
        ));
    }
}
