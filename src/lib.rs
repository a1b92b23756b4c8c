//! Generate and edit images through OpenRouter's chat completions API

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::path::PathBuf;

use tracing::info;

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod request;
pub mod resolution;
pub mod response;

use cli::CliOptions;
use client::OpenRouterClient;
use constants::MEDIA_TOKEN;
use error::NanoBananaError;
use response::ModelReply;

/// Runs one generation: build, send, interpret, save.
///
/// Progress and the `Image saved:`/`MEDIA:` lines go to stdout. Returns the
/// absolute path of the written PNG.
pub async fn run(options: &CliOptions) -> Result<PathBuf, NanoBananaError> {
    let api_key = options.credential()?;
    let generation = options.generation_request();

    let built = generation
        .build_with(|input| println!("Loaded input image: {}", input.source.display()))?;
    if let Some(max_dimension) = built.inferred_from {
        println!(
            "Auto-detected resolution: {} (from max input dimension {max_dimension})",
            built.resolution
        );
    }

    let client = OpenRouterClient::new(options.endpoint.clone(), api_key)?;
    if generation.is_edit() {
        let count = built.inputs.len();
        println!(
            "Processing {count} image{} with resolution {} via OpenRouter ({})...",
            if count > 1 { "s" } else { "" },
            built.resolution,
            generation.model
        );
    } else {
        println!(
            "Generating image with resolution {} via OpenRouter ({})...",
            built.resolution, generation.model
        );
    }
    info!("Sending request to {}", client.endpoint());

    let body = client.complete(&built.body).await?;
    let reply = ModelReply::parse(&body)?;
    for text in &reply.texts {
        println!("Model response: {text}");
    }

    let image = reply.image_bytes()?;
    let saved = output::save_png(&image, &options.filename)?;

    println!("\nImage saved: {}", saved.display());
    println!("{MEDIA_TOKEN} {}", saved.display());
    Ok(saved)
}
