//! Shared mock of the OpenRouter chat completions endpoint
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose;
use image::{DynamicImage, ImageFormat};
use serde_json::{Value, json};
use url::Url;

#[derive(Clone, Debug)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn chat_completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state
        .captured
        .lock()
        .expect("lock")
        .push(Captured { headers, body });
    (state.status, state.reply.clone())
}

/// Serves a canned chat completions reply on a random local port.
pub async fn mock_openrouter(status: StatusCode, reply: String) -> (Url, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        reply,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/api/v1/chat/completions", post(chat_completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let endpoint = Url::parse(&format!("http://{addr}/api/v1/chat/completions")).expect("url");
    (endpoint, captured)
}

pub fn png_data_url(image: DynamicImage) -> String {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).expect("encode");
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(out.into_inner())
    )
}

pub fn image_reply(data_url: &str) -> String {
    json!({
        "id": "gen-123",
        "choices": [{
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": "Here is your banana."}],
                "images": [{"type": "image_url", "image_url": {"url": data_url}}]
            }
        }]
    })
    .to_string()
}

