use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const IMAGE_COUNT: u32 = 1;
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Error)]
/// Enumerates supported `ImagesError` values.
pub enum ImagesError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image api returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
/// Public struct `ImagesConfig` used across PULL-E components.
pub struct ImagesConfig {
    pub api_base: String,
    pub api_key: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Public struct `ImagesClient` used across PULL-E components.
pub struct ImagesClient {
    client: reqwest::Client,
    config: ImagesConfig,
}

impl ImagesClient {
    pub fn new(config: ImagesConfig) -> Result<Self, ImagesError> {
        if config.api_key.trim().is_empty() {
            return Err(ImagesError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| ImagesError::InvalidResponse(format!("invalid API key header: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn images_generations_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        if base.ends_with("/images/generations") {
            return base.to_string();
        }

        format!("{base}/images/generations")
    }

    /// Requests a single generated image for `prompt` and returns its URL.
    ///
    /// A response whose `data` array is empty or whose first element carries
    /// no `url` yields `Ok(None)`; the caller decides whether that is fatal.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, ImagesError> {
        let body = json!({
            "prompt": prompt,
            "n": IMAGE_COUNT,
            "response_format": "url",
            "size": IMAGE_SIZE,
        });
        let url = self.images_generations_url();

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(ImagesError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        parse_images_response(&raw)
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

fn parse_images_response(raw: &str) -> Result<Option<String>, ImagesError> {
    let parsed: ImagesResponse = serde_json::from_str(raw)?;
    Ok(parsed.data.into_iter().next().and_then(|datum| datum.url))
}
