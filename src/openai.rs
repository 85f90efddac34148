//! Images API client.
//!
//! Docs: https://platform.openai.com/docs/api-reference/images

use std::future::Future;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::IMAGES_ENDPOINT;
use crate::error::AssetError;

/// Request body for POST /v1/images/generations
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImagesGenerateRequest<'a> {
    /// Image model identifier
    pub model: &'a str,
    /// Prompt text
    pub prompt: &'a str,
    /// Number of images, always one here
    pub n: u8,
    /// Target size, eg `1024x1024`
    pub size: &'a str,

    /// For dall-e models, which default to returning a URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<&'a str>,
}

#[derive(Deserialize, Debug, Default)]
struct ImagesGenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Something that turns a generation request into image bytes.
pub trait ImageClient {
    /// Performs one generation attempt.
    fn generate(
        &self,
        request: &ImagesGenerateRequest<'_>,
    ) -> impl Future<Output = Result<Vec<u8>, AssetError>> + Send;
}

/// reqwest-backed [`ImageClient`].
#[derive(Debug, Clone)]
pub struct OpenAiImages {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    user_agent: String,
}

impl OpenAiImages {
    /// Builds a client with a per-request timeout.
    pub fn new(api_key: &str, timeout: Duration, user_agent: &str) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: IMAGES_ENDPOINT.to_string(),
            user_agent: user_agent.to_string(),
        })
    }

    /// Points the client somewhere other than the public API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl ImageClient for OpenAiImages {
    async fn generate(&self, request: &ImagesGenerateRequest<'_>) -> Result<Vec<u8>, AssetError> {
        debug!(
            "POST {} model={} size={}",
            self.endpoint, request.model, request.size
        );
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(USER_AGENT, &self.user_agent)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        decode_response(status.as_u16(), &bytes)
    }
}

/// Extracts image bytes from a raw Images API response.
///
/// Error bodies are parsed even on non-success statuses so the API's own
/// message is surfaced.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<u8>, AssetError> {
    let parsed: Result<ImagesGenerateResponse, _> = serde_json::from_slice(body);
    let success = (200..300).contains(&status);

    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(_) if !success => {
            return Err(AssetError::HttpStatus(
                status,
                String::from_utf8_lossy(body).into_owned(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(err) = parsed.error {
        return Err(AssetError::Api(
            err.message.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    if !success {
        return Err(AssetError::HttpStatus(
            status,
            String::from_utf8_lossy(body).into_owned(),
        ));
    }

    let b64 = parsed
        .data
        .into_iter()
        .next()
        .and_then(|item| item.b64_json)
        .ok_or_else(|| AssetError::InvalidResponse("missing data[0].b64_json".to_string()))?;

    Ok(general_purpose::STANDARD.decode(b64)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_without_response_format() {
        let req = ImagesGenerateRequest {
            model: "gpt-image-1",
            prompt: "a can",
            n: 1,
            size: "1024x1024",
            response_format: None,
        };
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"model": "gpt-image-1", "prompt": "a can", "n": 1, "size": "1024x1024"})
        );

        let req = ImagesGenerateRequest {
            response_format: Some("b64_json"),
            ..req
        };
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(value["response_format"], "b64_json");
    }

    #[test]
    fn decode_success() {
        let body = br#"{"data":[{"b64_json":"aGVsbG8="}]}"#;
        assert_eq!(decode_response(200, body).expect("decode"), b"hello");
    }

    #[test]
    fn decode_error_object() {
        let body = br#"{"error":{"message":"Rate limit reached"}}"#;
        match decode_response(429, body) {
            Err(AssetError::Api(message)) => assert_eq!(message, "Rate limit reached"),
            other => panic!("unexpected {other:?}"),
        }
        match decode_response(200, br#"{"error":{}}"#) {
            Err(AssetError::Api(message)) => assert_eq!(message, "unknown error"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn decode_failures() {
        assert!(matches!(
            decode_response(502, b"<html>bad gateway</html>"),
            Err(AssetError::HttpStatus(502, _))
        ));
        assert!(matches!(
            decode_response(200, br#"{"data":[]}"#),
            Err(AssetError::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_response(200, br#"{"data":[{"b64_json":"***"}]}"#),
            Err(AssetError::Decode(_))
        ));
        assert!(matches!(
            decode_response(200, b"not json"),
            Err(AssetError::InvalidResponse(_))
        ));
    }
}
