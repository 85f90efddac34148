use std::time::Duration;

use recyclehole_assets::error::AssetError;
use recyclehole_assets::openai::{ImageClient, ImagesGenerateRequest, OpenAiImages};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> ImagesGenerateRequest<'static> {
    ImagesGenerateRequest {
        model: "dall-e-3",
        prompt: "a leaky faucet",
        n: 1,
        size: "1024x1024",
        response_format: Some("b64_json"),
    }
}

async fn client(server: &MockServer) -> OpenAiImages {
    OpenAiImages::new("sk-test", Duration::from_secs(5), "recyclehole-asset-gen/1.0")
        .expect("client")
        .with_endpoint(format!("{}/v1/images/generations", server.uri()))
}

#[tokio::test]
async fn posts_json_and_decodes_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("user-agent", "recyclehole-asset-gen/1.0"))
        .and(body_json(json!({
            "model": "dall-e-3",
            "prompt": "a leaky faucet",
            "n": 1,
            "size": "1024x1024",
            "response_format": "b64_json"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"b64_json": "iVBORw0KGgo="}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client(&server).await.generate(&request()).await.expect("generate");
    assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn surfaces_error_message_from_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": {"message": "Your prompt was rejected"}})),
        )
        .mount(&server)
        .await;

    match client(&server).await.generate(&request()).await {
        Err(AssetError::Api(message)) => assert_eq!(message, "Your prompt was rejected"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    match client(&server).await.generate(&request()).await {
        Err(AssetError::HttpStatus(status, body)) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [{"b64_json": "AA=="}]}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = OpenAiImages::new("sk-test", Duration::from_millis(200), "ua")
        .expect("client")
        .with_endpoint(format!("{}/v1/images/generations", server.uri()));
    assert!(matches!(
        client.generate(&request()).await,
        Err(AssetError::Transport(_))
    ));
}
