//! Integration tests for `POST /generate_alt_text` against a mock provider.

mod common;

use alt_text_service::handlers::alt_text::ALT_TEXT_INSTRUCTION;
use alt_text_service::services::providers::mock::MockVisionProvider;
use common::{TestApp, PNG_BYTES};
use reqwest::multipart;
use reqwest::StatusCode;

fn image_form(file_name: &str, mime: &str, data: &[u8]) -> multipart::Form {
    multipart::Form::new().part(
        "image",
        multipart::Part::bytes(data.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime)
            .unwrap(),
    )
}

#[tokio::test]
async fn valid_image_returns_alt_text() {
    let app = TestApp::spawn(MockVisionProvider::with_text("A tabby cat asleep on a sofa.")).await;

    let response = app.post_form(image_form("cat.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["alt_text"], "A tabby cat asleep on a sofa.");
    assert_eq!(app.provider.call_count(), 1);
}

#[tokio::test]
async fn provider_receives_instruction_mime_type_and_bytes() {
    let app = TestApp::spawn(MockVisionProvider::with_text("A photo.")).await;

    app.post_form(image_form("photo.jpg", "image/jpeg", PNG_BYTES))
        .await;

    let recorded = app.provider.last_request().expect("provider was not called");
    assert_eq!(recorded.instruction, ALT_TEXT_INSTRUCTION);
    assert_eq!(recorded.image.mime_type, "image/jpeg");
    assert_eq!(recorded.image.data, PNG_BYTES);
}

#[tokio::test]
async fn missing_image_field_returns_400_without_calling_provider() {
    let app = TestApp::spawn(MockVisionProvider::with_text("unused")).await;

    let form = multipart::Form::new().text("caption", "hello");
    let response = app.post_form(form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image uploaded.");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn image_field_without_filename_counts_as_missing() {
    let app = TestApp::spawn(MockVisionProvider::with_text("unused")).await;

    let form = multipart::Form::new().text("image", "not a file");
    let response = app.post_form(form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image uploaded.");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn empty_filename_returns_400_without_calling_provider() {
    let app = TestApp::spawn(MockVisionProvider::with_text("unused")).await;

    let response = app.post_form(image_form("", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image selected.");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn non_multipart_body_returns_400() {
    let app = TestApp::spawn(MockVisionProvider::with_text("unused")).await;

    let response = app
        .client
        .post(format!("{}/generate_alt_text", app.address))
        .json(&serde_json::json!({ "image": "cat.png" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image uploaded.");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn provider_failure_returns_500_with_message() {
    let app = TestApp::spawn(MockVisionProvider::failing("quota exceeded")).await;

    let response = app.post_form(image_form("cat.png", "image/png", PNG_BYTES)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to process image"));
    assert!(error.contains("quota exceeded"));
    assert_eq!(app.provider.call_count(), 1);
}

#[tokio::test]
async fn missing_content_type_falls_back_to_octet_stream() {
    let app = TestApp::spawn(MockVisionProvider::with_text("Something.")).await;

    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(PNG_BYTES.to_vec()).file_name("blob"),
    );
    let response = app.post_form(form).await;

    assert_eq!(response.status(), StatusCode::OK);
    let recorded = app.provider.last_request().unwrap();
    assert_eq!(recorded.image.mime_type, "application/octet-stream");
}

#[tokio::test]
async fn first_image_field_wins() {
    let app = TestApp::spawn(MockVisionProvider::with_text("First.")).await;

    let form = multipart::Form::new()
        .text("note", "ignored")
        .part(
            "image",
            multipart::Part::bytes(b"first".to_vec())
                .file_name("a.png")
                .mime_str("image/png")
                .unwrap(),
        )
        .part(
            "image",
            multipart::Part::bytes(b"second".to_vec())
                .file_name("b.png")
                .mime_str("image/png")
                .unwrap(),
        );
    let response = app.post_form(form).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.provider.call_count(), 1);
    assert_eq!(app.provider.last_request().unwrap().image.data, b"first");
}

#[tokio::test]
async fn oversized_upload_is_rejected_before_provider() {
    let mut config = common::test_config();
    config.upload.max_bytes = 1024;
    let app = TestApp::spawn_with_config(config, MockVisionProvider::with_text("unused")).await;

    let response = app
        .post_form(image_form("big.png", "image/png", &vec![0u8; 8 * 1024]))
        .await;

    assert!(response.status().is_client_error());
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn(MockVisionProvider::with_text("A photo.")).await;

    let response = app
        .client
        .post(format!("{}/generate_alt_text", app.address))
        .header("x-request-id", "req-42")
        .multipart(image_form("cat.png", "image/png", PNG_BYTES))
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
