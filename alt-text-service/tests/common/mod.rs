#![allow(dead_code)]

use alt_text_service::config::{AltTextConfig, GeminiSettings, UploadConfig};
use alt_text_service::services::providers::gemini::DEFAULT_API_BASE;
use alt_text_service::services::providers::mock::MockVisionProvider;
use alt_text_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

/// Smallest valid PNG header, enough to stand in for an upload.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockVisionProvider>,
    pub client: reqwest::Client,
}

pub fn test_config() -> AltTextConfig {
    AltTextConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        gemini: GeminiSettings {
            api_key: "test-api-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: None,
        },
        upload: UploadConfig {
            max_bytes: 20 * 1024 * 1024,
        },
    }
}

impl TestApp {
    pub async fn spawn(provider: MockVisionProvider) -> Self {
        Self::spawn_with_config(test_config(), provider).await
    }

    pub async fn spawn_with_config(config: AltTextConfig, provider: MockVisionProvider) -> Self {
        let provider = Arc::new(provider);
        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            provider,
            client,
        }
    }

    pub async fn post_form(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/generate_alt_text", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
