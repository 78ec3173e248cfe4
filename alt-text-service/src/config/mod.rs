use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default model, a fast multimodal Gemini variant.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default upload ceiling (20MB), the inline-data limit of the Gemini API.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AltTextConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    /// Model used for image description (e.g., gemini-1.5-flash)
    pub model: String,
    pub api_base: String,
    /// Request timeout; `None` leaves the call unbounded
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl AltTextConfig {
    /// Fails when `GEMINI_API_KEY` is absent so the process never starts half-configured.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is invalid: {}", e))
                })
            })
            .transpose()?;

        Ok(AltTextConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", None)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                api_base: get_env(
                    "GEMINI_API_BASE",
                    Some(crate::services::providers::gemini::DEFAULT_API_BASE),
                )?,
                timeout_secs,
            },
            upload: UploadConfig {
                max_bytes: get_env(
                    "MAX_UPLOAD_BYTES",
                    Some(&DEFAULT_MAX_UPLOAD_BYTES.to_string()),
                )?
                .parse()
                .map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("MAX_UPLOAD_BYTES is invalid: {}", e))
                })?,
            },
        })
    }
}

/// Read `key`, falling back to `default`. Keys without a default are mandatory.
fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
