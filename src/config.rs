use std::env;
use std::path::Path;

use crate::error::ConfigError;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "https://api.clever-cloud.com";
pub const DEFAULT_OUTPUT_FORMAT: &str = "markdown";
pub const SUPPORTED_FORMATS: [&str; 4] = ["markdown", "txt", "csv", "pdf"];

pub const API_TOKEN_VAR: &str = "CLEVER_API_TOKEN";
pub const API_BASE_URL_VAR: &str = "CLEVER_API_BASE_URL";

/// Settings for one run. Passed explicitly to the catalog client.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_token: String,
    pub api_base_url: String,
}

impl Config {
    pub fn new(api_token: impl Into<String>, api_base_url: &str) -> Self {
        Self {
            api_token: api_token.into(),
            api_base_url: sanitize_base_url(api_base_url),
        }
    }

    /// Build the configuration from the process environment.
    ///
    /// The token is mandatory; a blank value counts as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var(API_TOKEN_VAR).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self::new(token.trim(), &get_api_base_url()))
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var(API_BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn validate_output_format(format: &str) -> Result<(), ConfigError> {
    if SUPPORTED_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedFormat(format.to_string()))
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
