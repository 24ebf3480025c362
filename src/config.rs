//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_PORT};
use serde::Deserialize;
use std::env;

/// Runtime configuration for the paste service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding one `<id>.json` file per paste.
    pub paste_dir: String,
    pub port: u16,
    pub max_upload_size: usize,
    /// Path to the HTML view template; the embedded default is used when
    /// the file is missing.
    pub template_path: String,
    /// Public base URL echoed in upload confirmations.
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self {
            paste_dir: env::var("PASTE_DIR").unwrap_or_else(|_| "./pastes".to_string()),
            port,
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE),
            template_path: env::var("TEMPLATE_PATH")
                .unwrap_or_else(|_| "./templates/view.html".to_string()),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}")),
        }
    }
}
