//! Client configuration.

use serde::{Deserialize, Serialize};

const BASE_URL_ENV: &str = "QA_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for the Q&A service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root, stored without a trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the base URL from `QA_API_BASE_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    /// Endpoint that opens a streaming chat exchange for a subject.
    pub(crate) fn chats_url(&self, subject_id: &str) -> String {
        format!("{}/v1/subjects/{}/chats", self.base_url, subject_id)
    }

    /// Endpoint that records feedback for a completed exchange.
    pub(crate) fn feedback_url(&self, subject_id: &str, chat_id: &str) -> String {
        format!(
            "{}/v1/subjects/{}/chats/{}/feedback",
            self.base_url, subject_id, chat_id
        )
    }
}
