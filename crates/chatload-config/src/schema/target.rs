use std::fmt;

use chatload_common::ConfigError;
use serde::{Deserialize, Serialize};

/// The chat API under test.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL; requests go to `{base_url}/chat-messages`.
    pub base_url: String,
    /// Application identifier the token belongs to.
    pub app_id: String,
    /// Bearer token sent in the `Authorization` header.
    pub api_token: String,
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/v1".into(),
            app_id: String::new(),
            api_token: String::new(),
        }
    }
}

impl TargetConfig {
    /// Full URL of the streaming chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat-messages", self.base_url.trim_end_matches('/'))
    }

    /// Fail unless both the app id and the bearer token are present.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::Missing(
                "target.app_id (set CHATLOAD_APP_ID or --app-id)".into(),
            ));
        }
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::Missing(
                "target.api_token (set CHATLOAD_API_TOKEN or --api-token)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TargetConfig {
        TargetConfig {
            base_url: "https://chat.example.com/v1/".into(),
            app_id: "app-1".into(),
            api_token: "secret-token".into(),
        }
    }

    #[test]
    fn chat_url_strips_trailing_slash() {
        assert_eq!(
            configured().chat_url(),
            "https://chat.example.com/v1/chat-messages"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", configured());
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_present() {
        assert!(configured().require_credentials().is_ok());
    }

    #[test]
    fn missing_app_id_is_reported() {
        let mut target = configured();
        target.app_id = "  ".into();
        let err = target.require_credentials().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
        assert!(err.to_string().contains("app_id"));
    }

    #[test]
    fn missing_token_is_reported() {
        let mut target = configured();
        target.api_token.clear();
        let err = target.require_credentials().unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }
}
