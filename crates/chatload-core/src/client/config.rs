//! Chat client configuration.

use std::fmt;
use std::time::Duration;

/// Chat client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// Full endpoint URL, including `/chat-messages`.
    pub chat_url: String,
    pub api_token: String,
    /// Bound on the whole exchange, including reading the stream.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("chat_url", &self.chat_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(chat_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            chat_url: chat_url.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
