//! Chat client struct and header construction.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::ChatError;

use super::config::ClientConfig;

/// Reqwest-backed chat client.
///
/// One client is shared by all virtual users; reqwest pools connections
/// internally.
pub struct HttpChatClient {
    pub(crate) config: ClientConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(config: ClientConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(Self::default_headers(&config)?)
            .build()
            .map_err(|e| ChatError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Headers sent with every request.
    pub(crate) fn default_headers(config: &ClientConfig) -> Result<HeaderMap, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| ChatError::Client("API token is not a valid header value".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_bearer_token() {
        let config = ClientConfig::new("http://localhost/v1/chat-messages", "tok-1");
        let headers = HttpChatClient::default_headers(&config).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer tok-1");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[ACCEPT], "text/event-stream");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let config = ClientConfig::new("http://localhost", "bad\ntoken");
        let err = HttpChatClient::default_headers(&config).unwrap_err();
        assert!(matches!(err, ChatError::Client(_)));
    }
}
