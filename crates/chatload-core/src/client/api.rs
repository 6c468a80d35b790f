//! ChatTransport implementation for HttpChatClient.

use std::time::Instant;

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::{ChatError, ChatExchange, ChatRequest, ChatTransport};

use super::client::HttpChatClient;

fn map_reqwest_error(e: reqwest::Error) -> ChatError {
    if e.is_timeout() {
        ChatError::Timeout
    } else {
        ChatError::Network(e.to_string())
    }
}

/// Read the whole streamed body, noting when the first chunk arrived.
async fn read_stream(
    response: reqwest::Response,
    started: Instant,
) -> Result<(String, Option<std::time::Duration>), ChatError> {
    let mut stream = response.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();
    let mut first_chunk = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        if first_chunk.is_none() && !chunk.is_empty() {
            first_chunk = Some(started.elapsed());
        }
        buf.extend_from_slice(&chunk);
    }

    Ok((String::from_utf8_lossy(&buf).into_owned(), first_chunk))
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatExchange, ChatError> {
        debug!(
            user = %request.user,
            conversation = request.conversation_id.as_deref().unwrap_or(""),
            "chat request"
        );

        let started = Instant::now();
        let response = self
            .http
            .post(&self.config.chat_url)
            .json(&request.to_body())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let (body, first_chunk) = read_stream(response, started).await?;
        if body.trim().is_empty() {
            return Err(ChatError::EmptyBody);
        }

        Ok(ChatExchange {
            body,
            elapsed: started.elapsed(),
            first_chunk,
        })
    }
}
