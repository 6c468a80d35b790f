//! HTTP client for the streaming chat endpoint.
//!
//! `POST {base_url}/chat-messages` with a bearer token, `Accept:
//! text/event-stream`, and the body built by [`crate::ChatRequest::to_body`].
//! The streamed reply is buffered in full before it is handed back.

mod api;
mod client;
mod config;

pub use client::HttpChatClient;
pub use config::ClientConfig;
