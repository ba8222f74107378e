//! AI Backend Integration
//!
//! Chat and topic explanation requests against the local AI server.
//! Requests are gated on the connectivity monitor's online flag.

mod client;

pub use client::{AiClient, AiClientConfig, AiError, DEFAULT_ENDPOINT};
