//! LLM provider infrastructure adapter.
//!
//! Implements the [`research::LlmProvider`] trait for OpenRouter and any
//! other OpenAI-compatible chat-completions endpoint. Additional providers
//! are added as new modules in this crate without any changes to the
//! [`research`] crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, bearer authentication, request
//! formatting, response parsing, and the per-request deadline live here. The
//! [`research`] crate sees only [`research::LlmProvider`].
//!
//! No retry or rate limiting is performed: a failed request is reported once
//! and the caller decides what to do with it.

pub mod openrouter;
mod wire;

pub use openrouter::{OpenRouterProvider, ProviderConfig, DEFAULT_BASE_URL};
