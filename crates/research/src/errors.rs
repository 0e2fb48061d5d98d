//! Error types for the research domain and its ports.
//!
//! [`LlmError`] is produced by [`crate::LlmProvider`] implementations. The
//! gatherer never propagates it: a failed category is dropped and logged.
//! [`CouncilError`] is the only error that reaches the caller of
//! [`crate::run_with_research`], and it always originates downstream.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Template errors
// ---------------------------------------------------------------------------

/// A prompt template failed validation at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template must contain exactly one `{query}` slot.
    #[error("prompt template must contain exactly one {{query}} slot, found {found}")]
    SlotCount {
        /// Number of slots actually present.
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Provider errors
// ---------------------------------------------------------------------------

/// Failure of a single model request.
///
/// There is no retry policy attached: every variant is terminal for the
/// request that produced it.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum LlmError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("Transport error: {message}")]
    Transport {
        /// Description from the underlying HTTP client.
        message: String,
    },

    /// The request exceeded its per-request deadline.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The API answered with a body that does not match the expected shape.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// What was wrong with the body.
        message: String,
    },

    /// Credentials could not be resolved before the request was sent.
    #[error("Missing credentials: {message}")]
    MissingCredentials {
        /// Where the credentials were expected.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Council errors
// ---------------------------------------------------------------------------

/// Failure reported by a downstream [`crate::Council`].
#[derive(Debug, Error)]
pub enum CouncilError {
    /// A model call made by the council failed.
    #[error("Council model call failed: {0}")]
    Model(#[from] LlmError),

    /// The council produced no usable answer.
    #[error("Council produced no answer: {reason}")]
    NoAnswer {
        /// Human-readable reason.
        reason: String,
    },
}
