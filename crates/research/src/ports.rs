//! Port traits implemented by infrastructure crates.
//!
//! The research domain defines *what* it needs from a model API and from the
//! downstream council; `llm` and `cli` supply *how*.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{CouncilError, LlmError};
use crate::identifiers::ModelId;
use crate::types::{ChatMessage, ModelResponse};

/// The model request primitive.
///
/// Implementations own transport, authentication, and the per-request
/// deadline. They do not retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `messages` to `model` and returns its response.
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
    ) -> Result<ModelResponse, LlmError>;
}

/// Output of the downstream council stages for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilOutcome {
    /// Stage name (e.g. `"stage1"`) to that stage's output.
    pub stages: BTreeMap<String, serde_json::Value>,
    /// Model that produced the final answer.
    pub chairman_model: ModelId,
    /// The final synthesized answer.
    pub final_answer: String,
}

/// The downstream council (stages 1–3).
///
/// Opaque to this crate beyond "accepts a query string, returns an outcome".
#[async_trait]
pub trait Council: Send + Sync {
    async fn deliberate(&self, query: &str) -> Result<CouncilOutcome, CouncilError>;
}
