//! Chat-completions wire format (request and response bodies).

use research::{ChatMessage, ModelResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Extracts the first choice's content.
    ///
    /// Returns `None` when the body has no choices at all, which the caller
    /// treats as malformed. A choice with a null or missing message maps to a
    /// response without content.
    pub fn into_model_response(self) -> Option<ModelResponse> {
        let choice = self.choices.into_iter().next()?;
        Some(ModelResponse {
            content: choice.message.and_then(|message| message.content),
        })
    }
}
