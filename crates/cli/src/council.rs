//! A minimal council that answers with a single chairman model.
//!
//! Stands in for the full multi-member council so the driver can run end to
//! end. It performs no member fan-out, ranking, or aggregation; its only
//! stage output is `stage3`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use research::{ChatMessage, Council, CouncilError, CouncilOutcome, LlmProvider, ModelId};
use serde_json::json;
use tracing::instrument;

pub struct DirectCouncil {
    provider: Arc<dyn LlmProvider>,
    chairman: ModelId,
}

impl DirectCouncil {
    pub fn new(provider: Arc<dyn LlmProvider>, chairman: ModelId) -> Self {
        Self { provider, chairman }
    }
}

#[async_trait]
impl Council for DirectCouncil {
    #[instrument(skip(self, query), fields(chairman = %self.chairman, query_len = query.len()))]
    async fn deliberate(&self, query: &str) -> Result<CouncilOutcome, CouncilError> {
        let response = self
            .provider
            .complete(&self.chairman, &[ChatMessage::user(query)])
            .await?;

        let answer = response
            .usable_content()
            .ok_or_else(|| CouncilError::NoAnswer {
                reason: format!("{} returned no content", self.chairman),
            })?
            .to_string();

        let mut stages = BTreeMap::new();
        stages.insert(
            "stage3".to_string(),
            json!({ "model": self.chairman, "response": answer }),
        );

        Ok(CouncilOutcome {
            stages,
            chairman_model: self.chairman.clone(),
            final_answer: answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use research::{LlmError, ModelResponse};

    use super::*;

    struct FixedProvider(Option<&'static str>);

    #[async_trait]
    impl LlmProvider for FixedProvider {
        async fn complete(
            &self,
            _model: &ModelId,
            _messages: &[ChatMessage],
        ) -> Result<ModelResponse, LlmError> {
            Ok(ModelResponse {
                content: self.0.map(str::to_string),
            })
        }
    }

    fn council(content: Option<&'static str>) -> DirectCouncil {
        DirectCouncil::new(
            Arc::new(FixedProvider(content)),
            ModelId::new("chair-model").unwrap(),
        )
    }

    #[tokio::test]
    async fn answer_is_reported_as_stage3() {
        let outcome = council(Some("A landmark epic.")).deliberate("q").await.unwrap();

        assert_eq!(outcome.final_answer, "A landmark epic.");
        assert_eq!(outcome.chairman_model.as_str(), "chair-model");
        assert_eq!(
            outcome.stages["stage3"],
            json!({"model": "chair-model", "response": "A landmark epic."})
        );
    }

    #[tokio::test]
    async fn empty_answer_is_an_error() {
        let result = council(None).deliberate("q").await;
        assert!(matches!(result, Err(CouncilError::NoAnswer { .. })));
    }
}
