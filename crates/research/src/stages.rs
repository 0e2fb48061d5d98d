//! Runs the optional research stage in front of the council.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};

use crate::enrich::enrich_query;
use crate::errors::CouncilError;
use crate::gatherer::ResearchGatherer;
use crate::identifiers::CategoryName;
use crate::ports::{Council, CouncilOutcome};
use crate::types::ResearchFinding;

/// Metadata describing how a query was handed to the council.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub research_enabled: bool,
    /// The query the council actually received (enriched or original).
    pub council_query: String,
}

/// Everything produced by one run: stage 0 findings plus the council outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilRun {
    /// Empty when research was disabled or every category was dropped.
    pub stage0: Vec<ResearchFinding>,
    pub outcome: CouncilOutcome,
    pub metadata: RunMetadata,
}

/// Sends `query` through the council, gathering and embedding research first
/// when `enable_research` is set.
///
/// With research disabled neither the gatherer nor the enricher is invoked
/// and the council receives `query` unchanged.
pub async fn run_with_research(
    gatherer: &ResearchGatherer,
    council: &dyn Council,
    query: &str,
    categories: Option<&[CategoryName]>,
    enable_research: bool,
) -> Result<CouncilRun, CouncilError> {
    let (stage0, council_query) = if enable_research {
        let findings = gatherer
            .gather(query, categories)
            .instrument(info_span!("stage0"))
            .await;
        let enriched = enrich_query(query, &findings);
        info!(
            findings = findings.len(),
            enriched_len = enriched.len(),
            "Query enriched with research"
        );
        (findings, enriched)
    } else {
        (Vec::new(), query.to_string())
    };

    let outcome = council
        .deliberate(&council_query)
        .instrument(info_span!("council"))
        .await?;

    Ok(CouncilRun {
        stage0,
        outcome,
        metadata: RunMetadata {
            research_enabled: enable_research,
            council_query,
        },
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::LlmError;
    use crate::gatherer::ResearchConfig;
    use crate::identifiers::ModelId;
    use crate::ports::LlmProvider;
    use crate::types::{ChatMessage, ModelResponse};

    #[derive(Default)]
    struct CountingProvider {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl LlmProvider for CountingProvider {
        async fn complete(
            &self,
            _model: &ModelId,
            _messages: &[ChatMessage],
        ) -> Result<ModelResponse, LlmError> {
            *self.calls.lock().unwrap() += 1;
            Ok(ModelResponse::text("insight"))
        }
    }

    /// Records the query it receives and echoes it back as the answer.
    #[derive(Default)]
    struct RecordingCouncil {
        received: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Council for RecordingCouncil {
        async fn deliberate(&self, query: &str) -> Result<CouncilOutcome, CouncilError> {
            self.received.lock().unwrap().push(query.to_string());
            Ok(CouncilOutcome {
                stages: BTreeMap::new(),
                chairman_model: ModelId::new("chair").unwrap(),
                final_answer: query.to_string(),
            })
        }
    }

    struct FailingCouncil;

    #[async_trait]
    impl Council for FailingCouncil {
        async fn deliberate(&self, _query: &str) -> Result<CouncilOutcome, CouncilError> {
            Err(CouncilError::NoAnswer {
                reason: "chairman unavailable".into(),
            })
        }
    }

    fn gatherer(provider: Arc<CountingProvider>) -> ResearchGatherer {
        ResearchGatherer::new(
            provider,
            ResearchConfig::builtin(ModelId::new("research").unwrap()),
        )
    }

    #[tokio::test]
    async fn disabled_research_forwards_query_unchanged() {
        let provider = Arc::new(CountingProvider::default());
        let council = RecordingCouncil::default();

        let run = run_with_research(&gatherer(provider.clone()), &council, "q", None, false)
            .await
            .unwrap();

        assert!(run.stage0.is_empty());
        assert_eq!(*provider.calls.lock().unwrap(), 0);
        assert_eq!(council.received.lock().unwrap().as_slice(), ["q"]);
        assert!(!run.metadata.research_enabled);
    }

    #[tokio::test]
    async fn enabled_research_sends_enriched_query() {
        let provider = Arc::new(CountingProvider::default());
        let council = RecordingCouncil::default();

        let run = run_with_research(&gatherer(provider.clone()), &council, "q", None, true)
            .await
            .unwrap();

        assert_eq!(run.stage0.len(), 3);
        assert_eq!(*provider.calls.lock().unwrap(), 3);
        let received = council.received.lock().unwrap();
        assert_eq!(received[0], enrich_query("q", &run.stage0));
        assert_eq!(run.metadata.council_query, received[0]);
    }

    #[tokio::test]
    async fn council_failure_is_surfaced() {
        let provider = Arc::new(CountingProvider::default());
        let result =
            run_with_research(&gatherer(provider), &FailingCouncil, "q", None, true).await;

        assert!(matches!(result, Err(CouncilError::NoAnswer { .. })));
    }
}
