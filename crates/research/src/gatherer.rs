//! Parallel research gathering (stage 0).
//!
//! One request per selected category is issued to the configured research
//! model. All requests run concurrently and the gatherer waits for every one
//! of them to settle. Each request produces an explicit [`CategoryOutcome`];
//! only [`CategoryOutcome::Found`] entries make it into the findings list.
//! A failed or empty request never fails the gather as a whole.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::errors::LlmError;
use crate::identifiers::{CategoryName, ModelId};
use crate::ports::LlmProvider;
use crate::registry::PromptRegistry;
use crate::types::{ChatMessage, ResearchFinding};

/// Configuration injected into a [`ResearchGatherer`] at construction.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// The single model every category is sent to.
    pub model: ModelId,
    /// Category templates; also defines the default category set.
    pub registry: PromptRegistry,
}

impl ResearchConfig {
    /// Uses the built-in film-analysis registry with `model`.
    pub fn builtin(model: ModelId) -> Self {
        Self {
            model,
            registry: PromptRegistry::builtin(),
        }
    }
}

/// Why a category produced no finding.
#[derive(Debug, Clone)]
pub enum DropReason {
    /// The provider returned an error (transport, timeout, HTTP status, ...).
    Provider(LlmError),
    /// The provider answered without usable text.
    EmptyContent,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Provider(error) => write!(f, "{error}"),
            DropReason::EmptyContent => write!(f, "empty response content"),
        }
    }
}

/// Result of a single per-category request.
#[derive(Debug, Clone)]
pub enum CategoryOutcome {
    Found(ResearchFinding),
    Dropped {
        category: CategoryName,
        reason: DropReason,
    },
}

impl CategoryOutcome {
    /// The category this outcome belongs to.
    pub fn category(&self) -> &CategoryName {
        match self {
            CategoryOutcome::Found(finding) => &finding.category,
            CategoryOutcome::Dropped { category, .. } => category,
        }
    }
}

/// Fans research prompts out to the research model and collects findings.
pub struct ResearchGatherer {
    provider: Arc<dyn LlmProvider>,
    config: ResearchConfig,
}

impl ResearchGatherer {
    pub fn new(provider: Arc<dyn LlmProvider>, config: ResearchConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Gathers findings for `categories` (all registered categories when
    /// `None`).
    ///
    /// Unknown categories are ignored, duplicates are collapsed, and failed
    /// or empty requests are dropped. The result holds at most one finding
    /// per distinct requested category, in request order.
    pub async fn gather(
        &self,
        query: &str,
        categories: Option<&[CategoryName]>,
    ) -> Vec<ResearchFinding> {
        let outcomes = self.gather_outcomes(query, categories).await;

        let mut findings = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                CategoryOutcome::Found(finding) => findings.push(finding),
                CategoryOutcome::Dropped { category, reason } => {
                    warn!(category = %category, reason = %reason, "Dropping research category");
                }
            }
        }
        findings
    }

    /// Like [`gather`](Self::gather) but returns every per-category outcome,
    /// including dropped ones.
    #[instrument(skip(self, query, categories), fields(model = %self.config.model))]
    pub async fn gather_outcomes(
        &self,
        query: &str,
        categories: Option<&[CategoryName]>,
    ) -> Vec<CategoryOutcome> {
        let prompts = self.build_prompts(query, categories);
        debug!(requests = prompts.len(), "Issuing research requests");

        let outcomes = join_all(
            prompts
                .into_iter()
                .map(|(category, prompt)| self.request(category, prompt)),
        )
        .await;

        let found = outcomes
            .iter()
            .filter(|o| matches!(o, CategoryOutcome::Found(_)))
            .count();
        info!(
            requested = outcomes.len(),
            found,
            "Research gathering complete"
        );
        outcomes
    }

    fn build_prompts(
        &self,
        query: &str,
        categories: Option<&[CategoryName]>,
    ) -> Vec<(CategoryName, String)> {
        let requested = match categories {
            Some(selected) => selected.to_vec(),
            None => self.config.registry.categories(),
        };

        let mut seen = HashSet::new();
        requested
            .into_iter()
            .filter(|category| seen.insert(category.clone()))
            .filter_map(|category| match self.config.registry.get(&category) {
                Some(template) => {
                    let prompt = template.render(query);
                    Some((category, prompt))
                }
                None => {
                    debug!(category = %category, "Ignoring unknown research category");
                    None
                }
            })
            .collect()
    }

    async fn request(&self, category: CategoryName, prompt: String) -> CategoryOutcome {
        let messages = [ChatMessage::user(prompt.clone())];
        match self.provider.complete(&self.config.model, &messages).await {
            Ok(response) => match response.usable_content() {
                Some(text) => CategoryOutcome::Found(ResearchFinding {
                    findings: text.to_string(),
                    category,
                    prompt,
                }),
                None => CategoryOutcome::Dropped {
                    category,
                    reason: DropReason::EmptyContent,
                },
            },
            Err(error) => CategoryOutcome::Dropped {
                category,
                reason: DropReason::Provider(error),
            },
        }
    }
}
