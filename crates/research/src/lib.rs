//! Research enrichment domain for the LLM council.
//!
//! Before a query reaches the council, stage 0 asks a single research model
//! a set of category-specific questions (cultural context, narrative
//! structure, philosophical themes) and embeds the answers into the query as
//! advisory context.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed ([`LlmProvider`], [`Council`]); infrastructure
//! crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`CategoryName`, `ModelId`, `RunId`) and the title transform |
//! | [`template`] | `PromptTemplate` with a single `{query}` slot |
//! | [`registry`] | `PromptRegistry` and the built-in film-analysis templates |
//! | [`types`] | Chat messages, model responses, findings, timestamps |
//! | [`ports`] | `LlmProvider` and `Council` traits |
//! | [`gatherer`] | Parallel per-category fan-out with explicit outcomes |
//! | [`enrich`] | Enriched-query and display rendering |
//! | [`stages`] | Research-then-council orchestration |
//! | [`errors`] | Error types |

pub mod enrich;
pub mod errors;
pub mod gatherer;
pub mod identifiers;
pub mod ports;
pub mod registry;
pub mod stages;
pub mod template;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use enrich::{enrich_query, format_for_display, NO_FINDINGS_MESSAGE};
pub use errors::{CouncilError, LlmError, TemplateError};
pub use gatherer::{CategoryOutcome, DropReason, ResearchConfig, ResearchGatherer};
pub use identifiers::{category_title, CategoryName, ModelId, RunId};
pub use ports::{Council, CouncilOutcome, LlmProvider};
pub use registry::PromptRegistry;
pub use stages::{run_with_research, CouncilRun, RunMetadata};
pub use template::{PromptTemplate, QUERY_SLOT};
pub use types::{ChatMessage, ChatRole, ModelResponse, ResearchFinding, Timestamp};
