//! Comparison artifacts: two JSON dumps and one Markdown document.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use research::{CouncilRun, ModelId, ResearchFinding, RunId, RunMetadata, Timestamp};
use serde::Serialize;

pub const STANDARD_MODE: &str = "standard_3stage";
pub const RESEARCH_MODE: &str = "research_4stage";

/// Paths of the files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub without_research: PathBuf,
    pub with_research: PathBuf,
    pub comparison: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            without_research: dir.join(format!("{prefix}_without_research.json")),
            with_research: dir.join(format!("{prefix}_with_research.json")),
            comparison: dir.join(format!("{prefix}_comparison.md")),
        }
    }
}

#[derive(Debug, Serialize)]
struct DumpMetadata<'a> {
    run_id: RunId,
    generated_at: Timestamp,
    chairman_model: &'a ModelId,
    #[serde(flatten)]
    run: &'a RunMetadata,
}

/// One run serialised as a mapping of stage name to stage output.
#[derive(Debug, Serialize)]
struct RunDump<'a> {
    mode: &'static str,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage0: Option<&'a [ResearchFinding]>,
    #[serde(flatten)]
    stages: &'a BTreeMap<String, serde_json::Value>,
    metadata: DumpMetadata<'a>,
}

fn dump(
    mode: &'static str,
    query: &str,
    run_id: RunId,
    generated_at: Timestamp,
    run: &CouncilRun,
) -> anyhow::Result<String> {
    let body = RunDump {
        mode,
        query,
        stage0: run.metadata.research_enabled.then_some(run.stage0.as_slice()),
        stages: &run.outcome.stages,
        metadata: DumpMetadata {
            run_id,
            generated_at,
            chairman_model: &run.outcome.chairman_model,
            run: &run.metadata,
        },
    };
    serde_json::to_string_pretty(&body).context("failed to serialise run dump")
}

/// Renders the human-readable side-by-side comparison.
pub fn render_comparison(title: &str, query: &str, without: &CouncilRun, with: &CouncilRun) -> String {
    let mut doc = String::new();
    // Writing into a String cannot fail.
    let _ = write!(doc, "# {title} Analysis Comparison\n\n**Query:** {query}\n\n---\n\n");

    doc.push_str("## Mode 1: Standard (3-Stage) - WITHOUT Research\n\n");
    doc.push_str("### Final Answer (Stage 3)\n\n");
    doc.push_str(&without.outcome.final_answer);
    doc.push_str("\n\n---\n\n");

    doc.push_str("## Mode 2: Research-Enhanced (4-Stage) - WITH Stage 0\n\n");
    if !with.stage0.is_empty() {
        doc.push_str("### Stage 0: Research Findings\n\n");
        for finding in &with.stage0 {
            let _ = write!(doc, "#### {}\n\n{}\n\n", finding.category.title(), finding.findings);
        }
    }
    doc.push_str("### Final Answer (Stage 3)\n\n");
    doc.push_str(&with.outcome.final_answer);
    doc.push_str("\n\n---\n\n");

    doc.push_str("## Comparison Notes\n\n");
    doc.push_str("Compare the depth and cultural understanding between the two approaches.\n");
    doc.push_str("Look for:\n");
    doc.push_str("- Cultural context and regional cinema understanding\n");
    doc.push_str("- Narrative structure analysis\n");
    doc.push_str("- Philosophical themes (dharma, karma, etc.)\n");
    doc
}

/// Writes both raw dumps and the comparison document into `paths`.
pub fn write_artifacts(
    paths: &ArtifactPaths,
    title: &str,
    query: &str,
    run_id: RunId,
    without: &CouncilRun,
    with: &CouncilRun,
) -> anyhow::Result<()> {
    let generated_at = Timestamp::now();

    let files = [
        (
            &paths.without_research,
            dump(STANDARD_MODE, query, run_id, generated_at, without)?,
        ),
        (
            &paths.with_research,
            dump(RESEARCH_MODE, query, run_id, generated_at, with)?,
        ),
        (&paths.comparison, render_comparison(title, query, without, with)),
    ];

    for (path, contents) in files {
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved artifact");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use research::{CategoryName, CouncilOutcome};
    use serde_json::{json, Value};

    use super::*;

    fn run(enabled: bool, stage0: Vec<ResearchFinding>, answer: &str) -> CouncilRun {
        let mut stages = BTreeMap::new();
        stages.insert("stage3".to_string(), json!({"model": "chair", "response": answer}));
        CouncilRun {
            stage0,
            outcome: CouncilOutcome {
                stages,
                chairman_model: ModelId::new("chair").unwrap(),
                final_answer: answer.to_string(),
            },
            metadata: RunMetadata {
                research_enabled: enabled,
                council_query: "q".to_string(),
            },
        }
    }

    fn finding(category: &str, text: &str) -> ResearchFinding {
        ResearchFinding {
            category: CategoryName::new(category).unwrap(),
            prompt: "p".to_string(),
            findings: text.to_string(),
        }
    }

    #[test]
    fn comparison_has_literal_sections_in_order() {
        let without = run(false, Vec::new(), "Plain answer.");
        let with = run(true, vec![finding("cultural_context", "Telugu roots.")], "Rich answer.");

        let doc = render_comparison("Baahubali", "Why is it significant?", &without, &with);

        let headers = [
            "# Baahubali Analysis Comparison",
            "**Query:** Why is it significant?",
            "## Mode 1: Standard (3-Stage) - WITHOUT Research",
            "Plain answer.",
            "## Mode 2: Research-Enhanced (4-Stage) - WITH Stage 0",
            "### Stage 0: Research Findings",
            "#### Cultural Context\n\nTelugu roots.",
            "Rich answer.",
            "## Comparison Notes",
        ];
        let mut cursor = 0;
        for header in headers {
            let at = doc[cursor..].find(header).unwrap_or_else(|| panic!("missing {header}"));
            cursor += at + header.len();
        }
    }

    #[test]
    fn comparison_omits_stage0_section_without_findings() {
        let doc = render_comparison("T", "q", &run(false, Vec::new(), "a"), &run(true, Vec::new(), "b"));
        assert!(!doc.contains("### Stage 0"));
    }

    #[test]
    fn writes_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path(), "film");
        let without = run(false, Vec::new(), "a");
        let with = run(true, vec![finding("narrative_structure", "Hero's journey.")], "b");

        write_artifacts(&paths, "Film", "q", RunId::new_random(), &without, &with).unwrap();

        let standard: Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.without_research).unwrap()).unwrap();
        assert_eq!(standard["mode"], STANDARD_MODE);
        assert!(standard.get("stage0").is_none());
        assert_eq!(standard["stage3"]["response"], "a");
        assert_eq!(standard["metadata"]["research_enabled"], false);

        let research: Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.with_research).unwrap()).unwrap();
        assert_eq!(research["mode"], RESEARCH_MODE);
        assert_eq!(research["stage0"][0]["category"], "narrative_structure");
        assert_eq!(research["stage0"][0]["findings"], "Hero's journey.");
        assert_eq!(research["metadata"]["chairman_model"], "chair");

        let doc = std::fs::read_to_string(&paths.comparison).unwrap();
        assert!(doc.starts_with("# Film Analysis Comparison"));
    }
}
