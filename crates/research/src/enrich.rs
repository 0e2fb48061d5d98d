//! Rendering findings into an enriched prompt or into display text.

use crate::types::ResearchFinding;

/// Returned by [`format_for_display`] when there is nothing to show.
pub const NO_FINDINGS_MESSAGE: &str = "No research findings available.";

/// Embeds `findings` into `original_query` as advisory research context.
///
/// With no findings the query is returned unchanged. Otherwise the result
/// contains the query verbatim, a `---`-delimited research context section
/// with one titled block per finding, and an instruction that the context
/// is advisory.
pub fn enrich_query(original_query: &str, findings: &[ResearchFinding]) -> String {
    if findings.is_empty() {
        return original_query.to_string();
    }

    let research_text = findings
        .iter()
        .map(|finding| format!("**{}:**\n{}", finding.category.title(), finding.findings))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Original Question: {original_query}\n\
         \n\
         ---\n\
         RESEARCH CONTEXT (for your consideration when answering):\n\
         \n\
         {research_text}\n\
         ---\n\
         \n\
         Please answer the original question above, taking into account the research \
         context provided. The research is meant to enrich your analysis, but you should \
         still form your own conclusions based on your knowledge and reasoning."
    )
}

/// Renders `findings` as titled Markdown sections for a human reader.
pub fn format_for_display(findings: &[ResearchFinding]) -> String {
    if findings.is_empty() {
        return NO_FINDINGS_MESSAGE.to_string();
    }

    findings
        .iter()
        .map(|finding| format!("### {}\n\n{}", finding.category.title(), finding.findings))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryName;

    fn finding(category: &str, text: &str) -> ResearchFinding {
        ResearchFinding {
            category: CategoryName::new(category).unwrap(),
            prompt: format!("prompt for {category}"),
            findings: text.to_string(),
        }
    }

    #[test]
    fn enrich_without_findings_is_identity() {
        for query in ["", "What is dharma?", "  padded \n"] {
            assert_eq!(enrich_query(query, &[]), query);
        }
    }

    #[test]
    fn enrich_keeps_query_and_orders_titles() {
        let query = "Analyze \"Baahubali: The Beginning\" (2015).";
        let findings = [
            finding("cultural_context", "Telugu epic tradition."),
            finding("narrative_structure", "Classic hero's journey."),
        ];
        let enriched = enrich_query(query, &findings);

        assert!(enriched.contains(query));
        let cultural = enriched.find("Cultural Context").unwrap();
        let narrative = enriched.find("Narrative Structure").unwrap();
        assert!(cultural < narrative);
        assert!(enriched.contains("**Cultural Context:**\nTelugu epic tradition."));
        assert!(enriched.contains("RESEARCH CONTEXT"));
        assert!(enriched.contains("form your own conclusions"));
    }

    #[test]
    fn enrich_separates_blocks_with_blank_line() {
        let enriched = enrich_query("q", &[finding("a_b", "one"), finding("c", "two")]);
        assert!(enriched.contains("**A B:**\none\n\n**C:**\ntwo"));
    }

    #[test]
    fn display_without_findings_is_sentinel() {
        assert_eq!(format_for_display(&[]), NO_FINDINGS_MESSAGE);
    }

    #[test]
    fn display_renders_titled_sections_without_framing() {
        let text = format_for_display(&[
            finding("philosophical_themes", "Dharma."),
            finding("cultural_context", "Regional."),
        ]);
        assert_eq!(
            text,
            "### Philosophical Themes\n\nDharma.\n\n### Cultural Context\n\nRegional."
        );
        assert!(!text.contains("RESEARCH CONTEXT"));
    }
}
