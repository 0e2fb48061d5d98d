//! Prompt templates with a single query substitution slot.

use crate::errors::TemplateError;

/// The substitution slot every template must contain exactly once.
pub const QUERY_SLOT: &str = "{query}";

/// A prompt with exactly one [`QUERY_SLOT`] for the user's query.
///
/// The template is split around the slot at construction time, so rendering
/// never re-scans the query text: a query that itself contains `{query}` is
/// inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    before: String,
    after: String,
}

impl PromptTemplate {
    /// Parses a template, rejecting any text without exactly one slot.
    pub fn new(text: &str) -> Result<Self, TemplateError> {
        let found = text.matches(QUERY_SLOT).count();
        if found != 1 {
            return Err(TemplateError::SlotCount { found });
        }
        let (before, after) = text
            .split_once(QUERY_SLOT)
            .ok_or(TemplateError::SlotCount { found: 0 })?;
        Ok(Self {
            before: before.to_string(),
            after: after.to_string(),
        })
    }

    /// Substitutes `query` into the slot.
    pub fn render(&self, query: &str) -> String {
        let mut prompt = String::with_capacity(self.before.len() + query.len() + self.after.len());
        prompt.push_str(&self.before);
        prompt.push_str(query);
        prompt.push_str(&self.after);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_query() {
        let template = PromptTemplate::new("Query: {query}\nAnswer briefly.").unwrap();
        assert_eq!(
            template.render("Who wrote it?"),
            "Query: Who wrote it?\nAnswer briefly."
        );
    }

    #[test]
    fn rejects_missing_slot() {
        assert_eq!(
            PromptTemplate::new("no slot here"),
            Err(TemplateError::SlotCount { found: 0 })
        );
    }

    #[test]
    fn rejects_repeated_slot() {
        assert_eq!(
            PromptTemplate::new("{query} and again {query}"),
            Err(TemplateError::SlotCount { found: 2 })
        );
    }

    #[test]
    fn query_containing_slot_text_is_inserted_verbatim() {
        let template = PromptTemplate::new("[{query}]").unwrap();
        assert_eq!(template.render("{query}"), "[{query}]");
    }
}
