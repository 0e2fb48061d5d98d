//! The prompt template registry.
//!
//! Maps each [`CategoryName`] to its [`PromptTemplate`]. The registry is
//! read-only once handed to a [`crate::ResearchGatherer`] and is shared by
//! reference across all concurrent requests.

use crate::errors::TemplateError;
use crate::identifiers::CategoryName;
use crate::template::PromptTemplate;

const CULTURAL_CONTEXT_PROMPT: &str = "You are a film studies expert specializing in cultural and regional cinema.

Analyze the following film-related query and provide relevant cultural context that would be important for understanding it:

Query: {query}

Focus on:
- Regional cinema conventions (especially if Telugu/South Indian cinema is relevant)
- Cultural references, traditions, and regional storytelling patterns
- Historical context of the film industry in that region
- Audience expectations and cultural resonance
- Language-specific nuances and symbolism

Provide 2-3 key cultural insights that would help analyze this film more deeply.";

const NARRATIVE_STRUCTURE_PROMPT: &str = "You are a narrative theory and screenwriting expert.

Analyze the following film-related query and provide insights about narrative structure and storytelling:

Query: {query}

Focus on:
- Story frameworks that might be at play (hero's journey, three-act structure, etc.)
- Character arc patterns and archetypes
- Plot structure and narrative techniques
- Dramatic elements (conflict, stakes, turning points)
- How the narrative serves thematic goals

Provide 2-3 key narrative insights that would help analyze this film's storytelling.";

const PHILOSOPHICAL_THEMES_PROMPT: &str = "You are a philosophy and mythology expert with deep knowledge of Indian philosophical traditions.

Analyze the following film-related query and identify relevant philosophical themes:

Query: {query}

Focus on:
- Core philosophical concepts (dharma, karma, maya, moksha, etc.)
- Sanskrit terminology and its significance
- Mythological parallels and archetypal patterns
- Ethical and moral dimensions
- Universal vs. culture-specific philosophical themes
- How philosophy manifests in character choices and plot

Provide 2-3 key philosophical insights that would help analyze this film's deeper meaning.";

/// Ordered mapping from category to prompt template.
///
/// Iteration follows insertion order, which is also the default category
/// order used by [`crate::ResearchGatherer::gather`].
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    entries: Vec<(CategoryName, PromptTemplate)>,
}

impl PromptRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three film-analysis categories: cultural context, narrative
    /// structure, and philosophical themes.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, text) in [
            (CategoryName::CULTURAL_CONTEXT, CULTURAL_CONTEXT_PROMPT),
            (CategoryName::NARRATIVE_STRUCTURE, NARRATIVE_STRUCTURE_PROMPT),
            (CategoryName::PHILOSOPHICAL_THEMES, PHILOSOPHICAL_THEMES_PROMPT),
        ] {
            if let (Some(category), Ok(template)) =
                (CategoryName::new(name), PromptTemplate::new(text))
            {
                registry.register(category, template);
            }
        }
        registry
    }

    /// Adds a category, replacing the template if the category already exists.
    pub fn register(&mut self, category: CategoryName, template: PromptTemplate) {
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = template,
            None => self.entries.push((category, template)),
        }
    }

    /// Parses `text` and registers it under `category`.
    pub fn register_text(
        &mut self,
        category: CategoryName,
        text: &str,
    ) -> Result<(), TemplateError> {
        let template = PromptTemplate::new(text)?;
        self.register(category, template);
        Ok(())
    }

    /// Looks up the template for `category`; `None` if the category is unknown.
    pub fn get(&self, category: &CategoryName) -> Option<&PromptTemplate> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, template)| template)
    }

    /// All registered categories in insertion order.
    pub fn categories(&self) -> Vec<CategoryName> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> CategoryName {
        CategoryName::new(s).unwrap()
    }

    #[test]
    fn builtin_has_three_categories_in_order() {
        let registry = PromptRegistry::builtin();
        assert_eq!(
            registry.categories(),
            vec![
                name("cultural_context"),
                name("narrative_structure"),
                name("philosophical_themes"),
            ]
        );
    }

    #[test]
    fn builtin_templates_embed_the_query() {
        let registry = PromptRegistry::builtin();
        for category in registry.categories() {
            let prompt = registry.get(&category).unwrap().render("Analyze Baahubali");
            assert!(prompt.contains("Query: Analyze Baahubali"), "{category}");
        }
    }

    #[test]
    fn unknown_category_is_none() {
        assert!(PromptRegistry::builtin().get(&name("soundtrack")).is_none());
    }

    #[test]
    fn register_extends_and_replaces() {
        let mut registry = PromptRegistry::builtin();
        registry
            .register_text(name("visual_style"), "Describe the cinematography of {query}.")
            .unwrap();
        assert_eq!(registry.len(), 4);

        registry
            .register_text(name("cultural_context"), "Short: {query}")
            .unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.get(&name("cultural_context")).unwrap().render("x"),
            "Short: x"
        );
    }

    #[test]
    fn register_text_rejects_invalid_template() {
        let mut registry = PromptRegistry::new();
        assert!(registry.register_text(name("broken"), "no slot").is_err());
        assert!(registry.is_empty());
    }
}
