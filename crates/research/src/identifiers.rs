//! Newtype domain identifiers.
//!
//! Every concept that has an identity is a distinct newtype wrapping a
//! primitive, so a [`CategoryName`] can never be passed where a [`ModelId`]
//! is expected even though both are strings underneath.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a research category, the analytical lens a prompt applies.
    ///
    /// Written in underscore-separated lowercase token form
    /// (e.g. `"cultural_context"`). [`CategoryName::title`] produces the
    /// human-readable form used in enriched prompts and display output.
    CategoryName
}

string_id! {
    /// Identifies a model on the inference API (e.g. `"google/gemini-2.5-flash"`).
    ModelId
}

impl CategoryName {
    /// Cultural and regional context of the subject.
    pub const CULTURAL_CONTEXT: &'static str = "cultural_context";
    /// Story frameworks, arcs, and dramatic structure.
    pub const NARRATIVE_STRUCTURE: &'static str = "narrative_structure";
    /// Philosophical and mythological themes.
    pub const PHILOSOPHICAL_THEMES: &'static str = "philosophical_themes";

    /// Returns the human-readable title for this category.
    pub fn title(&self) -> String {
        category_title(&self.0)
    }
}

/// Converts an internal category token into a display title.
///
/// Underscores become spaces and the first letter of every word is
/// upper-cased (the rest of the word is left as written), so
/// `"philosophical_themes"` becomes `"Philosophical Themes"`. The output
/// contains no underscores, which makes the transform idempotent.
pub fn category_title(token: &str) -> String {
    token
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single driver run.
///
/// Generated fresh for every invocation; propagated through spans and
/// persisted artifacts so the two comparison runs can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
