//! Scenario metadata and the character roster.

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;

/// Fallback color for event labels whose character name resolves to nothing
/// (deleted or renamed characters — orphaned labels are by design).
pub const DEFAULT_CHARACTER_COLOR: &str = "#374151";

/// Default document title for a fresh or under-specified scenario.
pub const DEFAULT_SCENARIO_TITLE: &str = "TRPG Scenario Timeline";

/// A named participant with a display color.
///
/// Events reference characters by `name`, not by `id` — the id only keys
/// roster edits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Display color (`#RRGGBB`); also feeds text-contrast derivation in the
    /// presentation layer.
    pub color: String,
}

/// Document-level metadata. One per document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub title: String,
    pub overview: String,
    pub base_year: String,
    /// Insertion order is display order.
    pub characters: Vec<Character>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            title: DEFAULT_SCENARIO_TITLE.to_string(),
            overview: String::new(),
            base_year: String::new(),
            characters: Vec::new(),
        }
    }
}

impl Scenario {
    /// Look up a character by name.
    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Color for a character name, falling back to
    /// [`DEFAULT_CHARACTER_COLOR`] for unresolved labels.
    pub fn color_for(&self, name: &str) -> &str {
        self.character_by_name(name)
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_CHARACTER_COLOR)
    }
}
