use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::deck::{Category, DeckError, Item};

pub const NO_SOLUTION: &str = "No solution available";

const BUNDLED_FILE: &str = "solutions.json";

#[derive(Embed)]
#[folder = "assets/decks/"]
struct DeckAssets;

/// Solution text per category, keyed by item base name.
///
/// Stored as plain string keys (`"OLL"`, `"PLL"`) so a file carrying extra
/// categories still loads; they are simply never looked up.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionMap {
    by_category: BTreeMap<String, BTreeMap<String, String>>,
}

impl SolutionMap {
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, DeckError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn bundled() -> Result<Self, DeckError> {
        let file = DeckAssets::get(BUNDLED_FILE).ok_or(DeckError::MissingAsset(BUNDLED_FILE))?;
        Ok(serde_json::from_slice(file.data.as_ref())?)
    }

    /// Load the user's file if one is given, otherwise the bundled map.
    ///
    /// Never fails: problems are logged and an empty map is the last resort,
    /// in which case every reveal yields [`NO_SOLUTION`].
    pub fn load(user_path: Option<&Path>) -> Self {
        if let Some(path) = user_path {
            match Self::from_file(path) {
                Ok(map) => {
                    tracing::info!(path = %path.display(), cases = map.len(), "loaded solutions");
                    return map;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring solutions file");
                }
            }
        }

        match Self::bundled() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "bundled solutions unavailable");
                Self::default()
            }
        }
    }

    pub fn insert(&mut self, category: Category, key: impl Into<String>, text: impl Into<String>) {
        self.by_category
            .entry(category.label().to_string())
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&str> {
        self.by_category
            .get(category.label())
            .and_then(|cases| cases.get(key))
            .map(String::as_str)
    }

    /// Total number of solutions across all categories.
    pub fn len(&self) -> usize {
        self.by_category.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Solution text for `item`, or [`NO_SOLUTION`] when the map has no entry.
pub fn reveal_solution(item: &Item, category: Category, solutions: &SolutionMap) -> String {
    solutions
        .get(category, item.base_name())
        .unwrap_or(NO_SOLUTION)
        .to_string()
}
