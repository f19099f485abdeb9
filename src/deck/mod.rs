pub mod catalog;
pub mod solutions;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("unknown category: {0} (expected OLL or PLL)")]
    UnknownCategory(String),
    #[error("failed to read solutions: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed solutions data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundled asset missing: {0}")]
    MissingAsset(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "OLL", alias = "oll", alias = "Oll")]
    Oll,
    #[serde(rename = "PLL", alias = "pll", alias = "Pll")]
    Pll,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Oll, Category::Pll];

    pub fn label(self) -> &'static str {
        match self {
            Category::Oll => "OLL",
            Category::Pll => "PLL",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Category::Oll => Category::Pll,
            Category::Pll => Category::Oll,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OLL" => Ok(Category::Oll),
            "PLL" => Ok(Category::Pll),
            _ => Err(DeckError::UnknownCategory(s.to_string())),
        }
    }
}

/// One algorithm case, identified by its card file name (e.g. `sune.png`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name and solution lookup key. See [`base_name`].
    pub fn base_name(&self) -> &str {
        base_name(&self.0)
    }
}

impl From<&str> for Item {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single place an item identifier is turned into a name.
///
/// Everything from the first `.` onward is dropped, so `"sune.png"` becomes
/// `"sune"`. The result is both what the UI shows and the key into the
/// solution map.
pub fn base_name(id: &str) -> &str {
    match id.find('.') {
        Some(idx) => &id[..idx],
        None => id,
    }
}

/// Items of one category in display order, with their enabled flags.
#[derive(Clone, Debug, Default)]
pub struct CategoryPool {
    items: Vec<Item>,
    enabled: HashMap<Item, bool>,
}

impl CategoryPool {
    /// Every item starts enabled. Repeated identifiers keep their first position.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::default();
        for id in ids {
            let item = Item::new(id);
            if pool.enabled.contains_key(&item) {
                continue;
            }
            pool.enabled.insert(item.clone(), true);
            pool.items.push(item);
        }
        pool
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_enabled(&self, item: &Item) -> bool {
        self.enabled.get(item).copied().unwrap_or(false)
    }

    pub fn enabled_items(&self) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| self.is_enabled(item))
            .cloned()
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.items.iter().filter(|item| self.is_enabled(item)).count()
    }

    /// Flip the flag for `item`. Returns the new flag, or `None` if the item
    /// is not part of this pool.
    pub fn toggle(&mut self, item: &Item) -> Option<bool> {
        let flag = self.enabled.get_mut(item)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn set_enabled(&mut self, item: &Item, enabled: bool) {
        if let Some(flag) = self.enabled.get_mut(item) {
            *flag = enabled;
        }
    }

    pub fn enable_all(&mut self) {
        for flag in self.enabled.values_mut() {
            *flag = true;
        }
    }

    pub fn disabled_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !self.is_enabled(item))
            .map(|item| item.as_str().to_string())
            .collect()
    }
}

/// Both category pools.
#[derive(Clone, Debug)]
pub struct Deck {
    oll: CategoryPool,
    pll: CategoryPool,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(
            CategoryPool::new(catalog::OLL_CASES.iter().copied()),
            CategoryPool::new(catalog::PLL_CASES.iter().copied()),
        )
    }
}

impl Deck {
    pub fn new(oll: CategoryPool, pll: CategoryPool) -> Self {
        Self { oll, pll }
    }

    pub fn pool(&self, category: Category) -> &CategoryPool {
        match category {
            Category::Oll => &self.oll,
            Category::Pll => &self.pll,
        }
    }

    pub fn pool_mut(&mut self, category: Category) -> &mut CategoryPool {
        match category {
            Category::Oll => &mut self.oll,
            Category::Pll => &mut self.pll,
        }
    }

    pub fn enabled_pool(&self, category: Category) -> Vec<Item> {
        self.pool(category).enabled_items()
    }

    pub fn toggle(&mut self, category: Category, item: &Item) -> Option<bool> {
        self.pool_mut(category).toggle(item)
    }

    /// Disable the listed identifiers; unknown ones are skipped.
    pub fn apply_disabled(&mut self, category: Category, disabled: &[String]) {
        let pool = self.pool_mut(category);
        for id in disabled {
            pool.set_enabled(&Item::new(id.as_str()), false);
        }
    }
}
