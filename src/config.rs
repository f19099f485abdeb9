use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::deck::catalog::{OLL_CASES, PLL_CASES};
use crate::deck::{Category, CategoryPool, Deck};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_start_category")]
    pub start_category: Category,
    /// Replaces the bundled solutions when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions_file: Option<String>,
    /// Persist per-case toggles between runs.
    #[serde(default = "default_remember_toggles")]
    pub remember_toggles: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oll_cases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pll_cases: Option<Vec<String>>,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_start_category() -> Category {
    Category::Oll
}
fn default_remember_toggles() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            start_category: default_start_category(),
            solutions_file: None,
            remember_toggles: default_remember_toggles(),
            oll_cases: None,
            pll_cases: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`. On first run the defaults are written
    /// there so users have a file to edit.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default config");
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cubedrill")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn solutions_path(&self) -> Option<PathBuf> {
        self.solutions_file.as_deref().map(PathBuf::from)
    }

    /// The case list for `category`: the configured override when it is
    /// non-empty, the built-in catalog otherwise.
    pub fn cases(&self, category: Category) -> Vec<String> {
        let (custom, builtin) = match category {
            Category::Oll => (&self.oll_cases, OLL_CASES),
            Category::Pll => (&self.pll_cases, PLL_CASES),
        };
        match custom {
            Some(cases) if !cases.is_empty() => cases.clone(),
            _ => builtin.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn build_deck(&self) -> Deck {
        Deck::new(
            CategoryPool::new(self.cases(Category::Oll)),
            CategoryPool::new(self.cases(Category::Pll)),
        )
    }
}
