use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::deck::{Category, Item};

const SCHEMA_VERSION: u32 = 1;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStats {
    pub shown: u32,
    pub revealed: u32,
}

impl CaseStats {
    /// Share of showings where the solution had to be revealed.
    pub fn reveal_rate(&self) -> f64 {
        if self.shown == 0 {
            return 0.0;
        }
        (self.revealed as f64 / self.shown as f64).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    /// Disabled item ids, keyed by category label.
    #[serde(default)]
    pub disabled: BTreeMap<String, Vec<String>>,
    /// Keyed by `"<category>/<base name>"`.
    #[serde(default)]
    pub cases: BTreeMap<String, CaseStats>,
    pub total_cards: u32,
    pub total_reveals: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_practice_date: Option<String>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            disabled: BTreeMap::new(),
            cases: BTreeMap::new(),
            total_cards: 0,
            total_reveals: 0,
            streak_days: 0,
            best_streak: 0,
            last_practice_date: None,
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn case_key(category: Category, item: &Item) -> String {
        format!("{}/{}", category.label(), item.base_name())
    }

    pub fn case_stats(&self, category: Category, item: &Item) -> CaseStats {
        self.cases
            .get(&Self::case_key(category, item))
            .copied()
            .unwrap_or_default()
    }

    pub fn record_shown(&mut self, category: Category, item: &Item, today: NaiveDate) {
        self.cases
            .entry(Self::case_key(category, item))
            .or_default()
            .shown += 1;
        self.total_cards += 1;
        self.update_streak(today);
    }

    pub fn record_revealed(&mut self, category: Category, item: &Item) {
        self.cases
            .entry(Self::case_key(category, item))
            .or_default()
            .revealed += 1;
        self.total_reveals += 1;
    }

    pub fn disabled_for(&self, category: Category) -> &[String] {
        self.disabled
            .get(category.label())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_disabled(&mut self, category: Category, ids: Vec<String>) {
        if ids.is_empty() {
            self.disabled.remove(category.label());
        } else {
            self.disabled.insert(category.label().to_string(), ids);
        }
    }

    /// Practicing on consecutive days extends the streak; a gap restarts it.
    pub fn update_streak(&mut self, today: NaiveDate) {
        let today_str = today.format(DATE_FORMAT).to_string();
        if self.last_practice_date.as_deref() == Some(today_str.as_str()) {
            return;
        }

        let last = self
            .last_practice_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok());
        let yesterday = today.checked_sub_days(Days::new(1));
        self.streak_days = match last {
            Some(last) if Some(last) == yesterday => self.streak_days + 1,
            _ => 1,
        };
        self.best_streak = self.best_streak.max(self.streak_days);
        self.last_practice_date = Some(today_str);
    }
}
