use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::ProfileData;

const PROFILE_FILE: &str = "profile.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable store file");
                T::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read store file");
                T::default()
            }
        }
    }

    /// Write to a sibling `.tmp` file and rename over the target so a crash
    /// never leaves a half-written file behind.
    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Corrupt files and stale schema versions both come back as a fresh
    /// default profile.
    pub fn load_profile(&self) -> ProfileData {
        let profile: ProfileData = self.load(PROFILE_FILE);
        if profile.needs_reset() {
            tracing::info!(
                found = profile.schema_version,
                "profile schema changed, starting fresh"
            );
            return ProfileData::default();
        }
        profile
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save(PROFILE_FILE, data)
    }
}

/// `$DATA_DIR/cubedrill`, or `./cubedrill` when the platform has no data dir.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cubedrill")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Category, Item};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_profile_loads_default() {
        let (_dir, store) = make_test_store();
        let profile = store.load_profile();
        assert_eq!(profile.total_cards, 0);
        assert!(!store.file_path(PROFILE_FILE).exists());
    }

    #[test]
    fn profile_round_trip() {
        let (_dir, store) = make_test_store();
        let mut profile = ProfileData::default();
        let sune = Item::from("sune.png");
        profile.record_shown(
            Category::Oll,
            &sune,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        );
        profile.record_revealed(Category::Oll, &sune);
        profile.set_disabled(Category::Pll, vec!["Z.png".to_string()]);
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile();
        assert_eq!(loaded.total_cards, 1);
        assert_eq!(loaded.case_stats(Category::Oll, &sune).revealed, 1);
        assert_eq!(loaded.disabled_for(Category::Pll), ["Z.png".to_string()]);
        assert_eq!(loaded.last_practice_date.as_deref(), Some("2026-01-05"));
    }

    #[test]
    fn corrupt_profile_loads_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(PROFILE_FILE), "{ not json").unwrap();
        let profile = store.load_profile();
        assert_eq!(profile.total_cards, 0);
        assert!(!profile.needs_reset());
    }

    #[test]
    fn stale_schema_loads_default() {
        let (_dir, store) = make_test_store();
        let mut old = ProfileData::default();
        old.schema_version = 0;
        old.total_cards = 12;
        store.save_profile(&old).unwrap();

        assert_eq!(store.load_profile().total_cards, 0);
    }

    #[test]
    fn save_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.save_profile(&ProfileData::default()).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }
}
