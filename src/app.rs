use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::deck::solutions::SolutionMap;
use crate::deck::{Category, Item};
use crate::session::trainer::TrainerState;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProfileData;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Trainer,
    Stats,
}

pub struct App {
    pub screen: AppScreen,
    pub trainer: TrainerState,
    pub solutions: SolutionMap,
    pub theme: &'static Theme,
    pub config: Config,
    pub profile: ProfileData,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    /// Row highlighted in the toggle list.
    pub toggle_cursor: usize,
    pub session_cards: u32,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        solutions: SolutionMap,
        store: Option<JsonStore>,
        theme: &'static Theme,
    ) -> Self {
        Self::with_rng(config, solutions, store, theme, SmallRng::from_entropy())
    }

    pub fn with_rng(
        config: Config,
        solutions: SolutionMap,
        store: Option<JsonStore>,
        theme: &'static Theme,
        rng: SmallRng,
    ) -> Self {
        let profile = store
            .as_ref()
            .map(JsonStore::load_profile)
            .unwrap_or_default();

        let mut deck = config.build_deck();
        if config.remember_toggles {
            for category in Category::ALL {
                deck.apply_disabled(category, profile.disabled_for(category));
            }
        }

        let trainer = TrainerState::new(deck, config.start_category);

        let mut app = Self {
            screen: AppScreen::Trainer,
            trainer,
            solutions,
            theme,
            config,
            profile,
            store,
            should_quit: false,
            toggle_cursor: 0,
            session_cards: 0,
            rng,
        };
        app.next_card();
        app
    }

    pub fn category(&self) -> Category {
        self.trainer.category()
    }

    pub fn next_card(&mut self) {
        if self.trainer.next_card(&mut self.rng).is_some() {
            self.record_dealt();
        }
    }

    /// Only the first reveal of a card counts towards its stats.
    pub fn reveal_solution(&mut self) {
        let first_reveal = !self.trainer.is_revealed();
        if self.trainer.reveal_solution(&self.solutions).is_none() {
            return;
        }
        if first_reveal && let Some(item) = self.trainer.current().cloned() {
            let category = self.category();
            self.profile.record_revealed(category, &item);
        }
    }

    pub fn switch_category(&mut self, category: Category) {
        if category == self.category() {
            return;
        }
        tracing::debug!(%category, "switching category");
        self.toggle_cursor = 0;
        if self.trainer.switch_category(category, &mut self.rng).is_some() {
            self.record_dealt();
        }
    }

    pub fn cycle_category(&mut self) {
        self.switch_category(self.category().other());
    }

    pub fn cursor_down(&mut self) {
        let len = self.trainer.deck().pool(self.category()).items().len();
        if len > 0 {
            self.toggle_cursor = (self.toggle_cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.trainer.deck().pool(self.category()).items().len();
        if len > 0 {
            self.toggle_cursor = (self.toggle_cursor + len - 1) % len;
        }
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.trainer
            .deck()
            .pool(self.category())
            .items()
            .get(self.toggle_cursor)
            .cloned()
    }

    pub fn toggle_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if let Some(enabled) = self.trainer.toggle(&item, &mut self.rng) {
            tracing::debug!(item = %item, enabled, "toggled case");
            self.after_toggle();
        }
    }

    pub fn enable_all(&mut self) {
        self.trainer.enable_all(&mut self.rng);
        self.after_toggle();
    }

    pub fn go_to_stats(&mut self) {
        self.screen = AppScreen::Stats;
    }

    pub fn go_to_trainer(&mut self) {
        self.screen = AppScreen::Trainer;
    }

    /// Persist toggles and counters. Without a store this is a no-op.
    pub fn save(&mut self) -> Result<()> {
        if self.config.remember_toggles {
            for category in Category::ALL {
                let disabled = self.trainer.deck().pool(category).disabled_ids();
                self.profile.set_disabled(category, disabled);
            }
        }
        if let Some(ref store) = self.store {
            store.save_profile(&self.profile)?;
        }
        Ok(())
    }

    fn after_toggle(&mut self) {
        if self.trainer.current().is_some() {
            self.record_dealt();
        }
    }

    fn record_dealt(&mut self) {
        let Some(item) = self.trainer.current().cloned() else {
            return;
        };
        let category = self.category();
        let today = chrono::Local::now().date_naive();
        self.profile.record_shown(category, &item, today);
        self.session_cards += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::solutions::NO_SOLUTION;
    use tempfile::TempDir;

    fn test_theme() -> &'static Theme {
        Box::leak(Box::new(Theme::default()))
    }

    fn test_app(store: Option<JsonStore>) -> App {
        App::with_rng(
            Config::default(),
            SolutionMap::bundled().unwrap(),
            store,
            test_theme(),
            SmallRng::seed_from_u64(42),
        )
    }

    #[test]
    fn starts_with_a_card_dealt() {
        let app = test_app(None);
        assert_eq!(app.category(), Category::Oll);
        assert!(app.trainer.current().is_some());
        assert_eq!(app.session_cards, 1);
        assert_eq!(app.profile.total_cards, 1);
    }

    #[test]
    fn space_never_repeats_the_previous_card() {
        let mut app = test_app(None);
        let mut last = app.trainer.current().cloned();
        for _ in 0..100 {
            app.next_card();
            let current = app.trainer.current().cloned();
            assert_ne!(current, last);
            last = current;
        }
    }

    #[test]
    fn reveal_counts_once_per_card() {
        let mut app = test_app(None);
        app.reveal_solution();
        app.reveal_solution();
        assert_eq!(app.profile.total_reveals, 1);
        assert_ne!(app.trainer.solution(), NO_SOLUTION);

        app.next_card();
        assert_eq!(app.trainer.solution(), "");
        app.reveal_solution();
        assert_eq!(app.profile.total_reveals, 2);
    }

    #[test]
    fn switching_category_resets_cursor_and_deals() {
        let mut app = test_app(None);
        app.cursor_down();
        app.cycle_category();
        assert_eq!(app.category(), Category::Pll);
        assert_eq!(app.toggle_cursor, 0);
        assert_eq!(app.trainer.history().len(), 1);
        assert_eq!(app.session_cards, 2);

        // Same category is a no-op
        app.switch_category(Category::Pll);
        assert_eq!(app.session_cards, 2);
    }

    #[test]
    fn cursor_wraps_around_toggle_list() {
        let mut app = test_app(None);
        app.cursor_up();
        assert_eq!(app.toggle_cursor, 6);
        app.cursor_down();
        assert_eq!(app.toggle_cursor, 0);
        assert_eq!(app.selected_item(), Some(Item::from("antisune.png")));
    }

    #[test]
    fn toggle_selected_disables_case() {
        let mut app = test_app(None);
        app.toggle_selected();
        let antisune = Item::from("antisune.png");
        assert!(!app.trainer.deck().pool(Category::Oll).is_enabled(&antisune));
        assert_ne!(app.trainer.current(), Some(&antisune));

        app.enable_all();
        assert!(app.trainer.deck().pool(Category::Oll).is_enabled(&antisune));
    }

    #[test]
    fn toggles_survive_restart() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut app = test_app(Some(store));
        app.cycle_category();
        app.toggle_selected(); // diagonal
        app.save().unwrap();

        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = test_app(Some(store));
        let diagonal = Item::from("diagonal.png");
        assert!(!app.trainer.deck().pool(Category::Pll).is_enabled(&diagonal));
        assert!(app.profile.total_cards >= 3);
    }

    #[test]
    fn toggles_not_restored_when_disabled_in_config() {
        let dir = TempDir::new().unwrap();
        let mut profile = ProfileData::default();
        profile.set_disabled(Category::Oll, vec!["sune.png".to_string()]);
        JsonStore::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .save_profile(&profile)
            .unwrap();

        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            remember_toggles: false,
            ..Config::default()
        };
        let app = App::with_rng(
            config,
            SolutionMap::default(),
            Some(store),
            test_theme(),
            SmallRng::seed_from_u64(1),
        );
        assert!(app.trainer.deck().pool(Category::Oll).is_enabled(&Item::from("sune.png")));
    }
}
