use rand::Rng;

use crate::deck::solutions::{SolutionMap, reveal_solution};
use crate::deck::{Category, Deck, Item};
use crate::engine::selector::pick_next;

/// Everything the trainer screen needs between key presses.
///
/// The front end owns exactly one of these and drives it with discrete calls.
pub struct TrainerState {
    category: Category,
    deck: Deck,
    history: Vec<Item>,
    current: Option<Item>,
    solution: String,
}

impl TrainerState {
    pub fn new(deck: Deck, category: Category) -> Self {
        Self {
            category,
            deck,
            history: Vec::new(),
            current: None,
            solution: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current(&self) -> Option<&Item> {
        self.current.as_ref()
    }

    /// Empty until [`reveal_solution`](Self::reveal_solution) is called for
    /// the current card.
    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn is_revealed(&self) -> bool {
        !self.solution.is_empty()
    }

    pub fn history(&self) -> &[Item] {
        &self.history
    }

    pub fn enabled_pool(&self) -> Vec<Item> {
        self.deck.enabled_pool(self.category)
    }

    /// Advance to a new card. With nothing enabled this does nothing and
    /// returns `None`.
    pub fn next_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Item> {
        let pool = self.enabled_pool();
        let pick = pick_next(&pool, &self.history, rng)?;
        self.history = pick.history;
        self.current = Some(pick.item);
        self.solution.clear();
        self.current.as_ref()
    }

    /// Switch to `category` with a fresh history and deal its first card.
    pub fn switch_category<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        rng: &mut R,
    ) -> Option<&Item> {
        self.category = category;
        self.history.clear();
        self.current = None;
        self.solution.clear();
        self.next_card(rng)
    }

    /// Flip `item` in the current category and deal a new card. Returns the
    /// item's new flag, or `None` if it is not in this category.
    pub fn toggle<R: Rng + ?Sized>(&mut self, item: &Item, rng: &mut R) -> Option<bool> {
        let enabled = self.deck.toggle(self.category, item)?;
        self.redeal(rng);
        Some(enabled)
    }

    pub fn enable_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck.pool_mut(self.category).enable_all();
        self.redeal(rng);
    }

    /// Look up and remember the solution for the current card.
    pub fn reveal_solution(&mut self, solutions: &SolutionMap) -> Option<&str> {
        let item = self.current.as_ref()?;
        self.solution = reveal_solution(item, self.category, solutions);
        Some(&self.solution)
    }

    // The history is kept; entries for items that left the pool are
    // ignored by the next pick.
    fn redeal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = None;
        self.solution.clear();
        if self.next_card(rng).is_none() {
            self.history.clear();
        }
    }
}
