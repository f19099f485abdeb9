use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use cubedrill::deck::solutions::{NO_SOLUTION, SolutionMap, reveal_solution};
use cubedrill::deck::{Category, CategoryPool, Deck, Item};
use cubedrill::engine::selector::{max_history_length, pick_next};
use cubedrill::session::TrainerState;

fn pool_of(n: usize) -> Vec<Item> {
    (0..n).map(|i| Item::new(format!("case{i}.png"))).collect()
}

#[test]
fn history_table() {
    let expected = [(0, 0), (1, 0), (2, 1), (3, 2), (4, 3), (5, 3), (100, 3)];
    for (count, window) in expected {
        assert_eq!(max_history_length(count), window, "pool of {count}");
    }
}

#[test]
fn never_repeats_immediately_and_history_stays_bounded() {
    for size in 1..=8 {
        let pool = pool_of(size);
        let mut rng = SmallRng::seed_from_u64(size as u64);
        let mut history: Vec<Item> = Vec::new();

        for _ in 0..500 {
            let previous = history.last().cloned();
            let pick = pick_next(&pool, &history, &mut rng).unwrap();

            if size >= 2 {
                assert_ne!(Some(&pick.item), previous.as_ref(), "pool of {size}");
            }
            assert!(pick.history.len() <= max_history_length(size));
            if max_history_length(size) > 0 {
                assert_eq!(pick.history.last(), Some(&pick.item));
            }
            history = pick.history;
        }
    }
}

#[test]
fn recent_window_is_never_redrawn() {
    // With a full window of three, the next pick avoids all of them.
    let pool = pool_of(6);
    let mut rng = SmallRng::seed_from_u64(99);
    let mut shown: Vec<Item> = Vec::new();
    let mut history = Vec::new();

    for _ in 0..300 {
        let pick = pick_next(&pool, &history, &mut rng).unwrap();
        let recent: HashSet<&Item> = shown.iter().rev().take(3).collect();
        assert!(!recent.contains(&pick.item));
        shown.push(pick.item.clone());
        history = pick.history;
    }
}

#[test]
fn every_item_is_eventually_drawn() {
    let pool = pool_of(7);
    let mut rng = SmallRng::seed_from_u64(5);
    let mut history = Vec::new();
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let pick = pick_next(&pool, &history, &mut rng).unwrap();
        seen.insert(pick.item.clone());
        history = pick.history;
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn shrinking_pool_discards_prior_history() {
    let mut rng = SmallRng::seed_from_u64(17);
    let big = pool_of(6);
    let history: Vec<Item> = big[2..5].to_vec();

    // Down to two items, neither of which is in the old history
    let small = big[..2].to_vec();
    let pick = pick_next(&small, &history, &mut rng).unwrap();
    assert_eq!(pick.history, vec![pick.item.clone()]);
}

#[test]
fn forced_pick_when_three_of_four_excluded() {
    let pool: Vec<Item> = ["a", "b", "c", "d"].into_iter().map(Item::from).collect();
    let history: Vec<Item> = ["a", "b", "c"].into_iter().map(Item::from).collect();
    let mut rng = SmallRng::seed_from_u64(0);

    let first = pick_next(&pool, &history, &mut rng).unwrap();
    assert_eq!(first.item, Item::from("d"));

    // "a" is evicted next, so the second pick must be "a"
    let second = pick_next(&pool, &first.history, &mut rng).unwrap();
    assert_eq!(second.item, Item::from("a"));
}

#[test]
fn fallback_solution_for_empty_map() {
    assert_eq!(
        reveal_solution(&Item::from("sune.png"), Category::Oll, &SolutionMap::default()),
        NO_SOLUTION
    );
    assert_eq!(NO_SOLUTION, "No solution available");
}

#[test]
fn toggle_twice_is_identity() {
    let mut deck = Deck::default();
    for category in Category::ALL {
        let items = deck.pool(category).items().to_vec();
        for item in items {
            let before = deck.pool(category).is_enabled(&item);
            deck.toggle(category, &item);
            deck.toggle(category, &item);
            assert_eq!(deck.pool(category).is_enabled(&item), before);
        }
    }
}

#[test]
fn trainer_session_walkthrough() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let deck = Deck::new(
        CategoryPool::new(["sune.png", "antisune.png", "H.png"]),
        CategoryPool::new(["Ua.png", "Ub.png"]),
    );
    let solutions = SolutionMap::bundled().unwrap();
    let mut trainer = TrainerState::new(deck, Category::Oll);

    assert!(trainer.next_card(&mut rng).is_some());
    let revealed = trainer.reveal_solution(&solutions).unwrap().to_string();
    assert_ne!(revealed, NO_SOLUTION);

    trainer.switch_category(Category::Pll, &mut rng);
    assert_eq!(trainer.solution(), "");
    let first = trainer.current().cloned().unwrap();
    trainer.next_card(&mut rng);
    assert_ne!(trainer.current(), Some(&first));

    // Disable both PLL cases: nothing left to deal
    trainer.toggle(&Item::from("Ua.png"), &mut rng);
    trainer.toggle(&Item::from("Ub.png"), &mut rng);
    assert!(trainer.enabled_pool().is_empty());
    assert!(trainer.current().is_none());
    assert!(trainer.next_card(&mut rng).is_none());
    assert_eq!(trainer.reveal_solution(&solutions), None);
}
