use rand::Rng;
use rand::seq::SliceRandom;

use crate::deck::Item;

/// How many recent picks are excluded from the next draw for a pool of
/// `enabled_count` items. Always strictly less than the pool size, so a
/// non-empty pool keeps at least one eligible item.
pub fn max_history_length(enabled_count: usize) -> usize {
    match enabled_count {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        _ => 3,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pick {
    pub item: Item,
    /// Oldest first; `item` is always the last entry unless the window is 0.
    pub history: Vec<Item>,
}

/// Draw the next item from `pool`, avoiding anything in `history`.
///
/// Returns `None` for an empty pool. History entries that are no longer in
/// the pool are ignored, and only the newest `max_history_length` of the rest
/// count as excluded.
pub fn pick_next<R: Rng + ?Sized>(pool: &[Item], history: &[Item], rng: &mut R) -> Option<Pick> {
    if pool.is_empty() {
        return None;
    }

    let max_history = max_history_length(pool.len());
    let recent = if pool.len() <= max_history {
        Vec::new()
    } else {
        recent_in_pool(pool, history, max_history)
    };

    // Escape hatch: with every item excluded, any draw is accepted.
    let candidates: Vec<&Item> = pool.iter().filter(|item| !recent.contains(item)).collect();
    let item = if pool.len() <= recent.len() || candidates.is_empty() {
        pool.choose(rng)?.clone()
    } else {
        (*candidates.choose(rng)?).clone()
    };

    let mut next = Vec::with_capacity(max_history);
    if max_history > 0 {
        let keep = max_history - 1;
        let start = recent.len().saturating_sub(keep);
        next.extend(recent[start..].iter().map(|prev| (*prev).clone()));
        next.push(item.clone());
    }

    tracing::trace!(item = %item, window = max_history, history = ?next, "picked");

    Some(Pick {
        item,
        history: next,
    })
}

/// The newest `limit` history entries that are still in `pool`, oldest first.
fn recent_in_pool<'a>(pool: &[Item], history: &'a [Item], limit: usize) -> Vec<&'a Item> {
    let in_pool: Vec<&Item> = history.iter().filter(|item| pool.contains(item)).collect();
    let start = in_pool.len().saturating_sub(limit);
    in_pool[start..].to_vec()
}
