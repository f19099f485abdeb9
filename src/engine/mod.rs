pub mod selector;

pub use selector::{Pick, max_history_length, pick_next};
