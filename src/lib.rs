// Library target holding the trainer core. The binary in main.rs builds the
// terminal front end (app, event, ui) on top of it, and the integration tests
// in tests/ and the criterion benchmarks import it as `cubedrill::*`.

pub mod config;
pub mod deck;
pub mod engine;
pub mod session;
pub mod store;
