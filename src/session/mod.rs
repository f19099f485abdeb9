pub mod trainer;

pub use trainer::TrainerState;
