//! Amplify - amplitude-amplification move recommender for checkers

pub mod core;
pub mod engine;
pub mod grover;
pub mod utils;

pub use crate::core::Position;
pub use grover::{GroverConfig, Recommender};
