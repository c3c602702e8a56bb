use crate::core::Move;
use thiserror::Error;

/// Failures of a single recommendation request. None of them are retried;
/// the caller decides how to fall back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroverError {
    /// Condition count outside 1..=3, zero shots, empty schedule
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no legal moves to search over")]
    EmptyMoveSet,

    /// Threshold cannot be written into the accumulator register
    #[error("threshold {threshold} exceeds accumulator range 0..={max}")]
    InvalidThreshold { threshold: usize, max: usize },

    /// A move with no diagonal heading reached a condition evaluator
    #[error("move {0} has no diagonal direction")]
    DirectionDegenerate(Move),

    #[error("{count} legal moves exceed the search limit of {limit}")]
    TooManyMoves { count: usize, limit: usize },

    #[error("sampling failed: {0}")]
    Sampling(String),
}

pub type GroverResult<T> = Result<T, GroverError>;
