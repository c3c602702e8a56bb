//! Amplitude-amplification search over the legal moves
//!
//! Legal moves are encoded into a register of basis states, each move is
//! scored by a few boolean conditions, and repeated oracle and diffusion
//! rounds shift probability toward the moves whose condition count matches
//! the round's threshold. Sampling the final state yields a ranked list.

pub mod conditions;
pub mod diffusion;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod operator;
pub mod oracle;
pub mod recommend;
pub mod sampler;
pub mod schedule;
pub mod state;
pub mod trace;

pub use conditions::{ConditionContext, ConditionKind, ConditionTable, MAX_CONDITIONS};
pub use encoder::MoveEncoder;
pub use error::{GroverError, GroverResult};
pub use layout::RegisterLayout;
pub use operator::{Amplitude, Gate, Operator};
pub use oracle::MarkingMode;
pub use recommend::{GroverConfig, RecommendationSet, Recommender};
pub use sampler::{Counts, Recommendation};
pub use schedule::Schedule;
pub use state::AmplitudeState;
pub use trace::TraceEvent;
