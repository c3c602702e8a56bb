mod rng;

pub use rng::{make_rng, DEBUG_SEED};
