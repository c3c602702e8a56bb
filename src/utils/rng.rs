use rand::{prelude::*, rngs::StdRng};

/// Seed used when none is configured in debug and profiling builds
pub const DEBUG_SEED: u64 = 63;

/// RNG for one request: seeded when a seed is given, otherwise fixed in
/// debug and profiling builds and drawn from the system in release builds
pub fn make_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(fresh_seed))
}

#[cfg(any(debug_assertions, feature = "profiling"))]
fn fresh_seed() -> u64 {
    DEBUG_SEED
}

#[cfg(all(not(debug_assertions), not(feature = "profiling")))]
fn fresh_seed() -> u64 {
    use rand::{rngs::SysRng, TryRng};

    SysRng::try_next_u64(&mut SysRng).unwrap_or_else(|err| {
        log::warn!("system rng unavailable ({}), using fixed seed", err);
        DEBUG_SEED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rngs_agree() {
        let mut a = make_rng(Some(9));
        let mut b = make_rng(Some(9));
        for _ in 0..4 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }
}
