use crate::core::{legal_moves, Move, Position};
use crate::grover::{ConditionContext, GroverConfig, GroverError, RecommendationSet, Recommender};
use crate::utils::make_rng;

use anyhow::{bail, Context};
use log::{info, warn};
use rand::prelude::*;

use std::str::FromStr;
use std::time::Instant;

/// Per-request overrides of the configured search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of measurements to draw
    pub shots: Option<usize>,
    /// Seed for this request only
    pub seed: Option<u64>,
}

impl SearchOptions {
    pub fn apply(&self, config: &GroverConfig) -> GroverConfig {
        let mut config = config.clone();
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}

impl FromStr for SearchOptions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = 0;
        let mut search_options = SearchOptions::default();

        let parts = s.split_whitespace().collect::<Vec<_>>();

        while i < parts.len() {
            match parts[i] {
                "shots" if i + 1 < parts.len() => {
                    let shots = parts[i + 1].parse().context("invalid shots")?;
                    search_options.shots = Some(shots);
                    i += 1;
                }
                "seed" if i + 1 < parts.len() => {
                    let seed = parts[i + 1].parse().context("invalid seed")?;
                    search_options.seed = Some(seed);
                    i += 1;
                }
                p => bail!("invalid go argument {}", p)
            }
            i += 1;
        }
        Ok(search_options)
    }
}

/// What a search produced. `recommendations` is absent when the search
/// failed and the move was picked at random instead.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub recommendations: Option<RecommendationSet>,
    pub error: Option<GroverError>,
    pub elapsed: f64,
}

impl SearchResult {
    pub fn is_fallback(&self) -> bool {
        self.recommendations.is_none() && self.best_move.is_some()
    }
}

/// Recommends a move for the side to move. A failed request never fails
/// the search: the move is then drawn uniformly from the legal moves.
pub fn search(position: &Position, config: &GroverConfig) -> SearchResult {
    let start_time = Instant::now();
    let side = position.side_to_move;
    let moves = legal_moves(&position.board, side);
    let mut rng = make_rng(config.seed);

    let outcome = Recommender::new(config.clone()).and_then(|recommender| {
        let ctx = ConditionContext::for_side(&position.board, side);
        recommender.recommend(&moves, &ctx, &mut rng)
    });

    match outcome {
        Ok(set) => {
            info!("{} to move, {} candidates", side.to_char(), moves.len());
            SearchResult {
                best_move: set.best().map(|entry| entry.mv),
                recommendations: Some(set),
                error: None,
                elapsed: start_time.elapsed().as_secs_f64(),
            }
        }
        Err(err) => {
            let best_move = moves.choose(&mut rng).copied();
            match best_move {
                Some(mv) => warn!("search failed ({}), playing random move {}", err, mv),
                None => warn!("search failed ({}), no legal move to fall back on", err),
            }
            SearchResult {
                best_move,
                recommendations: None,
                error: Some(err),
                elapsed: start_time.elapsed().as_secs_f64(),
            }
        }
    }
}
