use crate::core::Move;
use crate::utils::make_rng;

use super::{
    conditions::{ConditionContext, ConditionKind, ConditionTable},
    encoder::MoveEncoder,
    error::{GroverError, GroverResult},
    layout::RegisterLayout,
    oracle::MarkingMode,
    sampler::{rank, sample, Counts, Recommendation},
    schedule::Schedule,
    state::AmplitudeState,
    trace::Trace,
};

use log::{debug, info};
use rand::prelude::*;

pub const DEFAULT_CONDITIONS: usize = 2;
pub const DEFAULT_SHOTS: usize = 10_000;
pub const DEFAULT_MAX_MOVES: usize = 64;

/// Knobs of a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct GroverConfig {
    /// How many canonical conditions to evaluate, 1 to 3
    pub conditions: usize,
    pub shots: usize,
    /// Round thresholds; `None` uses the default for the condition count
    pub schedule: Option<Schedule>,
    pub seed: Option<u64>,
    pub marking: MarkingMode,
    /// Record every operator application
    pub trace: bool,
    pub max_moves: usize,
}

impl Default for GroverConfig {
    fn default() -> Self {
        Self {
            conditions: DEFAULT_CONDITIONS,
            shots: DEFAULT_SHOTS,
            schedule: None,
            seed: None,
            marking: MarkingMode::Exact,
            trace: false,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

impl GroverConfig {
    pub fn with_conditions(mut self, conditions: usize) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_marking(mut self, marking: MarkingMode) -> Self {
        self.marking = marking;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn condition_kinds(&self) -> GroverResult<&'static [ConditionKind]> {
        ConditionKind::canonical(self.conditions)
    }

    /// The configured schedule, or the default for the condition count
    pub fn schedule(&self) -> GroverResult<Schedule> {
        match &self.schedule {
            Some(schedule) => Ok(schedule.clone()),
            None => Schedule::default_for(self.conditions),
        }
    }

    pub fn validate(&self) -> GroverResult<()> {
        self.condition_kinds()?;

        if self.shots == 0 {
            return Err(GroverError::InvalidConfiguration("shot count must be positive".to_string()));
        }
        if self.max_moves == 0 {
            return Err(GroverError::InvalidConfiguration("move limit must be positive".to_string()));
        }

        // the accumulator width depends only on the condition count
        self.schedule()?.validate(&RegisterLayout::new(1, self.conditions))
    }
}

/// Output of one request: ranked moves plus what produced them
#[derive(Debug, Clone)]
pub struct RecommendationSet {
    pub entries: Vec<Recommendation>,
    pub table: ConditionTable,
    pub counts: Counts,
    pub trace: Option<Trace>,
}

impl RecommendationSet {
    pub fn best(&self) -> Option<&Recommendation> {
        self.entries.first()
    }

    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }
}

/// Runs the full pipeline for a validated configuration: encode, evaluate
/// conditions, amplify, sample, rank
#[derive(Debug, Clone)]
pub struct Recommender {
    config: GroverConfig,
    conditions: &'static [ConditionKind],
    schedule: Schedule,
}

impl Recommender {
    pub fn new(config: GroverConfig) -> GroverResult<Self> {
        config.validate()?;

        Ok(Self {
            conditions: config.condition_kinds()?,
            schedule: config.schedule()?,
            config,
        })
    }

    pub fn config(&self) -> &GroverConfig {
        &self.config
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn recommend(
        &self,
        moves: &[Move],
        ctx: &ConditionContext,
        rng: &mut impl Rng,
    ) -> GroverResult<RecommendationSet> {
        let encoder = MoveEncoder::new(moves.to_vec(), self.config.max_moves)?;
        let table = ConditionTable::evaluate(&encoder, self.conditions, ctx)?;

        debug!(
            "{} moves, conditions [{}]",
            encoder.len(),
            self.conditions.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
        );

        self.recommend_with_table(&encoder, table, rng)
    }

    /// Same as `recommend` with the RNG built from the configured seed
    pub fn recommend_seeded(&self, moves: &[Move], ctx: &ConditionContext) -> GroverResult<RecommendationSet> {
        let mut rng = make_rng(self.config.seed);
        self.recommend(moves, ctx, &mut rng)
    }

    /// Amplifies and samples over flags that were computed elsewhere
    pub fn recommend_with_table(
        &self,
        encoder: &MoveEncoder,
        table: ConditionTable,
        rng: &mut impl Rng,
    ) -> GroverResult<RecommendationSet> {
        if table.num_moves() != encoder.len() || table.num_conditions() != self.conditions.len() {
            return Err(GroverError::InvalidConfiguration(format!(
                "condition table is {}x{}, expected {}x{}",
                table.num_moves(), table.num_conditions(),
                encoder.len(), self.conditions.len()
            )));
        }

        let layout = RegisterLayout::new(encoder.len(), table.num_conditions());
        self.schedule.validate(&layout)?;

        debug!(
            "{} qubits ({} move, {} condition, {} accumulator, 1 ancilla), schedule {}",
            layout.total_bits(), layout.move_bits, layout.condition_bits,
            layout.accumulator_bits, self.schedule
        );

        let mut state = AmplitudeState::new(layout);
        if self.config.trace {
            state = state.with_trace();
        }

        state.initialize_uniform();
        self.schedule.run(&mut state, &table, self.config.marking)?;

        let counts = sample(&state, self.config.shots, rng)?;
        let entries = rank(encoder, &counts)?;

        debug!("counts {}", counts);
        if let Some(best) = entries.first() {
            info!("recommended {} with p = {:.4}", best.mv, best.probability);
        }

        Ok(RecommendationSet {
            entries,
            table,
            counts,
            trace: state.take_trace(),
        })
    }
}
