use super::{
    conditions::ConditionTable,
    error::{GroverError, GroverResult},
    layout::RegisterLayout,
    oracle::{check_threshold, MarkingMode},
    state::AmplitudeState,
    trace::TraceEvent,
};

use anyhow::{ensure, Context};
use log::debug;
use std::fmt::Display;
use std::str::FromStr;

/// Thresholds of the amplification rounds, in the order they run.
///
/// Amplification is periodic in the number of rounds, so output quality
/// depends heavily on this sequence. The defaults are tuning choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule(Vec<usize>);

impl Schedule {
    pub fn new(thresholds: Vec<usize>) -> Self {
        Self(thresholds)
    }

    pub fn default_for(num_conditions: usize) -> GroverResult<Self> {
        let thresholds = match num_conditions {
            1 => vec![1],
            2 => vec![1, 1],
            3 => vec![3, 1, 2, 1, 2, 1],
            n => return Err(GroverError::InvalidConfiguration(
                format!("condition count must be 1, 2 or 3, got {}", n)
            )),
        };
        Ok(Self(thresholds))
    }

    pub fn thresholds(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self, layout: &RegisterLayout) -> GroverResult<()> {
        if self.is_empty() {
            return Err(GroverError::InvalidConfiguration("empty schedule".to_string()));
        }
        for &threshold in &self.0 {
            check_threshold(layout, threshold)?;
        }
        Ok(())
    }

    /// Runs every round on a uniformly initialized state: mark, accumulate,
    /// flip the phase of the threshold, uncompute, diffuse, renormalize
    pub fn run(
        &self,
        state: &mut AmplitudeState,
        table: &ConditionTable,
        mode: MarkingMode,
    ) -> GroverResult<()> {
        self.validate(state.layout())?;

        for (index, &threshold) in self.0.iter().enumerate() {
            state.record(TraceEvent::Round { index, threshold });

            state.apply_condition_marking(table);
            state.apply_accumulate();
            state.apply_threshold_phase_flip(threshold, mode)?;
            state.reverse_last_block();
            state.apply_diffusion();
            let drift = state.renormalize();

            debug!("round {} threshold {} ({}) drift {:.3e}", index, threshold, mode, drift);
        }

        Ok(())
    }
}

impl FromStr for Schedule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let thresholds = s.split(',')
            .map(|t| t.trim().parse().context("invalid threshold"))
            .collect::<Result<Vec<usize>, _>>()?;

        ensure!(!thresholds.is_empty(), "empty schedule");
        Ok(Self(thresholds))
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
