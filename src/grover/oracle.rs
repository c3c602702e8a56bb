//! Phase oracle: mark conditions, count them, flip the sign of the
//! requested count, then uncompute

use super::{
    conditions::ConditionTable,
    error::{GroverError, GroverResult},
    layout::{move_index_width, RegisterLayout},
    operator::{Gate, Operator},
};

use anyhow::bail;
use std::fmt::Display;
use std::str::FromStr;

/// Which accumulator values the oracle flips for a threshold `t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkingMode {
    /// exactly `t` conditions satisfied
    #[default]
    Exact,
    /// `t` or more conditions satisfied
    AtLeast,
}

impl FromStr for MarkingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MarkingMode::Exact),
            "atleast" => Ok(MarkingMode::AtLeast),
            _ => bail!("Unknown marking mode: {}", s),
        }
    }
}

impl Display for MarkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkingMode::Exact => write!(f, "exact"),
            MarkingMode::AtLeast => write!(f, "atleast"),
        }
    }
}

/// Writes each move's condition flags into the condition register: one
/// flip per set flag, controlled on the exact move-index bit pattern
pub fn marking_operator(layout: &RegisterLayout, table: &ConditionTable) -> Operator {
    let gates = table.set_flags()
        .map(|(index, condition)| Gate::ControlledFlip {
            mask: layout.move_mask(),
            pattern: index,
            target: layout.condition_bit(condition),
        })
        .collect();

    Operator::new("mark", gates)
}

/// Ripple-carry adder of the condition bits into the accumulator.
///
/// Condition `q` can only find the accumulator at values up to `q`, so its
/// increment touches the low `floor(log2(q + 1)) + 1` bits. Within one
/// increment the most significant bit flips first, controlled by the
/// condition bit and every accumulator bit below it.
pub fn accumulate_operator(layout: &RegisterLayout) -> Operator {
    let mut gates = Vec::new();

    for condition in 0..layout.condition_bits {
        let width = move_index_width(condition + 1).min(layout.accumulator_bits);

        for target in (0..width).rev() {
            let controls: Vec<usize> = std::iter::once(layout.condition_bit(condition))
                .chain((0..target).map(|bit| layout.accumulator_bit(bit)))
                .collect();
            gates.push(Gate::all_set(&controls, layout.accumulator_bit(target)));
        }
    }

    Operator::new("accumulate", gates)
}

pub fn check_threshold(layout: &RegisterLayout, threshold: usize) -> GroverResult<()> {
    if threshold > layout.max_accumulator() {
        return Err(GroverError::InvalidThreshold {
            threshold,
            max: layout.max_accumulator(),
        });
    }
    Ok(())
}

/// Sets the ancilla for every accepted accumulator value, flips the phase
/// of the ancilla, and clears it again
pub fn threshold_operator(layout: &RegisterLayout, threshold: usize, mode: MarkingMode) -> GroverResult<Operator> {
    check_threshold(layout, threshold)?;

    let accepted = match mode {
        MarkingMode::Exact => threshold..=threshold,
        MarkingMode::AtLeast => threshold..=layout.max_accumulator(),
    };

    let set_ancilla: Vec<Gate> = accepted
        .map(|value| Gate::ControlledFlip {
            mask: layout.accumulator_mask(),
            pattern: value << layout.accumulator_offset(),
            target: layout.ancilla_bit(),
        })
        .collect();

    let mut gates = set_ancilla.clone();
    gates.push(Gate::PhaseFlip {
        mask: layout.ancilla_mask(),
        pattern: layout.ancilla_mask(),
    });
    gates.extend(set_ancilla.into_iter().rev());

    Ok(Operator::new(format!("flip({})", threshold), gates))
}
