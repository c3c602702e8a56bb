//! Exact state-vector simulation of the search registers

use super::{
    conditions::ConditionTable,
    diffusion::diffusion_operator,
    error::GroverResult,
    layout::RegisterLayout,
    operator::{norm, Amplitude, Operator},
    oracle::{accumulate_operator, marking_operator, threshold_operator, MarkingMode},
    trace::{Trace, TraceEvent},
};

/// Owns the amplitude vector. Every operator applied to it is unitary, so
/// the norm only moves by floating-point drift.
#[derive(Debug, Clone)]
pub struct AmplitudeState {
    layout: RegisterLayout,
    amplitudes: Vec<Amplitude>,
    /// compute operators applied since the last `reverse_last_block`
    block: Vec<Operator>,
    trace: Option<Trace>,
}

impl AmplitudeState {
    /// All registers in the zero state
    pub fn new(layout: RegisterLayout) -> Self {
        let mut amplitudes = vec![Amplitude::new(0.0, 0.0); layout.size()];
        amplitudes[0] = Amplitude::new(1.0, 0.0);

        Self {
            layout,
            amplitudes,
            block: Vec::new(),
            trace: None,
        }
    }

    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Trace::new());
        self
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    pub fn norm(&self) -> f64 {
        norm(&self.amplitudes)
    }

    pub fn trace(&self) -> Option<&[TraceEvent]> {
        self.trace.as_deref()
    }

    pub fn take_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    pub fn record(&mut self, event: TraceEvent) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(event);
        }
    }

    /// Equal superposition over the move-index register, every other
    /// register at zero
    pub fn initialize_uniform(&mut self) {
        let states = self.layout.move_states();
        let amplitude = Amplitude::new(1.0 / (states as f64).sqrt(), 0.0);

        self.amplitudes.fill(Amplitude::new(0.0, 0.0));
        self.amplitudes[..states].fill(amplitude);
        self.block.clear();

        self.record(TraceEvent::Initialize { move_states: states });
    }

    pub fn apply(&mut self, operator: &Operator) {
        self.amplitudes = operator.apply(&self.amplitudes);
        self.record(TraceEvent::Apply { label: operator.label.clone() });
    }

    fn apply_compute(&mut self, operator: Operator) {
        self.apply(&operator);
        self.block.push(operator);
    }

    pub fn apply_condition_marking(&mut self, table: &ConditionTable) {
        debug_assert_eq!(table.num_conditions(), self.layout.condition_bits);
        debug_assert!(table.num_moves() <= self.layout.move_states());

        self.apply_compute(marking_operator(&self.layout, table));
    }

    pub fn apply_accumulate(&mut self) {
        self.apply_compute(accumulate_operator(&self.layout));
    }

    /// Negates every amplitude whose accumulator matches `threshold`
    /// under `mode`; the ancilla is left clear
    pub fn apply_threshold_phase_flip(&mut self, threshold: usize, mode: MarkingMode) -> GroverResult<()> {
        let operator = threshold_operator(&self.layout, threshold, mode)?;
        self.apply(&operator);
        Ok(())
    }

    pub fn apply_diffusion(&mut self) {
        let operator = diffusion_operator(&self.layout);
        self.apply(&operator);
    }

    /// Undoes the marking and accumulate operators applied since the last
    /// call, newest first, returning those registers to zero
    pub fn reverse_last_block(&mut self) {
        while let Some(operator) = self.block.pop() {
            let inverse = operator.inverse();
            inverse.apply_in_place(&mut self.amplitudes);
            self.record(TraceEvent::Undo { label: operator.label });
        }
    }

    /// Rescales to unit norm; returns how far the norm had drifted
    pub fn renormalize(&mut self) -> f64 {
        let norm = self.norm();
        let drift = (norm - 1.0).abs();

        if norm > 0.0 && drift > 0.0 {
            let scale = 1.0 / norm;
            for amplitude in self.amplitudes.iter_mut() {
                *amplitude *= scale;
            }
        }

        self.record(TraceEvent::Renormalize { drift });
        drift
    }

    /// Measurement distribution of the move-index register, summed over
    /// every other register
    pub fn move_probabilities(&self) -> Vec<f64> {
        let mut probabilities = vec![0.0; self.layout.move_states()];
        for (state, amplitude) in self.amplitudes.iter().enumerate() {
            probabilities[self.layout.move_index(state)] += amplitude.norm_sqr();
        }
        probabilities
    }

    /// Probability mass outside the all-zero setting of the work registers
    pub fn work_register_weight(&self) -> f64 {
        self.amplitudes.iter()
            .enumerate()
            .filter(|(state, _)| state & !self.layout.move_mask() != 0)
            .map(|(_, amplitude)| amplitude.norm_sqr())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grover::GroverError;

    fn table(rows: &[&[u8]]) -> ConditionTable {
        ConditionTable::from_flags(
            rows.iter().map(|r| r.iter().map(|&f| f == 1).collect()).collect()
        ).unwrap()
    }

    fn assert_same(a: &[Amplitude], b: &[Amplitude]) {
        for (x, y) in a.iter().zip(b) {
            assert!((*x - *y).norm() < 1e-12, "{} != {}", x, y);
        }
    }

    fn prepared(rows: &[&[u8]]) -> (AmplitudeState, ConditionTable) {
        let table = table(rows);
        let layout = RegisterLayout::new(table.num_moves(), table.num_conditions());
        let mut state = AmplitudeState::new(layout).with_trace();
        state.initialize_uniform();
        (state, table)
    }

    #[test]
    fn test_uniform_initialization() {
        let (state, _) = prepared(&[&[1], &[0], &[0], &[1], &[1]]);
        let probabilities = state.move_probabilities();

        assert_eq!(probabilities.len(), 8);
        for p in probabilities {
            assert!((p - 0.125).abs() < 1e-12);
        }
        assert!((state.norm() - 1.0).abs() < 1e-12);
        assert_eq!(state.work_register_weight(), 0.0);
    }

    #[test]
    fn test_threshold_flip_round_trip() {
        let (mut state, table) = prepared(&[&[1, 1], &[0, 1], &[0, 0]]);
        state.apply_condition_marking(&table);
        state.apply_accumulate();
        let before = state.amplitudes().to_vec();

        state.apply_threshold_phase_flip(1, MarkingMode::Exact).unwrap();
        let flipped = state.amplitudes().to_vec();
        for (s, (a, b)) in flipped.iter().zip(&before).enumerate() {
            if state.layout().accumulator(s) == 1 {
                assert!((*a + *b).norm() < 1e-12);
            } else {
                assert!((*a - *b).norm() < 1e-12);
            }
        }

        state.apply_threshold_phase_flip(1, MarkingMode::Exact).unwrap();
        assert_same(state.amplitudes(), &before);
    }

    #[test]
    fn test_reverse_block_restores_registers() {
        let (mut state, table) = prepared(&[&[1, 0, 1], &[1, 1, 1], &[0, 0, 0], &[0, 1, 0]]);
        let start = state.amplitudes().to_vec();

        state.apply_condition_marking(&table);
        state.apply_accumulate();
        assert!(state.work_register_weight() > 0.0);

        state.reverse_last_block();
        assert_same(state.amplitudes(), &start);
        assert_eq!(state.work_register_weight(), 0.0);

        let labels: Vec<String> = state.trace().unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(labels, vec![
            "init uniform 8",
            "apply mark",
            "apply accumulate",
            "undo accumulate",
            "undo mark",
        ]);
    }

    #[test]
    fn test_invalid_threshold_leaves_state() {
        let (mut state, _) = prepared(&[&[1], &[0]]);
        let start = state.amplitudes().to_vec();

        assert_eq!(
            state.apply_threshold_phase_flip(4, MarkingMode::Exact),
            Err(GroverError::InvalidThreshold { threshold: 4, max: 3 })
        );
        assert_same(state.amplitudes(), &start);
    }

    #[test]
    fn test_renormalize() {
        let (mut state, _) = prepared(&[&[1], &[0], &[1]]);
        for amplitude in state.amplitudes.iter_mut() {
            *amplitude *= 1.5;
        }

        let drift = state.renormalize();
        assert!((drift - 0.5).abs() < 1e-12);
        assert!((state.norm() - 1.0).abs() < 1e-12);
    }
}
