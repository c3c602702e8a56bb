//! Measurement of the move register and conversion of counts into a
//! ranked move list

use crate::core::Move;

use super::{
    encoder::MoveEncoder,
    error::{GroverError, GroverResult},
    state::AmplitudeState,
};

use hashbag::HashBag;
use rand::distr::{weighted::WeightedIndex, Distribution};
use rand::prelude::*;
use std::fmt::Display;

/// Observed outcomes of repeated measurement, keyed by move-register value.
/// Values at or above the number of legal moves are padding states.
#[derive(Debug, Clone)]
pub struct Counts {
    bag: HashBag<usize>,
    width: usize,
}

impl Counts {
    pub fn new(width: usize) -> Self {
        Self { bag: HashBag::new(), width }
    }

    pub fn record(&mut self, index: usize) {
        self.bag.insert(index);
    }

    pub fn count(&self, index: usize) -> usize {
        self.bag.contains(&index)
    }

    pub fn shots(&self) -> usize {
        self.bag.len()
    }

    /// `(bitstring, count)` for every observed value, in index order
    pub fn labeled(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(usize, usize)> = self.bag.set_iter()
            .map(|(&index, count)| (index, count))
            .collect();
        entries.sort_unstable();

        entries.into_iter()
            .map(|(index, count)| (format!("{:0width$b}", index, width = self.width), count))
            .collect()
    }
}

impl Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.labeled()
            .into_iter()
            .map(|(label, count)| format!("{}: {}", label, count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Draws `shots` measurements of the move register from the squared
/// amplitudes, summed over the work registers
pub fn sample(state: &AmplitudeState, shots: usize, rng: &mut impl Rng) -> GroverResult<Counts> {
    if shots == 0 {
        return Err(GroverError::InvalidConfiguration("shot count must be positive".to_string()));
    }

    let probabilities = state.move_probabilities();
    let dist = WeightedIndex::new(&probabilities)
        .map_err(|e| GroverError::Sampling(e.to_string()))?;

    let mut counts = Counts::new(state.layout().move_bits);
    for _ in 0..shots {
        counts.record(dist.sample(rng));
    }

    Ok(counts)
}

/// A legal move with its share of the sampled probability mass
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub index: usize,
    pub label: String,
    pub mv: Move,
    pub probability: f64,
}

impl Recommendation {
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }

    /// `(state label, "3A -> 4B", "NN.NN%")`
    pub fn readable(&self) -> (String, String, String) {
        (self.label.clone(), self.mv.to_string(), self.percentage())
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.label, self.mv, self.percentage())
    }
}

/// Probability per legal move. Shots that landed on padding states are
/// spread evenly over the legal moves, so the result always sums to one.
/// Sorted by descending probability; ties keep encoding order.
pub fn rank(encoder: &MoveEncoder, counts: &Counts) -> GroverResult<Vec<Recommendation>> {
    if encoder.is_empty() {
        return Err(GroverError::EmptyMoveSet);
    }

    let shots = counts.shots();
    if shots == 0 {
        return Err(GroverError::Sampling("no samples recorded".to_string()));
    }

    let n = encoder.len();
    let valid: usize = (0..n).map(|index| counts.count(index)).sum();
    let leftover = (shots - valid) as f64 / n as f64;

    let mut ranked: Vec<Recommendation> = encoder.moves()
        .iter()
        .enumerate()
        .map(|(index, mv)| Recommendation {
            index,
            label: encoder.state_label(index),
            mv: *mv,
            probability: (counts.count(index) as f64 + leftover) / shots as f64,
        })
        .collect();

    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grover::{layout::RegisterLayout, operator::{Gate, Operator}};
    use rand::rngs::StdRng;

    fn encoder(n: usize) -> MoveEncoder {
        let moves = (0..n as i32).map(|i| Move::from_coords(i, 0, i + 1, 1)).collect();
        MoveEncoder::new(moves, 64).unwrap()
    }

    fn counts(width: usize, observed: &[(usize, usize)]) -> Counts {
        let mut counts = Counts::new(width);
        for &(index, times) in observed {
            for _ in 0..times {
                counts.record(index);
            }
        }
        counts
    }

    #[test]
    fn test_leftover_is_spread_evenly() {
        let encoder = encoder(3);
        let counts = counts(2, &[(0, 50), (1, 20), (2, 0), (3, 30)]);

        let ranked = rank(&encoder, &counts).unwrap();
        let probabilities: Vec<f64> = ranked.iter().map(|r| r.probability).collect();
        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();

        assert_eq!(indices, vec![0, 1, 2]);
        assert!((probabilities[0] - 0.6).abs() < 1e-12);
        assert!((probabilities[1] - 0.3).abs() < 1e-12);
        assert!((probabilities[2] - 0.1).abs() < 1e-12);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_encoding_order() {
        let encoder = encoder(4);
        let counts = counts(3, &[(2, 10), (3, 10), (1, 5)]);

        let indices: Vec<usize> = rank(&encoder, &counts).unwrap()
            .iter()
            .map(|r| r.index)
            .collect();
        assert_eq!(indices, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_readable_form() {
        let encoder = encoder(5);
        let counts = counts(3, &[(4, 1), (0, 3)]);

        let ranked = rank(&encoder, &counts).unwrap();
        assert_eq!(ranked[0].readable(), (
            "000".to_string(),
            "8A -> 7B".to_string(),
            "75.00%".to_string(),
        ));
        assert_eq!(ranked[1].to_string(), "100 4A -> 3B 25.00%");
        assert_eq!(counts.to_string(), "{000: 3, 100: 1}");
    }

    #[test]
    fn test_sample_follows_distribution() {
        let layout = RegisterLayout::new(2, 1);
        let mut state = AmplitudeState::new(layout);
        state.initialize_uniform();
        let mut rng = StdRng::seed_from_u64(7);

        let counts = sample(&state, 2000, &mut rng).unwrap();
        assert_eq!(counts.shots(), 2000);
        for index in 0..4 {
            assert!(counts.count(index) > 350, "{}", counts);
        }
        assert_eq!(counts.count(4), 0);
    }

    #[test]
    fn test_work_registers_are_marginalized() {
        let layout = RegisterLayout::new(2, 1);
        let mut state = AmplitudeState::new(layout);
        // all of the mass on move 1 with the condition bit set
        let shift = Operator::new("shift", vec![
            Gate::ControlledFlip { mask: 0, pattern: 0, target: 0 },
            Gate::ControlledFlip { mask: 0, pattern: 0, target: layout.condition_bit(0) },
        ]);
        state.apply(&shift);
        let mut rng = StdRng::seed_from_u64(3);

        let counts = sample(&state, 100, &mut rng).unwrap();
        assert_eq!(counts.count(1), 100);
        assert_eq!(counts.labeled(), vec![("01".to_string(), 100)]);
    }

    #[test]
    fn test_zero_shots() {
        let mut state = AmplitudeState::new(RegisterLayout::new(2, 1));
        state.initialize_uniform();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            sample(&state, 0, &mut rng),
            Err(GroverError::InvalidConfiguration(_))
        ));
    }
}
