//! Gates and operators over the flat amplitude vector
//!
//! Every gate here is its own inverse: controlled flips are involutive
//! permutations of basis states, phase flips negate a fixed subset, and the
//! mean inversion is a reflection. An operator is therefore undone by
//! replaying its gates in reverse order.

use num_complex::Complex64;

pub type Amplitude = Complex64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Flip bit `target` of every basis state with `state & mask == pattern`.
    /// `mask` must not cover `target`.
    ControlledFlip { mask: usize, pattern: usize, target: usize },
    /// Negate every basis state with `state & mask == pattern`
    PhaseFlip { mask: usize, pattern: usize },
    /// Reflect the register `[offset, offset + width)` about its mean
    /// amplitude, separately for every setting of the other bits
    MeanInversion { offset: usize, width: usize },
}

impl Gate {
    /// Multi-controlled flip that fires when all `controls` bits are set
    pub fn all_set(controls: &[usize], target: usize) -> Self {
        let mask = controls.iter().fold(0, |mask, bit| mask | (1 << bit));
        Gate::ControlledFlip { mask, pattern: mask, target }
    }

    pub fn apply(&self, amplitudes: &mut [Amplitude]) {
        match *self {
            Gate::ControlledFlip { mask, pattern, target } => {
                let bit = 1 << target;
                debug_assert_eq!(mask & bit, 0, "control mask covers target bit");

                for state in 0..amplitudes.len() {
                    if state & bit == 0 && state & mask == pattern {
                        amplitudes.swap(state, state | bit);
                    }
                }
            }
            Gate::PhaseFlip { mask, pattern } => {
                for (state, amplitude) in amplitudes.iter_mut().enumerate() {
                    if state & mask == pattern {
                        *amplitude = -*amplitude;
                    }
                }
            }
            Gate::MeanInversion { offset, width } => {
                let states = 1usize << width;
                let register = (states - 1) << offset;
                let scale = 1.0 / states as f64;

                for base in (0..amplitudes.len()).filter(|s| s & register == 0) {
                    let members = (0..states).map(|j| base | (j << offset));
                    let mean = members.clone()
                        .map(|s| amplitudes[s])
                        .sum::<Amplitude>() * scale;

                    for s in members {
                        amplitudes[s] = mean * 2.0 - amplitudes[s];
                    }
                }
            }
        }
    }
}

/// A named sequence of gates, applied as a pure map over amplitude vectors
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub label: String,
    pub gates: Vec<Gate>,
}

impl Operator {
    pub fn new(label: impl Into<String>, gates: Vec<Gate>) -> Self {
        Self {
            label: label.into(),
            gates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns the transformed vector, leaving the input untouched
    pub fn apply(&self, amplitudes: &[Amplitude]) -> Vec<Amplitude> {
        let mut out = amplitudes.to_vec();
        self.apply_in_place(&mut out);
        out
    }

    pub fn apply_in_place(&self, amplitudes: &mut [Amplitude]) {
        for gate in &self.gates {
            gate.apply(amplitudes);
        }
    }

    pub fn inverse(&self) -> Self {
        Self {
            label: format!("{}^-1", self.label),
            gates: self.gates.iter().rev().copied().collect(),
        }
    }

    /// `self` followed by `next`
    pub fn then(mut self, next: &Operator) -> Self {
        self.label = format!("{} . {}", next.label, self.label);
        self.gates.extend_from_slice(&next.gates);
        self
    }
}

pub fn norm(amplitudes: &[Amplitude]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}
