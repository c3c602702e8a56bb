//! Bit layout of the composite index space
//!
//! Registers are packed least significant first:
//!
//! ```text
//! | ancilla | accumulator | conditions | move index |
//!   1 bit     acc bits      C bits       k bits
//! ```

/// Minimal width of the move-index register for `num_moves` moves,
/// `floor(log2(n)) + 1`
pub fn move_index_width(num_moves: usize) -> usize {
    debug_assert!(num_moves > 0);
    (usize::BITS - num_moves.leading_zeros()) as usize
}

/// Accumulator width able to count `num_conditions` one-bit inputs
pub fn accumulator_width(num_conditions: usize) -> usize {
    if num_conditions < 4 { 2 } else { 3 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    pub move_bits: usize,
    pub condition_bits: usize,
    pub accumulator_bits: usize,
}

impl RegisterLayout {
    pub fn new(num_moves: usize, num_conditions: usize) -> Self {
        Self {
            move_bits: move_index_width(num_moves),
            condition_bits: num_conditions,
            accumulator_bits: accumulator_width(num_conditions),
        }
    }

    pub fn total_bits(&self) -> usize {
        self.move_bits + self.condition_bits + self.accumulator_bits + 1
    }

    /// Length of the amplitude vector
    pub fn size(&self) -> usize {
        1 << self.total_bits()
    }

    pub fn move_states(&self) -> usize {
        1 << self.move_bits
    }

    pub fn move_mask(&self) -> usize {
        self.move_states() - 1
    }

    pub fn condition_offset(&self) -> usize {
        self.move_bits
    }

    pub fn condition_bit(&self, condition: usize) -> usize {
        self.condition_offset() + condition
    }

    pub fn condition_mask(&self) -> usize {
        ((1 << self.condition_bits) - 1) << self.condition_offset()
    }

    pub fn accumulator_offset(&self) -> usize {
        self.move_bits + self.condition_bits
    }

    pub fn accumulator_bit(&self, bit: usize) -> usize {
        self.accumulator_offset() + bit
    }

    pub fn accumulator_mask(&self) -> usize {
        self.max_accumulator() << self.accumulator_offset()
    }

    /// Largest value the accumulator can hold
    pub fn max_accumulator(&self) -> usize {
        (1 << self.accumulator_bits) - 1
    }

    pub fn ancilla_bit(&self) -> usize {
        self.total_bits() - 1
    }

    pub fn ancilla_mask(&self) -> usize {
        1 << self.ancilla_bit()
    }

    pub fn compose(&self, move_index: usize, conditions: usize, accumulator: usize, ancilla: bool) -> usize {
        let ancilla = if ancilla { self.ancilla_mask() } else { 0 };

        (move_index & self.move_mask())
            | ((conditions << self.condition_offset()) & self.condition_mask())
            | ((accumulator << self.accumulator_offset()) & self.accumulator_mask())
            | ancilla
    }

    pub fn move_index(&self, state: usize) -> usize {
        state & self.move_mask()
    }

    pub fn conditions(&self, state: usize) -> usize {
        (state & self.condition_mask()) >> self.condition_offset()
    }

    pub fn accumulator(&self, state: usize) -> usize {
        (state & self.accumulator_mask()) >> self.accumulator_offset()
    }

    pub fn ancilla(&self, state: usize) -> bool {
        state & self.ancilla_mask() != 0
    }
}
