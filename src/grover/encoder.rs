use crate::core::Move;

use super::{
    error::{GroverError, GroverResult},
    layout::move_index_width,
};

/// Bijection between legal moves and fixed-width move indices. The index of
/// a move is its position in the caller's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEncoder {
    moves: Vec<Move>,
    width: usize,
}

impl MoveEncoder {
    pub fn new(moves: Vec<Move>, max_moves: usize) -> GroverResult<Self> {
        if moves.is_empty() {
            return Err(GroverError::EmptyMoveSet);
        }
        if moves.len() > max_moves {
            return Err(GroverError::TooManyMoves {
                count: moves.len(),
                limit: max_moves,
            });
        }

        let width = move_index_width(moves.len());
        Ok(Self { moves, width })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Bits needed for a move index
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn decode(&self, index: usize) -> Option<&Move> {
        self.moves.get(index)
    }

    pub fn encode(&self, mv: &Move) -> Option<usize> {
        self.moves.iter().position(|m| m == mv)
    }

    /// Zero-padded binary label of a move index, most significant bit first
    pub fn state_label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.width)
    }
}
