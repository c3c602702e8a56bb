//! Moves and single-step legal move generation

use super::{
    board::Board,
    loc::{Loc, LocDelta, BOARD_LEN},
    side::Side,
};

use std::fmt::Display;

/// A single piece movement, either a diagonal step or a two-square jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Loc,
    pub to: Loc,
}

impl Move {
    pub const fn new(from: Loc, to: Loc) -> Self {
        Self { from, to }
    }

    /// `(startRow, startCol, endRow, endCol)`
    pub const fn from_coords(start_row: i32, start_col: i32, end_row: i32, end_col: i32) -> Self {
        Self {
            from: Loc::new(start_row, start_col),
            to: Loc::new(end_row, end_col),
        }
    }

    pub fn delta(&self) -> LocDelta {
        self.to - self.from
    }

    /// Unit sign of travel along both axes. `None` when either axis does
    /// not change, since such a move has no diagonal heading.
    pub fn heading(&self) -> Option<LocDelta> {
        let heading = self.delta().signum();
        (heading.dr != 0 && heading.dc != 0).then_some(heading)
    }

    pub fn is_jump(&self) -> bool {
        let delta = self.delta();
        delta.dr.abs() == 2 && delta.dc.abs() == 2
    }

    /// Square jumped over by this move, if it is a jump
    pub fn captured(&self) -> Option<Loc> {
        self.is_jump().then(|| self.from.midpoint(&self.to))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Legal single moves for `side`: forward diagonal steps onto empty squares
/// and single jumps over an enemy piece in any diagonal direction.
///
/// Pieces are visited file by file, top to bottom within a file; this order
/// is the move index order the search sees.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let forward = side.direction();
    let mut moves = Vec::new();

    for col in 0..BOARD_LEN as i32 {
        for row in 0..BOARD_LEN as i32 {
            let from = Loc::new(row, col);
            if board.get(from) != Some(side) {
                continue;
            }

            for dc in [-1, 1] {
                let to = from + LocDelta::new(forward, dc);
                if board.is_empty(to) {
                    moves.push(Move::new(from, to));
                }
            }

            for dr in [forward, -forward] {
                for dc in [-1, 1] {
                    let step = LocDelta::new(dr, dc);
                    let over = from + step;
                    let to = over + step;
                    if board.is_empty(to) && board.get(over) == Some(!side) {
                        moves.push(Move::new(from, to));
                    }
                }
            }
        }
    }

    moves
}
