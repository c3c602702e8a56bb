//! Board and position representation

use super::{
    convert::{FromIndex, ToIndex},
    loc::{Loc, BOARD_LEN, BOARD_SIZE},
    side::{Side, SideArray},
};

use anyhow::{bail, ensure, Context, Result};
use lazy_static::lazy_static;
use std::str::FromStr;

lazy_static! {
    static ref STARTING_BOARD: Board = {
        let mut board = Board::empty();
        for idx in Loc::all_indices() {
            let Ok(loc) = Loc::from_index(idx) else { continue };
            if (loc.row + loc.col) % 2 == 0 {
                continue;
            }
            match loc.row {
                0..=2 => board.set(loc, Some(Side::Black)),
                5..=7 => board.set(loc, Some(Side::Red)),
                _ => {}
            }
        }
        board
    };
}

/// 8x8 checkers board; each square is empty or holds a piece of one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Side>; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE],
        }
    }

    /// Standard opening: twelve men per side on the dark squares
    pub fn starting() -> Self {
        STARTING_BOARD.clone()
    }

    /// Piece on a square; off-board squares read as empty
    pub fn get(&self, loc: Loc) -> Option<Side> {
        if !loc.in_bounds() {
            return None;
        }
        self.squares[loc.to_index()]
    }

    pub fn is_empty(&self, loc: Loc) -> bool {
        loc.in_bounds() && self.get(loc).is_none()
    }

    pub fn set(&mut self, loc: Loc, piece: Option<Side>) {
        if loc.in_bounds() {
            self.squares[loc.to_index()] = piece;
        }
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Loc> + '_ {
        self.squares.iter()
            .enumerate()
            .filter(move |(_, piece)| **piece == Some(side))
            .filter_map(|(idx, _)| Loc::from_index(idx).ok())
    }

    pub fn piece_counts(&self) -> SideArray<usize> {
        let mut counts = SideArray::new(0, 0);
        for side in self.squares.iter().flatten() {
            counts[*side] += 1;
        }
        counts
    }

    /// Builds a board from eight printed rows; `R`/`B` are pieces and any
    /// of ` `, `.`, `_` is an empty square
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        ensure!(rows.len() == BOARD_LEN, "expected {} rows, got {}", BOARD_LEN, rows.len());

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let squares: Vec<char> = line.chars().collect();
            ensure!(squares.len() == BOARD_LEN, "row {} has {} squares", row, squares.len());

            for (col, c) in squares.into_iter().enumerate() {
                let piece = match c {
                    ' ' | '.' | '_' => None,
                    c => Some(Side::from_char(c).with_context(|| format!("invalid square '{}'", c))?),
                };
                board.set(Loc::new(row as i32, col as i32), piece);
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..BOARD_LEN as i32 {
            if row > 0 {
                fen.push('/');
            }

            let mut empty_count = 0;
            for col in 0..BOARD_LEN as i32 {
                match self.get(Loc::new(row, col)) {
                    Some(side) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(side.to_char().to_ascii_uppercase());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
        }

        fen
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<&str> = s.split('/').collect();
        ensure!(ranks.len() == BOARD_LEN, "expected {} ranks, got {}", BOARD_LEN, ranks.len());

        let mut board = Board::empty();
        for (row, rank) in ranks.into_iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    ensure!(run > 0, "empty run must be positive");
                    col += run as usize;
                } else if let Some(side) = Side::from_char(c) {
                    ensure!(col < BOARD_LEN, "rank {} overflows", row);
                    board.set(Loc::new(row as i32, col as i32), Some(side));
                    col += 1;
                } else {
                    bail!("invalid character '{}' in rank {}", c, row);
                }
            }
            ensure!(col == BOARD_LEN, "rank {} has {} squares", row, col);
        }

        Ok(board)
    }
}

/// A board together with the side to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Side,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Side::Red,
        }
    }
}

impl Position {
    pub fn new(board: Board, side_to_move: Side) -> Self {
        Self { board, side_to_move }
    }

    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_fen(), self.side_to_move.to_char())
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let board = parts.next().context("missing board")?.parse()?;
        let side_to_move = parts.next().context("missing side to move")?.parse()?;
        ensure!(parts.next().is_none(), "trailing fields in position");

        Ok(Self { board, side_to_move })
    }
}
