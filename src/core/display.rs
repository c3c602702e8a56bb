use std::fmt;
use colored::Colorize;

use super::{
    board::{Board, Position},
    loc::{Loc, BOARD_LEN},
    side::Side,
};

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.board.piece_counts();

        writeln!(f)?;
        writeln!(f, "Current Turn: {}", self.side_to_move)?;
        writeln!(f, "Pieces: {} | {}",
            counts[Side::Red].to_string().bright_red(),
            counts[Side::Black].to_string().bright_blue())?;
        writeln!(f)?;
        write!(f, "{}", self.board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_LEN {
            write!(f, " {} ", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;

        write!(f, "  ")?;
        writeln!(f, "{}", "─".repeat(3 * BOARD_LEN + 2))?;

        for row in 0..BOARD_LEN as i32 {
            write!(f, "{} │", BOARD_LEN as i32 - row)?;
            for col in 0..BOARD_LEN as i32 {
                let loc = Loc::new(row, col);
                match self.get(loc) {
                    Some(side) => write!(f, " {} ", side.piece_symbol())?,
                    None if (row + col) % 2 == 1 => write!(f, " · ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f, "│")?;
        }

        write!(f, "  ")?;
        writeln!(f, "{}", "─".repeat(3 * BOARD_LEN + 2))?;
        Ok(())
    }
}

impl Side {
    fn piece_symbol(&self) -> colored::ColoredString {
        match self {
            Side::Red => "R".bright_red(),
            Side::Black => "B".bright_blue(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "{}", "Red".bright_red()),
            Side::Black => write!(f, "{}", "Black".bright_blue()),
        }
    }
}
