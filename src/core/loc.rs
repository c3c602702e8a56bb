use std::{
    fmt::Display,
    ops::{Add, Neg, Sub},
    str::FromStr,
};
use anyhow::{anyhow, bail, Context, Result};

use super::convert::{FromIndex, ToIndex};

pub const BOARD_LEN: usize = 8;
pub const BOARD_SIZE: usize = BOARD_LEN * BOARD_LEN;

/// A square on the board. Row 0 is the top rank as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc {
    pub row: i32,
    pub col: i32,
}

impl Loc {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn in_bounds(&self) -> bool {
        self.row >= 0 && self.row < BOARD_LEN as i32 &&
        self.col >= 0 && self.col < BOARD_LEN as i32
    }

    /// Midpoint between two squares two steps apart
    pub fn midpoint(&self, other: &Loc) -> Loc {
        Loc {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

impl From<(i32, i32)> for Loc {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl FromIndex for Loc {
    const COUNT: usize = BOARD_SIZE;

    fn from_index(idx: usize) -> Result<Self> {
        if idx >= BOARD_SIZE {
            bail!("Invalid square index: {}", idx);
        }
        Ok(Self {
            row: (idx / BOARD_LEN) as i32,
            col: (idx % BOARD_LEN) as i32,
        })
    }
}

impl ToIndex for Loc {
    fn to_index(&self) -> usize {
        (self.row as usize) * BOARD_LEN + (self.col as usize)
    }
}

/// Parses the printed form, rank digit then file letter: `3A` is row 5, column 0
impl FromStr for Loc {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let rank = chars.next()
            .and_then(|c| c.to_digit(10))
            .context("Invalid square rank")?;
        let file = chars.next()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| c.is_ascii_uppercase())
            .context("Invalid square file")?;
        if chars.next().is_some() {
            bail!("Invalid square: {}", s);
        }

        let loc = Loc {
            row: BOARD_LEN as i32 - rank as i32,
            col: (file as u8 - b'A') as i32,
        };
        if !loc.in_bounds() {
            return Err(anyhow!("Square out of board: {}", s));
        }
        Ok(loc)
    }
}

/// Off-board squares print as raw `(row,col)`
impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({},{})", self.row, self.col);
        }
        write!(f, "{}{}", BOARD_LEN as i32 - self.row, (b'A' + self.col as u8) as char)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocDelta {
    pub dr: i32,
    pub dc: i32,
}

impl LocDelta {
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// Component-wise unit sign, zero where the delta is zero
    pub fn signum(&self) -> LocDelta {
        LocDelta {
            dr: self.dr.signum(),
            dc: self.dc.signum(),
        }
    }
}

impl Add<LocDelta> for Loc {
    type Output = Loc;

    fn add(self, other: LocDelta) -> Self::Output {
        Loc {
            row: self.row + other.dr,
            col: self.col + other.dc,
        }
    }
}

impl Sub<LocDelta> for Loc {
    type Output = Loc;

    fn sub(self, other: LocDelta) -> Self::Output {
        Loc {
            row: self.row - other.dr,
            col: self.col - other.dc,
        }
    }
}

impl Sub<Loc> for Loc {
    type Output = LocDelta;

    fn sub(self, other: Loc) -> Self::Output {
        LocDelta {
            dr: self.row - other.row,
            dc: self.col - other.col,
        }
    }
}

impl Neg for LocDelta {
    type Output = LocDelta;

    fn neg(self) -> Self::Output {
        LocDelta {
            dr: -self.dr,
            dc: -self.dc,
        }
    }
}
