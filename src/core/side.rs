use anyhow::{anyhow, bail, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use super::convert::{FromIndex, ToIndex};
use std::ops::{Index, IndexMut, Not};
use std::str::FromStr;

/// Side/player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn all() -> [Side; 2] {
        [Side::Red, Side::Black]
    }

    /// Row direction this side's men travel in. Red starts at the bottom
    /// of the board (rows 5..=7) and moves toward row 0.
    pub fn direction(&self) -> i32 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    pub fn opponent(self) -> Self {
        !self
    }

    pub fn to_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Side::from_char), chars.next()) {
            (Some(side), None) => Ok(side),
            _ => bail!("Unknown side: {}", s),
        }
    }
}

impl FromIndex for Side {
    const COUNT: usize = 2;

    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("Invalid side index: {}", idx))
    }
}

impl ToIndex for Side {
    fn to_index(&self) -> usize {
        ToPrimitive::to_usize(self).unwrap_or_default()
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

/// Array indexed by game side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideArray<T> {
    pub values: [T; 2],
}

impl<T> SideArray<T> {
    pub fn new(red: T, black: T) -> Self {
        Self {
            values: [red, black],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, index: Side) -> &Self::Output {
        &self.values[index.to_index()]
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self.values[index.to_index()]
    }
}
