//! Board model consumed by the search: squares, pieces, moves

pub mod board;
pub mod convert;
pub mod display;
pub mod loc;
pub mod moves;
pub mod side;

pub use board::{Board, Position};
pub use convert::{FromIndex, ToIndex};
pub use loc::{Loc, LocDelta};
pub use moves::{legal_moves, Move};
pub use side::{Side, SideArray};
