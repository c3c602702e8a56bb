//! Boolean move-quality heuristics
//!
//! Each condition looks at a move on the current board and answers yes or
//! no. The search marks moves by how many conditions they satisfy.

use crate::core::{Board, Loc, LocDelta, Move, Side};

use super::{
    encoder::MoveEncoder,
    error::{GroverError, GroverResult},
};

use anyhow::bail;
use std::fmt::Display;
use std::str::FromStr;

/// Largest number of conditions the accumulator is sized for
pub const MAX_CONDITIONS: usize = 3;

/// Everything a condition may look at besides the move itself
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    pub board: &'a Board,
    pub player: Side,
    pub enemy: Side,
    /// Row direction the player's men advance in, `-1` or `1`. Carried for
    /// custom evaluators; the built-in conditions use the move's own heading.
    pub direction: i32,
}

impl<'a> ConditionContext<'a> {
    pub fn new(board: &'a Board, player: Side, enemy: Side, direction: i32) -> Self {
        debug_assert!(direction == -1 || direction == 1, "direction must be -1 or 1");
        Self { board, player, enemy, direction }
    }

    pub fn for_side(board: &'a Board, player: Side) -> Self {
        Self::new(board, player, !player, player.direction())
    }

    /// Whether `loc` is on the board and empty once `mv` has been played
    fn empty_after(&self, mv: &Move, loc: Loc) -> bool {
        if !loc.in_bounds() || loc == mv.to {
            return false;
        }
        loc == mv.from || Some(loc) == mv.captured() || self.board.get(loc).is_none()
    }
}

pub type ConditionFn = fn(&ConditionContext, &Move) -> GroverResult<bool>;

fn heading(mv: &Move) -> GroverResult<LocDelta> {
    mv.heading().ok_or(GroverError::DirectionDegenerate(*mv))
}

/// The landing square has a friendly piece or the board edge diagonally
/// behind it, on the side away from where the piece came from.
pub fn shielded_after_move(ctx: &ConditionContext, mv: &Move) -> GroverResult<bool> {
    let heading = heading(mv)?;
    let behind = mv.to + LocDelta::new(-heading.dr, heading.dc);

    if !behind.in_bounds() {
        return Ok(true);
    }
    Ok(behind != mv.from && ctx.board.get(behind) == Some(ctx.player))
}

/// No enemy piece diagonally ahead of the landing square can jump it.
pub fn not_capturable_after_move(ctx: &ConditionContext, mv: &Move) -> GroverResult<bool> {
    let heading = heading(mv)?;

    for side in [-1, 1] {
        let attacker = mv.to + LocDelta::new(heading.dr, side);
        if ctx.board.get(attacker) != Some(ctx.enemy) {
            continue;
        }

        let landing = mv.to - LocDelta::new(heading.dr, side);
        if ctx.empty_after(mv, landing) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// The move jumps over an enemy piece
pub fn captures_enemy(ctx: &ConditionContext, mv: &Move) -> GroverResult<bool> {
    heading(mv)?;
    Ok(mv.captured().is_some_and(|loc| ctx.board.get(loc) == Some(ctx.enemy)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Shielded,
    NotCapturable,
    CapturesEnemy,
}

impl ConditionKind {
    /// Order in which conditions fill the condition register
    pub const CANONICAL: [ConditionKind; MAX_CONDITIONS] = [
        ConditionKind::Shielded,
        ConditionKind::NotCapturable,
        ConditionKind::CapturesEnemy,
    ];

    /// The first `count` canonical conditions
    pub fn canonical(count: usize) -> GroverResult<&'static [ConditionKind]> {
        if !(1..=MAX_CONDITIONS).contains(&count) {
            return Err(GroverError::InvalidConfiguration(format!(
                "number of conditions must be between 1 and {}, got {}",
                MAX_CONDITIONS, count
            )));
        }
        Ok(&Self::CANONICAL[..count])
    }

    pub fn evaluator(&self) -> ConditionFn {
        match self {
            ConditionKind::Shielded => shielded_after_move,
            ConditionKind::NotCapturable => not_capturable_after_move,
            ConditionKind::CapturesEnemy => captures_enemy,
        }
    }

    pub fn evaluate(&self, ctx: &ConditionContext, mv: &Move) -> GroverResult<bool> {
        (self.evaluator())(ctx, mv)
    }
}

impl Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionKind::Shielded => write!(f, "shielded"),
            ConditionKind::NotCapturable => write!(f, "notcapturable"),
            ConditionKind::CapturesEnemy => write!(f, "captures"),
        }
    }
}

impl FromStr for ConditionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shielded" => Ok(ConditionKind::Shielded),
            "notcapturable" => Ok(ConditionKind::NotCapturable),
            "captures" => Ok(ConditionKind::CapturesEnemy),
            _ => bail!("Unknown condition: {}", s),
        }
    }
}

/// Condition flags per move index, computed once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionTable {
    num_conditions: usize,
    flags: Vec<Vec<bool>>,
}

impl ConditionTable {
    pub fn evaluate(
        encoder: &MoveEncoder,
        conditions: &[ConditionKind],
        ctx: &ConditionContext,
    ) -> GroverResult<Self> {
        let flags = encoder.moves()
            .iter()
            .map(|mv| {
                conditions.iter()
                    .map(|condition| condition.evaluate(ctx, mv))
                    .collect::<GroverResult<Vec<bool>>>()
            })
            .collect::<GroverResult<Vec<_>>>()?;

        Ok(Self {
            num_conditions: conditions.len(),
            flags,
        })
    }

    /// Table from precomputed flags, one row per move index
    pub fn from_flags(flags: Vec<Vec<bool>>) -> GroverResult<Self> {
        let num_conditions = flags.first().map(Vec::len).unwrap_or(0);
        ConditionKind::canonical(num_conditions)?;

        if flags.iter().any(|row| row.len() != num_conditions) {
            return Err(GroverError::InvalidConfiguration(
                "condition rows differ in length".to_string(),
            ));
        }

        Ok(Self { num_conditions, flags })
    }

    pub fn num_conditions(&self) -> usize {
        self.num_conditions
    }

    pub fn num_moves(&self) -> usize {
        self.flags.len()
    }

    pub fn flags(&self, move_index: usize) -> &[bool] {
        &self.flags[move_index]
    }

    pub fn satisfied(&self, move_index: usize) -> usize {
        self.flags[move_index].iter().filter(|&&flag| flag).count()
    }

    /// `(move index, condition)` for every set flag
    pub fn set_flags(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.flags.iter()
            .enumerate()
            .flat_map(|(index, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &flag)| flag)
                    .map(move |(condition, _)| (index, condition))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 8]) -> Board {
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_shielded_by_friend_behind() {
        // red steps 5,2 -> 4,3; behind on the far side is 5,4
        let b = board([
            "........",
            "........",
            "........",
            "........",
            "........",
            "..R.R...",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(shielded_after_move(&ctx, &Move::from_coords(5, 2, 4, 3)).unwrap());
        assert!(!shielded_after_move(&ctx, &Move::from_coords(5, 4, 4, 5)).unwrap());
    }

    #[test]
    fn test_shielded_at_edge() {
        let b = board([
            "........",
            "........",
            "........",
            "........",
            "........",
            "......R.",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(shielded_after_move(&ctx, &Move::from_coords(5, 6, 4, 7)).unwrap());
    }

    #[test]
    fn test_shielded_ignores_enemy_behind() {
        let b = board([
            "........",
            "........",
            "........",
            "........",
            "........",
            "..R.B...",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(!shielded_after_move(&ctx, &Move::from_coords(5, 2, 4, 3)).unwrap());
    }

    #[test]
    fn test_conditions_follow_move_heading() {
        let b = board([
            "........",
            "........",
            "........",
            "....B...",
            "........",
            "..R.R...",
            "........",
            "........",
        ]);
        let forward = ConditionContext::for_side(&b, Side::Red);
        let backward = ConditionContext::new(&b, Side::Red, Side::Black, 1);
        assert_eq!(forward.direction, -1);

        for kind in ConditionKind::CANONICAL {
            for mv in [Move::from_coords(5, 2, 4, 3), Move::from_coords(5, 4, 4, 5)] {
                assert_eq!(kind.evaluate(&forward, &mv), kind.evaluate(&backward, &mv));
            }
        }
    }

    #[test]
    fn test_vertical_move_is_degenerate() {
        let b = Board::starting();
        let ctx = ConditionContext::for_side(&b, Side::Red);
        let mv = Move::from_coords(5, 2, 4, 2);

        assert_eq!(shielded_after_move(&ctx, &mv), Err(GroverError::DirectionDegenerate(mv)));
        assert_eq!(not_capturable_after_move(&ctx, &mv), Err(GroverError::DirectionDegenerate(mv)));
    }

    #[test]
    fn test_capturable_from_ahead() {
        // black at 3,4 can jump 4,3 landing on the vacated 5,2
        let b = board([
            "........",
            "........",
            "........",
            "....B...",
            "........",
            "..R.....",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(!not_capturable_after_move(&ctx, &Move::from_coords(5, 2, 4, 3)).unwrap());
    }

    #[test]
    fn test_capture_blocked_by_occupied_landing() {
        // black at 3,2 would land on 5,4, which is occupied
        let b = board([
            "........",
            "........",
            "........",
            "..B.....",
            "........",
            "..R.R...",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(not_capturable_after_move(&ctx, &Move::from_coords(5, 2, 4, 3)).unwrap());

        let open = board([
            "........",
            "........",
            "........",
            "..B.....",
            "........",
            "..R.....",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&open, Side::Red);
        assert!(!not_capturable_after_move(&ctx, &Move::from_coords(5, 2, 4, 3)).unwrap());
    }

    #[test]
    fn test_jumped_square_is_empty_after_move() {
        // red jumps 4,3 -> 2,1 over 3,2; black at 1,0 lands back on 3,2
        let b = board([
            "........",
            "B.......",
            "........",
            "..B.....",
            "...R....",
            "........",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        let mv = Move::from_coords(4, 3, 2, 1);

        assert!(captures_enemy(&ctx, &mv).unwrap());
        assert!(!not_capturable_after_move(&ctx, &mv).unwrap());
    }

    #[test]
    fn test_captures_enemy() {
        let b = board([
            "........",
            "........",
            "........",
            "..B.....",
            "...R....",
            "........",
            "........",
            "........",
        ]);
        let ctx = ConditionContext::for_side(&b, Side::Red);
        assert!(captures_enemy(&ctx, &Move::from_coords(4, 3, 2, 1)).unwrap());
        assert!(!captures_enemy(&ctx, &Move::from_coords(4, 3, 3, 4)).unwrap());
    }

    #[test]
    fn test_condition_count_bounds() {
        assert!(ConditionKind::canonical(0).is_err());
        assert_eq!(ConditionKind::canonical(2).unwrap().len(), 2);
        assert!(matches!(
            ConditionKind::canonical(4),
            Err(GroverError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_table_from_flags() {
        let table = ConditionTable::from_flags(vec![
            vec![true, false],
            vec![true, true],
            vec![false, false],
        ]).unwrap();

        assert_eq!(table.num_conditions(), 2);
        assert_eq!(table.satisfied(1), 2);
        assert_eq!(table.set_flags().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (1, 1)]);
        assert!(ConditionTable::from_flags(vec![vec![true], vec![true, false]]).is_err());
    }

    #[test]
    fn test_table_on_starting_position() {
        let b = Board::starting();
        let moves = crate::core::legal_moves(&b, Side::Red);
        let encoder = MoveEncoder::new(moves, 64).unwrap();
        let ctx = ConditionContext::for_side(&b, Side::Red);

        let table = ConditionTable::evaluate(&encoder, ConditionKind::canonical(3).unwrap(), &ctx).unwrap();
        assert_eq!(table.num_moves(), 7);
        // nothing can be jumped from the opening, and nothing is captured
        for index in 0..7 {
            assert!(table.flags(index)[1]);
            assert!(!table.flags(index)[2]);
        }
    }
}
