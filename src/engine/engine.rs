use crate::core::{legal_moves, Move, Position};

use super::options::EngineOptions;
use super::search::{search, SearchOptions, SearchResult};

use anyhow::Result;

/// Engine holds the current position and options and answers move requests
pub struct Engine {
    pub position: Position,
    pub options: EngineOptions,
}

impl Engine {
    /// Create a new engine instance at the starting position
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            options: EngineOptions::default(),
        }
    }

    /// Update the current position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn reset_position(&mut self) {
        self.position = Position::default();
    }

    /// Set engine options
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.set_option(name, value)
    }

    /// Legal moves for the side to move, in search order
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position.board, self.position.side_to_move)
    }

    /// Run a recommendation for the current position
    pub fn go(&self, search_options: &SearchOptions) -> SearchResult {
        let config = search_options.apply(&self.options.grover);
        search(&self.position, &config)
    }

    pub fn display(&self) {
        println!("{}", self.position);
    }

    pub fn get_fen(&self) -> String {
        self.position.to_fen()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_uses_search_overrides() {
        let mut engine = Engine::new();
        engine.set_option("shots", "100").unwrap();

        let options = SearchOptions { shots: Some(40), seed: Some(2) };
        let result = engine.go(&options);
        let set = result.recommendations.unwrap();

        assert_eq!(set.counts.shots(), 40);
        assert_eq!(engine.options.grover.shots, 100);
    }

    #[test]
    fn test_same_seed_same_answer() {
        let engine = Engine::new();
        let options = SearchOptions { shots: Some(300), seed: Some(11) };

        let a = engine.go(&options).recommendations.unwrap().entries;
        let b = engine.go(&options).recommendations.unwrap().entries;
        assert_eq!(a, b);
    }

    #[test]
    fn test_position_round_trip() {
        let mut engine = Engine::new();
        let fen = "8/8/8/3B4/2R5/8/8/8 b";
        engine.set_position(fen.parse().unwrap());

        assert_eq!(engine.get_fen(), fen);
        assert_eq!(engine.legal_moves().len(), 2);

        engine.reset_position();
        assert_eq!(engine.legal_moves().len(), 7);
    }
}
