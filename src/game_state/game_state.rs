//! Game record built on top of `Position`.
//!
//! `Position` only knows the side to move as "own"; `GameState` adds the
//! absolute color, needed to read and print move text, and the list of
//! positions already played, needed for repetition detection.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::{move_to_long_algebraic, parse_move_for};

#[derive(Debug, Clone)]
pub struct GameState {
    pub position: Position,
    pub side_to_move: Color,
    /// Positions before each move played, oldest first.
    pub history: Vec<Position>,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let (position, side_to_move) = parse_fen(fen)?;
        Ok(Self {
            position,
            side_to_move,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(&self.position, self.side_to_move)
    }

    /// Play a move given in the mover's orientation. The move must be one
    /// the position generates.
    pub fn apply_move(&mut self, mv: Move) -> ChessResult<()> {
        if !self.position.generate_moves().any(|candidate| candidate == mv) {
            return Err(ChessErrors::IllegalMove(move_to_long_algebraic(
                mv,
                self.side_to_move,
            )));
        }

        let next = self.position.apply(mv);
        self.history.push(std::mem::replace(&mut self.position, next));
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }

    /// Parse and play a move such as `e2e4`. Nothing changes on error.
    pub fn apply_long_algebraic(&mut self, text: &str) -> ChessResult<Move> {
        let mv = parse_move_for(text, self.side_to_move)?;
        self.apply_move(mv)?;
        Ok(mv)
    }

    /// The side to move has lost its king.
    #[inline]
    pub fn king_captured(&self) -> bool {
        self.position.king_captured()
    }

    /// Number of plies played since the game state was created.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}
