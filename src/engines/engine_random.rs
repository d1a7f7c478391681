//! Random-move engine.
//!
//! Picks uniformly among the generated moves. Used as a sparring partner in
//! self-play and for front-end diagnostics.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Damson Random"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let moves: Vec<Move> = game_state.position.generate_moves().collect();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine moves {}", moves.len()));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        out.best_move = moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;

    #[test]
    fn random_engine_plays_generated_moves() {
        let game = GameState::new_game();
        let mut engine = RandomEngine::seeded(5);
        for _ in 0..10 {
            let out = engine
                .choose_move(&game, &GoParams::default())
                .expect("random engine should not fail");
            let mv = out.best_move.expect("start position has moves");
            assert!(game.position.generate_moves().any(|candidate| candidate == mv));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let game = GameState::new_game();
        let mut first = RandomEngine::seeded(42);
        let mut second = RandomEngine::seeded(42);
        for _ in 0..10 {
            let a = first.choose_move(&game, &GoParams::default()).expect("choice");
            let b = second.choose_move(&game, &GoParams::default()).expect("choice");
            assert_eq!(a.best_move, b.best_move);
        }
    }
}
