//! Engine-vs-engine games.
//!
//! Both sides start from the standard position, optionally after a short
//! random opening drawn from a seeded RNG, and play until one king is
//! captured or the ply limit runs out.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlayOutcome {
    WhiteWins,
    BlackWins,
    MaxPlies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfPlayConfig {
    /// Plies the engines may play after the opening.
    pub max_plies: u32,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub seed: u64,
    pub go_params: GoParams,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 8,
            seed: 0,
            go_params: GoParams {
                depth: Some(4),
                ..GoParams::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfPlayResult {
    pub outcome: SelfPlayOutcome,
    pub opening_moves: Vec<String>,
    /// Moves chosen by the engines, in long algebraic notation.
    pub moves: Vec<String>,
    pub final_state: GameState,
}

pub fn play_self_play_game(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: &SelfPlayConfig,
) -> ChessResult<SelfPlayResult> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (state, opening_moves) = random_opening(
        GameState::new_game(),
        &mut rng,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    play_self_play_game_from(state, opening_moves, white, black, config)
}

/// Continue a game from `state` without an opening prefix.
pub fn play_self_play_game_from(
    mut state: GameState,
    opening_moves: Vec<String>,
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    config: &SelfPlayConfig,
) -> ChessResult<SelfPlayResult> {
    white.new_game();
    black.new_game();

    let mut moves = Vec::new();

    for _ in 0..config.max_plies {
        if state.king_captured() {
            break;
        }

        let mover = state.side_to_move;
        let (out, name) = match mover {
            Color::Light => (white.choose_move(&state, &config.go_params)?, white.name()),
            Color::Dark => (black.choose_move(&state, &config.go_params)?, black.name()),
        };

        let Some(chosen) = out.best_move.or_else(|| state.position.generate_moves().next()) else {
            return Err(ChessErrors::IllegalMove(format!(
                "{name} has no move in {}",
                state.get_fen()
            )));
        };

        let text = move_to_long_algebraic(chosen, mover);
        debug!(ply = state.ply(), engine = name, mv = %text, "self-play move");
        state.apply_move(chosen)?;
        moves.push(text);
    }

    let outcome = if state.king_captured() {
        match state.side_to_move {
            Color::Light => SelfPlayOutcome::BlackWins,
            Color::Dark => SelfPlayOutcome::WhiteWins,
        }
    } else {
        SelfPlayOutcome::MaxPlies
    };
    info!(?outcome, plies = moves.len(), "self-play game finished");

    Ok(SelfPlayResult {
        outcome,
        opening_moves,
        moves,
        final_state: state,
    })
}

fn random_opening(
    mut state: GameState,
    rng: &mut StdRng,
    min_plies: u8,
    max_plies: u8,
) -> ChessResult<(GameState, Vec<String>)> {
    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    let mut opening_moves = Vec::new();
    for _ in 0..target_plies {
        if state.king_captured() {
            break;
        }
        let candidates: Vec<Move> = state.position.generate_moves().collect();
        let Some(&chosen) = candidates.choose(rng) else {
            break;
        };
        opening_moves.push(move_to_long_algebraic(chosen, state.side_to_move));
        state.apply_move(chosen)?;
    }

    Ok((state, opening_moves))
}
