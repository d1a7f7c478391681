//! MTD-bi iterative-deepening engine.
//!
//! Wraps a `Searcher` and keeps asking it for deeper iterations until the
//! depth cap or the move budget is reached. Depths always run to completion,
//! so the budget is checked between iterations only.

use std::time::Instant;

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::move_budget_ms;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::game_state::position::Position;
use crate::search::searcher::{SearchConfig, Searcher, MAX_SEARCH_DEPTH};
use crate::utils::long_algebraic::move_to_uci;

pub const DEFAULT_MAX_DEPTH: u16 = 50;

const PV_LENGTH: usize = 16;

pub struct MtdEngine {
    searcher: Searcher,
    max_depth: u16,
}

impl MtdEngine {
    pub fn new(max_depth: u16) -> Self {
        Self::with_config(max_depth, SearchConfig::default())
    }

    pub fn with_config(max_depth: u16, config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
            max_depth: max_depth.max(1),
        }
    }

    #[inline]
    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        self.searcher.config()
    }

    fn update_config(&mut self, update: impl FnOnce(&mut SearchConfig)) {
        let mut config = *self.searcher.config();
        update(&mut config);
        self.searcher.set_config(config);
    }
}

impl Default for MtdEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Engine for MtdEngine {
    fn name(&self) -> &str {
        "Damson MTD-bi"
    }

    fn new_game(&mut self) {
        self.searcher.reset();
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessErrors::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        let value = value.trim();

        if name.eq_ignore_ascii_case("MaxDepth") {
            let parsed = value.parse::<u16>().map_err(|_| invalid())?;
            if parsed == 0 || i32::from(parsed) >= MAX_SEARCH_DEPTH {
                return Err(invalid());
            }
            self.max_depth = parsed;
        } else if name.eq_ignore_ascii_case("QSLimit") {
            let parsed = value.parse::<i32>().map_err(|_| invalid())?;
            self.update_config(|config| config.qs_limit = parsed);
        } else if name.eq_ignore_ascii_case("EvalRoughness") {
            let parsed = value.parse::<i32>().map_err(|_| invalid())?;
            if parsed < 0 {
                return Err(invalid());
            }
            self.update_config(|config| config.eval_roughness = parsed);
        } else if name.eq_ignore_ascii_case("TableCapacity") {
            let parsed = value.parse::<usize>().map_err(|_| invalid())?;
            self.update_config(|config| config.table_capacity = parsed.max(1));
        } else if name.eq_ignore_ascii_case("DrawDetection") {
            let enabled = parse_switch(value).ok_or_else(invalid)?;
            self.update_config(|config| config.detect_repetition = enabled);
        } else if name.eq_ignore_ascii_case("StalemateDetection") {
            let enabled = parse_switch(value).ok_or_else(invalid)?;
            self.update_config(|config| config.detect_stalemate = enabled);
        } else if name.eq_ignore_ascii_case("NullMove") {
            let enabled = parse_switch(value).ok_or_else(invalid)?;
            self.update_config(|config| config.null_move = enabled);
        } else if name.eq_ignore_ascii_case("InternalIterativeDeepening") {
            let enabled = parse_switch(value).ok_or_else(invalid)?;
            self.update_config(|config| config.internal_iterative_deepening = enabled);
        }

        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let side = game_state.side_to_move;
        let root = &game_state.position;
        let depth_cap = i32::from(params.depth.unwrap_or(self.max_depth).max(1));
        let budget_ms = move_budget_ms(side, params);

        if self.searcher.config().detect_repetition {
            self.searcher.set_history(game_state.history.iter().cloned());
        }

        let start = Instant::now();
        let mut out = EngineOutput::default();
        let mut search = self.searcher.search(root);

        while let Some(info) = search.next() {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            let nps = info.nodes.saturating_mul(1000) / elapsed_ms.max(1);
            let pv = search.searcher().principal_variation(root, PV_LENGTH);

            out.info_lines.push(format!(
                "info depth {} score cp {} nodes {} time {} nps {} pv {}",
                info.depth,
                info.score,
                info.nodes,
                elapsed_ms,
                nps,
                pv_text(root, side, &pv)
            ));
            if info.best_move.is_some() {
                out.best_move = info.best_move;
                out.score = Some(info.score);
            }

            if info.depth >= depth_cap || budget_ms.is_some_and(|budget| elapsed_ms >= budget) {
                let searcher = search.searcher();
                debug!(
                    depth = info.depth,
                    elapsed_ms,
                    ?budget_ms,
                    scores = ?searcher.score_stats(),
                    killers = ?searcher.killer_stats(),
                    "search stopped"
                );
                break;
            }
        }

        if out.best_move.is_none() {
            out.best_move = root.generate_moves().next();
            out.info_lines
                .push("info string mtd_engine no killer at root, playing first move".to_owned());
        }

        Ok(out)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Render a line of moves that alternate orientation, starting from `side`.
fn pv_text(root: &Position, side: Color, line: &[Move]) -> String {
    let mut words = Vec::with_capacity(line.len());
    let mut position = root.clone();
    let mut mover = side;

    for &mv in line {
        words.push(move_to_uci(&position, mv, mover));
        position = position.apply(mv);
        mover = mover.opposite();
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::MtdEngine;
    use crate::chess_errors::ChessErrors;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;
    use crate::game_state::piece_square_tables::MATE_LOWER;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    #[test]
    fn engine_honors_go_depth_override() {
        let game = GameState::new_game();
        let mut engine = MtdEngine::new(10);
        let params = GoParams {
            depth: Some(2),
            ..GoParams::default()
        };

        let out = engine
            .choose_move(&game, &params)
            .expect("engine should choose a move");
        let joined = out.info_lines.join("\n");

        assert!(joined.contains("info depth 1"), "expected depth-1 search info");
        assert!(joined.contains("info depth 2"), "expected depth-2 search info");
        assert!(!joined.contains("info depth 3"), "depth cap should stop the search");
        assert!(out.best_move.is_some());
    }

    #[test]
    fn engine_finds_mate_for_black() {
        let game = GameState::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1")
            .expect("FEN should parse");
        let mut engine = MtdEngine::default();
        let params = GoParams {
            depth: Some(4),
            ..GoParams::default()
        };

        let out = engine.choose_move(&game, &params).expect("engine should choose a move");
        let best = out.best_move.expect("engine should find a move");
        assert_eq!(move_to_long_algebraic(best, game.side_to_move), "a8a1");
        assert!(out.score.is_some_and(|score| score >= MATE_LOWER));
        assert!(out.info_lines.iter().any(|line| line.contains("pv a8a1")));
    }

    #[test]
    fn options_validate_their_values() {
        let mut engine = MtdEngine::default();
        engine.set_option("MaxDepth", "6").expect("depth should parse");
        assert_eq!(engine.max_depth(), 6);
        engine.set_option("QSLimit", "150").expect("qs limit should parse");
        assert_eq!(engine.config().qs_limit, 150);
        engine.set_option("EvalRoughness", "20").expect("roughness should parse");
        assert_eq!(engine.config().eval_roughness, 20);
        engine.set_option("DrawDetection", "true").expect("flag should parse");
        assert!(engine.config().detect_repetition);
        engine.set_option("TableCapacity", "1000").expect("capacity should parse");
        assert_eq!(engine.config().table_capacity, 1000);

        assert!(matches!(
            engine.set_option("MaxDepth", "zero"),
            Err(ChessErrors::InvalidOption { .. })
        ));
        assert!(engine.set_option("MaxDepth", "0").is_err());
        assert!(engine.set_option("DrawDetection", "maybe").is_err());

        engine.set_option("NullMove", "false").expect("flag should parse");
        assert!(!engine.config().null_move);
        engine.set_option("InternalIterativeDeepening", "off").expect("flag should parse");
        assert!(!engine.config().internal_iterative_deepening);
        engine.set_option("StalemateDetection", "0").expect("flag should parse");
        assert!(!engine.config().detect_stalemate);
        assert!(engine.set_option("NullMove", "sometimes").is_err());
        assert!(!engine.config().null_move);
        assert_eq!(engine.max_depth(), 6);
    }
}
