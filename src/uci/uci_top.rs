//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current game, routes `go` requests to
//! the selected engine and emits protocol-compliant output. Search runs
//! synchronously on the loop thread, so `stop` and `ponderhit` are no-ops.

use std::io::{self, BufRead, Write};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::engines::engine_mtd::{MtdEngine, DEFAULT_MAX_DEPTH};
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::searcher::{
    SearchConfig, DEFAULT_EVAL_ROUGHNESS, DEFAULT_QS_LIMIT, DEFAULT_TABLE_CAPACITY,
};
use crate::utils::long_algebraic::move_to_uci;

const UCI_ENGINE_NAME: &str = "Damson Chess";
const UCI_ENGINE_AUTHOR: &str = "Damson Chess developers";

pub fn run_stdio_loop() -> ChessResult<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineKind {
    Mtd,
    Random,
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
    engine_kind: EngineKind,
    /// Options forwarded to the engine, replayed when the engine is rebuilt.
    engine_options: Vec<(String, String)>,
    debug_mode: bool,
}

impl UciState {
    fn new() -> Self {
        Self {
            game_state: GameState::new_game(),
            engine: build_engine(EngineKind::Mtd),
            engine_kind: EngineKind::Mtd,
            engine_options: Vec::new(),
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name MaxDepth type spin default {} min 1 max 999",
                    DEFAULT_MAX_DEPTH
                )?;
                writeln!(
                    out,
                    "option name QSLimit type spin default {} min 0 max 9999",
                    DEFAULT_QS_LIMIT
                )?;
                writeln!(
                    out,
                    "option name EvalRoughness type spin default {} min 0 max 9999",
                    DEFAULT_EVAL_ROUGHNESS
                )?;
                writeln!(
                    out,
                    "option name TableCapacity type spin default {} min 1 max 100000000",
                    DEFAULT_TABLE_CAPACITY
                )?;
                let defaults = SearchConfig::default();
                let switches = [
                    ("DrawDetection", defaults.detect_repetition),
                    ("StalemateDetection", defaults.detect_stalemate),
                    ("NullMove", defaults.null_move),
                    ("InternalIterativeDeepening", defaults.internal_iterative_deepening),
                ];
                for (name, enabled) in switches {
                    writeln!(out, "option name {name} type check default {enabled}")?;
                }
                writeln!(
                    out,
                    "option name EngineKind type combo default mtd var mtd var random"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "stop" | "ponderhit" => {}
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> ChessResult<()> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("EngineKind") {
            self.engine_kind = match value.to_ascii_lowercase().as_str() {
                "mtd" => EngineKind::Mtd,
                "random" => EngineKind::Random,
                _ => return Err(ChessErrors::InvalidOption { name, value }),
            };
            self.engine = build_engine(self.engine_kind);
            for (option, option_value) in &self.engine_options {
                self.engine.set_option(option, option_value)?;
            }
            return Ok(());
        }

        self.engine.set_option(&name, &value)?;
        self.engine_options.retain(|(option, _)| !option.eq_ignore_ascii_case(&name));
        self.engine_options.push((name, value));
        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(&next) = tokens.peek() {
                    if next == "moves" {
                        break;
                    }
                    fen_parts.push(next);
                    tokens.next();
                }
                if fen_parts.is_empty() {
                    return Err(ChessErrors::InvalidFen(
                        "missing FEN after 'position fen'".to_owned(),
                    ));
                }
                GameState::from_fen(&fen_parts.join(" "))?
            }
            Some(other) => {
                return Err(ChessErrors::InvalidFen(format!(
                    "unsupported position token '{other}'"
                )))
            }
            None => {
                return Err(ChessErrors::InvalidFen(
                    "incomplete position command".to_owned(),
                ))
            }
        };

        if tokens.peek().copied() == Some("moves") {
            tokens.next();
            for lan in tokens {
                base_state.apply_long_algebraic(lan)?;
            }
        }

        self.game_state = base_state;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> ChessResult<()> {
        let params = parse_go_params(line);
        let result = self.engine.choose_move(&self.game_state, &params)?;

        for info in &result.info_lines {
            writeln!(out, "{}", info)?;
        }
        if self.debug_mode {
            writeln!(out, "info string fen {}", self.game_state.get_fen())?;
        }

        match result.best_move {
            Some(best_move) => {
                let lan = move_to_uci(
                    &self.game_state.position,
                    best_move,
                    self.game_state.side_to_move,
                );
                writeln!(out, "bestmove {}", lan)?;
            }
            None => writeln!(out, "bestmove 0000")?,
        }

        Ok(())
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);

    while let Some(token) = tokens.next() {
        match token {
            "depth" => params.depth = tokens.next().and_then(|x| x.parse().ok()),
            "movetime" => params.movetime_ms = tokens.next().and_then(|x| x.parse().ok()),
            "wtime" => params.wtime_ms = tokens.next().and_then(|x| x.parse().ok()),
            "btime" => params.btime_ms = tokens.next().and_then(|x| x.parse().ok()),
            "winc" => params.winc_ms = tokens.next().and_then(|x| x.parse().ok()),
            "binc" => params.binc_ms = tokens.next().and_then(|x| x.parse().ok()),
            "movestogo" => params.movestogo = tokens.next().and_then(|x| x.parse().ok()),
            _ => {}
        }
    }

    params
}

fn build_engine(kind: EngineKind) -> Box<dyn Engine> {
    match kind {
        EngineKind::Mtd => Box::new(MtdEngine::default()),
        EngineKind::Random => Box::new(RandomEngine::new()),
    }
}
