//! Interactive console game: the human plays white against the searcher.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::piece_square_tables::MATE_UPPER;
use crate::search::iterative_deepening::SearchInfo;
use crate::search::searcher::{SearchConfig, Searcher};
use crate::utils::long_algebraic::move_to_long_algebraic;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Deepest iteration the engine runs per reply.
    pub max_depth: i32,
    /// Stop deepening once a reply has taken this long.
    pub move_time: Option<Duration>,
    pub search: SearchConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            move_time: None,
            search: SearchConfig::default(),
        }
    }
}

/// Play until a king falls or `input` runs dry.
pub fn run_console<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    config: ConsoleConfig,
) -> ChessResult<()> {
    let mut game = GameState::new_game();
    let mut searcher = Searcher::new(config.search);

    loop {
        writeln!(out, "{}", render_game_state(&game.position, game.side_to_move))?;

        if game.king_captured() {
            writeln!(out, "You lost")?;
            return Ok(());
        }

        write!(out, "Your move: ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let text = line.trim();
        if let Err(err) = game.apply_long_algebraic(text) {
            warn!(input = text, %err, "rejected console move");
            writeln!(out, "{err}")?;
            continue;
        }
        writeln!(out, "Your move = {text}")?;
        writeln!(out, "{}", render_game_state(&game.position, game.side_to_move))?;

        if game.king_captured() {
            writeln!(out, "You won!")?;
            return Ok(());
        }

        let Some(reply) = engine_reply(&mut searcher, &game, &config, out)? else {
            writeln!(out, "I have no move to play")?;
            return Ok(());
        };
        let Some(best_move) = reply.best_move else {
            writeln!(out, "I have no move to play")?;
            return Ok(());
        };

        if reply.score == MATE_UPPER {
            writeln!(out, "Checkmate!")?;
        }
        writeln!(
            out,
            "\nMy move: depth={} score={} move=[{}]\n",
            reply.depth,
            reply.score,
            move_to_long_algebraic(best_move, Color::Dark)
        )?;
        game.apply_move(best_move)?;
    }
}

/// Deepen until the depth cap or the time limit and return the last result.
fn engine_reply<W: Write>(
    searcher: &mut Searcher,
    game: &GameState,
    config: &ConsoleConfig,
    out: &mut W,
) -> ChessResult<Option<SearchInfo>> {
    let start = Instant::now();
    let mut last = None;

    for info in searcher.search(&game.position) {
        let elapsed = start.elapsed();
        let shown = info
            .best_move
            .map(|mv| move_to_long_algebraic(mv, game.side_to_move))
            .unwrap_or_default();
        writeln!(
            out,
            "({elapsed:?}) depth={} score={} move=[{shown}]",
            info.depth, info.score
        )?;
        last = Some(info);

        let out_of_time = config.move_time.is_some_and(|limit| elapsed >= limit);
        if info.depth >= config.max_depth || out_of_time {
            break;
        }
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::{run_console, ConsoleConfig};

    fn play(script: &str) -> String {
        let config = ConsoleConfig {
            max_depth: 2,
            ..ConsoleConfig::default()
        };
        let mut out = Vec::new();
        run_console(script.as_bytes(), &mut out, config).expect("console should not fail");
        String::from_utf8(out).expect("console output is UTF-8")
    }

    #[test]
    fn engine_answers_a_legal_move() {
        let output = play("e2e4\n");
        assert!(output.contains("Your move = e2e4"));
        assert!(output.contains("depth=1"));
        assert!(output.contains("depth=2"));
        assert!(output.contains("My move: depth=2"));
        assert!(!output.contains("depth=3"));
    }

    #[test]
    fn bad_input_is_reported_and_asked_again() {
        let output = play("e2e5\nhello\n");
        assert!(output.contains("illegal move: e2e5"));
        assert!(output.contains("invalid move string: hello"));
        assert!(!output.contains("My move"));
        assert_eq!(output.matches("Your move: ").count(), 3);
    }
}
