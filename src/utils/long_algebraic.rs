//! Long algebraic move text (`e2e4`, `a7a8q`).
//!
//! Text is always in white coordinates. Moves inside the engine are in the
//! mover's orientation, so black moves are rotated on the way in and out.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Parse move text into a move in white coordinates.
///
/// A fifth character is accepted as a promotion letter and ignored: pawns
/// always promote to a queen.
pub fn parse_move(text: &str) -> ChessResult<Move> {
    let invalid = || ChessErrors::InvalidMoveString(text.to_owned());

    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    if let Some(promotion) = text.chars().nth(4) {
        char_to_promotion(promotion).ok_or_else(invalid)?;
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    Ok(Move::new(from, to))
}

/// Parse move text and express it in the orientation of `side_to_move`.
pub fn parse_move_for(text: &str, side_to_move: Color) -> ChessResult<Move> {
    let mv = parse_move(text)?;
    Ok(match side_to_move {
        Color::Light => mv,
        Color::Dark => mv.rotate(),
    })
}

/// Render a move made by `side_to_move` in white coordinates.
pub fn move_to_long_algebraic(mv: Move, side_to_move: Color) -> String {
    let absolute = match side_to_move {
        Color::Light => mv,
        Color::Dark => mv.rotate(),
    };

    // Generated moves only ever touch playable squares.
    let from = square_to_algebraic(absolute.from).unwrap_or_else(|_| "??".to_owned());
    let to = square_to_algebraic(absolute.to).unwrap_or_else(|_| "??".to_owned());
    format!("{from}{to}")
}

/// Like [`move_to_long_algebraic`], with the `q` suffix protocol front ends
/// expect when a pawn reaches the last rank.
pub fn move_to_uci(position: &Position, mv: Move, side_to_move: Color) -> String {
    let mut out = move_to_long_algebraic(mv, side_to_move);
    if position.board[mv.from] == Piece::Own(PieceKind::Pawn) && (A8..=H8).contains(&mv.to) {
        out.push('q');
    }
    out
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
