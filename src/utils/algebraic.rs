//! Square conversions between algebraic coordinates and the padded board.
//!
//! Squares are named in white orientation (`a1` is [`A1`]). Positions seen
//! from black must be rotated by the caller before or after converting.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Square, A1, E, N};
use crate::game_state::position::is_playable;

/// Convert algebraic notation (for example: "e4") to a padded-board square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file_index = isize::from(file - b'a');
    let rank_index = isize::from(rank - b'1');
    Ok(A1.wrapping_add_signed(file_index * E + rank_index * N))
}

/// Convert a playable square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if !is_playable(square) {
        return Err(ChessErrors::InvalidSquare(format!("cell {square}")));
    }

    let file = (square % 10 - 1) as u8;
    let rank = (9 - square / 10) as u8;
    let file_char = char::from(b'a' + file);
    let rank_char = char::from(b'1' + rank);

    Ok(format!("{file_char}{rank_char}"))
}
