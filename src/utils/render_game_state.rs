//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the console front end, tests and
//! diagnostics. The board is always drawn from white's side.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Render a position seen from `side_to_move` as a Unicode board.
pub fn render_game_state(position: &Position, side_to_move: Color) -> String {
    let white_view = match side_to_move {
        Color::Light => position.clone(),
        Color::Dark => position.rotate(),
    };

    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8 {
        let rank_char = char::from(b'8' - row as u8);
        out.push(rank_char);
        out.push(' ');

        for file in 0..8 {
            out.push(piece_to_unicode(white_view.board[A8 + row * 10 + file]));

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// In white orientation `Own` pieces are white.
fn piece_to_unicode(piece: Piece) -> char {
    match piece {
        Piece::Own(PieceKind::Pawn) => '♙',
        Piece::Own(PieceKind::Knight) => '♘',
        Piece::Own(PieceKind::Bishop) => '♗',
        Piece::Own(PieceKind::Rook) => '♖',
        Piece::Own(PieceKind::Queen) => '♕',
        Piece::Own(PieceKind::King) => '♔',
        Piece::Enemy(PieceKind::Pawn) => '♟',
        Piece::Enemy(PieceKind::Knight) => '♞',
        Piece::Enemy(PieceKind::Bishop) => '♝',
        Piece::Enemy(PieceKind::Rook) => '♜',
        Piece::Enemy(PieceKind::Queen) => '♛',
        Piece::Enemy(PieceKind::King) => '♚',
        Piece::Empty | Piece::OffBoard => '·',
    }
}
