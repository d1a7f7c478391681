use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::square_to_algebraic;

/// Render `position` (seen from the side to move) as a FEN string. Clocks
/// are not tracked by the engine and are written as `0 1`.
pub fn generate_fen(position: &Position, side_to_move: Color) -> String {
    let white_view = match side_to_move {
        Color::Light => position.clone(),
        Color::Dark => position.rotate(),
    };

    let side = match side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {} 0 1",
        board_to_fen(&white_view),
        side,
        generate_castling_field(&white_view),
        generate_en_passant_field(white_view.en_passant)
    )
}

/// Placement field of a position already in white orientation.
pub fn board_to_fen(white_view: &Position) -> String {
    let mut out = String::new();

    for row in 0..8 {
        let mut empty_count = 0u8;

        for file in 0..8 {
            let piece = white_view.board[A8 + row * 10 + file];
            if piece.kind().is_some() {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.to_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(white_view: &Position) -> String {
    let mut out = String::new();

    if white_view.own_castle[1] {
        out.push('K');
    }
    if white_view.own_castle[0] {
        out.push('Q');
    }
    if white_view.enemy_castle[0] {
        out.push('k');
    }
    if white_view.enemy_castle[1] {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    let Some(square) = square else {
        return "-".to_owned();
    };

    square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned())
}
