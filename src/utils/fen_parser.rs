//! FEN-to-Position parser.
//!
//! Builds the padded board in white orientation, computes the score from the
//! piece-square tables and rotates the result when black is to move, so the
//! returned `Position` is always seen from the side to move.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

/// Parse a FEN string. The halfmove and fullmove clocks are optional and
/// ignored when present.
pub fn parse_fen(fen: &str) -> ChessResult<(Position, Color)> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(ChessErrors::InvalidFen(format!(
            "expected 4 to 6 fields, got {}: {fen}",
            fields.len()
        )));
    }

    for clock in &fields[4..] {
        clock
            .parse::<u32>()
            .map_err(|_| ChessErrors::InvalidFen(format!("invalid move clock: {clock}")))?;
    }

    parse_position(fields[0], fields[1], fields[2], fields[3])
}

/// Build a position from the four descriptive FEN fields.
pub fn parse_position(
    board_layout: &str,
    side_to_move: &str,
    castling: &str,
    en_passant: &str,
) -> ChessResult<(Position, Color)> {
    let board = parse_board(board_layout)?;
    let side = parse_side_to_move(side_to_move)?;
    let (white_castle, black_castle) = parse_castling_rights(castling)?;
    let en_passant = parse_en_passant_square(en_passant, side, &board)?;

    let position = Position::from_parts(board, white_castle, black_castle, en_passant);
    match side {
        Color::Light => Ok((position, side)),
        Color::Dark => Ok((position.rotate(), side)),
    }
}

fn parse_board(board_layout: &str) -> ChessResult<[Piece; BOARD_SIZE]> {
    let ranks: Vec<&str> = board_layout.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = [Piece::OffBoard; BOARD_SIZE];

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                let run = empty_count as usize;
                if !(1..=8).contains(&run) || file + run > 8 {
                    return Err(ChessErrors::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                for _ in 0..run {
                    board[A8 + row * 10 + file] = Piece::Empty;
                    file += 1;
                }
                continue;
            }

            if file >= 8 {
                return Err(ChessErrors::InvalidFen(
                    "board rank has too many files".to_owned(),
                ));
            }

            let piece = Piece::from_char(ch)?;
            if piece.kind().is_none() {
                return Err(ChessErrors::InvalidPieceChar(ch));
            }
            board[A8 + row * 10 + file] = piece;
            file += 1;
        }

        if file != 8 {
            return Err(ChessErrors::InvalidFen(
                "board rank does not sum to 8 files".to_owned(),
            ));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessErrors::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

/// Rights as `[A1 corner, H1 corner]` pairs, each in its owner's orientation.
/// Black's A1 corner after rotation is h8, hence the `k`/`q` order.
fn parse_castling_rights(castling_part: &str) -> ChessResult<([bool; 2], [bool; 2])> {
    let mut white = [false; 2];
    let mut black = [false; 2];

    if castling_part == "-" {
        return Ok((white, black));
    }

    for ch in castling_part.chars() {
        match ch {
            'Q' => white[0] = true,
            'K' => white[1] = true,
            'k' => black[0] = true,
            'q' => black[1] = true,
            _ => {
                return Err(ChessErrors::InvalidFen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok((white, black))
}

/// The target must be the empty square just behind a pawn that has double
/// pushed: rank 6 over a black pawn with white to move, rank 3 over a white
/// pawn with black to move.
fn parse_en_passant_square(
    en_passant_part: &str,
    side: Color,
    board: &[Piece; BOARD_SIZE],
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let (rank, pushed_pawn, pawn_square) = match side {
        Color::Light => ('6', Piece::Enemy(PieceKind::Pawn), step(square, S)),
        Color::Dark => ('3', Piece::Own(PieceKind::Pawn), step(square, N)),
    };

    if !en_passant_part.ends_with(rank)
        || !board[square].is_empty()
        || board[pawn_square] != pushed_pawn
    {
        return Err(ChessErrors::InvalidFen(format!(
            "invalid en passant square: {en_passant_part}"
        )));
    }

    Ok(Some(square))
}
