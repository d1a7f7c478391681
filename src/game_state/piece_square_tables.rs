//! Piece-square evaluation tables.
//!
//! Raw 8x8 tables (rank 8 first, from the mover's point of view) are joined
//! with the material value of each piece and padded to the 120-cell board
//! layout once, on first use. Padding cells score zero.

use std::sync::OnceLock;

use crate::game_state::chess_types::{PieceKind, Square, BOARD_SIZE};

/// Material value per piece kind, indexed by `PieceKind::index`.
pub const PIECE_VALUES: [i32; 6] = [100, 280, 320, 479, 929, 60_000];

/// Any score at or below `-MATE_LOWER` means the king is gone.
///
/// The king is worth more than ten queens so that losing it outweighs any
/// material the opponent could have been up.
pub const MATE_LOWER: i32 = PIECE_VALUES[5] - 10 * PIECE_VALUES[4];
pub const MATE_UPPER: i32 = PIECE_VALUES[5] + 10 * PIECE_VALUES[4];

#[rustfmt::skip]
const RAW_TABLES: [[i32; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
         78,  83,  86,  73, 102,  82,  85,  90,
          7,  29,  21,  44,  40,  31,  44,   7,
        -17,  16,  -2,  15,  14,   0,  15, -13,
        -26,   3,  10,   9,   6,   1,   0, -23,
        -22,   9,   5, -11, -10,  -2,   3, -19,
        -31,   8,  -7, -37, -36, -14,   3, -31,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -66, -53, -75, -75, -10, -55, -58, -70,
         -3,  -6, 100, -36,   4,  62,  -4, -14,
         10,  67,   1,  74,  73,  27,  62,  -2,
         24,  24,  45,  37,  33,  41,  25,  17,
         -1,   5,  31,  21,  22,  35,   2,   0,
        -18,  10,  13,  22,  18,  15,  11, -14,
        -23, -15,   2,   0,   2,   0, -23, -20,
        -74, -23, -26, -24, -19, -35, -22, -69,
    ],
    // Bishop
    [
        -59, -78, -82, -76, -23,-107, -37, -50,
        -11,  20,  35, -42, -39,  31,   2, -22,
         -9,  39, -32,  41,  52, -10,  28, -14,
         25,  17,  20,  34,  26,  25,  15,  10,
         13,  10,  17,  23,  17,  16,   0,   7,
         14,  25,  24,  15,   8,  25,  20,  15,
         19,  20,  11,   6,   7,   6,  20,  16,
         -7,   2, -15, -12, -14, -15, -10, -10,
    ],
    // Rook
    [
         35,  29,  33,   4,  37,  33,  56,  50,
         55,  29,  56,  67,  55,  62,  34,  60,
         19,  35,  28,  33,  45,  27,  25,  15,
          0,   5,  16,  13,  18,  -4,  -9,  -6,
        -28, -35, -16, -21, -13, -29, -46, -30,
        -42, -28, -42, -25, -25, -35, -26, -46,
        -53, -38, -31, -26, -29, -43, -44, -53,
        -30, -24, -18,   5,  -2, -18, -31, -32,
    ],
    // Queen
    [
          6,   1,  -8,-104,  69,  24,  88,  26,
         14,  32,  60, -10,  20,  76,  57,  24,
         -2,  43,  32,  60,  72,  63,  43,   2,
          1, -16,  22,  17,  25,  20, -13,  -6,
        -14, -15,  -2,  -5,  -1, -10, -20, -22,
        -30,  -6, -13, -11, -16, -11, -16, -27,
        -36, -18,   0, -19, -15, -15, -21, -38,
        -39, -30, -31, -13, -31, -36, -34, -42,
    ],
    // King
    [
          4,  54,  47, -99, -99,  60,  83, -62,
        -32,  10,  55,  56,  56,  55,  10,   3,
        -62,  12, -57,  44, -67,  28,  37, -31,
        -55,  50,  11,  -4, -19,  13,   0, -49,
        -55, -43, -52, -28, -51, -47,  -8, -50,
        -47, -42, -43, -79, -64, -32, -29, -32,
         -4,   3, -14, -50, -57, -18,  13,   4,
         17,  30,  -3, -14,   6,  -1,  40,  18,
    ],
];

type PaddedTables = [[i32; BOARD_SIZE]; 6];

static TABLES: OnceLock<PaddedTables> = OnceLock::new();

#[inline]
fn tables() -> &'static PaddedTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> PaddedTables {
    let mut padded = [[0i32; BOARD_SIZE]; 6];

    for kind in PieceKind::ALL {
        let base = PIECE_VALUES[kind.index()];
        let raw = &RAW_TABLES[kind.index()];
        for (idx, value) in raw.iter().enumerate() {
            let rank_row = idx / 8;
            let file = idx % 8;
            // Two padding rows on top, one padding column on the left.
            let square = 21 + rank_row * 10 + file;
            padded[kind.index()][square] = base + value;
        }
    }

    padded
}

/// Table value of `kind` standing on `square`, from the mover's point of view.
#[inline]
pub fn pst(kind: PieceKind, square: Square) -> i32 {
    tables()[kind.index()][square]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{A1, A8, H1, H8};

    #[test]
    fn mate_bounds_match_piece_values() {
        assert_eq!(MATE_LOWER, 50_710);
        assert_eq!(MATE_UPPER, 69_290);
    }

    #[test]
    fn padding_cells_score_zero() {
        for kind in PieceKind::ALL {
            for square in (0..21).chain(99..BOARD_SIZE) {
                assert_eq!(pst(kind, square), 0);
            }
            for row in 2..10 {
                assert_eq!(pst(kind, row * 10), 0);
                assert_eq!(pst(kind, row * 10 + 9), 0);
            }
        }
    }

    #[test]
    fn corners_join_material_and_position() {
        assert_eq!(pst(PieceKind::Knight, A8), 280 - 66);
        assert_eq!(pst(PieceKind::Rook, H1), 479 - 32);
        assert_eq!(pst(PieceKind::Pawn, A1), 100);
        assert_eq!(pst(PieceKind::Queen, H8), 929 + 26);
        assert!(pst(PieceKind::King, A1) > MATE_LOWER);
    }
}
