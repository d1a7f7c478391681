//! Core value types for the padded 10x12 mailbox board.
//!
//! The board is always stored from the point of view of the side to move:
//! `Own` pieces belong to the mover, `Enemy` pieces to the opponent. Two rows
//! of padding above and below and one column on either side hold the
//! `OffBoard` sentinel, so ray walks never need explicit bounds checks.

use std::fmt;

use crate::chess_errors::{ChessErrors, ChessResult};

/// Index into the 120-cell padded board.
pub type Square = usize;

pub const BOARD_SIZE: usize = 120;

pub const A1: Square = 91;
pub const H1: Square = 98;
pub const A8: Square = 21;
pub const H8: Square = 28;

/// Board directions in mover orientation (north is towards the enemy).
pub const N: isize = -10;
pub const E: isize = 1;
pub const S: isize = 10;
pub const W: isize = -1;

/// Step from `square` by `direction`. Padding guarantees the result stays
/// inside `0..BOARD_SIZE` for every direction used by move generation.
#[inline]
pub const fn step(square: Square, direction: isize) -> Square {
    square.wrapping_add_signed(direction)
}

/// The square seen from the other side of the board.
#[inline]
pub const fn mirror(square: Square) -> Square {
    BOARD_SIZE - 1 - square
}

/// Absolute side to move. The board itself never stores colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const PAWN_DIRECTIONS: [isize; 4] = [N, N + N, N + W, N + E];
const KNIGHT_DIRECTIONS: [isize; 8] = [
    N + N + E,
    E + N + E,
    E + S + E,
    S + S + E,
    S + S + W,
    W + S + W,
    W + N + W,
    N + N + W,
];
const BISHOP_DIRECTIONS: [isize; 4] = [N + E, S + E, S + W, N + W];
const ROOK_DIRECTIONS: [isize; 4] = [N, E, S, W];
const ROYAL_DIRECTIONS: [isize; 8] = [N, E, S, W, N + E, S + E, S + W, N + W];

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Ray directions walked by move generation for this kind.
    #[inline]
    pub const fn directions(self) -> &'static [isize] {
        match self {
            PieceKind::Pawn => &PAWN_DIRECTIONS,
            PieceKind::Knight => &KNIGHT_DIRECTIONS,
            PieceKind::Bishop => &BISHOP_DIRECTIONS,
            PieceKind::Rook => &ROOK_DIRECTIONS,
            PieceKind::Queen | PieceKind::King => &ROYAL_DIRECTIONS,
        }
    }

    /// Pawns, knights and kings move a single step along each direction.
    #[inline]
    pub const fn slides(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Classification of a board cell relative to the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareClass {
    Own,
    Enemy,
    Empty,
    OffBoard,
}

/// Content of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Own(PieceKind),
    Enemy(PieceKind),
    Empty,
    OffBoard,
}

impl Piece {
    #[inline]
    pub const fn classify(self) -> SquareClass {
        match self {
            Piece::Own(_) => SquareClass::Own,
            Piece::Enemy(_) => SquareClass::Enemy,
            Piece::Empty => SquareClass::Empty,
            Piece::OffBoard => SquareClass::OffBoard,
        }
    }

    #[inline]
    pub const fn is_own(self) -> bool {
        matches!(self, Piece::Own(_))
    }

    #[inline]
    pub const fn is_enemy(self) -> bool {
        matches!(self, Piece::Enemy(_))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    #[inline]
    pub const fn is_off_board(self) -> bool {
        matches!(self, Piece::OffBoard)
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::Own(kind) | Piece::Enemy(kind) => Some(kind),
            Piece::Empty | Piece::OffBoard => None,
        }
    }

    /// Swap sides. Sentinels are returned unchanged.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Piece::Own(kind) => Piece::Enemy(kind),
            Piece::Enemy(kind) => Piece::Own(kind),
            other => other,
        }
    }

    /// Printable form: upper case for own pieces, lower case for enemy
    /// pieces, `.` for empty squares and a space for padding.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Own(kind) => kind.to_char(),
            Piece::Enemy(kind) => kind.to_char().to_ascii_lowercase(),
            Piece::Empty => '.',
            Piece::OffBoard => ' ',
        }
    }

    pub fn from_char(ch: char) -> ChessResult<Self> {
        let kind = match ch.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            '.' => return Ok(Piece::Empty),
            ' ' => return Ok(Piece::OffBoard),
            _ => return Err(ChessErrors::InvalidPieceChar(ch)),
        };

        if ch.is_ascii_uppercase() {
            Ok(Piece::Own(kind))
        } else {
            Ok(Piece::Enemy(kind))
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A (from, to) pair. Castling, promotion and en-passant are inferred when
/// the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same move expressed in the opponent's orientation.
    #[inline]
    pub const fn rotate(self) -> Self {
        Self {
            from: mirror(self.from),
            to: mirror(self.to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_is_an_involution_and_keeps_sentinels() {
        for kind in PieceKind::ALL {
            let own = Piece::Own(kind);
            assert_eq!(own.flip(), Piece::Enemy(kind));
            assert_eq!(own.flip().flip(), own);
        }
        assert_eq!(Piece::Empty.flip(), Piece::Empty);
        assert_eq!(Piece::OffBoard.flip(), Piece::OffBoard);
    }

    #[test]
    fn side_predicates_reject_sentinels() {
        for sentinel in [Piece::Empty, Piece::OffBoard] {
            assert!(!sentinel.is_own());
            assert!(!sentinel.is_enemy());
            assert_eq!(sentinel.kind(), None);
        }
        assert_eq!(Piece::Own(PieceKind::Rook).classify(), SquareClass::Own);
        assert_eq!(Piece::Enemy(PieceKind::Rook).classify(), SquareClass::Enemy);
        assert_eq!(Piece::OffBoard.classify(), SquareClass::OffBoard);
    }

    #[test]
    fn piece_chars_round_trip() {
        for ch in "PNBRQKpnbrqk. ".chars() {
            let piece = Piece::from_char(ch).expect("piece char should parse");
            assert_eq!(piece.to_char(), ch);
        }
        assert_eq!(Piece::from_char('x'), Err(ChessErrors::InvalidPieceChar('x')));
    }

    #[test]
    fn move_rotation_mirrors_both_squares() {
        let mv = Move::new(A1, H8);
        assert_eq!(mv.rotate(), Move::new(28, 91));
        assert_eq!(mv.rotate().rotate(), mv);
    }
}
