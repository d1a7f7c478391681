//! Immutable position snapshot on the padded 10x12 board.
//!
//! A `Position` is always expressed from the side to move. Applying a move
//! returns the successor already rotated for the opponent: the board is
//! mirrored end to end, every piece changes side, the score is negated and
//! the castling pairs and passant squares are reflected. One move generator
//! and one evaluator therefore serve both colors.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::INITIAL_LAYOUT;
use crate::game_state::chess_types::*;
use crate::game_state::piece_square_tables::{pst, MATE_LOWER};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: [Piece; BOARD_SIZE],
    /// Evaluation from the mover's point of view, maintained incrementally.
    pub score: i32,
    /// Castling rights of the mover: `[rook on A1, rook on H1]` in the
    /// mover's orientation.
    pub own_castle: [bool; 2],
    /// Castling rights of the opponent, indexed in the opponent's orientation.
    pub enemy_castle: [bool; 2],
    /// Square a pawn may capture onto en passant this ply.
    pub en_passant: Option<Square>,
    /// Square the enemy king crossed while castling on the previous ply.
    pub king_passant: Option<Square>,
}

/// `true` for the 64 playable cells of the padded board.
#[inline]
pub const fn is_playable(square: Square) -> bool {
    let row = square / 10;
    let col = square % 10;
    row >= 2 && row <= 9 && col >= 1 && col <= 8
}

impl Position {
    /// Build a position from its parts, computing the score from scratch.
    pub fn from_parts(
        board: [Piece; BOARD_SIZE],
        own_castle: [bool; 2],
        enemy_castle: [bool; 2],
        en_passant: Option<Square>,
    ) -> Self {
        Self {
            score: evaluate(&board),
            board,
            own_castle,
            enemy_castle,
            en_passant,
            king_passant: None,
        }
    }

    /// Parse a 120-character layout as produced by [`Position::layout`].
    pub fn from_layout(
        layout: &str,
        own_castle: [bool; 2],
        enemy_castle: [bool; 2],
        en_passant: Option<Square>,
    ) -> ChessResult<Self> {
        let chars: Vec<char> = layout.chars().collect();
        if chars.len() != BOARD_SIZE {
            return Err(ChessErrors::InvalidFen(format!(
                "board layout must have {BOARD_SIZE} cells, got {}",
                chars.len()
            )));
        }

        let mut board = [Piece::OffBoard; BOARD_SIZE];
        for (square, ch) in chars.into_iter().enumerate() {
            let piece = Piece::from_char(ch)?;
            if piece.is_off_board() == is_playable(square) {
                return Err(ChessErrors::InvalidFen(format!(
                    "unexpected '{ch}' at cell {square}"
                )));
            }
            board[square] = piece;
        }

        Ok(Self::from_parts(board, own_castle, enemy_castle, en_passant))
    }

    pub fn initial() -> Self {
        Self::from_layout(INITIAL_LAYOUT, [true, true], [true, true], None)
            .expect("initial layout should always parse")
    }

    /// 120-character textual form of the board, padding included.
    pub fn layout(&self) -> String {
        self.board.iter().map(|piece| piece.to_char()).collect()
    }

    /// The same position seen by the other side.
    pub fn rotate(&self) -> Self {
        let mut board = [Piece::OffBoard; BOARD_SIZE];
        for (square, piece) in self.board.iter().enumerate() {
            board[mirror(square)] = piece.flip();
        }

        Self {
            board,
            score: -self.score,
            own_castle: self.enemy_castle,
            enemy_castle: self.own_castle,
            en_passant: self.en_passant.map(mirror),
            king_passant: self.king_passant.map(mirror),
        }
    }

    /// Pass the turn without touching the board.
    pub fn null_move(&self) -> Self {
        let mut rotated = self.rotate();
        rotated.en_passant = None;
        rotated.king_passant = None;
        rotated
    }

    /// Score delta of playing `mv`, from the mover's point of view.
    pub fn value(&self, mv: Move) -> i32 {
        let Move { from, to } = mv;
        let Piece::Own(kind) = self.board[from] else {
            debug_assert!(false, "value() called for a move without an own piece");
            return 0;
        };

        let mut score = pst(kind, to) - pst(kind, from);

        if let Piece::Enemy(captured) = self.board[to] {
            score += pst(captured, mirror(to));
        }

        // Landing on or next to the square a castling king crossed takes the king.
        if self.king_passant.is_some_and(|kp| to.abs_diff(kp) < 2) {
            score += pst(PieceKind::King, mirror(to));
        }

        match kind {
            PieceKind::King if from.abs_diff(to) == 2 => {
                score += pst(PieceKind::Rook, (from + to) / 2);
                score -= pst(PieceKind::Rook, if to < from { A1 } else { H1 });
            }
            PieceKind::Pawn => {
                if (A8..=H8).contains(&to) {
                    score += pst(PieceKind::Queen, to) - pst(PieceKind::Pawn, to);
                }
                if self.en_passant == Some(to) {
                    score += pst(PieceKind::Pawn, mirror(step(to, S)));
                }
            }
            _ => {}
        }

        score
    }

    /// Play `mv` and return the successor from the opponent's point of view.
    pub fn apply(&self, mv: Move) -> Self {
        let Move { from, to } = mv;
        let piece = self.board[from];
        let mut board = self.board;
        let mut own_castle = self.own_castle;
        let mut enemy_castle = self.enemy_castle;
        let mut en_passant = None;
        let mut king_passant = None;
        let score = self.score + self.value(mv);

        board[to] = piece;
        board[from] = Piece::Empty;

        if from == A1 {
            own_castle[0] = false;
        }
        if from == H1 {
            own_castle[1] = false;
        }
        if to == A8 {
            enemy_castle[1] = false;
        }
        if to == H8 {
            enemy_castle[0] = false;
        }

        match piece {
            Piece::Own(PieceKind::King) => {
                own_castle = [false, false];
                if from.abs_diff(to) == 2 {
                    let crossed = (from + to) / 2;
                    board[if to < from { A1 } else { H1 }] = Piece::Empty;
                    board[crossed] = Piece::Own(PieceKind::Rook);
                    king_passant = Some(crossed);
                }
            }
            Piece::Own(PieceKind::Pawn) => {
                if (A8..=H8).contains(&to) {
                    board[to] = Piece::Own(PieceKind::Queen);
                }
                if to == step(from, 2 * N) {
                    en_passant = Some(step(from, N));
                }
                if self.en_passant == Some(to) {
                    board[step(to, S)] = Piece::Empty;
                }
            }
            _ => {}
        }

        Self {
            board,
            score,
            own_castle,
            enemy_castle,
            en_passant,
            king_passant,
        }
        .rotate()
    }

    /// `true` when the mover can take the enemy king right now.
    pub fn is_dead(&self) -> bool {
        self.generate_moves()
            .any(|mv| self.value(mv) >= MATE_LOWER)
    }

    /// `true` when the mover's score says its king has been taken.
    #[inline]
    pub fn king_captured(&self) -> bool {
        self.score <= -MATE_LOWER
    }

    /// The mover still has a knight, bishop, rook or queen.
    pub fn has_officers(&self) -> bool {
        self.board.iter().any(|piece| {
            matches!(
                piece,
                Piece::Own(
                    PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
                )
            )
        })
    }
}

/// Full static evaluation of a board from the mover's point of view.
pub fn evaluate(board: &[Piece; BOARD_SIZE]) -> i32 {
    board
        .iter()
        .enumerate()
        .map(|(square, piece)| match *piece {
            Piece::Own(kind) => pst(kind, square),
            Piece::Enemy(kind) => -pst(kind, mirror(square)),
            Piece::Empty | Piece::OffBoard => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn initial_position_is_balanced() {
        let pos = Position::initial();
        assert_eq!(pos.score, 0);
        assert_eq!(pos.layout(), INITIAL_LAYOUT);
        assert_eq!(pos.board[A1], Piece::Own(PieceKind::Rook));
        assert_eq!(pos.board[sq("e8")], Piece::Enemy(PieceKind::King));
    }

    #[test]
    fn layout_rejects_pieces_in_padding_and_bad_chars() {
        let mut chars: Vec<char> = INITIAL_LAYOUT.chars().collect();
        chars[0] = 'P';
        let bad: String = chars.iter().collect();
        assert!(Position::from_layout(&bad, [true; 2], [true; 2], None).is_err());

        let mut chars: Vec<char> = INITIAL_LAYOUT.chars().collect();
        chars[sq("e4")] = 'x';
        let bad: String = chars.iter().collect();
        assert_eq!(
            Position::from_layout(&bad, [true; 2], [true; 2], None),
            Err(ChessErrors::InvalidPieceChar('x'))
        );
        assert!(Position::from_layout("short", [true; 2], [true; 2], None).is_err());
    }

    #[test]
    fn rotate_is_an_involution_along_random_games() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut pos = Position::initial();
            for _ in 0..40 {
                assert_eq!(pos.rotate().rotate(), pos);
                assert_eq!(pos.rotate().score, -pos.score);
                let moves: Vec<Move> = pos.generate_moves().collect();
                let Some(mv) = moves.choose(&mut rng).copied() else {
                    break;
                };
                pos = pos.apply(mv);
                if pos.king_captured() {
                    break;
                }
            }
        }
    }

    #[test]
    fn apply_score_matches_value_along_random_games() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut pos = Position::initial();
            for _ in 0..60 {
                let moves: Vec<Move> = pos.generate_moves().collect();
                for &mv in &moves {
                    assert_eq!(pos.apply(mv).score, -(pos.score + pos.value(mv)));
                }
                let Some(mv) = moves.choose(&mut rng).copied() else {
                    break;
                };
                pos = pos.apply(mv);
                if pos.king_captured() {
                    break;
                }
                // Incremental score never drifts from a full re-evaluation.
                assert_eq!(pos.score, evaluate(&pos.board));
            }
        }
    }

    #[test]
    fn kingside_castle_moves_rook_and_sets_king_passant() {
        let (pos, _) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = Move::new(sq("e1"), sq("g1"));
        assert!(pos.generate_moves().any(|mv| mv == castle));

        let after = pos.apply(castle);
        assert_eq!(after.king_passant, Some(mirror(sq("f1"))));

        let white_view = after.rotate();
        assert_eq!(white_view.board[sq("g1")], Piece::Own(PieceKind::King));
        assert_eq!(white_view.board[sq("f1")], Piece::Own(PieceKind::Rook));
        assert_eq!(white_view.board[H1], Piece::Empty);
        assert_eq!(white_view.own_castle, [false, false]);
        assert_eq!(white_view.enemy_castle, [true, true]);
    }

    #[test]
    fn castled_king_can_be_taken_through_the_crossed_square() {
        // Black pawn on e2 can capture towards f1, the square the king crossed.
        let (pos, _) = parse_fen("4k3/8/8/8/8/8/4p3/4K2R w K - 0 1").expect("FEN should parse");
        let after = pos.apply(Move::new(sq("e1"), sq("g1")));
        let capture = after
            .generate_moves()
            .find(|mv| mv.to == after.king_passant.expect("king passant should be set"));
        let capture = capture.expect("pawn should be able to hit the crossed square");
        assert!(after.value(capture) >= MATE_LOWER);
        assert!(after.is_dead());
    }

    #[test]
    fn en_passant_capture_removes_the_pawn() {
        let (pos, _) = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let ep = Move::new(sq("e5"), sq("d6"));
        assert!(pos.generate_moves().any(|mv| mv == ep));
        assert!(pos.value(ep) > 0);

        let white_view = pos.apply(ep).rotate();
        assert_eq!(white_view.board[sq("d5")], Piece::Empty);
        assert_eq!(white_view.board[sq("d6")], Piece::Own(PieceKind::Pawn));
    }

    #[test]
    fn double_push_sets_en_passant_for_the_opponent() {
        let after = Position::initial().apply(Move::new(sq("e2"), sq("e4")));
        assert_eq!(after.en_passant, Some(mirror(sq("e3"))));
        assert_eq!(after.null_move().en_passant, None);
    }

    #[test]
    fn pawn_reaching_back_rank_becomes_queen() {
        let (pos, _) = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promote = Move::new(sq("a7"), sq("a8"));
        let gain = pos.value(promote);
        assert!(gain > 700);
        let white_view = pos.apply(promote).rotate();
        assert_eq!(white_view.board[A8], Piece::Own(PieceKind::Queen));
    }

    #[test]
    fn rook_capture_on_corner_clears_enemy_right() {
        let (pos, _) = parse_fen("r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1").expect("FEN should parse");
        let after = pos.apply(Move::new(A1, A8));
        // Black's a8 rook is its H1-corner rook in black's orientation.
        assert_eq!(after.own_castle, [false, false]);
        assert_eq!(after.enemy_castle, [false, false]);
    }

    #[test]
    fn null_move_keeps_board_and_flips_side() {
        let pos = Position::initial().apply(Move::new(sq("g1"), sq("f3")));
        let passed = pos.null_move();
        assert_eq!(passed.score, -pos.score);
        assert_eq!(passed.rotate().board, pos.board);
    }

    #[test]
    fn officers_detection_ignores_pawns_and_kings() {
        let (pawns_only, _) = parse_fen("4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(!pawns_only.has_officers());
        assert!(Position::initial().has_officers());
    }
}
