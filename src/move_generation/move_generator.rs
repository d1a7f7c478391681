//! Pseudo-legal move generation over the padded board.
//!
//! Moves are produced lazily by walking rays from every square holding one
//! of the mover's pieces. No check detection happens here: a generated move
//! may leave the mover's king en prise, and the search treats king capture
//! as the terminal signal. Generation only reads the position, so calling
//! [`Position::generate_moves`] again always restarts from scratch.

use std::cmp::Reverse;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Lazy iterator over the moves of one position.
pub struct MoveIter<'a> {
    position: &'a Position,
    square: Square,
    ray: Option<Ray>,
    pending_castle: Option<Move>,
}

/// Walk state for one (origin, direction) pair.
struct Ray {
    from: Square,
    kind: PieceKind,
    direction_index: usize,
    cursor: Square,
}

impl<'a> MoveIter<'a> {
    fn new(position: &'a Position) -> Self {
        Self {
            position,
            square: 0,
            ray: None,
            pending_castle: None,
        }
    }

    /// Move on to the next direction of the current piece, or to the next
    /// square holding an own piece. Returns `false` once the board is done.
    fn advance_ray(&mut self) -> bool {
        if let Some(ray) = self.ray.as_mut() {
            ray.direction_index += 1;
            if let Some(&direction) = ray.kind.directions().get(ray.direction_index) {
                ray.cursor = step(ray.from, direction);
                return true;
            }
            self.square = ray.from + 1;
        }

        while self.square < BOARD_SIZE {
            if let Piece::Own(kind) = self.position.board[self.square] {
                let direction = kind.directions()[0];
                self.ray = Some(Ray {
                    from: self.square,
                    kind,
                    direction_index: 0,
                    cursor: step(self.square, direction),
                });
                return true;
            }
            self.square += 1;
        }

        self.ray = None;
        false
    }
}

impl Iterator for MoveIter<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if let Some(castle) = self.pending_castle.take() {
            return Some(castle);
        }

        if self.ray.is_none() && !self.advance_ray() {
            return None;
        }

        let pos = self.position;
        loop {
            let ray = self.ray.as_mut()?;
            let from = ray.from;
            let kind = ray.kind;
            let direction = kind.directions()[ray.direction_index];
            let to = ray.cursor;
            let target = pos.board[to];

            let blocked = target.is_off_board()
                || target.is_own()
                || (kind == PieceKind::Pawn && !pawn_may_enter(pos, from, to, direction, target));
            if blocked {
                if !self.advance_ray() {
                    return None;
                }
                continue;
            }

            let mv = Move::new(from, to);

            if target.is_enemy() || !kind.slides() {
                self.advance_ray();
                return Some(mv);
            }

            // Castling is found by the rook: its ray reaching the own king.
            if kind == PieceKind::Rook {
                let king = Piece::Own(PieceKind::King);
                if from == A1 && pos.own_castle[0] && pos.board[step(to, E)] == king {
                    self.pending_castle = Some(Move::new(step(to, E), step(to, W)));
                }
                if from == H1 && pos.own_castle[1] && pos.board[step(to, W)] == king {
                    self.pending_castle = Some(Move::new(step(to, W), step(to, E)));
                }
            }

            ray.cursor = step(to, direction);
            return Some(mv);
        }
    }
}

/// Pawn-specific destination rules: pushes need empty squares, diagonal
/// steps need a capture, the en-passant square, or the square a castling
/// king crossed (and its neighbours).
fn pawn_may_enter(
    pos: &Position,
    from: Square,
    to: Square,
    direction: isize,
    target: Piece,
) -> bool {
    if direction == N || direction == N + N {
        if !target.is_empty() {
            return false;
        }
        if direction == N + N && (from < step(A1, N) || !pos.board[step(from, N)].is_empty()) {
            return false;
        }
        return true;
    }

    target.is_enemy()
        || pos.en_passant == Some(to)
        || pos.king_passant.is_some_and(|kp| to.abs_diff(kp) < 2)
}

impl Position {
    /// Lazily generate every pseudo-legal move for the side to move.
    pub fn generate_moves(&self) -> MoveIter<'_> {
        MoveIter::new(self)
    }

    /// All moves ordered by descending static value. Ties keep generation order.
    pub fn sorted_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = self.generate_moves().collect();
        moves.sort_by_key(|&mv| Reverse(self.value(mv)));
        moves
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let pos = Position::initial();
        assert_eq!(pos.generate_moves().count(), 20);
        assert!(pos.generate_moves().any(|mv| mv == Move::new(sq("e2"), sq("e4"))));
        assert!(pos.generate_moves().any(|mv| mv == Move::new(sq("g1"), sq("f3"))));
    }

    #[test]
    fn generation_is_restartable() {
        let pos = Position::initial().apply(Move::new(sq("d2"), sq("d4")));
        let first: Vec<Move> = pos.generate_moves().collect();
        let second: Vec<Move> = pos.generate_moves().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn moves_start_on_own_pieces_and_never_land_on_them() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut pos = Position::initial();
            for _ in 0..50 {
                let moves: Vec<Move> = pos.generate_moves().collect();
                for mv in &moves {
                    assert!(pos.board[mv.from].is_own(), "origin must hold an own piece");
                    assert!(!pos.board[mv.to].is_own(), "destination must not hold an own piece");
                    assert!(!pos.board[mv.to].is_off_board());
                }
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
    fn pawn_double_push_needs_both_squares_empty() {
        let (pos, _) = parse_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let pawn_moves: Vec<Move> = pos
            .generate_moves()
            .filter(|mv| mv.from == sq("e2"))
            .collect();
        assert!(pawn_moves.is_empty());

        let (pos, _) = parse_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let pawn_moves: Vec<Move> = pos
            .generate_moves()
            .filter(|mv| mv.from == sq("e2"))
            .collect();
        assert_eq!(pawn_moves, vec![Move::new(sq("e2"), sq("e3"))]);
    }

    #[test]
    fn pawn_diagonals_only_capture() {
        let (pos, _) = parse_fen("4k3/8/8/8/8/3n4/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let targets: Vec<Square> = pos
            .generate_moves()
            .filter(|mv| mv.from == sq("e2"))
            .map(|mv| mv.to)
            .collect();
        assert!(targets.contains(&sq("d3")));
        assert!(!targets.contains(&sq("f3")));
    }

    #[test]
    fn sliders_stop_on_captures() {
        let (pos, _) = parse_fen("4k3/8/8/8/8/8/r7/R3K3 w - - 0 1").expect("FEN should parse");
        let rook_up: Vec<Square> = pos
            .generate_moves()
            .filter(|mv| mv.from == A1 && mv.to % 10 == A1 % 10)
            .map(|mv| mv.to)
            .collect();
        assert_eq!(rook_up, vec![sq("a2")]);
    }

    #[test]
    fn castling_follows_rights_and_empty_path() {
        let (pos, _) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let moves: Vec<Move> = pos.generate_moves().collect();
        assert!(moves.contains(&Move::new(sq("e1"), sq("g1"))));
        assert!(moves.contains(&Move::new(sq("e1"), sq("c1"))));

        let (pos, _) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Q - 0 1").expect("FEN should parse");
        let moves: Vec<Move> = pos.generate_moves().collect();
        assert!(!moves.contains(&Move::new(sq("e1"), sq("g1"))));
        assert!(moves.contains(&Move::new(sq("e1"), sq("c1"))));

        let (pos, _) = parse_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQ - 0 1").expect("FEN should parse");
        let moves: Vec<Move> = pos.generate_moves().collect();
        assert!(!moves.contains(&Move::new(sq("e1"), sq("c1"))));
    }

    #[test]
    fn black_to_move_generates_in_its_own_orientation() {
        let (pos, color) = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN should parse");
        assert_eq!(color, Color::Dark);
        assert_eq!(pos.generate_moves().count(), 20);
        // e7e5 in black's own orientation is d2d4.
        assert!(pos
            .generate_moves()
            .any(|mv| mv.rotate() == Move::new(sq("e7"), sq("e5"))));
    }

    #[test]
    fn sorted_moves_put_captures_first() {
        let (pos, _) = parse_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        let sorted = pos.sorted_moves();
        assert_eq!(sorted[0], Move::new(sq("d1"), sq("d5")));
        let values: Vec<i32> = sorted.iter().map(|&mv| pos.value(mv)).collect();
        assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
