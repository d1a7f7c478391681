//! Fail-soft negamax bound with null-move pruning and quiescence.
//!
//! `bound(pos, gamma, depth, root)` answers "is the value of `pos` at least
//! `gamma`?" in a fail-soft way: the result `r` satisfies `r >= gamma` when
//! the true value is at least `gamma` (and then `r` is a lower bound), and
//! `r < gamma` otherwise (and then `r` is an upper bound). The MTD-bi
//! driver in `iterative_deepening` narrows a score window with it.
//!
//! King capture is the only terminal condition: a mover whose score says
//! the king is gone scores `-MATE_UPPER`.

use std::collections::HashSet;

use crate::game_state::chess_types::Move;
use crate::game_state::piece_square_tables::{MATE_LOWER, MATE_UPPER};
use crate::game_state::position::Position;
use crate::search::transposition_table::{Entry, KillerTable, ScoreKey, ScoreTable, TableStats};

pub const DEFAULT_QS_LIMIT: i32 = 219;
pub const DEFAULT_EVAL_ROUGHNESS: i32 = 13;
pub const DEFAULT_TABLE_CAPACITY: usize = 10_000_000;

/// Iterations of the driver stop here even if the caller keeps asking.
pub const MAX_SEARCH_DEPTH: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Minimum static move value searched once depth reaches zero.
    pub qs_limit: i32,
    /// MTD-bi stops narrowing once `upper - lower` is within this margin.
    pub eval_roughness: i32,
    /// Entries per cache before it is cleared.
    pub table_capacity: usize,
    pub null_move: bool,
    /// Run a shallow search to find a killer when none is cached.
    pub internal_iterative_deepening: bool,
    /// Resolve nodes where every move loses the king into mate or stalemate.
    pub detect_stalemate: bool,
    /// Score repeated positions as draws away from the root.
    pub detect_repetition: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            qs_limit: DEFAULT_QS_LIMIT,
            eval_roughness: DEFAULT_EVAL_ROUGHNESS,
            table_capacity: DEFAULT_TABLE_CAPACITY,
            null_move: true,
            internal_iterative_deepening: true,
            detect_stalemate: true,
            detect_repetition: false,
        }
    }
}

/// Search state for one game. Not shareable between concurrent searches.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    pub(crate) scores: ScoreTable,
    pub(crate) killers: KillerTable,
    history: HashSet<Position>,
    pub(crate) nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            scores: ScoreTable::new(config.table_capacity),
            killers: KillerTable::new(config.table_capacity),
            history: HashSet::new(),
            nodes: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.scores.set_capacity(config.table_capacity);
        self.killers.set_capacity(config.table_capacity);
        self.config = config;
    }

    /// Nodes visited since the current search started.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn score_stats(&self) -> TableStats {
        self.scores.stats()
    }

    pub fn killer_stats(&self) -> TableStats {
        self.killers.stats()
    }

    /// Positions already seen in the game, for repetition detection.
    pub fn set_history<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Position>,
    {
        self.history = positions.into_iter().collect();
    }

    /// Forget everything learned so far (new game).
    pub fn reset(&mut self) {
        self.scores.clear();
        self.killers.clear();
        self.history.clear();
        self.nodes = 0;
    }

    /// Cached best move for `pos`, if any.
    pub fn killer(&self, pos: &Position) -> Option<Move> {
        self.killers.peek(pos)
    }

    /// Cached bounds for a node, if any.
    pub fn score_entry(&self, pos: &Position, depth: i32, root: bool) -> Option<Entry> {
        self.scores.peek(&ScoreKey::new(pos, depth, root))
    }

    pub fn bound(&mut self, pos: &Position, gamma: i32, depth: i32, root: bool) -> i32 {
        self.nodes += 1;
        let depth = depth.max(0);

        if pos.score <= -MATE_LOWER {
            return -MATE_UPPER;
        }

        if self.config.detect_repetition && !root && self.history.contains(pos) {
            return 0;
        }

        let key = ScoreKey::new(pos, depth, root);
        let entry = self.scores.lookup(&key);
        if entry.lower >= gamma && (!root || self.killers.peek(pos).is_some()) {
            return entry.lower;
        }
        if entry.upper < gamma {
            return entry.upper;
        }

        let qs_limit = self.config.qs_limit;
        let mut best = -MATE_UPPER;
        let mut cutoff = false;

        if depth > 0 && !root && self.config.null_move && pos.has_officers() {
            let score = -self.bound(&pos.null_move(), 1 - gamma, depth - 3, false);
            cutoff = self.consider(pos, &mut best, score, gamma, None);
        }

        if !cutoff && depth == 0 {
            cutoff = self.consider(pos, &mut best, pos.score, gamma, None);
        }

        if !cutoff {
            let mut killer = self.killers.get(pos);
            if killer.is_none() && depth > 2 && self.config.internal_iterative_deepening {
                self.bound(pos, gamma, depth - 3, false);
                killer = self.killers.get(pos);
            }

            if let Some(mv) = killer {
                if depth > 0 || pos.value(mv) >= qs_limit {
                    let score = -self.bound(&pos.apply(mv), 1 - gamma, depth - 1, false);
                    cutoff = self.consider(pos, &mut best, score, gamma, Some(mv));
                }
            }
        }

        if !cutoff {
            for mv in pos.sorted_moves() {
                if depth == 0 && pos.value(mv) < qs_limit {
                    continue;
                }
                let score = -self.bound(&pos.apply(mv), 1 - gamma, depth - 1, false);
                if self.consider(pos, &mut best, score, gamma, Some(mv)) {
                    break;
                }
            }
        }

        if self.config.detect_stalemate && best < gamma && best < 0 && depth > 0 {
            let every_move_loses_king = pos.generate_moves().all(|mv| pos.apply(mv).is_dead());
            if every_move_loses_king {
                let in_check = pos.null_move().is_dead();
                best = if in_check { -MATE_UPPER } else { 0 };
            }
        }

        let updated = if best >= gamma {
            Entry {
                lower: best,
                upper: entry.upper,
            }
        } else {
            Entry {
                lower: entry.lower,
                upper: best,
            }
        };
        self.scores.store(key, updated);

        best
    }

    /// Fold one candidate score into `best`. On a cutoff the killer for
    /// `pos` is replaced by `mv`, or dropped when the cutoff came from
    /// passing or standing pat.
    fn consider(
        &mut self,
        pos: &Position,
        best: &mut i32,
        score: i32,
        gamma: i32,
        mv: Option<Move>,
    ) -> bool {
        *best = (*best).max(score);
        if *best < gamma {
            return false;
        }

        match mv {
            Some(mv) => self.killers.insert(pos, mv),
            None => self.killers.remove(pos),
        }
        true
    }

    /// Follow cached killers from `pos`. Consecutive moves alternate
    /// orientation, the first one being in the orientation of `pos`.
    pub fn principal_variation(&self, pos: &Position, max_len: usize) -> Vec<Move> {
        let mut line = Vec::new();
        let mut seen = HashSet::new();
        let mut current = pos.clone();

        while line.len() < max_len && !current.king_captured() {
            if !seen.insert(current.clone()) {
                break;
            }
            let Some(mv) = self.killers.peek(&current) else {
                break;
            };
            line.push(mv);
            current = current.apply(mv);
        }

        line
    }
}
