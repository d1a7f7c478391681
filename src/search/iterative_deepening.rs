//! Iterative deepening driven by a binary search over the score (MTD-bi).
//!
//! Each completed depth is yielded to the caller, who decides whether to ask
//! for the next one. Nothing inside the driver watches the clock.

use tracing::{debug, trace};

use crate::game_state::chess_types::Move;
use crate::game_state::piece_square_tables::MATE_UPPER;
use crate::game_state::position::Position;
use crate::search::searcher::{Searcher, MAX_SEARCH_DEPTH};

/// Result of one completed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: i32,
    /// Killer cached for the root, in the root's orientation.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Nodes visited since the search started.
    pub nodes: u64,
}

/// Lazy sequence of [`SearchInfo`], one per depth.
pub struct Search<'a> {
    searcher: &'a mut Searcher,
    position: Position,
    depth: i32,
}

impl Searcher {
    /// Start a new search from `position`. Node count and score table are
    /// reset; killers survive from earlier searches.
    pub fn search(&mut self, position: &Position) -> Search<'_> {
        self.nodes = 0;
        self.scores.clear();
        Search {
            searcher: self,
            position: position.clone(),
            depth: 0,
        }
    }
}

impl Search<'_> {
    /// Run the next depth to completion.
    fn deepen(&mut self) -> SearchInfo {
        self.depth += 1;
        let depth = self.depth;
        let pos = &self.position;
        let roughness = self.searcher.config().eval_roughness;

        let mut lower = -MATE_UPPER;
        let mut upper = MATE_UPPER;
        while lower < upper - roughness {
            let gamma = (lower + upper + 1) / 2;
            let score = self.searcher.bound(pos, gamma, depth, true);
            if score >= gamma {
                lower = score;
            } else {
                upper = score;
            }
            trace!(depth, gamma, score, lower, upper, "mtd-bi step");
        }

        // The window can converge without the last step having stored a
        // killer for the root, so search once more at the final lower bound.
        self.searcher.bound(pos, lower, depth, true);

        let score = self
            .searcher
            .score_entry(pos, depth, true)
            .map_or(lower, |entry| entry.lower);
        let info = SearchInfo {
            depth,
            best_move: self.searcher.killer(pos),
            score,
            nodes: self.searcher.nodes(),
        };
        debug!(
            depth,
            score,
            nodes = info.nodes,
            best_move = ?info.best_move,
            "depth complete"
        );
        info
    }

    pub fn searcher(&self) -> &Searcher {
        &*self.searcher
    }
}

impl Iterator for Search<'_> {
    type Item = SearchInfo;

    fn next(&mut self) -> Option<SearchInfo> {
        if self.depth + 1 >= MAX_SEARCH_DEPTH {
            return None;
        }
        Some(self.deepen())
    }
}
