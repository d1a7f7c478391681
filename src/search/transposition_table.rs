//! Score and killer-move caches keyed by whole positions.
//!
//! Both tables are plain hash maps using structural equality of `Position`.
//! Neither evicts individual entries: once a table holds more than its
//! capacity it is cleared wholesale and refilled by the ongoing search.

use std::collections::HashMap;

use tracing::info;

use crate::game_state::chess_types::Move;
use crate::game_state::piece_square_tables::MATE_UPPER;
use crate::game_state::position::Position;

/// Known bounds on the minimax value of a (position, depth, root) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub lower: i32,
    pub upper: i32,
}

impl Entry {
    /// Nothing known yet.
    pub const UNKNOWN: Entry = Entry {
        lower: -MATE_UPPER,
        upper: MATE_UPPER,
    };
}

impl Default for Entry {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub position: Position,
    pub depth: i32,
    pub root: bool,
}

impl ScoreKey {
    pub fn new(position: &Position, depth: i32, root: bool) -> Self {
        Self {
            position: position.clone(),
            depth,
            root,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub lookups: u64,
    pub hits: u64,
    pub stores: u64,
    pub clears: u64,
}

#[derive(Debug, Clone)]
pub struct ScoreTable {
    entries: HashMap<ScoreKey, Entry>,
    capacity: usize,
    stats: TableStats,
}

impl ScoreTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            stats: TableStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached bounds, or [`Entry::UNKNOWN`].
    pub fn lookup(&mut self, key: &ScoreKey) -> Entry {
        self.stats.lookups += 1;
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.hits += 1;
                *entry
            }
            None => Entry::UNKNOWN,
        }
    }

    /// Read without touching the statistics.
    pub fn peek(&self, key: &ScoreKey) -> Option<Entry> {
        self.entries.get(key).copied()
    }

    pub fn store(&mut self, key: ScoreKey, entry: Entry) {
        if self.entries.len() > self.capacity {
            info!(
                entries = self.entries.len(),
                capacity = self.capacity,
                "score table over capacity, clearing"
            );
            self.entries.clear();
            self.stats.clears += 1;
        }
        self.stats.stores += 1;
        self.entries.insert(key, entry);
    }
}

/// Last move proven good enough for a cutoff in each position.
#[derive(Debug, Clone)]
pub struct KillerTable {
    moves: HashMap<Position, Move>,
    capacity: usize,
    stats: TableStats,
}

impl KillerTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: HashMap::new(),
            capacity: capacity.max(1),
            stats: TableStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn get(&mut self, position: &Position) -> Option<Move> {
        self.stats.lookups += 1;
        let found = self.moves.get(position).copied();
        if found.is_some() {
            self.stats.hits += 1;
        }
        found
    }

    pub fn peek(&self, position: &Position) -> Option<Move> {
        self.moves.get(position).copied()
    }

    pub fn insert(&mut self, position: &Position, mv: Move) {
        if self.moves.len() > self.capacity {
            info!(
                entries = self.moves.len(),
                capacity = self.capacity,
                "killer table over capacity, clearing"
            );
            self.moves.clear();
            self.stats.clears += 1;
        }
        self.stats.stores += 1;
        self.moves.insert(position.clone(), mv);
    }

    pub fn remove(&mut self, position: &Position) {
        self.moves.remove(position);
    }
}
