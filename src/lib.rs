//! Crate root module declarations for the Damson Chess engine.
//!
//! Damson plays king-capture chess: moves are generated pseudo-legally on a
//! padded 10x12 board, every position is seen from the side to move, and the
//! searcher treats a lost king as the end of the game. This file exposes the
//! board model, move generation, search, engines, the UCI and console front
//! ends, and notation helpers under stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod piece_square_tables;
    pub mod position;
}

pub mod move_generation {
    pub mod move_generator;
}

pub mod search {
    pub mod iterative_deepening;
    pub mod searcher;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_mtd;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod uci {
    pub mod console;
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod self_play;
}
