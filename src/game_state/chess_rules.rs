//! Starting-position literals.
//!
//! The layout is the engine's native 120-cell form, the FEN is what front
//! ends exchange. Both describe the same position.

/// Starting layout in white orientation. Padding cells are spaces.
pub const INITIAL_LAYOUT: &str = concat!(
    "          ",
    "          ",
    " rnbqkbnr ",
    " pppppppp ",
    " ........ ",
    " ........ ",
    " ........ ",
    " ........ ",
    " PPPPPPPP ",
    " RNBQKBNR ",
    "          ",
    "          ",
);

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
