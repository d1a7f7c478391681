//! Per-move time budgeting from raw `go` clock fields.
//!
//! Front ends pass `wtime/btime/winc/binc/movestogo/movetime` through
//! untouched; the engine turns them into a single move budget here.

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;

/// Moves assumed to remain when the front end does not send `movestogo`.
pub const DEFAULT_MOVES_TO_GO: u64 = 10;

/// Held back from every clock-derived budget to absorb protocol latency.
pub const SAFETY_MARGIN_MS: u64 = 250;

/// Clock assumed for a bare `go` that names neither a clock nor a depth.
pub const DEFAULT_CLOCK_MS: u64 = 60_000;

/// Milliseconds the side to move may spend, or `None` when the search is
/// bounded by depth only.
pub fn move_budget_ms(side_to_move: Color, params: &GoParams) -> Option<u64> {
    if let Some(movetime) = params.movetime_ms {
        return Some(movetime.max(1));
    }

    let (remaining, increment) = match side_to_move {
        Color::Light => (params.wtime_ms, params.winc_ms),
        Color::Dark => (params.btime_ms, params.binc_ms),
    };
    let remaining = match (remaining, params.depth) {
        (Some(remaining), _) => remaining,
        (None, Some(_)) => return None,
        (None, None) => DEFAULT_CLOCK_MS,
    };

    let moves_to_go = params
        .movestogo
        .map_or(DEFAULT_MOVES_TO_GO, |mtg| u64::from(mtg.max(1)));
    let inc_bonus = increment.unwrap_or(0).saturating_mul(3) / 4;
    let target = (remaining / moves_to_go)
        .saturating_add(inc_bonus)
        .saturating_sub(SAFETY_MARGIN_MS);

    Some(target.max(1))
}

#[cfg(test)]
mod tests {
    use super::move_budget_ms;
    use crate::engines::engine_trait::GoParams;
    use crate::game_state::chess_types::Color;

    #[test]
    fn explicit_movetime_wins() {
        let params = GoParams {
            movetime_ms: Some(1500),
            wtime_ms: Some(60_000),
            ..GoParams::default()
        };
        assert_eq!(move_budget_ms(Color::Light, &params), Some(1500));
    }

    #[test]
    fn clock_split_uses_the_movers_clock() {
        let params = GoParams {
            wtime_ms: Some(60_000),
            btime_ms: Some(30_000),
            winc_ms: Some(1_000),
            ..GoParams::default()
        };
        // 60000 / 10 + 750 - 250
        assert_eq!(move_budget_ms(Color::Light, &params), Some(6_500));
        // 30000 / 10 - 250
        assert_eq!(move_budget_ms(Color::Dark, &params), Some(2_750));

        let with_mtg = GoParams {
            movestogo: Some(30),
            ..params
        };
        assert_eq!(move_budget_ms(Color::Dark, &with_mtg), Some(750));
    }

    #[test]
    fn low_clock_never_drops_to_zero() {
        let params = GoParams {
            btime_ms: Some(100),
            ..GoParams::default()
        };
        assert_eq!(move_budget_ms(Color::Dark, &params), Some(1));
    }

    #[test]
    fn no_clock_means_depth_only() {
        let params = GoParams {
            depth: Some(4),
            ..GoParams::default()
        };
        assert_eq!(move_budget_ms(Color::Light, &params), None);
    }

    #[test]
    fn bare_go_assumes_a_default_clock() {
        // 60000 / 10 - 250
        assert_eq!(move_budget_ms(Color::Light, &GoParams::default()), Some(5_750));
        let params = GoParams {
            movestogo: Some(20),
            ..GoParams::default()
        };
        assert_eq!(move_budget_ms(Color::Dark, &params), Some(2_750));
    }
}
