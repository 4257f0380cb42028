//! Move-time budgeting from the GUI's clock report.

use crate::board::Color;

use super::command::GoParams;

/// Fallback budget when the GUI supplies no clock at all.
const DEFAULT_BUDGET_MS: u64 = 1000;

/// Never think for less than this; guards against a drained clock.
const MIN_BUDGET_MS: u64 = 10;

/// Moves assumed to remain when the GUI does not say.
const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Milliseconds to spend on this move.
///
/// Divides the side's remaining time by `movestogo` when given, by
/// [`DEFAULT_MOVES_TO_GO`] otherwise, clamped to at least
/// [`MIN_BUDGET_MS`].
#[must_use]
pub fn move_time_ms(params: &GoParams, side: Color) -> u64 {
    let available = match side {
        Color::White => params.wtime,
        Color::Black => params.btime,
    };
    let Some(available) = available else {
        return DEFAULT_BUDGET_MS;
    };
    if available == 0 {
        return MIN_BUDGET_MS;
    }

    let divisor = match params.movestogo {
        Some(mtg) if mtg > 0 => mtg,
        _ => DEFAULT_MOVES_TO_GO,
    };
    (available / divisor).max(MIN_BUDGET_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::command::parse_go_params;

    #[test]
    fn divides_by_movestogo_when_present() {
        let params = parse_go_params(&["go", "wtime", "60000", "btime", "60000", "movestogo", "20"]);
        assert_eq!(move_time_ms(&params, Color::White), 3000);
    }

    #[test]
    fn defaults_to_a_thirtieth_of_the_clock() {
        let params = parse_go_params(&["go", "wtime", "30000", "btime", "90000"]);
        assert_eq!(move_time_ms(&params, Color::White), 1000);
        assert_eq!(move_time_ms(&params, Color::Black), 3000);
    }

    #[test]
    fn clamps_to_the_minimum_budget() {
        let params = parse_go_params(&["go", "wtime", "50", "btime", "50"]);
        assert_eq!(move_time_ms(&params, Color::White), MIN_BUDGET_MS);
        let drained = parse_go_params(&["go", "wtime", "0", "btime", "0"]);
        assert_eq!(move_time_ms(&drained, Color::Black), MIN_BUDGET_MS);
    }

    #[test]
    fn falls_back_when_no_clock_is_supplied() {
        let params = parse_go_params(&["go"]);
        assert_eq!(move_time_ms(&params, Color::White), DEFAULT_BUDGET_MS);
    }
}
