//! Plan confidence scoring
//!
//! Combines income volatility, data coverage, and buffer health into a
//! single reliability score. Every factor has a positive floor, so a plan
//! is never declared "0% reliable," only low-reliability.

/// Floor of the volatility factor
const VOLATILITY_FLOOR: f64 = 0.3;

/// Floor of the data-coverage factor
const COVERAGE_FLOOR: f64 = 0.2;

/// Floor of the buffer-health factor
const BUFFER_FLOOR: f64 = 0.2;

/// Buffer factor when no target exists yet (nothing to measure against)
const BUFFER_NEUTRAL: f64 = 0.5;

/// Days of transaction data considered full coverage
const FULL_COVERAGE_DAYS: f64 = 30.0;

/// Compute the plan confidence score, rounded to 2 decimal places.
/// Always strictly positive and at most 1.0.
pub fn confidence_score(
    volatility: f64,
    days_with_data: u32,
    buffer_current: f64,
    buffer_target: f64,
) -> f64 {
    let volatility_factor = (1.0 - volatility).clamp(VOLATILITY_FLOOR, 1.0);
    let coverage_factor = (days_with_data as f64 / FULL_COVERAGE_DAYS).clamp(COVERAGE_FLOOR, 1.0);
    let buffer_factor = if buffer_target > 0.0 {
        (buffer_current / buffer_target).clamp(BUFFER_FLOOR, 1.0)
    } else {
        BUFFER_NEUTRAL
    };

    let score = volatility_factor * coverage_factor * buffer_factor;
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_inputs_score_one() {
        assert_eq!(confidence_score(0.0, 30, 10_000.0, 9_500.0), 1.0);
    }

    #[test]
    fn test_bounds_hold_across_inputs() {
        for volatility in [0.0, 0.3, 1.0, 5.0] {
            for days in [0u32, 3, 15, 30, 200] {
                for (buffer, target) in [(0.0, 0.0), (0.0, 9_500.0), (500.0, 9_500.0), (20_000.0, 9_500.0)] {
                    let score = confidence_score(volatility, days, buffer, target);
                    assert!(score > 0.0, "score {} not positive", score);
                    assert!(score <= 1.0, "score {} above 1", score);
                }
            }
        }
    }

    #[test]
    fn test_volatility_floor() {
        // Even absurd volatility leaves the factor at 0.3
        let score = confidence_score(10.0, 30, 10_000.0, 9_500.0);
        assert_eq!(score, 0.3);
    }

    #[test]
    fn test_neutral_buffer_factor_without_target() {
        // target 0: buffer factor pinned at 0.5
        let score = confidence_score(0.0, 30, 0.0, 0.0);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_empty_snapshot_floor() {
        // Default volatility, no data, no buffer: 0.5 * 0.2 * 0.5
        let score = confidence_score(0.5, 0, 0.0, 0.0);
        assert_eq!(score, 0.05);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let score = confidence_score(0.123, 17, 3_000.0, 9_500.0);
        assert_eq!((score * 100.0).round() / 100.0, score);
    }
}
