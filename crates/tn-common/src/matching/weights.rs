/// Fixed criterion weights for the match scorer.
///
/// Skills contribute one point per required skill (skipped entirely when a
/// job lists none); experience and role are fixed two-point criteria that
/// are evaluated on every computation.
pub const EXPERIENCE_POINTS: u32 = 2;
pub const ROLE_POINTS: u32 = 2;

/// Computed scores are pinned into [SCORE_FLOOR, SCORE_CEILING] so listings
/// never show a 0% or 100% match.
pub const SCORE_FLOOR: i32 = 10;
pub const SCORE_CEILING: i32 = 98;

/// Fallback when no criterion produced a denominator.
pub const NEUTRAL_SCORE: i32 = 50;

/// Sentinel for "insufficient data to score": profile or job absent
/// entirely. Deliberately outside the clamp range so callers can tell it
/// apart from a legitimately low score.
pub const NO_DATA_SCORE: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_are_ordered() {
        assert!(SCORE_FLOOR < SCORE_CEILING);
        assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&NEUTRAL_SCORE));
    }

    #[test]
    fn sentinel_is_outside_the_clamp_range() {
        assert!(NO_DATA_SCORE < SCORE_FLOOR);
    }
}
