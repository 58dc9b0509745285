//! Integer percentage helpers.
//!
//! Inputs are non-negative, so round-half-up is computed exactly as
//! `(200 * n + d) / (2 * d)` without going through floats.

/// `round(100 * part / whole)`, or 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    let value = (200 * part + whole) / (2 * whole);
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Progress through a quiz while showing the question at `index` (0-based).
#[must_use]
pub fn progress_percent(index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let shown = u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    rounded_percent(shown, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(15, 15), 100);
        assert_eq!(rounded_percent(0, 15), 0);
    }

    #[test]
    fn progress_counts_current_question() {
        assert_eq!(progress_percent(0, 15), 7);
        assert_eq!(progress_percent(14, 15), 100);
        assert_eq!(progress_percent(0, 1), 100);
    }
}
