//! Duration-text parsing for the candidate's typical-length estimate.
//!
//! Catalog durations are free-form: `"90 min"` for movies, `"1 Season"` /
//! `"4 Seasons"` for shows. Anything that does not match is skipped, never
//! counted as zero.

use once_cell::sync::Lazy;
use regex::Regex;

// Hardcoded patterns; invalid ones are a source bug, not a runtime condition.
static SEASONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s+Seasons?\b").expect("hardcoded seasons regex is invalid")
});

static MINUTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s+min\b").expect("hardcoded minutes regex is invalid")
});

pub fn season_count(text: &str) -> Option<u32> {
    leading_number(&SEASONS_RE, text)
}

pub fn minute_count(text: &str) -> Option<u32> {
    leading_number(&MINUTES_RE, text)
}

fn leading_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Mean rounded to the nearest integer, ties to even; `None` for an empty
/// sample. An exact-half mean like 2.5 rounds down to 2, matching the
/// rounding the catalog's historical reports used.
pub fn mean_rounded(values: &[u32]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(round_half_to_even(sum as f64 / values.len() as f64))
}

fn round_half_to_even(value: f64) -> u32 {
    let floor = value.floor();
    let fraction = value - floor;
    let rounded = if fraction > 0.5 {
        floor + 1.0
    } else if fraction < 0.5 {
        floor
    } else if (floor as u64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    };
    rounded as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_seasons() {
        assert_eq!(season_count("1 Season"), Some(1));
        assert_eq!(season_count("4 Seasons"), Some(4));
        assert_eq!(season_count("  2 Seasons"), Some(2));
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(minute_count("90 min"), Some(90));
        assert_eq!(minute_count("142 min"), Some(142));
    }

    #[test]
    fn mismatched_forms_are_skipped() {
        assert_eq!(season_count("90 min"), None);
        assert_eq!(minute_count("2 Seasons"), None);
        assert_eq!(season_count("Seasons"), None);
        assert_eq!(minute_count(""), None);
    }

    #[test]
    fn mean_rounds_to_nearest() {
        assert_eq!(mean_rounded(&[90, 100, 95]), Some(95));
        assert_eq!(mean_rounded(&[3, 1, 2, 5]), Some(3)); // 2.75 rounds up
        assert_eq!(mean_rounded(&[]), None);
    }

    #[test]
    fn exact_half_means_round_to_even() {
        assert_eq!(mean_rounded(&[2, 3, 2, 3]), Some(2)); // 2.5 -> 2
        assert_eq!(mean_rounded(&[1, 2]), Some(2)); // 1.5 -> 2
        assert_eq!(mean_rounded(&[90, 91]), Some(90)); // 90.5 -> 90
        assert_eq!(mean_rounded(&[91, 92]), Some(92)); // 91.5 -> 92
    }
}
