//! Per-record dimension extraction.
//!
//! Every function here is pure: one immutable [`Title`] in, a fresh set of
//! `(key, 1)` contributions out. Nothing is shared across records, so the
//! map phase can be sharded freely.

use crate::models::{ContentType, Title};

/// Sentinel for a missing single-valued attribute in the type signal.
pub const UNKNOWN: &str = "Unknown";

const MULTI_VALUE_DELIMITER: char = ',';

/// Split a raw comma-delimited multi-value field into trimmed parts,
/// dropping empties. `"Dramas, , International TV"` yields two parts.
pub fn split_multi_value(text: &str) -> Vec<String> {
    text.split(MULTI_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One contribution per genre; a missing field contributes nothing.
pub fn genre_contributions(title: &Title) -> Vec<(String, u64)> {
    match &title.genres {
        Some(genres) => genres.iter().map(|genre| (genre.clone(), 1)).collect(),
        None => Vec::new(),
    }
}

/// One contribution per listed country; a missing field contributes nothing.
pub fn country_contributions(title: &Title) -> Vec<(String, u64)> {
    match &title.countries {
        Some(countries) => countries
            .iter()
            .map(|country| (country.clone(), 1))
            .collect(),
        None => Vec::new(),
    }
}

/// Exactly one contribution keyed by the raw rating value, if present.
pub fn rating_contribution(title: &Title) -> Option<(String, u64)> {
    title.rating.as_ref().map(|rating| (rating.clone(), 1))
}

/// Exactly one contribution keyed by the release year, if present.
/// A present-but-non-numeric year never reaches this point: normalization
/// rejects it as `MalformedField` (see `services::source`).
pub fn year_contribution(title: &Title) -> Option<(i32, u64)> {
    title.release_year.map(|year| (year, 1))
}

/// The payload bundled under a record's content-type contribution, feeding
/// the per-type profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSignal {
    pub genres: Vec<String>,
    /// First listed country, or [`UNKNOWN`].
    pub primary_country: String,
    /// Raw rating, or [`UNKNOWN`].
    pub rating: String,
    /// Release year, or 0 when absent.
    pub year: i32,
}

/// Always exactly one contribution per record, keyed by content type.
pub fn type_signal(title: &Title) -> (ContentType, TypeSignal) {
    let signal = TypeSignal {
        genres: title.genres.clone().unwrap_or_default(),
        primary_country: title
            .primary_country()
            .unwrap_or(UNKNOWN)
            .to_string(),
        rating: title.rating.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        year: title.release_year.unwrap_or(0),
    };
    (title.content_type, signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(genres: Option<Vec<&str>>, countries: Option<Vec<&str>>) -> Title {
        Title {
            id: "t1".to_string(),
            content_type: ContentType::Movie,
            genres: genres.map(|gs| gs.into_iter().map(String::from).collect()),
            countries: countries.map(|cs| cs.into_iter().map(String::from).collect()),
            rating: None,
            release_year: None,
            duration: None,
        }
    }

    #[test]
    fn split_trims_and_drops_empty_parts() {
        assert_eq!(
            split_multi_value("Dramas, International Movies ,, Comedies"),
            vec!["Dramas", "International Movies", "Comedies"]
        );
        assert!(split_multi_value(" , ").is_empty());
    }

    #[test]
    fn missing_multi_value_field_contributes_nothing() {
        let t = title(None, None);
        assert!(genre_contributions(&t).is_empty());
        assert!(country_contributions(&t).is_empty());
    }

    #[test]
    fn each_genre_contributes_once() {
        let t = title(Some(vec!["Dramas", "Comedies"]), None);
        assert_eq!(
            genre_contributions(&t),
            vec![("Dramas".to_string(), 1), ("Comedies".to_string(), 1)]
        );
    }

    #[test]
    fn type_signal_uses_sentinels_for_missing_fields() {
        let t = title(None, None);
        let (content_type, signal) = type_signal(&t);
        assert_eq!(content_type, ContentType::Movie);
        assert!(signal.genres.is_empty());
        assert_eq!(signal.primary_country, UNKNOWN);
        assert_eq!(signal.rating, UNKNOWN);
        assert_eq!(signal.year, 0);
    }

    #[test]
    fn type_signal_takes_primary_country() {
        let t = title(None, Some(vec!["India", "United Kingdom"]));
        let (_, signal) = type_signal(&t);
        assert_eq!(signal.primary_country, "India");
    }
}
