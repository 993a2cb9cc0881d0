//! Read-only ranked views over the aggregates. Everything here is
//! referentially transparent: same tables in, same report out.

use crate::config::TrendConfig;
use crate::models::{ContentType, FrequencyTable, RankedEntry};
use crate::services::aggregate::{CatalogAggregates, TypeProfiles};
use std::hash::Hash;

/// First `n` ranked entries; fewer if the table is smaller. `top_n(t, n)`
/// is always a prefix of `top_n(t, n + 1)`.
pub fn top_n<K>(table: &FrequencyTable<K>, n: usize) -> Vec<RankedEntry<K>>
where
    K: Eq + Hash + Clone,
{
    let mut ranked = table.ranked();
    ranked.truncate(n);
    ranked
}

/// Restrict a year table to keys >= `min_year`, preserving first-seen
/// order. The input is untouched.
pub fn filter_min_year(table: &FrequencyTable<i32>, min_year: i32) -> FrequencyTable<i32> {
    let mut filtered = FrequencyTable::new();
    for (&year, count) in table.iter() {
        if year >= min_year {
            filtered.add(year, count);
        }
    }
    filtered
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeBreakdown {
    pub content_type: ContentType,
    pub count: u64,
    pub top_genres: Vec<RankedEntry<String>>,
    pub top_countries: Vec<RankedEntry<String>>,
}

/// The composed trend view backing the report: overall top genres and
/// countries, all ratings ranked, most productive recent years, and a
/// per-type breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub top_genres: Vec<RankedEntry<String>>,
    pub top_countries: Vec<RankedEntry<String>>,
    pub ratings: Vec<RankedEntry<String>>,
    pub recent_year_threshold: i32,
    pub top_recent_years: Vec<RankedEntry<i32>>,
    pub per_type: Vec<TypeBreakdown>,
}

pub fn build_trend_report(
    aggregates: &CatalogAggregates,
    profiles: &TypeProfiles,
    config: &TrendConfig,
) -> TrendReport {
    let recent = filter_min_year(&aggregates.years, config.recent_year_threshold);

    let per_type = profiles
        .iter()
        .map(|(content_type, profile)| TypeBreakdown {
            content_type,
            count: profile.count,
            top_genres: top_n(&profile.genres, config.per_type_genres),
            top_countries: top_n(&profile.countries, config.per_type_countries),
        })
        .collect();

    TrendReport {
        top_genres: top_n(&aggregates.genres, config.top_genres),
        top_countries: top_n(&aggregates.countries, config.top_countries),
        ratings: aggregates.ratings.ranked(),
        recent_year_threshold: config.recent_year_threshold,
        top_recent_years: top_n(&recent, config.recent_years_shown),
        per_type,
    }
}
