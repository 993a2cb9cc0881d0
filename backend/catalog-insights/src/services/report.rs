//! Plain-text rendering of the trend report and candidate justifications.
//!
//! Justification lines never trust the selection trace's numbers: rank and
//! count are recomputed from the profiles and the trace only says which
//! list to look in. Pure string building; callers decide where it goes.

use crate::error::InsightError;
use crate::models::{ChoiceOrigin, ContentType, ListRef, RankedEntry, SynthesizedTitle};
use crate::services::aggregate::TypeProfiles;
use crate::services::trends::{self, TrendReport};
use std::fmt::Write;

/// Re-derive the 1-based rank and count of `value` within the referenced
/// ranked list.
pub fn resolve_rank(
    profiles: &TypeProfiles,
    list: &ListRef,
    value: &str,
) -> Option<(usize, u64)> {
    fn find<K: ToString>(ranked: Vec<RankedEntry<K>>, value: &str) -> Option<(usize, u64)> {
        ranked
            .into_iter()
            .find(|entry| entry.key.to_string() == value)
            .map(|entry| (entry.rank, entry.count))
    }

    match list {
        ListRef::Genres(ct) => find(profiles.get(*ct)?.genres.ranked(), value),
        ListRef::Countries(ct) => find(profiles.get(*ct)?.countries.ranked(), value),
        ListRef::Ratings(ct) => find(profiles.get(*ct)?.ratings.ranked(), value),
        ListRef::RecentYears(ct, min_year) => {
            let recent = trends::filter_min_year(&profiles.get(*ct)?.years, *min_year);
            find(recent.ranked(), value)
        }
    }
}

fn describe_list(list: &ListRef) -> String {
    match list {
        ListRef::Genres(ct) => format!("{ct} genres"),
        ListRef::Countries(ct) => format!("{ct} countries"),
        ListRef::Ratings(ct) => format!("{ct} ratings"),
        ListRef::RecentYears(ct, min_year) => format!("{ct} years >= {min_year}"),
    }
}

pub fn render_trends(report: &TrendReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TREND ANALYSIS");

    let _ = writeln!(out, "\nTop {} genres:", report.top_genres.len());
    for entry in &report.top_genres {
        let _ = writeln!(out, "  {}. {}: {} titles", entry.rank, entry.key, entry.count);
    }

    let _ = writeln!(out, "\nTop {} producing countries:", report.top_countries.len());
    for entry in &report.top_countries {
        let _ = writeln!(out, "  {}. {}: {} titles", entry.rank, entry.key, entry.count);
    }

    let _ = writeln!(out, "\nRatings:");
    for entry in &report.ratings {
        let _ = writeln!(out, "  {}: {} titles", entry.key, entry.count);
    }

    let _ = writeln!(
        out,
        "\nMost productive years ({}+):",
        report.recent_year_threshold
    );
    for entry in &report.top_recent_years {
        let _ = writeln!(out, "  {}: {} titles", entry.key, entry.count);
    }

    for breakdown in &report.per_type {
        let _ = writeln!(out, "\n{}:", breakdown.content_type.as_str().to_uppercase());
        let _ = writeln!(out, "  Total: {} titles", breakdown.count);
        let _ = writeln!(out, "  Top {} genres:", breakdown.top_genres.len());
        for entry in &breakdown.top_genres {
            let _ = writeln!(out, "    {}: {}", entry.key, entry.count);
        }
        let _ = writeln!(out, "  Top {} countries:", breakdown.top_countries.len());
        for entry in &breakdown.top_countries {
            let _ = writeln!(out, "    {}: {}", entry.key, entry.count);
        }
    }
    out
}

pub fn render_candidate(candidate: &SynthesizedTitle, profiles: &TypeProfiles) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SYNTHESIZED {}: \"{}\"",
        candidate.content_type.as_str().to_uppercase(),
        candidate.name
    );
    let _ = writeln!(out, "  Country: {}", candidate.country);
    let _ = writeln!(out, "  Genres: {}", candidate.genres.join(", "));
    let _ = writeln!(out, "  Rating: {}", candidate.rating);
    let _ = writeln!(out, "  Duration: {}", candidate.duration);
    let _ = writeln!(out, "  Released: {}", candidate.release_year);
    let _ = writeln!(out, "  Description: {}", candidate.description);

    let _ = writeln!(out, "Why these attributes:");
    for choice in &candidate.trace.choices {
        match &choice.origin {
            ChoiceOrigin::Ranked { list, .. } => {
                match resolve_rank(profiles, list, &choice.value) {
                    Some((rank, count)) => {
                        let _ = writeln!(
                            out,
                            "  {} \"{}\": rank {} of {} ({} titles)",
                            choice.attribute,
                            choice.value,
                            rank,
                            describe_list(list),
                            count
                        );
                    }
                    None => {
                        let _ = writeln!(
                            out,
                            "  {} \"{}\": not found in {} (stale trace)",
                            choice.attribute,
                            choice.value,
                            describe_list(list)
                        );
                    }
                }
            }
            ChoiceOrigin::Fixed => {
                let _ = writeln!(
                    out,
                    "  {} \"{}\": editorial constant",
                    choice.attribute, choice.value
                );
            }
            ChoiceOrigin::Averaged { samples } => {
                let _ = writeln!(
                    out,
                    "  {} \"{}\": averaged over {} parsable durations",
                    choice.attribute, choice.value, samples
                );
            }
        }
    }
    out
}

pub fn render_failure(content_type: ContentType, error: &InsightError) -> String {
    format!("{} candidate not generated: {error}\n", content_type)
}
