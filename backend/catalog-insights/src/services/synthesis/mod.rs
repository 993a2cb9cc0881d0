// ============================================
// Recommendation Synthesizer
// ============================================
//
// Builds one hypothetical catalog entry per content type from that type's
// profile. This is a deterministic rule engine: selection, exclusion and
// fallback rules are the product definition, there is no model underneath.
//
// Failure scoping: `InsufficientData` and `MissingProfile` abort only the
// affected content type; the other candidate is still produced.

use crate::config::Config;
use crate::error::{InsightError, Result};
use crate::models::{
    ChoiceOrigin, ContentType, ListRef, SelectionTrace, SynthesizedTitle, Title,
};
use crate::services::aggregate::{TypeProfile, TypeProfiles};
use crate::services::trends;
use tracing::debug;

pub mod duration;

/// Movie candidates always ship with a US production country. Editorial
/// constant, not derived from the observed distribution (see DESIGN.md).
const MOVIE_COUNTRY: &str = "United States";

/// The TV candidate's country skips this key for diversity.
const EXCLUDED_TV_COUNTRY: &str = "United States";

/// Movie candidates never carry this rating.
const EXCLUDED_MOVIE_RATING: &str = "TV-MA";

/// Movie genre keys containing this substring are television categories
/// and are excluded from movie candidates.
const TV_GENRE_MARKER: &str = "TV";

const CANDIDATE_GENRES: usize = 3;

/// Both candidates of one run; each side fails independently.
#[derive(Debug)]
pub struct SynthesisOutcome {
    pub tv_show: Result<SynthesizedTitle>,
    pub movie: Result<SynthesizedTitle>,
}

pub struct Synthesizer<'a> {
    config: &'a Config,
}

impl<'a> Synthesizer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn synthesize_all(&self, profiles: &TypeProfiles, titles: &[Title]) -> SynthesisOutcome {
        SynthesisOutcome {
            tv_show: self.synthesize(ContentType::TvShow, profiles, titles),
            movie: self.synthesize(ContentType::Movie, profiles, titles),
        }
    }

    pub fn synthesize(
        &self,
        content_type: ContentType,
        profiles: &TypeProfiles,
        titles: &[Title],
    ) -> Result<SynthesizedTitle> {
        let profile = profiles
            .get(content_type)
            .ok_or(InsightError::MissingProfile(content_type))?;

        let mut trace = SelectionTrace::default();
        let genres = self.select_genres(content_type, profile, &mut trace);
        let country = self.select_country(content_type, profile, &mut trace)?;
        let rating = self.select_rating(content_type, profile, &mut trace)?;
        if content_type == ContentType::TvShow {
            self.select_anchor_year(profile, &mut trace)?;
        }
        let duration = self.estimate_duration(content_type, titles, &mut trace);

        let identity = match content_type {
            ContentType::TvShow => &self.config.identity.tv_show,
            ContentType::Movie => &self.config.identity.movie,
        };

        debug!(
            content_type = %content_type,
            country = %country,
            rating = %rating,
            duration = %duration,
            "candidate synthesized"
        );

        Ok(SynthesizedTitle {
            id: identity.id.clone(),
            content_type,
            name: identity.name.clone(),
            director: identity.director.clone(),
            cast: identity.cast.clone(),
            country,
            date_added: identity.date_added.clone(),
            release_year: identity.release_year,
            rating,
            duration,
            genres,
            description: identity.description.clone(),
            trace,
        })
    }

    /// Top 3 genres; movie candidates additionally exclude television
    /// categories. Fewer than 3 qualifying genres is fine, never padded.
    fn select_genres(
        &self,
        content_type: ContentType,
        profile: &TypeProfile,
        trace: &mut SelectionTrace,
    ) -> Vec<String> {
        let ranked = profile.genres.ranked();
        let mut selected = Vec::with_capacity(CANDIDATE_GENRES);

        for entry in &ranked {
            if selected.len() == CANDIDATE_GENRES {
                break;
            }
            if content_type == ContentType::Movie && entry.key.contains(TV_GENRE_MARKER) {
                continue;
            }
            trace.push(
                "genre",
                entry.key.clone(),
                ChoiceOrigin::Ranked {
                    list: ListRef::Genres(content_type),
                    rank: entry.rank,
                    count: entry.count,
                },
            );
            selected.push(entry.key.clone());
        }
        selected
    }

    /// TV: rank-2 country, or rank-3 when rank-2 is the excluded key.
    /// Movie: the fixed editorial country, no ranking dependency.
    fn select_country(
        &self,
        content_type: ContentType,
        profile: &TypeProfile,
        trace: &mut SelectionTrace,
    ) -> Result<String> {
        if content_type == ContentType::Movie {
            trace.push("country", MOVIE_COUNTRY, ChoiceOrigin::Fixed);
            return Ok(MOVIE_COUNTRY.to_string());
        }

        let ranked = profile.countries.ranked();
        if ranked.len() < 3 {
            return Err(InsightError::InsufficientData {
                content_type,
                selection: "country",
                detail: format!(
                    "need at least 3 distinct countries, found {}",
                    ranked.len()
                ),
            });
        }

        let pick = if ranked[1].key == EXCLUDED_TV_COUNTRY {
            &ranked[2]
        } else {
            &ranked[1]
        };
        trace.push(
            "country",
            pick.key.clone(),
            ChoiceOrigin::Ranked {
                list: ListRef::Countries(content_type),
                rank: pick.rank,
                count: pick.count,
            },
        );
        Ok(pick.key.clone())
    }

    /// TV: the most frequent rating as-is. Movie: the most frequent rating
    /// unless it is the excluded one, then the runner-up.
    fn select_rating(
        &self,
        content_type: ContentType,
        profile: &TypeProfile,
        trace: &mut SelectionTrace,
    ) -> Result<String> {
        let ranked = profile.ratings.ranked();
        let top = ranked.first().ok_or_else(|| InsightError::InsufficientData {
            content_type,
            selection: "rating",
            detail: "no ratings observed".to_string(),
        })?;

        let pick = if content_type == ContentType::Movie && top.key == EXCLUDED_MOVIE_RATING {
            ranked.get(1).ok_or_else(|| InsightError::InsufficientData {
                content_type,
                selection: "rating",
                detail: format!(
                    "top rating is {EXCLUDED_MOVIE_RATING} and no second rating exists"
                ),
            })?
        } else {
            top
        };

        trace.push(
            "rating",
            pick.key.clone(),
            ChoiceOrigin::Ranked {
                list: ListRef::Ratings(content_type),
                rank: pick.rank,
                count: pick.count,
            },
        );
        Ok(pick.key.clone())
    }

    /// The most frequent release year within the recent window. An empty
    /// window is a data-sparsity condition, not a crash.
    fn select_anchor_year(&self, profile: &TypeProfile, trace: &mut SelectionTrace) -> Result<()> {
        let threshold = self.config.synthesis.tv_year_threshold;
        let recent = trends::filter_min_year(&profile.years, threshold);
        let ranked = recent.ranked();

        let top = ranked.first().ok_or_else(|| InsightError::InsufficientData {
            content_type: ContentType::TvShow,
            selection: "year",
            detail: format!("no release years >= {threshold}"),
        })?;

        trace.push(
            "year",
            top.key.to_string(),
            ChoiceOrigin::Ranked {
                list: ListRef::RecentYears(ContentType::TvShow, threshold),
                rank: top.rank,
                count: top.count,
            },
        );
        Ok(())
    }

    /// Average the parsable durations of the matching records. Unparsable
    /// or absent durations are skipped; an empty sample falls back to the
    /// configured default.
    fn estimate_duration(
        &self,
        content_type: ContentType,
        titles: &[Title],
        trace: &mut SelectionTrace,
    ) -> String {
        let texts = titles
            .iter()
            .filter(|t| t.content_type == content_type)
            .filter_map(|t| t.duration.as_deref());

        let rendered = match content_type {
            ContentType::TvShow => {
                let samples: Vec<u32> = texts.filter_map(duration::season_count).collect();
                let seasons = duration::mean_rounded(&samples)
                    .unwrap_or(self.config.synthesis.default_seasons)
                    .min(self.config.synthesis.max_seasons);
                trace.push(
                    "duration",
                    format!("{seasons} Seasons"),
                    ChoiceOrigin::Averaged {
                        samples: samples.len(),
                    },
                );
                format!("{seasons} Seasons")
            }
            ContentType::Movie => {
                let samples: Vec<u32> = texts.filter_map(duration::minute_count).collect();
                let minutes = duration::mean_rounded(&samples)
                    .unwrap_or(self.config.synthesis.default_minutes);
                trace.push(
                    "duration",
                    format!("{minutes} min"),
                    ChoiceOrigin::Averaged {
                        samples: samples.len(),
                    },
                );
                format!("{minutes} min")
            }
        };
        rendered
    }
}
