use serde::{Deserialize, Serialize};
use std::fmt;

mod frequency;

pub use frequency::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }

    /// Parse the raw `type` column value. Returns `None` for anything that is
    /// not one of the two known content types.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog title, normalized from the raw export.
///
/// Absence is always `None`. An empty `Vec` means the field was present but
/// held no usable parts, which is distinct from the field being missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub id: String,
    pub content_type: ContentType,
    pub genres: Option<Vec<String>>,
    /// First element is the primary production country.
    pub countries: Option<Vec<String>>,
    pub rating: Option<String>,
    pub release_year: Option<i32>,
    /// Free-form: `"N min"` for movies, `"N Season(s)"` for shows.
    pub duration: Option<String>,
}

impl Title {
    pub fn primary_country(&self) -> Option<&str> {
        self.countries
            .as_deref()
            .and_then(|countries| countries.first())
            .map(String::as_str)
    }
}

/// A dimension key with its aggregated count and 1-based rank under
/// descending-count, first-seen-stable ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<K> {
    pub key: K,
    pub count: u64,
    pub rank: usize,
}

/// Identifies the ranked list a traced attribute was drawn from, so a
/// reporter can re-derive rank and count without trusting the trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ListRef {
    Genres(ContentType),
    Countries(ContentType),
    Ratings(ContentType),
    /// Years restricted to keys >= the given threshold before ranking.
    RecentYears(ContentType, i32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChoiceOrigin {
    /// Taken from a ranked frequency list at the given 1-based rank.
    Ranked {
        list: ListRef,
        rank: usize,
        count: u64,
    },
    /// A design-time constant, not derived from the data.
    Fixed,
    /// Averaged over the parsable duration values of the matching records.
    Averaged { samples: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChoice {
    pub attribute: &'static str,
    pub value: String,
    pub origin: ChoiceOrigin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionTrace {
    pub choices: Vec<AttributeChoice>,
}

impl SelectionTrace {
    pub fn push(&mut self, attribute: &'static str, value: impl Into<String>, origin: ChoiceOrigin) {
        self.choices.push(AttributeChoice {
            attribute,
            value: value.into(),
            origin,
        });
    }
}

/// A rule-derived hypothetical catalog entry, record-shaped plus the trace
/// that justifies every derived attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedTitle {
    pub id: String,
    pub content_type: ContentType,
    pub name: String,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: String,
    pub release_year: i32,
    pub rating: String,
    pub duration: String,
    pub genres: Vec<String>,
    pub description: String,
    pub trace: SelectionTrace,
}
