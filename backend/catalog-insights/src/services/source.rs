//! Dataset ingestion.
//!
//! The raw export is newline-delimited JSON, one object per title, with the
//! original column names. Unknown fields are ignored; blank lines are
//! skipped. Each row is normalized into a [`Title`], which is where the
//! missing-versus-empty distinction and the fatal malformed-year check live.

use crate::error::{InsightError, Result};
use crate::models::{ContentType, Title};
use crate::services::extract::split_multi_value;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// A raw dataset row. Multi-valued attributes are still comma-delimited
/// text; `release_year` arrives as either a JSON number or a string
/// depending on the exporter.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTitle {
    pub show_id: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub country: Option<String>,
    pub release_year: Option<Value>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

impl RawTitle {
    /// Normalize into the typed record. Fails only on corrupt input: an
    /// unknown content type or a present year that is not an integer.
    pub fn normalize(self) -> Result<Title> {
        let type_text = self.content_type.unwrap_or_default();
        let content_type = ContentType::parse(&type_text).ok_or_else(|| {
            InsightError::MalformedField {
                field: "type",
                value: type_text.clone(),
                expected: "one of \"Movie\", \"TV Show\"",
            }
        })?;

        let release_year = match &self.release_year {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_year(value)?),
        };

        Ok(Title {
            id: self.show_id.unwrap_or_default(),
            content_type,
            genres: self.listed_in.as_deref().map(split_multi_value),
            countries: self.country.as_deref().map(split_multi_value),
            rating: self.rating,
            release_year,
            duration: self.duration,
        })
    }
}

fn parse_year(value: &Value) -> Result<i32> {
    let malformed = || InsightError::MalformedField {
        field: "release_year",
        value: value.to_string(),
        expected: "integer year",
    };

    match value {
        Value::Number(n) => {
            if let Some(year) = n.as_i64() {
                i32::try_from(year).map_err(|_| malformed())
            } else {
                // Some exporters write years as floats; accept only whole
                // ones that fit an i32, the cast saturates otherwise.
                match n.as_f64() {
                    Some(f)
                        if f.fract() == 0.0
                            && f >= i32::MIN as f64
                            && f <= i32::MAX as f64 =>
                    {
                        Ok(f as i32)
                    }
                    _ => Err(malformed()),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

/// Read and normalize every record from an NDJSON reader. Decode failures
/// are reported with their 1-based line number; normalization failures
/// (corrupt fields) abort the whole load.
pub fn titles_from_reader<R: BufRead>(reader: R) -> Result<Vec<Title>> {
    let mut titles = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawTitle = serde_json::from_str(&line)
            .map_err(|source| InsightError::Record {
                line: idx + 1,
                source,
            })?;
        titles.push(raw.normalize()?);
    }
    Ok(titles)
}

pub fn load_titles<P: AsRef<Path>>(path: P) -> Result<Vec<Title>> {
    let file = File::open(path.as_ref())?;
    let titles = titles_from_reader(BufReader::new(file))?;
    info!(
        title_count = titles.len(),
        path = %path.as_ref().display(),
        "catalog loaded"
    );
    Ok(titles)
}
