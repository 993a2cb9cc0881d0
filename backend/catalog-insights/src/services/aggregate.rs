//! Reduce phase: fold per-record contributions into frequency tables.
//!
//! Both reducers are key-wise sums, so partial aggregates built from any
//! sharding of the record sequence merge into the same result as a single
//! sequential pass (`aggregate(A ++ B) == merge(aggregate(A), aggregate(B))`).

use crate::models::{ContentType, FrequencyTable, Title};
use crate::services::extract;
use tracing::debug;

/// Catalog-wide frequency tables, one per tracked dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogAggregates {
    pub genres: FrequencyTable<String>,
    pub countries: FrequencyTable<String>,
    pub ratings: FrequencyTable<String>,
    pub years: FrequencyTable<i32>,
}

impl CatalogAggregates {
    pub fn merge(&mut self, other: &CatalogAggregates) {
        self.genres.merge(&other.genres);
        self.countries.merge(&other.countries);
        self.ratings.merge(&other.ratings);
        self.years.merge(&other.years);
    }
}

/// Single sequential pass over the records. Each record contributes once
/// per genre and country listed, and at most once to ratings and years.
pub fn aggregate_catalog(titles: &[Title]) -> CatalogAggregates {
    let mut aggregates = CatalogAggregates::default();

    for title in titles {
        for (genre, n) in extract::genre_contributions(title) {
            aggregates.genres.add(genre, n);
        }
        for (country, n) in extract::country_contributions(title) {
            aggregates.countries.add(country, n);
        }
        if let Some((rating, n)) = extract::rating_contribution(title) {
            aggregates.ratings.add(rating, n);
        }
        if let Some((year, n)) = extract::year_contribution(title) {
            aggregates.years.add(year, n);
        }
    }

    debug!(
        genres = aggregates.genres.len(),
        countries = aggregates.countries.len(),
        ratings = aggregates.ratings.len(),
        years = aggregates.years.len(),
        "catalog aggregates built"
    );
    aggregates
}

/// Per-content-type statistical profile: record count plus nested tables
/// built only from records of that type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeProfile {
    pub count: u64,
    pub genres: FrequencyTable<String>,
    pub countries: FrequencyTable<String>,
    pub ratings: FrequencyTable<String>,
    pub years: FrequencyTable<i32>,
}

impl TypeProfile {
    fn absorb(&mut self, signal: extract::TypeSignal) {
        self.count += 1;
        for genre in signal.genres {
            self.genres.tally(genre);
        }
        self.countries.tally(signal.primary_country);
        self.ratings.tally(signal.rating);
        self.years.tally(signal.year);
    }
}

/// Content type -> profile. A type with zero observed records has no
/// profile; callers must treat that as "no data", not as a zero profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeProfiles {
    movie: Option<TypeProfile>,
    tv_show: Option<TypeProfile>,
}

impl TypeProfiles {
    pub fn get(&self, content_type: ContentType) -> Option<&TypeProfile> {
        match content_type {
            ContentType::Movie => self.movie.as_ref(),
            ContentType::TvShow => self.tv_show.as_ref(),
        }
    }

    /// Observed profiles in a fixed, deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentType, &TypeProfile)> {
        [
            (ContentType::TvShow, self.tv_show.as_ref()),
            (ContentType::Movie, self.movie.as_ref()),
        ]
        .into_iter()
        .filter_map(|(ct, profile)| profile.map(|p| (ct, p)))
    }

    fn slot(&mut self, content_type: ContentType) -> &mut TypeProfile {
        let slot = match content_type {
            ContentType::Movie => &mut self.movie,
            ContentType::TvShow => &mut self.tv_show,
        };
        slot.get_or_insert_with(TypeProfile::default)
    }
}

pub fn build_type_profiles(titles: &[Title]) -> TypeProfiles {
    let mut profiles = TypeProfiles::default();
    for title in titles {
        let (content_type, signal) = extract::type_signal(title);
        profiles.slot(content_type).absorb(signal);
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: &str, genres: &[&str], country: Option<&str>, rating: Option<&str>, year: Option<i32>) -> Title {
        Title {
            id: id.to_string(),
            content_type: ContentType::TvShow,
            genres: Some(genres.iter().map(|g| g.to_string()).collect()),
            countries: country.map(|c| vec![c.to_string()]),
            rating: rating.map(String::from),
            release_year: year,
            duration: None,
        }
    }

    #[test]
    fn multi_valued_fields_count_per_occurrence_not_per_record() {
        let titles = vec![
            show("s1", &["Drama"], None, None, None),
            show("s2", &["Drama", "Comedy"], None, None, None),
            show("s3", &["Comedy"], None, None, None),
        ];

        let aggregates = aggregate_catalog(&titles);
        assert_eq!(aggregates.genres.get(&"Drama".to_string()), 2);
        assert_eq!(aggregates.genres.get(&"Comedy".to_string()), 2);
        assert_eq!(aggregates.genres.total(), 4);
    }

    #[test]
    fn single_valued_dimension_conserves_present_records() {
        let titles = vec![
            show("s1", &[], None, Some("TV-MA"), None),
            show("s2", &[], None, Some("TV-14"), None),
            show("s3", &[], None, None, None),
        ];

        let aggregates = aggregate_catalog(&titles);
        // Sum of rating counts equals the number of records with a rating.
        assert_eq!(aggregates.ratings.total(), 2);
    }

    #[test]
    fn one_pass_aggregate_equals_per_dimension_collection() {
        let titles = vec![
            show("s1", &["Drama"], Some("India"), Some("TV-MA"), Some(2020)),
            show("s2", &["Comedy", "Drama"], Some("Japan"), None, Some(2021)),
        ];

        let aggregates = aggregate_catalog(&titles);
        let genres: FrequencyTable<String> = titles
            .iter()
            .flat_map(extract::genre_contributions)
            .collect();
        assert_eq!(aggregates.genres, genres);

        let ratings: FrequencyTable<String> = titles
            .iter()
            .filter_map(extract::rating_contribution)
            .collect();
        assert_eq!(aggregates.ratings, ratings);
    }

    #[test]
    fn partition_and_merge_matches_sequential_aggregation() {
        let titles = vec![
            show("s1", &["Drama"], Some("India"), Some("TV-MA"), Some(2020)),
            show("s2", &["Comedy", "Drama"], Some("Japan"), Some("TV-14"), Some(2021)),
            show("s3", &["Drama"], Some("India"), None, Some(2020)),
            show("s4", &["Horror"], None, Some("TV-MA"), None),
        ];

        for split in 0..=titles.len() {
            let (a, b) = titles.split_at(split);
            let mut merged = aggregate_catalog(a);
            merged.merge(&aggregate_catalog(b));
            assert_eq!(merged, aggregate_catalog(&titles), "split at {split}");
        }
    }

    #[test]
    fn profile_count_increments_per_record_not_per_contribution() {
        let titles = vec![
            show("s1", &["Drama", "Comedy", "Horror"], None, None, None),
            show("s2", &["Drama"], None, None, None),
        ];

        let profiles = build_type_profiles(&titles);
        let tv = profiles.get(ContentType::TvShow).unwrap();
        assert_eq!(tv.count, 2);
        assert_eq!(tv.genres.total(), 4);
    }

    #[test]
    fn unobserved_type_has_no_profile() {
        let titles = vec![show("s1", &["Drama"], None, None, None)];
        let profiles = build_type_profiles(&titles);
        assert!(profiles.get(ContentType::Movie).is_none());
        assert!(profiles.get(ContentType::TvShow).is_some());
        assert_eq!(profiles.iter().count(), 1);
    }

    #[test]
    fn profile_routes_sentinels_for_missing_fields() {
        let titles = vec![show("s1", &[], None, None, None)];
        let profiles = build_type_profiles(&titles);
        let tv = profiles.get(ContentType::TvShow).unwrap();
        assert_eq!(tv.countries.get(&"Unknown".to_string()), 1);
        assert_eq!(tv.ratings.get(&"Unknown".to_string()), 1);
        assert_eq!(tv.years.get(&0), 1);
    }
}
