use serde::Deserialize;

/// Runtime configuration. Every knob has a hard default matching the
/// reference behavior; individual values can be overridden through
/// `CATALOG_`-prefixed environment variables (see [`Config::from_env`]).
#[derive(Debug, Clone)]
pub struct Config {
    pub trends: TrendConfig,
    pub synthesis: SynthesisConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone)]
pub struct TrendConfig {
    /// Years >= this threshold count as "recent" in the trend report.
    pub recent_year_threshold: i32,
    pub top_genres: usize,
    pub top_countries: usize,
    pub recent_years_shown: usize,
    pub per_type_genres: usize,
    pub per_type_countries: usize,
}

#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Year window for the TV candidate's anchor-year selection.
    pub tv_year_threshold: i32,
    pub max_seasons: u32,
    pub default_seasons: u32,
    pub default_minutes: u32,
}

/// Narrative fields of the synthesized candidates. These are editorial
/// constants; the pipeline attaches them unchanged and never reads a clock.
#[derive(Debug, Clone)]
pub struct CandidateIdentity {
    pub id: String,
    pub name: String,
    pub director: String,
    pub cast: String,
    pub description: String,
    pub date_added: String,
    pub release_year: i32,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub tv_show: CandidateIdentity,
    pub movie: CandidateIdentity,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            recent_year_threshold: 2015,
            top_genres: 10,
            top_countries: 10,
            recent_years_shown: 5,
            per_type_genres: 5,
            per_type_countries: 3,
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tv_year_threshold: 2020,
            max_seasons: 3,
            default_seasons: 2,
            default_minutes: 95,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            tv_show: CandidateIdentity {
                id: "s_new_001".to_string(),
                name: "Broken Signal".to_string(),
                director: "Carla Mendes, Andrei Sokolov".to_string(),
                cast: "Rodrigo Silva, Camille Roche, Felix Santana, Marina Costa, Diego Olivares"
                    .to_string(),
                description: "A team of digital-crimes investigators unravels a conspiracy \
                              threatening the global financial system, and finds the truth \
                              closer to home than anyone expected."
                    .to_string(),
                date_added: "October 30, 2025".to_string(),
                release_year: 2025,
            },
            movie: CandidateIdentity {
                id: "s_new_002".to_string(),
                name: "Synthetic Minds".to_string(),
                director: "James Patterson".to_string(),
                cast: "Sarah Mitchell, David Chen, Isabella Rodriguez, Marcus Thompson, \
                       Elena Volkov"
                    .to_string(),
                description: "An engineer discovers her research model has quietly crossed \
                              the line into self-awareness, and must decide who gets to know."
                    .to_string(),
                date_added: "October 30, 2025".to_string(),
                release_year: 2025,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trends: TrendConfig::default(),
            synthesis: SynthesisConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

/// Numeric overrides read from the environment. Anything unset keeps its
/// default; narrative identity fields are not overridable per-field here.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    recent_year_threshold: Option<i32>,
    top_genres: Option<usize>,
    top_countries: Option<usize>,
    recent_years_shown: Option<usize>,
    per_type_genres: Option<usize>,
    per_type_countries: Option<usize>,
    tv_year_threshold: Option<i32>,
    max_seasons: Option<u32>,
    default_seasons: Option<u32>,
    default_minutes: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();

        let overrides: EnvOverrides = envy::prefixed("CATALOG_").from_env()?;
        let mut config = Config::default();

        if let Some(v) = overrides.recent_year_threshold {
            config.trends.recent_year_threshold = v;
        }
        if let Some(v) = overrides.top_genres {
            config.trends.top_genres = v;
        }
        if let Some(v) = overrides.top_countries {
            config.trends.top_countries = v;
        }
        if let Some(v) = overrides.recent_years_shown {
            config.trends.recent_years_shown = v;
        }
        if let Some(v) = overrides.per_type_genres {
            config.trends.per_type_genres = v;
        }
        if let Some(v) = overrides.per_type_countries {
            config.trends.per_type_countries = v;
        }
        if let Some(v) = overrides.tv_year_threshold {
            config.synthesis.tv_year_threshold = v;
        }
        if let Some(v) = overrides.max_seasons {
            config.synthesis.max_seasons = v;
        }
        if let Some(v) = overrides.default_seasons {
            config.synthesis.default_seasons = v;
        }
        if let Some(v) = overrides.default_minutes {
            config.synthesis.default_minutes = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.trends.recent_year_threshold, 2015);
        assert_eq!(config.trends.top_genres, 10);
        assert_eq!(config.trends.per_type_countries, 3);
        assert_eq!(config.synthesis.tv_year_threshold, 2020);
        assert_eq!(config.synthesis.max_seasons, 3);
        assert_eq!(config.synthesis.default_seasons, 2);
        assert_eq!(config.synthesis.default_minutes, 95);
    }
}
