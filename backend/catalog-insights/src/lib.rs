pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{InsightError, Result};
pub use models::{ContentType, FrequencyTable, RankedEntry, SynthesizedTitle, Title};
pub use services::{Synthesizer, TypeProfiles};
