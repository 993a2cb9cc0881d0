pub mod aggregate;
pub mod extract;
pub mod report;
pub mod source;
pub mod synthesis;
pub mod trends;

pub use aggregate::{CatalogAggregates, TypeProfile, TypeProfiles};
pub use synthesis::{SynthesisOutcome, Synthesizer};
pub use trends::TrendReport;
