use anyhow::Context;
use catalog_insights::services::{aggregate, report, source, synthesis, trends};
use catalog_insights::{Config, ContentType, InsightError};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let dataset = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CATALOG_DATASET").ok())
        .context("usage: catalog-insights <dataset.jsonl> (or set CATALOG_DATASET)")?;

    info!(dataset = %dataset, "starting catalog analysis");
    let titles = source::load_titles(&dataset)?;

    let aggregates = aggregate::aggregate_catalog(&titles);
    let profiles = aggregate::build_type_profiles(&titles);

    let trend_report = trends::build_trend_report(&aggregates, &profiles, &config.trends);
    println!("{}", report::render_trends(&trend_report));

    let synthesizer = synthesis::Synthesizer::new(&config);
    for content_type in [ContentType::TvShow, ContentType::Movie] {
        match synthesizer.synthesize(content_type, &profiles, &titles) {
            Ok(candidate) => {
                println!("{}", report::render_candidate(&candidate, &profiles));
            }
            Err(
                err @ (InsightError::InsufficientData { .. } | InsightError::MissingProfile(_)),
            ) => {
                // Data sparsity is scoped to one content type; keep going.
                error!(content_type = %content_type, error = %err, "candidate not generated");
                println!("{}", report::render_failure(content_type, &err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
