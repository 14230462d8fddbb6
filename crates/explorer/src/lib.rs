//! End-to-end exploration of a MovieLens dataset.
//!
//! Ties the analysis stages, the rating chart and the IMDb fetch pool into
//! one run that produces an `ExplorationReport`.

pub mod chart;
pub mod config;
pub mod orchestrator;

pub use chart::render_distribution_chart;
pub use config::ExplorerConfig;
pub use orchestrator::{
    ExplorationReport, ExternalOutcome, ExternalSummary, MovieExplorer, TitleDistribution,
    TitleMean, TitleTags,
};
