pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, HarvestConfig};

pub use crate::core::{
    engine::{HarvestEngine, RunSummary},
    fetcher::HttpFetcher,
    harvest::{HarvestCoordinator, HarvestSettings},
    matcher::KeywordMatcher,
    pipeline::HarvestPipeline,
};
pub use domain::model::{HarvestReport, Listing, SourceEntry, SourceWarning};
pub use utils::error::{FetchError, HarvestError, Result};
