use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::config::{ModePolicy, Settings};
use crate::dataset::Dataset;
use crate::matching::resolver::FoodMatcher;

/// Everything a request needs, built once before serving and never mutated.
#[derive(Debug)]
pub struct AppContext {
    pub dataset: Dataset,
    pub matcher: FoodMatcher,
    pub mode_policy: ModePolicy,
    pub started_at: DateTime<Utc>,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    pub fn new(dataset: Dataset, mode_policy: ModePolicy) -> Self {
        let matcher = FoodMatcher::for_dataset(&dataset);
        log::info!(
            "Food index ready: {} names, {} synonym aliases",
            matcher.index().len(),
            matcher.synonyms().len()
        );
        Self {
            dataset,
            matcher,
            mode_policy,
            started_at: Utc::now(),
        }
    }

    /// Fail-fast startup load: a missing or malformed dataset aborts the process.
    pub fn load(settings: &Settings) -> anyhow::Result<Self> {
        let dataset = Dataset::load(&settings.db_path)
            .with_context(|| format!("failed to load dataset from {}", settings.db_path.display()))?;
        if dataset.is_empty() {
            log::warn!("Dataset {} contains no foods", settings.db_path.display());
        }
        Ok(Self::new(dataset, settings.mode_policy))
    }
}
