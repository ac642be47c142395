use std::path::PathBuf;

use thiserror::Error;

/// Fatal: the process refuses to serve without a complete dataset.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset entry {path} must be {expected}")]
    Shape { path: String, expected: &'static str },
}

/// Recoverable lookup outcomes. Each one becomes a `found: false` body, never a transport error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("food {query:?} not found")]
    FoodNotResolved { query: String, suggestions: Vec<String> },

    #[error("mode {requested:?} not available for {food:?}")]
    ModeNotAvailable {
        food: String,
        requested: String,
        available_modes: Vec<String>,
    },

    #[error("pan {requested:?} not available for {food:?} / {mode:?}")]
    ContainerNotAvailable {
        food: String,
        mode: String,
        requested: String,
        available_pans: Vec<String>,
    },
}
