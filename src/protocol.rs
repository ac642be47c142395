use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::context::AppContext;
use crate::error::LookupError;
use crate::lookup::CookResult;
use crate::matching::normalize::normalize;
use crate::matching::resolver::MatchStage;

#[derive(Debug, Serialize)]
pub struct CookFound {
    pub found: bool,
    pub query: String,
    pub food: String,
    pub matched_by: MatchStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    pub results: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_mode: Option<String>,
}

impl From<CookResult> for CookFound {
    fn from(r: CookResult) -> Self {
        Self {
            found: true,
            query: r.query,
            food: r.food,
            matched_by: r.matched_by,
            mode: r.mode,
            pan: r.pan,
            results: r.results,
            warning: r.warning,
            requested_mode: r.requested_mode,
        }
    }
}

/// `found: false` body. Which optional fields are present depends on what failed.
#[derive(Debug, Default, Serialize)]
pub struct NotFound {
    pub found: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_pans: Option<Vec<String>>,
}

impl NotFound {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

impl From<LookupError> for NotFound {
    fn from(err: LookupError) -> Self {
        let message = match &err {
            LookupError::FoodNotResolved { .. } => "Food not found".to_string(),
            LookupError::ModeNotAvailable { .. } => "Mode not found for this food".to_string(),
            LookupError::ContainerNotAvailable { .. } => "Pan not found for this food/mode".to_string(),
        };
        match err {
            LookupError::FoodNotResolved { query, suggestions } => Self {
                message,
                query: Some(query),
                suggestions: Some(suggestions),
                ..Self::default()
            },
            LookupError::ModeNotAvailable {
                food,
                requested,
                available_modes,
            } => Self {
                message,
                food: Some(food),
                requested: Some(requested),
                available_modes: Some(available_modes),
                ..Self::default()
            },
            LookupError::ContainerNotAvailable {
                food,
                mode,
                requested,
                available_pans,
            } => Self {
                message,
                food: Some(food),
                mode: Some(mode),
                requested: Some(requested),
                available_pans: Some(available_pans),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub foods: usize,
    pub dataset_sha256: String,
    pub mode_policy: &'static str,
    pub started_at: String,
}

#[derive(Debug, Serialize)]
pub struct Suggestions {
    pub query: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub found: bool,
    pub query: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<MatchStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ResolveReport {
    /// Pipeline diagnostics for one query; shared by `/resolve` and `--resolve`.
    pub fn build(ctx: &AppContext, query: &str, with_suggestions: bool) -> Self {
        let resolution = ctx.matcher.resolve(query);
        let found = resolution.is_some();
        let (food, matched_by, score) = match resolution {
            Some(r) => (Some(r.canonical), Some(r.stage), r.score),
            None => (None, None, None),
        };
        let suggestions =
            with_suggestions.then(|| ctx.matcher.suggest(query, config::matching::DEFAULT_SUGGEST_LIMIT));
        Self {
            found,
            query: query.to_string(),
            normalized: normalize(query),
            food,
            matched_by,
            score,
            suggestions,
        }
    }
}
