// lookup.rs — Walks the dataset for a resolved food: food → mode → pan.
//
// Mode and pan names match exactly first, then by normalized form, and the
// canonical names are what the caller gets back.

use serde_json::{Map, Value};

use crate::config::{self, ModePolicy};
use crate::context::AppContext;
use crate::dataset::{Food, Mode, Pan};
use crate::error::LookupError;
use crate::matching::normalize::normalize;
use crate::matching::resolver::MatchStage;

#[derive(Debug, Clone, PartialEq)]
pub struct CookResult {
    pub query: String,
    pub food: String,
    pub matched_by: MatchStage,
    pub mode: Option<String>,
    pub pan: Option<String>,
    pub results: Value,
    /// Set when the fallback policy replaced an unknown mode.
    pub warning: Option<String>,
    pub requested_mode: Option<String>,
}

pub fn cook(ctx: &AppContext, food: &str, mode: Option<&str>, pan: Option<&str>) -> Result<CookResult, LookupError> {
    let mode = mode.map(str::trim).filter(|m| !m.is_empty());
    let pan = pan.map(str::trim).filter(|p| !p.is_empty());

    let resolution = ctx
        .matcher
        .resolve_or_suggest(food, config::matching::DEFAULT_SUGGEST_LIMIT)
        .map_err(|suggestions| LookupError::FoodNotResolved {
            query: food.to_string(),
            suggestions,
        })?;

    // The index only holds dataset keys, so this cannot miss unless the two drift apart.
    let Some(entry) = ctx.dataset.food(&resolution.canonical) else {
        return Err(LookupError::FoodNotResolved {
            query: food.to_string(),
            suggestions: vec![],
        });
    };

    let mut result = CookResult {
        query: food.to_string(),
        food: entry.name.clone(),
        matched_by: resolution.stage,
        mode: None,
        pan: None,
        results: Value::Object(Map::new()),
        warning: None,
        requested_mode: None,
    };

    let Some(requested_mode) = mode else {
        result.results = entry.to_json();
        return Ok(result);
    };

    let selected = match find_mode(entry, requested_mode) {
        Some(m) => m,
        None => match (ctx.mode_policy, entry.modes.first()) {
            (ModePolicy::FallbackFirst, Some(first)) => {
                log::info!(
                    "Mode {:?} not available for {:?}, falling back to {:?}",
                    requested_mode,
                    entry.name,
                    first.name
                );
                result.warning = Some(format!(
                    "Mode '{}' not available for '{}'; using '{}' instead",
                    requested_mode, entry.name, first.name
                ));
                result.requested_mode = Some(requested_mode.to_string());
                first
            }
            _ => {
                return Err(LookupError::ModeNotAvailable {
                    food: entry.name.clone(),
                    requested: requested_mode.to_string(),
                    available_modes: entry.mode_names(),
                })
            }
        },
    };
    result.mode = Some(selected.name.clone());

    let Some(requested_pan) = pan else {
        result.results = selected.to_json();
        return Ok(result);
    };

    let Some(chosen) = find_pan(selected, requested_pan) else {
        return Err(LookupError::ContainerNotAvailable {
            food: entry.name.clone(),
            mode: selected.name.clone(),
            requested: requested_pan.to_string(),
            available_pans: selected.pan_names(),
        });
    };

    let mut results = Map::with_capacity(1);
    results.insert(chosen.name.clone(), Value::Object(chosen.params.clone()));
    result.pan = Some(chosen.name.clone());
    result.results = Value::Object(results);
    Ok(result)
}

fn find_mode<'a>(food: &'a Food, requested: &str) -> Option<&'a Mode> {
    food.mode(requested).or_else(|| {
        let wanted = normalize(requested);
        food.modes.iter().find(|m| !wanted.is_empty() && normalize(&m.name) == wanted)
    })
}

fn find_pan<'a>(mode: &'a Mode, requested: &str) -> Option<&'a Pan> {
    mode.pan(requested).or_else(|| {
        let wanted = normalize(requested);
        mode.pans.iter().find(|p| !wanted.is_empty() && normalize(&p.name) == wanted)
    })
}
