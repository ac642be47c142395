// dataset.rs — Typed, read-only view of the cooking manual extract.
//
// Source shape: { food: { mode: { pan: { ...opaque parameters... } } } }
// Declaration order is kept at every level (serde_json is built with preserve_order).

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::DatasetLoadError;

/// Opaque attribute map (time, temperature, ...) passed through verbatim.
pub type CookingParameters = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct Pan {
    pub name: String,
    pub params: CookingParameters,
}

#[derive(Debug, Clone)]
pub struct Mode {
    pub name: String,
    pub pans: Vec<Pan>,
}

impl Mode {
    pub fn pan(&self, name: &str) -> Option<&Pan> {
        self.pans.iter().find(|p| p.name == name)
    }

    pub fn pan_names(&self) -> Vec<String> {
        self.pans.iter().map(|p| p.name.clone()).collect()
    }

    /// `{pan: params, ...}` in declaration order.
    pub fn to_json(&self) -> Value {
        let mut out = Map::with_capacity(self.pans.len());
        for pan in &self.pans {
            out.insert(pan.name.clone(), Value::Object(pan.params.clone()));
        }
        Value::Object(out)
    }
}

#[derive(Debug, Clone)]
pub struct Food {
    pub name: String,
    pub modes: Vec<Mode>,
}

impl Food {
    pub fn mode(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    pub fn mode_names(&self) -> Vec<String> {
        self.modes.iter().map(|m| m.name.clone()).collect()
    }

    /// `{mode: {pan: params}}` in declaration order.
    pub fn to_json(&self) -> Value {
        let mut out = Map::with_capacity(self.modes.len());
        for mode in &self.modes {
            out.insert(mode.name.clone(), mode.to_json());
        }
        Value::Object(out)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    foods: Vec<Food>,
    by_name: HashMap<String, usize>,
    fingerprint: String,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetLoadError> {
        let bytes = std::fs::read(path).map_err(|source| DatasetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root: Value = serde_json::from_slice(&bytes).map_err(|source| DatasetLoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_document(root, hex::encode(Sha256::digest(&bytes)))?;
        log::info!(
            "Loaded dataset {}: {} foods (sha256 {})",
            path.display(),
            dataset.len(),
            dataset.fingerprint
        );
        Ok(dataset)
    }

    /// Validate and convert an already-parsed document. The fingerprint is computed
    /// over its compact serialization.
    pub fn from_value(root: Value) -> Result<Self, DatasetLoadError> {
        let fingerprint = hex::encode(Sha256::digest(root.to_string()));
        Self::from_document(root, fingerprint)
    }

    fn from_document(root: Value, fingerprint: String) -> Result<Self, DatasetLoadError> {
        let root = as_object(root, "$", "an object of foods")?;

        let mut foods = Vec::with_capacity(root.len());
        for (food_name, modes_v) in root {
            let food_path = format!("$[{food_name:?}]");
            let modes_obj = as_object(modes_v, &food_path, "an object of modes")?;

            let mut modes = Vec::with_capacity(modes_obj.len());
            for (mode_name, pans_v) in modes_obj {
                let mode_path = format!("{food_path}[{mode_name:?}]");
                let pans_obj = as_object(pans_v, &mode_path, "an object of pans")?;

                let mut pans = Vec::with_capacity(pans_obj.len());
                for (pan_name, params_v) in pans_obj {
                    let pan_path = format!("{mode_path}[{pan_name:?}]");
                    let params = as_object(params_v, &pan_path, "an object of cooking parameters")?;
                    pans.push(Pan { name: pan_name, params });
                }
                modes.push(Mode { name: mode_name, pans });
            }
            foods.push(Food { name: food_name, modes });
        }

        let by_name = foods.iter().enumerate().map(|(i, f)| (f.name.clone(), i)).collect();

        Ok(Self {
            foods,
            by_name,
            fingerprint,
        })
    }

    pub fn food(&self, name: &str) -> Option<&Food> {
        self.by_name.get(name).map(|&i| &self.foods[i])
    }

    /// Foods in declaration order.
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Canonical names sorted by code point.
    pub fn names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.foods.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Lowercase hex SHA-256 of the source bytes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn as_object(v: Value, path: &str, expected: &'static str) -> Result<Map<String, Value>, DatasetLoadError> {
    match v {
        Value::Object(m) => Ok(m),
        _ => Err(DatasetLoadError::Shape {
            path: path.to_string(),
            expected,
        }),
    }
}
