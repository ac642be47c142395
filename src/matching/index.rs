use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::matching::normalize::normalize;

/// Normalized name → canonical dataset key, iterated in dataset declaration order.
#[derive(Debug, Clone, Default)]
pub struct FoodIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl FoodIndex {
    pub fn build(dataset: &Dataset) -> Self {
        Self::from_names(dataset.foods().iter().map(|f| f.name.as_str()))
    }

    /// Later names win on a normalized collision; the entry keeps its first position.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for canonical in names {
            let key = normalize(canonical);
            match index.positions.get(&key).copied() {
                Some(pos) => {
                    let previous = &mut index.entries[pos].1;
                    log::warn!(
                        "Normalized name collision on {:?}: {:?} replaces {:?}",
                        key,
                        canonical,
                        previous
                    );
                    *previous = canonical.to_string();
                }
                None => {
                    index.positions.insert(key.clone(), index.entries.len());
                    index.entries.push((key, canonical.to_string()));
                }
            }
        }
        index
    }

    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.positions.get(normalized).map(|&i| self.entries[i].1.as_str())
    }

    /// `(normalized, canonical)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
