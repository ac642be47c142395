use std::collections::HashMap;

use crate::matching::normalize::normalize;

// Colloquial, English and Czech phrasings mapped to a hint substring of the manual's
// (Slovak) food names. A hint only needs to appear inside the normalized key.
// Intentionally compiled in rather than loaded from JSON.

fn cooking_synonyms() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        (
            "hranolky",
            &["fries", "french fries", "chips", "frytky", "hranolceky", "hranolčeky"],
        ),
        (
            "kuracie prsia",
            &["chicken breast", "chicken", "kura", "kuracie", "kuraci prsa", "kuřecí prsa"],
        ),
        ("stehn", &["chicken thighs", "chicken legs", "stehienka", "stehná", "drumsticks"]),
        ("losos", &["salmon", "lososik", "lososík", "losos filet"]),
        ("ryb", &["fish", "fish fillet", "rybka", "ryba"]),
        ("brokolic", &["broccoli", "brokoli", "brokolice"]),
        ("karfiol", &["cauliflower", "karfiól", "květák"]),
        ("mrkv", &["carrot", "carrots", "mrkvička", "mrkev"]),
        (
            "zemiak",
            &["potato", "potatoes", "zemiak", "krumple", "krumpli", "brambory", "grule"],
        ),
        ("batat", &["sweet potato", "sweet potatoes", "sladke zemiaky", "sladké zemiaky"]),
        ("ryz", &["rice", "ryža", "rýže"]),
        ("vajc", &["egg", "eggs", "vajce", "vajíčka", "vejce"]),
        ("muffin", &["muffins", "cupcake", "cupcakes", "mafiny"]),
        ("bravcov", &["pork", "pork chop", "pork chops", "kotleta", "kotlety", "bravčové"]),
        ("hovadz", &["beef", "steak", "hovädzie", "hovězí"]),
        ("krevet", &["shrimp", "shrimps", "prawns", "kreveta", "krevety"]),
        ("fazul", &["green beans", "beans", "fazuľka", "fazuľky", "fazolky"]),
        ("kukuric", &["corn", "sweet corn", "kukurica", "klas"]),
        ("knedl", &["dumplings", "knedla", "knedle", "knedlík"]),
        ("chlieb", &["bread", "chlebík", "chleba", "toast bread"]),
        ("pizz", &["pizza"]),
    ]
}

/// Normalized alias → normalized hint substring.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    map: HashMap<String, String>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::from_entries(cooking_synonyms())
    }

    /// Aliases and hints are normalized here; the first hint claiming an alias keeps it.
    pub fn from_entries<I, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, A)>,
        A: AsRef<[&'static str]>,
    {
        let mut map: HashMap<String, String> = HashMap::new();
        for (hint, aliases) in entries {
            let hint = normalize(hint);
            if hint.is_empty() {
                continue;
            }
            for alias in aliases.as_ref() {
                let key = normalize(alias);
                if !key.is_empty() && !map.contains_key(&key) {
                    map.insert(key, hint.clone());
                }
            }
        }
        Self { map }
    }

    pub fn hint(&self, normalized_alias: &str) -> Option<&str> {
        self.map.get(normalized_alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}
