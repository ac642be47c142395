use serde::Serialize;

use crate::config;
use crate::dataset::Dataset;
use crate::matching::index::FoodIndex;
use crate::matching::normalize::normalize;
use crate::matching::similarity::ratio;
use crate::matching::synonyms::SynonymTable;

/// Which pipeline stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStage {
    Exact,
    Synonym,
    Substring,
    Fuzzy,
}

impl MatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Synonym => "synonym",
            Self::Substring => "substring",
            Self::Fuzzy => "fuzzy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub canonical: String,
    pub stage: MatchStage,
    /// Only set for fuzzy matches.
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct FoodMatcher {
    index: FoodIndex,
    synonyms: SynonymTable,
}

impl FoodMatcher {
    pub fn new(index: FoodIndex, synonyms: SynonymTable) -> Self {
        Self { index, synonyms }
    }

    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::new(FoodIndex::build(dataset), SynonymTable::new())
    }

    pub fn index(&self) -> &FoodIndex {
        &self.index
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Map a free-form query to a canonical food name. Stages run from most to least
    /// precise and the first hit wins.
    ///
    /// Stages 3 and 4 take the first containing key in dataset declaration order, so a
    /// reordered dataset can change their answer.
    pub fn resolve(&self, query: &str) -> Option<Resolution> {
        let q = normalize(query);
        if q.is_empty() {
            return None;
        }
        self.resolve_precise(&q).or_else(|| self.pick_fuzzy(&q, &self.score_all(&q)))
    }

    /// Near misses for a query, best first (ties in index order), at most `limit`.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        let q = normalize(query);
        if q.is_empty() || limit == 0 {
            return Vec::new();
        }
        rank(self.score_all(&q), limit)
    }

    /// `resolve`, falling back to `suggest` on a miss. The index is scored once and the
    /// same scores feed both the fuzzy stage and the suggestions.
    pub fn resolve_or_suggest(&self, query: &str, limit: usize) -> Result<Resolution, Vec<String>> {
        let q = normalize(query);
        if q.is_empty() {
            return Err(Vec::new());
        }
        if let Some(resolution) = self.resolve_precise(&q) {
            return Ok(resolution);
        }

        let scores = self.score_all(&q);
        match self.pick_fuzzy(&q, &scores) {
            Some(resolution) => Ok(resolution),
            None if limit == 0 => Err(Vec::new()),
            None => Err(rank(scores, limit)),
        }
    }

    /// Exact, synonym and substring stages.
    fn resolve_precise(&self, q: &str) -> Option<Resolution> {
        if let Some(canonical) = self.index.get(q) {
            return Some(hit(canonical, MatchStage::Exact, None));
        }

        if let Some(hint) = self.synonyms.hint(q) {
            if let Some(canonical) = self.first_containing(hint) {
                return Some(hit(canonical, MatchStage::Synonym, None));
            }
            log::debug!("Synonym hint {:?} for {:?} matched no food", hint, q);
        }

        self.first_containing(q)
            .map(|canonical| hit(canonical, MatchStage::Substring, None))
    }

    fn first_containing(&self, needle: &str) -> Option<&str> {
        self.index
            .iter()
            .find(|(key, _)| key.contains(needle))
            .map(|(_, canonical)| canonical)
    }

    /// Similarity of `q` against every index key, in index order. Empty when `q` is
    /// over the length cap.
    fn score_all(&self, q: &str) -> Vec<(f64, &str)> {
        if q.chars().count() > config::matching::MAX_QUERY_CHARS {
            log::debug!("Query of {} chars is over the fuzzy length cap", q.chars().count());
            return Vec::new();
        }
        self.index
            .iter()
            .map(|(key, canonical)| (ratio(key, q), canonical))
            .collect()
    }

    fn pick_fuzzy(&self, q: &str, scores: &[(f64, &str)]) -> Option<Resolution> {
        let mut best: Option<(f64, &str)> = None;
        for &(score, canonical) in scores {
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, canonical));
            }
        }

        let (score, canonical) = best?;
        if score >= config::matching::RESOLVE_CUTOFF {
            return Some(hit(canonical, MatchStage::Fuzzy, Some(score)));
        }
        log::debug!("Best fuzzy candidate for {:?} is {:?} at {:.3}, below cutoff", q, canonical, score);
        None
    }
}

fn rank(scores: Vec<(f64, &str)>, limit: usize) -> Vec<String> {
    let mut kept: Vec<(f64, &str)> = scores
        .into_iter()
        .filter(|(score, _)| *score >= config::matching::SUGGEST_CUTOFF)
        .collect();

    // Stable sort keeps index order among equal scores.
    kept.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    kept.truncate(limit);
    kept.into_iter().map(|(_, canonical)| canonical.to_string()).collect()
}

fn hit(canonical: &str, stage: MatchStage, score: Option<f64>) -> Resolution {
    Resolution {
        canonical: canonical.to_string(),
        stage,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(names: &[&str]) -> FoodMatcher {
        FoodMatcher::new(FoodIndex::from_names(names.iter().copied()), SynonymTable::new())
    }

    fn manual() -> FoodMatcher {
        matcher(&[
            "Hranolky (mrazené)",
            "Kuracie prsia",
            "Kuracie stehná",
            "Losos filé",
            "Brokolica",
            "Ryža",
            "Zemiaky varené",
            "Sladké zemiaky",
        ])
    }

    fn resolved(m: &FoodMatcher, q: &str) -> Option<(String, MatchStage)> {
        m.resolve(q).map(|r| (r.canonical, r.stage))
    }

    #[test]
    fn test_every_key_resolves_to_itself_exactly() {
        let m = manual();
        for (_, canonical) in m.index().iter() {
            let r = m.resolve(canonical).unwrap();
            assert_eq!(r.canonical, canonical);
            assert_eq!(r.stage, MatchStage::Exact);
        }
    }

    #[test]
    fn test_case_and_accent_insensitive() {
        let m = manual();
        let expected = Some(("Ryža".to_string(), MatchStage::Exact));
        assert_eq!(resolved(&m, "ryza"), expected);
        assert_eq!(resolved(&m, "RYŽA"), expected);
        assert_eq!(resolved(&m, "  Ryža "), expected);
    }

    #[test]
    fn test_empty_query_is_not_found() {
        let m = manual();
        assert_eq!(m.resolve(""), None);
        assert_eq!(m.resolve("   "), None);
        assert_eq!(m.resolve("?!*"), None);
    }

    #[test]
    fn test_synonym_hint_picks_first_containing_key() {
        let m = manual();
        assert_eq!(
            resolved(&m, "French fries"),
            Some(("Hranolky (mrazené)".to_string(), MatchStage::Synonym))
        );
        assert_eq!(resolved(&m, "salmon"), Some(("Losos filé".to_string(), MatchStage::Synonym)));
        // "potatoes" hints "zemiak"; "zemiaky varene" precedes "sladke zemiaky".
        assert_eq!(
            resolved(&m, "potatoes"),
            Some(("Zemiaky varené".to_string(), MatchStage::Synonym))
        );
    }

    #[test]
    fn test_synonym_without_containing_key_falls_through() {
        // "beef" hints "hovadz", which no key contains; "beef" is also not a substring
        // and is far from every key.
        let m = manual();
        assert_eq!(m.resolve("beef"), None);

        // "kura" hints "kuracie prsia"; without that food the substring stage still
        // lands on the first key containing "kura".
        let m = matcher(&["Kuracie stehná", "Kuracie krídla"]);
        assert_eq!(
            resolved(&m, "kura"),
            Some(("Kuracie stehná".to_string(), MatchStage::Substring))
        );
    }

    #[test]
    fn test_substring_takes_first_in_declaration_order() {
        let m = manual();
        assert_eq!(
            resolved(&m, "kuracie"),
            Some(("Kuracie prsia".to_string(), MatchStage::Synonym))
        );
        assert_eq!(
            resolved(&m, "zemiaky"),
            Some(("Zemiaky varené".to_string(), MatchStage::Substring))
        );
        assert_eq!(resolved(&m, "filé"), Some(("Losos filé".to_string(), MatchStage::Substring)));
    }

    #[test]
    fn test_declaration_order_changes_substring_answer() {
        let a = matcher(&["Zemiaky varené", "Sladké zemiaky"]);
        let b = matcher(&["Sladké zemiaky", "Zemiaky varené"]);
        assert_eq!(a.resolve("zemiaky").unwrap().canonical, "Zemiaky varené");
        assert_eq!(b.resolve("zemiaky").unwrap().canonical, "Sladké zemiaky");
    }

    #[test]
    fn test_fuzzy_catches_typos() {
        let m = manual();
        let r = m.resolve("brokolca").unwrap();
        assert_eq!(r.canonical, "Brokolica");
        assert_eq!(r.stage, MatchStage::Fuzzy);
        assert!(r.score.unwrap() >= config::matching::RESOLVE_CUTOFF);
    }

    #[test]
    fn test_fuzzy_threshold_boundary() {
        let m = matcher(&["abcdefghixyz"]);
        // 18/25 == 0.72: accepted.
        let r = m.resolve("abcdefghiqrst").unwrap();
        assert_eq!(r.stage, MatchStage::Fuzzy);
        assert_eq!(r.score, Some(0.72));
        // 18/26 ≈ 0.69: rejected.
        assert_eq!(m.resolve("abcdefghiqrstu"), None);
    }

    #[test]
    fn test_fries_do_not_become_rice() {
        let m = FoodMatcher::new(FoodIndex::from_names(["rice"]), SynonymTable::default());
        assert_eq!(m.resolve("fries"), None);
    }

    #[test]
    fn test_fuzzy_tie_keeps_first_in_order() {
        let m = FoodMatcher::new(FoodIndex::from_names(["abcx", "abcy"]), SynonymTable::default());
        // Both score 2·3/8 = 0.75 against "abcz".
        assert_eq!(m.resolve("abcz").unwrap().canonical, "abcx");
    }

    #[test]
    fn test_suggest_orders_by_score_then_index_order() {
        let m = FoodMatcher::new(
            FoodIndex::from_names(["abcx", "losos", "abcy", "abcz1"]),
            SynonymTable::default(),
        );
        // abcx/abcy: 0.75, abcz1: 2·3/9 ≈ 0.667, losos: 0.
        assert_eq!(m.suggest("abcq", 8), vec!["abcx", "abcy", "abcz1"]);
        assert_eq!(m.suggest("abcq", 2), vec!["abcx", "abcy"]);
        assert!(m.suggest("abcq", 0).is_empty());
    }

    #[test]
    fn test_suggest_threshold_boundary() {
        let m = FoodMatcher::new(FoodIndex::from_names(["abcdefghijkmmmmmmmmm"]), SynonymTable::default());
        // 2·11/40 == 0.55: suggested.
        assert_eq!(m.suggest("abcdefghijknnnnnnnnn", 8), vec!["abcdefghijkmmmmmmmmm"]);
        // 2·10/40 == 0.50: dropped.
        assert!(m.suggest("abcdefghijnnnnnnnnnn", 8).is_empty());
    }

    #[test]
    fn test_overlong_query_is_not_fuzzy_scored() {
        let near = format!("{}yz", "x".repeat(120));
        let long_key = "x".repeat(130);
        let m = FoodMatcher::new(
            FoodIndex::from_names([near.as_str(), long_key.as_str()]),
            SynonymTable::default(),
        );

        let within = format!("{}zz", "x".repeat(120));
        assert!(within.chars().count() <= config::matching::MAX_QUERY_CHARS);
        assert_eq!(resolved(&m, &within), Some((near.clone(), MatchStage::Fuzzy)));

        let over = format!("{}{}", "x".repeat(120), "z".repeat(9));
        assert!(over.chars().count() > config::matching::MAX_QUERY_CHARS);
        assert_eq!(m.resolve(&over), None);
        assert!(m.suggest(&over, 8).is_empty());

        // Exact lookups are not length-limited.
        assert_eq!(resolved(&m, &long_key), Some((long_key.clone(), MatchStage::Exact)));
    }

    #[test]
    fn test_resolve_or_suggest_agrees_with_separate_calls() {
        let m = manual();
        for q in ["brokolca", "hranolkyy", "ryba", "kuracie", "French fries", "???", ""] {
            let expected = m.resolve(q).ok_or_else(|| m.suggest(q, 8));
            assert_eq!(m.resolve_or_suggest(q, 8), expected, "query {q:?}");
        }
        assert_eq!(m.resolve_or_suggest("hranolkyy", 0), Err(Vec::new()));
    }

    #[test]
    fn test_suggest_never_fails_on_odd_input() {
        let m = manual();
        for q in ["", "   ", "!!!", "日本語", "x", "a/b/c/d/e/f/g/h/i/j"] {
            assert!(m.suggest(q, 8).len() <= 8);
        }
        assert!(m.suggest("", 8).is_empty());
        assert!(m.suggest("???", 8).is_empty());
    }

    #[test]
    fn test_suggest_for_typo() {
        let m = manual();
        let s = m.suggest("kuracie prs", 8);
        assert_eq!(s.first().map(String::as_str), Some("Kuracie prsia"));
        assert!(s.contains(&"Kuracie stehná".to_string()));
    }

    #[test]
    fn test_scenario_ryba_has_no_match_and_no_suggestion() {
        let m = matcher(&["Kuracie prsia"]);
        assert_eq!(m.resolve("ryba"), None);
        assert!(!m.suggest("ryba", 8).contains(&"Kuracie prsia".to_string()));
    }
}
