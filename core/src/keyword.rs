use crate::error::SearchError;
use crate::interact::Confirm;
use crate::model::{Dataset, Grouped, KeywordHit};
use strsim::normalized_levenshtein;

/// Keyword vocabulary and substring search over one dataset snapshot.
pub struct KeywordIndex<'a> {
    dataset: &'a Dataset,
    vocabulary: Vec<String>,
}

impl<'a> KeywordIndex<'a> {
    /// Collect every distinct tag, in first-seen order. Case is kept as-is.
    pub fn build(dataset: &'a Dataset) -> Self {
        let mut vocabulary: Vec<String> = Vec::new();
        for record in dataset.stalls() {
            for tag in record.tags() {
                if !vocabulary.iter().any(|known| known == tag) {
                    vocabulary.push(tag.to_string());
                }
            }
        }
        tracing::debug!(terms = vocabulary.len(), "keyword vocabulary built");
        Self { dataset, vocabulary }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Case-insensitive containment in either direction between the term
    /// and a stall's whole keyword string.
    pub fn search(&self, term: &str) -> Grouped<KeywordHit> {
        let term = term.to_lowercase();
        let hits = self.dataset.stalls().iter().filter_map(|record| {
            let keywords = record.keywords.to_lowercase();
            if keywords.contains(&term) || term.contains(&keywords) {
                let hit = KeywordHit { stall: record.stall.clone(), keywords: record.keywords.clone() };
                Some((record.canteen.clone(), hit))
            } else {
                None
            }
        });
        let results = Grouped::from_hits(hits);
        tracing::info!(term = %term, hits = results.total(), "keyword search");
        results
    }

    /// Closest vocabulary entry whose similarity to `term` reaches `threshold`.
    /// Ties go to the entry seen first.
    pub fn suggest(&self, term: &str, threshold: f64) -> Option<&str> {
        let term = term.to_lowercase();
        let mut best: Option<(&str, f64)> = None;
        for candidate in &self.vocabulary {
            let score = normalized_levenshtein(&term, &candidate.to_lowercase());
            tracing::trace!(candidate = %candidate, score, "suggestion score");
            if score < threshold {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate.as_str(), score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    /// Search, and on a miss offer the closest vocabulary entry through
    /// `confirm`, retrying with it when accepted. At most `max_rounds`
    /// suggestions are followed and none is offered twice.
    pub fn search_with_suggestions<C>(
        &self,
        term: &str,
        threshold: f64,
        max_rounds: usize,
        confirm: &mut C,
    ) -> Result<KeywordMatch, SearchError>
    where
        C: Confirm + ?Sized,
    {
        let mut tried: Vec<String> = vec![term.to_lowercase()];
        let mut current = term.to_string();
        loop {
            let results = self.search(&current);
            if !results.is_empty() {
                return Ok(KeywordMatch { term: current.to_lowercase(), results });
            }

            let miss = current.to_lowercase();
            let suggestion = match self.suggest(&current, threshold) {
                Some(s) if tried.len() <= max_rounds && !tried.contains(&s.to_lowercase()) => s,
                _ => return Err(SearchError::NoKeywordMatch { term: miss }),
            };

            let question = format!(
                "No food stall(s) found with input keyword '{}'. Did you mean '{}' instead?",
                miss,
                suggestion.to_lowercase()
            );
            if !confirm.confirm(&question) {
                return Err(SearchError::SuggestionDeclined { term: miss, suggestion: suggestion.to_string() });
            }
            tracing::debug!(from = %miss, to = %suggestion, "following keyword suggestion");
            tried.push(suggestion.to_lowercase());
            current = suggestion.to_string();
        }
    }
}

/// A successful keyword search, together with the term that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub term: String,
    pub results: Grouped<KeywordHit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CanteenLocation, Point, StallRecord};

    fn dataset() -> Dataset {
        let stalls = vec![
            StallRecord { canteen: "Canteen 2".into(), stall: "Wok Hey".into(), keywords: "Halal, Chinese".into(), price: 5.0 },
            StallRecord { canteen: "Canteen 1".into(), stall: "Grill Bar".into(), keywords: "Western".into(), price: 7.5 },
            StallRecord { canteen: "Canteen 1".into(), stall: "Dim Sum".into(), keywords: "Chinese".into(), price: 4.0 },
        ];
        let locations = vec![
            CanteenLocation { canteen: "Canteen 1".into(), point: Point::new(10, 10) },
            CanteenLocation { canteen: "Canteen 2".into(), point: Point::new(20, 20) },
        ];
        Dataset::new(stalls, locations).unwrap()
    }

    #[test]
    fn vocabulary_is_deduplicated_in_first_seen_order() {
        let data = dataset();
        let index = KeywordIndex::build(&data);
        assert_eq!(index.vocabulary(), &["Halal", "Chinese", "Western"]);
    }

    #[test]
    fn declined_suggestion_is_reported() {
        let data = dataset();
        let index = KeywordIndex::build(&data);
        let err = index
            .search_with_suggestions("westrn", 0.5, 3, &mut |_: &str| false)
            .unwrap_err();
        assert_eq!(err, SearchError::SuggestionDeclined { term: "westrn".into(), suggestion: "Western".into() });
    }
}
