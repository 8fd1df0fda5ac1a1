use crate::matching::outcome::MatchResult;
use crate::utils::validation::compact_model;

/// Merge the match results of one selection call.
///
/// Results naming the same catalog model collapse to the highest-scoring one, then
/// the list is sorted descending. The sort is stable, so equal scores keep
/// candidate order.
pub fn rank(results: Vec<MatchResult>) -> Vec<MatchResult> {
    let mut unique: Vec<(String, MatchResult)> = Vec::with_capacity(results.len());

    for result in results {
        let key = compact_model(&result.item.model);
        match unique.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                if result.score > existing.score {
                    *existing = result;
                }
            }
            None => unique.push((key, result)),
        }
    }

    let mut ranked: Vec<MatchResult> = unique.into_iter().map(|(_, r)| r).collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::CatalogItem;
    use crate::core::types::{CandidateKind, EquipmentKind, MatchType};
    use crate::matching::candidates::Candidate;

    fn result(model: &str, candidate: &str, score: f64, match_type: MatchType) -> MatchResult {
        MatchResult::new(
            &CatalogItem::new(model, EquipmentKind::StandbyPump),
            score,
            match_type,
            String::new(),
            &Candidate::new(candidate, score, CandidateKind::Primary, String::new()),
        )
    }

    #[test]
    fn test_duplicates_keep_best_score() {
        let ranked = rank(vec![
            result("2CY7.5/2.5D", "2CY-7.5/2.5", 95.0, MatchType::Fuzzy),
            result("2CY 7.5/2.5D", "2CY-7.5/2.5D", 100.0, MatchType::Fuzzy),
            result("2CY14.2/2.5D", "2CY-7.5/2.5D", 60.0, MatchType::Fuzzy),
        ]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate_model, "2CY-7.5/2.5D");
        assert!((ranked[0].score - 100.0).abs() < f64::EPSILON);
        assert_eq!(ranked[1].item.model, "2CY14.2/2.5D");
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let ranked = rank(vec![
            result("A", "A", 90.0, MatchType::Alternative),
            result("B", "B", 95.0, MatchType::Exact),
            result("C", "C", 90.0, MatchType::Alternative),
        ]);
        let models: Vec<&str> = ranked.iter().map(|r| r.item.model.as_str()).collect();
        assert_eq!(models, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
