//! The suggestion scorer.

use crate::tokenize::tokenize;
use assure_types::{MetricDefinition, Risk};
use serde::{Deserialize, Serialize};

/// One ranked metric candidate for a risk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suggestion {
    pub metric: MetricDefinition,
    /// Containment score in (0, 1]: matched tags over the metric's tags.
    pub score: f64,
}

/// Rank library metrics against a risk's description.
///
/// Score = |risk tokens ∩ metric tags| / |metric tags| — containment rather
/// than full Jaccard, so a long risk description does not dilute a metric
/// whose tags it fully covers. Only positive scores are returned, sorted
/// descending; ties keep library insertion order (stable sort). Calling this
/// twice with unchanged inputs yields an identical ordered list.
pub fn suggest(risk: &Risk, library: &[MetricDefinition]) -> Vec<Suggestion> {
    let risk_tokens = tokenize(&risk.description);

    let mut candidates: Vec<Suggestion> = library
        .iter()
        .filter(|m| !m.applicable_risk_tags.is_empty())
        .filter_map(|metric| {
            let matched = metric
                .applicable_risk_tags
                .iter()
                .filter(|tag| risk_tokens.contains(*tag))
                .count();
            if matched == 0 {
                return None;
            }
            Some(Suggestion {
                metric: metric.clone(),
                score: matched as f64 / metric.applicable_risk_tags.len() as f64,
            })
        })
        .collect();

    // sort_by is stable: equal scores keep library order.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).expect("finite scores"));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use assure_types::{Likelihood, MetricCategory, NewRisk, Severity, UseCaseId};
    use std::collections::BTreeSet;

    fn risk(description: &str) -> Risk {
        Risk::create(
            UseCaseId::new("uc-1"),
            NewRisk {
                description: description.into(),
                severity: Severity::High,
                likelihood: Likelihood::Occasional,
                compliance_mapping: BTreeSet::new(),
                evidence_required: String::new(),
                created_by: "t".into(),
            },
        )
    }

    fn library() -> Vec<MetricDefinition> {
        vec![
            MetricDefinition::new(
                "Faithfulness Score",
                MetricCategory::Accuracy,
                ["hallucination", "faithfulness"],
                0.8,
                "fact-check",
            ),
            MetricDefinition::new(
                "Demographic Parity",
                MetricCategory::Fairness,
                ["bias", "demographic"],
                0.9,
                "group comparison",
            ),
            MetricDefinition::new(
                "Hallucination Rate",
                MetricCategory::Accuracy,
                ["hallucination"],
                0.05,
                "sampled review",
            ),
        ]
    }

    #[test]
    fn containment_beats_partial_match() {
        let suggestions = suggest(&risk("Hallucination in generated summaries"), &library());
        // "Hallucination Rate" matches 1/1 tags, "Faithfulness Score" 1/2.
        assert_eq!(suggestions[0].metric.name, "Hallucination Rate");
        assert_eq!(suggestions[0].score, 1.0);
        assert_eq!(suggestions[1].metric.name, "Faithfulness Score");
        assert_eq!(suggestions[1].score, 0.5);
    }

    #[test]
    fn unrelated_metrics_excluded() {
        let suggestions = suggest(&risk("Hallucination in summaries"), &library());
        assert!(suggestions.iter().all(|s| s.metric.name != "Demographic Parity"));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let suggestions = suggest(&risk("latency spikes under load"), &library());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn long_description_does_not_dilute_score() {
        let long = "hallucination observed when the model summarizes long intake \
                    conversations across multiple departments and languages";
        let suggestions = suggest(&risk(long), &library());
        assert_eq!(suggestions[0].score, 1.0);
    }

    #[test]
    fn ties_keep_library_order() {
        let lib = vec![
            MetricDefinition::new("First", MetricCategory::Custom, ["bias"], 0.5, "m"),
            MetricDefinition::new("Second", MetricCategory::Custom, ["bias"], 0.5, "m"),
        ];
        let suggestions = suggest(&risk("bias in outcomes"), &lib);
        assert_eq!(suggestions[0].metric.name, "First");
        assert_eq!(suggestions[1].metric.name, "Second");
    }

    #[test]
    fn deterministic_across_calls() {
        let r = risk("hallucination and bias in triage output");
        let lib = library();
        let a: Vec<String> = suggest(&r, &lib).iter().map(|s| s.metric.name.clone()).collect();
        let b: Vec<String> = suggest(&r, &lib).iter().map(|s| s.metric.name.clone()).collect();
        assert_eq!(a, b);
    }
}
