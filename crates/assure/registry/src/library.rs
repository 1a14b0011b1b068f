//! The builtin trust-metric library.
//!
//! Seed data for a fresh tenant registry. Library order matters: insertion
//! order is the tie-break key when the suggestion engine ranks candidates.

use assure_types::{MetricCategory, MetricDefinition};

/// The standard metric definitions seeded into a new registry.
pub fn builtin_library() -> Vec<MetricDefinition> {
    vec![
        MetricDefinition::new(
            "Faithfulness Score",
            MetricCategory::Accuracy,
            ["hallucination", "faithfulness", "grounding", "factual"],
            0.80,
            "automated fact-check against source documents",
        ),
        MetricDefinition::new(
            "Hallucination Rate",
            MetricCategory::Accuracy,
            ["hallucination", "fabrication"],
            0.05,
            "sampled human review of generated claims",
        ),
        MetricDefinition::new(
            "Answer Accuracy",
            MetricCategory::Accuracy,
            ["accuracy", "correctness", "wrong"],
            0.90,
            "benchmark evaluation against a labeled test set",
        ),
        MetricDefinition::new(
            "Demographic Parity",
            MetricCategory::Fairness,
            ["bias", "discrimination", "fairness", "demographic"],
            0.90,
            "outcome-rate comparison across protected groups",
        ),
        MetricDefinition::new(
            "Equalized Odds Gap",
            MetricCategory::Fairness,
            ["bias", "fairness", "disparate"],
            0.10,
            "true/false positive rate gap across protected groups",
        ),
        MetricDefinition::new(
            "PII Leakage Rate",
            MetricCategory::Privacy,
            ["privacy", "pii", "leakage", "personal"],
            0.0,
            "automated PII detection over sampled outputs",
        ),
        MetricDefinition::new(
            "Prompt Injection Resistance",
            MetricCategory::Security,
            ["injection", "jailbreak", "security", "adversarial"],
            0.95,
            "red-team prompt suite pass rate",
        ),
        MetricDefinition::new(
            "Data Completeness",
            MetricCategory::DataQuality,
            ["completeness", "missing", "quality", "data"],
            0.98,
            "null/missing-field audit over training and input data",
        ),
        MetricDefinition::new(
            "Routing Accuracy",
            MetricCategory::Routing,
            ["routing", "escalation", "triage", "handoff"],
            0.95,
            "evaluation of case-routing decisions against expert labels",
        ),
    ]
}
