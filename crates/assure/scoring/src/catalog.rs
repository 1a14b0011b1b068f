//! Standard framework catalog.
//!
//! Category names and weights for the compliance standards commonly targeted
//! by AI-risk programs. Controls are attached per deployment via
//! [`crate::FrameworkRegistry::assign_control`]; the catalog only fixes the
//! category structure.

use assure_types::{Framework, FrameworkCategory};

/// The frameworks shipped with a fresh engine.
pub fn standard_frameworks() -> Vec<Framework> {
    vec![
        Framework::new(
            "NIST AI RMF",
            vec![
                FrameworkCategory::new("Govern", 0.25),
                FrameworkCategory::new("Map", 0.25),
                FrameworkCategory::new("Measure", 0.25),
                FrameworkCategory::new("Manage", 0.25),
            ],
        ),
        Framework::new(
            "EU AI Act",
            vec![
                FrameworkCategory::new("Risk Management", 0.30),
                FrameworkCategory::new("Data Governance", 0.20),
                FrameworkCategory::new("Transparency", 0.20),
                FrameworkCategory::new("Human Oversight", 0.15),
                FrameworkCategory::new("Robustness & Accuracy", 0.15),
            ],
        ),
        Framework::new(
            "ISO/IEC 42001",
            vec![
                FrameworkCategory::new("Context & Leadership", 0.25),
                FrameworkCategory::new("Planning", 0.25),
                FrameworkCategory::new("Operation", 0.25),
                FrameworkCategory::new("Performance Evaluation", 0.25),
            ],
        ),
    ]
}
