//! The default governance sign-off chain.

use assure_types::ApprovalStep;

/// The standard role order for evidence-pack approval:
/// QA Lead → CISO → Compliance Officer → CIO.
///
/// Packs may be created with a custom chain; this is the default when the
/// caller supplies none.
pub fn standard_chain() -> Vec<ApprovalStep> {
    vec![
        ApprovalStep::new("QA Lead", "verify evaluation results and metric thresholds"),
        ApprovalStep::new("CISO", "review security and privacy evidence"),
        ApprovalStep::new("Compliance Officer", "confirm framework control coverage"),
        ApprovalStep::new("CIO", "authorize regulatory submission"),
    ]
}
