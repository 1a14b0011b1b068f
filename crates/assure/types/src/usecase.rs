//! Use cases: declared business scenarios an AI application serves.

use crate::UseCaseId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Business criticality of a use case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
}

/// A declared business scenario the AI application serves.
///
/// Use cases are long-lived: risks attach to them over the life of the
/// program, and deleting one with dependent risks requires an explicit
/// cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UseCase {
    pub id: UseCaseId,
    pub title: String,
    pub description: String,
    pub criticality: Criticality,
    /// Provenance tag, e.g. "Business Workflow" or "Domain Expert".
    pub source: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a use case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewUseCase {
    pub title: String,
    pub description: String,
    pub criticality: Criticality,
    pub source: String,
    pub created_by: String,
}

/// Partial update for a use case. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UseCaseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub criticality: Option<Criticality>,
    pub source: Option<String>,
}

impl UseCase {
    pub fn create(input: NewUseCase) -> Self {
        let now = Utc::now();
        Self {
            id: UseCaseId::generate(),
            title: input.title,
            description: input.description,
            criticality: input.criticality,
            source: input.source,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, update: UseCaseUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(criticality) = update.criticality {
            self.criticality = criticality;
        }
        if let Some(source) = update.source {
            self.source = source;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewUseCase {
        NewUseCase {
            title: "Emergency Triage".into(),
            description: "LLM-assisted patient triage".into(),
            criticality: Criticality::High,
            source: "Business Workflow".into(),
            created_by: "alice".into(),
        }
    }

    #[test]
    fn create_sets_timestamps() {
        let uc = UseCase::create(sample());
        assert_eq!(uc.created_at, uc.updated_at);
        assert_eq!(uc.criticality, Criticality::High);
    }

    #[test]
    fn apply_bumps_updated_at() {
        let mut uc = UseCase::create(sample());
        let created = uc.created_at;
        uc.apply(UseCaseUpdate {
            title: Some("Triage v2".into()),
            ..Default::default()
        });
        assert_eq!(uc.title, "Triage v2");
        assert!(uc.updated_at >= created);
        // Untouched fields survive.
        assert_eq!(uc.source, "Business Workflow");
    }

    #[test]
    fn criticality_ordering() {
        assert!(Criticality::Low < Criticality::High);
    }
}
