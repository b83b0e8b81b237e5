use super::domain::{ActionRecord, EmployeeId, EmployeeRecord, RiskAssessment};

/// Persistence boundary for the cycle: employee roster upserts plus the two
/// append-only histories. Writes must be replay-safe since a cycle can be
/// re-run over the same roster (at-least-once delivery).
pub trait AttritionRepository: Send + Sync {
    fn upsert_employee(&self, record: &EmployeeRecord) -> Result<(), RepositoryError>;
    fn append_assessment(&self, assessment: RiskAssessment) -> Result<(), RepositoryError>;
    fn append_action(&self, action: ActionRecord) -> Result<(), RepositoryError>;
    fn assessments_for(&self, id: &EmployeeId) -> Result<Vec<RiskAssessment>, RepositoryError>;
    fn actions_for(&self, id: &EmployeeId) -> Result<Vec<ActionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
