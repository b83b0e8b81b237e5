use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::alerts::{AlertError, AlertNotifier};
use super::domain::{ActionRecord, EmployeeId, EmployeeRecord, RiskAction, RiskAssessment};
use super::repository::{AttritionRepository, RepositoryError};

/// In-memory repository backing the CLI, the HTTP surface, and tests.
#[derive(Default, Clone)]
pub struct InMemoryAttritionRepository {
    inner: Arc<Mutex<Store>>,
}

#[derive(Default)]
struct Store {
    employees: HashMap<String, EmployeeRecord>,
    assessments: Vec<RiskAssessment>,
    actions: Vec<ActionRecord>,
}

impl InMemoryAttritionRepository {
    pub fn employee_count(&self) -> usize {
        self.inner.lock().expect("repository mutex poisoned").employees.len()
    }

    pub fn assessment_count(&self) -> usize {
        self.inner
            .lock()
            .expect("repository mutex poisoned")
            .assessments
            .len()
    }

    pub fn action_count(&self) -> usize {
        self.inner.lock().expect("repository mutex poisoned").actions.len()
    }
}

impl AttritionRepository for InMemoryAttritionRepository {
    fn upsert_employee(&self, record: &EmployeeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        guard
            .employees
            .insert(record.employee_id.trim().to_string(), record.clone());
        Ok(())
    }

    fn append_assessment(&self, assessment: RiskAssessment) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        guard.assessments.push(assessment);
        Ok(())
    }

    fn append_action(&self, action: ActionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        guard.actions.push(action);
        Ok(())
    }

    fn assessments_for(&self, id: &EmployeeId) -> Result<Vec<RiskAssessment>, RepositoryError> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        Ok(guard
            .assessments
            .iter()
            .filter(|assessment| &assessment.employee_id == id)
            .cloned()
            .collect())
    }

    fn actions_for(&self, id: &EmployeeId) -> Result<Vec<ActionRecord>, RepositoryError> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        Ok(guard
            .actions
            .iter()
            .filter(|action| &action.employee_id == id)
            .cloned()
            .collect())
    }
}

/// Repository that refuses every write touching one scripted employee and
/// delegates the rest, for exercising skip-and-continue behavior.
#[derive(Clone)]
pub struct UnreliableAttritionRepository {
    inner: InMemoryAttritionRepository,
    failing_id: String,
    reason: String,
}

impl UnreliableAttritionRepository {
    pub fn failing_for(
        inner: InMemoryAttritionRepository,
        failing_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            failing_id: failing_id.into(),
            reason: reason.into(),
        }
    }

    fn check(&self, employee_id: &str) -> Result<(), RepositoryError> {
        if employee_id.trim() == self.failing_id {
            return Err(RepositoryError::Unavailable(self.reason.clone()));
        }
        Ok(())
    }
}

impl AttritionRepository for UnreliableAttritionRepository {
    fn upsert_employee(&self, record: &EmployeeRecord) -> Result<(), RepositoryError> {
        self.check(&record.employee_id)?;
        self.inner.upsert_employee(record)
    }

    fn append_assessment(&self, assessment: RiskAssessment) -> Result<(), RepositoryError> {
        self.check(&assessment.employee_id.0)?;
        self.inner.append_assessment(assessment)
    }

    fn append_action(&self, action: ActionRecord) -> Result<(), RepositoryError> {
        self.check(&action.employee_id.0)?;
        self.inner.append_action(action)
    }

    fn assessments_for(&self, id: &EmployeeId) -> Result<Vec<RiskAssessment>, RepositoryError> {
        self.inner.assessments_for(id)
    }

    fn actions_for(&self, id: &EmployeeId) -> Result<Vec<ActionRecord>, RepositoryError> {
        self.inner.actions_for(id)
    }
}

/// Captured notification, for asserting on dispatch behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedAlert {
    pub recipient: String,
    pub employee_name: String,
    pub risk_factors: String,
    pub action: RiskAction,
}

/// Notifier that records every request and answers from a scripted outcome.
#[derive(Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<CapturedAlert>>>,
    outcome: NotifierOutcome,
}

#[derive(Clone)]
enum NotifierOutcome {
    Deliver,
    Decline,
    Fail(String),
}

impl RecordingNotifier {
    pub fn delivering() -> Self {
        Self {
            sent: Arc::default(),
            outcome: NotifierOutcome::Deliver,
        }
    }

    /// Transport accepts the call but reports the alert as undelivered.
    pub fn declining() -> Self {
        Self {
            sent: Arc::default(),
            outcome: NotifierOutcome::Decline,
        }
    }

    /// Transport errors outright on every call.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            outcome: NotifierOutcome::Fail(reason.into()),
        }
    }

    pub fn sent(&self) -> Vec<CapturedAlert> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl AlertNotifier for RecordingNotifier {
    fn notify(
        &self,
        recipient: &str,
        employee_name: &str,
        risk_factors: &str,
        action: RiskAction,
    ) -> Result<bool, AlertError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(CapturedAlert {
                recipient: recipient.to_string(),
                employee_name: employee_name.to_string(),
                risk_factors: risk_factors.to_string(),
                action,
            });

        match &self.outcome {
            NotifierOutcome::Deliver => Ok(true),
            NotifierOutcome::Decline => Ok(false),
            NotifierOutcome::Fail(reason) => Err(AlertError::Transport(reason.clone())),
        }
    }
}
