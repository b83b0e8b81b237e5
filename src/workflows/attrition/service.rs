use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use super::alerts::AlertNotifier;
use super::domain::{
    ActionRecord, ActionStatus, EmployeeId, EmployeeRecord, RiskAction, RiskAssessment,
};
use super::enrichment::{enrich, EnrichmentError};
use super::repository::{AttritionRepository, RepositoryError};
use super::scoring::RiskEngine;

/// Cycle orchestrator: one pass over the roster, producing one assessment and
/// one action record per employee and dispatching to the collaborators.
///
/// A bad record or a failing collaborator call never aborts the run; it is
/// logged, surfaced in the summary, and the cycle moves on.
pub struct AttritionCycleService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: RiskEngine,
}

impl<R, N> AttritionCycleService<R, N>
where
    R: AttritionRepository + 'static,
    N: AlertNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, engine: RiskEngine) -> Self {
        Self {
            repository,
            notifier,
            engine,
        }
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Run one full assessment cycle over `records` as of `today`.
    pub fn run_cycle(&self, records: &[EmployeeRecord], today: NaiveDate) -> CycleSummary {
        info!(roster = records.len(), %today, "attrition cycle started");
        let mut summary = CycleSummary::default();

        for record in records {
            match self.process_employee(record, today) {
                Ok(outcome) => {
                    summary.processed += 1;
                    match outcome.status {
                        ActionStatus::Sent => summary.alerts_sent += 1,
                        ActionStatus::Scheduled => summary.check_ins_scheduled += 1,
                        ActionStatus::Monitored => summary.monitored += 1,
                        ActionStatus::Failed => summary.failed_notifications += 1,
                    }
                    summary.outcomes.push(outcome);
                }
                Err(CycleStepError::Enrichment(err)) => {
                    warn!(employee = %record.employee_id, %err, "skipping record");
                    summary.skipped += 1;
                }
                Err(CycleStepError::Repository(err)) => {
                    error!(employee = %record.employee_id, %err, "persistence failed, skipping record");
                    summary.skipped += 1;
                    summary.persistence_failures += 1;
                }
            }
        }

        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            alerts_sent = summary.alerts_sent,
            failed_notifications = summary.failed_notifications,
            "attrition cycle finished"
        );
        summary
    }

    fn process_employee(
        &self,
        record: &EmployeeRecord,
        today: NaiveDate,
    ) -> Result<CycleOutcome, CycleStepError> {
        let enriched = enrich(record, today)?;
        let assessment = self.engine.assess(&enriched, today);

        info!(
            employee = %assessment.employee_id,
            name = %record.name,
            score = assessment.score,
            action = assessment.action.label(),
            factors = %assessment.factors_text(),
            "assessed"
        );

        // Assessment must be durable before the action fires; action logging
        // for the same employee stays ordered behind it.
        self.repository.upsert_employee(record)?;
        self.repository.append_assessment(assessment.clone())?;

        let (status, response) = self.dispatch(record, &assessment);

        // The assessment already landed at this point; a failed action log
        // still surfaces as a persistence failure in the summary.
        self.repository.append_action(ActionRecord {
            employee_id: assessment.employee_id.clone(),
            action: assessment.action,
            status,
            response,
            action_date: today,
        })?;

        Ok(CycleOutcome {
            employee_id: assessment.employee_id,
            name: record.name.clone(),
            score: assessment.score,
            action: assessment.action,
            factors: assessment.factors,
            status,
        })
    }

    fn dispatch(
        &self,
        record: &EmployeeRecord,
        assessment: &RiskAssessment,
    ) -> (ActionStatus, Option<String>) {
        let on_success = match assessment.action {
            RiskAction::ImmediateManagerAlert => ActionStatus::Sent,
            RiskAction::ScheduleCheckIn => ActionStatus::Scheduled,
            RiskAction::MonitorOnly => {
                info!(employee = %assessment.employee_id, "monitoring only, no outreach");
                return (ActionStatus::Monitored, None);
            }
        };

        let result = self.notifier.notify(
            &record.manager_email,
            &record.name,
            &assessment.factors_text(),
            assessment.action,
        );

        match result {
            Ok(true) => (on_success, None),
            Ok(false) => {
                warn!(employee = %assessment.employee_id, "notifier declined delivery");
                (ActionStatus::Failed, Some("declined by transport".to_string()))
            }
            Err(err) => {
                error!(employee = %assessment.employee_id, %err, "alert dispatch failed");
                (ActionStatus::Failed, Some(err.to_string()))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CycleStepError {
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Run-level report for one cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleSummary {
    pub processed: usize,
    pub skipped: usize,
    pub alerts_sent: usize,
    pub check_ins_scheduled: usize,
    pub monitored: usize,
    pub failed_notifications: usize,
    pub persistence_failures: usize,
    pub outcomes: Vec<CycleOutcome>,
}

/// Per-employee line item within a cycle summary.
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    pub employee_id: EmployeeId,
    pub name: String,
    pub score: u8,
    pub action: RiskAction,
    pub factors: Vec<String>,
    pub status: ActionStatus,
}
