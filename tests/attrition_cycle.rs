//! End-to-end scenarios for the attrition assessment cycle, driven through
//! the public service facade with in-memory collaborators.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use attrition_agent::workflows::attrition::{
        AttritionCycleService, EmployeeRecord, InMemoryAttritionRepository, RecordingNotifier,
        RiskEngine, RiskThresholds,
    };

    pub(super) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
    }

    pub(super) fn employee(
        id: &str,
        name: &str,
        hire_date: Option<NaiveDate>,
        performance_score: Option<f32>,
        absence_days_30d: Option<u32>,
    ) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            name: name.to_string(),
            department: "Engineering".to_string(),
            manager_email: "manager1@company.com".to_string(),
            hire_date,
            performance_score,
            absence_days_30d,
            absence_days_90d: None,
        }
    }

    pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    /// High risk against the default thresholds: new tenure + declining
    /// performance + heavy absences (score 90).
    pub(super) fn high_risk() -> EmployeeRecord {
        employee("EMP001", "John Doe", Some(date(2025, 1, 2)), Some(2.0), Some(4))
    }

    /// Medium risk: declining performance alone (score 40).
    pub(super) fn medium_risk() -> EmployeeRecord {
        employee("EMP002", "Jane Smith", Some(date(2022, 3, 10)), Some(2.1), Some(1))
    }

    /// Low risk: no rule fires (score 0).
    pub(super) fn low_risk() -> EmployeeRecord {
        employee("EMP003", "Peter Jones", Some(date(2023, 1, 1)), Some(4.1), Some(0))
    }

    pub(super) fn service(
        notifier: RecordingNotifier,
    ) -> (
        AttritionCycleService<InMemoryAttritionRepository, RecordingNotifier>,
        InMemoryAttritionRepository,
    ) {
        let repository = InMemoryAttritionRepository::default();
        let service = AttritionCycleService::new(
            Arc::new(repository.clone()),
            Arc::new(notifier),
            RiskEngine::new(RiskThresholds::default()),
        );
        (service, repository)
    }
}

use std::sync::Arc;

use attrition_agent::workflows::attrition::{
    ActionStatus, AttritionCycleService, AttritionRepository, EmployeeId,
    InMemoryAttritionRepository, RecordingNotifier, RiskAction, RiskEngine, RiskThresholds,
    UnreliableAttritionRepository,
};

#[test]
fn full_cycle_assesses_persists_and_alerts() {
    let notifier = RecordingNotifier::delivering();
    let (service, repository) = common::service(notifier.clone());

    let roster = [
        common::high_risk(),
        common::medium_risk(),
        common::low_risk(),
    ];
    let summary = service.run_cycle(&roster, common::today());

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.alerts_sent, 1);
    assert_eq!(summary.check_ins_scheduled, 1);
    assert_eq!(summary.monitored, 1);
    assert_eq!(summary.failed_notifications, 0);

    assert_eq!(repository.employee_count(), 3);
    assert_eq!(repository.assessment_count(), 3);
    assert_eq!(repository.action_count(), 3);

    let assessments = repository
        .assessments_for(&EmployeeId("EMP001".to_string()))
        .expect("repository available");
    assert_eq!(assessments.len(), 1);
    assert_eq!(assessments[0].score, 90);
    assert_eq!(assessments[0].action, RiskAction::ImmediateManagerAlert);
    assert_eq!(
        assessments[0].factors,
        vec![
            "New Tenure (<6 months)".to_string(),
            "Low Performance (<2.5)".to_string(),
            "High Absences (>3 days in 30d)".to_string(),
        ]
    );

    // Both outreach tiers notify the manager; monitoring does not.
    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].recipient, "manager1@company.com");
    assert_eq!(sent[0].employee_name, "John Doe");
    assert!(sent[0].risk_factors.contains("New Tenure (<6 months)"));
    assert_eq!(sent[1].action, RiskAction::ScheduleCheckIn);

    let monitored_actions = repository
        .actions_for(&EmployeeId("EMP003".to_string()))
        .expect("repository available");
    assert_eq!(monitored_actions.len(), 1);
    assert_eq!(monitored_actions[0].status, ActionStatus::Monitored);
}

#[test]
fn record_without_identity_is_skipped_without_aborting() {
    let (service, repository) = common::service(RecordingNotifier::delivering());

    let mut nameless = common::low_risk();
    nameless.employee_id = "   ".to_string();
    let roster = [common::high_risk(), nameless, common::medium_risk()];

    let summary = service.run_cycle(&roster, common::today());

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(repository.assessment_count(), 2);
}

#[test]
fn notifier_transport_failure_records_a_failed_action() {
    let notifier = RecordingNotifier::failing("smtp down");
    let (service, repository) = common::service(notifier);

    let summary = service.run_cycle(&[common::high_risk(), common::low_risk()], common::today());

    // The failure is surfaced but the cycle still processes everyone.
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed_notifications, 1);
    assert_eq!(summary.monitored, 1);

    let actions = repository
        .actions_for(&EmployeeId("EMP001".to_string()))
        .expect("repository available");
    assert_eq!(actions[0].status, ActionStatus::Failed);
    assert!(actions[0]
        .response
        .as_deref()
        .expect("failure reason recorded")
        .contains("smtp down"));
}

#[test]
fn repository_failure_is_surfaced_and_the_cycle_continues() {
    let store = InMemoryAttritionRepository::default();
    let repository =
        UnreliableAttritionRepository::failing_for(store.clone(), "EMP002", "db offline");
    let notifier = RecordingNotifier::delivering();
    let service = AttritionCycleService::new(
        Arc::new(repository),
        Arc::new(notifier.clone()),
        RiskEngine::new(RiskThresholds::default()),
    );

    let roster = [
        common::high_risk(),
        common::medium_risk(),
        common::low_risk(),
    ];
    let summary = service.run_cycle(&roster, common::today());

    // EMP002 is skipped and reported; the employees after it still process.
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.persistence_failures, 1);

    assert_eq!(store.assessment_count(), 2);
    let failed = store
        .assessments_for(&EmployeeId("EMP002".to_string()))
        .expect("repository available");
    assert!(failed.is_empty());

    // The write fails before outreach, so only the high-risk alert goes out.
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].employee_name, "John Doe");
}

#[test]
fn declined_delivery_counts_as_a_failed_notification() {
    let (service, _repository) = common::service(RecordingNotifier::declining());

    let summary = service.run_cycle(&[common::medium_risk()], common::today());

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed_notifications, 1);
    assert_eq!(summary.check_ins_scheduled, 0);
}

#[test]
fn rerunning_a_cycle_appends_identical_assessments() {
    let (service, repository) = common::service(RecordingNotifier::delivering());
    let roster = [common::high_risk()];

    service.run_cycle(&roster, common::today());
    let next_day = common::date(2025, 6, 3);
    service.run_cycle(&roster, next_day);

    let assessments = repository
        .assessments_for(&EmployeeId("EMP001".to_string()))
        .expect("repository available");
    assert_eq!(assessments.len(), 2);
    assert_eq!(assessments[0].score, assessments[1].score);
    assert_eq!(assessments[0].action, assessments[1].action);
    assert_eq!(assessments[0].factors, assessments[1].factors);
    assert_ne!(assessments[0].assessment_date, assessments[1].assessment_date);

    // Roster upserts stay idempotent across replays.
    assert_eq!(repository.employee_count(), 1);
    assert_eq!(repository.action_count(), 2);
}

#[test]
fn long_tenure_alone_is_only_monitored() {
    let (service, _repository) = common::service(RecordingNotifier::delivering());

    // 70 tenure months as of the assessment date.
    let veteran = common::employee(
        "EMP004",
        "Alice Brown",
        Some(common::date(2019, 9, 1)),
        Some(3.0),
        Some(0),
    );
    let summary = service.run_cycle(&[veteran], common::today());

    let outcome = &summary.outcomes[0];
    assert_eq!(outcome.score, 20);
    assert_eq!(outcome.action, RiskAction::MonitorOnly);
    assert_eq!(outcome.factors, vec!["Long Tenure (>60 months)".to_string()]);
}

#[test]
fn empty_roster_produces_an_empty_summary() {
    let (service, repository) = common::service(RecordingNotifier::delivering());

    let summary = service.run_cycle(&[], common::today());

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 0);
    assert!(summary.outcomes.is_empty());
    assert_eq!(repository.assessment_count(), 0);
}
