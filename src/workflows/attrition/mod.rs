//! Employee attrition risk pipeline: roster ingestion, feature derivation,
//! rule-based scoring, threshold-based action selection, and the cycle
//! orchestrator that ties them to persistence and alerting collaborators.

pub mod alerts;
pub mod domain;
pub mod enrichment;
pub mod ingest;
pub mod memory;
pub mod repository;
pub mod scoring;
pub mod service;

pub use alerts::{AlertCatalog, AlertError, AlertNotifier, AlertTemplate, ConsoleNotifier};
pub use domain::{
    ActionRecord, ActionStatus, EmployeeId, EmployeeRecord, EnrichedEmployee, PerformanceTrend,
    RiskAction, RiskAssessment,
};
pub use enrichment::{enrich, EnrichmentError, DECLINING_PERFORMANCE_CUTOFF};
pub use ingest::{read_records, read_records_from_path, IngestError};
pub use memory::{InMemoryAttritionRepository, RecordingNotifier, UnreliableAttritionRepository};
pub use repository::{AttritionRepository, RepositoryError};
pub use scoring::{
    decide_action, RiskEngine, RiskThresholds, ThresholdError, MAX_RISK_SCORE, NO_FACTORS_LABEL,
};
pub use service::{AttritionCycleService, CycleOutcome, CycleSummary};
