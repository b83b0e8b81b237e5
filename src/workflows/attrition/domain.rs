use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees tracked by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw HR roster row as supplied by the record source.
///
/// Only the id is mandatory; every other field degrades gracefully when the
/// export omits or mangles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub manager_email: String,
    pub hire_date: Option<NaiveDate>,
    pub performance_score: Option<f32>,
    pub absence_days_30d: Option<u32>,
    pub absence_days_90d: Option<u32>,
}

/// Direction of an employee's performance, reduced to the signal scoring needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    Declining,
    ImprovingOrStable,
    Unknown,
}

impl PerformanceTrend {
    pub const fn label(self) -> &'static str {
        match self {
            PerformanceTrend::Declining => "declining",
            PerformanceTrend::ImprovingOrStable => "improving_or_stable",
            PerformanceTrend::Unknown => "unknown",
        }
    }
}

/// Per-cycle view of an employee with derived attributes attached.
///
/// Built fresh each cycle and discarded afterwards; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedEmployee {
    pub id: EmployeeId,
    pub tenure_months: u32,
    pub performance_trend: PerformanceTrend,
    pub record: EmployeeRecord,
}

impl EnrichedEmployee {
    /// Absence days over the trailing 30-day window, with a missing count
    /// treated as zero so it never triggers a rule on its own.
    pub fn absence_days_30d(&self) -> u32 {
        self.record.absence_days_30d.unwrap_or(0)
    }
}

/// The three response tiers an assessment can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    ImmediateManagerAlert,
    ScheduleCheckIn,
    MonitorOnly,
}

impl RiskAction {
    pub const fn label(self) -> &'static str {
        match self {
            RiskAction::ImmediateManagerAlert => "immediate_manager_alert",
            RiskAction::ScheduleCheckIn => "schedule_check_in",
            RiskAction::MonitorOnly => "monitor_only",
        }
    }
}

/// Immutable outcome of scoring one employee during one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub employee_id: EmployeeId,
    pub assessment_date: NaiveDate,
    pub score: u8,
    pub factors: Vec<String>,
    pub action: RiskAction,
}

impl RiskAssessment {
    /// Human-readable factor list used in alert bodies and logs.
    pub fn factors_text(&self) -> String {
        self.factors.join(", ")
    }
}

/// Delivery outcome recorded after dispatching the chosen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Sent,
    Scheduled,
    Monitored,
    Failed,
}

impl ActionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ActionStatus::Sent => "sent",
            ActionStatus::Scheduled => "scheduled",
            ActionStatus::Monitored => "monitored",
            ActionStatus::Failed => "failed",
        }
    }
}

/// Append-only log entry for an executed (or attempted) action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub employee_id: EmployeeId,
    pub action: RiskAction,
    pub status: ActionStatus,
    pub response: Option<String>,
    pub action_date: NaiveDate,
}
