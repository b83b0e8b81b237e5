use chrono::NaiveDate;
use tracing::warn;

use super::domain::{EmployeeId, EmployeeRecord, EnrichedEmployee, PerformanceTrend};

/// Performance scores strictly below this cutoff read as a declining trend.
pub const DECLINING_PERFORMANCE_CUTOFF: f32 = 2.5;

const DAYS_PER_TENURE_MONTH: i64 = 30;

/// Raised when a record cannot participate in a cycle at all.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("employee record is missing a unique id")]
    MissingIdentity,
}

/// Derive the scoring attributes for one employee as of `today`.
///
/// Identity is the only hard requirement. A missing or future hire date clamps
/// tenure to zero; a missing performance score yields an `Unknown` trend that
/// never triggers scoring.
pub fn enrich(
    record: &EmployeeRecord,
    today: NaiveDate,
) -> Result<EnrichedEmployee, EnrichmentError> {
    let trimmed = record.employee_id.trim();
    if trimmed.is_empty() {
        return Err(EnrichmentError::MissingIdentity);
    }
    let id = EmployeeId(trimmed.to_string());

    let tenure_months = match record.hire_date {
        Some(hired) => {
            let days = (today - hired).num_days();
            if days < 0 {
                warn!(employee = %id, %hired, "hire date is in the future, clamping tenure to zero");
                0
            } else {
                (days / DAYS_PER_TENURE_MONTH) as u32
            }
        }
        None => 0,
    };

    let performance_trend = match record.performance_score {
        Some(score) if score < DECLINING_PERFORMANCE_CUTOFF => PerformanceTrend::Declining,
        Some(_) => PerformanceTrend::ImprovingOrStable,
        None => PerformanceTrend::Unknown,
    };

    Ok(EnrichedEmployee {
        id,
        tenure_months,
        performance_trend,
        record: record.clone(),
    })
}
