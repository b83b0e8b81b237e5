mod config;
mod policy;
mod rules;

pub use config::{RiskThresholds, ThresholdError};
pub use policy::decide_action;
pub use rules::{MAX_RISK_SCORE, NO_FACTORS_LABEL};

use chrono::NaiveDate;

use super::domain::{EnrichedEmployee, RiskAssessment};

/// Stateless engine turning an enriched employee into a full assessment:
/// capped score, ordered factor labels, and the chosen action tier.
pub struct RiskEngine {
    thresholds: RiskThresholds,
}

impl RiskEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn assess(&self, employee: &EnrichedEmployee, assessment_date: NaiveDate) -> RiskAssessment {
        let (score, labels) = rules::evaluate(employee);

        let factors = if labels.is_empty() {
            vec![NO_FACTORS_LABEL.to_string()]
        } else {
            labels.into_iter().map(str::to_string).collect()
        };

        RiskAssessment {
            employee_id: employee.id.clone(),
            assessment_date,
            score,
            factors,
            action: decide_action(score, &self.thresholds),
        }
    }
}
