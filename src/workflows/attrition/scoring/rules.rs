use super::super::domain::{EnrichedEmployee, PerformanceTrend};

/// Sentinel emitted when no rule fired, so alert text never renders empty.
pub const NO_FACTORS_LABEL: &str = "None identified";

/// Ceiling applied to the summed contributions.
pub const MAX_RISK_SCORE: u8 = 100;

/// One attrition signal: a predicate over the enriched view, the points it
/// adds, and the label surfaced to managers when it fires.
pub(crate) struct RiskRule {
    pub(crate) label: &'static str,
    pub(crate) contribution: u8,
    pub(crate) triggers: fn(&EnrichedEmployee) -> bool,
}

/// The rule table drives both the score and the factor list, so the two can
/// never drift apart. Order here is the order factors appear in alerts:
/// tenure first, then performance, then absence. The two tenure rules are
/// mutually exclusive by their predicates.
pub(crate) const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        label: "New Tenure (<6 months)",
        contribution: 30,
        triggers: |employee| employee.tenure_months < 6,
    },
    RiskRule {
        label: "Long Tenure (>60 months)",
        contribution: 20,
        triggers: |employee| employee.tenure_months > 60,
    },
    RiskRule {
        label: "Low Performance (<2.5)",
        contribution: 40,
        triggers: |employee| employee.performance_trend == PerformanceTrend::Declining,
    },
    RiskRule {
        label: "High Absences (>3 days in 30d)",
        contribution: 20,
        triggers: |employee| employee.absence_days_30d() > 3,
    },
];

/// Evaluate every rule once, returning the capped score and the ordered labels
/// of the rules that fired.
pub(crate) fn evaluate(employee: &EnrichedEmployee) -> (u8, Vec<&'static str>) {
    let mut total: u32 = 0;
    let mut labels = Vec::new();

    for rule in RISK_RULES {
        if (rule.triggers)(employee) {
            total += u32::from(rule.contribution);
            labels.push(rule.label);
        }
    }

    (total.min(u32::from(MAX_RISK_SCORE)) as u8, labels)
}

#[cfg(test)]
mod tests {
    use super::super::super::domain::{EmployeeId, EmployeeRecord};
    use super::*;

    fn employee(
        tenure_months: u32,
        performance_score: Option<f32>,
        absence_days_30d: Option<u32>,
    ) -> EnrichedEmployee {
        let performance_trend = match performance_score {
            Some(score) if score < 2.5 => PerformanceTrend::Declining,
            Some(_) => PerformanceTrend::ImprovingOrStable,
            None => PerformanceTrend::Unknown,
        };
        EnrichedEmployee {
            id: EmployeeId("EMP001".to_string()),
            tenure_months,
            performance_trend,
            record: EmployeeRecord {
                employee_id: "EMP001".to_string(),
                name: "John Doe".to_string(),
                department: "Engineering".to_string(),
                manager_email: "manager1@company.com".to_string(),
                hire_date: None,
                performance_score,
                absence_days_30d,
                absence_days_90d: None,
            },
        }
    }

    #[test]
    fn all_signals_firing_sums_to_ninety() {
        let (score, labels) = evaluate(&employee(5, Some(2.0), Some(4)));
        assert_eq!(score, 90);
        assert_eq!(
            labels,
            vec![
                "New Tenure (<6 months)",
                "Low Performance (<2.5)",
                "High Absences (>3 days in 30d)",
            ]
        );
    }

    #[test]
    fn quiet_profile_scores_zero_with_no_labels() {
        let (score, labels) = evaluate(&employee(30, Some(3.5), Some(1)));
        assert_eq!(score, 0);
        assert!(labels.is_empty());
    }

    #[test]
    fn long_tenure_alone_scores_twenty() {
        let (score, labels) = evaluate(&employee(70, Some(3.0), Some(0)));
        assert_eq!(score, 20);
        assert_eq!(labels, vec!["Long Tenure (>60 months)"]);
    }

    #[test]
    fn tenure_rules_are_mutually_exclusive() {
        for tenure in [0u32, 5, 6, 60, 61, 120] {
            let (_, labels) = evaluate(&employee(tenure, Some(3.0), Some(0)));
            let tenure_labels = labels
                .iter()
                .filter(|label| label.contains("Tenure"))
                .count();
            assert!(tenure_labels <= 1, "tenure {tenure} fired both tenure rules");
        }
    }

    #[test]
    fn unknown_performance_never_triggers() {
        let (score, labels) = evaluate(&employee(30, None, Some(0)));
        assert_eq!(score, 0);
        assert!(labels.is_empty());
    }

    #[test]
    fn score_matches_sum_of_labeled_contributions_everywhere() {
        // The explainer and the scorer must agree rule-for-rule: the score is
        // exactly the sum of contributions of the labeled rules, capped.
        let tenures = [0u32, 5, 6, 30, 60, 61, 120];
        let performances = [None, Some(1.0), Some(2.4), Some(2.5), Some(4.8)];
        let absences = [None, Some(0u32), Some(3), Some(4), Some(12)];

        for &tenure in &tenures {
            for &performance in &performances {
                for &absence in &absences {
                    let subject = employee(tenure, performance, absence);
                    let (score, labels) = evaluate(&subject);

                    let labeled_sum: u32 = RISK_RULES
                        .iter()
                        .filter(|rule| labels.contains(&rule.label))
                        .map(|rule| u32::from(rule.contribution))
                        .sum();

                    assert_eq!(u32::from(score), labeled_sum.min(100));
                    assert!(score <= MAX_RISK_SCORE);

                    // Each labeled rule must actually trigger for this input.
                    for rule in RISK_RULES {
                        assert_eq!(
                            labels.contains(&rule.label),
                            (rule.triggers)(&subject),
                            "label/trigger mismatch for '{}'",
                            rule.label
                        );
                    }
                }
            }
        }
    }
}
