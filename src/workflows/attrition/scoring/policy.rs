use super::super::domain::RiskAction;
use super::config::RiskThresholds;

/// Map a score onto the three-tier response ladder.
///
/// Strict descending scan; equality with a breakpoint lands in the higher
/// tier. Total over all of u8, so no bounds check is needed even though the
/// scorer only produces values in [0, 100].
pub fn decide_action(score: u8, thresholds: &RiskThresholds) -> RiskAction {
    if score >= thresholds.high() {
        RiskAction::ImmediateManagerAlert
    } else if score >= thresholds.medium() {
        RiskAction::ScheduleCheckIn
    } else {
        RiskAction::MonitorOnly
    }
}
