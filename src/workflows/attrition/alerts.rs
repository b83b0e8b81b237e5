use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::RiskAction;

/// Subject/body pair with `{employee_name}` and `{risk_factors}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTemplate {
    pub subject: String,
    pub body: String,
}

impl AlertTemplate {
    fn render(&self, employee_name: &str, risk_factors: &str) -> RenderedAlert {
        RenderedAlert {
            subject: self.subject.replace("{employee_name}", employee_name),
            body: self
                .body
                .replace("{employee_name}", employee_name)
                .replace("{risk_factors}", risk_factors),
        }
    }
}

/// Fully substituted alert text ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedAlert {
    pub subject: String,
    pub body: String,
}

/// Template catalog keyed by action tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCatalog {
    templates: BTreeMap<RiskAction, AlertTemplate>,
}

impl AlertCatalog {
    pub fn new(templates: BTreeMap<RiskAction, AlertTemplate>) -> Self {
        Self { templates }
    }

    pub fn template_for(&self, action: RiskAction) -> Option<&AlertTemplate> {
        self.templates.get(&action)
    }

    pub fn render(
        &self,
        action: RiskAction,
        employee_name: &str,
        risk_factors: &str,
    ) -> Result<RenderedAlert, AlertError> {
        let template = self
            .template_for(action)
            .ok_or(AlertError::MissingTemplate(action.label()))?;
        Ok(template.render(employee_name, risk_factors))
    }
}

impl Default for AlertCatalog {
    fn default() -> Self {
        let mut templates = BTreeMap::new();
        templates.insert(
            RiskAction::ImmediateManagerAlert,
            AlertTemplate {
                subject: "Employee Retention Alert - {employee_name}".to_string(),
                body: "Employee {employee_name} has been flagged as high attrition risk. \
                       Risk factors: {risk_factors}. Recommended actions: Schedule 1-on-1 \
                       meeting within 48 hours."
                    .to_string(),
            },
        );
        templates.insert(
            RiskAction::ScheduleCheckIn,
            AlertTemplate {
                subject: "Employee Check-in Recommended - {employee_name}".to_string(),
                body: "Employee {employee_name} has been identified as medium attrition risk. \
                       Risk factors: {risk_factors}. Recommended actions: Schedule a check-in \
                       meeting within the next week to understand concerns."
                    .to_string(),
            },
        );
        templates.insert(
            RiskAction::MonitorOnly,
            AlertTemplate {
                subject: "Employee Monitoring Alert - {employee_name}".to_string(),
                body: "Employee {employee_name} is currently low attrition risk but is being \
                       monitored. No immediate action required."
                    .to_string(),
            },
        );
        Self { templates }
    }
}

/// Alert dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("no alert template configured for action '{0}'")]
    MissingTemplate(&'static str),
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Outbound notification hook (e-mail adapter, chat webhook, test double).
///
/// An `Ok(false)` result means the transport declined delivery; callers treat
/// it like an error but the cycle always proceeds.
pub trait AlertNotifier: Send + Sync {
    fn notify(
        &self,
        recipient: &str,
        employee_name: &str,
        risk_factors: &str,
        action: RiskAction,
    ) -> Result<bool, AlertError>;
}

/// Notifier that renders the alert and writes it to the log instead of an SMTP
/// transport. Used by the CLI and demos.
pub struct ConsoleNotifier {
    catalog: AlertCatalog,
    sender: String,
}

impl ConsoleNotifier {
    pub fn new(catalog: AlertCatalog, sender: impl Into<String>) -> Self {
        Self {
            catalog,
            sender: sender.into(),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new(AlertCatalog::default(), "hr-system@company.com")
    }
}

impl AlertNotifier for ConsoleNotifier {
    fn notify(
        &self,
        recipient: &str,
        employee_name: &str,
        risk_factors: &str,
        action: RiskAction,
    ) -> Result<bool, AlertError> {
        let rendered = self.catalog.render(action, employee_name, risk_factors)?;
        info!(
            to = recipient,
            from = %self.sender,
            subject = %rendered.subject,
            body = %rendered.body,
            "simulated alert delivery"
        );
        Ok(true)
    }
}
