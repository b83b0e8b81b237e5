use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::domain::EmployeeRecord;

/// Errors raised while reading the roster export.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Read all employee records from a CSV roster export.
///
/// Optional columns degrade to `None` when blank or unparseable; only a
/// structurally broken CSV is an error. An empty file yields an empty vec.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RosterRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmployeeRecord>, IngestError> {
    let file = File::open(path)?;
    read_records(file)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    employee_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    manager_email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hire_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    performance_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    absence_days_30d: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    absence_days_90d: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> EmployeeRecord {
        let hire_date = self.hire_date.as_deref().and_then(|raw| {
            let parsed = parse_roster_date(raw);
            if parsed.is_none() {
                warn!(
                    employee = %self.employee_id,
                    value = raw,
                    "unparseable hire_date, tenure will fall back to zero"
                );
            }
            parsed
        });
        let performance_score = parse_optional(self.performance_score.as_deref(), &self.employee_id, "performance_score");
        let absence_days_30d = parse_optional(self.absence_days_30d.as_deref(), &self.employee_id, "absence_days_30d");
        let absence_days_90d = parse_optional(self.absence_days_90d.as_deref(), &self.employee_id, "absence_days_90d");

        EmployeeRecord {
            employee_id: self.employee_id,
            name: self.name,
            department: self.department,
            manager_email: self.manager_email,
            hire_date,
            performance_score,
            absence_days_30d,
            absence_days_90d,
        }
    }
}

fn parse_optional<T: std::str::FromStr>(
    value: Option<&str>,
    employee: &str,
    column: &'static str,
) -> Option<T> {
    let raw = value?;
    match raw.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(employee, column, value = raw, "unparseable numeric column, treating as missing");
            None
        }
    }
}

fn parse_roster_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    // HRIS exports occasionally switch to US-style dates.
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
