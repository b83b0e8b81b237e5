//! Attrition agent library: configuration, telemetry, and the attrition
//! risk workflow consumed by the CLI and HTTP surfaces.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
