//! Shared shapes for machine-readable command output.

use serde::Serialize;

use beepbind_spec::{ValidationError, ValidationWarning};

/// One validation diagnostic in a JSON report.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Stable code (e.g., "E004", "W002").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// JSON path to the offending field, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationError> for JsonDiagnostic {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
        }
    }
}

impl From<&ValidationWarning> for JsonDiagnostic {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}
