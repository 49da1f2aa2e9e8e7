use serde::Serialize;

/// How serious a finding is for the migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    /// Informational; the run stays usable as-is.
    Warning,
    /// Requires operator attention before the output should be uploaded.
    Error,
}

/// A single issue surfaced during conversion. None of these abort the run;
/// they are collected and reported alongside the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    pub code: String,
    pub message: String,
}

impl Finding {
    pub fn warning(code: &str, message: String) -> Self {
        Finding {
            severity: FindingSeverity::Warning,
            code: code.to_string(),
            message,
        }
    }

    pub fn error(code: &str, message: String) -> Self {
        Finding {
            severity: FindingSeverity::Error,
            code: code.to_string(),
            message,
        }
    }

    /// True for the duplicate-name and collision findings, which are only
    /// printed on request; accounting findings always surface.
    pub fn is_duplicate_report(&self) -> bool {
        matches!(
            self.code.as_str(),
            "duplicate_group_name" | "real_server_name_collision"
        )
    }
}
