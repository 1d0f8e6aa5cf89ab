pub mod validator;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::report::validator::ValidationError;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Platform priority scale, P1 being the most critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::P1,
        Severity::P2,
        Severity::P3,
        Severity::P4,
        Severity::P5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::P1 => "P1",
            Severity::P2 => "P2",
            Severity::P3 => "P3",
            Severity::P4 => "P4",
            Severity::P5 => "P5",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(wanted))
            .ok_or(ValidationError::InvalidSeverity)
    }
}

/// A vulnerability report as typed by the operator, before validation.
///
/// An empty proof-of-concept answer is stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub poc_url: Option<String>,
}

impl ReportDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: impl Into<String>,
        poc_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: severity.into(),
            poc_url: poc_url.filter(|u| !u.is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validator::validate(
            &self.title,
            &self.description,
            &self.severity,
            self.poc_url.as_deref(),
        )
    }

    /// Validates the draft and seals it for submission.
    pub fn into_validated(self) -> Result<ValidatedReport, ValidationError> {
        self.validate()?;
        Ok(ValidatedReport(self))
    }

    /// Severity in canonical form, falling back to the raw text when it is
    /// not on the scale.
    pub fn canonical_severity(&self) -> String {
        self.severity
            .parse::<Severity>()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| self.severity.clone())
    }
}

/// A draft that passed validation. Only these reach the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReport(ReportDraft);

impl ValidatedReport {
    pub fn draft(&self) -> &ReportDraft {
        &self.0
    }
}

/// JSON body sent to the platform.
///
/// Only built from a [`ValidatedReport`], so an unchecked draft never becomes one:
///
/// ```compile_fail
/// use bountysubmit_core::{ReportDraft, ReportPayload};
///
/// let draft = ReportDraft::new("", "", "garbage", Some("not a url".to_string()));
/// let _ = ReportPayload::stamped_now(&draft, "researcher");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub poc_url: String,
    pub username: String,
    pub timestamp: String,
}

impl ReportPayload {
    pub(crate) fn new(report: &ValidatedReport, username: &str, timestamp: String) -> Self {
        let draft = report.draft();
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            severity: draft.canonical_severity(),
            poc_url: draft.poc_url.clone().unwrap_or_default(),
            username: username.to_string(),
            timestamp,
        }
    }

    /// Builds a payload stamped with the current UTC time.
    pub(crate) fn stamped_now(report: &ValidatedReport, username: &str) -> Self {
        Self::new(report, username, now_iso())
    }
}

/// Current wall-clock time as ISO-8601 UTC with millisecond precision.
pub fn now_iso() -> String {
    humantime::format_rfc3339_millis(std::time::SystemTime::now()).to_string()
}
