pub mod config;
mod http;
pub mod report;
pub mod submit;

pub use crate::config::{ConfigError, Credential, SubmitConfig, DEFAULT_ENDPOINT};
pub use crate::report::validator::{validate, ValidationError};
pub use crate::report::{ReportDraft, ReportPayload, Severity, ValidatedReport};
pub use crate::submit::{SubmissionOutcome, Submitter};
