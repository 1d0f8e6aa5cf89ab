use std::fmt;

/// Result of exactly one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx with a platform-assigned identifier.
    Submitted { id: String },
    /// 2xx whose body carried no usable identifier.
    MissingId { status: u16 },
    /// Status received but the body was cut short.
    BodyUnreadable { status: u16, reason: String },
    /// Non-2xx reply, body as shown to the operator.
    Rejected { status: u16, body: String },
    /// No response was received at all.
    Unreachable { reason: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionOutcome::MissingId { status }
            | SubmissionOutcome::BodyUnreadable { status, .. }
            | SubmissionOutcome::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionOutcome::Submitted { id } => {
                write!(f, "Report submitted successfully! Vulnerability ID: {}", id)
            }
            SubmissionOutcome::MissingId { status } => write!(
                f,
                "Error submitting report: {} - response did not include a vulnerability id",
                status
            ),
            SubmissionOutcome::BodyUnreadable { status, reason } => write!(
                f,
                "Error submitting report: {} - <unreadable body: {}>",
                status, reason
            ),
            SubmissionOutcome::Rejected { status, body } => {
                write!(f, "Error submitting report: {} - {}", status, body)
            }
            SubmissionOutcome::Unreachable { reason } => write!(
                f,
                "Error submitting report: <no status> - <no body> ({})",
                reason
            ),
        }
    }
}
