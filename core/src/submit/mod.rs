pub mod outcome;

pub use outcome::SubmissionOutcome;

use log::{debug, warn};
use serde_json::Value;

use crate::config::{ConfigError, Credential, SubmitConfig};
use crate::http::{HttpClient, HttpFailure, HttpReply};
use crate::report::{ReportPayload, ValidatedReport};

/// Sends one validated report to the platform and reports what happened.
///
/// One attempt per call. No retry, no backoff.
///
/// Only a [`ValidatedReport`] can be sent:
///
/// ```compile_fail
/// use bountysubmit_core::{ReportDraft, Submitter};
///
/// async fn send_unchecked(submitter: &Submitter) {
///     let draft = ReportDraft::new("", "", "garbage", None);
///     submitter.submit(&draft).await;
/// }
/// ```
pub struct Submitter {
    client: HttpClient,
    config: SubmitConfig,
    credential: Credential,
}

impl Submitter {
    pub fn new(config: SubmitConfig, credential: Credential) -> Result<Self, ConfigError> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            client,
            config,
            credential,
        })
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// The body `submit` would send, stamped with the current time.
    pub fn payload(&self, report: &ValidatedReport) -> ReportPayload {
        ReportPayload::stamped_now(report, self.credential.username())
    }

    pub async fn submit(&self, report: &ValidatedReport) -> SubmissionOutcome {
        let payload = self.payload(report);
        self.submit_payload(&payload).await
    }

    async fn submit_payload(&self, payload: &ReportPayload) -> SubmissionOutcome {
        debug!("POST {} as {}", self.config.endpoint, self.credential.username());

        match self
            .client
            .post_json(&self.config.endpoint, self.credential.api_key(), payload)
            .await
        {
            Ok(reply) => {
                debug!("Platform replied with HTTP {}", reply.status);
                interpret_reply(reply)
            }
            Err(HttpFailure::BodyRead { status, source }) => {
                warn!(
                    "HTTP {} from {} with unreadable body: {}",
                    status, self.config.endpoint, source
                );
                SubmissionOutcome::BodyUnreadable {
                    status,
                    reason: source.to_string(),
                }
            }
            Err(HttpFailure::NoResponse(e)) => {
                warn!("No response from {}: {}", self.config.endpoint, e);
                SubmissionOutcome::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Maps a received reply onto an outcome.
fn interpret_reply(reply: HttpReply) -> SubmissionOutcome {
    if !reply.is_success() {
        return SubmissionOutcome::Rejected {
            status: reply.status,
            body: display_body(&reply.body),
        };
    }

    match extract_id(&reply.body) {
        Some(id) => SubmissionOutcome::Submitted { id },
        None => SubmissionOutcome::MissingId {
            status: reply.status,
        },
    }
}

/// Pulls `id` out of a JSON object; strings and numbers are both accepted.
fn extract_id(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JSON bodies are re-serialized compactly, anything else is shown as-is.
fn display_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json.to_string(),
        Err(_) => body.to_string(),
    }
}
