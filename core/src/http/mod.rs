pub mod client;

pub use client::HttpClient;

use thiserror::Error;

/// Status and body of a response that made it back from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Why a POST produced no usable reply.
#[derive(Debug, Error)]
pub enum HttpFailure {
    /// Nothing came back: DNS, refused connection, timeout before headers.
    #[error("{0}")]
    NoResponse(#[source] reqwest::Error),

    /// Headers arrived but the body could not be read to the end.
    #[error("HTTP {status} body could not be read: {source}")]
    BodyRead {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
