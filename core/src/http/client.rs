use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, ClientBuilder, Proxy};
use serde::Serialize;
use url::Url;

use super::{HttpFailure, HttpReply};
use crate::config::{ConfigError, SubmitConfig};

const CLIENT_USER_AGENT: &str = concat!("bountysubmit/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over `reqwest::Client` carrying the submit-time settings.
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(config: &SubmitConfig) -> Result<Self, ConfigError> {
        let mut builder = ClientBuilder::new();

        // No timeout unless one was asked for.
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// POSTs `body` as JSON with a bearer token and reads the whole reply.
    ///
    /// Any HTTP status is an `Ok`; only transport failures are errors. A body
    /// cut short after the headers keeps its status in [`HttpFailure::BodyRead`].
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        bearer: &str,
        body: &T,
    ) -> Result<HttpReply, HttpFailure> {
        let response = self
            .inner
            .post(url.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(HttpFailure::NoResponse)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| HttpFailure::BodyRead { status, source })?;
        Ok(HttpReply { status, body })
    }
}
