//! HTTP transport for module proxy requests.
//!
//! Provides a trait-based abstraction over the two kinds of GET the client
//! issues, enabling tests to substitute canned responses for the network.

use crate::error::{BrewgoError, Result};
use std::fmt;
use std::io::Read;
use std::time::Duration;

/// Trait for issuing GET requests against a module proxy.
#[cfg_attr(test, mockall::automock)]
pub trait ProxyTransport {
    /// Fetch `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not UTF-8.
    fn get_text(&self, url: &str) -> Result<String>;

    /// Fetch `url` and return a reader over the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_stream(&self, url: &str) -> Result<Box<dyn Read>>;
}

/// HTTP transport backed by a `ureq` agent.
///
/// # Examples
///
/// ```
/// use brewgo::proxy::HttpTransport;
/// use std::time::Duration;
///
/// let transport = HttpTransport::new(Some(Duration::from_secs(30)));
/// assert_eq!(transport.timeout(), Some(Duration::from_secs(30)));
/// ```
pub struct HttpTransport {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport; `timeout` bounds each whole request, body included.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            timeout,
        }
    }

    /// Return the configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn get(&self, url: &str) -> Result<ureq::Body> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        Ok(response.into_body())
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ProxyTransport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        self.get(url)?
            .read_to_string()
            .map_err(|e| BrewgoError::Fetch {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }

    fn get_stream(&self, url: &str) -> Result<Box<dyn Read>> {
        Ok(Box::new(self.get(url)?.into_reader()))
    }
}

/// Map a ureq error to a [`BrewgoError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> BrewgoError {
    match err {
        ureq::Error::StatusCode(404 | 410) => BrewgoError::NotFound {
            url: url.to_owned(),
        },
        other => BrewgoError::Fetch {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
