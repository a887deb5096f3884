//! In-memory stand-ins for the Go environment and the proxy transport.
//!
//! Available with the `test-support` feature so that dependent crates can
//! exercise the pipeline without a Go toolchain or network access.

use crate::env::{GOPROXY, GoEnv};
use crate::error::{BrewgoError, Result};
use crate::proxy::ProxyTransport;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};

/// A [`GoEnv`] answering from a fixed table; unknown names read as empty.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    values: HashMap<String, String>,
}

impl StaticEnv {
    /// Create an environment with only `GOPROXY` set.
    #[must_use]
    pub fn goproxy(value: &str) -> Self {
        Self::default().with(GOPROXY, value)
    }

    /// Set `name` to `value`.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_owned(), value.to_owned());
        self
    }
}

impl GoEnv for StaticEnv {
    fn var(&self, name: &str) -> Result<String> {
        Ok(self.values.get(name).cloned().unwrap_or_default())
    }
}

/// A [`ProxyTransport`] serving canned bodies by exact URL.
///
/// Unknown URLs answer with [`BrewgoError::NotFound`]. Every request is
/// recorded in order.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl StubTransport {
    /// Create a transport with no responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_response(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_owned(), body.into());
        self
    }

    /// Return the URLs requested so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_owned());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| BrewgoError::NotFound {
                url: url.to_owned(),
            })
    }
}

impl ProxyTransport for StubTransport {
    fn get_text(&self, url: &str) -> Result<String> {
        let body = self.respond(url)?;
        String::from_utf8(body).map_err(|e| BrewgoError::Fetch {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }

    fn get_stream(&self, url: &str) -> Result<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.respond(url)?)))
    }
}
