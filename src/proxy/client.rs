//! Module proxy queries: version resolution and archive digests.

use super::transport::ProxyTransport;
use crate::descriptor::{ModuleRef, ResolvedModule, Selector};
use crate::digest::Sha256Digest;
use crate::env::ProxyBase;
use crate::error::{BrewgoError, Result};
use crate::proxy_path::ProxyPath;
use log::debug;
use serde::Deserialize;

/// Version metadata as served by the `@latest` and `.info` endpoints.
#[derive(Debug, Deserialize)]
struct VersionInfo {
    #[serde(rename = "Version", alias = "version", default)]
    version: String,
    #[serde(rename = "Time", alias = "time", default)]
    time: Option<String>,
}

/// The outcome of downloading and hashing a module archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFetch {
    /// The URL the archive was downloaded from.
    pub url: String,
    /// SHA-256 of the bytes served at `url`.
    pub digest: Sha256Digest,
    /// Number of bytes hashed.
    pub size: u64,
}

/// Client for a single module proxy.
///
/// # Examples
///
/// ```no_run
/// use brewgo::descriptor::ModuleRef;
/// use brewgo::env::ProxyBase;
/// use brewgo::proxy::{HttpTransport, ProxyClient};
///
/// let transport = HttpTransport::default();
/// let base = ProxyBase::parse("https://proxy.golang.org")?;
/// let client = ProxyClient::new(base, &transport);
/// let resolved = client.resolve_version(&ModuleRef::parse("golang.org/x/text@latest"))?;
/// let archive = client.fetch_archive(&resolved)?;
/// assert_eq!(archive.digest.to_hex().len(), 64);
/// # Ok::<(), brewgo::error::BrewgoError>(())
/// ```
pub struct ProxyClient<'a> {
    base: ProxyBase,
    transport: &'a dyn ProxyTransport,
}

impl<'a> ProxyClient<'a> {
    /// Create a client for `base` that issues requests through `transport`.
    #[must_use]
    pub const fn new(base: ProxyBase, transport: &'a dyn ProxyTransport) -> Self {
        Self { base, transport }
    }

    /// Return the proxy base URL.
    #[must_use]
    pub const fn base(&self) -> &ProxyBase {
        &self.base
    }

    /// Ask the proxy for the concrete version `reference` denotes.
    ///
    /// Special selectors are sent to `/@<selector>`; explicit versions are
    /// confirmed through `/@v/<version>.info`.
    ///
    /// # Errors
    ///
    /// Returns [`BrewgoError::MalformedResponse`] if the body is not version
    /// JSON, [`BrewgoError::MissingVersion`] if it carries no version, and any
    /// path derivation or transport error.
    pub fn resolve_version(&self, reference: &ModuleRef) -> Result<ResolvedModule> {
        let kind = match reference.selector() {
            Some(Selector::Version(_)) => ProxyPath::VersionInfo,
            Some(Selector::Special(_)) | None => ProxyPath::Latest,
        };
        let url = self.base.join(&kind.derive(reference)?);
        debug!("resolving {reference} via {url}");

        let body = self.transport.get_text(&url)?;
        let info: VersionInfo =
            serde_json::from_str(&body).map_err(|e| BrewgoError::MalformedResponse {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if info.version.is_empty() {
            return Err(BrewgoError::MissingVersion {
                module: reference.module().to_owned(),
            });
        }

        debug!(
            "{reference} resolved to {} (published {})",
            info.version,
            info.time.as_deref().unwrap_or("unknown")
        );
        Ok(reference.resolve(info.version))
    }

    /// Download the module archive and hash it as it streams in.
    ///
    /// # Errors
    ///
    /// Returns any transport error, or [`BrewgoError::Fetch`] if the body
    /// cannot be read to the end.
    pub fn fetch_archive(&self, module: &ResolvedModule) -> Result<ArchiveFetch> {
        let url = self
            .base
            .join(&ProxyPath::Archive.derive(&module.as_reference())?);
        debug!("downloading {module} from {url}");

        let mut body = self.transport.get_stream(&url)?;
        let (digest, size) =
            Sha256Digest::of_reader(&mut body).map_err(|e| BrewgoError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        debug!("hashed {size} bytes of {module}: sha256 {digest}");
        Ok(ArchiveFetch { url, digest, size })
    }

    /// Download the module's go.mod file.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub fn fetch_go_mod(&self, module: &ResolvedModule) -> Result<String> {
        let url = self
            .base
            .join(&ProxyPath::GoMod.derive(&module.as_reference())?);
        debug!("downloading go.mod of {module} from {url}");
        self.transport.get_text(&url)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
