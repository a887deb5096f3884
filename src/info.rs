//! Formula info assembly.
//!
//! Runs the resolution pipeline end to end: parse the reference, find the
//! proxy, resolve the version, hash the archive. The result is a
//! [`FormulaInfo`] that is never modified afterwards. Any failure aborts the
//! whole build; nothing is persisted along the way, so nothing needs undoing.

use crate::descriptor::{ModuleRef, ResolvedModule};
use crate::digest::Sha256Digest;
use crate::env::{GoEnv, ProxyBase, goproxy};
use crate::error::Result;
use crate::proxy::{ProxyClient, ProxyTransport};
use crate::proxy_path::clean_path;
use log::debug;

/// Documentation site used for generated homepages.
pub const HOMEPAGE_HOST: &str = "godoc.org";

/// Everything needed to write a Homebrew formula for one module version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaInfo {
    module: ResolvedModule,
    homepage: String,
    archive_url: String,
    digest: Sha256Digest,
}

impl FormulaInfo {
    /// Assemble info for `module`, deriving the homepage from its path.
    #[must_use]
    pub fn new(module: ResolvedModule, archive_url: String, digest: Sha256Digest) -> Self {
        let homepage = homepage_url(module.module());
        Self {
            module,
            homepage,
            archive_url,
            digest,
        }
    }

    /// Return the resolved module.
    #[must_use]
    pub const fn module(&self) -> &ResolvedModule {
        &self.module
    }

    /// Return the concrete version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.module.version()
    }

    /// Return the documentation homepage.
    #[must_use]
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Return the URL the archive was downloaded from.
    #[must_use]
    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    /// Return the archive digest.
    #[must_use]
    pub const fn digest(&self) -> &Sha256Digest {
        &self.digest
    }
}

fn homepage_url(module: &str) -> String {
    let path = clean_path(module);
    format!("https://{HOMEPAGE_HOST}/{}", path.trim_start_matches('/'))
}

/// Builds [`FormulaInfo`] values from raw module references.
///
/// # Examples
///
/// ```no_run
/// use brewgo::env::GoCommandEnv;
/// use brewgo::info::InfoBuilder;
/// use brewgo::proxy::HttpTransport;
///
/// let env = GoCommandEnv::new();
/// let transport = HttpTransport::default();
/// let info = InfoBuilder::new(&env, &transport).build("golang.org/x/tools/gopls")?;
/// assert!(info.version().starts_with('v'));
/// # Ok::<(), brewgo::error::BrewgoError>(())
/// ```
pub struct InfoBuilder<'a> {
    env: &'a dyn GoEnv,
    transport: &'a dyn ProxyTransport,
    proxy: Option<ProxyBase>,
}

impl<'a> InfoBuilder<'a> {
    /// Create a builder reading `GOPROXY` from `env`.
    #[must_use]
    pub const fn new(env: &'a dyn GoEnv, transport: &'a dyn ProxyTransport) -> Self {
        Self {
            env,
            transport,
            proxy: None,
        }
    }

    /// Use `proxy` instead of consulting the Go environment.
    #[must_use]
    pub fn with_proxy(self, proxy: ProxyBase) -> Self {
        Self {
            proxy: Some(proxy),
            ..self
        }
    }

    /// Resolve `raw` (`module[@version-or-selector]`) into formula info.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by proxy lookup, version resolution or
    /// archive download.
    pub fn build(&self, raw: &str) -> Result<FormulaInfo> {
        let reference = ModuleRef::parse(raw).or_latest();

        let base = match &self.proxy {
            Some(proxy) => proxy.clone(),
            None => goproxy(self.env)?,
        };
        debug!("using module proxy {base}");

        let client = ProxyClient::new(base, self.transport);
        let resolved = client.resolve_version(&reference)?;
        let archive = client.fetch_archive(&resolved)?;

        Ok(FormulaInfo::new(resolved, archive.url, archive.digest))
    }
}

/// Resolve `raw` against the proxy configured in `env`.
///
/// # Errors
///
/// See [`InfoBuilder::build`].
pub fn build_info(
    raw: &str,
    env: &dyn GoEnv,
    transport: &dyn ProxyTransport,
) -> Result<FormulaInfo> {
    InfoBuilder::new(env, transport).build(raw)
}
