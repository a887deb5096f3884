//! Homebrew formula generation for Go modules.
//!
//! This crate resolves a Go module reference against a module proxy, downloads
//! the module's source archive, computes its SHA-256 digest and renders a
//! Homebrew formula. It is used by the `brewgo` CLI binary and can be consumed
//! programmatically.
//!
//! # Modules
//!
//! - [`descriptor`] - Module reference parsing and resolved modules
//! - [`digest`] - SHA-256 archive digests
//! - [`env`] - Go environment lookup and proxy base resolution
//! - [`error`] - Error taxonomy for the resolution pipeline
//! - [`formula`] - Homebrew formula rendering
//! - [`info`] - Pipeline orchestration into formula info
//! - [`proxy`] - Module proxy client and HTTP transport
//! - [`proxy_path`] - Module proxy protocol paths
//! - `test_support` - In-memory environment and transport (feature `test-support`)
//!
//! # Example
//!
//! ```no_run
//! use brewgo::env::GoCommandEnv;
//! use brewgo::info::build_info;
//! use brewgo::proxy::HttpTransport;
//!
//! let info = build_info("golang.org/x/tools/gopls", &GoCommandEnv::new(), &HttpTransport::default())?;
//! info.write_formula(&mut std::io::stdout())?;
//! # Ok::<(), brewgo::error::BrewgoError>(())
//! ```

pub mod descriptor;
pub mod digest;
pub mod env;
pub mod error;
pub mod formula;
pub mod info;
pub mod proxy;
pub mod proxy_path;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use descriptor::{ModuleRef, ResolvedModule, Selector};
pub use error::{BrewgoError, Result};
pub use info::{FormulaInfo, InfoBuilder, build_info};
