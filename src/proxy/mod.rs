//! Go module proxy client.
//!
//! # Sub-modules
//!
//! - [`transport`]: HTTP GET abstraction and the `ureq` implementation.
//! - [`client`]: version resolution, archive hashing and go.mod retrieval.

pub mod client;
pub mod transport;

pub use client::{ArchiveFetch, ProxyClient};
pub use transport::{HttpTransport, ProxyTransport};
