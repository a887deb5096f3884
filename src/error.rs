//! Error types for module resolution and formula generation.
//!
//! Every stage of the pipeline reports failures through [`BrewgoError`]. The
//! pipeline never recovers locally: the first error aborts the whole build and
//! is surfaced unchanged to the caller.

use thiserror::Error;

/// Errors that can occur while resolving a Go module into a formula.
#[derive(Debug, Error)]
pub enum BrewgoError {
    /// A required Go environment value was absent or blank.
    #[error("env {name} is empty")]
    EmptyEnvironment {
        /// Name of the environment variable that was queried.
        name: String,
    },

    /// The `go env` command could not be run or reported a failure.
    #[error("failed to read go env {name}: {reason}")]
    EnvCommand {
        /// Name of the environment variable that was queried.
        name: String,
        /// Description of the failure.
        reason: String,
    },

    /// The proxy configuration cannot be used to fetch modules.
    #[error("unusable GOPROXY {value:?}: {reason}")]
    InvalidProxyConfig {
        /// The offending proxy entry.
        value: String,
        /// Why the entry was rejected.
        reason: String,
    },

    /// An operation needed a concrete version but none was available.
    #[error("module {module} has no concrete version")]
    MissingVersion {
        /// Module path of the reference.
        module: String,
    },

    /// A version query was requested for a reference with no selector.
    #[error("module {module} has neither a version nor a selector")]
    MissingSelector {
        /// Module path of the reference.
        module: String,
    },

    /// The proxy returned a body that could not be interpreted.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse {
        /// The URL that was requested.
        url: String,
        /// Description of the decoding failure.
        reason: String,
    },

    /// The proxy does not know the requested module or version.
    #[error("not found on proxy: {url}")]
    NotFound {
        /// The URL that returned 404 or 410.
        url: String,
    },

    /// An HTTP request failed.
    #[error("request to {url} failed: {reason}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Description of the failure.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write the rendered formula.
    #[error("failed to write formula")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`BrewgoError`].
pub type Result<T> = std::result::Result<T, BrewgoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_names_the_variable() {
        let err = BrewgoError::EmptyEnvironment {
            name: "GOPROXY".to_owned(),
        };
        assert_eq!(err.to_string(), "env GOPROXY is empty");
    }

    #[test]
    fn invalid_proxy_config_quotes_the_value() {
        let err = BrewgoError::InvalidProxyConfig {
            value: "direct".to_owned(),
            reason: "a proxy URL is required".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"direct\""));
        assert!(msg.contains("a proxy URL is required"));
    }

    #[test]
    fn missing_version_includes_module() {
        let err = BrewgoError::MissingVersion {
            module: "github.com/user/pkg".to_owned(),
        };
        assert!(err.to_string().contains("github.com/user/pkg"));
    }

    #[test]
    fn fetch_error_includes_url_and_reason() {
        let err = BrewgoError::Fetch {
            url: "https://proxy.test/x/@latest".to_owned(),
            reason: "connection refused".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://proxy.test/x/@latest"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn write_failed_preserves_source() {
        let source = std::io::Error::other("broken pipe");
        let err = BrewgoError::WriteFailed { source };
        assert!(err.to_string().contains("write"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
