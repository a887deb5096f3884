//! Go module proxy protocol paths.
//!
//! Every derived path is rooted (starts with a single `/`) so it can be
//! appended to a proxy base URL verbatim. Module paths, versions and
//! selectors are each cleaned lexically as rooted paths before
//! interpolation, so `.` and `..` segments can never walk outside the
//! module's namespace on the proxy. Upper-case letters are then
//! case-encoded as the proxy protocol requires.

use crate::descriptor::{ModuleRef, Selector};
use crate::error::{BrewgoError, Result};

/// The kinds of proxy query this crate knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyPath {
    /// `/<module>/@<selector>`: version info for a version or special selector.
    Latest,
    /// `/<module>/@v/<version>.info`: metadata for an explicit version.
    VersionInfo,
    /// `/<module>/@v/<version>.mod`: the module's go.mod file.
    GoMod,
    /// `/<module>/@v/<version>.zip`: the module source archive.
    Archive,
}

impl ProxyPath {
    /// Derive the proxy sub-path of this kind for `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`BrewgoError::MissingSelector`] when a [`ProxyPath::Latest`]
    /// path is requested for a reference with no selector, and
    /// [`BrewgoError::MissingVersion`] when any other kind is requested for a
    /// reference without an explicit version. A selector or version that
    /// cleans down to nothing counts as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use brewgo::descriptor::ModuleRef;
    /// use brewgo::proxy_path::ProxyPath;
    ///
    /// let reference = ModuleRef::parse("github.com/user/pkg@v1.2.3");
    /// let path = ProxyPath::Archive.derive(&reference).unwrap();
    /// assert_eq!(path, "/github.com/user/pkg/@v/v1.2.3.zip");
    /// ```
    pub fn derive(self, reference: &ModuleRef) -> Result<String> {
        let module = case_encode(&clean_module(reference.module()));
        match self {
            Self::Latest => {
                let selector = reference
                    .selector()
                    .map(Selector::as_str)
                    .and_then(clean_rooted)
                    .ok_or_else(|| BrewgoError::MissingSelector {
                        module: reference.module().to_owned(),
                    })?;
                Ok(format!("/{module}/@{}", case_encode(&selector)))
            }
            Self::VersionInfo => versioned(reference, &module, "info"),
            Self::GoMod => versioned(reference, &module, "mod"),
            Self::Archive => versioned(reference, &module, "zip"),
        }
    }
}

fn versioned(reference: &ModuleRef, module: &str, extension: &str) -> Result<String> {
    let version = reference
        .version()
        .and_then(clean_rooted)
        .ok_or_else(|| BrewgoError::MissingVersion {
            module: reference.module().to_owned(),
        })?;
    Ok(format!("/{module}/@v/{}.{extension}", case_encode(&version)))
}

/// Clean a module path for interpolation after the leading `/`.
fn clean_module(module: &str) -> String {
    clean_rooted(module).unwrap_or_default()
}

/// Clean `text` as a rooted path and drop the root, so `..` can never climb
/// above the element it is interpolated under. `None` when nothing is left.
fn clean_rooted(text: &str) -> Option<String> {
    let cleaned = clean_path(&format!("/{text}"));
    let relative = cleaned.trim_start_matches('/');
    (!relative.is_empty()).then(|| relative.to_owned())
}

/// Apply the module proxy's case encoding.
///
/// Each upper-case ASCII letter becomes `!` followed by its lower-case form.
///
/// # Examples
///
/// ```
/// use brewgo::proxy_path::case_encode;
///
/// assert_eq!(case_encode("github.com/BurntSushi/toml"), "github.com/!burnt!sushi/toml");
/// assert_eq!(case_encode("v1.0.0"), "v1.0.0");
/// ```
#[must_use]
pub fn case_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            encoded.push('!');
            encoded.push(c.to_ascii_lowercase());
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Canonicalise a slash-separated path lexically.
///
/// Repeated separators collapse, `.` elements disappear, and `..` removes the
/// preceding element. A `..` that would climb above the root of a rooted
/// path is dropped; at the start of a relative path it is kept. The empty
/// path cleans to `.`. Cleaning is idempotent.
///
/// # Examples
///
/// ```
/// use brewgo::proxy_path::clean_path;
///
/// assert_eq!(clean_path("a/../b"), "b");
/// assert_eq!(clean_path("/a//b/./c/"), "/a/b/c");
/// assert_eq!(clean_path(""), ".");
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut elements: Vec<&str> = Vec::new();

    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => match elements.last() {
                Some(&last) if last != ".." => {
                    elements.pop();
                }
                _ if rooted => {}
                _ => elements.push(".."),
            },
            other => elements.push(other),
        }
    }

    let joined = elements.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}
