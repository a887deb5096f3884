//! Module references of the form `module[@version-or-selector]`.
//!
//! A [`ModuleRef`] is what the user typed: syntactically permissive, never
//! rejected at parse time. Semantic checks happen when proxy paths are
//! derived. Once the proxy has answered, the reference is turned into a
//! [`ResolvedModule`] carrying a concrete version; the original reference is
//! left untouched.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The selector used when a reference carries neither version nor selector.
pub const LATEST: &str = "latest";

/// What follows the `@` in a module reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// An explicit version such as `v1.2.3`.
    Version(String),
    /// A proxy query token such as `latest` or `upgrade`.
    Special(String),
}

impl Selector {
    /// Classify the text after `@`: a leading `v` marks an explicit version.
    fn classify(text: &str) -> Self {
        if text.starts_with('v') {
            Self::Version(text.to_owned())
        } else {
            Self::Special(text.to_owned())
        }
    }

    /// Return the raw selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Version(text) | Self::Special(text) => text,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unresolved module reference.
///
/// # Examples
///
/// ```
/// use brewgo::descriptor::ModuleRef;
///
/// let reference = ModuleRef::parse("golang.org/x/tools/gopls@v0.16.1");
/// assert_eq!(reference.module(), "golang.org/x/tools/gopls");
/// assert_eq!(reference.version(), Some("v0.16.1"));
/// assert_eq!(reference.special(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    module: String,
    selector: Option<Selector>,
}

impl ModuleRef {
    /// Create a reference from its parts.
    #[must_use]
    pub fn new(module: impl Into<String>, selector: Option<Selector>) -> Self {
        Self {
            module: module.into(),
            selector,
        }
    }

    /// Parse `module[@selector]`, splitting on the first `@`.
    ///
    /// An empty suffix (`module@`) is treated as if no selector was given.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('@') {
            Some((module, suffix)) if !suffix.is_empty() => {
                Self::new(module, Some(Selector::classify(suffix)))
            }
            Some((module, _)) => Self::new(module, None),
            None => Self::new(raw, None),
        }
    }

    /// Return the reference with the `latest` selector when none is set.
    #[must_use]
    pub fn or_latest(self) -> Self {
        match self.selector {
            Some(_) => self,
            None => Self {
                selector: Some(Selector::Special(LATEST.to_owned())),
                ..self
            },
        }
    }

    /// Return the module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Return the selector, if any.
    #[must_use]
    pub const fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Return the explicit version, if one was given.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match &self.selector {
            Some(Selector::Version(version)) => Some(version),
            _ => None,
        }
    }

    /// Return the special selector, if one was given.
    #[must_use]
    pub fn special(&self) -> Option<&str> {
        match &self.selector {
            Some(Selector::Special(special)) => Some(special),
            _ => None,
        }
    }

    /// Pair this reference with the concrete version reported by the proxy.
    #[must_use]
    pub fn resolve(&self, version: impl Into<String>) -> ResolvedModule {
        ResolvedModule {
            module: self.module.clone(),
            version: version.into(),
            requested: self.selector.clone(),
        }
    }
}

impl FromStr for ModuleRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Some(selector) => write!(f, "{}@{selector}", self.module),
            None => f.write_str(&self.module),
        }
    }
}

/// A module reference whose version has been fixed by the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedModule {
    module: String,
    version: String,
    requested: Option<Selector>,
}

impl ResolvedModule {
    /// Return the module path.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Return the concrete version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Return the selector the user originally asked for.
    #[must_use]
    pub const fn requested(&self) -> Option<&Selector> {
        self.requested.as_ref()
    }

    /// View the resolved module as a reference pinned to its version.
    #[must_use]
    pub fn as_reference(&self) -> ModuleRef {
        ModuleRef::new(
            self.module.clone(),
            Some(Selector::Version(self.version.clone())),
        )
    }
}

impl fmt::Display for ResolvedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.module, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_explicit_version() {
        let reference = ModuleRef::parse("mod/path@v1.2.3");
        assert_eq!(reference.module(), "mod/path");
        assert_eq!(reference.version(), Some("v1.2.3"));
        assert_eq!(reference.special(), None);
    }

    #[test]
    fn parses_special_selector() {
        let reference = ModuleRef::parse("mod/path@latest");
        assert_eq!(reference.special(), Some("latest"));
        assert_eq!(reference.version(), None);
    }

    #[test]
    fn bare_module_defaults_to_latest() {
        let reference = ModuleRef::parse("mod/path");
        assert!(reference.selector().is_none());

        let defaulted = reference.or_latest();
        assert_eq!(defaulted.special(), Some(LATEST));
        assert_eq!(defaulted.version(), None);
    }

    #[test]
    fn or_latest_keeps_existing_selector() {
        let reference = ModuleRef::parse("mod/path@upgrade").or_latest();
        assert_eq!(reference.special(), Some("upgrade"));
    }

    #[test]
    fn splits_on_first_at_only() {
        let reference = ModuleRef::parse("mod/path@v1@extra");
        assert_eq!(reference.module(), "mod/path");
        assert_eq!(reference.version(), Some("v1@extra"));
    }

    #[test]
    fn empty_suffix_means_no_selector() {
        let reference = ModuleRef::parse("mod/path@");
        assert_eq!(reference.module(), "mod/path");
        assert!(reference.selector().is_none());
    }

    #[test]
    fn empty_module_is_accepted_structurally() {
        let reference = ModuleRef::parse("@latest");
        assert_eq!(reference.module(), "");
        assert_eq!(reference.special(), Some("latest"));
    }

    #[rstest]
    #[case::version("mod/path@v1.2.3")]
    #[case::special("mod/path@latest")]
    #[case::bare("mod/path")]
    fn display_round_trips(#[case] raw: &str) {
        let reference: ModuleRef = raw.parse().unwrap_or_else(|never| match never {});
        assert_eq!(reference.to_string(), raw);
    }

    #[test]
    fn resolve_keeps_original_reference_intact() {
        let reference = ModuleRef::parse("mod/path@latest");
        let resolved = reference.resolve("v1.0.0");

        assert_eq!(resolved.to_string(), "mod/path@v1.0.0");
        assert_eq!(
            resolved.requested(),
            Some(&Selector::Special("latest".to_owned()))
        );
        assert_eq!(reference.special(), Some("latest"));
        assert_eq!(reference.version(), None);
    }
}
