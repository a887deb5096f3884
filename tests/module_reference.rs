//! Behaviour-driven coverage for module references and proxy paths.

use std::cell::RefCell;
use std::convert::Infallible;
use std::str::FromStr;

use brewgo::descriptor::ModuleRef;
use brewgo::proxy_path::ProxyPath;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// A step placeholder with its surrounding quotes removed.
#[derive(Debug)]
struct Quoted(String);

impl FromStr for Quoted {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''));

        Ok(Self(trimmed.to_owned()))
    }
}

impl Quoted {
    fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[fixture]
fn reference() -> RefCell<Option<ModuleRef>> {
    RefCell::new(None)
}

#[fixture]
fn derived() -> RefCell<Option<Result<String, String>>> {
    RefCell::new(None)
}

fn current_reference(reference: &RefCell<Option<ModuleRef>>) -> ModuleRef {
    reference
        .borrow()
        .clone()
        .unwrap_or_else(|| panic!("a module reference should be given"))
}

#[given("the module reference {raw}")]
fn given_reference(reference: &RefCell<Option<ModuleRef>>, raw: Quoted) {
    reference.borrow_mut().replace(ModuleRef::parse(raw.as_str()));
}

#[when("the latest path is derived")]
fn derive_latest(
    reference: &RefCell<Option<ModuleRef>>,
    derived: &RefCell<Option<Result<String, String>>>,
) {
    let target = current_reference(reference).or_latest();
    let outcome = ProxyPath::Latest
        .derive(&target)
        .map_err(|err| err.to_string());
    derived.borrow_mut().replace(outcome);
}

#[when("the archive path is derived")]
fn derive_archive(
    reference: &RefCell<Option<ModuleRef>>,
    derived: &RefCell<Option<Result<String, String>>>,
) {
    let target = current_reference(reference);
    let outcome = ProxyPath::Archive
        .derive(&target)
        .map_err(|err| err.to_string());
    derived.borrow_mut().replace(outcome);
}

#[then("the derived path is {expected}")]
fn assert_path(derived: &RefCell<Option<Result<String, String>>>, expected: Quoted) {
    match derived.borrow().as_ref() {
        Some(Ok(path)) => assert_eq!(path, expected.as_str()),
        Some(Err(error)) => panic!("expected a path but derivation failed: {error}"),
        None => panic!("a path should be derived"),
    }
}

#[then("path derivation fails mentioning {snippet}")]
fn assert_failure(derived: &RefCell<Option<Result<String, String>>>, snippet: Quoted) {
    match derived.borrow().as_ref() {
        Some(Err(error)) => assert!(
            error.contains(snippet.as_str()),
            "expected error '{error}' to mention '{}'",
            snippet.as_str(),
        ),
        Some(Ok(path)) => panic!("expected derivation to fail but got {path}"),
        None => panic!("a path should be derived"),
    }
}

#[then("the reference displays as {expected}")]
fn assert_display(reference: &RefCell<Option<ModuleRef>>, expected: Quoted) {
    assert_eq!(current_reference(reference).to_string(), expected.as_str());
}

#[scenario("tests/features/module_reference.feature", index = 0)]
fn scenario_bare_module(
    reference: RefCell<Option<ModuleRef>>,
    derived: RefCell<Option<Result<String, String>>>,
) {
    let _ = (reference, derived);
}

#[scenario("tests/features/module_reference.feature", index = 1)]
fn scenario_explicit_version(
    reference: RefCell<Option<ModuleRef>>,
    derived: RefCell<Option<Result<String, String>>>,
) {
    let _ = (reference, derived);
}

#[scenario("tests/features/module_reference.feature", index = 2)]
fn scenario_dot_segments(
    reference: RefCell<Option<ModuleRef>>,
    derived: RefCell<Option<Result<String, String>>>,
) {
    let _ = (reference, derived);
}

#[scenario("tests/features/module_reference.feature", index = 3)]
fn scenario_special_selector(
    reference: RefCell<Option<ModuleRef>>,
    derived: RefCell<Option<Result<String, String>>>,
) {
    let _ = (reference, derived);
}

#[scenario("tests/features/module_reference.feature", index = 4)]
fn scenario_display(
    reference: RefCell<Option<ModuleRef>>,
    derived: RefCell<Option<Result<String, String>>>,
) {
    let _ = (reference, derived);
}
