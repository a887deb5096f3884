//! Behaviour-driven tests for the print command.

use std::cell::{Ref, RefCell};
use std::convert::Infallible;
use std::str::FromStr;

use brewgo::test_support::{StaticEnv, StubTransport};
use brewgo_cli::cli::Cli;
use brewgo_cli::command::{Context, run};
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const PROXY: &str = "https://proxy.example";

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

#[derive(Debug, Default)]
struct Outcome {
    error: Option<String>,
    stdout: String,
}

#[fixture]
fn transport() -> RefCell<StubTransport> {
    RefCell::new(StubTransport::new())
}

#[fixture]
fn outcome() -> RefCell<Option<Outcome>> {
    RefCell::new(None)
}

fn finished(outcome: &RefCell<Option<Outcome>>) -> Ref<'_, Outcome> {
    Ref::map(outcome.borrow(), |slot| {
        slot.as_ref()
            .unwrap_or_else(|| panic!("brewgo should have run"))
    })
}

#[given("the proxy serves {module} at {version}")]
fn proxy_serves(transport: &RefCell<StubTransport>, module: Quoted, version: Quoted) {
    let (path, tag) = (module.as_str(), version.as_str());
    let stub = StubTransport::new()
        .with_response(
            &format!("{PROXY}/{path}/@latest"),
            format!(r#"{{"Version":"{tag}"}}"#),
        )
        .with_response(&format!("{PROXY}/{path}/@v/{tag}.zip"), "archive");
    transport.replace(stub);
}

#[when("brewgo runs with {arguments}")]
fn run_brewgo(
    transport: &RefCell<StubTransport>,
    outcome: &RefCell<Option<Outcome>>,
    arguments: Quoted,
) {
    let args = std::iter::once("brewgo").chain(arguments.as_str().split_whitespace());
    let cli = Cli::try_parse_from(args).unwrap_or_else(|err| panic!("arguments rejected: {err}"));
    let env = StaticEnv::goproxy(PROXY);
    let stub = transport.borrow();
    let context = Context {
        env: &env,
        transport: &*stub,
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let result = run(&cli, &context, &mut stdout, &mut stderr);

    outcome.borrow_mut().replace(Outcome {
        error: result.err().map(|err| err.to_string()),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
    });
}

#[then("the command succeeds")]
fn assert_success(outcome: &RefCell<Option<Outcome>>) {
    let finished_run = finished(outcome);
    assert!(
        finished_run.error.is_none(),
        "expected success but got {:?}",
        finished_run.error
    );
}

#[then("the command fails mentioning {snippet}")]
fn assert_failure(outcome: &RefCell<Option<Outcome>>, snippet: Quoted) {
    let finished_run = finished(outcome);
    match finished_run.error.as_deref() {
        Some(error) => assert!(
            error.contains(snippet.as_str()),
            "expected error '{error}' to mention '{}'",
            snippet.as_str(),
        ),
        None => panic!("expected brewgo to fail"),
    }
}

#[then("the formula declares class {name}")]
fn assert_class(outcome: &RefCell<Option<Outcome>>, name: Quoted) {
    let expected = format!("class {} < Formula", name.as_str());
    assert!(finished(outcome).stdout.starts_with(&expected));
}

#[then("the formula pins version {version}")]
fn assert_version(outcome: &RefCell<Option<Outcome>>, version: Quoted) {
    let expected = format!("version \"{}\"", version.as_str());
    assert!(finished(outcome).stdout.contains(&expected));
}

#[then("no formula is printed")]
fn assert_no_formula(outcome: &RefCell<Option<Outcome>>) {
    assert!(finished(outcome).stdout.is_empty());
}

#[scenario("tests/features/print_formula.feature", index = 0)]
fn scenario_print_latest(
    transport: RefCell<StubTransport>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (transport, outcome);
}

#[scenario("tests/features/print_formula.feature", index = 1)]
fn scenario_print_without_target(
    transport: RefCell<StubTransport>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (transport, outcome);
}

#[scenario("tests/features/print_formula.feature", index = 2)]
fn scenario_install_unsupported(
    transport: RefCell<StubTransport>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (transport, outcome);
}
