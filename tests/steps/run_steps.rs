//! Behavioural steps for end-to-end runs against a scripted engine.

use cucumber::{World, given, then, when};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use qa::reporter::Sink;
use qa::{Args, RunError, exit_status, run};
use qa_lib::{Event, ResultSet, StepEvent};
use test_support::{ReadLog, ScriptedEngine, SharedBuffer};

#[derive(Debug, Default, World)]
pub struct RunWorld {
    engine: Option<ScriptedEngine>,
    reads: Option<ReadLog>,
    args: Args,
    config_dir: Option<TempDir>,
    output: SharedBuffer,
    result: Option<Result<ResultSet, RunError>>,
}

impl RunWorld {
    fn set_engine(&mut self, engine: ScriptedEngine) {
        self.reads = Some(engine.reads());
        self.engine = Some(engine);
    }
}

#[given(regex = r"^an engine reporting (\d+) results with (\d+) failures$")]
fn engine_reporting(world: &mut RunWorld, total: u64, fails: u64) {
    let results = ResultSet::new(total, fails).unwrap_or_else(|e| panic!("invalid counts: {e}"));
    world.set_engine(ScriptedEngine::completing(results));
}

#[given(regex = r#"^an engine that fails with "(.+)"$"#)]
fn engine_failing(world: &mut RunWorld, message: String) {
    world.set_engine(ScriptedEngine::failing(message));
}

#[given(regex = r#"^the engine emits a failing step "(.+)"$"#)]
fn engine_emits_failing_step(world: &mut RunWorld, name: String) {
    let engine = world
        .engine
        .take()
        .unwrap_or_else(|| panic!("an engine must be configured first"));
    world.set_engine(engine.with_events([Event::StepFail(StepEvent { step: name })]));
}

#[given("verbose output")]
fn verbose_output(world: &mut RunWorld) {
    world.args.verbose = true;
}

#[given("a malformed configuration file")]
fn malformed_configuration(world: &mut RunWorld) {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("temp dir: {e}"));
    let path = dir.path().join("qa.json");
    fs::write(&path, "{ not json").unwrap_or_else(|e| panic!("write config: {e}"));
    world.args.config = Some(path);
    world.config_dir = Some(dir);
}

#[when(regex = r#"^the suite is run against "(.+)"$"#)]
async fn suite_is_run(world: &mut RunWorld, folder: String) {
    world.args.folder = Some(PathBuf::from(folder));
    let engine = world
        .engine
        .take()
        .unwrap_or_else(|| panic!("an engine must be configured first"));
    let sink = Sink::new(world.output.clone());
    world.result = Some(run(&world.args, engine, sink).await);
}

#[then(regex = r#"^the report contains "(.+)"$"#)]
fn report_contains(world: &mut RunWorld, expected: String) {
    let lines = world.output.lines();
    assert!(
        lines.contains(&expected),
        "expected {expected:?} in {lines:?}"
    );
}

#[then("the report is empty")]
fn report_is_empty(world: &mut RunWorld) {
    assert_eq!(world.output.contents(), "");
}

#[then(regex = r"^the exit status is (\d+)$")]
fn exit_status_is(world: &mut RunWorld, expected: u8) {
    let result = world
        .result
        .as_ref()
        .unwrap_or_else(|| panic!("the suite must be run first"));
    assert_eq!(exit_status(result), expected);
}

#[then("the engine was never started")]
fn engine_never_started(world: &mut RunWorld) {
    let reads = world
        .reads
        .as_ref()
        .unwrap_or_else(|| panic!("an engine must be configured first"));
    assert!(reads.calls().is_empty());
    assert!(matches!(world.result, Some(Err(RunError::Config(_)))));
}
