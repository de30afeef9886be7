//! Behavioural steps for verbosity-gated progress reporting.

use cucumber::{World, given, then, when};
use qa::reporter::{Reporter, Sink, Verbosity};
use qa_lib::{Event, EventBus, EventKind, FeatureEvent, StepEvent};
use test_support::SharedBuffer;

#[derive(Debug, Default, World)]
pub struct ReportWorld {
    bus: EventBus,
    reporter: Option<Reporter>,
    output: SharedBuffer,
}

fn kind_named(name: &str) -> EventKind {
    EventKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == name)
        .unwrap_or_else(|| panic!("unknown event kind {name}"))
}

#[given(regex = r"^a reporter with verbose (on|off) and debug (on|off)$")]
fn reporter_with(world: &mut ReportWorld, verbose: String, debug: String) {
    let verbosity = Verbosity {
        verbose: verbose == "on",
        debug: debug == "on",
    };
    let sink = Sink::new(world.output.clone());
    world.reporter = Some(Reporter::attach(&mut world.bus, verbosity, &sink));
}

#[when(regex = r#"^feature "(.+)" is emitted$"#)]
fn feature_emitted(world: &mut ReportWorld, title: String) {
    world.bus.emit(&Event::Feature(FeatureEvent { title }));
}

#[when(regex = r#"^step "(.+)" is emitted$"#)]
fn step_emitted(world: &mut ReportWorld, name: String) {
    world.bus.emit(&Event::Step(StepEvent { step: name }));
}

#[when(regex = r#"^failing step "(.+)" is emitted$"#)]
fn failing_step_emitted(world: &mut ReportWorld, name: String) {
    world.bus.emit(&Event::StepFail(StepEvent { step: name }));
}

#[then(regex = r#"^(\d+) listeners are attached for "(.+)"$"#)]
fn listeners_attached(world: &mut ReportWorld, count: usize, kind: String) {
    assert_eq!(world.bus.listener_count(kind_named(&kind)), count);
}

#[then(regex = r"^the report has (\d+) lines$")]
fn report_has_lines(world: &mut ReportWorld, count: usize) {
    assert_eq!(world.output.lines().len(), count);
}

#[then(regex = r#"^report line (\d+) is "(.+)"$"#)]
fn report_line_is(world: &mut ReportWorld, number: usize, expected: String) {
    let lines = world.output.lines();
    let line = number
        .checked_sub(1)
        .and_then(|index| lines.get(index))
        .unwrap_or_else(|| panic!("report has no line {number}: {lines:?}"));
    assert_eq!(line, &expected);
}
