//! Behavioural test steps for the CLI argument parser.
//!
//! These steps drive the Cucumber scenarios that verify the flag surface:
//! verbosity switches, the `--folder` and `--config` paths, and rejection of
//! malformed input.

use clap::Parser;
use cucumber::{World, given, then, when};
use std::ffi::OsString;
use std::path::PathBuf;

use qa::Args;

#[derive(Debug, Default, World)]
pub struct CliWorld {
    args: Option<Vec<OsString>>,
    result: Option<Result<Args, clap::Error>>,
}

impl CliWorld {
    fn parsed(&self) -> &Args {
        match self.result.as_ref() {
            Some(Ok(args)) => args,
            other => panic!("expected parsed args, got {other:?}"),
        }
    }
}

#[given("no CLI arguments")]
fn no_cli_arguments(world: &mut CliWorld) {
    world.args = Some(vec![OsString::from("qa")]);
}

#[given(regex = r#"^CLI arguments "(.+)"$"#)]
fn cli_arguments(world: &mut CliWorld, line: String) {
    let mut args = vec![OsString::from("qa")];
    args.extend(line.split_whitespace().map(OsString::from));
    world.args = Some(args);
}

#[when("they are parsed")]
#[expect(clippy::expect_used, reason = "simplify test failure output")]
fn they_are_parsed(world: &mut CliWorld) {
    let args = world
        .args
        .clone()
        .expect("world.args should be set by a given step");
    world.result = Some(Args::try_parse_from(args));
}

#[then("parsing succeeds")]
fn parsing_succeeds(world: &mut CliWorld) {
    world.parsed();
}

#[then("an error is returned")]
fn an_error_is_returned(world: &mut CliWorld) {
    match world.result.take() {
        Some(Err(_)) => {}
        other => panic!("expected error, got {other:?}"),
    }
}

#[then(regex = r"^verbose mode is (on|off)$")]
fn verbose_mode_is(world: &mut CliWorld, state: String) {
    assert_eq!(world.parsed().verbose, state == "on");
}

#[then(regex = r"^debug mode is (on|off)$")]
fn debug_mode_is(world: &mut CliWorld, state: String) {
    assert_eq!(world.parsed().debug, state == "on");
}

#[then(regex = r#"^the folder is "(.+)"$"#)]
fn the_folder_is(world: &mut CliWorld, expected: String) {
    assert_eq!(world.parsed().folder, Some(PathBuf::from(expected)));
}

#[then(regex = r#"^the config path is "(.+)"$"#)]
fn the_config_path_is(world: &mut CliWorld, expected: String) {
    assert_eq!(world.parsed().config, Some(PathBuf::from(expected)));
}
