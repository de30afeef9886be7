//! Behavioural steps for configuration resolution.
#![expect(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use cucumber::{World, given, then, when};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use qa::config::{ConfigError, resolve};
use qa_lib::Options;

#[derive(Debug, Default, World)]
pub struct ConfigWorld {
    dir: Option<TempDir>,
    path: Option<PathBuf>,
    result: Option<Result<Options, ConfigError>>,
}

impl ConfigWorld {
    fn write(&mut self, name: &str, contents: &str) {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write file");
        self.dir = Some(dir);
        self.path = Some(path);
    }
}

#[given("no configuration file")]
fn no_configuration_file(world: &mut ConfigWorld) {
    world.path = None;
}

#[given(regex = r#"^a YAML configuration file setting "(.+)" to "(.+)"$"#)]
fn yaml_config(world: &mut ConfigWorld, key: String, value: String) {
    world.write("qa.yaml", &format!("{key}: {value}\n"));
}

#[given(regex = r#"^a JSON configuration file setting "(.+)" to "(.+)"$"#)]
fn json_config(world: &mut ConfigWorld, key: String, value: String) {
    let mut doc = serde_json::Map::new();
    doc.insert(key, Value::String(value));
    world.write("qa.json", &Value::Object(doc).to_string());
}

#[given("a malformed JSON configuration file")]
fn malformed_json(world: &mut ConfigWorld) {
    world.write("qa.json", "{ base_url");
}

#[given("a malformed YAML configuration file")]
fn malformed_yaml(world: &mut ConfigWorld) {
    world.write("qa.yaml", "base_url: [unclosed");
}

#[given("a missing configuration file")]
fn missing_configuration_file(world: &mut ConfigWorld) {
    world.path = Some(PathBuf::from("/nonexistent/nowhere.yaml"));
}

#[when("the configuration is resolved")]
fn resolve_configuration(world: &mut ConfigWorld) {
    world.result = Some(resolve(world.path.as_deref()));
}

#[then("the options are empty")]
fn options_are_empty(world: &mut ConfigWorld) {
    match world.result.take() {
        Some(Ok(options)) => assert!(options.is_empty()),
        other => panic!("expected empty options, got {other:?}"),
    }
}

#[then(regex = r#"^option "(.+)" is "(.+)"$"#)]
fn option_is(world: &mut ConfigWorld, key: String, expected: String) {
    match world.result.take() {
        Some(Ok(options)) => assert_eq!(options.get(&key), Some(&Value::String(expected))),
        other => panic!("expected success, got {other:?}"),
    }
}

#[then("configuration resolution fails")]
fn configuration_resolution_fails(world: &mut ConfigWorld) {
    match world.result.take() {
        Some(Err(_)) => {}
        other => panic!("expected error, got {other:?}"),
    }
}
