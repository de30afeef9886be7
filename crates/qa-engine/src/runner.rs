//! The Gherkin engine.
//!
//! Features run one after another in discovery order. Each scenario runs
//! the feature background, then the rule background when it belongs to a
//! rule, then its own steps. The first failing step fails the scenario and
//! skips the rest of it. The result set counts scenarios.
//!
//! A scenario outline runs once per row of its examples tables, with every
//! `<column>` placeholder in its title and steps replaced by the row's
//! value. Placeholders naming no column are left as written.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gherkin::{Feature, GherkinEnv, Scenario, Step};
use qa_lib::{
    Engine, EngineError, Event, EventBus, FeatureEvent, Options, ResultSet, ScenarioEvent,
    StepEvent,
};

use crate::discovery::{DEFAULT_FOLDER, discover};
use crate::{Scope, StepRegistry};

/// Engine executing Gherkin features against registered step definitions.
#[derive(Debug, Clone, Default)]
pub struct GherkinEngine {
    steps: Arc<StepRegistry>,
}

/// One executable scenario: a plain scenario or one outline row.
#[derive(Debug)]
struct Case {
    title: String,
    tags: Vec<String>,
    steps: Vec<Step>,
}

impl Case {
    fn expand(scenario: &Scenario) -> Vec<Self> {
        if scenario.examples.is_empty() {
            return vec![Self {
                title: scenario.name.clone(),
                tags: scenario.tags.clone(),
                steps: scenario.steps.clone(),
            }];
        }

        let mut cases = Vec::new();
        for examples in &scenario.examples {
            let Some((header, rows)) = examples
                .table
                .as_ref()
                .and_then(|table| table.rows.split_first())
            else {
                continue;
            };
            for row in rows {
                let values: BTreeMap<&str, &str> = header
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect();
                let steps = scenario
                    .steps
                    .iter()
                    .map(|step| Step {
                        value: substitute(&step.value, &values),
                        docstring: step.docstring.as_deref().map(|d| substitute(d, &values)),
                        ..step.clone()
                    })
                    .collect();
                cases.push(Self {
                    title: substitute(&scenario.name, &values),
                    tags: scenario.tags.iter().chain(&examples.tags).cloned().collect(),
                    steps,
                });
            }
        }
        cases
    }
}

#[derive(Debug, Default)]
struct Tally {
    passed: u64,
    failed: u64,
}

impl Tally {
    const fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    const fn results(&self) -> ResultSet {
        ResultSet::from_counts(self.passed, self.failed)
    }
}

impl GherkinEngine {
    /// Create an engine using `steps` for step definitions.
    #[must_use]
    pub fn new(steps: StepRegistry) -> Self {
        Self {
            steps: Arc::new(steps),
        }
    }

    fn run_feature(&self, scope: &Scope, feature: &Feature, bus: &EventBus, tally: &mut Tally) {
        bus.emit(&Event::Feature(FeatureEvent {
            title: feature.name.clone(),
        }));
        let background = feature
            .background
            .as_ref()
            .map(|b| b.steps.as_slice())
            .unwrap_or_default();

        for case in feature.scenarios.iter().flat_map(Case::expand) {
            let passed = self.run_case(scope, &[background], &case, bus);
            tally.record(passed);
        }
        for rule in &feature.rules {
            let rule_background = rule
                .background
                .as_ref()
                .map(|b| b.steps.as_slice())
                .unwrap_or_default();
            for case in rule.scenarios.iter().flat_map(Case::expand) {
                let passed = self.run_case(scope, &[background, rule_background], &case, bus);
                tally.record(passed);
            }
        }
    }

    fn run_case(
        &self,
        scope: &Scope,
        backgrounds: &[&[Step]],
        case: &Case,
        bus: &EventBus,
    ) -> bool {
        bus.emit(&Event::Scenario(ScenarioEvent {
            title: case.title.clone(),
            annotations: annotations(&case.tags),
        }));

        let steps = backgrounds
            .iter()
            .flat_map(|steps| steps.iter())
            .chain(&case.steps);
        for step in steps {
            let text = describe(step);
            bus.emit(&Event::Step(StepEvent { step: text.clone() }));
            if let Err(failure) = self.steps.execute(scope, &step.value) {
                tracing::debug!(
                    scenario = %case.title,
                    step = %text,
                    reason = %failure,
                    "Step failed"
                );
                bus.emit(&Event::StepFail(StepEvent { step: text }));
                return false;
            }
        }
        true
    }
}

impl Engine for GherkinEngine {
    type Scope = Scope;

    fn scope(&self, options: &Options) -> Scope {
        Scope::new(options.clone())
    }

    fn read(
        &self,
        scope: &Scope,
        folder: Option<&Path>,
        bus: &EventBus,
    ) -> impl Future<Output = Result<ResultSet, EngineError>> + Send {
        async move {
            let root = folder.map_or_else(|| PathBuf::from(DEFAULT_FOLDER), Path::to_path_buf);
            let files = tokio::task::spawn_blocking(move || discover(&root))
                .await
                .map_err(|e| EngineError::Internal(format!("feature discovery panicked: {e}")))??;

            let mut tally = Tally::default();
            for path in files {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| EngineError::Io {
                        path: path.clone(),
                        source,
                    })?;
                let feature = Feature::parse(&text, GherkinEnv::default()).map_err(|e| {
                    EngineError::Parse {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                tracing::debug!(
                    feature = %feature.name,
                    path = %path.display(),
                    "Running feature"
                );
                self.run_feature(scope, &feature, bus, &mut tally);
            }
            Ok(tally.results())
        }
    }
}

/// Step text as shown to the user: keyword followed by the step value.
fn describe(step: &Step) -> String {
    format!("{} {}", step.keyword.trim(), step.value)
}

/// Replace each `<name>` in `template` whose name is a key of `values`.
fn substitute(template: &str, values: &BTreeMap<&str, &str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, after)) = rest.split_once('<') {
        out.push_str(before);
        let replaced = after
            .split_once('>')
            .and_then(|(name, tail)| values.get(name).map(|value| (*value, tail)));
        match replaced {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Turn scenario tags into annotations.
///
/// `@key=value` becomes `key: value`; a bare `@tag` becomes `tag: "true"`.
fn annotations(tags: &[String]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|tag| {
            let tag = tag.trim_start_matches('@');
            match tag.split_once('=') {
                Some((key, value)) => (key.to_owned(), value.to_owned()),
                None => (tag.to_owned(), String::from("true")),
            }
        })
        .collect()
}
