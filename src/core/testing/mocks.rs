//! Mock implementations for testing

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{CommandOutput, CommandRunner, CommandSpec, Result};

type Effect = Box<dyn Fn(&CommandSpec) + Send + Sync>;

struct Rule {
    pattern: String,
    output: CommandOutput,
    effect: Option<Effect>,
}

/// Scripted command runner.
///
/// Each rule matches when the rendered command line contains its pattern;
/// the first matching rule wins. Unmatched commands succeed with empty
/// output. Every invocation is recorded.
#[derive(Clone, Default)]
pub struct MockRunner {
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands containing `pattern` with the given exit code and output
    #[must_use]
    pub fn respond(self, pattern: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.push(pattern, output(exit_code, stdout, stderr), None);
        self
    }

    /// Like [`respond`](Self::respond), additionally running `effect` when matched
    /// (e.g. to drop a marker file the way installpkg would)
    #[must_use]
    pub fn respond_with<F>(self, pattern: &str, exit_code: i32, stderr: &str, effect: F) -> Self
    where
        F: Fn(&CommandSpec) + Send + Sync + 'static,
    {
        self.push(pattern, output(exit_code, "", stderr), Some(Box::new(effect)));
        self
    }

    fn push(&self, pattern: &str, output: CommandOutput, effect: Option<Effect>) {
        self.rules.lock().push(Rule {
            pattern: pattern.to_string(),
            output,
            effect,
        });
    }

    /// All recorded invocations, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of recorded invocations whose command line contains `pattern`
    pub fn count(&self, pattern: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(pattern))
            .count()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().push(spec.clone());

        let line = spec.to_string();
        let rules = self.rules.lock();
        match rules.iter().find(|rule| line.contains(&rule.pattern)) {
            Some(rule) => {
                if let Some(effect) = &rule.effect {
                    effect(spec);
                }
                Ok(rule.output.clone())
            }
            None => Ok(CommandOutput::default()),
        }
    }
}

fn output(exit_code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}
