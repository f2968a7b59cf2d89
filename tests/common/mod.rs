#![allow(dead_code)]

pub mod fake_api;

use std::collections::HashMap;
use std::sync::Mutex;

use tfprobe::terraform::{CommandOutput, CommandRunner, Invocation};
use tfprobe::{Options, Terraform, TerraformError};

/// Records every invocation and answers per subcommand; unscripted
/// subcommands succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    replies: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, subcommand: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.insert(
            subcommand.to_string(),
            CommandOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.subcommand().to_string())
            .collect()
    }

    pub fn count(&self, subcommand: &str) -> usize {
        self.subcommands()
            .iter()
            .filter(|s| s.as_str() == subcommand)
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, TerraformError> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok(self
            .replies
            .get(invocation.subcommand())
            .cloned()
            .unwrap_or(CommandOutput {
                status: Some(0),
                ..Default::default()
            }))
    }
}

pub fn terraform(runner: RecordingRunner) -> (tempfile::TempDir, Terraform<RecordingRunner>) {
    let dir = tempfile::tempdir().unwrap();
    let tf = Terraform::with_runner(Options::new(dir.path()), runner).unwrap();
    (dir, tf)
}
