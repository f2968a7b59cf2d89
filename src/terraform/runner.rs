use std::io;
use std::path::PathBuf;
use std::process::Command;

use super::TerraformError;

/// One fully-resolved terraform process launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Arguments safe for logs: every `-var key=value` keeps only its key.
    pub fn display_args(&self) -> String {
        let mut shown = Vec::with_capacity(self.args.len());
        let mut redact_next = false;
        for arg in &self.args {
            if redact_next {
                let key = arg.split_once('=').map_or(arg.as_str(), |(k, _)| k);
                shown.push(format!("{key}=[REDACTED]"));
                redact_next = false;
            } else {
                redact_next = arg == "-var";
                shown.push(arg.clone());
            }
        }
        shown.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Seam between the typed client and the operating system.
///
/// Implementations block until the process exits and must not interpret
/// the exit status.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, TerraformError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, TerraformError> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => TerraformError::BinaryNotFound {
                    binary: invocation.program.clone(),
                },
                _ => TerraformError::Spawn {
                    subcommand: invocation.subcommand().to_string(),
                    source: e,
                },
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
