use std::collections::BTreeMap;

use super::output::{self, OutputValue};
use super::runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
use super::{Options, TerraformError};

/// Typed wrapper over the terraform CLI for one root module.
pub struct Terraform<R: CommandRunner = SystemRunner> {
    options: Options,
    runner: R,
}

impl Terraform<SystemRunner> {
    pub fn new(options: Options) -> Result<Self, TerraformError> {
        Self::with_runner(options, SystemRunner)
    }
}

impl<R: CommandRunner> Terraform<R> {
    /// NOTE: Primarily used for testing with a recording runner.
    pub fn with_runner(options: Options, runner: R) -> Result<Self, TerraformError> {
        options.validate()?;
        Ok(Self { options, runner })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn init(&self) -> Result<(), TerraformError> {
        if let Some(dir) = &self.options.plugin_cache_dir {
            std::fs::create_dir_all(dir).map_err(|e| TerraformError::Spawn {
                subcommand: "init".to_string(),
                source: e,
            })?;
        }
        self.execute(self.options.init_args()).map(drop)
    }

    pub fn apply(&self) -> Result<(), TerraformError> {
        self.execute(self.options.apply_args()).map(drop)
    }

    pub fn init_and_apply(&self) -> Result<(), TerraformError> {
        self.init()?;
        self.apply()
    }

    pub fn output(&self, name: &str) -> Result<String, TerraformError> {
        let result = self.execute(self.options.output_args(Some(name)));
        match result {
            Ok(out) => output::parse_single(&out.stdout),
            Err(TerraformError::Command { stderr, .. }) if output::is_missing_output(&stderr) => {
                Err(TerraformError::OutputNotFound {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn output_all(&self) -> Result<BTreeMap<String, OutputValue>, TerraformError> {
        let out = self.execute(self.options.output_args(None))?;
        output::parse_all(&out.stdout)
    }

    pub fn destroy(&self) -> Result<(), TerraformError> {
        self.execute(self.options.destroy_args()).map(drop)
    }

    fn execute(&self, args: Vec<String>) -> Result<CommandOutput, TerraformError> {
        let invocation = Invocation {
            program: self.options.binary.clone(),
            args,
            dir: self.options.terraform_dir.clone(),
            env: self.options.command_env(),
        };
        let subcommand = invocation.subcommand().to_string();

        tracing::info!(
            dir = %invocation.dir.display(),
            args = %invocation.display_args(),
            "running terraform {}",
            subcommand
        );

        let out = self.runner.run(&invocation)?;

        tracing::debug!(subcommand = %subcommand, status = ?out.status, "terraform exited");

        if out.success() {
            return Ok(out);
        }

        tracing::error!(
            subcommand = %subcommand,
            status = ?out.status,
            "terraform {} failed",
            subcommand
        );

        Err(TerraformError::Command {
            subcommand,
            status: out.status,
            stderr: self.options.redact(out.stderr.trim()),
        })
    }
}

impl<R: CommandRunner> std::fmt::Debug for Terraform<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terraform")
            .field("dir", &self.options.terraform_dir)
            .field("binary", &self.options.binary)
            .field("vars", &"[REDACTED]")
            .finish()
    }
}
