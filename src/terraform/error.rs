use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while driving the Terraform CLI.
///
/// SECURITY: Messages must NEVER contain `-var` values; they may hold secrets.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// The root module directory is missing or not a directory
    #[error("invalid terraform directory: '{}'", .path.display())]
    InvalidDir { path: PathBuf },

    /// The terraform binary could not be spawned because it does not exist
    #[error("terraform binary not found: '{}'", .binary.display())]
    BinaryNotFound { binary: PathBuf },

    /// Spawning or waiting on the process failed
    #[error("failed to run terraform {subcommand}: {source}")]
    Spawn {
        subcommand: String,
        #[source]
        source: std::io::Error,
    },

    /// The subcommand exited unsuccessfully
    #[error("terraform {subcommand} failed ({}): {stderr}", exit_label(.status))]
    Command {
        subcommand: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The requested output is not defined in state
    #[error("output not found: '{name}'")]
    OutputNotFound { name: String },

    /// `terraform output -json` returned something that is not JSON
    #[error("failed to parse output: {message}")]
    OutputParse { message: String },
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
