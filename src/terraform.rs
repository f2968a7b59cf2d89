mod client;
mod error;
mod guard;
mod options;
mod output;
mod runner;

pub use client::Terraform;
pub use error::TerraformError;
pub use guard::DestroyGuard;
pub use options::{DEFAULT_BINARY, Options};
pub use output::{OutputValue, render_value};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
