//! tfprobe - Terraform apply/assert/destroy checks
//!
//! A library for applying a Terraform root module, asserting on its outputs,
//! smoke-testing the API it deploys, and always tearing it down afterwards.

pub mod api;
pub mod check;
pub mod terraform;

mod error;

pub use api::{ApiError, Task, TaskApiClient, smoke_test_blocking};
pub use check::{CheckError, CheckReport, DEFAULT_OUTPUT, run_check, run_check_with};
pub use error::{Error, Result};
pub use terraform::{DestroyGuard, Options, Terraform, TerraformError};
