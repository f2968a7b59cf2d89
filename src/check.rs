//! Apply a root module, assert on one output, and always tear it down.

use thiserror::Error;

use crate::terraform::{CommandRunner, DestroyGuard, Terraform, TerraformError};

pub const DEFAULT_OUTPUT: &str = "api_endpoint";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CheckError {
    /// init or apply failed; nothing after it ran
    #[error("setup failed: {0}")]
    Setup(#[source] TerraformError),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("verification of '{output}' failed: {source}")]
    Verification {
        output: String,
        #[source]
        source: BoxError,
    },

    #[error("teardown failed: {0}")]
    Teardown(#[source] TerraformError),

    #[error("{primary}; destroy also failed: {teardown}")]
    Compound {
        primary: Box<CheckError>,
        teardown: TerraformError,
    },
}

impl CheckError {
    /// The failure that happened before teardown, if any.
    pub fn primary(&self) -> Option<&CheckError> {
        match self {
            CheckError::Teardown(_) => None,
            CheckError::Compound { primary, .. } => Some(&**primary),
            other => Some(other),
        }
    }

    pub fn teardown_error(&self) -> Option<&TerraformError> {
        match self {
            CheckError::Teardown(e) | CheckError::Compound { teardown: e, .. } => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub output_name: String,
    pub value: String,
}

pub fn run_check<R: CommandRunner>(
    terraform: &Terraform<R>,
    output_name: &str,
) -> Result<CheckReport, CheckError> {
    run_check_with(terraform, output_name, |_| Ok::<(), BoxError>(()))
}

/// Like [`run_check`], with `verify` run against the output value while the
/// infrastructure is still up.
pub fn run_check_with<R, F, E>(
    terraform: &Terraform<R>,
    output_name: &str,
    verify: F,
) -> Result<CheckReport, CheckError>
where
    R: CommandRunner,
    F: FnOnce(&str) -> Result<(), E>,
    E: Into<BoxError>,
{
    let guard = DestroyGuard::new(terraform);
    let outcome = provision_and_read(terraform, output_name, verify);
    let teardown = guard.finish();

    match (outcome, teardown) {
        (Ok(report), Ok(())) => {
            tracing::info!(output = %report.output_name, "check passed");
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(CheckError::Teardown(e)),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(teardown)) => Err(CheckError::Compound {
            primary: Box::new(primary),
            teardown,
        }),
    }
}

fn provision_and_read<R, F, E>(
    terraform: &Terraform<R>,
    output_name: &str,
    verify: F,
) -> Result<CheckReport, CheckError>
where
    R: CommandRunner,
    F: FnOnce(&str) -> Result<(), E>,
    E: Into<BoxError>,
{
    terraform.init_and_apply().map_err(CheckError::Setup)?;

    let value = terraform
        .output(output_name)
        .map_err(|e| CheckError::Assertion(format!("could not read output '{output_name}': {e}")))?;

    if value.is_empty() {
        return Err(CheckError::Assertion(format!(
            "output '{output_name}' should not be empty"
        )));
    }

    tracing::info!(output = %output_name, "output present");

    verify(&value).map_err(|e| CheckError::Verification {
        output: output_name.to_string(),
        source: e.into(),
    })?;

    Ok(CheckReport {
        output_name: output_name.to_string(),
        value,
    })
}
