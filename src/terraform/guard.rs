use super::runner::CommandRunner;
use super::{Terraform, TerraformError};

/// Deferred `terraform destroy` bound to a scope.
///
/// Destroy runs exactly once: either through [`DestroyGuard::finish`], which
/// reports the result, or on drop (early return, `?`, panic unwind), which
/// can only log it.
#[must_use = "dropping the guard immediately destroys the infrastructure"]
pub struct DestroyGuard<'a, R: CommandRunner> {
    terraform: &'a Terraform<R>,
    armed: bool,
}

impl<'a, R: CommandRunner> DestroyGuard<'a, R> {
    pub fn new(terraform: &'a Terraform<R>) -> Self {
        tracing::debug!(dir = %terraform.options().dir().display(), "destroy armed");
        Self {
            terraform,
            armed: true,
        }
    }

    pub fn finish(mut self) -> Result<(), TerraformError> {
        self.armed = false;
        self.terraform.destroy()
    }
}

impl<R: CommandRunner> Drop for DestroyGuard<'_, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;

        if std::thread::panicking() {
            tracing::warn!("destroying infrastructure while unwinding from a panic");
        }

        if let Err(e) = self.terraform.destroy() {
            tracing::error!(
                dir = %self.terraform.options().dir().display(),
                error = %e,
                "deferred destroy failed, resources may be left behind"
            );
        }
    }
}
