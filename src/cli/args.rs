use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tfprobe::{DEFAULT_OUTPUT, Error, Options};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply, assert the output is non-empty, then destroy
    Check(CheckArgs),
    /// Print every output of the current state
    Outputs(ModuleArgs),
    /// Destroy whatever the current state holds
    Destroy(ModuleArgs),
    /// Exercise the task API of an existing deployment
    Smoke(SmokeArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Terraform root module directory
    #[arg(long, env = "TFPROBE_TERRAFORM_DIR", default_value = ".")]
    pub dir: PathBuf,

    #[arg(long, env = "TFPROBE_TERRAFORM_BIN", default_value = tfprobe::terraform::DEFAULT_BINARY)]
    pub binary: PathBuf,

    /// Input variable as KEY=VALUE, repeatable
    #[arg(long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    #[arg(long = "var-file")]
    pub var_files: Vec<PathBuf>,

    /// Do not point TF_PLUGIN_CACHE_DIR at the user cache directory
    #[arg(long)]
    pub no_plugin_cache: bool,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub module: ModuleArgs,

    /// Output that must be a non-empty string after apply
    #[arg(long, env = "TFPROBE_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Also run the task API smoke test against the output value
    #[arg(long)]
    pub smoke: bool,
}

#[derive(clap::Args, Debug)]
pub struct SmokeArgs {
    #[arg(long)]
    pub endpoint: String,
}

impl ModuleArgs {
    pub fn to_options(&self) -> Result<Options, Error> {
        let mut options = Options::new(&self.dir).with_binary(&self.binary);
        for (key, value) in &self.vars {
            options = options.with_var(key, value);
        }
        for file in &self.var_files {
            options = options.with_var_file(file);
        }
        if !self.no_plugin_cache {
            match dirs::cache_dir() {
                Some(cache) => {
                    options = options.with_plugin_cache_dir(cache.join("tfprobe").join("plugin-cache"))
                }
                None => tracing::warn!("no user cache directory, plugin cache disabled"),
            }
        }
        Ok(options)
    }
}

impl CheckArgs {
    pub fn output_name(&self) -> Result<&str, Error> {
        let name = self.output.trim();
        if name.is_empty() {
            return Err(Error::Config("output name must not be empty".to_string()));
        }
        Ok(name)
    }
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
