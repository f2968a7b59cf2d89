use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::TerraformError;

pub const DEFAULT_BINARY: &str = "terraform";

/// How to run Terraform against one root module.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub terraform_dir: PathBuf,
    pub binary: PathBuf,
    pub vars: BTreeMap<String, String>,
    pub var_files: Vec<PathBuf>,
    pub env_vars: BTreeMap<String, String>,
    pub no_color: bool,
    pub upgrade: bool,
    pub lock: bool,
    pub plugin_cache_dir: Option<PathBuf>,
}

impl Options {
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            binary: PathBuf::from(DEFAULT_BINARY),
            vars: BTreeMap::new(),
            var_files: Vec::new(),
            env_vars: BTreeMap::new(),
            no_color: true,
            upgrade: false,
            lock: true,
            plugin_cache_dir: None,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn with_plugin_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_cache_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<(), TerraformError> {
        if self.terraform_dir.is_dir() {
            Ok(())
        } else {
            Err(TerraformError::InvalidDir {
                path: self.terraform_dir.clone(),
            })
        }
    }

    pub fn dir(&self) -> &Path {
        &self.terraform_dir
    }

    /// Masks every non-empty `-var` value found in `text`, longest first.
    pub fn redact(&self, text: &str) -> String {
        let mut values: Vec<&str> = self
            .vars
            .values()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        values.sort_by_key(|v| std::cmp::Reverse(v.len()));

        let mut redacted = text.to_string();
        for value in values {
            redacted = redacted.replace(value, "[REDACTED]");
        }
        redacted
    }

    pub(crate) fn init_args(&self) -> Vec<String> {
        let mut args = vec![
            "init".to_string(),
            "-input=false".to_string(),
            format!("-upgrade={}", self.upgrade),
        ];
        self.push_color(&mut args);
        args
    }

    pub(crate) fn apply_args(&self) -> Vec<String> {
        self.mutating_args("apply")
    }

    pub(crate) fn destroy_args(&self) -> Vec<String> {
        self.mutating_args("destroy")
    }

    pub(crate) fn output_args(&self, name: Option<&str>) -> Vec<String> {
        let mut args = vec!["output".to_string(), "-json".to_string()];
        self.push_color(&mut args);
        if let Some(name) = name {
            args.push(name.to_string());
        }
        args
    }

    /// Environment shared by every subcommand; user-supplied entries win.
    pub(crate) fn command_env(&self) -> Vec<(String, String)> {
        let mut env = BTreeMap::new();
        env.insert("TF_IN_AUTOMATION".to_string(), "1".to_string());
        env.insert("TF_INPUT".to_string(), "0".to_string());
        if let Some(dir) = &self.plugin_cache_dir {
            env.insert(
                "TF_PLUGIN_CACHE_DIR".to_string(),
                dir.to_string_lossy().into_owned(),
            );
        }
        env.extend(self.env_vars.clone());
        env.into_iter().collect()
    }

    fn mutating_args(&self, subcommand: &str) -> Vec<String> {
        let mut args = vec![
            subcommand.to_string(),
            "-input=false".to_string(),
            "-auto-approve".to_string(),
            format!("-lock={}", self.lock),
        ];
        self.push_color(&mut args);
        for (key, value) in &self.vars {
            args.push("-var".to_string());
            args.push(format!("{key}={value}"));
        }
        for file in &self.var_files {
            args.push(format!("-var-file={}", file.display()));
        }
        args
    }

    fn push_color(&self, args: &mut Vec<String>) {
        if self.no_color {
            args.push("-no-color".to_string());
        }
    }
}
