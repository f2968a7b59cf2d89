use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TerraformError;

/// One entry of `terraform output -json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "type", default)]
    pub value_type: serde_json::Value,
    pub value: serde_json::Value,
}

impl OutputValue {
    pub fn render(&self) -> String {
        render_value(&self.value)
    }
}

/// Strings come back bare, `null` as empty, everything else as compact JSON.
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn parse_single(stdout: &str) -> Result<String, TerraformError> {
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).map_err(|e| TerraformError::OutputParse {
            message: e.to_string(),
        })?;
    Ok(render_value(&value))
}

pub fn parse_all(stdout: &str) -> Result<BTreeMap<String, OutputValue>, TerraformError> {
    let trimmed = stdout.trim();
    // NOTE: An empty state prints nothing rather than `{}` on older releases
    if trimmed.is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(trimmed).map_err(|e| TerraformError::OutputParse {
        message: e.to_string(),
    })
}

pub(crate) fn is_missing_output(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("output not found") || lower.contains("could not be found")
}
