use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

const UNKNOWN: &str = "unknown";

/// One downloadable variant as reported by `cobalt --info --json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatDescriptor {
    #[serde(deserialize_with = "id_text")]
    pub format_id: String,
    #[serde(default = "unknown", deserialize_with = "lenient_text")]
    pub quality: String,
    #[serde(default = "unknown", deserialize_with = "lenient_text")]
    pub ext: String,
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.format_id, self.quality, self.ext)
    }
}

/// Payload printed by the info query. Entries stay raw so a single bad
/// record does not throw away the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub formats: Vec<Value>,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => unknown(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "format_id must be a non-empty string or number, got {other}"
        ))),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("cobalt command must not be empty")]
    Empty,
}

/// How to launch the external tool: program plus the leading arguments
/// that come before `--url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CobaltConfig {
    pub program: String,
    pub base_args: Vec<String>,
}

impl Default for CobaltConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            base_args: vec!["-m".to_string(), "cobalt.cli.main".to_string()],
        }
    }
}

impl FromStr for CobaltConfig {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(CommandError::Empty)?;

        Ok(Self {
            program,
            base_args: parts.collect(),
        })
    }
}

impl fmt::Display for CobaltConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.base_args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
