//! JSON file configuration adapter.

use crate::ports::config_port::ConfigPort;
use serde_json::{Map, Value};
use std::path::Path;

pub struct JsonConfigAdapter {
    config: Map<String, Value>,
}

impl JsonConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content).map_err(std::io::Error::other)
    }

    /// The document must be a JSON object.
    pub fn from_string(content: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(content).map_err(|e| e.to_string())? {
            Value::Object(config) => Ok(Self { config }),
            other => Err(format!("expected a JSON object, found {}", kind(&other))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ConfigPort for JsonConfigAdapter {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.config.get(key)? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}
