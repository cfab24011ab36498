//! Per-call reply accumulator
//!
//! A reply starts ok and collects keys as the action progresses. Marking it
//! failed records the message but never rolls back earlier writes, so a
//! caller can see which fields an action managed to report before it died.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming request payload for one action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Request {
    pub fn for_package(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            mode: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub statuscode: i32,
    pub statusmsg: String,
    pub data: serde_json::Map<String, Value>,
}

impl Reply {
    pub fn new() -> Self {
        Self {
            statuscode: 0,
            statusmsg: "OK".to_string(),
            data: serde_json::Map::new(),
        }
    }

    /// Write one data field
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Mark the reply failed. Data written so far stays in place.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.statuscode = 1;
        self.statusmsg = message.into();
    }

    pub fn is_failed(&self) -> bool {
        self.statuscode != 0
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for Reply {
    fn default() -> Self {
        Self::new()
    }
}
