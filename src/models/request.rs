use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Caller-supplied arguments for one step invocation
///
/// Keys are not checked against the step's argument schema up front; the
/// dispatcher checks presence of every bound argument at call time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepRequest {
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

impl StepRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

impl FromIterator<(String, Value)> for StepRequest {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().collect(),
        }
    }
}
