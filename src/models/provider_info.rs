use super::spec::StepSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public description of a provider and the steps it serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub version: String,
    pub steps: Vec<StepSpec>,
    pub published_at: DateTime<Utc>,
}

impl ProviderInfo {
    pub fn step(&self, id: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|spec| spec.id() == id)
    }
}
