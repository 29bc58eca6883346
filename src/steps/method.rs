//! Provider and step-bean contracts, and the step method declaration.

use super::accessor::StepArguments;
use super::parameter::Parameter;
use crate::discovery::StepDeclarations;
use crate::models::{PatternType, StepResponse};
use std::fmt;
use std::sync::Arc;

/// The unit that owns a set of steps and their registry
pub trait StepProvider: Send + Sync + 'static {
    /// Per-session state threaded through every invocation
    type Session: 'static;

    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }
}

/// A type that declares step methods.
///
/// Declarations are per type; the discovery pass calls
/// [`StepBean::declare_steps`] once for every scanned instance.
pub trait StepBean: Send + Sync + Sized + 'static {
    fn declare_steps(steps: &mut StepDeclarations<Self>);

    fn bean_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

pub(crate) type StepFn<B, S> =
    dyn Fn(&B, StepArguments<'_, S>) -> anyhow::Result<StepResponse> + Send + Sync + 'static;

/// One declared step handler on bean `B` for session type `S`
pub struct StepMethod<B, S> {
    name: String,
    id: Option<String>,
    pattern: String,
    pattern_type: PatternType,
    parameters: Vec<Parameter>,
    handler: Arc<StepFn<B, S>>,
}

impl<B, S> StepMethod<B, S> {
    pub fn new<F>(name: impl Into<String>, pattern: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&B, StepArguments<'_, S>) -> anyhow::Result<StepResponse> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            id: None,
            pattern: pattern.into(),
            pattern_type: PatternType::default(),
            parameters: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Register under `id` instead of the method name
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = pattern_type;
        self
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn params(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn declared_pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub(crate) fn handler(&self) -> Arc<StepFn<B, S>> {
        Arc::clone(&self.handler)
    }
}

impl<B, S> fmt::Debug for StepMethod<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepMethod")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("pattern_type", &self.pattern_type)
            .field("parameters", &self.parameters)
            .finish()
    }
}
