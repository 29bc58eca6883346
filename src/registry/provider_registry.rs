//! # Provider Registry
//!
//! Per-provider table of step invokers and the ordered step specifications.
//!
//! ## Phases
//!
//! - [`RegistryBuilder`] is written during discovery only (`&mut self`).
//! - [`ProviderRegistry`] is the frozen result. It has no write path, so
//!   lookups from concurrent dispatchers never contend or block.

use crate::error::{ProviderError, ProviderResult};
use crate::models::StepSpec;
use crate::steps::Invoker;
use std::collections::HashMap;
use std::fmt;

/// Discovery-time registry writer
pub struct RegistryBuilder<S> {
    provider: String,
    invokers: HashMap<String, Invoker<S>>,
    handlers: HashMap<String, String>,
    spec_handlers: HashMap<String, String>,
    specs: Vec<StepSpec>,
}

impl<S> RegistryBuilder<S> {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            invokers: HashMap::new(),
            handlers: HashMap::new(),
            spec_handlers: HashMap::new(),
            specs: Vec::new(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Map the invoker's step id to the invoker. `handler` names the
    /// declaring handler for collision reports.
    pub fn register_invoker(&mut self, handler: &str, invoker: Invoker<S>) -> ProviderResult<()> {
        let step_id = invoker.step_id().to_string();
        check_collision(&self.handlers, &step_id, handler)?;
        self.handlers.insert(step_id.clone(), handler.to_string());
        self.invokers.insert(step_id, invoker);
        Ok(())
    }

    /// Append a step specification declared by `handler`
    pub fn register_spec(&mut self, handler: &str, spec: StepSpec) -> ProviderResult<()> {
        check_collision(&self.spec_handlers, spec.id(), handler)?;
        self.spec_handlers.insert(spec.id().to_string(), handler.to_string());
        self.specs.push(spec);
        Ok(())
    }

    /// Register a spec together with its invoker, all or nothing
    pub fn register(
        &mut self,
        handler: &str,
        spec: StepSpec,
        invoker: Invoker<S>,
    ) -> ProviderResult<()> {
        debug_assert_eq!(spec.id(), invoker.step_id());
        check_collision(&self.handlers, spec.id(), handler)?;
        check_collision(&self.spec_handlers, spec.id(), handler)?;
        self.register_invoker(handler, invoker)?;
        self.register_spec(handler, spec)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.invokers.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn build(self) -> ProviderRegistry<S> {
        ProviderRegistry {
            provider: self.provider,
            invokers: self.invokers,
            specs: self.specs,
        }
    }
}

fn check_collision(
    owners: &HashMap<String, String>,
    step_id: &str,
    handler: &str,
) -> ProviderResult<()> {
    match owners.get(step_id) {
        Some(existing) => Err(ProviderError::DuplicateStep {
            step_id: step_id.to_string(),
            existing_handler: existing.clone(),
            duplicate_handler: handler.to_string(),
        }),
        None => Ok(()),
    }
}

impl<S> fmt::Debug for RegistryBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("provider", &self.provider)
            .field("handlers", &self.handlers)
            .field("step_count", &self.specs.len())
            .finish()
    }
}

/// Read-only registry of one provider's steps
pub struct ProviderRegistry<S> {
    provider: String,
    invokers: HashMap<String, Invoker<S>>,
    specs: Vec<StepSpec>,
}

impl<S> ProviderRegistry<S> {
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn lookup(&self, step_id: &str) -> Option<&Invoker<S>> {
        self.invokers.get(step_id)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.invokers.contains_key(step_id)
    }

    /// Specs in registration order
    pub fn list_specs(&self) -> &[StepSpec] {
        &self.specs
    }

    pub fn spec(&self, step_id: &str) -> Option<&StepSpec> {
        self.specs.iter().find(|spec| spec.id() == step_id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<S> fmt::Debug for ProviderRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider", &self.provider)
            .field(
                "step_ids",
                &self.specs.iter().map(StepSpec::id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
