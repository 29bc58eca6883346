//! # Invocation Dispatcher
//!
//! An [`Invoker`] closes over one step handler and its ordered accessor
//! list. Each call resolves every argument, runs the handler, times it and
//! fills in the response duration when the handler left it unset.
//!
//! Invokers hold no mutable state. Cloning is cheap and a single invoker
//! can be called from any number of threads at once.

use super::accessor::{ArgumentAccessor, StepArguments};
use crate::error::{ProviderError, ProviderResult};
use crate::logging::log_step_operation;
use crate::models::{StepRequest, StepResponse};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

type DispatchFn<S> =
    dyn Fn(StepArguments<'_, S>) -> anyhow::Result<StepResponse> + Send + Sync + 'static;

pub struct Invoker<S> {
    step_id: Arc<str>,
    accessors: Arc<[ArgumentAccessor]>,
    handler: Arc<DispatchFn<S>>,
    slow_threshold: Option<Duration>,
}

impl<S> Clone for Invoker<S> {
    fn clone(&self) -> Self {
        Self {
            step_id: Arc::clone(&self.step_id),
            accessors: Arc::clone(&self.accessors),
            handler: Arc::clone(&self.handler),
            slow_threshold: self.slow_threshold,
        }
    }
}

impl<S> fmt::Debug for Invoker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("step_id", &self.step_id)
            .field("accessors", &self.accessors)
            .field("slow_threshold", &self.slow_threshold)
            .finish()
    }
}

impl<S> Invoker<S> {
    pub fn new<F>(step_id: impl Into<String>, accessors: Vec<ArgumentAccessor>, handler: F) -> Self
    where
        F: Fn(StepArguments<'_, S>) -> anyhow::Result<StepResponse> + Send + Sync + 'static,
    {
        Self {
            step_id: Arc::from(step_id.into()),
            accessors: Arc::from(accessors),
            handler: Arc::new(handler),
            slow_threshold: None,
        }
    }

    /// Warn when an invocation runs longer than `threshold`
    pub fn with_slow_threshold(mut self, threshold: Option<Duration>) -> Self {
        self.slow_threshold = threshold;
        self
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn accessors(&self) -> &[ArgumentAccessor] {
        &self.accessors
    }

    /// Dispatch one call.
    ///
    /// Fails with [`ProviderError::MissingArgument`] before the handler runs
    /// if any bound argument is absent, and with
    /// [`ProviderError::InvocationFailed`] if the handler itself fails.
    pub fn invoke(
        &self,
        session_id: &str,
        state: &S,
        request: &StepRequest,
    ) -> ProviderResult<StepResponse> {
        let mut values = Vec::with_capacity(self.accessors.len());
        for accessor in self.accessors.iter() {
            let value = accessor
                .resolve(session_id, state, request)
                .ok_or_else(|| ProviderError::MissingArgument {
                    step_id: self.step_id.to_string(),
                    argument: accessor.argument_name().unwrap_or_default().to_string(),
                })?;
            values.push(value);
        }

        let arguments = StepArguments::new(self.step_id(), session_id, values);
        let start = Instant::now();
        let outcome = (self.handler)(arguments);
        let elapsed = start.elapsed();

        let mut response = outcome.map_err(|source| {
            warn!(
                step_id = %self.step_id,
                session_id = session_id,
                error = %source,
                "Step handler failed"
            );
            ProviderError::InvocationFailed {
                step_id: self.step_id.to_string(),
                source,
            }
        })?;

        if response.duration.is_none() {
            response.duration = Some(elapsed);
        }

        if let Some(threshold) = self.slow_threshold {
            if elapsed > threshold {
                warn!(
                    step_id = %self.step_id,
                    session_id = session_id,
                    elapsed_ms = millis(elapsed),
                    threshold_ms = millis(threshold),
                    "Slow step invocation"
                );
            }
        }

        log_step_operation(
            "invoke",
            self.step_id(),
            session_id,
            response.status.as_str(),
            Some(millis(elapsed)),
        );

        Ok(response)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
