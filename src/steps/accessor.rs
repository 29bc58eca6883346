//! Argument accessors and the resolved argument list handed to handlers.

use crate::error::{ProviderError, ProviderResult};
use crate::models::StepRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Strategy resolving one handler parameter from call-time inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentAccessor {
    /// Always yields the caller's session state
    Session,
    /// Yields the request argument with this name
    Named(String),
}

impl ArgumentAccessor {
    /// Resolve this parameter's value.
    ///
    /// Returns `None` when a named argument is absent from the request or
    /// explicitly null. Never substitutes a default.
    pub fn resolve<'a, S>(
        &self,
        _session_id: &str,
        state: &'a S,
        request: &'a StepRequest,
    ) -> Option<ArgumentValue<'a, S>> {
        match self {
            ArgumentAccessor::Session => Some(ArgumentValue::Session(state)),
            ArgumentAccessor::Named(name) => request
                .argument(name)
                .filter(|value| !value.is_null())
                .map(ArgumentValue::Value),
        }
    }

    pub fn argument_name(&self) -> Option<&str> {
        match self {
            ArgumentAccessor::Session => None,
            ArgumentAccessor::Named(name) => Some(name),
        }
    }
}

/// One resolved handler argument, borrowed from the call inputs
pub enum ArgumentValue<'a, S> {
    Session(&'a S),
    Value(&'a Value),
}

impl<S> Clone for ArgumentValue<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ArgumentValue<'_, S> {}

impl<S> fmt::Debug for ArgumentValue<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Session(_) => f.write_str("Session(..)"),
            ArgumentValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Arguments of one invocation, in the handler's declared parameter order
pub struct StepArguments<'a, S> {
    step_id: &'a str,
    session_id: &'a str,
    values: Vec<ArgumentValue<'a, S>>,
}

impl<'a, S> StepArguments<'a, S> {
    pub(crate) fn new(
        step_id: &'a str,
        session_id: &'a str,
        values: Vec<ArgumentValue<'a, S>>,
    ) -> Self {
        Self {
            step_id,
            session_id,
            values,
        }
    }

    pub fn step_id(&self) -> &'a str {
        self.step_id
    }

    pub fn session_id(&self) -> &'a str {
        self.session_id
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ArgumentValue<'a, S>> + '_ {
        self.values.iter().copied()
    }

    /// The session state at `position`
    pub fn session(&self, position: usize) -> ProviderResult<&'a S> {
        match self.values.get(position) {
            Some(ArgumentValue::Session(state)) => Ok(*state),
            _ => Err(self.mismatch(position, "the session state")),
        }
    }

    /// The raw request value at `position`
    pub fn value(&self, position: usize) -> ProviderResult<&'a Value> {
        match self.values.get(position) {
            Some(ArgumentValue::Value(value)) => Ok(*value),
            _ => Err(self.mismatch(position, "a request argument")),
        }
    }

    /// The string request value at `position`, borrowed
    pub fn str(&self, position: usize) -> ProviderResult<&'a str> {
        self.value(position)?
            .as_str()
            .ok_or_else(|| self.mismatch(position, "a string"))
    }

    /// Decode the request value at `position` into `T`
    pub fn get<T: DeserializeOwned>(&self, position: usize) -> ProviderResult<T> {
        let value = self.value(position)?;
        T::deserialize(value).map_err(|source| ProviderError::ArgumentDecode {
            step_id: self.step_id.to_string(),
            position,
            source,
        })
    }

    fn mismatch(&self, position: usize, expected: &'static str) -> ProviderError {
        ProviderError::ArgumentMismatch {
            step_id: self.step_id.to_string(),
            position,
            expected,
        }
    }
}

impl<S> fmt::Debug for StepArguments<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepArguments")
            .field("step_id", &self.step_id)
            .field("session_id", &self.session_id)
            .field("values", &self.values)
            .finish()
    }
}
