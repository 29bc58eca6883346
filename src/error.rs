//! # Provider Errors
//!
//! Error taxonomy for step discovery and dispatch.
//!
//! - **Configuration** errors are raised while a provider's registry is being
//!   built and abort the whole discovery pass.
//! - **Argument** errors are raised per call while handler arguments are bound.
//! - **Invocation** errors wrap a failure returned by the step handler itself.
//! - **Lookup** errors are raised when a caller dispatches to an unknown step.

use std::fmt;
use thiserror::Error;

/// Broad classification of a [`ProviderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Argument,
    Invocation,
    Lookup,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Argument => "argument",
            ErrorKind::Invocation => "invocation",
            ErrorKind::Lookup => "lookup",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A handler parameter is neither session-typed nor bound to a request argument
    #[error("Unsatisfiable step method parameter [{position}] ({parameter}) of handler {handler}")]
    UnsatisfiableParameter {
        handler: String,
        position: usize,
        parameter: String,
    },

    /// Two handlers registered the same step identifier within one provider
    #[error("Step id '{step_id}' of handler {duplicate_handler} collides with handler {existing_handler}")]
    DuplicateStep {
        step_id: String,
        existing_handler: String,
        duplicate_handler: String,
    },

    /// Two parameters of one handler bind the same request argument name
    #[error("Argument '{argument}' is declared more than once for step '{step_id}'")]
    DuplicateArgument { step_id: String, argument: String },

    /// The provider a handler targets could not be resolved
    #[error("Invalid usage of step method or target provider {provider} isn't resolvable: {handler}")]
    UnresolvableProvider { handler: String, provider: String },

    /// A second instance of an already registered provider type was supplied
    #[error("Provider {provider} is already registered with another instance: {handler}")]
    ConflictingProvider { handler: String, provider: String },

    /// A step specification was finalized without a required field
    #[error("Step specification for handler {handler} is missing its {field}")]
    IncompleteSpec {
        handler: String,
        field: &'static str,
    },

    /// A named argument required by the handler is absent from the request
    #[error("Missing argument with name={argument} for step '{step_id}'")]
    MissingArgument { step_id: String, argument: String },

    /// A handler read a resolved argument as the wrong kind
    #[error("Argument [{position}] of step '{step_id}' is not {expected}")]
    ArgumentMismatch {
        step_id: String,
        position: usize,
        expected: &'static str,
    },

    /// A resolved argument value could not be decoded into the requested type
    #[error("Argument [{position}] of step '{step_id}' could not be decoded: {source}")]
    ArgumentDecode {
        step_id: String,
        position: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The step handler returned a failure
    #[error("Failed to invoke step method={step_id}: {source}")]
    InvocationFailed {
        step_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// No invoker is registered under the requested identifier
    #[error("No step registered with id '{step_id}' in provider {provider}")]
    StepNotFound { provider: String, step_id: String },
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::UnsatisfiableParameter { .. }
            | ProviderError::DuplicateStep { .. }
            | ProviderError::DuplicateArgument { .. }
            | ProviderError::UnresolvableProvider { .. }
            | ProviderError::ConflictingProvider { .. }
            | ProviderError::IncompleteSpec { .. } => ErrorKind::Configuration,
            ProviderError::MissingArgument { .. }
            | ProviderError::ArgumentMismatch { .. }
            | ProviderError::ArgumentDecode { .. } => ErrorKind::Argument,
            ProviderError::InvocationFailed { .. } => ErrorKind::Invocation,
            ProviderError::StepNotFound { .. } => ErrorKind::Lookup,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Step identifier the error refers to, when it concerns a single step
    pub fn step_id(&self) -> Option<&str> {
        match self {
            ProviderError::DuplicateStep { step_id, .. }
            | ProviderError::DuplicateArgument { step_id, .. }
            | ProviderError::MissingArgument { step_id, .. }
            | ProviderError::ArgumentMismatch { step_id, .. }
            | ProviderError::ArgumentDecode { step_id, .. }
            | ProviderError::InvocationFailed { step_id, .. }
            | ProviderError::StepNotFound { step_id, .. } => Some(step_id),
            _ => None,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
