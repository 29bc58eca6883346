//! # Handler Signature Analyzer
//!
//! Classifies each declared parameter of a step handler into an
//! [`ArgumentAccessor`] and derives the step's argument schema. Runs during
//! discovery only, so an unsatisfiable signature fails before any step of
//! the provider becomes callable.

use super::accessor::ArgumentAccessor;
use super::parameter::Parameter;
use crate::error::{ProviderError, ProviderResult};
use crate::models::ArgumentSpec;
use tracing::trace;

/// Accessors and argument schema derived from one handler signature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureAnalysis {
    pub accessors: Vec<ArgumentAccessor>,
    pub arguments: Vec<ArgumentSpec>,
}

/// Classify `parameters` of `handler` against the session type `S`.
///
/// Per parameter, in order:
/// 1. declared type is `S` → session accessor, no argument spec
/// 2. bound to a request argument → named accessor plus argument spec
/// 3. otherwise the signature is unsatisfiable
pub fn analyze_signature<S: 'static>(
    handler: &str,
    parameters: &[Parameter],
) -> ProviderResult<SignatureAnalysis> {
    let mut analysis = SignatureAnalysis::default();

    for (position, parameter) in parameters.iter().enumerate() {
        let declared = parameter.declared_type();

        if declared.is::<S>() {
            analysis.accessors.push(ArgumentAccessor::Session);
        } else if let Some(argument) = parameter.binding() {
            analysis
                .accessors
                .push(ArgumentAccessor::Named(argument.to_string()));
            analysis
                .arguments
                .push(ArgumentSpec::new(argument, declared.schema().clone()));
        } else {
            return Err(ProviderError::UnsatisfiableParameter {
                handler: handler.to_string(),
                position,
                parameter: parameter.to_string(),
            });
        }

        trace!(
            handler = handler,
            position = position,
            parameter = %parameter,
            "Classified step parameter"
        );
    }

    Ok(analysis)
}
