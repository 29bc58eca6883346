//! Explicit parameter descriptors for step handlers.
//!
//! A handler lists its parameters in declaration order. Each descriptor
//! carries the declared Rust type and, for request arguments, the name of
//! the request argument it binds to.

use crate::models::ValueSchema;
use std::any::TypeId;
use std::fmt;

/// Declared Rust type of a handler parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    id: TypeId,
    name: &'static str,
    schema: ValueSchema,
}

impl DeclaredType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            schema: ValueSchema::of::<T>(),
        }
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &ValueSchema {
        &self.schema
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    declared: DeclaredType,
    name: Option<String>,
    binding: Option<String>,
}

impl Parameter {
    /// A parameter of type `T` with no binding marker
    pub fn of<T: 'static>() -> Self {
        Self {
            declared: DeclaredType::of::<T>(),
            name: None,
            binding: None,
        }
    }

    /// A parameter receiving the provider's session state
    pub fn session<S: 'static>() -> Self {
        Self::of::<S>()
    }

    /// A parameter of type `T` bound to the request argument `argument`
    pub fn argument<T: 'static>(argument: impl Into<String>) -> Self {
        Self::of::<T>().bind(argument)
    }

    pub fn bind(mut self, argument: impl Into<String>) -> Self {
        self.binding = Some(argument.into());
        self
    }

    /// Name used in diagnostics
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "name={name}: {}", self.declared.name),
            None => write!(f, "type={}", self.declared.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_parameter() {
        let parameter = Parameter::argument::<i64>("count").named("count");
        assert_eq!(parameter.binding(), Some("count"));
        assert!(parameter.declared_type().is::<i64>());
        assert_eq!(parameter.declared_type().schema(), &ValueSchema::Integer);
        assert_eq!(parameter.to_string(), "name=count: i64");
    }

    #[test]
    fn test_unbound_parameter_display() {
        let parameter = Parameter::of::<bool>();
        assert_eq!(parameter.binding(), None);
        assert_eq!(parameter.to_string(), "type=bool");
    }
}
