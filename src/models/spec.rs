//! # Step Specifications
//!
//! Machine-readable description of a registered step: identifier, match
//! pattern, pattern type and the ordered argument schema.

use crate::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::any::TypeId;
use std::fmt;

/// How a step's match pattern is to be interpreted by the consumer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatternType {
    #[default]
    Regex,
    Simple,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Regex => f.write_str("REGEX"),
            PatternType::Simple => f.write_str("SIMPLE"),
        }
    }
}

/// Semantic type tag of a step argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueSchema {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    /// Raw JSON, any shape
    Any,
    /// A domain type decoded from JSON by the handler
    Structured { type_name: String },
}

impl ValueSchema {
    /// Derive the schema tag from a declared Rust type
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();
        let is = |candidates: &[TypeId]| candidates.contains(&id);

        if is(&[TypeId::of::<String>(), TypeId::of::<&'static str>(), TypeId::of::<char>()]) {
            ValueSchema::String
        } else if is(&[
            TypeId::of::<i8>(),
            TypeId::of::<i16>(),
            TypeId::of::<i32>(),
            TypeId::of::<i64>(),
            TypeId::of::<isize>(),
            TypeId::of::<u8>(),
            TypeId::of::<u16>(),
            TypeId::of::<u32>(),
            TypeId::of::<u64>(),
            TypeId::of::<usize>(),
        ]) {
            ValueSchema::Integer
        } else if is(&[TypeId::of::<f32>(), TypeId::of::<f64>()]) {
            ValueSchema::Number
        } else if is(&[TypeId::of::<bool>()]) {
            ValueSchema::Boolean
        } else if is(&[TypeId::of::<Vec<Value>>()]) {
            ValueSchema::Array
        } else if is(&[TypeId::of::<Map<String, Value>>()]) {
            ValueSchema::Object
        } else if is(&[TypeId::of::<Value>()]) {
            ValueSchema::Any
        } else {
            ValueSchema::Structured {
                type_name: std::any::type_name::<T>().to_string(),
            }
        }
    }

    /// Render as a JSON schema fragment
    pub fn to_json_schema(&self) -> Value {
        match self {
            ValueSchema::String => json!({ "type": "string" }),
            ValueSchema::Integer => json!({ "type": "integer" }),
            ValueSchema::Number => json!({ "type": "number" }),
            ValueSchema::Boolean => json!({ "type": "boolean" }),
            ValueSchema::Array => json!({ "type": "array" }),
            ValueSchema::Object => json!({ "type": "object" }),
            ValueSchema::Any => json!({}),
            ValueSchema::Structured { type_name } => {
                json!({ "type": "object", "title": type_name })
            }
        }
    }
}

/// One named argument a step expects in its request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    name: String,
    schema: ValueSchema,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>, schema: ValueSchema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &ValueSchema {
        &self.schema
    }
}

/// Immutable description of one registered step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    id: String,
    pattern: String,
    pattern_type: PatternType,
    arguments: Vec<ArgumentSpec>,
}

impl StepSpec {
    pub fn builder() -> StepSpecBuilder {
        StepSpecBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

/// Accumulates the parts of a [`StepSpec`] during discovery
#[derive(Debug, Clone, Default)]
pub struct StepSpecBuilder {
    id: Option<String>,
    pattern: Option<String>,
    pattern_type: PatternType,
    arguments: Vec<ArgumentSpec>,
}

impl StepSpecBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = pattern_type;
        self
    }

    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = ArgumentSpec>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    /// Finalize the spec. `handler` names the declaring handler in errors.
    pub fn build(self, handler: &str) -> ProviderResult<StepSpec> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::IncompleteSpec {
                handler: handler.to_string(),
                field: "id",
            })?;
        let pattern = self.pattern.ok_or_else(|| ProviderError::IncompleteSpec {
            handler: handler.to_string(),
            field: "pattern",
        })?;

        for (index, argument) in self.arguments.iter().enumerate() {
            if self.arguments[..index]
                .iter()
                .any(|earlier| earlier.name == argument.name)
            {
                return Err(ProviderError::DuplicateArgument {
                    step_id: id,
                    argument: argument.name.clone(),
                });
            }
        }

        Ok(StepSpec {
            id,
            pattern,
            pattern_type: self.pattern_type,
            arguments: self.arguments,
        })
    }
}
