//! # Step Handlers
//!
//! Everything needed to turn a declared step method into a callable
//! dispatch unit.
//!
//! ```text
//! StepMethod ──→ analyze_signature ──→ accessors + ArgumentSpecs
//!     │                                     │
//!     └────────────── Invoker ◄─────────────┘
//! ```
//!
//! - **Parameters** (`parameter.rs`): explicit per-parameter type descriptors
//! - **Accessors** (`accessor.rs`): per-parameter resolution strategies
//! - **Analyzer** (`analyzer.rs`): parameter classification, fail-fast
//! - **Invoker** (`invoker.rs`): argument binding, timing, error wrapping
//! - **Method** (`method.rs`): `StepProvider`, `StepBean`, `StepMethod`

pub mod accessor;
pub mod analyzer;
pub mod invoker;
pub mod method;
pub mod parameter;

pub use accessor::{ArgumentAccessor, ArgumentValue, StepArguments};
pub use analyzer::{analyze_signature, SignatureAnalysis};
pub use invoker::Invoker;
pub use method::{StepBean, StepMethod, StepProvider};
pub use parameter::{DeclaredType, Parameter};
