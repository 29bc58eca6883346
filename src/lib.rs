#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # StepHub Provider
//!
//! Step discovery, specification building and invocation dispatch for step
//! providers.
//!
//! ## Overview
//!
//! A step provider owns a set of steps (named, pattern-matched actions).
//! Step beans declare step methods; a one-time discovery pass turns every
//! declared method into a published [`models::StepSpec`] and a callable
//! [`steps::Invoker`], registered in the provider's registry.
//!
//! ## Module Organization
//!
//! - [`models`] - Step specifications, requests, responses, provider metadata
//! - [`steps`] - Provider and bean contracts, parameter analysis, invokers
//! - [`registry`] - Per-provider registries and provider resolution
//! - [`discovery`] - The registration pass and published provider catalog
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup and helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stephub_provider::models::{StepRequest, StepResponse};
//! use stephub_provider::steps::{Parameter, StepArguments, StepBean, StepMethod, StepProvider};
//! use stephub_provider::{StepDeclarations, StepDiscovery};
//!
//! struct Greeter;
//!
//! impl StepProvider for Greeter {
//!     type Session = String;
//!
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//! }
//!
//! impl StepBean for Greeter {
//!     fn declare_steps(steps: &mut StepDeclarations<Self>) {
//!         steps.step(
//!             StepMethod::new(
//!                 "greet",
//!                 "^hello (.*)$",
//!                 |_greeter: &Greeter, args: StepArguments<'_, String>| {
//!                     let user = args.session(0)?;
//!                     let name = args.str(1)?;
//!                     let greeting = format!("{user} greets {name}");
//!                     Ok(StepResponse::passed().with_output("greeting", greeting))
//!                 },
//!             )
//!             .param(Parameter::session::<String>())
//!             .param(Parameter::argument::<String>("name")),
//!         );
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = StepDiscovery::default().scan(Arc::new(Greeter))?.finish();
//! let greeter = catalog.get::<Greeter>().expect("greeter was scanned");
//!
//! let request = StepRequest::new().with_argument("name", "world");
//! let response = greeter.invoke("greet", "session-1", &"alice".to_string(), &request)?;
//! assert!(response.is_passed());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod models;
pub mod registry;
pub mod steps;

pub use config::{ConfigManager, DispatchConfig, LoggingConfig, ProviderConfig};
pub use discovery::{ProviderCatalog, RegisteredProvider, StepDeclarations, StepDiscovery};
pub use error::{ErrorKind, ProviderError, ProviderResult};
pub use logging::init_structured_logging;
pub use models::{
    ArgumentSpec, PatternType, ProviderInfo, StepRequest, StepResponse, StepSpec, StepStatus,
    ValueSchema,
};
pub use registry::{ProviderDirectory, ProviderRegistry, ProviderResolver};
pub use steps::{Invoker, Parameter, StepArguments, StepBean, StepMethod, StepProvider};
