//! # Data Model
//!
//! Step specifications, request/response payloads and provider metadata.
//! Every type is serde-ready; encoding them on the wire is left to the host.

pub mod provider_info;
pub mod request;
pub mod response;
pub mod spec;

pub use provider_info::ProviderInfo;
pub use request::StepRequest;
pub use response::{StepResponse, StepStatus};
pub use spec::{ArgumentSpec, PatternType, StepSpec, StepSpecBuilder, ValueSchema};
