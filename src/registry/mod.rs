//! # Registry Infrastructure
//!
//! ## Available Components
//!
//! - **RegistryBuilder / ProviderRegistry**: per-provider step invokers and specs
//! - **ProviderResolver**: provider instance lookup by type
//! - **ProviderDirectory**: concurrent, type-keyed resolver implementation
//!
//! ```text
//! Registry Infrastructure
//! ├── RegistryBuilder     (discovery-time writes)
//! ├── ProviderRegistry    (frozen, lock-free reads)
//! └── ProviderResolver    (provider lookup by type)
//!     └── ProviderDirectory
//! ```

pub mod provider_registry;
pub mod resolver;

pub use provider_registry::{ProviderRegistry, RegistryBuilder};
pub use resolver::{NoProviders, ProviderDirectory, ProviderKey, ProviderResolver};
