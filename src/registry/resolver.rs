//! # Provider Resolution
//!
//! Lookup of provider instances by type. A step method may target a
//! provider other than the bean declaring it; the discovery pass asks a
//! [`ProviderResolver`] for that provider's instance.
//!
//! Hosts backed by a dependency-injection container implement the trait
//! over their container. [`ProviderDirectory`] is a ready-made
//! implementation for hosts without one.

use crate::steps::StepProvider;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Type identity of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderKey {
    id: TypeId,
    name: &'static str,
}

impl ProviderKey {
    pub fn of<P: 'static>() -> Self {
        Self {
            id: TypeId::of::<P>(),
            name: std::any::type_name::<P>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Instance lookup by provider type
///
/// The returned instance must downcast to the type named by `key`;
/// anything else is treated as unresolved.
pub trait ProviderResolver: Send + Sync {
    fn resolve(&self, key: ProviderKey) -> Option<Arc<dyn Any + Send + Sync>>;
}

/// Resolver that knows no providers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProviders;

impl ProviderResolver for NoProviders {
    fn resolve(&self, _key: ProviderKey) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }
}

/// Type-keyed provider instances
#[derive(Default)]
pub struct ProviderDirectory {
    instances: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ProviderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `provider` resolvable by its type. Returns `true` if an earlier
    /// instance of the same type was replaced.
    pub fn register<P: StepProvider>(&self, provider: Arc<P>) -> bool {
        let key = ProviderKey::of::<P>();
        debug!(provider = key.name(), name = provider.name(), "Registering provider instance");
        self.instances.insert(key.type_id(), provider).is_some()
    }

    pub fn get<P: StepProvider>(&self) -> Option<Arc<P>> {
        self.instances
            .get(&TypeId::of::<P>())
            .and_then(|entry| Arc::clone(entry.value()).downcast::<P>().ok())
    }

    pub fn contains<P: StepProvider>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<P>())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl ProviderResolver for ProviderDirectory {
    fn resolve(&self, key: ProviderKey) -> Option<Arc<dyn Any + Send + Sync>> {
        self.instances
            .get(&key.type_id())
            .map(|entry| Arc::clone(entry.value()))
    }
}

impl fmt::Debug for ProviderDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDirectory")
            .field("provider_count", &self.instances.len())
            .finish()
    }
}
