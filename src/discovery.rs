//! # Step Discovery
//!
//! The one-time registration pass that turns declared step methods into
//! published provider registries.
//!
//! ## Flow
//!
//! ```text
//! StepDiscovery::new(resolver)
//!   .with_provider(p)      ── provider known up front
//!   .scan(bean)            ── per bean: declare_steps → per method:
//!                               resolve target provider
//!                               analyze_signature → accessors + argument specs
//!                               StepSpec builder  → spec
//!                               Invoker           → dispatch unit
//!                               RegistryBuilder   → collision-checked insert
//!   .finish()              ── freeze every registry → ProviderCatalog
//! ```
//!
//! `scan` and `with_provider` consume the pass and hand it back on success.
//! The first configuration error drops every pending registry, so a
//! partially registered provider is never published.
//!
//! One provider type maps to one instance per pass. Supplying a different
//! instance of a type that is already pending is a
//! [`ProviderError::ConflictingProvider`].

use crate::config::DispatchConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::logging::log_registry_operation;
use crate::models::{ProviderInfo, StepRequest, StepResponse, StepSpec};
use crate::registry::{
    NoProviders, ProviderKey, ProviderRegistry, ProviderResolver, RegistryBuilder,
};
use crate::steps::{analyze_signature, Invoker, StepBean, StepMethod, StepProvider};
use chrono::{DateTime, Utc};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

type Registration<B> = Box<dyn FnOnce(&mut StepDiscovery, &Arc<B>) -> ProviderResult<()>>;

/// Collector handed to [`StepBean::declare_steps`]
pub struct StepDeclarations<B> {
    registrations: Vec<Registration<B>>,
}

impl<B: StepBean> StepDeclarations<B> {
    fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Declare a step served by provider `P`, resolved by type
    pub fn step_for<P: StepProvider>(&mut self, method: StepMethod<B, P::Session>) -> &mut Self {
        self.registrations.push(Box::new(move |discovery: &mut StepDiscovery, bean: &Arc<B>| {
            discovery.register_method::<B, P>(bean, None, method)
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<B: StepBean + StepProvider> StepDeclarations<B> {
    /// Declare a step served by the declaring bean itself
    pub fn step(&mut self, method: StepMethod<B, B::Session>) -> &mut Self {
        self.registrations.push(Box::new(move |discovery: &mut StepDiscovery, bean: &Arc<B>| {
            discovery.register_method::<B, B>(bean, Some(Arc::clone(bean)), method)
        }));
        self
    }
}

struct PendingProvider<P: StepProvider> {
    provider: Arc<P>,
    registry: RegistryBuilder<P::Session>,
}

struct PendingEntry {
    name: String,
    state: Box<dyn Any + Send>,
    seal: fn(Box<dyn Any + Send>, DateTime<Utc>) -> Option<Arc<dyn Any + Send + Sync>>,
}

fn seal_pending<P: StepProvider>(
    state: Box<dyn Any + Send>,
    published_at: DateTime<Utc>,
) -> Option<Arc<dyn Any + Send + Sync>> {
    let pending = state.downcast::<PendingProvider<P>>().ok()?;
    let PendingProvider { provider, registry } = *pending;
    let registered: Arc<dyn Any + Send + Sync> = Arc::new(RegisteredProvider {
        provider,
        registry: registry.build(),
        published_at,
    });
    Some(registered)
}

/// One-shot registration pass over providers and step beans
pub struct StepDiscovery {
    resolver: Arc<dyn ProviderResolver>,
    slow_threshold: Option<Duration>,
    pending: HashMap<TypeId, PendingEntry>,
    order: Vec<TypeId>,
}

impl Default for StepDiscovery {
    fn default() -> Self {
        Self::new(Arc::new(NoProviders))
    }
}

impl StepDiscovery {
    pub fn new(resolver: Arc<dyn ProviderResolver>) -> Self {
        Self {
            resolver,
            slow_threshold: None,
            pending: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn with_dispatch_config(mut self, config: &DispatchConfig) -> Self {
        self.slow_threshold = config.slow_invocation_threshold();
        self
    }

    /// Register a provider instance up front, with or without steps
    pub fn with_provider<P: StepProvider>(mut self, provider: Arc<P>) -> ProviderResult<Self> {
        self.pending_provider::<P>(Some(provider), "<discovery>")?;
        Ok(self)
    }

    /// Register every step `bean` declares
    pub fn scan<B: StepBean>(mut self, bean: Arc<B>) -> ProviderResult<Self> {
        let mut declarations = StepDeclarations::new();
        B::declare_steps(&mut declarations);

        debug!(
            bean = bean.bean_name(),
            declared_steps = declarations.len(),
            "Scanning step bean"
        );

        for registration in declarations.registrations {
            registration(&mut self, &bean)?;
        }
        Ok(self)
    }

    /// Freeze all registries and publish them
    pub fn finish(self) -> ProviderCatalog {
        let published_at = Utc::now();
        let mut providers = HashMap::with_capacity(self.pending.len());
        let mut names = Vec::with_capacity(self.order.len());
        let mut pending = self.pending;

        for type_id in self.order {
            let Some(entry) = pending.remove(&type_id) else {
                continue;
            };
            if let Some(registered) = (entry.seal)(entry.state, published_at) {
                names.push(entry.name);
                providers.insert(type_id, registered);
            }
        }

        info!(
            providers = names.len(),
            published_at = %published_at.to_rfc3339(),
            "Step discovery complete"
        );

        ProviderCatalog { providers, names }
    }

    fn register_method<B: StepBean, P: StepProvider>(
        &mut self,
        bean: &Arc<B>,
        own_provider: Option<Arc<P>>,
        method: StepMethod<B, P::Session>,
    ) -> ProviderResult<()> {
        let handler_name = format!("{}::{}", bean.bean_name(), method.name());
        let slow_threshold = self.slow_threshold;
        let pending = self.pending_provider::<P>(own_provider, &handler_name)?;

        let analysis = analyze_signature::<P::Session>(&handler_name, method.parameters())?;
        let spec = StepSpec::builder()
            .id(method.step_id())
            .pattern(method.pattern())
            .pattern_type(method.declared_pattern_type())
            .arguments(analysis.arguments)
            .build(&handler_name)?;

        let handler = method.handler();
        let target = Arc::clone(bean);
        let invoker =
            Invoker::<P::Session>::new(spec.id(), analysis.accessors, move |arguments| {
                handler(&*target, arguments)
            })
            .with_slow_threshold(slow_threshold);

        let step_id = spec.id().to_string();
        let pattern = spec.pattern().to_string();
        let argument_count = spec.arguments().len();
        pending.registry.register(&handler_name, spec, invoker)?;

        log_registry_operation(
            "register_step",
            pending.provider.name(),
            Some(&step_id),
            "success",
            Some(&format!(
                "handler={handler_name} pattern={pattern} arguments={argument_count}"
            )),
        );
        Ok(())
    }

    fn pending_provider<P: StepProvider>(
        &mut self,
        instance: Option<Arc<P>>,
        handler: &str,
    ) -> ProviderResult<&mut PendingProvider<P>> {
        let key = ProviderKey::of::<P>();
        let unresolvable = || ProviderError::UnresolvableProvider {
            handler: handler.to_string(),
            provider: key.name().to_string(),
        };

        if self.pending.contains_key(&key.type_id()) {
            if let Some(provider) = instance {
                let pending = self
                    .pending
                    .get(&key.type_id())
                    .and_then(|entry| entry.state.downcast_ref::<PendingProvider<P>>())
                    .ok_or_else(unresolvable)?;
                if !Arc::ptr_eq(&provider, &pending.provider) {
                    return Err(ProviderError::ConflictingProvider {
                        handler: handler.to_string(),
                        provider: pending.provider.name().to_string(),
                    });
                }
            }
        } else {
            let provider = match instance {
                Some(provider) => provider,
                None => self
                    .resolver
                    .resolve(key)
                    .and_then(|found| found.downcast::<P>().ok())
                    .ok_or_else(unresolvable)?,
            };

            log_registry_operation("add_provider", provider.name(), None, "pending", None);

            let entry = PendingEntry {
                name: provider.name().to_string(),
                state: Box::new(PendingProvider::<P> {
                    registry: RegistryBuilder::new(provider.name()),
                    provider,
                }),
                seal: seal_pending::<P>,
            };
            self.pending.insert(key.type_id(), entry);
            self.order.push(key.type_id());
        }

        self.pending
            .get_mut(&key.type_id())
            .and_then(|entry| entry.state.downcast_mut::<PendingProvider<P>>())
            .ok_or_else(unresolvable)
    }
}

impl fmt::Debug for StepDiscovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDiscovery")
            .field(
                "providers",
                &self.pending.values().map(|entry| &entry.name).collect::<Vec<_>>(),
            )
            .field("slow_threshold", &self.slow_threshold)
            .finish()
    }
}

/// A provider with its frozen registry, ready for dispatch
pub struct RegisteredProvider<P: StepProvider> {
    provider: Arc<P>,
    registry: ProviderRegistry<P::Session>,
    published_at: DateTime<Utc>,
}

impl<P: StepProvider> RegisteredProvider<P> {
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    pub fn registry(&self) -> &ProviderRegistry<P::Session> {
        &self.registry
    }

    pub fn lookup(&self, step_id: &str) -> Option<&Invoker<P::Session>> {
        self.registry.lookup(step_id)
    }

    pub fn list_specs(&self) -> &[StepSpec] {
        self.registry.list_specs()
    }

    /// Look up `step_id` and dispatch one call to it
    pub fn invoke(
        &self,
        step_id: &str,
        session_id: &str,
        state: &P::Session,
        request: &StepRequest,
    ) -> ProviderResult<StepResponse> {
        let invoker = self
            .registry
            .lookup(step_id)
            .ok_or_else(|| ProviderError::StepNotFound {
                provider: self.provider.name().to_string(),
                step_id: step_id.to_string(),
            })?;
        invoker.invoke(session_id, state, request)
    }

    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.provider.name().to_string(),
            version: self.provider.version().to_string(),
            steps: self.registry.list_specs().to_vec(),
            published_at: self.published_at,
        }
    }
}

impl<P: StepProvider> fmt::Debug for RegisteredProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("provider", &self.provider.name())
            .field("registry", &self.registry)
            .field("published_at", &self.published_at)
            .finish()
    }
}

/// Published providers, looked up by type
pub struct ProviderCatalog {
    providers: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    names: Vec<String>,
}

impl ProviderCatalog {
    pub fn get<P: StepProvider>(&self) -> Option<Arc<RegisteredProvider<P>>> {
        self.providers
            .get(&TypeId::of::<P>())
            .and_then(|entry| Arc::clone(entry).downcast::<RegisteredProvider<P>>().ok())
    }

    /// Provider names in the order they joined the discovery pass
    pub fn provider_names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCatalog")
            .field("providers", &self.names)
            .finish()
    }
}
