//! Providers and step beans shared by the integration tests.
#![allow(dead_code)]

use anyhow::anyhow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stephub_provider::models::{PatternType, StepResponse};
use stephub_provider::steps::{Parameter, StepArguments, StepBean, StepMethod, StepProvider};
use stephub_provider::{ProviderCatalog, ProviderDirectory, StepDeclarations, StepDiscovery};

/// Session state for the browser provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    pub user: String,
}

impl BrowserSession {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

pub type BrowserArgs<'a> = StepArguments<'a, BrowserSession>;

/// Provider that also declares its own steps
#[derive(Debug, Default)]
pub struct BrowserProvider {
    pub calls: AtomicUsize,
}

impl BrowserProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl StepProvider for BrowserProvider {
    type Session = BrowserSession;

    fn name(&self) -> &str {
        "browser"
    }

    fn version(&self) -> &str {
        "2.1.0"
    }
}

impl StepBean for BrowserProvider {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps
            .step(
                StepMethod::new(
                    "greet",
                    "^hello (.*)$",
                    |provider: &BrowserProvider, args: BrowserArgs<'_>| {
                        provider.record();
                        let session = args.session(0)?;
                        let name = args.str(1)?;
                        Ok(StepResponse::passed().with_output(
                            "greeting",
                            format!("{} greets {}", session.user, name),
                        ))
                    },
                )
                .param(Parameter::session::<BrowserSession>().named("state"))
                .param(Parameter::argument::<String>("name").named("name")),
            )
            .step(
                StepMethod::new(
                    "count_items",
                    "^there are (\\d+) items$",
                    |provider: &BrowserProvider, args| {
                        provider.record();
                        let count: i64 = args.get(0)?;
                        Ok(StepResponse::passed().with_output("doubled", count * 2))
                    },
                )
                .id("count")
                .param(Parameter::argument::<i64>("count")),
            )
            .step(StepMethod::new(
                "fail",
                "^it fails$",
                |provider: &BrowserProvider, _args| {
                    provider.record();
                    Err(anyhow!("boom"))
                },
            ))
            .step(
                StepMethod::new(
                    "timed",
                    "it takes its time",
                    |provider: &BrowserProvider, _args| {
                        provider.record();
                        Ok(StepResponse::passed().with_duration(Duration::from_millis(42)))
                    },
                )
                .pattern_type(PatternType::Simple),
            )
            .step(
                StepMethod::new(
                    "whoami",
                    "^who am i$",
                    |provider: &BrowserProvider, args: BrowserArgs<'_>| {
                        provider.record();
                        let session = args.session(0)?;
                        Ok(StepResponse::passed()
                            .with_output("user", session.user.clone())
                            .with_output("address", session as *const BrowserSession as usize))
                    },
                )
                .param(Parameter::session::<BrowserSession>()),
            )
            .step(
                StepMethod::new(
                    "pause",
                    "^I wait (\\d+) ms$",
                    |provider: &BrowserProvider, args: BrowserArgs<'_>| {
                        provider.record();
                        let millis: u64 = args.get(0)?;
                        std::thread::sleep(Duration::from_millis(millis));
                        Ok(StepResponse::passed())
                    },
                )
                .param(Parameter::argument::<u64>("millis")),
            );
    }
}

/// Step bean that is not a provider and targets the browser provider
#[derive(Debug, Default)]
pub struct NavigationSteps;

impl StepBean for NavigationSteps {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step_for::<BrowserProvider>(
            StepMethod::new("open_page", "^I open (.*)$", |_steps: &NavigationSteps, args| {
                let url = args.str(1)?;
                Ok(StepResponse::passed().with_output("opened", url))
            })
            .param(Parameter::session::<BrowserSession>())
            .param(Parameter::argument::<String>("url")),
        );
    }

    fn bean_name(&self) -> &str {
        "NavigationSteps"
    }
}

/// Declares a parameter that is neither session-typed nor bound
pub struct UnsatisfiableSteps;

impl StepBean for UnsatisfiableSteps {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step_for::<BrowserProvider>(
            StepMethod::new("broken", "^broken$", |_steps: &UnsatisfiableSteps, _args| {
                Ok(StepResponse::passed())
            })
            .param(Parameter::session::<BrowserSession>())
            .param(Parameter::of::<u32>().named("retries")),
        );
    }

    fn bean_name(&self) -> &str {
        "UnsatisfiableSteps"
    }
}

/// Re-declares the browser provider's `greet` id
pub struct DuplicateSteps;

impl StepBean for DuplicateSteps {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step_for::<BrowserProvider>(StepMethod::new(
            "greet",
            "^hi (.*)$",
            |_steps: &DuplicateSteps, _args| Ok(StepResponse::passed()),
        ));
    }

    fn bean_name(&self) -> &str {
        "DuplicateSteps"
    }
}

/// A provider nobody registers
pub struct UnknownProvider;

impl StepProvider for UnknownProvider {
    type Session = ();

    fn name(&self) -> &str {
        "unknown"
    }
}

/// Targets a provider that cannot be resolved
pub struct OrphanSteps;

impl StepBean for OrphanSteps {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step_for::<UnknownProvider>(StepMethod::new(
            "orphan",
            "^orphan$",
            |_steps: &OrphanSteps, _args| Ok(StepResponse::passed()),
        ));
    }
}

/// Second provider with a unit session
#[derive(Debug, Default)]
pub struct LedgerProvider;

impl StepProvider for LedgerProvider {
    type Session = ();

    fn name(&self) -> &str {
        "ledger"
    }
}

/// Targets the ledger provider, resolved through a directory
pub struct LedgerSteps;

impl StepBean for LedgerSteps {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step_for::<LedgerProvider>(
            StepMethod::new(
                "post_entry",
                "^I post (\\d+) to (\\w+)$",
                |_steps: &LedgerSteps, args| {
                    let amount: u64 = args.get(0)?;
                    let account = args.str(1)?;
                    Ok(StepResponse::passed()
                        .with_output("account", account)
                        .with_output("amount", amount))
                },
            )
            .param(Parameter::argument::<u64>("amount"))
            .param(Parameter::argument::<String>("account")),
        );
    }
}

/// Discovery over the browser provider and the navigation steps
pub fn browser_catalog() -> (Arc<BrowserProvider>, ProviderCatalog) {
    let provider = Arc::new(BrowserProvider::default());
    let catalog = StepDiscovery::default()
        .scan(Arc::clone(&provider))
        .and_then(|discovery| discovery.scan(Arc::new(NavigationSteps)))
        .expect("browser fixtures register cleanly")
        .finish();
    (provider, catalog)
}

/// A directory holding a ledger provider instance
pub fn ledger_directory() -> Arc<ProviderDirectory> {
    let directory = Arc::new(ProviderDirectory::new());
    directory.register(Arc::new(LedgerProvider));
    directory
}
