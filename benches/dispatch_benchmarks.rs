use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use stephub_provider::models::{StepRequest, StepResponse};
use stephub_provider::steps::{
    analyze_signature, Parameter, StepArguments, StepBean, StepMethod, StepProvider,
};
use stephub_provider::{StepDeclarations, StepDiscovery};

struct EchoProvider;

impl StepProvider for EchoProvider {
    type Session = String;

    fn name(&self) -> &str {
        "echo"
    }
}

impl StepBean for EchoProvider {
    fn declare_steps(steps: &mut StepDeclarations<Self>) {
        steps.step(
            StepMethod::new(
                "echo",
                "^echo (.*)$",
                |_provider: &EchoProvider, args: StepArguments<'_, String>| {
                    let text = args.str(1)?;
                    Ok(StepResponse::passed().with_output("echo", text))
                },
            )
            .param(Parameter::session::<String>())
            .param(Parameter::argument::<String>("text")),
        );
    }
}

fn benchmark_signature_analysis(c: &mut Criterion) {
    let parameters = vec![
        Parameter::session::<String>(),
        Parameter::argument::<String>("text"),
        Parameter::argument::<i64>("count"),
    ];
    c.bench_function("signature_analysis", |b| {
        b.iter(|| analyze_signature::<String>("Echo::echo", black_box(&parameters)))
    });
}

fn benchmark_discovery(c: &mut Criterion) {
    c.bench_function("discovery_pass", |b| {
        b.iter(|| {
            StepDiscovery::default()
                .scan(Arc::new(EchoProvider))
                .map(StepDiscovery::finish)
        })
    });
}

fn benchmark_dispatch(c: &mut Criterion) {
    let catalog = match StepDiscovery::default().scan(Arc::new(EchoProvider)) {
        Ok(discovery) => discovery.finish(),
        Err(err) => panic!("echo provider failed to register: {err}"),
    };
    let echo = catalog.get::<EchoProvider>().unwrap();
    let session = "bench".to_string();
    let request = StepRequest::new().with_argument("text", "hello");

    c.bench_function("invoke_step", |b| {
        b.iter(|| echo.invoke("echo", "session-1", &session, black_box(&request)))
    });
}

criterion_group!(
    benches,
    benchmark_signature_analysis,
    benchmark_discovery,
    benchmark_dispatch
);
criterion_main!(benches);
