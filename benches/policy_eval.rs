use abac_rs::abac::{
    glob_match, Attribute, AttributeKind, Condition, MatchStrategy, Operator, Policy,
    PolicyEngine, PolicySet, Request, Resource, ResourceMatcher, Statement,
};
use abac_rs::EngineBuilder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Create a policy set with conditions, regex resources and a deny
fn create_complex_policies() -> PolicySet {
    let documents = Policy::new(1, "documents")
        .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["public/*"])))
        .with_statement(
            Statement::allow(["read", "write"], ResourceMatcher::new("doc", ["users/*/documents/*"]))
                .with_condition(Condition::new(
                    Operator::Eq,
                    AttributeKind::Subject,
                    "department",
                    "engineering",
                ))
                .with_condition(Condition::new(
                    Operator::Gte,
                    AttributeKind::Subject,
                    "level",
                    2_i64,
                )),
        );

    let lockdown = Policy::new(2, "lockdown")
        .with_statement(
            Statement::deny(["write"], ResourceMatcher::new("doc", [r"^system/"]))
                .with_strategy(MatchStrategy::Regex),
        )
        .with_statement(
            Statement::deny(["read", "write"], ResourceMatcher::new("doc", ["*"])).with_condition(
                Condition::new(Operator::RegexMatch, AttributeKind::Env, "network", r"^guest-\d+$"),
            ),
        );

    PolicySet::new().with(documents).with(lockdown)
}

fn engineer() -> Vec<Attribute> {
    vec![
        Attribute::subject("department", "engineering"),
        Attribute::subject("level", 3_i64),
        Attribute::env("network", "office"),
    ]
}

/// Benchmark evaluation with the regex cache warm (hot path)
fn bench_policy_eval_cached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("policy_eval_cached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let policies = create_complex_policies();
            let engine = PolicyEngine::new_default();
            let request = Request::new("write", Resource::new("doc", "users/alice/documents/plan.md"))
                .with_attributes(engineer());

            b.iter(|| {
                for _ in 0..count {
                    let decision = engine.evaluate(&policies, &request);
                    black_box(decision).ok();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark evaluation compiling every regex on use (cold path)
fn bench_policy_eval_uncached(c: &mut Criterion) {
    let eval_counts = vec![100, 1_000];

    let mut group = c.benchmark_group("policy_eval_uncached");

    for count in eval_counts {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let policies = create_complex_policies();
            let engine = EngineBuilder::new().regex_cache_capacity(0).build();
            let request = Request::new("write", Resource::new("doc", "users/alice/documents/plan.md"))
                .with_attributes(engineer());

            b.iter(|| {
                for _ in 0..count {
                    let decision = engine.evaluate(&policies, &request);
                    black_box(decision).ok();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark glob matching on its own
fn bench_glob_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("glob_matching");

    group.bench_function("exact", |b| {
        b.iter(|| black_box(glob_match(black_box("reports/2024/q1.pdf"), "reports/2024/q1.pdf")));
    });

    group.bench_function("prefix", |b| {
        b.iter(|| black_box(glob_match(black_box("reports/*"), "reports/2024/q1.pdf")));
    });

    group.bench_function("segmented", |b| {
        b.iter(|| black_box(glob_match(black_box("reports/*/q*.pdf"), "reports/2024/q1.pdf")));
    });

    group.finish();
}

/// Benchmark policy with many statements
fn bench_policy_complexity(c: &mut Criterion) {
    let statement_counts = vec![5, 25, 100];

    let mut group = c.benchmark_group("policy_complexity");

    for count in statement_counts {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut policy = Policy::new(1, "wide");
            for i in 0..count {
                policy.add_statement(Statement::allow(
                    ["read"],
                    ResourceMatcher::new("doc", [format!("path_{}/*", i)]),
                ));
            }

            let engine = PolicyEngine::new_default();

            b.iter(|| {
                // Every statement is checked: Allow never short-circuits
                for i in 0..100 {
                    let request =
                        Request::new("read", Resource::new("doc", format!("path_{}/file.txt", i % count)));
                    black_box(engine.evaluate(&policy, &request)).ok();
                }
            });
        });
    }

    group.finish();
}

/// Benchmark deny vs allow evaluation
fn bench_deny_vs_allow(c: &mut Criterion) {
    let mut group = c.benchmark_group("deny_vs_allow");

    let mut policy = Policy::new(1, "mixed");
    policy.add_statement(Statement::deny(["read"], ResourceMatcher::new("doc", ["denied/*"])));
    for i in 0..20 {
        policy.add_statement(Statement::allow(
            ["read"],
            ResourceMatcher::new("doc", [format!("allowed_{}/*", i)]),
        ));
    }
    policy.add_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["*"])));

    let engine = PolicyEngine::new_default();

    group.bench_function("allow_match", |b| {
        let request = Request::new("read", Resource::new("doc", "allowed/file.txt"));
        b.iter(|| black_box(engine.evaluate(&policy, &request)).ok());
    });

    group.bench_function("deny_match", |b| {
        // Deny is the first statement, the rest are never evaluated
        let request = Request::new("read", Resource::new("doc", "denied/file.txt"));
        b.iter(|| black_box(engine.evaluate(&policy, &request)).ok());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_policy_eval_cached,
    bench_policy_eval_uncached,
    bench_glob_matching,
    bench_policy_complexity,
    bench_deny_vs_allow,
);
criterion_main!(benches);
