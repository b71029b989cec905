//! Form validation benchmarks
//!
//! Measures `validate` on the preset forms with passing and failing snapshots.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dokira_forms::{forms, validate, FieldRule, FormSnapshot};

fn signup_snapshots() -> [(&'static str, FormSnapshot); 3] {
    [
        (
            "valid",
            FormSnapshot::new()
                .with("email", "votre.email@exemple.com")
                .with("password", "motdepasse")
                .with("password_confirm", "motdepasse")
                .with("telephone", "+33 6 12 34 56 78"),
        ),
        (
            "invalid",
            FormSnapshot::new()
                .with("email", "pas-un-email")
                .with("password", "abc")
                .with("password_confirm", "abd")
                .with("telephone", "12-345"),
        ),
        ("empty", FormSnapshot::new()),
    ]
}

/// Benchmark the signup preset
fn bench_signup(c: &mut Criterion) {
    let mut group = c.benchmark_group("signup");
    let form = forms::validator(forms::SIGNUP).expect("signup preset compiles");

    for (name, snapshot) in signup_snapshots() {
        group.bench_with_input(BenchmarkId::new("validate", name), &snapshot, |b, s| {
            b.iter(|| form.validate(black_box(s)))
        });
    }

    group.finish();
}

/// Benchmark rule sets of growing size
fn bench_rule_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_count");

    for count in [4usize, 16, 64] {
        let rules: Vec<FieldRule> = (0..count)
            .map(|i| FieldRule::new(format!("field_{i}")).required().min_length(3))
            .collect();
        let snapshot: FormSnapshot = (0..count)
            .map(|i| (format!("field_{i}"), format!("value {i}")))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &rules, |b, rules| {
            b.iter(|| validate(black_box(rules), black_box(&snapshot)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_signup, bench_rule_count);
criterion_main!(benches);
