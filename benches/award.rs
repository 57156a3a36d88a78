use criterion::{black_box, criterion_group, criterion_main, Criterion};

use livremente::profile::UserProfile;
use livremente::progression::{award, LevelCurve};

fn bench_award(c: &mut Criterion) {
    let curve = LevelCurve::default();
    let fresh = UserProfile::new(&curve);

    c.bench_function("award small", |b| {
        b.iter(|| award(black_box(&fresh), black_box(30), &curve))
    });

    c.bench_function("award many levels", |b| {
        b.iter(|| award(black_box(&fresh), black_box(1_000_000), &curve))
    });
}

criterion_group!(benches, bench_award);
criterion_main!(benches);
