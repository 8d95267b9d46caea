use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

use prime_core::{
    random_prime, Adaptive, MillerRabin, PrimalityTest, Range, ResidueFilter, Scanner, Sieve,
    TrialDivision, DART69_MODULUS,
};

fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve_build");

    for bound in [10_000u64, 1_000_000, 10_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(bound), &bound, |b, &bound| {
            b.iter(|| Sieve::new(bound));
        });
    }

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_1e6");
    group.sample_size(20);

    let range = Range::up_to(1_000_000);
    let scanner = Scanner::new(Adaptive::default()).with_sieve(Sieve::new(1_000_000).unwrap());
    let dart69 = ResidueFilter::dart69();
    let permissive = ResidueFilter::permissive(DART69_MODULUS).unwrap();

    group.bench_function("linear_permissive", |b| {
        b.iter(|| scanner.scan(&range, &permissive));
    });
    group.bench_function("linear_dart69", |b| {
        b.iter(|| scanner.scan(&range, &dart69));
    });
    group.bench_function("wheel_dart69", |b| {
        b.iter(|| scanner.scan_wheel(&range, &dart69));
    });

    group.finish();
}

fn bench_scan_past_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_past_table");
    group.sample_size(10);

    // Window just above 10^12 where every candidate goes through the strategy.
    let range = Range::new(1_000_000_000_000, 1_000_000_010_000).unwrap();
    let filter = ResidueFilter::dart69();

    let trial = Scanner::new(TrialDivision);
    group.bench_function("trial", |b| {
        b.iter(|| trial.scan(&range, &filter));
    });
    let mr = Scanner::new(MillerRabin::default());
    group.bench_function("miller_rabin", |b| {
        b.iter(|| mr.scan(&range, &filter));
    });

    group.finish();
}

fn bench_primality(c: &mut Criterion) {
    let mut group = c.benchmark_group("primality");
    let mut rng = StdRng::seed_from_u64(69);

    for bits in [64u32, 128, 256] {
        let p: BigUint = random_prime(bits, &mut rng);
        group.bench_with_input(BenchmarkId::new("miller_rabin", bits), &p, |b, p| {
            let test = MillerRabin::default();
            b.iter(|| test.is_prime(p));
        });
    }

    for bits in [32u32, 40] {
        let p: BigUint = random_prime(bits, &mut rng);
        group.bench_with_input(BenchmarkId::new("trial", bits), &p, |b, p| {
            b.iter(|| TrialDivision.is_prime(p));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sieve,
    bench_scan,
    bench_scan_past_table,
    bench_primality
);
criterion_main!(benches);
