use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netcalc_cidr::{calculate_cidr, generate_subnets};

fn benchmark_calculate(c: &mut Criterion) {
    c.bench_function("calculate_cidr_slash_24", |b| {
        b.iter(|| calculate_cidr(black_box("192.168.1.77/24")))
    });
}

fn benchmark_subnets(c: &mut Criterion) {
    c.bench_function("generate_subnets_slash_16_to_24", |b| {
        b.iter(|| generate_subnets(black_box("10.20.0.0/16"), black_box("24")))
    });
}

criterion_group!(benches, benchmark_calculate, benchmark_subnets);
criterion_main!(benches);
