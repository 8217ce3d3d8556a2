use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cmwc::*;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut cmwc1 = Cmwc32::new(CMWC_R16_A5, 4).unwrap();
    cmwc1.seed(1);
    c.bench_function("Cmwc32::next", move |b| b.iter(|| cmwc1.next()));
    let mut cmwc2 = Cmwc32::new(CMWC_R16_A5, 4).unwrap();
    cmwc2.seed(2);
    c.bench_function("Cmwc32::next_i63", move |b| b.iter(|| cmwc2.next_i63()));
    let mut cmwc3 = Cmwc32::new(CMWC_R32_A5, 5).unwrap();
    cmwc3.seed(3);
    c.bench_function("Cmwc32::next_u64", move |b| b.iter(|| cmwc3.next_u64()));
    let mut cmwc4 = ReferenceCmwc::new(CMWC_R16_A5, 1 << 32, 16).unwrap();
    cmwc4.seed(4);
    c.bench_function("ReferenceCmwc::next", move |b| b.iter(|| cmwc4.next()));
    c.bench_function("multiplicative_order(R = 4)", |b| {
        b.iter(|| params::multiplicative_order(black_box(CMWC_R4_A1), 1 << 32, 4))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
