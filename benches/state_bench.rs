//! Benchmarks for state construction, validation, and serialization.
//!
//! The framework sits in the configuration path of every reduction run, so
//! building and serializing a full tree should stay comfortably in the
//! microsecond range.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reduction_state::context::{Instrument, ReductionContext};
use reduction_state::facets::reduction::ReductionState;
use reduction_state::factory::{
    get_reduction_builder, get_slice_event_builder, get_wavelength_builder,
};
use reduction_state::serializer::{decode, encode};
use reduction_state::Frozen;

fn build_tree() -> Frozen<ReductionState> {
    let context = ReductionContext::for_instrument(Instrument::Sans2d);

    let slice = get_slice_event_builder(&context)
        .and_then(|b| b.set_start_time(vec![0.1, 1.3, 2.7]))
        .and_then(|b| b.set_end_time(vec![0.2, 1.6, 3.1]))
        .and_then(|b| b.build())
        .unwrap();

    let wavelength = get_wavelength_builder(&context)
        .and_then(|b| b.set_wavelength_low(2.0))
        .and_then(|b| b.set_wavelength_high(14.0))
        .and_then(|b| b.set_wavelength_step(0.125))
        .and_then(|b| b.build())
        .unwrap();

    get_reduction_builder(&context)
        .map(|b| b.set_slice(slice).set_wavelength(wavelength))
        .and_then(|b| b.build())
        .unwrap()
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_full_tree", |b| b.iter(|| black_box(build_tree())));
}

fn bench_validate(c: &mut Criterion) {
    let frozen = build_tree();
    c.bench_function("validate_full_tree", |b| {
        b.iter(|| black_box(&frozen).validate())
    });
}

fn bench_encode(c: &mut Criterion) {
    let frozen = build_tree();
    c.bench_function("encode_full_tree", |b| b.iter(|| encode(black_box(&*frozen))));
}

fn bench_decode(c: &mut Criterion) {
    let frozen = build_tree();
    let wire = encode(&*frozen);
    c.bench_function("decode_full_tree", |b| {
        b.iter(|| decode::<ReductionState>(black_box(&wire)))
    });
}

criterion_group!(benches, bench_build, bench_validate, bench_encode, bench_decode);
criterion_main!(benches);
