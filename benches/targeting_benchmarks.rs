#![allow(clippy::all)]
//! Benchmarks for URL targeting, version ordering and value casts.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vane::prelude::*;

fn bench_url_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_targets");
    let page = Url::parse("https://shop.example.com/checkout/pay?utm=spring#summary").unwrap();
    let targets = vec![
        UrlTarget::simple("*.example.com/checkout/*"),
        UrlTarget::regex("/checkout/debug").exclude(),
    ];

    group.bench_function("simple_wildcard", |b| {
        b.iter(|| eval_simple_url_target(black_box(&page), black_box("*.example.com/checkout/*")))
    });

    group.bench_function("simple_with_query", |b| {
        b.iter(|| eval_simple_url_target(black_box(&page), black_box("example.com/checkout?utm=*")))
    });

    group.bench_function("target_list", |b| {
        b.iter(|| is_url_targeted(black_box(&page), black_box(&targets)))
    });

    group.finish();
}

fn bench_versions(c: &mut Criterion) {
    let mut group = c.benchmark_group("versions");

    group.bench_function("padded_version_string", |b| {
        b.iter(|| padded_version_string(black_box("v1.20.3-alpha.12+build")))
    });

    group.bench_function("compare_versions", |b| {
        b.iter(|| compare_versions(black_box("1.0.0-beta"), black_box("1.0.0")))
    });

    group.finish();
}

fn bench_value_casts(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_casts");
    let tags = arr!["a", "b", arr![1, 2.5]];
    let attributes = obj! {
        "company" => obj! { "seats" => "40" },
    };

    group.bench_function("arr_to_str", |b| {
        b.iter(|| black_box(&tags).cast(ValueType::Str))
    });

    group.bench_function("path_then_num", |b| {
        b.iter(|| black_box(&attributes).path(&["company", "seats"]).cast(ValueType::Num))
    });

    group.finish();
}

criterion_group!(benches, bench_url_targets, bench_versions, bench_value_casts);
criterion_main!(benches);
