use chart_kit::api::{AxisBinding, ScaleBinding};
use chart_kit::core::{DataPoint, DomainSpec, Field, categorical_domain, numeric_domain, stack};
use chart_kit::interaction::{LegendLayout, SelectionVector, toggle_selection};
use chart_kit::layout::InnerSize;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated(len: usize, categories: usize) -> Vec<DataPoint> {
    (0..len)
        .map(|i| {
            let value = 10.0 + (i % 97) as f64 * 1.5;
            DataPoint::new(format!("c{}", i % categories), value)
                .with_group(format!("s{}", i / categories))
        })
        .collect()
}

fn bench_domain_resolution_10k(c: &mut Criterion) {
    let data = generated(10_000, 250);

    c.bench_function("numeric_domain_10k", |b| {
        b.iter(|| numeric_domain(black_box(&data), &Field::Value, None))
    });
    c.bench_function("stacked_domain_10k", |b| {
        b.iter(|| numeric_domain(black_box(&data), &Field::Value, Some(&Field::Name)))
    });
    c.bench_function("categorical_domain_10k", |b| {
        b.iter(|| categorical_domain(black_box(&data), &Field::Name))
    });
}

fn bench_stacking_10k(c: &mut Criterion) {
    let data = generated(10_000, 250);

    c.bench_function("stack_10k", |b| {
        b.iter(|| stack(black_box(&data), &Field::Name))
    });
}

fn bench_scale_binding_2k(c: &mut Criterion) {
    let data = generated(2_000, 40);
    let binding = ScaleBinding::new()
        .with_mapper(|mut point: DataPoint, index: usize| {
            point.order = Some(index);
            point
        })
        .with_x(AxisBinding::band().with_domain(DomainSpec::categorical(Field::Name)))
        .with_y(
            AxisBinding::linear()
                .with_domain(DomainSpec::numeric(Field::Value, Some(Field::Name))),
        );

    c.bench_function("scale_binding_resolve_2k", |b| {
        b.iter(|| {
            let _ = binding
                .resolve(black_box(&data), InnerSize::new(1_520.0, 820.0))
                .expect("binding should resolve");
        })
    });
}

fn bench_selection_toggle_10k(c: &mut Criterion) {
    let flags = vec![true; 10_000];
    let isolated = toggle_selection(&flags, 4_321);

    c.bench_function("toggle_isolate_10k", |b| {
        b.iter(|| toggle_selection(black_box(&flags), black_box(4_321)))
    });
    c.bench_function("toggle_restore_10k", |b| {
        b.iter(|| toggle_selection(black_box(&isolated), black_box(4_321)))
    });
}

fn bench_legend_click_2k(c: &mut Criterion) {
    let data = generated(2_000, 40);
    let layout = LegendLayout::new(&data, &Field::Name);
    let selection = SelectionVector::all(data.len());

    c.bench_function("legend_click_2k", |b| {
        b.iter(|| layout.click(black_box(&selection), black_box(7)))
    });
}

criterion_group!(
    benches,
    bench_domain_resolution_10k,
    bench_stacking_10k,
    bench_scale_binding_2k,
    bench_selection_toggle_10k,
    bench_legend_click_2k
);
criterion_main!(benches);
