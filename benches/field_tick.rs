//! Benchmarks for field ticking and link collection.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use gossamer::field::{Field, Surface};
use gossamer::{Palette, PointerState};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_tick");

    group.bench_function("idle_64", |b| {
        let mut field = Field::new(Surface::new(1200.0, 800.0, 1.0), Palette::default(), 7);
        let pointer = PointerState::default();
        b.iter(|| black_box(field.tick(&pointer)))
    });

    group.bench_function("idle_120", |b| {
        let mut field = Field::new(Surface::new(2560.0, 1440.0, 2.0), Palette::default(), 7);
        let pointer = PointerState::default();
        b.iter(|| black_box(field.tick(&pointer)))
    });

    group.bench_function("pointer_120", |b| {
        let mut field = Field::new(Surface::new(2560.0, 1440.0, 2.0), Palette::default(), 7);
        let pointer = PointerState {
            position: Vec2::new(1280.0, 720.0),
            active: true,
        };
        b.iter(|| black_box(field.tick(&pointer)))
    });

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
