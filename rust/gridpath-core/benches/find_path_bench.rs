use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridpath_core::{EngineOptions, PathEngine, Point};

fn bench_find_path(c: &mut Criterion) {
    let open = PathEngine::build(128, 128, &EngineOptions::default(), |_, _| false).unwrap();
    c.bench_function("find_path open 128x128 corner to corner", |b| {
        b.iter(|| open.find_path(black_box(Point::new(16.0, 16.0)), black_box(Point::new(4080.0, 4080.0))))
    });

    let walled = PathEngine::build(128, 128, &EngineOptions::default(), |x, y| {
        let cx = (x / 32.0) as i32;
        let cy = (y / 32.0) as i32;
        cx == 64 && cy != 127
    })
    .unwrap();
    c.bench_function("find_path wall detour 128x128", |b| {
        b.iter(|| walled.find_path(black_box(Point::new(16.0, 2048.0)), black_box(Point::new(4080.0, 2048.0))))
    });
}

criterion_group!(benches, bench_find_path);
criterion_main!(benches);
