use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifegrid::{Boundary, Coord, Dims, GameOfLife, Grid};

fn make_grid(size: usize) -> Grid {
    let dims = Dims::square(size);
    let alive = dims.coords().filter(|c: &Coord| (c.row + c.col) % 3 == 0);
    Grid::from_alive(dims, alive)
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    for size in [64, 128, 256] {
        let grid = make_grid(size);

        for (name, boundary) in [("toroidal", Boundary::Toroidal), ("bounded", Boundary::Bounded)] {
            group.bench_with_input(BenchmarkId::new(name, size), &grid, |b, grid| {
                b.iter_batched(
                    || GameOfLife::new(grid.clone(), boundary),
                    |mut game| game.next_generation(),
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_next_generation);
criterion_main!(benches);
