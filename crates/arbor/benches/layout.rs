use std::hint::black_box;

use arbor::{
    EngineConfig, Result, Ui, WidgetId,
    geom::{Axis, Margins, Point, Rect, Size},
    layout::{GridLayout, Place, StackedLayout},
    widgets::{Grid, Rectangle},
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_sizes(n: usize) -> Vec<(Size, f32)> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| {
            let size = Size::new(rng.random_range(0.0..50.0), rng.random_range(0.0..50.0));
            (size, rng.random_range(0.0..3.0))
        })
        .collect()
}

fn benchmark_stacked(c: &mut Criterion) {
    let entries = random_sizes(200);
    c.bench_function("stacked_layout_200", |b| {
        b.iter(|| {
            let mut layout = StackedLayout::new(Axis::Vertical, Margins::uniform(4.0));
            for (i, (size, weight)) in entries.iter().enumerate() {
                layout.add_entry(*size, *weight, i);
            }
            let mut total = 0.0;
            layout
                .compute_layout(Rect::new(0.0, 0.0, 800.0, 12000.0), |_, r| {
                    total += r.size.h;
                    Ok(())
                })
                .ok();
            black_box(total)
        })
    });
}

fn benchmark_grid(c: &mut Criterion) {
    let entries = random_sizes(400);
    c.bench_function("grid_layout_20x20", |b| {
        b.iter(|| {
            let mut layout = GridLayout::new(Margins::default());
            for (i, (size, _)) in entries.iter().enumerate() {
                layout.add_entry(i / 20, i % 20, *size, i);
            }
            for i in 0..20 {
                layout.set_row_weight(i, 1.0);
                layout.set_column_weight(i, 1.0);
            }
            let mut count = 0;
            layout
                .compute_layout(Rect::new(0.0, 0.0, 1600.0, 1600.0), |_, _| {
                    count += 1;
                    Ok(())
                })
                .ok();
            black_box(count)
        })
    });
}

/// A root grid of `n * n` rectangles.
fn grid_ui(n: usize) -> Result<Ui> {
    let mut ui = Ui::new(EngineConfig::default());
    let grid = ui.add_typed(Grid::new());
    let cells: Vec<WidgetId> = (0..n * n)
        .map(|_| {
            ui.build(|a| Rectangle::new(a, Size::new(10.0, 10.0), [1.0; 4]))
                .id()
        })
        .collect();
    ui.with_typed(grid, |w, cx| {
        for (i, cell) in cells.iter().enumerate() {
            w.add_child(cx, i / n, i % n, *cell, Place::FILL)?;
        }
        for i in 0..n {
            w.set_row_weight(i, 1.0);
            w.set_column_weight(i, 1.0);
        }
        Ok(())
    })?;
    ui.set_root(grid)?;
    ui.layout_root()?;
    Ok(ui)
}

fn benchmark_ui(c: &mut Criterion) {
    c.bench_function("ui_layout_grid_30x30", |b| {
        let Ok(mut ui) = grid_ui(30) else {
            return;
        };
        b.iter(|| black_box(ui.layout_root().is_ok()))
    });

    c.bench_function("ui_hit_test_grid_30x30", |b| {
        let Ok(ui) = grid_ui(30) else {
            return;
        };
        let mut rng = StdRng::seed_from_u64(11);
        b.iter(|| {
            let p = Point::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            black_box(ui.hit_test(p))
        })
    });
}

criterion_group!(benches, benchmark_stacked, benchmark_grid, benchmark_ui);
criterion_main!(benches);
