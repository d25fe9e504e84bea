// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_picking::{Event, TouchDevice, TouchEvent, TouchPoint, TouchState};
use understory_view_router::{View, ViewRegistry};

const CANVAS: Size = Size::new(1024.0, 1024.0);

/// A `side` x `side` grid of equally sized views.
fn grid(side: i32) -> ViewRegistry {
    let step = 1024 / side;
    let mut views = ViewRegistry::new();
    for row in 0..side {
        for col in 0..side {
            views.push_view(View::new(col * step, row * step, step, step));
        }
    }
    views
}

/// Contacts spread along the diagonal so they land in different views.
fn touches(points: u32, state: TouchState) -> Event {
    let pts = (0..points)
        .map(|i| {
            let t = (f64::from(i) + 0.5) / f64::from(points);
            TouchPoint::new(u64::from(i), state, Point::new(t, t), CANVAS)
        })
        .collect();
    TouchEvent::new(pts, TouchDevice::TouchScreen).into()
}

fn bench_touch_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_view_router");
    group.sample_size(50);

    for &(side, points) in &[(2_i32, 2_u32), (4_i32, 10_u32), (8_i32, 10_u32)] {
        group.bench_function(format!("touch_split(views={},points={points})", side * side), |b| {
            b.iter_batched(
                || {
                    let mut views = grid(side);
                    let mut start = touches(points, TouchState::Started);
                    views.propagate(&mut start, |_, _| {});
                    (views, touches(points, TouchState::Updated))
                },
                |(mut views, mut event)| {
                    let consumed = views.propagate(&mut event, |e, index| {
                        if index % 2 == 0 {
                            e.mark_as_used();
                        }
                    });
                    black_box((consumed, event));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("find_view(views=64)", |b| {
        let views = grid(8);
        b.iter(|| black_box(views.find_view(black_box(Point::new(1000.0, 1000.0)))));
    });

    group.finish();
}

criterion_group!(benches, bench_touch_split);
criterion_main!(benches);
