// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_picking::{
    ActionId, Event, GlobalId, MouseButtons, MouseEvent, MouseState, PickingFsm, Resolved,
};

fn resolver(id: GlobalId) -> Resolved {
    Resolved::new(0, ActionId(id.0 as u32))
}

/// A hover, press, drag and release stroke that crosses three targets.
fn stroke() -> Vec<(GlobalId, Event)> {
    let mut events = Vec::new();
    for i in 0..64_u32 {
        let x = f64::from(i) / 64.0;
        let id = GlobalId(u64::from(i / 16));
        let buttons = if (16..48).contains(&i) {
            MouseButtons::LEFT
        } else {
            MouseButtons::empty()
        };
        let e = MouseEvent::new(
            MouseButtons::empty(),
            MouseState::Move,
            buttons,
            Point::new(x, 0.5),
            Size::new(800.0, 600.0),
        );
        events.push((id, e.into()));
    }
    events
}

fn bench_picking_fsm(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_picking");
    group.sample_size(50);

    let events = stroke();
    group.bench_function("mouse_stroke(events=64)", |b| {
        b.iter(|| {
            let mut fsm = PickingFsm::new();
            let mut emitted = 0_usize;
            let mut count = |e: &mut Event| {
                emitted += 1;
                e.mark_as_used();
            };
            for (id, event) in &events {
                let mut event = event.clone();
                fsm.propagate_event(*id, &mut event, &mut count, &resolver);
            }
            black_box(emitted)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_picking_fsm);
criterion_main!(benches);
