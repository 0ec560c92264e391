// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use understory_reveal::controller::{RevealConfig, RevealController};
use understory_reveal::gesture::PanEvent;
use understory_reveal::layout::{RowLayoutInput, layout_pass, layout_row};
use understory_reveal::memory::{MemoryList, RowId, ViewId};
use understory_reveal::settle::StepAnimator;
use understory_reveal::store::RowStore;
use understory_reveal::types::RevealDirection;

const ROW: Size = Size::new(390.0, 44.0);

fn populated(rows: u32, viewport: f64) -> (MemoryList, RowStore<RowId, ViewId>) {
    let mut list = MemoryList::new(rows, ROW, viewport);
    let mut store = RowStore::new();
    for i in 0..rows {
        let v = list.create_view(Size::new(72.0, ROW.height));
        store.set_panel(&mut list, RowId(i), Some(v), i % 3 != 0);
    }
    (list, store)
}

fn bench_layout_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_row");
    group.throughput(Throughput::Elements(1));
    for direction in [RevealDirection::Right, RevealDirection::Left] {
        group.bench_function(format!("{direction:?}"), |b| {
            let mut d = -100.0;
            b.iter(|| {
                d = if d > 100.0 { -100.0 } else { d + 0.5 };
                black_box(layout_row(black_box(&RowLayoutInput {
                    row: ROW,
                    panel_width: 72.0,
                    offset: d,
                    direction,
                    attached: true,
                })))
            });
        });
    }
    group.finish();
}

fn bench_layout_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_pass");
    for visible in [10_u32, 40, 160] {
        group.throughput(Throughput::Elements(u64::from(visible)));
        group.bench_function(format!("visible_{visible}"), |b| {
            let (mut list, store) = populated(2_000, f64::from(visible) * ROW.height);
            let _ = list.set_scroll_offset(500.0 * ROW.height);
            b.iter(|| {
                black_box(layout_pass(
                    &mut list,
                    &store,
                    black_box(-36.0),
                    RevealDirection::Right,
                ))
            });
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");
    group.bench_function("began_60_moves_ended", |b| {
        b.iter_batched(
            || {
                let (list, store) = populated(500, 20.0 * ROW.height);
                (Rc::new(RefCell::new(list)), store, StepAnimator::new())
            },
            |(list, store, mut animator)| {
                let mut reveal = RevealController::new(&list, RevealConfig::default());
                let _ = reveal.handle_pan(PanEvent::began(Vec2::new(-4.0, 0.0)), &store, &mut animator);
                for _ in 0..60 {
                    let _ = reveal.handle_pan(PanEvent::moved(-1.5), &store, &mut animator);
                }
                black_box(reveal.handle_pan(PanEvent::ended(), &store, &mut animator))
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_layout_row, bench_layout_pass, bench_drag);
criterion_main!(benches);
