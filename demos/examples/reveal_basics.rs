// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal basics.
//!
//! Drags a right-edge reveal across a short chat list, prints the panel and
//! content frames as the offset grows past the panel width, then releases and
//! prints the settle frames.
//!
//! Run:
//! - `cargo run -p understory_reveal_demos --example reveal_basics`
//! - `RUST_LOG=understory_reveal=trace cargo run -p understory_reveal_demos --example reveal_basics`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_reveal::controller::{RevealConfig, RevealController};
use understory_reveal::gesture::PanEvent;
use understory_reveal::memory::{MemoryList, RowId, ViewId};
use understory_reveal::settle::StepAnimator;
use understory_reveal::store::{RowPanels, RowStore};
use understory_reveal::types::{RowHost, ViewHost};

const ROW: Size = Size::new(320.0, 44.0);
const FRAME: Duration = Duration::from_millis(50);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let list = Rc::new(RefCell::new(MemoryList::new(8, ROW, 4.0 * ROW.height)));
    let mut panels = RowStore::new();
    {
        let mut l = list.borrow_mut();
        for i in 0..4 {
            let stamp = l.create_view(Size::new(80.0, ROW.height));
            // Even rows are "outgoing" bubbles that move with their timestamp.
            panels.set_panel(&mut *l, RowId(i), Some(stamp), i % 2 == 0);
        }
    }

    let mut animator = StepAnimator::new();
    let mut reveal = RevealController::new(&list, RevealConfig::default());

    let _ = reveal.handle_pan(PanEvent::began(Vec2::new(-6.0, 1.0)), &panels, &mut animator);
    println!("== Dragging ==");
    for dx in [-25.0, -25.0, -25.0, -25.0, -25.0] {
        let _ = reveal.handle_pan(PanEvent::moved(dx), &panels, &mut animator);
        print_rows(&list, &panels, reveal.offset());
    }

    println!("== Settling ==");
    let _ = reveal.handle_pan(PanEvent::ended(), &panels, &mut animator);
    while !animator.is_idle() {
        for event in animator.tick(FRAME) {
            let _ = reveal.apply_animation_event(event, &panels);
        }
        print_rows(&list, &panels, reveal.offset());
    }
}

fn print_rows(list: &Rc<RefCell<MemoryList>>, panels: &RowStore<RowId, ViewId>, offset: f64) {
    let l = list.borrow();
    println!("offset={offset:7.2}");
    for i in 0..2 {
        let row = RowId(i);
        let Some(view) = panels.panel(row) else {
            continue;
        };
        println!(
            "  row {i}: panel x={:7.2}  content x={:7.2}  attached={}",
            l.view_frame(view).x0,
            l.content_frame(row).x0,
            panels.is_attached(row),
        );
    }
}
