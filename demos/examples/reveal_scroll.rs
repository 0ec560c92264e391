// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling during a reveal.
//!
//! Holds a left-edge reveal open while the list scrolls. Rows entering the
//! viewport pick up the current offset on the scroll notification; once the
//! drag ends, scroll notifications are no longer delivered to the controller.
//!
//! Run:
//! - `cargo run -p understory_reveal_demos --example reveal_scroll`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Size, Vec2};
use tracing_subscriber::EnvFilter;
use understory_reveal::controller::{RevealConfig, RevealController};
use understory_reveal::gesture::PanEvent;
use understory_reveal::memory::{MemoryList, RowId};
use understory_reveal::settle::StepAnimator;
use understory_reveal::store::RowStore;
use understory_reveal::types::{ListView, RevealDirection, ViewHost};

const ROW: Size = Size::new(320.0, 40.0);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let list = Rc::new(RefCell::new(MemoryList::new(200, ROW, 200.0)));
    let mut panels = RowStore::new();
    let mut stamps = Vec::new();
    {
        let mut l = list.borrow_mut();
        for i in 0..200 {
            let v = l.create_view(Size::new(64.0, ROW.height));
            panels.set_panel(&mut *l, RowId(i), Some(v), true);
            stamps.push(v);
        }
    }

    let mut animator = StepAnimator::new();
    let mut reveal = RevealController::new(
        &list,
        RevealConfig::with_direction(RevealDirection::Left),
    );

    let _ = reveal.handle_pan(PanEvent::began(Vec2::new(5.0, 0.0)), &panels, &mut animator);
    let _ = reveal.handle_pan(PanEvent::moved(48.0), &panels, &mut animator);

    for scroll in [0.0, 30.0, 200.0, 600.0] {
        let observers = list.borrow_mut().set_scroll_offset(scroll);
        if observers.contains(&reveal.id()) {
            let _ = reveal.scroll_offset_changed(&panels);
        }
        let l = list.borrow();
        let xs: Vec<_> = l
            .visible_rows()
            .into_iter()
            .map(|r| (r.0, l.view_frame(stamps[r.0 as usize]).x0))
            .collect();
        println!("scroll={scroll:.1} -> (row, panel x): {xs:?}");
    }

    let _ = reveal.handle_pan(PanEvent::ended(), &panels, &mut animator);
    let observers = list.borrow_mut().set_scroll_offset(1000.0);
    println!(
        "after release: {} scroll observer(s), controller observing: {}",
        observers.len(),
        reveal.is_observing_scroll()
    );
}
