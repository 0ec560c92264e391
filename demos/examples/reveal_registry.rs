// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching, replacing, and releasing controllers.
//!
//! Run:
//! - `cargo run -p understory_reveal_demos --example reveal_registry`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_reveal::controller::RevealConfig;
use understory_reveal::memory::MemoryList;
use understory_reveal::registry::RevealRegistry;
use understory_reveal::types::RevealDirection;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Screen {
    Inbox,
    Thread,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let inbox = Rc::new(RefCell::new(MemoryList::new(20, Size::new(320.0, 60.0), 480.0)));
    let thread = Rc::new(RefCell::new(MemoryList::new(80, Size::new(320.0, 44.0), 480.0)));
    let mut reveals: RevealRegistry<Screen, MemoryList> = RevealRegistry::new();

    let _ = reveals.attach(Screen::Inbox, &inbox, RevealConfig::default());
    let _ = reveals.attach(Screen::Thread, &thread, RevealConfig::default());
    println!("attached: {}", reveals.len());

    // Re-attaching replaces the controller and its recognizer.
    let id = reveals
        .attach(
            Screen::Thread,
            &thread,
            RevealConfig::with_direction(RevealDirection::Left),
        )
        .id();
    println!(
        "thread recognizers after re-attach: {:?} (current {id:?})",
        thread.borrow().gesture_recognizers()
    );

    // Dropping a list view leaves an inert controller until pruned.
    drop(inbox);
    let inert = reveals.get(Screen::Inbox).is_some_and(|c| !c.is_alive());
    println!("inbox controller inert: {inert}");
    println!("pruned: {}", reveals.prune());

    let _ = reveals.detach(Screen::Thread);
    println!(
        "thread recognizers after detach: {:?}",
        thread.borrow().gesture_recognizers()
    );
}
