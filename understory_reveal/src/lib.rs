// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reveal --heading-base-level=0

//! Understory Reveal: a Kurbo-native swipe-to-reveal controller for list rows.
//!
//! Dragging a row horizontally slides a hidden panel into view from one edge
//! of the row, optionally pushing the row's content aside (as in chat-bubble
//! UIs where the timestamp appears next to each message).
//!
//! - A single controller per list view turns a horizontal pan into one signed
//!   drag offset shared by all visible rows.
//! - While dragging, the controller follows the list's scroll offset, so rows
//!   scrolling into view show the same reveal.
//! - On release, the offset animates back to zero through an injected
//!   animation facility.
//!
//! The crate performs no rendering and owns no views. A host toolkit exposes
//! its list view through the traits in [`types`], and the controller moves
//! panel and content frames through them.
//!
//! ## API overview
//!
//! - [`controller::RevealController`]: the drag state machine, scroll
//!   synchronization, and settle animation driver.
//! - [`layout::layout_row`]: the pure per-row geometry;
//!   [`layout::layout_pass`] applies it to every visible row.
//! - [`store::RowStore`]: which rows have a panel and whether it is attached.
//! - [`registry::RevealRegistry`]: at most one controller per list view.
//! - [`settle::Animator`]: the animation facility interface, with
//!   [`settle::StepAnimator`] as a stepped reference implementation.
//! - [`memory::MemoryList`]: an in-memory host for tests and demos.
//!
//! ## Workflow
//!
//! 1) Assign panels with [`store::RowStore::set_panel`]; they rest just past
//!    the row's edge.
//! 2) Attach a controller with the reveal direction.
//! 3) Feed pan samples, scroll notifications, and animation frames to the
//!    controller. Each call that changes what is on screen runs one layout
//!    pass over the visible rows and reports it.
//!
//! ## Minimal usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use kurbo::{Size, Vec2};
//! use understory_reveal::controller::{RevealConfig, RevealController};
//! use understory_reveal::gesture::{PanEvent, PanResponse};
//! use understory_reveal::memory::{MemoryList, RowId};
//! use understory_reveal::settle::StepAnimator;
//! use understory_reveal::store::RowStore;
//! use understory_reveal::types::{RowHost, ViewHost};
//!
//! let list = Rc::new(RefCell::new(MemoryList::new(50, Size::new(320.0, 44.0), 440.0)));
//! let mut panels = RowStore::new();
//! let stamp = list.borrow_mut().create_view(Size::new(80.0, 44.0));
//! panels.set_panel(&mut *list.borrow_mut(), RowId(0), Some(stamp), true);
//!
//! let mut animator = StepAnimator::new();
//! let mut reveal = RevealController::new(&list, RevealConfig::default());
//!
//! let began = reveal.handle_pan(PanEvent::began(Vec2::new(-6.0, 1.0)), &panels, &mut animator);
//! assert_eq!(began.response, PanResponse::Accepted);
//! let _ = reveal.handle_pan(PanEvent::moved(-50.0), &panels, &mut animator);
//! assert_eq!(list.borrow().view_frame(stamp).x0, 270.0);
//! assert_eq!(list.borrow().content_frame(RowId(0)).x0, -50.0);
//!
//! // Release: the offset settles back to zero.
//! let _ = reveal.handle_pan(PanEvent::ended(), &panels, &mut animator);
//! for event in animator.tick(Duration::from_millis(300)) {
//!     let _ = reveal.apply_animation_event(event, &panels);
//! }
//! assert_eq!(reveal.offset(), 0.0);
//! assert_eq!(list.borrow().view_frame(stamp).x0, 320.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod gesture;
pub mod layout;
pub mod memory;
pub mod registry;
pub mod settle;
pub mod store;
pub mod types;
