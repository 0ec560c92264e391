// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the reveal controller: direction, resizing rules, identity
//! tokens, and the collaborator traits a host toolkit implements.
//!
//! ## Overview
//!
//! The controller never owns rows or views. It reaches them through three
//! host traits:
//!
//! - [`ListView`]: the visible row set, scroll-offset subscription, and gesture
//!   recognizer registration.
//! - [`RowHost`]: per-row content geometry, addressed by row key.
//! - [`ViewHost`]: geometry and parenting of panel view handles.
//!
//! Per-row panel assignment is read through [`RowPanels`](crate::store::RowPanels),
//! which the [`RowStore`](crate::store::RowStore) implements.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::{Rect, Size};

/// Which screen edge the panel slides out from.
///
/// Fixed per controller for its whole lifetime.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RevealDirection {
    /// Panel rests past the right edge and is revealed by dragging left.
    #[default]
    Right,
    /// Panel rests past the left edge and is revealed by dragging right.
    Left,
}

impl RevealDirection {
    /// The resizing rule that keeps a panel pinned to this edge of its row.
    pub const fn panel_autoresizing(self) -> Autoresizing {
        match self {
            Self::Right => Autoresizing::FLEXIBLE_HEIGHT.union(Autoresizing::FLEXIBLE_LEFT_MARGIN),
            Self::Left => Autoresizing::FLEXIBLE_HEIGHT.union(Autoresizing::FLEXIBLE_RIGHT_MARGIN),
        }
    }
}

bitflags::bitflags! {
    /// How a view's frame follows changes to its parent's bounds.
    ///
    /// A flexible margin or dimension absorbs the parent's size change; fixed
    /// ones keep their value.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Autoresizing: u8 {
        /// Left margin stretches, so the view stays pinned to the right edge.
        const FLEXIBLE_LEFT_MARGIN   = 0b0000_0001;
        /// Width stretches with the parent.
        const FLEXIBLE_WIDTH         = 0b0000_0010;
        /// Right margin stretches, so the view stays pinned to the left edge.
        const FLEXIBLE_RIGHT_MARGIN  = 0b0000_0100;
        /// Top margin stretches.
        const FLEXIBLE_TOP_MARGIN    = 0b0000_1000;
        /// Height stretches with the parent.
        const FLEXIBLE_HEIGHT        = 0b0001_0000;
        /// Bottom margin stretches.
        const FLEXIBLE_BOTTOM_MARGIN = 0b0010_0000;
    }
}

/// Identity of one reveal controller.
///
/// Used as the registration token for the controller's gesture recognizer and
/// for its scroll-offset subscription, so hosts can tell controllers apart
/// without comparing addresses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ControllerId(pub(crate) u32);

impl ControllerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for host-side bookkeeping and logging.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Identifies one animation requested from an [`Animator`](crate::settle::Animator).
///
/// Animators allocate these; the controller only compares them so that steps
/// from a cancelled animation are ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnimationToken(pub u64);

/// The list view a controller is attached to.
///
/// Rows are addressed by a small copyable key. The key must stay stable while
/// the row is on screen; rows recycled for other content should be reported
/// to the [`RowStore`](crate::store::RowStore) via
/// [`RowStore::recycle_row`](crate::store::RowStore::recycle_row).
pub trait ListView {
    /// Row key.
    type Row: Copy + Ord + core::fmt::Debug;

    /// Rows currently on screen, in display order.
    fn visible_rows(&self) -> Vec<Self::Row>;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Start notifying `id` of scroll-offset changes.
    ///
    /// The controller only calls this once per drag; hosts may still treat a
    /// repeated id as a no-op.
    fn add_scroll_observer(&mut self, id: ControllerId);

    /// Stop notifying `id` of scroll-offset changes.
    fn remove_scroll_observer(&mut self, id: ControllerId);

    /// Install the horizontal pan recognizer identified by `id`.
    fn add_gesture_recognizer(&mut self, id: ControllerId);

    /// Remove the pan recognizer identified by `id`.
    fn remove_gesture_recognizer(&mut self, id: ControllerId);
}

/// Row handle operations, addressed by row key.
pub trait RowHost: ListView {
    /// Size of the row's bounds.
    fn content_bounds(&self, row: Self::Row) -> Size;

    /// Run the row's own content layout, resetting the content frame.
    fn relayout_content(&mut self, row: Self::Row);

    /// Frame of the row's primary content, in row coordinates.
    fn content_frame(&self, row: Self::Row) -> Rect;

    /// Replace the frame of the row's primary content.
    fn set_content_frame(&mut self, row: Self::Row, frame: Rect);
}

/// Geometry and parenting of panel view handles.
pub trait ViewHost: ListView {
    /// Panel view handle.
    type View: Copy + Eq + core::fmt::Debug;

    /// Frame of `view`, in its parent's coordinates.
    fn view_frame(&self, view: Self::View) -> Rect;

    /// Replace the frame of `view`.
    fn set_view_frame(&mut self, view: Self::View, frame: Rect);

    /// Replace the resizing rule of `view`.
    fn set_view_autoresizing(&mut self, view: Self::View, rule: Autoresizing);

    /// The row `view` is a direct child of, if any.
    ///
    /// Views parented somewhere other than a row report `None`.
    fn view_parent(&self, view: Self::View) -> Option<Self::Row>;

    /// Make `view` a direct child of `row`'s container, on top of its content.
    fn add_view_to_row(&mut self, row: Self::Row, view: Self::View);

    /// Detach `view` from whatever parent it has.
    fn remove_view(&mut self, view: Self::View);

    /// Whether implicit view animations are currently enabled.
    fn animations_enabled(&self) -> bool;

    /// Enable or disable implicit view animations.
    fn set_animations_enabled(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_pins_panel_to_its_edge() {
        let right = RevealDirection::Right.panel_autoresizing();
        assert!(right.contains(Autoresizing::FLEXIBLE_HEIGHT));
        assert!(right.contains(Autoresizing::FLEXIBLE_LEFT_MARGIN));
        assert!(!right.contains(Autoresizing::FLEXIBLE_RIGHT_MARGIN));

        let left = RevealDirection::Left.panel_autoresizing();
        assert!(left.contains(Autoresizing::FLEXIBLE_HEIGHT));
        assert!(left.contains(Autoresizing::FLEXIBLE_RIGHT_MARGIN));
        assert!(!left.contains(Autoresizing::FLEXIBLE_LEFT_MARGIN));
    }

    #[test]
    fn controller_ids_are_distinct() {
        let a = ControllerId::next();
        let b = ControllerId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn default_direction_is_right() {
        assert_eq!(RevealDirection::default(), RevealDirection::Right);
    }
}
