// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory list view implementing every host trait.
//!
//! [`MemoryList`] models a vertically scrolling list of equally sized rows
//! behind a fixed-height viewport. It records what the controller does to it
//! (recognizers, scroll observers, content relayouts, panel frames) so that
//! tests and demos can inspect the effects without a toolkit.
//!
//! Content of every row is laid out at `(0, 0, width, height)`.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::types::{Autoresizing, ControllerId, ListView, RowHost, ViewHost};

/// Row key of a [`MemoryList`]: the row's index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowId(pub u32);

/// Panel view handle of a [`MemoryList`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ViewId(pub u32);

#[derive(Clone, Debug)]
struct MemoryRow {
    content_frame: Rect,
    relayouts: usize,
}

#[derive(Clone, Debug)]
struct MemoryView {
    frame: Rect,
    parent: Option<RowId>,
    autoresizing: Autoresizing,
    last_move_animated: Option<bool>,
}

/// In-memory list view with equally sized rows.
#[derive(Clone, Debug)]
pub struct MemoryList {
    row_size: Size,
    rows: Vec<MemoryRow>,
    viewport_height: f64,
    scroll_offset: f64,
    views: Vec<MemoryView>,
    scroll_observers: Vec<ControllerId>,
    observer_registrations: usize,
    recognizers: Vec<ControllerId>,
    animations_enabled: bool,
}

impl MemoryList {
    /// Create a list of `rows` rows of `row_size`, seen through a viewport
    /// `viewport_height` tall, scrolled to the top.
    pub fn new(rows: u32, row_size: Size, viewport_height: f64) -> Self {
        let content = Rect::from_origin_size(Point::ZERO, row_size);
        Self {
            row_size,
            rows: (0..rows)
                .map(|_| MemoryRow {
                    content_frame: content,
                    relayouts: 0,
                })
                .collect(),
            viewport_height,
            scroll_offset: 0.0,
            views: Vec::new(),
            scroll_observers: Vec::new(),
            observer_registrations: 0,
            recognizers: Vec::new(),
            animations_enabled: true,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Create an unparented view of `size` at the origin.
    pub fn create_view(&mut self, size: Size) -> ViewId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ViewId uses 32-bit indices by design."
        )]
        let id = ViewId(self.views.len() as u32);
        self.views.push(MemoryView {
            frame: Rect::from_origin_size(Point::ZERO, size),
            parent: None,
            autoresizing: Autoresizing::empty(),
            last_move_animated: None,
        });
        id
    }

    /// Scroll to `offset` (negative values clamp to zero) and return the
    /// observers the host must notify.
    pub fn set_scroll_offset(&mut self, offset: f64) -> Vec<ControllerId> {
        self.scroll_offset = offset.max(0.0);
        self.scroll_observers.clone()
    }

    /// Change the viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Whether `id` is subscribed to scroll-offset changes.
    pub fn has_scroll_observer(&self, id: ControllerId) -> bool {
        self.scroll_observers.contains(&id)
    }

    /// Current scroll observers, in subscription order.
    pub fn scroll_observers(&self) -> Vec<ControllerId> {
        self.scroll_observers.clone()
    }

    /// Total number of scroll subscriptions ever requested, duplicates included.
    pub fn scroll_observer_registrations(&self) -> usize {
        self.observer_registrations
    }

    /// Whether the recognizer `id` is installed.
    pub fn has_gesture_recognizer(&self, id: ControllerId) -> bool {
        self.recognizers.contains(&id)
    }

    /// Installed recognizers, in installation order.
    pub fn gesture_recognizers(&self) -> Vec<ControllerId> {
        self.recognizers.clone()
    }

    /// How many times `row` ran its content layout.
    pub fn relayout_count(&self, row: RowId) -> usize {
        self.row(row).map_or(0, |r| r.relayouts)
    }

    /// Resizing rule last applied to `view`.
    pub fn view_autoresizing(&self, view: ViewId) -> Autoresizing {
        self.view(view)
            .map_or(Autoresizing::empty(), |v| v.autoresizing)
    }

    /// Whether animations were enabled when `view` was last moved, or `None`
    /// if it was never moved.
    pub fn last_move_animated(&self, view: ViewId) -> Option<bool> {
        self.view(view).and_then(|v| v.last_move_animated)
    }

    fn row(&self, row: RowId) -> Option<&MemoryRow> {
        self.rows.get(row.0 as usize)
    }

    fn row_mut(&mut self, row: RowId) -> Option<&mut MemoryRow> {
        self.rows.get_mut(row.0 as usize)
    }

    fn view(&self, view: ViewId) -> Option<&MemoryView> {
        self.views.get(view.0 as usize)
    }

    fn view_mut(&mut self, view: ViewId) -> Option<&mut MemoryView> {
        self.views.get_mut(view.0 as usize)
    }
}

impl ListView for MemoryList {
    type Row = RowId;

    fn visible_rows(&self) -> Vec<RowId> {
        let top = self.scroll_offset;
        let bottom = top + self.viewport_height;
        let h = self.row_size.height;
        let count = u32::try_from(self.rows.len()).unwrap_or(u32::MAX);
        (0..count)
            .filter(|&i| {
                let y0 = f64::from(i) * h;
                y0 < bottom && y0 + h > top
            })
            .map(RowId)
            .collect()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn add_scroll_observer(&mut self, id: ControllerId) {
        self.observer_registrations += 1;
        if !self.scroll_observers.contains(&id) {
            self.scroll_observers.push(id);
        }
    }

    fn remove_scroll_observer(&mut self, id: ControllerId) {
        self.scroll_observers.retain(|o| *o != id);
    }

    fn add_gesture_recognizer(&mut self, id: ControllerId) {
        if !self.recognizers.contains(&id) {
            self.recognizers.push(id);
        }
    }

    fn remove_gesture_recognizer(&mut self, id: ControllerId) {
        self.recognizers.retain(|r| *r != id);
    }
}

impl RowHost for MemoryList {
    fn content_bounds(&self, _row: RowId) -> Size {
        self.row_size
    }

    fn relayout_content(&mut self, row: RowId) {
        let size = self.row_size;
        if let Some(r) = self.row_mut(row) {
            r.content_frame = Rect::from_origin_size(Point::ZERO, size);
            r.relayouts += 1;
        }
    }

    fn content_frame(&self, row: RowId) -> Rect {
        self.row(row).map_or(Rect::ZERO, |r| r.content_frame)
    }

    fn set_content_frame(&mut self, row: RowId, frame: Rect) {
        if let Some(r) = self.row_mut(row) {
            r.content_frame = frame;
        }
    }
}

impl ViewHost for MemoryList {
    type View = ViewId;

    fn view_frame(&self, view: ViewId) -> Rect {
        self.view(view).map_or(Rect::ZERO, |v| v.frame)
    }

    fn set_view_frame(&mut self, view: ViewId, frame: Rect) {
        let animated = self.animations_enabled;
        if let Some(v) = self.view_mut(view) {
            v.frame = frame;
            v.last_move_animated = Some(animated);
        }
    }

    fn set_view_autoresizing(&mut self, view: ViewId, rule: Autoresizing) {
        if let Some(v) = self.view_mut(view) {
            v.autoresizing = rule;
        }
    }

    fn view_parent(&self, view: ViewId) -> Option<RowId> {
        self.view(view).and_then(|v| v.parent)
    }

    fn add_view_to_row(&mut self, row: RowId, view: ViewId) {
        if let Some(v) = self.view_mut(view) {
            v.parent = Some(row);
        }
    }

    fn remove_view(&mut self, view: ViewId) {
        if let Some(v) = self.view_mut(view) {
            v.parent = None;
        }
    }

    fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn visible_rows_follow_scroll() {
        let mut list = MemoryList::new(100, Size::new(320.0, 40.0), 100.0);
        assert_eq!(list.visible_rows(), vec![RowId(0), RowId(1), RowId(2)]);

        let _ = list.set_scroll_offset(30.0);
        assert_eq!(
            list.visible_rows(),
            vec![RowId(0), RowId(1), RowId(2), RowId(3)]
        );

        let _ = list.set_scroll_offset(3990.0);
        assert_eq!(list.visible_rows(), vec![RowId(99)]);

        let _ = list.set_scroll_offset(-50.0);
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn observers_are_recorded_once() {
        let mut list = MemoryList::new(1, Size::new(10.0, 10.0), 10.0);
        let id = ControllerId::next();
        list.add_scroll_observer(id);
        list.add_scroll_observer(id);
        assert_eq!(list.scroll_observers(), vec![id]);
        assert_eq!(list.scroll_observer_registrations(), 2);
        assert_eq!(list.set_scroll_offset(5.0), vec![id]);
        list.remove_scroll_observer(id);
        assert!(list.set_scroll_offset(0.0).is_empty());
    }

    #[test]
    fn unknown_handles_are_harmless() {
        let mut list = MemoryList::new(2, Size::new(10.0, 10.0), 10.0);
        list.set_content_frame(RowId(9), Rect::new(1.0, 1.0, 2.0, 2.0));
        list.relayout_content(RowId(9));
        list.set_view_frame(ViewId(4), Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(list.content_frame(RowId(9)), Rect::ZERO);
        assert_eq!(list.view_frame(ViewId(4)), Rect::ZERO);
        assert_eq!(list.view_parent(ViewId(4)), None);
        assert_eq!(list.relayout_count(RowId(9)), 0);
        assert_eq!(list.last_move_animated(ViewId(4)), None);
    }
}
