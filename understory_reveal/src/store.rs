// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row state store: which rows have a panel, and whether it is attached.
//!
//! ## Ownership
//!
//! The store belongs to the application. The controller reads it during
//! every layout pass through [`RowPanels`] and never changes presence or
//! attachment; it only moves the panel views themselves.
//!
//! ## Lifecycle
//!
//! - [`RowStore::set_panel`] assigns or clears a row's panel and gives a new
//!   panel its resting placement just past the row's right edge.
//! - [`RowStore::recycle_row`] clears a row that the list view is about to
//!   reuse for different content.
//! - [`RowStore::forget_row`] drops the entry of a destroyed row.

use alloc::collections::BTreeMap;

use kurbo::Rect;

use crate::types::{RowHost, ViewHost};

/// Read access to per-row panel state.
pub trait RowPanels<R, V> {
    /// Panel view assigned to `row`, if any.
    fn panel(&self, row: R) -> Option<V>;

    /// Whether the row's content is displaced along with its panel.
    ///
    /// Rows with no recorded state are attached.
    fn is_attached(&self, row: R) -> bool;

    /// Whether `row` has a panel.
    fn has_panel(&self, row: R) -> bool {
        self.panel(row).is_some()
    }
}

/// Panel state of a single row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowPanelState<V> {
    /// Panel view to reveal; `None` means the row has no panel.
    pub panel: Option<V>,
    /// Whether the row's content moves together with the panel.
    pub attached: bool,
}

impl<V> Default for RowPanelState<V> {
    fn default() -> Self {
        Self {
            panel: None,
            attached: true,
        }
    }
}

/// Explicit mapping from row key to [`RowPanelState`].
#[derive(Clone, Debug)]
pub struct RowStore<R, V> {
    rows: BTreeMap<R, RowPanelState<V>>,
}

impl<R: Copy + Ord, V: Copy + Eq> Default for RowStore<R, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Ord, V: Copy + Eq> RowStore<R, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// State recorded for `row`, if any.
    pub fn state(&self, row: R) -> Option<&RowPanelState<V>> {
        self.rows.get(&row)
    }

    /// Assign (`Some`) or clear (`None`) the panel of `row`.
    ///
    /// A previous panel that is still a child of `row` is removed from it
    /// first. A new panel is added to the row and placed at rest: just past
    /// the row's right edge, spanning the full row height, keeping its own
    /// width. Implicit animations are suppressed for that placement and then
    /// restored to their previous setting.
    pub fn set_panel<H>(&mut self, host: &mut H, row: R, view: Option<V>, attached: bool)
    where
        H: ViewHost<Row = R, View = V> + RowHost,
    {
        if let Some(old) = self.panel(row)
            && host.view_parent(old) == Some(row)
        {
            host.remove_view(old);
        }

        if let Some(view) = view {
            let was_enabled = host.animations_enabled();
            host.set_animations_enabled(false);

            host.add_view_to_row(row, view);
            let bounds = host.content_bounds(row);
            let frame = host.view_frame(view);
            host.set_view_frame(
                view,
                Rect::new(
                    bounds.width,
                    0.0,
                    bounds.width + frame.width(),
                    bounds.height,
                ),
            );

            host.set_animations_enabled(was_enabled);
        }

        let state = self.rows.entry(row).or_default();
        state.panel = view;
        state.attached = attached;
    }

    /// Change whether `row`'s content moves together with its panel.
    pub fn set_attached(&mut self, row: R, attached: bool) {
        self.rows.entry(row).or_default().attached = attached;
    }

    /// Clear `row` before the list view reuses it for other content.
    ///
    /// Its panel, if still parented to the row, is removed from it.
    pub fn recycle_row<H>(&mut self, host: &mut H, row: R)
    where
        H: ViewHost<Row = R, View = V>,
    {
        if let Some(state) = self.rows.remove(&row)
            && let Some(view) = state.panel
            && host.view_parent(view) == Some(row)
        {
            host.remove_view(view);
        }
    }

    /// Drop the state of a destroyed row, returning it.
    pub fn forget_row(&mut self, row: R) -> Option<RowPanelState<V>> {
        self.rows.remove(&row)
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(R) -> bool) {
        self.rows.retain(|row, _| keep(*row));
    }

    /// Number of rows with recorded state.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row has recorded state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Copy + Ord, V: Copy + Eq> RowPanels<R, V> for RowStore<R, V> {
    fn panel(&self, row: R) -> Option<V> {
        self.rows.get(&row).and_then(|s| s.panel)
    }

    fn is_attached(&self, row: R) -> bool {
        self.rows.get(&row).is_none_or(|s| s.attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryList, RowId};
    use kurbo::Size;

    fn list() -> MemoryList {
        MemoryList::new(10, Size::new(320.0, 44.0), 200.0)
    }

    #[test]
    fn unknown_rows_are_attached_without_panel() {
        let store: RowStore<RowId, u32> = RowStore::new();
        assert!(store.is_attached(RowId(3)));
        assert!(!store.has_panel(RowId(3)));
        assert!(store.is_empty());
    }

    #[test]
    fn set_panel_places_view_at_rest_without_animation() {
        let mut list = list();
        let mut store = RowStore::new();
        let view = list.create_view(Size::new(80.0, 10.0));
        list.set_animations_enabled(true);

        store.set_panel(&mut list, RowId(2), Some(view), true);

        assert_eq!(list.view_parent(view), Some(RowId(2)));
        assert_eq!(list.view_frame(view), Rect::new(320.0, 0.0, 400.0, 44.0));
        assert_eq!(list.last_move_animated(view), Some(false));
        assert!(list.animations_enabled());
        assert_eq!(store.panel(RowId(2)), Some(view));
        assert!(store.is_attached(RowId(2)));
    }

    #[test]
    fn set_panel_restores_disabled_animations() {
        let mut list = list();
        let mut store = RowStore::new();
        let view = list.create_view(Size::new(60.0, 44.0));
        list.set_animations_enabled(false);

        store.set_panel(&mut list, RowId(0), Some(view), false);

        assert!(!list.animations_enabled());
        assert!(!store.is_attached(RowId(0)));
    }

    #[test]
    fn replacing_a_panel_removes_the_old_one() {
        let mut list = list();
        let mut store = RowStore::new();
        let first = list.create_view(Size::new(60.0, 44.0));
        let second = list.create_view(Size::new(90.0, 44.0));

        store.set_panel(&mut list, RowId(1), Some(first), true);
        store.set_panel(&mut list, RowId(1), Some(second), true);

        assert_eq!(list.view_parent(first), None);
        assert_eq!(list.view_parent(second), Some(RowId(1)));
        assert_eq!(store.panel(RowId(1)), Some(second));
    }

    #[test]
    fn old_panel_moved_elsewhere_is_left_alone() {
        let mut list = list();
        let mut store = RowStore::new();
        let view = list.create_view(Size::new(60.0, 44.0));

        store.set_panel(&mut list, RowId(1), Some(view), true);
        list.add_view_to_row(RowId(4), view);
        store.set_panel(&mut list, RowId(1), None, true);

        assert_eq!(list.view_parent(view), Some(RowId(4)));
        assert!(!store.has_panel(RowId(1)));
    }

    #[test]
    fn recycle_clears_state_and_detaches_panel() {
        let mut list = list();
        let mut store = RowStore::new();
        let view = list.create_view(Size::new(60.0, 44.0));
        store.set_panel(&mut list, RowId(5), Some(view), false);

        store.recycle_row(&mut list, RowId(5));

        assert_eq!(list.view_parent(view), None);
        assert!(!store.has_panel(RowId(5)));
        assert!(store.is_attached(RowId(5)));
    }

    #[test]
    fn forget_and_retain() {
        let mut store: RowStore<RowId, u32> = RowStore::new();
        store.set_attached(RowId(1), false);
        store.set_attached(RowId(2), false);
        store.set_attached(RowId(3), false);

        let forgotten = store.forget_row(RowId(1));
        assert_eq!(
            forgotten,
            Some(RowPanelState {
                panel: None,
                attached: false
            })
        );

        store.retain_rows(|r| r.0 != 2);
        assert_eq!(store.len(), 1);
        assert!(store.state(RowId(3)).is_some());
    }
}
