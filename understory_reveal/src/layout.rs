// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel layout: a pure per-row function plus the pass that applies it.
//!
//! ## Geometry
//!
//! For a row of size `W × H`, a panel of width `w`, and drag offset `d`:
//!
//! | Direction | Panel `x`                  | Content shift (attached) |
//! |-----------|----------------------------|--------------------------|
//! | `Right`   | `W + max(d, -w)`           | `-clamp(-d, 0, w)`       |
//! | `Left`    | `-w + min(d, w)`           | `+clamp(d, 0, w)`        |
//!
//! The panel always spans the full row height from `y = 0`. A panel never
//! slides past fully exposed, and content never moves by more than the
//! panel's width.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_reveal::layout::{RowLayoutInput, layout_row};
//! use understory_reveal::types::RevealDirection;
//!
//! let out = layout_row(&RowLayoutInput {
//!     row: Size::new(320.0, 44.0),
//!     panel_width: 80.0,
//!     offset: -50.0,
//!     direction: RevealDirection::Right,
//!     attached: true,
//! });
//! assert_eq!(out.panel_frame, Rect::new(270.0, 0.0, 350.0, 44.0));
//! assert_eq!(out.content_shift, Some(-50.0));
//! ```

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use crate::store::RowPanels;
use crate::types::{Autoresizing, RevealDirection, RowHost, ViewHost};

/// Inputs to [`layout_row`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowLayoutInput {
    /// Size of the row's bounds.
    pub row: Size,
    /// Current width of the panel view.
    pub panel_width: f64,
    /// Signed drag offset.
    pub offset: f64,
    /// Edge the panel is revealed from.
    pub direction: RevealDirection,
    /// Whether the row's content moves with the panel.
    pub attached: bool,
}

/// Result of [`layout_row`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowLayout {
    /// Panel frame in row coordinates.
    pub panel_frame: Rect,
    /// Resizing rule pinning the panel to its edge.
    pub autoresizing: Autoresizing,
    /// Horizontal translation for the row's content; `None` when detached.
    pub content_shift: Option<f64>,
}

/// Compute the panel frame and content shift for one row.
pub fn layout_row(input: &RowLayoutInput) -> RowLayout {
    // A degenerate (negative or NaN) width reveals nothing.
    let w = input.panel_width.max(0.0);
    let d = input.offset;

    let (x, shift) = match input.direction {
        RevealDirection::Right => (input.row.width + d.max(-w), -(-d).clamp(0.0, w)),
        RevealDirection::Left => (-w + d.min(w), d.clamp(0.0, w)),
    };

    RowLayout {
        panel_frame: Rect::new(x, 0.0, x + w, input.row.height),
        autoresizing: input.direction.panel_autoresizing(),
        content_shift: input.attached.then_some(shift),
    }
}

/// A recoverable inconsistency found during a layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic<R> {
    /// The row's panel is not a direct child of the row; it was repositioned anyway.
    PanelReparented {
        /// Row whose panel was moved elsewhere.
        row: R,
        /// Row the panel is currently parented to, if any.
        parent: Option<R>,
    },
}

/// Summary of one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutReport<R> {
    /// Offset the pass was computed with.
    pub offset: f64,
    /// Rows whose panel was positioned.
    pub rows_laid_out: usize,
    /// Visible rows without a panel.
    pub rows_skipped: usize,
    /// Inconsistencies found, in visible-row order.
    pub diagnostics: Vec<Diagnostic<R>>,
}

impl<R> LayoutReport<R> {
    /// Whether the pass found nothing to warn about.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Lay out the panel of every visible row of `host`.
///
/// Rows are visited in visible order. For each row with a panel: the resizing
/// rule and panel frame are replaced, then, for attached rows, the row's own
/// content layout runs and the resulting content frame is translated by the
/// computed shift. Content layout is not animatable, so only the translation
/// follows an in-flight animation.
pub fn layout_pass<H, P>(
    host: &mut H,
    panels: &P,
    offset: f64,
    direction: RevealDirection,
) -> LayoutReport<H::Row>
where
    H: RowHost + ViewHost,
    P: RowPanels<H::Row, H::View> + ?Sized,
{
    let mut report = LayoutReport {
        offset,
        rows_laid_out: 0,
        rows_skipped: 0,
        diagnostics: Vec::new(),
    };

    for row in host.visible_rows() {
        let Some(view) = panels.panel(row) else {
            report.rows_skipped += 1;
            continue;
        };

        let parent = host.view_parent(view);
        if parent != Some(row) {
            tracing::warn!(
                target: "understory_reveal::layout",
                ?view,
                ?row,
                ?parent,
                "panel view is not a subview of its row"
            );
            report
                .diagnostics
                .push(Diagnostic::PanelReparented { row, parent });
        }

        let out = layout_row(&RowLayoutInput {
            row: host.content_bounds(row),
            panel_width: host.view_frame(view).width(),
            offset,
            direction,
            attached: panels.is_attached(row),
        });

        host.set_view_autoresizing(view, out.autoresizing);
        host.set_view_frame(view, out.panel_frame);

        if let Some(shift) = out.content_shift {
            host.relayout_content(row);
            let frame = host.content_frame(row);
            host.set_content_frame(row, frame + Vec2::new(shift, 0.0));
        }

        report.rows_laid_out += 1;
    }

    tracing::trace!(
        target: "understory_reveal::layout",
        offset,
        laid_out = report.rows_laid_out,
        skipped = report.rows_skipped,
        "layout pass"
    );
    report
}
