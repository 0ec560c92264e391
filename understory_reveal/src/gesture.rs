// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture input and the drag state machine.
//!
//! ## States
//!
//! `Idle → Dragging → Settling → Idle`
//!
//! - `Began` moves `Idle` (or `Settling`) to `Dragging`.
//! - `Changed` keeps `Dragging`, accumulating the translation.
//! - `Ended`, `Cancelled`, and `Failed` all move `Dragging` to `Settling`.
//! - Completion of the settle animation moves `Settling` to `Idle`.
//!
//! ## Direction gate
//!
//! Each gesture instance is judged once, from its first translation sample:
//! it is a reveal drag only if it is predominantly horizontal. The decision
//! holds until the gesture finishes, so a drag that later turns vertical is
//! still a reveal drag, and a rejected one never becomes one.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_reveal::gesture::{DirectionGate, GateDecision};
//!
//! let mut gate = DirectionGate::default();
//! assert_eq!(gate.decide(Vec2::new(2.0, 10.0)), GateDecision::Rejected);
//! // Later samples do not change the decision.
//! assert_eq!(gate.decide(Vec2::new(50.0, 0.0)), GateDecision::Rejected);
//! gate.reset();
//! assert_eq!(gate.decide(Vec2::new(50.0, 0.0)), GateDecision::Accepted);
//! ```

use kurbo::Vec2;

use crate::types::AnimationToken;

/// Lifecycle phase of a pan gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PanPhase {
    /// The gesture started; carries its first translation sample.
    Began,
    /// The pointer moved.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The platform cancelled the gesture, for example on a gesture conflict.
    Cancelled,
    /// The gesture failed to complete.
    Failed,
}

impl PanPhase {
    /// Whether this phase finishes the gesture.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// A pan gesture sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanEvent {
    /// Lifecycle phase.
    pub phase: PanPhase,
    /// Translation since the previous sample of this gesture.
    ///
    /// For [`PanPhase::Began`] this is the first reported sample and only
    /// feeds the [`DirectionGate`].
    pub translation: Vec2,
}

impl PanEvent {
    /// A `Began` event with the gesture's first translation sample.
    pub const fn began(translation: Vec2) -> Self {
        Self {
            phase: PanPhase::Began,
            translation,
        }
    }

    /// A `Changed` event moving horizontally by `dx`.
    pub const fn moved(dx: f64) -> Self {
        Self {
            phase: PanPhase::Changed,
            translation: Vec2::new(dx, 0.0),
        }
    }

    /// An `Ended` event.
    pub const fn ended() -> Self {
        Self {
            phase: PanPhase::Ended,
            translation: Vec2::ZERO,
        }
    }

    /// A `Cancelled` event.
    pub const fn cancelled() -> Self {
        Self {
            phase: PanPhase::Cancelled,
            translation: Vec2::ZERO,
        }
    }
}

/// Outcome of the direction gate for one gesture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GateDecision {
    /// Horizontal: the gesture drives the reveal.
    Accepted,
    /// Vertical (or ambiguous): the gesture is left to other recognizers.
    Rejected,
}

/// One-shot horizontal/vertical classification of a gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectionGate {
    decision: Option<GateDecision>,
}

impl DirectionGate {
    /// Classify `first` unless this gesture was already classified.
    ///
    /// Accepts only when `|dx| > |dy|`; a sample with no movement is rejected.
    pub fn decide(&mut self, first: Vec2) -> GateDecision {
        *self.decision.get_or_insert_with(|| {
            if first.x.abs() > first.y.abs() {
                GateDecision::Accepted
            } else {
                GateDecision::Rejected
            }
        })
    }

    /// Decision for the current gesture, if one was made.
    pub fn decision(&self) -> Option<GateDecision> {
        self.decision
    }

    /// Forget the decision so the next gesture is judged afresh.
    pub fn reset(&mut self) {
        self.decision = None;
    }
}

/// State of the drag state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag and no settle animation; the offset is zero.
    #[default]
    Idle,
    /// A horizontal drag is in progress.
    Dragging,
    /// The offset is animating back to zero.
    Settling {
        /// Animation driving the settle.
        token: AnimationToken,
        /// Offset at the moment the drag finished.
        from: f64,
    },
}

impl DragState {
    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    /// Whether a settle animation is running.
    pub fn is_settling(&self) -> bool {
        matches!(self, Self::Settling { .. })
    }
}

/// How the controller treated a [`PanEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PanResponse {
    /// The event drove the reveal.
    Accepted,
    /// The gesture is not horizontal; the host should let other recognizers
    /// (such as the list's own scrolling) handle it.
    Deferred,
    /// The event had no effect: out of sequence, or the controller is inert.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_first_sample_is_accepted() {
        let mut gate = DirectionGate::default();
        assert_eq!(gate.decide(Vec2::new(-12.0, 3.0)), GateDecision::Accepted);
        assert_eq!(gate.decision(), Some(GateDecision::Accepted));
    }

    #[test]
    fn vertical_first_sample_is_rejected() {
        let mut gate = DirectionGate::default();
        assert_eq!(gate.decide(Vec2::new(2.0, 10.0)), GateDecision::Rejected);
    }

    #[test]
    fn diagonal_and_still_samples_are_rejected() {
        let mut gate = DirectionGate::default();
        assert_eq!(gate.decide(Vec2::new(-5.0, 5.0)), GateDecision::Rejected);
        gate.reset();
        assert_eq!(gate.decide(Vec2::ZERO), GateDecision::Rejected);
    }

    #[test]
    fn huge_samples_compare_by_magnitude() {
        let mut gate = DirectionGate::default();
        assert_eq!(gate.decide(Vec2::new(1e200, 1e199)), GateDecision::Accepted);
        gate.reset();
        assert_eq!(gate.decide(Vec2::new(-1e199, -1e200)), GateDecision::Rejected);
    }

    #[test]
    fn decision_is_latched_until_reset() {
        let mut gate = DirectionGate::default();
        assert_eq!(gate.decide(Vec2::new(20.0, 1.0)), GateDecision::Accepted);
        assert_eq!(gate.decide(Vec2::new(0.0, 90.0)), GateDecision::Accepted);
        gate.reset();
        assert_eq!(gate.decision(), None);
    }

    #[test]
    fn terminal_phases() {
        assert!(PanPhase::Ended.is_terminal());
        assert!(PanPhase::Cancelled.is_terminal());
        assert!(PanPhase::Failed.is_terminal());
        assert!(!PanPhase::Began.is_terminal());
        assert!(!PanPhase::Changed.is_terminal());
    }
}
