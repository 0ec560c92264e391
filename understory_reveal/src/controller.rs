// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reveal controller: drag offset, scroll synchronization, and layout.
//!
//! ## Usage
//!
//! 1) Create one controller per list view with [`RevealController::new`]
//!    (or through a [`RevealRegistry`](crate::registry::RevealRegistry)). It
//!    installs its pan recognizer on the list view.
//! 2) Forward pan samples with [`RevealController::handle_pan`]. A
//!    [`PanResponse::Deferred`] answer means the gesture is vertical and
//!    belongs to other recognizers.
//! 3) While the list view has the controller registered as a scroll observer,
//!    forward scroll-offset changes with
//!    [`RevealController::scroll_offset_changed`].
//! 4) Forward the animator's frames with [`RevealController::animation_step`]
//!    and [`RevealController::animation_finished`].
//!
//! ## Ownership
//!
//! The controller holds only a weak reference to its list view. Once the list
//! view is dropped the controller is inert: every operation is a no-op. On
//! drop, the controller removes its recognizer and any scroll subscription
//! from a list view that is still alive.
//!
//! ## Ordering
//!
//! Every accepted `Changed` sample and every scroll notification during a
//! drag runs one synchronous layout pass, in arrival order, so panels always
//! reflect the latest offset.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::time::Duration;

use kurbo::Vec2;

use crate::gesture::{DirectionGate, DragState, GateDecision, PanEvent, PanPhase, PanResponse};
use crate::layout::{LayoutReport, layout_pass};
use crate::settle::{AnimationEvent, Animator, Easing, ease};
use crate::store::RowPanels;
use crate::types::{AnimationToken, ControllerId, ListView, RevealDirection, RowHost, ViewHost};

/// Duration of the settle animation after a drag finishes.
pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(300);

/// Configuration chosen when a controller is attached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Edge the panels are revealed from.
    pub direction: RevealDirection,
    /// How long the offset takes to return to zero after a drag.
    pub settle_duration: Duration,
    /// Timing curve of the settle animation.
    pub easing: Easing,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            direction: RevealDirection::Right,
            settle_duration: DEFAULT_SETTLE_DURATION,
            easing: Easing::EaseInOut,
        }
    }
}

impl RevealConfig {
    /// Default configuration revealing from `direction`.
    pub fn with_direction(direction: RevealDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }
}

/// Result of [`RevealController::handle_pan`].
#[derive(Clone, Debug, PartialEq)]
pub struct PanOutcome<R> {
    /// How the sample was treated.
    pub response: PanResponse,
    /// The layout pass the sample triggered, if any.
    pub layout: Option<LayoutReport<R>>,
}

impl<R> PanOutcome<R> {
    fn without_layout(response: PanResponse) -> Self {
        Self {
            response,
            layout: None,
        }
    }
}

/// Swipe-to-reveal controller for one list view.
pub struct RevealController<L: ListView> {
    id: ControllerId,
    list: Weak<RefCell<L>>,
    config: RevealConfig,
    offset: f64,
    state: DragState,
    gate: DirectionGate,
    // Set by `should_begin`; consumed by the next `Began`.
    gate_primed: bool,
    observing_scroll: bool,
    // The list view still holds our scroll observer although no drag needs it.
    observer_pending_removal: bool,
}

impl<L: ListView> core::fmt::Debug for RevealController<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealController")
            .field("id", &self.id)
            .field("alive", &(self.list.strong_count() > 0))
            .field("config", &self.config)
            .field("offset", &self.offset)
            .field("state", &self.state)
            .field("gate", &self.gate)
            .field("observing_scroll", &self.observing_scroll)
            .field("observer_pending_removal", &self.observer_pending_removal)
            .finish_non_exhaustive()
    }
}

impl<L: ListView> RevealController<L> {
    /// Identity used for the recognizer and scroll subscription.
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Configuration the controller was created with.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Edge the panels are revealed from.
    pub fn direction(&self) -> RevealDirection {
        self.config.direction
    }

    /// Current signed drag offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current state of the drag state machine.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the controller is subscribed to scroll-offset changes.
    pub fn is_observing_scroll(&self) -> bool {
        self.observing_scroll
    }

    /// Whether the list view is still alive.
    ///
    /// A controller whose list view is gone does nothing and should be
    /// released.
    pub fn is_alive(&self) -> bool {
        self.list.strong_count() > 0
    }

    /// Whether the gesture whose first sample is `translation` should begin.
    ///
    /// Hosts can call this from their recognizer's should-begin hook, which
    /// always sees a new gesture. The decision is made once per gesture;
    /// the following [`PanPhase::Began`] reuses it.
    pub fn should_begin(&mut self, translation: Vec2) -> bool {
        self.gate.reset();
        self.gate_primed = true;
        self.gate.decide(translation) == GateDecision::Accepted
    }

    /// The reveal recognizer runs alongside other recognizers, so the list
    /// keeps scrolling during a reveal drag.
    pub fn recognizes_simultaneously(&self) -> bool {
        true
    }

    fn with_list<T>(&self, f: impl FnOnce(&mut L) -> T) -> Option<T> {
        let rc = self.list.upgrade()?;
        let Ok(mut list) = rc.try_borrow_mut() else {
            tracing::warn!(
                target: "understory_reveal::controller",
                id = self.id.get(),
                "list view is already borrowed; skipping"
            );
            return None;
        };
        Some(f(&mut *list))
    }

    fn subscribe(&mut self) {
        if self.observing_scroll {
            return;
        }
        let id = self.id;
        if self.with_list(|list| list.add_scroll_observer(id)).is_some() {
            self.observing_scroll = true;
            self.observer_pending_removal = false;
        }
    }

    fn unsubscribe(&mut self) {
        if !self.observing_scroll {
            return;
        }
        self.observing_scroll = false;
        self.observer_pending_removal = true;
        self.remove_pending_observer();
    }

    /// Remove a scroll observer whose earlier removal found the list view busy.
    fn remove_pending_observer(&mut self) {
        if !self.observer_pending_removal {
            return;
        }
        let id = self.id;
        // A dropped list view has no subscriptions left; a busy one is retried
        // on the next call.
        if !self.is_alive() || self.with_list(|list| list.remove_scroll_observer(id)).is_some() {
            self.observer_pending_removal = false;
        }
    }
}

impl<L: RowHost + ViewHost> RevealController<L> {
    /// Create a controller for `list` and install its pan recognizer.
    pub fn new(list: &Rc<RefCell<L>>, config: RevealConfig) -> Self {
        let controller = Self {
            id: ControllerId::next(),
            list: Rc::downgrade(list),
            config,
            offset: 0.0,
            state: DragState::Idle,
            gate: DirectionGate::default(),
            gate_primed: false,
            observing_scroll: false,
            observer_pending_removal: false,
        };
        let id = controller.id;
        let _ = controller.with_list(|list| list.add_gesture_recognizer(id));
        tracing::debug!(
            target: "understory_reveal::controller",
            id = id.get(),
            direction = ?config.direction,
            "controller attached"
        );
        controller
    }

    /// Run one layout pass over the visible rows at the current offset.
    ///
    /// Returns `None` if the list view is gone or busy.
    pub fn layout<P>(&self, panels: &P) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        let offset = self.offset;
        let direction = self.config.direction;
        self.with_list(|list| layout_pass(list, panels, offset, direction))
    }

    /// Feed one pan sample.
    pub fn handle_pan<P, A>(
        &mut self,
        event: PanEvent,
        panels: &P,
        animator: &mut A,
    ) -> PanOutcome<L::Row>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
        A: Animator + ?Sized,
    {
        self.remove_pending_observer();
        if !self.is_alive() {
            return PanOutcome::without_layout(PanResponse::Ignored);
        }

        match event.phase {
            PanPhase::Began => {
                // Each `Began` is a new gesture unless `should_begin` already
                // judged it.
                if !core::mem::take(&mut self.gate_primed) && !self.state.is_dragging() {
                    self.gate.reset();
                }
                if self.gate.decide(event.translation) == GateDecision::Rejected {
                    return PanOutcome::without_layout(PanResponse::Deferred);
                }
                match self.state {
                    DragState::Dragging => {
                        return PanOutcome::without_layout(PanResponse::Accepted);
                    }
                    DragState::Settling { token, .. } => {
                        // Pick the panel up where the animation left it.
                        animator.cancel(token);
                    }
                    DragState::Idle => {}
                }
                self.state = DragState::Dragging;
                self.subscribe();
                tracing::debug!(
                    target: "understory_reveal::controller",
                    id = self.id.get(),
                    offset = self.offset,
                    "drag started"
                );
                PanOutcome {
                    response: PanResponse::Accepted,
                    layout: self.layout(panels),
                }
            }
            PanPhase::Changed => {
                if !self.state.is_dragging() {
                    return PanOutcome::without_layout(self.unclaimed());
                }
                self.offset += event.translation.x;
                PanOutcome {
                    response: PanResponse::Accepted,
                    layout: self.layout(panels),
                }
            }
            PanPhase::Ended | PanPhase::Cancelled | PanPhase::Failed => {
                let response = self.unclaimed();
                self.gate.reset();
                if !self.state.is_dragging() {
                    return PanOutcome::without_layout(response);
                }
                self.unsubscribe();
                self.finish_drag(panels, animator)
            }
        }
    }

    /// The list view's scroll offset changed.
    ///
    /// Lays out the visible rows if a drag is observing scrolling; otherwise
    /// returns `None`.
    pub fn scroll_offset_changed<P>(&mut self, panels: &P) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        self.remove_pending_observer();
        if !self.observing_scroll {
            return None;
        }
        self.layout(panels)
    }

    /// One frame of the settle animation identified by `token`.
    ///
    /// `progress` is linear in `[0, 1]`; the configured easing is applied
    /// here. Frames of any other animation are ignored.
    pub fn animation_step<P>(
        &mut self,
        token: AnimationToken,
        progress: f64,
        panels: &P,
    ) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        self.remove_pending_observer();
        let DragState::Settling { token: current, from } = self.state else {
            return None;
        };
        if current != token {
            return None;
        }
        self.offset = from * (1.0 - ease(self.config.easing, progress));
        self.layout(panels)
    }

    /// The settle animation identified by `token` completed.
    pub fn animation_finished<P>(
        &mut self,
        token: AnimationToken,
        panels: &P,
    ) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        self.remove_pending_observer();
        match self.state {
            DragState::Settling { token: current, .. } if current == token => {
                self.settle_to_idle(panels)
            }
            _ => None,
        }
    }

    /// Forward an event produced by [`StepAnimator::tick`](crate::settle::StepAnimator::tick).
    pub fn apply_animation_event<P>(
        &mut self,
        event: AnimationEvent,
        panels: &P,
    ) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        match event {
            AnimationEvent::Step { token, progress } => self.animation_step(token, progress, panels),
            AnimationEvent::Finished { token } => self.animation_finished(token, panels),
        }
    }

    fn finish_drag<P, A>(&mut self, panels: &P, animator: &mut A) -> PanOutcome<L::Row>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
        A: Animator + ?Sized,
    {
        if self.offset == 0.0 {
            return PanOutcome {
                response: PanResponse::Accepted,
                layout: self.settle_to_idle(panels),
            };
        }
        let token = animator.animate(self.config.settle_duration);
        self.state = DragState::Settling {
            token,
            from: self.offset,
        };
        tracing::debug!(
            target: "understory_reveal::controller",
            id = self.id.get(),
            from = self.offset,
            ?token,
            "settling"
        );
        PanOutcome::without_layout(PanResponse::Accepted)
    }

    fn settle_to_idle<P>(&mut self, panels: &P) -> Option<LayoutReport<L::Row>>
    where
        P: RowPanels<L::Row, L::View> + ?Sized,
    {
        self.offset = 0.0;
        self.state = DragState::Idle;
        tracing::debug!(
            target: "understory_reveal::controller",
            id = self.id.get(),
            "idle"
        );
        self.layout(panels)
    }

    fn unclaimed(&self) -> PanResponse {
        match self.gate.decision() {
            Some(GateDecision::Rejected) => PanResponse::Deferred,
            Some(GateDecision::Accepted) if self.state.is_dragging() => PanResponse::Accepted,
            _ => PanResponse::Ignored,
        }
    }
}

impl<L: ListView> Drop for RevealController<L> {
    fn drop(&mut self) {
        let id = self.id;
        let observing = self.observing_scroll || self.observer_pending_removal;
        let detached = self.with_list(|list| {
            if observing {
                list.remove_scroll_observer(id);
            }
            list.remove_gesture_recognizer(id);
        });
        self.observing_scroll = false;
        self.observer_pending_removal = false;
        if detached.is_some() {
            tracing::debug!(
                target: "understory_reveal::controller",
                id = id.get(),
                "controller detached"
            );
        }
    }
}
