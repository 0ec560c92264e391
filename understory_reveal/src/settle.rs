// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animation: easing curves, the injected animator, and a stepped
//! reference animator.
//!
//! ## Protocol
//!
//! The controller has no clock of its own. When a drag finishes it asks an
//! [`Animator`] for an animation of the configured duration and receives an
//! [`AnimationToken`]. The host's animation facility then calls
//! [`RevealController::animation_step`](crate::controller::RevealController::animation_step)
//! with the linear progress in `[0, 1]` on each frame, and
//! [`RevealController::animation_finished`](crate::controller::RevealController::animation_finished)
//! once at the end. A new drag may cancel the animation through
//! [`Animator::cancel`].
//!
//! [`StepAnimator`] implements this protocol for hosts without an animation
//! facility: advance it with [`StepAnimator::tick`] and forward the returned
//! [`AnimationEvent`]s.

use alloc::vec::Vec;
use core::time::Duration;

use crate::types::AnimationToken;

/// Timing curve applied to linear animation progress.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    EaseInOut,
}

/// Map linear progress `t` to eased progress. `t` is clamped to `[0, 1]`.
pub fn ease(easing: Easing, t: f64) -> f64 {
    // NaN progress counts as not started.
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match easing {
        Easing::Linear => t,
        Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
    }
}

/// An animation facility that drives the settle.
pub trait Animator {
    /// Start an animation lasting `duration` and return its token.
    fn animate(&mut self, duration: Duration) -> AnimationToken;

    /// Stop the animation identified by `token`. Unknown tokens are ignored.
    fn cancel(&mut self, token: AnimationToken);
}

/// Progress notification produced by [`StepAnimator::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    /// Intermediate frame with linear progress in `[0, 1)`.
    Step {
        /// Animation the frame belongs to.
        token: AnimationToken,
        /// Linear progress.
        progress: f64,
    },
    /// The animation completed.
    Finished {
        /// Animation that completed.
        token: AnimationToken,
    },
}

#[derive(Copy, Clone, Debug)]
struct Running {
    token: AnimationToken,
    duration: Duration,
    elapsed: Duration,
}

/// A reference [`Animator`] advanced explicitly by elapsed time.
#[derive(Clone, Debug, Default)]
pub struct StepAnimator {
    next: u64,
    running: Vec<Running>,
}

impl StepAnimator {
    /// Create an animator with nothing running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any animation is running.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Whether the animation identified by `token` is running.
    pub fn is_running(&self, token: AnimationToken) -> bool {
        self.running.iter().any(|r| r.token == token)
    }

    /// Advance every running animation by `dt`.
    ///
    /// Returns, in start order, a `Step` for each animation still in flight
    /// and a `Finished` for each one that reached its duration. Finished
    /// animations are removed.
    pub fn tick(&mut self, dt: Duration) -> Vec<AnimationEvent> {
        let mut out = Vec::with_capacity(self.running.len());
        self.running.retain_mut(|r| {
            r.elapsed = r.elapsed.saturating_add(dt);
            if r.elapsed >= r.duration {
                out.push(AnimationEvent::Finished { token: r.token });
                false
            } else {
                out.push(AnimationEvent::Step {
                    token: r.token,
                    progress: r.elapsed.as_secs_f64() / r.duration.as_secs_f64(),
                });
                true
            }
        });
        out
    }
}

impl Animator for StepAnimator {
    fn animate(&mut self, duration: Duration) -> AnimationToken {
        self.next += 1;
        let token = AnimationToken(self.next);
        self.running.push(Running {
            token,
            duration,
            elapsed: Duration::ZERO,
        });
        token
    }

    fn cancel(&mut self, token: AnimationToken) {
        self.running.retain(|r| r.token != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(ease(e, 0.0), 0.0);
            assert_eq!(ease(e, 1.0), 1.0);
            assert_eq!(ease(e, -3.0), 0.0);
            assert_eq!(ease(e, 7.0), 1.0);
            assert_eq!(ease(e, f64::NAN), 0.0);
        }
        assert_eq!(ease(Easing::EaseInOut, 0.5), 0.5);
        assert!(ease(Easing::EaseInOut, 0.25) < 0.25);
        assert!(ease(Easing::EaseInOut, 0.75) > 0.75);
    }

    #[test]
    fn step_animator_reports_progress_then_finishes() {
        let mut anim = StepAnimator::new();
        let token = anim.animate(Duration::from_millis(300));
        assert!(anim.is_running(token));

        assert_eq!(
            anim.tick(Duration::from_millis(150)),
            vec![AnimationEvent::Step {
                token,
                progress: 0.5
            }]
        );
        assert_eq!(
            anim.tick(Duration::from_millis(200)),
            vec![AnimationEvent::Finished { token }]
        );
        assert!(anim.is_idle());
        assert!(anim.tick(Duration::from_millis(16)).is_empty());
    }

    #[test]
    fn cancelled_animation_produces_nothing() {
        let mut anim = StepAnimator::new();
        let a = anim.animate(Duration::from_millis(300));
        let b = anim.animate(Duration::from_millis(100));
        assert_ne!(a, b);
        anim.cancel(a);

        assert_eq!(
            anim.tick(Duration::from_millis(100)),
            vec![AnimationEvent::Finished { token: b }]
        );
        assert!(anim.is_idle());
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut anim = StepAnimator::new();
        let token = anim.animate(Duration::ZERO);
        assert_eq!(
            anim.tick(Duration::ZERO),
            vec![AnimationEvent::Finished { token }]
        );
    }
}
