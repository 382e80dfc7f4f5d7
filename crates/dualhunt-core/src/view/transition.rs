//! Fade-out / switch / fade-in phase machine.
//!
//! Pure timing: no presentation calls happen here. The controller reads
//! [`TransitionState::overlay_alpha`] after each step and forwards it.

use dualhunt_hal::{Color, ViewMode};

/// Phase of a timed transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// Overlay ramping 0 -> 1.
    FadingOut,
    /// Overlay held at 1. The view swap happens on entry.
    Switching,
    /// Overlay ramping 1 -> 0.
    FadingIn,
}

/// What a single [`TransitionState::advance`] call produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStep {
    /// No transition in progress.
    Idle,
    /// Still inside the current phase, or moved between two phases with no
    /// logical effect.
    Continue,
    /// Fade-out finished this tick; the view must be swapped now.
    Switch(ViewMode),
    /// Fade-in finished this tick; the transition is over.
    Finished,
}

/// State of the one transition the controller may run at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    pub phase: TransitionPhase,
    pub target_view: ViewMode,
    pub tint: Color,
    /// Seconds spent in the current phase.
    pub elapsed: f32,
    /// Length of each fade ramp.
    pub duration: f32,
    /// Length of the opaque hold in `Switching`.
    pub hold: f32,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::idle()
    }
}

impl TransitionState {
    pub const fn idle() -> Self {
        Self {
            phase: TransitionPhase::Idle,
            target_view: ViewMode::A,
            tint: Color::BLACK,
            elapsed: 0.0,
            duration: 0.0,
            hold: 0.0,
        }
    }

    /// True while any phase other than `Idle` is running.
    pub fn is_active(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Enter `FadingOut`. Callers must check [`is_active`](Self::is_active)
    /// first; this overwrites whatever was running.
    pub(crate) fn begin(&mut self, target_view: ViewMode, tint: Color, duration: f32, hold: f32) {
        *self = Self {
            phase: TransitionPhase::FadingOut,
            target_view,
            tint,
            elapsed: 0.0,
            duration: duration.max(0.0),
            hold: hold.max(0.0),
        };
    }

    /// Step the phase machine by `dt` seconds.
    ///
    /// At most one phase boundary is crossed per call; time left over past a
    /// boundary is dropped so each phase is visible for at least one tick.
    pub fn advance(&mut self, dt: f32) -> TransitionStep {
        let dt = dt.max(0.0);
        match self.phase {
            TransitionPhase::Idle => TransitionStep::Idle,
            TransitionPhase::FadingOut => {
                self.elapsed += dt;
                if self.elapsed >= self.duration {
                    self.enter(TransitionPhase::Switching);
                    TransitionStep::Switch(self.target_view)
                } else {
                    TransitionStep::Continue
                }
            }
            TransitionPhase::Switching => {
                self.elapsed += dt;
                if self.elapsed >= self.hold {
                    self.enter(TransitionPhase::FadingIn);
                }
                TransitionStep::Continue
            }
            TransitionPhase::FadingIn => {
                self.elapsed += dt;
                if self.elapsed >= self.duration {
                    self.enter(TransitionPhase::Idle);
                    TransitionStep::Finished
                } else {
                    TransitionStep::Continue
                }
            }
        }
    }

    /// Overlay opacity for the current phase and elapsed time.
    ///
    /// Phase ends are constants (exactly 1.0 in `Switching`, exactly 0.0 in
    /// `Idle`) so the terminal value never depends on the last ramp sample.
    pub fn overlay_alpha(&self) -> f32 {
        match self.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::FadingOut => ramp(self.elapsed, self.duration),
            TransitionPhase::Switching => 1.0,
            TransitionPhase::FadingIn => 1.0 - ramp(self.elapsed, self.duration),
        }
    }

    fn enter(&mut self, phase: TransitionPhase) {
        self.phase = phase;
        self.elapsed = 0.0;
    }
}

/// Linear 0..1 progress, clamped. A zero-length ramp is already complete.
fn ramp(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
