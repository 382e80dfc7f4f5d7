//! Owner of the active-view switch and of the single timed transition.

use dualhunt_hal::{Color, Presentation, ViewMode};

use super::transition::{TransitionPhase, TransitionState, TransitionStep};
use crate::config::HuntConfig;
use crate::session::Session;

/// Receives a callback after every write to the active view.
///
/// The progression tracker implements this to recompute item visibility.
pub trait ViewListener {
    fn view_changed(&mut self, session: &Session, presenter: &mut dyn Presentation);
}

/// Result of a manual or gesture view-switch request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The view was swapped immediately.
    Cut,
    /// A timed transition was started.
    Started,
    /// A transition is already running; the request was dropped.
    Busy,
    /// The session is not in a state that allows view switches.
    Rejected,
}

/// Switches between view modes, either as an immediate cut or as an
/// exclusive fade-out / switch / fade-in sequence.
pub struct ViewModeController {
    transition: TransitionState,
    fade_seconds: f32,
    hold_seconds: f32,
    default_tint: Color,
}

impl ViewModeController {
    pub fn new(config: &HuntConfig) -> Self {
        Self {
            transition: TransitionState::idle(),
            fade_seconds: config.fade_seconds,
            hold_seconds: config.hold_seconds,
            default_tint: config.default_tint,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    /// Swap the active view now. No timing, no overlay.
    pub fn cut_to(
        &mut self,
        view: ViewMode,
        session: &mut Session,
        listener: &mut dyn ViewListener,
        presenter: &mut dyn Presentation,
    ) {
        session.set_active_view(view);
        presenter.show_view(view);
        listener.view_changed(session, presenter);
    }

    /// Start a timed transition to `target`.
    ///
    /// `tint` and `duration` fall back to the configured defaults. Returns
    /// [`SwitchOutcome::Busy`] without touching any state if a transition is
    /// already running.
    pub fn begin_timed_transition(
        &mut self,
        target: ViewMode,
        tint: Option<Color>,
        duration: Option<f32>,
        presenter: &mut dyn Presentation,
    ) -> SwitchOutcome {
        if self.transition.is_active() {
            log::debug!(
                "transition to {} dropped: {:?} in progress",
                target.as_str(),
                self.transition.phase
            );
            return SwitchOutcome::Busy;
        }

        let tint = tint.unwrap_or(self.default_tint);
        let duration = duration.unwrap_or(self.fade_seconds);
        self.transition
            .begin(target, tint, duration, self.hold_seconds);
        log::info!("transition to {} view started", target.as_str());

        if presenter.has_overlay() {
            presenter.set_overlay_alpha(tint, 0.0);
        } else {
            log::warn!("fade overlay unavailable; transition runs without visuals");
        }
        SwitchOutcome::Started
    }

    /// Advance the running transition by `dt` seconds.
    ///
    /// The cut to the target view happens inside this call on the tick the
    /// fade-out completes, so the active view never changes mid-ramp.
    pub fn advance(
        &mut self,
        dt: f32,
        session: &mut Session,
        listener: &mut dyn ViewListener,
        presenter: &mut dyn Presentation,
    ) -> TransitionStep {
        let step = self.transition.advance(dt);
        if step == TransitionStep::Idle {
            return step;
        }

        if let TransitionStep::Switch(view) = step {
            self.cut_to(view, session, listener, presenter);
        }
        if step == TransitionStep::Finished {
            log::debug!("transition to {} finished", self.transition.target_view.as_str());
        }

        if presenter.has_overlay() {
            presenter.set_overlay_alpha(self.transition.tint, self.transition.overlay_alpha());
        }
        step
    }
}
