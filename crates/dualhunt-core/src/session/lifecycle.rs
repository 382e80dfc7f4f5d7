//! Start, completion, finalize and restart of a session.

use dualhunt_hal::{Cue, Presentation, ViewMode};

use super::{LifecycleState, Session};
use crate::config::HuntConfig;
use crate::error::HuntError;
use crate::gesture::GestureTransitionTrigger;
use crate::progression::ProgressionTracker;
use crate::view::ViewModeController;

const COMPLETION_TEXT: &str = "You found everything!";
const FINALIZE_REJECTED_TEXT: &str = "Collect every item before opening the chest.";

/// Result of a finalize attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The session is now `Completed`.
    Completed,
    /// The finalize object did not report readiness; nothing was evaluated.
    NotReady,
    /// The session was not `AllCollected`.
    Rejected,
}

/// Drives the top-level session state machine.
pub struct SessionLifecycle {
    feedback_seconds: f32,
    settle_frames: u8,
    /// Ticks left before the entry prompt is shown again after a restart.
    pending_prompt: Option<u8>,
    /// Set when `start` finds no items; the session then never runs.
    disabled: bool,
    /// A restart arrived while a transition was running.
    restart_pending: bool,
}

impl SessionLifecycle {
    pub fn new(config: &HuntConfig) -> Self {
        Self {
            feedback_seconds: config.feedback_seconds,
            settle_frames: config.restart_settle_frames,
            pending_prompt: None,
            disabled: false,
            restart_pending: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// True while a restart waits for the running transition to end.
    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// Consume a restart queued by [`SessionLifecycle::restart`].
    pub fn take_pending_restart(&mut self) -> bool {
        core::mem::take(&mut self.restart_pending)
    }

    /// True while a restart is waiting to re-show the entry prompt.
    pub fn prompt_pending(&self) -> bool {
        self.pending_prompt.is_some()
    }

    /// Begin play. No-op unless the session is `NotStarted`.
    ///
    /// With an empty item sequence the session disables itself instead of
    /// running.
    pub fn start(
        &mut self,
        session: &mut Session,
        tracker: &mut ProgressionTracker,
        presenter: &mut dyn Presentation,
    ) -> bool {
        if self.disabled {
            log::debug!("start ignored: session disabled");
            return false;
        }
        if session.lifecycle() != LifecycleState::NotStarted {
            log::debug!("start ignored in {:?}", session.lifecycle());
            return false;
        }
        if tracker.item_count() == 0 {
            log::error!("{}; session disabled", HuntError::NoItems);
            self.disabled = true;
            return false;
        }

        session.reset();
        session.set_lifecycle(LifecycleState::Running);
        self.pending_prompt = None;
        presenter.hide_prompt();
        tracker.recompute_visibility(session, presenter);
        log::info!("session started with {} items", tracker.item_count());
        true
    }

    /// Called by the tracker once the cursor reaches the end of the sequence.
    pub fn on_item_sequence_exhausted(&mut self, session: &mut Session) {
        if session.lifecycle() != LifecycleState::Running {
            return;
        }
        session.set_lifecycle(LifecycleState::AllCollected);
        log::info!("all items collected; waiting for finalize");
    }

    /// Turn `AllCollected` into `Completed`.
    pub fn finalize(
        &mut self,
        session: &mut Session,
        presenter: &mut dyn Presentation,
    ) -> FinalizeOutcome {
        if session.lifecycle() != LifecycleState::AllCollected {
            log::debug!("finalize rejected in {:?}", session.lifecycle());
            presenter.show_feedback(FINALIZE_REJECTED_TEXT, self.feedback_seconds);
            return FinalizeOutcome::Rejected;
        }
        session.set_lifecycle(LifecycleState::Completed);
        presenter.play_cue(Cue::Completed);
        presenter.show_completion_message(COMPLETION_TEXT);
        log::info!("session completed");
        FinalizeOutcome::Completed
    }

    /// Reset a completed session to its pre-start state.
    ///
    /// Transitions cannot be cancelled, so a restart requested while one is
    /// running is queued and returns `false`; the owner applies it once the
    /// transition finishes.
    pub fn restart(
        &mut self,
        session: &mut Session,
        tracker: &mut ProgressionTracker,
        controller: &mut ViewModeController,
        gesture: &mut GestureTransitionTrigger,
        presenter: &mut dyn Presentation,
    ) -> bool {
        if session.lifecycle() != LifecycleState::Completed {
            log::debug!("restart ignored in {:?}", session.lifecycle());
            return false;
        }
        if controller.is_transitioning() {
            log::info!("restart queued until the transition finishes");
            self.restart_pending = true;
            return false;
        }

        session.reset();
        gesture.teardown(presenter);
        controller.cut_to(ViewMode::A, session, tracker, presenter);
        self.pending_prompt = Some(self.settle_frames);
        self.restart_pending = false;
        log::info!("session restarted");
        true
    }

    /// Per-tick bookkeeping: counts down the post-restart settle delay.
    pub fn tick(&mut self, presenter: &mut dyn Presentation) {
        let Some(frames) = self.pending_prompt else {
            return;
        };
        let remaining = frames.saturating_sub(1);
        if remaining == 0 {
            self.pending_prompt = None;
            presenter.show_prompt();
        } else {
            self.pending_prompt = Some(remaining);
        }
    }
}
