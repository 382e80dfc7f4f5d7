//! Composition root: owns the session and every component, routes input to
//! them, and passes the cross-component references each operation needs.

use dualhunt_hal::{Button, Color, FrameSample, InputEvent, Presentation, TargetHit, ViewMode};
use glam::Vec3;

use crate::config::HuntConfig;
use crate::dispatch::TargetDispatcher;
use crate::error::HuntError;
use crate::gesture::{GestureKind, GestureTransitionTrigger};
use crate::progression::{CollectOutcome, ItemRegistry, ProgressionTracker};
use crate::session::{FinalizeOutcome, LifecycleState, Session, SessionLifecycle};
use crate::view::{required_view, SwitchOutcome, TransitionPhase, TransitionStep, ViewModeController};

/// One play-through of the hunt, generic over the presentation collaborator.
pub struct Hunt<P: Presentation> {
    config: HuntConfig,
    session: Session,
    lifecycle: SessionLifecycle,
    tracker: ProgressionTracker,
    controller: ViewModeController,
    gesture: GestureTransitionTrigger,
    targets: TargetDispatcher,
    presenter: P,
    /// Hand pose from the latest tick, used to place the proxy on press.
    last_hand: Vec3,
}

impl<P: Presentation> Hunt<P> {
    /// Build a hunt with `config.item_count` numbered items.
    pub fn new(config: HuntConfig, presenter: P) -> Result<Self, HuntError> {
        config.validate()?;
        let registry = ItemRegistry::numbered(config.item_count)?;
        Self::with_registry(config, registry, presenter)
    }

    /// Build a hunt over an explicit item registry. `config.item_count` is
    /// ignored.
    pub fn with_registry(
        config: HuntConfig,
        registry: ItemRegistry,
        presenter: P,
    ) -> Result<Self, HuntError> {
        config.validate()?;
        if registry.by_id(config.finalize_id).is_some() {
            return Err(HuntError::DuplicateItem(config.finalize_id));
        }

        let mut hunt = Self {
            session: Session::default(),
            lifecycle: SessionLifecycle::new(&config),
            tracker: ProgressionTracker::new(registry, config.feedback_seconds),
            controller: ViewModeController::new(&config),
            gesture: GestureTransitionTrigger::new(config.gesture_threshold),
            targets: TargetDispatcher::new(),
            presenter,
            last_hand: Vec3::ZERO,
            config,
        };
        hunt.presenter.show_view(ViewMode::A);
        hunt.tracker
            .recompute_visibility(&hunt.session, &mut hunt.presenter);
        hunt.presenter.show_prompt();
        Ok(hunt)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    pub fn start(&mut self) -> bool {
        self.lifecycle
            .start(&mut self.session, &mut self.tracker, &mut self.presenter)
    }

    pub fn restart(&mut self) -> bool {
        let restarted = self.lifecycle.restart(
            &mut self.session,
            &mut self.tracker,
            &mut self.controller,
            &mut self.gesture,
            &mut self.presenter,
        );
        if restarted {
            self.targets.reset();
        }
        restarted
    }

    pub fn attempt_collect(&mut self, hit: &TargetHit<'_>) -> CollectOutcome {
        self.tracker.attempt_collect(
            hit,
            &mut self.session,
            &mut self.lifecycle,
            &mut self.presenter,
        )
    }

    /// Finalize through the finalize object; `ready` is the object's own
    /// readiness report.
    pub fn attempt_finalize(&mut self, ready: bool) -> FinalizeOutcome {
        let outcome = self.tracker.attempt_finalize(
            ready,
            &mut self.session,
            &mut self.lifecycle,
            &mut self.presenter,
        );
        if outcome == FinalizeOutcome::Completed {
            self.gesture.teardown(&mut self.presenter);
        }
        outcome
    }

    /// View button: immediate cut to the other view.
    pub fn on_view_input_edge(&mut self) -> SwitchOutcome {
        if let Some(refused) = self.switch_refusal() {
            return refused;
        }
        if self.controller.is_transitioning() {
            log::debug!("cut ignored: transition in progress");
            return SwitchOutcome::Busy;
        }
        let target = self.session.active_view().opposite();
        self.controller.cut_to(
            target,
            &mut self.session,
            &mut self.tracker,
            &mut self.presenter,
        );
        log::info!("cut to {} view", target.as_str());
        SwitchOutcome::Cut
    }

    /// Fade button: timed transition to the other view.
    pub fn on_fade_input_edge(&mut self) -> SwitchOutcome {
        let target = self.session.active_view().opposite();
        self.request_transition(target, None)
    }

    /// Timed transition to `target`, gated on the lifecycle.
    pub fn request_transition(&mut self, target: ViewMode, tint: Option<Color>) -> SwitchOutcome {
        if let Some(refused) = self.switch_refusal() {
            return refused;
        }
        self.controller
            .begin_timed_transition(target, tint, None, &mut self.presenter)
    }

    /// Route an edge-triggered button event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(Button::Start) => match self.session.lifecycle() {
                LifecycleState::NotStarted => {
                    self.start();
                }
                LifecycleState::Completed => {
                    self.restart();
                }
                state => log::debug!("start button ignored in {state:?}"),
            },
            InputEvent::Pressed(Button::View) => {
                self.on_view_input_edge();
            }
            InputEvent::Pressed(Button::Fade) => {
                self.on_fade_input_edge();
            }
            InputEvent::Pressed(Button::Gesture) => {
                if self.session.lifecycle().allows_view_switch() {
                    self.gesture.press(self.last_hand, &mut self.presenter);
                } else {
                    log::debug!("gesture press ignored in {:?}", self.session.lifecycle());
                }
            }
            InputEvent::Released(Button::Gesture) => {
                self.gesture.release(&mut self.presenter);
            }
            InputEvent::Released(_) => {}
        }
    }

    /// Advance one simulation tick.
    ///
    /// Order: restart settle, gesture, targeting, transition. Both switch
    /// paths therefore see the same lock state within a tick, and a view
    /// swap from the transition is visible to collection on the next tick.
    pub fn tick(&mut self, sample: &FrameSample<'_>) {
        self.last_hand = sample.hand;
        self.lifecycle.tick(&mut self.presenter);

        if self.session.lifecycle().allows_view_switch() {
            if self
                .gesture
                .update(sample.hand, sample.head, &mut self.presenter)
            {
                let target = self.session.active_view().opposite();
                let outcome = self.request_transition(target, None);
                log::info!("gesture requested {} view: {outcome:?}", target.as_str());
            }
        } else if self.gesture.kind() != GestureKind::Idle {
            self.gesture.teardown(&mut self.presenter);
        }

        if self.targets.observe(sample.target.as_ref()) {
            if let Some(hit) = sample.target.as_ref() {
                self.dispatch_target(hit);
            }
        }

        let step = self.controller.advance(
            sample.delta_seconds,
            &mut self.session,
            &mut self.tracker,
            &mut self.presenter,
        );
        if step == TransitionStep::Finished {
            self.gesture.transition_finished();
            if self.lifecycle.take_pending_restart() {
                self.restart();
            }
        }
    }

    /// The finalize object matches by id, or by name when the id belongs to
    /// no registered item.
    fn dispatch_target(&mut self, hit: &TargetHit<'_>) {
        let is_finalize = hit.id == self.config.finalize_id
            || (!hit.name.is_empty()
                && hit.name == self.config.finalize_name
                && self.tracker.registry().by_id(hit.id).is_none());
        if is_finalize {
            let outcome = self.attempt_finalize(hit.ready);
            log::debug!("finalize object targeted: {outcome:?}");
        } else {
            let outcome = self.attempt_collect(hit);
            log::debug!("item {:?} targeted: {outcome:?}", hit.id);
        }
    }

    fn switch_refusal(&self) -> Option<SwitchOutcome> {
        let state = self.session.lifecycle();
        if state.allows_view_switch() {
            None
        } else {
            log::debug!("view switch ignored in {state:?}");
            Some(SwitchOutcome::Rejected)
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.session.lifecycle() == LifecycleState::Running
    }

    pub fn all_collected(&self) -> bool {
        self.session.lifecycle() == LifecycleState::AllCollected
    }

    pub fn is_completed(&self) -> bool {
        self.session.lifecycle() == LifecycleState::Completed
    }

    pub fn is_disabled(&self) -> bool {
        self.lifecycle.is_disabled()
    }

    /// A restart is queued behind the running transition.
    pub fn restart_pending(&self) -> bool {
        self.lifecycle.restart_pending()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.session.lifecycle()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn next_index(&self) -> usize {
        self.session.next_index()
    }

    pub fn item_count(&self) -> usize {
        self.tracker.item_count()
    }

    pub fn items(&self) -> &ItemRegistry {
        self.tracker.registry()
    }

    pub fn is_collected(&self, index: usize) -> bool {
        self.tracker.is_collected(index, &self.session)
    }

    pub fn visible_item(&self) -> Option<dualhunt_hal::ObjectId> {
        self.tracker.visible_item()
    }

    pub fn active_view(&self) -> ViewMode {
        self.session.active_view()
    }

    pub fn required_view(&self, index: usize) -> ViewMode {
        required_view(index)
    }

    pub fn transition_phase(&self) -> TransitionPhase {
        self.controller.phase()
    }

    pub fn gesture_phase(&self) -> GestureKind {
        self.gesture.kind()
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}
