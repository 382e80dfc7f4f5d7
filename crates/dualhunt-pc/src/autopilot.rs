//! Scripted player that completes the hunt on its own.
//!
//! Alternates between the fade button and the proximity gesture to reach
//! each item's view, so both switch paths get exercised.

use std::collections::VecDeque;

use dualhunt_core::view::TransitionPhase;
use dualhunt_core::gesture::GestureKind;
use dualhunt_core::{Hunt, LifecycleState};
use dualhunt_hal::{Button, FrameSample, InputEvent, InputSource, ObjectId, Presentation, TargetHit};
use glam::Vec3;

use crate::driver::{Driver, Step};

const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
const HAND_REST: Vec3 = Vec3::new(0.25, 1.0, 0.4);
/// Fraction of the remaining hand-to-head distance covered per tick.
const HAND_STEP: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchMethod {
    Fade,
    Gesture,
}

pub struct Autopilot {
    events: VecDeque<InputEvent>,
    hand: Vec3,
    target: Option<(ObjectId, &'static str, bool)>,
    next_switch: SwitchMethod,
    holding_gesture: bool,
    start_sent: bool,
    completion_seen: bool,
    rounds_left: u32,
}

impl Autopilot {
    /// Play `rounds` complete hunts, restarting in between.
    pub fn new(rounds: u32) -> Self {
        Self {
            events: VecDeque::new(),
            hand: HAND_REST,
            target: None,
            next_switch: SwitchMethod::Fade,
            holding_gesture: false,
            start_sent: false,
            completion_seen: false,
            rounds_left: rounds.max(1),
        }
    }

    fn tap(&mut self, button: Button) {
        self.events.push_back(InputEvent::Pressed(button));
        self.events.push_back(InputEvent::Released(button));
    }

    fn release_gesture(&mut self) {
        if self.holding_gesture {
            self.events.push_back(InputEvent::Released(Button::Gesture));
            self.holding_gesture = false;
            self.hand = HAND_REST;
            self.next_switch = SwitchMethod::Fade;
        }
    }

    fn seek_item<P: Presentation>(&mut self, hunt: &Hunt<P>) {
        if hunt.transition_phase() != TransitionPhase::Idle {
            if hunt.gesture_phase() != GestureKind::Armed {
                self.release_gesture();
            }
            return;
        }

        let Some(item) = hunt.items().get(hunt.next_index()) else {
            return;
        };
        if hunt.active_view() == item.required_view() {
            self.release_gesture();
            self.target = Some((item.id(), "", false));
            return;
        }

        match self.next_switch {
            SwitchMethod::Fade => {
                log::debug!("autopilot: fade to {}", item.required_view().as_str());
                self.tap(Button::Fade);
                self.next_switch = SwitchMethod::Gesture;
            }
            SwitchMethod::Gesture if !self.holding_gesture => {
                log::debug!("autopilot: gesture to {}", item.required_view().as_str());
                self.hand = HAND_REST;
                self.events.push_back(InputEvent::Pressed(Button::Gesture));
                self.holding_gesture = true;
            }
            SwitchMethod::Gesture => match hunt.gesture_phase() {
                GestureKind::Armed => self.hand = self.hand.lerp(HEAD, HAND_STEP),
                // Press was dropped; let go and try again.
                GestureKind::Idle => {
                    self.events.push_back(InputEvent::Released(Button::Gesture));
                    self.holding_gesture = false;
                }
                GestureKind::Fired => {}
            },
        }
    }
}

impl InputSource for Autopilot {
    fn init(&mut self) {
        log::info!("autopilot: {} round(s)", self.rounds_left);
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

impl Driver for Autopilot {
    fn prepare<P: Presentation>(&mut self, hunt: &Hunt<P>) -> anyhow::Result<Step> {
        self.target = None;
        if hunt.is_disabled() {
            log::warn!("autopilot: hunt is disabled, stopping");
            return Ok(Step::Done);
        }

        match hunt.lifecycle() {
            LifecycleState::NotStarted => {
                self.completion_seen = false;
                if !self.start_sent {
                    self.tap(Button::Start);
                    self.start_sent = true;
                }
            }
            LifecycleState::Running => self.seek_item(hunt),
            LifecycleState::AllCollected => {
                self.release_gesture();
                if hunt.transition_phase() == TransitionPhase::Idle {
                    let config = hunt.config();
                    self.target = Some((config.finalize_id, config.finalize_name, true));
                }
            }
            LifecycleState::Completed => {
                if !self.completion_seen {
                    self.completion_seen = true;
                    self.rounds_left = self.rounds_left.saturating_sub(1);
                    if self.rounds_left == 0 {
                        return Ok(Step::Done);
                    }
                    log::info!("autopilot: restarting, {} round(s) left", self.rounds_left);
                }
                // Repeated until the restart is accepted.
                self.start_sent = false;
                self.tap(Button::Start);
            }
        }
        Ok(Step::Tick)
    }

    fn sample(&self, delta_seconds: f32) -> FrameSample<'_> {
        FrameSample {
            delta_seconds,
            hand: self.hand,
            head: HEAD,
            target: self
                .target
                .map(|(id, name, ready)| TargetHit { id, name, ready }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{run, LoopConfig};
    use crate::presentation::LogPresentation;
    use dualhunt_core::HuntConfig;

    fn hunt(items: usize) -> Hunt<LogPresentation> {
        let config = HuntConfig {
            item_count: items,
            ..HuntConfig::default()
        };
        Hunt::new(config, LogPresentation::new(true)).unwrap()
    }

    #[test]
    fn completes_a_four_item_hunt() {
        let mut hunt = hunt(4);
        let mut pilot = Autopilot::new(1);
        run(&mut hunt, &mut pilot, LoopConfig::default()).unwrap();

        assert!(hunt.is_completed());
        let stats = hunt.presenter().stats();
        assert_eq!(stats.collected, 4);
        assert_eq!(stats.completions, 1);
        assert_eq!(stats.feedback_messages, 0);
    }

    #[test]
    fn uses_both_switch_paths() {
        let mut hunt = hunt(3);
        let mut pilot = Autopilot::new(1);
        run(&mut hunt, &mut pilot, LoopConfig::default()).unwrap();

        // A -> B by fade, B -> A by gesture; plus the initial view.
        assert!(hunt.is_completed());
        assert_eq!(hunt.presenter().stats().view_changes, 3);
    }

    #[test]
    fn restarts_between_rounds() {
        let mut hunt = hunt(2);
        let mut pilot = Autopilot::new(2);
        run(&mut hunt, &mut pilot, LoopConfig::default()).unwrap();

        assert!(hunt.is_completed());
        let stats = hunt.presenter().stats();
        assert_eq!(stats.completions, 2);
        assert_eq!(stats.collected, 4);
    }

    #[test]
    fn stops_when_hunt_has_no_items() {
        let mut hunt = hunt(0);
        let mut pilot = Autopilot::new(1);
        let ticks = run(&mut hunt, &mut pilot, LoopConfig::default()).unwrap();

        assert!(hunt.is_disabled());
        assert_eq!(ticks, 1);
    }

    #[test]
    fn works_without_overlay() {
        let config = HuntConfig {
            item_count: 2,
            ..HuntConfig::default()
        };
        let mut hunt = Hunt::new(config, LogPresentation::new(false)).unwrap();
        let mut pilot = Autopilot::new(1);
        run(&mut hunt, &mut pilot, LoopConfig::default()).unwrap();
        assert!(hunt.is_completed());
    }
}
