//! Proximity gesture: hold the gesture button and bring the hand to the head
//! to request a view transition.
//!
//! Per press the trigger goes `Idle -> Armed -> Fired` at most once. The
//! proxy marker lives inside the `Armed` state, so there is no way to hold
//! it after the trigger has fired or the button was released.

use dualhunt_hal::Presentation;
use glam::Vec3;

/// Marker that follows the hand while the gesture is armed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyObject {
    pub position: Vec3,
}

/// Gesture state for one press cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePhase {
    /// Not held, or held after the trigger already reset.
    #[default]
    Idle,
    /// Held; the proxy tracks the hand.
    Armed(ProxyObject),
    /// Fired for the current press. Needs a release (or the end of the
    /// transition it started) before it can arm again.
    Fired,
}

/// Payload-free view of [`GesturePhase`] for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    Armed,
    Fired,
}

/// Watches the held gesture button and hand proximity, and reports when a
/// transition should be requested.
pub struct GestureTransitionTrigger {
    phase: GesturePhase,
    threshold: f32,
}

impl GestureTransitionTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: GesturePhase::Idle,
            threshold,
        }
    }

    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    pub fn kind(&self) -> GestureKind {
        match self.phase {
            GesturePhase::Idle => GestureKind::Idle,
            GesturePhase::Armed(_) => GestureKind::Armed,
            GesturePhase::Fired => GestureKind::Fired,
        }
    }

    pub fn proxy_position(&self) -> Option<Vec3> {
        match self.phase {
            GesturePhase::Armed(proxy) => Some(proxy.position),
            _ => None,
        }
    }

    /// Gesture button pressed. Arms only from `Idle`.
    pub fn press(&mut self, hand: Vec3, presenter: &mut dyn Presentation) {
        if self.phase != GesturePhase::Idle {
            log::debug!("gesture press ignored in {:?}", self.kind());
            return;
        }
        self.phase = GesturePhase::Armed(ProxyObject { position: hand });
        presenter.place_proxy(Some(hand));
    }

    /// Gesture button released: drop the proxy and allow the next press.
    pub fn release(&mut self, presenter: &mut dyn Presentation) {
        if let GesturePhase::Armed(_) = self.phase {
            presenter.place_proxy(None);
        }
        self.phase = GesturePhase::Idle;
    }

    /// Per-tick update while armed. Returns true on the single tick the
    /// hand comes within the threshold of `head`.
    pub fn update(&mut self, hand: Vec3, head: Vec3, presenter: &mut dyn Presentation) -> bool {
        let GesturePhase::Armed(ref mut proxy) = self.phase else {
            return false;
        };
        proxy.position = hand;

        let distance = proxy.position.distance(head);
        if distance < self.threshold {
            log::debug!("gesture fired at {distance:.3} m");
            self.phase = GesturePhase::Fired;
            presenter.place_proxy(None);
            return true;
        }
        presenter.place_proxy(Some(hand));
        false
    }

    /// The transition this trigger requested has finished.
    pub fn transition_finished(&mut self) {
        if self.phase == GesturePhase::Fired {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Forced teardown when the session stops accepting view switches.
    pub fn teardown(&mut self, presenter: &mut dyn Presentation) {
        if self.phase != GesturePhase::Idle {
            log::debug!("gesture torn down from {:?}", self.kind());
        }
        self.release(presenter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualhunt_hal::{Color, ObjectId, ViewMode};

    #[derive(Default)]
    struct ProxyRecorder {
        placements: Vec<Option<Vec3>>,
    }

    impl Presentation for ProxyRecorder {
        fn set_overlay_alpha(&mut self, _color: Color, _alpha: f32) {}
        fn show_view(&mut self, _view: ViewMode) {}
        fn set_item_visible(&mut self, _id: ObjectId, _visible: bool) {}
        fn place_proxy(&mut self, position: Option<Vec3>) {
            self.placements.push(position);
        }
        fn show_prompt(&mut self) {}
        fn hide_prompt(&mut self) {}
        fn show_completion_message(&mut self, _text: &str) {}
        fn show_feedback(&mut self, _text: &str, _duration_seconds: f32) {}
    }

    const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
    const FAR: Vec3 = Vec3::new(0.0, 1.0, 0.5);
    const NEAR: Vec3 = Vec3::new(0.0, 1.5, 0.05);

    #[test]
    fn fires_once_per_press() {
        let mut presenter = ProxyRecorder::default();
        let mut trigger = GestureTransitionTrigger::new(0.25);

        trigger.press(FAR, &mut presenter);
        assert!(!trigger.update(FAR, HEAD, &mut presenter));
        assert!(trigger.update(NEAR, HEAD, &mut presenter));
        assert_eq!(trigger.kind(), GestureKind::Fired);
        assert_eq!(trigger.proxy_position(), None);

        for _ in 0..10 {
            assert!(!trigger.update(NEAR, HEAD, &mut presenter));
        }
    }

    #[test]
    fn rearm_needs_new_press_even_after_transition_finished() {
        let mut presenter = ProxyRecorder::default();
        let mut trigger = GestureTransitionTrigger::new(0.25);

        trigger.press(FAR, &mut presenter);
        assert!(trigger.update(NEAR, HEAD, &mut presenter));
        trigger.transition_finished();
        assert_eq!(trigger.kind(), GestureKind::Idle);
        assert!(!trigger.update(NEAR, HEAD, &mut presenter));

        trigger.release(&mut presenter);
        trigger.press(FAR, &mut presenter);
        assert!(trigger.update(NEAR, HEAD, &mut presenter));
    }

    #[test]
    fn release_before_threshold_tears_down_proxy() {
        let mut presenter = ProxyRecorder::default();
        let mut trigger = GestureTransitionTrigger::new(0.25);

        trigger.press(FAR, &mut presenter);
        assert!(trigger.proxy_position().is_some());
        trigger.release(&mut presenter);

        assert_eq!(trigger.kind(), GestureKind::Idle);
        assert_eq!(trigger.proxy_position(), None);
        assert_eq!(presenter.placements.last(), Some(&None));
    }

    #[test]
    fn proxy_tracks_hand() {
        let mut presenter = ProxyRecorder::default();
        let mut trigger = GestureTransitionTrigger::new(0.25);
        let moved = Vec3::new(0.3, 1.1, 0.4);

        trigger.press(FAR, &mut presenter);
        trigger.update(moved, HEAD, &mut presenter);
        assert_eq!(trigger.proxy_position(), Some(moved));
    }

    #[test]
    fn repeated_press_while_fired_does_not_rearm() {
        let mut presenter = ProxyRecorder::default();
        let mut trigger = GestureTransitionTrigger::new(0.25);

        trigger.press(FAR, &mut presenter);
        assert!(trigger.update(NEAR, HEAD, &mut presenter));
        trigger.press(FAR, &mut presenter);
        assert_eq!(trigger.kind(), GestureKind::Fired);
    }
}
