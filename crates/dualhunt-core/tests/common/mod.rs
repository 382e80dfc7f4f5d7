//! Shared test fixtures: a recording presentation collaborator and helpers
//! for building and driving a `Hunt`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dualhunt_core::{Hunt, HuntConfig};
use dualhunt_hal::{Color, Cue, FrameSample, ObjectId, Presentation, TargetHit, ViewMode};
use glam::Vec3;

/// One captured presentation call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Overlay(f32),
    View(ViewMode),
    ItemVisible(ObjectId, bool),
    Proxy(Option<Vec3>),
    ShowPrompt,
    HidePrompt,
    Completion(String),
    Feedback(String),
    Cue(Cue),
}

/// Mock presentation that records every call. Clones share the log.
#[derive(Clone)]
pub struct MockPresentation {
    calls: Rc<RefCell<Vec<Call>>>,
    overlay: bool,
}

impl MockPresentation {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            overlay: true,
        }
    }

    /// A collaborator without a fade overlay.
    pub fn without_overlay() -> Self {
        Self {
            overlay: false,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn overlay_alphas(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Overlay(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    /// Latest visibility written for `id`.
    pub fn last_visibility(&self, id: ObjectId) -> Option<bool> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::ItemVisible(i, v) if *i == id => Some(*v),
            _ => None,
        })
    }

    pub fn last_feedback(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::Feedback(text) => Some(text.clone()),
            _ => None,
        })
    }
}

impl Presentation for MockPresentation {
    fn has_overlay(&self) -> bool {
        self.overlay
    }

    fn set_overlay_alpha(&mut self, _color: Color, alpha: f32) {
        self.calls.borrow_mut().push(Call::Overlay(alpha));
    }

    fn show_view(&mut self, view: ViewMode) {
        self.calls.borrow_mut().push(Call::View(view));
    }

    fn set_item_visible(&mut self, id: ObjectId, visible: bool) {
        self.calls.borrow_mut().push(Call::ItemVisible(id, visible));
    }

    fn place_proxy(&mut self, position: Option<Vec3>) {
        self.calls.borrow_mut().push(Call::Proxy(position));
    }

    fn show_prompt(&mut self) {
        self.calls.borrow_mut().push(Call::ShowPrompt);
    }

    fn hide_prompt(&mut self) {
        self.calls.borrow_mut().push(Call::HidePrompt);
    }

    fn show_completion_message(&mut self, text: &str) {
        self.calls.borrow_mut().push(Call::Completion(text.to_string()));
    }

    fn show_feedback(&mut self, text: &str, _duration_seconds: f32) {
        self.calls.borrow_mut().push(Call::Feedback(text.to_string()));
    }

    fn play_cue(&mut self, cue: Cue) {
        self.calls.borrow_mut().push(Call::Cue(cue));
    }
}

pub const DT: f32 = 1.0 / 60.0;
pub const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
pub const HAND_FAR: Vec3 = Vec3::new(0.0, 1.0, 0.5);
pub const HAND_NEAR: Vec3 = Vec3::new(0.0, 1.55, 0.05);

/// Build a hunt with `items` numbered items and a shared mock.
pub fn make_hunt(items: usize) -> (Hunt<MockPresentation>, MockPresentation) {
    make_hunt_with(HuntConfig {
        item_count: items,
        ..HuntConfig::default()
    })
}

pub fn make_hunt_with(config: HuntConfig) -> (Hunt<MockPresentation>, MockPresentation) {
    let presenter = MockPresentation::new();
    let handle = presenter.clone();
    let hunt = Hunt::new(config, presenter).expect("Hunt::new should succeed");
    (hunt, handle)
}

pub fn item(index: u32) -> TargetHit<'static> {
    TargetHit {
        id: ObjectId(index),
        name: "",
        ready: false,
    }
}

pub fn sample(hand: Vec3) -> FrameSample<'static> {
    FrameSample {
        delta_seconds: DT,
        hand,
        head: HEAD,
        target: None,
    }
}

pub fn idle_tick(hunt: &mut Hunt<MockPresentation>) {
    hunt.tick(&sample(HAND_FAR));
}

/// Tick until no transition is running. Panics if it never ends.
pub fn run_transition(hunt: &mut Hunt<MockPresentation>) {
    for _ in 0..10_000 {
        if hunt.transition_phase() == dualhunt_core::view::TransitionPhase::Idle {
            return;
        }
        idle_tick(hunt);
    }
    panic!("transition did not finish");
}

/// Fade to `view` and wait for the transition to end.
pub fn fade_to(hunt: &mut Hunt<MockPresentation>, view: ViewMode) {
    if hunt.active_view() != view {
        hunt.on_fade_input_edge();
        run_transition(hunt);
    }
    assert_eq!(hunt.active_view(), view);
}
