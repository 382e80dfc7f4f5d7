#![no_std]

use glam::Vec3;

/// Which of the two presentation contexts is active.
///
/// Defined here rather than in dualhunt-core so collaborators can react to
/// view changes without depending on the session crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Augmented view (passthrough camera + overlays).
    #[default]
    A,
    /// Virtual view (fully rendered scene).
    B,
}

impl ViewMode {
    /// The other view.
    pub fn opposite(self) -> Self {
        match self {
            ViewMode::A => ViewMode::B,
            ViewMode::B => ViewMode::A,
        }
    }

    /// Short lowercase name for logs and feedback text.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::A => "augmented",
            ViewMode::B => "virtual",
        }
    }
}

/// Stable handle assigned to a scene object at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Linear RGB color used for the fade overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Audio cues the core asks for. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// An item was collected.
    Collected,
    /// The finalize object accepted the completed hunt.
    Completed,
}

/// Output side of the session core: rendering, UI text and audio.
///
/// Every method is fire-and-forget; the core never consumes a return value.
/// Implementations that lack a capability should leave the default no-op in
/// place rather than fail.
pub trait Presentation {
    /// Whether a full-screen overlay exists to draw fades with.
    ///
    /// When false the core still runs transition timing but skips
    /// `set_overlay_alpha` calls.
    fn has_overlay(&self) -> bool {
        true
    }

    /// Set the fade overlay color and opacity (0.0 transparent, 1.0 opaque).
    fn set_overlay_alpha(&mut self, color: Color, alpha: f32);

    /// Apply view-specific rendering (camera passthrough, skybox, layers).
    fn show_view(&mut self, view: ViewMode);

    /// Show or hide a collectible item.
    fn set_item_visible(&mut self, id: ObjectId, visible: bool);

    /// Place the gesture proxy marker, or remove it with `None`.
    fn place_proxy(&mut self, _position: Option<Vec3>) {}

    /// Show the entry prompt ("press start").
    fn show_prompt(&mut self);

    /// Hide the entry prompt.
    fn hide_prompt(&mut self);

    /// Show the end-of-hunt message.
    fn show_completion_message(&mut self, text: &str);

    /// Show a transient message for `duration_seconds`.
    fn show_feedback(&mut self, text: &str, duration_seconds: f32);

    /// Play an audio cue.
    fn play_cue(&mut self, _cue: Cue) {}
}

/// Logical buttons reported by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Start the session, or restart it once completed.
    Start,
    /// Immediate view cut.
    View,
    /// Timed fade transition.
    Fade,
    /// Held button arming the proximity gesture.
    Gesture,
}

/// Edge-triggered button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Button),
    Released(Button),
}

/// Abstracts discrete user input across platforms.
pub trait InputSource {
    /// Initialize the input subsystem.
    fn init(&mut self) {}

    /// Poll for input events. Non-blocking.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// What the targeting ray (or hand collider) is currently on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit<'a> {
    /// Handle reported by the hit-test collaborator.
    pub id: ObjectId,
    /// Stable object name. May be empty.
    pub name: &'a str,
    /// Readiness reported by the object itself. Only the finalize object
    /// uses it; items ignore it.
    pub ready: bool,
}

/// Continuous per-tick input: time step, poses and targeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample<'a> {
    /// Seconds since the previous tick.
    pub delta_seconds: f32,
    /// Tracked hand position (world space, metres).
    pub hand: Vec3,
    /// Head position the gesture distance is measured against.
    pub head: Vec3,
    /// Current target, if the user is targeting something.
    pub target: Option<TargetHit<'a>>,
}

impl<'a> FrameSample<'a> {
    /// A sample with no tracking movement and nothing targeted.
    pub fn idle(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            hand: Vec3::ZERO,
            head: Vec3::new(0.0, 1.6, 0.0),
            target: None,
        }
    }
}
