//! Session tuning parameters.

use dualhunt_hal::{Color, ObjectId};

use crate::error::HuntError;
use crate::progression::MAX_ITEMS;

/// Default handle of the finalize object (the chest).
pub const DEFAULT_FINALIZE_ID: ObjectId = ObjectId(1000);

/// Configuration for a hunt session.
#[derive(Debug, Clone)]
pub struct HuntConfig {
    /// Number of items registered by [`Hunt::new`](crate::Hunt::new).
    /// Zero is accepted here; the session then disables itself at start.
    pub item_count: usize,
    /// Length of each fade ramp (out and in), in seconds.
    pub fade_seconds: f32,
    /// Time the overlay is held fully opaque around the view swap, in seconds.
    pub hold_seconds: f32,
    /// Hand-to-head distance (metres) below which the gesture fires.
    pub gesture_threshold: f32,
    /// Overlay color used when a transition request names none.
    pub default_tint: Color,
    /// How long feedback messages stay on screen, in seconds.
    pub feedback_seconds: f32,
    /// Ticks to wait after a restart before the entry prompt is shown again.
    pub restart_settle_frames: u8,
    /// Handle of the finalize object.
    pub finalize_id: ObjectId,
    /// Stable name of the finalize object, for the name fallback lookup.
    pub finalize_name: &'static str,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            item_count: 4,
            fade_seconds: 0.5,
            hold_seconds: 0.25,
            gesture_threshold: 0.25,
            default_tint: Color::BLACK,
            feedback_seconds: 2.0,
            restart_settle_frames: 2,
            finalize_id: DEFAULT_FINALIZE_ID,
            finalize_name: "chest",
        }
    }
}

impl HuntConfig {
    /// Reject values the phase machine cannot run with.
    pub fn validate(&self) -> Result<(), HuntError> {
        if self.item_count > MAX_ITEMS {
            return Err(HuntError::TooManyItems {
                capacity: MAX_ITEMS,
            });
        }
        if !(self.fade_seconds.is_finite() && self.fade_seconds >= 0.0) {
            return Err(HuntError::InvalidConfig("fade_seconds must be finite and >= 0"));
        }
        if !(self.hold_seconds.is_finite() && self.hold_seconds >= 0.0) {
            return Err(HuntError::InvalidConfig("hold_seconds must be finite and >= 0"));
        }
        if !(self.gesture_threshold.is_finite() && self.gesture_threshold > 0.0) {
            return Err(HuntError::InvalidConfig("gesture_threshold must be finite and > 0"));
        }
        if !(self.feedback_seconds.is_finite() && self.feedback_seconds >= 0.0) {
            return Err(HuntError::InvalidConfig("feedback_seconds must be finite and >= 0"));
        }
        Ok(())
    }
}
