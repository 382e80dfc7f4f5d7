//! Presentation collaborator that renders to the log.

use dualhunt_hal::{Color, Cue, ObjectId, Presentation, ViewMode};
use glam::Vec3;

/// Counters collected while the session runs, printed at exit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stats {
    pub view_changes: u32,
    pub collected: u32,
    pub completions: u32,
    pub feedback_messages: u32,
    pub prompts: u32,
}

/// Logs every presentation call. Overlay alpha is only logged at the
/// fade ends to keep the output readable.
pub struct LogPresentation {
    overlay: bool,
    last_alpha: f32,
    stats: Stats,
}

impl LogPresentation {
    pub fn new(overlay: bool) -> Self {
        Self {
            overlay,
            last_alpha: 0.0,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl Presentation for LogPresentation {
    fn has_overlay(&self) -> bool {
        self.overlay
    }

    fn set_overlay_alpha(&mut self, color: Color, alpha: f32) {
        if (alpha == 0.0 || alpha == 1.0) && alpha != self.last_alpha {
            log::debug!(
                "overlay rgb({:.2}, {:.2}, {:.2}) alpha {alpha:.1}",
                color.r,
                color.g,
                color.b
            );
        }
        self.last_alpha = alpha;
    }

    fn show_view(&mut self, view: ViewMode) {
        self.stats.view_changes += 1;
        log::info!("[view] {}", view.as_str());
    }

    fn set_item_visible(&mut self, id: ObjectId, visible: bool) {
        if visible {
            log::info!("[item] {} visible", id.0);
        }
    }

    fn place_proxy(&mut self, position: Option<Vec3>) {
        match position {
            Some(p) => log::trace!("[proxy] at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            None => log::debug!("[proxy] removed"),
        }
    }

    fn show_prompt(&mut self) {
        self.stats.prompts += 1;
        log::info!("[ui] press START to begin");
    }

    fn hide_prompt(&mut self) {
        log::debug!("[ui] prompt hidden");
    }

    fn show_completion_message(&mut self, text: &str) {
        self.stats.completions += 1;
        log::info!("[ui] {text}");
    }

    fn show_feedback(&mut self, text: &str, duration_seconds: f32) {
        self.stats.feedback_messages += 1;
        log::info!("[ui] {text} ({duration_seconds:.1}s)");
    }

    fn play_cue(&mut self, cue: Cue) {
        if cue == Cue::Collected {
            self.stats.collected += 1;
        }
        log::info!("[audio] {cue:?}");
    }
}
