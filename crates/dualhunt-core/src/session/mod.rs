//! Session aggregate and its lifecycle.

pub mod lifecycle;

pub use lifecycle::{FinalizeOutcome, SessionLifecycle};

use dualhunt_hal::ViewMode;

/// Top-level session state.
///
/// Edges: `NotStarted -> Running -> AllCollected -> Completed -> NotStarted`
/// (the last one only through restart).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    NotStarted,
    Running,
    AllCollected,
    Completed,
}

impl LifecycleState {
    /// Manual and gesture view switches are only honoured in these states.
    pub fn allows_view_switch(self) -> bool {
        matches!(self, LifecycleState::Running | LifecycleState::AllCollected)
    }
}

/// The root aggregate: lifecycle state, item cursor and active view.
///
/// Read access is public. Writes are crate-private and made only by the
/// lifecycle, the progression tracker (cursor) and the view controller
/// (active view).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    lifecycle: LifecycleState,
    next_index: usize,
    active_view: ViewMode,
}

impl Session {
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Index of the only item that can be collected next. Items below it
    /// are collected; items at or above it are not.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn active_view(&self) -> ViewMode {
        self.active_view
    }

    pub(crate) fn set_lifecycle(&mut self, state: LifecycleState) {
        self.lifecycle = state;
    }

    pub(crate) fn set_active_view(&mut self, view: ViewMode) {
        self.active_view = view;
    }

    /// Move the cursor past the current item and return the new value.
    pub(crate) fn advance_cursor(&mut self) -> usize {
        self.next_index += 1;
        self.next_index
    }

    /// Back to freshly constructed values, all fields at once.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
