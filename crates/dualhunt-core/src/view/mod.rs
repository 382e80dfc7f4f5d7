//! View modes, the timed transition phase machine, and the controller that
//! owns both.

pub mod controller;
pub mod transition;

pub use controller::{SwitchOutcome, ViewListener, ViewModeController};
pub use dualhunt_hal::ViewMode;
pub use transition::{TransitionPhase, TransitionState, TransitionStep};

/// View an item must be collected in: even indices in A, odd indices in B.
pub fn required_view(index: usize) -> ViewMode {
    if index % 2 == 1 {
        ViewMode::B
    } else {
        ViewMode::A
    }
}
