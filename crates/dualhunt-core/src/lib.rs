#![cfg_attr(not(test), no_std)]
//! Platform-agnostic session core for the dual-reality scavenger hunt.
//!
//! The host owns a single [`Hunt`], feeds it button edges through
//! [`Hunt::handle_event`] and one [`FrameSample`](dualhunt_hal::FrameSample)
//! per tick through [`Hunt::tick`]. Everything time-based advances from the
//! tick's delta; nothing blocks.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod hunt;
pub mod progression;
pub mod session;
pub mod view;

pub use config::HuntConfig;
pub use error::HuntError;
pub use hunt::Hunt;
pub use progression::CollectOutcome;
pub use session::{FinalizeOutcome, LifecycleState};
pub use view::controller::SwitchOutcome;
pub use view::ViewMode;
