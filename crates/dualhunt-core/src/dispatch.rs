//! Edge detection for the level-triggered targeting signal.

use dualhunt_hal::{ObjectId, TargetHit};

/// Turns "is targeting X" per tick into one dispatch per acquisition.
///
/// A target fires again when the handle changes, when targeting stops and
/// resumes, or when the target's readiness goes from false to true.
#[derive(Debug, Default)]
pub struct TargetDispatcher {
    last: Option<(ObjectId, bool)>,
}

impl TargetDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's target and report whether it should be dispatched.
    pub fn observe(&mut self, target: Option<&TargetHit<'_>>) -> bool {
        let current = target.map(|hit| (hit.id, hit.ready));
        let fresh = match (self.last, current) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some((last_id, last_ready)), Some((id, ready))) => {
                last_id != id || (ready && !last_ready)
            }
        };
        self.last = current;
        fresh
    }

    /// Forget the current target so the next tick dispatches again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u32, ready: bool) -> TargetHit<'static> {
        TargetHit {
            id: ObjectId(id),
            name: "",
            ready,
        }
    }

    #[test]
    fn held_target_dispatches_once() {
        let mut dispatcher = TargetDispatcher::new();
        assert!(dispatcher.observe(Some(&hit(1, false))));
        assert!(!dispatcher.observe(Some(&hit(1, false))));
        assert!(!dispatcher.observe(Some(&hit(1, false))));
    }

    #[test]
    fn reacquire_dispatches_again() {
        let mut dispatcher = TargetDispatcher::new();
        assert!(dispatcher.observe(Some(&hit(1, false))));
        assert!(!dispatcher.observe(None));
        assert!(dispatcher.observe(Some(&hit(1, false))));
    }

    #[test]
    fn switching_targets_dispatches() {
        let mut dispatcher = TargetDispatcher::new();
        assert!(dispatcher.observe(Some(&hit(1, false))));
        assert!(dispatcher.observe(Some(&hit(2, false))));
    }

    #[test]
    fn readiness_rising_edge_dispatches() {
        let mut dispatcher = TargetDispatcher::new();
        assert!(dispatcher.observe(Some(&hit(9, false))));
        assert!(dispatcher.observe(Some(&hit(9, true))));
        assert!(!dispatcher.observe(Some(&hit(9, true))));
        assert!(!dispatcher.observe(Some(&hit(9, false))));
    }
}
