//! Ordered item collection and item visibility.

pub mod registry;

pub use registry::{Item, ItemName, ItemRegistry, MAX_ITEMS, MAX_NAME_LEN};

use dualhunt_hal::{Cue, ObjectId, Presentation, TargetHit, ViewMode};

use crate::session::{FinalizeOutcome, LifecycleState, Session, SessionLifecycle};
use crate::view::{required_view, ViewListener};

/// Result of a collection attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The item was collected and more remain.
    Collected,
    /// The last item was collected; the session is now `AllCollected`.
    Exhausted,
    /// The session is not `Running`.
    NotRunning,
    /// The target does not resolve to a registered item.
    UnknownTarget,
    /// The item is not the one at the cursor.
    OutOfOrder,
    /// The item is the current one but the active view is wrong.
    WrongView,
}

/// Owns the item sequence and decides which single item is collectible
/// and visible at any moment.
pub struct ProgressionTracker {
    registry: ItemRegistry,
    visible: Option<ObjectId>,
    feedback_seconds: f32,
}

impl ProgressionTracker {
    pub fn new(registry: ItemRegistry, feedback_seconds: f32) -> Self {
        Self {
            registry,
            visible: None,
            feedback_seconds,
        }
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn item_count(&self) -> usize {
        self.registry.len()
    }

    /// Item currently shown, if any.
    pub fn visible_item(&self) -> Option<ObjectId> {
        self.visible
    }

    pub fn is_collected(&self, index: usize, session: &Session) -> bool {
        index < self.registry.len() && index < session.next_index()
    }

    /// Try to collect the item behind `hit`.
    pub fn attempt_collect(
        &mut self,
        hit: &TargetHit<'_>,
        session: &mut Session,
        lifecycle: &mut SessionLifecycle,
        presenter: &mut dyn Presentation,
    ) -> CollectOutcome {
        if session.lifecycle() != LifecycleState::Running {
            log::debug!("collect of {:?} ignored in {:?}", hit.id, session.lifecycle());
            return CollectOutcome::NotRunning;
        }

        let Some(item) = self.registry.resolve(hit) else {
            log::debug!("collect target {:?} ({:?}) is not an item", hit.id, hit.name);
            return CollectOutcome::UnknownTarget;
        };
        let index = item.index();

        let next = session.next_index();
        if index != next {
            log::debug!("item {index} is out of order (next is {next})");
            return CollectOutcome::OutOfOrder;
        }

        let needed = required_view(index);
        if session.active_view() != needed {
            log::debug!(
                "item {index} needs the {} view, active is {}",
                needed.as_str(),
                session.active_view().as_str()
            );
            presenter.show_feedback(wrong_view_text(needed), self.feedback_seconds);
            return CollectOutcome::WrongView;
        }

        let next = session.advance_cursor();
        presenter.play_cue(Cue::Collected);
        log::info!("collected item {index} ({next}/{})", self.registry.len());

        let outcome = if next == self.registry.len() {
            lifecycle.on_item_sequence_exhausted(session);
            CollectOutcome::Exhausted
        } else {
            CollectOutcome::Collected
        };
        // Also runs when exhausted, so the last item is hidden.
        self.recompute_visibility(session, presenter);
        outcome
    }

    /// Hand a finalize request to the lifecycle if the finalize object
    /// reports itself ready.
    pub fn attempt_finalize(
        &mut self,
        ready: bool,
        session: &mut Session,
        lifecycle: &mut SessionLifecycle,
        presenter: &mut dyn Presentation,
    ) -> FinalizeOutcome {
        if !ready {
            log::debug!("finalize object not ready");
            return FinalizeOutcome::NotReady;
        }
        lifecycle.finalize(session, presenter)
    }

    /// Hide every item, then show the one at the cursor if the session is
    /// running and its required view is active.
    ///
    /// Always recomputed from scratch.
    pub fn recompute_visibility(&mut self, session: &Session, presenter: &mut dyn Presentation) {
        let next = session.next_index();
        let show = session.lifecycle() == LifecycleState::Running
            && next < self.registry.len()
            && required_view(next) == session.active_view();

        self.visible = None;
        for item in self.registry.iter() {
            let visible = show && item.index() == next;
            presenter.set_item_visible(item.id(), visible);
            if visible {
                self.visible = Some(item.id());
            }
        }
    }
}

impl ViewListener for ProgressionTracker {
    fn view_changed(&mut self, session: &Session, presenter: &mut dyn Presentation) {
        self.recompute_visibility(session, presenter);
    }
}

fn wrong_view_text(needed: ViewMode) -> &'static str {
    match needed {
        ViewMode::A => "Switch to the augmented view to collect this item.",
        ViewMode::B => "Switch to the virtual view to collect this item.",
    }
}
