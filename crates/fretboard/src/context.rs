use fretboard_lib::{Action, FretboardModel};
use smallvec::SmallVec;

use crate::EphemeralState;

pub struct Context<'a> {
    // Model: the diagram itself. This can't be mutated directly while drawing; changes are queued
    // on the tracker and applied once the frame is finished.
    pub model: &'a FretboardModel,

    // Ephemeral State: see `EphemeralState`. Mutable directly and not tracked.
    pub ephemeral_state: &'a mut EphemeralState,

    pub tracker: ActionTracker,
}

impl<'a> Context<'a> {
    pub fn new(model: &'a FretboardModel, ephemeral_state: &'a mut EphemeralState) -> Self {
        Self {
            model,
            ephemeral_state,
            tracker: ActionTracker::new(),
        }
    }

    /// Ends any label edit in progress, committing whatever text it holds.
    pub fn commit_label_edit(&mut self) {
        if let Some(edit) = self.ephemeral_state.label_edit.take() {
            self.tracker.commit_label(edit.text);
        }
    }

    pub fn finish(self) -> ContextResult {
        let ActionTracker {
            actions,
            export_requested,
        } = self.tracker;
        ContextResult {
            actions,
            export_requested,
        }
    }
}

#[derive(Debug, Default)]
pub struct ActionTracker {
    actions: SmallVec<[Action; 4]>,
    export_requested: bool,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, action: Action) {
        self.actions.push(action);
    }
    /// A label edit belongs to the note that was selected when the frame started, so it runs
    /// before anything else queued this frame.
    pub fn commit_label(&mut self, text: String) {
        self.actions.insert(0, Action::SetLabel(text));
    }
    pub fn request_export(&mut self) {
        self.export_requested = true;
    }
}

pub struct ContextResult {
    pub actions: SmallVec<[Action; 4]>,
    pub export_requested: bool,
}
