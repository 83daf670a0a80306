use fretboard_lib::NoteId;

// Ephemeral State: not persisted and not part of the diagram; open editors, pending dialogs, etc.
// This can be mutated directly by screens, unlike the model which only changes through actions.
#[derive(Debug, Default)]
pub struct EphemeralState {
    pub label_edit: Option<LabelEdit>,

    pub confirm_reset: bool,

    // result of the last export, shown in the top bar
    pub export_status: Option<Result<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEdit {
    pub note: NoteId,
    pub text: String,
    // focus and select-all only happen on the first frame
    pub started: bool,
}

impl LabelEdit {
    pub fn new(note: NoteId, text: impl Into<String>) -> Self {
        Self {
            note,
            text: text.into(),
            started: false,
        }
    }
}
