use crate::{FretWindowUpdate, FretboardModel, NoteColor, NoteId};

/// A user action on the diagram, as plain data. UI layers translate their events into these and
/// apply them to the model once the frame is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectNote {
        id: NoteId,
        /// Whether the UI should open the label editor after selecting.
        edit_label: bool,
    },
    ClearSelection,
    ApplyColor(NoteColor),
    ClearNote,
    SetLabel(String),
    SetFretWindow(FretWindowUpdate),
    ToggleGlobalVisibility,
    Reset,
}

impl Action {
    pub fn apply(self, model: &mut FretboardModel) {
        match self {
            Self::SelectNote { id, .. } => model.select_note(id),
            Self::ClearSelection => model.clear_selection(),
            Self::ApplyColor(color) => model.apply_color(color),
            Self::ClearNote => model.clear_note(),
            Self::SetLabel(text) => model.set_label(text),
            Self::SetFretWindow(update) => model.set_fret_window(update),
            Self::ToggleGlobalVisibility => model.toggle_global_visibility(),
            Self::Reset => model.reset(),
        }
    }

    /// The start fret field counts from 1, the model from 0.
    ///
    /// Saturates, since whatever was typed has to end up as an out-of-range window and not a panic.
    pub fn start_fret_field(value: i32) -> Self {
        Self::SetFretWindow(FretWindowUpdate::start(value.saturating_sub(1)))
    }

    pub fn end_fret_field(value: i32) -> Self {
        Self::SetFretWindow(FretWindowUpdate::end(value))
    }

    /// Key presses only mean something while a note is selected.
    pub fn from_key(model: &FretboardModel, key: KeyCommand) -> Option<Self> {
        model.selected()?;
        Some(match key {
            KeyCommand::Delete | KeyCommand::Backspace => Self::ClearNote,
            KeyCommand::Color(color) => Self::ApplyColor(color),
        })
    }
}

/// Keyboard shortcuts understood by the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Delete,
    Backspace,
    Color(NoteColor),
}

impl KeyCommand {
    /// Parses a logical key code such as `"KeyB"` or `"Delete"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "KeyB" => Self::Color(NoteColor::Blue),
            "KeyG" => Self::Color(NoteColor::Green),
            "KeyW" => Self::Color(NoteColor::White),
            "KeyR" => Self::Color(NoteColor::Red),
            _ => return None,
        })
    }
}
