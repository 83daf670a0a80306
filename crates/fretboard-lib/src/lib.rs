mod note;
pub use note::{
    GlobalVisibility, MAX_FRET, NOTE_NAMES, NUM_STRINGS, NoteColor, NoteId, OPEN_STRING_OFFSETS,
    Visibility,
};
mod window;
pub use window::{FretWindow, FretWindowError, FretWindowUpdate, MAX_DISPLAYED_FRETS};
mod model;
pub use model::{FretboardModel, NoteOverride, Status};
mod action;
pub use action::{Action, KeyCommand};
pub mod layout;
pub use layout::Layout;
mod snapshot;
pub use snapshot::{NoteSnapshot, Snapshot};
pub mod svg;
