use crate::{FretWindow, FretWindowError, GlobalVisibility, NoteColor, NoteId, Visibility};

/// Everything needed to draw the diagram as it currently looks, detached from the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub window: FretWindow,
    pub global_visibility: GlobalVisibility,
    pub error: Option<FretWindowError>,
    pub notes: Vec<NoteSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteSnapshot {
    pub id: NoteId,
    pub pitch_name: &'static str,
    pub label: String,
    pub color: NoteColor,
    pub visibility: Visibility,
}
