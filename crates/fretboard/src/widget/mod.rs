mod note_label;
pub use note_label::NoteLabelEditor;

bitflags::bitflags! {
    /// Input modifiers with a meaning in the diagram, so screens never look at raw keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InputModifiers: u8 {
        /// Open the label editor when selecting a note. Bound to ctrl (or cmd on macOS).
        const EDIT_LABEL = 1 << 0;
    }
}
impl InputModifiers {
    pub fn from_modifiers(modifiers: egui::Modifiers) -> Self {
        let mut this = Self::empty();
        // hardcoded for now
        if modifiers.ctrl || modifiers.command {
            this |= Self::EDIT_LABEL
        }
        this
    }

    pub fn read_from_egui_input(input: &egui::InputState) -> Self {
        Self::from_modifiers(input.modifiers)
    }
}
