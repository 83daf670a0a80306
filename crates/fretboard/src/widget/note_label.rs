use crate::state::LabelEdit;

// A single-line `egui::TextEdit` placed over a note. Grabs focus and selects everything on its
// first frame; the caller commits the text once the response reports `lost_focus()`.
// There is no cancel: Escape and Enter both end the edit and keep the text, even if it's empty.
pub struct NoteLabelEditor<'a> {
    edit: &'a mut LabelEdit,

    font_size: f32,
}

impl<'a> NoteLabelEditor<'a> {
    pub fn new(edit: &'a mut LabelEdit) -> Self {
        Self {
            edit,
            font_size: 14.0,
        }
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl egui::Widget for NoteLabelEditor<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let Self { edit, font_size } = self;

        let id = ui.make_persistent_id(("note label", egui::Id::from(edit.note)));

        if !edit.started {
            let mut text_edit_state = egui::text_edit::TextEditState::load(ui.ctx(), id)
                .unwrap_or_default();
            text_edit_state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    egui::text::CCursor::new(edit.text.chars().count()),
                )));
            text_edit_state.store(ui.ctx(), id);
        }

        let response = ui.add(
            egui::TextEdit::singleline(&mut edit.text)
                .id(id)
                .font(egui::FontId::proportional(font_size))
                .horizontal_align(egui::Align::Center)
                .desired_width(f32::INFINITY),
        );

        if !edit.started {
            response.request_focus();
            edit.started = true;
        }

        response
    }
}
