use egui::{Align2, FontId, Pos2, Rangef, Rect, Sense, Vec2, vec2};
use fretboard_lib::{
    Action, KeyCommand, Layout, NUM_STRINGS, NoteColor, Visibility,
    layout::{
        CIRCLE_RADIUS, DIAGRAM_HEIGHT, ERROR_TEXT_POS, ERROR_WIDTH, FRET_HEIGHT, OFFSET_X, OFFSET_Y,
    },
};

use crate::{
    Context,
    resources::style,
    widget::{InputModifiers, NoteLabelEditor},
};

const KEY_BINDINGS: [(egui::Key, KeyCommand); 6] = [
    (egui::Key::Delete, KeyCommand::Delete),
    (egui::Key::Backspace, KeyCommand::Backspace),
    (egui::Key::B, KeyCommand::Color(NoteColor::Blue)),
    (egui::Key::G, KeyCommand::Color(NoteColor::Green)),
    (egui::Key::W, KeyCommand::Color(NoteColor::White)),
    (egui::Key::R, KeyCommand::Color(NoteColor::Red)),
];

const LABEL_FONT_SIZE: f32 = 14.0;
const MARKER_FONT_SIZE: f32 = 16.0;
const ERROR_FONT_SIZE: f32 = 20.0;

/// The diagram itself: fretboard, markers and notes, or the error message when the fret window
/// is invalid.
#[derive(Debug, Default)]
pub struct FretboardScreen {}

impl FretboardScreen {
    pub fn new() -> Self {
        Self {}
    }

    pub fn update(&mut self, ctx: &mut Context, ui: &mut egui::Ui) {
        egui::ScrollArea::horizontal().show(ui, |ui| match ctx.model.layout() {
            Some(layout) => self.fretboard_ui(ctx, ui, layout),
            None => self.error_ui(ctx, ui),
        });
    }

    fn fretboard_ui(&mut self, ctx: &mut Context, ui: &mut egui::Ui, layout: Layout) {
        let (response, painter) =
            ui.allocate_painter(vec2(layout.width(), layout.height()), Sense::click());
        let origin = response.rect.min;
        let to_screen = |[x, y]: [f32; 2]| origin + vec2(x, y);

        painter.rect_filled(response.rect, 0.0, style::BOARD_BACKGROUND);

        let fret_range = Rangef::new(origin.y + OFFSET_Y, origin.y + OFFSET_Y + FRET_HEIGHT);
        for x in layout.fret_lines() {
            painter.vline(origin.x + x, fret_range, style::fret_stroke());
        }

        for marker in layout.markers() {
            painter.text(
                to_screen(marker.pos),
                Align2::CENTER_CENTER,
                marker.fret.to_string(),
                FontId::proportional(MARKER_FONT_SIZE),
                style::MARKER_COLOR,
            );
        }

        let string_range = Rangef::new(
            origin.x + OFFSET_X,
            origin.x + OFFSET_X + layout.fretboard_width(),
        );
        for string in 0..NUM_STRINGS {
            painter.hline(
                string_range,
                origin.y + layout.string_y(string),
                style::string_stroke(layout.string_width(string)),
            );
        }

        let editing = ctx.ephemeral_state.label_edit.as_ref().map(|edit| edit.note);
        for id in ctx.model.visible_notes() {
            let visibility = ctx.model.effective_visibility(id);
            let opacity = visibility.opacity();
            if opacity == 0.0 {
                continue;
            }

            let center = to_screen(layout.note_center(id));
            let color = ctx.model.effective_color(id);
            painter.circle(
                center,
                CIRCLE_RADIUS,
                style::note_fill(color, opacity),
                if visibility == Visibility::Selected {
                    style::selected_stroke()
                } else {
                    style::note_outline(opacity)
                },
            );
            if editing != Some(id) {
                painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    ctx.model.label(id),
                    FontId::proportional(LABEL_FONT_SIZE),
                    style::note_text(color, opacity),
                );
            }
        }

        // Hidden notes are still hit, that's how they get revealed.
        let hovered_note = response
            .hover_pos()
            .and_then(|pos| layout.note_at(to_local(origin, pos)));
        if hovered_note.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if response.clicked() {
            ctx.commit_label_edit();

            let clicked_note = response
                .interact_pointer_pos()
                .and_then(|pos| layout.note_at(to_local(origin, pos)));
            match clicked_note {
                Some(id) => {
                    let modifiers = ui.input(InputModifiers::read_from_egui_input);
                    tracing::debug!("clicked note {id} with {modifiers:?}");
                    ctx.tracker.add(Action::SelectNote {
                        id,
                        edit_label: modifiers.contains(InputModifiers::EDIT_LABEL),
                    });
                }
                None => ctx.tracker.add(Action::ClearSelection),
            }
        }

        if let Some(edit) = ctx.ephemeral_state.label_edit.as_mut() {
            let center = to_screen(layout.note_center(edit.note));
            let rect = Rect::from_center_size(
                center,
                Vec2::new(CIRCLE_RADIUS * 4.0, LABEL_FONT_SIZE + 8.0),
            );
            let response = ui.put(
                rect,
                NoteLabelEditor::new(edit).font_size(LABEL_FONT_SIZE),
            );
            if response.lost_focus() {
                ctx.commit_label_edit();
            }
        } else {
            self.handle_keys(ctx, ui);
        }
    }

    fn handle_keys(&mut self, ctx: &mut Context, ui: &mut egui::Ui) {
        if ui.ctx().wants_keyboard_input() {
            return;
        }
        for (key, command) in KEY_BINDINGS {
            if !ui.input(|i| i.key_pressed(key)) {
                continue;
            }
            if let Some(action) = Action::from_key(ctx.model, command) {
                ctx.tracker.add(action);
            }
        }
    }

    fn error_ui(&mut self, ctx: &mut Context, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(vec2(ERROR_WIDTH, DIAGRAM_HEIGHT), Sense::hover());
        let Some(err) = ctx.model.error() else {
            return;
        };

        let [x, y] = ERROR_TEXT_POS;
        painter.text(
            response.rect.min + vec2(x, y),
            Align2::CENTER_CENTER,
            err.to_string(),
            FontId::proportional(ERROR_FONT_SIZE),
            style::ERROR_COLOR,
        );
    }
}

fn to_local(origin: Pos2, pos: Pos2) -> [f32; 2] {
    let local = pos - origin;
    [local.x, local.y]
}
