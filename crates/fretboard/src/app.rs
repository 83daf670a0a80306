use std::path::PathBuf;

use fretboard_lib::{Action, FretboardModel};

use crate::{
    Context, EphemeralState,
    config::Config,
    context::ContextResult,
    export,
    resources::style,
    screen::FretboardScreen,
    state::LabelEdit,
};

const HELP_TEXT: &str = "Click a note to select it. Ctrl+click to edit its label. \
    B/G/W/R recolor the selected note, Delete or Backspace clears it.";

pub struct FretboardApp {
    model: FretboardModel,
    ephemeral_state: EphemeralState,
    screen: FretboardScreen,

    export_path: PathBuf,
}

impl FretboardApp {
    pub fn new(cc: &eframe::CreationContext, config: Config) -> Self {
        style::set_style(&cc.egui_ctx);

        let model = FretboardModel::with_visibility(config.initial_window(), config.visibility);
        tracing::debug!("starting with {:?}", model.window());

        Self {
            model,
            ephemeral_state: EphemeralState::default(),
            screen: FretboardScreen::new(),

            export_path: config.export_path,
        }
    }

    fn frame_finished(&mut self, result: ContextResult) {
        let ContextResult {
            actions,
            export_requested,
        } = result;

        let mut edit_requested = None;
        for action in actions {
            if let Action::SelectNote {
                id,
                edit_label: true,
            } = action
            {
                edit_requested = Some(id);
            }
            action.apply(&mut self.model);
        }

        if export_requested {
            self.export();
        }

        // the editor only makes sense while its note is still the selected one
        let selected = self.model.selected();
        if let Some(id) = edit_requested.filter(|&id| selected == Some(id)) {
            self.ephemeral_state.label_edit = Some(LabelEdit::new(id, self.model.label(id)));
        }
        if self
            .ephemeral_state
            .label_edit
            .as_ref()
            .is_some_and(|edit| selected != Some(edit.note))
        {
            self.ephemeral_state.label_edit = None;
        }
    }

    fn export(&mut self) {
        let path = &self.export_path;
        self.ephemeral_state.export_status = Some(match export::save_svg(&mut self.model, path) {
            Ok(bytes) => Ok(format!("Saved {} ({bytes} bytes)", path.display())),
            Err(err) => {
                tracing::error!("export failed: {err:#}");
                Err(format!("{err:#}"))
            }
        });
    }
}

impl eframe::App for FretboardApp {
    fn update(&mut self, egui_ctx: &egui::Context, _egui_frame: &mut eframe::Frame) {
        let mut ctx = Context::new(&self.model, &mut self.ephemeral_state);

        egui::TopBottomPanel::top("top_panel").show(egui_ctx, |ui| {
            ui.horizontal(|ui| top_bar(&mut ctx, ui));
        });
        egui::TopBottomPanel::bottom("help_panel").show(egui_ctx, |ui| {
            ui.weak(HELP_TEXT);
        });

        if ctx.ephemeral_state.confirm_reset {
            reset_dialog(&mut ctx, egui_ctx);
        }

        egui::CentralPanel::default().show(egui_ctx, |ui| {
            self.screen.update(&mut ctx, ui);
        });

        let result = ctx.finish();
        self.frame_finished(result);
    }
}

fn top_bar(ctx: &mut Context, ui: &mut egui::Ui) {
    let (mut start, mut end) = ctx.model.window().field_values();

    ui.label("Start fret:");
    if ui.add(egui::DragValue::new(&mut start)).changed() {
        ctx.tracker.add(Action::start_fret_field(start));
    }

    ui.label("End fret:");
    if ui.add(egui::DragValue::new(&mut end)).changed() {
        ctx.tracker.add(Action::end_fret_field(end));
    }

    ui.separator();

    if ui.button("Toggle visibility").clicked() {
        ctx.tracker.add(Action::ToggleGlobalVisibility);
    }
    if ui.button("Reset…").clicked() {
        ctx.ephemeral_state.confirm_reset = true;
    }
    if ui.button("Save SVG").clicked() {
        ctx.tracker.request_export();
    }

    ui.separator();

    if let Some(err) = ctx.model.error() {
        ui.colored_label(ui.visuals().error_fg_color, err.to_string());
    } else {
        match &ctx.ephemeral_state.export_status {
            Some(Ok(message)) => {
                ui.label(message.as_str());
            }
            Some(Err(message)) => {
                ui.colored_label(ui.visuals().warn_fg_color, message.as_str());
            }
            None => {}
        }
    }
}

fn reset_dialog(ctx: &mut Context, egui_ctx: &egui::Context) {
    egui::Window::new("Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(egui_ctx, |ui| {
            ui.label("Do you really want to reset your diagram?");
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    ctx.tracker.add(Action::Reset);
                    ctx.ephemeral_state.confirm_reset = false;
                }
                if ui.button("Cancel").clicked() {
                    ctx.ephemeral_state.confirm_reset = false;
                }
            });
        });
}
