use egui::{Color32, Stroke, Visuals, ecolor::rgb_from_hsv};
use fretboard_lib::NoteColor;

pub fn set_style(ctx: &egui::Context) {
    ctx.set_visuals(fretboard_theme());
}

fn theme(factor: f32) -> Color32 {
    let rgb = rgb_from_hsv((
        0.08 + factor.powf(0.5) * 0.02,
        f32::min((1.0 - factor).powf(2.0) * 0.6, 1.0),
        f32::min(factor * factor * 2.0 + 0.05, 1.0),
    ));
    Color32::from_rgb(
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8,
    )
}

pub fn fretboard_theme() -> Visuals {
    Visuals {
        dark_mode: true,
        extreme_bg_color: theme(0.2),
        code_bg_color: theme(0.2),
        faint_bg_color: theme(0.25),
        warn_fg_color: Color32::from_rgb(255, 238, 0),
        error_fg_color: Color32::from_rgb(255, 119, 0),
        window_fill: theme(0.3),
        panel_fill: theme(0.35),
        ..Visuals::dark()
    }
}

// Diagram colors, independent of the egui theme so the screen matches the exported SVG.

pub const BOARD_BACKGROUND: Color32 = Color32::WHITE;
pub const FRET_COLOR: Color32 = Color32::BLACK;
pub const STRING_COLOR: Color32 = Color32::BLACK;
pub const MARKER_COLOR: Color32 = Color32::from_gray(80);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(200, 30, 30);

pub fn fret_stroke() -> Stroke {
    Stroke::new(2.0, FRET_COLOR)
}

// the exported widths are too thin to see on screen
pub fn string_stroke(width: f32) -> Stroke {
    Stroke::new(width * 2.5, STRING_COLOR)
}

pub fn selected_stroke() -> Stroke {
    Stroke::new(3.0, Color32::from_rgb(255, 165, 0))
}

pub fn note_fill(color: NoteColor, opacity: f32) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b).gamma_multiply(opacity)
}

pub fn note_text(color: NoteColor, opacity: f32) -> Color32 {
    let [r, g, b] = color.text_rgb();
    Color32::from_rgb(r, g, b).gamma_multiply(opacity)
}

pub fn note_outline(opacity: f32) -> Stroke {
    Stroke::new(1.0, Color32::BLACK.gamma_multiply(opacity))
}

#[cfg(test)]
mod tests {
    use egui::Color32;
    use fretboard_lib::NoteColor;

    use super::{note_fill, note_text};

    #[test]
    fn test_note_colors() {
        assert_eq!(note_fill(NoteColor::Red, 1.0), Color32::from_rgb(229, 57, 53));
        assert_eq!(note_fill(NoteColor::White, 1.0), Color32::WHITE);
        assert_eq!(note_fill(NoteColor::Blue, 0.0), Color32::TRANSPARENT);
        assert_eq!(note_text(NoteColor::Green, 0.0), Color32::TRANSPARENT);
    }
}
