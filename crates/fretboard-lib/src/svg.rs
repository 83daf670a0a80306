//! Standalone SVG serialization of a [`Snapshot`].
//!
//! All styling is written inline so the file renders the same without any stylesheet.

use std::fmt::{self, Write};

use crate::{
    Layout, NoteColor,
    layout::{
        CIRCLE_RADIUS, DIAGRAM_HEIGHT, ERROR_TEXT_POS, ERROR_WIDTH, FRET_HEIGHT, FRET_WIDTH, OFFSET_X,
        OFFSET_Y,
    },
    note::NUM_STRINGS,
    snapshot::{NoteSnapshot, Snapshot},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const LINE_COLOR: &str = "#000000";
const ERROR_COLOR: &str = "#f44336";

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    write_svg(&mut out, snapshot)
        .unwrap_or_else(|_| unreachable!("writing to a String can't fail"));
    out
}

pub fn write_svg(out: &mut impl Write, snapshot: &Snapshot) -> fmt::Result {
    if let Some(err) = snapshot.error {
        return write_error(out, &err.to_string());
    }

    let layout = Layout::new(snapshot.window);
    let (width, height) = (layout.width(), layout.height());
    writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;

    // Frets, drawn as one zig-zag path like a pen going up and down the board.
    write!(out, r#"<path class="frets" d="M {OFFSET_X} {OFFSET_Y}"#)?;
    for (i, _) in layout.fret_lines().enumerate() {
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        write!(out, " v {} m {FRET_WIDTH} 0", direction * FRET_HEIGHT)?;
    }
    writeln!(
        out,
        r#"" style="fill: none; stroke: {LINE_COLOR}; stroke-width: 1;"/>"#
    )?;

    writeln!(out, r#"<g class="markers">"#)?;
    for marker in layout.markers() {
        let [x, y] = marker.pos;
        writeln!(
            out,
            r#"<text class="marker" x="{x}" y="{y}" style="fill: {LINE_COLOR}; text-anchor: middle; dominant-baseline: central;">{}</text>"#,
            marker.fret
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="strings">"#)?;
    for string in 0..NUM_STRINGS {
        writeln!(
            out,
            r#"<path class="string" d="M {OFFSET_X} {} h {}" style="stroke: {LINE_COLOR}; stroke-width: {};"/>"#,
            layout.string_y(string),
            layout.fretboard_width(),
            layout.string_width(string),
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="notes">"#)?;
    for note in &snapshot.notes {
        write_note(out, &layout, note)?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, "</svg>")
}

fn write_note(out: &mut impl Write, layout: &Layout, note: &NoteSnapshot) -> fmt::Result {
    let opacity = note.visibility.opacity();
    // invisible notes only bloat the file
    if opacity == 0.0 {
        return Ok(());
    }

    let [x, y] = layout.note_center(note.id);
    writeln!(
        out,
        r#"<g id="{}" class="note {} {}" transform="translate({x},{y})" style="opacity: {opacity};">"#,
        note.id,
        note.color.name(),
        note.visibility.name(),
    )?;
    writeln!(
        out,
        r#"<circle r="{CIRCLE_RADIUS}" style="fill: {}; stroke: {LINE_COLOR}; stroke-width: 1;"/>"#,
        note.color.hex()
    )?;
    writeln!(
        out,
        r#"<text data-note="{}" style="fill: {}; text-anchor: middle; dominant-baseline: central;">{}</text>"#,
        note.pitch_name,
        text_hex(note.color),
        Escaped(&note.label),
    )?;
    writeln!(out, "</g>")
}

fn write_error(out: &mut impl Write, message: &str) -> fmt::Result {
    let height = DIAGRAM_HEIGHT;
    let [x, y] = ERROR_TEXT_POS;
    writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{ERROR_WIDTH}" height="{height}" viewBox="0 0 {ERROR_WIDTH} {height}">"#
    )?;
    writeln!(
        out,
        r#"<text class="error" x="{x}" y="{y}" style="fill: {ERROR_COLOR}; text-anchor: middle;">{}</text>"#,
        Escaped(message)
    )?;
    writeln!(out, "</svg>")
}

fn text_hex(color: NoteColor) -> String {
    let [r, g, b] = color.text_rgb();
    format!("#{r:02x}{g:02x}{b:02x}")
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{FretWindow, FretWindowUpdate, FretboardModel, NoteColor, NoteId};

    use super::render;

    #[test]
    fn test_render_diagram() {
        let mut model = FretboardModel::new(FretWindow::new(0, 3));
        model.select_note(NoteId::new(2, 0));
        model.apply_color(NoteColor::Red);
        model.set_label("<R&B>");

        let svg = render(&model.export_snapshot());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="270""#));
        assert!(svg.contains(r#"<g id="f2-s0" class="note red visible""#));
        assert!(svg.contains("&lt;R&amp;B&gt;"));
        assert!(!svg.contains("<R&B>"));
        assert!(!svg.contains("selected"));
        // 3rd fret inlay
        assert!(svg.contains(r#"class="marker""#));
        // transparent by default, so every note is still written
        assert_eq!(svg.matches(r#"<g id="#).count(), 18);
    }

    #[test]
    fn test_hidden_notes_are_omitted() {
        let mut model = FretboardModel::new(FretWindow::new(0, 2));
        model.select_note(NoteId::new(0, 0));
        model.toggle_global_visibility();

        let svg = render(&model.export_snapshot());
        assert_eq!(svg.matches(r#"<g id="#).count(), 1);
        assert!(svg.contains(r#"id="f0-s0""#));
    }

    #[test]
    fn test_render_error() {
        let mut model = FretboardModel::default();
        model.set_fret_window(FretWindowUpdate::both(5, 3));

        let svg = render(&model.export_snapshot());
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains("End fret must not be smaller than start fret!"));
        assert!(!svg.contains("notes"));
    }
}
