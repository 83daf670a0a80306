use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use fretboard_lib::{FretboardModel, svg};

/// Writes the diagram as an SVG file. Deselects first, like any export. Returns the number of
/// bytes written.
pub fn save_svg(model: &mut FretboardModel, path: &Path) -> Result<usize> {
    let snapshot = model.export_snapshot();
    let contents = svg::render(&snapshot);

    fs::write(path, &contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(
        "exported {} notes to {}",
        snapshot.notes.len(),
        path.display()
    );

    Ok(contents.len())
}
