use ahash::HashMap;

use crate::{
    FretWindow, FretWindowError, FretWindowUpdate, GlobalVisibility, Layout, NoteColor, NoteId,
    Visibility,
    note::NUM_STRINGS,
    snapshot::{NoteSnapshot, Snapshot},
};

/// User-set deviations from a note's defaults. `None` fields fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteOverride {
    pub color: Option<NoteColor>,
    // never `Visibility::Selected`, the selection is tracked separately
    pub visibility: Option<Visibility>,
    pub label: Option<String>,
}

impl NoteOverride {
    fn visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
            ..Default::default()
        }
    }

    fn merge(&mut self, update: NoteOverride) {
        let NoteOverride {
            color,
            visibility,
            label,
        } = update;
        if color.is_some() {
            self.color = color;
        }
        if visibility.is_some() {
            self.visibility = visibility;
        }
        if label.is_some() {
            self.label = label;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Error(FretWindowError),
}

/// State of one fretboard diagram and the rules for changing it.
///
/// Every method here is infallible: operations that need a selection do nothing without one, and
/// a bad fret window is recorded as [`Status::Error`] instead of being rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct FretboardModel {
    window: FretWindow,
    status: Status,

    // Sparse: only notes the user has interacted with have an entry. Keyed by absolute position so
    // edits survive the window being moved away and back.
    overrides: HashMap<NoteId, NoteOverride>,

    selected: Option<NoteId>,
    global_visibility: GlobalVisibility,
}

impl Default for FretboardModel {
    fn default() -> Self {
        Self::new(FretWindow::default())
    }
}

impl FretboardModel {
    pub fn new(window: FretWindow) -> Self {
        Self::with_visibility(window, GlobalVisibility::default())
    }

    pub fn with_visibility(window: FretWindow, global_visibility: GlobalVisibility) -> Self {
        let status = match window.validate() {
            Ok(()) => Status::Ready,
            Err(err) => {
                tracing::info!(?window, "initial fret window is invalid: {err}");
                Status::Error(err)
            }
        };
        Self {
            window,
            status,
            overrides: HashMap::default(),
            selected: None,
            global_visibility,
        }
    }

    pub fn window(&self) -> FretWindow {
        self.window
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn is_ready(&self) -> bool {
        self.status == Status::Ready
    }
    pub fn error(&self) -> Option<FretWindowError> {
        match self.status {
            Status::Ready => None,
            Status::Error(err) => Some(err),
        }
    }
    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }
    pub fn global_visibility(&self) -> GlobalVisibility {
        self.global_visibility
    }

    /// Geometry of the current window, or `None` while the window is invalid.
    pub fn layout(&self) -> Option<Layout> {
        self.is_ready().then(|| Layout::new(self.window))
    }

    /// Number of fret columns currently drawn.
    pub fn num_frets(&self) -> usize {
        self.layout().map_or(0, |layout| layout.num_frets())
    }

    /// Every note currently drawn, fret-major. Empty while the window is invalid.
    pub fn visible_notes(&self) -> impl Iterator<Item = NoteId> + use<> {
        let frets = match self.layout() {
            Some(_) => self.window.start as u8..self.window.end as u8,
            None => 0..0,
        };
        frets.flat_map(|fret| (0..NUM_STRINGS).map(move |string| NoteId::new(fret, string)))
    }

    pub fn visible_note_count(&self) -> usize {
        self.num_frets() * NUM_STRINGS as usize
    }

    pub fn is_drawn(&self, id: NoteId) -> bool {
        self.is_ready() && id.is_valid() && self.window.contains_fret(id.fret)
    }

    pub fn override_for(&self, id: NoteId) -> Option<&NoteOverride> {
        self.overrides.get(&id)
    }

    /// Number of notes with stored overrides, including ones outside the window.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn effective_visibility(&self, id: NoteId) -> Visibility {
        if self.selected == Some(id) {
            return Visibility::Selected;
        }
        self.override_for(id)
            .and_then(|o| o.visibility)
            .unwrap_or(self.global_visibility.into())
    }

    pub fn effective_color(&self, id: NoteId) -> NoteColor {
        self.override_for(id)
            .and_then(|o| o.color)
            .unwrap_or_default()
    }

    pub fn label(&self, id: NoteId) -> &str {
        self.override_for(id)
            .and_then(|o| o.label.as_deref())
            .unwrap_or(id.pitch_name())
    }

    fn update_note(&mut self, id: NoteId, update: NoteOverride) {
        self.overrides.entry(id).or_default().merge(update);
    }

    pub fn set_fret_window(&mut self, update: FretWindowUpdate) {
        self.clear_selection();

        let window = self.window.merge(update);
        // stored even when invalid so the input fields keep showing what was typed
        self.window = window;

        self.status = match window.validate() {
            Ok(()) => {
                tracing::debug!(?window, "fret window changed");
                Status::Ready
            }
            Err(err) => {
                tracing::info!(?window, "rejected fret window: {err}");
                Status::Error(err)
            }
        };
    }

    pub fn select_note(&mut self, id: NoteId) {
        if !self.is_drawn(id) {
            tracing::debug!("ignoring selection of {id}, it isn't drawn");
            return;
        }
        if let Some(prev) = self.selected {
            if prev == id {
                return;
            }
            self.update_note(prev, NoteOverride::visibility(Visibility::Visible));
        }
        self.selected = Some(id);
        tracing::debug!("selected {id}");
    }

    /// Deselects the current note, which always leaves it visible.
    pub fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            self.update_note(id, NoteOverride::visibility(Visibility::Visible));
            tracing::debug!("deselected {id}");
        }
    }

    pub fn apply_color(&mut self, color: NoteColor) {
        if let Some(id) = self.selected {
            self.update_note(
                id,
                NoteOverride {
                    color: Some(color),
                    ..Default::default()
                },
            );
        }
    }

    /// Puts the selected note back to its default look and deselects it.
    pub fn clear_note(&mut self) {
        if let Some(id) = self.selected.take() {
            self.update_note(
                id,
                NoteOverride {
                    color: Some(NoteColor::White),
                    visibility: Some(self.global_visibility.into()),
                    label: Some(id.pitch_name().to_owned()),
                },
            );
            tracing::debug!("cleared {id}");
        }
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        if let Some(id) = self.selected {
            self.update_note(
                id,
                NoteOverride {
                    label: Some(text.into()),
                    ..Default::default()
                },
            );
        }
    }

    /// Flips the global mode. Notes that are explicitly visible or currently selected keep their
    /// look; everything else follows the new mode.
    pub fn toggle_global_visibility(&mut self) {
        self.global_visibility = self.global_visibility.toggled();
        let mode = Visibility::from(self.global_visibility);

        let selected = self.selected;
        for (&id, note) in self.overrides.iter_mut() {
            if Some(id) == selected {
                continue;
            }
            // `None` already falls back to the global mode
            if let Some(Visibility::Hidden | Visibility::Transparent) = note.visibility {
                note.visibility = Some(mode);
            }
        }
        tracing::debug!(mode = ?self.global_visibility, "toggled global visibility");
    }

    pub fn reset(&mut self) {
        self.clear_selection();
        self.overrides.clear();
        tracing::debug!("reset diagram");
    }

    /// Deselects (so nothing is frozen in the selected style) and describes what is drawn.
    pub fn export_snapshot(&mut self) -> Snapshot {
        self.clear_selection();

        let notes = self
            .visible_notes()
            .map(|id| NoteSnapshot {
                id,
                pitch_name: id.pitch_name(),
                label: self.label(id).to_owned(),
                color: self.effective_color(id),
                visibility: self.effective_visibility(id),
            })
            .collect();

        Snapshot {
            window: self.window,
            global_visibility: self.global_visibility,
            error: self.error(),
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        FretWindow, FretWindowError, FretWindowUpdate, GlobalVisibility, NoteColor, NoteId,
        Visibility,
    };

    use super::{FretboardModel, Status};

    fn selected_count(model: &FretboardModel) -> usize {
        model
            .visible_notes()
            .filter(|&id| model.effective_visibility(id) == Visibility::Selected)
            .count()
    }

    #[test]
    fn test_construct() {
        let model = FretboardModel::default();
        assert_eq!(model.status(), Status::Ready);
        assert_eq!(model.window(), FretWindow::new(0, 12));
        assert_eq!(model.visible_note_count(), 72);
        assert_eq!(model.visible_notes().count(), 72);
        assert_eq!(model.override_count(), 0);

        let id = NoteId::new(0, 5);
        assert_eq!(model.label(id), "F");
        assert_eq!(model.effective_color(id), NoteColor::White);
        assert_eq!(model.effective_visibility(id), Visibility::Transparent);

        let broken = FretboardModel::new(FretWindow::new(5, 3));
        assert_eq!(broken.error(), Some(FretWindowError::EndBeforeStart));
        assert_eq!(broken.visible_notes().count(), 0);
        assert!(broken.layout().is_none());
    }

    #[test]
    fn test_every_valid_window_note_count() {
        let mut model = FretboardModel::default();
        for start in 0..22 {
            for end in start + 1..=(start + 12).min(22) {
                model.set_fret_window(FretWindowUpdate::both(start, end));
                assert!(model.is_ready(), "{start}..{end}");
                assert_eq!(model.visible_notes().count(), ((end - start) * 6) as usize);
                assert_eq!(model.visible_note_count(), ((end - start) * 6) as usize);
                assert!(model.visible_notes().all(|id| model.is_drawn(id)));
            }
        }
    }

    #[test]
    fn test_invalid_windows_are_recorded() {
        let mut model = FretboardModel::default();

        model.set_fret_window(FretWindowUpdate::both(5, 3));
        assert_eq!(model.error(), Some(FretWindowError::EndBeforeStart));
        assert_eq!(
            model.error().map(|e| e.to_string()).as_deref(),
            Some("End fret must not be smaller than start fret!")
        );
        assert_eq!(model.window(), FretWindow::new(5, 3));
        assert_eq!(model.visible_notes().count(), 0);

        model.set_fret_window(FretWindowUpdate::both(0, 20));
        assert_eq!(model.error(), Some(FretWindowError::TooWide));
        assert_eq!(model.window(), FretWindow::new(0, 20));

        model.set_fret_window(FretWindowUpdate::both(0, 12));
        model.set_fret_window(FretWindowUpdate::start(-1));
        assert_eq!(model.error(), Some(FretWindowError::OutOfRange));
        assert_eq!(model.window(), FretWindow::new(-1, 12));

        // fixing the other field recovers
        model.set_fret_window(FretWindowUpdate::start(2));
        assert_eq!(model.status(), Status::Ready);
        assert_eq!(model.num_frets(), 10);
    }

    #[test]
    fn test_selection_moves() {
        let mut model = FretboardModel::default();
        let a = NoteId::new(2, 3);
        let b = NoteId::new(4, 1);

        model.select_note(a);
        assert_eq!(model.selected(), Some(a));
        assert_eq!(model.effective_visibility(a), Visibility::Selected);
        assert_eq!(selected_count(&model), 1);
        // selecting alone doesn't store anything
        assert_eq!(model.override_count(), 0);
        assert_eq!(model.override_for(a), None);

        model.select_note(b);
        assert_eq!(model.selected(), Some(b));
        assert_eq!(model.effective_visibility(a), Visibility::Visible);
        assert_eq!(model.effective_visibility(b), Visibility::Selected);
        assert_eq!(selected_count(&model), 1);
        assert_eq!(model.override_count(), 1);

        model.select_note(b);
        assert_eq!(model.selected(), Some(b));
        assert_eq!(selected_count(&model), 1);

        model.clear_selection();
        assert_eq!(model.selected(), None);
        assert_eq!(model.effective_visibility(b), Visibility::Visible);
        assert_eq!(selected_count(&model), 0);

        // no-op without a selection
        model.clear_selection();
        assert_eq!(model.selected(), None);
    }

    #[test]
    fn test_select_outside_window_is_ignored() {
        let mut model = FretboardModel::new(FretWindow::new(3, 8));
        model.select_note(NoteId::new(1, 0));
        model.select_note(NoteId::new(8, 0));
        model.select_note(NoteId::new(4, 6));
        assert_eq!(model.selected(), None);
        assert_eq!(model.override_count(), 0);
    }

    #[test]
    fn test_selection_gated_operations() {
        let mut model = FretboardModel::default();
        let before = model.clone();

        model.apply_color(NoteColor::Red);
        model.set_label("root");
        model.clear_note();
        assert_eq!(model, before);

        let id = NoteId::new(7, 2);
        model.select_note(id);
        model.apply_color(NoteColor::Red);
        model.set_label("root");
        assert_eq!(model.selected(), Some(id));
        assert_eq!(model.effective_color(id), NoteColor::Red);
        assert_eq!(model.label(id), "root");
        assert_eq!(model.effective_visibility(id), Visibility::Selected);

        model.set_label("");
        assert_eq!(model.label(id), "");
    }

    #[test]
    fn test_clear_note() {
        let mut model = FretboardModel::default();
        let id = NoteId::new(0, 5);
        model.select_note(id);
        model.apply_color(NoteColor::Blue);
        model.set_label("x");
        model.clear_note();

        assert_eq!(model.selected(), None);
        assert_eq!(model.label(id), "F");
        assert_eq!(model.effective_color(id), NoteColor::White);
        assert_eq!(model.effective_visibility(id), Visibility::Transparent);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut model = FretboardModel::default();
        let untouched = NoteId::new(1, 1);
        let shown = NoteId::new(2, 2);
        let cleared = NoteId::new(3, 3);
        let selected = NoteId::new(4, 4);

        model.select_note(shown);
        model.select_note(cleared);
        model.clear_note();
        model.select_note(selected);

        model.toggle_global_visibility();
        assert_eq!(model.global_visibility(), GlobalVisibility::Hidden);
        assert_eq!(model.effective_visibility(untouched), Visibility::Hidden);
        assert_eq!(model.effective_visibility(cleared), Visibility::Hidden);
        assert_eq!(model.effective_visibility(shown), Visibility::Visible);
        assert_eq!(model.effective_visibility(selected), Visibility::Selected);

        model.toggle_global_visibility();
        assert_eq!(model.global_visibility(), GlobalVisibility::Transparent);
        assert_eq!(model.effective_visibility(untouched), Visibility::Transparent);
        assert_eq!(model.effective_visibility(cleared), Visibility::Transparent);
        assert_eq!(model.effective_visibility(shown), Visibility::Visible);

        // deselecting always reveals, never drops back to the global mode
        model.clear_selection();
        assert_eq!(model.effective_visibility(selected), Visibility::Visible);
    }

    #[test]
    fn test_toggle_treats_default_and_untouched_alike() {
        let mut model = FretboardModel::default();
        let untouched = NoteId::new(0, 0);
        let touched = NoteId::new(0, 1);

        model.select_note(touched);
        model.clear_note();
        assert_eq!(
            model.effective_visibility(untouched),
            model.effective_visibility(touched)
        );

        for _ in 0..3 {
            model.toggle_global_visibility();
            assert_eq!(
                model.effective_visibility(untouched),
                model.effective_visibility(touched)
            );
        }
    }

    #[test]
    fn test_overrides_survive_window_changes() {
        let mut model = FretboardModel::default();
        let id = NoteId::new(10, 0);
        model.select_note(id);
        model.apply_color(NoteColor::Green);

        model.set_fret_window(FretWindowUpdate::start(12));
        assert_eq!(model.error(), Some(FretWindowError::EndBeforeStart));
        assert_eq!(model.selected(), None);

        model.set_fret_window(FretWindowUpdate::end(20));
        assert!(model.is_ready());
        assert!(!model.is_drawn(id));

        model.set_fret_window(FretWindowUpdate::both(5, 15));
        assert!(model.is_drawn(id));
        assert_eq!(model.effective_color(id), NoteColor::Green);
        assert_eq!(model.effective_visibility(id), Visibility::Visible);
    }

    #[test]
    fn test_reset() {
        let window = FretWindow::new(4, 15);
        let mut model = FretboardModel::new(window);
        model.select_note(NoteId::new(5, 0));
        model.apply_color(NoteColor::Red);
        model.set_label("R");
        model.select_note(NoteId::new(6, 3));
        model.clear_note();
        model.select_note(NoteId::new(7, 2));

        model.reset();
        assert_eq!(model, FretboardModel::new(window));

        // the global mode is kept across a reset
        model.toggle_global_visibility();
        model.select_note(NoteId::new(5, 5));
        model.reset();
        assert_eq!(
            model,
            FretboardModel::with_visibility(window, GlobalVisibility::Hidden)
        );
    }

    #[test]
    fn test_export_snapshot() {
        let mut model = FretboardModel::new(FretWindow::new(0, 2));
        let id = NoteId::new(1, 2);
        model.select_note(id);
        model.apply_color(NoteColor::Blue);

        let snapshot = model.export_snapshot();
        assert_eq!(model.selected(), None);
        assert_eq!(snapshot.error, None);
        assert_eq!(snapshot.notes.len(), 12);
        assert!(
            snapshot
                .notes
                .iter()
                .all(|n| n.visibility != Visibility::Selected)
        );

        let note = snapshot
            .notes
            .iter()
            .find(|n| n.id == id)
            .expect("note should be in the snapshot");
        assert_eq!(note.color, NoteColor::Blue);
        assert_eq!(note.visibility, Visibility::Visible);
        assert_eq!(note.label, id.pitch_name());
        assert_eq!(snapshot.notes[0].id, NoteId::new(0, 0));
        assert_eq!(snapshot.notes[6].id, NoteId::new(1, 0));
    }
}
