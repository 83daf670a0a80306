//! Diagram geometry, in diagram units (one unit is one SVG user unit / one egui point).

use smallvec::SmallVec;

use crate::{
    FretWindow, NoteId,
    note::{MAX_FRET, NUM_STRINGS},
};

pub const OFFSET_X: f32 = 30.0;
pub const OFFSET_Y: f32 = 30.0;
pub const FRET_WIDTH: f32 = 70.0;
pub const STRING_SPACING: f32 = 40.0;
pub const CIRCLE_RADIUS: f32 = 18.0;
pub const MIN_STRING_SIZE: f32 = 0.2;
pub const FRET_HEIGHT: f32 = (NUM_STRINGS - 1) as f32 * STRING_SPACING;
pub const DIAGRAM_HEIGHT: f32 = OFFSET_Y + FRET_HEIGHT + STRING_SPACING + OFFSET_Y;

/// Frets that get an inlay number below the board.
pub const MARKERS: [u8; 9] = [3, 5, 7, 9, 12, 15, 17, 19, 21];

pub const ERROR_WIDTH: f32 = 800.0;
pub const ERROR_TEXT_POS: [f32; 2] = [400.0, 140.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub fret: u8,
    pub pos: [f32; 2],
}

/// Geometry for a valid [`FretWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    start: u8,
    end: u8,
}

impl Layout {
    /// The window is assumed to be valid; out-of-range values are clamped.
    pub fn new(window: FretWindow) -> Self {
        let start = window.start.clamp(0, MAX_FRET as i32) as u8;
        let end = window.end.clamp(start as i32, MAX_FRET as i32) as u8;
        Self { start, end }
    }

    pub fn num_frets(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn fretboard_width(&self) -> f32 {
        FRET_WIDTH * self.num_frets() as f32
    }

    /// Total width of the diagram, including the margins.
    pub fn width(&self) -> f32 {
        self.fretboard_width() + 2.0 * OFFSET_X
    }

    pub fn height(&self) -> f32 {
        DIAGRAM_HEIGHT
    }

    /// x coordinates of the fret wires, one more than the number of columns.
    pub fn fret_lines(&self) -> impl Iterator<Item = f32> + use<> {
        (0..=self.num_frets()).map(|i| OFFSET_X + i as f32 * FRET_WIDTH)
    }

    pub fn string_y(&self, string: u8) -> f32 {
        OFFSET_Y + string as f32 * STRING_SPACING
    }

    /// Strings get thicker towards the low end.
    pub fn string_width(&self, string: u8) -> f32 {
        MIN_STRING_SIZE * (string as f32 + 1.0)
    }

    pub fn note_center(&self, id: NoteId) -> [f32; 2] {
        let column = id.fret as f32 - self.start as f32;
        [
            OFFSET_X + FRET_WIDTH / 2.0 + FRET_WIDTH * column,
            self.string_y(id.string),
        ]
    }

    pub fn markers(&self) -> SmallVec<[Marker; 9]> {
        MARKERS
            .into_iter()
            .filter(|&fret| fret > self.start && fret <= self.end)
            .map(|fret| Marker {
                fret,
                pos: [
                    OFFSET_X
                        + (fret - 1 - self.start) as f32 * FRET_WIDTH
                        + FRET_WIDTH / 2.0,
                    OFFSET_Y + FRET_HEIGHT + STRING_SPACING,
                ],
            })
            .collect()
    }

    /// The note whose circle contains `point`, if any.
    pub fn note_at(&self, [x, y]: [f32; 2]) -> Option<NoteId> {
        let column = ((x - OFFSET_X) / FRET_WIDTH).floor();
        let string = ((y - OFFSET_Y) / STRING_SPACING).round();
        if column < 0.0
            || column >= self.num_frets() as f32
            || string < 0.0
            || string >= NUM_STRINGS as f32
        {
            return None;
        }

        let id = NoteId::new(self.start + column as u8, string as u8);
        let [cx, cy] = self.note_center(id);
        let (dx, dy) = (x - cx, y - cy);
        (dx * dx + dy * dy <= CIRCLE_RADIUS * CIRCLE_RADIUS).then_some(id)
    }
}
