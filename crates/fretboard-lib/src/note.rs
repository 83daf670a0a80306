use std::fmt;

/// Semitone offset of each open string, low E first.
pub const OPEN_STRING_OFFSETS: [u8; 6] = [24, 19, 15, 10, 5, 0];

pub const NOTE_NAMES: [&str; 12] = [
    "E", "F", "F#", "G", "G#", "A", "A#", "B", "C", "C#", "D", "D#",
];

pub const NUM_STRINGS: u8 = OPEN_STRING_OFFSETS.len() as u8;

/// Highest fret boundary a window may end at. Notes live on frets `0..MAX_FRET`.
pub const MAX_FRET: u8 = 22;

/// A note position on the fretboard. Both indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId {
    pub fret: u8,
    pub string: u8,
}

impl NoteId {
    pub const fn new(fret: u8, string: u8) -> Self {
        Self { fret, string }
    }

    pub fn is_valid(self) -> bool {
        self.fret < MAX_FRET && self.string < NUM_STRINGS
    }

    /// Name of the pitch sounding at this position, e.g. `"F#"`.
    ///
    /// The `+ 1` is there because fret index 0 is the first fretted column, not the open string.
    pub fn pitch_name(self) -> &'static str {
        let interval =
            OPEN_STRING_OFFSETS[self.string as usize] as usize + self.fret as usize + 1;
        NOTE_NAMES[interval % 12]
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}-s{}", self.fret, self.string)
    }
}

#[cfg(feature = "egui")]
impl From<NoteId> for egui::Id {
    fn from(value: NoteId) -> Self {
        egui::Id::new(("fretboard_note", value.fret, value.string))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteColor {
    #[default]
    White,
    Red,
    Green,
    Blue,
}

impl NoteColor {
    pub const ALL: [NoteColor; 4] = [Self::White, Self::Red, Self::Green, Self::Blue];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::White => [255, 255, 255],
            Self::Red => [229, 57, 53],
            Self::Green => [67, 160, 71],
            Self::Blue => [30, 136, 229],
        }
    }

    /// Text color that stays readable on top of [`Self::rgb`].
    pub const fn text_rgb(self) -> [u8; 3] {
        match self {
            Self::White => [0, 0, 0],
            Self::Red | Self::Green | Self::Blue => [255, 255, 255],
        }
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Hidden,
    Transparent,
    // Never stored in an override; only ever produced by `FretboardModel::effective_visibility`.
    Selected,
}

impl Visibility {
    pub const fn opacity(self) -> f32 {
        match self {
            Self::Visible | Self::Selected => 1.0,
            Self::Transparent => 0.3,
            Self::Hidden => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Transparent => "transparent",
            Self::Selected => "selected",
        }
    }
}

/// Fallback visibility for notes that aren't explicitly shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum GlobalVisibility {
    Hidden,
    #[default]
    Transparent,
}

impl GlobalVisibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Transparent,
            Self::Transparent => Self::Hidden,
        }
    }
}

impl From<GlobalVisibility> for Visibility {
    fn from(value: GlobalVisibility) -> Self {
        match value {
            GlobalVisibility::Hidden => Visibility::Hidden,
            GlobalVisibility::Transparent => Visibility::Transparent,
        }
    }
}
