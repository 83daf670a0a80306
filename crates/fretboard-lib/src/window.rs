use thiserror::Error;

use crate::note::MAX_FRET;

/// Maximum number of fret columns shown at once.
pub const MAX_DISPLAYED_FRETS: i32 = 12;

/// Half-open range of fret columns `start..end` that is drawn.
///
/// Fields are signed and unchecked so that whatever the user typed can be stored and shown back,
/// even when it's invalid. Use [`FretWindow::validate`] before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FretWindow {
    pub start: i32,
    pub end: i32,
}

impl Default for FretWindow {
    fn default() -> Self {
        Self { start: 0, end: 12 }
    }
}

impl FretWindow {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn validate(self) -> Result<(), FretWindowError> {
        let Self { start, end } = self;
        let max = MAX_FRET as i32;
        if start < 0 || start > max || end < 1 || end > max {
            return Err(FretWindowError::OutOfRange);
        }
        if end <= start {
            return Err(FretWindowError::EndBeforeStart);
        }
        if end - start > MAX_DISPLAYED_FRETS {
            return Err(FretWindowError::TooWide);
        }
        Ok(())
    }

    pub fn is_valid(self) -> bool {
        self.validate().is_ok()
    }

    /// Number of fret columns. Meaningless (possibly negative) for invalid windows.
    pub fn num_frets(self) -> i32 {
        self.end.saturating_sub(self.start)
    }

    /// `(start, end)` as the user-facing fields show them; the start field counts from 1.
    pub fn field_values(self) -> (i32, i32) {
        (self.start.saturating_add(1), self.end)
    }

    pub fn contains_fret(self, fret: u8) -> bool {
        (self.start..self.end).contains(&(fret as i32))
    }

    pub fn merge(self, update: FretWindowUpdate) -> Self {
        Self {
            start: update.start.unwrap_or(self.start),
            end: update.end.unwrap_or(self.end),
        }
    }
}

/// Partial window change; missing fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FretWindowUpdate {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl FretWindowUpdate {
    pub fn start(start: i32) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn end(end: i32) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn both(start: i32, end: i32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FretWindowError {
    #[error("Invalid fret value(s)!")]
    OutOfRange,
    #[error("End fret must not be smaller than start fret!")]
    EndBeforeStart,
    #[error("Maximal number of displayable frets is 12, e.g., 1st to 12th or 4th to 15th!")]
    TooWide,
}
