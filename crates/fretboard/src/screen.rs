mod fretboard;
pub use fretboard::FretboardScreen;
