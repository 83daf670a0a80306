use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, bail};
use fretboard_lib::{FretWindow, GlobalVisibility};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "fretboard.toml";

/// Startup settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// First displayed fret, counted from 1 like the fret field in the top bar.
    pub start_fret: i32,
    pub end_fret: i32,
    pub visibility: GlobalVisibility,
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_fret: 1,
            end_fret: 12,
            visibility: GlobalVisibility::default(),
            export_path: PathBuf::from("fretboard.svg"),
        }
    }
}

impl Config {
    /// Loads `path`, or `fretboard.toml` in the working directory if none is given.
    ///
    /// Only an explicitly requested file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);

        if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf)
                .with_context(|| format!("failed to read config {}", path_buf.display()))?;
            let config = Self::parse(&raw)
                .with_context(|| format!("invalid config {}", path_buf.display()))?;
            tracing::info!("loaded config from {}", path_buf.display());
            Ok(config)
        } else if path.is_some() {
            bail!("config file {} does not exist", path_buf.display());
        } else {
            tracing::debug!("no {DEFAULT_CONFIG_PATH}, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// The window as the model counts it. Not validated here; a bad window shows up as the
    /// model's error state.
    pub fn initial_window(&self) -> FretWindow {
        FretWindow::new(self.start_fret.saturating_sub(1), self.end_fret)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use fretboard_lib::{FretWindow, FretWindowError, FretboardModel, GlobalVisibility, Status};

    use super::Config;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.initial_window(), FretWindow::new(0, 12));
        assert_eq!(config.visibility, GlobalVisibility::Transparent);
        assert_eq!(config.export_path, PathBuf::from("fretboard.svg"));
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            start_fret = 5
            visibility = "hidden"
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_window(), FretWindow::new(4, 12));
        assert_eq!(config.visibility, GlobalVisibility::Hidden);
        assert_eq!(config.export_path, PathBuf::from("fretboard.svg"));
    }

    #[test]
    fn test_invalid_window_is_kept() {
        let config = Config::parse("start_fret = 10\nend_fret = 3").unwrap();
        let window = config.initial_window();
        assert_eq!(window, FretWindow::new(9, 3));
        assert!(!window.is_valid());
    }

    #[test]
    fn test_extreme_start_fret() {
        let config = Config::parse("start_fret = -2147483648").unwrap();
        let window = config.initial_window();
        assert_eq!(window, FretWindow::new(i32::MIN, 12));

        let model = FretboardModel::with_visibility(window, config.visibility);
        assert_eq!(model.status(), Status::Error(FretWindowError::OutOfRange));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::parse(r#"visibility = "selected""#).is_err());
        assert!(Config::parse(r#"visibility = "opaque""#).is_err());
        assert!(Config::parse("start_fret = \"one\"").is_err());
        assert!(Config::parse("frets = 12").is_err());
    }

    #[test]
    fn test_missing_explicit_path() {
        let path = Path::new("this/path/does/not/exist/fretboard.toml");
        assert!(Config::load(Some(path)).is_err());
    }
}
