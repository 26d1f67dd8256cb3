//! Configuration loading and parsing.
//!
//! Parses `elide.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [truncate]
//! max_lines_on_shrink = 3
//! ellipsis_hint = "..."
//! gap_to_expand_hint = " "
//! gap_to_shrink_hint = " "
//! show_to_expand_hint = true
//! show_to_shrink_hint = true
//! expand_icon_width = 2
//! future_text_view_width = 0
//!
//! [colors]
//! expand_hint = 0xFFFF98BE
//! shrink_hint = 0xFFFF98BE
//! expand_hint_pressed = 0x55999999
//! shrink_hint_pressed = 0x55999999
//!
//! [special_color]
//! start = 0
//! length = 5
//! color = 0xFF3366FF
//! ```
//!
//! Every field is optional. Unknown fields are ignored so older binaries keep
//! reading newer files. A file that fails to parse falls back to defaults;
//! the failure is logged, never fatal.

use anyhow::Result;
use core_truncate::{
    Argb, ColorRange, HintPalette, TruncationConfig,
    config::{
        DEFAULT_ELLIPSIS, DEFAULT_GAP, DEFAULT_HINT_COLOR, DEFAULT_HINT_COLOR_PRESSED,
        DEFAULT_ICON_WIDTH, DEFAULT_MAX_LINES,
    },
};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "elide.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TruncateSection {
    #[serde(default = "TruncateSection::default_max_lines")]
    pub max_lines_on_shrink: u32,
    #[serde(default = "TruncateSection::default_ellipsis")]
    pub ellipsis_hint: String,
    #[serde(default = "TruncateSection::default_gap")]
    pub gap_to_expand_hint: String,
    #[serde(default = "TruncateSection::default_gap")]
    pub gap_to_shrink_hint: String,
    #[serde(default = "TruncateSection::default_show")]
    pub show_to_expand_hint: bool,
    #[serde(default = "TruncateSection::default_show")]
    pub show_to_shrink_hint: bool,
    #[serde(default = "TruncateSection::default_icon_width")]
    pub expand_icon_width: u32,
    /// Width hint used before the widget has been measured (0 = none).
    #[serde(default)]
    pub future_text_view_width: u32,
}

impl Default for TruncateSection {
    fn default() -> Self {
        Self {
            max_lines_on_shrink: Self::default_max_lines(),
            ellipsis_hint: Self::default_ellipsis(),
            gap_to_expand_hint: Self::default_gap(),
            gap_to_shrink_hint: Self::default_gap(),
            show_to_expand_hint: Self::default_show(),
            show_to_shrink_hint: Self::default_show(),
            expand_icon_width: Self::default_icon_width(),
            future_text_view_width: 0,
        }
    }
}

impl TruncateSection {
    const fn default_max_lines() -> u32 {
        DEFAULT_MAX_LINES as u32
    }
    fn default_ellipsis() -> String {
        DEFAULT_ELLIPSIS.to_string()
    }
    fn default_gap() -> String {
        DEFAULT_GAP.to_string()
    }
    const fn default_show() -> bool {
        true
    }
    const fn default_icon_width() -> u32 {
        DEFAULT_ICON_WIDTH
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ColorSection {
    #[serde(default = "ColorSection::default_hint")]
    pub expand_hint: u32,
    #[serde(default = "ColorSection::default_hint")]
    pub shrink_hint: u32,
    #[serde(default = "ColorSection::default_pressed")]
    pub expand_hint_pressed: u32,
    #[serde(default = "ColorSection::default_pressed")]
    pub shrink_hint_pressed: u32,
}

impl Default for ColorSection {
    fn default() -> Self {
        Self {
            expand_hint: Self::default_hint(),
            shrink_hint: Self::default_hint(),
            expand_hint_pressed: Self::default_pressed(),
            shrink_hint_pressed: Self::default_pressed(),
        }
    }
}

impl ColorSection {
    const fn default_hint() -> u32 {
        DEFAULT_HINT_COLOR.0
    }
    const fn default_pressed() -> u32 {
        DEFAULT_HINT_COLOR_PRESSED.0
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpecialColorSection {
    #[serde(default)]
    pub start: usize,
    pub length: usize,
    pub color: u32,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub truncate: TruncateSection,
    #[serde(default)]
    pub colors: ColorSection,
    #[serde(default)]
    pub special_color: Option<SpecialColorSection>,
}

impl From<ColorSection> for HintPalette {
    fn from(c: ColorSection) -> Self {
        Self {
            expand: Argb(c.expand_hint),
            shrink: Argb(c.shrink_hint),
            expand_pressed: Argb(c.expand_hint_pressed),
            shrink_pressed: Argb(c.shrink_hint_pressed),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Config path following platform conventions (XDG / AppData Roaming),
/// preferring a file in the working directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("elide").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(Config {
            raw: Some(content),
            file,
        }),
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Build the engine configuration, clamping out-of-range values.
    pub fn truncation(&self) -> TruncationConfig {
        let t = &self.file.truncate;
        if t.max_lines_on_shrink == 0 {
            info!(
                target: "config",
                raw = t.max_lines_on_shrink,
                clamped = 1,
                "max_lines_on_shrink_clamped"
            );
        }
        TruncationConfig::default()
            .with_max_lines(t.max_lines_on_shrink as usize)
            .with_ellipsis(t.ellipsis_hint.clone())
            .with_expand_gap(t.gap_to_expand_hint.clone())
            .with_expand_icon(t.show_to_expand_hint, t.expand_icon_width)
            .with_shrink_hint(t.show_to_shrink_hint, t.gap_to_shrink_hint.clone())
            .with_special_color(self.file.special_color.map(|s| ColorRange {
                start: s.start,
                len: s.length,
                color: Argb(s.color),
            }))
    }

    pub fn palette(&self) -> HintPalette {
        self.file.colors.into()
    }

    /// Future width hint, `None` when unset.
    pub fn future_width(&self) -> Option<u32> {
        let w = self.file.truncate.future_text_view_width;
        (w > 0).then_some(w)
    }
}
