//! Display mode switch

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controls which content blocks a task box shows
///
/// Only box heights depend on the mode; columns never do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Time info, description and progress bar
    #[default]
    Normal,
    /// Description only
    Compressed,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Compressed => "compressed",
        }
    }

    /// Returns the other mode
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Compressed,
            DisplayMode::Compressed => DisplayMode::Normal,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(DisplayMode::Normal),
            "compressed" => Ok(DisplayMode::Compressed),
            other => Err(format!(
                "Unknown display mode '{}': expected 'normal' or 'compressed'",
                other
            )),
        }
    }
}
