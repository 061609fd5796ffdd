//! Run configuration shared by every family in a manifest.
use serde::{Deserialize, Serialize};

use crate::interp::Rounding;

pub const DEFAULT_EXTENSION: &str = "xml";
pub const DEFAULT_ANCHOR: &str = "<general>";
pub const DEFAULT_MARKER: &str = "<!-- THIS OUTFIT IS AUTOGENERATED. DO NOT EDIT DIRECTLY! -->";

/// What a run does when a template references a parameter the spec lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Fail the whole family before anything is written
    #[default]
    Abort,
    /// Skip the offending variant and report it
    Skip,
}

/// Output naming, marking, and evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_extension")]
    pub extension: String,
    #[serde(default = "Settings::default_anchor")]
    pub anchor: String,
    #[serde(default = "Settings::default_marker")]
    pub marker: String,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default)]
    pub on_missing: MissingPolicy,
}

impl Settings {
    fn default_extension() -> String {
        DEFAULT_EXTENSION.to_string()
    }

    fn default_anchor() -> String {
        DEFAULT_ANCHOR.to_string()
    }

    fn default_marker() -> String {
        DEFAULT_MARKER.to_string()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extension: Self::default_extension(),
            anchor: Self::default_anchor(),
            marker: Self::default_marker(),
            rounding: Rounding::default(),
            on_missing: MissingPolicy::default(),
        }
    }
}
