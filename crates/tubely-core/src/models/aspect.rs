//! Coarse aspect-ratio classification used to namespace storage keys.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    Landscape,
    Portrait,
    Other,
}

impl AspectClass {
    /// Classify a display aspect ratio as reported by ffprobe (e.g. `"16:9"`).
    ///
    /// Total: anything that is not exactly `16:9` or `9:16` is `Other`.
    pub fn from_ratio(ratio: &str) -> Self {
        match ratio {
            "16:9" => AspectClass::Landscape,
            "9:16" => AspectClass::Portrait,
            _ => AspectClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectClass::Landscape => "landscape",
            AspectClass::Portrait => "portrait",
            AspectClass::Other => "other",
        }
    }
}

impl Display for AspectClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
