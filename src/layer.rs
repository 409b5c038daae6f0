use crate::shape::Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// One drawing of a glyph
pub struct Layer {
    /// Advance width
    pub width: f32,
    /// The master this layer draws the glyph for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    /// The outlines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<Path>,
}

impl Layer {
    /// A layer not tied to any master
    pub fn new(width: f32) -> Layer {
        Layer {
            width,
            ..Default::default()
        }
    }

    /// A layer drawn for the given master
    pub fn for_master(width: f32, master: impl Into<String>) -> Layer {
        Layer {
            width,
            master: Some(master.into()),
            ..Default::default()
        }
    }
}
