use crate::{kerning::Side, layer::Layer, provider::GlyphRecord};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// A list of glyphs in the font
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    /// Get a glyph by name
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }
    /// Get a glyph by name, mutably
    pub fn get_mut(&mut self, g: &str) -> Option<&mut Glyph> {
        self.0.iter_mut().find(|glyph| glyph.name == g)
    }
    /// Get a glyph by its opaque identifier
    pub fn get_by_id(&self, id: &str) -> Option<&Glyph> {
        self.0.iter().find(|glyph| glyph.id.eq_ignore_ascii_case(id))
    }
    /// Get an iterator over the glyphs
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().to_uppercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A glyph in the font
pub struct Glyph {
    /// The name of the glyph
    pub name: SmolStr,
    /// A stable identifier which survives renaming
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Unicode codepoints assigned to the glyph
    pub codepoints: Vec<u32>,
    /// Kerning group used when this glyph is on the left of a pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_kern_group: Option<SmolStr>,
    /// Kerning group used when this glyph is on the right of a pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_kern_group: Option<SmolStr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// The layers in the glyph, one or more per master
    pub layers: Vec<Layer>,
}

impl Glyph {
    /// A new glyph with a fresh identifier
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Glyph {
            name: name.into(),
            id: new_id(),
            codepoints: vec![],
            left_kern_group: None,
            right_kern_group: None,
            layers: vec![],
        }
    }

    /// The kerning group on one side
    pub fn kern_group(&self, side: Side) -> Option<&SmolStr> {
        match side {
            Side::Left => self.left_kern_group.as_ref(),
            Side::Right => self.right_kern_group.as_ref(),
        }
        .filter(|g| !g.is_empty())
    }

    /// Set or clear the kerning group on one side
    pub fn set_kern_group(&mut self, side: Side, group: Option<SmolStr>) {
        let group = group.filter(|g| !g.is_empty());
        match side {
            Side::Left => self.left_kern_group = group,
            Side::Right => self.right_kern_group = group,
        }
    }

    /// Get the layer for a master
    pub fn get_layer(&self, master: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.master.as_deref() == Some(master))
    }
}

impl From<&Glyph> for GlyphRecord {
    fn from(val: &Glyph) -> Self {
        GlyphRecord {
            name: val.name.clone(),
            left_group: val.kern_group(Side::Left).cloned(),
            right_group: val.kern_group(Side::Right).cloned(),
            unicode: val.codepoints.first().copied(),
        }
    }
}
