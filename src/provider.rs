//! The interface between the kerning engine and whatever owns the font.
//!
//! The engine never holds on to font data: every operation is handed a
//! [`FontModelProvider`] and a master id, reads what it needs, and writes its
//! results back through the same provider.
use smol_str::SmolStr;

use crate::{
    kerning::{KerningPair, Side},
    KernToolsError,
};

/// What the engine needs to know about a glyph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphRecord {
    /// The glyph name
    pub name: SmolStr,
    /// The group this glyph belongs to when it sits on the left of a pair
    pub left_group: Option<SmolStr>,
    /// The group this glyph belongs to when it sits on the right of a pair
    pub right_group: Option<SmolStr>,
    /// The first codepoint assigned to the glyph, if any
    pub unicode: Option<u32>,
}

impl GlyphRecord {
    /// A glyph record with no groups and no codepoint
    pub fn new(name: impl Into<SmolStr>) -> Self {
        GlyphRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the group used on the given side
    pub fn with_group(mut self, side: Side, group: impl Into<SmolStr>) -> Self {
        match side {
            Side::Left => self.left_group = Some(group.into()),
            Side::Right => self.right_group = Some(group.into()),
        }
        self
    }

    /// Set the codepoint
    pub fn with_unicode(mut self, unicode: u32) -> Self {
        self.unicode = Some(unicode);
        self
    }

    /// The group used on the given side, ignoring empty strings
    pub fn group(&self, side: Side) -> Option<&SmolStr> {
        match side {
            Side::Left => self.left_group.as_ref(),
            Side::Right => self.right_group.as_ref(),
        }
        .filter(|g| !g.is_empty())
    }
}

/// Access to a live font: its glyph set and per-master kerning tables.
///
/// Kerning keys cross this boundary in their raw textual form; parsing them
/// is the job of [`crate::kerning::KeyModel`].
pub trait FontModelProvider {
    /// All glyphs in the font. Fails with [`KernToolsError::NoFontLoaded`] when
    /// there is no font to read.
    fn list_glyphs(&self) -> Result<Vec<GlyphRecord>, KernToolsError>;

    /// Map an opaque glyph identifier to the glyph's name
    fn resolve_opaque_id(&self, id: &str) -> Option<SmolStr>;

    /// Ids of every master, in font order
    fn master_ids(&self) -> Vec<String>;

    /// Every kerning entry of a master, in storage order
    fn get_kerning(&self, master: &str) -> Result<Vec<KerningPair>, KernToolsError>;

    /// Set (or overwrite) one kerning entry
    fn set_kerning(
        &mut self,
        master: &str,
        left: &str,
        right: &str,
        value: i32,
    ) -> Result<(), KernToolsError>;

    /// Remove one kerning entry. Removing an absent entry is not an error.
    fn remove_kerning(&mut self, master: &str, left: &str, right: &str)
        -> Result<(), KernToolsError>;

    /// Look up a single kerning value
    fn kerning_value(&self, master: &str, left: &str, right: &str) -> Option<i32> {
        self.get_kerning(master)
            .ok()?
            .into_iter()
            .find(|pair| pair.left == left && pair.right == right)
            .map(|pair| pair.value)
    }

    /// Put a glyph into a side group
    fn assign_group(&mut self, glyph: &str, side: Side, group: &str)
        -> Result<(), KernToolsError>;

    /// Called before a bulk operation starts writing
    fn begin_batch(&mut self) {}

    /// Called once a bulk operation has finished writing
    fn end_batch(&mut self) {}
}

/// Run `f` inside a single batch scope on `provider`.
///
/// `end_batch` is called whether or not `f` succeeds.
pub fn batch<P, T, F>(provider: &mut P, f: F) -> T
where
    P: FontModelProvider + ?Sized,
    F: FnOnce(&mut P) -> T,
{
    provider.begin_batch();
    let result = f(provider);
    provider.end_batch();
    result
}
