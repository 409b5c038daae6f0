use crate::{
    glyph::{Glyph, GlyphList},
    kerning::{KerningPair, Side},
    master::Master,
    provider::{FontModelProvider, GlyphRecord},
    KernToolsError,
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// A font: its glyphs and its masters' kerning
pub struct Font {
    /// The design masters
    pub masters: Vec<Master>,
    /// The glyph set
    pub glyphs: GlyphList,
    #[serde(skip)]
    /// The file this font was loaded from
    pub source: Option<PathBuf>,
}

impl Font {
    /// A font with one master, `m01`, and an empty glyph for each name
    pub fn with_glyphs<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Font {
            masters: vec![Master::new("Regular", "m01")],
            glyphs: GlyphList(names.into_iter().map(Glyph::new).collect()),
            ..Default::default()
        }
    }

    /// The master with this id
    pub fn master(&self, id: &str) -> Option<&Master> {
        self.masters.iter().find(|m| m.id == id)
    }

    /// The master with this id, mutably
    pub fn master_mut(&mut self, id: &str) -> Option<&mut Master> {
        self.masters.iter_mut().find(|m| m.id == id)
    }

    fn master_or_err(&mut self, id: &str) -> Result<&mut Master, KernToolsError> {
        self.master_mut(id)
            .ok_or_else(|| KernToolsError::MasterNotFound(id.to_string()))
    }

    /// Save the font as JSON
    pub fn save<T: Into<PathBuf>>(&self, path: T) -> Result<(), KernToolsError> {
        let path = path.into();
        if path.extension().and_then(|x| x.to_str()) == Some("json") {
            let file = std::fs::File::create(&path)?;
            let mut buffer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut buffer, &self)?;
            return Ok(());
        }
        Err(KernToolsError::UnknownFileType { path })
    }
}

impl FontModelProvider for Font {
    fn list_glyphs(&self) -> Result<Vec<GlyphRecord>, KernToolsError> {
        Ok(self.glyphs.iter().map(GlyphRecord::from).collect())
    }

    fn resolve_opaque_id(&self, id: &str) -> Option<SmolStr> {
        self.glyphs.get_by_id(id).map(|g| g.name.clone())
    }

    fn master_ids(&self) -> Vec<String> {
        self.masters.iter().map(|m| m.id.clone()).collect()
    }

    fn get_kerning(&self, master: &str) -> Result<Vec<KerningPair>, KernToolsError> {
        self.master(master)
            .map(|m| m.kerning_pairs())
            .ok_or_else(|| KernToolsError::MasterNotFound(master.to_string()))
    }

    fn set_kerning(
        &mut self,
        master: &str,
        left: &str,
        right: &str,
        value: i32,
    ) -> Result<(), KernToolsError> {
        if left.is_empty() || right.is_empty() {
            return Err(KernToolsError::WriteFailure {
                left: left.to_string(),
                right: right.to_string(),
                reason: "empty kerning key".to_string(),
            });
        }
        self.master_or_err(master)?
            .insert_kerning(left, right, value);
        Ok(())
    }

    fn remove_kerning(
        &mut self,
        master: &str,
        left: &str,
        right: &str,
    ) -> Result<(), KernToolsError> {
        self.master_or_err(master)?.remove_kerning(left, right);
        Ok(())
    }

    fn kerning_value(&self, master: &str, left: &str, right: &str) -> Option<i32> {
        self.master(master)?.kerning_value(left, right)
    }

    fn assign_group(&mut self, glyph: &str, side: Side, group: &str) -> Result<(), KernToolsError> {
        let g = self
            .glyphs
            .get_mut(glyph)
            .ok_or_else(|| KernToolsError::GlyphNotFound {
                glyph: glyph.to_string(),
            })?;
        g.set_kern_group(side, Some(SmolStr::from(group)));
        Ok(())
    }
}
