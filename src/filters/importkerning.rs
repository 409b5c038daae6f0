use std::path::PathBuf;

use crate::{
    filters::{chosen_master, split_master_arg, FontFilter},
    kerning::{import_master, KerningBackup},
};

/// A filter that restores a master's kerning from a JSON backup file
///
/// Pairs naming glyphs the font does not have are skipped.
pub struct ImportKerning {
    master: Option<String>,
    path: PathBuf,
}

impl ImportKerning {
    /// Create a new ImportKerning filter
    pub fn new(master: Option<String>, path: impl Into<PathBuf>) -> Self {
        ImportKerning {
            master,
            path: path.into(),
        }
    }
}

impl FontFilter for ImportKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        let master = chosen_master(font, self.master.as_deref())?;
        log::info!("Reading kerning backup from {}", self.path.display());
        let backup = KerningBackup::load(&self.path)?;
        import_master(font, &master, &backup)?;
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let (master, path) = split_master_arg(s);
        if path.is_empty() {
            return Err(crate::KernToolsError::InvalidParameter(
                "no backup file given".to_string(),
            ));
        }
        Ok(ImportKerning::new(master, path))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("importkerning")
            .long("import-kerning")
            .help("Restore a master's kerning from a JSON backup file")
            .value_name("[MASTER=]PATH")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filters::ExportKerning, Font, Master};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_then_import() {
        let dir = std::env::temp_dir().join(format!("kerntools-filters-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("m01.json");
        let arg = format!("m01={}", path.display());

        let mut font = Font::with_glyphs(["A", "V"]);
        font.masters.push(Master::new("Bold", "m02"));
        font.masters[0].insert_kerning("A", "V", -80);
        ExportKerning::from_str(&arg).unwrap().apply(&mut font).unwrap();
        ImportKerning::from_str(&format!("m02={}", path.display()))
            .unwrap()
            .apply(&mut font)
            .unwrap();
        assert_eq!(font.masters[1].kerning_value("A", "V"), Some(-80));

        // Two masters and no master named
        assert!(ExportKerning::from_str(&path.display().to_string())
            .unwrap()
            .apply(&mut font)
            .is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
