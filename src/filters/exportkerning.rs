use std::path::PathBuf;

use crate::{
    filters::{chosen_master, split_master_arg, FontFilter},
    kerning::export_master,
};

/// A filter that writes one master's kerning to a JSON backup file
///
/// The argument is `MASTER=PATH`, or just `PATH` for a font with one master.
/// The font itself is not changed.
pub struct ExportKerning {
    master: Option<String>,
    path: PathBuf,
}

impl ExportKerning {
    /// Create a new ExportKerning filter
    pub fn new(master: Option<String>, path: impl Into<PathBuf>) -> Self {
        ExportKerning {
            master,
            path: path.into(),
        }
    }
}

impl FontFilter for ExportKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        let master = chosen_master(font, self.master.as_deref())?;
        let backup = export_master(font, &master)?;
        log::info!("Writing kerning backup to {}", self.path.display());
        backup.save(&self.path)
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
        Ok(ExportKerning::new(master, path))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("exportkerning")
            .long("export-kerning")
            .help("Back up a master's kerning to a JSON file")
            .value_name("[MASTER=]PATH")
            .action(clap::ArgAction::Append)
    }
}
