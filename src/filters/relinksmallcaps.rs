use crate::{filters::FontFilter, kerning::relink_small_caps};

#[derive(Default)]
/// A filter that gives `.sc` glyphs the kerning groups of their base glyphs
pub struct RelinkSmallCaps;

impl RelinkSmallCaps {
    /// Create a new RelinkSmallCaps filter
    pub fn new() -> Self {
        RelinkSmallCaps
    }
}

impl FontFilter for RelinkSmallCaps {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        relink_small_caps(font)?;
        Ok(())
    }

    fn from_str(_s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        Ok(RelinkSmallCaps::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("relinksmallcaps")
            .long("relink-small-caps")
            .help("Copy kerning groups from base glyphs to their ungrouped .sc glyphs")
            .action(clap::ArgAction::SetTrue)
    }
}
