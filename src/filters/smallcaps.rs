use crate::{
    config::Config, filters::FontFilter, kerning::small_caps_master, provider::FontModelProvider,
};

/// A filter that copies kerning onto the small caps of the kerned glyphs
///
/// Each pair whose glyphs have `.sc` counterparts gets a counterpart pair,
/// scaled by the configured percentage. Group kerning is copied either to the
/// matching small-cap group or to each member's small cap.
pub struct SmallCapsKerning(Config);

impl SmallCapsKerning {
    /// Create a new SmallCapsKerning filter
    pub fn new(config: Config) -> Self {
        SmallCapsKerning(config)
    }
}

impl FontFilter for SmallCapsKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        log::info!(
            "Transferring kerning to small caps at {}%",
            self.0.percentage
        );
        for master in font.master_ids() {
            small_caps_master(font, &master, &self.0)?;
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let config = if s.trim().ends_with(".json") {
            Config::load(s.trim())?
        } else {
            Config::parse(s)?
        };
        Ok(SmallCapsKerning::new(config))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("smallcaps")
            .long("small-caps-kerning")
            .help("Copy kerning onto small caps: a percentage with optional ',overwrite' and ',debug', or a JSON config file")
            .value_name("PERCENT[,overwrite][,debug]")
            .action(clap::ArgAction::Append)
    }
}
