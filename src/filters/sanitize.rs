use crate::{filters::FontFilter, kerning::sanitize_master, provider::FontModelProvider};

#[derive(Default)]
/// A filter that removes ghost kerning and rewrites keys into canonical form
pub struct SanitizeKerning;

impl SanitizeKerning {
    /// Create a new SanitizeKerning filter
    pub fn new() -> Self {
        SanitizeKerning
    }
}

impl FontFilter for SanitizeKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        for master in font.master_ids() {
            let report = sanitize_master(font, &master)?;
            log::info!("Sanitized kerning of master {}: {}", master, report);
        }
        Ok(())
    }

    fn from_str(_s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        Ok(SanitizeKerning::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("sanitize")
            .long("sanitize-kerning")
            .help("Remove kerning for missing glyphs and groups, and kern grouped glyphs by group")
            .action(clap::ArgAction::SetTrue)
    }
}
