use crate::{filters::FontFilter, kerning::auto_assign_groups};

#[derive(Default)]
/// A filter that puts every ungrouped glyph into a kerning group of its own
pub struct AutoGroups;

impl AutoGroups {
    /// Create a new AutoGroups filter
    pub fn new() -> Self {
        AutoGroups
    }
}

impl FontFilter for AutoGroups {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        auto_assign_groups(font)?;
        Ok(())
    }

    fn from_str(_s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        Ok(AutoGroups::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("autogroups")
            .long("auto-groups")
            .help("Give every glyph without a kerning group a group named after itself")
            .action(clap::ArgAction::SetTrue)
    }
}
