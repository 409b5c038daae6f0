use crate::{
    config::parse_percentage,
    filters::FontFilter,
    kerning::KerningTable,
    provider::{batch, FontModelProvider},
};

/// A filter that scales every kerning value
///
/// `70` scales kerning down to 70%; `+20` scales it up by 20%.
pub struct ScaleKerning(f64);

impl ScaleKerning {
    /// Create a new ScaleKerning filter multiplying values by `factor`
    pub fn new(factor: f64) -> Self {
        ScaleKerning(factor)
    }
}

impl FontFilter for ScaleKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        for master in font.master_ids() {
            batch(font, |font| KerningTable::new(font, master.as_str())?.scale(self.0))?;
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let s = s.trim();
        let (percentage, increase) = match s.strip_prefix('+') {
            Some(rest) => (parse_percentage(rest)?, true),
            None => (parse_percentage(s)?, false),
        };
        let factor = if increase {
            1.0 + percentage / 100.0
        } else {
            percentage / 100.0
        };
        if percentage < 0.0 || factor <= 0.0 {
            return Err(crate::KernToolsError::InvalidParameter(format!(
                "kerning cannot be scaled by {:?}",
                s
            )));
        }
        Ok(ScaleKerning::new(factor))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("scalekerning")
            .long("scale-kerning")
            .help("Scale kerning to a percentage (70) or up by a percentage (+20)")
            .value_name("PERCENT")
            .allow_hyphen_values(true)
            .action(clap::ArgAction::Append)
    }
}
