use crate::{
    filters::FontFilter,
    kerning::KerningTable,
    provider::{batch, FontModelProvider},
};

/// A filter that removes kerning values too small to matter
pub struct DropSmallKerning {
    threshold: f64,
    negative_only: bool,
}

impl DropSmallKerning {
    /// Create a new DropSmallKerning filter
    ///
    /// Removes values with `|v| <= threshold`, or with `negative_only`,
    /// negative values above `-threshold`.
    pub fn new(threshold: f64, negative_only: bool) -> Self {
        DropSmallKerning {
            threshold,
            negative_only,
        }
    }
}

impl FontFilter for DropSmallKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        for master in font.master_ids() {
            let removed = batch(font, |font| {
                KerningTable::new(font, master.as_str())?
                    .remove_small(self.threshold, self.negative_only)
            })?;
            log::info!("Removed {} small kerning pairs from master {}", removed, master);
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let mut parts = s.split(',').map(str::trim);
        let threshold = parts
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|t| t.is_finite())
            .ok_or_else(|| {
                crate::KernToolsError::InvalidParameter(format!("not a threshold: {:?}", s))
            })?;
        let negative_only = match parts.next() {
            None => false,
            Some("negative") => true,
            Some(other) => {
                return Err(crate::KernToolsError::InvalidParameter(format!(
                    "unknown option {:?}",
                    other
                )))
            }
        };
        Ok(DropSmallKerning::new(threshold.abs(), negative_only))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("dropsmallkerning")
            .long("drop-small-kerning")
            .help("Remove kerning values no bigger than a threshold; add ',negative' to only remove small negative values")
            .value_name("THRESHOLD[,negative]")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Font;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negative_only() {
        let mut font = Font::with_glyphs(["A", "V", "T", "o"]);
        font.masters[0].insert_kerning("A", "V", -3);
        font.masters[0].insert_kerning("T", "o", 3);
        font.masters[0].insert_kerning("o", "T", -30);
        DropSmallKerning::from_str("5,negative")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        assert_eq!(font.masters[0].kerning_count(), 2);
        assert_eq!(font.masters[0].kerning_value("A", "V"), None);
        assert!(DropSmallKerning::from_str("small").is_err());
    }
}
