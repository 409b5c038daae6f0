use crate::{
    filters::{target_masters, FontFilter},
    kerning::KerningTable,
    provider::batch,
};

#[derive(Default)]
/// A filter that drops kerning from one master, or from every master
pub struct DropKerning(Option<String>);

impl DropKerning {
    /// Create a new DropKerning filter
    pub fn new(master: Option<String>) -> Self {
        DropKerning(master)
    }
}

impl FontFilter for DropKerning {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::KernToolsError> {
        for id in target_masters(font, self.0.as_deref())? {
            let removed = batch(font, |font| {
                KerningTable::new(font, id.as_str())?.clear()
            })?;
            log::info!("Dropped {} kerning pairs from master {}", removed, id);
        }
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, crate::KernToolsError>
    where
        Self: Sized,
    {
        let s = s.trim();
        Ok(DropKerning::new(
            (!s.is_empty() && s != "true").then(|| s.to_string()),
        ))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("dropkerning")
            .long("drop-kerning")
            .help("Drop all kerning data from the font, or from one master with --drop-kerning=MASTER")
            .value_name("MASTER")
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Font, Master};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_master() {
        let mut font = Font::with_glyphs(["A", "V"]);
        font.masters.push(Master::new("Bold", "m02"));
        font.masters[0].insert_kerning("A", "V", -80);
        font.masters[1].insert_kerning("A", "V", -90);
        DropKerning::from_str("m02").unwrap().apply(&mut font).unwrap();
        assert_eq!(font.masters[0].kerning_count(), 1);
        assert_eq!(font.masters[1].kerning_count(), 0);
        DropKerning::from_str("").unwrap().apply(&mut font).unwrap();
        assert_eq!(font.masters[0].kerning_count(), 0);
    }
}
