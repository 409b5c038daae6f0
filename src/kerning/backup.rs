//! Exporting kerning to, and restoring it from, a flat JSON mapping of
//! `{ left: { right: value } }`.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;

use crate::{
    kerning::{KeyModel, KerningPair, KerningTable},
    provider::{batch, FontModelProvider},
    KernToolsError,
};

/// A backup of one master's kerning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KerningBackup(pub IndexMap<SmolStr, IndexMap<SmolStr, i32>>);

impl KerningBackup {
    /// Collect pairs into a backup. A repeated pair keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = KerningPair>,
    {
        let mut map: IndexMap<SmolStr, IndexMap<SmolStr, i32>> = IndexMap::new();
        for pair in pairs {
            map.entry(pair.left).or_default().insert(pair.right, pair.value);
        }
        KerningBackup(map)
    }

    /// Every pair in the backup, in file order
    pub fn pairs(&self) -> Vec<KerningPair> {
        self.0
            .iter()
            .flat_map(|(left, rights)| {
                rights
                    .iter()
                    .map(move |(right, value)| KerningPair::new(left.clone(), right.clone(), *value))
            })
            .collect()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.0.values().map(|rights| rights.len()).sum()
    }

    /// Whether the backup holds no pairs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the backup as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KernToolsError> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut buffer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut buffer, self)?;
        Ok(())
    }

    /// Read a backup written by [`KerningBackup::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KernToolsError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// What an import did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records written
    pub applied: usize,
    /// Records naming a glyph the font does not have
    pub skipped: usize,
    /// Records the font refused to store
    pub failed: usize,
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pairs imported, {} skipped, {} failed",
            self.applied, self.skipped, self.failed
        )
    }
}

/// Every entry of the table, with keys exactly as they are stored.
/// Bringing keys into canonical form is left to the sanitizer, so that
/// importing an export restores the same raw entries.
pub fn export<P>(table: &KerningTable<'_, P>) -> Result<Vec<KerningPair>, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    table.entries()
}

/// Write every record into the table. A record whose keys do not resolve
/// against `keys` is skipped with a warning; every record is attempted.
pub fn import<P, I>(table: &mut KerningTable<'_, P>, keys: &KeyModel, records: I) -> ImportReport
where
    P: FontModelProvider + ?Sized,
    I: IntoIterator<Item = KerningPair>,
{
    let mut report = ImportReport::default();
    for record in records {
        let resolved = keys
            .resolve(&record.left)
            .and_then(|_| keys.resolve(&record.right));
        if let Err(e) = resolved {
            log::warn!("Skipping {} {}: {}", record.left, record.right, e);
            report.skipped += 1;
            continue;
        }
        match table.set_raw(&record.left, &record.right, record.value) {
            Ok(()) => report.applied += 1,
            Err(e) => {
                log::warn!("{}", e);
                report.failed += 1;
            }
        }
    }
    report
}

/// Export one master's kerning as a backup
pub fn export_master<P>(provider: &mut P, master: &str) -> Result<KerningBackup, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let table = KerningTable::new(provider, master)?;
    let backup = KerningBackup::from_pairs(export(&table)?);
    log::info!("Exported {} pairs from master {}", backup.len(), master);
    Ok(backup)
}

/// Restore a backup into one master, in a single batch
pub fn import_master<P>(
    provider: &mut P,
    master: &str,
    backup: &KerningBackup,
) -> Result<ImportReport, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let mut keys = KeyModel::snapshot(provider, master)?;
    for pair in backup.pairs() {
        keys.learn(provider, &pair.left);
        keys.learn(provider, &pair.right);
    }
    let report = batch(provider, |provider| {
        let mut table = KerningTable::new(provider, master)?;
        Ok::<_, KernToolsError>(import(&mut table, &keys, backup.pairs()))
    })?;
    log::info!("Master {}: {}", master, report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Font;
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        let mut font = Font::with_glyphs(["A", "V", "T", "o"]);
        font.glyphs.get_mut("o").unwrap().right_kern_group = Some("o".into());
        font.masters[0].insert_kerning("A", "V", -80);
        font.masters[0].insert_kerning("T", "@MMK_R_o", -40);
        font.masters[0].insert_kerning("@MMK_L_T", "A", 12);
        font
    }

    fn sorted(mut pairs: Vec<KerningPair>) -> Vec<KerningPair> {
        pairs.sort();
        pairs
    }

    #[test]
    fn test_round_trip() {
        let mut font = font();
        let original = sorted(font.masters[0].kerning_pairs());
        let backup = export_master(&mut font, "m01").unwrap();
        assert_eq!(backup.len(), 3);

        font.masters[0].kerning.clear();
        let report = import_master(&mut font, "m01", &backup).unwrap();
        assert_eq!(report.applied, 3);
        assert_eq!(sorted(font.masters[0].kerning_pairs()), original);
    }

    #[test]
    fn test_json_shape() {
        let backup = KerningBackup::from_pairs(vec![
            KerningPair::new("A", "V", -80),
            KerningPair::new("A", "W", -60),
        ]);
        assert_eq!(
            serde_json::to_value(&backup).unwrap(),
            serde_json::json!({"A": {"V": -80, "W": -60}})
        );
    }

    #[test]
    fn test_export_keeps_raw_keys() {
        let mut font = font();
        let id = font.glyphs.get("A").unwrap().id.clone();
        font.masters[0].kerning.clear();
        font.masters[0].insert_kerning(id.as_str(), "V", -50);
        font.masters[0].insert_kerning("T", "@MMK_R_o", -40);

        let backup = export_master(&mut font, "m01").unwrap();
        assert_eq!(
            backup.pairs(),
            vec![
                KerningPair::new(id.as_str(), "V", -50),
                KerningPair::new("T", "@MMK_R_o", -40),
            ]
        );

        font.masters[0].kerning.clear();
        let report = import_master(&mut font, "m01", &backup).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(font.masters[0].kerning_value(id.as_str(), "V"), Some(-50));
        assert_eq!(font.masters[0].kerning_value("A", "V"), None);
    }

    #[test]
    fn test_import_skips_unknown_glyphs() {
        let mut font = font();
        font.masters[0].kerning.clear();
        let backup = KerningBackup::from_pairs(vec![
            KerningPair::new("A", "V", -80),
            KerningPair::new("A", "Vgone", -80),
            KerningPair::new("", "V", 3),
            KerningPair::new("T", "@MMK_R_o", -40),
        ]);
        let report = import_master(&mut font, "m01", &backup).unwrap();
        assert_eq!(
            report,
            ImportReport {
                applied: 2,
                skipped: 2,
                failed: 0
            }
        );
        assert_eq!(font.masters[0].kerning_count(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("kerntools-backup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("kerning.json");
        let backup = KerningBackup::from_pairs(font().masters[0].kerning_pairs());
        backup.save(&path).unwrap();
        assert_eq!(KerningBackup::load(&path).unwrap(), backup);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
