use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{
    kerning::{Key, KeyModel},
    provider::FontModelProvider,
    KernToolsError,
};

/// One stored kerning entry, with its keys in raw form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KerningPair {
    /// Raw left key
    pub left: SmolStr,
    /// Raw right key
    pub right: SmolStr,
    /// Adjustment in font units
    pub value: i32,
}

impl KerningPair {
    /// A new pair
    pub fn new(left: impl Into<SmolStr>, right: impl Into<SmolStr>, value: i32) -> Self {
        KerningPair {
            left: left.into(),
            right: right.into(),
            value,
        }
    }
}

/// Multiply and round to the nearest integer, ties away from zero
pub fn scale_value(value: i32, factor: f64) -> i32 {
    // `as` saturates at the i32 bounds
    (f64::from(value) * factor).round() as i32
}

/// The kerning of one master, read and written through a provider.
///
/// The provider owns the entries; this is only a view onto them.
pub struct KerningTable<'a, P: FontModelProvider + ?Sized> {
    provider: &'a mut P,
    master: String,
}

impl<'a, P: FontModelProvider + ?Sized> KerningTable<'a, P> {
    /// A view of `master`'s kerning. Fails if the master does not exist.
    pub fn new(provider: &'a mut P, master: impl Into<String>) -> Result<Self, KernToolsError> {
        let master = master.into();
        if !provider.master_ids().contains(&master) {
            return Err(KernToolsError::MasterNotFound(master));
        }
        Ok(KerningTable { provider, master })
    }

    /// The master this table belongs to
    pub fn master(&self) -> &str {
        &self.master
    }

    /// The provider behind this table
    pub fn provider(&self) -> &P {
        self.provider
    }

    /// Look up a pair
    pub fn get(&self, left: &Key, right: &Key) -> Option<i32> {
        self.get_raw(&KeyModel::format(left), &KeyModel::format(right))
    }

    /// Look up a pair by raw keys
    pub fn get_raw(&self, left: &str, right: &str) -> Option<i32> {
        self.provider.kerning_value(&self.master, left, right)
    }

    /// Set a pair, replacing any existing value
    pub fn set(&mut self, left: &Key, right: &Key, value: i32) -> Result<(), KernToolsError> {
        self.set_raw(&KeyModel::format(left), &KeyModel::format(right), value)
    }

    /// Set a pair by raw keys
    pub fn set_raw(&mut self, left: &str, right: &str, value: i32) -> Result<(), KernToolsError> {
        self.provider.set_kerning(&self.master, left, right, value)
    }

    /// Remove a pair
    pub fn delete(&mut self, left: &Key, right: &Key) -> Result<(), KernToolsError> {
        self.delete_raw(&KeyModel::format(left), &KeyModel::format(right))
    }

    /// Remove a pair by raw keys
    pub fn delete_raw(&mut self, left: &str, right: &str) -> Result<(), KernToolsError> {
        self.provider.remove_kerning(&self.master, left, right)
    }

    /// A snapshot of every entry. Writing to the table while walking the
    /// snapshot is safe; the snapshot does not see those writes.
    pub fn entries(&self) -> Result<Vec<KerningPair>, KernToolsError> {
        self.provider.get_kerning(&self.master)
    }

    /// Multiply every value by `factor`, rewriting only the entries whose
    /// rounded value changes. Returns how many entries changed.
    pub fn scale(&mut self, factor: f64) -> Result<usize, KernToolsError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(KernToolsError::InvalidParameter(format!(
                "scale factor must be a positive number, got {}",
                factor
            )));
        }
        let mut changed = 0;
        for pair in self.entries()? {
            let new_value = scale_value(pair.value, factor);
            if new_value == pair.value {
                continue;
            }
            match self.set_raw(&pair.left, &pair.right, new_value) {
                Ok(()) => changed += 1,
                Err(e) => log::warn!("Not scaling {} {}: {}", pair.left, pair.right, e),
            }
        }
        log::info!(
            "Scaled kerning of master {} by {:.2}: {} pairs adjusted",
            self.master,
            factor,
            changed
        );
        Ok(changed)
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, KernToolsError> {
        self.remove_where(|_| true)
    }

    /// Remove entries with small values: `|v| <= threshold`, or with
    /// `negative_only`, `-threshold < v < 0`. Returns how many were removed.
    pub fn remove_small(
        &mut self,
        threshold: f64,
        negative_only: bool,
    ) -> Result<usize, KernToolsError> {
        if !threshold.is_finite() {
            return Err(KernToolsError::InvalidParameter(format!(
                "threshold must be a number, got {}",
                threshold
            )));
        }
        let threshold = threshold.abs();
        self.remove_where(|pair| {
            let value = f64::from(pair.value);
            if negative_only {
                value < 0.0 && value > -threshold
            } else {
                value.abs() <= threshold
            }
        })
    }

    fn remove_where<F>(&mut self, predicate: F) -> Result<usize, KernToolsError>
    where
        F: Fn(&KerningPair) -> bool,
    {
        let doomed: Vec<KerningPair> = self
            .entries()?
            .into_iter()
            .filter(|p| predicate(p))
            .collect();
        let mut removed = 0;
        for pair in doomed {
            match self.delete_raw(&pair.left, &pair.right) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("Not removing {} {}: {}", pair.left, pair.right, e),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kerning::Side, Font};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn font(pairs: &[(&str, &str, i32)]) -> Font {
        let mut font = Font::with_glyphs(["A", "V", "T", "o"]);
        for (l, r, v) in pairs {
            font.masters[0].insert_kerning(*l, *r, *v);
        }
        font
    }

    #[rstest]
    #[case(-80, 0.7, -56)]
    #[case(25, 0.5, 13)]
    #[case(-25, 0.5, -13)]
    #[case(3, 0.1, 0)]
    #[case(100, 1.2, 120)]
    fn test_scale_value(#[case] value: i32, #[case] factor: f64, #[case] expected: i32) {
        assert_eq!(scale_value(value, factor), expected);
    }

    #[test]
    fn test_get_set_delete() {
        let mut font = font(&[]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        let a = Key::glyph("A");
        let o = Key::group(Side::Right, "o");
        assert_eq!(table.get(&a, &o), None);
        table.set(&a, &o, -20).unwrap();
        table.set(&a, &o, -30).unwrap();
        assert_eq!(table.get(&a, &o), Some(-30));
        assert_eq!(table.get_raw("A", "@MMK_R_o"), Some(-30));
        table.delete(&a, &o).unwrap();
        assert_eq!(table.get(&a, &o), None);
        assert!(table.entries().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_master() {
        let mut font = font(&[]);
        assert!(matches!(
            KerningTable::new(&mut font, "nope"),
            Err(KernToolsError::MasterNotFound(m)) if m == "nope"
        ));
    }

    #[test]
    fn test_scale_reports_only_changed() {
        let mut font = font(&[("A", "V", -80), ("T", "o", 1), ("V", "A", 0)]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        assert_eq!(table.scale(0.7).unwrap(), 1);
        assert_eq!(table.get_raw("A", "V"), Some(-56));
        assert_eq!(table.get_raw("T", "o"), Some(1));
        assert_eq!(table.scale(1.0).unwrap(), 0);
        assert_eq!(table.entries().unwrap().len(), 3);
    }

    #[test]
    fn test_scale_keeps_sign() {
        let mut font = font(&[("A", "V", -3), ("T", "o", 7), ("V", "A", -120)]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        table.scale(0.35).unwrap();
        assert_eq!(table.get_raw("A", "V"), Some(-1));
        assert_eq!(table.get_raw("T", "o"), Some(2));
        assert_eq!(table.get_raw("V", "A"), Some(-42));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_scale_rejects_bad_factor(#[case] factor: f64) {
        let mut font = font(&[("A", "V", -80)]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        assert!(matches!(
            table.scale(factor),
            Err(KernToolsError::InvalidParameter(_))
        ));
        assert_eq!(table.get_raw("A", "V"), Some(-80));
    }

    #[rstest]
    #[case(10.0, true, 2)]
    #[case(10.0, false, 4)]
    #[case(-10.0, false, 4)]
    #[case(4.0, false, 1)]
    fn test_remove_small(#[case] threshold: f64, #[case] negative_only: bool, #[case] removed: usize) {
        let mut font = font(&[
            ("A", "V", -80),
            ("T", "o", -5),
            ("V", "A", -9),
            ("o", "T", 4),
            ("A", "T", -10),
        ]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        assert_eq!(table.remove_small(threshold, negative_only).unwrap(), removed);
        assert_eq!(table.get_raw("A", "V"), Some(-80));
    }

    #[test]
    fn test_clear() {
        let mut font = font(&[("A", "V", -80), ("T", "o", -5)]);
        let mut table = KerningTable::new(&mut font, "m01").unwrap();
        assert_eq!(table.clear().unwrap(), 2);
        assert!(table.entries().unwrap().is_empty());
    }

    #[test]
    fn test_read_failure_is_an_error() {
        struct Unreadable(Font);
        impl FontModelProvider for Unreadable {
            fn list_glyphs(&self) -> Result<Vec<crate::provider::GlyphRecord>, KernToolsError> {
                self.0.list_glyphs()
            }
            fn resolve_opaque_id(&self, id: &str) -> Option<SmolStr> {
                self.0.resolve_opaque_id(id)
            }
            fn master_ids(&self) -> Vec<String> {
                self.0.master_ids()
            }
            fn get_kerning(&self, _m: &str) -> Result<Vec<KerningPair>, KernToolsError> {
                Err(KernToolsError::NoFontLoaded)
            }
            fn set_kerning(&mut self, m: &str, l: &str, r: &str, v: i32) -> Result<(), KernToolsError> {
                self.0.set_kerning(m, l, r, v)
            }
            fn remove_kerning(&mut self, m: &str, l: &str, r: &str) -> Result<(), KernToolsError> {
                self.0.remove_kerning(m, l, r)
            }
            fn assign_group(&mut self, g: &str, s: Side, n: &str) -> Result<(), KernToolsError> {
                self.0.assign_group(g, s, n)
            }
        }
        let mut provider = Unreadable(font(&[("A", "V", -80)]));
        let mut table = KerningTable::new(&mut provider, "m01").unwrap();
        assert!(matches!(table.scale(0.5), Err(KernToolsError::NoFontLoaded)));
        assert!(matches!(table.clear(), Err(KernToolsError::NoFontLoaded)));
        assert!(matches!(
            table.remove_small(10.0, false),
            Err(KernToolsError::NoFontLoaded)
        ));
        assert_eq!(provider.0.masters[0].kerning_value("A", "V"), Some(-80));
    }
}
