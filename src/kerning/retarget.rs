//! Deriving kerning for variant glyphs (small caps, typically) from the
//! kerning of their base glyphs.
use indexmap::IndexMap;
use log::Level;
use smol_str::{format_smolstr, SmolStr};
use std::collections::HashSet;

use crate::{
    config::Config,
    kerning::{classify, scale_value, Case, GroupIndex, Key, KeyModel, KerningTable},
    provider::{batch, FontModelProvider, GlyphRecord},
    KernToolsError,
};

/// Says which glyph, if any, stands in for another
pub trait GlyphMapping {
    /// The counterpart of `glyph`, or `None` if it has none
    fn counterpart(&self, glyph: &str) -> Option<SmolStr>;
}

impl<F> GlyphMapping for F
where
    F: Fn(&str) -> Option<SmolStr>,
{
    fn counterpart(&self, glyph: &str) -> Option<SmolStr> {
        self(glyph)
    }
}

/// Maps glyphs to their `.sc` small-cap forms.
///
/// Uppercase letters try `<name>.sc`, then `<lowercase name>.sc` (so `A` can
/// map to `a.sc`); anything else tries `<name>.sc`. Only names present in the
/// font are returned, and small caps are never mapped again.
#[derive(Debug, Clone, Default)]
pub struct SmallCapsMapping {
    glyphs: HashSet<SmolStr>,
    uppercase: HashSet<SmolStr>,
}

impl SmallCapsMapping {
    /// A mapping onto the `.sc` glyphs present in `glyphs`
    pub fn new<'a, I>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = &'a GlyphRecord>,
    {
        let mut mapping = SmallCapsMapping::default();
        for glyph in glyphs {
            if classify(glyph).case == Case::Upper {
                mapping.uppercase.insert(glyph.name.clone());
            }
            mapping.glyphs.insert(glyph.name.clone());
        }
        mapping
    }
}

impl GlyphMapping for SmallCapsMapping {
    fn counterpart(&self, glyph: &str) -> Option<SmolStr> {
        if glyph.contains(".sc") {
            return None;
        }
        let mut candidates = vec![format_smolstr!("{}.sc", glyph)];
        if self.uppercase.contains(glyph) {
            candidates.push(format_smolstr!("{}.sc", glyph.to_lowercase()));
        }
        candidates.into_iter().find(|c| self.glyphs.contains(c))
    }
}

/// Options for a retarget pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetargetOptions {
    /// Multiplier applied to every source value
    pub factor: f64,
    /// Replace values already present at a target pair
    pub overwrite: bool,
    /// Log every pair written or skipped
    pub debug: bool,
}

impl Default for RetargetOptions {
    fn default() -> Self {
        RetargetOptions {
            factor: 1.0,
            overwrite: false,
            debug: false,
        }
    }
}

impl TryFrom<&Config> for RetargetOptions {
    type Error = KernToolsError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(RetargetOptions {
            factor: config.factor(),
            overwrite: config.overwrite,
            debug: config.debug_mode,
        })
    }
}

/// What a retarget pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetargetReport {
    /// Target pairs which had no value before
    pub created: usize,
    /// Target pairs whose value was replaced
    pub updated: usize,
    /// Target pairs left alone because they already had a value
    pub skipped_existing: usize,
    /// Writes the font refused
    pub write_failures: usize,
}

impl std::fmt::Display for RetargetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} new pairs, {} updated, {} existing pairs kept, {} write failures",
            self.created, self.updated, self.skipped_existing, self.write_failures
        )
    }
}

/// The keys a source key turns into on the target side
fn targets_for<M: GlyphMapping + ?Sized>(
    key: &Key,
    groups: &GroupIndex,
    keys: &KeyModel,
    mapping: &M,
) -> Vec<Key> {
    let map_glyph = |glyph: &str| mapping.counterpart(glyph).filter(|m| keys.has_glyph(m));
    match key {
        Key::Glyph(name) => map_glyph(name.as_str()).map(Key::Glyph).into_iter().collect(),
        Key::Group(side, name) => {
            if let Some(mapped) = mapping.counterpart(name) {
                if groups.exists(*side, &mapped) {
                    return vec![Key::Group(*side, mapped)];
                }
            }
            groups
                .members_of(*side, name)
                .iter()
                .filter_map(|member| map_glyph(member.as_str()))
                .map(Key::Glyph)
                .collect()
        }
    }
}

/// How a candidate value for a target pair ranks against others for the
/// same pair: more literal sources first, then the smallest source pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Precedence {
    groups_in_source: usize,
    source: (SmolStr, SmolStr),
}

/// Write counterpart kerning for every entry whose keys have counterparts.
///
/// Glyph keys map through `mapping`. A group key maps to the group named by
/// the counterpart of its name if that group exists on the same side, and
/// otherwise fans out to the counterparts of each of its members. Each target
/// pair is written at most once, with the source value times
/// `options.factor`, rounded half away from zero.
pub fn retarget<P, M>(
    table: &mut KerningTable<'_, P>,
    groups: &GroupIndex,
    keys: &KeyModel,
    mapping: &M,
    options: &RetargetOptions,
) -> Result<RetargetReport, KernToolsError>
where
    P: FontModelProvider + ?Sized,
    M: GlyphMapping + ?Sized,
{
    if !options.factor.is_finite() || options.factor <= 0.0 {
        return Err(KernToolsError::InvalidParameter(format!(
            "scale factor must be a positive number, got {}",
            options.factor
        )));
    }
    let level = if options.debug {
        Level::Info
    } else {
        Level::Trace
    };

    let mut planned: IndexMap<(SmolStr, SmolStr), (Precedence, i32)> = IndexMap::new();
    for pair in table.entries()? {
        let (Ok(left), Ok(right)) = (
            keys.resolve(&pair.left),
            keys.resolve(&pair.right),
        ) else {
            log::log!(level, "Skipping unresolvable pair {} {}", pair.left, pair.right);
            continue;
        };
        let lefts = targets_for(&left, groups, keys, mapping);
        let rights = targets_for(&right, groups, keys, mapping);
        if lefts.is_empty() || rights.is_empty() {
            log::log!(level, "No counterpart for {} {}", pair.left, pair.right);
            continue;
        }
        let precedence = Precedence {
            groups_in_source: usize::from(left.is_group()) + usize::from(right.is_group()),
            source: (pair.left.clone(), pair.right.clone()),
        };
        let value = scale_value(pair.value, options.factor);
        for target_left in &lefts {
            for target_right in &rights {
                let target = (KeyModel::format(target_left), KeyModel::format(target_right));
                if target.0 == pair.left && target.1 == pair.right {
                    continue;
                }
                match planned.get(&target) {
                    Some((existing, _)) if *existing <= precedence => {}
                    _ => {
                        planned.insert(target, (precedence.clone(), value));
                    }
                }
            }
        }
    }

    let mut report = RetargetReport::default();
    for ((left, right), (_, value)) in planned {
        let existing = table.get_raw(&left, &right);
        if existing.is_some() && !options.overwrite {
            log::log!(level, "Kept existing {} {}", left, right);
            report.skipped_existing += 1;
            continue;
        }
        if let Err(e) = table.set_raw(&left, &right, value) {
            log::warn!("{}", e);
            report.write_failures += 1;
            continue;
        }
        if existing.is_some() {
            log::log!(level, "Updated {} {} = {}", left, right, value);
            report.updated += 1;
        } else {
            log::log!(level, "Created {} {} = {}", left, right, value);
            report.created += 1;
        }
    }
    log::info!("Master {}: {}", table.master(), report);
    Ok(report)
}

/// Retarget one master's kerning onto small caps, taking the factor and
/// flags from `config`. The config is checked before anything is written.
pub fn small_caps_master<P>(
    provider: &mut P,
    master: &str,
    config: &Config,
) -> Result<RetargetReport, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let options = RetargetOptions::try_from(config)?;
    let glyphs = provider.list_glyphs()?;
    let groups = GroupIndex::build(&glyphs);
    let mapping = SmallCapsMapping::new(&glyphs);
    let keys = KeyModel::snapshot(provider, master)?;
    batch(provider, |provider| {
        let mut table = KerningTable::new(provider, master)?;
        retarget(&mut table, &groups, &keys, &mapping, &options)
    })
}
