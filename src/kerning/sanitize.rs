//! Removing dangling kerning and bringing keys into canonical form.
use smol_str::SmolStr;

use crate::{
    kerning::{GroupIndex, Key, KeyModel, KerningTable, ResolutionError, Side},
    provider::{batch, FontModelProvider},
    KernToolsError,
};

/// What a sanitize pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Entries deleted because a key no longer resolves
    pub ghost_removed: usize,
    /// Entries rewritten under canonical keys
    pub canonicalized: usize,
    /// Writes the font refused
    pub write_failures: usize,
}

impl std::fmt::Display for SanitizeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ghost pairs removed, {} pairs converted, {} write failures",
            self.ghost_removed, self.canonicalized, self.write_failures
        )
    }
}

/// Resolve a raw key and check that a group key names a live group
fn validate(raw: &str, groups: &GroupIndex, keys: &KeyModel) -> Result<Key, ResolutionError> {
    let key = keys.resolve(raw)?;
    if let Key::Group(side, name) = &key {
        if !groups.exists(*side, name) {
            return Err(ResolutionError::Unresolvable {
                key: raw.to_string(),
            });
        }
    }
    Ok(key)
}

/// The preferred form of a key at `position`: a glyph with a group on that
/// side is kerned through its group.
fn canonical(key: Key, position: Side, groups: &GroupIndex) -> Key {
    match key {
        Key::Glyph(name) => match groups.group_of(position, &name) {
            Some(group) => Key::Group(position, group.clone()),
            None => Key::Glyph(name),
        },
        group => group,
    }
}

/// Clean one master's kerning.
///
/// First every entry with a key that resolves to nothing is deleted. Then,
/// over a fresh snapshot, every remaining entry whose keys are not in
/// canonical form is moved to its canonical keys. A write the font rejects is
/// logged and counted; it never stops the pass. Failing to read the table
/// does.
pub fn sanitize<P>(
    table: &mut KerningTable<'_, P>,
    groups: &GroupIndex,
    keys: &KeyModel,
) -> Result<SanitizeReport, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let mut report = SanitizeReport::default();

    for pair in table.entries()? {
        let left = validate(&pair.left, groups, keys);
        let right = validate(&pair.right, groups, keys);
        if let (Ok(_), Ok(_)) = (&left, &right) {
            continue;
        }
        for err in [left.err(), right.err()].into_iter().flatten() {
            log::debug!("{}", err);
        }
        match table.delete_raw(&pair.left, &pair.right) {
            Ok(()) => report.ghost_removed += 1,
            Err(e) => {
                log::warn!("Could not remove ghost pair: {}", e);
                report.write_failures += 1;
            }
        }
    }
    log::info!(
        "Master {}: {} ghost pairs removed",
        table.master(),
        report.ghost_removed
    );

    for pair in table.entries()? {
        let (Ok(left), Ok(right)) = (
            keys.resolve(&pair.left),
            keys.resolve(&pair.right),
        ) else {
            continue;
        };
        let new_left: SmolStr = KeyModel::format(&canonical(left, Side::Left, groups));
        let new_right: SmolStr = KeyModel::format(&canonical(right, Side::Right, groups));
        if new_left == pair.left && new_right == pair.right {
            continue;
        }
        log::debug!(
            "Converting {} {} to {} {}",
            pair.left,
            pair.right,
            new_left,
            new_right
        );
        if let Err(e) = table.set_raw(&new_left, &new_right, pair.value) {
            log::warn!("{}", e);
            report.write_failures += 1;
            continue;
        }
        match table.delete_raw(&pair.left, &pair.right) {
            Ok(()) => report.canonicalized += 1,
            Err(e) => {
                log::warn!("{}", e);
                report.write_failures += 1;
            }
        }
    }
    log::info!(
        "Master {}: {} pairs converted",
        table.master(),
        report.canonicalized
    );
    Ok(report)
}

/// Sanitize the kerning of one master, building the group index and key
/// model from the font's current state. All writes happen in one batch.
pub fn sanitize_master<P>(provider: &mut P, master: &str) -> Result<SanitizeReport, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let glyphs = provider.list_glyphs()?;
    let groups = GroupIndex::build(&glyphs);
    let keys = KeyModel::snapshot(provider, master)?;
    batch(provider, |provider| {
        let mut table = KerningTable::new(provider, master)?;
        sanitize(&mut table, &groups, &keys)
    })
}

/// Give every `<base>.sc` glyph the side groups of `<base>` where it has
/// none of its own. Returns the number of groups assigned.
pub fn relink_small_caps<P>(provider: &mut P) -> Result<usize, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let glyphs = provider.list_glyphs()?;
    let mut assignments = vec![];
    for glyph in &glyphs {
        let Some(base_name) = glyph.name.strip_suffix(".sc") else {
            continue;
        };
        let Some(base) = glyphs.iter().find(|g| g.name == base_name) else {
            continue;
        };
        for side in [Side::Left, Side::Right] {
            if glyph.group(side).is_none() {
                if let Some(group) = base.group(side) {
                    assignments.push((glyph.name.clone(), side, group.clone()));
                }
            }
        }
    }
    let mut assigned = 0;
    batch(provider, |provider| {
        for (glyph, side, group) in assignments {
            match provider.assign_group(&glyph, side, &group) {
                Ok(()) => assigned += 1,
                Err(e) => log::warn!("Could not relink {}: {}", glyph, e),
            }
        }
    });
    log::info!("{} .sc glyph groups re-linked", assigned);
    Ok(assigned)
}

/// Give every glyph without a group on a side a group named after itself.
/// Returns the number of groups assigned.
pub fn auto_assign_groups<P>(provider: &mut P) -> Result<usize, KernToolsError>
where
    P: FontModelProvider + ?Sized,
{
    let glyphs = provider.list_glyphs()?;
    let mut assigned = 0;
    batch(provider, |provider| {
        for glyph in &glyphs {
            for side in [Side::Left, Side::Right] {
                if glyph.group(side).is_some() {
                    continue;
                }
                match provider.assign_group(&glyph.name, side, &glyph.name) {
                    Ok(()) => assigned += 1,
                    Err(e) => log::warn!("Could not assign group to {}: {}", glyph.name, e),
                }
            }
        }
    });
    log::info!("{} kerning groups assigned", assigned);
    Ok(assigned)
}
