use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::HashMap;

use crate::{kerning::Side, provider::GlyphRecord};

/// Which glyphs currently belong to which side group.
///
/// This is a snapshot: change a glyph's groups and the index must be rebuilt.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    left: IndexMap<SmolStr, Vec<SmolStr>>,
    right: IndexMap<SmolStr, Vec<SmolStr>>,
    memberships: HashMap<SmolStr, (Option<SmolStr>, Option<SmolStr>)>,
}

impl GroupIndex {
    /// Build the index from a glyph set. Members keep glyph order.
    pub fn build<'a, I>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = &'a GlyphRecord>,
    {
        let mut index = GroupIndex::default();
        for glyph in glyphs {
            let left = glyph.group(Side::Left).cloned();
            let right = glyph.group(Side::Right).cloned();
            if let Some(group) = &left {
                Self::push(&mut index.left, group, &glyph.name);
            }
            if let Some(group) = &right {
                Self::push(&mut index.right, group, &glyph.name);
            }
            index.memberships.insert(glyph.name.clone(), (left, right));
        }
        index
    }

    fn push(buckets: &mut IndexMap<SmolStr, Vec<SmolStr>>, group: &SmolStr, glyph: &SmolStr) {
        let members = buckets.entry(group.clone()).or_default();
        if !members.contains(glyph) {
            members.push(glyph.clone());
        }
    }

    fn side(&self, side: Side) -> &IndexMap<SmolStr, Vec<SmolStr>> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The glyphs in a group; empty when the group is unknown
    pub fn members_of(&self, side: Side, group: &str) -> &[SmolStr] {
        self.side(side)
            .get(group)
            .map(|members| members.as_slice())
            .unwrap_or(&[])
    }

    /// A group exists while at least one glyph refers to it
    pub fn exists(&self, side: Side, group: &str) -> bool {
        !self.members_of(side, group).is_empty()
    }

    /// The group a glyph belongs to on the given side
    pub fn group_of(&self, side: Side, glyph: &str) -> Option<&SmolStr> {
        self.memberships
            .get(glyph)
            .and_then(|(left, right)| match side {
                Side::Left => left.as_ref(),
                Side::Right => right.as_ref(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glyphs() -> Vec<GlyphRecord> {
        vec![
            GlyphRecord::new("T").with_group(Side::Left, "T"),
            GlyphRecord::new("Tcaron")
                .with_group(Side::Left, "T")
                .with_group(Side::Right, "Tcaron"),
            GlyphRecord::new("o").with_group(Side::Right, "o"),
            GlyphRecord::new("space").with_group(Side::Left, ""),
        ]
    }

    #[test]
    fn test_members_keep_glyph_order() {
        let index = GroupIndex::build(&glyphs());
        assert_eq!(index.members_of(Side::Left, "T"), &["T", "Tcaron"]);
        assert_eq!(index.members_of(Side::Right, "o"), &["o"]);
        assert!(index.members_of(Side::Right, "T").is_empty());
        assert!(index.members_of(Side::Left, "nonesuch").is_empty());
    }

    #[test]
    fn test_empty_group_names_are_ignored() {
        let index = GroupIndex::build(&glyphs());
        assert!(!index.exists(Side::Left, ""));
        assert_eq!(index.group_of(Side::Left, "space"), None);
        assert!(index.members_of(Side::Left, "").is_empty());
    }

    #[test]
    fn test_group_of() {
        let index = GroupIndex::build(&glyphs());
        assert_eq!(
            index.group_of(Side::Right, "Tcaron").map(|g| g.as_str()),
            Some("Tcaron")
        );
        assert_eq!(index.group_of(Side::Right, "T"), None);
        assert_eq!(index.group_of(Side::Left, "missing"), None);
    }
}
