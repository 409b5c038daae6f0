use regex::Regex;
use serde::{Deserialize, Serialize};
use smol_str::{format_smolstr, SmolStr};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::LazyLock,
};
use thiserror::Error;

use crate::{provider::FontModelProvider, KernToolsError};

/// Raw-key marker for a group on the left of a pair
pub const LEFT_GROUP_PREFIX: &str = "@MMK_L_";
/// Raw-key marker for a group on the right of a pair
pub const RIGHT_GROUP_PREFIX: &str = "@MMK_R_";

// 8-4-4-4-12 hex digits, as written by editors before a glyph has a stable name.
#[allow(clippy::unwrap_used)]
static OPAQUE_ID_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$")
        .unwrap()
});

/// Whether a raw key looks like an opaque glyph identifier
pub fn is_opaque_id(raw: &str) -> bool {
    OPAQUE_ID_MATCHER.is_match(raw) && uuid::Uuid::try_parse(raw).is_ok()
}

/// Which side of a kerning pair a group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The first glyph of a pair
    Left,
    /// The second glyph of a pair
    Right,
}

impl Side {
    /// The raw-key marker for groups on this side
    pub fn prefix(&self) -> &'static str {
        match self {
            Side::Left => LEFT_GROUP_PREFIX,
            Side::Right => RIGHT_GROUP_PREFIX,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// One participant in a kerning pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A single glyph, by name
    Glyph(SmolStr),
    /// A side group, by plain group name
    Group(Side, SmolStr),
}

impl Key {
    /// A glyph key
    pub fn glyph(name: impl Into<SmolStr>) -> Self {
        Key::Glyph(name.into())
    }

    /// A group key
    pub fn group(side: Side, name: impl Into<SmolStr>) -> Self {
        Key::Group(side, name.into())
    }

    /// The glyph or group name, without any side marker
    pub fn name(&self) -> &SmolStr {
        match self {
            Key::Glyph(name) | Key::Group(_, name) => name,
        }
    }

    /// Whether this is a group key
    pub fn is_group(&self) -> bool {
        matches!(self, Key::Group(..))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", KeyModel::format(self))
    }
}

/// Why a raw key could not be turned into a [`Key`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The key names no glyph, no group and no known identifier
    #[error("Kerning key {key:?} does not resolve to a glyph or group")]
    Unresolvable {
        /// The raw key
        key: String,
    },
}

/// Parses raw kerning keys against a snapshot of the font's glyph set.
///
/// Opaque identifiers are looked up through the provider when the snapshot is
/// taken, so resolving keys afterwards needs no access to the font.
#[derive(Debug, Clone, Default)]
pub struct KeyModel {
    glyphs: HashSet<SmolStr>,
    opaque: HashMap<SmolStr, SmolStr>,
}

impl KeyModel {
    /// A key model knowing only the given glyph names
    pub fn new<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        KeyModel {
            glyphs: glyphs.into_iter().map(Into::into).collect(),
            opaque: HashMap::new(),
        }
    }

    /// Teach the model what an opaque identifier stands for
    pub fn with_opaque_id(mut self, id: impl Into<SmolStr>, glyph: impl Into<SmolStr>) -> Self {
        self.opaque.insert(id.into(), glyph.into());
        self
    }

    /// Snapshot the glyph set of `provider`, resolving every opaque identifier
    /// used as a key in the given master's kerning.
    pub fn snapshot<P>(provider: &P, master: &str) -> Result<Self, KernToolsError>
    where
        P: FontModelProvider + ?Sized,
    {
        let glyphs = provider.list_glyphs()?;
        let mut model = KeyModel::new(glyphs.into_iter().map(|g| g.name));
        for pair in provider.get_kerning(master)? {
            for raw in [&pair.left, &pair.right] {
                model.learn(provider, raw);
            }
        }
        Ok(model)
    }

    /// Resolve `raw` through `provider` if it is an opaque identifier not yet seen
    pub fn learn<P>(&mut self, provider: &P, raw: &str)
    where
        P: FontModelProvider + ?Sized,
    {
        if self.glyphs.contains(raw) || self.opaque.contains_key(raw) || !is_opaque_id(raw) {
            return;
        }
        if let Some(name) = provider.resolve_opaque_id(raw) {
            log::trace!("Opaque id {} is glyph {}", raw, name);
            self.opaque.insert(SmolStr::from(raw), name);
        }
    }

    /// Whether a glyph of this name exists
    pub fn has_glyph(&self, name: &str) -> bool {
        self.glyphs.contains(name)
    }

    /// Classify a raw key.
    ///
    /// Side-marked keys are groups on the marked side whatever their position.
    /// Otherwise the key must be a known glyph name or a resolvable opaque
    /// identifier; a bare `@name` is neither and does not resolve.
    pub fn resolve(&self, raw: &str) -> Result<Key, ResolutionError> {
        if let Some(name) = raw.strip_prefix(LEFT_GROUP_PREFIX) {
            return Self::group_key(raw, Side::Left, name);
        }
        if let Some(name) = raw.strip_prefix(RIGHT_GROUP_PREFIX) {
            return Self::group_key(raw, Side::Right, name);
        }
        if self.glyphs.contains(raw) {
            return Ok(Key::Glyph(SmolStr::from(raw)));
        }
        if let Some(name) = self.opaque.get(raw) {
            if self.glyphs.contains(name) {
                return Ok(Key::Glyph(name.clone()));
            }
        }
        Err(ResolutionError::Unresolvable {
            key: raw.to_string(),
        })
    }

    fn group_key(raw: &str, side: Side, name: &str) -> Result<Key, ResolutionError> {
        if name.is_empty() {
            return Err(ResolutionError::Unresolvable {
                key: raw.to_string(),
            });
        }
        Ok(Key::Group(side, SmolStr::from(name)))
    }

    /// Write a key back in raw form
    pub fn format(key: &Key) -> SmolStr {
        match key {
            Key::Glyph(name) => name.clone(),
            Key::Group(side, name) => format_smolstr!("{}{}", side.prefix(), name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn model() -> KeyModel {
        KeyModel::new(["A", "V", "a", "T"]).with_opaque_id(ID, "a")
    }

    #[rstest]
    #[case("@MMK_L_o", Key::group(Side::Left, "o"))]
    #[case("@MMK_R_o", Key::group(Side::Right, "o"))]
    #[case("A", Key::glyph("A"))]
    #[case(ID, Key::glyph("a"))]
    fn test_resolve(#[case] raw: &str, #[case] expected: Key) {
        assert_eq!(model().resolve(raw), Ok(expected));
    }

    #[rstest]
    #[case("B")]
    #[case("@MMK_L_")]
    #[case("@")]
    #[case("@H")]
    #[case("@o")]
    #[case("00000000-0000-4000-8000-000000000000")]
    fn test_unresolvable(#[case] raw: &str) {
        assert_eq!(
            model().resolve(raw),
            Err(ResolutionError::Unresolvable {
                key: raw.to_string()
            })
        );
    }

    #[test]
    fn test_format_inverts_resolve() {
        let model = model();
        for raw in ["@MMK_L_o", "@MMK_R_H", "A"] {
            let key = model.resolve(raw).unwrap();
            assert_eq!(KeyModel::format(&key), raw);
        }
        assert_eq!(KeyModel::format(&Key::group(Side::Right, "o")), "@MMK_R_o");
    }

    #[test]
    fn test_opaque_id_shape() {
        assert!(is_opaque_id(ID));
        assert!(!is_opaque_id("3fa85f6457174562b3fc2c963f66afa6"));
        assert!(!is_opaque_id("A"));
        assert!(!is_opaque_id("zzzzzzzz-5717-4562-b3fc-2c963f66afa6"));
    }
}
