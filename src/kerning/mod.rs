//! The kerning engine: key parsing, group lookup, and the bulk operations
//! run over a master's kerning.
mod backup;
mod classify;
mod groups;
mod key;
mod retarget;
mod sanitize;
mod table;

pub use backup::{export, export_master, import, import_master, ImportReport, KerningBackup};
pub use classify::{classify, classify_codepoint, Case, GlyphClass, Script};
pub use groups::GroupIndex;
pub use key::{
    is_opaque_id, Key, KeyModel, ResolutionError, Side, LEFT_GROUP_PREFIX, RIGHT_GROUP_PREFIX,
};
pub use retarget::{
    retarget, small_caps_master, GlyphMapping, RetargetOptions, RetargetReport, SmallCapsMapping,
};
pub use sanitize::{auto_assign_groups, relink_small_caps, sanitize, sanitize_master, SanitizeReport};
pub use table::{scale_value, KerningPair, KerningTable};
