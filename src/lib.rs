//! # Kerntools
//!
//! Kerntools is a library for cleaning up and transforming the kerning of a
//! font source. It works on a font through the [`provider::FontModelProvider`]
//! trait, so the same operations can run against any editor's font model; an
//! in-memory [`Font`] stored as JSON is included.
//!
//! ## Kerning keys
//!
//! Kerning is stored per master as `left -> right -> value`, with each key in
//! its raw textual form: a glyph name, a side group (`@MMK_L_name` or
//! `@MMK_R_name`), or an opaque glyph identifier. The
//! [`kerning::KeyModel`] turns raw keys into [`kerning::Key`]s and back.
//!
//! ## Operations
//!
//! - [`kerning::sanitize`]: remove pairs whose glyphs or groups no longer
//!   exist, and move glyph kerning onto the glyph's group
//! - [`kerning::retarget`]: derive kerning for variant glyphs, such as small
//!   caps, from their base glyphs
//! - [`kerning::KerningTable::scale`] and
//!   [`kerning::KerningTable::remove_small`]: bulk value edits
//! - [`kerning::export`] and [`kerning::import`]: JSON backups
//! - [`roughen`]: resample and roughen outlines
//!
//! ## Font Filters
//!
//! Each operation is also available as a filter implementing
//! [`filters::FontFilter`], so they can be chained:
//!
//! ```no_run
//! use kerntools::{load, KernToolsError};
//! use kerntools::filters::{FontFilter, SanitizeKerning, SmallCapsKerning};
//!
//! fn main() -> Result<(), KernToolsError> {
//!     let mut font = load("MyFont.json")?;
//!     SanitizeKerning::new().apply(&mut font)?;
//!     SmallCapsKerning::from_str("80,overwrite")?.apply(&mut font)?;
//!     font.save("MyFont-kerned.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: build the `kerntools` command-line tool

#![deny(clippy::unwrap_used, clippy::expect_used)]

mod common;
/// Kerning settings
pub mod config;
mod error;
/// Filters for font processing
pub mod filters;
mod font;
mod glyph;
/// The kerning engine
pub mod kerning;
mod layer;
mod master;
/// The interface to a font model
pub mod provider;
/// Outline roughening
pub mod roughen;
mod shape;

pub use crate::{
    common::{Node, NodeType},
    config::Config,
    error::KernToolsError,
    font::Font,
    glyph::{Glyph, GlyphList},
    layer::Layer,
    master::{KerningMap, Master},
    shape::{Path, Segment},
};
use std::path::PathBuf;
pub use smol_str::SmolStr;

/// Load a font from a JSON file
pub fn load(filename: impl Into<PathBuf>) -> Result<Font, KernToolsError> {
    let pb = filename.into();
    let pb_clone = pb.clone();

    let mut font: Font = match pb.extension() {
        Some(ext) if ext == "json" => {
            let buffered = std::io::BufReader::new(std::fs::File::open(&pb)?);
            Ok(serde_json::from_reader(buffered)?)
        }
        _ => Err(KernToolsError::UnknownFileType { path: pb }),
    }?;
    font.source = Some(pb_clone);
    Ok(font)
}
