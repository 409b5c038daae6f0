use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while using the kerntools crate
#[derive(Debug, Error)]
pub enum KernToolsError {
    /// No font is available to operate on
    #[error("No font loaded")]
    NoFontLoaded,

    /// A parameter was rejected before any mutation took place
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The font model rejected a kerning write
    #[error("Could not write kerning {left} / {right}: {reason}")]
    WriteFailure {
        /// The raw left key
        left: String,
        /// The raw right key
        right: String,
        /// Why the write was rejected
        reason: String,
    },

    #[error("Master not found: {0}")]
    /// Could not find the specified master
    MasterNotFound(String),

    #[error("Glyph {glyph} not found")]
    /// A glyph was not found
    GlyphNotFound {
        /// The name of the glyph requested
        glyph: String,
    },

    #[error("Unknown file type for file {path:?}")]
    /// The file type is unknown
    UnknownFileType {
        /// The path of the file
        path: PathBuf,
    },

    #[error("IO Error: {0}")]
    /// IO error
    IO(#[from] io::Error),

    #[error("JSON conversion error: {0}")]
    /// JSON conversion error
    JsonSerialize(#[from] serde_json::Error),

    #[error("Filter error: {0}")]
    /// General error when running a filter
    FilterError(String),

    #[error("Ill-constructed path")]
    /// A path could not be constructed properly
    BadPath,
}
