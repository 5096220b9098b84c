//! xedl Core Library
//!
//! This library converts xmeml editing projects into CMX-style Edit Decision
//! Lists: project parsing, timecode arithmetic and EDL event generation.

pub mod config;
pub mod convert;
pub mod edl;
pub mod project;
pub mod timecode;

pub use config::ConvertConfig;
pub use convert::{convert, convert_file, suggested_output_name, EdlDocument};
pub use edl::{assemble, build_events, EdlEvent};
pub use project::{parse_project, ClipItem, Sequence, SourceFile, Track};
pub use timecode::{frames_to_timecode, timecode_to_frames};

/// Result type for xedl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for xedl-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed project: {0}")]
    Deserialize(#[from] quick_xml::DeError),

    #[error("Project is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Unexpected root element <{0}>, expected <xmeml>")]
    UnexpectedRoot(String),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(u32),
}
