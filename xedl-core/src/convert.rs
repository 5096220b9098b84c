//! XML project to EDL conversion pipeline

use crate::config::ConvertConfig;
use crate::edl::{assemble, build_events, sequence_title};
use crate::project::parse_project;
use crate::Result;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem to name the EDL output
pub const OUTPUT_SUFFIX: &str = "_converted.edl";

/// A complete EDL document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlDocument {
    /// Document title (sequence name or the default name)
    pub title: String,
    /// Document lines, without line terminators
    pub lines: Vec<String>,
    /// Number of converted clips
    pub clip_count: usize,
}

impl EdlDocument {
    /// Joins the lines with `\n`. No newline is added after the last line.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for EdlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Converts an xmeml document into an EDL document.
///
/// Nothing is produced when the document is not well-formed.
pub fn convert(data: &[u8], config: &ConvertConfig) -> Result<EdlDocument> {
    config.validate()?;

    let sequence = parse_project(data)?;
    let events = build_events(&sequence, config);
    let lines = assemble(&sequence, &events, config);
    let title = sequence_title(&sequence, config).to_string();

    info!(
        "Converted sequence '{}': {} events at {} fps",
        title,
        events.len(),
        config.fps
    );

    Ok(EdlDocument {
        title,
        lines,
        clip_count: events.len(),
    })
}

/// Reads and converts an xmeml file
pub fn convert_file<P: AsRef<Path>>(path: P, config: &ConvertConfig) -> Result<EdlDocument> {
    let data = std::fs::read(path.as_ref())?;
    convert(&data, config)
}

/// Suggested EDL path for an input file: same directory, extension replaced
/// by [`OUTPUT_SUFFIX`].
pub fn suggested_output_name<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_convert_empty_sequence() {
        let xml = b"<xmeml><sequence><name></name></sequence></xmeml>";
        let doc = convert(xml, &ConvertConfig::default()).unwrap();

        assert_eq!(doc.title, "Sequence 1");
        assert_eq!(doc.clip_count, 0);
        assert_eq!(doc.to_text(), "TITLE: Sequence 1\nFCM: NON-DROP FRAME\n");
    }

    #[test]
    fn test_convert_rejects_zero_fps() {
        let config = ConvertConfig::default().with_fps(0);
        let result = convert(b"<xmeml/>", &config);
        assert!(matches!(result, Err(Error::InvalidFrameRate(0))));
    }

    #[test]
    fn test_display_matches_text() {
        let xml = b"<xmeml><sequence><name>Cut</name></sequence></xmeml>";
        let doc = convert(xml, &ConvertConfig::default()).unwrap();
        assert_eq!(doc.to_string(), doc.to_text());
    }

    #[test]
    fn test_suggested_output_name() {
        assert_eq!(
            suggested_output_name("a/b/show.xml"),
            PathBuf::from("a/b/show_converted.edl")
        );
        assert_eq!(
            suggested_output_name("project.v2.xml"),
            PathBuf::from("project.v2_converted.edl")
        );
        assert_eq!(suggested_output_name("noext"), PathBuf::from("noext_converted.edl"));
    }
}
