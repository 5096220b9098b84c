//! Project model and XML (xmeml) parsing
//!
//! Only the parts of an xmeml document needed to build an EDL are decoded:
//! the sequence, its video tracks and their clip items. Everything else in the
//! document is skipped.

use crate::timecode::parse_frames;
use crate::{Error, Result};
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

/// Name of the document root element
const ROOT_ELEMENT: &str = "xmeml";

/// A parsed editing sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sequence {
    /// Sequence identifier (may be empty)
    pub id: String,
    /// Display name (may be empty)
    pub name: String,
    /// Video tracks, in document order
    pub tracks: Vec<Track>,
}

impl Sequence {
    /// Total number of clip items across all tracks
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }

    /// Iterates over every clip in track order, then clip order
    pub fn clips(&self) -> impl Iterator<Item = &ClipItem> {
        self.tracks.iter().flat_map(|t| t.clips.iter())
    }
}

/// A video track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    pub name: String,
    /// Clip items, in document order
    pub clips: Vec<ClipItem>,
}

/// A clip placed on a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClipItem {
    pub name: String,
    /// Source in point, in frames relative to the media start timecode
    pub in_frame: i64,
    /// Source out point, in frames relative to the media start timecode
    pub out_frame: i64,
    /// Record in point on the sequence timeline, in frames
    pub start: u64,
    /// Record out point on the sequence timeline, in frames
    pub end: u64,
    pub file: SourceFile,
}

/// The media file a clip refers to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// File identifier, used as the reel name when present
    pub id: String,
    pub name: String,
    /// Path or URL of the media
    pub path_url: String,
    /// Starting timecode of the media (`HH:MM:SS:FF`)
    pub timecode: String,
}

// Raw document shape. Every child element is collected as a list so that a
// repeated element never fails the decode: repeated text elements keep the
// last value, repeated containers are merged into one.

#[derive(Debug, Default, Deserialize)]
struct XmemlDoc {
    #[serde(default)]
    sequence: Vec<SequenceElement>,
}

#[derive(Debug, Default, Deserialize)]
struct SequenceElement {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Vec<String>,
    #[serde(default)]
    media: Vec<MediaElement>,
}

#[derive(Debug, Default, Deserialize)]
struct MediaElement {
    #[serde(default)]
    video: Vec<VideoElement>,
}

#[derive(Debug, Default, Deserialize)]
struct VideoElement {
    #[serde(rename = "track", default)]
    tracks: Vec<TrackElement>,
}

#[derive(Debug, Default, Deserialize)]
struct TrackElement {
    #[serde(default)]
    name: Vec<String>,
    #[serde(rename = "clipitem", default)]
    clips: Vec<ClipItemElement>,
}

#[derive(Debug, Default, Deserialize)]
struct ClipItemElement {
    #[serde(default)]
    name: Vec<String>,
    #[serde(rename = "in", default)]
    in_point: Vec<String>,
    #[serde(rename = "out", default)]
    out_point: Vec<String>,
    #[serde(default)]
    start: Vec<String>,
    #[serde(default)]
    end: Vec<String>,
    #[serde(default)]
    file: Vec<FileElement>,
}

#[derive(Debug, Default, Deserialize)]
struct FileElement {
    #[serde(rename = "@id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Vec<String>,
    #[serde(default)]
    pathurl: Vec<String>,
    #[serde(default)]
    timecode: Vec<TimecodeElement>,
}

#[derive(Debug, Default, Deserialize)]
struct TimecodeElement {
    #[serde(default)]
    string: Vec<String>,
}

/// Folds repeated occurrences of one element into a single value
trait Merge: Default {
    fn merge(&mut self, later: Self);
}

impl Merge for SequenceElement {
    fn merge(&mut self, later: Self) {
        if later.id.is_some() {
            self.id = later.id;
        }
        self.name.extend(later.name);
        self.media.extend(later.media);
    }
}

impl Merge for MediaElement {
    fn merge(&mut self, later: Self) {
        self.video.extend(later.video);
    }
}

impl Merge for VideoElement {
    fn merge(&mut self, later: Self) {
        self.tracks.extend(later.tracks);
    }
}

impl Merge for FileElement {
    fn merge(&mut self, later: Self) {
        if later.id.is_some() {
            self.id = later.id;
        }
        self.name.extend(later.name);
        self.pathurl.extend(later.pathurl);
        self.timecode.extend(later.timecode);
    }
}

impl Merge for TimecodeElement {
    fn merge(&mut self, later: Self) {
        self.string.extend(later.string);
    }
}

fn merged<T: Merge>(elements: Vec<T>) -> T {
    elements.into_iter().fold(T::default(), |mut acc, element| {
        acc.merge(element);
        acc
    })
}

/// Value of the last occurrence of a text element
fn last(values: Vec<String>) -> String {
    values.into_iter().last().unwrap_or_default()
}

/// Parses an xmeml document into a [`Sequence`].
///
/// Fails only when the document is not well-formed XML, is not UTF-8, or does
/// not have an `xmeml` root element. Missing elements become empty values and
/// unparsable frame numbers become zero.
pub fn parse_project(data: &[u8]) -> Result<Sequence> {
    let text = std::str::from_utf8(data)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    check_root(text)?;
    let doc: XmemlDoc = quick_xml::de::from_str(text)?;

    let sequence = Sequence::from(merged(doc.sequence));
    debug!(
        "Parsed sequence '{}' with {} tracks and {} clips",
        sequence.name,
        sequence.tracks.len(),
        sequence.clip_count()
    );
    Ok(sequence)
}

/// Verifies that the first element of the document is `<xmeml>`
fn check_root(text: &str) -> Result<()> {
    let mut reader = Reader::from_str(text);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                return if name == ROOT_ELEMENT {
                    Ok(())
                } else {
                    Err(Error::UnexpectedRoot(name))
                };
            }
            Event::Eof => return Err(Error::MissingRoot),
            _ => {}
        }
    }
}

/// Parses a signed frame offset, treating anything unparsable as zero
fn lenient_offset(field: &str, text: &str) -> i64 {
    let text = text.trim();
    match text.parse() {
        Ok(value) => value,
        Err(_) => {
            if !text.is_empty() {
                warn!("Unparsable {} value '{}', using 0", field, text);
            }
            0
        }
    }
}

/// Parses a timeline frame position, treating anything unparsable as zero
fn lenient_position(field: &str, text: &str) -> u64 {
    let text = text.trim();
    parse_frames(text).unwrap_or_else(|| {
        if !text.is_empty() {
            warn!("Unparsable {} value '{}', using 0", field, text);
        }
        0
    })
}

impl From<SequenceElement> for Sequence {
    fn from(element: SequenceElement) -> Self {
        let video = merged(merged(element.media).video);
        Self {
            id: element.id.unwrap_or_default(),
            name: last(element.name),
            tracks: video.tracks.into_iter().map(Track::from).collect(),
        }
    }
}

impl From<TrackElement> for Track {
    fn from(element: TrackElement) -> Self {
        Self {
            name: last(element.name),
            clips: element.clips.into_iter().map(ClipItem::from).collect(),
        }
    }
}

impl From<ClipItemElement> for ClipItem {
    fn from(element: ClipItemElement) -> Self {
        let file = merged(element.file);
        Self {
            in_frame: lenient_offset("in", &last(element.in_point)),
            out_frame: lenient_offset("out", &last(element.out_point)),
            start: lenient_position("start", &last(element.start)),
            end: lenient_position("end", &last(element.end)),
            name: last(element.name),
            file: SourceFile {
                id: file.id.unwrap_or_default(),
                name: last(file.name),
                path_url: last(file.pathurl),
                timecode: last(merged(file.timecode).string),
            },
        }
    }
}
