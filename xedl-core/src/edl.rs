//! EDL event building and document assembly
//!
//! Produces a single fixed layout: cuts on the video track, non-drop-frame
//! timecodes, one comment line per event naming the source clip.

use crate::config::ConvertConfig;
use crate::project::{ClipItem, Sequence};
use crate::timecode::{format_frames, timecode_to_frames, ZERO_TIMECODE};
use log::{debug, warn};

/// Maximum width of the reel name field
pub const REEL_NAME_WIDTH: usize = 8;

/// Frame count mode line written after the title
pub const FCM_LINE: &str = "FCM: NON-DROP FRAME";

/// Number of lines each event contributes to the document
pub const LINES_PER_EVENT: usize = 3;

/// Number of lines in the document header
pub const HEADER_LINES: usize = 3;

/// One edit event derived from a clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlEvent {
    /// 1-based event number
    pub number: usize,
    pub reel: String,
    pub source_in: String,
    pub source_out: String,
    pub record_in: String,
    pub record_out: String,
    /// File name shown in the clip name comment
    pub clip_name: String,
}

impl EdlEvent {
    /// Builds the event for a clip
    pub fn from_clip(number: usize, clip: &ClipItem, config: &ConvertConfig) -> Self {
        let fps = config.fps;
        let base_frames = timecode_to_frames(&clip.file.timecode, fps);

        let source_frame = |offset: i64| -> String {
            let frames = i128::from(base_frames) + i128::from(offset);
            match u64::try_from(frames) {
                Ok(frames) => format_frames(frames, fps),
                Err(_) => {
                    warn!(
                        "Clip '{}' resolves to a negative source frame ({}), using {}",
                        clip.name, frames, ZERO_TIMECODE
                    );
                    ZERO_TIMECODE.to_string()
                }
            }
        };

        Self {
            number,
            reel: reel_name(clip),
            source_in: source_frame(clip.in_frame),
            source_out: source_frame(clip.out_frame),
            record_in: format_frames(clip.start, fps),
            record_out: format_frames(clip.end, fps),
            clip_name: display_name(clip, &config.fallback_extension),
        }
    }

    /// Renders the event as its three document lines
    pub fn to_lines(&self) -> [String; LINES_PER_EVENT] {
        [
            format!(
                "{:03}    {} V C        {} {} {} {}",
                self.number,
                self.reel,
                self.source_in,
                self.source_out,
                self.record_in,
                self.record_out
            ),
            format!("* FROM CLIP NAME: {}", self.clip_name),
            String::new(),
        ]
    }
}

/// Builds one event per clip, walking tracks in order and clips within each
/// track in order. Numbering is shared across tracks.
pub fn build_events(sequence: &Sequence, config: &ConvertConfig) -> Vec<EdlEvent> {
    sequence
        .clips()
        .enumerate()
        .map(|(i, clip)| {
            let event = EdlEvent::from_clip(i + 1, clip, config);
            debug!(
                "Event {:03}: reel {} src {}-{} rec {}-{}",
                event.number,
                event.reel,
                event.source_in,
                event.source_out,
                event.record_in,
                event.record_out
            );
            event
        })
        .collect()
}

/// Returns the title used for the document
pub fn sequence_title<'a>(sequence: &'a Sequence, config: &'a ConvertConfig) -> &'a str {
    if sequence.name.is_empty() {
        &config.default_sequence_name
    } else {
        &sequence.name
    }
}

/// Assembles the document lines: title, frame count mode, a blank line and
/// then every event block.
pub fn assemble(sequence: &Sequence, events: &[EdlEvent], config: &ConvertConfig) -> Vec<String> {
    let mut lines = Vec::with_capacity(HEADER_LINES + LINES_PER_EVENT * events.len());
    lines.push(format!("TITLE: {}", sequence_title(sequence, config)));
    lines.push(FCM_LINE.to_string());
    lines.push(String::new());

    for event in events {
        lines.extend(event.to_lines());
    }
    lines
}

/// Reel name for a clip: the file id, or the media file stem cut to the
/// reel name width.
pub fn reel_name(clip: &ClipItem) -> String {
    if !clip.file.id.is_empty() {
        return clip.file.id.clone();
    }

    let reel: String = file_stem(base_name(&clip.file.path_url))
        .chars()
        .take(REEL_NAME_WIDTH)
        .collect();
    if reel.is_empty() {
        warn!("Clip '{}' has no file id or media path, reel name is empty", clip.name);
    }
    reel
}

/// Name shown in the clip comment: the media file name, or the clip name
/// with the fallback extension.
pub fn display_name(clip: &ClipItem, fallback_extension: &str) -> String {
    let name = base_name(&clip.file.path_url);
    if name.is_empty() {
        format!("{}.{}", clip.name, fallback_extension)
    } else {
        name.to_string()
    }
}

/// Last component of a path or URL, ignoring trailing separators
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// File name without its last extension
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    }
}
