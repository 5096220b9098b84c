//! Non-drop-frame timecode conversion (HH:MM:SS:FF)
//!
//! Conversions here never fail: malformed input is normalized to zero frames
//! or to the zero timecode.

/// Timecode returned for empty or unparsable frame counts
pub const ZERO_TIMECODE: &str = "00:00:00:00";

/// Parses a frame count written as a plain decimal integer.
///
/// Accepts one optional leading `+`. Returns `None` for empty text, a minus
/// sign, or anything that is not a non-negative integer fitting in a `u64`.
pub fn parse_frames(text: &str) -> Option<u64> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Converts a frame count given as text into `HH:MM:SS:FF`.
///
/// Empty or non-numeric input yields [`ZERO_TIMECODE`].
pub fn frames_to_timecode(frames: &str, fps: u32) -> String {
    match parse_frames(frames) {
        Some(frames) => format_frames(frames, fps),
        None => ZERO_TIMECODE.to_string(),
    }
}

/// Formats a frame count as `HH:MM:SS:FF` at the given frame rate.
///
/// Hours are not wrapped at 24; a value above 99 is printed in full.
pub fn format_frames(frames: u64, fps: u32) -> String {
    let fps = u64::from(fps.max(1));
    let mut frames = frames;

    let hours = frames / (3600 * fps);
    frames %= 3600 * fps;
    let minutes = frames / (60 * fps);
    frames %= 60 * fps;
    let seconds = frames / fps;
    frames %= fps;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
}

/// Converts an `HH:MM:SS:FF` timecode into a frame count.
///
/// Anything other than exactly four colon-separated fields yields 0, and a
/// field that does not parse counts as 0. The frame field is taken as-is,
/// even when it is not below `fps`.
pub fn timecode_to_frames(timecode: &str, fps: u32) -> u64 {
    let fields: Vec<&str> = timecode.split(':').collect();
    if fields.len() != 4 {
        return 0;
    }

    let fps = u64::from(fps);
    let field = |i: usize| parse_frames(fields[i]).unwrap_or(0);
    let (hours, minutes, seconds, frames) = (field(0), field(1), field(2), field(3));

    hours
        .saturating_mul(3600 * fps)
        .saturating_add(minutes.saturating_mul(60 * fps))
        .saturating_add(seconds.saturating_mul(fps))
        .saturating_add(frames)
}
