use std::io::Write;
use xedl_core::{convert, convert_file, ConvertConfig, Error};

const SINGLE_CLIP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xmeml version="4">
  <sequence id="seq-1">
    <name>Single</name>
    <media>
      <video>
        <track>
          <clipitem>
            <name>clip1</name>
            <in>0</in>
            <out>30</out>
            <start>0</start>
            <end>30</end>
            <file id="REEL01">
              <pathurl>clip1.mov</pathurl>
              <timecode><string>00:00:00:00</string></timecode>
            </file>
          </clipitem>
        </track>
      </video>
    </media>
  </sequence>
</xmeml>"#;

const MULTI_TRACK: &str = r#"<xmeml>
  <sequence>
    <media>
      <video>
        <track>
          <clipitem>
            <name>Opening</name>
            <in>30</in>
            <out>90</out>
            <start>0</start>
            <end>60</end>
            <file>
              <pathurl>file:///Volumes/Media/VeryLongCameraRoll_A001.mov</pathurl>
              <timecode><string>10:00:00:00</string></timecode>
            </file>
          </clipitem>
          <clipitem>
            <name>Closeup</name>
            <in>0</in>
            <out>45</out>
            <start>60</start>
            <end>105</end>
            <file id="B002">
              <pathurl>file:///Volumes/Media/B002.mxf</pathurl>
              <timecode><string>01:00:00:00</string></timecode>
            </file>
          </clipitem>
        </track>
        <track>
          <clipitem>
            <name>Lower Third</name>
            <in></in>
            <out>oops</out>
            <start>10</start>
            <end>50</end>
          </clipitem>
        </track>
      </video>
    </media>
  </sequence>
</xmeml>"#;

#[test]
fn test_single_clip_document() {
    let doc = convert(SINGLE_CLIP.as_bytes(), &ConvertConfig::default()).unwrap();

    assert_eq!(
        doc.lines,
        vec![
            "TITLE: Single",
            "FCM: NON-DROP FRAME",
            "",
            "001    REEL01 V C        00:00:00:00 00:00:01:00 00:00:00:00 00:00:01:00",
            "* FROM CLIP NAME: clip1.mov",
            "",
        ]
    );
    assert_eq!(doc.clip_count, 1);
}

#[test]
fn test_multi_track_document() {
    let doc = convert(MULTI_TRACK.as_bytes(), &ConvertConfig::default()).unwrap();

    assert_eq!(doc.title, "Sequence 1");
    assert_eq!(doc.clip_count, 3);
    assert_eq!(doc.lines.len(), 3 * 3 + 3);
    assert_eq!(doc.lines[0], "TITLE: Sequence 1");

    assert_eq!(
        doc.lines[3],
        "001    VeryLong V C        10:00:01:00 10:00:03:00 00:00:00:00 00:00:02:00"
    );
    assert_eq!(doc.lines[4], "* FROM CLIP NAME: VeryLongCameraRoll_A001.mov");
    assert_eq!(
        doc.lines[6],
        "002    B002 V C        01:00:00:00 01:00:01:15 00:00:02:00 00:00:03:15"
    );
    assert_eq!(
        doc.lines[9],
        "003     V C        00:00:00:00 00:00:00:00 00:00:00:10 00:00:01:20"
    );
    assert_eq!(doc.lines[10], "* FROM CLIP NAME: Lower Third.mov");
    assert_eq!(doc.lines[11], "");
}

#[test]
fn test_event_numbers_are_contiguous() {
    let doc = convert(MULTI_TRACK.as_bytes(), &ConvertConfig::default()).unwrap();

    let numbers: Vec<&str> = doc
        .lines
        .iter()
        .skip(3)
        .step_by(3)
        .map(|line| &line[..3])
        .collect();
    assert_eq!(numbers, vec!["001", "002", "003"]);
}

#[test]
fn test_frame_rate_is_configurable() {
    let config = ConvertConfig::default().with_fps(24);
    let doc = convert(SINGLE_CLIP.as_bytes(), &config).unwrap();

    assert_eq!(
        doc.lines[3],
        "001    REEL01 V C        00:00:00:00 00:00:01:06 00:00:00:00 00:00:01:06"
    );
}

#[test]
fn test_empty_project_has_header_only() {
    let xml = b"<xmeml><sequence><name>Empty</name></sequence></xmeml>";
    let doc = convert(xml, &ConvertConfig::default()).unwrap();

    assert_eq!(doc.lines, vec!["TITLE: Empty", "FCM: NON-DROP FRAME", ""]);
    assert_eq!(doc.clip_count, 0);
}

#[test]
fn test_malformed_project_produces_nothing() {
    let truncated = &SINGLE_CLIP[..SINGLE_CLIP.len() / 2];
    assert!(convert(truncated.as_bytes(), &ConvertConfig::default()).is_err());

    let result = convert(b"<project><sequence/></project>", &ConvertConfig::default());
    assert!(matches!(result, Err(Error::UnexpectedRoot(_))));
}

#[test]
fn test_convert_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SINGLE_CLIP.as_bytes()).unwrap();

    let doc = convert_file(file.path(), &ConvertConfig::default()).unwrap();
    assert_eq!(doc.clip_count, 1);

    let missing = file.path().with_extension("missing");
    assert!(matches!(
        convert_file(missing, &ConvertConfig::default()),
        Err(Error::Io(_))
    ));
}
