//! Caption conversion pipeline
//!
//! Converts a WebVTT file into a JSON array of caption records. Each record
//! carries the `video_id` derived from the source file name, so every record
//! of one conversion correlates back to the same video.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CaptionError, Result};
use crate::subtitle::{parse_file, Cue};

/// One converted caption entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub video_id: String,
    pub start: String,
    pub end: String,
    pub text: String,
}

/// Derive the video identifier from a subtitle file name.
///
/// Strips the `.vtt` extension and, when present, one trailing locale-tag
/// segment as produced by the downloader's `%(id)s.%(ext)s` naming
/// (`dQw4w9WgXcQ.en.vtt` and `dQw4w9WgXcQ.en-US.vtt` both yield
/// `dQw4w9WgXcQ`). Pure function of the file name only.
pub fn video_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    match stem.rsplit_once('.') {
        Some((base, tag)) if is_locale_tag(tag) => base.to_string(),
        _ => stem,
    }
}

/// A two-letter language code, optionally with a region subtag (`en`,
/// `en-US`)
fn is_locale_tag(tag: &str) -> bool {
    let (lang, region) = match tag.split_once('-') {
        Some((lang, region)) => (lang, Some(region)),
        None => (tag, None),
    };
    if lang.len() != 2 || !lang.bytes().all(|b| b.is_ascii_lowercase()) {
        return false;
    }
    match region {
        Some(r) => (2..=3).contains(&r.len()) && r.bytes().all(|b| b.is_ascii_alphanumeric()),
        None => true,
    }
}

/// Map cues to caption records under one shared video identifier
pub fn build_records(cues: Vec<Cue>, video_id: &str) -> Vec<CaptionRecord> {
    cues.into_iter()
        .map(|cue| CaptionRecord {
            video_id: video_id.to_string(),
            start: cue.start,
            end: cue.end,
            text: cue.text,
        })
        .collect()
}

/// Convert a WebVTT file to JSON bytes (UTF-8 array of records, in source
/// cue order)
pub fn convert_bytes<P: AsRef<Path>>(vtt_path: P) -> Result<Vec<u8>> {
    let vtt_path = vtt_path.as_ref();
    let video_id = video_id_from_path(vtt_path);
    let cues = parse_file(vtt_path)?;
    let records = build_records(cues, &video_id);
    serde_json::to_vec(&records).map_err(|e| CaptionError::WriteError(e.to_string()))
}

/// Convert a WebVTT file to `<output_dir>/<video_id>.json`
///
/// Creates the output directory if needed and overwrites any existing
/// artifact. The source file is left untouched.
pub fn convert_file(vtt_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let vtt_path = vtt_path.as_ref();
    let output_dir = output_dir.as_ref();

    let video_id = video_id_from_path(vtt_path);
    let json = convert_bytes(vtt_path)?;

    std::fs::create_dir_all(output_dir).map_err(|e| {
        CaptionError::WriteError(format!("{}: {}", output_dir.display(), e))
    })?;

    let json_path = output_dir.join(format!("{video_id}.json"));
    std::fs::write(&json_path, json)
        .map_err(|e| CaptionError::WriteError(format!("{}: {}", json_path.display(), e)))?;

    tracing::info!("Converted {} to {}", vtt_path.display(), json_path.display());
    Ok(json_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_vtt(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    const TWO_CUES: &str =
        "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nHello\n\n00:00:02.000 --> 00:00:04.000\nWorld\n";

    #[test]
    fn test_video_id_derivation() {
        assert_eq!(video_id_from_path(Path::new("lecture1.vtt")), "lecture1");
        assert_eq!(
            video_id_from_path(Path::new("/tmp/dQw4w9WgXcQ.en.vtt")),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            video_id_from_path(Path::new("dQw4w9WgXcQ.en-US.vtt")),
            "dQw4w9WgXcQ"
        );
        // non-locale inner segment is kept
        assert_eq!(
            video_id_from_path(Path::new("my.video.vtt")),
            "my.video"
        );
    }

    #[test]
    fn test_video_id_deterministic() {
        let a = video_id_from_path(Path::new("abc123.en.vtt"));
        let b = video_id_from_path(Path::new("abc123.en.vtt"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_records_shared_id() {
        let cues = vec![
            Cue {
                start: "00:00:00.000".into(),
                end: "00:00:02.000".into(),
                text: "Hello".into(),
            },
            Cue {
                start: "00:00:02.000".into(),
                end: "00:00:04.000".into(),
                text: "World".into(),
            },
        ];
        let records = build_records(cues, "vid1");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.video_id == "vid1"));
        assert_eq!(records[0].text, "Hello");
        assert_eq!(records[1].text, "World");
    }

    #[test]
    fn test_convert_file_expected_output() {
        let dir = TempDir::new().unwrap();
        let vtt = write_vtt(&dir, "lecture1.vtt", TWO_CUES);
        let out_dir = dir.path().join("out");

        let json_path = convert_file(&vtt, &out_dir).unwrap();
        assert_eq!(json_path.file_name().unwrap(), "lecture1.json");

        let content = std::fs::read_to_string(&json_path).unwrap();
        assert_eq!(
            content,
            r#"[{"video_id":"lecture1","start":"00:00:00.000","end":"00:00:02.000","text":"Hello"},{"video_id":"lecture1","start":"00:00:02.000","end":"00:00:04.000","text":"World"}]"#
        );
        // source is left in place
        assert!(vtt.exists());
    }

    #[test]
    fn test_convert_roundtrip() {
        let dir = TempDir::new().unwrap();
        let vtt = write_vtt(&dir, "clip.en.vtt", TWO_CUES);

        let json = convert_bytes(&vtt).unwrap();
        let records: Vec<CaptionRecord> = serde_json::from_slice(&json).unwrap();
        let cues = crate::subtitle::parse_file(&vtt).unwrap();

        assert_eq!(records.len(), cues.len());
        for (record, cue) in records.iter().zip(cues.iter()) {
            assert_eq!(record.start, cue.start);
            assert_eq!(record.end, cue.end);
            assert_eq!(record.text, cue.text);
            assert_eq!(record.video_id, "clip");
        }
    }

    #[test]
    fn test_convert_empty_vtt() {
        let dir = TempDir::new().unwrap();
        let vtt = write_vtt(&dir, "empty.vtt", "WEBVTT\n");

        let json = convert_bytes(&vtt).unwrap();
        assert_eq!(json, b"[]");
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");
        let err = convert_file(&dir.path().join("nope.vtt"), &out_dir).unwrap_err();
        assert!(matches!(err, CaptionError::NotFound(_)));
        // no output artifact is produced
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_convert_malformed_propagates() {
        let dir = TempDir::new().unwrap();
        let vtt = write_vtt(&dir, "bad.vtt", "not a vtt file\n");
        let err = convert_bytes(&vtt).unwrap_err();
        assert!(matches!(err, CaptionError::MalformedInput(_)));
    }
}
