//! WebVTT parser
//!
//! Turns a caption-track file into an ordered sequence of cues. Only the
//! pieces the conversion pipeline needs are implemented: the header line,
//! cue timing lines, and cue payload text. Cue settings after the end
//! timestamp and cue identifier lines are accepted and ignored.

use std::path::Path;

use crate::error::{CaptionError, Result};

/// One timed subtitle entry, timestamps kept as the source wrote them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start timestamp (`HH:MM:SS.mmm` or `MM:SS.mmm`)
    pub start: String,
    /// End timestamp
    pub end: String,
    /// Payload text, multi-line payloads joined with '\n'
    pub text: String,
}

/// Parse a WebVTT file into cues, in file order
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Cue>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CaptionError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| CaptionError::NotFound(format!("{}: {}", path.display(), e)))?;
    parse_str(&content)
}

/// Parse WebVTT text into cues, in source order
pub fn parse_str(content: &str) -> Result<Vec<Cue>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut blocks = split_blocks(content);

    let header = blocks.next().ok_or_else(|| {
        CaptionError::MalformedInput("empty file, expected WEBVTT header".to_string())
    })?;
    // The header block is "WEBVTT", optionally followed by text after a
    // space or tab, and optionally trailed by metadata lines (yt-dlp
    // emits "Kind:" and "Language:" here).
    let header_line = header.lines().next().unwrap_or("");
    let is_vtt = header_line == "WEBVTT"
        || header_line.starts_with("WEBVTT ")
        || header_line.starts_with("WEBVTT\t");
    if !is_vtt {
        return Err(CaptionError::MalformedInput(
            "missing WEBVTT header".to_string(),
        ));
    }

    let mut cues = Vec::new();
    for block in blocks {
        if let Some(cue) = parse_block(block)? {
            cues.push(cue);
        }
    }
    Ok(cues)
}

/// Split content into blank-line-separated blocks, skipping empty ones
fn split_blocks(content: &str) -> impl Iterator<Item = &str> {
    content
        .split("\n\n")
        .flat_map(|b| b.split("\r\n\r\n"))
        .map(|b| b.trim_matches(|c| c == '\r' || c == '\n'))
        .filter(|b| !b.is_empty())
}

/// Parse one block into a cue. Returns Ok(None) for non-cue blocks
/// (NOTE, STYLE, REGION).
fn parse_block(block: &str) -> Result<Option<Cue>> {
    if block.starts_with("NOTE") || block.starts_with("STYLE") || block.starts_with("REGION") {
        return Ok(None);
    }

    let mut lines = block.lines().map(|l| l.trim_end_matches('\r'));
    let first = lines.next().unwrap_or("");

    // A cue may open with an identifier line; the timing line is the one
    // containing the arrow.
    let timing_line = if first.contains("-->") {
        first
    } else {
        match lines.next() {
            Some(line) if line.contains("-->") => line,
            _ => {
                return Err(CaptionError::MalformedInput(format!(
                    "expected timing line, got: {first}"
                )))
            }
        }
    };

    let (start, end) = parse_timing_line(timing_line)?;

    let text: Vec<&str> = lines.collect();
    Ok(Some(Cue {
        start,
        end,
        text: text.join("\n"),
    }))
}

/// Parse a `start --> end [settings]` line
fn parse_timing_line(line: &str) -> Result<(String, String)> {
    let (start, rest) = line.split_once("-->").ok_or_else(|| {
        CaptionError::MalformedInput(format!("missing '-->' in timing line: {line}"))
    })?;

    let start = start.trim();
    // Cue settings after the end timestamp are ignored
    let end = rest.trim().split_whitespace().next().unwrap_or("");

    if !is_timestamp(start) || !is_timestamp(end) {
        return Err(CaptionError::MalformedInput(format!(
            "malformed timing line: {line}"
        )));
    }

    Ok((start.to_string(), end.to_string()))
}

/// Validate a WebVTT timestamp: `HH:MM:SS.mmm` (hours may exceed two
/// digits) or the short form `MM:SS.mmm`
fn is_timestamp(s: &str) -> bool {
    let (rest, millis) = match s.rsplit_once('.') {
        Some(parts) => parts,
        None => return false,
    };
    if millis.len() != 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let groups: Vec<&str> = rest.split(':').collect();
    match groups.as_slice() {
        [hours, minutes, seconds] => {
            hours.len() >= 2
                && is_digits(hours)
                && is_two_digits(minutes)
                && is_two_digits(seconds)
        }
        [minutes, seconds] => is_two_digits(minutes) && is_two_digits(seconds),
        _ => false,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_two_digits(s: &str) -> bool {
    s.len() == 2 && is_digits(s)
}
