//! Segment extraction.
//!
//! One call extracts one time slice of the source into a new container via
//! ffmpeg stream copy. Nothing is re-encoded, so the source codecs and
//! display orientation survive, and the tool clamps a slice that runs past
//! the end of the source instead of erroring.

use crate::probe::MediaInfo;
use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Supported output container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// MPEG-4 Part 14 container
    Mp4,
    /// QuickTime container
    Mov,
}

impl Container {
    /// Get the file extension for this container.
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Mov => "mov",
        }
    }
}

impl std::str::FromStr for Container {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp4" | "m4v" => Ok(Container::Mp4),
            "mov" | "quicktime" => Ok(Container::Mov),
            _ => Err(format!("Unknown container format: {}", s)),
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One segment to extract: a start offset and a length, in whole seconds.
///
/// Constructed fresh per step; the requested duration may run past the end
/// of the source, in which case the extracted segment is shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRequest {
    /// Start offset from the beginning of the source, in seconds.
    pub start: u64,
    /// Requested segment length in seconds.
    pub duration: u64,
}

/// Result of one extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// A segment was written to the destination path.
    Exported,
    /// The start offset is at or past the end of the source. Nothing was
    /// written; nothing is left to extract. Not an error.
    SourceExhausted,
}

/// Extract one segment of `source` into `dest`.
///
/// Returns `SegmentOutcome::SourceExhausted` without touching `dest` when
/// the request starts at or past the end of the source; this is how a
/// caller iterating over advancing offsets learns to stop.
pub fn export_segment(
    source: &MediaInfo,
    request: SegmentRequest,
    dest: &Path,
) -> Result<SegmentOutcome> {
    export_segment_with(Path::new("ffmpeg"), source, request, dest)
}

/// Extract one segment using an explicit ffmpeg binary.
pub fn export_segment_with(
    ffmpeg: &Path,
    source: &MediaInfo,
    request: SegmentRequest,
    dest: &Path,
) -> Result<SegmentOutcome> {
    let total = source.duration_secs().ok_or_else(|| {
        Error::Unsupported(format!(
            "source reports no duration: {}",
            source.file_path.display()
        ))
    })?;

    if total <= request.start as f64 {
        return Ok(SegmentOutcome::SourceExhausted);
    }

    if source.primary_video().is_none() {
        return Err(Error::missing_track("video"));
    }

    let container = dest
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<Container>().ok())
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "destination has no recognized container extension: {}",
                dest.display()
            ))
        })?;

    let args = segment_args(&request, source.has_audio(), container);

    tracing::debug!(
        "Extracting {}s at offset {}s from {:?} to {:?}",
        request.duration,
        request.start,
        source.file_path,
        dest
    );

    let output = Command::new(ffmpeg)
        .args(["-y", "-v", "error", "-ss", &request.start.to_string(), "-i"])
        .arg(&source.file_path)
        .args(&args)
        .arg(dest)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
    }

    Ok(SegmentOutcome::Exported)
}

/// Build the ffmpeg argument vector between the input path and the
/// destination path.
fn segment_args(request: &SegmentRequest, map_audio: bool, container: Container) -> Vec<String> {
    let mut args = vec![
        "-t".to_string(),
        request.duration.to_string(),
        // First video track, first audio track when one exists
        "-map".to_string(),
        "0:v:0".to_string(),
    ];

    if map_audio {
        args.extend(["-map".to_string(), "0:a:0".to_string()]);
    }

    args.extend([
        // Stream copy: the passthrough path
        "-c".to_string(),
        "copy".to_string(),
        // Carry the container metadata (display orientation included)
        "-map_metadata".to_string(),
        "0".to_string(),
        "-avoid_negative_ts".to_string(),
        "make_zero".to_string(),
    ]);

    if container == Container::Mp4 {
        args.extend(["-movflags".to_string(), "+faststart".to_string()]);
    }

    args
}
