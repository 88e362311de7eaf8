//! # vidsplit-av
//!
//! Media probing and segment extraction library for video files.
//!
//! This crate provides functionality for:
//! - Probing media files to extract metadata (duration, codecs, tracks)
//! - Extracting fixed-length segments via ffmpeg stream copy
//! - Managing a process-private scratch directory for segments in flight
//!
//! ## Example
//!
//! ```no_run
//! use vidsplit_av::{export_segment, probe, SegmentRequest};
//!
//! let info = probe("/path/to/video.mp4")?;
//! let request = SegmentRequest { start: 0, duration: 60 };
//! export_segment(&info, request, std::path::Path::new("/tmp/first.mp4"))?;
//! # Ok::<(), vidsplit_av::Error>(())
//! ```

mod error;
pub mod export;
pub mod probe;
pub mod scratch;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use export::{export_segment, export_segment_with, Container, SegmentOutcome, SegmentRequest};
pub use probe::{AudioTrack, MediaInfo, VideoTrack};
pub use scratch::ScratchDir;
pub use tools::{check_tools, get_tool_path, require_tool, ToolInfo};

/// Probe a media file and return its metadata.
///
/// This is the main entry point for probing files; it shells out to ffprobe
/// and parses its JSON output.
pub fn probe<P: AsRef<std::path::Path>>(path: P) -> Result<MediaInfo> {
    probe::probe(path.as_ref())
}
