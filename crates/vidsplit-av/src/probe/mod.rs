//! Media probing.

mod ffprobe;
mod types;

pub use types::{AudioTrack, MediaInfo, VideoTrack};

use crate::{Error, Result};
use std::path::Path;

/// Probe a media file and return its metadata.
pub fn probe(path: &Path) -> Result<MediaInfo> {
    probe_with(Path::new("ffprobe"), path)
}

/// Probe a media file using an explicit ffprobe binary.
pub fn probe_with(ffprobe: &Path, path: &Path) -> Result<MediaInfo> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    ffprobe::probe_with_ffprobe(ffprobe, path)
}
