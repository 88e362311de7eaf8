// Re-export probe functionality from vidsplit-av
pub use vidsplit_av::{check_tools, MediaInfo, ToolInfo};

use anyhow::Result;
use std::path::Path;

/// Probe a media file with the default ffprobe from PATH
pub fn probe_file(path: &Path) -> Result<MediaInfo> {
    vidsplit_av::probe(path).map_err(|e| anyhow::anyhow!("{}", e))
}

/// Probe a media file with an explicit ffprobe binary
pub fn probe_file_with(ffprobe: &Path, path: &Path) -> Result<MediaInfo> {
    vidsplit_av::probe::probe_with(ffprobe, path).map_err(|e| anyhow::anyhow!("{}", e))
}
