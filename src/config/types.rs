use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vidsplit_av::Container;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory finished segments are saved into
    #[serde(default = "default_library_path")]
    pub path: PathBuf,
}

fn default_library_path() -> PathBuf {
    PathBuf::from("~/Videos/vidsplit")
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplitConfig {
    /// Upper bound for the chosen segment length in seconds (default: 60)
    #[serde(default = "default_max_seconds")]
    pub max_seconds: u64,

    /// Estimated segment counts above this require confirmation (default: 10)
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: u32,

    /// Output container format (default: mp4)
    #[serde(default = "default_container")]
    pub container: Container,
}

fn default_max_seconds() -> u64 {
    60
}

fn default_confirm_threshold() -> u32 {
    10
}

fn default_container() -> Container {
    Container::Mp4
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_seconds: default_max_seconds(),
            confirm_threshold: default_confirm_threshold(),
            container: default_container(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit path to ffmpeg (default: PATH lookup)
    #[serde(default)]
    pub ffmpeg: Option<PathBuf>,

    /// Explicit path to ffprobe (default: PATH lookup)
    #[serde(default)]
    pub ffprobe: Option<PathBuf>,
}
