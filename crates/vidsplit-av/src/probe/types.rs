//! Media information types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// File size in bytes.
    pub file_size: u64,
    /// Container format (e.g., "mov,mp4,m4a,3gp,3g2,mj2").
    pub container: String,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Video tracks in the file.
    pub video_tracks: Vec<VideoTrack>,
    /// Audio tracks in the file.
    pub audio_tracks: Vec<AudioTrack>,
}

/// Information about a video track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTrack {
    /// Track index.
    pub index: u32,
    /// Video codec (e.g., "h264", "hevc").
    pub codec: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate in FPS.
    pub frame_rate: Option<f64>,
    /// Display rotation in degrees, from container metadata.
    pub rotation: Option<i32>,
}

/// Information about an audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Track index.
    pub index: u32,
    /// Audio codec (e.g., "aac", "ac3").
    pub codec: String,
    /// Number of channels.
    pub channels: u32,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Language code (e.g., "eng", "kor").
    pub language: Option<String>,
    /// Whether this is the default track.
    pub default: bool,
}

impl MediaInfo {
    /// Get the primary (first) video track.
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video_tracks.first()
    }

    /// Check if the file carries at least one audio track.
    pub fn has_audio(&self) -> bool {
        !self.audio_tracks.is_empty()
    }

    /// Total duration in fractional seconds, if the container reports one.
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }

    /// Get a human-readable resolution name.
    pub fn resolution_name(&self) -> Option<&'static str> {
        self.primary_video().map(|v| match (v.width, v.height) {
            (w, h) if w >= 3840 || h >= 2160 => "4K",
            (w, h) if w >= 1920 || h >= 1080 => "1080p",
            (w, h) if w >= 1280 || h >= 720 => "720p",
            (w, h) if w >= 720 || h >= 480 => "480p",
            _ => "SD",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_video(width: u32, height: u32) -> MediaInfo {
        MediaInfo {
            file_path: PathBuf::from("clip.mp4"),
            file_size: 0,
            container: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
            duration: Some(Duration::from_secs_f64(130.0)),
            video_tracks: vec![VideoTrack {
                index: 0,
                codec: "h264".to_string(),
                width,
                height,
                frame_rate: Some(30.0),
                rotation: None,
            }],
            audio_tracks: Vec::new(),
        }
    }

    #[test]
    fn test_resolution_name() {
        assert_eq!(info_with_video(1920, 1080).resolution_name(), Some("1080p"));
        assert_eq!(info_with_video(1280, 720).resolution_name(), Some("720p"));
        assert_eq!(info_with_video(3840, 2160).resolution_name(), Some("4K"));
    }

    #[test]
    fn test_duration_secs() {
        assert_eq!(info_with_video(1920, 1080).duration_secs(), Some(130.0));
    }

    #[test]
    fn test_has_audio() {
        assert!(!info_with_video(1920, 1080).has_audio());
    }
}
