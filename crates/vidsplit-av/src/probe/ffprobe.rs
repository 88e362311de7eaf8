//! FFprobe-based media probing.

use super::types::*;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: String,
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[allow(dead_code)]
    index: u32,
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: FfprobeTags,
    #[serde(default)]
    side_data_list: Vec<FfprobeSideData>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    default: u8,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeSideData {
    side_data_type: Option<String>,
    rotation: Option<i32>,
}

/// Probe a media file using ffprobe.
pub fn probe_with_ffprobe(ffprobe: &Path, path: &Path) -> Result<MediaInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffprobe", stderr.to_string()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("ffprobe", format!("Invalid UTF-8: {}", e)))?;

    let ff_output: FfprobeOutput = serde_json::from_str(&json_str)?;

    parse_ffprobe_output(path, ff_output)
}

fn parse_ffprobe_output(path: &Path, output: FfprobeOutput) -> Result<MediaInfo> {
    let duration = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .map(Duration::from_secs_f64);

    let mut info = MediaInfo {
        file_path: path.to_path_buf(),
        file_size: output.format.size.and_then(|s| s.parse().ok()).unwrap_or(0),
        container: output.format.format_name,
        duration,
        video_tracks: Vec::new(),
        audio_tracks: Vec::new(),
    };

    let mut video_index = 0u32;
    let mut audio_index = 0u32;

    for stream in output.streams {
        match stream.codec_type.as_str() {
            "video" => {
                // Rotation lives in side data on newer ffprobe, in a
                // "rotate" tag on older versions
                let rotation = stream
                    .side_data_list
                    .iter()
                    .find(|sd| sd.side_data_type.as_deref() == Some("Display Matrix"))
                    .and_then(|sd| sd.rotation)
                    .or_else(|| stream.tags.rotate.as_deref().and_then(|r| r.parse().ok()));

                info.video_tracks.push(VideoTrack {
                    index: video_index,
                    codec: stream.codec_name.unwrap_or_default(),
                    width: stream.width.unwrap_or(0),
                    height: stream.height.unwrap_or(0),
                    frame_rate: stream.r_frame_rate.and_then(|s| parse_frame_rate(&s)),
                    rotation,
                });
                video_index += 1;
            }
            "audio" => {
                info.audio_tracks.push(AudioTrack {
                    index: audio_index,
                    codec: stream.codec_name.unwrap_or_default(),
                    channels: stream.channels.unwrap_or(2),
                    sample_rate: stream.sample_rate.and_then(|s| s.parse().ok()),
                    language: stream.tags.language,
                    default: stream.disposition.default == 1,
                });
                audio_index += 1;
            }
            _ => {}
        }
    }

    Ok(info)
}

fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    let parts: Vec<&str> = rate_str.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().ok()?;
        let den: f64 = parts[1].parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
    }
    rate_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("24000/1001"), Some(23.976023976023978));
        assert_eq!(parse_frame_rate("30/1"), Some(30.0));
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert_eq!(parse_frame_rate("invalid"), None);
    }

    #[test]
    fn test_parse_ffprobe_output() {
        let json = r#"{
            "format": {
                "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
                "duration": "130.048000",
                "size": "52428800"
            },
            "streams": [
                {
                    "index": 0,
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1920,
                    "height": 1080,
                    "r_frame_rate": "30000/1001",
                    "side_data_list": [
                        {"side_data_type": "Display Matrix", "rotation": -90}
                    ]
                },
                {
                    "index": 1,
                    "codec_type": "audio",
                    "codec_name": "aac",
                    "channels": 2,
                    "sample_rate": "44100",
                    "disposition": {"default": 1},
                    "tags": {"language": "eng"}
                }
            ]
        }"#;

        let output: FfprobeOutput = serde_json::from_str(json).unwrap();
        let info = parse_ffprobe_output(Path::new("clip.mp4"), output).unwrap();

        assert_eq!(info.file_size, 52428800);
        assert_eq!(info.duration_secs(), Some(130.048));
        assert_eq!(info.video_tracks.len(), 1);
        assert_eq!(info.video_tracks[0].codec, "h264");
        assert_eq!(info.video_tracks[0].rotation, Some(-90));
        assert_eq!(info.audio_tracks.len(), 1);
        assert_eq!(info.audio_tracks[0].codec, "aac");
        assert_eq!(info.audio_tracks[0].language.as_deref(), Some("eng"));
        assert!(info.audio_tracks[0].default);
    }

    #[test]
    fn test_parse_output_without_duration() {
        let json = r#"{
            "format": {"format_name": "image2"},
            "streams": []
        }"#;

        let output: FfprobeOutput = serde_json::from_str(json).unwrap();
        let info = parse_ffprobe_output(Path::new("still.png"), output).unwrap();

        assert!(info.duration.is_none());
        assert!(info.video_tracks.is_empty());
    }
}
