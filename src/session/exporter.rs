//! The real exporter: ffmpeg extraction into scratch, then a library save.

use super::SegmentExporter;
use crate::library::MediaLibrary;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use vidsplit_av::{
    export_segment_with, Container, MediaInfo, ScratchDir, SegmentOutcome, SegmentRequest,
};

/// Exports one segment per call: trims the source into a scratch file via
/// ffmpeg stream copy, then moves the file into the media library. The
/// scratch directory is owned here and cleaned up when the exporter is
/// dropped at process wind-down, never per call.
pub struct FfmpegExporter {
    ffmpeg: PathBuf,
    source: MediaInfo,
    scratch: ScratchDir,
    library: MediaLibrary,
    container: Container,
}

impl FfmpegExporter {
    pub fn new(
        ffmpeg: PathBuf,
        source: MediaInfo,
        scratch: ScratchDir,
        library: MediaLibrary,
        container: Container,
    ) -> Self {
        Self {
            ffmpeg,
            source,
            scratch,
            library,
            container,
        }
    }
}

#[async_trait]
impl SegmentExporter for FfmpegExporter {
    async fn export(&self, request: SegmentRequest) -> anyhow::Result<SegmentOutcome> {
        let dest = self.scratch.segment_path(self.container);
        let ffmpeg = self.ffmpeg.clone();
        let source = self.source.clone();
        let library = self.library.clone();

        // ffmpeg and the library move are blocking work
        let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<SegmentOutcome> {
            match export_segment_with(&ffmpeg, &source, request, &dest)? {
                SegmentOutcome::SourceExhausted => Ok(SegmentOutcome::SourceExhausted),
                SegmentOutcome::Exported => {
                    library.save(&dest)?;
                    Ok(SegmentOutcome::Exported)
                }
            }
        })
        .await
        .context("export task panicked")??;

        Ok(outcome)
    }
}
