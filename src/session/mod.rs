//! Split sessions: the sequential segment-export state machine.

mod driver;
mod exporter;

pub use driver::SplitDriver;
pub use exporter::FfmpegExporter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vidsplit_av::{SegmentOutcome, SegmentRequest};

/// Observable state of one split session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in flight.
    Idle,
    /// Segment count is being estimated and confirmed.
    Estimating,
    /// The 1-based step currently being exported.
    Exporting(u32),
    /// The session reached the end of the source.
    Done,
    /// The session aborted on a step error.
    Failed,
}

/// Per-session event, broadcast to whoever displays progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A session passed validation, access, and confirmation.
    SessionStarted { estimated_segments: u32 },
    /// One segment was exported and saved.
    SegmentExported {
        index: u32,
        estimated_segments: u32,
    },
    /// The source is exhausted; the session is over.
    SessionCompleted { segments: u32 },
    /// A step failed; the session aborted.
    SessionFailed { error: String },
    /// The session was cancelled between steps.
    SessionCancelled { segments: u32 },
}

/// Errors that end a split request.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The chosen duration is not a usable number of seconds.
    #[error("invalid split duration: {0} seconds")]
    InvalidDuration(u64),

    /// The chosen duration covers the whole source; nothing to split.
    #[error("unnecessary split: {seconds}s segments cover the whole {total}s source")]
    UnnecessarySplit { seconds: u64, total: u64 },

    /// The library refused access; no session was started.
    #[error("library access denied: {reason}")]
    AccessDenied { reason: String },

    /// A step failed. Carries the step's message verbatim.
    #[error("{0}")]
    Export(String),
}

/// How a session that was allowed to run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// All segments exported and saved.
    Completed { segments: u32 },
    /// The user declined the large-estimate confirmation; nothing exported.
    Declined,
    /// Cancelled between steps; earlier segments remain in the library.
    Cancelled { segments: u32 },
}

/// One shared export capability, injected into the driver so tests can
/// substitute a fake.
#[async_trait]
pub trait SegmentExporter: Send + Sync {
    /// Export the requested slice and persist it.
    ///
    /// `SourceExhausted` means the request starts at or past the end of the
    /// source; it is the driver's sole stop condition, not an error.
    async fn export(&self, request: SegmentRequest) -> anyhow::Result<SegmentOutcome>;
}

/// Confirmation hook for estimates above the threshold.
#[async_trait]
pub trait ConfirmSplit: Send + Sync {
    async fn confirm(&self, estimated_segments: u32) -> bool;
}

/// Estimated segment count for a source of `total_secs` split every
/// `seconds`.
///
/// Deliberately over-estimates by one to absorb rounding; the true count is
/// only discovered when a step reports exhaustion, and the display keeps the
/// over-estimate.
pub fn estimate_segments(total_secs: f64, seconds: u64) -> u32 {
    (total_secs / seconds as f64).ceil() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_over_counts_by_one() {
        assert_eq!(estimate_segments(130.0, 60), 4);
        assert_eq!(estimate_segments(120.0, 60), 3);
        assert_eq!(estimate_segments(59.0, 60), 2);
        assert_eq!(estimate_segments(61.0, 1), 62);
    }
}
