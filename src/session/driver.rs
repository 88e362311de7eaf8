//! The segmentation driver.

use super::{
    estimate_segments, ConfirmSplit, SegmentExporter, SessionEvent, SessionOutcome, SessionState,
    SplitError,
};
use crate::library::{AccessGate, AccessStatus};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use vidsplit_av::{SegmentOutcome, SegmentRequest};

/// Drives one split session: validates the request, gates on library
/// access, estimates and confirms, then exports segments strictly one at a
/// time with advancing start offsets until the exporter reports exhaustion.
///
/// Step `i + 1` is never issued before step `i`'s result is observed;
/// concurrent exports would multiply peak scratch usage for no benefit.
pub struct SplitDriver<'a> {
    exporter: &'a dyn SegmentExporter,
    gate: &'a dyn AccessGate,
    confirm: &'a dyn ConfirmSplit,
    confirm_threshold: u32,
    cancel: CancellationToken,
    events: Option<broadcast::Sender<SessionEvent>>,
    state: SessionState,
}

impl<'a> SplitDriver<'a> {
    pub fn new(
        exporter: &'a dyn SegmentExporter,
        gate: &'a dyn AccessGate,
        confirm: &'a dyn ConfirmSplit,
    ) -> Self {
        Self {
            exporter,
            gate,
            confirm,
            confirm_threshold: 10,
            cancel: CancellationToken::new(),
            events: None,
            state: SessionState::Idle,
        }
    }

    /// Broadcast session events to the given sender.
    pub fn with_events(mut self, events: broadcast::Sender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Estimates above this require confirmation before the session starts.
    pub fn with_confirm_threshold(mut self, threshold: u32) -> Self {
        self.confirm_threshold = threshold;
        self
    }

    /// Token checked between steps; a cancelled token ends the session
    /// after the in-flight step.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(ref tx) = self.events {
            if tx.send(event).is_err() {
                tracing::debug!("No subscribers for session event");
            }
        }
    }

    /// Run one split session over a source of `total_secs`, cutting every
    /// `seconds`.
    ///
    /// Returns how the session ended, or the error that ended it. Rejected
    /// requests (zero or whole-source durations, denied access) change no
    /// state and issue no export steps.
    pub async fn run(
        &mut self,
        total_secs: f64,
        seconds: u64,
    ) -> Result<SessionOutcome, SplitError> {
        if seconds == 0 {
            return Err(SplitError::InvalidDuration(seconds));
        }

        let total_ceil = total_secs.ceil() as u64;
        if seconds >= total_ceil {
            return Err(SplitError::UnnecessarySplit {
                seconds,
                total: total_ceil,
            });
        }

        match self.gate.check_or_request_access().await {
            AccessStatus::Granted => {}
            AccessStatus::Denied { reason } => {
                return Err(SplitError::AccessDenied { reason });
            }
        }

        self.state = SessionState::Estimating;
        let estimated = estimate_segments(total_secs, seconds);
        tracing::info!(
            "Splitting {}s source every {}s, estimated {} segments",
            total_secs,
            seconds,
            estimated
        );

        if estimated > self.confirm_threshold && !self.confirm.confirm(estimated).await {
            tracing::info!("Split declined at confirmation");
            self.state = SessionState::Idle;
            return Ok(SessionOutcome::Declined);
        }

        self.emit(SessionEvent::SessionStarted {
            estimated_segments: estimated,
        });

        let mut index: u32 = 1;
        loop {
            if self.cancel.is_cancelled() {
                let segments = index - 1;
                tracing::info!("Split cancelled after {} segments", segments);
                self.state = SessionState::Idle;
                self.emit(SessionEvent::SessionCancelled { segments });
                return Ok(SessionOutcome::Cancelled { segments });
            }

            // The step index never outruns the over-estimate
            debug_assert!(index <= estimated);
            self.state = SessionState::Exporting(index);

            let request = SegmentRequest {
                start: u64::from(index - 1) * seconds,
                duration: seconds,
            };

            match self.exporter.export(request).await {
                Ok(SegmentOutcome::Exported) => {
                    tracing::debug!("Segment {} of {} exported", index, estimated);
                    self.emit(SessionEvent::SegmentExported {
                        index,
                        estimated_segments: estimated,
                    });
                    index += 1;
                }
                Ok(SegmentOutcome::SourceExhausted) => {
                    let segments = index - 1;
                    tracing::info!("Split finished with {} segments", segments);
                    self.state = SessionState::Done;
                    self.emit(SessionEvent::SessionCompleted { segments });
                    return Ok(SessionOutcome::Completed { segments });
                }
                Err(e) => {
                    let error = format!("{:#}", e);
                    tracing::error!("Split failed at segment {}: {}", index, error);
                    self.state = SessionState::Failed;
                    self.emit(SessionEvent::SessionFailed {
                        error: error.clone(),
                    });
                    return Err(SplitError::Export(error));
                }
            }
        }
    }
}
