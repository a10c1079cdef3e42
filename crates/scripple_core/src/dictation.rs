//! Single-shot dictation completion.
//!
//! # Responsibility
//! - Model one dictation request as a one-shot completion signal.
//! - Map platform recognizer statuses to failure reasons.
//!
//! # Invariants
//! - A responder delivers at most one outcome; `complete` consumes it.
//! - A responder dropped without completing resolves as `Cancelled`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

/// Result of one dictation request as delivered by the recognizer.
pub type DictationOutcome = Result<String, DictationFailure>;

/// Reason a dictation request produced no transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictationFailure {
    /// User rejected the transcription.
    TranscriptionRejected,
    /// User rejected the transcription after an error screen.
    TranscriptionRejectedWithError,
    /// Session was aborted by the system (for example, a back press).
    SystemAborted,
    /// No speech was detected before the timeout.
    NoSpeechDetected,
    /// Phone or network connectivity was unavailable.
    ConnectivityError,
    /// Dictation is disabled by user settings.
    Disabled,
    /// Recognizer failed internally.
    InternalError,
    /// Speech recognizer service returned an error.
    RecognizerError,
}

impl DictationFailure {
    /// Stable snake_case code used in log events.
    pub fn code(self) -> &'static str {
        match self {
            Self::TranscriptionRejected => "transcription_rejected",
            Self::TranscriptionRejectedWithError => "transcription_rejected_with_error",
            Self::SystemAborted => "system_aborted",
            Self::NoSpeechDetected => "no_speech_detected",
            Self::ConnectivityError => "connectivity_error",
            Self::Disabled => "disabled",
            Self::InternalError => "internal_error",
            Self::RecognizerError => "recognizer_error",
        }
    }
}

impl Display for DictationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "dictation failed: {}", self.code())
    }
}

impl Error for DictationFailure {}

/// Final state of a pending dictation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationResolution {
    /// Recognizer delivered an outcome.
    Completed(DictationOutcome),
    /// Request was abandoned before any outcome.
    Cancelled,
}

/// Sending half held by the recognizer side.
#[derive(Debug)]
pub struct DictationResponder {
    sender: SyncSender<DictationOutcome>,
}

impl DictationResponder {
    /// Delivers the outcome. Consumes the responder so a request resolves once.
    pub fn complete(self, outcome: DictationOutcome) {
        // Receiver gone means the requester stopped waiting; nothing to do.
        let _ = self.sender.send(outcome);
    }

    /// Convenience for a successful transcription.
    pub fn transcribed(self, text: impl Into<String>) {
        self.complete(Ok(text.into()));
    }

    /// Convenience for a failed request.
    pub fn fail(self, reason: DictationFailure) {
        self.complete(Err(reason));
    }
}

/// Receiving half held by the requester.
#[derive(Debug)]
pub struct PendingDictation {
    receiver: Receiver<DictationOutcome>,
}

impl PendingDictation {
    /// Returns the resolution if available, without blocking.
    pub fn try_resolve(&self) -> Option<DictationResolution> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(DictationResolution::Completed(outcome)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(DictationResolution::Cancelled),
        }
    }

    /// Blocks until the responder completes or is dropped.
    pub fn wait(self) -> DictationResolution {
        match self.receiver.recv() {
            Ok(outcome) => DictationResolution::Completed(outcome),
            Err(_) => DictationResolution::Cancelled,
        }
    }
}

/// Creates a linked responder/pending pair for one dictation request.
pub fn dictation_channel() -> (DictationResponder, PendingDictation) {
    let (sender, receiver) = mpsc::sync_channel(1);
    (
        DictationResponder { sender },
        PendingDictation { receiver },
    )
}

#[cfg(test)]
mod tests {
    use super::{dictation_channel, DictationFailure, DictationResolution};
    use std::thread;

    #[test]
    fn pending_is_empty_until_completed() {
        let (responder, pending) = dictation_channel();
        assert_eq!(pending.try_resolve(), None);
        responder.transcribed("walk dog");
        assert_eq!(
            pending.try_resolve(),
            Some(DictationResolution::Completed(Ok("walk dog".to_string())))
        );
    }

    #[test]
    fn dropped_responder_resolves_as_cancelled() {
        let (responder, pending) = dictation_channel();
        drop(responder);
        assert_eq!(pending.wait(), DictationResolution::Cancelled);
    }

    #[test]
    fn failure_is_delivered_across_threads() {
        let (responder, pending) = dictation_channel();
        let worker = thread::spawn(move || responder.fail(DictationFailure::NoSpeechDetected));
        assert_eq!(
            pending.wait(),
            DictationResolution::Completed(Err(DictationFailure::NoSpeechDetected))
        );
        worker.join().expect("responder thread should not panic");
    }

    #[test]
    fn completing_after_requester_left_is_harmless() {
        let (responder, pending) = dictation_channel();
        drop(pending);
        responder.transcribed("nobody listens");
    }
}
