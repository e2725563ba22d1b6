//! Diagnostic sink for the extraction data path.
//!
//! Extraction never fails its caller; what it does instead is record what
//! happened through an injected `DiagnosticSink`. The default sink forwards
//! to `tracing`; tests inject a `MemorySink` to assert on the emitted
//! events deterministically.

use std::sync::Mutex;

/// An event on the extraction data path.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// A pattern matched and produced a record
    Extracted {
        pattern: String,
        amount: f64,
        merchant: String,
        date: Option<String>,
    },
    /// No pattern recognized the message
    NoMatch,
    /// The message was screened out as spam before matching
    SpamSkipped,
    /// A pattern faulted while evaluating; extraction continued
    Fault { pattern: String, message: String },
}

/// Collaborator that records human-readable trace information, separate from
/// the primary data path. Implementations must be callable from concurrent
/// extractions.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::Extracted {
                pattern,
                amount,
                merchant,
                date,
            } => {
                tracing::debug!(
                    %pattern,
                    amount,
                    %merchant,
                    date = date.as_deref().unwrap_or("-"),
                    "transaction extracted"
                );
            }
            DiagnosticEvent::NoMatch => {
                tracing::debug!("no transaction pattern matched");
            }
            DiagnosticEvent::SpamSkipped => {
                tracing::debug!("message screened out as spam");
            }
            DiagnosticEvent::Fault { pattern, message } => {
                tracing::error!(%pattern, %message, "pattern evaluation faulted");
            }
        }
    }
}

/// Sink that buffers events in memory for inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in order.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
