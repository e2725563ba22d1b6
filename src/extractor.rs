//! The extraction facade.
//!
//! `TransactionExtractor` runs a message through the registry, contains
//! every failure mode, and reports what happened through the injected
//! diagnostic sink. It holds no mutable state: calls are independent,
//! idempotent, and safe to issue from any number of threads at once.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;

use crate::category;
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, TracingSink};
use crate::message::RawMessage;
use crate::pattern::PatternError;
use crate::record::{ExtractError, Extraction, TransactionRecord};
use crate::registry::PatternRegistry;
use crate::spam::SpamScreen;

/// Outcome counters for a batch of messages.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Messages that produced a record
    pub parsed: usize,
    /// Messages that produced nothing
    pub failed: usize,
    /// The records, in input order
    pub records: Vec<TransactionRecord>,
}

/// Stateless extraction facade over a pattern registry.
///
/// Callers that only want "record or nothing" use [`extract`]; callers that
/// need to distinguish "nothing to extract" from "the engine faulted" use
/// [`try_extract`].
///
/// [`extract`]: TransactionExtractor::extract
/// [`try_extract`]: TransactionExtractor::try_extract
pub struct TransactionExtractor {
    registry: PatternRegistry,
    sink: Arc<dyn DiagnosticSink>,
    spam_screen: Option<SpamScreen>,
    categorize: bool,
}

impl TransactionExtractor {
    /// Build an extractor over a registry, with diagnostics going to
    /// `tracing` and the optional screens disabled.
    pub fn new(registry: PatternRegistry) -> Self {
        Self {
            registry,
            sink: Arc::new(TracingSink),
            spam_screen: None,
            categorize: false,
        }
    }

    /// Extractor reproducing the single fixed-template behavior.
    pub fn with_default_pattern() -> Result<Self, PatternError> {
        Ok(Self::new(PatternRegistry::with_default()?))
    }

    /// Extractor over every built-in pattern.
    pub fn with_builtin_patterns() -> Result<Self, PatternError> {
        Ok(Self::new(PatternRegistry::builtin()?))
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Screen out promotional/scam messages before matching.
    pub fn with_spam_filter(mut self) -> Result<Self, PatternError> {
        self.spam_screen = Some(SpamScreen::new()?);
        Ok(self)
    }

    /// Attach a spending category to every successful record.
    pub fn with_categorization(mut self) -> Self {
        self.categorize = true;
        self
    }

    /// Patterns in priority order.
    pub fn pattern_names(&self) -> Vec<&str> {
        self.registry.pattern_names()
    }

    /// Record-or-nothing extraction over bare text.
    ///
    /// All failure modes are absorbed: an unmatched message, a malformed
    /// amount, or a faulting pattern all come back as `None`. This call
    /// never panics.
    pub fn extract(&self, text: &str) -> Option<TransactionRecord> {
        self.try_extract(&RawMessage::new(text)).into_record()
    }

    /// Typed extraction over a full message.
    ///
    /// Patterns run in priority order; the first success wins. A pattern
    /// that faults (panics or reports an engine error) is recorded through
    /// the sink and evaluation continues with the remaining patterns. When
    /// nothing matched and at least one pattern faulted, the outcome is
    /// `Fault` rather than `NoMatch`.
    pub fn try_extract(&self, msg: &RawMessage) -> Extraction {
        if let Some(screen) = &self.spam_screen {
            if screen.is_spam(&msg.body) {
                self.sink.record(DiagnosticEvent::SpamSkipped);
                return Extraction::NoMatch;
            }
        }

        let mut first_fault: Option<ExtractError> = None;

        for pattern in self.registry.iter() {
            let evaluated =
                panic::catch_unwind(AssertUnwindSafe(|| pattern.try_extract(msg)));

            match evaluated {
                Ok(Ok(Some(mut record))) => {
                    if self.categorize {
                        record.category =
                            Some(category::categorize(&record.merchant, record.amount).to_string());
                    }
                    self.sink.record(DiagnosticEvent::Extracted {
                        pattern: pattern.name().to_string(),
                        amount: record.amount,
                        merchant: record.merchant.clone(),
                        date: record.date.clone(),
                    });
                    return Extraction::Record(record);
                }
                Ok(Ok(None)) => {}
                Ok(Err(ExtractError::MalformedNumeric { raw })) => {
                    // Fails closed: a matched-but-unparseable amount is
                    // treated as this pattern not matching
                    self.sink.record(DiagnosticEvent::Fault {
                        pattern: pattern.name().to_string(),
                        message: format!("amount '{}' failed decimal parse", raw),
                    });
                }
                Ok(Err(fault @ ExtractError::EngineFault(_))) => {
                    self.sink.record(DiagnosticEvent::Fault {
                        pattern: pattern.name().to_string(),
                        message: fault.to_string(),
                    });
                    first_fault.get_or_insert(fault);
                }
                Err(payload) => {
                    let message = panic_message(payload);
                    self.sink.record(DiagnosticEvent::Fault {
                        pattern: pattern.name().to_string(),
                        message: message.clone(),
                    });
                    first_fault.get_or_insert(ExtractError::EngineFault(message));
                }
            }
        }

        match first_fault {
            Some(fault) => Extraction::Fault(fault),
            None => {
                self.sink.record(DiagnosticEvent::NoMatch);
                Extraction::NoMatch
            }
        }
    }

    /// Run a batch of messages and tally the outcomes.
    pub fn extract_batch<I>(&self, messages: I) -> BatchSummary
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut summary = BatchSummary {
            parsed: 0,
            failed: 0,
            records: Vec::new(),
        };

        for msg in messages {
            match self.try_extract(&msg) {
                Extraction::Record(record) => {
                    summary.parsed += 1;
                    summary.records.push(record);
                }
                Extraction::NoMatch | Extraction::Fault(_) => {
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "pattern panicked".to_string()
    }
}
