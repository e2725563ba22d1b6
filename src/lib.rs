//! # Spendscan: Transaction Notification Extraction
//!
//! Spendscan recognizes payment notifications in raw message text and turns
//! them into structured transaction records. Extraction is pattern-based:
//! a registry of provider templates is tried in priority order, and the
//! first success wins.
//!
//! ## Features
//!
//! - **Pattern registry**: priority-ordered provider templates with
//!   first-success-wins semantics
//! - **Built-in templates**: the fixed "You spent $..." template, Indian
//!   bank account alerts, UPI app notifications, and a generic fallback
//! - **YAML pattern sets**: declare additional provider templates in
//!   configuration, no code changes required
//! - **Typed outcomes**: callers can distinguish "nothing to extract" from
//!   "the matching engine faulted"; the simple call absorbs both
//! - **Injected diagnostics**: extraction reports through a sink
//!   collaborator, so tests observe the trace deterministically
//!
//! Matching cost is linear in the input, so adversarial bodies (repeated
//! symbols, very long strings) stay bounded. Extraction holds no mutable
//! state and never panics its caller: a message either yields a record or
//! it does not.
//!
//! ## Example: custom pattern set
//!
//! ```yaml
//! patterns:
//!   - name: acme_card
//!     regex: 'ACME: \$(?P<amount>\d+\.\d{2}) at (?P<merchant>.+?) on (?P<date>\d{4}-\d{2}-\d{2})'
//!     direction: debit
//!     currency: USD
//! ```
//!
//! ## Example: extraction
//!
//! ```
//! use spendscan::TransactionExtractor;
//!
//! let extractor = TransactionExtractor::with_default_pattern().unwrap();
//! let record = extractor.extract("You spent $50.00 at Amazon on 2025-08-16").unwrap();
//! assert_eq!(record.merchant, "Amazon");
//! assert_eq!(record.amount, 50.00);
//! ```

// Core modules
pub mod message;
pub mod pattern;
pub mod record;
pub mod registry;

// Built-in and configured notification templates
pub mod patterns;

// Extraction facade and collaborators
pub mod category;
pub mod diagnostics;
pub mod extractor;
pub mod provider;
pub mod spam;

// Configuration and output
pub mod config;
pub mod serialization;

// Re-export key types
pub use config::{PatternDef, PatternSetConfig};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, MemorySink, TracingSink};
pub use extractor::{BatchSummary, TransactionExtractor};
pub use message::RawMessage;
pub use pattern::{MessagePattern, PatternError};
pub use record::{Direction, ExtractError, Extraction, TransactionRecord};
pub use registry::PatternRegistry;
