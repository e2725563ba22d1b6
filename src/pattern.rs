//! The pattern trait: one provider template, one implementation.
//!
//! Extraction is a polymorphic capability. Each `MessagePattern` knows one
//! notification shape; a [`PatternRegistry`](crate::registry::PatternRegistry)
//! holds them in priority order and the first success wins.

use std::fmt;

use crate::message::RawMessage;
use crate::record::{ExtractError, TransactionRecord};

/// A single notification template.
///
/// Implementations precompile their regexes at construction time, so an
/// invalid expression is a construction error and never an extraction-time
/// one. Matching is unanchored: the template may appear anywhere inside a
/// longer message, and only the first occurrence is considered.
///
/// # Returns
/// * `Ok(Some(record))` - the template matched and produced a record
/// * `Ok(None)` - the template does not apply to this message
/// * `Err(e)` - the evaluation itself failed (fails closed upstream)
pub trait MessagePattern: Send + Sync {
    /// Stable pattern name, unique within a registry.
    fn name(&self) -> &str;

    /// Attempt to recognize a transaction in the message.
    fn try_extract(&self, msg: &RawMessage) -> Result<Option<TransactionRecord>, ExtractError>;
}

/// Error type for pattern construction and registration.
#[derive(Debug, Clone)]
pub enum PatternError {
    /// The regular expression failed to compile
    InvalidRegex { name: String, message: String },

    /// A pattern with this name is already registered
    DuplicateName(String),

    /// A declared capture group does not exist in the expression
    MissingGroup { name: String, group: String },

    /// The definition is structurally invalid (empty name, no amount group, ...)
    InvalidDefinition { name: String, message: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidRegex { name, message } => {
                write!(f, "Pattern '{}' has an invalid regex: {}", name, message)
            }
            PatternError::DuplicateName(name) => {
                write!(f, "Pattern '{}' is already registered", name)
            }
            PatternError::MissingGroup { name, group } => {
                write!(f, "Pattern '{}' declares missing capture group '{}'", name, group)
            }
            PatternError::InvalidDefinition { name, message } => {
                write!(f, "Pattern '{}' is invalid: {}", name, message)
            }
        }
    }
}

impl std::error::Error for PatternError {}
