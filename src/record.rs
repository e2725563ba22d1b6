//! Structured transaction records and extraction outcomes.
//!
//! A `TransactionRecord` is the output of a successful extraction. The
//! `Extraction` enum is the full outcome type: callers that only care about
//! "record or nothing" can use `TransactionExtractor::extract`, while tests
//! and stricter callers can distinguish "nothing to extract" from "the
//! matching engine itself failed".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the money movement, from the notification's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money left the account (spent / paid / debited)
    Debit,
    /// Money arrived (received / credited / refunded)
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Debit => write!(f, "debit"),
            Direction::Credit => write!(f, "credit"),
        }
    }
}

/// A transaction recognized in a notification message.
///
/// `amount` is always non-negative; the sign semantics live in `direction`.
/// `date` is the date token captured verbatim from the message, when the
/// message carried one. It is not validated for calendar correctness; use
/// [`TransactionRecord::parsed_date`] for a validating view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction amount, non-negative
    pub amount: f64,

    /// Merchant or counterparty label
    pub merchant: String,

    /// Date token captured verbatim (e.g. "2025-08-16" or "21-Jul-25")
    #[serde(default)]
    pub date: Option<String>,

    /// Debit or credit
    pub direction: Direction,

    /// Provider label: the issuing bank or UPI app when identified,
    /// otherwise the name of the pattern that matched
    pub provider: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// Counterparty UPI VPA, when the message carried one
    #[serde(default)]
    pub upi_id: Option<String>,

    /// Assigned spending category, when categorization is enabled
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionRecord {
    /// Calendar-validating view of the captured date token.
    ///
    /// Understands `YYYY-MM-DD` and `DD-Mon-YY` tokens. Returns `None` when
    /// no token was captured, the format is unrecognized, or the token names
    /// an impossible date (the raw `date` field accepts those verbatim).
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let token = self.date.as_deref()?;
        NaiveDate::parse_from_str(token, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(token, "%d-%b-%y"))
            .ok()
    }
}

/// Error taxonomy for a single pattern evaluation.
#[derive(Debug, Clone)]
pub enum ExtractError {
    /// The textual pattern matched but the amount substring failed to parse
    /// as a decimal. Fails closed: the extractor treats this as no match.
    MalformedNumeric { raw: String },

    /// The matching engine itself failed unexpectedly. Caught locally and
    /// surfaced as an empty result; never propagated as a panic.
    EngineFault(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MalformedNumeric { raw } => {
                write!(f, "Amount '{}' is not a valid decimal", raw)
            }
            ExtractError::EngineFault(msg) => write!(f, "Pattern engine fault: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Full outcome of an extraction attempt.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// A transaction was recognized
    Record(TransactionRecord),
    /// The input does not contain any known pattern. A normal outcome,
    /// not an error.
    NoMatch,
    /// No pattern matched and at least one pattern faulted while evaluating
    Fault(ExtractError),
}

impl Extraction {
    /// True when a record was produced.
    pub fn is_record(&self) -> bool {
        matches!(self, Extraction::Record(_))
    }

    /// Collapse the outcome to the record-or-nothing view.
    pub fn into_record(self) -> Option<TransactionRecord> {
        match self {
            Extraction::Record(record) => Some(record),
            Extraction::NoMatch | Extraction::Fault(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            amount: 50.0,
            merchant: "Amazon".to_string(),
            date: date.map(|d| d.to_string()),
            direction: Direction::Debit,
            provider: "spent".to_string(),
            currency: "USD".to_string(),
            upi_id: None,
            category: None,
        }
    }

    #[test]
    fn test_parsed_date_iso() {
        let rec = record(Some("2025-08-16"));
        assert_eq!(rec.parsed_date(), NaiveDate::from_ymd_opt(2025, 8, 16));
    }

    #[test]
    fn test_parsed_date_bank_style() {
        let rec = record(Some("21-Jul-25"));
        assert_eq!(rec.parsed_date(), NaiveDate::from_ymd_opt(2025, 7, 21));
    }

    #[test]
    fn test_parsed_date_impossible() {
        // Structurally accepted in the raw field, rejected by the view
        let rec = record(Some("2025-02-30"));
        assert_eq!(rec.date.as_deref(), Some("2025-02-30"));
        assert_eq!(rec.parsed_date(), None);
    }

    #[test]
    fn test_parsed_date_absent() {
        assert_eq!(record(None).parsed_date(), None);
    }

    #[test]
    fn test_extraction_into_record() {
        assert!(Extraction::Record(record(None)).into_record().is_some());
        assert!(Extraction::NoMatch.into_record().is_none());
        let fault = Extraction::Fault(ExtractError::EngineFault("boom".to_string()));
        assert!(fault.into_record().is_none());
    }

    #[test]
    fn test_record_serializes_direction_lowercase() {
        let json = serde_json::to_string(&record(Some("2025-08-16"))).unwrap();
        assert!(json.contains("\"direction\":\"debit\""));
    }
}
