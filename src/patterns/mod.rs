//! Built-in notification templates.
//!
//! `spent` preserves the fixed "You spent $..." template exactly. `bank`
//! and `upi` cover the notification shapes Indian banks and UPI apps send.
//! `custom` builds a pattern from a YAML definition at runtime.

pub mod bank;
pub mod custom;
pub mod spent;
pub mod upi;

use regex::Regex;

use crate::pattern::PatternError;
use crate::record::{Direction, ExtractError};

/// Compile a built-in expression, attributing failures to the pattern name.
pub(crate) fn compile(name: &str, expr: &str) -> Result<Regex, PatternError> {
    Regex::new(expr).map_err(|e| PatternError::InvalidRegex {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Parse an amount capture into a non-negative decimal.
///
/// Accepts comma grouping ("5,320.00"). Fails closed on anything that does
/// not parse to a finite, non-negative number.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, ExtractError> {
    let cleaned = raw.replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ExtractError::MalformedNumeric {
            raw: raw.to_string(),
        }),
    }
}

/// Map a matched verb to a money-movement direction.
pub(crate) fn direction_from_verb(verb: &str) -> Direction {
    match verb.to_lowercase().as_str() {
        "credited" | "received" => Direction::Credit,
        // debited / paid / sent / spent
        _ => Direction::Debit,
    }
}

/// Scanner for a date token elsewhere in the message body.
///
/// Bank notifications put the date outside the amount clause ("on
/// 21-Jul-25"); the shape patterns pick it up with this secondary scan
/// rather than complicating every expression.
#[derive(Debug)]
pub(crate) struct DateScan {
    token: Regex,
}

impl DateScan {
    pub(crate) fn new() -> Result<Self, PatternError> {
        let token = compile("date_scan", r"\b(\d{4}-\d{2}-\d{2}|\d{1,2}-[A-Za-z]{3}-\d{2})\b")?;
        Ok(Self { token })
    }

    /// First date token in the text, verbatim.
    pub(crate) fn find(&self, text: &str) -> Option<String> {
        self.token
            .captures(text)
            .map(|caps| caps[1].to_string())
    }
}

/// Strip counterparty noise the way notification bodies require: leading
/// to/from, trailing "via ..."/"using ..." clauses, surrounding whitespace.
pub(crate) fn clean_merchant(raw: &str) -> String {
    let mut cleaned = raw.trim();

    for prefix in ["to ", "from ", "To ", "From "] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.trim_start();
            break;
        }
    }

    for marker in [" via ", " using ", " UPI", " -"] {
        if let Some(idx) = cleaned.find(marker) {
            cleaned = &cleaned[..idx];
        }
    }

    cleaned.trim().to_string()
}
