//! Patterns built from configuration at runtime.
//!
//! A `ConfiguredPattern` wraps a user-supplied regex with named capture
//! groups. The `amount` group is mandatory; `merchant`, `date`, `verb` and
//! `vpa` are optional. When a `verb` group captures, it decides the
//! direction; otherwise the configured fixed direction applies.

use regex::Regex;

use crate::config::PatternDef;
use crate::message::{normalize_whitespace, RawMessage};
use crate::pattern::{MessagePattern, PatternError};
use crate::record::{Direction, ExtractError, TransactionRecord};

use super::{direction_from_verb, parse_amount};

/// Capture groups a definition may declare.
pub const AMOUNT_GROUP: &str = "amount";
pub const MERCHANT_GROUP: &str = "merchant";
pub const DATE_GROUP: &str = "date";
pub const VERB_GROUP: &str = "verb";
pub const VPA_GROUP: &str = "vpa";

/// A notification pattern defined in configuration.
#[derive(Debug)]
pub struct ConfiguredPattern {
    name: String,
    regex: Regex,
    direction: Direction,
    currency: String,
    provider: String,
    normalize: bool,
}

impl ConfiguredPattern {
    /// Build a pattern from its definition.
    ///
    /// # Errors
    /// Rejects an empty name, a regex that fails to compile, and a regex
    /// without an `amount` capture group.
    pub fn from_def(def: &PatternDef) -> Result<Self, PatternError> {
        if def.name.trim().is_empty() {
            return Err(PatternError::InvalidDefinition {
                name: "<unnamed>".to_string(),
                message: "pattern name cannot be empty".to_string(),
            });
        }

        let regex = Regex::new(&def.regex).map_err(|e| PatternError::InvalidRegex {
            name: def.name.clone(),
            message: e.to_string(),
        })?;

        let has_group = |group: &str| regex.capture_names().flatten().any(|n| n == group);
        if !has_group(AMOUNT_GROUP) {
            return Err(PatternError::MissingGroup {
                name: def.name.clone(),
                group: AMOUNT_GROUP.to_string(),
            });
        }

        Ok(Self {
            name: def.name.clone(),
            regex,
            direction: def.direction.unwrap_or(Direction::Debit),
            currency: def.currency.clone().unwrap_or_else(|| "USD".to_string()),
            provider: def.provider.clone().unwrap_or_else(|| def.name.clone()),
            normalize: def.normalize,
        })
    }
}

impl MessagePattern for ConfiguredPattern {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_extract(&self, msg: &RawMessage) -> Result<Option<TransactionRecord>, ExtractError> {
        let normalized;
        let body: &str = if self.normalize {
            normalized = normalize_whitespace(&msg.body);
            &normalized
        } else {
            &msg.body
        };

        let caps = match self.regex.captures(body) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        let amount = match caps.name(AMOUNT_GROUP) {
            Some(m) => parse_amount(m.as_str())?,
            None => return Ok(None),
        };

        let direction = caps
            .name(VERB_GROUP)
            .map(|m| direction_from_verb(m.as_str()))
            .unwrap_or(self.direction);

        let merchant = caps
            .name(MERCHANT_GROUP)
            .map(|m| m.as_str().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Some(TransactionRecord {
            amount,
            merchant,
            date: caps.name(DATE_GROUP).map(|m| m.as_str().to_string()),
            direction,
            provider: self.provider.clone(),
            currency: self.currency.clone(),
            upi_id: caps.name(VPA_GROUP).map(|m| m.as_str().to_string()),
            category: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, regex: &str) -> PatternDef {
        PatternDef {
            name: name.to_string(),
            regex: regex.to_string(),
            direction: None,
            currency: None,
            provider: None,
            normalize: false,
        }
    }

    #[test]
    fn test_configured_pattern_extracts() {
        let pattern = ConfiguredPattern::from_def(&def(
            "acme",
            r"ACME alert: \$(?P<amount>\d+\.\d{2}) charged at (?P<merchant>.+?) on (?P<date>\d{4}-\d{2}-\d{2})",
        ))
        .unwrap();

        let rec = pattern
            .try_extract(&RawMessage::new("ACME alert: $42.00 charged at Diner on 2025-06-01"))
            .unwrap()
            .unwrap();
        assert_eq!(rec.amount, 42.00);
        assert_eq!(rec.merchant, "Diner");
        assert_eq!(rec.date.as_deref(), Some("2025-06-01"));
        assert_eq!(rec.direction, Direction::Debit);
        assert_eq!(rec.provider, "acme");
        assert_eq!(rec.currency, "USD");
    }

    #[test]
    fn test_verb_group_decides_direction() {
        let pattern = ConfiguredPattern::from_def(&def(
            "verbs",
            r"(?P<verb>credited|debited) EUR (?P<amount>[\d.]+)",
        ))
        .unwrap();

        let rec = pattern
            .try_extract(&RawMessage::new("credited EUR 10.00 to account"))
            .unwrap()
            .unwrap();
        assert_eq!(rec.direction, Direction::Credit);
    }

    #[test]
    fn test_missing_amount_group_rejected() {
        let err = ConfiguredPattern::from_def(&def("bad", r"spent (?P<merchant>.+)")).unwrap_err();
        assert!(matches!(err, PatternError::MissingGroup { group, .. } if group == "amount"));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = ConfiguredPattern::from_def(&def("broken", r"(?P<amount>[")).unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ConfiguredPattern::from_def(&def("  ", r"(?P<amount>\d+)")).unwrap_err();
        assert!(matches!(err, PatternError::InvalidDefinition { .. }));
    }

    #[test]
    fn test_normalize_option() {
        let mut d = def("spaced", r"pay (?P<amount>\d+\.\d{2}) now");
        d.normalize = true;
        let pattern = ConfiguredPattern::from_def(&d).unwrap();

        let rec = pattern
            .try_extract(&RawMessage::new("pay   7.50\n now"))
            .unwrap()
            .unwrap();
        assert_eq!(rec.amount, 7.50);
    }
}
