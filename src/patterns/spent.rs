//! The fixed "You spent $..." template.
//!
//! This is the default variant and the strictest one: amount must carry
//! exactly two decimal digits, the date token must be `YYYY-MM-DD`, and the
//! merchant is captured verbatim with no cleanup. It matches the raw
//! message body, not the whitespace-normalized form.

use regex::Regex;

use crate::message::RawMessage;
use crate::pattern::{MessagePattern, PatternError};
use crate::record::{Direction, ExtractError, TransactionRecord};

use super::{compile, parse_amount};

pub const SPENT_PATTERN_NAME: &str = "spent";

/// Recognizes `You spent $<amount> at <merchant> on <date>`.
///
/// The merchant capture is the shortest run that reaches a following
/// ` on <date>` anchor. A merchant that itself contains the word "on" still
/// captures fully, because the anchor requires a date token: "Hooligans on
/// Main on 2025-01-01" yields the merchant "Hooligans on Main". When one
/// body contains two complete templates, the leftmost wins.
#[derive(Debug)]
pub struct SpentTemplate {
    regex: Regex,
}

impl SpentTemplate {
    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            SPENT_PATTERN_NAME,
            r"You spent \$(\d+\.\d{2}) at (.*?) on (\d{4}-\d{2}-\d{2})",
        )?;
        Ok(Self { regex })
    }
}

impl MessagePattern for SpentTemplate {
    fn name(&self) -> &str {
        SPENT_PATTERN_NAME
    }

    fn try_extract(&self, msg: &RawMessage) -> Result<Option<TransactionRecord>, ExtractError> {
        let caps = match self.regex.captures(&msg.body) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        // Malformed numerics fail closed to "no match" upstream
        let amount = parse_amount(&caps[1])?;

        Ok(Some(TransactionRecord {
            amount,
            merchant: caps[2].to_string(),
            date: Some(caps[3].to_string()),
            direction: Direction::Debit,
            provider: SPENT_PATTERN_NAME.to_string(),
            currency: "USD".to_string(),
            upi_id: None,
            category: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> Option<TransactionRecord> {
        SpentTemplate::new()
            .unwrap()
            .try_extract(&RawMessage::new(body))
            .unwrap()
    }

    #[test]
    fn test_exact_message() {
        let rec = extract("You spent $50.00 at Amazon on 2025-08-16").unwrap();
        assert_eq!(rec.amount, 50.00);
        assert_eq!(rec.merchant, "Amazon");
        assert_eq!(rec.date.as_deref(), Some("2025-08-16"));
        assert_eq!(rec.direction, Direction::Debit);
        assert_eq!(rec.currency, "USD");
    }

    #[test]
    fn test_match_inside_longer_message() {
        let rec = extract("Hi! You spent $12.50 at Joe's Cafe on 2024-01-05. Thanks.").unwrap();
        assert_eq!(rec.amount, 12.50);
        assert_eq!(rec.merchant, "Joe's Cafe");
        assert_eq!(rec.date.as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn test_amount_requires_two_decimals() {
        assert!(extract("You spent $5 at Amazon on 2025-08-16").is_none());
        assert!(extract("You spent $5.1 at Amazon on 2025-08-16").is_none());
    }

    #[test]
    fn test_merchant_containing_on() {
        let rec = extract("You spent $9.99 at Hooligans on Main on 2025-01-01").unwrap();
        assert_eq!(rec.merchant, "Hooligans on Main");
        assert_eq!(rec.date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_merchant_verbatim_no_trimming() {
        let rec = extract("You spent $1.00 at  Spaced  Out  on 2025-01-01").unwrap();
        assert_eq!(rec.merchant, " Spaced  Out ");
    }

    #[test]
    fn test_impossible_date_structurally_accepted() {
        let rec = extract("You spent $3.00 at X on 2025-02-30").unwrap();
        assert_eq!(rec.date.as_deref(), Some("2025-02-30"));
        assert_eq!(rec.parsed_date(), None);
    }

    #[test]
    fn test_no_match_without_prefix() {
        assert!(extract("").is_none());
        assert!(extract("Rs. 89.00 debited from A/c **1234").is_none());
        assert!(extract("You received $50.00 at Amazon on 2025-08-16").is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rec = extract(
            "You spent $1.00 at First on 2025-01-01 and You spent $2.00 at Second on 2025-01-02",
        )
        .unwrap();
        assert_eq!(rec.amount, 1.00);
        assert_eq!(rec.merchant, "First");
    }
}
