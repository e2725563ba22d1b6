//! Bank account notification shapes.
//!
//! Indian bank alerts follow a small family of shapes ("INR 250.00 has been
//! debited ... towards UPI/merchant@okaxis"). The shapes are
//! provider-agnostic; the issuing bank is identified separately from the
//! sender id and body. All shapes match against the whitespace-normalized
//! body.

use regex::Regex;

use crate::message::{normalize_whitespace, RawMessage};
use crate::pattern::{MessagePattern, PatternError};
use crate::provider;
use crate::record::{ExtractError, TransactionRecord};

use super::{compile, direction_from_verb, parse_amount, DateScan};

/// Amount-first account alert with a UPI counterparty:
/// `INR 250.00 has been debited from your A/c ... towards UPI/merchant@okaxis`.
#[derive(Debug)]
pub struct BankUpiAlert {
    regex: Regex,
    dates: DateScan,
}

impl BankUpiAlert {
    pub const NAME: &'static str = "bank_upi_alert";

    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            Self::NAME,
            r"(?i)(?:INR|Rs\.?|₹)\s*(?P<amount>[\d,]+(?:\.\d+)?)\s*(?:has\s+been\s+)?(?P<verb>debited|credited|paid|received)\b.*?UPI\s*[/:]?\s*(?P<vpa>[\w.-]+@[\w-]+(?:\.[\w-]+)*)",
        )?;
        Ok(Self {
            regex,
            dates: DateScan::new()?,
        })
    }
}

impl MessagePattern for BankUpiAlert {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_extract(&self, msg: &RawMessage) -> Result<Option<TransactionRecord>, ExtractError> {
        let body = normalize_whitespace(&msg.body);
        let caps = match self.regex.captures(&body) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        let amount = parse_amount(&caps["amount"])?;
        if amount <= 0.0 {
            return Ok(None);
        }

        let vpa = caps["vpa"].to_string();
        // VPA local part reads better as a merchant label than the full id
        let merchant = vpa
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        Ok(Some(TransactionRecord {
            amount,
            merchant,
            date: self.dates.find(&body),
            direction: direction_from_verb(&caps["verb"]),
            provider: provider::identify_or_unknown(msg.sender.as_deref(), &body).to_string(),
            currency: "INR".to_string(),
            upi_id: Some(vpa),
            category: None,
        }))
    }
}

/// Verb-first account alert, counterparty optional:
/// `Your A/c XX1234 is debited with INR 500.00 ... UPI Ref 12345`.
#[derive(Debug)]
pub struct BankDebitAlert {
    regex: Regex,
    vpa: Regex,
    dates: DateScan,
}

impl BankDebitAlert {
    pub const NAME: &'static str = "bank_debit_alert";

    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            Self::NAME,
            r"(?i)\b(?P<verb>debited|credited)\s+(?:with\s+|by\s+)?(?:INR|Rs\.?|₹)\s*(?P<amount>[\d,]+(?:\.\d+)?)\b.*?\bUPI\b",
        )?;
        let vpa = compile(Self::NAME, r"(?P<vpa>[\w.-]+@[\w-]+(?:\.[\w-]+)*)")?;
        Ok(Self {
            regex,
            vpa,
            dates: DateScan::new()?,
        })
    }
}

impl MessagePattern for BankDebitAlert {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_extract(&self, msg: &RawMessage) -> Result<Option<TransactionRecord>, ExtractError> {
        let body = normalize_whitespace(&msg.body);
        let caps = match self.regex.captures(&body) {
            Some(caps) => caps,
            None => return Ok(None),
        };

        let amount = parse_amount(&caps["amount"])?;
        if amount <= 0.0 {
            return Ok(None);
        }

        let vpa = self.vpa.captures(&body).map(|c| c["vpa"].to_string());
        let merchant = vpa
            .as_deref()
            .and_then(|v| v.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        Ok(Some(TransactionRecord {
            amount,
            merchant,
            date: self.dates.find(&body),
            direction: direction_from_verb(&caps["verb"]),
            provider: provider::identify_or_unknown(msg.sender.as_deref(), &body).to_string(),
            currency: "INR".to_string(),
            upi_id: vpa,
            category: None,
        }))
    }
}
