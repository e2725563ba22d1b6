//! UPI app notification shapes.
//!
//! Payment apps phrase their notifications around the counterparty ("You
//! paid ₹200 to Swiggy using UPI", "₹150 paid to Zomato via PhonePe"),
//! unlike the account-centric bank alerts. A deliberately loose generic
//! shape sits at the lowest priority as a fallback.

use regex::Regex;

use crate::message::{normalize_whitespace, RawMessage};
use crate::pattern::{MessagePattern, PatternError};
use crate::provider;
use crate::record::{ExtractError, TransactionRecord};

use super::{clean_merchant, compile, direction_from_verb, parse_amount, DateScan};

fn upi_record(
    msg: &RawMessage,
    body: &str,
    amount: f64,
    verb: &str,
    merchant_raw: &str,
    dates: &DateScan,
) -> TransactionRecord {
    let upi_id = if merchant_raw.contains('@') {
        Some(merchant_raw.trim().to_string())
    } else {
        None
    };

    let cleaned = clean_merchant(merchant_raw);
    let merchant = if cleaned.is_empty() {
        "Unknown".to_string()
    } else {
        cleaned
    };

    TransactionRecord {
        amount,
        merchant,
        date: dates.find(body),
        direction: direction_from_verb(verb),
        provider: provider::identify_or_unknown(msg.sender.as_deref(), body).to_string(),
        currency: "INR".to_string(),
        upi_id,
        category: None,
    }
}

/// `You paid ₹200 to Swiggy using UPI`.
#[derive(Debug)]
pub struct UpiYouPaid {
    regex: Regex,
    dates: DateScan,
}

impl UpiYouPaid {
    pub const NAME: &'static str = "upi_you_paid";

    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            Self::NAME,
            r"(?i)\byou\s+(?P<verb>paid|received)\s+(?:₹|Rs\.?|INR)\s*(?P<amount>[\d,]+(?:\.\d+)?)\s+(?:to|from)\s+(?P<merchant>.+?)\s+(?:using|via)\b",
        )?;
        Ok(Self {
            regex,
            dates: DateScan::new()?,
        })
    }
}

impl MessagePattern for UpiYouPaid {
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

        Ok(Some(upi_record(
            msg,
            &body,
            amount,
            &caps["verb"],
            &caps["merchant"],
            &self.dates,
        )))
    }
}

/// `₹150 paid to Zomato via PhonePe UPI`.
#[derive(Debug)]
pub struct UpiAmountVerb {
    regex: Regex,
    dates: DateScan,
}

impl UpiAmountVerb {
    pub const NAME: &'static str = "upi_amount_verb";

    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            Self::NAME,
            r"(?i)(?:₹|Rs\.?|INR)\s*(?P<amount>[\d,]+(?:\.\d+)?)\s+(?P<verb>paid|sent|received)\s+(?:to|from)\s+(?P<merchant>.+?)\s+(?:using|via)\b",
        )?;
        Ok(Self {
            regex,
            dates: DateScan::new()?,
        })
    }
}

impl MessagePattern for UpiAmountVerb {
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

        Ok(Some(upi_record(
            msg,
            &body,
            amount,
            &caps["verb"],
            &caps["merchant"],
            &self.dates,
        )))
    }
}

/// Loose fallback: a currency amount and a movement verb anywhere in a
/// message that mentions UPI. Runs last.
#[derive(Debug)]
pub struct UpiGeneric {
    regex: Regex,
    vpa: Regex,
    dates: DateScan,
}

impl UpiGeneric {
    pub const NAME: &'static str = "upi_generic";

    pub fn new() -> Result<Self, PatternError> {
        let regex = compile(
            Self::NAME,
            r"(?i)(?:₹|Rs\.?|INR)\s*(?P<amount>[\d,]+(?:\.\d+)?)\b.*?\b(?P<verb>debited|credited|paid|received)\b.*?\bUPI\b",
        )?;
        let vpa = compile(Self::NAME, r"(?P<vpa>[\w.-]+@[\w-]+(?:\.[\w-]+)*)")?;
        Ok(Self {
            regex,
            vpa,
            dates: DateScan::new()?,
        })
    }
}

impl MessagePattern for UpiGeneric {
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
