//! Provider identification from sender id and message body.
//!
//! Bank and UPI notifications carry their origin in the sender short code
//! ("HDFCBK", "GPAY") or in the body text ("via PhonePe"). The shape
//! patterns are provider-agnostic; this module supplies the label.

/// Fallback label when no provider can be identified.
pub const UNKNOWN_PROVIDER: &str = "UNKNOWN";

const BANKS: &[(&str, &[&str])] = &[
    ("SBI", &["SBI", "SBIUPI", "STATE BANK"]),
    ("HDFC", &["HDFC", "HDFCBK", "HDFCBANK"]),
    ("ICICI", &["ICICI", "ICICIBK", "ICICIBANK"]),
    ("AXIS", &["AXIS", "AXISBK", "AXISBANK"]),
    ("PNB", &["PNB", "PNBBK", "PUNJAB NATIONAL"]),
    ("BOB", &["BOB", "BOBBANK", "BANK OF BARODA"]),
    ("CANARA", &["CANARA", "CANARABK", "CANARA BANK"]),
    ("UNION", &["UNION", "UNIONBK", "UNION BANK"]),
    ("KOTAK", &["KOTAK", "KOTAKBK", "KOTAK MAHINDRA"]),
];

const UPI_APPS: &[(&str, &[&str])] = &[
    ("GPAY", &["GOOGLE PAY", "GPAY", "G PAY"]),
    ("PHONEPE", &["PHONEPE"]),
    ("PAYTM", &["PAYTM"]),
    ("BHIM", &["BHIM", "BHIMUPI"]),
    ("AMAZONPAY", &["AMAZON PAY", "AMAZONPAY"]),
    ("MOBIKWIK", &["MOBIKWIK"]),
];

/// Identify the issuing bank or UPI app from sender id and body.
///
/// Banks are checked before UPI apps; within each table the first identifier
/// hit wins. Matching is case-insensitive substring search over sender and
/// body combined.
pub fn identify(sender: Option<&str>, body: &str) -> Option<&'static str> {
    let mut combined = body.to_uppercase();
    if let Some(sender) = sender {
        combined.push(' ');
        combined.push_str(&sender.to_uppercase());
    }

    for &(code, identifiers) in BANKS.iter().chain(UPI_APPS.iter()) {
        if identifiers.iter().any(|id| combined.contains(id)) {
            return Some(code);
        }
    }

    None
}

/// As [`identify`], falling back to [`UNKNOWN_PROVIDER`].
pub fn identify_or_unknown(sender: Option<&str>, body: &str) -> &'static str {
    identify(sender, body).unwrap_or(UNKNOWN_PROVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_from_sender() {
        assert_eq!(identify(Some("HDFCBK"), "Rs. 50 debited"), Some("HDFC"));
        assert_eq!(identify(Some("AD-SBIUPI"), "something"), Some("SBI"));
    }

    #[test]
    fn test_identify_from_body() {
        assert_eq!(identify(None, "₹150 paid to Zomato via PhonePe UPI"), Some("PHONEPE"));
        assert_eq!(
            identify(None, "You paid ₹200 to Swiggy - Google Pay"),
            Some("GPAY")
        );
    }

    #[test]
    fn test_identify_case_insensitive() {
        assert_eq!(identify(None, "icici bank: Rs 125.50 debited"), Some("ICICI"));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(identify(Some("FRIEND"), "lunch tomorrow?"), None);
        assert_eq!(identify_or_unknown(None, "hello"), UNKNOWN_PROVIDER);
    }
}
