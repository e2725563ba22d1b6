//! Deterministic merchant categorization.
//!
//! Keyword rules cover the overwhelming majority of notification merchants;
//! no model or lookup service is involved. Priority: merchant keywords,
//! then a high-amount fallback, then "Others".

/// Amounts above this are assumed to be rent, EMI or similar when no
/// keyword rule fires.
const HIGH_VALUE_THRESHOLD: f64 = 10_000.0;

const RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "swiggy", "zomato", "uber eats", "food", "restaurant", "cafe", "dominos", "kfc",
            "mcdonald",
        ],
    ),
    (
        "Transportation",
        &["uber", "ola", "metro", "bus", "taxi", "petrol", "fuel", "irctc"],
    ),
    (
        "Shopping",
        &["amazon", "flipkart", "myntra", "ajio", "shopping", "mall", "store"],
    ),
    (
        "Entertainment",
        &[
            "netflix", "amazon prime", "hotstar", "spotify", "movie", "cinema", "bookmyshow",
        ],
    ),
    (
        "Utilities",
        &[
            "electricity", "gas", "water", "internet", "mobile", "recharge", "bill",
        ],
    ),
    (
        "Healthcare",
        &["pharma", "medicine", "hospital", "clinic", "doctor", "health"],
    ),
];

/// Categorize a transaction by merchant keywords and amount.
pub fn categorize(merchant: &str, amount: f64) -> &'static str {
    let merchant = merchant.to_lowercase();

    for &(category, keywords) in RULES {
        if keywords.iter().any(|kw| merchant.contains(kw)) {
            return category;
        }
    }

    if amount > HIGH_VALUE_THRESHOLD {
        return "EMI/Rent";
    }

    "Others"
}
