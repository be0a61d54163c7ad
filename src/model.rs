use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A single dated expense. `id` is assigned by the server and stays `None`
/// until the first successful create.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "amount_from_any")]
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: String,
}

impl Expense {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// The API historically returned `amount` as either a JSON number or a
/// numeric string (form input passed through). Normalize once here so the
/// rest of the app only ever sees a finite f64 — a `NaN` would poison every
/// aggregate downstream.
fn amount_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().unwrap_or(0.0),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Ok(0.0)
    }
}

/// Parses a form amount field. Invalid input coerces to 0.0 and the result
/// is clamped to non-negative before submission.
pub fn parse_amount(input: &str) -> f64 {
    let parsed: f64 = input.trim().parse().unwrap_or(0.0);
    if parsed.is_finite() {
        parsed.max(0.0)
    } else {
        0.0
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetLimits {
    #[serde(default)]
    pub daily: f64,
    #[serde(default)]
    pub weekly: f64,
    #[serde(default)]
    pub monthly: f64,
}

/// Per-user settings record. Saved as a full replace, never patched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, rename = "budgetLimits")]
    pub budget_limits: BudgetLimits,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            budget_limits: BudgetLimits::default(),
            categories: Vec::new(),
        }
    }
}

fn default_currency() -> String {
    "PHP".to_string()
}

pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

pub const CURRENCIES: [Currency; 7] = [
    Currency { code: "PHP", name: "Philippine Peso (₱)", symbol: "₱" },
    Currency { code: "USD", name: "US Dollar ($)", symbol: "$" },
    Currency { code: "EUR", name: "Euro (€)", symbol: "€" },
    Currency { code: "GBP", name: "British Pound (£)", symbol: "£" },
    Currency { code: "JPY", name: "Japanese Yen (¥)", symbol: "¥" },
    Currency { code: "SGD", name: "Singapore Dollar (S$)", symbol: "S$" },
    Currency { code: "MYR", name: "Malaysian Ringgit (RM)", symbol: "RM" },
];

pub fn currency_symbol(code: &str) -> &'static str {
    CURRENCIES
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.symbol)
        .unwrap_or("₱")
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn initials(&self) -> String {
        let first = self.firstname.chars().next();
        let last = self.lastname.chars().next();
        match (first, last) {
            (None, None) => self
                .email
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "U".to_string()),
            (first, last) => first
                .into_iter()
                .chain(last)
                .flat_map(|c| c.to_uppercase())
                .collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.firstname.is_empty() {
            &self.email
        } else {
            &self.firstname
        }
    }
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub is_read: bool,
}

fn format_with_commas(value: u64) -> String {
    let digits: Vec<char> = value.to_string().chars().rev().collect();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// "₱1,234.56" style formatting used across the dashboard and reports.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        format_with_commas(cents / 100),
        cents % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let from_number: Expense =
            serde_json::from_str(r#"{"amount": 45.99, "description": "", "category": "Food", "date": "2024-01-05"}"#)
                .unwrap();
        let from_string: Expense =
            serde_json::from_str(r#"{"amount": "45.99", "description": "", "category": "Food", "date": "2024-01-05"}"#)
                .unwrap();

        assert_eq!(from_number.amount, 45.99);
        assert_eq!(from_string.amount, 45.99);
    }

    #[test]
    fn malformed_amount_coerces_to_zero() {
        let expense: Expense =
            serde_json::from_str(r#"{"amount": "abc", "description": "", "category": "Food", "date": "2024-01-05"}"#)
                .unwrap();

        assert_eq!(expense.amount, 0.0);
    }

    #[test]
    fn form_amount_is_clamped_non_negative() {
        assert_eq!(parse_amount("12.50"), 12.5);
        assert_eq!(parse_amount("  3 "), 3.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-5"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{"currency": "USD"}"#).unwrap();

        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.budget_limits.daily, 0.0);
        assert!(settings.categories.is_empty());
    }

    #[test]
    fn settings_round_trip_uses_camel_case_limits() {
        let settings = UserSettings {
            currency: "PHP".to_string(),
            budget_limits: BudgetLimits { daily: 500.0, weekly: 2500.0, monthly: 10000.0 },
            categories: vec!["Food & Dining".to_string()],
        };

        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("budgetLimits").is_some());

        let back: UserSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(1234567.89, "₱"), "₱1,234,567.89");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(-42.5, "$"), "-$42.50");
    }

    #[test]
    fn user_initials_fall_back_to_email() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "email": "maria@example.com", "firstname": "Maria", "lastname": "Cruz"}"#,
        )
        .unwrap();
        assert_eq!(user.initials(), "MC");

        let bare: User = serde_json::from_str(r#"{"id": 2, "email": "solo@example.com"}"#).unwrap();
        assert_eq!(bare.initials(), "S");
    }

    #[test]
    fn expense_date_parses_iso_only() {
        let expense = Expense {
            id: None,
            amount: 1.0,
            description: String::new(),
            category: "Food".to_string(),
            date: "2024-02-29".to_string(),
        };
        assert!(expense.calendar_date().is_some());

        let bad = Expense { date: "29/02/2024".to_string(), ..expense };
        assert!(bad.calendar_date().is_none());
    }
}
