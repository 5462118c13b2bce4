//! # Money Module
//!
//! Provides the `Money` type and the en-IN currency formatter used by every
//! financial figure on the dashboards (fees, payments, subscription revenue).
//!
//! ## Indian Digit Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  en-IN GROUPING (lakh / crore)                                          │
//! │                                                                         │
//! │  Western:   1,234,567.00                                                │
//! │  en-IN:     12,34,567.00                                                │
//! │                ▲  ▲                                                     │
//! │                │  └── last three digits form the first group            │
//! │                └───── every group to the left has two digits            │
//! │                                                                         │
//! │  ₹1,25,000.00  = one lakh twenty-five thousand rupees                   │
//! │  ₹1,00,00,000.00 = one crore rupees                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use eduverse_core::money::{format_currency, Money, DEFAULT_CURRENCY};
//!
//! assert_eq!(format_currency(125000.0, DEFAULT_CURRENCY), "₹1,25,000.00");
//!
//! let paid = Money::from_rupees(75_000);
//! let pending = Money::from_rupees(125_000) - paid;
//! assert_eq!(pending.to_string(), "₹50,000.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::grading::calculate_percentage;

/// Currency used when a caller does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

// =============================================================================
// Currency
// =============================================================================

/// Currencies with a dedicated symbol in the en-IN locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Cny,
    Krw,
    Hkd,
    Nzd,
}

impl Currency {
    pub const ALL: [Currency; 11] = [
        Currency::Inr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Cny,
        Currency::Krw,
        Currency::Hkd,
        Currency::Nzd,
    ];

    /// Looks up a currency by ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
            Currency::Hkd => "HKD",
            Currency::Nzd => "NZD",
        }
    }

    /// Symbol the en-IN locale prints for this currency.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "JP¥",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Cny => "CN¥",
            Currency::Krw => "₩",
            Currency::Hkd => "HK$",
            Currency::Nzd => "NZ$",
        }
    }

    /// ISO 4217 minor-unit digits.
    pub const fn minor_digits(&self) -> usize {
        match self {
            Currency::Jpy | Currency::Krw => 0,
            _ => 2,
        }
    }
}

/// ISO 4217 currencies without a minor unit.
const ZERO_DECIMAL_CODES: &[&str] = &["CLP", "ISK", "JPY", "KRW", "PYG", "UGX", "VND"];

/// ISO 4217 currencies with three minor-unit digits.
const THREE_DECIMAL_CODES: &[&str] = &["BHD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Minor-unit digits for an upper-case ISO 4217 code, `2` when unlisted.
pub fn minor_digits_for(code: &str) -> usize {
    if ZERO_DECIMAL_CODES.contains(&code) {
        0
    } else if THREE_DECIMAL_CODES.contains(&code) {
        3
    } else {
        2
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount the way `en-IN` currency formatting does.
///
/// ## Rules
/// - The currency's ISO 4217 minor-unit digits (two for most, none for JPY,
///   three for BHD)
/// - Halves rounded away from zero on the shortest decimal form of the
///   amount, so `1.005` becomes `1.01`
/// - lakh/crore digit grouping
/// - Symbol before the digits, minus sign before the symbol
/// - Codes without a symbol print as `CODE` plus a no-break space
/// - Anything that is not a three-letter code falls back to INR
///
/// ## Example
/// ```rust
/// use eduverse_core::money::format_currency;
///
/// assert_eq!(format_currency(2850000.0, "INR"), "₹28,50,000.00");
/// assert_eq!(format_currency(-499.5, "INR"), "-₹499.50");
/// assert_eq!(format_currency(1234.0, "usd"), "$1,234.00");
/// assert_eq!(format_currency(1234.567, "JPY"), "JP¥1,235");
/// assert_eq!(format_currency(10.0, "CHF"), "CHF\u{a0}10.00");
/// ```
pub fn format_currency(amount: f64, currency: &str) -> String {
    let (prefix, scale) = currency_style(currency);

    if amount.is_nan() {
        return format!("{}NaN", prefix);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", sign, prefix);
    }

    // f64 Display is the shortest round-trip decimal and never uses an exponent
    format_decimal(amount < 0.0, &prefix, &amount.abs().to_string(), scale)
}

fn currency_style(currency: &str) -> (String, usize) {
    if let Some(known) = Currency::from_code(currency) {
        return (known.symbol().to_string(), known.minor_digits());
    }

    let code = currency.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        let code = code.to_ascii_uppercase();
        let digits = minor_digits_for(&code);
        (format!("{}\u{a0}", code), digits)
    } else {
        (Currency::Inr.symbol().to_string(), Currency::Inr.minor_digits())
    }
}

/// Renders a non-negative plain decimal string with sign, prefix and
/// grouping. A value that rounds to zero carries no minus sign.
fn format_decimal(negative: bool, prefix: &str, decimal: &str, scale: usize) -> String {
    let (integer, fraction) = round_half_away(decimal, scale);

    let is_zero = integer.bytes().chain(fraction.bytes()).all(|d| d == b'0');
    let sign = if negative && !is_zero { "-" } else { "" };

    let mut out = format!("{}{}{}", sign, prefix, group_indian(&integer));
    if scale > 0 {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Rounds a plain decimal string ("1.005") to `scale` fraction digits,
/// halves away from zero. Returns the integer and fraction digits.
fn round_half_away(decimal: &str, scale: usize) -> (String, String) {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(scale))
        .collect();

    let round_up = fraction.as_bytes().get(scale).map_or(false, |d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - scale;
    let collect_digits = |ds: &[u8]| ds.iter().map(|&d| d as char).collect::<String>();
    (collect_digits(&digits[..split]), collect_digits(&digits[split..]))
}

/// Inserts en-IN group separators into a string of ASCII digits.
///
/// ## Example
/// ```rust
/// use eduverse_core::money::group_indian;
///
/// assert_eq!(group_indian("999"), "999");
/// assert_eq!(group_indian("125000"), "1,25,000");
/// assert_eq!(group_indian("10000000"), "1,00,00,000");
/// ```
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and balances
/// - **Integer minor units**: fee totals never drift from float error
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Whole rupees, truncated towards zero.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Value in major units, for callers that chart amounts.
    #[inline]
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtraction that stops at zero (outstanding balances never go negative).
    #[inline]
    pub const fn saturating_sub_to_zero(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }

    /// Whole percentage this amount represents of `total`, `0` for a zero total.
    pub fn percentage_of(&self, total: Money) -> i64 {
        calculate_percentage(self.0 as f64, total.0 as f64)
    }

    /// Formats the amount in the given currency.
    pub fn format(&self, currency: Currency) -> String {
        format_decimal(self.0 < 0, currency.symbol(), &self.decimal(), currency.minor_digits())
    }

    /// Formats in the currency named by an ISO 4217 code, with the same
    /// fallbacks as [`format_currency`].
    pub fn format_code(&self, code: &str) -> String {
        let (prefix, scale) = currency_style(code);
        format_decimal(self.0 < 0, &prefix, &self.decimal(), scale)
    }

    /// Absolute value as a plain decimal string, e.g. `"1099.50"`.
    fn decimal(&self) -> String {
        let paise = self.0.unsigned_abs();
        format!("{}.{:02}", paise / 100, paise % 100)
    }
}

/// Displays in rupees with en-IN grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::Inr))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
