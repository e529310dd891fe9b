//! Keystroke and commit normalization for the loan form's numeric fields.
//!
//! Every function here is total: malformed or partial input degrades to an
//! empty string, so a half-typed value never blocks the next keystroke.

use serde::{Deserialize, Serialize};

/// The archetypes a loan form field can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Currency,
    Percent,
    Integer,
    PlainText,
}

impl FieldKind {
    /// Kinds whose display text is reformatted when the field loses focus.
    pub fn reformats_on_commit(self) -> bool {
        matches!(self, FieldKind::Currency | FieldKind::Percent)
    }
}

const FRACTION_DIGITS: usize = 2;
const CURRENCY_SYMBOL: char = '$';
const PERCENT_SYMBOL: char = '%';

/// Normalization applied on every keystroke.
pub fn on_input(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Currency => normalize_currency_input(raw),
        FieldKind::Percent => normalize_percent_input(raw),
        FieldKind::Integer => normalize_integer_input(raw),
        FieldKind::PlainText => raw.to_string(),
    }
}

/// Normalization applied when the field loses focus.
pub fn on_commit(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Currency => normalize_currency_on_commit(raw),
        FieldKind::Percent => normalize_percent_on_commit(raw),
        FieldKind::Integer | FieldKind::PlainText => raw.to_string(),
    }
}

pub fn normalize_currency_input(raw: &str) -> String {
    let cleaned = numeric_text(raw);
    let body = match cleaned.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), truncate_fraction(frac)),
        None => group_thousands(&cleaned),
    };
    if body.is_empty() {
        String::new()
    } else {
        format!("{}{}", CURRENCY_SYMBOL, body)
    }
}

pub fn normalize_currency_on_commit(raw: &str) -> String {
    match parse_numeric(raw) {
        Some(value) => format!("{}{}", CURRENCY_SYMBOL, grouped_fixed(value)),
        None => String::new(),
    }
}

pub fn normalize_percent_input(raw: &str) -> String {
    let cleaned = numeric_text(raw);
    let body = match cleaned.split_once('.') {
        Some((int, frac)) => format!("{}.{}", int, truncate_fraction(frac)),
        None => cleaned,
    };
    if body.is_empty() {
        String::new()
    } else {
        format!("{}{}", body, PERCENT_SYMBOL)
    }
}

pub fn normalize_percent_on_commit(raw: &str) -> String {
    match parse_numeric(raw) {
        Some(value) => format!("{:.2}{}", round_half_up(value), PERCENT_SYMBOL),
        None => String::new(),
    }
}

pub fn normalize_integer_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reads the amount back out of a decorated currency string such as `$1,234.50`.
pub fn parse_currency(display: &str) -> Option<f64> {
    parse_numeric(display)
}

/// Reads the rate back out of a decorated percent string such as `5.25%`.
pub fn parse_percent(display: &str) -> Option<f64> {
    parse_numeric(display)
}

pub fn parse_integer(display: &str) -> Option<u32> {
    normalize_integer_input(display).parse().ok()
}

/// Undecorated value for a field, in the shape the amortization endpoint parses.
pub fn plain_value(kind: FieldKind, display: &str) -> String {
    match kind {
        FieldKind::Currency => plain_fixed(parse_currency(display)),
        FieldKind::Percent => plain_fixed(parse_percent(display)),
        FieldKind::Integer => parse_integer(display)
            .map(|value| value.to_string())
            .unwrap_or_default(),
        FieldKind::PlainText => display.trim().to_string(),
    }
}

fn plain_fixed(value: Option<f64>) -> String {
    value
        .map(|value| format!("{:.2}", round_half_up(value)))
        .unwrap_or_default()
}

/// Keeps digits and the first decimal point; every later point is dropped.
fn numeric_text(raw: &str) -> String {
    let mut seen_point = false;
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .filter(|c| {
            if *c != '.' {
                return true;
            }
            if seen_point {
                return false;
            }
            seen_point = true;
            true
        })
        .collect()
}

fn truncate_fraction(frac: &str) -> &str {
    // numeric_text only yields ASCII, so byte slicing is char slicing here.
    &frac[..frac.len().min(FRACTION_DIGITS)]
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned = numeric_text(raw);
    if cleaned.is_empty() || cleaned == "." {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn round_half_up(value: f64) -> f64 {
    let scaled = (value * 100.0).round();
    if scaled.is_finite() {
        scaled / 100.0
    } else {
        value
    }
}

fn grouped_fixed(value: f64) -> String {
    let fixed = format!("{:.2}", round_half_up(value));
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
        None => group_thousands(&fixed),
    }
}

fn group_thousands(digits: &str) -> String {
    let reversed = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(reversed.len() + reversed.len() / 3);
    for (i, ch) in reversed.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}
