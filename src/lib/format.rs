//! Display helpers for money, dates and user-typed amounts.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats an amount as Brazilian reais with a decimal comma: `R$ 100,50`.
#[must_use]
pub fn format_brl(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs()).replace('.', ",");
    if amount < 0.0 && formatted != "0,00" {
        format!("-R$ {formatted}")
    } else {
        format!("R$ {formatted}")
    }
}

/// Formats a backend `LocalDateTime` as `dd/mm/yyyy HH:MM`. Unparseable
/// values are shown verbatim.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map(|value| value.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

/// Formats a backend `LocalDate` as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|value| value.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

/// Parses a user-typed amount, accepting either `100.50` or `100,50`.
#[must_use]
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized = input.trim().replace(' ', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Today's date as `yyyy-mm-dd`, the shape the backend expects for `LocalDate`.
#[must_use]
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
