use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Genitive Russian month names, the only date vocabulary these pages use.
pub const MONTHS: &str =
    "января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря";

/// Plausible event years. Anything outside this window is navigation noise.
pub static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(202\d|203\d)\b").unwrap());

/// "<day> <month>" with or without a trailing year.
pub static DAY_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\d{{1,2}}\s+(?:{MONTHS})")).unwrap());

pub fn month_number(name: &str) -> Option<u32> {
    let n = match name.to_lowercase().as_str() {
        "января" => 1,
        "февраля" => 2,
        "марта" => 3,
        "апреля" => 4,
        "мая" => 5,
        "июня" => 6,
        "июля" => 7,
        "августа" => 8,
        "сентября" => 9,
        "октября" => 10,
        "ноября" => 11,
        "декабря" => 12,
        _ => return None,
    };
    Some(n)
}

/// Parse "<day> <month> <year>" into a calendar date. Anything else is None;
/// reconciliation treats unparseable dates as untouchable.
pub fn parse_ru_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
