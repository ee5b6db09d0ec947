use chrono::Datelike;

use crate::config::Config;
use crate::parser::dates::{parse_ru_date, DAY_MONTH_RE, YEAR_RE};
use crate::record::HackathonRecord;

// A start/end pair more than a year apart means one of the two dates is wrong.
const MAX_SPAN_DAYS: i64 = 365;

/// Repair all date fields against one expected year, then make sure the event
/// window is chronologically ordered.
pub fn reconcile(record: &mut HackathonRecord, cfg: &Config) {
    let expected = expected_year(record, cfg);

    for field in [
        &mut record.registration_deadline,
        &mut record.event_start,
        &mut record.event_end,
    ] {
        if let Some(date) = field.take() {
            *field = Some(update_year(&date, &expected));
        }
    }

    enforce_order(record);
}

/// The one year all of this record's dates should carry: from the name, else
/// from any date already bearing a year (registration, start, end, in that
/// order), else the configured fallback.
fn expected_year(record: &HackathonRecord, cfg: &Config) -> String {
    let year_of = |field: &Option<String>| {
        field
            .as_deref()
            .and_then(|s| YEAR_RE.find(s))
            .map(|m| m.as_str().to_string())
    };

    year_of(&record.name)
        .or_else(|| year_of(&record.registration_deadline))
        .or_else(|| year_of(&record.event_start))
        .or_else(|| year_of(&record.event_end))
        .unwrap_or_else(|| cfg.fallback_year_value().to_string())
}

/// Rewrite a date string to the expected year: replace a differing year,
/// append when a day+month date carries none, leave anything else alone.
fn update_year(date: &str, expected: &str) -> String {
    match YEAR_RE.find(date) {
        Some(m) if m.as_str() != expected => YEAR_RE.replace_all(date, expected).into_owned(),
        Some(_) => date.to_string(),
        None if DAY_MONTH_RE.is_match(date) => format!("{date} {expected}"),
        None => date.to_string(),
    }
}

/// Start must not come after end. Reversed same-year pairs were transposed at
/// the source and are swapped back; reversed pairs more than a year apart
/// keep only the start. Unparseable dates are left as written.
fn enforce_order(record: &mut HackathonRecord) {
    let (Some(start_str), Some(end_str)) = (record.event_start.clone(), record.event_end.clone())
    else {
        return;
    };
    let (Some(start), Some(end)) = (parse_ru_date(&start_str), parse_ru_date(&end_str)) else {
        return;
    };
    if end >= start {
        return;
    }

    if start.year() == end.year() {
        record.event_start = Some(end_str);
        record.event_end = Some(start_str);
    } else if (start - end).num_days() > MAX_SPAN_DAYS {
        record.event_end = None;
    } else {
        record.event_start = Some(end_str);
        record.event_end = Some(start_str);
    }
}
