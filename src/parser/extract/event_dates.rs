use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{phrase_elements, tainted, TextViews};
use crate::config::Config;
use crate::parser::dates::{parse_ru_date, MONTHS, YEAR_RE};

const PHRASE: &str = "дата проведения";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventDates {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Context a handler may need beyond its captures: the text the match came
/// from (for nearby-year searches) and the configured fallback year.
struct PatternCtx<'a> {
    surrounding: &'a str,
    fallback_year: i32,
}

type Handler = fn(&Captures, &PatternCtx) -> Option<EventDates>;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static FOUR_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

// Patterns anchored on the announcement phrase, most specific first. Adding or
// reordering a heuristic is a data change here, not new control flow.
static PHRASE_PATTERNS: LazyLock<Vec<(Regex, Handler)>> = LazyLock::new(|| {
    vec![
        // дата проведения: 15-17 мая 2025
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}})\s*[-—–]\s*(\d{{1,2}})\s+({MONTHS})\s+(\d{{4}})"
            )),
            day_range_with_year as Handler,
        ),
        // дата проведения: 22-23 мая
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}})\s*[-—–]\s*(\d{{1,2}})\s+({MONTHS})"
            )),
            day_range_no_year,
        ),
        // дата проведения: с 15 мая по 17 мая 2025
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*с\s+(\d{{1,2}}\s+(?:{MONTHS}))\s+по\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            span_end_year,
        ),
        // дата проведения: с 15 мая 2025 по 17 июня 2025
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*с\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})\s+по\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            span_full,
        ),
        // дата проведения: 15 мая 2025
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            single_with_year,
        ),
        // дата проведения: 15 мая
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}}\s+(?:{MONTHS}))"
            )),
            single_no_year,
        ),
        // дата проведения: 19 апреля, 10:00-21:00
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}}\s+(?:{MONTHS}))(?:,|\s+)(?:\d{{1,2}}:\d{{2}}-\d{{1,2}}:\d{{2}})"
            )),
            single_with_time,
        ),
    ]
});

// Same phrase searched over the whole page when no block element carried it.
static PAGE_PATTERNS: LazyLock<Vec<(Regex, Handler)>> = LazyLock::new(|| {
    vec![
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(?:с\s+)?(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})(?:\s*[-—–]\s*|\s+по\s+)(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            span_full as Handler,
        ),
        (
            re(&format!(
                r"(?i)дата\s+проведения[^:]*:\s*(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            single_with_year,
        ),
    ]
});

// Generic announcement phrasings without the canonical phrase.
static GENERIC_PATTERNS: LazyLock<Vec<(Regex, Handler)>> = LazyLock::new(|| {
    vec![
        (
            re(&format!(
                r"(?i)(?:мероприятие|хакатон|соревнование)\s+(?:пройдет|состоится)\s+(\d{{1,2}}[-—–]\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            compact_range as Handler,
        ),
        (
            re(&format!(
                r"(?i)(?:мероприятие|хакатон|соревнование)\s+(?:пройдет|состоится)\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            single_with_year,
        ),
        (
            re(&format!(
                r"(?i)(?:с|c)\s+(\d{{1,2}}\s+(?:{MONTHS}))\s+(?:по|до)\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            span_end_year,
        ),
        (
            re(&format!(
                r"(?i)(\d{{1,2}})\s*[-—–]\s*(\d{{1,2}})\s+({MONTHS})\s+(\d{{4}})"
            )),
            day_range_with_year,
        ),
    ]
});

// Narrative phrasings that only show up inside the reconstructed description.
static NARRATIVE_PATTERNS: LazyLock<Vec<(Regex, Handler)>> = LazyLock::new(|| {
    vec![
        // пройдёт с 2 по 4 мая 2025
        (
            re(&format!(
                r"(?i)пройд[её]т\s+с\s*(\d{{1,2}})\s+по\s+(\d{{1,2}})\s+({MONTHS})\s+(\d{{4}})"
            )),
            day_range_with_year as Handler,
        ),
        // проходит с 21 мая по 30 июня 2025
        (
            re(&format!(
                r"(?i)(?:проходит|пройдет|состоится)\s+с\s+(\d{{1,2}}\s+(?:{MONTHS})(?:\s+\d{{4}})?)\s+(?:по|до)\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
            )),
            span_maybe_year,
        ),
    ]
});

static NARRATIVE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"(?i)(\d{{1,2}})\s*[-—–]\s*(\d{{1,2}})\s+({MONTHS})\s+(\d{{4}})"
    ))
});

static ANY_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| re(&format!(r"\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}}")));

/// Event date range. Cascade: phrase-anchored block elements → phrase over the
/// whole page → generic phrasings → narrative phrasings in the description →
/// page-wide date collection as last resort.
pub fn extract(views: &TextViews, description: Option<&str>, cfg: &Config) -> EventDates {
    let fallback_year = cfg.fallback_year_value();
    let mut dates = EventDates::default();

    'elements: for text in phrase_elements(views.doc, PHRASE) {
        let ctx = PatternCtx {
            surrounding: &text,
            fallback_year,
        };
        if let Some(found) = first_match(&PHRASE_PATTERNS, &text, &ctx) {
            dates = found;
            break 'elements;
        }
    }

    let page_ctx = PatternCtx {
        surrounding: &views.page_text,
        fallback_year,
    };

    if dates.start.is_none() {
        if let Some(found) = first_match(&PAGE_PATTERNS, &views.page_text, &page_ctx) {
            dates = found;
        }
    }

    if dates.start.is_none() {
        if let Some(found) = first_match(&GENERIC_PATTERNS, &views.page_text, &page_ctx) {
            dates = found;
        }
    }

    if dates.start.is_none() || dates.end.is_none() {
        if let Some(desc) = description {
            let ctx = PatternCtx {
                surrounding: desc,
                fallback_year,
            };
            if let Some(found) = first_match(&NARRATIVE_PATTERNS, desc, &ctx) {
                dates = found;
            } else if dates.start.is_none() && dates.end.is_none() {
                if let Some(caps) = NARRATIVE_RANGE_RE.captures(desc) {
                    if !tainted(&caps[0]) {
                        if let Some(found) = day_range_with_year(&caps, &ctx) {
                            dates = found;
                        }
                    }
                }
            }
        }
    }

    if dates.start.is_none() && dates.end.is_none() {
        dates = collect_page_dates(&views.page_text);
    }

    dates
}

fn first_match(
    patterns: &[(Regex, Handler)],
    text: &str,
    ctx: &PatternCtx,
) -> Option<EventDates> {
    for (pattern, handler) in patterns {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        if tainted(&caps[0]) {
            continue;
        }
        if let Some(dates) = handler(&caps, ctx) {
            return Some(dates);
        }
    }
    None
}

// ── Handlers ──

fn day_range_with_year(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    let (d1, d2, month, year) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    Some(EventDates {
        start: Some(format!("{d1} {month} {year}")),
        end: Some(format!("{d2} {month} {year}")),
    })
}

fn day_range_no_year(caps: &Captures, ctx: &PatternCtx) -> Option<EventDates> {
    let (d1, d2, month) = (&caps[1], &caps[2], &caps[3]);
    let year = ctx.fallback_year;
    Some(EventDates {
        start: Some(format!("{d1} {month} {year}")),
        end: Some(format!("{d2} {month} {year}")),
    })
}

/// Start has no year; borrow it from the end date.
fn span_end_year(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    let end = &caps[2];
    let year = FOUR_DIGIT_RE.find(end)?.as_str();
    Some(EventDates {
        start: Some(format!("{} {}", &caps[1], year)),
        end: Some(end.to_string()),
    })
}

fn span_full(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    Some(EventDates {
        start: Some(caps[1].to_string()),
        end: Some(caps[2].to_string()),
    })
}

fn span_maybe_year(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    let start = &caps[1];
    let end = &caps[2];
    if FOUR_DIGIT_RE.is_match(start) {
        return Some(EventDates {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        });
    }
    let year = FOUR_DIGIT_RE.find(end)?.as_str();
    Some(EventDates {
        start: Some(format!("{start} {year}")),
        end: Some(end.to_string()),
    })
}

fn single_with_year(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    Some(EventDates {
        start: Some(caps[1].to_string()),
        end: None,
    })
}

fn single_no_year(caps: &Captures, ctx: &PatternCtx) -> Option<EventDates> {
    Some(EventDates {
        start: Some(format!("{} {}", &caps[1], ctx.fallback_year)),
        end: None,
    })
}

/// Date followed by a time window; the year, if any, sits elsewhere in the
/// element text.
fn single_with_time(caps: &Captures, ctx: &PatternCtx) -> Option<EventDates> {
    let year = YEAR_RE
        .find(ctx.surrounding)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| ctx.fallback_year.to_string());
    Some(EventDates {
        start: Some(format!("{} {}", &caps[1], year)),
        end: None,
    })
}

/// "15-17 мая 2025" captured as one group: first day before the dash, the
/// rest after the dash is already a complete date.
fn compact_range(caps: &Captures, _ctx: &PatternCtx) -> Option<EventDates> {
    let raw = &caps[1];
    let (d1, rest) = raw.split_once(|c| matches!(c, '-' | '—' | '–'))?;
    let rest = rest.trim();
    let (_d2, month_year) = rest.split_once(' ')?;
    Some(EventDates {
        start: Some(format!("{} {}", d1.trim(), month_year)),
        end: Some(rest.to_string()),
    })
}

/// Last resort: every full date on the page, deduplicated and sorted
/// chronologically; earliest becomes the start, latest the end.
fn collect_page_dates(page_text: &str) -> EventDates {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut found: Vec<(chrono::NaiveDate, String)> = Vec::new();

    for m in ANY_DATE_RE.find_iter(page_text) {
        let s = m.as_str();
        if tainted(s) || !seen.insert(s) {
            continue;
        }
        if let Some(date) = parse_ru_date(s) {
            found.push((date, s.to_string()));
        }
    }
    found.sort();

    match found.len() {
        0 => EventDates::default(),
        1 => EventDates {
            start: Some(found[0].1.clone()),
            end: None,
        },
        _ => EventDates {
            start: Some(found[0].1.clone()),
            end: Some(found[found.len() - 1].1.clone()),
        },
    }
}
