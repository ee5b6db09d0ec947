use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::tainted;

type Handler = fn(&Captures) -> Option<f64>;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

// Monetary patterns, most explicit first. The last one reads the 1st-place
// prize when no total fund is stated.
static PRIZE_PATTERNS: LazyLock<Vec<(Regex, Handler)>> = LazyLock::new(|| {
    vec![
        (
            re(r"(?i)(?:призовой\s+фонд|призовой|приз|награда)(?:\s+составляет)?(?:\s+в\s+размере)?[\s:]*(\d[\s\d]*[\d,.]+)\s*(млн|тыс)?\.?\s*(руб|₽|рубл)"),
            amount_with_unit as Handler,
        ),
        (
            re(r"(?i)(\d[\s\d]*[\d,.]+)\s*(млн|тыс)?\.?\s*(руб|₽|рубл).*?(?:призовой\s+фонд|приз)"),
            amount_with_unit,
        ),
        (
            re(r"(?i)(?:призов[а-я]+\s+на\s+сумму|призов[а-я]+\s+фонд[а-я]+)\s+(\d[\s\d]*[\d,.]+)\s*(млн|тыс)?"),
            amount_with_unit,
        ),
        (
            re(r"(?i)(?:1\s*место[^\d]*)(\d[\s\d]*[\d,.]+)\s*(?:руб|₽|рубл)"),
            amount_plain,
        ),
    ]
});

static SECOND_PLACE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)2\s*место"));
static THIRD_PLACE_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)3\s*место"));

/// Prize amount in base currency units. When the match is the 1st-place prize
/// and the page also names 2nd and 3rd places, the amount is doubled as a
/// rough estimate of the total pool.
pub fn extract(page_text: &str) -> Option<f64> {
    for (pattern, handler) in PRIZE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(page_text) else {
            continue;
        };
        let full = &caps[0];
        if tainted(full) {
            continue;
        }
        let Some(mut amount) = handler(&caps) else {
            continue;
        };

        let matched = full.to_lowercase();
        if (matched.contains("1 место") || matched.contains("1-е место"))
            && SECOND_PLACE_RE.is_match(page_text)
            && THIRD_PLACE_RE.is_match(page_text)
        {
            amount *= 2.0;
        }
        return Some(amount);
    }
    None
}

fn amount_with_unit(caps: &Captures) -> Option<f64> {
    let amount = parse_amount(&caps[1])?;
    Some(amount * unit_multiplier(caps.get(2).map(|m| m.as_str())))
}

fn amount_plain(caps: &Captures) -> Option<f64> {
    parse_amount(&caps[1])
}

/// "1 500 000" / "1,5" → f64: drop spacing (incl. NBSP), decimal comma → dot.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().ok()
}

fn unit_multiplier(unit: Option<&str>) -> f64 {
    match unit {
        Some(u) if u.to_lowercase().contains("млн") => 1_000_000.0,
        Some(u) if u.to_lowercase().contains("тыс") => 1_000.0,
        _ => 1.0,
    }
}
