use std::sync::LazyLock;

use regex::Regex;

use super::{phrase_elements, tainted, TextViews};
use crate::config::Config;
use crate::parser::dates::{MONTHS, YEAR_RE};

const PHRASE: &str = "регистрация до";

static REG_FULL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)регистрация\s+до\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
    ))
    .unwrap()
});

static REG_DAY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)регистрация\s+до\s+(\d{{1,2}}\s+(?:{MONTHS}))")).unwrap()
});

// Looser deadline phrasings, tried only when the canonical phrase is absent.
static LOOSE_DEADLINE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(&format!(
            r"(?i)(?:заявки|заявку|заявок)\s+(?:принимаются|подавать|подать)(?:[^.]*?)до\s+(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?i)(?:дедлайн|окончание)\s+(?:регистрации|подачи\s+заявок)[^:]*?:\s*(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?i)(?:окончание|завершение).*?(?:регистрац[а-я]+|заявк[а-я]+).*?(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})"
        ))
        .unwrap(),
    ]
});

/// Registration deadline as "<day> <month> <year>". Block-level elements with
/// the canonical phrase first (full date, then partial date with a year found
/// nearby), then the same two patterns over the whole page, then looser
/// deadline phrasings.
pub fn extract(views: &TextViews, cfg: &Config) -> Option<String> {
    for text in phrase_elements(views.doc, PHRASE) {
        if let Some(caps) = REG_FULL_RE.captures(&text) {
            if !tainted(&caps[0]) {
                return Some(caps[1].to_string());
            }
        }
        if let Some(caps) = REG_DAY_MONTH_RE.captures(&text) {
            if !tainted(&caps[0]) {
                let year = YEAR_RE
                    .find(&text)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| cfg.fallback_year_value().to_string());
                return Some(format!("{} {}", &caps[1], year));
            }
        }
    }

    if let Some(caps) = REG_FULL_RE.captures(&views.page_text) {
        if !tainted(&caps[0]) {
            return Some(caps[1].to_string());
        }
    }
    if let Some(caps) = REG_DAY_MONTH_RE.captures(&views.page_text) {
        if !tainted(&caps[0]) {
            return Some(format!("{} {}", &caps[1], cfg.fallback_year_value()));
        }
    }

    for re in LOOSE_DEADLINE_RES.iter() {
        if let Some(caps) = re.captures(&views.page_text) {
            if !tainted(&caps[0]) {
                return Some(caps[1].to_string());
            }
        }
    }

    None
}
