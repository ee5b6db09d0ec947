use std::sync::LazyLock;

use regex::Regex;

use super::TextViews;
use crate::record::Format;

static EXPLICIT_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)формат\s*:\s*(онлайн|оффлайн|офлайн|online|offline)").unwrap());
static VENUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)место\s+проведения\s*:").unwrap());
// A named venue city implies an offline event even without a format label.
static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(москва|санкт-петербург|казань|новосибирск|екатеринбург)\b").unwrap()
});
static ONLINE_HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:онлайн|online|виртуал|дистанц)\b").unwrap());
static OFFLINE_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:оффлайн|офлайн|offline|очн|место\s+проведения)\b").unwrap()
});

/// Online/offline classification. Explicit "формат:" declarations in the
/// located content win; a venue declaration or a named city implies offline;
/// otherwise the whole page is scanned for keyword hints, online first.
pub fn extract(views: &TextViews) -> Option<Format> {
    if let Some(content) = &views.content_text {
        if let Some(caps) = EXPLICIT_FORMAT_RE.captures(content) {
            let value = caps[1].to_lowercase();
            return if value.contains("онлайн") || value.contains("online") {
                Some(Format::Online)
            } else {
                Some(Format::Offline)
            };
        }
        if VENUE_RE.is_match(content) || CITY_RE.is_match(content) {
            return Some(Format::Offline);
        }
    }

    if ONLINE_HINT_RE.is_match(&views.page_text) {
        return Some(Format::Online);
    }
    if OFFLINE_HINT_RE.is_match(&views.page_text) {
        return Some(Format::Offline);
    }
    None
}
