pub mod event_dates;
pub mod format;
pub mod prize;
pub mod registration;

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::text::element_text;
use crate::config::Config;
use crate::record::HackathonRecord;

static PHRASE_SCOPE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, span, p, li").unwrap());

/// The text views every extractor reads, in priority order: the parsed
/// document for block-level scans, the whole-page text, and the located
/// content text when a content container was found.
pub struct TextViews<'a> {
    pub doc: &'a Html,
    pub page_text: String,
    pub content_text: Option<String>,
}

/// Matches leaked from the research banner or subscription chrome carry these
/// substrings; any candidate containing one is a false positive.
pub fn tainted(s: &str) -> bool {
    s.contains("Исследования") || s.to_lowercase().contains("подпис")
}

/// Texts of block-level elements whose lowercased text contains `phrase`,
/// in document order.
pub fn phrase_elements(doc: &Html, phrase: &str) -> Vec<String> {
    doc.select(&PHRASE_SCOPE_SEL)
        .map(element_text)
        .filter(|text| text.to_lowercase().contains(phrase))
        .collect()
}

/// Run the four field extractors in fixed order. Each one only fills fields
/// that are still empty; a miss leaves the field untouched.
pub fn extract_all(record: &mut HackathonRecord, views: &TextViews, cfg: &Config) {
    if record.registration_deadline.is_none() {
        record.registration_deadline = registration::extract(views, cfg);
    }

    let dates = event_dates::extract(views, record.description.as_deref(), cfg);
    if record.event_start.is_none() {
        record.event_start = dates.start;
    }
    if record.event_end.is_none() {
        record.event_end = dates.end;
    }

    if record.format.is_none() {
        record.format = format::extract(views);
    }
    if record.prize_amount.is_none() {
        record.prize_amount = prize::extract(&views.page_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tainted_detects_banner_markers() {
        assert!(tainted("Исследования 2025"));
        assert!(tainted("Подписывайся на рассылку"));
        assert!(tainted("подписка"));
        assert!(!tainted("регистрация до 15 мая 2025"));
    }

    #[test]
    fn phrase_elements_finds_block_level_hits() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <p>Регистрация до 15 мая 2025</p>
                 <span>другое</span>
               </body></html>"#,
        );
        let hits = phrase_elements(&doc, "регистрация до");
        assert!(hits.iter().any(|t| t == "Регистрация до 15 мая 2025"));
    }

    #[test]
    fn phrase_elements_is_case_insensitive_on_the_phrase() {
        let doc = Html::parse_document("<html><body><li>РЕГИСТРАЦИЯ ДО 1 июня</li></body></html>");
        assert!(!phrase_elements(&doc, "регистрация до").is_empty());
    }
}
