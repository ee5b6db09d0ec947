pub mod blocks;
pub mod clean;
pub mod content;
pub mod dates;
pub mod extract;
pub mod reconcile;
pub mod text;

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::Config;
use crate::record::HackathonRecord;
use extract::TextViews;

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Run the whole extraction pipeline over one event page. Every stage
/// degrades silently; the record ends up with whatever could be recovered.
pub fn parse_page(html: &str, url: &str, cfg: &Config) -> HackathonRecord {
    let doc = Html::parse_document(html);
    let mut record = HackathonRecord::new(url);

    record.name = page_name(&doc, url);

    let located = content::locate(&doc);
    let content_text = located.map(text::element_text);

    if let Some(node) = located {
        let root = content::article_root(node);
        let description = clean::clean_description(&blocks::render(&blocks::reconstruct(root)));
        if !description.is_empty() {
            record.description = Some(description);
        }
    }

    let views = TextViews {
        doc: &doc,
        page_text: text::document_text(&doc),
        content_text,
    };
    extract::extract_all(&mut record, &views, cfg);
    reconcile::reconcile(&mut record, cfg);

    record
}

/// Page title up to the "|" site suffix, else the first h1, else the last
/// URL segment as a last resort.
fn page_name(doc: &Html, url: &str) -> Option<String> {
    if let Some(title) = doc.select(&TITLE_SEL).next() {
        let text = text::element_text(title);
        let name = text.split('|').next().unwrap_or("").trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    if let Some(h1) = doc.select(&H1_SEL).next() {
        let text = text::element_text(h1);
        if !text.is_empty() {
            return Some(text);
        }
    }
    name_from_url(url)
}

fn name_from_url(url: &str) -> Option<String> {
    let tail = url.trim_end_matches('/').rsplit('/').next()?;
    let last = tail.rsplit('-').next()?;
    let mut chars = last.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Format;

    fn fixture_record() -> HackathonRecord {
        let html = std::fs::read_to_string("tests/fixtures/hackathon_page.html").unwrap();
        parse_page(
            &html,
            "https://хакатоны.рус/tpost/digital-breakthrough",
            &Config::default(),
        )
    }

    #[test]
    fn fixture_name_comes_from_title() {
        assert_eq!(
            fixture_record().name.as_deref(),
            Some("Цифровой прорыв 2025")
        );
    }

    #[test]
    fn fixture_description_has_labeled_block_count() {
        // Hand count: 6 paragraphs + 2 list items on the fixture page.
        let record = fixture_record();
        let description = record.description.unwrap();
        assert_eq!(description.lines().count(), 8);
        assert_eq!(
            description
                .lines()
                .filter(|l| l.starts_with("- "))
                .count(),
            2
        );
    }

    #[test]
    fn fixture_description_excludes_chrome() {
        let description = fixture_record().description.unwrap();
        assert!(!description.contains("Подписаться"));
        assert!(!description.contains("Предыдущая запись"));
        assert!(!description.contains("Инновационные интеграторы"));
    }

    #[test]
    fn fixture_registration_deadline() {
        assert_eq!(
            fixture_record().registration_deadline.as_deref(),
            Some("12 апреля 2025")
        );
    }

    #[test]
    fn fixture_event_window() {
        let record = fixture_record();
        assert_eq!(record.event_start.as_deref(), Some("15 мая 2025"));
        assert_eq!(record.event_end.as_deref(), Some("17 мая 2025"));
    }

    #[test]
    fn fixture_format_and_prize() {
        let record = fixture_record();
        assert_eq!(record.format, Some(Format::Online));
        assert_eq!(record.prize_amount, Some(1_500_000.0));
    }

    #[test]
    fn page_without_content_div_still_extracts_fields() {
        let html = r#"<html>
            <head><title>Мини-хакатон 2025 | Хакатоны.рус</title></head>
            <body>
              <p>Регистрация до 12 апреля</p>
              <p>Дата проведения: 15-17 мая 2025</p>
            </body></html>"#;
        let record = parse_page(html, "https://site.ru/tpost/mini", &Config::default());
        assert!(record.description.is_none());
        assert_eq!(record.name.as_deref(), Some("Мини-хакатон 2025"));
        assert_eq!(
            record.registration_deadline.as_deref(),
            Some("12 апреля 2025")
        );
        assert_eq!(record.event_start.as_deref(), Some("15 мая 2025"));
    }

    #[test]
    fn name_falls_back_to_h1_then_url() {
        let html = "<html><body><h1>Заголовок события</h1></body></html>";
        let record = parse_page(html, "https://site.ru/tpost/123-abc", &Config::default());
        assert_eq!(record.name.as_deref(), Some("Заголовок события"));

        assert_eq!(
            name_from_url("https://site.ru/tpost/123-super-hack").as_deref(),
            Some("Hack")
        );
    }

    #[test]
    fn reconciler_runs_on_extracted_dates() {
        // Partial registration date + year in the title.
        let html = r#"<html>
            <head><title>Хак 2025</title></head>
            <body><p>Регистрация до 12 апреля</p></body></html>"#;
        let record = parse_page(html, "https://site.ru/tpost/x", &Config::default());
        assert_eq!(
            record.registration_deadline.as_deref(),
            Some("12 апреля 2025")
        );
    }
}
