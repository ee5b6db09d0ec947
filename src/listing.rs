use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::info;

// Tilda renders the feed either as popup relevants-items (current markup) or
// as js-feed-post list items (older pages).
static MODERN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.t-feed__post-popup__relevants-item a").unwrap());
static LEGACY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.js-feed-post div.js-feed-post-title a").unwrap());

const DETAIL_PATH_MARKER: &str = "/tpost/";

/// Collect event-page links from a listing page, deduplicated by target,
/// in discovery order. The legacy container is only consulted when the
/// modern one yields nothing.
pub fn discover_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut links: Vec<String> = Vec::new();

    for selector in [&*MODERN_SEL, &*LEGACY_SEL] {
        for anchor in doc.select(selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.contains(DETAIL_PATH_MARKER) && seen.insert(href.to_string()) {
                links.push(href.to_string());
            }
        }
        if !links.is_empty() {
            break;
        }
    }

    info!("Found {} hackathon links on the listing page", links.len());
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_container_links() {
        let html = r#"
            <div class="t-feed__post-popup__relevants-item">
              <a href="https://site.ru/tpost/first-hack">Первый</a>
            </div>
            <div class="t-feed__post-popup__relevants-item">
              <a href="https://site.ru/tpost/second-hack">Второй</a>
            </div>
        "#;
        let links = discover_links(html);
        assert_eq!(
            links,
            vec![
                "https://site.ru/tpost/first-hack",
                "https://site.ru/tpost/second-hack"
            ]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let html = r#"
            <div class="t-feed__post-popup__relevants-item">
              <a href="https://site.ru/tpost/same">A</a>
            </div>
            <div class="t-feed__post-popup__relevants-item">
              <a href="https://site.ru/tpost/same">B</a>
            </div>
        "#;
        assert_eq!(discover_links(html).len(), 1);
    }

    #[test]
    fn legacy_container_fallback() {
        let html = r#"
            <ul>
              <li class="js-feed-post">
                <div class="js-feed-post-title"><a href="https://site.ru/tpost/old-hack">Старый</a></div>
              </li>
            </ul>
        "#;
        assert_eq!(discover_links(html), vec!["https://site.ru/tpost/old-hack"]);
    }

    #[test]
    fn non_detail_links_ignored() {
        let html = r#"
            <div class="t-feed__post-popup__relevants-item">
              <a href="https://site.ru/about">О нас</a>
            </div>
        "#;
        assert!(discover_links(html).is_empty());
    }
}
