use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text::element_text;

static DIV_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static ARTICLE_BODY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[itemprop="articleBody"]"#).unwrap());

// Class-name hints for the main article container. Unknown site themes still
// tend to carry one of these tokens somewhere in the class list.
const CONTENT_MARKERS: &[&str] = &["content", "article", "post"];

// Teaser snippets and nav blocks reuse the same class names; only a container
// with substantial text qualifies as the article.
const MIN_CONTENT_CHARS: usize = 500;

/// First div in document order whose class hints at article content and whose
/// text is long enough to be the real thing. None when the page has no
/// recognizable body; downstream stages degrade to whole-document text.
pub fn locate(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&DIV_SEL).find(|div| {
        let Some(class) = div.value().attr("class") else {
            return false;
        };
        let class = class.to_lowercase();
        CONTENT_MARKERS.iter().any(|m| class.contains(m))
            && element_text(*div).chars().count() > MIN_CONTENT_CHARS
    })
}

/// Reconstruction root inside the located container: an itemprop=articleBody
/// div when the page is marked up with schema.org, else a div with an
/// articleBody class token, else the container itself.
pub fn article_root(content: ElementRef<'_>) -> ElementRef<'_> {
    if let Some(body) = content.select(&ARTICLE_BODY_SEL).next() {
        return body;
    }
    content
        .select(&DIV_SEL)
        .find(|div| {
            div.value()
                .attr("class")
                .is_some_and(|c| c.contains("articleBody"))
        })
        .unwrap_or(content)
}
