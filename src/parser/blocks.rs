use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::ElementRef;

static BULLET_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-•*]\s+").unwrap());
static ORDERED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[.)]\s+").unwrap());
static SENTENCE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+[А-Я]").unwrap());
static INLINE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*[-•*]\s+").unwrap());

// Fragments shorter than this are abbreviations, not sentences.
const MIN_SENTENCE_CHARS: usize = 20;

/// One reconstructed unit of description text: a prose paragraph, or a list
/// whose items are pre-joined with newlines and carry "- " / "<n>. " prefixes.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    List(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph(t) | Block::List(t) => t,
        }
    }
}

/// Tag classes the walker distinguishes. Everything unrecognized space-joins
/// its children the same way block containers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    ListItem,
    BlockContainer,
    List,
    Other,
}

fn tag_kind(name: &str) -> TagKind {
    match name {
        "li" => TagKind::ListItem,
        "p" | "div" | "section" | "article" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            TagKind::BlockContainer
        }
        "ul" | "ol" => TagKind::List,
        _ => TagKind::Other,
    }
}

// Site chrome that must not leak into descriptions. "nav" also covers
// "navigation" and "navbar" via substring match.
const CHROME_MARKERS: &[&str] = &["navigation", "nav", "footer", "header"];

fn is_chrome(el: ElementRef) -> bool {
    el.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        CHROME_MARKERS.iter().any(|m| class.contains(m))
    })
}

/// Rebuild a line-oriented description from the article root: block text in
/// source order, direct-child lists collected separately so they stay visually
/// distinct, then the repair passes over the collected blocks.
pub fn reconstruct(root: ElementRef) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for child in root.children().filter_map(ElementRef::wrap) {
        if is_chrome(child) || tag_kind(child.value().name()) != TagKind::BlockContainer {
            continue;
        }
        let text = element_to_text(child);
        if !text.trim().is_empty() {
            blocks.push(Block::Paragraph(text.trim().to_string()));
        }
    }

    for child in root.children().filter_map(ElementRef::wrap) {
        if is_chrome(child) || tag_kind(child.value().name()) != TagKind::List {
            continue;
        }
        let text = element_to_text(child);
        if !text.trim().is_empty() {
            blocks.push(Block::List(text.trim().to_string()));
        }
    }

    if blocks.is_empty() {
        blocks = fallback_lines(root);
    }

    let blocks = split_long_paragraphs(blocks);
    recover_inline_lists(blocks)
}

/// Join blocks into the final description text.
pub fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_to_text(el: ElementRef) -> String {
    if is_chrome(el) {
        return String::new();
    }
    match tag_kind(el.value().name()) {
        TagKind::ListItem => list_item_text(el),
        TagKind::List => list_text(el),
        TagKind::BlockContainer | TagKind::Other => join_children(el),
    }
}

/// Space-join the texts of an element's children: trimmed text nodes as-is,
/// element children recursively.
fn join_children(el: ElementRef) -> String {
    let mut parts: Vec<String> = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                let raw: &str = text.as_ref();
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    let text = element_to_text(child_el);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
            _ => {}
        }
    }
    parts.join(" ").trim().to_string()
}

fn list_item_text(el: ElementRef) -> String {
    let body = join_children(el);
    if body.is_empty() {
        return String::new();
    }
    format!("{}{}", item_prefix(el), body)
}

/// "- " for unordered items, "<n>. " (1-based position among li siblings) for
/// ordered ones. Items outside any list default to bullets.
fn item_prefix(el: ElementRef) -> String {
    let parent = el.parent().and_then(ElementRef::wrap);
    match parent {
        Some(p) if p.value().name() == "ol" => {
            let position = p
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| c.value().name() == "li")
                .position(|c| c.id() == el.id())
                .map(|i| i + 1)
                .unwrap_or(1);
            format!("{position}. ")
        }
        _ => "- ".to_string(),
    }
}

fn list_text(el: ElementRef) -> String {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "li")
        .map(element_to_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flat-markup fallback: raw text split into lines, with bullet- and
/// ordinal-looking lines rewritten to the canonical list conventions.
fn fallback_lines(root: ElementRef) -> Vec<Block> {
    let raw = root
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            if BULLET_LINE_RE.is_match(line) {
                Block::List(BULLET_LINE_RE.replace(line, "- ").into_owned())
            } else if let Some(caps) = ORDERED_LINE_RE.captures(line) {
                let rest = &line[caps.get(0).unwrap().end()..];
                Block::List(format!("{}. {}", &caps[1], rest))
            } else {
                Block::Paragraph(line.to_string())
            }
        })
        .collect()
}

/// Split multi-sentence paragraphs at ". <Capital>" boundaries, committing
/// only when every resulting fragment is long enough to be a real sentence.
fn split_long_paragraphs(blocks: Vec<Block>) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Paragraph(text) => match split_sentences(&text) {
                Some(parts) => out.extend(parts.into_iter().map(Block::Paragraph)),
                None => out.push(Block::Paragraph(text)),
            },
            list => out.push(list),
        }
    }
    out
}

fn split_sentences(text: &str) -> Option<Vec<String>> {
    // (fragment end incl. the period, next fragment start at the capital)
    let boundaries: Vec<(usize, usize)> = SENTENCE_BOUNDARY_RE
        .find_iter(text)
        .map(|m| (m.start() + 1, m.end() - 'А'.len_utf8()))
        .collect();
    if boundaries.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;
    for (end, next_start) in boundaries {
        parts.push(text[start..end].trim().to_string());
        start = next_start;
    }
    parts.push(text[start..].trim().to_string());

    if parts.len() > 1 && parts.iter().all(|p| p.chars().count() > MIN_SENTENCE_CHARS) {
        Some(parts)
    } else {
        None
    }
}

/// Recover lists authored as run-on prose: a period followed by a bullet glyph
/// splits the block into the preceding prose and "- "-prefixed items.
fn recover_inline_lists(blocks: Vec<Block>) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Paragraph(text) if INLINE_MARKER_RE.is_match(&text) => {
                let markers: Vec<(usize, usize)> = INLINE_MARKER_RE
                    .find_iter(&text)
                    .map(|m| (m.start(), m.end()))
                    .collect();

                let head = text[..markers[0].0 + 1].trim();
                if !head.is_empty() {
                    out.push(Block::Paragraph(head.to_string()));
                }
                for (i, &(_, item_start)) in markers.iter().enumerate() {
                    let item_end = markers
                        .get(i + 1)
                        .map(|&(next_start, _)| next_start + 1)
                        .unwrap_or(text.len());
                    let item = text[item_start..item_end].trim();
                    if !item.is_empty() {
                        out.push(Block::List(format!("- {item}")));
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn article_blocks(inner: &str) -> Vec<Block> {
        let html = format!(r#"<div id="root">{inner}</div>"#);
        let doc = Html::parse_fragment(&html);
        let sel = Selector::parse("#root").unwrap();
        let root = doc.select(&sel).next().unwrap();
        reconstruct(root)
    }

    #[test]
    fn unordered_items_get_dash_prefix() {
        let blocks = article_blocks("<ul><li>Первый пункт</li><li>Второй пункт</li></ul>");
        assert_eq!(
            blocks,
            vec![Block::List("- Первый пункт\n- Второй пункт".to_string())]
        );
    }

    #[test]
    fn ordered_items_get_positions() {
        let blocks = article_blocks(
            "<ol><li>Собрать команду</li><li>Выбрать кейс</li><li>Победить</li></ol>",
        );
        assert_eq!(
            blocks,
            vec![Block::List(
                "1. Собрать команду\n2. Выбрать кейс\n3. Победить".to_string()
            )]
        );
    }

    #[test]
    fn lists_are_collected_after_prose() {
        let blocks =
            article_blocks("<p>Вступление</p><ul><li>Пункт</li></ul><p>Заключение</p>");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Вступление".to_string()),
                Block::Paragraph("Заключение".to_string()),
                Block::List("- Пункт".to_string()),
            ]
        );
    }

    #[test]
    fn chrome_children_are_pruned() {
        let blocks = article_blocks(
            r#"<p>Описание задачи</p><div class="t-post__navigation">Назад Вперёд</div>"#,
        );
        assert_eq!(blocks, vec![Block::Paragraph("Описание задачи".to_string())]);
    }

    #[test]
    fn nested_chrome_is_pruned_inside_blocks() {
        let blocks = article_blocks(
            r#"<p>Полезный текст <span class="footer-note">мусор</span></p>"#,
        );
        assert_eq!(blocks, vec![Block::Paragraph("Полезный текст".to_string())]);
    }

    #[test]
    fn inline_markup_joins_with_spaces() {
        let blocks = article_blocks("<p>Приз <b>1 млн</b> рублей</p>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("Приз 1 млн рублей".to_string())]
        );
    }

    #[test]
    fn flat_markup_falls_back_to_line_classification() {
        let blocks = article_blocks("Первая строка\n- пункт один\n2) пункт два");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Первая строка".to_string()),
                Block::List("- пункт один".to_string()),
                Block::List("2. пункт два".to_string()),
            ]
        );
    }

    #[test]
    fn bullet_glyphs_are_normalized_in_fallback() {
        let blocks = article_blocks("• пункт со звёздочкой");
        assert_eq!(
            blocks,
            vec![Block::List("- пункт со звёздочкой".to_string())]
        );
    }

    #[test]
    fn long_sentences_split_into_blocks() {
        let blocks = article_blocks(
            "<p>Первое предложение достаточно длинное для разбиения. Второе предложение тоже вполне достаточно длинное.</p>",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(
                    "Первое предложение достаточно длинное для разбиения.".to_string()
                ),
                Block::Paragraph(
                    "Второе предложение тоже вполне достаточно длинное.".to_string()
                ),
            ]
        );
    }

    #[test]
    fn short_fragments_keep_block_intact() {
        let blocks = article_blocks("<p>Да. Нет. Возможно.</p>");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("Да. Нет. Возможно.".to_string())]
        );
    }

    #[test]
    fn inline_list_is_recovered() {
        let blocks = article_blocks(
            "<p>Что предстоит сделать. - Разобрать датасет полностью. - Обучить модель</p>",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Что предстоит сделать.".to_string()),
                Block::List("- Разобрать датасет полностью.".to_string()),
                Block::List("- Обучить модель".to_string()),
            ]
        );
    }

    #[test]
    fn render_joins_blocks_with_single_newlines() {
        let blocks = vec![
            Block::Paragraph("Абзац".to_string()),
            Block::List("- раз\n- два".to_string()),
        ];
        assert_eq!(render(&blocks), "Абзац\n- раз\n- два");
    }
}
