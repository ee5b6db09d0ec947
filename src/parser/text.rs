use scraper::{ElementRef, Html};

/// Whitespace-normalized text of an element: text-node fragments joined by
/// single spaces. The field patterns all assume `\s+` between tokens, so
/// fragments are never welded together.
pub fn element_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-document text view, same normalization as `element_text`.
pub fn document_text(doc: &Html) -> String {
    element_text(doc.root_element())
}
