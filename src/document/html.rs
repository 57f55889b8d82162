//! HTML documents scanned with tree-sitter.

use tree_sitter::{
    Node,
    Parser,
};

use super::{
    HtmlError,
    MarkedElement,
    Marker,
    TranslationRequest,
    TranslationTarget,
    collect_requests,
};
use crate::engine::{
    Engine,
    EngineError,
};
use crate::types::{
    ApplySummary,
    SourceSpan,
};

/// An element with an explicit end tag, as found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    tag: String,
    /// Attribute names are lowercased; valueless attributes map to "".
    attributes: Vec<(String, String)>,
    /// Span of the inner content (between start and end tag).
    span: SourceSpan,
    content: String,
    replaced: bool,
}

impl HtmlElement {
    /// Reads an `element` node. Returns `None` for void and self-closing elements.
    fn from_node(node: Node<'_>, source: &[u8]) -> Option<Self> {
        let mut start_tag = None;
        let mut end_tag = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "start_tag" => start_tag = Some(child),
                "end_tag" => end_tag = Some(child),
                _ => {}
            }
        }
        let (start_tag, end_tag) = (start_tag?, end_tag?);

        let span = SourceSpan::new(start_tag.end_byte(), end_tag.start_byte());
        let content = std::str::from_utf8(source.get(span.start..span.end)?).ok()?.to_string();

        let mut tag = String::new();
        let mut attributes = Vec::new();
        let mut cursor = start_tag.walk();
        for child in start_tag.children(&mut cursor) {
            match child.kind() {
                "tag_name" => tag = node_text(child, source).to_ascii_lowercase(),
                "attribute" => attributes.extend(read_attribute(child, source)),
                _ => {}
            }
        }

        Some(Self { tag, attributes, span, content, replaced: false })
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether `set_content` was called on this element.
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        self.replaced
    }
}

impl TranslationTarget for HtmlElement {
    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, markup: &str) {
        markup.clone_into(&mut self.content);
        self.replaced = true;
    }
}

impl MarkedElement for HtmlElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or_default()
}

/// Reads `name`, `name=value`, `name="value"` or `name='value'`.
fn read_attribute(node: Node<'_>, source: &[u8]) -> Option<(String, String)> {
    let mut name = None;
    let mut value = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = Some(node_text(child, source).to_ascii_lowercase()),
            "attribute_value" => node_text(child, source).clone_into(&mut value),
            "quoted_attribute_value" => {
                // 空の値 ("") には attribute_value ノードが無い
                let mut inner_cursor = child.walk();
                if let Some(inner) = child
                    .children(&mut inner_cursor)
                    .find(|inner| inner.kind() == "attribute_value")
                {
                    node_text(inner, source).clone_into(&mut value);
                }
            }
            _ => {}
        }
    }
    name.map(|name| (name, value))
}

/// Collects `element` nodes in document (pre-)order.
fn collect_elements(node: Node<'_>, source: &[u8], out: &mut Vec<HtmlElement>) {
    if node.kind() == "element"
        && let Some(element) = HtmlElement::from_node(node, source)
    {
        out.push(element);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_elements(child, source, out);
    }
}

/// A parsed HTML document whose elements can be translated and rendered back.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    elements: Vec<HtmlElement>,
}

impl HtmlDocument {
    /// Parses `source` and records its elements.
    ///
    /// # Errors
    /// Returns `HtmlError` if the parser cannot be set up or parsing fails.
    pub fn parse(source: impl Into<String>) -> Result<Self, HtmlError> {
        let source = source.into();

        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_html::LANGUAGE.into())?;
        let tree = parser.parse(&source, None).ok_or(HtmlError::ParseFailed)?;

        let mut elements = Vec::new();
        collect_elements(tree.root_node(), source.as_bytes(), &mut elements);
        tracing::debug!(elements = elements.len(), "Parsed HTML document");

        Ok(Self { source, elements })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn elements(&self) -> &[HtmlElement] {
        &self.elements
    }

    /// Requests for every element carrying `marker`, in document order.
    pub fn requests(&mut self, marker: &Marker) -> Vec<TranslationRequest<'_, HtmlElement>> {
        collect_requests(&mut self.elements, marker)
    }

    /// Runs `engine` over every element carrying `marker`.
    ///
    /// # Errors
    /// Propagates [`EngineError`] from a strict engine.
    pub fn apply(&mut self, engine: &Engine, marker: &Marker) -> Result<ApplySummary, EngineError> {
        engine.apply_all(self.requests(marker))
    }

    /// The source with every replaced element content spliced in.
    ///
    /// Replacements nested inside a replaced ancestor are dropped; the
    /// ancestor's content wins.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        let mut last_replaced: Option<SourceSpan> = None;

        for element in self.elements.iter().filter(|element| element.replaced) {
            if last_replaced.is_some_and(|outer| outer.encloses(element.span)) {
                continue;
            }
            output.push_str(self.source.get(cursor..element.span.start).unwrap_or_default());
            output.push_str(&element.content);
            cursor = element.span.end;
            last_replaced = Some(element.span);
        }

        output.push_str(self.source.get(cursor..).unwrap_or_default());
        output
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;
    use crate::input::TranslationTable;
    use crate::test_utils::greetings_table;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
  <h1 data-translate="hello">Hello</h1>
  <p data-translate='goodbye'>Goodbye <em>friend</em></p>
  <img src="logo.png" data-translate="logo">
  <button class="btn translate" disabled>Save</button>
</body>
</html>
"#;

    #[fixture]
    fn page() -> HtmlDocument {
        HtmlDocument::parse(PAGE).unwrap()
    }

    #[rstest]
    #[gtest]
    fn parse_records_elements_in_document_order(page: HtmlDocument) {
        let tags: Vec<&str> = page.elements().iter().map(HtmlElement::tag).collect();

        assert_that!(
            tags,
            elements_are![eq(&"html"), eq(&"body"), eq(&"h1"), eq(&"p"), eq(&"em"), eq(&"button")]
        );
    }

    #[rstest]
    #[gtest]
    fn parse_reads_attributes_and_content(page: HtmlDocument) {
        let paragraph = &page.elements()[3];
        let button = &page.elements()[5];

        expect_that!(paragraph.attribute("data-translate"), some(eq("goodbye")));
        expect_that!(paragraph.content(), eq("Goodbye <em>friend</em>"));
        expect_that!(button.attribute("disabled"), some(eq("")));
        expect_that!(button.has_class("translate"), eq(true));
    }

    #[rstest]
    #[gtest]
    fn requests_skip_void_elements(mut page: HtmlDocument) {
        let keys: Vec<String> = page
            .requests(&Marker::default())
            .into_iter()
            .map(|request| request.key)
            .collect();

        assert_that!(keys, elements_are![eq("hello"), eq("goodbye")]);
    }

    #[rstest]
    #[gtest]
    fn render_without_changes_returns_source(page: HtmlDocument) {
        assert_eq!(page.render(), PAGE);
    }

    #[rstest]
    #[gtest]
    fn apply_and_render_replaces_marked_content(mut page: HtmlDocument) {
        let mut engine = Engine::new(greetings_table());
        engine.set_language("uk").unwrap();

        let summary = page.apply(&engine, &Marker::default()).unwrap();

        expect_that!(summary, eq(ApplySummary { applied: 1, missing: 1 }));
        expect_that!(page.elements()[2].is_replaced(), eq(true));
        expect_that!(page.elements()[3].is_replaced(), eq(false));
        let rendered = page.render();
        expect_that!(rendered, contains_substring(r#"<h1 data-translate="hello">Привіт</h1>"#));
        expect_that!(
            rendered,
            contains_substring("<p data-translate='goodbye'>Goodbye <em>friend</em></p>")
        );
    }

    #[rstest]
    #[gtest]
    fn class_marker_translates_by_source_text(mut page: HtmlDocument) {
        let table = TranslationTable::flat([("save", "Зберегти")]);
        let engine = Engine::new(table).with_key_match(crate::engine::KeyMatch::CaseInsensitive);

        let summary = page.apply(&engine, &Marker::Class("translate".to_string())).unwrap();

        expect_that!(summary, eq(ApplySummary { applied: 1, missing: 0 }));
        expect_that!(
            page.render(),
            contains_substring(r#"<button class="btn translate" disabled>Зберегти</button>"#)
        );
    }

    #[rstest]
    #[gtest]
    fn ancestor_replacement_wins_over_nested() {
        let source = r#"<div data-translate="outer"><span data-translate="inner">x</span></div>"#;
        let mut document = HtmlDocument::parse(source).unwrap();
        let table = TranslationTable::flat([("outer", "OUTER"), ("inner", "INNER")]);

        document.apply(&Engine::new(table), &Marker::default()).unwrap();

        assert_eq!(document.render(), r#"<div data-translate="outer">OUTER</div>"#);
    }

    #[rstest]
    #[gtest]
    fn render_keeps_multibyte_text_intact() {
        let source = "<p>Ціна</p><b data-translate=\"k\">значення</b><i>кінець</i>";
        let mut document = HtmlDocument::parse(source).unwrap();

        document
            .apply(&Engine::new(TranslationTable::flat([("k", "value")])), &Marker::default())
            .unwrap();

        assert_eq!(document.render(), "<p>Ціна</p><b data-translate=\"k\">value</b><i>кінець</i>");
    }
}
