//! In-memory element, for callers that keep their own document model.

use super::{
    MarkedElement,
    TranslationTarget,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    content: String,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attributes: Vec::new(), content: String::new() }
    }

    /// Sets an attribute, replacing an existing one with the same name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.attributes.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.attributes.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl TranslationTarget for Element {
    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, markup: &str) {
        markup.clone_into(&mut self.content);
    }
}

impl MarkedElement for Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn with_attribute_replaces_same_name() {
        let element = Element::new("a")
            .with_attribute("data-translate", "old")
            .with_attribute("DATA-TRANSLATE", "new");

        expect_that!(element.attribute("data-translate"), some(eq("new")));
        expect_that!(element.tag(), eq("a"));
    }

    #[googletest::test]
    fn set_content_replaces_instead_of_appending() {
        let mut element = Element::new("p").with_content("Hello");

        element.set_content("Привіт");

        expect_that!(element.content(), eq("Привіт"));
    }
}
