//! Documents whose elements receive translated text.
//!
//! A document is scanned for elements carrying a [`Marker`]; each match becomes
//! a [`TranslationRequest`] that borrows the element mutably so the engine can
//! write into it.
mod element;
mod error;
mod html;

pub use element::Element;
pub use error::HtmlError;
pub use html::{
    HtmlDocument,
    HtmlElement,
};

/// Something whose renderable content can be replaced.
pub trait TranslationTarget {
    fn content(&self) -> &str;

    /// Replaces the whole content. `markup` is written verbatim.
    fn set_content(&mut self, markup: &str);
}

/// A target that can be inspected for markers.
pub trait MarkedElement: TranslationTarget {
    /// Attribute value by (ASCII case-insensitive) name.
    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// How translatable elements are recognized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The attribute's value is the key (e.g. `data-translate="nav.home"`).
    Attribute(String),
    /// Elements with this class use their trimmed source text as the key.
    Class(String),
}

impl Default for Marker {
    fn default() -> Self {
        Self::Attribute("data-translate".to_string())
    }
}

impl Marker {
    /// The translation key carried by `element`, if it is marked.
    #[must_use]
    pub fn key_for<E: MarkedElement + ?Sized>(&self, element: &E) -> Option<String> {
        let key = match self {
            Self::Attribute(name) => element.attribute(name)?,
            Self::Class(class) => {
                if !element.has_class(class) {
                    return None;
                }
                element.content().trim()
            }
        };

        (!key.is_empty()).then(|| key.to_string())
    }
}

/// One key paired with the target that receives its text.
#[derive(Debug)]
pub struct TranslationRequest<'a, T: ?Sized> {
    pub key: String,
    pub target: &'a mut T,
}

impl<'a, T: ?Sized> TranslationRequest<'a, T> {
    pub fn new(key: impl Into<String>, target: &'a mut T) -> Self {
        Self { key: key.into(), target }
    }
}

/// Builds requests for every marked element, preserving iteration order.
pub fn collect_requests<'a, E>(
    elements: impl IntoIterator<Item = &'a mut E>,
    marker: &Marker,
) -> Vec<TranslationRequest<'a, E>>
where
    E: MarkedElement + 'a,
{
    elements
        .into_iter()
        .filter_map(|element| {
            let key = marker.key_for(&*element)?;
            Some(TranslationRequest { key, target: element })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::marked_element;

    #[rstest]
    #[gtest]
    fn attribute_marker_reads_key() {
        let marker = Marker::default();

        expect_that!(marker.key_for(&marked_element("nav.home", "Home")), some(eq("nav.home")));
        expect_that!(marker.key_for(&Element::new("p").with_content("Home")), none());
        expect_that!(marker.key_for(&marked_element("", "Home")), none());
    }

    #[rstest]
    #[gtest]
    fn class_marker_uses_trimmed_content() {
        let marker = Marker::Class("translate".to_string());
        let marked = Element::new("button")
            .with_attribute("class", "btn translate primary")
            .with_content("  Save changes \n");
        let unmarked = Element::new("button").with_attribute("class", "btn").with_content("Save");
        let blank = Element::new("span").with_attribute("class", "translate").with_content("  ");

        expect_that!(marker.key_for(&marked), some(eq("Save changes")));
        expect_that!(marker.key_for(&unmarked), none());
        expect_that!(marker.key_for(&blank), none());
    }

    #[rstest]
    #[gtest]
    fn class_marker_matches_whole_class_names() {
        let marker = Marker::Class("translate".to_string());
        let element =
            Element::new("p").with_attribute("class", "translated no-translate").with_content("x");

        assert_that!(marker.key_for(&element), none());
    }

    #[rstest]
    #[gtest]
    fn collect_requests_keeps_order_and_skips_unmarked() {
        let mut elements = vec![
            marked_element("b", "B"),
            Element::new("p").with_content("plain"),
            marked_element("a", "A"),
        ];

        let requests = collect_requests(&mut elements, &Marker::default());
        let keys: Vec<&str> = requests.iter().map(|r| r.key.as_str()).collect();

        assert_that!(keys, elements_are![eq(&"b"), eq(&"a")]);
    }

    #[rstest]
    #[gtest]
    fn requests_write_through_to_elements() {
        let mut elements = vec![marked_element("a", "A")];

        for request in collect_requests(&mut elements, &Marker::default()) {
            request.target.set_content("changed");
        }

        assert_that!(elements[0].content(), eq("changed"));
    }
}
