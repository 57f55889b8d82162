use std::fmt;

/// Locale-aware post-processing of translated text.
///
/// Runs on found text only, never on placeholders.
pub trait TextFormatter: fmt::Debug + Send + Sync {
    fn format(&self, text: &str, locale: &str) -> String;
}

/// Returns the text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughFormatter;

impl TextFormatter for PassthroughFormatter {
    fn format(&self, text: &str, _locale: &str) -> String {
        text.to_string()
    }
}
