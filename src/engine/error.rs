use thiserror::Error;

/// A key that had no translation in the active language.
///
/// The `Display` output is the diagnostic line written for the key.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("Translation not found for key: {key}{}", language_suffix(.language.as_deref()))]
pub struct MissingTranslation {
    pub key: String,
    /// `None` for single-language tables.
    pub language: Option<String>,
}

fn language_suffix(language: Option<&str>) -> String {
    language.map(|tag| format!(" in language: {tag}")).unwrap_or_default()
}

/// Errors returned by [`crate::engine::Engine`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Language tag cannot be empty")]
    EmptyLanguageTag,

    /// Only raised in strict mode, after the whole batch was processed.
    #[error("Missing {} translation(s) in language '{language}': {}", .keys.len(), .keys.join(", "))]
    MissingTranslations { language: String, keys: Vec<String> },
}
