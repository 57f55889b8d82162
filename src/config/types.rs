use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::document::Marker;
use crate::engine::{
    KeyMatch,
    Strategy,
    Strictness,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Language used until `set_language` is called.
    pub fallback_language: String,

    pub strategy: Strategy,

    /// Fail the apply pass when any key is missing.
    pub strict: bool,

    /// Unset means case-insensitive with `marker_class`, exact otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_match: Option<KeyMatch>,

    /// Attribute whose value is the translation key.
    pub marker_attribute: String,

    /// When set, elements carrying this class are translated by their source text
    /// instead of by `marker_attribute`.
    pub marker_class: Option<String>,

    pub key_separator: String,

    /// Load every translation file into one flat table, without language detection.
    pub flat: bool,

    pub translation_files: TranslationFilesConfig,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.fallback_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The fallback language cannot be empty. Example: \"en\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.marker_attribute.trim().is_empty() {
            errors.push(ValidationError::new(
                "markerAttribute",
                "The marker attribute cannot be empty. Example: \"data-translate\"",
            ));
        }

        if let Some(class) = &self.marker_class
            && class.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "markerClass",
                "The marker class cannot be empty. Please specify a class name, or remove this field",
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Marker used to find translatable elements.
    #[must_use]
    pub fn marker(&self) -> Marker {
        self.marker_class.as_ref().map_or_else(
            || Marker::Attribute(self.marker_attribute.clone()),
            |class| Marker::Class(class.clone()),
        )
    }

    /// Key matching in effect.
    ///
    /// Class-marked elements are keyed by their source text, which is matched
    /// case-insensitively unless `keyMatch` says otherwise.
    #[must_use]
    pub fn key_match(&self) -> KeyMatch {
        self.key_match.unwrap_or(if self.marker_class.is_some() {
            KeyMatch::CaseInsensitive
        } else {
            KeyMatch::Exact
        })
    }

    #[must_use]
    pub const fn strictness(&self) -> Strictness {
        if self.strict { Strictness::Strict } else { Strictness::Lenient }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/{locales,translations,i18n}/**/*.json".to_string() }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            fallback_language: crate::types::FALLBACK_LANGUAGE.to_string(),
            strategy: Strategy::default(),
            strict: false,
            key_match: None,
            marker_attribute: "data-translate".to_string(),
            marker_class: None,
            key_separator: ".".to_string(),
            flat: false,
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}
