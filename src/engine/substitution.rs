//! The substitution engine: lookup and apply over translation requests.

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    EngineError,
    MissingTranslation,
    PassthroughFormatter,
    TextFormatter,
};
use crate::config::I18nSettings;
use crate::document::{
    TranslationRequest,
    TranslationTarget,
};
use crate::input::TranslationTable;
use crate::types::{
    ApplySummary,
    FALLBACK_LANGUAGE,
    Lookup,
};

/// How a key without translation is represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Missing keys yield [`Lookup::NotFound`]; the target is left untouched.
    #[default]
    Static,
    /// Missing keys yield a generated [`Lookup::Placeholder`] that is written to the target.
    Dynamic,
}

/// How request keys are compared with table keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyMatch {
    #[default]
    Exact,
    /// Used when keys are source texts (class-marked elements).
    CaseInsensitive,
}

/// Whether missing translations fail an apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strictness {
    #[default]
    Lenient,
    /// The pass still completes; the error is returned afterwards.
    Strict,
}

/// Resolves keys against a translation table and writes the results into targets.
///
/// One engine owns its table and language. Create separate engines when
/// several languages must be active at once.
#[derive(Debug)]
pub struct Engine {
    table: TranslationTable,
    fallback_language: String,
    /// `None` until `set_language` is called.
    active_language: Option<String>,
    strategy: Strategy,
    key_match: KeyMatch,
    strictness: Strictness,
    formatter: Box<dyn TextFormatter>,
}

impl Engine {
    #[must_use]
    pub fn new(table: TranslationTable) -> Self {
        Self {
            table,
            fallback_language: FALLBACK_LANGUAGE.to_string(),
            active_language: None,
            strategy: Strategy::default(),
            key_match: KeyMatch::default(),
            strictness: Strictness::default(),
            formatter: Box::new(PassthroughFormatter),
        }
    }

    /// Builds an engine with the behavior selected in `settings`.
    #[must_use]
    pub fn from_settings(table: TranslationTable, settings: &I18nSettings) -> Self {
        Self {
            fallback_language: settings.fallback_language.clone(),
            strategy: settings.strategy,
            key_match: settings.key_match(),
            strictness: settings.strictness(),
            ..Self::new(table)
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_key_match(mut self, key_match: KeyMatch) -> Self {
        self.key_match = key_match;
        self
    }

    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl TextFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the translation table and, when given, the fallback language.
    ///
    /// The active language is kept.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyLanguageTag`] for an empty fallback; nothing is changed then.
    pub fn configure(
        &mut self,
        table: TranslationTable,
        fallback_language: Option<&str>,
    ) -> Result<(), EngineError> {
        if let Some(fallback) = fallback_language {
            if fallback.is_empty() {
                return Err(EngineError::EmptyLanguageTag);
            }
            fallback.clone_into(&mut self.fallback_language);
        }

        tracing::debug!(
            entries = table.len(),
            fallback = %self.fallback_language,
            "Translation table replaced"
        );
        self.table = table;
        Ok(())
    }

    /// Switches the active language. Already applied targets are not updated.
    ///
    /// Tags missing from the table are accepted; lookups then miss until the
    /// table or the language changes.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyLanguageTag`] for an empty tag.
    pub fn set_language(&mut self, tag: impl Into<String>) -> Result<(), EngineError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(EngineError::EmptyLanguageTag);
        }

        if !self.table.contains_language(&tag) {
            tracing::debug!(language = %tag, "Active language has no translations");
        }
        self.active_language = Some(tag);
        Ok(())
    }

    /// The active language, or the fallback language when none was set.
    #[must_use]
    pub fn active_language(&self) -> &str {
        self.active_language.as_deref().unwrap_or(&self.fallback_language)
    }

    #[must_use]
    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Resolves `key` in the active language.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Lookup {
        let language = self.active_language();
        let raw = match self.key_match {
            KeyMatch::Exact => self.table.get(language, key),
            KeyMatch::CaseInsensitive => self.table.get_ignore_case(language, key),
        };

        match raw.filter(|text| !text.is_empty()) {
            Some(text) => Lookup::Found(self.formatter.format(text, language)),
            None => match self.strategy {
                Strategy::Static => Lookup::NotFound,
                Strategy::Dynamic => Lookup::Placeholder(
                    MissingTranslation { key: key.to_string(), language: None }.to_string(),
                ),
            },
        }
    }

    /// Describes `key` as missing in the active language.
    #[must_use]
    pub fn missing_translation(&self, key: &str) -> MissingTranslation {
        MissingTranslation {
            key: key.to_string(),
            language: (!self.table.is_flat()).then(|| self.active_language().to_string()),
        }
    }

    /// Keys the fallback language has but the active language lacks.
    ///
    /// Empty for flat tables and while the fallback language is active.
    #[must_use]
    pub fn untranslated_keys(&self) -> Vec<&str> {
        let language = self.active_language();
        if self.table.is_flat() || language == self.fallback_language {
            return Vec::new();
        }
        self.table.missing_keys(&self.fallback_language, language)
    }

    /// Looks up every request in order and writes the result into its target.
    ///
    /// Found text replaces the target content verbatim (no escaping). Every
    /// missing key is logged at WARN; it leaves the target untouched under
    /// [`Strategy::Static`]; under [`Strategy::Dynamic`] the placeholder is
    /// written instead. Both count as `missing`.
    ///
    /// # Errors
    /// Only in [`Strictness::Strict`]: [`EngineError::MissingTranslations`]
    /// once the whole batch has been processed.
    pub fn apply_all<'a, T>(
        &self,
        requests: impl IntoIterator<Item = TranslationRequest<'a, T>>,
    ) -> Result<ApplySummary, EngineError>
    where
        T: TranslationTarget + ?Sized + 'a,
    {
        let mut summary = ApplySummary::default();
        let mut missing_keys = Vec::new();

        for TranslationRequest { key, target } in requests {
            let lookup = self.lookup(&key);
            if let Some(text) = lookup.text() {
                target.set_content(text);
            }

            if lookup.is_found() {
                summary.applied += 1;
            } else {
                tracing::warn!("{}", self.missing_translation(&key));
                summary.missing += 1;
                missing_keys.push(key);
            }
        }

        tracing::debug!(
            applied = summary.applied,
            missing = summary.missing,
            language = %self.active_language(),
            "Applied translations"
        );

        if self.strictness == Strictness::Strict && !missing_keys.is_empty() {
            return Err(EngineError::MissingTranslations {
                language: self.active_language().to_string(),
                keys: missing_keys,
            });
        }

        Ok(summary)
    }
}
