//! Translation table definitions

use std::collections::BTreeMap;

use serde_json::Value;

use super::TableError;
use crate::types::DEFAULT_LANGUAGE;

/// Key → text entries of one language.
pub type LanguageEntries = BTreeMap<String, String>;

/// Translation table partitioned by language tag.
///
/// Single-language ("flat") tables keep their entries under
/// [`DEFAULT_LANGUAGE`] and ignore the requested language on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Language tag → entries.
    languages: BTreeMap<String, LanguageEntries>,
    /// Whether this table was built as a single-language map.
    flat: bool,
}

impl TranslationTable {
    /// Creates an empty multi-language table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-language table.
    #[must_use]
    pub fn flat<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self { languages: BTreeMap::new(), flat: true };
        table.insert_language(DEFAULT_LANGUAGE, entries);
        table
    }

    /// Adds entries for `language`, returning the table (builder style).
    #[must_use]
    pub fn with_language<K, V>(
        mut self,
        language: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert_language(language, entries);
        self
    }

    /// Adds entries for `language`. Existing keys are overwritten.
    pub fn insert_language<K, V>(&mut self, language: &str, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let target = self.languages.entry(language.to_string()).or_default();
        target.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Builds a one-language table from a (possibly nested) JSON object.
    #[must_use]
    pub fn from_json(language: &str, json: &Value, separator: &str) -> Self {
        Self::new().with_language(language, flatten_json(json, separator, None))
    }

    /// Builds a flat table from a (possibly nested) JSON object.
    #[must_use]
    pub fn flat_from_json(json: &Value, separator: &str) -> Self {
        Self::flat(flatten_json(json, separator, None))
    }

    /// Builds a table from a JSON object whose top-level keys are language tags.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use i18n_swap::input::TranslationTable;
    ///
    /// let json = json!({
    ///     "en": { "nav": { "home": "Home" } },
    ///     "uk": { "nav": { "home": "Головна" } }
    /// });
    ///
    /// let table = TranslationTable::from_multi_language_json(&json, ".").unwrap();
    /// assert_eq!(table.get("uk", "nav.home"), Some("Головна"));
    /// ```
    ///
    /// # Errors
    /// Returns [`TableError::InvalidShape`] when the root or a language entry is not an object.
    pub fn from_multi_language_json(json: &Value, separator: &str) -> Result<Self, TableError> {
        let Value::Object(languages) = json else {
            return Err(TableError::InvalidShape("root must be an object".to_string()));
        };

        let mut table = Self::new();
        for (language, entries) in languages {
            if !entries.is_object() {
                return Err(TableError::InvalidShape(format!(
                    "entries for language '{language}' must be an object"
                )));
            }
            table.insert_language(language, flatten_json(entries, separator, None));
        }
        Ok(table)
    }

    /// Merges `other` into this table; entries from `other` win on conflict.
    pub fn merge(&mut self, other: Self) {
        for (language, entries) in other.languages {
            self.languages.entry(language).or_default().extend(entries);
        }
    }

    /// Resolves the language tag actually used for lookups.
    fn effective_language<'a>(&self, language: &'a str) -> &'a str {
        if self.flat { DEFAULT_LANGUAGE } else { language }
    }

    /// Entries for `language`, or `None` if the language is absent.
    #[must_use]
    pub fn entries(&self, language: &str) -> Option<&LanguageEntries> {
        self.languages.get(self.effective_language(language))
    }

    /// Raw text for `key` in `language`.
    #[must_use]
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.entries(language)?.get(key).map(String::as_str)
    }

    /// Raw text for `key` in `language`, comparing keys case-insensitively.
    ///
    /// An exact hit wins; otherwise the first key in sorted order whose
    /// lowercase form equals the lowercase `key` is used.
    #[must_use]
    pub fn get_ignore_case(&self, language: &str, key: &str) -> Option<&str> {
        let entries = self.entries(language)?;
        if let Some(text) = entries.get(key) {
            return Some(text);
        }

        let wanted = key.to_lowercase();
        entries
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase() == wanted)
            .map(|(_, text)| text.as_str())
    }

    /// Language tags in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(self.effective_language(language))
    }

    /// Total number of entries across all languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.flat
    }

    /// Keys present in `reference` but absent (or empty) in `other`.
    #[must_use]
    pub fn missing_keys(&self, reference: &str, other: &str) -> Vec<&str> {
        let Some(reference_entries) = self.entries(reference) else {
            return Vec::new();
        };
        let other_entries = self.entries(other);

        reference_entries
            .keys()
            .filter(|key| {
                other_entries
                    .and_then(|entries| entries.get(key.as_str()))
                    .is_none_or(String::is_empty)
            })
            .map(String::as_str)
            .collect()
    }
}

/// Flatten nested JSON object into separator-joined key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_swap::input::flatten_json;
///
/// let json = json!({
///     "nav": {
///         "home": "Home",
///         "about": "About"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
/// assert_eq!(flattened.get("nav.about"), Some(&"About".to_string()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> LanguageEntries {
    let mut result = LanguageEntries::new();
    flatten_into(json, separator, prefix, &mut result);
    result
}

fn flatten_into(json: &Value, separator: &str, prefix: Option<&str>, out: &mut LanguageEntries) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_into(value, separator, Some(&full_key), out);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_into(value, separator, Some(&full_key), out);
            }
        }
        Value::String(text) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), text.clone());
            }
        }
        // null has no text to show
        Value::Null => {}
        _ => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), json.to_string());
            }
        }
    }
}
