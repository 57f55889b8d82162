//! Translation file loading

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde_json::Value;

use super::{
    LanguageEntries,
    TableError,
    TranslationTable,
};
use crate::config::I18nSettings;

/// ISO 639-1 language codes accepted as the primary subtag.
static LANGUAGE_CODES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
        "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
        "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
        "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
        "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
        "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
        "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
        "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
        "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
        "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
        "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
        "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
        "yo", "za", "zh", "zu",
    ]
    .into_iter()
    .collect()
});

/// Checks whether a path segment is a language tag.
///
/// The primary subtag must be a known ISO 639-1 code (`ui` or `js` are not).
/// Further subtags (separated by `-` or `_`) are 2-8 ASCII alphanumerics.
fn is_language_tag(part: &str) -> bool {
    let mut subtags = part.split(['-', '_']);
    let Some(primary) = subtags.next() else {
        return false;
    };

    LANGUAGE_CODES.contains(primary)
        && subtags.all(|subtag| {
            (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

/// Detect language from file path heuristically
///
/// Splits the path by '/' and '.', then searches backwards for a part
/// that is a language tag. Pass a path relative to the translation root so
/// that ancestor directories cannot supply the language.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `messages/uk-UA.json` → `uk-UA`
/// - `translations/pt_BR/common.json` → `pt_BR`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(['/', '\\', '.']).collect();

    parts.iter().rev().find(|part| is_language_tag(part)).map(ToString::to_string)
}

fn read_json_object(file_path: &Path) -> Result<Value, TableError> {
    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;

    if !json.is_object() {
        return Err(TableError::InvalidShape(format!(
            "{} must contain a JSON object",
            file_path.display()
        )));
    }
    Ok(json)
}

/// Load one translation file into a single-language table.
///
/// The language is detected from `file_path` as given.
///
/// # Errors
/// - File read or JSON parse failure
/// - No language tag could be detected from the path
pub fn load_translation_file(
    file_path: &Path,
    separator: &str,
) -> Result<TranslationTable, TableError> {
    let language = detect_language_from_path(file_path)
        .ok_or_else(|| TableError::UnknownLanguage(file_path.to_path_buf()))?;
    load_language_file(file_path, &language, separator)
}

fn load_language_file(
    file_path: &Path,
    language: &str,
    separator: &str,
) -> Result<TranslationTable, TableError> {
    let json = read_json_object(file_path)?;

    tracing::debug!(path = %file_path.display(), %language, "Loaded translation file");
    Ok(TranslationTable::from_json(language, &json, separator))
}

/// Load one file as a flat table, without language detection.
///
/// # Errors
/// File read or JSON parse failure, or a non-object root.
pub fn load_flat_file(file_path: &Path, separator: &str) -> Result<TranslationTable, TableError> {
    let json = read_json_object(file_path)?;

    tracing::debug!(path = %file_path.display(), "Loaded flat translation file");
    Ok(TranslationTable::flat_from_json(&json, separator))
}

/// Load every translation file under `root` into one table.
///
/// Files for the same language are merged in sorted path order, so later
/// files win on duplicate keys. With `settings.flat` every file is merged
/// into one flat table instead. Files that fail to load are skipped with a
/// warning.
///
/// # Errors
/// Returns [`TableError::Pattern`] when a configured glob pattern is invalid.
pub fn load_dir(root: &Path, settings: &I18nSettings) -> Result<TranslationTable, TableError> {
    tracing::debug!(root = %root.display(), "Loading translation files");

    let include_set =
        build_glob_set(std::slice::from_ref(&settings.translation_files.file_pattern))?;
    let exclude_set = build_glob_set(&settings.exclude_patterns)?;

    let mut files = find_translation_files(root, &include_set, &exclude_set);
    files.sort();

    let separator = settings.key_separator.as_str();
    let mut table = if settings.flat {
        TranslationTable::flat(LanguageEntries::new())
    } else {
        TranslationTable::new()
    };
    for file in &files {
        let loaded = if settings.flat {
            load_flat_file(file, separator)
        } else {
            // ancestors of the root must not supply the language
            let relative = file.strip_prefix(root).unwrap_or(file);
            detect_language_from_path(relative)
                .ok_or_else(|| TableError::UnknownLanguage(relative.to_path_buf()))
                .and_then(|language| load_language_file(file, &language, separator))
        };
        match loaded {
            Ok(loaded) => table.merge(loaded),
            Err(e) => {
                tracing::warn!("Skipping translation file {}: {e}", file.display());
            }
        }
    }

    tracing::debug!(
        files = files.len(),
        entries = table.len(),
        "Finished loading translation files"
    );
    Ok(table)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, TableError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|source| TableError::Pattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TableError::Pattern { pattern: patterns.join(", "), source })
}

fn find_translation_files(root: &Path, include: &GlobSet, exclude: &GlobSet) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !include.is_match(relative_path) || exclude.is_match(relative_path) {
            continue;
        }

        found.push(path.to_path_buf());
    }

    found
}
