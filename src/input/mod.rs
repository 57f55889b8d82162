//! Translation table input: in-memory tables and JSON file loading.
mod error;
mod loader;
mod table;

pub use error::TableError;
pub use loader::{
    detect_language_from_path,
    load_dir,
    load_flat_file,
    load_translation_file,
};
pub use table::{
    LanguageEntries,
    TranslationTable,
    flatten_json,
};
