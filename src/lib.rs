//! i18n-swap
//!
//! Key-based text substitution: resolves translation keys against a
//! (optionally per-language) table and writes the text into marked document
//! elements.

pub mod config;
pub mod document;
pub mod engine;
pub mod input;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use document::{
    HtmlDocument,
    Marker,
    TranslationRequest,
    TranslationTarget,
};
pub use engine::{
    Engine,
    EngineError,
};
pub use input::TranslationTable;
pub use types::{
    ApplySummary,
    Lookup,
};
