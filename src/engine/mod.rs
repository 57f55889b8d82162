//! Key-based text substitution engine.
mod error;
mod formatter;
mod substitution;

pub use error::{
    EngineError,
    MissingTranslation,
};
pub use formatter::{
    PassthroughFormatter,
    TextFormatter,
};
pub use substitution::{
    Engine,
    KeyMatch,
    Strategy,
    Strictness,
};
