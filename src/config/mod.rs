//! Settings for the substitution engine and its loaders.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    I18nSettings,
    TranslationFilesConfig,
    ValidationError,
};
