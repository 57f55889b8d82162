use thiserror::Error;

/// Errors raised while reading an HTML document
#[derive(Error, Debug)]
pub enum HtmlError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for HTML parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when failing to parse the document
    #[error("Failed to parse HTML document")]
    ParseFailed,
}
