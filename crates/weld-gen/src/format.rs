//! Printing options for generated JavaScript

/// Quote style for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Single quotes: `'hello'`
    Single,
    /// Double quotes: `"hello"`
    #[default]
    Double,
}

/// Options passed to the printer
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Quote style for string literals
    pub quote_style: QuoteStyle,
}
