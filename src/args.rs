use std::fmt;
use std::sync::Arc;

use crate::config;
use crate::style::Style;

/// Produces the output for a character that neither table knows.
///
/// Called once per unknown character. Implementations may be invoked from several
/// threads at the same time.
pub trait Fallback: Send + Sync {
    fn fallback(&self, ch: char) -> Vec<String>;
}

impl<F> Fallback for F
where
    F: Fn(char) -> Vec<String> + Send + Sync,
{
    fn fallback(&self, ch: char) -> Vec<String> {
        self(ch)
    }
}

/// Options of a conversion request.
#[derive(Clone)]
pub struct Args {
    pub style: Style,
    /// Return every known reading of a character instead of only the default one
    pub heteronym: bool,
    /// Used by [`Converter::slug`](crate::Converter::slug)
    pub separator: String,
    /// Without a fallback unknown characters are dropped
    pub fallback: Option<Arc<dyn Fallback>>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            heteronym: false,
            separator: config::DEFAULT_SEPARATOR.to_owned(),
            fallback: None,
        }
    }
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_heteronym(mut self, heteronym: bool) -> Self {
        self.heteronym = heteronym;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Fallback + 'static) -> Self {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    pub(crate) fn fallback(&self) -> Option<&dyn Fallback> {
        self.fallback.as_deref()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("style", &self.style)
            .field("heteronym", &self.heteronym)
            .field("separator", &self.separator)
            .field("fallback", &self.fallback.as_ref().map(|_| "<fallback>"))
            .finish()
    }
}
