//! Tri-state text cells.
//!
//! Everything user-visible in the table that is a string - row names,
//! headers, footers, value columns, placeholders - is a [`TableText`]:
//! absent, a fixed literal, or a handle to a reactive source that the
//! rendering layer subscribes to while a cell is on screen and releases on
//! reuse. The store holds whichever variant was supplied; it never owns
//! the reactive source itself.

use static_table_core::Subject;

/// Absent, static, or reactively bound text.
#[derive(Clone, Debug, Default)]
pub enum TableText {
    /// No text at all (for example a section without a footer).
    #[default]
    None,
    /// A fixed literal.
    Static(String),
    /// A live value; subscribe for updates, read [`current`](Self::current)
    /// for the present value.
    Bound(Subject<String>),
}

impl TableText {
    /// The text as of right now, if any.
    pub fn current(&self) -> Option<String> {
        match self {
            TableText::None => None,
            TableText::Static(s) => Some(s.clone()),
            TableText::Bound(subject) => Some(subject.get()),
        }
    }

    /// Whether there is no text at all.
    pub fn is_none(&self) -> bool {
        matches!(self, TableText::None)
    }

    /// The reactive source, when this text is bound to one.
    pub fn source(&self) -> Option<&Subject<String>> {
        match self {
            TableText::Bound(subject) => Some(subject),
            _ => None,
        }
    }
}

impl From<&str> for TableText {
    fn from(s: &str) -> Self {
        TableText::Static(s.to_string())
    }
}

impl From<String> for TableText {
    fn from(s: String) -> Self {
        TableText::Static(s)
    }
}

impl From<Subject<String>> for TableText {
    fn from(subject: Subject<String>) -> Self {
        TableText::Bound(subject)
    }
}

impl From<Option<String>> for TableText {
    fn from(s: Option<String>) -> Self {
        match s {
            Some(s) => TableText::Static(s),
            None => TableText::None,
        }
    }
}
