//! Sections: ordered groups of rows with header and footer text.
//!
//! A section owns its rows for the table's lifetime and derives its own
//! enablement from them: it is enabled exactly when at least one of its
//! rows is enabled, and a disabled section is absent from the table's
//! visible projection entirely (never rendered empty).

use slotmap::new_key_type;

use super::row::RowId;
use super::text::TableText;

new_key_type! {
    /// Arena key identifying a section. Stable for the table's lifetime.
    pub struct SectionId;
}

/// Handle to a section in a [`TableData`](super::TableData) store.
///
/// Copyable identity token; all operations go through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Section {
    pub(crate) id: SectionId,
}

impl Section {
    pub(crate) fn new(id: SectionId) -> Self {
        Self { id }
    }
}

/// Per-section state owned by the store.
///
/// `visible_rows` is a derived projection of `all_rows`; the invariant
/// `visible_rows == all_rows.filter(enabled)` in `all_rows` order holds at
/// every observable point and is re-established by full recomputation, not
/// incremental patching.
pub(crate) struct SectionState {
    pub header: TableText,
    pub footer: TableText,
    /// Every row ever created in this section, in creation/reorder order.
    pub all_rows: Vec<RowId>,
    /// The enabled-only projection of `all_rows`, in the same order.
    pub visible_rows: Vec<RowId>,
}

impl SectionState {
    pub fn new(header: TableText, footer: TableText) -> Self {
        Self {
            header,
            footer,
            all_rows: Vec::new(),
            visible_rows: Vec::new(),
        }
    }

    /// Enabled means "has at least one enabled row".
    pub fn is_enabled(&self) -> bool {
        !self.visible_rows.is_empty()
    }
}
