//! Rows: the identity-unique units of table content.
//!
//! A row pairs a display kind (one of a closed set) with a name, a few
//! behavioral flags and an enabled flag. Rows are created through their
//! owning section, live for the table's lifetime, and are addressed by
//! lightweight [`Row`] handles whose identity comes from the store's
//! arena - two rows with identical content are still distinct.

use std::fmt;
use std::sync::Arc;

use slotmap::new_key_type;
use static_table_core::{Subject, SubjectBinding};

use super::section::SectionId;
use super::text::TableText;

new_key_type! {
    /// Arena key identifying a row. Stable for the table's lifetime.
    pub struct RowId;
}

/// Handle to a row in a [`TableData`](super::TableData) store.
///
/// Copyable identity token; all operations go through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row {
    pub(crate) id: RowId,
}

impl Row {
    pub(crate) fn new(id: RowId) -> Self {
        Self { id }
    }
}

/// A side-effect callback carried by button and menu rows.
pub type ActionFn = Arc<dyn Fn() + Send + Sync>;

/// Produces a secret on demand; called only when the host actually needs
/// to reveal or copy the value, never cached by the store.
pub type SecretFn = Arc<dyn Fn() -> String + Send + Sync>;

/// One selectable choice of a picker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerChoice {
    /// The stable raw value stored in the bound subject.
    pub value: String,
    /// The user-visible label.
    pub label: String,
}

impl PickerChoice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The closed set of display kinds, each carrying only the payload it
/// needs.
#[derive(Clone)]
pub enum RowKind {
    /// Plain text row; the row name is the content.
    Text,
    /// Name on the left, a value on the right.
    Value(TableText),
    /// Like `Value`, but the value is produced on demand and rendered
    /// obscured until revealed.
    SecretValue(SecretFn),
    /// Tappable action row.
    Button(ActionFn),
    /// Switch bound to a boolean subject.
    Toggle(Subject<bool>),
    /// Single-line editable text bound to a string subject.
    TextField {
        placeholder: TableText,
        value: Subject<String>,
    },
    /// Like `TextField`, with secure entry on the rendering side.
    SecretTextField {
        placeholder: TableText,
        value: Subject<String>,
    },
    /// Navigates to a host-provided destination when selected.
    Menu(ActionFn),
    /// Single choice from a closed list, bound to the choice's raw value.
    Picker {
        value: Subject<String>,
        choices: Vec<PickerChoice>,
    },
    /// Icon with a subtitle line.
    IconSubtitle { icon: String, subtitle: TableText },
    /// Large icon variant, for profile-style headers.
    LargeIconSubtitle { icon: String, subtitle: TableText },
}

impl fmt::Debug for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Text => write!(f, "Text"),
            RowKind::Value(v) => f.debug_tuple("Value").field(v).finish(),
            RowKind::SecretValue(_) => write!(f, "SecretValue(..)"),
            RowKind::Button(_) => write!(f, "Button(..)"),
            RowKind::Toggle(s) => f.debug_tuple("Toggle").field(s).finish(),
            RowKind::TextField { placeholder, value } => f
                .debug_struct("TextField")
                .field("placeholder", placeholder)
                .field("value", value)
                .finish(),
            RowKind::SecretTextField { placeholder, .. } => f
                .debug_struct("SecretTextField")
                .field("placeholder", placeholder)
                .finish_non_exhaustive(),
            RowKind::Menu(_) => write!(f, "Menu(..)"),
            RowKind::Picker { value, choices } => f
                .debug_struct("Picker")
                .field("value", value)
                .field("choices", choices)
                .finish(),
            RowKind::IconSubtitle { icon, subtitle } => f
                .debug_struct("IconSubtitle")
                .field("icon", icon)
                .field("subtitle", subtitle)
                .finish(),
            RowKind::LargeIconSubtitle { icon, subtitle } => f
                .debug_struct("LargeIconSubtitle")
                .field("icon", icon)
                .field("subtitle", subtitle)
                .finish(),
        }
    }
}

/// Behavioral flags of a row. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowOptions {
    /// Row responds to selection.
    pub selectable: bool,
    /// Row content can be copied to the clipboard.
    pub copyable: bool,
    /// Row represents a destructive action (rendered accordingly).
    pub destructive: bool,
    /// Row is visually highlighted.
    pub highlighted: bool,
}

impl RowOptions {
    /// Creates options with every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the copyable flag.
    pub fn with_copyable(mut self, copyable: bool) -> Self {
        self.copyable = copyable;
        self
    }

    /// Sets the destructive flag.
    pub fn with_destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    /// Sets the highlighted flag.
    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

/// Per-row state owned by the store.
pub(crate) struct RowState {
    /// Non-owning back-reference to the owning section.
    pub section: SectionId,
    pub name: TableText,
    pub kind: RowKind,
    pub options: RowOptions,
    /// Rows start disabled until explicitly enabled.
    pub enabled: bool,
    /// Live enable-tracking subscription, if any. Dropping it releases the
    /// stream.
    pub enable_binding: Option<SubjectBinding<bool>>,
}

impl RowState {
    pub fn new(section: SectionId, name: TableText, kind: RowKind, options: RowOptions) -> Self {
        Self {
            section,
            name,
            kind,
            options,
            enabled: false,
            enable_binding: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_off() {
        let options = RowOptions::new();
        assert!(!options.selectable);
        assert!(!options.copyable);
        assert!(!options.destructive);
        assert!(!options.highlighted);
    }

    #[test]
    fn test_options_builders() {
        let options = RowOptions::new()
            .with_selectable(true)
            .with_copyable(true);
        assert!(options.selectable);
        assert!(options.copyable);
        assert!(!options.destructive);
    }

    #[test]
    fn test_kind_debug_elides_callbacks() {
        let kind = RowKind::Button(Arc::new(|| {}));
        assert_eq!(format!("{kind:?}"), "Button(..)");

        let kind = RowKind::SecretValue(Arc::new(|| "hunter2".to_string()));
        assert_eq!(format!("{kind:?}"), "SecretValue(..)");
    }
}
