//! Declarative section/row model for settings-style list screens.
//!
//! StaticTable keeps the full table definition (every section and row
//! ever created, in order) separate from what is currently displayed. A
//! row carries an enabled flag; the visible projection is the enabled
//! rows of each section, and the sections that have at least one. Every
//! enablement change recomputes that projection and diffs it against the
//! previous one by identity, so the displayed list is driven entirely by
//! flipping flags, never by manual index bookkeeping.
//!
//! The three layers:
//!
//! - [`data`]: the ordered store ([`TableData`]) with its row/section
//!   handles and change signals.
//! - [`diff`]: ordered identity diffing between two projections.
//! - [`scheduler`]: the [`UpdateScheduler`] gate that forwards mutations
//!   to a [`ListSurface`] while it is on screen and collapses them into
//!   one deferred reload while it is not.
//!
//! # Quick start
//!
//! ```
//! use static_table::{RowKind, RowOptions, Subject, TableData};
//!
//! let table = TableData::new();
//! let account = table.create_section("Account", "");
//! let email = table.create_row(account, "Email", RowKind::Text, RowOptions::new());
//! let premium = table.create_row(
//!     account,
//!     "Manage Subscription",
//!     RowKind::Text,
//!     RowOptions::new().with_selectable(true),
//! );
//!
//! table.enable(email);
//! assert_eq!(table.section_count(), 1);
//! assert_eq!(table.row_count(0), 1);
//!
//! // Drive a row from application state instead of toggling by hand.
//! let is_premium = Subject::new(false);
//! table.track_enabled(premium, &is_premium);
//! is_premium.set(true);
//! assert_eq!(table.row_count(0), 2);
//! ```
//!
//! The store is UI-thread affine: create it on the UI thread and mutate
//! it only from there (debug builds assert this). Producers on other
//! threads re-dispatch before touching it.

pub mod data;
pub mod diff;
pub mod scheduler;

pub use data::{
    ActionFn, PickerChoice, Row, RowId, RowKind, RowOptions, SecretFn, Section, SectionId,
    TableData, TableSignals, TableText,
};
pub use diff::{diff_keys, Diff, Insertion, Removal};
pub use scheduler::{ListMutation, ListSurface, UpdateScheduler};

pub use static_table_core::{
    ConnectionGuard, ConnectionId, Property, Signal, Subject, SubjectBinding, ThreadAffinity,
};
