//! The declarative table model: sections, rows, and the store that
//! projects them into what a list control should display.

mod row;
mod section;
mod table;
mod text;

pub use row::{ActionFn, PickerChoice, Row, RowId, RowKind, RowOptions, SecretFn};
pub use section::{Section, SectionId};
pub use table::{TableData, TableSignals};
pub use text::TableText;
