//! Reactive foundation for StaticTable.
//!
//! This crate provides the primitives the table model is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Value cells with change detection
//! - **Subjects**: Shared reactive values with change and completion
//!   streams, the handles the table binds toggles, text fields and row
//!   enablement to
//! - **Thread Affinity**: Debug verification that single-threaded state is
//!   only touched from its owning (UI) thread
//!
//! # Signal/Slot Example
//!
//! ```
//! use static_table_core::Signal;
//!
//! let rows_changed = Signal::<usize>::new();
//!
//! let conn_id = rows_changed.connect(|count| {
//!     println!("now showing {count} rows");
//! });
//!
//! rows_changed.emit(3);
//! rows_changed.disconnect(conn_id);
//! ```
//!
//! # Subject Example
//!
//! ```
//! use static_table_core::Subject;
//!
//! let api_enabled = Subject::new(false);
//! let _binding = api_enabled.bind(
//!     |&on| println!("api toggled: {on}"),
//!     || println!("stream over"),
//! );
//! api_enabled.set(true);
//! ```

pub mod logging;
pub mod property;
pub mod signal;
pub mod subject;
pub mod thread_check;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use subject::{Subject, SubjectBinding};
pub use thread_check::ThreadAffinity;
