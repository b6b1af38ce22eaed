//! Logging facilities.
//!
//! StaticTable instruments itself with the `tracing` crate. The library
//! never installs a subscriber; applications that want output should set
//! one up (for example `tracing_subscriber::fmt::init()`), optionally
//! filtered with the target constants below.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=static_table::scheduler=trace`.
pub mod targets {
    /// Core reactive primitives target.
    pub const CORE: &str = "static_table_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "static_table_core::signal";
    /// Subject (reactive value) target.
    pub const SUBJECT: &str = "static_table_core::subject";
    /// Table data store and visibility projection target.
    pub const DATA: &str = "static_table::data";
    /// Deferred update scheduler target.
    pub const SCHEDULER: &str = "static_table::scheduler";
}
