//! A settings screen driven entirely by enabled flags.
//!
//! Run with `cargo run --example settings` (set `RUST_LOG=trace` to watch
//! the projector work).

use std::sync::Arc;

use static_table::{ListSurface, RowKind, RowOptions, Subject, TableData, UpdateScheduler};

/// A stand-in list control that prints every call it receives.
struct PrintSurface;

impl ListSurface for PrintSurface {
    fn reload_all(&self) {
        println!("surface: reload all");
    }
    fn insert_row(&self, section: usize, row: usize) {
        println!("surface: insert row {row} in section {section}");
    }
    fn delete_row(&self, section: usize, row: usize) {
        println!("surface: delete row {row} in section {section}");
    }
    fn reload_row(&self, section: usize, row: usize) {
        println!("surface: reload row {row} in section {section}");
    }
    fn move_row(&self, from_section: usize, from_row: usize, to_section: usize, to_row: usize) {
        println!(
            "surface: move row {from_row} in section {from_section} \
             to row {to_row} in section {to_section}"
        );
    }
    fn insert_section(&self, index: usize) {
        println!("surface: insert section {index}");
    }
    fn delete_section(&self, index: usize) {
        println!("surface: delete section {index}");
    }
    fn reload_section(&self, index: usize) {
        println!("surface: reload section {index}");
    }
    fn move_section(&self, from: usize, to: usize) {
        println!("surface: move section {from} to {to}");
    }
    fn begin_updates(&self) {
        println!("surface: begin batch");
    }
    fn end_updates(&self) {
        println!("surface: end batch");
    }
}

fn dump(table: &TableData) {
    println!("--- {} visible section(s) ---", table.section_count());
    for s in 0..table.section_count() {
        let section = table.section_at(s);
        if let Some(header) = table.header(section).current() {
            println!("[{header}]");
        }
        for r in 0..table.row_count(s) {
            let row = table.row_at(s, r);
            println!("  - {}", table.name(row).current().unwrap_or_default());
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let table = TableData::new();

    let account = table.create_section("Account", "Signed in as ada@example.com");
    let email = table.create_row(account, "Email", RowKind::Text, RowOptions::new());
    let subscription = table.create_row(
        account,
        "Manage Subscription",
        RowKind::Text,
        RowOptions::new().with_selectable(true),
    );

    let danger = table.create_section("Danger Zone", "");
    let delete = table.create_row(
        danger,
        "Delete Account",
        RowKind::Button(Arc::new(|| println!("action: delete account tapped"))),
        RowOptions::new().with_selectable(true).with_destructive(true),
    );

    let scheduler = UpdateScheduler::new(PrintSurface);
    let _binding = scheduler.bind(&table);

    // Off screen: these collapse into one pending reload.
    println!("== building while off screen ==");
    table.enable(email);
    table.enable(delete);

    println!("== screen appears ==");
    scheduler.set_attached(true);
    dump(&table);

    // On screen: changes flow through as individual edits.
    println!("== subscription state arrives ==");
    let is_premium = Subject::new(false);
    table.track_enabled(subscription, &is_premium);
    is_premium.set(true);
    dump(&table);

    println!("== last row of a section disables ==");
    table.disable(delete);
    dump(&table);
}
