//! The table store and its visibility projection.
//!
//! [`TableData`] owns the complete ordered collection of sections (and,
//! through them, rows) plus the derived visible projection: sections with
//! at least one enabled row, in original order, each showing its enabled
//! rows in original order. The projection is never patched incrementally.
//! Every enablement change recomputes it from the source of truth, diffs
//! it against the previous projection by identity, and emits the result -
//! an O(n) recomputation bought deliberately for the guarantee that the
//! projection can never drift (counts here are tens, not thousands).
//!
//! Two diff passes run per change, independently: the row-level pass
//! inside the touched section, then the section-level pass across the
//! table. Toggling the last enabled row of a section off therefore
//! produces both a row-removal diff and a section-removal diff in the
//! same logical operation.

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::SlotMap;
use static_table_core::{Signal, Subject, ThreadAffinity};

use crate::diff::{diff_keys, Diff};
use crate::scheduler::ListMutation;

use super::row::{Row, RowId, RowKind, RowOptions, RowState};
use super::section::{Section, SectionId, SectionState};
use super::text::TableText;

/// Change notifications emitted by a [`TableData`] store.
///
/// All three are emitted after the projection has been updated, outside
/// the store's lock, so slots may query the store freely. Nothing is
/// emitted for a change that turns out to be a no-op (an empty diff).
pub struct TableSignals {
    /// A section's visible rows changed. Carries the section handle and
    /// the row-level diff by identity.
    pub row_changes: Signal<(Section, Diff<Row>)>,
    /// The table's visible sections changed.
    pub section_changes: Signal<Diff<Section>>,
    /// The list-control mutations for one logical change, as a single
    /// batch so the update scheduler samples attachment exactly once.
    pub updates: Signal<Vec<ListMutation>>,
}

impl TableSignals {
    fn new() -> Self {
        Self {
            row_changes: Signal::new(),
            section_changes: Signal::new(),
            updates: Signal::new(),
        }
    }
}

/// The declarative table store.
///
/// Cheaply clonable handle; all clones share the same state. UI-thread
/// affine: every mutation debug-asserts it runs on the creating thread
/// (see [`ThreadAffinity`]).
///
/// # Example
///
/// ```
/// use static_table::{RowKind, RowOptions, TableData};
///
/// let table = TableData::new();
/// let general = table.create_section("General", "");
/// let version = table.create_row(general, "Version", RowKind::Text, RowOptions::new());
///
/// assert_eq!(table.section_count(), 0); // nothing enabled yet
/// table.enable(version);
/// assert_eq!(table.section_count(), 1);
/// assert_eq!(table.row_count(0), 1);
/// ```
pub struct TableData {
    inner: Arc<TableInner>,
}

pub(crate) struct TableInner {
    state: RwLock<TableState>,
    signals: TableSignals,
    affinity: ThreadAffinity,
}

struct TableState {
    sections: SlotMap<SectionId, SectionState>,
    rows: SlotMap<RowId, RowState>,
    /// Every section ever created, in creation order.
    all_sections: Vec<SectionId>,
    /// The enabled-only projection of `all_sections`, same order.
    visible_sections: Vec<SectionId>,
}

/// Everything one projection pass produced, handed out of the lock for
/// emission.
struct Projection {
    section: SectionId,
    row_diff: Diff<RowId>,
    section_diff: Diff<SectionId>,
    mutations: Vec<ListMutation>,
}

impl Default for TableData {
    fn default() -> Self {
        Self::new()
    }
}

impl TableData {
    /// Create an empty store bound to the current (UI) thread.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TableInner {
                state: RwLock::new(TableState {
                    sections: SlotMap::with_key(),
                    rows: SlotMap::with_key(),
                    all_sections: Vec::new(),
                    visible_sections: Vec::new(),
                }),
                signals: TableSignals::new(),
                affinity: ThreadAffinity::current(),
            }),
        }
    }

    /// The store's change signals.
    pub fn signals(&self) -> &TableSignals {
        &self.inner.signals
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Append a new, empty section.
    ///
    /// The section starts disabled (it has no enabled rows) and therefore
    /// does not yet appear in the visible projection.
    pub fn create_section(
        &self,
        header: impl Into<TableText>,
        footer: impl Into<TableText>,
    ) -> Section {
        self.inner.affinity.debug_assert_same_thread();
        let mut state = self.inner.state.write();
        let id = state
            .sections
            .insert(SectionState::new(header.into(), footer.into()));
        state.all_sections.push(id);
        tracing::debug!(
            target: "static_table::data",
            total = state.all_sections.len(),
            "section created"
        );
        Section::new(id)
    }

    /// Append a new row to `section`.
    ///
    /// The row starts disabled; [`enable`](Self::enable) it (or bind it
    /// with [`track_enabled`](Self::track_enabled)) to make it visible.
    pub fn create_row(
        &self,
        section: Section,
        name: impl Into<TableText>,
        kind: RowKind,
        options: RowOptions,
    ) -> Row {
        self.inner.affinity.debug_assert_same_thread();
        let mut state = self.inner.state.write();
        if !state.sections.contains_key(section.id) {
            stale_section(section);
        }
        let id = state
            .rows
            .insert(RowState::new(section.id, name.into(), kind, options));
        state.sections[section.id].all_rows.push(id);
        Row::new(id)
    }

    // -------------------------------------------------------------------
    // Enablement and order
    // -------------------------------------------------------------------

    /// Enable `row`, recomputing and diffing both projection levels.
    ///
    /// Enabling an already-enabled row is a no-op: the diffs come out
    /// empty and nothing is emitted.
    pub fn enable(&self, row: Row) {
        self.inner.set_enabled(row, true);
    }

    /// Disable `row`, recomputing and diffing both projection levels.
    ///
    /// Disabling the sole enabled row of a section cascades: the section
    /// drops out of the visible projection in the same logical operation.
    pub fn disable(&self, row: Row) {
        self.inner.set_enabled(row, false);
    }

    /// Move `row` `count` positions earlier within its section's full
    /// ordering.
    ///
    /// Silently ignored when `count` would carry the row before index 0
    /// (or when `count` is 0). Reordering among disabled rows can change
    /// which rows are adjacent once visible, so the projection is
    /// recomputed afterwards either way.
    pub fn move_up(&self, row: Row, count: usize) {
        self.inner.move_up(row, count);
    }

    /// Drive `row`'s enabled flag from a boolean stream.
    ///
    /// Each delivered value enables or disables the row (one batch of
    /// list mutations per change). Stream completion disables the row and
    /// releases the subscription; it is not an error. A previous binding
    /// on the same row, if any, is replaced and released.
    ///
    /// Values must be delivered on the UI thread; producers elsewhere
    /// re-dispatch before setting the subject.
    pub fn track_enabled(&self, row: Row, source: &Subject<bool>) {
        self.inner.affinity.debug_assert_same_thread();
        {
            let state = self.inner.state.read();
            if !state.rows.contains_key(row.id) {
                stale_row(row);
            }
        }

        let on_value = {
            let weak = Arc::downgrade(&self.inner);
            move |&enabled: &bool| {
                if let Some(inner) = weak.upgrade() {
                    inner.set_enabled(row, enabled);
                }
            }
        };
        let on_finished = {
            let weak = Arc::downgrade(&self.inner);
            move || {
                if let Some(inner) = weak.upgrade() {
                    inner.release_tracking(row);
                }
            }
        };
        let binding = source.bind(on_value, on_finished);

        let previous = {
            let mut state = self.inner.state.write();
            let row_state = match state.rows.get_mut(row.id) {
                Some(row_state) => row_state,
                None => stale_row(row),
            };
            row_state.enable_binding.replace(binding)
        };
        // Release any replaced stream outside the lock.
        drop(previous);
    }

    /// Drop all rows of `section` and re-evaluate table-level visibility.
    ///
    /// Any enable-tracking bindings of the dropped rows are released. The
    /// section itself survives, empty and disabled.
    pub fn clear_section(&self, section: Section) {
        self.inner.affinity.debug_assert_same_thread();
        let (projection, dropped) = {
            let mut state = self.inner.state.write();
            if !state.sections.contains_key(section.id) {
                stale_section(section);
            }
            let removed = std::mem::take(&mut state.sections[section.id].all_rows);
            let mut dropped = Vec::with_capacity(removed.len());
            for rid in removed {
                if let Some(row_state) = state.rows.remove(rid) {
                    dropped.push(row_state);
                }
            }
            tracing::debug!(
                target: "static_table::data",
                rows = dropped.len(),
                "section cleared"
            );
            (state.project(section.id), dropped)
        };
        self.inner.emit(projection);
        drop(dropped);
    }

    // -------------------------------------------------------------------
    // Header / footer
    // -------------------------------------------------------------------

    /// Replace the section's header text.
    pub fn set_header(&self, section: Section, header: impl Into<TableText>) {
        self.inner.affinity.debug_assert_same_thread();
        let mut state = self.inner.state.write();
        match state.sections.get_mut(section.id) {
            Some(section_state) => section_state.header = header.into(),
            None => stale_section(section),
        }
    }

    /// Replace the section's footer text.
    pub fn set_footer(&self, section: Section, footer: impl Into<TableText>) {
        self.inner.affinity.debug_assert_same_thread();
        let mut state = self.inner.state.write();
        match state.sections.get_mut(section.id) {
            Some(section_state) => section_state.footer = footer.into(),
            None => stale_section(section),
        }
    }

    // -------------------------------------------------------------------
    // Read surface (the shape a list-control data source needs)
    // -------------------------------------------------------------------

    /// Number of visible sections.
    pub fn section_count(&self) -> usize {
        self.inner.state.read().visible_sections.len()
    }

    /// Number of sections created, visible or not.
    pub fn all_section_count(&self) -> usize {
        self.inner.state.read().all_sections.len()
    }

    /// The visible section at `index`.
    ///
    /// # Panics
    ///
    /// Out-of-range indices are caller misuse (the projection is always
    /// current before it can be queried) and panic.
    pub fn section_at(&self, index: usize) -> Section {
        let state = self.inner.state.read();
        match state.visible_sections.get(index) {
            Some(&id) => Section::new(id),
            None => index_fault("section", index, state.visible_sections.len()),
        }
    }

    /// Number of visible rows in the visible section at `section_index`.
    ///
    /// # Panics
    ///
    /// Panics when `section_index` is out of range.
    pub fn row_count(&self, section_index: usize) -> usize {
        let state = self.inner.state.read();
        match state.visible_sections.get(section_index) {
            Some(&id) => state.sections[id].visible_rows.len(),
            None => index_fault("section", section_index, state.visible_sections.len()),
        }
    }

    /// The visible row at `(section_index, row_index)`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn row_at(&self, section_index: usize, row_index: usize) -> Row {
        let state = self.inner.state.read();
        let sid = match state.visible_sections.get(section_index) {
            Some(&id) => id,
            None => index_fault("section", section_index, state.visible_sections.len()),
        };
        let visible = &state.sections[sid].visible_rows;
        match visible.get(row_index) {
            Some(&id) => Row::new(id),
            None => index_fault("row", row_index, visible.len()),
        }
    }

    /// Number of rows created in `section`, enabled or not.
    pub fn all_row_count(&self, section: Section) -> usize {
        let state = self.inner.state.read();
        match state.sections.get(section.id) {
            Some(section_state) => section_state.all_rows.len(),
            None => stale_section(section),
        }
    }

    /// The section's header text.
    pub fn header(&self, section: Section) -> TableText {
        let state = self.inner.state.read();
        match state.sections.get(section.id) {
            Some(section_state) => section_state.header.clone(),
            None => stale_section(section),
        }
    }

    /// The section's footer text.
    pub fn footer(&self, section: Section) -> TableText {
        let state = self.inner.state.read();
        match state.sections.get(section.id) {
            Some(section_state) => section_state.footer.clone(),
            None => stale_section(section),
        }
    }

    /// Whether `section` has at least one enabled row.
    pub fn is_section_enabled(&self, section: Section) -> bool {
        let state = self.inner.state.read();
        match state.sections.get(section.id) {
            Some(section_state) => section_state.is_enabled(),
            None => stale_section(section),
        }
    }

    /// The row's name text.
    pub fn name(&self, row: Row) -> TableText {
        let state = self.inner.state.read();
        match state.rows.get(row.id) {
            Some(row_state) => row_state.name.clone(),
            None => stale_row(row),
        }
    }

    /// The row's display kind.
    pub fn kind(&self, row: Row) -> RowKind {
        let state = self.inner.state.read();
        match state.rows.get(row.id) {
            Some(row_state) => row_state.kind.clone(),
            None => stale_row(row),
        }
    }

    /// The row's behavioral flags.
    pub fn options(&self, row: Row) -> RowOptions {
        let state = self.inner.state.read();
        match state.rows.get(row.id) {
            Some(row_state) => row_state.options,
            None => stale_row(row),
        }
    }

    /// Whether `row` is enabled.
    pub fn is_enabled(&self, row: Row) -> bool {
        let state = self.inner.state.read();
        match state.rows.get(row.id) {
            Some(row_state) => row_state.enabled,
            None => stale_row(row),
        }
    }
}

impl Clone for TableData {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl TableInner {
    fn set_enabled(&self, row: Row, enabled: bool) {
        self.affinity.debug_assert_same_thread();
        let projection = {
            let mut state = self.state.write();
            let row_state = match state.rows.get_mut(row.id) {
                Some(row_state) => row_state,
                None => stale_row(row),
            };
            row_state.enabled = enabled;
            let sid = row_state.section;
            tracing::trace!(
                target: "static_table::data",
                enabled,
                "row flag changed, reprojecting"
            );
            state.project(sid)
        };
        self.emit(projection);
    }

    fn move_up(&self, row: Row, count: usize) {
        self.affinity.debug_assert_same_thread();
        let projection = {
            let mut state = self.state.write();
            let sid = match state.rows.get(row.id) {
                Some(row_state) => row_state.section,
                None => stale_row(row),
            };
            let all = &mut state.sections[sid].all_rows;
            let pos = all
                .iter()
                .position(|&r| r == row.id)
                .expect("row is listed in its owning section");
            if count == 0 || pos < count {
                tracing::trace!(
                    target: "static_table::data",
                    pos,
                    count,
                    "move_up past section start, ignoring"
                );
                return;
            }
            let id = all.remove(pos);
            all.insert(pos - count, id);
            state.project(sid)
        };
        self.emit(projection);
    }

    /// Stream completion handler for enable-tracking: release the binding
    /// and leave the row disabled.
    fn release_tracking(&self, row: Row) {
        let (binding, exists) = {
            let mut state = self.state.write();
            match state.rows.get_mut(row.id) {
                Some(row_state) => (row_state.enable_binding.take(), true),
                None => (None, false),
            }
        };
        drop(binding);
        if exists {
            self.set_enabled(row, false);
        }
    }

    /// Emit the outcome of one projection pass, skipping empty diffs.
    ///
    /// Runs outside the state lock so slots can query the store.
    fn emit(&self, projection: Projection) {
        let Projection {
            section,
            row_diff,
            section_diff,
            mutations,
        } = projection;

        if !row_diff.is_empty() {
            self.signals
                .row_changes
                .emit((Section::new(section), row_diff.map(Row::new)));
        }
        if !section_diff.is_empty() {
            self.signals
                .section_changes
                .emit(section_diff.map(Section::new));
        }
        if !mutations.is_empty() {
            self.signals.updates.emit(mutations);
        }
    }
}

impl TableState {
    /// Recompute both visibility levels after a change inside `sid`, and
    /// translate the diffs into list-control mutations.
    ///
    /// Two sequential, independently computed passes: rows within the
    /// section, then sections within the table. Row-level mutations are
    /// only produced while the section is visible both before and after
    /// the change; when its visibility flips, the section-level mutation
    /// subsumes them (the list control re-reads the section's rows on
    /// section insert).
    fn project(&mut self, sid: SectionId) -> Projection {
        // Row pass.
        let old_rows = self.sections[sid].visible_rows.clone();
        let all_rows = self.sections[sid].all_rows.clone();
        let new_rows: Vec<RowId> = all_rows
            .into_iter()
            .filter(|&r| self.rows[r].enabled)
            .collect();
        let row_diff = diff_keys(&old_rows, &new_rows);
        let was_visible = !old_rows.is_empty();
        self.sections[sid].visible_rows = new_rows;

        // Section pass.
        let old_sections = self.visible_sections.clone();
        let new_sections: Vec<SectionId> = self
            .all_sections
            .iter()
            .copied()
            .filter(|&s| self.sections[s].is_enabled())
            .collect();
        let section_diff = diff_keys(&old_sections, &new_sections);
        self.visible_sections = new_sections;

        // Translation. Removals address the pre-change state, insertions
        // the post-change state. Only this section's visibility can have
        // changed, so when it stays visible its index is stable.
        let mut mutations = Vec::new();
        let now_at = self.visible_sections.iter().position(|&s| s == sid);
        if was_visible {
            if let Some(at) = now_at {
                for removal in &row_diff.removals {
                    mutations.push(ListMutation::DeleteRow {
                        section: at,
                        row: removal.index,
                    });
                }
                for insertion in &row_diff.insertions {
                    mutations.push(ListMutation::InsertRow {
                        section: at,
                        row: insertion.index,
                    });
                }
            }
        }
        for removal in &section_diff.removals {
            mutations.push(ListMutation::DeleteSection {
                index: removal.index,
            });
        }
        for insertion in &section_diff.insertions {
            mutations.push(ListMutation::InsertSection {
                index: insertion.index,
            });
        }

        tracing::trace!(
            target: "static_table::data",
            row_edits = row_diff.len(),
            section_edits = section_diff.len(),
            mutations = mutations.len(),
            "projection recomputed"
        );

        Projection {
            section: sid,
            row_diff,
            section_diff,
            mutations,
        }
    }
}

static_assertions::assert_impl_all!(TableData: Send, Sync, Clone);

#[cold]
#[inline(never)]
fn index_fault(what: &str, index: usize, len: usize) -> ! {
    panic!(
        "{what} index {index} out of range (visible count is {len}); \
         the visible projection is recomputed before it can be queried, \
         so an out-of-range index is caller misuse, not staleness"
    )
}

#[cold]
#[inline(never)]
fn stale_row(row: Row) -> ! {
    panic!("{row:?} does not belong to this table (foreign or cleared handle)")
}

#[cold]
#[inline(never)]
fn stale_section(section: Section) -> ! {
    panic!("{section:?} does not belong to this table (foreign handle)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Captures every emission of the store's three signals.
    struct SignalLog {
        row_changes: Arc<Mutex<Vec<(Section, Diff<Row>)>>>,
        section_changes: Arc<Mutex<Vec<Diff<Section>>>>,
        updates: Arc<Mutex<Vec<Vec<ListMutation>>>>,
    }

    impl SignalLog {
        fn attach(table: &TableData) -> Self {
            let row_changes = Arc::new(Mutex::new(Vec::new()));
            let section_changes = Arc::new(Mutex::new(Vec::new()));
            let updates = Arc::new(Mutex::new(Vec::new()));

            let sink = row_changes.clone();
            table
                .signals()
                .row_changes
                .connect(move |change: &(Section, Diff<Row>)| sink.lock().push(change.clone()));
            let sink = section_changes.clone();
            table
                .signals()
                .section_changes
                .connect(move |diff: &Diff<Section>| sink.lock().push(diff.clone()));
            let sink = updates.clone();
            table
                .signals()
                .updates
                .connect(move |batch: &Vec<ListMutation>| sink.lock().push(batch.clone()));

            Self {
                row_changes,
                section_changes,
                updates,
            }
        }

        fn emission_count(&self) -> usize {
            self.row_changes.lock().len()
                + self.section_changes.lock().len()
                + self.updates.lock().len()
        }

        fn clear(&self) {
            self.row_changes.lock().clear();
            self.section_changes.lock().clear();
            self.updates.lock().clear();
        }
    }

    /// The visible rows of visible section `i`, via the data-source surface.
    fn visible_rows(table: &TableData, section_index: usize) -> Vec<Row> {
        (0..table.row_count(section_index))
            .map(|j| table.row_at(section_index, j))
            .collect()
    }

    #[test]
    fn test_empty_table() {
        let table = TableData::new();
        assert_eq!(table.section_count(), 0);
        assert_eq!(table.all_section_count(), 0);
    }

    #[test]
    fn test_new_section_is_invisible() {
        let table = TableData::new();
        let section = table.create_section("Header", "Footer");

        assert_eq!(table.all_section_count(), 1);
        assert_eq!(table.section_count(), 0);
        assert!(!table.is_section_enabled(section));
    }

    #[test]
    fn test_new_row_starts_disabled() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());

        assert!(!table.is_enabled(row));
        assert_eq!(table.all_row_count(section), 1);
        assert_eq!(table.section_count(), 0);
    }

    #[test]
    fn test_visible_is_filter_of_all_in_order() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let rows: Vec<Row> = (0..5)
            .map(|i| table.create_row(section, format!("R{i}"), RowKind::Text, RowOptions::new()))
            .collect();

        table.enable(rows[1]);
        table.enable(rows[3]);
        table.enable(rows[4]);
        table.disable(rows[3]);

        // visible == all.filter(enabled) in all's order
        assert_eq!(visible_rows(&table, 0), vec![rows[1], rows[4]]);
        for (i, &row) in rows.iter().enumerate() {
            assert_eq!(table.is_enabled(row), i == 1 || i == 4);
        }
    }

    #[test]
    fn test_enable_is_idempotent() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        table.enable(row);

        let log = SignalLog::attach(&table);
        table.enable(row); // already enabled: empty diff, no emissions
        assert_eq!(log.emission_count(), 0);

        table.disable(row);
        log.clear();
        table.disable(row); // already disabled
        assert_eq!(log.emission_count(), 0);
    }

    #[test]
    fn test_row_insertion_within_visible_section() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let r1 = table.create_row(section, "R1", RowKind::Text, RowOptions::new());
        let r2 = table.create_row(section, "R2", RowKind::Text, RowOptions::new());
        table.enable(r1);
        assert_eq!(table.row_count(0), 1);

        let log = SignalLog::attach(&table);
        table.enable(r2);

        assert_eq!(table.row_count(0), 2);
        let row_changes = log.row_changes.lock();
        assert_eq!(row_changes.len(), 1);
        let (changed_section, diff) = &row_changes[0];
        assert_eq!(*changed_section, section);
        assert!(diff.removals.is_empty());
        assert_eq!(diff.insertions.len(), 1);
        assert_eq!(diff.insertions[0].index, 1);
        assert_eq!(diff.insertions[0].key, r2);

        // Section visibility unchanged: the batch is a single row insert.
        let updates = log.updates.lock();
        assert_eq!(
            *updates,
            vec![vec![ListMutation::InsertRow { section: 0, row: 1 }]]
        );
        assert!(log.section_changes.lock().is_empty());
    }

    #[test]
    fn test_section_becomes_visible_on_first_enabled_row() {
        let table = TableData::new();
        let first = table.create_section("First", "");
        let _second = table.create_section("Second", "");
        let row = table.create_row(first, "R", RowKind::Text, RowOptions::new());

        assert_eq!(table.section_count(), 0);

        let log = SignalLog::attach(&table);
        table.enable(row);

        assert_eq!(table.section_count(), 1);
        assert_eq!(table.section_at(0), first);

        let section_changes = log.section_changes.lock();
        assert_eq!(section_changes.len(), 1);
        assert_eq!(section_changes[0].insertions.len(), 1);
        assert_eq!(section_changes[0].insertions[0].index, 0);

        // Row diff is computed and reported too, but the list mutation is
        // the section insert alone: the control re-reads the new section's
        // rows itself.
        assert_eq!(log.row_changes.lock().len(), 1);
        let updates = log.updates.lock();
        assert_eq!(*updates, vec![vec![ListMutation::InsertSection { index: 0 }]]);
    }

    #[test]
    fn test_disabling_last_row_cascades_to_section() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        table.enable(row);
        assert_eq!(table.section_count(), 1);

        let log = SignalLog::attach(&table);
        table.disable(row);

        assert_eq!(table.section_count(), 0);

        // Both passes report, in the same logical operation.
        let row_changes = log.row_changes.lock();
        assert_eq!(row_changes.len(), 1);
        assert_eq!(row_changes[0].1.removals.len(), 1);
        assert_eq!(row_changes[0].1.removals[0].index, 0);

        let section_changes = log.section_changes.lock();
        assert_eq!(section_changes.len(), 1);
        assert_eq!(section_changes[0].removals.len(), 1);
        assert_eq!(section_changes[0].removals[0].index, 0);

        let updates = log.updates.lock();
        assert_eq!(*updates, vec![vec![ListMutation::DeleteSection { index: 0 }]]);
    }

    #[test]
    fn test_reorder_stability() {
        // Rows [A(enabled), B(disabled), C(enabled)]: moving C up by 2
        // gives all-order [C, A, B] and visible-order [C, A]; the diff is
        // exactly one removal plus one insertion, never an update.
        let table = TableData::new();
        let section = table.create_section("S", "");
        let a = table.create_row(section, "A", RowKind::Text, RowOptions::new());
        let b = table.create_row(section, "B", RowKind::Text, RowOptions::new());
        let c = table.create_row(section, "C", RowKind::Text, RowOptions::new());
        table.enable(a);
        table.enable(c);
        assert_eq!(visible_rows(&table, 0), vec![a, c]);

        let log = SignalLog::attach(&table);
        table.move_up(c, 2);

        assert_eq!(visible_rows(&table, 0), vec![c, a]);

        let row_changes = log.row_changes.lock();
        assert_eq!(row_changes.len(), 1);
        let diff = &row_changes[0].1;
        assert_eq!(diff.removals.len(), 1);
        assert_eq!(diff.insertions.len(), 1);
        assert_eq!(diff.removals[0].key, diff.insertions[0].key);
        drop(row_changes);

        // All-order is [C, A, B]: enabling B appends it after A.
        table.enable(b);
        assert_eq!(visible_rows(&table, 0), vec![c, a, b]);
    }

    #[test]
    fn test_move_up_past_start_is_ignored() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let a = table.create_row(section, "A", RowKind::Text, RowOptions::new());
        let b = table.create_row(section, "B", RowKind::Text, RowOptions::new());
        table.enable(a);
        table.enable(b);

        let log = SignalLog::attach(&table);
        table.move_up(a, 1); // already first
        table.move_up(b, 2); // would land before index 0
        table.move_up(b, 0); // no distance

        assert_eq!(log.emission_count(), 0);
        assert_eq!(visible_rows(&table, 0), vec![a, b]);
    }

    #[test]
    fn test_move_up_among_disabled_neighbors() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let a = table.create_row(section, "A", RowKind::Text, RowOptions::new());
        let b = table.create_row(section, "B", RowKind::Text, RowOptions::new());
        let c = table.create_row(section, "C", RowKind::Text, RowOptions::new());
        table.enable(c);

        let log = SignalLog::attach(&table);
        // Only C visible; hopping over the disabled B does not change the
        // visible projection at all.
        table.move_up(c, 1);
        assert_eq!(log.emission_count(), 0);
        assert_eq!(visible_rows(&table, 0), vec![c]);

        // All-order is now [A, C, B]; enabling everything shows it.
        table.enable(a);
        table.enable(b);
        assert_eq!(visible_rows(&table, 0), vec![a, c, b]);
    }

    #[test]
    fn test_multi_section_ordering() {
        let table = TableData::new();
        let s1 = table.create_section("S1", "");
        let s2 = table.create_section("S2", "");
        let s3 = table.create_section("S3", "");
        let r1 = table.create_row(s1, "R1", RowKind::Text, RowOptions::new());
        let r2 = table.create_row(s2, "R2", RowKind::Text, RowOptions::new());
        let r3 = table.create_row(s3, "R3", RowKind::Text, RowOptions::new());

        // Enable out of creation order; visible order follows all-order.
        table.enable(r3);
        table.enable(r1);
        assert_eq!(table.section_count(), 2);
        assert_eq!(table.section_at(0), s1);
        assert_eq!(table.section_at(1), s3);

        let log = SignalLog::attach(&table);
        table.enable(r2);
        assert_eq!(table.section_at(1), s2);

        let section_changes = log.section_changes.lock();
        assert_eq!(section_changes[0].insertions[0].index, 1);
        drop(section_changes);

        // Middle section drops back out at its current index.
        log.clear();
        table.disable(r2);
        let section_changes = log.section_changes.lock();
        assert_eq!(section_changes[0].removals[0].index, 1);
    }

    #[test]
    fn test_clear_section_cascades() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let r1 = table.create_row(section, "R1", RowKind::Text, RowOptions::new());
        let _r2 = table.create_row(section, "R2", RowKind::Text, RowOptions::new());
        table.enable(r1);
        assert_eq!(table.section_count(), 1);

        let log = SignalLog::attach(&table);
        table.clear_section(section);

        assert_eq!(table.section_count(), 0);
        assert_eq!(table.all_row_count(section), 0);
        let updates = log.updates.lock();
        assert_eq!(*updates, vec![vec![ListMutation::DeleteSection { index: 0 }]]);
    }

    #[test]
    fn test_clear_invisible_section_emits_nothing() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let _row = table.create_row(section, "R", RowKind::Text, RowOptions::new());

        let log = SignalLog::attach(&table);
        table.clear_section(section);
        assert_eq!(log.emission_count(), 0);
    }

    #[test]
    fn test_track_enabled_follows_stream() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        let online = Subject::new(false);

        table.track_enabled(row, &online);
        assert!(!table.is_enabled(row));

        online.set(true);
        assert!(table.is_enabled(row));
        assert_eq!(table.section_count(), 1);

        online.set(false);
        assert!(!table.is_enabled(row));
        assert_eq!(table.section_count(), 0);
    }

    #[test]
    fn test_track_enabled_completion_disables_and_releases() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        let online = Subject::new(false);

        table.track_enabled(row, &online);
        online.set(true);
        assert!(table.is_enabled(row));

        online.finish();
        assert!(!table.is_enabled(row));
        // The binding was released: no subscriber remains on either stream.
        assert_eq!(online.changed().connection_count(), 0);
        assert_eq!(online.finished().connection_count(), 0);
    }

    #[test]
    fn test_track_enabled_replaces_previous_binding() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        let first = Subject::new(false);
        let second = Subject::new(false);

        table.track_enabled(row, &first);
        table.track_enabled(row, &second);
        assert_eq!(first.changed().connection_count(), 0);

        first.set(true); // released stream, no effect
        assert!(!table.is_enabled(row));
        second.set(true);
        assert!(table.is_enabled(row));
    }

    #[test]
    fn test_header_footer_text() {
        let table = TableData::new();
        let section = table.create_section("Head", TableText::None);
        assert_eq!(table.header(section).current(), Some("Head".to_string()));
        assert!(table.footer(section).is_none());

        table.set_footer(section, "Foot");
        assert_eq!(table.footer(section).current(), Some("Foot".to_string()));
    }

    #[test]
    fn test_row_metadata_accessors() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(
            section,
            "Delete Account",
            RowKind::Button(Arc::new(|| {})),
            RowOptions::new().with_selectable(true).with_destructive(true),
        );

        assert_eq!(table.name(row).current(), Some("Delete Account".to_string()));
        assert!(matches!(table.kind(row), RowKind::Button(_)));
        let options = table.options(row);
        assert!(options.selectable && options.destructive);
        assert!(!options.copyable);
    }

    #[test]
    #[should_panic(expected = "section index 0 out of range")]
    fn test_section_index_fault() {
        let table = TableData::new();
        table.section_at(0);
    }

    #[test]
    #[should_panic(expected = "row index 1 out of range")]
    fn test_row_index_fault() {
        let table = TableData::new();
        let section = table.create_section("S", "");
        let row = table.create_row(section, "R", RowKind::Text, RowOptions::new());
        table.enable(row);
        table.row_at(0, 1);
    }

    #[test]
    #[should_panic(expected = "does not belong to this table")]
    fn test_foreign_row_handle_fault() {
        let table = TableData::new();
        let other = TableData::new();
        let section = other.create_section("S", "");
        let row = other.create_row(section, "R", RowKind::Text, RowOptions::new());
        table.enable(row);
    }
}
