//! Deferred delivery of list mutations to an attachable display surface.
//!
//! List controls reject or silently drop incremental updates while they
//! have no active display surface. [`UpdateScheduler`] wraps the surface
//! in a two-state machine: while **attached** every mutation passes
//! through synchronously, while **detached** every mutation collapses
//! into a single pending-reload flag that is flushed as one
//! [`ListSurface::reload_all`] on re-attachment. No operation queue, no
//! replay of individual edits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use static_table_core::{ConnectionGuard, Signal};

use crate::data::TableData;

/// One structural edit of the displayed list.
///
/// Indices follow batch-update addressing: deletions name positions in
/// the list as it was before the batch, insertions name positions in the
/// list as it is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMutation {
    InsertRow { section: usize, row: usize },
    DeleteRow { section: usize, row: usize },
    ReloadRow { section: usize, row: usize },
    MoveRow {
        from_section: usize,
        from_row: usize,
        to_section: usize,
        to_row: usize,
    },
    InsertSection { index: usize },
    DeleteSection { index: usize },
    ReloadSection { index: usize },
    MoveSection { from: usize, to: usize },
}

/// The list control the scheduler drives.
///
/// Implementations translate each call into the host toolkit's list API.
/// `begin_updates`/`end_updates` bracket multi-edit batches and default
/// to no-ops for surfaces without batch animation.
pub trait ListSurface: Send + Sync {
    /// Discard all display state and re-read the whole model.
    fn reload_all(&self);

    fn insert_row(&self, section: usize, row: usize);
    fn delete_row(&self, section: usize, row: usize);
    fn reload_row(&self, section: usize, row: usize);
    fn move_row(&self, from_section: usize, from_row: usize, to_section: usize, to_row: usize);

    fn insert_section(&self, index: usize);
    fn delete_section(&self, index: usize);
    fn reload_section(&self, index: usize);
    fn move_section(&self, from: usize, to: usize);

    fn begin_updates(&self) {}
    fn end_updates(&self) {}
}

/// Two-state mutation gate in front of a [`ListSurface`].
///
/// Starts **detached**. A scheduler is typically [`bind`]-ed to a
/// [`TableData`] so the store's mutation batches flow through it, and
/// attachment follows the surface's on-screen lifecycle.
///
/// [`bind`]: UpdateScheduler::bind
pub struct UpdateScheduler<S: ListSurface> {
    surface: S,
    attached: AtomicBool,
    pending_reload: AtomicBool,
}

impl<S: ListSurface> UpdateScheduler<S> {
    /// Wrap `surface`, starting in the detached state.
    pub fn new(surface: S) -> Arc<Self> {
        Arc::new(Self {
            surface,
            attached: AtomicBool::new(false),
            pending_reload: AtomicBool::new(false),
        })
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Whether a mutation arrived while detached and awaits the flush.
    pub fn has_pending_reload(&self) -> bool {
        self.pending_reload.load(Ordering::SeqCst)
    }

    /// Record the surface's display state.
    ///
    /// A detached-to-attached transition flushes the pending reload, if
    /// any, as exactly one `reload_all`. Attaching with nothing pending
    /// does not reload. Repeated calls with the same state do nothing.
    pub fn set_attached(&self, attached: bool) {
        let was = self.attached.swap(attached, Ordering::SeqCst);
        if attached && !was && self.pending_reload.swap(false, Ordering::SeqCst) {
            tracing::debug!(
                target: "static_table::scheduler",
                "reattached with pending changes, reloading"
            );
            self.surface.reload_all();
        }
    }

    /// Request a full reload.
    pub fn request_reload(&self) {
        if self.gate() {
            self.surface.reload_all();
        }
    }

    /// Submit one mutation.
    pub fn apply_one(&self, mutation: ListMutation) {
        if self.gate() {
            self.dispatch(mutation);
        }
    }

    /// Submit one batch of mutations.
    ///
    /// Attachment is sampled once for the whole batch. Batches of more
    /// than one edit are bracketed in `begin_updates`/`end_updates` so
    /// their index addressing resolves against a single snapshot.
    pub fn apply(&self, batch: &[ListMutation]) {
        if batch.is_empty() || !self.gate() {
            return;
        }
        if batch.len() > 1 {
            self.surface.begin_updates();
        }
        for &mutation in batch {
            self.dispatch(mutation);
        }
        if batch.len() > 1 {
            self.surface.end_updates();
        }
    }

    /// Route the store's mutation batches through this scheduler.
    ///
    /// The returned guard holds the connection; dropping it unbinds. The
    /// guard must not outlive `table`.
    pub fn bind(self: &Arc<Self>, table: &TableData) -> ConnectionGuard<Vec<ListMutation>>
    where
        S: 'static,
    {
        let weak: Weak<Self> = Arc::downgrade(self);
        table.signals().updates.connect_scoped(move |batch| {
            if let Some(scheduler) = weak.upgrade() {
                scheduler.apply(batch);
            }
        })
    }

    /// Follow an attachment signal (true when the surface goes on
    /// screen, false when it leaves).
    ///
    /// The returned guard must not outlive the signal's owner.
    pub fn watch_attachment(self: &Arc<Self>, signal: &Signal<bool>) -> ConnectionGuard<bool>
    where
        S: 'static,
    {
        let weak: Weak<Self> = Arc::downgrade(self);
        signal.connect_scoped(move |&attached| {
            if let Some(scheduler) = weak.upgrade() {
                scheduler.set_attached(attached);
            }
        })
    }

    /// True when mutations may pass through. Otherwise swallows the
    /// request into the pending-reload flag.
    fn gate(&self) -> bool {
        if self.is_attached() {
            true
        } else {
            tracing::trace!(
                target: "static_table::scheduler",
                "detached, deferring to a single reload"
            );
            self.pending_reload.store(true, Ordering::SeqCst);
            false
        }
    }

    fn dispatch(&self, mutation: ListMutation) {
        match mutation {
            ListMutation::InsertRow { section, row } => self.surface.insert_row(section, row),
            ListMutation::DeleteRow { section, row } => self.surface.delete_row(section, row),
            ListMutation::ReloadRow { section, row } => self.surface.reload_row(section, row),
            ListMutation::MoveRow {
                from_section,
                from_row,
                to_section,
                to_row,
            } => self
                .surface
                .move_row(from_section, from_row, to_section, to_row),
            ListMutation::InsertSection { index } => self.surface.insert_section(index),
            ListMutation::DeleteSection { index } => self.surface.delete_section(index),
            ListMutation::ReloadSection { index } => self.surface.reload_section(index),
            ListMutation::MoveSection { from, to } => self.surface.move_section(from, to),
        }
    }
}
