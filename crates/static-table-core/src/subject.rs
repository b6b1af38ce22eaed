//! Subjects: shared reactive values with change and completion streams.
//!
//! A [`Subject<T>`] bundles a [`Property`] with two [`Signal`]s: `changed`,
//! emitted whenever the value actually changes, and `finished`, emitted at
//! most once when the producer declares the stream over. Subjects are the
//! value handles the table model binds to: toggle state, text-field
//! contents, picker selection, and row enablement all travel through them.
//!
//! Completion is not an error. After [`finish`](Subject::finish), the last
//! value stays readable, further `set` calls are ignored, and observers are
//! expected to release their bindings.
//!
//! # Example
//!
//! ```
//! use static_table_core::Subject;
//!
//! let name = Subject::new("initial".to_string());
//! let conn = name.subscribe(|value| println!("name is now {value}"));
//!
//! name.set("updated".to_string()); // slot runs
//! name.set("updated".to_string()); // no change, slot does not run
//!
//! name.changed().disconnect(conn);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::property::Property;
use crate::signal::{ConnectionId, Signal};

/// A cheaply clonable reactive value.
///
/// All clones share the same value and the same subscriber lists. Values
/// are delivered synchronously on the thread that calls [`set`]; producers
/// on other threads must re-dispatch to the UI thread before driving
/// table-bound subjects.
///
/// [`set`]: Subject::set
pub struct Subject<T> {
    inner: Arc<SubjectInner<T>>,
}

struct SubjectInner<T> {
    value: Property<T>,
    changed: Signal<T>,
    finished: Signal<()>,
    is_finished: AtomicBool,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Subject<T> {
    /// Create a new subject with an initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(SubjectInner {
                value: Property::new(initial),
                changed: Signal::new(),
                finished: Signal::new(),
                is_finished: AtomicBool::new(false),
            }),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    /// Set the value, emitting `changed` if it differs from the current
    /// one.
    ///
    /// Returns `true` if the value changed. Calls after [`finish`] are
    /// ignored and return `false`.
    ///
    /// [`finish`]: Subject::finish
    pub fn set(&self, value: T) -> bool {
        if self.is_finished() {
            tracing::trace!(
                target: "static_table_core::subject",
                "ignoring set on finished subject"
            );
            return false;
        }
        if self.inner.value.set(value.clone()) {
            self.inner.changed.emit(value);
            true
        } else {
            false
        }
    }

    /// Subscribe to value changes.
    ///
    /// The slot runs for every delivered change, not for the current value;
    /// read [`get`](Subject::get) first when binding a display.
    pub fn subscribe<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.inner.changed.connect(slot)
    }

    /// Subscribe to value changes and stream completion through one
    /// releasable binding.
    ///
    /// Dropping the returned [`SubjectBinding`] disconnects both slots.
    /// This is the "acquire on bind, release unconditionally on reuse"
    /// contract the rendering layer and the table's enable-tracking follow.
    pub fn bind<F, G>(&self, on_value: F, on_finished: G) -> SubjectBinding<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
        G: Fn() + Send + Sync + 'static,
    {
        SubjectBinding {
            subject: self.clone(),
            value_conn: self.inner.changed.connect(on_value),
            finished_conn: self.inner.finished.connect(move |_| on_finished()),
        }
    }

    /// The change signal itself, for manual connection management.
    pub fn changed(&self) -> &Signal<T> {
        &self.inner.changed
    }

    /// The completion signal.
    pub fn finished(&self) -> &Signal<()> {
        &self.inner.finished
    }

    /// Declare the stream over.
    ///
    /// Emits `finished` exactly once; repeat calls do nothing. The last
    /// value stays in place and remains readable.
    pub fn finish(&self) {
        if !self.inner.is_finished.swap(true, Ordering::SeqCst) {
            self.inner.finished.emit(());
        }
    }

    /// Whether the stream has completed.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished.load(Ordering::SeqCst)
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + fmt::Debug + 'static> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("value", &self.get())
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// A two-slot subscription (value + completion) released on drop.
///
/// Holds a clone of the subject, so the subscription stays valid for the
/// binding's whole lifetime regardless of what the producer does.
pub struct SubjectBinding<T> {
    subject: Subject<T>,
    value_conn: ConnectionId,
    finished_conn: ConnectionId,
}

impl<T> SubjectBinding<T> {
    /// The subject this binding observes.
    pub fn subject(&self) -> &Subject<T> {
        &self.subject
    }
}

impl<T> Drop for SubjectBinding<T> {
    fn drop(&mut self) {
        self.subject.inner.changed.disconnect(self.value_conn);
        self.subject.inner.finished.disconnect(self.finished_conn);
    }
}

static_assertions::assert_impl_all!(Subject<bool>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SubjectBinding<bool>: Send, Sync);
