//! Process-wide diagnostic sink registration.
//!
//! Holds a non-owning reference: the caller keeps the sink alive, and a sink
//! dropped while registered reads back as unregistered. Registration is
//! last-writer-wins; set it once per process or request scope.

use crate::diagnostic::DiagnosticSink;
use std::sync::{Arc, PoisonError, RwLock, Weak};

static REGISTERED_SINK: RwLock<Option<Weak<dyn DiagnosticSink>>> = RwLock::new(None);

/// Register `sink` for non-fatal delivery, or clear the registration with `None`.
pub fn set_diagnostic_sink(sink: Option<&Arc<dyn DiagnosticSink>>) {
    let weak = sink.map(Arc::downgrade);
    replace(weak);
}

/// The registered sink, if one is registered and still alive.
#[must_use]
pub fn registered_sink() -> Option<Arc<dyn DiagnosticSink>> {
    REGISTERED_SINK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .and_then(Weak::upgrade)
}

/// Run a closure with `sink` registered, restoring the previous
/// registration afterwards (including on unwind).
pub fn with_diagnostic_sink<T>(sink: &Arc<dyn DiagnosticSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Weak<dyn DiagnosticSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            replace(self.0.take());
        }
    }

    let previous = replace(Some(Arc::downgrade(sink)));
    let _guard = Guard(previous);

    f()
}

fn replace(next: Option<Weak<dyn DiagnosticSink>>) -> Option<Weak<dyn DiagnosticSink>> {
    let mut slot = REGISTERED_SINK
        .write()
        .unwrap_or_else(PoisonError::into_inner);

    std::mem::replace(&mut *slot, next)
}
