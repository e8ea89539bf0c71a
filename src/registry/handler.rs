//! Handlers
//!
//! A [`Handler`] is a shared callback. Identity is the allocation behind it:
//! cloning a handler yields the same handler, while wrapping the same closure
//! twice yields two distinct handlers. Unsubscribing therefore needs a clone of
//! the handler that was subscribed.

use std::sync::Arc;

/// Error type handlers may return
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single handler invocation
pub type HandlerResult = std::result::Result<(), HandlerError>;

type HandlerFn<P> = dyn Fn(&P) -> HandlerResult + Send + Sync;

/// Callback registered on a channel
pub struct Handler<P> {
    func: Arc<HandlerFn<P>>,
}

impl<P> Handler<P> {
    /// Wrap a callback that cannot fail
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(move |payload: &P| {
                f(payload);
                Ok(())
            }),
        }
    }

    /// Wrap a callback that reports failure through its return value
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        Self { func: Arc::new(f) }
    }

    /// Invoke the callback
    #[inline]
    pub fn call(&self, payload: &P) -> HandlerResult {
        (self.func)(payload)
    }

    /// Check whether two handles refer to the same handler
    #[inline]
    pub fn same_as(&self, other: &Handler<P>) -> bool {
        // Compare data pointers only; vtable pointers may differ across codegen units.
        std::ptr::eq(
            Arc::as_ptr(&self.func) as *const (),
            Arc::as_ptr(&other.func) as *const (),
        )
    }

    /// Opaque identity, stable for the lifetime of the handler
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.func) as *const () as usize
    }
}

// Manual impl: derive would require P: Clone.
impl<P> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<P> PartialEq for Handler<P> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<P> Eq for Handler<P> {}

impl<P> std::fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("id", &format_args!("{:#x}", self.id()))
            .finish()
    }
}
