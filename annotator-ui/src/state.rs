use dioxus::prelude::{ReadableExt, Signal, WritableExt};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, single-threaded handle to a piece of component state.
///
/// The async drivers hold one of these across the network await so that the
/// same code runs against a Dioxus `Signal` in the browser and an
/// `Rc<RefCell<_>>` in native tests. Closures must not re-enter the cell.
pub trait StateCell<T>: Clone + 'static {
    fn with_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;

    /// Read without notifying subscribers.
    fn peek_state<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T: 'static> StateCell<T> for Rc<RefCell<T>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn peek_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.borrow())
    }
}

impl<T: 'static> StateCell<T> for Signal<T> {
    fn with_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = *self;
        let mut guard = signal.write();
        f(&mut *guard)
    }

    fn peek_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.peek())
    }
}
