//! Opaque component context.
//!
//! The materializer attaches a [`ParentContext`] to widget and element
//! children before recursing, and threads the caller-provided context down
//! the call tree unchanged. The payload is never read by this crate.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque context handed from a parent component to its children.
///
/// Cheap to clone; the payload is shared.
#[derive(Clone)]
pub struct ParentContext(Rc<dyn Any>);

impl ParentContext {
    /// Wrap a payload.
    pub fn new<T: Any>(payload: T) -> Self {
        Self(Rc::new(payload))
    }

    /// Context with no payload. Attached to children whose parent carries
    /// none.
    pub fn empty() -> Self {
        Self(Rc::new(()))
    }

    /// Borrow the payload if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Whether this is the payload-free context.
    pub fn is_empty(&self) -> bool {
        self.0.downcast_ref::<()>().is_some()
    }
}

impl Default for ParentContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ParentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ParentContext(empty)")
        } else {
            f.write_str("ParentContext(..)")
        }
    }
}
