//! Widget capability.

use crate::context::ParentContext;
use crate::dom::Dom;

/// A component instance with its own mount procedure.
///
/// The materializer delegates to [`init`](Widget::init) wholesale: no
/// property application and no child walk happen for a widget node, the
/// widget owns its subtree.
pub trait Widget<D: Dom> {
    /// Mount the component and hand back its root platform node, or `None`
    /// when it renders nothing. Must be synchronous and side-effect-complete
    /// by return.
    fn init(&mut self, dom: &D, parent_context: Option<&ParentContext>) -> Option<D::Node>;

    /// Receives the parent's context when the widget appears as an element
    /// child, before [`init`](Widget::init) runs. Ignored by default.
    fn attach_context(&mut self, context: ParentContext) {
        let _ = context;
    }
}
