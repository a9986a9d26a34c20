//! Host platform capability surface.
//!
//! The [`Dom`] trait is everything the materializer and property applier
//! know about a rendering host: node factories, tree assembly, and the
//! property/attribute write surface. Node handles are owned by the host and
//! are inert on their own; every operation goes through the `Dom` value.

use crate::error::DomResult;
use crate::props::{Callback, ObjectValue};

/// Namespace URI applied to SVG subtrees.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Borrowed value crossing into a host property slot.
#[derive(Debug, Clone, Copy)]
pub enum PropWrite<'a> {
    /// Text value. Null-ish property values arrive coerced to `""`.
    Str(&'a str),
    /// Numeric value
    Num(f64),
    /// Boolean value
    Bool(bool),
    /// Structured value
    Object(&'a ObjectValue),
    /// Bare function value
    Func(&'a Callback),
}

/// Node-creation and node-mutation capabilities of a rendering host.
///
/// All operations are synchronous. Creation and tree assembly always
/// succeed; only property and style writes are fallible, and callers
/// contain those failures per key.
pub trait Dom: Sized {
    /// Cheap handle to a host node.
    type Node: Clone;

    /// Create a plain element.
    fn create_element(&self, tag: &str) -> Self::Node;

    /// Create an element under `namespace`. Only invoked when
    /// [`supports_namespaces`](Self::supports_namespaces) returns true.
    fn create_element_ns(&self, namespace: &str, tag: &str) -> Self::Node;

    /// Create a text node.
    fn create_text(&self, text: &str) -> Self::Node;

    /// Create a comment node.
    fn create_comment(&self, text: &str) -> Self::Node;

    /// Create an empty fragment container.
    fn create_fragment(&self) -> Self::Node;

    /// Whether namespaced element creation is available. Hosts answering
    /// false force every subtree into plain markup.
    fn supports_namespaces(&self) -> bool {
        true
    }

    /// Whether `parent` can hold child nodes.
    fn accepts_children(&self, parent: &Self::Node) -> bool;

    /// Append `child` at the end of `parent`'s child list. Appending a
    /// fragment moves the fragment's children.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Whether `node` exposes a property slot named `name`.
    fn has_property(&self, node: &Self::Node, name: &str) -> bool;

    /// Write a value into the `name` slot.
    fn set_property(&self, node: &Self::Node, name: &str, value: PropWrite<'_>) -> DomResult<()>;

    /// Write one declaration into the node's style store.
    fn set_style(&self, node: &Self::Node, key: &str, value: &str) -> DomResult<()>;

    /// Set a literal attribute.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Observational side channel for inspection tooling. Never read back
    /// by this crate; hosts may ignore it.
    fn stash_debug_props(&self, node: &Self::Node, rendition: String) {
        let _ = (node, rendition);
    }
}
