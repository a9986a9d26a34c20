//! vdom-mount - Host-agnostic Virtual DOM Materialization
//!
//! ## Core Concepts
//!
//! **Materialization**: a [`VirtualNode`] tree goes in, one platform node
//! per virtual node comes out, assembled bottom-up through the host's
//! [`Dom`] capability surface. Namespace state (SVG vs plain markup) and an
//! opaque parent context are threaded down the recursion.
//!
//! **Property application**: each declared property is applied under a
//! fixed precedence policy (hooks, style, object values, the non-SVG
//! primitive fast path, attribute fallback). A bad property never aborts
//! its node or its siblings; failures are logged and contained per key.
//!
//! ## Modules
//! - `mount`: the materializer
//! - `apply`: the property applier
//! - `node`: virtual node types (`VirtualNode`, `VElement`, `VText`, `Widget`)
//! - `props`: property values (`PropValue`, `Style`, `ObjectValue`, `Hook`)
//! - `dom`: host capability trait
//! - `memory`: in-memory reference host
//! - `config`: materialization options
//! - `context`: opaque parent context
//! - `error`: host write errors
//!
//! ## Usage
//!
//! ```ignore
//! use vdom_mount::prelude::*;
//!
//! let dom = MemoryDom::new();
//! let tree = VElement::new("div")
//!     .prop("className", "greeting")
//!     .style(Style::rules().set("color", "blue"))
//!     .text("hello");
//!
//! let node = mount(&dom, &MountConfig::default(), tree.into()).unwrap();
//! assert_eq!(dom.to_html(node), r#"<div style="color: blue">hello</div>"#);
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Property application
pub mod apply;

/// Materialization options
pub mod config;

/// Opaque parent context
pub mod context;

/// Host capability surface
pub mod dom;

/// Error types
pub mod error;

/// In-memory reference host
pub mod memory;

/// Materialization
pub mod mount;

/// Virtual node types
pub mod node;

/// Property values and the property map
pub mod props;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Entry points
pub use apply::apply_properties;
pub use mount::{materialize, mount};

// Configuration and context
pub use config::MountConfig;
pub use context::ParentContext;

// Host surface
pub use dom::{Dom, PropWrite, SVG_NAMESPACE};

// Node types
pub use node::{Children, VElement, VText, VirtualNode, Widget};

// Property values
pub use props::{Callback, Hook, ObjectValue, PropValue, Props, Style, StyleRules};

// Reference host
pub use memory::{MemoryDom, NodeId, NodeKind, SlotValue};

// Error types
pub use error::{DomError, DomResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_div() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div")
            .prop("className", "a")
            .style(Style::rules().set("color", "blue"))
            .child("hi")
            .child(VirtualNode::Empty)
            .child(VElement::new("span"));

        let node = mount(&dom, &MountConfig::default(), tree.into()).expect("root");

        assert_eq!(dom.tag(node).as_deref(), Some("div"));
        assert_eq!(
            dom.slot(node, "className").and_then(|s| s.as_str().map(String::from)),
            Some("a".to_string())
        );
        assert_eq!(dom.style_value(node, "color").as_deref(), Some("blue"));

        let children = dom.children(node);
        assert_eq!(children.len(), 2);
        assert_eq!(dom.kind(children[0]), NodeKind::Text);
        assert_eq!(dom.text(children[0]).as_deref(), Some("hi"));
        assert_eq!(dom.tag(children[1]).as_deref(), Some("span"));
        assert_eq!(dom.child_count(children[1]), 0);

        assert_eq!(
            dom.to_html(node),
            "<div style=\"color: blue\">hi<span></span></div>"
        );
    }

    #[test]
    fn test_end_to_end_svg_document() {
        let dom = MemoryDom::new();
        let tree = VElement::new("svg")
            .prop("viewBox", "0 0 10 10")
            .child(
                VElement::new("rect")
                    .prop("width", 4i64)
                    .prop("height", 4i64),
            );

        let node = mount(&dom, &MountConfig::default(), tree.into()).expect("root");

        assert_eq!(dom.namespace(node).as_deref(), Some(SVG_NAMESPACE));
        // SVG mode routes everything through attributes
        assert_eq!(dom.attr(node, "viewBox").as_deref(), Some("0 0 10 10"));
        let rect = dom.children(node)[0];
        assert_eq!(dom.attr(rect, "width").as_deref(), Some("4"));
        assert_eq!(dom.attr(rect, "height").as_deref(), Some("4"));
    }

    #[test]
    fn test_update_path_reapplies_to_existing_node() {
        let dom = MemoryDom::new();
        let tree: VElement<MemoryDom> = VElement::new("input").prop("value", "draft");
        let node = mount(&dom, &MountConfig::default(), tree.into()).expect("root");

        let mut update: Props<MemoryDom> = Props::default();
        update.insert("value".into(), PropValue::Null);
        apply_properties(&dom, &node, &update, false);

        assert_eq!(
            dom.slot(node, "value").and_then(|s| s.as_str().map(String::from)),
            Some(String::new())
        );
        assert!(dom.attr(node, "value").is_none());
    }
}
