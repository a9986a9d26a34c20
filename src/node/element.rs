//! Element node type.
//!
//! The general element case of the virtual tree: a tag, a property map,
//! ordered children, and the namespace state resolved during
//! materialization.

use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;

use crate::context::ParentContext;
use crate::dom::Dom;
use crate::props::{Hook, PropValue, Props, Style};

use super::{Children, VirtualNode};

/// Element description at one position in the virtual tree.
pub struct VElement<D: Dom> {
    /// Tag name
    pub tag: CompactString,
    /// Pre-declared namespace, if any. SVG resolution may supersede it.
    pub namespace: Option<CompactString>,
    /// Declared properties
    pub props: Props<D>,
    /// Child nodes, in order
    pub children: Children<D>,
    /// Whether the element declares itself as SVG content
    pub is_svg: bool,
    /// Context attached by the parent before recursion
    pub parent_context: Option<ParentContext>,
}

impl<D: Dom> VElement<D> {
    /// Create an element with no properties and no children.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            namespace: None,
            props: Props::default(),
            children: Children::new(),
            is_svg: false,
            parent_context: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builders
    // ─────────────────────────────────────────────────────────────────────────

    /// Pre-declare a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<CompactString>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Declare the element as SVG content.
    pub fn svg(mut self) -> Self {
        self.is_svg = true;
        self
    }

    /// Declare a property.
    pub fn prop(mut self, name: impl Into<CompactString>, value: impl Into<PropValue<D>>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Declare the `style` property.
    pub fn style(self, style: impl Into<Style>) -> Self {
        self.prop("style", PropValue::Style(style.into()))
    }

    /// Declare a hook-valued property.
    pub fn hook(mut self, name: impl Into<CompactString>, hook: impl Hook<D> + 'static) -> Self {
        self.props.insert(name.into(), PropValue::Hook(Rc::new(hook)));
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<VirtualNode<D>>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<CompactString>) -> Self {
        self.child(VirtualNode::text(text))
    }

    /// Set the context handed down to this element's children.
    pub fn context(mut self, context: ParentContext) -> Self {
        self.parent_context = Some(context);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a declared property by name.
    pub fn get_prop(&self, name: &str) -> Option<&PropValue<D>> {
        self.props.get(name)
    }

    /// Whether a property is declared.
    pub fn has_prop(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text<D: Dom>(children: &[VirtualNode<D>], out: &mut String) {
    for child in children {
        match child {
            VirtualNode::Text(text) => out.push_str(&text.text),
            VirtualNode::Element(element) => collect_text(&element.children, out),
            VirtualNode::Fragment(nested) => collect_text(nested, out),
            _ => {}
        }
    }
}

impl<D: Dom> fmt::Debug for VElement<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VElement")
            .field("tag", &self.tag)
            .field("namespace", &self.namespace)
            .field("props", &self.props)
            .field("children", &self.children)
            .field("is_svg", &self.is_svg)
            .finish_non_exhaustive()
    }
}
