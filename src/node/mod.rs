//! Virtual node types.
//!
//! [`VirtualNode`] is the closed sum type the materializer dispatches over.
//! Variant order mirrors the dispatch precedence: widgets win outright, then
//! text, then the placeholder case, then elements and fragments.

mod element;
mod text;
mod widget;

pub use element::VElement;
pub use text::VText;
pub use widget::Widget;

use std::fmt;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::context::ParentContext;
use crate::dom::Dom;

/// Type alias for an element's children collection.
pub type Children<D> = SmallVec<[VirtualNode<D>; 8]>;

/// One position in a virtual UI tree.
pub enum VirtualNode<D: Dom> {
    /// Component instance; mounts through its own [`Widget::init`].
    Widget(Box<dyn Widget<D>>),
    /// Text content.
    Text(VText),
    /// Absent content. Materializes to a placeholder comment at the root of
    /// a materialize call and is skipped as a child.
    Empty,
    /// Element with properties and children.
    Element(Box<VElement<D>>),
    /// Sibling group without a wrapping element.
    Fragment(Vec<VirtualNode<D>>),
}

impl<D: Dom> VirtualNode<D> {
    /// Text node.
    pub fn text(text: impl Into<CompactString>) -> Self {
        Self::Text(VText::new(text))
    }

    /// Widget node.
    pub fn widget(widget: impl Widget<D> + 'static) -> Self {
        Self::Widget(Box::new(widget))
    }

    /// Fragment node.
    pub fn fragment(children: impl IntoIterator<Item = VirtualNode<D>>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// Check if this is a widget node.
    #[inline]
    pub fn is_widget(&self) -> bool {
        matches!(self, Self::Widget(_))
    }

    /// Check if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Check if this is the absent-content case.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Check if this is a fragment.
    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self, Self::Fragment(_))
    }

    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&VElement<D>> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut VElement<D>> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get as text reference.
    #[inline]
    pub fn as_text(&self) -> Option<&VText> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Hand a parent's context to this node. Widgets receive it through
    /// [`Widget::attach_context`], elements store it; other variants ignore
    /// it.
    pub(crate) fn attach_context(&mut self, context: ParentContext) {
        match self {
            Self::Widget(widget) => widget.attach_context(context),
            Self::Element(element) => element.parent_context = Some(context),
            _ => {}
        }
    }
}

impl<D: Dom> fmt::Debug for VirtualNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(_) => f.write_str("Widget(..)"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Empty => f.write_str("Empty"),
            Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
        }
    }
}

impl<D: Dom> From<VElement<D>> for VirtualNode<D> {
    fn from(element: VElement<D>) -> Self {
        Self::Element(Box::new(element))
    }
}

impl<D: Dom> From<VText> for VirtualNode<D> {
    fn from(text: VText) -> Self {
        Self::Text(text)
    }
}

impl<D: Dom> From<&str> for VirtualNode<D> {
    fn from(text: &str) -> Self {
        Self::Text(VText::new(text))
    }
}

impl<D: Dom> From<String> for VirtualNode<D> {
    fn from(text: String) -> Self {
        Self::Text(VText::new(text))
    }
}

impl<D: Dom> From<CompactString> for VirtualNode<D> {
    fn from(text: CompactString) -> Self {
        Self::Text(VText::new(text))
    }
}

impl<D: Dom> From<f64> for VirtualNode<D> {
    fn from(value: f64) -> Self {
        Self::Text(VText::number(value))
    }
}

impl<D: Dom> From<i64> for VirtualNode<D> {
    fn from(value: i64) -> Self {
        Self::Text(VText::number(value as f64))
    }
}

impl<D: Dom> From<i32> for VirtualNode<D> {
    fn from(value: i32) -> Self {
        Self::Text(VText::number(value.into()))
    }
}

/// `None` maps to the absent-content case.
impl<D: Dom, T: Into<VirtualNode<D>>> From<Option<T>> for VirtualNode<D> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(node) => node.into(),
            None => Self::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    type Node = VirtualNode<MemoryDom>;

    #[test]
    fn test_from_conversions() {
        assert!(Node::from("hi").is_text());
        assert!(Node::from(5i64).is_text());
        assert_eq!(Node::from(5i64).as_text().map(|t| t.text.as_str()), Some("5"));
        assert!(Node::from(None::<VText>).is_empty());
        assert!(Node::from(Some(VText::new("x"))).is_text());
        assert!(Node::from(VElement::new("div")).is_element());
    }

    #[test]
    fn test_attach_context_targets() {
        let mut element = Node::from(VElement::new("div"));
        element.attach_context(ParentContext::new(1u8));
        assert!(element.as_element().unwrap().parent_context.is_some());

        let mut text = Node::from("hi");
        text.attach_context(ParentContext::empty());
        assert!(text.is_text());
    }

    #[test]
    fn test_fragment_constructor() {
        let frag = Node::fragment(["a".into(), Node::Empty, VElement::new("b").into()]);
        match frag {
            Node::Fragment(children) => assert_eq!(children.len(), 3),
            _ => panic!("expected fragment"),
        }
    }
}
