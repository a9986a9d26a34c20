//! In-memory reference host.
//!
//! A complete [`Dom`] implementation over an id-addressed node arena, used
//! for server-side rendering and as the test host. Elements expose a fixed
//! property-slot surface mirroring a browser element object: a set of
//! writable slots, a set of present-but-read-only slots (writes to those
//! fail), and any slot a previous write created.

use compact_str::CompactString;
use parking_lot::RwLock;

use crate::dom::{Dom, PropWrite};
use crate::error::{DomError, DomResult};
use crate::props::{Callback, ObjectValue};

/// Property slots every element exposes for writing.
const WRITABLE_SLOTS: &[&str] = &[
    "className",
    "id",
    "title",
    "lang",
    "dir",
    "hidden",
    "tabIndex",
    "value",
    "checked",
    "disabled",
    "htmlFor",
    "type",
    "list",
    "onclick",
    "oninput",
    "onchange",
];

/// Present on every element but not writable.
const READ_ONLY_SLOTS: &[&str] = &["tagName", "nodeName", "namespaceURI", "nodeType"];

/// Handle to a node in a [`MemoryDom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Kind of a materialized node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Fragment,
}

/// Value stored in an element's property slot.
#[derive(Debug, Clone)]
pub enum SlotValue {
    Str(CompactString),
    Num(f64),
    Bool(bool),
    Object(ObjectValue),
    Func(Callback),
}

impl SlotValue {
    /// Text payload, if this is a text slot.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric payload, if any.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Whether the slot holds a function.
    pub fn is_func(&self) -> bool {
        matches!(self, Self::Func(_))
    }
}

impl From<PropWrite<'_>> for SlotValue {
    fn from(value: PropWrite<'_>) -> Self {
        match value {
            PropWrite::Str(text) => Self::Str(text.into()),
            PropWrite::Num(number) => Self::Num(number),
            PropWrite::Bool(flag) => Self::Bool(flag),
            PropWrite::Object(object) => Self::Object(object.clone()),
            PropWrite::Func(callback) => Self::Func(callback.clone()),
        }
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: CompactString,
    namespace: Option<CompactString>,
    attrs: Vec<(CompactString, CompactString)>,
    style: Vec<(CompactString, CompactString)>,
    slots: Vec<(CompactString, SlotValue)>,
    children: Vec<NodeId>,
    debug_props: Option<String>,
}

impl ElementData {
    fn new(tag: &str, namespace: Option<&str>) -> Self {
        Self {
            tag: tag.into(),
            namespace: namespace.map(Into::into),
            attrs: Vec::new(),
            style: Vec::new(),
            slots: Vec::new(),
            children: Vec::new(),
            debug_props: None,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(ElementData),
    Text(CompactString),
    Comment(CompactString),
    Fragment(Vec<NodeId>),
}

/// Arena-backed node store implementing [`Dom`].
pub struct MemoryDom {
    nodes: RwLock<Vec<NodeData>>,
    namespaced: bool,
}

impl MemoryDom {
    /// Host with namespaced element creation available.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
            namespaced: true,
        }
    }

    /// Host without namespaced element creation.
    pub fn without_namespaces() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
            namespaced: false,
        }
    }

    fn push(&self, data: NodeData) -> NodeId {
        let mut nodes = self.nodes.write();
        nodes.push(data);
        NodeId(nodes.len() - 1)
    }

    fn read_element<R>(&self, node: NodeId, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        match &self.nodes.read()[node.0] {
            NodeData::Element(element) => Some(f(element)),
            _ => None,
        }
    }

    fn write_element<R>(&self, node: NodeId, f: impl FnOnce(&mut ElementData) -> R) -> Option<R> {
        match &mut self.nodes.write()[node.0] {
            NodeData::Element(element) => Some(f(element)),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Kind of `node`.
    pub fn kind(&self, node: NodeId) -> NodeKind {
        match &self.nodes.read()[node.0] {
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::Fragment(_) => NodeKind::Fragment,
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self, node: NodeId) -> Option<CompactString> {
        self.read_element(node, |element| element.tag.clone())
    }

    /// Namespace an element was created under.
    pub fn namespace(&self, node: NodeId) -> Option<CompactString> {
        self.read_element(node, |element| element.namespace.clone())
            .flatten()
    }

    /// Attribute value by name.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<CompactString> {
        self.read_element(node, |element| {
            element
                .attrs
                .iter()
                .find(|(k, _)| k.as_str() == name)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    /// Whether an attribute is present.
    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Style declaration by key.
    pub fn style_value(&self, node: NodeId, key: &str) -> Option<CompactString> {
        self.read_element(node, |element| {
            element
                .style
                .iter()
                .find(|(k, _)| k.as_str() == key)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    /// Property slot contents by name.
    pub fn slot(&self, node: NodeId, name: &str) -> Option<SlotValue> {
        self.read_element(node, |element| {
            element
                .slots
                .iter()
                .find(|(k, _)| k.as_str() == name)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    /// Child handles of an element or fragment, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        match &self.nodes.read()[node.0] {
            NodeData::Element(element) => element.children.clone(),
            NodeData::Fragment(children) => children.clone(),
            _ => Vec::new(),
        }
    }

    /// Number of children of an element or fragment.
    pub fn child_count(&self, node: NodeId) -> usize {
        match &self.nodes.read()[node.0] {
            NodeData::Element(element) => element.children.len(),
            NodeData::Fragment(children) => children.len(),
            _ => 0,
        }
    }

    /// Content of a text or comment node.
    pub fn text(&self, node: NodeId) -> Option<CompactString> {
        match &self.nodes.read()[node.0] {
            NodeData::Text(text) | NodeData::Comment(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Debug rendition stashed on an element, if any.
    pub fn debug_props(&self, node: NodeId) -> Option<String> {
        self.read_element(node, |element| element.debug_props.clone())
            .flatten()
    }

    /// Total number of nodes created so far.
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTML rendition
    // ─────────────────────────────────────────────────────────────────────────

    /// Render a subtree to HTML.
    pub fn to_html(&self, node: NodeId) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        render_node(&nodes, node, &mut out);
        out
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn create_element(&self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag, None)))
    }

    fn create_element_ns(&self, namespace: &str, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag, Some(namespace))))
    }

    fn create_text(&self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    fn create_comment(&self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.into()))
    }

    fn create_fragment(&self) -> NodeId {
        self.push(NodeData::Fragment(Vec::new()))
    }

    fn supports_namespaces(&self) -> bool {
        self.namespaced
    }

    fn accepts_children(&self, parent: &NodeId) -> bool {
        matches!(
            &self.nodes.read()[parent.0],
            NodeData::Element(_) | NodeData::Fragment(_)
        )
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.write();
        // appending a fragment moves its children
        let moved = match &mut nodes[child.0] {
            NodeData::Fragment(children) => std::mem::take(children),
            _ => vec![*child],
        };
        match &mut nodes[parent.0] {
            NodeData::Element(element) => element.children.extend(moved),
            NodeData::Fragment(children) => children.extend(moved),
            _ => {}
        }
    }

    fn has_property(&self, node: &NodeId, name: &str) -> bool {
        self.read_element(*node, |element| {
            WRITABLE_SLOTS.contains(&name)
                || READ_ONLY_SLOTS.contains(&name)
                || element.slots.iter().any(|(k, _)| k.as_str() == name)
        })
        .unwrap_or(false)
    }

    fn set_property(&self, node: &NodeId, name: &str, value: PropWrite<'_>) -> DomResult<()> {
        if READ_ONLY_SLOTS.contains(&name) {
            return Err(DomError::read_only(name));
        }
        let stored = SlotValue::from(value);
        self.write_element(*node, |element| {
            if let Some(slot) = element.slots.iter_mut().find(|(k, _)| k.as_str() == name) {
                slot.1 = stored;
            } else {
                element.slots.push((name.into(), stored));
            }
        })
        .ok_or_else(|| DomError::property_rejected(name, "not an element"))
    }

    fn set_style(&self, node: &NodeId, key: &str, value: &str) -> DomResult<()> {
        if value.trim().is_empty() {
            return Err(DomError::style_rejected(key, "empty value"));
        }
        self.write_element(*node, |element| {
            if let Some(entry) = element.style.iter_mut().find(|(k, _)| k.as_str() == key) {
                entry.1 = value.into();
            } else {
                element.style.push((key.into(), value.into()));
            }
        })
        .ok_or_else(|| DomError::style_rejected(key, "not an element"))
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.write_element(*node, |element| {
            if let Some(attr) = element.attrs.iter_mut().find(|(k, _)| k.as_str() == name) {
                attr.1 = value.into();
            } else {
                element.attrs.push((name.into(), value.into()));
            }
        });
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.write_element(*node, |element| {
            element.attrs.retain(|(k, _)| k.as_str() != name);
        });
    }

    fn stash_debug_props(&self, node: &NodeId, rendition: String) {
        self.write_element(*node, |element| {
            element.debug_props = Some(rendition);
        });
    }
}

// =============================================================================
// HTML rendering
// =============================================================================

fn render_node(nodes: &[NodeData], node: NodeId, out: &mut String) {
    match &nodes[node.0] {
        NodeData::Element(element) => render_element(nodes, element, out),
        NodeData::Text(text) => out.push_str(&escape_html(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Fragment(children) => {
            for child in children {
                render_node(nodes, *child, out);
            }
        }
    }
}

fn render_element(nodes: &[NodeData], element: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);

    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    // style declarations render as one attribute unless a literal style
    // attribute already exists
    if !element.style.is_empty() && !element.attrs.iter().any(|(k, _)| k.as_str() == "style") {
        out.push_str(" style=\"");
        for (i, (key, value)) in element.style.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&escape_attr(value));
        }
        out.push('"');
    }

    if is_void_element(&element.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        render_node(nodes, *child, out);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Check if element is a void element (self-closing).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
