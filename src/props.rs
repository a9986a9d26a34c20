//! Property values and the element property map.
//!
//! A [`PropValue`] is one declared property of an element. The applier in
//! [`apply`](crate::apply) decides per value how it reaches the host:
//! hooks own their assignment outright, styles go through the style store,
//! objects and primitives cascade between property slots and attributes.

use std::fmt;
use std::rc::Rc;

use compact_str::{CompactString, format_compact};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::dom::Dom;

/// Ordered property map of an element, name to declared value.
pub type Props<D> = IndexMap<CompactString, PropValue<D>, FxBuildHasher>;

/// Property value that owns its own application logic.
///
/// Invoked once per (node, property) pair during property application. The
/// host value is passed along because node handles are inert without it.
pub trait Hook<D: Dom> {
    /// Apply the property named `name` to `node`.
    fn hook(&self, dom: &D, node: &D::Node, name: &str);
}

/// One declared property value.
pub enum PropValue<D: Dom> {
    /// Escape hatch: the hook performs the whole assignment.
    Hook(Rc<dyn Hook<D>>),
    /// Style content, inline or as a rule list.
    Style(Style),
    /// Structured value.
    Object(ObjectValue),
    /// Text value.
    Str(CompactString),
    /// Numeric value.
    Num(f64),
    /// Boolean value.
    Bool(bool),
    /// Bare function value. Dropped at the attribute fallback; listener
    /// attachment is expected to go through [`Hook`].
    Func(Callback),
    /// Declared-but-absent value.
    Null,
}

impl<D: Dom> PropValue<D> {
    /// Wrap a hook.
    pub fn hook(hook: impl Hook<D> + 'static) -> Self {
        Self::Hook(Rc::new(hook))
    }

    /// Whether this value carries a hook.
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }

    /// Null and false both read as "this attribute should be absent".
    pub(crate) fn means_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Bool(false))
    }

    /// Attribute rendition of the value, or `None` for values that never
    /// serialize (functions, null, false).
    pub(crate) fn attr_text(&self) -> Option<CompactString> {
        match self {
            Self::Str(text) => Some(text.clone()),
            Self::Num(value) => Some(number_text(*value)),
            Self::Bool(true) => Some(CompactString::const_new("true")),
            Self::Object(object) => Some(object.attr_text().into()),
            _ => None,
        }
    }
}

impl<D: Dom> Clone for PropValue<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Hook(hook) => Self::Hook(Rc::clone(hook)),
            Self::Style(style) => Self::Style(style.clone()),
            Self::Object(object) => Self::Object(object.clone()),
            Self::Str(text) => Self::Str(text.clone()),
            Self::Num(value) => Self::Num(*value),
            Self::Bool(flag) => Self::Bool(*flag),
            Self::Func(callback) => Self::Func(callback.clone()),
            Self::Null => Self::Null,
        }
    }
}

impl<D: Dom> fmt::Debug for PropValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hook(_) => f.write_str("Hook(..)"),
            Self::Style(style) => f.debug_tuple("Style").field(style).finish(),
            Self::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Self::Str(text) => f.debug_tuple("Str").field(text).finish(),
            Self::Num(value) => f.debug_tuple("Num").field(value).finish(),
            Self::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Self::Func(callback) => f.debug_tuple("Func").field(callback).finish(),
            Self::Null => f.write_str("Null"),
        }
    }
}

impl<D: Dom> From<&str> for PropValue<D> {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl<D: Dom> From<String> for PropValue<D> {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl<D: Dom> From<CompactString> for PropValue<D> {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

impl<D: Dom> From<f64> for PropValue<D> {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}

impl<D: Dom> From<i64> for PropValue<D> {
    fn from(value: i64) -> Self {
        Self::Num(value as f64)
    }
}

impl<D: Dom> From<i32> for PropValue<D> {
    fn from(value: i32) -> Self {
        Self::Num(value.into())
    }
}

impl<D: Dom> From<u32> for PropValue<D> {
    fn from(value: u32) -> Self {
        Self::Num(value.into())
    }
}

impl<D: Dom> From<bool> for PropValue<D> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<D: Dom> From<Style> for PropValue<D> {
    fn from(value: Style) -> Self {
        Self::Style(value)
    }
}

impl<D: Dom> From<ObjectValue> for PropValue<D> {
    fn from(value: ObjectValue) -> Self {
        Self::Object(value)
    }
}

impl<D: Dom> From<Callback> for PropValue<D> {
    fn from(value: Callback) -> Self {
        Self::Func(value)
    }
}

// =============================================================================
// Style
// =============================================================================

/// Style content, authored either as an inline string or as a rule list.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// Literal CSS text set as the `style` attribute.
    Inline(CompactString),
    /// Per-key declarations written into the node's style store.
    Rules(StyleRules),
}

impl Style {
    /// Inline style text.
    pub fn inline(css: impl Into<CompactString>) -> Self {
        Self::Inline(css.into())
    }

    /// Empty rule list, filled with [`StyleRules::set`].
    pub fn rules() -> StyleRules {
        StyleRules::new()
    }
}

impl From<StyleRules> for Style {
    fn from(rules: StyleRules) -> Self {
        Self::Rules(rules)
    }
}

/// Ordered style declarations. Entries without a value are skipped during
/// application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRules(Vec<(CompactString, Option<CompactString>)>);

impl StyleRules {
    /// Empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn set(mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.0.push((key.into(), Some(value.into())));
        self
    }

    /// Append a value-less entry. Skipped when the rules are applied.
    pub fn unset(mut self, key: impl Into<CompactString>) -> Self {
        self.0.push((key.into(), None));
        self
    }

    /// Iterate declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Number of entries, value-less ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the rule list has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// ObjectValue
// =============================================================================

/// Structured property value as an ordered key/value bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectValue(Vec<(CompactString, CompactString)>);

impl ObjectValue {
    /// Empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn with(mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attribute rendition used when no property slot exists for the name.
    /// The format is not part of the contract; hosts must not parse it.
    pub fn attr_text(&self) -> String {
        let mut out = String::from("{");
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out.push('}');
        out
    }
}

// =============================================================================
// Callback
// =============================================================================

/// Bare function value.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    /// Wrap a closure.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the closure.
    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Text rendition of a numeric value. Whole numbers render without a
/// fractional part.
pub(crate) fn number_text(value: f64) -> CompactString {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9e15 {
        format_compact!("{}", value as i64)
    } else {
        format_compact!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    type Value = PropValue<MemoryDom>;

    #[test]
    fn test_number_text() {
        assert_eq!(number_text(5.0), "5");
        assert_eq!(number_text(-3.0), "-3");
        assert_eq!(number_text(5.5), "5.5");
        assert_eq!(number_text(0.0), "0");
    }

    #[test]
    fn test_attr_text() {
        assert_eq!(Value::from("a").attr_text().as_deref(), Some("a"));
        assert_eq!(Value::from(7i64).attr_text().as_deref(), Some("7"));
        assert_eq!(Value::from(true).attr_text().as_deref(), Some("true"));
        assert_eq!(Value::from(false).attr_text(), None);
        assert_eq!(Value::Null.attr_text(), None);
        assert_eq!(Value::Func(Callback::new(|| {})).attr_text(), None);
    }

    #[test]
    fn test_means_absent() {
        assert!(Value::Null.means_absent());
        assert!(Value::from(false).means_absent());
        assert!(!Value::from(true).means_absent());
        assert!(!Value::from("").means_absent());
        assert!(!Value::from(0i64).means_absent());
    }

    #[test]
    fn test_style_rules_builder() {
        let rules = StyleRules::new()
            .set("color", "red")
            .unset("flex")
            .set("margin", "0");
        assert_eq!(rules.len(), 3);
        let entries: Vec<_> = rules.iter().collect();
        assert_eq!(entries[0], ("color", Some("red")));
        assert_eq!(entries[1], ("flex", None));
        assert_eq!(entries[2], ("margin", Some("0")));
    }

    #[test]
    fn test_object_value() {
        let object = ObjectValue::new().with("a", "1").with("b", "2");
        assert_eq!(object.get("a"), Some("1"));
        assert_eq!(object.get("missing"), None);
        assert_eq!(object.attr_text(), "{a=1 b=2}");
        assert_eq!(ObjectValue::new().attr_text(), "{}");
    }

    #[test]
    fn test_props_preserve_order() {
        let mut props: Props<MemoryDom> = Props::default();
        props.insert("className".into(), "a".into());
        props.insert("id".into(), "main".into());
        props.insert("title".into(), "t".into());
        let names: Vec<_> = props.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["className", "id", "title"]);
    }
}
