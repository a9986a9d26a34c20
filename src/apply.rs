//! Property application.
//!
//! Applies a property map to one host node under a fixed precedence policy:
//! hooks, then style, then object values, then the non-SVG primitive fast
//! path, then the attribute fallback. Failures are contained at single
//! property or style-key granularity and logged as warnings; nothing
//! escapes this module.

use tracing::warn;

use crate::dom::{Dom, PropWrite};
use crate::props::{ObjectValue, PropValue, Props, Style};

const CHILDREN_PROP: &str = "children";
const STYLE_PROP: &str = "style";
const LIST_PROP: &str = "list";
const TYPE_PROP: &str = "type";

/// Apply every declared property to `node`.
///
/// Usable at creation time and again on an existing node by an update
/// layer. The `children` key is structural and skipped.
pub fn apply_properties<D: Dom>(dom: &D, node: &D::Node, props: &Props<D>, is_svg: bool) {
    for (name, value) in props {
        if name.as_str() == CHILDREN_PROP {
            continue;
        }
        apply_property(dom, node, name.as_str(), value, is_svg);
    }
}

fn apply_property<D: Dom>(dom: &D, node: &D::Node, name: &str, value: &PropValue<D>, is_svg: bool) {
    match value {
        // Hooks own the assignment outright.
        PropValue::Hook(hook) => hook.hook(dom, node, name),
        _ if name == STYLE_PROP => apply_style_prop(dom, node, name, value),
        PropValue::Style(style) => apply_style(dom, node, name, style),
        PropValue::Object(object) => apply_object(dom, node, name, object),
        _ => apply_scalar(dom, node, name, value, is_svg),
    }
}

/// The `style` name consumes any value shape: literal text becomes the
/// attribute, structured values go through the style store key by key.
fn apply_style_prop<D: Dom>(dom: &D, node: &D::Node, name: &str, value: &PropValue<D>) {
    match value {
        PropValue::Str(css) => dom.set_attribute(node, name, css),
        PropValue::Style(style) => apply_style(dom, node, name, style),
        PropValue::Object(object) => {
            for (key, entry) in object.iter() {
                try_set_style(dom, node, key, entry);
            }
        }
        _ => {}
    }
}

fn apply_style<D: Dom>(dom: &D, node: &D::Node, name: &str, style: &Style) {
    match style {
        Style::Inline(css) => dom.set_attribute(node, name, css),
        Style::Rules(rules) => {
            for (key, value) in rules.iter() {
                // value-less entries are skipped
                let Some(value) = value else { continue };
                try_set_style(dom, node, key, value);
            }
        }
    }
}

fn try_set_style<D: Dom>(dom: &D, node: &D::Node, key: &str, value: &str) {
    if let Err(err) = dom.set_style(node, key, value) {
        warn!(style = key, value, error = %err, "style declaration rejected");
    }
}

fn apply_object<D: Dom>(dom: &D, node: &D::Node, name: &str, object: &ObjectValue) {
    if dom.has_property(node, name) {
        if let Err(err) = dom.set_property(node, name, PropWrite::Object(object)) {
            warn!(property = name, value = ?object, error = %err, "property assignment rejected");
        }
    } else {
        dom.set_attribute(node, name, &object.attr_text());
    }
}

fn apply_scalar<D: Dom>(dom: &D, node: &D::Node, name: &str, value: &PropValue<D>, is_svg: bool) {
    let takes_slot =
        name != LIST_PROP && name != TYPE_PROP && !is_svg && dom.has_property(node, name);
    if takes_slot {
        let write = match value {
            PropValue::Str(text) => PropWrite::Str(text),
            PropValue::Num(number) => PropWrite::Num(*number),
            PropValue::Bool(flag) => PropWrite::Bool(*flag),
            PropValue::Func(callback) => PropWrite::Func(callback),
            // null coerces to the empty string so the slot never holds the
            // literal text "null"
            _ => PropWrite::Str(""),
        };
        if let Err(err) = dom.set_property(node, name, write) {
            warn!(property = name, value = ?value, error = %err, "property assignment rejected");
        }
        // keep the attribute view consistent with an absent value, whether
        // or not the slot write went through
        if value.means_absent() {
            dom.remove_attribute(node, name);
        }
        return;
    }
    if value.means_absent() {
        dom.remove_attribute(node, name);
    } else if let Some(text) = value.attr_text() {
        // functions have no attribute rendition and are dropped here
        dom.set_attribute(node, name, &text);
    }
}
