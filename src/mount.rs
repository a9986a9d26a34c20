//! Materialization.
//!
//! Turns one virtual node into one platform node, recursing through element
//! and fragment children. The SVG flag and the caller's parent context are
//! threaded down the call tree; nothing is stored globally.

use compact_str::CompactString;

use crate::apply::apply_properties;
use crate::config::MountConfig;
use crate::context::ParentContext;
use crate::dom::{Dom, SVG_NAMESPACE};
use crate::node::{VElement, VirtualNode};

const SVG_TAG: &str = "svg";
const FOREIGN_OBJECT_TAG: &str = "foreignObject";

/// Comment text of placeholder nodes standing in for absent content.
const PLACEHOLDER_TEXT: &str = "empty node";

/// Materialize a virtual tree from the root, with no SVG hint and no
/// parent context.
pub fn mount<D: Dom>(dom: &D, config: &MountConfig, vnode: VirtualNode<D>) -> Option<D::Node> {
    materialize(dom, config, vnode, false, None)
}

/// Turn one virtual node into one platform node.
///
/// `is_svg` is the inherited SVG state of the enclosing subtree;
/// `parent_context` is handed to widget mounts and otherwise passed through
/// unchanged. Returns `None` only when a widget renders nothing.
pub fn materialize<D: Dom>(
    dom: &D,
    config: &MountConfig,
    vnode: VirtualNode<D>,
    is_svg: bool,
    parent_context: Option<&ParentContext>,
) -> Option<D::Node> {
    match vnode {
        // the widget owns its subtree: no prop application, no child walk
        VirtualNode::Widget(mut widget) => widget.init(dom, parent_context),
        VirtualNode::Text(text) => Some(dom.create_text(&text.text)),
        // placeholder keeps the positional slot without visible content
        VirtualNode::Empty => Some(dom.create_comment(PLACEHOLDER_TEXT)),
        VirtualNode::Element(element) => Some(materialize_element(
            dom,
            config,
            *element,
            is_svg,
            parent_context,
        )),
        VirtualNode::Fragment(children) => {
            let fragment = dom.create_fragment();
            for child in children {
                if child.is_empty() || !dom.accepts_children(&fragment) {
                    continue;
                }
                if let Some(child_node) = materialize(dom, config, child, is_svg, parent_context) {
                    dom.append_child(&fragment, &child_node);
                }
            }
            Some(fragment)
        }
    }
}

fn materialize_element<D: Dom>(
    dom: &D,
    config: &MountConfig,
    element: VElement<D>,
    inherited_svg: bool,
    parent_context: Option<&ParentContext>,
) -> D::Node {
    let VElement {
        tag,
        namespace,
        props,
        children,
        is_svg: declared_svg,
        parent_context: own_context,
    } = element;

    let is_svg = resolve_svg(&tag, declared_svg, inherited_svg, dom.supports_namespaces());
    let namespace = if is_svg {
        Some(CompactString::const_new(SVG_NAMESPACE))
    } else {
        namespace
    };

    let node = match namespace.as_deref() {
        None => dom.create_element(&tag),
        Some(ns) if dom.supports_namespaces() => dom.create_element_ns(ns, &tag),
        Some(_) => dom.create_element(&tag),
    };

    apply_properties(dom, &node, &props, is_svg);
    if config.debug {
        dom.stash_debug_props(&node, format!("{props:?}"));
    }

    let child_context = own_context.unwrap_or_default();
    for mut child in children {
        // absent children contribute no platform node
        if child.is_empty() || !dom.accepts_children(&node) {
            continue;
        }
        child.attach_context(child_context.clone());
        if let Some(child_node) = materialize(dom, config, child, is_svg, parent_context) {
            dom.append_child(&node, &child_node);
        }
    }

    node
}

/// Resolve the SVG state of an element, in declaration order: an explicit
/// flag wins, then the `svg` root tag forces it on, then `foreignObject`
/// forces it off, then the inherited state applies. A host without
/// namespace support forces it off regardless.
fn resolve_svg(tag: &str, declared: bool, inherited: bool, supports_namespaces: bool) -> bool {
    let resolved = if declared {
        true
    } else if tag == SVG_TAG {
        true
    } else if tag == FOREIGN_OBJECT_TAG {
        false
    } else {
        inherited
    };
    resolved && supports_namespaces
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::memory::{MemoryDom, NodeId, NodeKind};
    use crate::node::Widget;
    use crate::props::Style;

    fn mount_default(dom: &MemoryDom, vnode: VirtualNode<MemoryDom>) -> NodeId {
        mount(dom, &MountConfig::default(), vnode).expect("node")
    }

    #[test]
    fn test_text_primitives() {
        let dom = MemoryDom::new();

        let node = mount_default(&dom, "hello".into());
        assert_eq!(dom.kind(node), NodeKind::Text);
        assert_eq!(dom.text(node).as_deref(), Some("hello"));

        let node = mount_default(&dom, 42i64.into());
        assert_eq!(dom.text(node).as_deref(), Some("42"));
    }

    #[test]
    fn test_empty_becomes_placeholder_comment() {
        let dom = MemoryDom::new();
        let node = mount_default(&dom, VirtualNode::Empty);
        assert_eq!(dom.kind(node), NodeKind::Comment);
    }

    #[test]
    fn test_children_order_and_falsy_skip() {
        let dom = MemoryDom::new();
        let tree = VElement::new("ul")
            .child(VElement::new("li").text("a"))
            .child(VirtualNode::Empty)
            .child(VElement::new("li").text("b"))
            .child(VirtualNode::Empty);

        let node = mount_default(&dom, tree.into());
        let children = dom.children(node);
        assert_eq!(children.len(), 2);
        assert_eq!(dom.tag(children[0]).as_deref(), Some("li"));
        assert_eq!(dom.to_html(children[0]), "<li>a</li>");
        assert_eq!(dom.to_html(children[1]), "<li>b</li>");
    }

    #[test]
    fn test_fragment_materializes_members_in_order() {
        let dom = MemoryDom::new();
        let frag = VirtualNode::fragment([
            "a".into(),
            VirtualNode::Empty,
            VElement::new("span").into(),
        ]);

        let node = mount_default(&dom, frag);
        assert_eq!(dom.kind(node), NodeKind::Fragment);
        let children = dom.children(node);
        assert_eq!(children.len(), 2);
        assert_eq!(dom.kind(children[0]), NodeKind::Text);
        assert_eq!(dom.tag(children[1]).as_deref(), Some("span"));
    }

    #[test]
    fn test_nested_fragment_splices_into_element() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div")
            .child(VirtualNode::fragment(["a".into(), "b".into()]))
            .child(VElement::new("i"));

        let node = mount_default(&dom, tree.into());
        let children = dom.children(node);
        assert_eq!(children.len(), 3);
        assert_eq!(dom.kind(children[0]), NodeKind::Text);
        assert_eq!(dom.kind(children[1]), NodeKind::Text);
        assert_eq!(dom.tag(children[2]).as_deref(), Some("i"));
    }

    #[test]
    fn test_svg_namespace_propagates() {
        let dom = MemoryDom::new();
        let tree = VElement::new("svg")
            .child(VElement::new("g").child(VElement::new("rect")));

        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.namespace(node).as_deref(), Some(SVG_NAMESPACE));
        let g = dom.children(node)[0];
        assert_eq!(dom.namespace(g).as_deref(), Some(SVG_NAMESPACE));
        let rect = dom.children(g)[0];
        assert_eq!(dom.namespace(rect).as_deref(), Some(SVG_NAMESPACE));
    }

    #[test]
    fn test_foreign_object_resets_namespace() {
        let dom = MemoryDom::new();
        let tree = VElement::new("svg")
            .child(VElement::new("foreignObject").child(VElement::new("div")))
            .child(VElement::new("rect"));

        let node = mount_default(&dom, tree.into());
        let children = dom.children(node);
        let foreign = children[0];
        assert_eq!(dom.namespace(foreign), None);
        let div = dom.children(foreign)[0];
        assert_eq!(dom.namespace(div), None);
        assert_eq!(dom.namespace(children[1]).as_deref(), Some(SVG_NAMESPACE));
    }

    #[test]
    fn test_declared_svg_flag_wins() {
        let dom = MemoryDom::new();
        let tree: VElement<MemoryDom> = VElement::new("circle").svg();
        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.namespace(node).as_deref(), Some(SVG_NAMESPACE));
    }

    #[test]
    fn test_host_without_namespaces_forces_plain() {
        let dom = MemoryDom::without_namespaces();
        let tree = VElement::new("svg").child(VElement::new("rect"));

        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.namespace(node), None);
        assert_eq!(dom.namespace(dom.children(node)[0]), None);
    }

    #[test]
    fn test_predeclared_namespace_is_honored() {
        let dom = MemoryDom::new();
        let tree: VElement<MemoryDom> =
            VElement::new("math").with_namespace("http://www.w3.org/1998/Math/MathML");
        let node = mount_default(&dom, tree.into());
        assert_eq!(
            dom.namespace(node).as_deref(),
            Some("http://www.w3.org/1998/Math/MathML")
        );
    }

    #[test]
    fn test_svg_mode_props_go_to_attributes() {
        let dom = MemoryDom::new();
        let tree = VElement::new("svg").prop("className", "chart");
        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.attr(node, "className").as_deref(), Some("chart"));
        assert!(dom.slot(node, "className").is_none());
    }

    #[derive(Default)]
    struct ProbeState {
        attached: Option<ParentContext>,
        init_context: Option<bool>,
    }

    struct Probe {
        state: Rc<RefCell<ProbeState>>,
        render_nothing: bool,
    }

    impl Widget<MemoryDom> for Probe {
        fn init(&mut self, dom: &MemoryDom, cx: Option<&ParentContext>) -> Option<NodeId> {
            self.state.borrow_mut().init_context = Some(cx.is_some());
            if self.render_nothing {
                None
            } else {
                Some(dom.create_element("section"))
            }
        }

        fn attach_context(&mut self, context: ParentContext) {
            self.state.borrow_mut().attached = Some(context);
        }
    }

    #[test]
    fn test_widget_delegates_to_init() {
        let dom = MemoryDom::new();
        let state = Rc::new(RefCell::new(ProbeState::default()));
        let widget = VirtualNode::widget(Probe {
            state: Rc::clone(&state),
            render_nothing: false,
        });

        let cx = ParentContext::new("app");
        let node = materialize(&dom, &MountConfig::default(), widget, false, Some(&cx))
            .expect("widget root");

        assert_eq!(dom.tag(node).as_deref(), Some("section"));
        assert_eq!(state.borrow().init_context, Some(true));
    }

    #[test]
    fn test_widget_rendering_nothing_contributes_no_child() {
        let dom = MemoryDom::new();
        let state = Rc::new(RefCell::new(ProbeState::default()));
        let tree = VElement::new("div").child(VirtualNode::widget(Probe {
            state: Rc::clone(&state),
            render_nothing: true,
        }));

        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.child_count(node), 0);
    }

    #[test]
    fn test_widget_child_receives_parent_context() {
        let dom = MemoryDom::new();
        let state = Rc::new(RefCell::new(ProbeState::default()));
        let tree = VElement::new("div")
            .context(ParentContext::new(7u32))
            .child(VirtualNode::widget(Probe {
                state: Rc::clone(&state),
                render_nothing: false,
            }));

        mount_default(&dom, tree.into());

        let state = state.borrow();
        let attached = state.attached.as_ref().expect("context attached");
        assert_eq!(attached.downcast_ref::<u32>(), Some(&7));
    }

    #[test]
    fn test_context_defaults_to_empty() {
        let dom = MemoryDom::new();
        let state = Rc::new(RefCell::new(ProbeState::default()));
        let tree = VElement::new("div").child(VirtualNode::widget(Probe {
            state: Rc::clone(&state),
            render_nothing: false,
        }));

        mount_default(&dom, tree.into());

        let state = state.borrow();
        assert!(state.attached.as_ref().expect("context attached").is_empty());
    }

    #[test]
    fn test_element_child_gets_context_field() {
        let mut child: VirtualNode<MemoryDom> = VElement::new("p").into();
        child.attach_context(ParentContext::new(1u8));
        assert!(child.as_element().unwrap().parent_context.is_some());
    }

    #[test]
    fn test_debug_side_channel() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div").prop("id", "x");
        let node = mount(&dom, &MountConfig::DEV, tree.into()).expect("node");
        let dump = dom.debug_props(node).expect("debug rendition");
        assert!(dump.contains("id"));

        let tree = VElement::new("div").prop("id", "x");
        let node = mount(&dom, &MountConfig::PROD, tree.into()).expect("node");
        assert!(dom.debug_props(node).is_none());
    }

    #[test]
    fn test_properties_applied_during_mount() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div")
            .prop("className", "a")
            .style(Style::rules().set("color", "blue"));

        let node = mount_default(&dom, tree.into());
        assert_eq!(
            dom.slot(node, "className").and_then(|s| s.as_str().map(String::from)),
            Some("a".to_string())
        );
        assert_eq!(dom.style_value(node, "color").as_deref(), Some("blue"));
    }

    #[test]
    fn test_resolve_svg_table() {
        assert!(resolve_svg("svg", false, false, true));
        assert!(resolve_svg("rect", false, true, true));
        assert!(resolve_svg("circle", true, false, true));
        assert!(!resolve_svg("foreignObject", false, true, true));
        assert!(!resolve_svg("div", false, false, true));
        assert!(!resolve_svg("svg", false, false, false));
        assert!(!resolve_svg("circle", true, true, false));
    }

    #[test]
    fn test_bad_prop_does_not_stop_mount() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div")
            .prop("tagName", "boom")
            .prop("id", "safe")
            .child(VElement::new("span"));

        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.child_count(node), 1);
        assert_eq!(
            dom.slot(node, "id").and_then(|s| s.as_str().map(String::from)),
            Some("safe".to_string())
        );
    }

    #[test]
    fn test_style_prop_via_mount_uses_attr_for_inline() {
        let dom = MemoryDom::new();
        let tree = VElement::new("div").style(Style::inline("color: red"));
        let node = mount_default(&dom, tree.into());
        assert_eq!(dom.attr(node, "style").as_deref(), Some("color: red"));
    }
}
