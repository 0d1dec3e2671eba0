//! SVG element serialization

use crate::models::{Node, NodeId, RenderTree};
use quick_xml::escape::escape;

/// Append the markup of `id` and its subtree to `out`
pub fn write_element(tree: &RenderTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    out.push('<');
    out.push_str(&node.tag);
    write_attributes(node, out);

    if node.children.is_empty() && node.markup.is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &node.children {
        write_element(tree, *child, out);
    }
    if let Some(markup) = &node.markup {
        out.push_str(markup);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn write_attributes(node: &Node, out: &mut String) {
    for (name, value) in &node.attributes {
        push_attribute(out, name, value);
    }
    if let Some(style) = style_attribute(node) {
        push_attribute(out, "style", &style);
    }
}

/// Inline styles of a node joined into a `style` attribute value
pub fn style_attribute(node: &Node) -> Option<String> {
    if node.styles.is_empty() {
        return None;
    }
    let style = node
        .styles
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("; ");
    Some(style)
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}
