//! SVG document generation

use super::elements::write_element;
use crate::models::{NodeId, RenderTree};

/// Render the whole tree as an SVG fragment (no XML declaration)
pub fn render_tree(tree: &RenderTree) -> String {
    let mut out = String::new();
    write_element(tree, tree.root(), &mut out);
    out
}

/// Render the children of `id` without the element itself
pub fn render_children(tree: &RenderTree, id: NodeId) -> String {
    let mut out = String::new();
    for child in tree.children(id) {
        write_element(tree, *child, &mut out);
    }
    out
}

/// Render the whole tree as a standalone SVG document
pub fn render_document(tree: &RenderTree) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(tree, tree.root(), &mut out);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_groups() {
        let mut tree = RenderTree::new("svg");
        let g = tree.append(tree.root(), "g").unwrap();
        tree.set_attr(g, "id", "viewport");
        let line = tree.append(g, "line").unwrap();
        tree.set_attr(line, "x2", "1");

        assert_eq!(render_tree(&tree), r#"<svg><g id="viewport"><line x2="1"/></g></svg>"#);
        assert!(render_document(&tree).starts_with("<?xml version=\"1.0\""));
        assert_eq!(render_children(&tree, g), r#"<line x2="1"/>"#);
        assert_eq!(render_children(&tree, line), "");
    }
}
