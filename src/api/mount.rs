//! Live mirror of a schematic in the host page
//!
//! A mounted canvas is a single `<svg>` appended to the host element; the
//! host's other children are never touched. The `<svg>` and its viewport `<g>`
//! keep their identity across updates, so a pan/zoom script bound to them
//! (including the transform it writes on the viewport) keeps working. Only
//! the content around and below the viewport is rewritten.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::models::{NodeId, RenderTree};
use crate::renderers::svg::{render_children, style_attribute, write_element};
use crate::schematic::{Schematic, SVG_NAMESPACE};

pub(crate) struct DomMount {
    svg: Element,
    viewport: Element,
    /// Viewport transform as of the last sync
    transform: Option<String>,
}

impl DomMount {
    pub fn new(parent: &Element) -> Result<Self, JsValue> {
        let document = parent
            .owner_document()
            .ok_or_else(|| JsValue::from_str("Host element is not part of a document"))?;
        let svg = document.create_element_ns(Some(SVG_NAMESPACE), "svg")?;
        let viewport = document.create_element_ns(Some(SVG_NAMESPACE), "g")?;
        svg.append_child(&viewport)?;
        parent.append_child(&svg)?;
        Ok(Self {
            svg,
            viewport,
            transform: None,
        })
    }

    /// Move the mounted `<svg>` under another host element
    pub fn reparent(&self, parent: &Element) -> Result<(), JsValue> {
        parent.append_child(&self.svg)?;
        Ok(())
    }

    pub fn svg(&self) -> &Element {
        &self.svg
    }

    pub fn sync(&mut self, schematic: &Schematic) -> Result<(), JsValue> {
        let tree = schematic.tree();
        let viewport = schematic.viewport();
        copy_attributes(tree, schematic.root(), &self.svg)?;

        let mut current = self.svg.first_element_child();
        while let Some(element) = current {
            current = element.next_element_sibling();
            if !element.is_same_node(Some(&self.viewport)) {
                element.remove();
            }
        }

        // Root-level siblings keep their order relative to the viewport
        let mut before = String::new();
        let mut after = String::new();
        let mut past_viewport = false;
        for child in tree.children(schematic.root()) {
            if *child == viewport {
                past_viewport = true;
                continue;
            }
            let out = if past_viewport { &mut after } else { &mut before };
            write_element(tree, *child, out);
        }
        if !before.is_empty() {
            self.viewport.insert_adjacent_html("beforebegin", &before)?;
        }
        if !after.is_empty() {
            self.svg.insert_adjacent_html("beforeend", &after)?;
        }

        if let Some(node) = tree.get(viewport) {
            for (name, value) in node.attributes.iter().filter(|(name, _)| name != "transform") {
                self.viewport.set_attribute(name, value)?;
            }
            // Only a transform set through the API is pushed; one written by
            // an external pan script stays until then.
            let transform = node.attr("transform").map(str::to_string);
            if transform != self.transform {
                if let Some(value) = &transform {
                    self.viewport.set_attribute("transform", value)?;
                }
                self.transform = transform;
            }
        }
        self.viewport.set_inner_html(&render_children(tree, viewport));
        Ok(())
    }
}

fn copy_attributes(tree: &RenderTree, id: NodeId, element: &Element) -> Result<(), JsValue> {
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    // the namespace comes from create_element_ns
    for (name, value) in node.attributes.iter().filter(|(name, _)| name != "xmlns") {
        element.set_attribute(name, value)?;
    }
    if let Some(style) = style_attribute(node) {
        element.set_attribute("style", &style)?;
    }
    Ok(())
}
