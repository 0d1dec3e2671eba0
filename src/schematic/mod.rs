//! Schematic canvas
//!
//! A `Schematic` owns the SVG render tree of one editor instance: a uniquely
//! named `<svg>` root sized from the page, and a `<g id="viewport">` below it
//! that the host pan/zoom script transforms. Model elements (components,
//! wires) live under the viewport; editing affordances (terminals, paths,
//! bounding boxes) are created directly on the root.
//!
//! The render tree is the model. The element list only records handles the
//! editor explicitly asked to track via `append`.

pub mod errors;
pub mod factory;
pub mod import;
pub mod library;

pub use errors::*;
pub use import::{GafSource, ImportSummary};
pub use library::{ComponentLibrary, ComponentShape, NoLibrary};

use crate::config::{CanvasConfig, PageSize};
use crate::context::SchematicContext;
use crate::models::{fmt_num, ElementHandle, Node, NodeId, RenderTree};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const VIEWPORT_ID: &str = "viewport";

pub struct Schematic {
    name: String,
    debug: bool,
    config: CanvasConfig,
    tree: RenderTree,
    viewport: NodeId,
    elements: Vec<ElementHandle>,
    library: Box<dyn ComponentLibrary>,
}

impl Schematic {
    /// Create a canvas named from the context's allocator
    pub fn new(context: &mut SchematicContext, page: PageSize, debug: bool) -> Self {
        let name = context.names.next_name();
        Self::with_name(name, context.config.clone(), page, debug)
    }

    pub fn with_name(name: impl Into<String>, config: CanvasConfig, page: PageSize, debug: bool) -> Self {
        let name = name.into();
        let (width, height) = config.canvas_size(page);

        let mut tree = RenderTree::new("svg");
        let root = tree.root();
        tree.set_attr(root, "xmlns", SVG_NAMESPACE);
        tree.set_attr(root, "id", name.as_str());
        tree.set_style(root, "width", format!("{}px", fmt_num(width)));
        tree.set_style(root, "height", format!("{}px", fmt_num(height)));

        let pan = &config.pan;
        tree.set_attr(root, "data-pan", pan.enable_pan.to_string());
        tree.set_attr(root, "data-zoom", pan.enable_zoom.to_string());
        tree.set_attr(root, "data-drag", pan.enable_drag.to_string());
        tree.set_attr(root, "data-zoom-scale", fmt_num(pan.zoom_scale));

        let viewport = tree.create("g");
        tree.set_attr(viewport, "id", VIEWPORT_ID);
        tree.append_child(root, viewport);

        if debug {
            log::debug!("{}: created canvas {}x{}", name, fmt_num(width), fmt_num(height));
        }

        Self {
            name,
            debug,
            config,
            tree,
            viewport,
            elements: Vec::new(),
            library: Box::new(NoLibrary),
        }
    }

    /// Replace the component library used for type hints
    pub fn set_library(&mut self, library: Box<dyn ComponentLibrary>) {
        self.library = library;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn viewport(&self) -> NodeId {
        self.viewport
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Canvas size in px as written on the root element
    pub fn size(&self) -> (f64, f64) {
        let root = self.tree.get(self.root());
        let read = |prop: &str| {
            root.and_then(|n| n.style(prop))
                .and_then(crate::models::render_tree::parse_length)
                .unwrap_or(f64::NAN)
        };
        (read("width"), read("height"))
    }

    /// Resize the canvas for a new page size
    pub fn resize(&mut self, page: PageSize) {
        let (width, height) = self.config.canvas_size(page);
        let root = self.root();
        self.tree.set_style(root, "width", format!("{}px", fmt_num(width)));
        self.tree.set_style(root, "height", format!("{}px", fmt_num(height)));
    }

    /// Write a pan/zoom matrix onto the viewport
    pub fn set_viewport_transform(&mut self, tx: f64, ty: f64, scale: f64) {
        let matrix = format!(
            "matrix({},0,0,{},{},{})",
            fmt_num(scale),
            fmt_num(scale),
            fmt_num(tx),
            fmt_num(ty)
        );
        self.tree.set_attr(self.viewport, "transform", matrix);
    }

    /// Model groups currently under the viewport, in render order
    pub fn model_groups(&self) -> Vec<NodeId> {
        self.tree
            .children(self.viewport)
            .iter()
            .copied()
            .filter(|c| self.tree.get(*c).is_some_and(|n| n.tag == "g"))
            .collect()
    }

    /// Model groups carrying a given class (`component`, `wire`)
    pub fn groups_with_class(&self, class: &str) -> Vec<NodeId> {
        self.model_groups()
            .into_iter()
            .filter(|id| self.tree.get(*id).and_then(Node::class) == Some(class))
            .collect()
    }

    /// Tracked element handles
    pub fn elements(&self) -> &[ElementHandle] {
        &self.elements
    }

    /// Render the canvas to SVG markup
    pub fn to_svg(&self) -> String {
        crate::renderers::svg::render_tree(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageSize {
        PageSize::new(1000.0, 500.0)
    }

    #[test]
    fn test_unique_names_from_context() {
        let mut context = SchematicContext::default();
        let a = Schematic::new(&mut context, page(), false);
        let b = Schematic::new(&mut context, page(), false);
        assert_eq!(a.name(), "schematic0");
        assert_eq!(b.name(), "schematic1");
    }

    #[test]
    fn test_root_attributes_and_size() {
        let mut context = SchematicContext::default();
        let schematic = Schematic::new(&mut context, page(), true);
        let root = schematic.node(schematic.root()).unwrap();
        assert_eq!(root.tag, "svg");
        assert_eq!(root.attr("xmlns"), Some(SVG_NAMESPACE));
        assert_eq!(root.attr("id"), Some("schematic0"));
        assert_eq!(schematic.size(), (1000.0, 400.0));
        assert!(schematic.is_debug());
    }

    #[test]
    fn test_viewport_is_only_child() {
        let schematic = Schematic::with_name("s", CanvasConfig::default(), page(), false);
        assert_eq!(schematic.tree().children(schematic.root()), &[schematic.viewport()]);
        let viewport = schematic.node(schematic.viewport()).unwrap();
        assert_eq!(viewport.tag, "g");
        assert_eq!(viewport.attr("id"), Some(VIEWPORT_ID));
        assert_eq!(schematic.tree().len(), 2);
    }

    #[test]
    fn test_pan_settings_on_root() {
        let schematic = Schematic::with_name("s", CanvasConfig::default(), page(), false);
        let root = schematic.node(schematic.root()).unwrap();
        assert_eq!(root.attr("data-zoom-scale"), Some("0.8"));
        assert_eq!(root.attr("data-pan"), Some("true"));
    }

    #[test]
    fn test_viewport_transform() {
        let mut schematic = Schematic::with_name("s", CanvasConfig::default(), page(), false);
        schematic.set_viewport_transform(10.0, -5.0, 0.8);
        let viewport = schematic.node(schematic.viewport()).unwrap();
        assert_eq!(viewport.attr("transform"), Some("matrix(0.8,0,0,0.8,10,-5)"));
    }

    #[test]
    fn test_nan_page_size_degrades_silently() {
        let schematic = Schematic::with_name("s", CanvasConfig::default(), PageSize::new(f64::NAN, 100.0), false);
        let root = schematic.node(schematic.root()).unwrap();
        assert_eq!(root.style("width"), Some("NaNpx"));
        assert!(schematic.size().0.is_nan());
    }

    #[test]
    fn test_resize() {
        let mut schematic = Schematic::with_name("s", CanvasConfig::default(), page(), false);
        schematic.resize(PageSize::new(200.0, 100.0));
        assert_eq!(schematic.size(), (200.0, 80.0));
    }
}
