//! Primitive factory
//!
//! Creation methods for the visual elements of a schematic. Model elements
//! (components, wires) are groups under the viewport, positioned with a
//! `translate` transform; editing affordances are created on the canvas root.

use super::library::{resolve_shape, ComponentShape};
use super::{Schematic, SchematicError, SchematicResult};
use crate::models::{fmt_num, ElementHandle, ElementKind, NodeId};

impl Schematic {
    /// Append a component marker at `(x, y)`.
    ///
    /// `type_hint` goes through the component library; without a library hit
    /// (always, today) a fixed-size square is drawn at the group origin.
    pub fn append_component(&mut self, x: f64, y: f64, type_hint: Option<&str>) -> ElementHandle {
        let size = self.config.component_size;
        let shape = resolve_shape(self.library.as_ref(), type_hint, size);

        let group = self.new_model_group(ElementKind::Component, x, y, false);
        match shape {
            ComponentShape::Marker { size } => {
                let rect = self.child(group, "rect");
                self.tree.set_attr(rect, "x", "0");
                self.tree.set_attr(rect, "y", "0");
                self.tree.set_attr(rect, "width", format!("{}px", fmt_num(size)));
                self.tree.set_attr(rect, "height", format!("{}px", fmt_num(size)));
            }
            ComponentShape::Symbol { name, svg } => {
                self.tree.set_attr(group, "data-symbol", name);
                self.tree.set_markup(group, svg);
            }
        }

        if self.debug {
            log::debug!("{}: component at ({}, {})", self.name, fmt_num(x), fmt_num(y));
        }
        ElementHandle::new(group, ElementKind::Component)
    }

    /// Append a wire from `(x1, y1)` to `(x2, y2)`.
    ///
    /// The group is translated to the start point and holds a line relative to
    /// it. Wires are inserted first so they render beneath components.
    pub fn append_wire(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> ElementHandle {
        let group = self.new_model_group(ElementKind::Wire, x1, y1, true);
        let line = self.child(group, "line");
        self.tree.set_attr(line, "x1", "0");
        self.tree.set_attr(line, "y1", "0");
        self.tree.set_attr(line, "x2", fmt_num(x2 - x1));
        self.tree.set_attr(line, "y2", fmt_num(y2 - y1));

        if self.debug {
            log::debug!(
                "{}: wire ({}, {}) -> ({}, {})",
                self.name,
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(x2),
                fmt_num(y2)
            );
        }
        ElementHandle::new(group, ElementKind::Wire)
    }

    /// Circle terminal on the canvas root, styled by `style_class`
    pub fn new_circle_terminal(&mut self, style_class: &str) -> ElementHandle {
        let circle = self.child(self.root(), "circle");
        self.tree.set_attr(circle, "class", style_class);
        self.tree.set_attr(circle, "cx", "0");
        self.tree.set_attr(circle, "cy", "0");
        self.tree.set_attr(circle, "r", "3");
        ElementHandle::new(circle, ElementKind::Terminal)
    }

    /// Empty path on the canvas root, for rubber-band wires
    pub fn new_path_element(&mut self) -> ElementHandle {
        let path = self.child(self.root(), "path");
        self.tree.set_attr(path, "class", ElementKind::Path.class_name());
        self.tree.set_attr(path, "d", "");
        ElementHandle::new(path, ElementKind::Path)
    }

    /// Zero-sized rectangle on the canvas root, for selection boxes
    pub fn new_bounding_box(&mut self) -> ElementHandle {
        let rect = self.child(self.root(), "rect");
        self.tree.set_attr(rect, "class", ElementKind::BoundingBox.class_name());
        for name in ["x", "y", "width", "height"] {
            self.tree.set_attr(rect, name, "0");
        }
        ElementHandle::new(rect, ElementKind::BoundingBox)
    }

    /// Track a handle in the element list. Returns `false` if it was
    /// already tracked; the list never holds the same handle twice.
    pub fn append(&mut self, element: ElementHandle) -> SchematicResult<bool> {
        if !self.tree.contains(element.node) {
            return Err(SchematicError::UnknownNode(element.node));
        }
        if self.elements.contains(&element) {
            return Ok(false);
        }
        self.elements.push(element);
        Ok(true)
    }

    /// Remove an element from the render tree and the element list
    pub fn remove(&mut self, element: ElementHandle) -> SchematicResult<()> {
        if self.tree.remove(element.node) == 0 {
            return Err(SchematicError::UnknownNode(element.node));
        }
        self.elements.retain(|e| e.node != element.node);
        Ok(())
    }

    /// Move an element to `(x, y)`.
    ///
    /// Model groups and paths get a new translation, a terminal moves its
    /// centre and a bounding box its top-left corner.
    pub fn move_to(&mut self, element: ElementHandle, x: f64, y: f64) -> SchematicResult<()> {
        self.live(element)?;
        let node = element.node;
        match element.kind {
            ElementKind::Terminal => {
                self.tree.set_attr(node, "cx", fmt_num(x));
                self.tree.set_attr(node, "cy", fmt_num(y));
            }
            ElementKind::BoundingBox => {
                self.tree.set_attr(node, "x", fmt_num(x));
                self.tree.set_attr(node, "y", fmt_num(y));
            }
            ElementKind::Component | ElementKind::Wire | ElementKind::Path => {
                self.tree.set_attr(node, "transform", translate(x, y));
            }
        }
        Ok(())
    }

    /// Replace the `d` attribute of a path element
    pub fn set_path_data(&mut self, element: ElementHandle, d: &str) -> SchematicResult<()> {
        self.expect_kind(element, ElementKind::Path)?;
        self.tree.set_attr(element.node, "d", d);
        Ok(())
    }

    /// Set the geometry of a bounding box.
    ///
    /// A negative width or height (a selection dragged up or left) is
    /// normalised so the rectangle stays valid SVG.
    pub fn set_bounds(
        &mut self,
        element: ElementHandle,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> SchematicResult<()> {
        self.expect_kind(element, ElementKind::BoundingBox)?;
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
        let node = element.node;
        self.tree.set_attr(node, "x", fmt_num(x));
        self.tree.set_attr(node, "y", fmt_num(y));
        self.tree.set_attr(node, "width", fmt_num(width));
        self.tree.set_attr(node, "height", fmt_num(height));
        Ok(())
    }

    /// Set the radius of a circle terminal
    pub fn set_radius(&mut self, element: ElementHandle, r: f64) -> SchematicResult<()> {
        self.expect_kind(element, ElementKind::Terminal)?;
        self.tree.set_attr(element.node, "r", fmt_num(r));
        Ok(())
    }

    /// Remove every model group under the viewport. Non-group decorations
    /// (the grid) stay. Returns the number of groups removed.
    pub fn clear_svg(&mut self) -> usize {
        let removed = self.tree.remove_children_with_tag(self.viewport, "g");
        let tree = &self.tree;
        self.elements.retain(|e| tree.contains(e.node));
        if self.debug {
            log::debug!("{}: cleared {} model groups", self.name, removed.len());
        }
        removed.len()
    }

    /// Add a grid decoration under the viewport
    pub fn draw_grid(&mut self, spacing: f64) -> NodeId {
        let pattern_id = format!("{}-grid", self.name);

        let defs = self.child(self.root(), "defs");
        let pattern = self.child(defs, "pattern");
        self.tree.set_attr(pattern, "id", pattern_id.as_str());
        self.tree.set_attr(pattern, "width", fmt_num(spacing));
        self.tree.set_attr(pattern, "height", fmt_num(spacing));
        self.tree.set_attr(pattern, "patternUnits", "userSpaceOnUse");
        let dot = self.child(pattern, "circle");
        self.tree.set_attr(dot, "cx", "0");
        self.tree.set_attr(dot, "cy", "0");
        self.tree.set_attr(dot, "r", "0.5");

        let grid = self.child(self.viewport, "rect");
        self.tree.set_attr(grid, "class", "grid");
        self.tree.set_attr(grid, "x", "-50%");
        self.tree.set_attr(grid, "y", "-50%");
        self.tree.set_attr(grid, "width", "200%");
        self.tree.set_attr(grid, "height", "200%");
        self.tree.set_attr(grid, "fill", format!("url(#{})", pattern_id));
        grid
    }

    fn live(&self, element: ElementHandle) -> SchematicResult<()> {
        if self.tree.contains(element.node) {
            Ok(())
        } else {
            Err(SchematicError::UnknownNode(element.node))
        }
    }

    fn expect_kind(&self, element: ElementHandle, expected: ElementKind) -> SchematicResult<()> {
        self.live(element)?;
        if element.kind != expected {
            return Err(SchematicError::WrongKind {
                node: element.node,
                expected,
                found: element.kind,
            });
        }
        Ok(())
    }

    fn new_model_group(&mut self, kind: ElementKind, x: f64, y: f64, first: bool) -> NodeId {
        let group = if first {
            self.tree.prepend(self.viewport, "g")
        } else {
            self.tree.append(self.viewport, "g")
        };
        let group = group.unwrap_or_else(|| self.tree.create("g"));
        self.tree.set_attr(group, "class", kind.class_name());
        self.tree.set_attr(group, "transform", translate(x, y));
        group
    }

    fn child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .append(parent, tag)
            .unwrap_or_else(|| self.tree.create(tag))
    }
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", fmt_num(x), fmt_num(y))
}

#[cfg(test)]
mod tests {
    use crate::config::{CanvasConfig, PageSize};
    use crate::models::ElementKind;
    use crate::schematic::{ComponentLibrary, ComponentShape, LibraryError, Schematic, SchematicError};

    struct DiodeLibrary;

    impl ComponentLibrary for DiodeLibrary {
        fn lookup(&self, type_hint: &str) -> Result<ComponentShape, LibraryError> {
            match type_hint {
                "diode" => Ok(ComponentShape::Symbol {
                    name: "diode".to_string(),
                    svg: "<path d=\"M0 0 L10 5 L0 10 Z\"/>".to_string(),
                }),
                other => Err(LibraryError::UnknownSymbol(other.to_string())),
            }
        }
    }

    fn schematic() -> Schematic {
        Schematic::with_name("test", CanvasConfig::default(), PageSize::new(800.0, 600.0), false)
    }

    #[test]
    fn test_append_component_creates_translated_square() {
        let mut s = schematic();
        let handle = s.append_component(12.5, -3.0, None);
        assert_eq!(handle.kind, ElementKind::Component);

        let group = s.node(handle.node).unwrap();
        assert_eq!(group.tag, "g");
        assert_eq!(group.class(), Some("component"));
        assert_eq!(group.translation(), Some((12.5, -3.0)));
        assert_eq!(group.children.len(), 1);

        let rect = s.node(group.children[0]).unwrap();
        assert_eq!(rect.tag, "rect");
        assert_eq!(rect.attr("width"), Some("7px"));
        assert_eq!(rect.attr("height"), Some("7px"));
        assert_eq!(rect.attr_f64("x"), Some(0.0));
    }

    #[test]
    fn test_type_hint_without_library_draws_marker() {
        let mut s = schematic();
        let handle = s.append_component(0.0, 0.0, Some("resistor"));
        let group = s.node(handle.node).unwrap();
        assert_eq!(s.node(group.children[0]).unwrap().tag, "rect");
        assert!(group.attr("data-symbol").is_none());
    }

    #[test]
    fn test_append_wire_endpoints() {
        let mut s = schematic();
        let handle = s.append_wire(3.0, 4.0, 10.0, -2.0);
        let group = s.node(handle.node).unwrap();
        assert_eq!(group.class(), Some("wire"));
        let (tx, ty) = group.translation().unwrap();
        let line = s.node(group.children[0]).unwrap();
        assert_eq!(line.tag, "line");
        assert_eq!(line.attr_f64("x1").unwrap() + tx, 3.0);
        assert_eq!(line.attr_f64("y1").unwrap() + ty, 4.0);
        assert_eq!(line.attr_f64("x2").unwrap() + tx, 10.0);
        assert_eq!(line.attr_f64("y2").unwrap() + ty, -2.0);
    }

    #[test]
    fn test_wires_render_beneath_components() {
        let mut s = schematic();
        let component = s.append_component(1.0, 1.0, None);
        let wire = s.append_wire(0.0, 0.0, 1.0, 1.0);
        assert_eq!(s.model_groups(), vec![wire.node, component.node]);
    }

    #[test]
    fn test_affordances_live_on_root() {
        let mut s = schematic();
        let terminal = s.new_circle_terminal("pin-hover");
        let path = s.new_path_element();
        let bbox = s.new_bounding_box();

        let root_children = s.tree().children(s.root());
        for handle in [terminal, path, bbox] {
            assert!(root_children.contains(&handle.node));
        }
        assert_eq!(s.node(terminal.node).unwrap().class(), Some("pin-hover"));
        assert_eq!(s.node(path.node).unwrap().tag, "path");
        assert_eq!(s.node(bbox.node).unwrap().class(), Some("bounding-box"));
        assert!(s.model_groups().is_empty());
    }

    #[test]
    fn test_append_deduplicates() {
        let mut s = schematic();
        let handle = s.append_component(0.0, 0.0, None);
        assert_eq!(s.append(handle), Ok(true));
        assert_eq!(s.append(handle), Ok(false));
        assert_eq!(s.elements(), &[handle]);
    }

    #[test]
    fn test_append_rejects_removed_node() {
        let mut s = schematic();
        let handle = s.append_wire(0.0, 0.0, 1.0, 0.0);
        s.remove(handle).unwrap();
        assert_eq!(s.append(handle), Err(SchematicError::UnknownNode(handle.node)));
        assert_eq!(s.remove(handle), Err(SchematicError::UnknownNode(handle.node)));
    }

    #[test]
    fn test_clear_keeps_grid_and_affordances() {
        let mut s = schematic();
        let grid = s.draw_grid(10.0);
        let terminal = s.new_circle_terminal("pin");
        let component = s.append_component(1.0, 2.0, None);
        s.append(component).unwrap();
        s.append(terminal).unwrap();
        s.append_wire(0.0, 0.0, 5.0, 5.0);

        assert_eq!(s.clear_svg(), 2);
        assert!(s.model_groups().is_empty());
        assert_eq!(s.tree().children(s.viewport()), &[grid]);
        assert!(s.tree().contains(terminal.node));
        assert_eq!(s.elements(), &[terminal]);
    }

    #[test]
    fn test_clear_then_append_leaves_only_new_elements() {
        let mut s = schematic();
        s.append_component(1.0, 1.0, None);
        s.append_wire(0.0, 0.0, 1.0, 1.0);
        s.clear_svg();

        let a = s.append_component(5.0, 5.0, None);
        let b = s.append_wire(1.0, 1.0, 2.0, 2.0);
        assert_eq!(s.model_groups(), vec![b.node, a.node]);

        s.clear_svg();
        s.clear_svg();
        assert!(s.model_groups().is_empty());
    }

    #[test]
    fn test_move_to() {
        let mut s = schematic();
        let handle = s.append_component(0.0, 0.0, None);
        s.move_to(handle, 4.0, 8.0).unwrap();
        assert_eq!(s.node(handle.node).unwrap().translation(), Some((4.0, 8.0)));
    }

    #[test]
    fn test_move_terminal_and_bounding_box() {
        let mut s = schematic();
        let terminal = s.new_circle_terminal("pin");
        let bbox = s.new_bounding_box();
        let path = s.new_path_element();

        s.move_to(terminal, 45.0, 3.5).unwrap();
        s.move_to(bbox, -2.0, 7.0).unwrap();
        s.move_to(path, 1.0, 1.0).unwrap();

        let circle = s.node(terminal.node).unwrap();
        assert_eq!(circle.attr("cx"), Some("45"));
        assert_eq!(circle.attr("cy"), Some("3.5"));
        assert!(circle.attr("transform").is_none());
        let rect = s.node(bbox.node).unwrap();
        assert_eq!((rect.attr_f64("x"), rect.attr_f64("y")), (Some(-2.0), Some(7.0)));
        assert_eq!(s.node(path.node).unwrap().translation(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_set_path_data() {
        let mut s = schematic();
        let path = s.new_path_element();
        s.set_path_data(path, "M0 0 L10 0").unwrap();
        assert_eq!(s.node(path.node).unwrap().attr("d"), Some("M0 0 L10 0"));
        assert!(s.to_svg().contains(r#"<path class="path" d="M0 0 L10 0"/>"#));
    }

    #[test]
    fn test_set_bounds_normalises_negative_extent() {
        let mut s = schematic();
        let bbox = s.new_bounding_box();
        s.set_bounds(bbox, 1.0, 2.0, 30.0, 40.0).unwrap();
        let rect = s.node(bbox.node).unwrap();
        assert_eq!(rect.attr("width"), Some("30"));
        assert_eq!(rect.attr("height"), Some("40"));

        s.set_bounds(bbox, 10.0, 10.0, -4.0, -6.0).unwrap();
        let rect = s.node(bbox.node).unwrap();
        assert_eq!(rect.attr("x"), Some("6"));
        assert_eq!(rect.attr("y"), Some("4"));
        assert_eq!(rect.attr("width"), Some("4"));
        assert_eq!(rect.attr("height"), Some("6"));
    }

    #[test]
    fn test_set_radius() {
        let mut s = schematic();
        let terminal = s.new_circle_terminal("pin");
        s.set_radius(terminal, 5.5).unwrap();
        assert_eq!(s.node(terminal.node).unwrap().attr("r"), Some("5.5"));
    }

    #[test]
    fn test_mutators_check_kind_and_liveness() {
        let mut s = schematic();
        let path = s.new_path_element();
        let bbox = s.new_bounding_box();

        assert_eq!(
            s.set_bounds(path, 0.0, 0.0, 1.0, 1.0),
            Err(SchematicError::WrongKind {
                node: path.node,
                expected: ElementKind::BoundingBox,
                found: ElementKind::Path,
            })
        );
        assert!(matches!(s.set_path_data(bbox, "M0 0"), Err(SchematicError::WrongKind { .. })));
        assert!(matches!(s.set_radius(bbox, 1.0), Err(SchematicError::WrongKind { .. })));

        s.remove(path).unwrap();
        assert_eq!(s.set_path_data(path, "M0 0"), Err(SchematicError::UnknownNode(path.node)));
        assert_eq!(s.move_to(path, 1.0, 1.0), Err(SchematicError::UnknownNode(path.node)));
    }

    #[test]
    fn test_fractional_coordinates_survive() {
        let mut s = schematic();
        let component = s.append_component(1e-7, 0.1234567, None);
        assert_eq!(s.node(component.node).unwrap().translation(), Some((1e-7, 0.1234567)));

        let wire = s.append_wire(0.0, 0.0, 2.5e-7, 45.00000001);
        let group = s.node(wire.node).unwrap();
        let line = s.node(group.children[0]).unwrap();
        assert_eq!(line.attr_f64("x2"), Some(2.5e-7));
        assert_eq!(line.attr_f64("y2"), Some(45.00000001));
        assert_eq!(line.attr("x2"), Some("0.00000025"));
    }

    #[test]
    fn test_custom_marker_size() {
        let config = CanvasConfig { component_size: 10.0, ..CanvasConfig::default() };
        let mut s = Schematic::with_name("sized", config, PageSize::new(100.0, 100.0), false);
        let handle = s.append_component(0.0, 0.0, None);
        let rect = s.tree().children(handle.node)[0];
        assert_eq!(s.node(rect).unwrap().attr("width"), Some("10px"));
    }

    #[test]
    fn test_library_symbol_replaces_marker() {
        let mut s = schematic();
        s.set_library(Box::new(DiodeLibrary));
        let diode = s.append_component(2.0, 3.0, Some("diode"));
        let group = s.node(diode.node).unwrap();
        assert_eq!(group.attr("data-symbol"), Some("diode"));
        assert!(group.children.is_empty());
        assert!(s.to_svg().contains(r#"<path d="M0 0 L10 5 L0 10 Z"/></g>"#));

        let other = s.append_component(0.0, 0.0, Some("triode"));
        assert_eq!(s.tree().children(other.node).len(), 1);
    }
}
