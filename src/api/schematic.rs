//! JavaScript-facing schematic API
//!
//! `EditorContext` owns the name allocator and configuration of one page and
//! creates `Schematic` objects. Each JS `Schematic` wraps a Rust canvas and,
//! once mounted in a host element, mirrors the render tree into its own
//! `<svg>` there after every mutation.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::helpers::{deserialize, serialize, to_js_error, window_page_size};
use super::mount::DomMount;
use crate::config::{CanvasConfig, PageSize};
use crate::context::SchematicContext;
use crate::models::gaf::{GafModel, GafObject};
use crate::models::ElementHandle;
use crate::schematic::{GafSource, Schematic};
use crate::{wasm_info, wasm_log, wasm_warn};

/// Pre-parsed GAF input: either a bare list or an object with `objects`
#[derive(Deserialize)]
#[serde(untagged)]
enum PreParsedGaf {
    List(Vec<GafObject>),
    Model(GafModel),
}

#[wasm_bindgen]
pub struct EditorContext {
    inner: SchematicContext,
}

#[wasm_bindgen]
impl EditorContext {
    /// Create a context. `config` may be `undefined` or a partial
    /// `CanvasConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EditorContext, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            CanvasConfig::default()
        } else {
            deserialize::<CanvasConfig>(config, "Invalid canvas config")?
        };
        Ok(EditorContext {
            inner: SchematicContext::new(config),
        })
    }

    /// Create a schematic inside `parent`, sized from explicit page
    /// dimensions or, when they are omitted, from the browser window
    #[wasm_bindgen(js_name = createSchematic)]
    pub fn create_schematic(
        &mut self,
        parent: Option<Element>,
        page_width: Option<f64>,
        page_height: Option<f64>,
        debug: Option<bool>,
    ) -> Result<SchematicView, JsValue> {
        let page = match (page_width, page_height) {
            (Some(width), Some(height)) => PageSize::new(width, height),
            _ => window_page_size().unwrap_or_else(|| {
                wasm_warn!("No page size available, canvas size will be NaN");
                PageSize::new(f64::NAN, f64::NAN)
            }),
        };
        let schematic = Schematic::new(&mut self.inner, page, debug.unwrap_or(false));
        wasm_info!("Created {}", schematic.name());

        let mut view = SchematicView {
            inner: schematic,
            mount: None,
        };
        if let Some(parent) = parent {
            view.mount(&parent)?;
        }
        Ok(view)
    }
}

#[wasm_bindgen(js_name = Schematic)]
pub struct SchematicView {
    inner: Schematic,
    mount: Option<DomMount>,
}

#[wasm_bindgen(js_class = Schematic)]
impl SchematicView {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn debug(&self) -> bool {
        self.inner.is_debug()
    }

    #[wasm_bindgen(js_name = appendComponent)]
    pub fn append_component(&mut self, x: f64, y: f64, type_hint: Option<String>) -> Result<JsValue, JsValue> {
        let handle = self.inner.append_component(x, y, type_hint.as_deref());
        self.sync()?;
        serialize(&handle, "Failed to serialize component handle")
    }

    #[wasm_bindgen(js_name = appendWire)]
    pub fn append_wire(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<JsValue, JsValue> {
        let handle = self.inner.append_wire(x1, y1, x2, y2);
        self.sync()?;
        serialize(&handle, "Failed to serialize wire handle")
    }

    #[wasm_bindgen(js_name = newCircleTerminal)]
    pub fn new_circle_terminal(&mut self, style_class: &str) -> Result<JsValue, JsValue> {
        let handle = self.inner.new_circle_terminal(style_class);
        self.sync()?;
        serialize(&handle, "Failed to serialize terminal handle")
    }

    #[wasm_bindgen(js_name = newPathElement)]
    pub fn new_path_element(&mut self) -> Result<JsValue, JsValue> {
        let handle = self.inner.new_path_element();
        self.sync()?;
        serialize(&handle, "Failed to serialize path handle")
    }

    #[wasm_bindgen(js_name = newBoundingBox)]
    pub fn new_bounding_box(&mut self) -> Result<JsValue, JsValue> {
        let handle = self.inner.new_bounding_box();
        self.sync()?;
        serialize(&handle, "Failed to serialize bounding box handle")
    }

    /// Track an element handle; returns `false` if it was already tracked
    pub fn append(&mut self, element: JsValue) -> Result<bool, JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.append(handle).map_err(to_js_error)
    }

    pub fn remove(&mut self, element: JsValue) -> Result<(), JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.remove(handle).map_err(to_js_error)?;
        self.sync()
    }

    #[wasm_bindgen(js_name = elementCount)]
    pub fn element_count(&self) -> usize {
        self.inner.elements().len()
    }

    #[wasm_bindgen(js_name = clearSVG)]
    pub fn clear_svg(&mut self) -> Result<usize, JsValue> {
        let removed = self.inner.clear_svg();
        self.sync()?;
        Ok(removed)
    }

    /// Move an element: a model group or path gets a new translation, a
    /// terminal its centre and a bounding box its top-left corner
    #[wasm_bindgen(js_name = moveTo)]
    pub fn move_to(&mut self, element: JsValue, x: f64, y: f64) -> Result<(), JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.move_to(handle, x, y).map_err(to_js_error)?;
        self.sync()
    }

    #[wasm_bindgen(js_name = setPathData)]
    pub fn set_path_data(&mut self, element: JsValue, d: &str) -> Result<(), JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.set_path_data(handle, d).map_err(to_js_error)?;
        self.sync()
    }

    #[wasm_bindgen(js_name = setBounds)]
    pub fn set_bounds(&mut self, element: JsValue, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.set_bounds(handle, x, y, width, height).map_err(to_js_error)?;
        self.sync()
    }

    #[wasm_bindgen(js_name = setRadius)]
    pub fn set_radius(&mut self, element: JsValue, r: f64) -> Result<(), JsValue> {
        let handle: ElementHandle = deserialize(element, "Invalid element handle")?;
        self.inner.set_radius(handle, r).map_err(to_js_error)?;
        self.sync()
    }

    #[wasm_bindgen(js_name = drawGrid)]
    pub fn draw_grid(&mut self, spacing: f64) -> Result<(), JsValue> {
        self.inner.draw_grid(spacing);
        self.sync()
    }

    #[wasm_bindgen(js_name = setViewportTransform)]
    pub fn set_viewport_transform(&mut self, tx: f64, ty: f64, scale: f64) -> Result<(), JsValue> {
        self.inner.set_viewport_transform(tx, ty, scale);
        self.sync()
    }

    pub fn resize(&mut self, page_width: f64, page_height: f64) -> Result<(), JsValue> {
        self.inner.resize(PageSize::new(page_width, page_height));
        self.sync()
    }

    /// Import a GAF source: a raw string or pre-parsed objects
    #[wasm_bindgen(js_name = fromGAF)]
    pub fn from_gaf(&mut self, source: JsValue) -> Result<JsValue, JsValue> {
        let result = match source.as_string() {
            Some(text) => {
                wasm_log!("fromGAF: reading {} bytes of GAF text", text.len());
                self.inner.from_gaf(GafSource::Text(&text))
            }
            None => {
                let objects = match deserialize::<PreParsedGaf>(source, "Invalid GAF objects")? {
                    PreParsedGaf::List(objects) => objects,
                    PreParsedGaf::Model(model) => model.objects,
                };
                wasm_log!("fromGAF: importing {} pre-parsed objects", objects.len());
                self.inner.from_gaf(objects.as_slice())
            }
        };
        let summary = result.map_err(to_js_error)?;
        self.sync()?;
        serialize(&summary, "Failed to serialize import summary")
    }

    #[wasm_bindgen(js_name = toSvg)]
    pub fn to_svg(&self) -> String {
        self.inner.to_svg()
    }

    /// Append the canvas `<svg>` to a host element, or move it there if it
    /// is already mounted elsewhere
    pub fn mount(&mut self, parent: &Element) -> Result<(), JsValue> {
        match &self.mount {
            Some(mount) => mount.reparent(parent)?,
            None => self.mount = Some(DomMount::new(parent)?),
        }
        self.sync()
    }

    /// The mounted `<svg>` element, for binding a pan/zoom script
    #[wasm_bindgen(getter, js_name = svgElement)]
    pub fn svg_element(&self) -> Option<Element> {
        self.mount.as_ref().map(|mount| mount.svg().clone())
    }
}

impl SchematicView {
    pub fn schematic(&self) -> &Schematic {
        &self.inner
    }

    /// Mirror the render tree into the mounted `<svg>`
    fn sync(&mut self) -> Result<(), JsValue> {
        match self.mount.as_mut() {
            Some(mount) => mount.sync(&self.inner),
            None => Ok(()),
        }
    }
}
