//! GAF model import
//!
//! Replaces the visual model with the components and nets of a GAF source.
//! Coordinates are multiplied by `CanvasConfig::import_scale` (1/100 by
//! default); gschem sheets are far larger than a screen otherwise.

use super::{Schematic, SchematicResult};
use crate::models::gaf::{GafModel, GafObject, GafObjectType};
use crate::parse::parse_gaf;
use serde::{Deserialize, Serialize};

/// Input accepted by `Schematic::from_gaf`
#[derive(Debug, Clone)]
pub enum GafSource<'a> {
    /// Raw GAF text, read with the lenient GAF reader
    Text(&'a str),
    /// Objects parsed elsewhere
    Objects(&'a [GafObject]),
}

impl<'a> From<&'a str> for GafSource<'a> {
    fn from(text: &'a str) -> Self {
        GafSource::Text(text)
    }
}

impl<'a> From<&'a [GafObject]> for GafSource<'a> {
    fn from(objects: &'a [GafObject]) -> Self {
        GafSource::Objects(objects)
    }
}

impl<'a> From<&'a GafModel> for GafSource<'a> {
    fn from(model: &'a GafModel) -> Self {
        GafSource::Objects(&model.objects)
    }
}

/// What an import created
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub components: usize,
    pub wires: usize,
    pub title_blocks: usize,
    /// Records of any other type
    pub ignored: usize,
}

impl Schematic {
    /// Clear the model and rebuild it from a GAF source.
    ///
    /// Only raw text can fail (when it cannot be read at all). Object lists
    /// are never validated: missing coordinates are drawn as `NaN`.
    pub fn from_gaf<'a>(&mut self, source: impl Into<GafSource<'a>>) -> SchematicResult<ImportSummary> {
        let parsed;
        let objects = match source.into() {
            GafSource::Text(text) => {
                parsed = parse_gaf(text)?;
                parsed.objects.as_slice()
            }
            GafSource::Objects(objects) => objects,
        };

        self.clear_svg();

        let zoom_x = self.config.import_scale;
        let zoom_y = zoom_x;
        let mut summary = ImportSummary::default();

        for object in objects {
            match object.object_type {
                GafObjectType::Component => {
                    if object.basename.as_deref() == Some(self.config.title_block_basename.as_str()) {
                        summary.title_blocks += 1;
                        continue;
                    }
                    self.append_component(
                        coord(object.x) * zoom_x,
                        coord(object.y) * zoom_y,
                        None,
                    );
                    summary.components += 1;
                }
                GafObjectType::Net => {
                    self.append_wire(
                        coord(object.x1) * zoom_x,
                        coord(object.y1) * zoom_y,
                        coord(object.x2) * zoom_x,
                        coord(object.y2) * zoom_y,
                    );
                    summary.wires += 1;
                }
                GafObjectType::Other(_) => summary.ignored += 1,
            }
        }

        log::info!(
            "{}: imported {} components, {} wires ({} title blocks, {} other records skipped)",
            self.name,
            summary.components,
            summary.wires,
            summary.title_blocks,
            summary.ignored
        );
        Ok(summary)
    }
}

fn coord(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}
