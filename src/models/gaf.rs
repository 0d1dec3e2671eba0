//! GAF object model
//!
//! Objects as produced by the GAF reader (or handed over pre-parsed from
//! JavaScript). Only components and nets carry meaning for the importer;
//! every other record letter is preserved as `Other` and ignored.
//!
//! Pre-parsed objects are read leniently: a numeric string such as `"4500"`
//! counts as a number, and a field of the wrong shape is treated as missing
//! instead of rejecting the whole list.

use super::render_tree::fmt_num;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// GAF record type tag
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum GafObjectType {
    /// `C` record
    Component,
    /// `N` record (a wire segment)
    Net,
    /// Any other record letter (`L`, `B`, `T`, `P`, ...)
    Other(char),
}

impl Default for GafObjectType {
    fn default() -> Self {
        GafObjectType::Other('?')
    }
}

impl GafObjectType {
    pub fn from_tag(tag: char) -> Self {
        match tag {
            'C' => GafObjectType::Component,
            'N' => GafObjectType::Net,
            other => GafObjectType::Other(other),
        }
    }

    /// Whether the importer turns this record into a visual element
    pub fn is_imported(self) -> bool {
        matches!(self, GafObjectType::Component | GafObjectType::Net)
    }

    pub fn tag(self) -> char {
        match self {
            GafObjectType::Component => 'C',
            GafObjectType::Net => 'N',
            GafObjectType::Other(c) => c,
        }
    }
}

impl From<String> for GafObjectType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "COMPONENT" | "component" => GafObjectType::Component,
            "NET" | "net" => GafObjectType::Net,
            _ => GafObjectType::from_tag(value.chars().next().unwrap_or('?')),
        }
    }
}

impl From<GafObjectType> for String {
    fn from(value: GafObjectType) -> Self {
        value.tag().to_string()
    }
}

/// A single GAF object
///
/// Coordinates are optional: a field missing from a pre-parsed object stays
/// `None` and is rendered as `NaN`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GafObject {
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub object_type: GafObjectType,

    #[serde(default, deserialize_with = "lenient_coord")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub y: Option<f64>,

    #[serde(default, deserialize_with = "lenient_coord")]
    pub x1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub y1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub x2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub y2: Option<f64>,

    /// Symbol file name of a component, e.g. `resistor-1.sym`
    #[serde(default, deserialize_with = "lenient_text")]
    pub basename: Option<String>,

    /// `name=value` pairs from the attached `{ ... }` block
    #[serde(
        default,
        deserialize_with = "lenient_attributes",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub attributes: BTreeMap<String, String>,
}

/// Any JSON-like scalar, as handed over from JavaScript
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LooseValue {
    fn into_number(self) -> Option<f64> {
        match self {
            LooseValue::Number(n) => Some(n),
            LooseValue::Text(text) => text.trim().parse().ok(),
            LooseValue::Other(_) => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            LooseValue::Number(n) => Some(fmt_num(n)),
            LooseValue::Text(text) => Some(text),
            LooseValue::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseMap {
    Map(BTreeMap<String, LooseValue>),
    Other(IgnoredAny),
}

fn lenient_coord<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(LooseValue::deserialize(deserializer)?.into_number())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Text(text) => Some(text),
        _ => None,
    })
}

fn lenient_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GafObjectType, D::Error> {
    Ok(match LooseValue::deserialize(deserializer)? {
        LooseValue::Text(text) => GafObjectType::from(text),
        _ => GafObjectType::default(),
    })
}

fn lenient_attributes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(match LooseMap::deserialize(deserializer)? {
        LooseMap::Map(map) => map
            .into_iter()
            .filter_map(|(key, value)| Some((key, value.into_text()?)))
            .collect(),
        LooseMap::Other(_) => BTreeMap::new(),
    })
}

impl GafObject {
    fn empty(object_type: GafObjectType) -> Self {
        Self {
            object_type,
            x: None,
            y: None,
            x1: None,
            y1: None,
            x2: None,
            y2: None,
            basename: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn component(x: f64, y: f64, basename: impl Into<String>) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            basename: Some(basename.into()),
            ..Self::empty(GafObjectType::Component)
        }
    }

    pub fn net(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: Some(x1),
            y1: Some(y1),
            x2: Some(x2),
            y2: Some(y2),
            ..Self::empty(GafObjectType::Net)
        }
    }

    pub fn other(tag: char) -> Self {
        Self::empty(GafObjectType::Other(tag))
    }

    pub fn is_component(&self) -> bool {
        self.object_type == GafObjectType::Component
    }

    pub fn is_net(&self) -> bool {
        self.object_type == GafObjectType::Net
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A parsed GAF file
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GafModel {
    /// Content of the `v <date> <fileformat>` line, if any
    #[serde(default)]
    pub version: Option<String>,

    pub objects: Vec<GafObject>,
}

impl GafModel {
    pub fn components(&self) -> impl Iterator<Item = &GafObject> {
        self.objects.iter().filter(|o| o.is_component())
    }

    pub fn nets(&self) -> impl Iterator<Item = &GafObject> {
        self.objects.iter().filter(|o| o.is_net())
    }
}

impl From<Vec<GafObject>> for GafModel {
    fn from(objects: Vec<GafObject>) -> Self {
        Self {
            version: None,
            objects,
        }
    }
}
