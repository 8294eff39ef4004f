use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::field::RentalField;
use crate::format::parse_number;
use crate::geometry::Geometry;

/// A raw attribute value as delivered by the tile source.
///
/// Tiled vector data does not guarantee types: counts arrive as numbers in
/// some tiles and as strings in others, and any attribute may simply be
/// absent. Absence is modelled by the key missing from the property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

/// A rendered map feature: a geometry plus its attribute mapping.
///
/// Features are handed over transiently by the rendering engine (per click or
/// per viewport query) and are never stored beyond a single handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: HashMap::new(),
        }
    }

    /// Builder-style attribute insertion, mainly for tests and demos.
    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The attribute as text, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.properties.get(key)? {
            PropertyValue::Text(s) => Some(s.as_str()),
            PropertyValue::Number(_) => None,
        }
    }

    /// The numeric value this feature holds for `field`, zero when missing
    /// or unparseable. This is the same normalisation the formatter applies,
    /// so color lookup and popup text always agree.
    pub fn metric(&self, field: RentalField) -> f64 {
        parse_number(self.property(field.attribute_key())).unwrap_or(0.0)
    }
}
