use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Attribute key holding the municipality name.
pub const MUNICIPALITY_KEY: &str = "nombre_municipio";
/// Attribute key holding the municipal population count.
pub const POPULATION_KEY: &str = "POBLACION_MUNI";

/// The two data fields the map can encode.
///
/// This is a closed set: the filter control, the color scale and the popup
/// builder all key off one of these, and nothing else. A selector value
/// outside the set is a configuration error caught at parse time, not a
/// runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalField {
    /// Seasonal rentals (`temporada`).
    #[default]
    Seasonal,
    /// Tourist rentals (`turisticas`).
    Tourist,
}

impl RentalField {
    pub const ALL: [RentalField; 2] = [RentalField::Seasonal, RentalField::Tourist];

    /// The feature attribute this field reads its value from.
    pub fn attribute_key(self) -> &'static str {
        match self {
            RentalField::Seasonal => "temporada",
            RentalField::Tourist => "turisticas",
        }
    }

    /// Human-readable label shown in the popup body.
    pub fn label(self) -> &'static str {
        match self {
            RentalField::Seasonal => "Alquiler de Temporada",
            RentalField::Tourist => "Viviendas Turísticas",
        }
    }
}

impl FromStr for RentalField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temporada" => Ok(RentalField::Seasonal),
            "turisticas" => Ok(RentalField::Tourist),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for RentalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_key())
    }
}
