use serde_json::{json, Value};
use tracing::debug;

use rentamap_core::RentalField;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An opaque display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form, as the rendering engine expects.
    pub fn hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const fn rgb(hex: u32) -> Rgb {
    Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn lerp_color(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let inv = 1.0 - t;
    Rgb::new(
        (a.r as f64 * inv + b.r as f64 * t) as u8,
        (a.g as f64 * inv + b.g as f64 * t) as u8,
        (a.b as f64 * inv + b.b as f64 * t) as u8,
    )
}

// ---------------------------------------------------------------------------
// Breakpoint scale
// ---------------------------------------------------------------------------

/// Rental-density breakpoints: light green for empty municipalities through
/// deep teal for the densest ones.
const RENTAL_STOPS: [(f64, Rgb); 10] = [
    (0.0, rgb(0xf7fcf5)),
    (1.0, rgb(0xccebc8)),
    (10.0, rgb(0xa1d99b)),
    (50.0, rgb(0x83d79b)),
    (100.0, rgb(0x79d69a)),
    (500.0, rgb(0x51d399)),
    (1000.0, rgb(0x01cc96)),
    (2000.0, rgb(0x01a378)),
    (3000.0, rgb(0x018e69)),
    (5000.0, rgb(0x007959)),
];

/// A piecewise-linear value→color scale over ordered breakpoints.
///
/// The breakpoint table is shared and immutable for the process lifetime;
/// which *attribute* feeds the lookup is the only thing that changes when the
/// user switches fields. Values below the first threshold clamp to its color,
/// values at or above the last clamp to the last.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<(f64, Rgb)>,
}

impl ColorScale {
    /// Build a scale from explicit breakpoints.
    ///
    /// Thresholds must be finite and strictly increasing; anything else is a
    /// configuration error, caught here rather than at lookup time.
    pub fn new(stops: Vec<(f64, Rgb)>) -> crate::Result<Self> {
        if stops.is_empty() {
            return Err(RenderError::EmptyScale);
        }
        for (i, &(threshold, _)) in stops.iter().enumerate() {
            let ordered = threshold.is_finite() && (i == 0 || stops[i - 1].0 < threshold);
            if !ordered {
                return Err(RenderError::UnorderedBreakpoints { index: i });
            }
        }
        Ok(Self { stops })
    }

    /// The fixed scale used for both rental-count fields.
    pub fn rental_density() -> Self {
        // The builtin table is ordered by construction.
        Self {
            stops: RENTAL_STOPS.to_vec(),
        }
    }

    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    /// Map an attribute value to its display color.
    ///
    /// Non-finite input is normalised to 0, the same fallback the formatter
    /// applies, so a municipality with junk data paints like an empty one.
    pub fn color_for(&self, value: f64) -> Rgb {
        let value = if value.is_finite() { value } else { 0.0 };
        let (first, last) = (self.stops[0], self.stops[self.stops.len() - 1]);
        if value <= first.0 {
            return first.1;
        }
        if value >= last.0 {
            return last.1;
        }
        for window in self.stops.windows(2) {
            let (lo_t, lo_c) = window[0];
            let (hi_t, hi_c) = window[1];
            if value < hi_t {
                let t = (value - lo_t) / (hi_t - lo_t);
                return lerp_color(lo_c, hi_c, t);
            }
        }
        last.1
    }

    /// The engine-facing paint expression for `field`.
    ///
    /// Producing a fresh expression on field change is the only way color
    /// changes propagate; the scale itself never mutates.
    pub fn paint_expression(&self, field: RentalField) -> Value {
        debug!(%field, "building fill-color expression");
        let mut expr = vec![
            json!("interpolate"),
            json!(["linear"]),
            json!(["to-number", ["get", field.attribute_key()], 0]),
        ];
        for &(threshold, color) in &self.stops {
            expr.push(json!(threshold));
            expr.push(json!(color.hex_string()));
        }
        Value::Array(expr)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::rental_density()
    }
}

/// Full fill-layer definition for the municipality polygons.
pub fn fill_layer(
    layer_id: &str,
    source: &str,
    source_layer: &str,
    scale: &ColorScale,
    field: RentalField,
) -> Value {
    json!({
        "id": layer_id,
        "type": "fill",
        "source": source,
        "source-layer": source_layer,
        "paint": {
            "fill-color": scale.paint_expression(field),
            "fill-opacity": 0.75,
            "fill-outline-color": "rgba(0,0,0,0.2)"
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(c: Rgb) -> f64 {
        0.2126 * c.r as f64 + 0.7152 * c.g as f64 + 0.0722 * c.b as f64
    }

    #[test]
    fn exact_breakpoints_hit_their_colors() {
        let scale = ColorScale::rental_density();
        for &(threshold, color) in scale.stops() {
            assert_eq!(scale.color_for(threshold), color);
        }
    }

    #[test]
    fn clamps_below_and_above() {
        let scale = ColorScale::rental_density();
        assert_eq!(scale.color_for(-5.0), scale.color_for(0.0));
        assert_eq!(scale.color_for(999_999.0), scale.color_for(5000.0));
    }

    #[test]
    fn non_finite_maps_like_zero() {
        let scale = ColorScale::rental_density();
        assert_eq!(scale.color_for(f64::NAN), scale.color_for(0.0));
        assert_eq!(scale.color_for(f64::INFINITY), scale.color_for(0.0));
    }

    #[test]
    fn midpoint_interpolates() {
        let scale = ColorScale::rental_density();
        let lo = scale.color_for(0.0);
        let hi = scale.color_for(1.0);
        let mid = scale.color_for(0.5);
        assert_ne!(mid, lo);
        assert_ne!(mid, hi);
        assert!(mid.r <= lo.r && mid.r >= hi.r);
    }

    #[test]
    fn intensity_darkens_across_breakpoints() {
        let scale = ColorScale::rental_density();
        let mut prev = f64::INFINITY;
        for &(threshold, _) in scale.stops() {
            let lum = luminance(scale.color_for(threshold));
            assert!(lum < prev, "scale should darken at threshold {threshold}");
            prev = lum;
        }
    }

    #[test]
    fn paint_expression_shape() {
        let scale = ColorScale::rental_density();
        let expr = scale.paint_expression(RentalField::Tourist);
        let arr = expr.as_array().unwrap();
        assert_eq!(arr[0], "interpolate");
        assert_eq!(arr[1], json!(["linear"]));
        assert_eq!(arr[2], json!(["to-number", ["get", "turisticas"], 0]));
        // Alternating threshold/color pairs after the three-element header.
        assert_eq!(arr.len(), 3 + 2 * scale.stops().len());
        assert_eq!(arr[3], json!(0.0));
        assert_eq!(arr[4], "#f7fcf5");
        assert_eq!(arr[arr.len() - 1], "#007959");
    }

    #[test]
    fn paint_expression_tracks_field() {
        let scale = ColorScale::rental_density();
        let seasonal = scale.paint_expression(RentalField::Seasonal);
        assert_eq!(seasonal.as_array().unwrap()[2][1][1], "temporada");
    }

    #[test]
    fn fill_layer_carries_paint_block() {
        let scale = ColorScale::rental_density();
        let layer = fill_layer("capa_fill", "datos", "mapa_rua", &scale, RentalField::Seasonal);
        assert_eq!(layer["type"], "fill");
        assert_eq!(layer["source-layer"], "mapa_rua");
        assert_eq!(layer["paint"]["fill-opacity"], 0.75);
        assert_eq!(layer["paint"]["fill-color"][0], "interpolate");
    }

    #[test]
    fn unordered_breakpoints_rejected() {
        assert!(ColorScale::new(vec![]).is_err());
        let bad = vec![(0.0, rgb(0xffffff)), (0.0, rgb(0x000000))];
        assert!(ColorScale::new(bad).is_err());
        let nan = vec![(0.0, rgb(0xffffff)), (f64::NAN, rgb(0x000000))];
        assert!(ColorScale::new(nan).is_err());
    }
}
