use serde::Serialize;

use rentamap_core::{format_value, Feature, RentalField, MUNICIPALITY_KEY, POPULATION_KEY};

/// Display content for a municipality popup.
///
/// A transient value object: built per click (or per random jump), handed to
/// the engine, discarded after render. Building never fails; every raw value
/// goes through the zero-fallback formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub population_label: String,
    pub metric_label: String,
    pub metric_value: String,
}

impl PopupContent {
    /// Derive popup content from a feature's attributes and the active field.
    pub fn build(feature: &Feature, field: RentalField) -> Self {
        let title = feature
            .text(MUNICIPALITY_KEY)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Desconocido")
            .to_string();
        let population_label = format!(
            "Población: {} hab.",
            format_value(feature.property(POPULATION_KEY))
        );
        let metric_value = format!(
            "{} unidades",
            format_value(feature.property(field.attribute_key()))
        );
        Self {
            title,
            population_label,
            metric_label: field.label().to_string(),
            metric_value,
        }
    }

    /// Render the popup markup the map widget displays.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="popup-container">"#,
                r#"<div class="popup-header">"#,
                r#"<div class="popup-title">{title}</div>"#,
                r#"<div class="popup-poblacion">{population}</div>"#,
                "</div>",
                r#"<div class="popup-body">"#,
                r#"<div class="popup-tipo">{label}</div>"#,
                r#"<div class="popup-valor-destacado">{value}</div>"#,
                "</div>",
                "</div>"
            ),
            title = escape_html(&self.title),
            population = escape_html(&self.population_label),
            label = escape_html(&self.metric_label),
            value = escape_html(&self.metric_value),
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentamap_core::{Geometry, LngLat};

    fn feature() -> Feature {
        Feature::new(Geometry::Point(LngLat::new(-3.7038, 40.4168)))
    }

    #[test]
    fn madrid_vector() {
        let f = feature()
            .with("nombre_municipio", "Madrid")
            .with("POBLACION_MUNI", "3223000")
            .with("turisticas", "450");
        let content = PopupContent::build(&f, RentalField::Tourist);
        assert_eq!(content.title, "Madrid");
        assert_eq!(content.population_label, "Población: 3.223.000 hab.");
        assert_eq!(content.metric_label, "Viviendas Turísticas");
        assert_eq!(content.metric_value, "450 unidades");
    }

    #[test]
    fn missing_everything_degrades_to_zero() {
        let f = feature().with("temporada", "not-a-number");
        let content = PopupContent::build(&f, RentalField::Seasonal);
        assert_eq!(content.title, "Desconocido");
        assert_eq!(content.population_label, "Población: 0 hab.");
        assert_eq!(content.metric_value, "0 unidades");
    }

    #[test]
    fn blank_name_falls_back() {
        let f = feature().with("nombre_municipio", "   ");
        assert_eq!(PopupContent::build(&f, RentalField::Seasonal).title, "Desconocido");
    }

    #[test]
    fn content_keys_off_active_field() {
        let f = feature().with("turisticas", 450.0).with("temporada", 12.0);
        let tourist = PopupContent::build(&f, RentalField::Tourist);
        let seasonal = PopupContent::build(&f, RentalField::Seasonal);
        assert_eq!(tourist.metric_value, "450 unidades");
        assert_eq!(seasonal.metric_value, "12 unidades");
        assert_ne!(tourist.metric_label, seasonal.metric_label);
    }

    #[test]
    fn html_wraps_value_in_highlight_block() {
        let f = feature().with("nombre_municipio", "Teguise").with("turisticas", 12000.0);
        let html = PopupContent::build(&f, RentalField::Tourist).to_html();
        assert!(html.contains(r#"class="popup-container""#));
        assert!(html.contains(r#"class="popup-valor-destacado">12.000 unidades"#));
        assert!(html.contains("Teguise"));
    }

    #[test]
    fn html_escapes_markup_in_names() {
        let f = feature().with("nombre_municipio", "<script>");
        let html = PopupContent::build(&f, RentalField::Seasonal).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
