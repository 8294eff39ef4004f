use criterion::{criterion_group, criterion_main, Criterion};

use rentamap_core::{Feature, Geometry, LngLat, RentalField};
use rentamap_render::{ColorScale, PopupContent};

fn bench_color_lookup(c: &mut Criterion) {
    let scale = ColorScale::rental_density();

    c.bench_function("color_for_sweep_0_to_6000", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for v in 0..6000 {
                let rgb = scale.color_for(v as f64);
                acc = acc.wrapping_add(rgb.g as u32);
            }
            acc
        });
    });
}

fn bench_paint_expression(c: &mut Criterion) {
    let scale = ColorScale::rental_density();

    c.bench_function("paint_expression_build", |b| {
        b.iter(|| scale.paint_expression(RentalField::Tourist));
    });
}

fn bench_popup_build(c: &mut Criterion) {
    let feature = Feature::new(Geometry::Point(LngLat::new(-3.7038, 40.4168)))
        .with("nombre_municipio", "Madrid")
        .with("POBLACION_MUNI", "3223000")
        .with("turisticas", "450");

    c.bench_function("popup_build_madrid", |b| {
        b.iter(|| PopupContent::build(&feature, RentalField::Tourist));
    });
}

criterion_group!(
    benches,
    bench_color_lookup,
    bench_paint_expression,
    bench_popup_build
);
criterion_main!(benches);
