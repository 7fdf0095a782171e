#![forbid(unsafe_code)]

mod preset;
mod rendering;

pub use preset::{BrushPreset, CategoryDef, PivotDef, TemplateDef};
pub use rendering::{init_tracing, render_scene_to_png, CategoryStyle, RenderConfig};

use glam::Vec2;
use terrain_brush::prelude::Heightfield;

/// Rolling hills spanning `[-half, half]` on both axes.
pub fn rolling_hills(half: f32) -> anyhow::Result<Heightfield> {
    let terrain = Heightfield::from_fn(129, 129, Vec2::splat(2.0 * half), |u, v| {
        let a = (u * std::f32::consts::TAU * 1.5).sin() * (v * std::f32::consts::TAU).cos();
        let b = ((u - 0.3) * (v + 0.2) * 9.0).sin();
        0.6 * a + 0.4 * b
    })?
    .with_origin(Vec2::splat(-half))
    .with_height_scale(4.0)
    .with_base_height(2.0);
    Ok(terrain)
}
