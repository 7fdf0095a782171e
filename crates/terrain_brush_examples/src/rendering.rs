//! Top-down PNG rendering of placed instances over shaded terrain.
use std::collections::HashMap;
use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use terrain_brush::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How instances of one category are drawn.
#[derive(Debug, Clone, Copy)]
pub enum CategoryStyle {
    /// Filled disk whose pixel radius is multiplied by the instance scale.
    Circle { color: [u8; 3], radius: u32 },
    /// Filled square with the given half extent in pixels.
    Square { color: [u8; 3], half: u32 },
}

impl Default for CategoryStyle {
    fn default() -> Self {
        CategoryStyle::Circle {
            color: [30, 30, 30],
            radius: 3,
        }
    }
}

/// Output image size, the world rectangle it shows and per-category styles.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World XZ of the image's top-left corner.
    pub world_min: Vec2,
    pub world_size: Vec2,
    pub background: [u8; 3],
    styles: HashMap<String, CategoryStyle>,
    brush_outlines: Vec<(Vec2, f32)>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_min: Vec2, world_size: Vec2) -> Self {
        Self {
            image_size,
            world_min,
            world_size,
            background: [226, 232, 210],
            styles: HashMap::new(),
            brush_outlines: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn set_category_style(&mut self, name: impl Into<String>, style: CategoryStyle) {
        self.styles.insert(name.into(), style);
    }

    /// Draws a brush ring at `center` with world radius `radius`.
    pub fn add_brush_outline(&mut self, center: Vec3, radius: f32) {
        self.brush_outlines.push((Vec2::new(center.x, center.z), radius));
    }

    fn style(&self, name: &str) -> CategoryStyle {
        self.styles.get(name).copied().unwrap_or_default()
    }

    fn world_to_pixel(&self, p: Vec2) -> (f32, f32) {
        let t = (p - self.world_min) / self.world_size;
        (t.x * self.image_size.0 as f32, t.y * self.image_size.1 as f32)
    }

    fn pixel_to_world(&self, px: u32, py: u32) -> Vec2 {
        let t = Vec2::new(
            (px as f32 + 0.5) / self.image_size.0 as f32,
            (py as f32 + 0.5) / self.image_size.1 as f32,
        );
        self.world_min + t * self.world_size
    }
}

/// Renders every placed instance, coloured by category, and saves it to `path`.
///
/// With a terrain the background is Lambert-shaded from its normals.
pub fn render_scene_to_png(
    tool: &BrushTool,
    terrain: Option<&Heightfield>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    if let Some(terrain) = terrain {
        let light = Vec3::new(-0.4, 0.8, -0.45).normalize();
        for py in 0..h {
            for px in 0..w {
                let p = config.pixel_to_world(px, py);
                let shade = 0.55 + 0.45 * terrain.normal_at(p.x, p.y).dot(light).max(0.0);
                let [r, g, b] = config.background;
                img.put_pixel(
                    px,
                    py,
                    Rgb([
                        (r as f32 * shade) as u8,
                        (g as f32 * shade) as u8,
                        (b as f32 * shade) as u8,
                    ]),
                );
            }
        }
    }

    for &(center, radius) in &config.brush_outlines {
        draw_ring(&mut img, config, center, radius, [200, 60, 60]);
    }

    let mut instances: Vec<&PlacedInstance> = tool.store().iter().collect();
    instances.sort_unstable_by_key(|i| i.id);
    for instance in instances {
        let name = tool
            .registry()
            .by_id(instance.category)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        let (cx, cy) =
            config.world_to_pixel(Vec2::new(instance.anchor.x, instance.anchor.z));
        let scale = instance.transform.scale.max_element().max(0.1);
        match config.style(name) {
            CategoryStyle::Circle { color, radius } => {
                fill_disk(&mut img, cx, cy, radius as f32 * scale, color);
            }
            CategoryStyle::Square { color, half } => {
                fill_square(&mut img, cx, cy, half as f32 * scale, color);
            }
        }
    }

    img.save(path.as_ref())?;
    Ok(())
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn fill_disk(img: &mut RgbImage, cx: f32, cy: f32, r: f32, color: [u8; 3]) {
    let r2 = r * r;
    let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
    let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                put(img, x, y, color);
            }
        }
    }
}

fn fill_square(img: &mut RgbImage, cx: f32, cy: f32, half: f32, color: [u8; 3]) {
    let (x0, x1) = ((cx - half).floor() as i64, (cx + half).ceil() as i64);
    let (y0, y1) = ((cy - half).floor() as i64, (cy + half).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            put(img, x, y, color);
        }
    }
}

fn draw_ring(img: &mut RgbImage, config: &RenderConfig, center: Vec2, radius: f32, color: [u8; 3]) {
    let (cx, cy) = config.world_to_pixel(center);
    let px_radius = radius / config.world_size.x * config.image_size.0 as f32;
    let steps = (px_radius * std::f32::consts::TAU).ceil().max(16.0) as usize;
    for i in 0..steps {
        let a = i as f32 / steps as f32 * std::f32::consts::TAU;
        put(
            img,
            (cx + px_radius * a.cos()) as i64,
            (cy + px_radius * a.sin()) as i64,
            color,
        );
    }
}
