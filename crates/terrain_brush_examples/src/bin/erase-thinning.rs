use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use terrain_brush::prelude::*;
use terrain_brush_examples::{
    init_tracing, render_scene_to_png, rolling_hills, CategoryStyle, RenderConfig,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let terrain = rolling_hills(30.0)?;
    let cube = |asset: &str| {
        ModelTemplate::with_bounds(asset, Aabb::from_center_size(Vec3::ZERO, Vec3::ONE))
    };
    let registry = BrushRegistry::new()
        .with_category("Grass", vec![cube("grass_a"), cube("grass_b")])?
        .with_category("Flower", vec![cube("flower")])?;

    // Tile the whole patch with grass, then sprinkle flowers on top.
    let dense = BrushSettings::new()
        .with_fill_percentage(100.0)
        .with_min_spacing(1.5);
    let mut base = BrushTool::try_new(registry, dense.clone())?;
    let mut scene = MemoryScene::new();
    let mut rng = StdRng::seed_from_u64(9);
    {
        let mut sink = VecSink::new();
        let mut ctx = StrokeContext::new(&terrain, &mut scene, &mut sink);
        let center = Vec3::new(0.0, terrain.height_at(0.0, 0.0), 0.0);
        base.paint(center, 25.0, 0.0, &mut ctx, &mut rng);

        base.select("Flower")?;
        base.set_settings(dense.clone().with_fill_percentage(50.0).with_attempts_per_tick(50))?;
        for _ in 0..10 {
            base.release();
            base.paint(center, 25.0, 0.0, &mut ctx, &mut rng);
        }
        base.select("Grass")?;
    }
    info!("Base patch: {} instances.", base.store().len());

    // Same patch, same erase stroke, three thinning intensities.
    for fill in [25.0, 60.0, 100.0] {
        let mut tool = base.clone();
        let mut scene = scene.clone();
        let mut sink = VecSink::new();
        tool.set_settings(dense.clone().with_fill_percentage(fill))?;
        tool.set_mode(BrushMode::Erase);

        let center = Vec3::new(0.0, terrain.height_at(0.0, 0.0), 0.0);
        let result = {
            let mut ctx = StrokeContext::new(&terrain, &mut scene, &mut sink);
            tool.apply(center, 15.0, 0.0, &mut ctx, &mut rng)
        };
        info!(
            "fill {:>5.1}%: erased {} grass, spared {}; flowers untouched ({} left).",
            fill,
            result.erased.len(),
            result.candidates_rejected,
            tool.registry()
                .index_of("Flower")
                .and_then(|i| tool.registry().category(i))
                .map_or(0, |c| tool.store().count_category(c.id)),
        );

        let mut rc = RenderConfig::new((600, 600), Vec2::splat(-30.0), Vec2::splat(60.0))
            .with_background([200, 220, 170]);
        rc.set_category_style("Grass", CategoryStyle::Circle { color: [60, 130, 50], radius: 3 });
        rc.set_category_style("Flower", CategoryStyle::Circle { color: [230, 90, 160], radius: 4 });
        rc.add_brush_outline(center, 15.0);
        render_scene_to_png(
            &tool,
            Some(&terrain),
            &rc,
            format!("erase-thinning-{fill:.0}.png"),
        )?;
    }

    Ok(())
}
