use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use terrain_brush::prelude::*;
use terrain_brush_examples::{init_tracing, render_scene_to_png, CategoryStyle, RenderConfig};
use tracing::info;

const RADIUS: f32 = 20.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Full fill switches to grid tiling; lower fill scatters a fraction of the attempts.
    let grid = BrushSettings::new()
        .with_fill_percentage(100.0)
        .with_min_spacing(2.0);
    let scatter = BrushSettings::new()
        .with_fill_percentage(40.0)
        .with_attempts_per_tick(50)
        .with_min_spacing(2.0);

    run("grid-vs-scatter-grid.png", grid, [40, 120, 240], 1)?;
    run("grid-vs-scatter-scatter.png", scatter, [240, 140, 40], 20)?;
    Ok(())
}

/// Paints `strokes` strokes at the origin and renders the result.
fn run(
    out_path: &str,
    settings: BrushSettings,
    color: [u8; 3],
    strokes: usize,
) -> anyhow::Result<()> {
    let registry = BrushRegistry::new().with_category(
        "Dot",
        vec![ModelTemplate::with_bounds(
            "dot",
            Aabb::from_center_size(Vec3::new(0.0, 0.5, 0.0), Vec3::ONE),
        )],
    )?;
    let action_rate = settings.action_rate;
    let mut tool = BrushTool::try_new(registry, settings)?;
    let terrain = FlatTerrain::new(0.0);
    let mut scene = MemoryScene::new();
    let mut sink = VecSink::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut ctx = StrokeContext::new(&terrain, &mut scene, &mut sink);

    let mut rejected = 0;
    for _ in 0..strokes {
        let result = tool.paint(Vec3::ZERO, RADIUS, action_rate, &mut ctx, &mut rng);
        rejected += result.candidates_rejected;
    }
    info!(
        "{}: {} instances, {} candidates rejected by spacing.",
        out_path,
        tool.store().len(),
        rejected
    );

    let extent = RADIUS + 2.0;
    let mut rc = RenderConfig::new((600, 600), Vec2::splat(-extent), Vec2::splat(2.0 * extent))
        .with_background([245, 245, 240]);
    rc.set_category_style("Dot", CategoryStyle::Circle { color, radius: 4 });
    rc.add_brush_outline(Vec3::ZERO, RADIUS);
    render_scene_to_png(&tool, None, &rc, out_path)?;
    Ok(())
}
