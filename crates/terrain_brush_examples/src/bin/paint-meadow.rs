use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use terrain_brush::prelude::*;
use terrain_brush_examples::{
    init_tracing, render_scene_to_png, rolling_hills, BrushPreset, CategoryStyle, RenderConfig,
};
use tracing::info;

const PRESET: &str = include_str!("../../assets/meadow.brush.ron");
const HALF_EXTENT: f32 = 40.0;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let preset = BrushPreset::from_ron(PRESET)?;
    let terrain = rolling_hills(HALF_EXTENT)?;
    let mut tool = preset.tool()?;
    let mut scene = MemoryScene::new();
    let mut events = VecSink::new();
    let mut rng = StdRng::seed_from_u64(preset.seed);

    {
        let mut ctx = StrokeContext::new(&terrain, &mut scene, &mut events);

        // One held drag per category, each along its own lane.
        for (lane, name) in ["Rock", "Tree", "Shrub"].into_iter().enumerate() {
            tool.select(name)?;
            if name == "Tree" {
                tool.size_mut().resize(2.0);
            }
            let strokes = drag(&mut tool, &terrain, &mut ctx, &mut rng, preset.frame_time, lane);
            let placed = tool
                .registry()
                .active()
                .map_or(0, |c| tool.store().count_category(c.id));
            info!(
                "Dragged '{}' brush: {} strokes, {} instances.",
                name, strokes, placed
            );
        }

        // Thin the tree lane around its midpoint.
        tool.select("Tree")?;
        tool.toggle_mode();
        tool.release();
        let center = on_terrain(&terrain, Vec2::new(0.0, 0.0));
        let thinned = tool.apply(center, 8.0, preset.frame_time, &mut ctx, &mut rng);
        info!(
            "Erase pass removed {} trees and spared {}.",
            thinned.erased.len(),
            thinned.candidates_rejected
        );
        tool.toggle_mode();
    }

    // Import a custom model: it becomes the active category, shrunk to unit size.
    let path = "imports/Statue.GLB";
    let statue = ModelTemplate::with_bounds(
        path,
        Aabb::new(Vec3::new(-1.5, 0.0, -1.5), Vec3::new(1.5, 6.0, 1.5)),
    );
    tool.add_category(statue, category_name_from_file(path), &mut events)?;
    {
        let mut ctx = StrokeContext::new(&terrain, &mut scene, &mut events);
        tool.release();
        let center = on_terrain(&terrain, Vec2::new(20.0, -25.0));
        tool.paint(center, 3.0, preset.frame_time, &mut ctx, &mut rng);
    }

    info!(
        "Scene holds {} models ({} placed events, {} erased, {} categories added).",
        scene.len(),
        events.count(BrushEventKind::InstancePlaced),
        events.count(BrushEventKind::InstanceErased),
        events.count(BrushEventKind::CategoryAdded),
    );

    let mut rc = RenderConfig::new(
        (800, 800),
        Vec2::splat(-HALF_EXTENT),
        Vec2::splat(2.0 * HALF_EXTENT),
    );
    rc.set_category_style("Rock", CategoryStyle::Circle { color: [110, 110, 118], radius: 4 });
    rc.set_category_style("Tree", CategoryStyle::Circle { color: [34, 110, 52], radius: 6 });
    rc.set_category_style("Shrub", CategoryStyle::Square { color: [120, 140, 40], half: 3 });
    rc.set_category_style("Statue", CategoryStyle::Square { color: [190, 70, 50], half: 5 });
    rc.add_brush_outline(on_terrain(&terrain, Vec2::ZERO), 8.0);
    render_scene_to_png(&tool, Some(&terrain), &rc, "paint-meadow.png")?;

    Ok(())
}

fn on_terrain(terrain: &Heightfield, p: Vec2) -> Vec3 {
    Vec3::new(p.x, terrain.height_at(p.x, p.y), p.y)
}

/// Simulates two seconds of a held mouse button sweeping across the map.
fn drag(
    tool: &mut BrushTool,
    terrain: &Heightfield,
    ctx: &mut StrokeContext<'_>,
    rng: &mut StdRng,
    frame_time: f32,
    lane: usize,
) -> usize {
    let frames = (2.0 / frame_time).round() as usize;
    let z0 = -20.0 + lane as f32 * 20.0;
    let mut strokes = 0;

    tool.release();
    for frame in 0..frames {
        let t = frame as f32 / frames.max(1) as f32;
        let p = Vec2::new(-30.0 + 60.0 * t, z0 + 4.0 * (t * 9.0).sin());
        let radius = tool.size().radius();
        let result = tool.apply(on_terrain(terrain, p), radius, frame_time, ctx, rng);
        if result.executed {
            strokes += 1;
        }
    }
    tool.release();
    strokes
}
