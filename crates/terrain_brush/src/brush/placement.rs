//! Paint strokes: candidate generation, spacing, randomization and bottom-snapping.
//!
//! [`paint_stroke`] runs one stroke unconditionally. Rate limiting lives in
//! [`crate::brush::tool::BrushTool::paint`], which wraps this function with the shared
//! [`crate::brush::governor::ActionGovernor`].
use std::collections::HashSet;

use glam::{Vec2, Vec3};
use rand::RngCore;
use tracing::{debug, warn};

use crate::bounds::{EulerAngles, InstanceTransform};
use crate::brush::events::{BrushEvent, BrushEventKind, RejectReason};
use crate::brush::registry::BrushRegistry;
use crate::brush::settings::BrushSettings;
use crate::brush::spatial::SpatialIndex;
use crate::brush::store::InstanceStore;
use crate::brush::stroke::{StrokeContext, StrokeResult};
use crate::brush::{BrushMode, SPACING_ROUNDING};
use crate::sampling::{
    next_down, rand01, rand_index, rand_range, BrushSampling, DiskScatterSampling, GridSampling,
};

/// Paints the active category around `center`.
///
/// Grid tiling is used at fill densities of 99.5% and above, uniform disk scatter below.
/// Each candidate is dropped onto the terrain, rejected if a same-category instance lies
/// within the minimum spacing, and otherwise spawned with a random template, rotation and
/// scale, then lifted or lowered so its lowest rendered point rests on the terrain.
pub fn paint_stroke<I: SpatialIndex, R: RngCore>(
    center: Vec3,
    radius: f32,
    registry: &BrushRegistry,
    settings: &BrushSettings,
    store: &mut InstanceStore<I>,
    ctx: &mut StrokeContext<'_>,
    rng: &mut R,
) -> StrokeResult {
    let Some(category) = registry.active() else {
        return StrokeResult::skipped();
    };
    if category.templates.is_empty() {
        warn!("Brush category '{}' has no templates; skipping.", category.name);
        if ctx.sink.wants(BrushEventKind::Warning) {
            ctx.sink.send(BrushEvent::Warning {
                context: format!("category:{}", category.name),
                message: "Category has no templates; skipping".into(),
            });
        }
        return StrokeResult::skipped();
    }

    let radius = if radius.is_finite() {
        radius.max(0.0)
    } else {
        0.0
    };
    let offsets: Vec<Vec2> = candidate_sampler(settings)
        .generate(radius, rng)
        .into_iter()
        .map(Vec2::from)
        .collect();

    if ctx.sink.wants(BrushEventKind::StrokeStarted) {
        ctx.sink.send(BrushEvent::StrokeStarted {
            mode: BrushMode::Paint,
            center,
            radius,
            candidates: offsets.len(),
        });
    }

    let spacing = settings
        .checks_spacing()
        .then(|| settings.min_spacing.max(0.0) * (1.0 - SPACING_ROUNDING));
    // Lattice points are at least one step (>= min_spacing) apart, so a grid stroke never
    // tests its own placements. Their anchors can drift by a few ulps far from the origin.
    let tiles = settings.uses_grid();
    let mut lattice_mates: HashSet<_> = HashSet::new();

    let mut result = StrokeResult::started();
    for offset in offsets {
        let mut anchor = Vec3::new(center.x + offset.x, center.y, center.z + offset.y);
        if let Some(ground) = ctx.terrain.sample(anchor.x, anchor.z) {
            anchor.y = ground.height;
        }
        result.candidates_evaluated += 1;

        if let Some(spacing) = spacing {
            let blocked = store
                .nearby_of_category(anchor, spacing, category.id)
                .into_iter()
                .any(|id| !lattice_mates.contains(&id));
            if blocked {
                result.candidates_rejected += 1;
                if ctx.sink.wants(BrushEventKind::CandidateRejected) {
                    ctx.sink.send(BrushEvent::CandidateRejected {
                        position: anchor,
                        reason: RejectReason::Spacing,
                    });
                }
                continue;
            }
        }

        let template_index = rand_index(rng, category.templates.len());
        let template = &category.templates[template_index];

        let rotation = random_rotation(settings, rng);
        let scale = template.base_scale * rand_range(rng, settings.min_scale, settings.max_scale);
        let mut transform = InstanceTransform::new(anchor, rotation, scale);
        if let Some(lowest) = template.lowest_point(&transform) {
            transform.position.y += anchor.y - lowest;
        }

        let scene_key = ctx.scene.spawn(template, &transform);
        let id = store.insert(category.id, template_index, anchor, transform, scene_key);
        result.placed.push(id);
        if tiles {
            lattice_mates.insert(id);
        }

        if ctx.sink.wants(BrushEventKind::InstancePlaced) {
            if let Some(instance) = store.get(id) {
                ctx.sink.send(BrushEvent::InstancePlaced {
                    instance: instance.clone(),
                });
            }
        }
    }

    debug!(
        "Paint '{}' at ({:.2}, {:.2}, {:.2}) r={:.2}: {} placed, {} rejected.",
        category.name,
        center.x,
        center.y,
        center.z,
        radius,
        result.placed.len(),
        result.candidates_rejected
    );
    if ctx.sink.wants(BrushEventKind::StrokeFinished) {
        ctx.sink.send(BrushEvent::StrokeFinished {
            mode: BrushMode::Paint,
            result: result.clone(),
        });
    }
    result
}

/// Sampler for the configured fill density.
fn candidate_sampler(settings: &BrushSettings) -> Box<dyn BrushSampling> {
    if settings.uses_grid() {
        Box::new(GridSampling::new(settings.min_spacing))
    } else {
        Box::new(DiskScatterSampling::for_fill(
            settings.attempts_per_tick,
            settings.fill_percentage,
        ))
    }
}

/// Yaw in [0, 360) when spin is enabled; independent tilts in [-max_tilt, max_tilt].
fn random_rotation(settings: &BrushSettings, rng: &mut dyn RngCore) -> EulerAngles {
    let yaw = if settings.random_spin {
        (rand01(rng) * 360.0).min(next_down(360.0))
    } else {
        0.0
    };
    let tilt = settings.max_tilt.abs();
    let pitch_x = rand_range(rng, -tilt, tilt);
    let pitch_z = rand_range(rng, -tilt, tilt);
    EulerAngles::new(yaw, pitch_x, pitch_z)
}
