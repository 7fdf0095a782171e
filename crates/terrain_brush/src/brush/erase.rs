//! Erase strokes: category-filtered removal with density-proportional thinning.
use glam::Vec3;
use rand::RngCore;
use tracing::debug;

use crate::brush::events::{BrushEvent, BrushEventKind, RejectReason};
use crate::brush::registry::BrushRegistry;
use crate::brush::settings::BrushSettings;
use crate::brush::spatial::SpatialIndex;
use crate::brush::store::InstanceStore;
use crate::brush::stroke::{StrokeContext, StrokeResult};
use crate::brush::BrushMode;
use crate::sampling::roll_percent;

/// Erases instances of the active category within `radius` of `center`.
///
/// Every matching instance is removed with probability `fill_percentage / 100`, so lower
/// fill thins a cluster instead of clearing it. Other categories are never touched.
pub fn erase_stroke<I: SpatialIndex, R: RngCore>(
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

    let radius = if radius.is_finite() {
        radius.max(0.0)
    } else {
        0.0
    };
    let hits: Vec<_> = store
        .query_nearby(center, radius)
        .into_iter()
        .filter(|id| store.get(*id).is_some_and(|i| i.category == category.id))
        .collect();

    if ctx.sink.wants(BrushEventKind::StrokeStarted) {
        ctx.sink.send(BrushEvent::StrokeStarted {
            mode: BrushMode::Erase,
            center,
            radius,
            candidates: hits.len(),
        });
    }

    let mut result = StrokeResult::started();
    for id in hits {
        result.candidates_evaluated += 1;
        if !roll_percent(rng, settings.fill_percentage) {
            result.candidates_rejected += 1;
            if ctx.sink.wants(BrushEventKind::CandidateRejected) {
                if let Some(instance) = store.get(id) {
                    ctx.sink.send(BrushEvent::CandidateRejected {
                        position: instance.anchor,
                        reason: RejectReason::Thinned,
                    });
                }
            }
            continue;
        }

        let Some(instance) = store.remove(id) else {
            continue;
        };
        ctx.scene.despawn(instance.scene);
        result.erased.push(id);
        if ctx.sink.wants(BrushEventKind::InstanceErased) {
            ctx.sink.send(BrushEvent::InstanceErased { instance });
        }
    }

    debug!(
        "Erase '{}' at ({:.2}, {:.2}, {:.2}) r={:.2}: {} erased, {} spared.",
        category.name,
        center.x,
        center.y,
        center.z,
        radius,
        result.erased.len(),
        result.candidates_rejected
    );
    if ctx.sink.wants(BrushEventKind::StrokeFinished) {
        ctx.sink.send(BrushEvent::StrokeFinished {
            mode: BrushMode::Erase,
            result: result.clone(),
        });
    }
    result
}
