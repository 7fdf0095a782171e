//! Per-stroke collaborators and results.
use crate::brush::events::EventSink;
use crate::brush::scene::SceneHost;
use crate::brush::InstanceId;
use crate::terrain::TerrainSampler;

/// External collaborators a stroke reads from and writes to.
pub struct StrokeContext<'a> {
    /// Terrain used for height snapping.
    pub terrain: &'a dyn TerrainSampler,
    /// Scene that owns the spawned models.
    pub scene: &'a mut dyn SceneHost,
    /// Receiver for stroke and instance events.
    pub sink: &'a mut dyn EventSink,
}

impl<'a> StrokeContext<'a> {
    pub fn new(
        terrain: &'a dyn TerrainSampler,
        scene: &'a mut dyn SceneHost,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            terrain,
            scene,
            sink,
        }
    }
}

/// Outcome of a single paint or erase call.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeResult {
    /// Whether the stroke passed the rate limit and had an active category.
    pub executed: bool,
    /// Instances spawned by the stroke.
    pub placed: Vec<InstanceId>,
    /// Instances removed by the stroke.
    pub erased: Vec<InstanceId>,
    /// Candidates considered: positions for paint, same-category hits for erase.
    pub candidates_evaluated: usize,
    /// Candidates that produced no placement or removal.
    pub candidates_rejected: usize,
}

impl StrokeResult {
    /// A stroke that did nothing (rate-limited or no usable category).
    pub fn skipped() -> Self {
        Self::default()
    }

    pub(crate) fn started() -> Self {
        Self {
            executed: true,
            ..Self::default()
        }
    }
}
