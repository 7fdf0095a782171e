#![forbid(unsafe_code)]
//! terrain_brush: Brush placement and spacing engine for painting instanced assets onto terrain.
//!
//! Modules:
//! - bounds: pivot-relative render bounds, Euler rotations and instance transforms
//! - sampling: brush candidate generation (full-coverage grid, uniform disk scatter)
//! - terrain: height/normal providers used for vertical snapping
//! - brush: categories, settings, action-rate governor, placement and erase strokes, events
//!
//! The engine is passive: an input layer resolves the pointer against the terrain and
//! calls [`brush::tool::BrushTool::paint`] or [`brush::tool::BrushTool::erase`] once per tick.
pub mod bounds;
pub mod brush;
pub mod error;
pub mod sampling;
pub mod terrain;

/// Convenient re-exports for common types. Import with `use terrain_brush::prelude::*;`.
pub mod prelude {
    pub use crate::bounds::{Aabb, EulerAngles, InstanceTransform};
    pub use crate::brush::erase::erase_stroke;
    pub use crate::brush::events::{
        BrushEvent, BrushEventKind, EventSink, FnSink, MultiSink, RejectReason, VecSink,
    };
    pub use crate::brush::governor::ActionGovernor;
    pub use crate::brush::import::{category_name_from_file, normalize_scale};
    pub use crate::brush::placement::paint_stroke;
    pub use crate::brush::registry::{BrushCategory, BrushRegistry, ModelTemplate};
    pub use crate::brush::scene::{MemoryScene, SceneHost, SpawnedModel};
    pub use crate::brush::settings::BrushSettings;
    pub use crate::brush::spatial::{SpatialHash, SpatialIndex};
    pub use crate::brush::store::{InstanceStore, PlacedInstance};
    pub use crate::brush::stroke::{StrokeContext, StrokeResult};
    pub use crate::brush::tool::{BrushSize, BrushTool};
    pub use crate::brush::{BrushMode, CategoryId, InstanceId, SceneKey};
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{BrushSampling, DiskScatterSampling, GridSampling};
    pub use crate::terrain::{FlatTerrain, Heightfield, TerrainSample, TerrainSampler};
}
