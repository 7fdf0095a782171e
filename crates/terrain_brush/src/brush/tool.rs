//! Tool session: the state a held brush carries between ticks.
//!
//! [`BrushTool`] owns the registry, settings, placed instances and the shared cooldown,
//! and gates [`paint_stroke`] and [`erase_stroke`] behind it. Collaborators (terrain, scene,
//! event sink) are borrowed per call through a [`StrokeContext`].
use glam::Vec3;
use rand::RngCore;
use tracing::info;

use crate::brush::erase::erase_stroke;
use crate::brush::events::EventSink;
use crate::brush::governor::ActionGovernor;
use crate::brush::placement::paint_stroke;
use crate::brush::registry::{BrushRegistry, ModelTemplate};
use crate::brush::scene::SceneHost;
use crate::brush::settings::BrushSettings;
use crate::brush::spatial::{SpatialHash, SpatialIndex};
use crate::brush::store::InstanceStore;
use crate::brush::stroke::{StrokeContext, StrokeResult};
use crate::brush::{BrushMode, CategoryId};
use crate::error::Result;

/// Brush radius with hotkey-style stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSize {
    size: f32,
    min: f32,
    max: f32,
}

impl Default for BrushSize {
    fn default() -> Self {
        Self {
            size: 5.0,
            min: 1.0,
            max: 25.0,
        }
    }
}

impl BrushSize {
    /// A size clamped to `[min, max]`. Swapped bounds are reordered.
    pub fn new(size: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut out = Self { size: min, min, max };
        out.set(size);
        out
    }

    /// Current radius in world units.
    pub fn radius(&self) -> f32 {
        self.size
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Sets the radius, clamped to the bounds. Non-finite values are ignored.
    pub fn set(&mut self, size: f32) {
        if size.is_finite() {
            self.size = size.clamp(self.min, self.max);
        }
    }

    /// Grows or shrinks the radius by `delta`, clamped to the bounds.
    pub fn resize(&mut self, delta: f32) -> f32 {
        self.set(self.size + delta);
        self.size
    }
}

/// A brush session: categories, settings, placed instances, cooldown, mode and size.
#[derive(Debug, Clone)]
pub struct BrushTool<I: SpatialIndex = SpatialHash> {
    registry: BrushRegistry,
    settings: BrushSettings,
    store: InstanceStore<I>,
    governor: ActionGovernor,
    mode: BrushMode,
    size: BrushSize,
}

impl BrushTool<SpatialHash> {
    pub fn new(registry: BrushRegistry, settings: BrushSettings) -> Self {
        Self::with_index(registry, settings, SpatialHash::default())
    }

    /// Like [`BrushTool::new`], but rejects invalid settings.
    pub fn try_new(registry: BrushRegistry, settings: BrushSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(registry, settings))
    }
}

impl<I: SpatialIndex> BrushTool<I> {
    pub fn with_index(registry: BrushRegistry, settings: BrushSettings, index: I) -> Self {
        Self {
            registry,
            settings,
            store: InstanceStore::with_index(index),
            governor: ActionGovernor::new(),
            mode: BrushMode::default(),
            size: BrushSize::default(),
        }
    }

    /// Paints around `center` if the cooldown has elapsed.
    ///
    /// `elapsed` is the time since the previous call in seconds. A stroke that runs
    /// restarts the cooldown; a skipped one leaves it counting down.
    pub fn paint<R: RngCore>(
        &mut self,
        center: Vec3,
        radius: f32,
        elapsed: f32,
        ctx: &mut StrokeContext<'_>,
        rng: &mut R,
    ) -> StrokeResult {
        if !self.governor.tick(elapsed) || self.registry.is_empty() {
            return StrokeResult::skipped();
        }
        let result = paint_stroke(
            center,
            radius,
            &self.registry,
            &self.settings,
            &mut self.store,
            ctx,
            rng,
        );
        if result.executed {
            self.governor.arm(self.settings.action_rate);
        }
        result
    }

    /// Erases around `center` if the cooldown has elapsed.
    pub fn erase<R: RngCore>(
        &mut self,
        center: Vec3,
        radius: f32,
        elapsed: f32,
        ctx: &mut StrokeContext<'_>,
        rng: &mut R,
    ) -> StrokeResult {
        if !self.governor.tick(elapsed) || self.registry.is_empty() {
            return StrokeResult::skipped();
        }
        let result = erase_stroke(
            center,
            radius,
            &self.registry,
            &self.settings,
            &mut self.store,
            ctx,
            rng,
        );
        if result.executed {
            self.governor.arm(self.settings.action_rate);
        }
        result
    }

    /// Paints or erases depending on the current mode.
    pub fn apply<R: RngCore>(
        &mut self,
        center: Vec3,
        radius: f32,
        elapsed: f32,
        ctx: &mut StrokeContext<'_>,
        rng: &mut R,
    ) -> StrokeResult {
        match self.mode {
            BrushMode::Paint => self.paint(center, radius, elapsed, ctx, rng),
            BrushMode::Erase => self.erase(center, radius, elapsed, ctx, rng),
        }
    }

    /// Pointer released or left the terrain: the next stroke fires immediately.
    pub fn release(&mut self) {
        self.governor.reset();
    }

    /// Despawns and forgets every placed instance. Returns how many were removed.
    pub fn clear(&mut self, scene: &mut dyn SceneHost) -> usize {
        let removed = self.store.drain();
        for instance in &removed {
            scene.despawn(instance.scene);
        }
        info!("Cleared {} placed instances.", removed.len());
        removed.len()
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: BrushMode) {
        self.mode = mode;
    }

    /// Switches between paint and erase, returning the new mode.
    pub fn toggle_mode(&mut self) -> BrushMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Imports a model as a new active category. See [`BrushRegistry::add_category`].
    pub fn add_category(
        &mut self,
        template: ModelTemplate,
        name: impl Into<String>,
        sink: &mut dyn EventSink,
    ) -> Result<CategoryId> {
        self.registry.add_category(template, name, sink)
    }

    pub fn set_active(&mut self, index: usize) {
        self.registry.set_active(index);
    }

    pub fn select(&mut self, name: &str) -> Result<usize> {
        self.registry.select(name)
    }

    /// Replaces the settings after validating them.
    pub fn set_settings(&mut self, settings: BrushSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn registry(&self) -> &BrushRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BrushRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn store(&self) -> &InstanceStore<I> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut InstanceStore<I> {
        &mut self.store
    }

    pub fn governor(&self) -> &ActionGovernor {
        &self.governor
    }

    pub fn size(&self) -> &BrushSize {
        &self.size
    }

    pub fn size_mut(&mut self) -> &mut BrushSize {
        &mut self.size
    }
}
