//! Scene mutation primitives used by strokes.
//!
//! Rendering and scene-graph ownership live with the host application. The engine asks
//! the host to spawn a template with a final transform and to despawn it on erase.
use std::collections::BTreeMap;

use crate::bounds::InstanceTransform;
use crate::brush::registry::ModelTemplate;
use crate::brush::SceneKey;

/// Host-side scene that owns the visual instances.
pub trait SceneHost {
    /// Instantiates `template` with `transform` and returns a handle for it.
    fn spawn(&mut self, template: &ModelTemplate, transform: &InstanceTransform) -> SceneKey;

    fn despawn(&mut self, key: SceneKey);
}

/// A host without a scene. Every spawn returns [`SceneKey::DETACHED`], so instances
/// painted through it cannot be looked up by scene handle.
impl SceneHost for () {
    #[inline]
    fn spawn(&mut self, _template: &ModelTemplate, _transform: &InstanceTransform) -> SceneKey {
        SceneKey::DETACHED
    }

    #[inline]
    fn despawn(&mut self, _key: SceneKey) {}
}

impl<S: SceneHost + ?Sized> SceneHost for &mut S {
    fn spawn(&mut self, template: &ModelTemplate, transform: &InstanceTransform) -> SceneKey {
        (**self).spawn(template, transform)
    }

    fn despawn(&mut self, key: SceneKey) {
        (**self).despawn(key)
    }
}

/// A model spawned into a [`MemoryScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedModel {
    pub asset: String,
    pub transform: InstanceTransform,
}

/// In-memory scene host keyed by sequential handles.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    next: u64,
    live: BTreeMap<SceneKey, SpawnedModel>,
    despawned: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: SceneKey) -> Option<&SpawnedModel> {
        self.live.get(&key)
    }

    /// Live models in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (SceneKey, &SpawnedModel)> {
        self.live.iter().map(|(k, v)| (*k, v))
    }

    /// Total number of despawn calls that removed a live model.
    pub fn despawned(&self) -> usize {
        self.despawned
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl SceneHost for MemoryScene {
    fn spawn(&mut self, template: &ModelTemplate, transform: &InstanceTransform) -> SceneKey {
        let key = SceneKey(self.next);
        self.next += 1;
        self.live.insert(
            key,
            SpawnedModel {
                asset: template.asset.clone(),
                transform: *transform,
            },
        );
        key
    }

    fn despawn(&mut self, key: SceneKey) {
        if self.live.remove(&key).is_some() {
            self.despawned += 1;
        }
    }
}
