//! The placed-instance partition.
//!
//! [`InstanceStore`] records every instance the engine spawned together with its category,
//! keeps them in a [`SpatialIndex`] for proximity queries, and maps scene handles back to
//! their owning top-level instance. Instances spawned by other means never enter the store
//! and are therefore invisible to spacing and erase filtering.
//!
//! [`SceneKey::DETACHED`] is never registered as an owner key, so handles from a host
//! without a scene do not resolve.
use std::collections::HashMap;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::InstanceTransform;
use crate::brush::spatial::{SpatialHash, SpatialIndex};
use crate::brush::{CategoryId, InstanceId, SceneKey};

/// A top-level instance placed by a paint stroke.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    pub id: InstanceId,
    /// Category active when the instance was placed.
    pub category: CategoryId,
    /// Index of the template within its category.
    pub template: usize,
    /// Sampled terrain point the instance was snapped to. Proximity queries use it.
    pub anchor: Vec3,
    pub transform: InstanceTransform,
    /// Scene handle of the spawned root.
    pub scene: SceneKey,
}

/// Placed instances, their spatial index and the owner index.
#[derive(Debug, Clone)]
pub struct InstanceStore<I: SpatialIndex = SpatialHash> {
    instances: HashMap<InstanceId, PlacedInstance>,
    owners: HashMap<SceneKey, InstanceId>,
    /// Keys registered in `owners` for each instance, root first.
    owned: HashMap<InstanceId, Vec<SceneKey>>,
    index: I,
    next_id: u64,
}

impl<I: SpatialIndex + Default> Default for InstanceStore<I> {
    fn default() -> Self {
        Self::with_index(I::default())
    }
}

impl InstanceStore<SpatialHash> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: SpatialIndex> InstanceStore<I> {
    pub fn with_index(index: I) -> Self {
        Self {
            instances: HashMap::new(),
            owners: HashMap::new(),
            owned: HashMap::new(),
            index,
            next_id: 0,
        }
    }

    /// Records a spawned instance and indexes it at `anchor`.
    pub fn insert(
        &mut self,
        category: CategoryId,
        template: usize,
        anchor: Vec3,
        transform: InstanceTransform,
        scene: SceneKey,
    ) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;

        self.index.insert(id, anchor);
        self.claim(scene, id);
        self.instances.insert(
            id,
            PlacedInstance {
                id,
                category,
                template,
                anchor,
                transform,
                scene,
            },
        );
        id
    }

    /// Forgets an instance along with every scene handle owned by it.
    pub fn remove(&mut self, id: InstanceId) -> Option<PlacedInstance> {
        let instance = self.instances.remove(&id)?;
        self.index.remove(id, instance.anchor);
        for key in self.owned.remove(&id).unwrap_or_default() {
            if self.owners.get(&key) == Some(&id) {
                self.owners.remove(&key);
            }
        }
        Some(instance)
    }

    /// Registers a sub-part handle (child mesh, collider) as owned by `root`.
    ///
    /// A part already owned by another instance moves to `root`. Returns `false` when
    /// `root` is not a live instance or `part` is [`SceneKey::DETACHED`].
    pub fn attach_part(&mut self, part: SceneKey, root: InstanceId) -> bool {
        if !self.instances.contains_key(&root) || part.is_detached() {
            return false;
        }
        self.claim(part, root);
        true
    }

    fn claim(&mut self, key: SceneKey, id: InstanceId) {
        if key.is_detached() {
            return;
        }
        if let Some(previous) = self.owners.insert(key, id) {
            if previous != id {
                if let Some(keys) = self.owned.get_mut(&previous) {
                    keys.retain(|k| *k != key);
                }
            }
        }
        let keys = self.owned.entry(id).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Resolves a scene handle (root or attached part) to its top-level instance.
    pub fn resolve_root(&self, key: SceneKey) -> Option<InstanceId> {
        self.owners.get(&key).copied()
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedInstance> {
        self.instances.get(&id)
    }

    /// Ids of instances within `radius` of `center`, without duplicates.
    pub fn query_nearby(&self, center: Vec3, radius: f32) -> Vec<InstanceId> {
        let mut hits = Vec::new();
        self.index.query_nearby(center, radius, &mut hits);
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    /// Ids of `category` instances within `radius` (inclusive) of `position`.
    pub fn nearby_of_category(
        &self,
        position: Vec3,
        radius: f32,
        category: CategoryId,
    ) -> Vec<InstanceId> {
        let mut hits = Vec::new();
        self.index.query_nearby(position, radius, &mut hits);
        hits.retain(|id| {
            self.instances
                .get(id)
                .is_some_and(|instance| instance.category == category)
        });
        hits
    }

    /// Whether an instance of `category` lies within `spacing` (inclusive) of `position`.
    pub fn has_category_within(&self, position: Vec3, spacing: f32, category: CategoryId) -> bool {
        !self.nearby_of_category(position, spacing, category).is_empty()
    }

    /// Number of instances of `category`.
    pub fn count_category(&self, category: CategoryId) -> usize {
        self.instances
            .values()
            .filter(|i| i.category == category)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.values()
    }

    /// Removes every instance, returning them for despawning.
    pub fn drain(&mut self) -> Vec<PlacedInstance> {
        self.index.clear();
        self.owners.clear();
        self.owned.clear();
        let mut all: Vec<PlacedInstance> = self.instances.drain().map(|(_, v)| v).collect();
        all.sort_unstable_by_key(|i| i.id);
        all
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::EulerAngles;

    fn place(
        store: &mut InstanceStore,
        category: CategoryId,
        x: f32,
        z: f32,
        scene: u64,
    ) -> InstanceId {
        let anchor = Vec3::new(x, 0.0, z);
        // Pivot sits half a unit above the ground; queries must use the anchor.
        let transform = InstanceTransform::new(
            anchor + Vec3::new(0.0, 0.5, 0.0),
            EulerAngles::IDENTITY,
            Vec3::ONE,
        );
        store.insert(category, 0, anchor, transform, SceneKey(scene))
    }

    const ROCK: CategoryId = CategoryId(0);
    const TREE: CategoryId = CategoryId(1);

    #[test]
    fn insert_indexes_and_resolves_root() {
        let mut store = InstanceStore::new();
        let id = place(&mut store, ROCK, 1.0, 1.0, 10);
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve_root(SceneKey(10)), Some(id));
        assert_eq!(store.query_nearby(Vec3::new(1.0, 0.0, 1.0), 0.1), vec![id]);
        assert_eq!(store.get(id).unwrap().transform.position.y, 0.5);
    }

    #[test]
    fn attached_parts_resolve_to_their_root() {
        let mut store = InstanceStore::new();
        let id = place(&mut store, ROCK, 0.0, 0.0, 1);
        assert!(store.attach_part(SceneKey(2), id));
        assert!(store.attach_part(SceneKey(3), id));
        assert!(!store.attach_part(SceneKey(4), InstanceId(99)));
        assert_eq!(store.resolve_root(SceneKey(3)), Some(id));
        assert_eq!(store.resolve_root(SceneKey(4)), None);

        store.remove(id).unwrap();
        assert_eq!(store.resolve_root(SceneKey(1)), None);
        assert_eq!(store.resolve_root(SceneKey(2)), None);
        assert!(store.query_nearby(Vec3::ZERO, 1.0).is_empty());
    }

    #[test]
    fn category_proximity_ignores_other_categories() {
        let mut store = InstanceStore::new();
        place(&mut store, ROCK, 0.0, 0.0, 1);
        assert!(store.has_category_within(Vec3::new(1.0, 0.0, 0.0), 2.0, ROCK));
        assert!(!store.has_category_within(Vec3::new(1.0, 0.0, 0.0), 2.0, TREE));
        assert!(!store.has_category_within(Vec3::new(3.0, 0.0, 0.0), 2.0, ROCK));
    }

    #[test]
    fn drain_empties_everything_in_id_order() {
        let mut store = InstanceStore::new();
        place(&mut store, ROCK, 0.0, 0.0, 1);
        place(&mut store, TREE, 5.0, 0.0, 2);
        assert_eq!(store.count_category(TREE), 1);

        let drained = store.drain();
        assert_eq!(drained.len(), 2);
        assert!(drained[0].id < drained[1].id);
        assert!(store.is_empty());
        assert!(store.query_nearby(Vec3::ZERO, 100.0).is_empty());
        assert_eq!(store.resolve_root(SceneKey(1)), None);
    }

    #[test]
    fn removing_one_instance_keeps_other_parts_resolvable() {
        let mut store = InstanceStore::new();
        let a = place(&mut store, ROCK, 0.0, 0.0, 1);
        let b = place(&mut store, ROCK, 4.0, 0.0, 2);
        assert!(store.attach_part(SceneKey(10), a));
        assert!(store.attach_part(SceneKey(20), b));
        assert!(store.attach_part(SceneKey(21), b));

        store.remove(a).unwrap();
        assert_eq!(store.resolve_root(SceneKey(1)), None);
        assert_eq!(store.resolve_root(SceneKey(10)), None);
        assert_eq!(store.resolve_root(SceneKey(2)), Some(b));
        assert_eq!(store.resolve_root(SceneKey(20)), Some(b));
        assert_eq!(store.resolve_root(SceneKey(21)), Some(b));
    }

    #[test]
    fn reattached_part_follows_its_new_root() {
        let mut store = InstanceStore::new();
        let a = place(&mut store, ROCK, 0.0, 0.0, 1);
        let b = place(&mut store, TREE, 4.0, 0.0, 2);
        assert!(store.attach_part(SceneKey(7), a));
        assert!(store.attach_part(SceneKey(7), b));

        store.remove(a).unwrap();
        assert_eq!(store.resolve_root(SceneKey(7)), Some(b));
        store.remove(b).unwrap();
        assert_eq!(store.resolve_root(SceneKey(7)), None);
    }

    #[test]
    fn detached_keys_never_resolve() {
        let mut store = InstanceStore::new();
        let a = place(&mut store, ROCK, 0.0, 0.0, SceneKey::DETACHED.0);
        let b = place(&mut store, ROCK, 3.0, 0.0, SceneKey::DETACHED.0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a).unwrap().scene, SceneKey::DETACHED);
        assert_eq!(store.resolve_root(SceneKey::DETACHED), None);
        assert!(!store.attach_part(SceneKey::DETACHED, b));

        store.remove(a).unwrap();
        assert_eq!(store.query_nearby(Vec3::new(3.0, 0.0, 0.0), 0.1), vec![b]);
    }

    #[test]
    fn nearby_of_category_filters_hits() {
        let mut store = InstanceStore::new();
        let rock = place(&mut store, ROCK, 0.0, 0.0, 1);
        place(&mut store, TREE, 0.5, 0.0, 2);
        assert_eq!(store.nearby_of_category(Vec3::ZERO, 1.0, ROCK), vec![rock]);
    }
}
