//! Brush categories and the registry holding the active selection.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bounds::{Aabb, InstanceTransform};
use crate::brush::events::{BrushEvent, BrushEventKind, EventSink};
use crate::brush::import::normalize_scale;
use crate::brush::{CategoryId, NO_CATEGORIES};
use crate::error::{Error, Result};

/// An instantiable model with its authored scale and render bounds.
///
/// `parts` are the pivot-relative bounds of each rendered mesh at unit scale. Their union
/// is the model's combined render bounds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTemplate {
    /// Opaque handle understood by the scene host (asset path, prefab name, ...).
    pub asset: String,
    /// Authored scale; random stroke scale is multiplied onto it.
    pub base_scale: Vec3,
    pub parts: Vec<Aabb>,
}

impl ModelTemplate {
    pub fn new(asset: impl Into<String>, parts: Vec<Aabb>) -> Self {
        Self {
            asset: asset.into(),
            base_scale: Vec3::ONE,
            parts,
        }
    }

    /// Template with a single render part.
    pub fn with_bounds(asset: impl Into<String>, bounds: Aabb) -> Self {
        Self::new(asset, vec![bounds])
    }

    pub fn with_base_scale(mut self, base_scale: Vec3) -> Self {
        self.base_scale = base_scale;
        self
    }

    /// Combined render bounds at unit scale.
    pub fn bounds(&self) -> Option<Aabb> {
        self.parts.iter().copied().reduce(|a, b| a.union(&b))
    }

    /// Combined render bounds at the authored scale.
    pub fn scaled_bounds(&self) -> Option<Aabb> {
        self.bounds().map(|b| b.scaled(self.base_scale))
    }

    /// Lowest rendered world Y when placed with `transform`.
    pub fn lowest_point(&self, transform: &InstanceTransform) -> Option<f32> {
        transform.lowest_point(&self.parts)
    }
}

/// Named group of interchangeable model templates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BrushCategory {
    pub id: CategoryId,
    pub name: String,
    pub templates: Vec<ModelTemplate>,
}

/// Ordered categories plus the active selection.
///
/// Names are unique. The active index is always valid while the registry is non-empty.
#[derive(Debug, Clone, Default)]
pub struct BrushRegistry {
    categories: Vec<BrushCategory>,
    active: usize,
    next_id: u32,
}

impl BrushRegistry {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            active: 0,
            next_id: 0,
        }
    }

    /// Adds a configuration-time category. The active selection is left untouched.
    pub fn with_category(
        mut self,
        name: impl Into<String>,
        templates: Vec<ModelTemplate>,
    ) -> Result<Self> {
        self.push(name.into(), templates)?;
        Ok(self)
    }

    /// Appends a category, returning its id. The active selection is left untouched.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        templates: Vec<ModelTemplate>,
    ) -> Result<CategoryId> {
        self.push(name.into(), templates)
    }

    /// Appends a single-template category built from an imported model and makes it active.
    ///
    /// The model is shrunk so its largest dimension is at most one unit. Listeners are
    /// notified with [`BrushEvent::CategoryAdded`].
    pub fn add_category(
        &mut self,
        mut template: ModelTemplate,
        name: impl Into<String>,
        sink: &mut dyn EventSink,
    ) -> Result<CategoryId> {
        let name = name.into();
        let factor = normalize_scale(&mut template);
        let asset = template.asset.clone();
        let id = self.push(name.clone(), vec![template])?;
        let index = self.categories.len() - 1;
        self.active = index;

        info!(
            "Added brush category '{}' at index {} (scale factor {}).",
            name, index, factor
        );
        if sink.wants(BrushEventKind::CategoryAdded) {
            sink.send(BrushEvent::CategoryAdded {
                index,
                category: id,
                name,
                asset,
            });
        }
        Ok(id)
    }

    fn push(&mut self, name: String, templates: Vec<ModelTemplate>) -> Result<CategoryId> {
        if name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "brush category name must not be empty".into(),
            ));
        }
        if self.index_of(&name).is_some() {
            return Err(Error::DuplicateCategory { name });
        }

        let id = CategoryId(self.next_id);
        self.next_id += 1;
        self.categories.push(BrushCategory {
            id,
            name,
            templates,
        });
        Ok(id)
    }

    /// Selects the category at `index`. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index < self.categories.len() {
            self.active = index;
        } else {
            warn!(
                "Ignoring brush index {} ({} categories).",
                index,
                self.categories.len()
            );
        }
    }

    /// Selects a category by name, returning its index.
    pub fn select(&mut self, name: &str) -> Result<usize> {
        let index = self.index_of(name).ok_or_else(|| Error::UnknownCategory {
            name: name.to_owned(),
        })?;
        self.active = index;
        Ok(index)
    }

    pub fn active(&self) -> Option<&BrushCategory> {
        self.categories.get(self.active)
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.categories.is_empty()).then_some(self.active)
    }

    /// Active category name, or a placeholder when the registry is empty.
    pub fn active_name(&self) -> &str {
        self.active()
            .map(|c| c.name.as_str())
            .unwrap_or(NO_CATEGORIES)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    pub fn category(&self, index: usize) -> Option<&BrushCategory> {
        self.categories.get(index)
    }

    pub fn by_id(&self, id: CategoryId) -> Option<&BrushCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[BrushCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::events::VecSink;

    fn cube(asset: &str, size: f32) -> ModelTemplate {
        ModelTemplate::with_bounds(asset, Aabb::from_center_size(Vec3::ZERO, Vec3::splat(size)))
    }

    fn registry() -> BrushRegistry {
        BrushRegistry::new()
            .with_category("Rock", vec![cube("rock_a", 1.0), cube("rock_b", 1.0)])
            .unwrap()
            .with_category("Tree", vec![cube("tree", 1.0)])
            .unwrap()
    }

    #[test]
    fn empty_registry_reports_placeholder() {
        let reg = BrushRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.active().is_none());
        assert_eq!(reg.active_index(), None);
        assert_eq!(reg.active_name(), NO_CATEGORIES);
    }

    #[test]
    fn set_active_ignores_out_of_range() {
        let mut reg = registry();
        reg.set_active(1);
        assert_eq!(reg.active_name(), "Tree");
        reg.set_active(7);
        assert_eq!(reg.active_index(), Some(1));
        assert_eq!(reg.active_name(), "Tree");
    }

    #[test]
    fn select_by_name() {
        let mut reg = registry();
        assert_eq!(reg.select("Tree").unwrap(), 1);
        assert!(matches!(
            reg.select("Bush"),
            Err(Error::UnknownCategory { ref name }) if name == "Bush"
        ));
        assert_eq!(reg.active_name(), "Tree");
    }

    #[test]
    fn names_are_unique_and_non_empty() {
        let mut reg = registry();
        assert!(matches!(
            reg.insert("Rock", vec![]),
            Err(Error::DuplicateCategory { .. })
        ));
        assert!(matches!(reg.insert("  ", vec![]), Err(Error::InvalidConfig(_))));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn add_category_appends_activates_and_notifies() {
        let mut reg = registry();
        let mut sink = VecSink::new();
        let id = reg
            .add_category(cube("statue.glb", 4.0), "statue", &mut sink)
            .unwrap();

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.active_index(), Some(2));
        assert_eq!(reg.active_name(), "statue");
        assert_eq!(reg.by_id(id).unwrap().templates.len(), 1);
        assert_eq!(reg.active().unwrap().templates[0].base_scale, Vec3::splat(0.25));

        let events = sink.into_inner();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            BrushEvent::CategoryAdded { index: 2, ref name, ref asset, .. }
                if name == "statue" && asset == "statue.glb"
        ));
    }

    #[test]
    fn add_category_with_taken_name_keeps_selection() {
        let mut reg = registry();
        let mut sink = VecSink::new();
        assert!(reg.add_category(cube("x", 1.0), "Rock", &mut sink).is_err());
        assert_eq!(reg.active_index(), Some(0));
        assert!(sink.is_empty());
    }

    #[test]
    fn ids_are_distinct_in_insertion_order() {
        let reg = registry();
        let ids: Vec<_> = reg.categories().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CategoryId(0), CategoryId(1)]);
    }

    #[test]
    fn template_bounds_union_parts() {
        let t = ModelTemplate::new(
            "pair",
            vec![
                Aabb::new(Vec3::ZERO, Vec3::ONE),
                Aabb::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(2.0, 0.5, 1.0)),
            ],
        )
        .with_base_scale(Vec3::splat(2.0));
        let b = t.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(t.scaled_bounds().unwrap().max_dimension(), 4.0);
    }
}
