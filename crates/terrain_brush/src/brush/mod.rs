//! Brush strokes: categories, settings, rate limiting, placement, erase and events.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod erase;
pub mod events;
pub mod governor;
pub mod import;
pub mod placement;
pub mod registry;
pub mod scene;
pub mod settings;
pub mod spatial;
pub mod store;
pub mod stroke;
pub mod tool;

/// Fill density at or above which painting switches from scatter to grid tiling.
pub const GRID_FILL_THRESHOLD: f32 = 99.5;

/// Spacing at or below this distance disables the proximity check.
pub const SPACING_EPSILON: f32 = 0.01;

/// Relative shrink of the spacing radius. Absorbs rounding in the distance test only, so
/// anything measurably closer than `min_spacing` is still rejected.
pub const SPACING_ROUNDING: f32 = 4.0 * f32::EPSILON;

/// Name reported by an empty registry.
pub const NO_CATEGORIES: &str = "No Brushes Setup!";

/// Identifier of a brush category, assigned by [`registry::BrushRegistry`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u32);

/// Identifier of a top-level placed instance, assigned by [`store::InstanceStore`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Handle issued by a [`scene::SceneHost`] for a spawned model or one of its parts.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneKey(pub u64);

impl SceneKey {
    /// Handle for a model that has no scene counterpart. Never resolves to an instance.
    pub const DETACHED: SceneKey = SceneKey(u64::MAX);

    pub fn is_detached(self) -> bool {
        self == Self::DETACHED
    }
}

/// What a stroke does.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushMode {
    #[default]
    Paint,
    Erase,
}

impl BrushMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            BrushMode::Paint => BrushMode::Erase,
            BrushMode::Erase => BrushMode::Paint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_toggles_both_ways() {
        assert_eq!(BrushMode::default(), BrushMode::Paint);
        assert_eq!(BrushMode::Paint.toggled(), BrushMode::Erase);
        assert_eq!(BrushMode::Erase.toggled(), BrushMode::Paint);
    }
}
