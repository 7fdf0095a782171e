//! RON brush presets: categories, settings and session parameters for the demos.
use anyhow::Context;
use glam::Vec3;
use serde::Deserialize;
use terrain_brush::prelude::*;

/// A preset loaded from a `.brush.ron` file.
#[derive(Debug, Clone, Deserialize)]
pub struct BrushPreset {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Initial brush radius; stepped with the same bounds as the hotkeys.
    #[serde(default = "default_radius")]
    pub brush_radius: f32,
    /// Simulated frame time in seconds.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    #[serde(default)]
    pub settings: BrushSettings,
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub templates: Vec<TemplateDef>,
}

/// Box-shaped model stand-in.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDef {
    pub asset: String,
    pub size: (f32, f32, f32),
    #[serde(default)]
    pub pivot: PivotDef,
    #[serde(default = "default_base_scale")]
    pub base_scale: f32,
}

/// Where the model's pivot sits relative to its bounds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub enum PivotDef {
    #[default]
    Bottom,
    Center,
    /// Pivot this far above the bottom face.
    Raised(f32),
}

fn default_seed() -> u64 {
    42
}

fn default_radius() -> f32 {
    5.0
}

fn default_frame_time() -> f32 {
    1.0 / 60.0
}

fn default_base_scale() -> f32 {
    1.0
}

impl TemplateDef {
    pub fn to_template(&self) -> ModelTemplate {
        let size = Vec3::new(self.size.0, self.size.1, self.size.2);
        let lift = match self.pivot {
            PivotDef::Bottom => 0.0,
            PivotDef::Center => size.y * 0.5,
            PivotDef::Raised(h) => h,
        };
        let center = Vec3::new(0.0, size.y * 0.5 - lift, 0.0);
        ModelTemplate::with_bounds(self.asset.clone(), Aabb::from_center_size(center, size))
            .with_base_scale(Vec3::splat(self.base_scale))
    }
}

impl BrushPreset {
    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        let preset: BrushPreset =
            ron::de::from_str(text).map_err(|e| anyhow::anyhow!(e))?;
        preset
            .settings
            .validate()
            .context("preset settings are invalid")?;
        Ok(preset)
    }

    pub fn registry(&self) -> anyhow::Result<BrushRegistry> {
        let mut registry = BrushRegistry::new();
        for def in &self.categories {
            let templates = def.templates.iter().map(TemplateDef::to_template).collect();
            registry
                .insert(def.name.clone(), templates)
                .with_context(|| format!("category '{}'", def.name))?;
        }
        Ok(registry)
    }

    pub fn brush_size(&self) -> BrushSize {
        let mut size = BrushSize::default();
        size.set(self.brush_radius);
        size
    }

    /// A tool with this preset's categories and settings.
    pub fn tool(&self) -> anyhow::Result<BrushTool> {
        let mut tool = BrushTool::try_new(self.registry()?, self.settings.clone())?;
        *tool.size_mut() = self.brush_size();
        Ok(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEADOW: &str = include_str!("../assets/meadow.brush.ron");

    #[test]
    fn bundled_preset_parses() {
        let preset = BrushPreset::from_ron(MEADOW).unwrap();
        let registry = preset.registry().unwrap();
        assert_eq!(registry.active_name(), "Rock");
        assert!(registry.len() >= 2);
        assert!(preset.tool().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let preset = BrushPreset::from_ron(
            r#"(categories: [(name: "Rock", templates: [(asset: "rock", size: (1.0, 1.0, 1.0))])])"#,
        )
        .unwrap();
        assert_eq!(preset.seed, 42);
        assert_eq!(preset.settings, BrushSettings::default());
        assert_eq!(preset.brush_size().radius(), 5.0);
    }

    #[test]
    fn pivot_offsets_shift_the_bounds() {
        let def = TemplateDef {
            asset: "tree".into(),
            size: (1.0, 4.0, 1.0),
            pivot: PivotDef::Center,
            base_scale: 1.0,
        };
        let b = def.to_template().bounds().unwrap();
        assert_eq!(b.min.y, -2.0);
        assert_eq!(b.max.y, 2.0);
    }

    #[test]
    fn invalid_settings_are_reported() {
        let err = BrushPreset::from_ron(r#"(settings: (max_tilt: 120.0), categories: [])"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("max_tilt"));
    }
}
