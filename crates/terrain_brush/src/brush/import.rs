//! Preparing imported models for use as brush templates.
//!
//! The import pipeline itself (file picking, glTF parsing, async loading) lives outside
//! this crate; these helpers shape its output into a [`ModelTemplate`] and a category name.
use tracing::debug;

use crate::brush::registry::ModelTemplate;

/// Extensions stripped from imported file names.
const MODEL_EXTENSIONS: [&str; 2] = [".glb", ".gltf"];

/// Shrinks `template` so the largest dimension of its scaled bounds is at most one unit.
///
/// Returns the uniform factor applied; models that already fit (or have no bounds) are
/// left untouched and report `1.0`.
pub fn normalize_scale(template: &mut ModelTemplate) -> f32 {
    let Some(bounds) = template.scaled_bounds() else {
        return 1.0;
    };
    let max_dimension = bounds.max_dimension();
    if !max_dimension.is_finite() || max_dimension <= 1.0 {
        return 1.0;
    }

    let factor = 1.0 / max_dimension;
    template.base_scale *= factor;
    debug!(
        "Normalized '{}' from max dimension {} by factor {}.",
        template.asset, max_dimension, factor
    );
    factor
}

/// Category name for an imported file: the file name without directories or model extension.
pub fn category_name_from_file(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let lower = base.to_ascii_lowercase();
    for ext in MODEL_EXTENSIONS {
        if lower.ends_with(ext) && base.len() > ext.len() {
            return base[..base.len() - ext.len()].to_owned();
        }
    }
    base.to_owned()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::bounds::Aabb;

    fn boxed(size: Vec3) -> ModelTemplate {
        ModelTemplate::with_bounds("m", Aabb::from_center_size(Vec3::ZERO, size))
    }

    #[test]
    fn large_model_is_scaled_by_inverse_max_dimension() {
        let mut t = boxed(Vec3::new(2.0, 4.0, 1.0));
        let factor = normalize_scale(&mut t);
        assert_eq!(factor, 0.25);
        assert_eq!(t.base_scale, Vec3::splat(0.25));
        assert_eq!(t.scaled_bounds().unwrap().max_dimension(), 1.0);
    }

    #[test]
    fn small_model_is_never_enlarged() {
        let mut t = boxed(Vec3::splat(0.5));
        assert_eq!(normalize_scale(&mut t), 1.0);
        assert_eq!(t.base_scale, Vec3::ONE);

        let mut exact = boxed(Vec3::ONE);
        assert_eq!(normalize_scale(&mut exact), 1.0);
    }

    #[test]
    fn authored_scale_counts_toward_size() {
        let mut t = boxed(Vec3::ONE).with_base_scale(Vec3::splat(2.0));
        assert_eq!(normalize_scale(&mut t), 0.5);
        assert_eq!(t.base_scale, Vec3::ONE);
    }

    #[test]
    fn model_without_parts_is_left_alone() {
        let mut t = ModelTemplate::new("empty", Vec::new());
        assert_eq!(normalize_scale(&mut t), 1.0);
    }

    #[test]
    fn file_names_lose_extension_and_directories() {
        assert_eq!(category_name_from_file("Boulder.glb"), "Boulder");
        assert_eq!(category_name_from_file("models/Fern.GLTF"), "Fern");
        assert_eq!(category_name_from_file("C:\\imports\\stump.glb"), "stump");
        assert_eq!(category_name_from_file("plain"), "plain");
        assert_eq!(category_name_from_file(".glb"), ".glb");
    }
}
