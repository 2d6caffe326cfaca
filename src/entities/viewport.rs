//! Paper space viewport entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::{Vector2, Vector3};

/// A rectangular window in paper space showing a model space view.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub common: EntityCommon,
    /// Center in paper space.
    pub center: Vector3,
    pub width: f64,
    pub height: f64,
    pub view_target: Vector3,
    pub view_direction: Vector3,
    pub twist_angle: f64,
    pub view_height: f64,
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    pub snap_angle: f64,
    pub view_center: Vector2,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,
    pub grid_spacing: Vector2,
    pub circle_sides: i16,
    pub grid_major: i16,
    pub status_flags: i32,
    pub style_sheet: String,
    pub render_mode: u8,
    pub ucs_per_viewport: bool,
    pub ucs_origin: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub ucs_elevation: f64,
    pub ucs_ortho_type: i16,
    pub frozen_layers: Vec<ObjectRef>,
    pub boundary: ObjectRef,
    pub named_ucs: ObjectRef,
    pub base_ucs: ObjectRef,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            width: 0.0,
            height: 0.0,
            view_target: Vector3::ZERO,
            view_direction: Vector3::UNIT_Z,
            twist_angle: 0.0,
            view_height: 0.0,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            snap_angle: 0.0,
            view_center: Vector2::ZERO,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::new(0.5, 0.5),
            grid_spacing: Vector2::new(0.5, 0.5),
            circle_sides: 100,
            grid_major: 5,
            status_flags: 0,
            style_sheet: String::new(),
            render_mode: 0,
            ucs_per_viewport: true,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            ucs_elevation: 0.0,
            ucs_ortho_type: 0,
            frozen_layers: Vec::new(),
            boundary: ObjectRef::Null,
            named_ucs: ObjectRef::Null,
            base_ucs: ObjectRef::Null,
        }
    }
}

impl Viewport {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0.0 {
            0.0
        } else {
            self.width / self.height
        }
    }
}
