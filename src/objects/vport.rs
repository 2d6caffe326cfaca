//! Viewport configuration table record and viewport entity header.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::{Vector2, Vector3};

/// A tiled model space viewport configuration.
#[derive(Debug, Clone)]
pub struct VPort {
    pub record: TableRecordCommon,
    pub view_height: f64,
    pub aspect_ratio: f64,
    pub view_center: Vector2,
    pub view_target: Vector3,
    pub view_direction: Vector3,
    pub twist_angle: f64,
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    pub view_mode: i32,
    pub render_mode: u8,
    pub lower_left: Vector2,
    pub upper_right: Vector2,
    pub ucs_follow: bool,
    pub circle_sides: i16,
    pub fast_zoom: bool,
    pub snap_on: bool,
    pub snap_isometric: bool,
    pub snap_isopair: i16,
    pub snap_rotation: f64,
    pub snap_base: Vector2,
    pub snap_spacing: Vector2,
    pub grid_on: bool,
    pub grid_spacing: Vector2,
    pub ucs_per_viewport: bool,
    pub ucs_origin: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub ucs_elevation: f64,
    pub ucs_ortho_type: i16,
    pub named_ucs: ObjectRef,
    pub base_ucs: ObjectRef,
}

impl Default for VPort {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            view_height: 0.0,
            aspect_ratio: 1.0,
            view_center: Vector2::ZERO,
            view_target: Vector3::ZERO,
            view_direction: Vector3::UNIT_Z,
            twist_angle: 0.0,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            view_mode: 0,
            render_mode: 0,
            lower_left: Vector2::ZERO,
            upper_right: Vector2::new(1.0, 1.0),
            ucs_follow: false,
            circle_sides: 100,
            fast_zoom: true,
            snap_on: false,
            snap_isometric: false,
            snap_isopair: 0,
            snap_rotation: 0.0,
            snap_base: Vector2::ZERO,
            snap_spacing: Vector2::new(0.5, 0.5),
            grid_on: false,
            grid_spacing: Vector2::new(0.5, 0.5),
            ucs_per_viewport: true,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            ucs_elevation: 0.0,
            ucs_ortho_type: 0,
            named_ucs: ObjectRef::Null,
            base_ucs: ObjectRef::Null,
        }
    }
}

impl VPort {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Bookkeeping record pairing a paper space viewport entity with its
/// table slot.
#[derive(Debug, Clone, Default)]
pub struct VpEntityHeader {
    pub record: TableRecordCommon,
    pub flag: bool,
    pub viewport_entity: ObjectRef,
}
