//! View table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::{Vector2, Vector3};

/// A named view of model or paper space.
#[derive(Debug, Clone)]
pub struct View {
    pub record: TableRecordCommon,
    pub height: f64,
    pub width: f64,
    pub center: Vector2,
    pub target: Vector3,
    pub direction: Vector3,
    pub twist_angle: f64,
    pub lens_length: f64,
    pub front_clip: f64,
    pub back_clip: f64,
    pub ucs_follow: bool,
    pub front_clip_on: bool,
    pub back_clip_on: bool,
    pub render_mode: u8,
    pub has_ucs: bool,
    pub ucs_origin: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub ucs_elevation: f64,
    pub ucs_ortho_type: i16,
    pub base_ucs: ObjectRef,
    pub named_ucs: ObjectRef,
}

impl Default for View {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            height: 0.0,
            width: 0.0,
            center: Vector2::ZERO,
            target: Vector3::ZERO,
            direction: Vector3::UNIT_Z,
            twist_angle: 0.0,
            lens_length: 50.0,
            front_clip: 0.0,
            back_clip: 0.0,
            ucs_follow: false,
            front_clip_on: false,
            back_clip_on: false,
            render_mode: 0,
            has_ucs: false,
            ucs_origin: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            ucs_elevation: 0.0,
            ucs_ortho_type: 0,
            base_ucs: ObjectRef::Null,
            named_ucs: ObjectRef::Null,
        }
    }
}

impl View {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
