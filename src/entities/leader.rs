//! Leader entity.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::Vector3;

/// A dimension-style leader line pointing at an annotation.
#[derive(Debug, Clone)]
pub struct Leader {
    pub common: EntityCommon,
    /// 0 mtext, 1 tolerance, 2 insert, 3 none.
    pub annotation_type: i16,
    /// 0 straight segments, 1 spline.
    pub path_type: i16,
    pub points: Vec<Vector3>,
    pub normal: Vector3,
    pub horizontal_direction: Vector3,
    pub block_offset: Vector3,
    pub annotation_offset: Vector3,
    pub has_hook_line: bool,
    pub arrowhead_on: bool,
    pub arrowhead_size: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub color_index: i16,
    pub annotation: ObjectRef,
    pub dim_style: ObjectRef,
}

impl Default for Leader {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            annotation_type: 3,
            path_type: 0,
            points: Vec::new(),
            normal: Vector3::UNIT_Z,
            horizontal_direction: Vector3::new(1.0, 0.0, 0.0),
            block_offset: Vector3::ZERO,
            annotation_offset: Vector3::ZERO,
            has_hook_line: false,
            arrowhead_on: true,
            arrowhead_size: 0.0,
            text_width: 0.0,
            text_height: 0.0,
            color_index: 0,
            annotation: ObjectRef::Null,
            dim_style: ObjectRef::Null,
        }
    }
}
