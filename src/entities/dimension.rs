//! Dimension entities.
//!
//! All seven dimension types share a large common block; the subtype only
//! adds its defining points. They are modeled as one struct with a
//! [`DimensionKind`] discriminant.

use crate::document::ObjectRef;
use crate::entities::EntityCommon;
use crate::types::{Vector2, Vector3};

/// The measured geometry of a dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionKind {
    /// Measures an x or y distance from an origin.
    Ordinate {
        feature_location: Vector3,
        leader_endpoint: Vector3,
        /// Bit 1 set: measures x, otherwise y.
        flags: u8,
    },
    /// Rotated linear dimension.
    Linear {
        first_point: Vector3,
        second_point: Vector3,
        rotation: f64,
        extension_rotation: f64,
    },
    /// Linear dimension aligned with the measured points.
    Aligned {
        first_point: Vector3,
        second_point: Vector3,
        extension_rotation: f64,
    },
    /// Angle defined by three points.
    Angular3Point {
        first_point: Vector3,
        second_point: Vector3,
        angle_vertex: Vector3,
    },
    /// Angle between two lines.
    Angular2Line {
        first_start: Vector3,
        first_end: Vector3,
        second_start: Vector3,
        second_end: Vector3,
        arc_point: Vector2,
    },
    Radius {
        chord_point: Vector3,
        leader_length: f64,
    },
    Diameter {
        far_chord_point: Vector3,
        leader_length: f64,
    },
}

/// A dimension entity: the shared block plus the subtype geometry.
#[derive(Debug, Clone)]
pub struct Dimension {
    pub common: EntityCommon,
    pub normal: Vector3,
    pub text_midpoint: Vector2,
    pub elevation: f64,
    /// Raw stored flags; bit 1 means the text was moved by the user.
    pub flags: u8,
    /// User override text, empty when the measurement is shown.
    pub user_text: String,
    pub text_rotation: f64,
    pub horizontal_direction: f64,
    pub insert_scale: Vector3,
    pub insert_rotation: f64,
    /// 0 center, 1..=4 corner attachment.
    pub attachment_point: i16,
    pub line_spacing_style: i16,
    pub line_spacing_factor: f64,
    /// Measurement captured at save time.
    pub actual_measurement: f64,
    /// The definition point common to all subtypes.
    pub definition_point: Vector3,
    pub kind: DimensionKind,
    pub dim_style: ObjectRef,
    /// The anonymous block holding the rendered geometry.
    pub block: ObjectRef,
}

impl Default for Dimension {
    fn default() -> Self {
        Self {
            common: EntityCommon::default(),
            normal: Vector3::UNIT_Z,
            text_midpoint: Vector2::ZERO,
            elevation: 0.0,
            flags: 0,
            user_text: String::new(),
            text_rotation: 0.0,
            horizontal_direction: 0.0,
            insert_scale: Vector3::new(1.0, 1.0, 1.0),
            insert_rotation: 0.0,
            attachment_point: 0,
            line_spacing_style: 1,
            line_spacing_factor: 1.0,
            actual_measurement: 0.0,
            definition_point: Vector3::ZERO,
            kind: DimensionKind::Linear {
                first_point: Vector3::ZERO,
                second_point: Vector3::ZERO,
                rotation: 0.0,
                extension_rotation: 0.0,
            },
            dim_style: ObjectRef::Null,
            block: ObjectRef::Null,
        }
    }
}

impl Dimension {
    /// Whether the user overrode the measured text.
    pub fn has_user_text(&self) -> bool {
        !self.user_text.is_empty()
    }
}
