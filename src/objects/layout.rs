//! Layout object.

use crate::document::ObjectRef;
use crate::types::{Vector2, Vector3};

/// A paper space layout tab and its plot configuration.
#[derive(Debug, Clone)]
pub struct Layout {
    // Plot settings.
    pub page_name: String,
    pub printer_name: String,
    /// Stored plot layout flags.
    pub plot_flags: i16,
    pub left_margin: f64,
    pub bottom_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub paper_width: f64,
    pub paper_height: f64,
    pub paper_size: String,
    pub plot_origin: Vector2,
    pub paper_units: i16,
    pub plot_rotation: i16,
    pub plot_type: i16,
    pub window_min: Vector2,
    pub window_max: Vector2,
    pub numerator: f64,
    pub denominator: f64,
    pub current_style_sheet: String,
    pub standard_scale_type: i16,
    pub standard_scale_factor: f64,
    pub paper_image_origin: Vector2,

    // Layout data.
    pub name: String,
    pub tab_order: i32,
    /// Bit 1 PSLTSCALE, bit 2 LIMCHECK.
    pub flags: i16,
    pub ucs_origin: Vector3,
    pub limits_min: Vector2,
    pub limits_max: Vector2,
    pub insertion_base: Vector3,
    pub ucs_x_axis: Vector3,
    pub ucs_y_axis: Vector3,
    pub elevation: f64,
    pub ucs_ortho_type: i16,
    pub extents_min: Vector3,
    pub extents_max: Vector3,

    pub paper_space_block: ObjectRef,
    pub active_viewport: ObjectRef,
    pub base_ucs: ObjectRef,
    pub named_ucs: ObjectRef,
    pub viewports: Vec<ObjectRef>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_name: String::new(),
            printer_name: String::new(),
            plot_flags: 0,
            left_margin: 0.0,
            bottom_margin: 0.0,
            right_margin: 0.0,
            top_margin: 0.0,
            paper_width: 0.0,
            paper_height: 0.0,
            paper_size: String::new(),
            plot_origin: Vector2::ZERO,
            paper_units: 0,
            plot_rotation: 0,
            plot_type: 0,
            window_min: Vector2::ZERO,
            window_max: Vector2::ZERO,
            numerator: 1.0,
            denominator: 1.0,
            current_style_sheet: String::new(),
            standard_scale_type: 0,
            standard_scale_factor: 1.0,
            paper_image_origin: Vector2::ZERO,
            name: String::new(),
            tab_order: 0,
            flags: 0,
            ucs_origin: Vector3::ZERO,
            limits_min: Vector2::ZERO,
            limits_max: Vector2::ZERO,
            insertion_base: Vector3::ZERO,
            ucs_x_axis: Vector3::new(1.0, 0.0, 0.0),
            ucs_y_axis: Vector3::new(0.0, 1.0, 0.0),
            elevation: 0.0,
            ucs_ortho_type: 0,
            extents_min: Vector3::ZERO,
            extents_max: Vector3::ZERO,
            paper_space_block: ObjectRef::Null,
            active_viewport: ObjectRef::Null,
            base_ucs: ObjectRef::Null,
            named_ucs: ObjectRef::Null,
            viewports: Vec::new(),
        }
    }
}
