//! Body readers for the symbol table controls and their records.

use crate::document::{ObjectHeader, ObjectVariant};
use crate::error::Result;
use crate::objects::{
    AppId, BlockHeader, DimStyle, Layer, LineType, LineTypeDash, TableControl, TableControlKind,
    TableRecordCommon, TextStyle, Ucs, VPort, View, VpEntityHeader,
};
use crate::types::Color;

use super::object_decoder::{ControlKind, ObjectDecoder, StreamSet};

impl ControlKind {
    fn table_kind(self) -> TableControlKind {
        match self {
            ControlKind::Layer => TableControlKind::Layer,
            ControlKind::TextStyle => TableControlKind::TextStyle,
            ControlKind::View => TableControlKind::View,
            ControlKind::Ucs => TableControlKind::Ucs,
            ControlKind::VPort => TableControlKind::VPort,
            ControlKind::AppId => TableControlKind::AppId,
            ControlKind::DimStyle => TableControlKind::DimStyle,
            ControlKind::VpEntityHeader => TableControlKind::VpEntityHeader,
        }
    }
}

impl ObjectDecoder<'_> {
    // -------------------------------------------------------------------
    // Control objects
    // -------------------------------------------------------------------

    /// Generic table head: a BL entry count followed by the entry handles.
    pub(super) fn read_table_control(
        &mut self,
        s: &mut StreamSet,
        kind: ControlKind,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut control = TableControl::new(kind.table_kind());

        let entry_count = s.object.read_bit_long()?.max(0) as usize;
        control.entries.reserve(entry_count);
        for _ in 0..entry_count {
            let entry = s.object_ref()?;
            control.entries.push(entry);
        }

        Ok((header, ObjectVariant::TableControl(control)))
    }

    /// The block table stores the model and paper space headers after the
    /// counted entries.
    pub(super) fn read_block_control(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut control = TableControl::new(TableControlKind::Block);

        let entry_count = s.object.read_bit_long()?.max(0) as usize;
        control.entries.reserve(entry_count);
        for _ in 0..entry_count {
            let entry = s.object_ref()?;
            control.entries.push(entry);
        }

        control.model_space = s.object_ref()?;
        control.paper_space = s.object_ref()?;

        Ok((header, ObjectVariant::TableControl(control)))
    }

    /// The linetype table stores the ByLayer and ByBlock records after the
    /// counted entries.
    pub(super) fn read_ltype_control(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut control = TableControl::new(TableControlKind::LineType);

        let entry_count = s.object.read_bit_long()?.max(0) as usize;
        control.entries.reserve(entry_count);
        for _ in 0..entry_count {
            let entry = s.object_ref()?;
            control.entries.push(entry);
        }

        control.bylayer = s.object_ref()?;
        control.byblock = s.object_ref()?;

        Ok((header, ObjectVariant::TableControl(control)))
    }

    // -------------------------------------------------------------------
    // Table records
    // -------------------------------------------------------------------

    /// Name, xref flag and the control reference shared by every record.
    fn read_record_common(
        &mut self,
        s: &mut StreamSet,
        header: &ObjectHeader,
    ) -> Result<TableRecordCommon> {
        let mut record = TableRecordCommon {
            name: s.object.read_variable_text()?,
            control: header.owner,
            ..Default::default()
        };
        record.xref_dependent = self.read_xref_dependant_bit(s)?;
        Ok(record)
    }

    pub(super) fn read_block_header(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut block = BlockHeader {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        block.anonymous = s.object.read_bit()?;
        block.has_attribute_definitions = s.object.read_bit()?;
        block.is_xref = s.object.read_bit()?;
        block.is_xref_overlay = s.object.read_bit()?;

        if self.version.r2000_plus() {
            block.xref_loaded = s.object.read_bit()?;
        }

        let is_plain = !block.is_xref && !block.is_xref_overlay;
        let owned_count = if self.version.r2004_plus() && is_plain {
            s.object.read_bit_long()?.max(0) as usize
        } else {
            0
        };

        block.base_point = s.object.read_3_bit_double()?;
        block.xref_path = s.object.read_variable_text()?;

        // The insert count is stored as a run of non-zero bytes.
        let mut insert_count = 0usize;
        if self.version.r2000_plus() {
            loop {
                if s.object.read_byte()? == 0 {
                    break;
                }
                insert_count += 1;
            }
            block.insert_count = insert_count.min(u8::MAX as usize) as u8;

            block.description = s.object.read_variable_text()?;

            let preview_size = s.object.read_bit_long()?.max(0) as usize;
            if preview_size > 0 {
                block.preview = s.object.read_bytes(preview_size)?;
            }
        }

        if self.version.r2007_plus() {
            let _units = s.object.read_bit_short()?;
            let _explodable = s.object.read_bit()?;
            let _can_scale = s.object.read_byte()?;
        }

        block.record.xref = s.object_ref()?;
        block.block_entity = s.object_ref()?;

        if !self.version.r2004_plus() && is_plain {
            block.first_entity = s.object_ref()?;
            block.last_entity = s.object_ref()?;
        }
        if self.version.r2004_plus() && is_plain {
            block.entities.reserve(owned_count);
            for _ in 0..owned_count {
                let entity = s.object_ref()?;
                block.entities.push(entity);
            }
        }

        block.end_block_entity = s.object_ref()?;

        if self.version.r2000_plus() {
            block.inserts.reserve(insert_count);
            for _ in 0..insert_count {
                let insert = s.object_ref()?;
                block.inserts.push(insert);
            }
            block.layout = s.object_ref()?;
        }

        Ok((header, ObjectVariant::BlockHeader(block)))
    }

    pub(super) fn read_layer(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut layer = Layer {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        if self.version.r13_14_only() {
            layer.frozen = s.object.read_bit()?;
            layer.off = !s.object.read_bit()?;
            layer.frozen_in_new_viewports = s.object.read_bit()?;
            layer.locked = s.object.read_bit()?;
        } else {
            // Flags, plottable and lineweight packed into one short.
            let values = s.object.read_bit_short()?;
            layer.frozen = values & 0x01 != 0;
            layer.off = values & 0x02 != 0;
            layer.frozen_in_new_viewports = values & 0x04 != 0;
            layer.locked = values & 0x08 != 0;
            layer.plottable = values & 0x10 != 0;
            layer.lineweight = (values & 0x3E0) >> 5;
        }

        layer.color = s.object.read_cm_color()?;
        layer.record.xref = s.object_ref()?;

        if self.version.r2000_plus() {
            layer.plotstyle = s.object_ref()?;
        }
        layer.linetype = s.object_ref()?;

        Ok((header, ObjectVariant::Layer(layer)))
    }

    pub(super) fn read_text_style(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut style = TextStyle {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        style.vertical = s.object.read_bit()?;
        style.is_shape_file = s.object.read_bit()?;
        style.height = s.object.read_bit_double()?;
        style.width_factor = s.object.read_bit_double()?;
        style.oblique_angle = s.object.read_bit_double()?;
        style.generation_flags = s.object.read_byte()?;
        style.last_height = s.object.read_bit_double()?;
        style.font_file = s.object.read_variable_text()?;
        style.bigfont_file = s.object.read_variable_text()?;

        style.record.xref = s.object_ref()?;

        Ok((header, ObjectVariant::TextStyle(style)))
    }

    pub(super) fn read_ltype(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut ltype = LineType {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        ltype.description = s.object.read_variable_text()?;
        ltype.pattern_length = s.object.read_bit_double()?;
        ltype.alignment = s.object.read_byte()?;

        let dash_count = s.object.read_byte()? as usize;
        ltype.dashes.reserve(dash_count);
        for _ in 0..dash_count {
            let dash = LineTypeDash {
                length: s.object.read_bit_double()?,
                shape_code: s.object.read_bit_short()?,
                x_offset: s.object.read_raw_double()?,
                y_offset: s.object.read_raw_double()?,
                scale: s.object.read_bit_double()?,
                rotation: s.object.read_bit_double()?,
                flags: s.object.read_bit_short()?,
                ..Default::default()
            };
            ltype.dashes.push(dash);
        }

        // R2004+ appends a text area for text-in-linetype segments.
        if self.version.r2004_plus() {
            for dash in ltype.dashes.iter_mut() {
                dash.text = s.object.read_variable_text()?;
            }
        }

        ltype.record.xref = s.object_ref()?;
        for dash in ltype.dashes.iter_mut() {
            dash.style = s.object_ref()?;
        }

        Ok((header, ObjectVariant::LineType(ltype)))
    }

    pub(super) fn read_view(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut view = View {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        view.height = s.object.read_bit_double()?;
        view.width = s.object.read_bit_double()?;
        view.center = s.object.read_2_raw_double()?;
        view.target = s.object.read_3_bit_double()?;
        view.direction = s.object.read_3_bit_double()?;
        view.twist_angle = s.object.read_bit_double()?;
        view.lens_length = s.object.read_bit_double()?;
        view.front_clip = s.object.read_bit_double()?;
        view.back_clip = s.object.read_bit_double()?;
        view.ucs_follow = s.object.read_bit()?;
        view.front_clip_on = s.object.read_bit()?;
        view.back_clip_on = s.object.read_bit()?;

        if self.version.r2000_plus() {
            view.render_mode = s.object.read_byte()?;
            view.has_ucs = s.object.read_bit()?;
            view.ucs_origin = s.object.read_3_bit_double()?;
            view.ucs_x_axis = s.object.read_3_bit_double()?;
            view.ucs_y_axis = s.object.read_3_bit_double()?;
            view.ucs_elevation = s.object.read_bit_double()?;
            view.ucs_ortho_type = s.object.read_bit_short()?;
        }

        view.record.xref = s.object_ref()?;

        if self.version.r2000_plus() && view.has_ucs {
            view.base_ucs = s.object_ref()?;
            view.named_ucs = s.object_ref()?;
        }

        Ok((header, ObjectVariant::View(view)))
    }

    pub(super) fn read_ucs(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut ucs = Ucs {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        ucs.origin = s.object.read_3_bit_double()?;
        ucs.x_axis = s.object.read_3_bit_double()?;
        ucs.y_axis = s.object.read_3_bit_double()?;

        if self.version.r2000_plus() {
            ucs.elevation = s.object.read_bit_double()?;
            ucs.ortho_type = s.object.read_bit_short()?;
        }

        ucs.record.xref = s.object_ref()?;

        if self.version.r2000_plus() {
            ucs.base_ucs = s.object_ref()?;
            ucs.named_ucs = s.object_ref()?;
        }

        Ok((header, ObjectVariant::Ucs(ucs)))
    }

    pub(super) fn read_vport(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut vport = VPort {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        vport.view_height = s.object.read_bit_double()?;
        vport.aspect_ratio = s.object.read_bit_double()?;
        vport.view_center = s.object.read_2_raw_double()?;
        vport.view_target = s.object.read_3_bit_double()?;
        vport.view_direction = s.object.read_3_bit_double()?;
        vport.twist_angle = s.object.read_bit_double()?;
        vport.lens_length = s.object.read_bit_double()?;
        vport.front_clip = s.object.read_bit_double()?;
        vport.back_clip = s.object.read_bit_double()?;
        vport.view_mode = s.object.read_bit_long()?;
        vport.render_mode = s.object.read_byte()?;

        if self.version.r2000_plus() {
            let _default_lighting = s.object.read_bit()?;
            let _lighting_type = s.object.read_byte()?;
            let _brightness = s.object.read_bit_double()?;
            let _contrast = s.object.read_bit_double()?;
            let _ambient_color = s.object.read_raw_long()?;
        }

        vport.lower_left = s.object.read_2_raw_double()?;
        vport.upper_right = s.object.read_2_raw_double()?;
        vport.ucs_follow = s.object.read_bit()?;
        vport.circle_sides = s.object.read_bit_short()?;
        vport.snap_on = s.object.read_bit()?;
        vport.snap_isometric = s.object.read_bit()?;
        vport.snap_isopair = s.object.read_bit_short()?;
        vport.snap_rotation = s.object.read_bit_double()?;
        vport.snap_base = s.object.read_2_raw_double()?;
        vport.snap_spacing = s.object.read_2_raw_double()?;
        vport.grid_on = s.object.read_bit()?;
        vport.grid_spacing = s.object.read_2_raw_double()?;

        if self.version.r2000_plus() {
            vport.ucs_per_viewport = s.object.read_bit()?;
            vport.ucs_origin = s.object.read_3_bit_double()?;
            vport.ucs_x_axis = s.object.read_3_bit_double()?;
            vport.ucs_y_axis = s.object.read_3_bit_double()?;
            vport.ucs_elevation = s.object.read_bit_double()?;
            vport.ucs_ortho_type = s.object.read_bit_short()?;
        }

        vport.record.xref = s.object_ref()?;

        if self.version.r2000_plus() {
            vport.named_ucs = s.object_ref()?;
            vport.base_ucs = s.object_ref()?;
        }

        Ok((header, ObjectVariant::VPort(vport)))
    }

    pub(super) fn read_appid(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut appid = AppId {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        appid.unknown = s.object.read_byte()?;
        appid.record.xref = s.object_ref()?;

        Ok((header, ObjectVariant::AppId(appid)))
    }

    pub(super) fn read_dimstyle(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut dim = DimStyle {
            record: self.read_record_common(s, &header)?,
            ..Default::default()
        };

        if self.version.r13_14_only() {
            dim.generate_tolerances = s.object.read_bit()?;
            dim.generate_limits = s.object.read_bit()?;
            dim.text_inside_horizontal = s.object.read_bit()?;
            dim.text_outside_horizontal = s.object.read_bit()?;
            dim.suppress_ext1 = s.object.read_bit()?;
            dim.suppress_ext2 = s.object.read_bit()?;
            dim.alternate_units = s.object.read_bit()?;
            dim.force_line_inside = s.object.read_bit()?;
            dim.separate_arrows = s.object.read_bit()?;
            dim.text_inside_extensions = s.object.read_bit()?;
            dim.suppress_outside_extensions = s.object.read_bit()?;
            dim.alternate_decimals = s.object.read_byte()? as i16;
            dim.zero_suppression = s.object.read_byte()? as i16;
            dim.suppress_line1 = s.object.read_bit()?;
            dim.suppress_line2 = s.object.read_bit()?;
            dim.tolerance_justification = s.object.read_byte()? as i16;
            dim.justification = s.object.read_byte()? as i16;
            dim.fit = s.object.read_byte()? as i16;
            dim.user_positioned_text = s.object.read_bit()?;
            dim.tolerance_zero_suppression = s.object.read_byte()? as i16;
            dim.alternate_zero_suppression = s.object.read_byte()? as i16;
            dim.alternate_tolerance_zero_suppression = s.object.read_byte()? as i16;
            dim.text_above = s.object.read_byte()? as i16;
            dim.linear_unit_format = s.object.read_bit_short()?;
            dim.angular_unit_format = s.object.read_bit_short()?;
            dim.decimals = s.object.read_bit_short()?;
            dim.tolerance_decimals = s.object.read_bit_short()?;
            dim.alternate_unit_format = s.object.read_bit_short()?;
            dim.alternate_tolerance_decimals = s.object.read_bit_short()?;
            dim.scale = s.object.read_bit_double()?;
            dim.arrow_size = s.object.read_bit_double()?;
            dim.extension_offset = s.object.read_bit_double()?;
            dim.line_increment = s.object.read_bit_double()?;
            dim.extension_extend = s.object.read_bit_double()?;
            dim.rounding = s.object.read_bit_double()?;
            dim.line_extend = s.object.read_bit_double()?;
            dim.tolerance_plus = s.object.read_bit_double()?;
            dim.tolerance_minus = s.object.read_bit_double()?;
            dim.text_height = s.object.read_bit_double()?;
            dim.center_mark_size = s.object.read_bit_double()?;
            dim.tick_size = s.object.read_bit_double()?;
            dim.alternate_factor = s.object.read_bit_double()?;
            dim.linear_factor = s.object.read_bit_double()?;
            dim.text_vertical_position = s.object.read_bit_double()?;
            dim.tolerance_factor = s.object.read_bit_double()?;
            dim.text_gap = s.object.read_bit_double()?;
            dim.post = s.object.read_variable_text()?;
            dim.apost = s.object.read_variable_text()?;
            // Arrow blocks are stored by name here; the handles replace
            // them from R2000 on.
            let _blk_name = s.object.read_variable_text()?;
            let _blk1_name = s.object.read_variable_text()?;
            let _blk2_name = s.object.read_variable_text()?;
            dim.line_color = Color::from_index(s.object.read_bit_short()?);
            dim.extension_color = Color::from_index(s.object.read_bit_short()?);
            dim.text_color = Color::from_index(s.object.read_bit_short()?);
        } else {
            dim.post = s.object.read_variable_text()?;
            dim.apost = s.object.read_variable_text()?;
            dim.scale = s.object.read_bit_double()?;
            dim.arrow_size = s.object.read_bit_double()?;
            dim.extension_offset = s.object.read_bit_double()?;
            dim.line_increment = s.object.read_bit_double()?;
            dim.extension_extend = s.object.read_bit_double()?;
            dim.rounding = s.object.read_bit_double()?;
            dim.line_extend = s.object.read_bit_double()?;
            dim.tolerance_plus = s.object.read_bit_double()?;
            dim.tolerance_minus = s.object.read_bit_double()?;
            dim.generate_tolerances = s.object.read_bit()?;
            dim.generate_limits = s.object.read_bit()?;
            dim.text_inside_horizontal = s.object.read_bit()?;
            dim.text_outside_horizontal = s.object.read_bit()?;
            dim.suppress_ext1 = s.object.read_bit()?;
            dim.suppress_ext2 = s.object.read_bit()?;
            dim.text_above = s.object.read_bit_short()?;
            dim.zero_suppression = s.object.read_bit_short()?;
            dim.angular_zero_suppression = s.object.read_bit_short()?;
            dim.text_height = s.object.read_bit_double()?;
            dim.center_mark_size = s.object.read_bit_double()?;
            dim.tick_size = s.object.read_bit_double()?;
            dim.alternate_factor = s.object.read_bit_double()?;
            dim.linear_factor = s.object.read_bit_double()?;
            dim.text_vertical_position = s.object.read_bit_double()?;
            dim.tolerance_factor = s.object.read_bit_double()?;
            dim.text_gap = s.object.read_bit_double()?;
            dim.alternate_rounding = s.object.read_bit_double()?;
            dim.alternate_units = s.object.read_bit()?;
            dim.alternate_decimals = s.object.read_bit_short()?;
            dim.force_line_inside = s.object.read_bit()?;
            dim.separate_arrows = s.object.read_bit()?;
            dim.text_inside_extensions = s.object.read_bit()?;
            dim.suppress_outside_extensions = s.object.read_bit()?;
            dim.line_color = s.object.read_cm_color()?;
            dim.extension_color = s.object.read_cm_color()?;
            dim.text_color = s.object.read_cm_color()?;
            dim.angular_decimals = s.object.read_bit_short()?;
            dim.decimals = s.object.read_bit_short()?;
            dim.tolerance_decimals = s.object.read_bit_short()?;
            dim.alternate_unit_format = s.object.read_bit_short()?;
            dim.alternate_tolerance_decimals = s.object.read_bit_short()?;
            dim.angular_unit_format = s.object.read_bit_short()?;
            dim.arrow_text_fit = s.object.read_bit_short()?;
            let _legacy_unit = s.object.read_bit_short()?;
            dim.linear_unit_format = s.object.read_bit_short()?;
            dim.decimal_separator = s.object.read_bit_short()?;
            dim.text_movement = s.object.read_bit_short()?;
            dim.justification = s.object.read_bit_short()?;
            dim.suppress_line1 = s.object.read_bit()?;
            dim.suppress_line2 = s.object.read_bit()?;
            dim.tolerance_justification = s.object.read_bit_short()?;
            dim.tolerance_zero_suppression = s.object.read_bit_short()?;
            dim.alternate_zero_suppression = s.object.read_bit_short()?;
            dim.alternate_tolerance_zero_suppression = s.object.read_bit_short()?;
            dim.user_positioned_text = s.object.read_bit()?;
            dim.fit = s.object.read_bit_short()?;
            let _scale_repeat = s.object.read_bit_double()?;
            dim.sub_unit_factor = s.object.read_bit_double()?;
            dim.sub_unit_suffix_code = s.object.read_bit_short()?;
        }

        dim.record.xref = s.object_ref()?;
        dim.text_style = s.object_ref()?;

        if self.version.r2000_plus() {
            dim.leader_arrow = s.object_ref()?;
            dim.arrow_block = s.object_ref()?;
            dim.arrow_block1 = s.object_ref()?;
            dim.arrow_block2 = s.object_ref()?;
        }

        Ok((header, ObjectVariant::DimStyle(dim)))
    }

    pub(super) fn read_vp_entity_header(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut vp = VpEntityHeader {
            record: TableRecordCommon {
                control: header.owner,
                ..Default::default()
            },
            ..Default::default()
        };

        vp.record.xref_dependent = self.read_xref_dependant_bit(s)?;
        vp.flag = s.object.read_bit()?;

        vp.record.xref = s.object_ref()?;
        if !self.version.r2004_plus() {
            vp.viewport_entity = s.object_ref()?;
        }

        Ok((header, ObjectVariant::VpEntityHeader(vp)))
    }
}
