//! Body readers for the non-graphical objects: dictionaries, groups,
//! multiline styles, xrecords and layouts.

use crate::document::{ObjectHeader, ObjectVariant};
use crate::error::Result;
use crate::objects::{
    Dictionary, Group, Layout, MLineStyle, MLineStyleElement, XRecord, XRecordValue,
};

use super::object_decoder::{ObjectDecoder, StreamSet};

/// Value shape of a DXF group code, for the xrecord data area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupCodeType {
    String,
    Point3D,
    Double,
    Int16,
    Int32,
    Int64,
    Handle,
    Bool,
    Chunk,
    Unknown,
}

fn group_code_type(code: i16) -> GroupCodeType {
    match code {
        0..=9 => GroupCodeType::String,
        10..=39 => GroupCodeType::Point3D,
        40..=59 => GroupCodeType::Double,
        60..=79 => GroupCodeType::Int16,
        90..=99 => GroupCodeType::Int32,
        100..=102 => GroupCodeType::String,
        105 => GroupCodeType::Handle,
        110..=149 => GroupCodeType::Double,
        160..=169 => GroupCodeType::Int64,
        170..=179 => GroupCodeType::Int16,
        210..=239 => GroupCodeType::Double,
        270..=289 => GroupCodeType::Int16,
        290..=299 => GroupCodeType::Bool,
        300..=309 => GroupCodeType::String,
        310..=319 => GroupCodeType::Chunk,
        320..=369 => GroupCodeType::Handle,
        370..=389 => GroupCodeType::Int16,
        390..=399 => GroupCodeType::Handle,
        400..=409 => GroupCodeType::Int16,
        410..=419 => GroupCodeType::String,
        420..=429 => GroupCodeType::Int32,
        430..=439 => GroupCodeType::String,
        440..=459 => GroupCodeType::Int32,
        460..=469 => GroupCodeType::Double,
        470..=479 => GroupCodeType::String,
        480..=481 => GroupCodeType::Handle,
        999 => GroupCodeType::String,
        1000..=1009 => GroupCodeType::String,
        1010..=1059 => GroupCodeType::Double,
        1060..=1070 => GroupCodeType::Int16,
        1071 => GroupCodeType::Int32,
        _ => GroupCodeType::Unknown,
    }
}

impl ObjectDecoder<'_> {
    pub(super) fn read_dictionary(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut dict = Dictionary::default();

        let entry_count = s.object.read_bit_long()?.max(0) as usize;

        if self.version.r13_14_only() {
            let _unknown = s.object.read_byte()?;
        } else {
            dict.duplicate_cloning = s.object.read_bit_short()?;
            dict.hard_owner = s.object.read_byte()? != 0;
        }

        dict.entries.reserve(entry_count);
        for _ in 0..entry_count {
            let name = s.object.read_variable_text()?;
            let handle = s.handle_ref()?;
            // Null slots appear in purged dictionaries; skip them.
            if handle != 0 && !name.is_empty() {
                dict.entries
                    .push((name, crate::document::ObjectRef::from_handle(handle)));
            }
        }

        Ok((header, ObjectVariant::Dictionary(dict)))
    }

    pub(super) fn read_group(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut group = Group {
            description: s.object.read_variable_text()?,
            unnamed: s.object.read_bit_short()? != 0,
            selectable: s.object.read_bit_short()? != 0,
            members: Vec::new(),
        };

        let member_count = s.object.read_bit_long()?.max(0) as usize;
        group.members.reserve(member_count);
        for _ in 0..member_count {
            let member = s.object_ref()?;
            group.members.push(member);
        }

        Ok((header, ObjectVariant::Group(group)))
    }

    pub(super) fn read_mline_style(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut style = MLineStyle {
            name: s.object.read_variable_text()?,
            description: s.object.read_variable_text()?,
            flags: s.object.read_bit_short()?,
            fill_color: s.object.read_cm_color()?,
            start_angle: s.object.read_bit_double()?,
            end_angle: s.object.read_bit_double()?,
            elements: Vec::new(),
        };

        let element_count = s.object.read_byte()? as usize;
        style.elements.reserve(element_count);
        for _ in 0..element_count {
            style.elements.push(MLineStyleElement {
                offset: s.object.read_bit_double()?,
                color: s.object.read_cm_color()?,
                linetype_index: s.object.read_bit_short()?,
            });
        }

        Ok((header, ObjectVariant::MLineStyle(style)))
    }

    pub(super) fn read_xrecord(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut xrecord = XRecord::default();

        // BL: byte length of the data area.
        let data_bytes = s.object.read_bit_long()?.max(0) as i64;
        let end_pos = s.object.position_in_bits() + data_bytes * 8;

        while s.object.position_in_bits() < end_pos {
            let code = s.object.read_raw_short()?;
            let value = match group_code_type(code) {
                GroupCodeType::String => XRecordValue::String(self.read_xrecord_string(s)?),
                GroupCodeType::Point3D => XRecordValue::Point([
                    s.object.read_bit_double()?,
                    s.object.read_bit_double()?,
                    s.object.read_bit_double()?,
                ]),
                GroupCodeType::Double => XRecordValue::Double(s.object.read_bit_double()?),
                GroupCodeType::Int16 => XRecordValue::Short(s.object.read_bit_short()?),
                GroupCodeType::Int32 => XRecordValue::Long(s.object.read_bit_long()?),
                GroupCodeType::Int64 => XRecordValue::LongLong(s.object.read_bit_long_long()?),
                GroupCodeType::Handle => XRecordValue::Handle(s.object.read_handle(0)?),
                GroupCodeType::Bool => XRecordValue::Bool(s.object.read_bit()?),
                GroupCodeType::Chunk => {
                    let len = s.object.read_byte()? as usize;
                    XRecordValue::Binary(s.object.read_bytes(len)?)
                }
                GroupCodeType::Unknown => break,
            };
            xrecord.values.push((code, value));
        }

        if self.version.r2000_plus() {
            xrecord.duplicate_cloning = s.object.read_bit_short()?;
        }

        Ok((header, ObjectVariant::XRecord(xrecord)))
    }

    /// Xrecord strings carry their own length and codepage instead of the
    /// TV layout.
    fn read_xrecord_string(&mut self, s: &mut StreamSet) -> Result<String> {
        let len = s.object.read_raw_short()?.max(0) as usize;
        let _code_page = s.object.read_byte()?;
        let bytes = s.object.read_bytes(len)?;
        let (text, _, _) = self.encoding.decode(&bytes);
        Ok(text.into_owned())
    }

    pub(super) fn read_layout(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        let mut layout = Layout::default();

        self.read_plot_settings(s, &mut layout)?;

        layout.name = s.object.read_variable_text()?;
        layout.tab_order = s.object.read_bit_long()?;
        layout.flags = s.object.read_bit_short()?;
        layout.ucs_origin = s.object.read_3_bit_double()?;
        layout.limits_min = s.object.read_2_raw_double()?;
        layout.limits_max = s.object.read_2_raw_double()?;
        layout.insertion_base = s.object.read_3_bit_double()?;
        layout.ucs_x_axis = s.object.read_3_bit_double()?;
        layout.ucs_y_axis = s.object.read_3_bit_double()?;
        layout.elevation = s.object.read_bit_double()?;
        layout.ucs_ortho_type = s.object.read_bit_short()?;
        layout.extents_min = s.object.read_3_bit_double()?;
        layout.extents_max = s.object.read_3_bit_double()?;

        let viewport_count = if self.version.r2004_plus() {
            s.object.read_bit_long()?.max(0) as usize
        } else {
            0
        };

        layout.paper_space_block = s.object_ref()?;
        layout.active_viewport = s.object_ref()?;
        layout.base_ucs = s.object_ref()?;
        layout.named_ucs = s.object_ref()?;

        if self.version.r2004_plus() {
            layout.viewports.reserve(viewport_count);
            for _ in 0..viewport_count {
                let viewport = s.object_ref()?;
                layout.viewports.push(viewport);
            }
        }

        Ok((header, ObjectVariant::Layout(layout)))
    }

    /// The plot settings block embedded at the start of a layout.
    fn read_plot_settings(&mut self, s: &mut StreamSet, layout: &mut Layout) -> Result<()> {
        layout.page_name = s.object.read_variable_text()?;
        layout.printer_name = s.object.read_variable_text()?;
        layout.plot_flags = s.object.read_bit_short()?;
        layout.left_margin = s.object.read_bit_double()?;
        layout.bottom_margin = s.object.read_bit_double()?;
        layout.right_margin = s.object.read_bit_double()?;
        layout.top_margin = s.object.read_bit_double()?;
        layout.paper_width = s.object.read_bit_double()?;
        layout.paper_height = s.object.read_bit_double()?;
        layout.paper_size = s.object.read_variable_text()?;
        layout.plot_origin.x = s.object.read_bit_double()?;
        layout.plot_origin.y = s.object.read_bit_double()?;
        layout.paper_units = s.object.read_bit_short()?;
        layout.plot_rotation = s.object.read_bit_short()?;
        layout.plot_type = s.object.read_bit_short()?;
        layout.window_min.x = s.object.read_bit_double()?;
        layout.window_min.y = s.object.read_bit_double()?;
        layout.window_max.x = s.object.read_bit_double()?;
        layout.window_max.y = s.object.read_bit_double()?;

        // Replaced by a handle from R2004 on.
        if !self.version.r2004_plus() {
            let _plot_view_name = s.object.read_variable_text()?;
        }

        layout.numerator = s.object.read_bit_double()?;
        layout.denominator = s.object.read_bit_double()?;
        layout.current_style_sheet = s.object.read_variable_text()?;
        layout.standard_scale_type = s.object.read_bit_short()?;
        layout.standard_scale_factor = s.object.read_bit_double()?;
        layout.paper_image_origin.x = s.object.read_bit_double()?;
        layout.paper_image_origin.y = s.object.read_bit_double()?;

        if self.version.r2004_plus() {
            let _shade_mode = s.object.read_bit_short()?;
            let _shade_resolution = s.object.read_bit_short()?;
            let _shade_dpi = s.object.read_bit_short()?;
            let _plot_view = s.handle_ref()?;
        }

        Ok(())
    }
}
