//! Per-object decoding: stream setup, type dispatch and the common data
//! blocks shared by all stored objects.
//!
//! Each object map entry points at an MS-prefixed record in the file
//! buffer. The object body is a bit stream; handle references of pre-2007
//! files live in a trailing run whose start is given by the stored
//! bit size, so every object is decoded through a [`StreamSet`] pairing
//! an object reader with a handles reader over the same bytes.

use std::collections::HashMap;

use encoding_rs::Encoding;

use crate::bit::BitReader;
use crate::decoder::constants::MAX_REACTOR_COUNT;
use crate::decoder::object_type::ObjectType;
use crate::document::{
    DwgClass, DwgObject, EedGroup, EedValue, ObjectHeader, ObjectRef, ObjectVariant,
};
use crate::entities::{EntityCommon, UnknownEntity};
use crate::error::{DecodeError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::objects::UnknownObject;
use crate::types::{FileVersion, Handle};

/// The stored bytes of the record at `offset`, MS size excluded.
///
/// Used to keep a raw copy of records whose body could not be decoded.
/// Returns an empty slice when the size prefix itself is unreadable.
pub(super) fn record_bytes(data: &[u8], version: FileVersion, offset: usize) -> &[u8] {
    let mut reader = BitReader::at(data, version, offset);
    let size = match reader.read_modular_short() {
        Ok(s) if s > 0 => s as usize,
        _ => return &[],
    };
    let start = reader.position();
    let end = (start + size).min(data.len());
    if start >= end {
        &[]
    } else {
        &data[start..end]
    }
}

/// The sub-readers for a single object.
pub(crate) struct StreamSet<'a> {
    /// Main bit stream, positioned after the type code.
    pub object: BitReader<'a>,
    /// Handle run reader, positioned by the stored bit size.
    pub handles: BitReader<'a>,
    /// Handle of the object being read, the referrer for relative handle
    /// codes.
    pub current_handle: u64,
}

impl StreamSet<'_> {
    /// Read the next handle from the handle run, resolved against the
    /// current object.
    pub fn handle_ref(&mut self) -> Result<u64> {
        self.handles.read_handle(self.current_handle)
    }

    /// Read a handle as an [`ObjectRef`].
    pub fn object_ref(&mut self) -> Result<ObjectRef> {
        Ok(ObjectRef::from_handle(self.handle_ref()?))
    }
}

/// Decodes individual objects out of the file buffer.
pub(crate) struct ObjectDecoder<'a> {
    pub(crate) data: &'a [u8],
    pub(crate) version: FileVersion,
    pub(crate) encoding: &'static Encoding,
    pub(crate) class_map: HashMap<i16, DwgClass>,
    pub(crate) notifications: NotificationCollection,

    /// Bit position of the current object's data, right after the MS size.
    pub(crate) object_initial_pos: i64,
    /// Stored byte size of the current object.
    pub(crate) object_size: u32,
}

impl<'a> ObjectDecoder<'a> {
    pub fn new(
        data: &'a [u8],
        version: FileVersion,
        encoding: &'static Encoding,
        classes: &[DwgClass],
    ) -> Self {
        let class_map = classes
            .iter()
            .map(|c| (c.class_number, c.clone()))
            .collect();
        Self {
            data,
            version,
            encoding,
            class_map,
            notifications: NotificationCollection::new(),
            object_initial_pos: 0,
            object_size: 0,
        }
    }

    /// Decode the object stored at the absolute file `offset`.
    ///
    /// `handle` is the object map key; it is checked against the handle the
    /// object itself declares.
    pub fn decode_at(&mut self, handle: u64, offset: usize) -> Result<DwgObject> {
        let mut reader = BitReader::at(self.data, self.version, offset);
        reader.set_encoding(self.encoding);

        // MS: object size in bytes, excluding the trailing CRC.
        let size = reader.read_modular_short()?;
        if size <= 0 {
            return Err(DecodeError::Structural(format!(
                "object {handle:#x} has invalid stored size {size}"
            )));
        }
        self.object_size = size as u32;
        self.object_initial_pos = reader.position_in_bits();

        let mut handles = BitReader::new(self.data, self.version);
        handles.set_encoding(self.encoding);
        let mut streams = StreamSet {
            object: reader,
            handles,
            current_handle: 0,
        };

        let type_code = streams.object.read_object_type()?;
        let (mut header, variant) = self.read_typed_body(type_code, &mut streams)?;

        header.byte_size = self.object_size;
        header.type_code = type_code;

        if header.handle.value() != handle {
            self.notifications.notify(
                NotificationType::Warning,
                format!(
                    "object at map handle {handle:#x} declares handle {:#x}",
                    header.handle
                ),
            );
            header.handle = Handle::new(handle);
        }

        Ok(DwgObject { header, variant })
    }

    fn read_typed_body(
        &mut self,
        type_code: i16,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        use ObjectType::*;

        match ObjectType::from_raw(type_code) {
            Text => self.read_text(s),
            Attrib => self.read_attribute(s),
            Attdef => self.read_attribute_definition(s),
            Block => self.read_block(s),
            Endblk => self.read_end_block(s),
            Seqend => self.read_seqend(s),
            Insert => self.read_insert(s, false),
            Minsert => self.read_insert(s, true),
            Vertex2D => self.read_vertex_2d(s),
            Vertex3D | VertexMesh | VertexPface => self.read_vertex_3d(s),
            VertexPfaceFace => self.read_pface_face(s),
            Polyline2D => self.read_polyline_2d(s),
            Polyline3D => self.read_polyline_3d(s),
            PolylinePface => self.read_polyface_mesh(s),
            PolylineMesh => self.read_polygon_mesh(s),
            Arc => self.read_arc(s),
            Circle => self.read_circle(s),
            Line => self.read_line(s),
            DimensionOrdinate => self.read_dim_ordinate(s),
            DimensionLinear => self.read_dim_linear(s),
            DimensionAligned => self.read_dim_aligned(s),
            DimensionAng3Pt => self.read_dim_angular_3pt(s),
            DimensionAng2Ln => self.read_dim_angular_2ln(s),
            DimensionRadius => self.read_dim_radius(s),
            DimensionDiameter => self.read_dim_diameter(s),
            Point => self.read_point(s),
            Face3D => self.read_3d_face(s),
            Solid => self.read_solid(s, false),
            Trace => self.read_solid(s, true),
            Shape => self.read_shape(s),
            Viewport => self.read_viewport(s),
            Ellipse => self.read_ellipse(s),
            Spline => self.read_spline(s),
            Region => self.read_modeler_geometry(s, ModelerKind::Region),
            Solid3D => self.read_modeler_geometry(s, ModelerKind::Solid3D),
            Body => self.read_modeler_geometry(s, ModelerKind::Body),
            Ray => self.read_ray(s),
            Xline => self.read_xline(s),
            Mtext => self.read_mtext(s),
            Leader => self.read_leader(s),
            Tolerance => self.read_tolerance(s),
            Mline => self.read_mline(s),
            LwPolyline => self.read_lwpolyline(s),
            Hatch => self.read_hatch(s),
            Ole2Frame => self.read_ole2frame(s),

            BlockControl => self.read_block_control(s),
            LayerControl => self.read_table_control(s, ControlKind::Layer),
            StyleControl => self.read_table_control(s, ControlKind::TextStyle),
            LtypeControl => self.read_ltype_control(s),
            ViewControl => self.read_table_control(s, ControlKind::View),
            UcsControl => self.read_table_control(s, ControlKind::Ucs),
            VportControl => self.read_table_control(s, ControlKind::VPort),
            AppidControl => self.read_table_control(s, ControlKind::AppId),
            DimstyleControl => self.read_table_control(s, ControlKind::DimStyle),
            VpEntHdrControl => self.read_table_control(s, ControlKind::VpEntityHeader),

            BlockHeader => self.read_block_header(s),
            Layer => self.read_layer(s),
            Style => self.read_text_style(s),
            Ltype => self.read_ltype(s),
            View => self.read_view(s),
            Ucs => self.read_ucs(s),
            Vport => self.read_vport(s),
            Appid => self.read_appid(s),
            Dimstyle => self.read_dimstyle(s),
            VpEntHdr => self.read_vp_entity_header(s),

            Dictionary => self.read_dictionary(s),
            Group => self.read_group(s),
            MlineStyle => self.read_mline_style(s),
            XRecord => self.read_xrecord(s),
            Placeholder => {
                let header = self.read_common_non_entity_data(s)?;
                Ok((header, ObjectVariant::Placeholder))
            }
            Layout => self.read_layout(s),

            ProxyEntity | OleFrame | Dummy => self.read_unknown_entity(s, "AcDbProxyEntity"),
            ProxyObject | VbaProject | LongTransaction => self.read_unknown_object(s, ""),

            Invalid | Undefined => Err(DecodeError::Structural(format!(
                "object has unusable type code {type_code}"
            ))),

            Unlisted => self.read_unlisted(type_code, s),
        }
    }

    /// Dispatch a class-coded object by its class table entry.
    fn read_unlisted(
        &mut self,
        type_code: i16,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let class = match self.class_map.get(&type_code) {
            Some(c) => c.clone(),
            None => {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!("no class definition for type code {type_code}"),
                );
                return self.read_unknown_object(s, "");
            }
        };

        let dxf_name = class.dxf_name.to_uppercase();
        match dxf_name.as_str() {
            // Class-coded xrecords and placeholders reuse the fixed readers.
            "XRECORD" => self.read_xrecord(s),
            "ACDBPLACEHOLDER" | "PLACEHOLDER" => {
                let header = self.read_common_non_entity_data(s)?;
                Ok((header, ObjectVariant::Placeholder))
            }
            "LWPOLYLINE" => self.read_lwpolyline(s),
            "HATCH" => self.read_hatch(s),
            _ => {
                self.notifications.notify(
                    NotificationType::NotImplemented,
                    format!("class {dxf_name} decoded as unknown"),
                );
                if class.is_entity() {
                    self.read_unknown_entity(s, &class.dxf_name)
                } else {
                    self.read_unknown_object(s, &class.dxf_name)
                }
            }
        }
    }

    pub(crate) fn read_unknown_entity(
        &mut self,
        s: &mut StreamSet,
        dxf_name: &str,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        Ok((
            header,
            ObjectVariant::UnknownEntity(UnknownEntity {
                common,
                dxf_name: dxf_name.to_string(),
                raw: self.raw_record(),
            }),
        ))
    }

    pub(crate) fn read_unknown_object(
        &mut self,
        s: &mut StreamSet,
        dxf_name: &str,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let header = self.read_common_non_entity_data(s)?;
        Ok((
            header,
            ObjectVariant::UnknownObject(UnknownObject {
                dxf_name: dxf_name.to_string(),
                raw: self.raw_record(),
            }),
        ))
    }

    /// The stored bytes of the current record, MS size excluded.
    fn raw_record(&self) -> Vec<u8> {
        let start = (self.object_initial_pos / 8) as usize;
        let end = (start + self.object_size as usize).min(self.data.len());
        if start >= end {
            Vec::new()
        } else {
            self.data[start..end].to_vec()
        }
    }

    // -------------------------------------------------------------------
    // Common data blocks
    // -------------------------------------------------------------------

    /// Position the handle run reader using the RL bit size stored in the
    /// object stream.
    fn update_handle_reader(&self, s: &mut StreamSet, header: &mut ObjectHeader) -> Result<()> {
        let size = s.object.read_raw_long()? as i64;
        header.bit_size = Some(size as u64);
        s.handles.set_position_in_bits(self.object_initial_pos + size)?;
        Ok(())
    }

    /// The data block every entity starts with.
    pub(crate) fn read_common_entity_data(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, EntityCommon)> {
        let mut header = ObjectHeader::default();
        let mut common = EntityCommon::default();
        let r13_14 = self.version.r13_14_only();

        // R2000: the bit size leads the object data.
        if self.version.r2000_plus() {
            self.update_handle_reader(s, &mut header)?;
        }

        header.handle = Handle::new(s.object.read_handle(0)?);
        s.current_handle = header.handle.value();

        header.eed = self.read_extended_data(s)?;

        // B: proxy graphics present; the image is skipped.
        if s.object.read_bit()? {
            let graphic_size = s.object.read_raw_long()? as usize;
            s.object.read_bytes(graphic_size)?;
        }

        // R13-R14: the bit size follows the graphic block.
        if r13_14 {
            self.update_handle_reader(s, &mut header)?;
        }

        common.entity_mode = s.object.read_2_bits()?;
        if common.entity_mode == 0 {
            header.owner = s.object_ref()?;
        }

        let num_reactors = s.object.read_bit_long()?;
        if num_reactors < 0 || num_reactors as usize > MAX_REACTOR_COUNT {
            return Err(DecodeError::Structural(format!(
                "implausible reactor count {num_reactors}, stream misaligned"
            )));
        }
        for _ in 0..num_reactors {
            let r = s.object_ref()?;
            header.reactors.push(r);
        }
        header.xdictionary = s.object_ref()?;

        if r13_14 {
            common.layer = s.object_ref()?;
            let is_bylayer_linetype = s.object.read_bit()?;
            if !is_bylayer_linetype {
                common.linetype_flags = 3;
                common.linetype = s.object_ref()?;
            }
        }

        // Pre-2004 linked list of sibling entities.
        let no_links = s.object.read_bit()?;
        if !no_links {
            common.prev_entity = s.object_ref()?;
            common.next_entity = s.object_ref()?;
        }

        let (color, transparency, _book_color) = s.object.read_en_color()?;
        common.color = color;
        common.transparency = transparency;

        common.linetype_scale = s.object.read_bit_double()?;

        if self.version.r2000_plus() {
            common.layer = s.object_ref()?;
            common.linetype_flags = s.object.read_2_bits()?;
            if common.linetype_flags == 3 {
                common.linetype = s.object_ref()?;
            }
            common.plotstyle_flags = s.object.read_2_bits()?;
            if common.plotstyle_flags == 3 {
                common.plotstyle = s.object_ref()?;
            }
        }

        common.invisibility = s.object.read_bit_short()?;
        if self.version.r2000_plus() {
            common.lineweight = s.object.read_byte()?;
        }

        Ok((header, common))
    }

    /// The data block every non-entity starts with.
    pub(crate) fn read_common_non_entity_data(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<ObjectHeader> {
        let mut header = ObjectHeader::default();

        if self.version.r2000_plus() {
            self.update_handle_reader(s, &mut header)?;
        }

        header.handle = Handle::new(s.object.read_handle(0)?);
        s.current_handle = header.handle.value();

        header.eed = self.read_extended_data(s)?;

        if self.version.r13_14_only() {
            self.update_handle_reader(s, &mut header)?;
        }

        let num_reactors = s.object.read_bit_long()?;
        if num_reactors < 0 || num_reactors as usize > MAX_REACTOR_COUNT {
            return Err(DecodeError::Structural(format!(
                "implausible reactor count {num_reactors}, stream misaligned"
            )));
        }

        header.owner = s.object_ref()?;
        for _ in 0..num_reactors {
            let r = s.object_ref()?;
            header.reactors.push(r);
        }
        header.xdictionary = s.object_ref()?;

        Ok(header)
    }

    /// Extended object data: application groups that precede the body.
    fn read_extended_data(&mut self, s: &mut StreamSet) -> Result<Vec<EedGroup>> {
        let mut groups = Vec::new();

        loop {
            // BS: byte size of the next group, 0 terminates.
            let size = s.object.read_bit_short()?;
            if size <= 0 {
                break;
            }

            let app_handle = s.object.read_handle(0)?;
            let end_pos = s.object.position() + size as usize;

            let mut values = Vec::new();
            while s.object.position() < end_pos {
                let code = s.object.read_byte()?;
                let value = match code {
                    0 => {
                        let len = s.object.read_byte()? as usize;
                        let _code_page = s.object.read_raw_short()?;
                        let bytes = s.object.read_bytes(len)?;
                        let (text, _, _) = self.encoding.decode(&bytes);
                        EedValue::String(text.into_owned())
                    }
                    1 => EedValue::ControlByte(s.object.read_byte()?),
                    2 => EedValue::LayerHandle(Handle::new(s.object.read_handle(0)?)),
                    3 => {
                        let len = s.object.read_byte()? as usize;
                        EedValue::Binary(s.object.read_bytes(len)?)
                    }
                    4 => EedValue::EntityHandle(Handle::new(s.object.read_handle(0)?)),
                    5 => EedValue::Point([
                        s.object.read_raw_double()?,
                        s.object.read_raw_double()?,
                        s.object.read_raw_double()?,
                    ]),
                    10 => EedValue::Real(s.object.read_raw_double()?),
                    11 => EedValue::Short(s.object.read_raw_short()?),
                    12 => EedValue::Long(s.object.read_raw_long()?),
                    _ => {
                        // Unknown code: skip the rest of the group.
                        let remaining = end_pos.saturating_sub(s.object.position());
                        s.object.read_bytes(remaining)?;
                        break;
                    }
                };
                values.push(value);
            }

            groups.push(EedGroup {
                app_id: ObjectRef::from_handle(app_handle),
                data: values,
            });
        }

        Ok(groups)
    }

    /// The xref-dependent flag of a table record.
    pub(crate) fn read_xref_dependant_bit(&self, s: &mut StreamSet) -> Result<bool> {
        if self.version.r2007_plus() {
            let xref_index = s.object.read_bit_short()?;
            Ok(xref_index & 0x100 != 0)
        } else {
            let _referenced = s.object.read_bit()?;
            let _xref_index = s.object.read_bit_short()?;
            s.object.read_bit()
        }
    }
}

/// Which ACIS entity a modeler body belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ModelerKind {
    Region,
    Solid3D,
    Body,
}

/// Which symbol table a control object heads, for the generic reader.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ControlKind {
    Layer,
    TextStyle,
    View,
    Ucs,
    VPort,
    AppId,
    DimStyle,
    VpEntityHeader,
}
