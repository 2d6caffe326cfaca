//! Body readers for the graphical entity types.
//!
//! Field order follows the stored layout of each type; the R13/R14 and
//! R2000 layouts differ for a handful of entities and are gated on the
//! file version.

use crate::document::{ObjectHeader, ObjectRef, ObjectVariant};
use crate::entities::*;
use crate::error::Result;
use crate::types::{Vector2, Vector3};

use super::object_decoder::{ModelerKind, ObjectDecoder, StreamSet};

impl ObjectDecoder<'_> {
    // -------------------------------------------------------------------
    // Text family
    // -------------------------------------------------------------------

    /// The stored body shared by TEXT, ATTRIB and ATTDEF.
    fn read_text_body(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, Text)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut text = Text {
            common,
            ..Default::default()
        };

        if self.version.r13_14_only() {
            text.elevation = s.object.read_bit_double()?;
            text.insertion = s.object.read_2_raw_double()?;
            text.alignment = s.object.read_2_raw_double()?;
            text.normal = s.object.read_bit_extrusion()?;
            text.thickness = s.object.read_bit_thickness()?;
            text.oblique_angle = s.object.read_bit_double()?;
            text.rotation = s.object.read_bit_double()?;
            text.height = s.object.read_bit_double()?;
            text.width_factor = s.object.read_bit_double()?;
            text.value = s.object.read_variable_text()?;
            text.generation = s.object.read_bit_short()?;
            text.horizontal_alignment = s.object.read_bit_short()?;
            text.vertical_alignment = s.object.read_bit_short()?;
        } else {
            // R2000 packs optional fields behind a presence byte.
            let data_flags = s.object.read_byte()?;
            if data_flags & 0x01 == 0 {
                text.elevation = s.object.read_raw_double()?;
            }
            text.insertion = s.object.read_2_raw_double()?;
            text.alignment = if data_flags & 0x02 == 0 {
                s.object.read_2_raw_double()?
            } else {
                text.insertion
            };
            text.normal = s.object.read_bit_extrusion()?;
            text.thickness = s.object.read_bit_thickness()?;
            if data_flags & 0x04 == 0 {
                text.oblique_angle = s.object.read_raw_double()?;
            }
            if data_flags & 0x08 == 0 {
                text.rotation = s.object.read_raw_double()?;
            }
            text.height = s.object.read_raw_double()?;
            if data_flags & 0x10 == 0 {
                text.width_factor = s.object.read_raw_double()?;
            }
            text.value = s.object.read_variable_text()?;
            if data_flags & 0x20 == 0 {
                text.generation = s.object.read_bit_short()?;
            }
            if data_flags & 0x40 == 0 {
                text.horizontal_alignment = s.object.read_bit_short()?;
            }
            if data_flags & 0x80 == 0 {
                text.vertical_alignment = s.object.read_bit_short()?;
            }
        }

        Ok((header, text))
    }

    pub(super) fn read_text(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut text) = self.read_text_body(s)?;
        text.style = s.object_ref()?;
        Ok((header, ObjectVariant::Text(text)))
    }

    pub(super) fn read_attribute(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut text) = self.read_text_body(s)?;
        let tag = s.object.read_variable_text()?;
        let field_length = s.object.read_bit_short()?;
        let flags = s.object.read_byte()?;
        text.style = s.object_ref()?;
        Ok((
            header,
            ObjectVariant::Attrib(Attribute {
                text,
                tag,
                field_length,
                flags,
            }),
        ))
    }

    pub(super) fn read_attribute_definition(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut text) = self.read_text_body(s)?;
        let tag = s.object.read_variable_text()?;
        let field_length = s.object.read_bit_short()?;
        let flags = s.object.read_byte()?;
        let prompt = s.object.read_variable_text()?;
        text.style = s.object_ref()?;
        Ok((
            header,
            ObjectVariant::Attdef(AttributeDefinition {
                text,
                tag,
                prompt,
                field_length,
                flags,
            }),
        ))
    }

    // -------------------------------------------------------------------
    // Block markers
    // -------------------------------------------------------------------

    pub(super) fn read_block(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let name = s.object.read_variable_text()?;
        Ok((header, ObjectVariant::Block(Block { common, name })))
    }

    pub(super) fn read_end_block(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        Ok((header, ObjectVariant::EndBlock(EndBlock { common })))
    }

    pub(super) fn read_seqend(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        Ok((header, ObjectVariant::SeqEnd(SeqEnd { common })))
    }

    // -------------------------------------------------------------------
    // Insert / MInsert
    // -------------------------------------------------------------------

    pub(super) fn read_insert(
        &mut self,
        s: &mut StreamSet,
        is_array: bool,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut insert = Insert {
            common,
            ..Default::default()
        };

        insert.insertion = s.object.read_3_bit_double()?;

        if self.version.r2000_plus() {
            let data_flags = s.object.read_2_bits()?;
            let x = if data_flags & 1 == 0 {
                s.object.read_raw_double()?
            } else {
                1.0
            };
            let y = if data_flags & 2 == 0 {
                s.object.read_bit_double_with_default(x)?
            } else {
                x
            };
            let z = s.object.read_bit_double_with_default(x)?;
            insert.scale = Vector3::new(x, y, z);
        } else {
            insert.scale = Vector3::new(
                s.object.read_bit_double()?,
                s.object.read_bit_double()?,
                s.object.read_bit_double()?,
            );
        }

        insert.rotation = s.object.read_bit_double()?;
        insert.normal = s.object.read_bit_extrusion()?;
        insert.has_attributes = s.object.read_bit()?;

        if is_array {
            insert.column_count = s.object.read_bit_short()?;
            insert.row_count = s.object.read_bit_short()?;
            insert.column_spacing = s.object.read_bit_double()?;
            insert.row_spacing = s.object.read_bit_double()?;
        }

        insert.block_header = s.object_ref()?;
        if insert.has_attributes {
            insert.first_attribute = s.object_ref()?;
            insert.last_attribute = s.object_ref()?;
            insert.seqend = s.object_ref()?;
        }

        Ok((header, ObjectVariant::Insert(insert)))
    }

    // -------------------------------------------------------------------
    // Vertices
    // -------------------------------------------------------------------

    pub(super) fn read_vertex_2d(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let flags = s.object.read_byte()?;
        let position = s.object.read_3_bit_double()?;

        // A negative start width doubles as both widths.
        let start_width = s.object.read_bit_double()?;
        let (start_width, end_width) = if start_width < 0.0 {
            (start_width.abs(), start_width.abs())
        } else {
            (start_width, s.object.read_bit_double()?)
        };

        let bulge = s.object.read_bit_double()?;
        let tangent_direction = s.object.read_bit_double()?;

        Ok((
            header,
            ObjectVariant::Vertex2D(Vertex2D {
                common,
                flags,
                position,
                start_width,
                end_width,
                bulge,
                tangent_direction,
            }),
        ))
    }

    pub(super) fn read_vertex_3d(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let flags = s.object.read_byte()?;
        let position = s.object.read_3_bit_double()?;
        Ok((
            header,
            ObjectVariant::Vertex3D(Vertex3D {
                common,
                flags,
                position,
            }),
        ))
    }

    pub(super) fn read_pface_face(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut indices = [0i16; 4];
        for slot in indices.iter_mut() {
            *slot = s.object.read_bit_short()?;
        }
        Ok((
            header,
            ObjectVariant::VertexPfaceFace(VertexPfaceFace { common, indices }),
        ))
    }

    // -------------------------------------------------------------------
    // Heavyweight polylines
    // -------------------------------------------------------------------

    /// The trailing handle run shared by every heavyweight polyline:
    /// first vertex, last vertex, seqend.
    fn read_polyline_handles(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectRef, ObjectRef, ObjectRef)> {
        let first = s.object_ref()?;
        let last = s.object_ref()?;
        let seqend = s.object_ref()?;
        Ok((first, last, seqend))
    }

    pub(super) fn read_polyline_2d(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut poly = Polyline2D {
            common,
            ..Default::default()
        };

        poly.flags = s.object.read_bit_short()?;
        poly.curve_type = s.object.read_bit_short()?;
        poly.start_width = s.object.read_bit_double()?;
        poly.end_width = s.object.read_bit_double()?;
        poly.thickness = s.object.read_bit_thickness()?;
        poly.elevation = s.object.read_bit_double()?;
        poly.normal = s.object.read_bit_extrusion()?;

        let (first, last, seqend) = self.read_polyline_handles(s)?;
        poly.first_vertex = first;
        poly.last_vertex = last;
        poly.seqend = seqend;

        Ok((header, ObjectVariant::Polyline2D(poly)))
    }

    pub(super) fn read_polyline_3d(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut poly = Polyline3D {
            common,
            ..Default::default()
        };

        poly.curve_flags = s.object.read_byte()?;
        poly.spline_flags = s.object.read_byte()?;

        let (first, last, seqend) = self.read_polyline_handles(s)?;
        poly.first_vertex = first;
        poly.last_vertex = last;
        poly.seqend = seqend;

        Ok((header, ObjectVariant::Polyline3D(poly)))
    }

    pub(super) fn read_polyface_mesh(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut mesh = PolyfaceMesh {
            common,
            ..Default::default()
        };

        mesh.vertex_count = s.object.read_bit_short()?;
        mesh.face_count = s.object.read_bit_short()?;

        let (first, last, seqend) = self.read_polyline_handles(s)?;
        mesh.first_vertex = first;
        mesh.last_vertex = last;
        mesh.seqend = seqend;

        Ok((header, ObjectVariant::PolyfaceMesh(mesh)))
    }

    pub(super) fn read_polygon_mesh(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut mesh = PolygonMesh {
            common,
            ..Default::default()
        };

        mesh.flags = s.object.read_bit_short()?;
        mesh.curve_type = s.object.read_bit_short()?;
        mesh.m_vertex_count = s.object.read_bit_short()?;
        mesh.n_vertex_count = s.object.read_bit_short()?;
        mesh.m_density = s.object.read_bit_short()?;
        mesh.n_density = s.object.read_bit_short()?;

        let (first, last, seqend) = self.read_polyline_handles(s)?;
        mesh.first_vertex = first;
        mesh.last_vertex = last;
        mesh.seqend = seqend;

        Ok((header, ObjectVariant::PolygonMesh(mesh)))
    }

    // -------------------------------------------------------------------
    // Basic geometry
    // -------------------------------------------------------------------

    pub(super) fn read_arc(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let arc = Arc {
            common,
            center: s.object.read_3_bit_double()?,
            radius: s.object.read_bit_double()?,
            thickness: s.object.read_bit_thickness()?,
            normal: s.object.read_bit_extrusion()?,
            start_angle: s.object.read_bit_double()?,
            end_angle: s.object.read_bit_double()?,
        };
        Ok((header, ObjectVariant::Arc(arc)))
    }

    pub(super) fn read_circle(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let circle = Circle {
            common,
            center: s.object.read_3_bit_double()?,
            radius: s.object.read_bit_double()?,
            thickness: s.object.read_bit_thickness()?,
            normal: s.object.read_bit_extrusion()?,
        };
        Ok((header, ObjectVariant::Circle(circle)))
    }

    pub(super) fn read_line(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut line = Line {
            common,
            ..Default::default()
        };

        if self.version.r13_14_only() {
            line.start = s.object.read_3_bit_double()?;
            line.end = s.object.read_3_bit_double()?;
        } else {
            // R2000 stores the end point as deltas against the start.
            let z_are_zero = s.object.read_bit()?;
            let x1 = s.object.read_raw_double()?;
            let x2 = s.object.read_bit_double_with_default(x1)?;
            let y1 = s.object.read_raw_double()?;
            let y2 = s.object.read_bit_double_with_default(y1)?;
            let (z1, z2) = if z_are_zero {
                (0.0, 0.0)
            } else {
                let z1 = s.object.read_raw_double()?;
                (z1, s.object.read_bit_double_with_default(z1)?)
            };
            line.start = Vector3::new(x1, y1, z1);
            line.end = Vector3::new(x2, y2, z2);
        }

        line.thickness = s.object.read_bit_thickness()?;
        line.normal = s.object.read_bit_extrusion()?;

        Ok((header, ObjectVariant::Line(line)))
    }

    pub(super) fn read_point(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let point = Point {
            common,
            location: s.object.read_3_bit_double()?,
            thickness: s.object.read_bit_thickness()?,
            normal: s.object.read_bit_extrusion()?,
            x_axis_angle: s.object.read_bit_double()?,
        };
        Ok((header, ObjectVariant::Point(point)))
    }

    pub(super) fn read_3d_face(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut face = Face3D {
            common,
            ..Default::default()
        };

        if self.version.r2000_plus() {
            let has_no_flags = s.object.read_bit()?;
            let z_is_zero = s.object.read_bit()?;

            let x1 = s.object.read_raw_double()?;
            let y1 = s.object.read_raw_double()?;
            let z1 = if z_is_zero {
                0.0
            } else {
                s.object.read_raw_double()?
            };
            face.corners[0] = Vector3::new(x1, y1, z1);

            // Each corner defaults to the previous one.
            for i in 1..4 {
                let prev = face.corners[i - 1];
                face.corners[i] = Vector3::new(
                    s.object.read_bit_double_with_default(prev.x)?,
                    s.object.read_bit_double_with_default(prev.y)?,
                    s.object.read_bit_double_with_default(prev.z)?,
                );
            }

            if !has_no_flags {
                face.invisible_edges = s.object.read_bit_short()?;
            }
        } else {
            for corner in face.corners.iter_mut() {
                *corner = s.object.read_3_bit_double()?;
            }
            face.invisible_edges = s.object.read_bit_short()?;
        }

        Ok((header, ObjectVariant::Face3D(face)))
    }

    pub(super) fn read_solid(
        &mut self,
        s: &mut StreamSet,
        is_trace: bool,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let thickness = s.object.read_bit_thickness()?;
        let elevation = s.object.read_bit_double()?;
        let mut corners = [Vector2::ZERO; 4];
        for corner in corners.iter_mut() {
            *corner = s.object.read_2_raw_double()?;
        }
        let normal = s.object.read_bit_extrusion()?;

        let solid = Solid {
            common,
            thickness,
            elevation,
            corners,
            normal,
        };
        let variant = if is_trace {
            ObjectVariant::Trace(solid)
        } else {
            ObjectVariant::Solid(solid)
        };
        Ok((header, variant))
    }

    pub(super) fn read_shape(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut shape = Shape {
            common,
            insertion: s.object.read_3_bit_double()?,
            size: s.object.read_bit_double()?,
            rotation: s.object.read_bit_double()?,
            width_factor: s.object.read_bit_double()?,
            oblique_angle: s.object.read_bit_double()?,
            thickness: s.object.read_bit_thickness()?,
            normal: s.object.read_bit_extrusion()?,
            shape_number: s.object.read_bit_short()?,
            style: ObjectRef::Null,
        };
        shape.style = s.object_ref()?;
        Ok((header, ObjectVariant::Shape(shape)))
    }

    // -------------------------------------------------------------------
    // Dimensions
    // -------------------------------------------------------------------

    /// The large block shared by all seven dimension types.
    fn read_dimension_base(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, Dimension)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut dim = Dimension {
            common,
            ..Default::default()
        };

        dim.normal = s.object.read_bit_extrusion()?;
        dim.text_midpoint = s.object.read_2_raw_double()?;
        dim.elevation = s.object.read_bit_double()?;

        if self.version.r2000_plus() {
            dim.flags = s.object.read_byte()?;
        }

        dim.user_text = s.object.read_variable_text()?;
        dim.text_rotation = s.object.read_bit_double()?;
        dim.horizontal_direction = s.object.read_bit_double()?;
        dim.insert_scale = s.object.read_3_bit_double()?;
        dim.insert_rotation = s.object.read_bit_double()?;

        if self.version.r2000_plus() {
            dim.attachment_point = s.object.read_bit_short()?;
            dim.line_spacing_style = s.object.read_bit_short()?;
            dim.line_spacing_factor = s.object.read_bit_double()?;
            dim.actual_measurement = s.object.read_bit_double()?;
        }

        // 2RD clone insertion point, unused.
        let _insertion = s.object.read_2_raw_double()?;

        Ok((header, dim))
    }

    fn read_dimension_handles(&mut self, s: &mut StreamSet, dim: &mut Dimension) -> Result<()> {
        dim.dim_style = s.object_ref()?;
        dim.block = s.object_ref()?;
        Ok(())
    }

    pub(super) fn read_dim_ordinate(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let feature_location = s.object.read_3_bit_double()?;
        let leader_endpoint = s.object.read_3_bit_double()?;
        let flags = s.object.read_byte()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Ordinate {
            feature_location,
            leader_endpoint,
            flags,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_linear(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        let first_point = s.object.read_3_bit_double()?;
        let second_point = s.object.read_3_bit_double()?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let rotation = s.object.read_bit_double()?;
        let extension_rotation = s.object.read_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Linear {
            first_point,
            second_point,
            rotation,
            extension_rotation,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_aligned(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        let first_point = s.object.read_3_bit_double()?;
        let second_point = s.object.read_3_bit_double()?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let extension_rotation = s.object.read_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Aligned {
            first_point,
            second_point,
            extension_rotation,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_angular_3pt(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let first_point = s.object.read_3_bit_double()?;
        let second_point = s.object.read_3_bit_double()?;
        let angle_vertex = s.object.read_3_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Angular3Point {
            first_point,
            second_point,
            angle_vertex,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_angular_2ln(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        let arc = s.object.read_3_bit_double()?;
        let first_start = s.object.read_3_bit_double()?;
        let first_end = s.object.read_3_bit_double()?;
        let second_start = s.object.read_3_bit_double()?;
        dim.definition_point = s.object.read_3_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Angular2Line {
            first_start,
            first_end,
            second_start,
            second_end: dim.definition_point,
            arc_point: Vector2::new(arc.x, arc.y),
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_radius(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let chord_point = s.object.read_3_bit_double()?;
        let leader_length = s.object.read_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Radius {
            chord_point,
            leader_length,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    pub(super) fn read_dim_diameter(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, mut dim) = self.read_dimension_base(s)?;
        dim.definition_point = s.object.read_3_bit_double()?;
        let far_chord_point = s.object.read_3_bit_double()?;
        let leader_length = s.object.read_bit_double()?;
        self.read_dimension_handles(s, &mut dim)?;
        dim.kind = DimensionKind::Diameter {
            far_chord_point,
            leader_length,
        };
        Ok((header, ObjectVariant::Dimension(dim)))
    }

    // -------------------------------------------------------------------
    // Complex entities
    // -------------------------------------------------------------------

    pub(super) fn read_viewport(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut vp = Viewport {
            common,
            center: s.object.read_3_bit_double()?,
            width: s.object.read_bit_double()?,
            height: s.object.read_bit_double()?,
            ..Default::default()
        };

        if self.version.r2000_plus() {
            vp.view_target = s.object.read_3_bit_double()?;
            vp.view_direction = s.object.read_3_bit_double()?;
            vp.twist_angle = s.object.read_bit_double()?;
            vp.view_height = s.object.read_bit_double()?;
            vp.lens_length = s.object.read_bit_double()?;
            vp.front_clip = s.object.read_bit_double()?;
            vp.back_clip = s.object.read_bit_double()?;
            vp.snap_angle = s.object.read_bit_double()?;
            vp.view_center = s.object.read_2_raw_double()?;
            vp.snap_base = s.object.read_2_raw_double()?;
            vp.snap_spacing = s.object.read_2_raw_double()?;
            vp.grid_spacing = s.object.read_2_raw_double()?;
            vp.circle_sides = s.object.read_bit_short()?;
            vp.grid_major = s.object.read_bit_short()?;

            let frozen_count = s.object.read_bit_long()?.max(0) as usize;
            vp.status_flags = s.object.read_bit_long()?;
            vp.style_sheet = s.object.read_variable_text()?;
            vp.render_mode = s.object.read_byte()?;
            vp.ucs_per_viewport = s.object.read_bit()?;
            vp.ucs_origin = s.object.read_3_bit_double()?;
            vp.ucs_x_axis = s.object.read_3_bit_double()?;
            vp.ucs_y_axis = s.object.read_3_bit_double()?;
            vp.ucs_elevation = s.object.read_bit_double()?;
            vp.ucs_ortho_type = s.object.read_bit_short()?;

            // Viewport entity header, unused since R2000 repeats the data.
            let _vp_ent_header = s.object_ref()?;
            for _ in 0..frozen_count {
                let layer = s.object_ref()?;
                vp.frozen_layers.push(layer);
            }
            vp.boundary = s.object_ref()?;
            vp.named_ucs = s.object_ref()?;
            vp.base_ucs = s.object_ref()?;
        }

        Ok((header, ObjectVariant::Viewport(vp)))
    }

    pub(super) fn read_ellipse(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let ellipse = Ellipse {
            common,
            center: s.object.read_3_bit_double()?,
            major_axis: s.object.read_3_bit_double()?,
            normal: s.object.read_3_bit_double()?,
            axis_ratio: s.object.read_bit_double()?,
            start_parameter: s.object.read_bit_double()?,
            end_parameter: s.object.read_bit_double()?,
        };
        Ok((header, ObjectVariant::Ellipse(ellipse)))
    }

    pub(super) fn read_spline(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut spline = Spline {
            common,
            ..Default::default()
        };

        spline.scenario = s.object.read_bit_short()?;
        spline.degree = s.object.read_bit_long()?;

        match spline.scenario {
            2 => {
                spline.fit_tolerance = s.object.read_bit_double()?;
                spline.normal = s.object.read_3_bit_double()?;
                spline.start_tangent = s.object.read_3_bit_double()?;
                spline.end_tangent = s.object.read_3_bit_double()?;
                let fit_count = s.object.read_bit_long()?.max(0) as usize;
                spline.fit_points.reserve(fit_count);
                for _ in 0..fit_count {
                    spline.fit_points.push(s.object.read_3_bit_double()?);
                }
            }
            1 => {
                spline.rational = s.object.read_bit()?;
                spline.closed = s.object.read_bit()?;
                spline.periodic = s.object.read_bit()?;
                spline.knot_tolerance = s.object.read_bit_double()?;
                spline.control_tolerance = s.object.read_bit_double()?;
                let knot_count = s.object.read_bit_long()?.max(0) as usize;
                let control_count = s.object.read_bit_long()?.max(0) as usize;
                let weights_present = s.object.read_bit()?;

                spline.knots.reserve(knot_count);
                for _ in 0..knot_count {
                    spline.knots.push(s.object.read_bit_double()?);
                }
                spline.control_points.reserve(control_count);
                for _ in 0..control_count {
                    spline.control_points.push(s.object.read_3_bit_double()?);
                    if weights_present {
                        spline.weights.push(s.object.read_bit_double()?);
                    }
                }
            }
            _ => {}
        }

        Ok((header, ObjectVariant::Spline(spline)))
    }

    pub(super) fn read_modeler_geometry(
        &mut self,
        s: &mut StreamSet,
        kind: ModelerKind,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut geometry = ModelerGeometry {
            common,
            ..Default::default()
        };

        geometry.acis_version = s.object.read_byte()?;

        // SAT text, one TV per line, empty line terminates.
        loop {
            let line = s.object.read_variable_text()?;
            if line.is_empty() {
                break;
            }
            geometry.sat_lines.push(line);
        }

        // B: wireframe data present, pre-R2000 only, not carried.
        if self.version.r13_14_only() {
            let _has_wires = s.object.read_bit()?;
        }

        let variant = match kind {
            ModelerKind::Region => ObjectVariant::Region(geometry),
            ModelerKind::Solid3D => ObjectVariant::Solid3D(geometry),
            ModelerKind::Body => ObjectVariant::Body(geometry),
        };
        Ok((header, variant))
    }

    pub(super) fn read_ray(&mut self, s: &mut StreamSet) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let ray = Ray {
            common,
            base_point: s.object.read_3_bit_double()?,
            direction: s.object.read_3_bit_double()?,
        };
        Ok((header, ObjectVariant::Ray(ray)))
    }

    pub(super) fn read_xline(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let xline = XLine {
            common,
            base_point: s.object.read_3_bit_double()?,
            direction: s.object.read_3_bit_double()?,
        };
        Ok((header, ObjectVariant::XLine(xline)))
    }

    pub(super) fn read_mtext(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut mtext = MText {
            common,
            ..Default::default()
        };

        mtext.insertion = s.object.read_3_bit_double()?;
        mtext.normal = s.object.read_3_bit_double()?;
        mtext.direction = s.object.read_3_bit_double()?;
        mtext.rect_width = s.object.read_bit_double()?;
        mtext.text_height = s.object.read_bit_double()?;
        mtext.attachment = s.object.read_bit_short()?;
        mtext.drawing_direction = s.object.read_bit_short()?;
        mtext.extents_height = s.object.read_bit_double()?;
        mtext.extents_width = s.object.read_bit_double()?;
        mtext.value = s.object.read_variable_text()?;

        if self.version.r2000_plus() {
            mtext.line_spacing_style = s.object.read_bit_short()?;
            mtext.line_spacing_factor = s.object.read_bit_double()?;
        }

        mtext.style = s.object_ref()?;

        Ok((header, ObjectVariant::MText(mtext)))
    }

    pub(super) fn read_leader(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut leader = Leader {
            common,
            ..Default::default()
        };

        let _unknown = s.object.read_bit()?;
        leader.annotation_type = s.object.read_bit_short()?;
        leader.path_type = s.object.read_bit_short()?;

        let point_count = s.object.read_bit_long()?.max(0) as usize;
        leader.points.reserve(point_count);
        for _ in 0..point_count {
            leader.points.push(s.object.read_3_bit_double()?);
        }

        leader.normal = s.object.read_3_bit_double()?;
        leader.horizontal_direction = s.object.read_3_bit_double()?;
        leader.block_offset = s.object.read_3_bit_double()?;
        leader.annotation_offset = s.object.read_3_bit_double()?;

        if self.version.r2000_plus() {
            leader.arrowhead_size = s.object.read_bit_double()?;
        }

        leader.has_hook_line = s.object.read_bit()?;
        leader.arrowhead_on = s.object.read_bit()?;

        if self.version.r13_14_only() {
            leader.arrowhead_size = s.object.read_bit_double()?;
            leader.text_width = s.object.read_bit_double()?;
            leader.text_height = s.object.read_bit_double()?;
        }

        leader.color_index = s.object.read_bit_short()?;

        leader.annotation = s.object_ref()?;
        leader.dim_style = s.object_ref()?;

        Ok((header, ObjectVariant::Leader(leader)))
    }

    pub(super) fn read_tolerance(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let _version = s.object.read_bit_short()?;
        let text = s.object.read_variable_text()?;
        let insertion = s.object.read_3_bit_double()?;
        let direction = s.object.read_3_bit_double()?;
        let dim_style = s.object_ref()?;

        Ok((
            header,
            ObjectVariant::Tolerance(Tolerance {
                common,
                text,
                insertion,
                direction,
                dim_style,
            }),
        ))
    }

    pub(super) fn read_mline(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut mline = MLine {
            common,
            ..Default::default()
        };

        mline.scale = s.object.read_bit_double()?;
        mline.justification = s.object.read_byte()?;
        mline.base_point = s.object.read_3_bit_double()?;
        mline.normal = s.object.read_3_bit_double()?;
        mline.flags = s.object.read_bit_short()?;
        mline.style_element_count = s.object.read_byte()?;

        let vertex_count = s.object.read_bit_short()?.max(0) as usize;
        mline.vertices.reserve(vertex_count);
        for _ in 0..vertex_count {
            let position = s.object.read_3_bit_double()?;
            let direction = s.object.read_3_bit_double()?;
            let miter_direction = s.object.read_3_bit_double()?;

            let mut line_parameters = Vec::with_capacity(mline.style_element_count as usize);
            for _ in 0..mline.style_element_count {
                let segment_count = s.object.read_bit_short()?.max(0) as usize;
                let mut segments = Vec::with_capacity(segment_count);
                for _ in 0..segment_count {
                    segments.push(s.object.read_bit_double()?);
                }
                let fill_count = s.object.read_bit_short()?.max(0) as usize;
                let mut fills = Vec::with_capacity(fill_count);
                for _ in 0..fill_count {
                    fills.push(s.object.read_bit_double()?);
                }
                line_parameters.push((segments, fills));
            }

            mline.vertices.push(MLineVertex {
                position,
                direction,
                miter_direction,
                line_parameters,
            });
        }

        mline.style = s.object_ref()?;

        Ok((header, ObjectVariant::MLine(mline)))
    }

    pub(super) fn read_lwpolyline(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        const MAX_POINT_COUNT: usize = 10_000_000;

        let (header, common) = self.read_common_entity_data(s)?;
        let mut poly = LwPolyline {
            common,
            ..Default::default()
        };

        let flag = s.object.read_bit_short()?;
        poly.closed = flag & 0x200 != 0;
        if flag & 0x04 != 0 {
            poly.constant_width = s.object.read_bit_double()?;
        }
        if flag & 0x08 != 0 {
            poly.elevation = s.object.read_bit_double()?;
        }
        if flag & 0x02 != 0 {
            poly.thickness = s.object.read_bit_double()?;
        }
        if flag & 0x01 != 0 {
            poly.normal = s.object.read_3_bit_double()?;
        }

        let point_count = s.object.read_bit_long()?.max(0) as usize;
        if point_count > MAX_POINT_COUNT {
            return Err(crate::error::DecodeError::Structural(format!(
                "implausible lwpolyline point count {point_count}"
            )));
        }
        let bulge_count = if flag & 0x10 != 0 {
            s.object.read_bit_long()?.max(0) as usize
        } else {
            0
        };
        let width_count = if flag & 0x20 != 0 {
            s.object.read_bit_long()?.max(0) as usize
        } else {
            0
        };

        poly.points.reserve(point_count);
        for _ in 0..point_count {
            poly.points.push(s.object.read_2_raw_double()?);
        }
        poly.bulges.reserve(bulge_count);
        for _ in 0..bulge_count {
            poly.bulges.push(s.object.read_bit_double()?);
        }
        poly.widths.reserve(width_count);
        for _ in 0..width_count {
            let start = s.object.read_bit_double()?;
            let end = s.object.read_bit_double()?;
            poly.widths.push((start, end));
        }

        Ok((header, ObjectVariant::LwPolyline(poly)))
    }

    pub(super) fn read_hatch(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let mut hatch = Hatch {
            common,
            ..Default::default()
        };

        if self.version.r2004_plus() {
            let is_gradient = s.object.read_bit_long()? != 0;
            if is_gradient {
                let mut gradient = GradientFill::default();
                let _reserved = s.object.read_bit_long()?;
                gradient.angle = s.object.read_bit_double()?;
                gradient.shift = s.object.read_bit_double()?;
                gradient.single_color = s.object.read_bit_long()? != 0;
                gradient.tint = s.object.read_bit_double()?;
                let color_count = s.object.read_bit_long()?.max(0) as usize;
                for _ in 0..color_count {
                    let value = s.object.read_bit_double()?;
                    let color = s.object.read_cm_color()?;
                    gradient.colors.push((value, color));
                }
                gradient.name = s.object.read_variable_text()?;
                hatch.gradient = Some(gradient);
            }
        }

        hatch.elevation = s.object.read_bit_double()?;
        hatch.normal = s.object.read_3_bit_double()?;
        hatch.pattern_name = s.object.read_variable_text()?;
        hatch.solid_fill = s.object.read_bit()?;
        hatch.associative = s.object.read_bit()?;

        let path_count = s.object.read_bit_long()?.max(0) as usize;
        let mut source_counts = Vec::with_capacity(path_count);
        hatch.paths.reserve(path_count);

        for _ in 0..path_count {
            let mut path = BoundaryPath {
                flags: BoundaryPathFlags::from_bits_retain(s.object.read_bit_long()?),
                ..Default::default()
            };

            if path.is_polyline() {
                let has_bulges = s.object.read_bit()?;
                path.polyline_closed = s.object.read_bit()?;
                let vertex_count = s.object.read_bit_long()?.max(0) as usize;
                path.polyline_vertices.reserve(vertex_count);
                for _ in 0..vertex_count {
                    let point = s.object.read_2_raw_double()?;
                    let bulge = if has_bulges {
                        s.object.read_bit_double()?
                    } else {
                        0.0
                    };
                    path.polyline_vertices.push((point, bulge));
                }
            } else {
                let edge_count = s.object.read_bit_long()?.max(0) as usize;
                path.edges.reserve(edge_count);
                for _ in 0..edge_count {
                    path.edges.push(self.read_boundary_edge(s)?);
                }
            }

            // BL: source entity count; handles come after the body.
            source_counts.push(s.object.read_bit_long()?.max(0) as usize);
            hatch.paths.push(path);
        }

        hatch.style = s.object.read_bit_short()?;
        hatch.pattern_type = s.object.read_bit_short()?;

        if !hatch.solid_fill {
            let mut pattern = HatchPattern {
                angle: s.object.read_bit_double()?,
                scale: s.object.read_bit_double()?,
                double: s.object.read_bit()?,
                lines: Vec::new(),
            };
            let line_count = s.object.read_bit_short()?.max(0) as usize;
            pattern.lines.reserve(line_count);
            for _ in 0..line_count {
                let mut line = HatchDefinitionLine {
                    angle: s.object.read_bit_double()?,
                    base: s.object.read_2_raw_double()?,
                    offset: s.object.read_2_raw_double()?,
                    dashes: Vec::new(),
                };
                let dash_count = s.object.read_bit_short()?.max(0) as usize;
                for _ in 0..dash_count {
                    line.dashes.push(s.object.read_bit_double()?);
                }
                pattern.lines.push(line);
            }
            hatch.pattern = Some(pattern);
        }

        if s.object.read_bit()? {
            hatch.pixel_size = Some(s.object.read_bit_double()?);
        }

        let seed_count = s.object.read_bit_long()?.max(0) as usize;
        hatch.seed_points.reserve(seed_count);
        for _ in 0..seed_count {
            hatch.seed_points.push(s.object.read_2_raw_double()?);
        }

        for (path, count) in hatch.paths.iter_mut().zip(source_counts) {
            for _ in 0..count {
                let entity = s.object_ref()?;
                path.source_entities.push(entity);
            }
        }

        Ok((header, ObjectVariant::Hatch(hatch)))
    }

    fn read_boundary_edge(&mut self, s: &mut StreamSet) -> Result<BoundaryEdge> {
        let edge_type = s.object.read_byte()?;
        let edge = match edge_type {
            1 => BoundaryEdge::Line {
                start: s.object.read_2_raw_double()?,
                end: s.object.read_2_raw_double()?,
            },
            2 => BoundaryEdge::Arc {
                center: s.object.read_2_raw_double()?,
                radius: s.object.read_bit_double()?,
                start_angle: s.object.read_bit_double()?,
                end_angle: s.object.read_bit_double()?,
                counter_clockwise: s.object.read_bit()?,
            },
            3 => BoundaryEdge::EllipticArc {
                center: s.object.read_2_raw_double()?,
                major_axis: s.object.read_2_raw_double()?,
                axis_ratio: s.object.read_bit_double()?,
                start_angle: s.object.read_bit_double()?,
                end_angle: s.object.read_bit_double()?,
                counter_clockwise: s.object.read_bit()?,
            },
            4 => {
                let degree = s.object.read_bit_long()?;
                let rational = s.object.read_bit()?;
                let periodic = s.object.read_bit()?;
                let knot_count = s.object.read_bit_long()?.max(0) as usize;
                let control_count = s.object.read_bit_long()?.max(0) as usize;
                let mut knots = Vec::with_capacity(knot_count);
                for _ in 0..knot_count {
                    knots.push(s.object.read_bit_double()?);
                }
                let mut control_points = Vec::with_capacity(control_count);
                let mut weights = Vec::new();
                for _ in 0..control_count {
                    control_points.push(s.object.read_2_raw_double()?);
                    if rational {
                        weights.push(s.object.read_bit_double()?);
                    }
                }
                BoundaryEdge::Spline {
                    degree,
                    rational,
                    periodic,
                    knots,
                    control_points,
                    weights,
                }
            }
            other => {
                return Err(crate::error::DecodeError::InvalidValue(format!(
                    "hatch boundary edge type {other}"
                )))
            }
        };
        Ok(edge)
    }

    pub(super) fn read_ole2frame(
        &mut self,
        s: &mut StreamSet,
    ) -> Result<(ObjectHeader, ObjectVariant)> {
        let (header, common) = self.read_common_entity_data(s)?;
        let ole_version = s.object.read_bit_short()?;
        let length = s.object.read_bit_long()?.max(0) as usize;
        let data = s.object.read_bytes(length)?;
        Ok((
            header,
            ObjectVariant::Ole2Frame(Ole2Frame {
                common,
                ole_version,
                data,
            }),
        ))
    }
}
