//! The decoded drawing graph.
//!
//! A [`DocumentGraph`] owns every decoded object in object map order plus
//! the handle index built over them. Inter-object references are stored as
//! [`ObjectRef`] values which the link pass rewrites from raw handles into
//! arena indices.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::entities::*;
use crate::notification::NotificationCollection;
use crate::objects::*;
use crate::types::{FileVersion, Handle};

/// A reference from one decoded object to another.
///
/// Decoders produce `Unresolved` values carrying the absolute handle; the
/// link pass rewrites them to `Index` when the target exists in the arena
/// and `Dangling` when it does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectRef {
    /// No reference stored (handle 0).
    #[default]
    Null,
    /// Absolute handle, not yet resolved.
    Unresolved(Handle),
    /// Arena index of the target object.
    Index(usize),
    /// Handle with no matching object in the file.
    Dangling(Handle),
}

impl ObjectRef {
    /// Wrap a raw absolute handle, folding 0 to `Null`.
    pub fn from_handle(handle: u64) -> Self {
        if handle == 0 {
            ObjectRef::Null
        } else {
            ObjectRef::Unresolved(Handle::new(handle))
        }
    }

    /// The arena index, if resolved.
    pub fn index(&self) -> Option<usize> {
        match self {
            ObjectRef::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ObjectRef::Null)
    }
}

/// One application group of extended object data.
#[derive(Debug, Clone, Default)]
pub struct EedGroup {
    /// Registered application that owns the group.
    pub app_id: ObjectRef,
    /// Decoded values of the group.
    pub data: Vec<EedValue>,
}

/// A typed extended data value.
#[derive(Debug, Clone, PartialEq)]
pub enum EedValue {
    String(String),
    ControlByte(u8),
    LayerHandle(Handle),
    Binary(Vec<u8>),
    EntityHandle(Handle),
    Point([f64; 3]),
    Real(f64),
    Short(i16),
    Long(i32),
}

/// Fields shared by every stored object, decoded before the type body.
#[derive(Debug, Clone, Default)]
pub struct ObjectHeader {
    /// The object's own absolute handle.
    pub handle: Handle,
    /// Stored size of the object data in bytes.
    pub byte_size: u32,
    /// Size of the object data in bits, when the version stores one.
    pub bit_size: Option<u64>,
    /// Raw type code as stored.
    pub type_code: i16,
    /// Owner reference.
    pub owner: ObjectRef,
    /// Persistent reactor references.
    pub reactors: Vec<ObjectRef>,
    /// Extension dictionary reference.
    pub xdictionary: ObjectRef,
    /// Extended object data groups.
    pub eed: Vec<EedGroup>,
}

/// A decoded object: the shared header plus its typed body.
#[derive(Debug, Clone)]
pub struct DwgObject {
    pub header: ObjectHeader,
    pub variant: ObjectVariant,
}

impl DwgObject {
    /// Whether the body is a graphical entity.
    pub fn is_entity(&self) -> bool {
        self.variant.is_entity()
    }
}

/// Every object body the decoder can produce.
///
/// Class-coded objects the decoder has no reader for become `UnknownEntity`
/// or `UnknownObject`; objects whose body failed to decode become `Errored`
/// so a single bad object never hides its neighbours.
#[derive(Debug, Clone)]
pub enum ObjectVariant {
    // Entities.
    Text(Text),
    Attrib(Attribute),
    Attdef(AttributeDefinition),
    Block(Block),
    EndBlock(EndBlock),
    SeqEnd(SeqEnd),
    Insert(Insert),
    Vertex2D(Vertex2D),
    Vertex3D(Vertex3D),
    VertexPfaceFace(VertexPfaceFace),
    Polyline2D(Polyline2D),
    Polyline3D(Polyline3D),
    PolyfaceMesh(PolyfaceMesh),
    PolygonMesh(PolygonMesh),
    Arc(Arc),
    Circle(Circle),
    Line(Line),
    Dimension(Dimension),
    Point(Point),
    Face3D(Face3D),
    Solid(Solid),
    Trace(Solid),
    Shape(Shape),
    Viewport(Viewport),
    Ellipse(Ellipse),
    Spline(Spline),
    Region(ModelerGeometry),
    Solid3D(ModelerGeometry),
    Body(ModelerGeometry),
    Ray(Ray),
    XLine(XLine),
    MText(MText),
    Leader(Leader),
    Tolerance(Tolerance),
    MLine(MLine),
    LwPolyline(LwPolyline),
    Hatch(Hatch),
    Ole2Frame(Ole2Frame),
    UnknownEntity(UnknownEntity),

    // Table control objects and table records.
    TableControl(TableControl),
    BlockHeader(BlockHeader),
    Layer(Layer),
    TextStyle(TextStyle),
    LineType(LineType),
    View(View),
    Ucs(Ucs),
    VPort(VPort),
    AppId(AppId),
    DimStyle(DimStyle),
    VpEntityHeader(VpEntityHeader),

    // Non-graphical objects.
    Dictionary(Dictionary),
    Group(Group),
    MLineStyle(MLineStyle),
    XRecord(XRecord),
    Layout(Layout),
    Placeholder,
    UnknownObject(UnknownObject),

    /// The body failed to decode; the header and stored bytes survived.
    Errored {
        /// The stored object bytes, MS size excluded, for re-inspection.
        raw: Vec<u8>,
        message: String,
    },
}

impl ObjectVariant {
    /// Whether this body is a graphical entity.
    pub fn is_entity(&self) -> bool {
        use ObjectVariant::*;
        matches!(
            self,
            Text(_)
                | Attrib(_)
                | Attdef(_)
                | Block(_)
                | EndBlock(_)
                | SeqEnd(_)
                | Insert(_)
                | Vertex2D(_)
                | Vertex3D(_)
                | VertexPfaceFace(_)
                | Polyline2D(_)
                | Polyline3D(_)
                | PolyfaceMesh(_)
                | PolygonMesh(_)
                | Arc(_)
                | Circle(_)
                | Line(_)
                | Dimension(_)
                | Point(_)
                | Face3D(_)
                | Solid(_)
                | Trace(_)
                | Shape(_)
                | Viewport(_)
                | Ellipse(_)
                | Spline(_)
                | Region(_)
                | Solid3D(_)
                | Body(_)
                | Ray(_)
                | XLine(_)
                | MText(_)
                | Leader(_)
                | Tolerance(_)
                | MLine(_)
                | LwPolyline(_)
                | Hatch(_)
                | Ole2Frame(_)
                | UnknownEntity(_)
        )
    }

    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        use ObjectVariant::*;
        match self {
            Text(_) => "TEXT",
            Attrib(_) => "ATTRIB",
            Attdef(_) => "ATTDEF",
            Block(_) => "BLOCK",
            EndBlock(_) => "ENDBLK",
            SeqEnd(_) => "SEQEND",
            Insert(_) => "INSERT",
            Vertex2D(_) => "VERTEX_2D",
            Vertex3D(_) => "VERTEX_3D",
            VertexPfaceFace(_) => "VERTEX_PFACE_FACE",
            Polyline2D(_) => "POLYLINE_2D",
            Polyline3D(_) => "POLYLINE_3D",
            PolyfaceMesh(_) => "POLYLINE_PFACE",
            PolygonMesh(_) => "POLYLINE_MESH",
            Arc(_) => "ARC",
            Circle(_) => "CIRCLE",
            Line(_) => "LINE",
            Dimension(_) => "DIMENSION",
            Point(_) => "POINT",
            Face3D(_) => "3DFACE",
            Solid(_) => "SOLID",
            Trace(_) => "TRACE",
            Shape(_) => "SHAPE",
            Viewport(_) => "VIEWPORT",
            Ellipse(_) => "ELLIPSE",
            Spline(_) => "SPLINE",
            Region(_) => "REGION",
            Solid3D(_) => "3DSOLID",
            Body(_) => "BODY",
            Ray(_) => "RAY",
            XLine(_) => "XLINE",
            MText(_) => "MTEXT",
            Leader(_) => "LEADER",
            Tolerance(_) => "TOLERANCE",
            MLine(_) => "MLINE",
            LwPolyline(_) => "LWPOLYLINE",
            Hatch(_) => "HATCH",
            Ole2Frame(_) => "OLE2FRAME",
            UnknownEntity(_) => "UNKNOWN_ENTITY",
            TableControl(_) => "TABLE_CONTROL",
            BlockHeader(_) => "BLOCK_HEADER",
            Layer(_) => "LAYER",
            TextStyle(_) => "STYLE",
            LineType(_) => "LTYPE",
            View(_) => "VIEW",
            Ucs(_) => "UCS",
            VPort(_) => "VPORT",
            AppId(_) => "APPID",
            DimStyle(_) => "DIMSTYLE",
            VpEntityHeader(_) => "VP_ENT_HDR",
            Dictionary(_) => "DICTIONARY",
            Group(_) => "GROUP",
            MLineStyle(_) => "MLINESTYLE",
            XRecord(_) => "XRECORD",
            Layout(_) => "LAYOUT",
            Placeholder => "ACDBPLACEHOLDER",
            UnknownObject(_) => "UNKNOWN_OBJECT",
            Errored { .. } => "ERRORED",
        }
    }
}

/// A class definition from the class section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DwgClass {
    /// Class number (500 and above).
    pub class_number: i16,
    /// Proxy capability flags.
    pub proxy_flags: u16,
    /// Registered application name.
    pub app_name: String,
    /// C++ class name.
    pub cpp_name: String,
    /// DXF record name.
    pub dxf_name: String,
    /// Whether the class was a proxy when saved.
    pub was_zombie: bool,
    /// 0x1F2 for entity-producing classes, 0x1F3 for object-producing ones.
    pub item_class_id: i16,
}

impl DwgClass {
    /// Whether objects of this class are graphical entities.
    pub fn is_entity(&self) -> bool {
        self.item_class_id == 0x1F2
    }
}

/// The leading run of drawing variables the decoder extracts.
///
/// The variables section stores several hundred settings; the decoder keeps
/// the leading run as fields and skips the remainder using the stored
/// section size.
#[derive(Debug, Clone, Default)]
pub struct HeaderVariables {
    /// DIMASO
    pub associate_dimensions: bool,
    /// DIMSHO
    pub update_dimensions_while_dragging: bool,
    /// PLINEGEN
    pub polyline_linetype_generation: bool,
    /// ORTHOMODE
    pub ortho_mode: bool,
    /// REGENMODE
    pub regen_mode: bool,
    /// FILLMODE
    pub fill_mode: bool,
    /// QTEXTMODE
    pub quick_text_mode: bool,
    /// PSLTSCALE
    pub paper_space_linetype_scaling: bool,
    /// LIMCHECK
    pub limit_check: bool,
    /// USRTIMER
    pub user_timer: bool,
    /// SKPOLY
    pub sketch_polylines: bool,
    /// ANGDIR
    pub angle_clockwise: bool,
    /// SPLFRAME
    pub spline_frame: bool,
    /// MIRRTEXT
    pub mirror_text: bool,
    /// WORLDVIEW
    pub world_view: bool,
    /// TILEMODE
    pub show_model_space: bool,
    /// PLIMCHECK
    pub paper_space_limit_check: bool,
    /// VISRETAIN
    pub retain_xref_visibility: bool,
    /// DISPSILH
    pub display_silhouette: bool,
    /// PELLIPSE
    pub create_ellipse_as_polyline: bool,
    /// PROXYGRAPHICS
    pub proxy_graphics: bool,
    /// TREEDEPTH
    pub tree_depth: i16,
    /// LUNITS
    pub linear_unit_format: i16,
    /// LUPREC
    pub linear_unit_precision: i16,
    /// AUNITS
    pub angular_unit_format: i16,
    /// AUPREC
    pub angular_unit_precision: i16,
    /// ATTMODE
    pub attribute_visibility: i16,
    /// PDMODE
    pub point_display_mode: i16,
    /// USERI1..USERI5
    pub user_ints: [i16; 5],
    /// SPLINESEGS
    pub spline_segments: i16,
    /// SURFU
    pub surface_u_density: i16,
    /// SURFV
    pub surface_v_density: i16,
    /// SURFTYPE
    pub surface_type: i16,
    /// SURFTAB1
    pub surface_tab1: i16,
    /// SURFTAB2
    pub surface_tab2: i16,
    /// SPLINETYPE
    pub spline_type: i16,
    /// SHADEDGE
    pub shade_edge: i16,
    /// SHADEDIF
    pub shade_diffuse: i16,
    /// UNITMODE
    pub unit_mode: i16,
    /// MAXACTVP
    pub max_active_viewports: i16,
    /// ISOLINES
    pub isolines: i16,
    /// CMLJUST
    pub multiline_justification: i16,
    /// TEXTQLTY
    pub text_quality: i16,
    /// LTSCALE
    pub linetype_scale: f64,
    /// TEXTSIZE
    pub text_height: f64,
    /// TRACEWID
    pub trace_width: f64,
    /// SKETCHINC
    pub sketch_increment: f64,
    /// FILLETRAD
    pub fillet_radius: f64,
    /// THICKNESS
    pub thickness: f64,
    /// ANGBASE
    pub angle_base: f64,
}

/// The fully decoded drawing.
#[derive(Debug)]
pub struct DocumentGraph {
    /// Version the file was written with.
    pub version: FileVersion,
    /// Decoded leading drawing variables.
    pub header: HeaderVariables,
    /// Class definitions, in section order.
    pub classes: Vec<DwgClass>,
    /// Every decoded object, in object map order.
    pub objects: Vec<DwgObject>,
    /// Handle to arena index, in insertion order.
    pub handle_index: IndexMap<Handle, usize, ahash::RandomState>,
    /// Diagnostics collected while decoding.
    pub notifications: NotificationCollection,

    model_space: OnceCell<Option<usize>>,
    paper_space: OnceCell<Option<usize>>,
}

impl DocumentGraph {
    pub fn new(version: FileVersion) -> Self {
        Self {
            version,
            header: HeaderVariables::default(),
            classes: Vec::new(),
            objects: Vec::new(),
            handle_index: IndexMap::default(),
            notifications: NotificationCollection::new(),
            model_space: OnceCell::new(),
            paper_space: OnceCell::new(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of decoded graphical entities.
    pub fn entity_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_entity()).count()
    }

    pub fn object(&self, index: usize) -> Option<&DwgObject> {
        self.objects.get(index)
    }

    /// Look an object up by its absolute handle.
    pub fn object_by_handle(&self, handle: impl Into<Handle>) -> Option<&DwgObject> {
        self.handle_index
            .get(&handle.into())
            .and_then(|&i| self.objects.get(i))
    }

    /// Follow a resolved reference into the arena.
    pub fn follow(&self, r: ObjectRef) -> Option<&DwgObject> {
        r.index().and_then(|i| self.objects.get(i))
    }

    /// The class definition for a class-coded type, if any.
    pub fn class_for_code(&self, type_code: i16) -> Option<&DwgClass> {
        self.classes.iter().find(|c| c.class_number == type_code)
    }

    /// Arena index of the model space block header, resolved once.
    pub fn model_space(&self) -> Option<usize> {
        *self
            .model_space
            .get_or_init(|| self.find_block_header("*Model_Space"))
    }

    /// Arena index of the first paper space block header, resolved once.
    pub fn paper_space(&self) -> Option<usize> {
        *self
            .paper_space
            .get_or_init(|| self.find_block_header("*Paper_Space"))
    }

    fn find_block_header(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| match &o.variant {
            ObjectVariant::BlockHeader(b) => b.name().eq_ignore_ascii_case(name),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ref_from_handle() {
        assert_eq!(ObjectRef::from_handle(0), ObjectRef::Null);
        assert_eq!(
            ObjectRef::from_handle(0x2F),
            ObjectRef::Unresolved(Handle::new(0x2F))
        );
    }

    #[test]
    fn graph_lookup_by_handle() {
        let mut graph = DocumentGraph::new(FileVersion::Ac1015);
        graph.objects.push(DwgObject {
            header: ObjectHeader {
                handle: Handle::new(0x40),
                type_code: 0x12,
                ..Default::default()
            },
            variant: ObjectVariant::Circle(Circle::default()),
        });
        graph.handle_index.insert(Handle::new(0x40), 0);

        assert_eq!(graph.object_count(), 1);
        assert!(graph.object_by_handle(0x40).is_some());
        assert!(graph.object_by_handle(0x41).is_none());
    }

    #[test]
    fn model_space_memoized() {
        let mut graph = DocumentGraph::new(FileVersion::Ac1015);
        graph.objects.push(DwgObject {
            header: ObjectHeader {
                handle: Handle::new(0x1F),
                type_code: 0x31,
                ..Default::default()
            },
            variant: ObjectVariant::BlockHeader(BlockHeader {
                record: TableRecordCommon {
                    name: "*Model_Space".into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        });
        assert_eq!(graph.model_space(), Some(0));
        assert_eq!(graph.paper_space(), None);
    }
}
