//! Non-graphical objects: table records, table controls and dictionary
//! style objects.

mod appid;
mod block_header;
mod dictionary;
mod dimstyle;
mod group;
mod layer;
mod layout;
mod linetype;
mod mline_style;
mod table_control;
mod text_style;
mod ucs;
mod unknown;
mod view;
mod vport;
mod xrecord;

pub use appid::AppId;
pub use block_header::BlockHeader;
pub use dictionary::Dictionary;
pub use dimstyle::DimStyle;
pub use group::Group;
pub use layer::Layer;
pub use layout::Layout;
pub use linetype::{LineType, LineTypeDash};
pub use mline_style::{MLineStyle, MLineStyleElement};
pub use table_control::{TableControl, TableControlKind};
pub use text_style::TextStyle;
pub use ucs::Ucs;
pub use unknown::UnknownObject;
pub use view::View;
pub use vport::{VPort, VpEntityHeader};
pub use xrecord::{XRecord, XRecordValue};

use crate::document::ObjectRef;

/// Fields shared by table records: the symbol name, its xref state and the
/// owning control object.
#[derive(Debug, Clone, Default)]
pub struct TableRecordCommon {
    pub name: String,
    /// Set when the record came in through an external reference.
    pub xref_dependent: bool,
    pub xref: ObjectRef,
    pub control: ObjectRef,
}
