//! Layer table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::Color;

#[derive(Debug, Clone)]
pub struct Layer {
    pub record: TableRecordCommon,
    pub frozen: bool,
    pub off: bool,
    pub frozen_in_new_viewports: bool,
    pub locked: bool,
    pub plottable: bool,
    /// Raw lineweight code from the packed flags.
    pub lineweight: i16,
    pub color: Color,
    pub plotstyle: ObjectRef,
    pub linetype: ObjectRef,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            frozen: false,
            off: false,
            frozen_in_new_viewports: false,
            locked: false,
            plottable: true,
            lineweight: 0,
            color: Color::Index(7),
            plotstyle: ObjectRef::Null,
            linetype: ObjectRef::Null,
        }
    }
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Visible means neither off nor frozen.
    pub fn is_visible(&self) -> bool {
        !self.off && !self.frozen
    }
}
