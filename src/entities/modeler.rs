//! ACIS modeler entities: region, 3D solid and body.

use crate::entities::EntityCommon;

/// Shared body of REGION, 3DSOLID and BODY.
///
/// The geometry itself is an embedded ACIS SAT text blob; it is carried
/// verbatim, one stored line per element.
#[derive(Debug, Clone, Default)]
pub struct ModelerGeometry {
    pub common: EntityCommon,
    pub acis_version: u8,
    pub sat_lines: Vec<String>,
}

impl ModelerGeometry {
    pub fn sat_text(&self) -> String {
        self.sat_lines.join("\n")
    }
}
