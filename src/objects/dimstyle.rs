//! Dimension style table record.

use crate::document::ObjectRef;
use crate::objects::TableRecordCommon;
use crate::types::Color;

/// A dimension style. Field names follow the DIM* variable they store,
/// lowercased without the DIM prefix.
#[derive(Debug, Clone)]
pub struct DimStyle {
    pub record: TableRecordCommon,
    /// DIMPOST - text suffix/prefix pattern.
    pub post: String,
    /// DIMAPOST - alternate units pattern.
    pub apost: String,
    /// DIMSCALE - overall scale factor.
    pub scale: f64,
    /// DIMASZ - arrowhead size.
    pub arrow_size: f64,
    /// DIMEXO - extension line offset.
    pub extension_offset: f64,
    /// DIMDLI - dimension line increment.
    pub line_increment: f64,
    /// DIMEXE - extension line extension.
    pub extension_extend: f64,
    /// DIMRND - rounding value.
    pub rounding: f64,
    /// DIMDLE - dimension line extension.
    pub line_extend: f64,
    /// DIMTP / DIMTM - plus/minus tolerances.
    pub tolerance_plus: f64,
    pub tolerance_minus: f64,
    /// DIMTOL / DIMLIM.
    pub generate_tolerances: bool,
    pub generate_limits: bool,
    /// DIMTIH / DIMTOH - text inside/outside horizontal.
    pub text_inside_horizontal: bool,
    pub text_outside_horizontal: bool,
    /// DIMSE1 / DIMSE2 - suppress extension lines.
    pub suppress_ext1: bool,
    pub suppress_ext2: bool,
    /// DIMTAD - text above dimension line.
    pub text_above: i16,
    /// DIMZIN / DIMAZIN - zero suppression.
    pub zero_suppression: i16,
    pub angular_zero_suppression: i16,
    /// DIMTXT - text height.
    pub text_height: f64,
    /// DIMCEN - center mark size.
    pub center_mark_size: f64,
    /// DIMTSZ - tick size, 0 draws arrowheads.
    pub tick_size: f64,
    /// DIMALTF - alternate units factor.
    pub alternate_factor: f64,
    /// DIMLFAC - linear measurement factor.
    pub linear_factor: f64,
    /// DIMTVP - text vertical position.
    pub text_vertical_position: f64,
    /// DIMTFAC - tolerance text factor.
    pub tolerance_factor: f64,
    /// DIMGAP - gap around text.
    pub text_gap: f64,
    /// DIMALTRND - alternate units rounding.
    pub alternate_rounding: f64,
    /// DIMALT - alternate units on.
    pub alternate_units: bool,
    /// DIMALTD - alternate units decimals.
    pub alternate_decimals: i16,
    /// DIMTOFL - force line inside.
    pub force_line_inside: bool,
    /// DIMSAH - separate arrow blocks.
    pub separate_arrows: bool,
    /// DIMTIX - text inside extensions.
    pub text_inside_extensions: bool,
    /// DIMSOXD - suppress outside extensions.
    pub suppress_outside_extensions: bool,
    /// DIMCLRD / DIMCLRE / DIMCLRT.
    pub line_color: Color,
    pub extension_color: Color,
    pub text_color: Color,
    /// DIMADEC / DIMDEC / DIMTDEC.
    pub angular_decimals: i16,
    pub decimals: i16,
    pub tolerance_decimals: i16,
    /// DIMALTU / DIMALTTD.
    pub alternate_unit_format: i16,
    pub alternate_tolerance_decimals: i16,
    /// DIMAUNIT / DIMFRAC / DIMLUNIT.
    pub angular_unit_format: i16,
    pub fraction_format: i16,
    pub linear_unit_format: i16,
    /// DIMDSEP - decimal separator character.
    pub decimal_separator: i16,
    /// DIMTMOVE / DIMJUST / DIMFIT / DIMATFIT.
    pub text_movement: i16,
    pub justification: i16,
    pub fit: i16,
    pub arrow_text_fit: i16,
    /// DIMSD1 / DIMSD2 - suppress dimension lines.
    pub suppress_line1: bool,
    pub suppress_line2: bool,
    /// DIMTOLJ / DIMTZIN / DIMALTZ / DIMALTTZ.
    pub tolerance_justification: i16,
    pub tolerance_zero_suppression: i16,
    pub alternate_zero_suppression: i16,
    pub alternate_tolerance_zero_suppression: i16,
    /// DIMUPT - user positioned text.
    pub user_positioned_text: bool,
    /// DIMMZF / DIMMZS - sub-units.
    pub sub_unit_factor: f64,
    pub sub_unit_suffix_code: i16,
    /// DIMTXSTY.
    pub text_style: ObjectRef,
    /// DIMLDRBLK / DIMBLK / DIMBLK1 / DIMBLK2.
    pub leader_arrow: ObjectRef,
    pub arrow_block: ObjectRef,
    pub arrow_block1: ObjectRef,
    pub arrow_block2: ObjectRef,
}

impl Default for DimStyle {
    fn default() -> Self {
        Self {
            record: TableRecordCommon::default(),
            post: String::new(),
            apost: String::new(),
            scale: 1.0,
            arrow_size: 0.18,
            extension_offset: 0.0625,
            line_increment: 0.38,
            extension_extend: 0.18,
            rounding: 0.0,
            line_extend: 0.0,
            tolerance_plus: 0.0,
            tolerance_minus: 0.0,
            generate_tolerances: false,
            generate_limits: false,
            text_inside_horizontal: true,
            text_outside_horizontal: true,
            suppress_ext1: false,
            suppress_ext2: false,
            text_above: 0,
            zero_suppression: 0,
            angular_zero_suppression: 0,
            text_height: 0.18,
            center_mark_size: 0.09,
            tick_size: 0.0,
            alternate_factor: 25.4,
            linear_factor: 1.0,
            text_vertical_position: 0.0,
            tolerance_factor: 1.0,
            text_gap: 0.09,
            alternate_rounding: 0.0,
            alternate_units: false,
            alternate_decimals: 2,
            force_line_inside: false,
            separate_arrows: false,
            text_inside_extensions: false,
            suppress_outside_extensions: false,
            line_color: Color::ByBlock,
            extension_color: Color::ByBlock,
            text_color: Color::ByBlock,
            angular_decimals: 0,
            decimals: 4,
            tolerance_decimals: 4,
            alternate_unit_format: 2,
            alternate_tolerance_decimals: 2,
            angular_unit_format: 0,
            fraction_format: 0,
            linear_unit_format: 2,
            decimal_separator: b'.' as i16,
            text_movement: 0,
            justification: 0,
            fit: 3,
            arrow_text_fit: 3,
            suppress_line1: false,
            suppress_line2: false,
            tolerance_justification: 1,
            tolerance_zero_suppression: 0,
            alternate_zero_suppression: 0,
            alternate_tolerance_zero_suppression: 0,
            user_positioned_text: false,
            sub_unit_factor: 100.0,
            sub_unit_suffix_code: 0,
            text_style: ObjectRef::Null,
            leader_arrow: ObjectRef::Null,
            arrow_block: ObjectRef::Null,
            arrow_block1: ObjectRef::Null,
            arrow_block2: ObjectRef::Null,
        }
    }
}

impl DimStyle {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}
