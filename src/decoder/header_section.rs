//! Drawing variables section decoder.
//!
//! The section is a sentinel-framed bit stream of several hundred
//! variables in a fixed, version-gated order. The leading run is decoded
//! into [`HeaderVariables`]; the rest is skipped using the stored section
//! size, which also positions the reader for the end sentinel check.

use crate::bit::BitReader;
use crate::decoder::constants::{HEADER_END, HEADER_START};
use crate::document::HeaderVariables;
use crate::error::{DecodeError, Result};
use crate::types::FileVersion;

/// Decode the variables section found at `offset` in the file buffer.
pub fn read_header_section(
    data: &[u8],
    offset: usize,
    version: FileVersion,
) -> Result<HeaderVariables> {
    let mut reader = BitReader::at(data, version, offset);

    if reader.read_sentinel()? != HEADER_START {
        return Err(DecodeError::SentinelMismatch("drawing variables"));
    }

    // RL: section size in bytes.
    let size = reader.read_raw_long()? as i64;
    if size < 0 {
        return Err(DecodeError::Structural(
            "negative drawing variables section size".into(),
        ));
    }
    let initial_pos = reader.position_in_bits();

    let mut vars = HeaderVariables::default();
    read_leading_variables(&mut reader, version, &mut vars)?;

    // Skip the remaining variables and land on the CRC.
    reader.set_position_in_bits(initial_pos + size * 8)?;
    let _crc = reader.reset_shift()?;

    if reader.read_sentinel()? != HEADER_END {
        return Err(DecodeError::SentinelMismatch("drawing variables end"));
    }

    Ok(vars)
}

fn read_leading_variables(
    reader: &mut BitReader,
    version: FileVersion,
    vars: &mut HeaderVariables,
) -> Result<()> {
    let r13_14 = version.r13_14_only();

    // Four unknown doubles and four unknown strings.
    for _ in 0..4 {
        reader.read_bit_double()?;
    }
    for _ in 0..4 {
        reader.read_variable_text()?;
    }
    // Two unknown longs.
    reader.read_bit_long()?;
    reader.read_bit_long()?;

    if r13_14 {
        // BS: unknown.
        reader.read_bit_short()?;
    }

    // H: current viewport entity header, unused here.
    reader.read_handle_ref()?;

    vars.associate_dimensions = reader.read_bit()?;
    vars.update_dimensions_while_dragging = reader.read_bit()?;
    if r13_14 {
        // B: DIMSAV, undocumented.
        reader.read_bit()?;
    }
    vars.polyline_linetype_generation = reader.read_bit()?;
    vars.ortho_mode = reader.read_bit()?;
    vars.regen_mode = reader.read_bit()?;
    vars.fill_mode = reader.read_bit()?;
    vars.quick_text_mode = reader.read_bit()?;
    vars.paper_space_linetype_scaling = reader.read_bit()?;
    vars.limit_check = reader.read_bit()?;
    if r13_14 {
        // B: BLIPMODE.
        reader.read_bit()?;
    }
    vars.user_timer = reader.read_bit()?;
    vars.sketch_polylines = reader.read_bit()?;
    vars.angle_clockwise = reader.read_bit()?;
    vars.spline_frame = reader.read_bit()?;
    if r13_14 {
        // B: ATTREQ, ATTDIA.
        reader.read_bit()?;
        reader.read_bit()?;
    }
    vars.mirror_text = reader.read_bit()?;
    vars.world_view = reader.read_bit()?;
    if r13_14 {
        // B: WIREFRAME, undocumented.
        reader.read_bit()?;
    }
    vars.show_model_space = reader.read_bit()?;
    vars.paper_space_limit_check = reader.read_bit()?;
    vars.retain_xref_visibility = reader.read_bit()?;
    if r13_14 {
        // B: DELOBJ.
        reader.read_bit()?;
    }
    vars.display_silhouette = reader.read_bit()?;
    vars.create_ellipse_as_polyline = reader.read_bit()?;
    vars.proxy_graphics = reader.read_bit_short_as_bool()?;
    if r13_14 {
        // BS: DRAGMODE.
        reader.read_bit_short()?;
    }
    vars.tree_depth = reader.read_bit_short()?;
    vars.linear_unit_format = reader.read_bit_short()?;
    let luprec = reader.read_bit_short()?;
    if (0..=8).contains(&luprec) {
        vars.linear_unit_precision = luprec;
    }
    vars.angular_unit_format = reader.read_bit_short()?;
    let auprec = reader.read_bit_short()?;
    if (0..=8).contains(&auprec) {
        vars.angular_unit_precision = auprec;
    }
    if r13_14 {
        // BS: OSMODE.
        reader.read_bit_short()?;
    }
    vars.attribute_visibility = reader.read_bit_short()?;
    if r13_14 {
        // BS: COORDS.
        reader.read_bit_short()?;
    }
    vars.point_display_mode = reader.read_bit_short()?;
    if r13_14 {
        // BS: PICKSTYLE.
        reader.read_bit_short()?;
    }
    for slot in vars.user_ints.iter_mut() {
        *slot = reader.read_bit_short()?;
    }
    vars.spline_segments = reader.read_bit_short()?;
    vars.surface_u_density = reader.read_bit_short()?;
    vars.surface_v_density = reader.read_bit_short()?;
    vars.surface_type = reader.read_bit_short()?;
    vars.surface_tab1 = reader.read_bit_short()?;
    vars.surface_tab2 = reader.read_bit_short()?;
    vars.spline_type = reader.read_bit_short()?;
    vars.shade_edge = reader.read_bit_short()?;
    vars.shade_diffuse = reader.read_bit_short()?;
    vars.unit_mode = reader.read_bit_short()?;
    vars.max_active_viewports = reader.read_bit_short()?;
    let isolines = reader.read_bit_short()?;
    if (0..=2047).contains(&isolines) {
        vars.isolines = isolines;
    }
    vars.multiline_justification = reader.read_bit_short()?;
    let text_quality = reader.read_bit_short()?;
    if (0..=100).contains(&text_quality) {
        vars.text_quality = text_quality;
    }
    vars.linetype_scale = reader.read_bit_double()?;
    vars.text_height = reader.read_bit_double()?;
    vars.trace_width = reader.read_bit_double()?;
    vars.sketch_increment = reader.read_bit_double()?;
    vars.fillet_radius = reader.read_bit_double()?;
    vars.thickness = reader.read_bit_double()?;
    vars.angle_base = reader.read_bit_double()?;

    Ok(())
}
