//! Glyph metrics and single-line text layout.
//!
//! Layout is pure: given a metrics table it produces local-space quads
//! (position.xy + texcoord.uv) with the pen advancement baked into the
//! quad's x offset, so a single translate-rotate transform per string
//! places every glyph. No wrapping, no kerning beyond the font's own
//! advances, no multi-line.

/// Supported character codes: the dense, bounded range 0..128, stored as a
/// fixed-size indexed array rather than a map.
pub const GLYPH_TABLE_SIZE: usize = 128;

/// Metrics for one rasterized glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Bitmap size in pixels. Zero for glyphs the font cannot produce;
    /// such glyphs draw nothing but still advance the pen.
    pub size: [u32; 2],
    /// Offset from the pen origin to the bitmap: x to the left edge,
    /// y from the baseline up to the bitmap's top edge.
    pub bearing: [i32; 2],
    /// Horizontal advance in 1/64-pixel fixed point.
    pub advance: i64,
}

pub type GlyphTable = [GlyphMetrics; GLYPH_TABLE_SIZE];

/// Convert rasterizer output to glyph metrics. `ymin` is the offset from
/// the baseline to the bitmap's bottom edge (negative for descenders), so
/// the top-edge bearing is `height + ymin`. The advance is quantized to
/// 1/64-pixel fixed point.
pub fn metrics_from_raster(
    width: usize,
    height: usize,
    xmin: i32,
    ymin: i32,
    advance_width: f32,
) -> GlyphMetrics {
    GlyphMetrics {
        size: [width as u32, height as u32],
        bearing: [xmin, height as i32 + ymin],
        advance: (advance_width * 64.0).round() as i64,
    }
}

/// Fixed-point advance to whole pixels: integer shift, not rounding.
#[inline]
pub fn advance_px(advance: i64) -> i64 {
    advance >> 6
}

/// Table index for a character, if it falls in the supported range.
#[inline]
pub fn glyph_index(ch: char) -> Option<usize> {
    let code = ch as usize;
    (code < GLYPH_TABLE_SIZE).then_some(code)
}

/// Total pixel advance of a string. Characters outside the table
/// contribute nothing. This is the exact value the centring offset is
/// computed from.
pub fn line_width_px(text: &str, table: &GlyphTable) -> i64 {
    text.chars()
        .filter_map(glyph_index)
        .map(|code| advance_px(table[code].advance))
        .sum()
}

/// A glyph ready to draw: its table index and the six local-space vertices
/// of its quad, `[x, y, u, v]` each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub code: usize,
    pub vertices: [[f32; 4]; 6],
}

/// Build the two-triangle quad for one glyph at the given pen offset.
/// Local space is y-down and baseline-relative: the quad spans from
/// `-bearing.y` (top) to `size.y - bearing.y` (bottom). Texcoords cover
/// the full glyph texture with v flipped so the bitmap is upright.
pub fn glyph_quad(metrics: &GlyphMetrics, pen_x: f32) -> [[f32; 4]; 6] {
    let left = pen_x + metrics.bearing[0] as f32;
    let right = left + metrics.size[0] as f32;
    let bottom = metrics.size[1] as f32 - metrics.bearing[1] as f32;
    let top = bottom - metrics.size[1] as f32;

    [
        [left, bottom, 0.0, 1.0],
        [right, bottom, 1.0, 1.0],
        [left, top, 0.0, 0.0],
        [right, bottom, 1.0, 1.0],
        [right, top, 1.0, 0.0],
        [left, top, 0.0, 0.0],
    ]
}

/// Lay out a whole line: walk the characters, accumulate the pen in whole
/// pixels, and emit a quad for every drawable (non-zero-size) glyph.
/// Deterministic: identical input produces bit-identical vertices.
pub fn layout_line(text: &str, table: &GlyphTable) -> Vec<PlacedGlyph> {
    let mut placed = Vec::new();
    let mut pen_x = 0i64;
    for ch in text.chars() {
        let Some(code) = glyph_index(ch) else {
            continue;
        };
        let metrics = &table[code];
        if metrics.size[0] != 0 && metrics.size[1] != 0 {
            placed.push(PlacedGlyph {
                code,
                vertices: glyph_quad(metrics, pen_x as f32),
            });
        }
        pen_x += advance_px(metrics.advance);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_table() -> GlyphTable {
        let mut table = [GlyphMetrics::default(); GLYPH_TABLE_SIZE];
        // 'A': 12x16 bitmap, 20px advance (1280 in 1/64 units).
        table[b'A' as usize] = GlyphMetrics {
            size: [12, 16],
            bearing: [1, 15],
            advance: 1280,
        };
        // 'b': 10x14, 10px advance.
        table[b'b' as usize] = GlyphMetrics {
            size: [10, 14],
            bearing: [0, 14],
            advance: 640,
        };
        // Space: zero-size but still advances.
        table[b' ' as usize] = GlyphMetrics {
            size: [0, 0],
            bearing: [0, 0],
            advance: 704, // 11px
        };
        table
    }

    #[test]
    fn test_advance_fixed_point_law() {
        assert_eq!(advance_px(1280), 20);
        assert_eq!(advance_px(640), 10);
        // Integer division, not rounding: 63/64ths of a pixel is zero.
        assert_eq!(advance_px(63), 0);
        assert_eq!(advance_px(127), 1);
    }

    #[test]
    fn test_line_width_sums_pixel_advances() {
        let table = test_table();
        assert_eq!(line_width_px("A", &table), 20);
        assert_eq!(line_width_px("A b", &table), 20 + 11 + 10);
        // Characters outside the table contribute nothing.
        assert_eq!(line_width_px("Aé", &table), 20);
    }

    #[test]
    fn test_empty_string_width_and_centring() {
        let table = test_table();
        let width = line_width_px("", &table);
        assert_eq!(width, 0);
        assert_eq!(width / 2, 0);
        assert!(layout_line("", &table).is_empty());
    }

    #[test]
    fn test_glyph_quad_corners() {
        let table = test_table();
        let quad = glyph_quad(&table[b'A' as usize], 0.0);
        // left = bearing.x, bottom = size.y - bearing.y, top = -bearing.y.
        assert_eq!(quad[0], [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(quad[1], [13.0, 1.0, 1.0, 1.0]);
        assert_eq!(quad[2], [1.0, -15.0, 0.0, 0.0]);
        assert_eq!(quad[4], [13.0, -15.0, 1.0, 0.0]);
    }

    #[test]
    fn test_pen_offset_baked_into_quad() {
        let table = test_table();
        let placed = layout_line("AA", &table);
        assert_eq!(placed.len(), 2);
        // Second glyph shifted right by exactly one pixel advance.
        for (v0, v1) in placed[0].vertices.iter().zip(placed[1].vertices.iter()) {
            assert_eq!(v1[0] - v0[0], 20.0);
            assert_eq!(v1[1], v0[1]);
            assert_eq!(&v1[2..], &v0[2..]);
        }
    }

    #[test]
    fn test_zero_size_glyph_advances_without_quad() {
        let table = test_table();
        let placed = layout_line("A b", &table);
        assert_eq!(placed.len(), 2);
        // 'b' starts after the 'A' and space advances: 20 + 11 px.
        assert_eq!(placed[1].vertices[0][0], 31.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let table = test_table();
        let a = layout_line("Ab Ab", &table);
        let b = layout_line("Ab Ab", &table);
        assert_eq!(a, b);
    }

    #[test]
    fn test_metrics_from_raster_bearing() {
        // A 10-high bitmap whose bottom sits 3px below the baseline.
        let m = metrics_from_raster(8, 10, 2, -3, 9.5);
        assert_eq!(m.size, [8, 10]);
        assert_eq!(m.bearing, [2, 7]);
        assert_eq!(m.advance, 608); // 9.5 * 64
        assert_eq!(advance_px(m.advance), 9);
    }
}
