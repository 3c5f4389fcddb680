//! Static chart geometry: the data-scaled hexagon fan and the
//! magnitude-independent perimeter/spoke lines.
//!
//! All positions are in normalized device coordinates (y up). Geometry is
//! computed once at startup and uploaded to immutable GPU buffers; nothing
//! here depends on the window size.

use bytemuck::{Pod, Zeroable};

/// Axis directions in degrees: top vertex first, then clockwise.
pub const AXIS_ANGLES_DEG: [f32; 6] = [90.0, 30.0, -30.0, -90.0, -150.0, 150.0];

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

/// Hexagon fill: centre vertex plus one data-scaled vertex per axis, drawn
/// as a triangle fan via the index list.
#[derive(Debug, Clone, PartialEq)]
pub struct FillGeometry {
    pub vertices: [Vertex; 7],
    pub indices: [u16; 18],
}

/// Line skeleton: six vertices at the full (shrink-only) hexagon radius,
/// shared by the closed perimeter loop and the three centre spokes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub vertices: [Vertex; 6],
    pub perimeter: [[u16; 2]; 6],
    pub spokes: [[u16; 2]; 3],
}

fn axis_point(axis: usize, radius: f32) -> [f32; 2] {
    let angle = AXIS_ANGLES_DEG[axis].to_radians();
    [radius * angle.cos(), radius * angle.sin()]
}

/// Vertex 0 is the centre; vertex i+1 sits at radius `magnitudes[i] *
/// shrink` along axis i. A zero magnitude collapses its vertex onto the
/// centre, which renders as a degenerate (zero-area) triangle pair.
pub fn fill_geometry(magnitudes: &[f32; 6], shrink: f32) -> FillGeometry {
    let mut vertices = [Vertex { position: [0.0, 0.0] }; 7];
    for axis in 0..6 {
        vertices[axis + 1] = Vertex {
            position: axis_point(axis, magnitudes[axis] * shrink),
        };
    }
    FillGeometry {
        vertices,
        indices: [
            0, 1, 2, //
            0, 2, 3, //
            0, 3, 4, //
            0, 4, 5, //
            0, 5, 6, //
            0, 6, 1,
        ],
    }
}

/// Line vertices ignore the magnitudes entirely: only the fill reflects
/// data, the frame always sits at the full shrink radius.
pub fn line_geometry(shrink: f32) -> LineGeometry {
    let mut vertices = [Vertex { position: [0.0, 0.0] }; 6];
    for axis in 0..6 {
        vertices[axis] = Vertex {
            position: axis_point(axis, shrink),
        };
    }
    LineGeometry {
        vertices,
        perimeter: [[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 0]],
        spokes: [[0, 3], [1, 4], [2, 5]],
    }
}

/// Expand index pairs into triangle-list quads of the given pixel
/// thickness. wgpu has no wide-line rasterization, so line width is carried
/// by quad expansion against the logical screen size. Six vertices per
/// segment; zero-length segments are skipped.
pub fn segment_quads(
    vertices: &[Vertex; 6],
    segments: &[[u16; 2]],
    thickness_px: f32,
    screen: [f32; 2],
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(segments.len() * 6);
    for segment in segments {
        let a = vertices[segment[0] as usize].position;
        let b = vertices[segment[1] as usize].position;
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            continue;
        }
        // Unit normal, scaled per axis: thickness_px pixels spans
        // 2 * thickness_px / screen NDC units, half on each side.
        let nx = -dy / len * thickness_px / screen[0];
        let ny = dx / len * thickness_px / screen[1];

        let v = |x: f32, y: f32| Vertex { position: [x, y] };
        let (a0, a1) = (v(a[0] + nx, a[1] + ny), v(a[0] - nx, a[1] - ny));
        let (b0, b1) = (v(b[0] + nx, b[1] + ny), v(b[0] - nx, b[1] - ny));
        out.extend_from_slice(&[a0, b0, a1, b0, b1, a1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGNITUDES: [f32; 6] = [1.0, 0.32, 0.79, 0.77, 0.8, 0.83];
    const SHRINK: f32 = 0.5;

    fn distance(p: [f32; 2]) -> f32 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    #[test]
    fn test_fill_vertex_radii_scale_with_magnitude() {
        let fill = fill_geometry(&MAGNITUDES, SHRINK);
        assert_eq!(fill.vertices[0].position, [0.0, 0.0]);
        for axis in 0..6 {
            let expected = MAGNITUDES[axis] * SHRINK;
            let actual = distance(fill.vertices[axis + 1].position);
            assert!(
                (actual - expected).abs() < 1e-6,
                "axis {axis}: expected radius {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn test_fill_known_vertices() {
        let fill = fill_geometry(&MAGNITUDES, SHRINK);

        // Top vertex: magnitude 1.0 straight up.
        let top = fill.vertices[1].position;
        assert!((top[0] - 0.0).abs() < 1e-6);
        assert!((top[1] - 0.5).abs() < 1e-6);

        // Second axis at 30 degrees with magnitude 0.32.
        let v2 = fill.vertices[2].position;
        assert!((v2[0] - 0.32 * 0.5 * 30f32.to_radians().cos()).abs() < 1e-6);
        assert!((v2[1] - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_fill_fan_is_closed() {
        let fill = fill_geometry(&MAGNITUDES, SHRINK);
        assert_eq!(fill.indices.len(), 18);
        for triangle in fill.indices.chunks(3) {
            assert_eq!(triangle[0], 0, "every fan triangle shares the centre");
        }
        // Last triangle wraps back to vertex 1.
        assert_eq!(&fill.indices[15..], &[0, 6, 1]);
    }

    #[test]
    fn test_zero_magnitude_collapses_to_centre() {
        let fill = fill_geometry(&[0.0; 6], SHRINK);
        for vertex in &fill.vertices {
            assert_eq!(vertex.position, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_line_vertices_are_magnitude_independent() {
        let lines = line_geometry(SHRINK);
        for vertex in &lines.vertices {
            assert!((distance(vertex.position) - SHRINK).abs() < 1e-6);
        }
    }

    #[test]
    fn test_line_index_lists() {
        let lines = line_geometry(SHRINK);
        // Perimeter is a closed 6-cycle.
        for (i, pair) in lines.perimeter.iter().enumerate() {
            assert_eq!(pair[0] as usize, i);
            assert_eq!(pair[1] as usize, (i + 1) % 6);
        }
        // Spokes connect opposite vertices.
        assert_eq!(lines.spokes, [[0, 3], [1, 4], [2, 5]]);
    }

    #[test]
    fn test_segment_quads_expand_six_vertices_per_segment() {
        let lines = line_geometry(SHRINK);
        let spokes = segment_quads(&lines.vertices, &lines.spokes, 1.0, [900.0, 900.0]);
        assert_eq!(spokes.len(), 3 * 6);
        let perimeter = segment_quads(&lines.vertices, &lines.perimeter, 3.0, [900.0, 900.0]);
        assert_eq!(perimeter.len(), 6 * 6);
    }

    #[test]
    fn test_segment_quad_thickness() {
        // A horizontal segment along x: the quad's vertical extent equals
        // 2 * thickness / screen height in NDC.
        let mut vertices = [Vertex { position: [0.0, 0.0] }; 6];
        vertices[1] = Vertex { position: [0.5, 0.0] };
        let quad = segment_quads(&vertices, &[[0, 1]], 3.0, [900.0, 900.0]);
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        let min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((max - min - 2.0 * 3.0 / 900.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_quads_skip_degenerate() {
        let vertices = [Vertex { position: [0.0, 0.0] }; 6];
        let quad = segment_quads(&vertices, &[[0, 3]], 1.0, [900.0, 900.0]);
        assert!(quad.is_empty());
    }
}
