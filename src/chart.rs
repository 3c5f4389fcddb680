//! Compile-time chart content and label placement.
//!
//! Everything the chart shows is a constant: six per-axis magnitudes, the
//! shrink factor that leaves margin for labels, the label strings, and the
//! colours. There is no data model and no configuration surface.

/// Logical screen size in pixels. The window opens at this size; resizing
/// stretches the chart rather than recomputing it.
pub const SCREEN_WIDTH: u32 = 900;
pub const SCREEN_HEIGHT: u32 = 900;

/// Glyph pixel size requested from the rasterizer.
pub const FONT_SIZE_PX: f32 = 22.0;

/// Font file read at startup. Missing or unparseable is fatal.
pub const FONT_PATH: &str = "fonts/FiraCode-Regular.ttf";

/// Per-axis magnitudes, intended range [0, 1] but unchecked: out-of-range
/// values simply scale the fill shape without clamping.
pub const MAGNITUDES: [f32; 6] = [1.0, 0.32, 0.79, 0.77, 0.8, 0.83];

/// Scalar applied to all hexagon radii.
pub const HEXAGON_SHRINK: f32 = 0.5;

pub const GRAPH_TITLE: &str = "Build quality";
pub const GRAPH_SUBTITLE: &str = "snapshot 0.1.0";

/// Axis labels, index-aligned with `MAGNITUDES`. Order starts at the top
/// vertex and proceeds clockwise.
pub const AXIS_TAGS: [&str; 6] = [
    "Coverage",
    "Speed",
    "Docs",
    "Stability",
    "Safety",
    "Portability",
];

/// Distance of axis labels from screen centre, in pixels.
const LABEL_DISTANCE: f32 = 300.0;

/// Rotation applied to the slanted axis labels, in degrees.
const LABEL_ROTATION_DEG: f32 = 0.0;

/// RGBA colour. Plain floats, packed into uniforms as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub const BACKGROUND_COLOUR: Color = Color::rgb(0.85, 0.85, 0.85);
pub const FILL_COLOUR: Color = Color::rgba(0.3, 0.5, 0.72, 0.85);
pub const SPOKE_COLOUR: Color = Color::rgb(0.25, 0.25, 0.25);
pub const PERIMETER_COLOUR: Color = Color::rgb(0.05, 0.05, 0.05);
pub const TEXT_COLOUR: Color = Color::rgb(0.1, 0.1, 0.1);

/// Pixel thickness of the spoke lines (drawn first) and the perimeter
/// (drawn over them).
pub const SPOKE_WIDTH_PX: f32 = 1.0;
pub const PERIMETER_WIDTH_PX: f32 = 3.0;

/// A single line of text, centred on `anchor` (screen coordinates, y down)
/// and rotated about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub anchor: [f32; 2],
    pub rotation_deg: f32,
}

fn centre_offset(dx: f32, dy: f32) -> [f32; 2] {
    [
        SCREEN_WIDTH as f32 / 2.0 + dx,
        SCREEN_HEIGHT as f32 / 2.0 + dy,
    ]
}

/// The eight labels drawn every frame: six axis tags placed at
/// `LABEL_DISTANCE` from screen centre along the six 60°-separated axis
/// directions (vertical flip for the upper-half angles, since screen y
/// grows downward), then title and subtitle at fixed positions.
pub fn labels() -> [Label; 8] {
    let d = LABEL_DISTANCE;
    let r = LABEL_ROTATION_DEG;
    let cos30 = 30f32.to_radians().cos();
    let sin30 = 30f32.to_radians().sin();

    [
        Label { text: AXIS_TAGS[0], anchor: centre_offset(0.0, -d), rotation_deg: 0.0 },
        Label { text: AXIS_TAGS[1], anchor: centre_offset(d * cos30, -d * sin30), rotation_deg: -r },
        Label { text: AXIS_TAGS[2], anchor: centre_offset(d * cos30, d * sin30), rotation_deg: r },
        Label { text: AXIS_TAGS[3], anchor: centre_offset(0.0, d), rotation_deg: 0.0 },
        Label { text: AXIS_TAGS[4], anchor: centre_offset(-d * cos30, d * sin30), rotation_deg: -r },
        Label { text: AXIS_TAGS[5], anchor: centre_offset(-d * cos30, -d * sin30), rotation_deg: r },
        Label { text: GRAPH_TITLE, anchor: [200.0, 50.0], rotation_deg: 0.0 },
        Label { text: GRAPH_SUBTITLE, anchor: [200.0, 85.0], rotation_deg: 0.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count_and_texts() {
        let labels = labels();
        assert_eq!(labels.len(), 8);
        for (i, tag) in AXIS_TAGS.iter().enumerate() {
            assert_eq!(labels[i].text, *tag);
        }
        assert_eq!(labels[6].text, GRAPH_TITLE);
        assert_eq!(labels[7].text, GRAPH_SUBTITLE);
    }

    #[test]
    fn test_axis_label_positions() {
        let labels = labels();
        let cx = SCREEN_WIDTH as f32 / 2.0;
        let cy = SCREEN_HEIGHT as f32 / 2.0;
        let dx = 300.0 * 30f32.to_radians().cos();

        // Top label sits straight above centre, bottom straight below.
        assert_eq!(labels[0].anchor, [cx, cy - 300.0]);
        assert_eq!(labels[3].anchor, [cx, cy + 300.0]);

        // Slanted labels mirror across both axes.
        assert_eq!(labels[1].anchor, [cx + dx, cy - 150.0]);
        assert_eq!(labels[2].anchor, [cx + dx, cy + 150.0]);
        assert_eq!(labels[4].anchor, [cx - dx, cy + 150.0]);
        assert_eq!(labels[5].anchor, [cx - dx, cy - 150.0]);
    }

    #[test]
    fn test_title_positions_fixed() {
        let labels = labels();
        assert_eq!(labels[6].anchor, [200.0, 50.0]);
        assert_eq!(labels[7].anchor, [200.0, 85.0]);
        assert_eq!(labels[6].rotation_deg, 0.0);
    }
}
