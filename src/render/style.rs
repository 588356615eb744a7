use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stroke pattern of the ellipse outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Alternating on/off lengths of the pattern, in multiples of the line width.
    ///
    /// `None` for a solid line.
    pub fn dash_pattern(self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(&[3.7, 1.6][..]),
            LineStyle::Dotted => Some(&[1.0, 1.65][..]),
            LineStyle::DashDot => Some(&[6.4, 1.6, 1.0, 1.6][..]),
        }
    }
}

/// Interior of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    None,
    Solid(Color),
}

/// Rendering attributes of an ellipse outline.
///
/// Every field is optional when deserializing; missing fields take their default.
///
/// | field        | default          |
/// |--------------|------------------|
/// | `edge_color` | [`Color::BLACK`] |
/// | `line_width` | `1.0`            |
/// | `line_style` | [`LineStyle::Solid`] |
/// | `alpha`      | `1.0`            |
/// | `z_order`    | `1`              |
/// | `fill`       | [`Fill::None`]   |
///
/// `fill` is accepted so a style can be shared with other shapes, but confidence ellipses are
/// always drawn unfilled: [`EllipsePatch::new`](super::EllipsePatch::new) resets it to
/// [`Fill::None`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseStyle {
    pub edge_color: Color,
    pub line_width: f64,
    pub line_style: LineStyle,
    /// Opacity in `[0, 1]`
    pub alpha: f64,
    /// Higher values are drawn on top
    pub z_order: i32,
    pub fill: Fill,
}

impl Default for EllipseStyle {
    fn default() -> Self {
        Self {
            edge_color: Color::BLACK,
            line_width: 1.0,
            line_style: LineStyle::Solid,
            alpha: 1.0,
            z_order: 1,
            fill: Fill::None,
        }
    }
}

impl EllipseStyle {
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = color;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }
}
