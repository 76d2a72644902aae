use crate::{PickerSurface, RasterCoord};
use common_types::ColorCode;
use tracing::debug;

/// A point in display space, relative to the top-left of the displayed surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size the surface is displayed at, which may differ from its raster size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A viewport showing the raster at 1:1.
    #[must_use]
    pub fn of(surface: &PickerSurface) -> Self {
        Self::new(f64::from(surface.width()), f64::from(surface.height()))
    }
}

/// Interactive color selection over a [`PickerSurface`].
///
/// Holds the swatch color and the marker position. Typing a code moves the marker;
/// picking on the surface sets the code.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    surface: PickerSurface,
    viewport: Viewport,
    color: Option<ColorCode>,
    marker: Option<DisplayPoint>,
    picking: bool,
}

impl ColorPicker {
    #[must_use]
    pub fn new(surface: PickerSurface, viewport: Viewport) -> Self {
        Self {
            surface,
            viewport,
            color: None,
            marker: None,
            picking: false,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &PickerSurface {
        &self.surface
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current swatch color.
    #[must_use]
    pub const fn color(&self) -> Option<ColorCode> {
        self.color
    }

    /// Marker position in display space.
    #[must_use]
    pub const fn marker(&self) -> Option<DisplayPoint> {
        self.marker
    }

    #[must_use]
    pub const fn is_picking(&self) -> bool {
        self.picking
    }

    pub fn render(&mut self) {
        self.surface.render();
    }

    #[must_use]
    pub fn color_at(&self, coord: RasterCoord) -> Option<ColorCode> {
        self.surface.color_at(coord)
    }

    #[must_use]
    pub fn coord_for(&self, color: ColorCode) -> RasterCoord {
        self.surface.coord_for(color)
    }

    /// The surface was laid out at a new size; the marker keeps its raster position.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        let raster = self.marker.map(|m| self.to_raster(m));
        self.viewport = viewport;
        self.marker = raster.map(|coord| self.to_display(coord));
    }

    /// Apply typed text. Valid 3/6 digit codes update the swatch and move the marker;
    /// anything else leaves the picker untouched and returns `None`.
    pub fn set_color_code(&mut self, text: &str) -> Option<ColorCode> {
        let color = ColorCode::parse(text)?;
        let coord = self.surface.coord_for(color);
        self.color = Some(color);
        self.marker = Some(self.to_display(coord));
        debug!("Color code {} placed marker at {:?}", color, coord);
        Some(color)
    }

    /// Start a picking gesture at `point`.
    pub fn begin_pick(&mut self, point: DisplayPoint) -> Option<ColorCode> {
        self.picking = true;
        self.pick_at(point)
    }

    /// Follow the pointer; ignored unless a gesture is active.
    pub fn continue_pick(&mut self, point: DisplayPoint) -> Option<ColorCode> {
        if !self.picking {
            return None;
        }
        self.pick_at(point)
    }

    /// End the gesture wherever the release happened.
    pub fn end_pick(&mut self) {
        self.picking = false;
    }

    fn pick_at(&mut self, point: DisplayPoint) -> Option<ColorCode> {
        let clamped = DisplayPoint::new(
            point.x.clamp(0.0, self.viewport.width.max(0.0)),
            point.y.clamp(0.0, self.viewport.height.max(0.0)),
        );
        let coord = self.to_raster(clamped);
        let color = self.surface.color_at(coord)?;
        self.color = Some(color);
        self.marker = Some(clamped);
        Some(color)
    }

    fn scale(&self) -> (f64, f64) {
        let raster_w = f64::from(self.surface.width());
        let raster_h = f64::from(self.surface.height());
        let sx = if self.viewport.width > 0.0 {
            raster_w / self.viewport.width
        } else {
            1.0
        };
        let sy = if self.viewport.height > 0.0 {
            raster_h / self.viewport.height
        } else {
            1.0
        };
        (sx, sy)
    }

    fn to_raster(&self, point: DisplayPoint) -> RasterCoord {
        let (sx, sy) = self.scale();
        let max_x = f64::from(self.surface.width() - 1);
        let max_y = f64::from(self.surface.height() - 1);
        RasterCoord::new(
            (point.x * sx).round().clamp(0.0, max_x) as u32,
            (point.y * sy).round().clamp(0.0, max_y) as u32,
        )
    }

    fn to_display(&self, coord: RasterCoord) -> DisplayPoint {
        let (sx, sy) = self.scale();
        DisplayPoint::new(f64::from(coord.x) / sx, f64::from(coord.y) / sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(width: u32, height: u32, viewport: Viewport) -> ColorPicker {
        let surface = PickerSurface::new(width, height).expect("non-empty surface");
        ColorPicker::new(surface, viewport)
    }

    #[test]
    fn set_color_code_moves_marker_near_the_color() {
        let mut p = picker(300, 300, Viewport::new(300.0, 300.0));
        let sampled_code = p
            .color_at(RasterCoord::new(150, 150))
            .expect("in bounds")
            .to_string();
        for code in ["#f00", "00ff00", "#0000FF", "#ff8000", "0ff", sampled_code.as_str()] {
            let color = p.set_color_code(code).expect("valid code");
            assert_eq!(p.color(), Some(color));

            let marker = p.marker().expect("marker placed");
            let coord = RasterCoord::new(marker.x.round() as u32, marker.y.round() as u32);
            let sampled = p.color_at(coord).expect("marker inside raster");
            assert!(color.distance(&sampled) < 60.0, "{code} landed on {sampled}");
        }
    }

    #[test]
    fn invalid_text_is_a_silent_no_op() {
        let mut p = picker(120, 120, Viewport::new(120.0, 120.0));
        let color = p.set_color_code("#336699").expect("valid code");
        let marker = p.marker();

        for text in ["", "#", "#33", "#3366", "zzzzzz", "#3366990"] {
            assert_eq!(p.set_color_code(text), None);
            assert_eq!(p.color(), Some(color));
            assert_eq!(p.marker(), marker);
        }
    }

    #[test]
    fn marker_is_scaled_into_display_space() {
        let mut p = picker(100, 100, Viewport::new(200.0, 50.0));
        p.set_color_code("#ff0000").expect("valid code");
        let marker = p.marker().expect("marker placed");
        let coord = p.coord_for(ColorCode::new(255, 0, 0));
        assert!((marker.x - f64::from(coord.x) * 2.0).abs() < 1e-9);
        assert!((marker.y - f64::from(coord.y) * 0.5).abs() < 1e-9);
    }

    #[test]
    fn picking_requires_an_active_gesture() {
        let mut p = picker(60, 60, Viewport::new(60.0, 60.0));
        assert_eq!(p.continue_pick(DisplayPoint::new(10.0, 10.0)), None);
        assert_eq!(p.color(), None);

        let first = p.begin_pick(DisplayPoint::new(5.0, 5.0)).expect("in bounds");
        assert!(p.is_picking());
        let second = p.continue_pick(DisplayPoint::new(40.0, 30.0)).expect("in bounds");
        assert_ne!(first, second);
        assert_eq!(p.color(), Some(second));

        p.end_pick();
        assert!(!p.is_picking());
        assert_eq!(p.continue_pick(DisplayPoint::new(1.0, 1.0)), None);
        assert_eq!(p.color(), Some(second));
    }

    #[test]
    fn dragging_outside_the_surface_clamps_to_the_edge() {
        let mut p = picker(50, 40, Viewport::new(100.0, 80.0));
        p.begin_pick(DisplayPoint::new(10.0, 10.0));
        let color = p
            .continue_pick(DisplayPoint::new(500.0, -20.0))
            .expect("clamped into bounds");

        assert_eq!(p.marker(), Some(DisplayPoint::new(100.0, 0.0)));
        assert_eq!(p.color_at(RasterCoord::new(49, 0)), Some(color));
    }

    #[test]
    fn picked_color_matches_surface_pixel() {
        let mut p = picker(80, 80, Viewport::new(160.0, 160.0));
        let color = p.begin_pick(DisplayPoint::new(40.0, 60.0)).expect("in bounds");
        assert_eq!(p.color_at(RasterCoord::new(20, 30)), Some(color));
    }

    #[test]
    fn resize_keeps_marker_on_the_same_pixel() {
        let mut p = picker(100, 100, Viewport::new(100.0, 100.0));
        p.begin_pick(DisplayPoint::new(30.0, 70.0));
        p.end_pick();

        p.resize_viewport(Viewport::new(50.0, 200.0));
        assert_eq!(p.marker(), Some(DisplayPoint::new(15.0, 140.0)));
    }
}
