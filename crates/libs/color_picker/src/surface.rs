use common_types::{ColorCode, rgb_distance};
use palette::{FromColor, Hsv, Srgb};

/// Pixel position on the picker raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterCoord {
    pub x: u32,
    pub y: u32,
}

impl RasterCoord {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Picker surface must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },
}

/// Fixed-resolution hue / saturation-value raster.
///
/// Hue sweeps left to right through the six primary/secondary stops. Going down, a
/// white overlay fades in and a multiplied black overlay darkens, so the top row holds
/// pure hues and the bottom row is black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSurface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PickerSurface {
    /// Build and paint a surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Empty { width, height });
        }
        let mut surface = Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        };
        surface.render();
        Ok(surface)
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Paint the gradients. Repainting yields identical pixels.
    pub fn render(&mut self) {
        let width = self.width as usize;
        for y in 0..self.height {
            // Sample at pixel centers, like a canvas gradient does.
            let shade = (y as f32 + 0.5) / self.height as f32;
            for x in 0..self.width {
                let hue = (x as f32 + 0.5) / self.width as f32 * 360.0;
                self.pixels[y as usize * width + x as usize] = shade_hue(hue, shade);
            }
        }
    }

    /// Color at a raster coordinate, `None` outside the raster.
    #[must_use]
    pub fn color_at(&self, coord: RasterCoord) -> Option<ColorCode> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        let idx = coord.y as usize * self.width as usize + coord.x as usize;
        self.pixels.get(idx).copied().map(ColorCode::from_channels)
    }

    /// Spacing of the coarse grid scanned by [`Self::coord_for`].
    #[must_use]
    pub fn grid_pitch(&self) -> u32 {
        (self.width.min(self.height) / 60).max(1)
    }

    /// Approximate inverse of [`Self::color_at`].
    ///
    /// Scans a coarse grid in row-major order and returns the first point with the
    /// smallest RGB distance to `color`. The surface cannot reach every RGB value, so
    /// this is a nearest match rather than an exact inverse.
    #[must_use]
    pub fn coord_for(&self, color: ColorCode) -> RasterCoord {
        let target = color.channels();
        let step = self.grid_pitch() as usize;
        let mut best = (f64::INFINITY, RasterCoord::new(0, 0));

        for y in (0..self.height).step_by(step) {
            for x in (0..self.width).step_by(step) {
                let idx = y as usize * self.width as usize + x as usize;
                let distance = rgb_distance(self.pixels[idx], target);
                if distance < best.0 {
                    best = (distance, RasterCoord::new(x, y));
                }
            }
        }
        best.1
    }
}

/// Composite one pixel: pure hue, then white fading in with `shade`, then a multiplied
/// black layer with the same alpha.
fn shade_hue(hue: f32, shade: f32) -> [u8; 3] {
    let hsv: Hsv = Hsv::new(hue, 1.0, 1.0);
    let base: Srgb = Srgb::from_color(hsv);
    let channel = |c: f32| {
        let whitened = c * (1.0 - shade) + shade;
        let darkened = whitened * (1.0 - shade);
        (darkened * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [channel(base.red), channel(base.green), channel(base.blue)]
}
