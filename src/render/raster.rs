/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgba {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl Rgba {
    pub(crate) const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Source-over composite of `self` onto `under`.
    pub(crate) fn over(self, under: Rgba) -> Rgba {
        let sa = self.a as u32;
        let da = 255 - sa;
        let channel = |s: u8, u: u8| ((s as u32 * sa + u as u32 * da) / 255) as u8;
        Rgba {
            r: channel(self.r, under.r),
            g: channel(self.g, under.g),
            b: channel(self.b, under.b),
            a: (sa + under.a as u32 * da / 255).min(255) as u8,
        }
    }

    /// Scale the color channels by a factor in `[0, 1]`.
    pub(crate) fn dimmed(self, factor: f64) -> Rgba {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * factor).round() as u8;
        Rgba { r: scale(self.r), g: scale(self.g), b: scale(self.b), a: self.a }
    }
}

/// A raster surface: a flat RGBA8 pixel buffer addressed row-major.
pub(crate) struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; (width * height * 4) as usize] }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace every pixel with `color`.
    pub(crate) fn fill(&mut self, color: Rgba) {
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Overwrite a pixel; out-of-bounds coordinates are ignored.
    pub(crate) fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let offset = self.offset(x as u32, y as u32);
        self.data[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    pub(crate) fn get(&self, x: u32, y: u32) -> Rgba {
        let offset = self.offset(x, y);
        Rgba::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    /// Source-over composite another raster of the same size onto this one.
    pub(crate) fn composite(&mut self, overlay: &Raster) {
        debug_assert_eq!((self.width, self.height), (overlay.width, overlay.height));
        for y in 0..self.height.min(overlay.height) {
            for x in 0..self.width.min(overlay.width) {
                let blended = overlay.get(x, y).over(self.get(x, y));
                self.put(x as i32, y as i32, blended);
            }
        }
    }

    /// Draw a line between two points with Bresenham's algorithm.
    pub(crate) fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draw a filled disc centered at `(cx, cy)`.
    pub(crate) fn draw_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let r = radius.ceil() as i32;
        let (cxi, cyi) = (cx.round() as i32, cy.round() as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f64 <= radius * radius {
                    self.put(cxi + dx, cyi + dy, color);
                }
            }
        }
    }
}
