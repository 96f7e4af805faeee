use super::gradient;
use super::raster::{Raster, Rgba};
use super::Viewport;
use crate::anim::{pendulum, FramePose};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::Path;

/// Brightness applied to the background photo under the lighting overlay.
const BACKDROP_BRIGHTNESS: f64 = 0.3;

/// Flat backdrop used when no photo is configured.
const BACKDROP: Rgba = Rgba::opaque(17, 17, 17);

const CORD_COLOR: Rgba = Rgba::opaque(170, 170, 170);
const BULB_COLOR: Rgba = Rgba::opaque(255, 251, 230);
const BULB_BASE_COLOR: Rgba = Rgba::opaque(136, 136, 136);

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("failed to load background image: {0}")]
    Image(#[from] image::ImageError),
}

/// Composes one hero frame: darkened background photo, lighting overlay,
/// and the pendulum itself.
///
/// Layer order follows the page this renders: photo at the bottom, the
/// radial glow over it, the cord and bulb on top. The overlay is
/// repainted from the latest light position on every frame, not only
/// when the published value changes.
pub(crate) struct HeroScene {
    background: Option<RgbaImage>,
    scaled: Option<((u32, u32), RgbaImage)>,
}

impl HeroScene {
    pub(crate) fn load(background: Option<&Path>) -> Result<Self, SceneError> {
        let background = match background {
            Some(path) => Some(image::open(path)?.to_rgba8()),
            None => None,
        };
        Ok(Self { background, scaled: None })
    }

    pub(crate) fn paint(&mut self, raster: &mut Raster, viewport: Viewport, pose: FramePose) {
        if viewport.is_degenerate() || raster.width() == 0 || raster.height() == 0 {
            return;
        }
        self.paint_backdrop(raster);

        let mut overlay = Raster::new(raster.width(), raster.height());
        gradient::paint(Some(&mut overlay), pose.light_position, viewport);
        raster.composite(&overlay);

        self.paint_pendulum(raster, viewport, pose);
    }

    fn paint_backdrop(&mut self, raster: &mut Raster) {
        let Some(background) = &self.background else {
            raster.fill(BACKDROP);
            return;
        };
        let size = (raster.width(), raster.height());
        if self.scaled.as_ref().map(|(cached, _)| *cached) != Some(size) {
            let scaled = image::imageops::resize(background, size.0, size.1, FilterType::Triangle);
            self.scaled = Some((size, scaled));
        }
        let (_, scaled) = self.scaled.as_ref().unwrap();
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let [r, g, b, _] = scaled.get_pixel(x, y).0;
                raster.put(x as i32, y as i32, Rgba::opaque(r, g, b).dimmed(BACKDROP_BRIGHTNESS));
            }
        }
    }

    fn paint_pendulum(&self, raster: &mut Raster, viewport: Viewport, pose: FramePose) {
        // Screen-space positions are computed in viewport pixels and then
        // scaled into the raster, matching the gradient's sampling.
        let scale_x = raster.width() as f64 / viewport.width as f64;
        let scale_y = raster.height() as f64 / viewport.height as f64;
        let (bulb_vx, bulb_vy) = gradient::bulb_center(pose.light_position, viewport);
        let bulb_x = bulb_vx * scale_x;
        // The bob dips slightly below the light anchor as it swings away
        // from center.
        let dip = (pendulum::REST_HEIGHT - pose.swing.y) * viewport.height as f64 * 0.25;
        let bulb_y = (bulb_vy + dip) * scale_y;

        let pivot_x = viewport.width as f64 * 0.5 * scale_x;
        raster.draw_line(pivot_x, 0.0, bulb_x, bulb_y, CORD_COLOR);

        let radius = (raster.height() as f64 * 0.02).max(1.0);
        raster.draw_disc(bulb_x, bulb_y, radius, BULB_COLOR);
        raster.put(bulb_x.round() as i32, (bulb_y + radius).round() as i32, BULB_BASE_COLOR);
    }
}
