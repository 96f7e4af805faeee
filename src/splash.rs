use crate::render::raster::{Raster, Rgba};
use crate::terminal::TextOverlay;
use figlet_rs::FIGfont;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Backdrop behind the splash art.
const BACKDROP: Rgba = Rgba::opaque(34, 34, 34);

/// Warm off-white used for the banner fallback.
const BANNER_COLOR: Rgba = Rgba::opaque(255, 251, 230);

/// When the fade-out starts, in seconds from mount.
const FADE_START: f64 = 1.7;

/// How long the fade-out lasts.
const FADE_DURATION: f64 = 0.8;

/// Largest fraction of the viewport width the splash image may cover.
const MAX_WIDTH_FRACTION: f64 = 0.8;

/// Largest fraction of the viewport height the splash image may cover.
const MAX_HEIGHT_FRACTION: f64 = 0.6;

#[derive(thiserror::Error, Debug)]
pub enum SplashError {
    #[error("failed to load splash image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to load FIGlet font: {0}")]
    FontLoadFailed(String),

    #[error("failed to render banner for {0:?}")]
    ConversionFailed(String),
}

enum SplashArt {
    Image(RgbaImage),
    Banner(Vec<String>),
}

/// The splash screen: a centered image, or a FIGlet banner of the title
/// when no image is configured. Either fades out toward the end of the
/// dwell.
pub(crate) struct SplashScreen {
    art: SplashArt,
}

impl SplashScreen {
    pub(crate) fn load(title: &str, image_path: Option<&Path>) -> Result<Self, SplashError> {
        let art = match image_path {
            Some(path) => SplashArt::Image(image::open(path)?.to_rgba8()),
            None => SplashArt::Banner(banner_lines(title)?),
        };
        Ok(Self { art })
    }

    /// Paint the splash raster for the given elapsed time.
    pub(crate) fn paint(&self, raster: &mut Raster, elapsed: f64) {
        raster.fill(BACKDROP.dimmed(fade_factor(elapsed)));
        if let SplashArt::Image(source) = &self.art {
            blit_centered(raster, source, fade_factor(elapsed));
        }
    }

    /// Text overlays for the splash, in cell coordinates.
    pub(crate) fn overlays(&self, cols: u16, rows: u16, elapsed: f64) -> Vec<TextOverlay> {
        let SplashArt::Banner(lines) = &self.art else {
            return Vec::new();
        };
        let color = BANNER_COLOR.dimmed(fade_factor(elapsed));
        let top = (rows as i32 - lines.len() as i32) / 2;
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| TextOverlay {
                col: (cols as i32 - line.width() as i32) / 2,
                row: top + index as i32,
                text: line.clone(),
                color,
                bold: false,
            })
            .collect()
    }
}

/// Brightness factor for the end-of-dwell fade: full until the fade
/// starts, then linearly down to zero.
fn fade_factor(elapsed: f64) -> f64 {
    (1.0 - (elapsed - FADE_START) / FADE_DURATION).clamp(0.0, 1.0)
}

fn banner_lines(title: &str) -> Result<Vec<String>, SplashError> {
    let font = FIGfont::standard().map_err(SplashError::FontLoadFailed)?;
    let figure = font.convert(title).ok_or_else(|| SplashError::ConversionFailed(title.to_string()))?;
    let mut lines: Vec<String> = figure.to_string().lines().map(str::to_string).collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

/// Scale the image to fit the splash bounds and draw it centered.
fn blit_centered(raster: &mut Raster, source: &RgbaImage, fade: f64) {
    let (rw, rh) = (raster.width(), raster.height());
    if rw == 0 || rh == 0 {
        return;
    }
    let max_w = (rw as f64 * MAX_WIDTH_FRACTION).max(1.0);
    let max_h = (rh as f64 * MAX_HEIGHT_FRACTION).max(1.0);
    let scale = (max_w / source.width() as f64).min(max_h / source.height() as f64);
    let target_w = ((source.width() as f64 * scale).round() as u32).max(1);
    let target_h = ((source.height() as f64 * scale).round() as u32).max(1);
    let scaled = image::imageops::resize(source, target_w, target_h, FilterType::Triangle);

    let left = (rw.saturating_sub(target_w) / 2) as i32;
    let top = (rh.saturating_sub(target_h) / 2) as i32;
    for y in 0..target_h {
        for x in 0..target_w {
            let [r, g, b, a] = scaled.get_pixel(x, y).0;
            let pixel = Rgba::new(r, g, b, a).dimmed(fade);
            let under = match (left + x as i32, top + y as i32) {
                (px, py) if px >= 0 && py >= 0 && (px as u32) < rw && (py as u32) < rh => {
                    raster.get(px as u32, py as u32)
                }
                _ => continue,
            };
            raster.put(left + x as i32, top + y as i32, pixel.over(under));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.7, 1.0)]
    #[case(2.1, 0.5)]
    #[case(2.5, 0.0)]
    #[case(10.0, 0.0)]
    fn fade_runs_over_the_last_stretch(#[case] elapsed: f64, #[case] expected: f64) {
        assert!((fade_factor(elapsed) - expected).abs() < 1e-9);
    }

    #[test]
    fn banner_splash_produces_centered_overlays() {
        let splash = SplashScreen::load("hi", None).expect("embedded font renders ascii");
        let overlays = splash.overlays(80, 24, 0.0);
        assert!(!overlays.is_empty());
        for overlay in &overlays {
            assert!(overlay.col >= 0);
            assert_eq!(overlay.color, BANNER_COLOR);
        }
    }

    #[test]
    fn banner_fades_to_black() {
        let splash = SplashScreen::load("hi", None).expect("embedded font renders ascii");
        let overlays = splash.overlays(80, 24, 5.0);
        assert!(overlays.iter().all(|o| o.color == Rgba::opaque(0, 0, 0)));
    }

    #[test]
    fn paint_covers_the_backdrop() {
        let splash = SplashScreen::load("hi", None).expect("embedded font renders ascii");
        let mut raster = Raster::new(20, 10);
        splash.paint(&mut raster, 0.0);
        assert!(raster.data().chunks_exact(4).all(|p| p == [34, 34, 34, 255]));
    }
}
