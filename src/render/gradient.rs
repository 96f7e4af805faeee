use super::raster::{Raster, Rgba};
use super::Viewport;

/// Leftmost fraction of the viewport the light can reach.
const SPAN_START: f64 = 0.18;

/// Fraction of the viewport width the light travels across.
const SPAN: f64 = 0.64;

/// Vertical anchor of the light, as a fraction of the viewport height.
const VERTICAL_ANCHOR: f64 = 0.32;

/// Inner radius of the glow, in device pixels.
const INNER_RADIUS: f64 = 60.0;

/// Outer radius of the glow, in device pixels.
const OUTER_RADIUS: f64 = 350.0;

/// A gradient stop: offset along the radius and an RGBA color with the
/// alpha expressed in `[0, 1]`.
struct Stop {
    offset: f64,
    color: (u8, u8, u8, f64),
}

/// Bright warm center fading through a neutral mid-tone to a near-opaque
/// black edge.
const STOPS: [Stop; 5] = [
    Stop { offset: 0.0, color: (255, 250, 220, 0.95) },
    Stop { offset: 0.18, color: (255, 250, 220, 0.70) },
    Stop { offset: 0.32, color: (255, 250, 220, 0.25) },
    Stop { offset: 0.5, color: (76, 72, 72, 0.70) },
    Stop { offset: 1.0, color: (0, 0, 0, 0.98) },
];

/// Horizontal anchor of the light for a given normalized light position.
///
/// This is the one mapping from the light signal into screen space; the
/// label positioner must go through it too, or the text visibly drifts
/// away from the glow.
pub(crate) fn anchor_x(light_position: f64, viewport_width: f64) -> f64 {
    viewport_width * (SPAN_START + SPAN * light_position)
}

/// Center of the glow in device pixels.
pub(crate) fn bulb_center(light_position: f64, viewport: Viewport) -> (f64, f64) {
    (
        anchor_x(light_position, viewport.width as f64),
        viewport.height as f64 * VERTICAL_ANCHOR,
    )
}

/// Color of the gradient `t` of the way from the inner to the outer
/// radius, interpolating linearly between adjacent stops.
fn shade(t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let mut previous = &STOPS[0];
    for stop in &STOPS[1..] {
        if t <= stop.offset {
            let span = stop.offset - previous.offset;
            let local = if span > 0.0 { (t - previous.offset) / span } else { 1.0 };
            return lerp(previous.color, stop.color, local);
        }
        previous = stop;
    }
    let (r, g, b, a) = STOPS[STOPS.len() - 1].color;
    Rgba::new(r, g, b, (a * 255.0).round() as u8)
}

fn lerp(from: (u8, u8, u8, f64), to: (u8, u8, u8, f64), t: f64) -> Rgba {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    let alpha = from.3 + (to.3 - from.3) * t;
    Rgba::new(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
        (alpha * 255.0).round() as u8,
    )
}

/// Gradient color at a point of the viewport, in device pixels.
pub(crate) fn color_at(x: f64, y: f64, light_position: f64, viewport: Viewport) -> Rgba {
    let (cx, cy) = bulb_center(light_position, viewport);
    let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
    let t = (distance - INNER_RADIUS) / (OUTER_RADIUS - INNER_RADIUS);
    shade(t)
}

/// Paint the lighting overlay into a raster, replacing its prior content.
///
/// Each raster pixel samples the gradient at its center mapped into the
/// viewport, so the raster may be smaller than the viewport it stands
/// for. A missing surface or a degenerate viewport skips the paint; the
/// frame loop must never crash over either.
pub(crate) fn paint(surface: Option<&mut Raster>, light_position: f64, viewport: Viewport) {
    let Some(raster) = surface else {
        return;
    };
    if viewport.is_degenerate() || raster.width() == 0 || raster.height() == 0 {
        return;
    }
    let scale_x = viewport.width as f64 / raster.width() as f64;
    let scale_y = viewport.height as f64 / raster.height() as f64;
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let vx = (x as f64 + 0.5) * scale_x;
            let vy = (y as f64 + 0.5) * scale_y;
            raster.put(x as i32, y as i32, color_at(vx, vy, light_position, viewport));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.18)]
    #[case(0.5, 0.5)]
    #[case(1.0, 0.82)]
    fn anchor_spans_the_middle_band(#[case] light: f64, #[case] fraction: f64) {
        let width = 1000.0;
        assert!((anchor_x(light, width) - width * fraction).abs() < 1e-9);
    }

    #[test]
    fn center_matches_reference_scenario() {
        let viewport = Viewport::new(1000, 800);
        let (x, y) = bulb_center(0.5, viewport);
        assert_eq!(x, 500.0);
        assert_eq!(y, 256.0);
    }

    #[test]
    fn shade_hits_the_stop_table() {
        assert_eq!(shade(0.0), Rgba::new(255, 250, 220, 242));
        assert_eq!(shade(0.18), Rgba::new(255, 250, 220, 179));
        assert_eq!(shade(1.0), Rgba::new(0, 0, 0, 250));
        // Past the outer radius the edge color holds.
        assert_eq!(shade(5.0), shade(1.0));
    }

    #[test]
    fn shade_interpolates_between_stops() {
        // Halfway between the 0.0 and 0.18 stops: alpha 0.95 -> 0.70.
        let mid = shade(0.09);
        assert_eq!(mid.r, 255);
        assert_eq!(mid.a, ((0.95 + 0.70) / 2.0 * 255.0_f64).round() as u8);
    }

    #[test]
    fn paint_is_deterministic() {
        let viewport = Viewport::new(1920, 1080);
        let mut first = Raster::new(1920, 1080);
        let mut second = Raster::new(1920, 1080);
        paint(Some(&mut first), 0.5, viewport);
        paint(Some(&mut second), 0.5, viewport);
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn paint_replaces_prior_content() {
        let viewport = Viewport::new(100, 80);
        let mut stale = Raster::new(100, 80);
        stale.fill(Rgba::opaque(1, 2, 3));
        paint(Some(&mut stale), 0.25, viewport);

        let mut fresh = Raster::new(100, 80);
        paint(Some(&mut fresh), 0.25, viewport);
        assert_eq!(stale.data(), fresh.data());
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        paint(None, 0.5, Viewport::new(100, 100));
    }

    #[test]
    fn degenerate_viewport_skips_the_paint() {
        let mut raster = Raster::new(10, 10);
        raster.fill(Rgba::opaque(9, 9, 9));
        paint(Some(&mut raster), 0.5, Viewport::new(0, 100));
        paint(Some(&mut raster), 0.5, Viewport::new(100, -3));
        assert!(raster.data().chunks_exact(4).all(|p| p == [9, 9, 9, 255]));
    }

    #[test]
    fn glow_is_brightest_at_the_center() {
        let viewport = Viewport::new(400, 300);
        let (cx, cy) = bulb_center(0.5, viewport);
        let center = color_at(cx, cy, 0.5, viewport);
        let edge = color_at(0.0, 0.0, 0.5, viewport);
        assert!(center.r > edge.r);
    }
}
