use super::gradient;

/// Horizontal translation for the hero label, in device pixels.
///
/// Shares [`gradient::anchor_x`] with the lighting overlay so the text
/// slides in lockstep with the glow; a centered light yields no offset.
pub(crate) fn offset(light_position: f64, viewport_width: f64) -> f64 {
    gradient::anchor_x(light_position, viewport_width) - viewport_width * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{gradient, Viewport};
    use rstest::rstest;

    #[test]
    fn centered_light_yields_zero_offset() {
        assert_eq!(offset(0.5, 1000.0), 0.0);
    }

    #[rstest]
    #[case(0.0, 640.0)]
    #[case(0.13, 1000.0)]
    #[case(0.5, 1920.0)]
    #[case(0.87, 333.0)]
    #[case(1.0, 800.0)]
    fn offset_tracks_the_gradient_center(#[case] light: f64, #[case] width: f64) {
        let viewport = Viewport::new(width as i32, 100);
        let (bulb_x, _) = gradient::bulb_center(light, viewport);
        assert!((offset(light, width) - (bulb_x - width * 0.5)).abs() < 1e-9);
    }
}
