/// Angular frequency of the swing, in radians per second.
pub(crate) const ANGULAR_FREQUENCY: f64 = 1.2;

/// Peak deflection of the swing, in radians.
pub(crate) const AMPLITUDE: f64 = 0.7;

/// The swing angle at a given elapsed time.
///
/// Total over all non-negative inputs; the result is always within
/// `[-AMPLITUDE, AMPLITUDE]`.
pub(crate) fn angle_at(elapsed: f64) -> f64 {
    (elapsed * ANGULAR_FREQUENCY).sin() * AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn starts_at_rest() {
        assert_eq!(angle_at(0.0), 0.0);
    }

    #[rstest]
    #[case(0.1)]
    #[case(1.0)]
    #[case(2.5)]
    #[case(17.3)]
    #[case(1000.0)]
    fn stays_within_amplitude(#[case] elapsed: f64) {
        let angle = angle_at(elapsed);
        assert!(angle.abs() <= AMPLITUDE, "angle {angle} out of range at t={elapsed}");
    }

    #[test]
    fn peaks_at_quarter_period() {
        use std::f64::consts::FRAC_PI_2;
        let quarter = FRAC_PI_2 / ANGULAR_FREQUENCY;
        assert!((angle_at(quarter) - AMPLITUDE).abs() < 1e-9);
    }
}
