use super::oscillator;
use crate::signal::Signal;

/// Horizontal swing radius in world units.
pub(crate) const SWING_RADIUS: f64 = 2.5;

/// Resting height of the bob.
const BOB_BASE: f64 = -1.0;

/// How far the bob rises as it swings away from center.
const BOB_AMPLITUDE: f64 = 0.2;

/// Bob height at the center of the swing.
pub(crate) const REST_HEIGHT: f64 = BOB_BASE + BOB_AMPLITUDE;

/// Pose of the pendulum body for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SwingState {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) rotation_z: f64,
}

/// Everything a frame needs from the animator: the body pose and the
/// normalized light position derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FramePose {
    pub(crate) swing: SwingState,
    pub(crate) light_position: f64,
}

/// Compute the frame pose for a given elapsed time.
pub(crate) fn tick(elapsed: f64) -> FramePose {
    pose_at(oscillator::angle_at(elapsed))
}

/// Compute the frame pose for a given swing angle.
///
/// The light position is the bob's horizontal position mapped from
/// `[-SWING_RADIUS, SWING_RADIUS]` to `[0, 1]`. Every consumer of the
/// light must use this value rather than re-deriving it, so the gradient
/// and label can never desynchronize from the body.
pub(crate) fn pose_at(angle: f64) -> FramePose {
    let x = angle.sin() * SWING_RADIUS;
    let y = BOB_BASE + angle.cos().abs() * BOB_AMPLITUDE;
    let swing = SwingState { x, y, rotation_z: angle };
    let light_position = (x + SWING_RADIUS) / (2.0 * SWING_RADIUS);
    FramePose { swing, light_position }
}

/// Drives the pendulum once per frame and publishes the light position.
///
/// While swinging, each call to [`advance`](Self::advance) recomputes the
/// pose from elapsed time and publishes the same-frame light position.
/// While frozen, the last computed pose is held and nothing is published.
pub(crate) struct PendulumAnimator {
    swinging: bool,
    pose: FramePose,
    light: Signal<f64>,
}

impl PendulumAnimator {
    pub(crate) fn new(light: Signal<f64>, swinging: bool) -> Self {
        let pose = tick(0.0);
        light.publish(pose.light_position);
        Self { swinging, pose, light }
    }

    /// Advance to the pose for `elapsed` seconds and publish its light
    /// position, unless the swing is frozen.
    pub(crate) fn advance(&mut self, elapsed: f64) -> FramePose {
        if self.swinging {
            self.pose = tick(elapsed);
            self.light.publish(self.pose.light_position);
        }
        self.pose
    }

    pub(crate) fn toggle_swing(&mut self) {
        self.swinging = !self.swinging;
    }

    pub(crate) fn is_swinging(&self) -> bool {
        self.swinging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(0.7)]
    #[case(-0.7)]
    #[case(3.2)]
    #[case(-123.4)]
    fn light_position_in_range(#[case] angle: f64) {
        let pose = pose_at(angle);
        assert!((0.0..=1.0).contains(&pose.light_position));
    }

    #[test]
    fn rest_pose_is_centered() {
        let pose = pose_at(0.0);
        assert_eq!(pose.swing.x, 0.0);
        assert_eq!(pose.swing.y, BOB_BASE + BOB_AMPLITUDE);
        assert_eq!(pose.light_position, 0.5);
    }

    #[test]
    fn light_position_matches_body_mapping() {
        for angle in [-0.7, -0.35, 0.0, 0.2, 0.7] {
            let pose = pose_at(angle);
            let expected = (pose.swing.x + SWING_RADIUS) / (2.0 * SWING_RADIUS);
            assert_eq!(pose.light_position, expected);
        }
    }

    #[test]
    fn advance_publishes_same_frame_value() {
        let light = Signal::new(0.5);
        let mut animator = PendulumAnimator::new(light.clone(), true);
        let pose = animator.advance(1.25);
        assert_eq!(light.get(), pose.light_position);
    }

    #[test]
    fn frozen_animator_holds_pose_and_publishes_nothing() {
        let light = Signal::new(0.5);
        let mut animator = PendulumAnimator::new(light.clone(), true);
        let frozen = animator.advance(1.0);
        animator.toggle_swing();

        light.publish(0.123);
        let held = animator.advance(2.0);
        assert_eq!(held, frozen);
        assert_eq!(light.get(), 0.123);
    }
}
