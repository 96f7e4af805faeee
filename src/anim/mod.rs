//! Per-frame animation of the pendulum light.
//!
//! Everything here is a pure function of elapsed time: poses are fully
//! recomputed each frame rather than integrated, so there is no
//! accumulated error and no hidden mutable capture.

pub(crate) mod oscillator;
pub(crate) mod pendulum;

pub(crate) use pendulum::{FramePose, PendulumAnimator};
