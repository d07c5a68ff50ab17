//! Projectile guidance.
//!
//! Pure pursuit only: a homing projectile points straight at where its
//! target is now, at constant speed.

use glam::DVec2;

use rampart_core::constants::MIN_HEADING_DISTANCE;

/// Unit heading from `from` toward `to`. The distance is floored so
/// coincident points yield a zero vector instead of NaN.
pub fn heading_toward(from: DVec2, to: DVec2) -> DVec2 {
    let delta = to - from;
    delta / delta.length().max(MIN_HEADING_DISTANCE)
}

/// Velocity of a pure-pursuit projectile at `speed` aimed at `to`.
pub fn pursuit_velocity(from: DVec2, to: DVec2, speed: f64) -> DVec2 {
    heading_toward(from, to) * speed
}

/// Facing angle in radians for a tower at `from` looking at `to`.
pub fn facing_toward(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
