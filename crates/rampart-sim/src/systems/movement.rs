//! Enemy movement along the path.
//!
//! Enemies advance by `speed * dt` along the polyline, snapping to each
//! waypoint they pass, and never overshoot the final one.

use glam::DVec2;
use hecs::World;

use rampart_core::components::{Enemy, Health, PathFollower, Position};
use rampart_core::constants::MOVE_EPSILON;
use rampart_core::enums::EnemyPhase;
use rampart_core::types::{Path, PathProgress};

/// Move every walking enemy by its speed times `dt`.
///
/// Enemies already at zero health stand still; rewards settles them later
/// in the frame.
pub fn run(world: &mut World, path: &Path, dt: f64) {
    for (_entity, (enemy, health, follower, pos)) in
        world.query_mut::<(&mut Enemy, &Health, &mut PathFollower, &mut Position)>()
    {
        if enemy.phase != EnemyPhase::Moving || health.is_dead() {
            continue;
        }
        let distance = (enemy.speed * dt).max(0.0);
        if advance(path, &mut follower.progress, &mut pos.0, distance) {
            enemy.phase = EnemyPhase::Arrived;
        }
    }
}

/// Walk `distance` pixels from `progress`, updating `position`.
///
/// Returns true once the final waypoint is reached; the position is then
/// exactly that waypoint.
pub fn advance(path: &Path, progress: &mut PathProgress, position: &mut DVec2, distance: f64) -> bool {
    let last = path.last_index();
    let mut remaining_travel = distance;

    if progress.segment >= last {
        *position = path.end();
        return true;
    }

    while remaining_travel > MOVE_EPSILON {
        let Some((p0, p1)) = path.segment(progress.segment) else {
            break;
        };
        let seg_len = path.segment_length(progress.segment);
        let left_in_segment = seg_len - progress.into_segment;

        if remaining_travel < left_in_segment {
            progress.into_segment += remaining_travel;
            *position = p0 + (p1 - p0) * (progress.into_segment / seg_len);
            remaining_travel = 0.0;
        } else {
            *position = p1;
            remaining_travel -= left_in_segment.max(0.0);
            progress.segment += 1;
            progress.into_segment = 0.0;
        }

        if progress.segment >= last {
            *position = path.end();
            return true;
        }
    }

    false
}
