//! Target selection policies.
//!
//! Selection is a pure function of a candidate list. Candidates are
//! expected in spawn order; when every criterion ties, the earliest
//! candidate wins, so the same input always yields the same target.

use glam::DVec2;

use rampart_core::enums::TargetPolicy;

/// One enemy as seen by a tower.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<H> {
    pub handle: H,
    pub position: DVec2,
    pub alive: bool,
    pub visible: bool,
    /// Path distance left to the castle.
    pub remaining_distance: f64,
    pub max_health: u32,
}

/// Alive, visible and within `range` of `origin` (inclusive).
pub fn is_eligible<H>(candidate: &Candidate<H>, origin: DVec2, range: f64) -> bool {
    candidate.alive && candidate.visible && candidate.position.distance(origin) <= range
}

/// Pick a target for a tower at `origin` with the given `range`.
pub fn select_target<H: Copy>(
    policy: TargetPolicy,
    origin: DVec2,
    range: f64,
    candidates: &[Candidate<H>],
) -> Option<H> {
    let mut best: Option<&Candidate<H>> = None;
    for candidate in candidates.iter().filter(|c| is_eligible(c, origin, range)) {
        let better = match best {
            None => true,
            Some(current) => ranks_before(policy, candidate, current),
        };
        if better {
            best = Some(candidate);
        }
    }
    best.map(|c| c.handle)
}

/// Strictly better under `policy`; ties keep the incumbent.
fn ranks_before<H>(policy: TargetPolicy, a: &Candidate<H>, b: &Candidate<H>) -> bool {
    match policy {
        TargetPolicy::ClosestToGoal => a.remaining_distance < b.remaining_distance,
        TargetPolicy::HeaviestFirst => {
            a.max_health > b.max_health
                || (a.max_health == b.max_health && a.remaining_distance < b.remaining_distance)
        }
    }
}
