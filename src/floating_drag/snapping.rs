//! Magnetic corner snapping between floating windows.

use std::collections::VecDeque;

use egui::{Pos2, Rect, Vec2};
use itertools::Itertools as _;

use crate::dock_host::ContainerId;

use super::geometry::{corners, manhattan_length};

/// Which corner of the dragged window is tested against which corner of a candidate, per order.
///
/// Corner indices: 0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right.
/// Orders 0..4 pair corners horizontally (side by side), orders 4..8 vertically (stacked).
const DRAGGED_CORNERS: [usize; 8] = [0, 1, 2, 3, 0, 1, 2, 3];
const CANDIDATE_CORNERS: [usize; 8] = [1, 0, 3, 2, 2, 3, 0, 1];

/// A proposed snapped position for the dragged window.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    /// Where the dragged window's top-left corner should go.
    pub top_left: Pos2,

    /// Index into the fixed corner-pair table that produced the snap.
    pub order: u8,

    /// Windows at the winning distance, first-seen first.
    pub candidates: Vec<ContainerId>,

    /// The cursor has moved away from the grabbed point by more than the snap distance, so
    /// `top_left` is the plain cursor-relative position instead of the snapped one.
    pub released: bool,
}

#[derive(Clone, Debug)]
struct SnapCandidate {
    order: u8,
    position: Pos2,
    candidates: Vec<ContainerId>,
}

/// Find the closest corner pair between `dragged` and any of `candidates`.
///
/// Returns `None` if no pair is within `snap_distance`. Candidates are visited in slice order and
/// pairs in table order, so equal distances resolve to the first pair seen.
pub fn try_snap(
    dragged: Rect,
    candidates: &[(ContainerId, Rect)],
    grab_offset: Vec2,
    cursor: Pos2,
    snap_distance: f32,
) -> Option<SnapResult> {
    let dragged_corners = corners(dragged);

    let mut best: Option<SnapCandidate> = None;
    let mut best_distance = f32::INFINITY;

    for &(id, rect) in candidates {
        let candidate_corners = corners(rect);

        for order in 0..8_u8 {
            let dragged_corner = dragged_corners[DRAGGED_CORNERS[order as usize]];
            let target = candidate_corners[CANDIDATE_CORNERS[order as usize]];
            let distance = manhattan_length(dragged_corner - target);
            if distance > snap_distance {
                continue;
            }

            if distance < best_distance {
                best_distance = distance;
                best = Some(SnapCandidate {
                    order,
                    position: target,
                    candidates: vec![id],
                });
            } else if distance == best_distance {
                if let Some(best) = &mut best {
                    best.candidates.push(id);
                }
            }
        }
    }

    let best = best?;
    let size = dragged.size();
    let snapped = match best.order % 4 {
        0 => best.position,
        1 => best.position - Vec2::new(size.x, 0.0),
        2 => best.position - Vec2::new(0.0, size.y),
        _ => best.position - size,
    };

    let grabbed_point = dragged.min + grab_offset;
    let released = manhattan_length(cursor - grabbed_point) > snap_distance;
    let top_left = if released {
        cursor - grab_offset
    } else {
        snapped
    };

    Some(SnapResult {
        top_left,
        order: best.order,
        candidates: best.candidates.into_iter().unique().collect(),
        released,
    })
}

/// Two windows are attached if any corner of one is within `snap_distance` of any corner of the
/// other.
pub fn windows_attached(a: Rect, b: Rect, snap_distance: f32) -> bool {
    corners(a)
        .into_iter()
        .cartesian_product(corners(b))
        .any(|(ca, cb)| manhattan_length(ca - cb) <= snap_distance)
}

/// All windows transitively attached to `seed`, in breadth-first discovery order, `seed` first.
///
/// Returns an empty list if `seed` is not among `windows`.
pub fn query_transitive_group(
    windows: &[(ContainerId, Rect)],
    seed: ContainerId,
    snap_distance: f32,
) -> Vec<ContainerId> {
    let Some(seed_index) = windows.iter().position(|(id, _)| *id == seed) else {
        return Vec::new();
    };

    let mut visited: ahash::HashSet<usize> = ahash::HashSet::default();
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut group: Vec<ContainerId> = Vec::new();

    visited.insert(seed_index);
    queue.push_back(seed_index);

    while let Some(current) = queue.pop_front() {
        let (current_id, current_rect) = windows[current];
        group.push(current_id);

        for (index, &(_, rect)) in windows.iter().enumerate() {
            if windows_attached(current_rect, rect, snap_distance) && visited.insert(index) {
                queue.push_back(index);
            }
        }
    }

    group
}
