use egui::{Rangef, Rect, Vec2};

use crate::dock_host::ContainerId;

use super::geometry::{bounding_rect, calculate_overhang, translation_into};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapGroupMember {
    pub container: ContainerId,

    /// Rectangle captured when the group was formed.
    pub origin: Rect,

    /// Rectangle after all group moves so far.
    pub rect: Rect,
}

/// Floating windows that move rigidly together during one drag gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapGroup {
    members: Vec<SnapGroupMember>,
}

impl SnapGroup {
    /// Capture a group from `(container, rect)` pairs.
    ///
    /// Returns `None` for fewer than two members: a lone window is not a group.
    pub fn capture(members: impl IntoIterator<Item = (ContainerId, Rect)>) -> Option<Self> {
        let members: Vec<SnapGroupMember> = members
            .into_iter()
            .map(|(container, rect)| SnapGroupMember {
                container,
                origin: rect,
                rect,
            })
            .collect();
        (members.len() > 1).then_some(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, container: ContainerId) -> bool {
        self.members.iter().any(|m| m.container == container)
    }

    pub fn members(&self) -> &[SnapGroupMember] {
        &self.members
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        bounding_rect(self.members.iter().map(|m| m.rect))
    }

    fn translate(&mut self, delta: Vec2) {
        for member in &mut self.members {
            member.rect = member.rect.translate(delta);
        }
    }

    /// Move every member back to where it was when the group was captured.
    pub fn restore_origins(&mut self) {
        for member in &mut self.members {
            member.rect = member.origin;
        }
    }
}

/// Translate the group by `delta`, keeping it from drifting out of `bounds`.
///
/// Per axis, using the overhang of the translated bounding box:
/// - no overhang: the delta is applied as is,
/// - overhang, but the motion points back toward `bounds`: applied as is, so a group that is
///   already partially off-screen can be pulled back,
/// - otherwise `delta - overhang`: the group is reseated at the boundary.
///
/// A group larger than `bounds` on an axis always overhangs there. It only moves as far as the
/// edge it moves toward stays within (or reaches) `bounds`, so neither side sticks out further.
///
/// Returns the delta that was actually applied.
pub fn move_group(group: &mut SnapGroup, delta: Vec2, bounds: Option<Rect>) -> Vec2 {
    let applied = match (bounds, group.bounding_rect()) {
        (Some(bounds), Some(bbox)) => {
            let overhang = calculate_overhang(bounds, bbox.translate(delta));
            Vec2::new(
                clamp_axis(delta.x, overhang.x, bbox.x_range(), bounds.x_range()),
                clamp_axis(delta.y, overhang.y, bbox.y_range(), bounds.y_range()),
            )
        }
        _ => delta,
    };

    group.translate(applied);
    applied
}

fn clamp_axis(delta: f32, overhang: f32, span: Rangef, bounds: Rangef) -> f32 {
    if span.span() > bounds.span() {
        return if delta > 0.0 {
            delta.min((bounds.max - span.max).max(0.0))
        } else {
            delta.max((bounds.min - span.min).min(0.0))
        };
    }

    let toward_bounds = overhang != 0.0 && delta != 0.0 && delta.signum() != overhang.signum();
    if overhang == 0.0 || toward_bounds {
        delta
    } else {
        delta - overhang
    }
}

/// Shift the whole group onto another display, seating its bounding box inside `available`.
///
/// Returns the applied translation.
pub fn relocate_to_display(group: &mut SnapGroup, available: Rect) -> Vec2 {
    let Some(bbox) = group.bounding_rect() else {
        return Vec2::ZERO;
    };
    let delta = translation_into(available, bbox);
    group.translate(delta);
    delta
}
