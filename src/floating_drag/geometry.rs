use egui::{Pos2, Rect, Vec2};

use crate::dock_host::Display;

/// Corners in the order top-left, top-right, bottom-left, bottom-right.
pub(super) fn corners(rect: Rect) -> [Pos2; 4] {
    [
        rect.left_top(),
        rect.right_top(),
        rect.left_bottom(),
        rect.right_bottom(),
    ]
}

#[inline]
pub(super) fn manhattan_length(v: Vec2) -> f32 {
    v.x.abs() + v.y.abs()
}

/// `min <= p < max` on both axes, so adjacent strips never share a pixel.
#[inline]
pub(super) fn contains_half_open(rect: Rect, p: Pos2) -> bool {
    rect.min.x <= p.x && p.x < rect.max.x && rect.min.y <= p.y && p.y < rect.max.y
}

/// Signed distance by which `rect` sticks out of `bounds`, per axis.
///
/// Negative when sticking out on the left/top, positive on the right/bottom, zero when inside.
/// The left/top edge takes precedence when `rect` is larger than `bounds`.
pub fn calculate_overhang(bounds: Rect, rect: Rect) -> Vec2 {
    let x = if rect.left() < bounds.left() {
        rect.left() - bounds.left()
    } else if rect.right() > bounds.right() {
        rect.right() - bounds.right()
    } else {
        0.0
    };

    let y = if rect.top() < bounds.top() {
        rect.top() - bounds.top()
    } else if rect.bottom() > bounds.bottom() {
        rect.bottom() - bounds.bottom()
    } else {
        0.0
    };

    Vec2::new(x, y)
}

/// Index of the first display whose rectangle contains the cursor (edges inclusive).
pub fn display_under_cursor(displays: &[Display], cursor: Pos2) -> Option<usize> {
    displays.iter().position(|d| d.rect.contains(cursor))
}

/// The translation that seats `rect` inside `bounds`.
///
/// If `rect` is larger than `bounds` on an axis, its top/left edge is aligned with the bounds.
pub(super) fn translation_into(bounds: Rect, rect: Rect) -> Vec2 {
    let min = bounds.min;
    let max_unclamped = bounds.max - rect.size();
    let max = Pos2::new(max_unclamped.x.max(min.x), max_unclamped.y.max(min.y));
    let target = Pos2::new(
        rect.min.x.clamp(min.x, max.x),
        rect.min.y.clamp(min.y, max.y),
    );
    target - rect.min
}

/// Bounding box of a set of rectangles, `None` when empty.
pub(super) fn bounding_rect(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|a, b| a.union(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn display(x: f32, y: f32, w: f32, h: f32) -> Display {
        let rect = Rect::from_min_size(pos2(x, y), vec2(w, h));
        Display {
            rect,
            available_rect: rect,
        }
    }

    #[test]
    fn overhang_is_zero_inside_bounds() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 800.0));
        let rect = Rect::from_min_size(pos2(10.0, 10.0), vec2(100.0, 100.0));
        assert_eq!(calculate_overhang(bounds, rect), Vec2::ZERO);
    }

    #[test]
    fn overhang_is_signed_per_edge() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 800.0));

        let right_bottom = Rect::from_min_size(pos2(940.0, 750.0), vec2(100.0, 100.0));
        assert_eq!(calculate_overhang(bounds, right_bottom), vec2(40.0, 50.0));

        let left_top = Rect::from_min_size(pos2(-25.0, -5.0), vec2(100.0, 100.0));
        assert_eq!(calculate_overhang(bounds, left_top), vec2(-25.0, -5.0));
    }

    #[test]
    fn display_lookup_includes_far_edges() {
        let displays = [display(0.0, 0.0, 1000.0, 800.0), display(1000.0, 0.0, 800.0, 600.0)];
        assert_eq!(display_under_cursor(&displays, pos2(10.0, 10.0)), Some(0));
        assert_eq!(display_under_cursor(&displays, pos2(1500.0, 10.0)), Some(1));
        assert_eq!(display_under_cursor(&displays, pos2(1800.0, 600.0)), Some(1));
        assert_eq!(display_under_cursor(&displays, pos2(1500.0, 700.0)), None);
        assert_eq!(display_under_cursor(&[], pos2(0.0, 0.0)), None);
    }

    #[test]
    fn translation_into_prefers_top_left_when_too_large() {
        let bounds = Rect::from_min_size(pos2(100.0, 100.0), vec2(200.0, 200.0));

        let inside = Rect::from_min_size(pos2(150.0, 150.0), vec2(50.0, 50.0));
        assert_eq!(translation_into(bounds, inside), Vec2::ZERO);

        let outside = Rect::from_min_size(pos2(400.0, 0.0), vec2(50.0, 50.0));
        assert_eq!(translation_into(bounds, outside), vec2(-150.0, 100.0));

        let huge = Rect::from_min_size(pos2(0.0, 0.0), vec2(500.0, 50.0));
        assert_eq!(translation_into(bounds, huge), vec2(100.0, 100.0));
    }

    #[test]
    fn half_open_containment_excludes_max_edge() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
        assert!(contains_half_open(rect, pos2(0.0, 0.0)));
        assert!(contains_half_open(rect, pos2(9.5, 9.5)));
        assert!(!contains_half_open(rect, pos2(10.0, 5.0)));
        assert!(!contains_half_open(rect, pos2(5.0, 10.0)));
    }
}
