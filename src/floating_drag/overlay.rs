use egui::{Pos2, Rect, Vec2};

use crate::dock_host::{AreaId, ContainerId, DockHost, DropTarget};

use super::geometry::contains_half_open;
use super::options::FloatingDragOptions;
use super::zones::{DockZone, SideBarLocation};

/// The five fixed-width detection strips of a drop target.
///
/// ```text
///  +----+--------------+----+
///  |    |     top      |    |
///  +----+--------------+----+
///  |    |    center    |    |
///  |left+--------------+right
///  |    |              |    |
///  |    |   (no zone)  |    |
///  +----+--------------+----+
///  |    |    bottom    |    |
///  +----+--------------+----+
/// ```
///
/// The strip widths do not scale with the target, so the hit area stays the same size on small
/// and large targets alike. The center strip is the title band just below the top strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossRegions {
    pub top: Rect,
    pub right: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub center: Rect,
}

impl CrossRegions {
    pub fn iter(self) -> impl Iterator<Item = (DockZone, Rect)> {
        [
            (DockZone::Top, self.top),
            (DockZone::Right, self.right),
            (DockZone::Bottom, self.bottom),
            (DockZone::Left, self.left),
            (DockZone::Center, self.center),
        ]
        .into_iter()
    }

    pub fn region(self, zone: DockZone) -> Option<Rect> {
        self.iter().find(|(z, _)| *z == zone).map(|(_, r)| r)
    }
}

pub fn cross_regions(target: Rect, strip: f32, title_bar_height: f32) -> CrossRegions {
    let band = (title_bar_height - strip).max(0.0);
    let inner_left = target.left() + strip;
    let inner_right = target.right() - strip;
    let body_top = target.top() + strip;
    let body_bottom = target.bottom() - strip;

    let rect = |min_x: f32, min_y: f32, max_x: f32, max_y: f32| {
        Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
    };

    CrossRegions {
        top: rect(inner_left, target.top(), inner_right, body_top),
        right: rect(inner_right, body_top, target.right(), body_bottom),
        bottom: rect(inner_left, body_bottom, inner_right, target.bottom()),
        left: rect(target.left(), body_top, inner_left, body_bottom),
        center: rect(inner_left, body_top, inner_right, (body_top + band).min(body_bottom)),
    }
}

/// The result of resolving the zone under the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoneHit {
    /// `None` when the cursor is over no allowed zone.
    pub zone: Option<DockZone>,

    /// Tab insertion index when hovering a tab strip.
    pub tab_index: Option<usize>,

    /// The detection region that was hit.
    pub region: Option<Rect>,
}

impl ZoneHit {
    pub fn is_valid(&self) -> bool {
        self.zone.is_some()
    }
}

/// Where in a strip of tabs a new tab would be inserted.
///
/// Compares the cursor against the center of the nearest tab along the strip axis: on its leading
/// half the new tab goes before it, on its trailing half after it.
pub fn tab_insert_index_at(tab_rects: &[Rect], cursor: Pos2, horizontal: bool) -> usize {
    let axis = |p: Pos2| if horizontal { p.x } else { p.y };
    let cursor_t = axis(cursor);

    let nearest = tab_rects
        .iter()
        .enumerate()
        .map(|(i, r)| (i, axis(r.center())))
        .min_by(|a, b| (a.1 - cursor_t).abs().total_cmp(&(b.1 - cursor_t).abs()));

    match nearest {
        Some((i, center)) if cursor_t < center => i,
        Some((i, _center)) => i + 1,
        None => 0,
    }
}

/// Which zone of `target` the cursor is over, filtered by the zones the target allows.
///
/// Areas additionally accept [`DockZone::Center`] over their title bar (tabbing, with an insertion
/// index). Containers additionally expose auto-hide side strips when no other zone was hit.
pub fn zone_under_cursor(
    host: &dyn DockHost,
    target: DropTarget,
    cursor: Pos2,
    options: &FloatingDragOptions,
) -> ZoneHit {
    let Some(target_rect) = target_rect(host, target) else {
        return ZoneHit::default();
    };

    let allowed = host.allowed_zones(target);
    let regions = cross_regions(
        target_rect,
        options.drop_strip_detect_size,
        options.title_bar_height,
    );

    let cross_hit = regions
        .iter()
        .find(|(zone, rect)| allowed.allows(*zone) && contains_half_open(*rect, cursor));

    match target {
        DropTarget::Area(area) => {
            let title_hit = title_bar_tab_hit(host, area, cursor);
            match cross_hit {
                Some((DockZone::Center, region)) => ZoneHit {
                    zone: Some(DockZone::Center),
                    tab_index: title_hit.map(|(_, tab)| tab),
                    region: Some(region),
                },
                Some((zone, region)) => ZoneHit {
                    zone: Some(zone),
                    tab_index: None,
                    region: Some(region),
                },
                None if allowed.allows(DockZone::Center) => match title_hit {
                    Some((title_rect, tab)) => ZoneHit {
                        zone: Some(DockZone::Center),
                        tab_index: Some(tab),
                        region: Some(title_rect),
                    },
                    None => ZoneHit::default(),
                },
                None => ZoneHit::default(),
            }
        }
        DropTarget::Container(container) => {
            if let Some((zone, region)) = cross_hit {
                return ZoneHit {
                    zone: Some(zone),
                    tab_index: None,
                    region: Some(region),
                };
            }
            if !options.auto_hide_enabled {
                return ZoneHit::default();
            }
            auto_hide_zone_under_cursor(host, container, target_rect, cursor, options)
        }
    }
}

fn target_rect(host: &dyn DockHost, target: DropTarget) -> Option<Rect> {
    match target {
        DropTarget::Container(id) => host.container(id).map(|c| c.rect),
        DropTarget::Area(id) => host.area(id).filter(|a| a.visible).map(|a| a.rect),
    }
}

fn title_bar_tab_hit(host: &dyn DockHost, area: AreaId, cursor: Pos2) -> Option<(Rect, usize)> {
    let info = host.area(area)?;
    let title_rect = info.title_bar_rect?;
    if !contains_half_open(title_rect, cursor) {
        return None;
    }
    Some((title_rect, tab_insert_index_at(&info.tab_rects, cursor, true)))
}

/// Width of the strip along a container edge that counts as "over the side bar".
///
/// A visible side bar is its own hit area; otherwise a thin strip along the edge is used.
pub(super) fn side_bar_mouse_zone(
    host: &dyn DockHost,
    container: ContainerId,
    location: SideBarLocation,
    options: &FloatingDragOptions,
) -> f32 {
    match host.side_bar(container, location) {
        Some(bar) if bar.visible => bar.thickness,
        _ => options.auto_hide_mouse_zone,
    }
}

/// Width of the overlay painted for a hovered auto-hide zone.
pub(super) fn side_bar_overlay_size(
    host: &dyn DockHost,
    container: ContainerId,
    location: SideBarLocation,
    options: &FloatingDragOptions,
) -> f32 {
    match host.side_bar(container, location) {
        Some(bar) if bar.visible => bar.thickness,
        _ => options.auto_hide_overlay_size,
    }
}

fn auto_hide_zone_under_cursor(
    host: &dyn DockHost,
    container: ContainerId,
    rect: Rect,
    cursor: Pos2,
    options: &FloatingDragOptions,
) -> ZoneHit {
    if !rect.contains(cursor) {
        return ZoneHit::default();
    }

    for location in SideBarLocation::PROBE_ORDER {
        let width = side_bar_mouse_zone(host, container, location, options);
        let strip = side_strip(rect, location, width);
        if !contains_half_open(strip, cursor) {
            continue;
        }

        let tab_index = host
            .side_bar(container, location)
            .filter(|bar| bar.visible)
            .map(|bar| tab_insert_index_at(&bar.tab_rects, cursor, location.is_horizontal()));

        return ZoneHit {
            zone: Some(location.auto_hide_zone()),
            tab_index,
            region: Some(strip),
        };
    }

    ZoneHit::default()
}

pub(super) fn side_strip(rect: Rect, location: SideBarLocation, width: f32) -> Rect {
    match location {
        SideBarLocation::Left => {
            Rect::from_min_max(rect.left_top(), Pos2::new(rect.left() + width, rect.bottom()))
        }
        SideBarLocation::Right => {
            Rect::from_min_max(Pos2::new(rect.right() - width, rect.top()), rect.right_bottom())
        }
        SideBarLocation::Top => {
            Rect::from_min_max(rect.left_top(), Pos2::new(rect.right(), rect.top() + width))
        }
        SideBarLocation::Bottom => {
            Rect::from_min_max(Pos2::new(rect.left(), rect.bottom() - width), rect.right_bottom())
        }
    }
}

/// The container and (if any) area under the cursor. Topmost container wins.
///
/// Containers without a visible area are skipped: they are either empty or the source of the
/// current drag.
pub fn target_under_cursor(
    host: &dyn DockHost,
    cursor: Pos2,
) -> Option<(ContainerId, Option<AreaId>)> {
    let mut top: Option<(ContainerId, Option<AreaId>)> = None;

    for container in host.containers() {
        let Some(info) = host.container(container) else {
            continue;
        };

        let visible_areas: Vec<(AreaId, Rect)> = host
            .open_areas(container)
            .into_iter()
            .filter_map(|id| {
                let area = host.area(id)?;
                area.visible.then_some((id, area.rect))
            })
            .collect();
        if visible_areas.is_empty() || !info.rect.contains(cursor) {
            continue;
        }

        let area = visible_areas
            .iter()
            .find(|(_, rect)| rect.contains(cursor))
            .map(|(id, _)| *id);

        // Later containers are in front.
        top = Some((container, area));
    }

    top
}

/// The rectangle painted to highlight a hovered zone.
///
/// Directional strips are widened by one strip width so the highlight reads as a band along the
/// edge rather than a sliver. The center highlight frames the whole target.
pub fn highlight_rect(zone: DockZone, region: Rect, target: Rect, strip: f32) -> Rect {
    let s = strip;
    let from =
        |x: f32, y: f32, w: f32, h: f32| Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h));
    match zone {
        DockZone::Top => from(
            region.left() - s,
            region.top(),
            region.width() + s * 2.0,
            region.height() * 2.0,
        ),
        DockZone::Bottom => from(
            region.left() - s,
            region.top() - s,
            region.width() + s * 2.0,
            region.height() + s,
        ),
        DockZone::Left => from(
            region.left(),
            region.top() - s,
            region.width() + s,
            region.height() + s * 2.0,
        ),
        DockZone::Right => from(
            region.left() - s,
            region.top() - s,
            region.width() + s,
            region.height() + s * 2.0,
        ),
        DockZone::Center => from(
            region.left() - s,
            region.top() - s,
            region.width() + s * 2.0,
            target.height(),
        ),
        DockZone::TopAutoHide
        | DockZone::RightAutoHide
        | DockZone::BottomAutoHide
        | DockZone::LeftAutoHide => region,
    }
}
