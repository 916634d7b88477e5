use std::collections::VecDeque;

use egui::{Pos2, Rect, Vec2};

use crate::dock_host::{
    AreaId, ContainerId, ContentInfo, DockDecision, DockFeatures, DockHost, DragContent,
    DropTarget,
};

mod debug;
mod geometry;
mod integrity;
mod intercept;
mod options;
mod overlay;
mod overlay_state;
mod session;
mod snap_group;
mod snapping;
mod types;
mod zones;

#[cfg(test)]
mod controller_tests;

pub use geometry::{calculate_overhang, display_under_cursor};
pub use integrity::host_integrity_issues;
pub use intercept::DragInput;
pub use options::FloatingDragOptions;
pub use overlay::{
    CrossRegions, ZoneHit, cross_regions, highlight_rect, tab_insert_index_at, target_under_cursor,
    zone_under_cursor,
};
pub use overlay_state::HoveredDropZone;
pub use snap_group::{SnapGroup, SnapGroupMember, move_group, relocate_to_display};
pub use snapping::{SnapResult, query_transitive_group, try_snap, windows_attached};
pub use types::{DragError, DragOutcome, DragPhase, DragPreview, DropCandidate};
pub use zones::{DockZone, DockZones, SideBarLocation, default_allowed_zones};

use intercept::InputIntercept;
use overlay_state::OverlayState;
use session::{ActiveDrag, DragSession, NewDrag, SourceSideEffect};

/// Drives a floating drag: a preview window follows the pointer, snaps to nearby floating
/// windows, and on release either docks the content into the zone under the cursor or turns it
/// into a new floating window.
///
/// The controller never changes the layout itself. It reads geometry from a [`DockHost`] and
/// issues exactly one structural call when the drag finishes:
/// - [`DockHost::perform_drop`] when released over a valid zone,
/// - [`DockHost::create_floating_window`] when released elsewhere (if the content may float).
///
/// Typical use:
/// - [`Self::start_floating`] when a tab or title bar is dragged out,
/// - [`Self::handle_input`] for every pointer move, release, Escape, secondary click and focus
///   loss while [`Self::is_dragging`].
#[derive(Debug, Default)]
pub struct DockDragController {
    pub options: FloatingDragOptions,

    session: DragSession,
    overlay: OverlayState,
    intercept: InputIntercept,
    phase: DragPhase,
    last_outcome: Option<DragOutcome>,

    debug_log: VecDeque<String>,
    debug_drag_serial: u64,
    debug_last_integrity_hash: u64,
}

impl DockDragController {
    pub fn new(options: FloatingDragOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// `true` if the last drag was canceled (until the next drag starts).
    pub fn is_canceled(&self) -> bool {
        self.phase == DragPhase::Canceled
    }

    pub fn preview(&self) -> Option<DragPreview> {
        self.session.active().map(|drag| drag.preview)
    }

    /// What the cursor was over at the last move.
    pub fn drop_candidate(&self) -> Option<DropCandidate> {
        self.session.active().and_then(|drag| drag.drop_candidate)
    }

    /// The zone to highlight, if any.
    pub fn hovered_zone(&self) -> Option<HoveredDropZone> {
        self.overlay.hovered()
    }

    pub fn snap_group(&self) -> Option<&SnapGroup> {
        self.session.active().and_then(|drag| drag.snap_group.as_ref())
    }

    pub fn last_outcome(&self) -> Option<DragOutcome> {
        self.last_outcome
    }

    /// Whether the application-wide input intercept is currently registered.
    pub fn is_intercepting_input(&self) -> bool {
        self.intercept.is_installed()
    }

    /// Start dragging `content`, grabbed at `cursor`, with a preview of `preview_size`.
    ///
    /// Hides the drag source (the dragged tab, or the whole source area) until the drag ends, and
    /// captures the floating windows attached to the dragged one if the drag moves a whole
    /// floating window.
    ///
    /// # Errors
    ///
    /// [`DragError::AlreadyDragging`] if a drag is in progress, [`DragError::UnknownContent`] if
    /// the host does not know `content`.
    pub fn start_floating(
        &mut self,
        host: &mut dyn DockHost,
        content: DragContent,
        cursor: Pos2,
        preview_size: Vec2,
    ) -> Result<(), DragError> {
        if self.session.is_active() {
            return Err(DragError::AlreadyDragging);
        }
        let info = host
            .content(content)
            .ok_or(DragError::UnknownContent(content))?;

        let whole_window = whole_window_container(host, content, &info);
        let grab_offset = cursor - info.rect.min;

        let drag = self.session.begin(NewDrag {
            content,
            features: info.features,
            source_area: info.area,
            auto_hide_container: info.auto_hide_container,
            whole_window,
            grab_offset,
            preview: DragPreview {
                rect: Rect::from_min_size(info.rect.min, preview_size),
                opacity: 1.0,
            },
        })?;
        let drag_id = drag.id;

        hide_drag_source(host, drag, content);

        if let Some(container) = whole_window.filter(|_| self.options.snapping_enabled) {
            let windows = host.floating_containers();
            let attached = query_transitive_group(&windows, container, self.options.snap_distance);
            drag.snap_group = SnapGroup::capture(
                attached
                    .iter()
                    .filter_map(|id| windows.iter().find(|(w, _)| w == id).copied()),
            );
        }
        drag.current_display = display_under_cursor(&host.displays(), cursor);
        let group_len = drag.snap_group.as_ref().map_or(0, SnapGroup::len);

        self.intercept.install(host);
        self.phase = DragPhase::Dragging;
        self.last_outcome = None;
        self.overlay.hide();
        self.debug_drag_serial = drag_id;

        log::debug!(
            "drag {drag_id} started: {content:?} whole_window={whole_window:?} group={group_len}"
        );
        self.debug_log_event(format!(
            "start content={content:?} cursor={cursor:?} grab_offset={grab_offset:?} \
             whole_window={whole_window:?} group={group_len}"
        ));

        self.update_drag(host, cursor)?;
        self.debug_check_integrity(host);
        Ok(())
    }

    /// Move the preview to follow `cursor`: snap to a nearby floating window if one is close
    /// enough, otherwise follow the cursor and resolve the drop zone under it.
    ///
    /// # Errors
    ///
    /// [`DragError::NotDragging`] if no drag is in progress.
    pub fn move_floating(
        &mut self,
        host: &mut dyn DockHost,
        cursor: Pos2,
    ) -> Result<(), DragError> {
        self.update_drag(host, cursor)
    }

    /// Abort the drag and put everything back the way it was.
    ///
    /// Returns `false` (and does nothing) if no drag is in progress.
    pub fn cancel_dragging(&mut self, host: &mut dyn DockHost) -> bool {
        let Some(mut drag) = self.session.end() else {
            return false;
        };

        drag.revert_side_effects(host);
        if let Some(group) = &mut drag.snap_group {
            group.restore_origins();
            move_group_members(host, group, drag.whole_window);
        }

        self.overlay.hide();
        self.intercept.uninstall(host);
        self.phase = DragPhase::Canceled;
        self.last_outcome = Some(DragOutcome::Canceled);

        log::debug!("drag {} canceled", drag.id);
        self.debug_log_event("cancel");
        self.debug_check_integrity(host);
        true
    }

    /// Release the drag at `cursor`.
    ///
    /// The preview is first moved to `cursor` as by [`Self::move_floating`], so the release point
    /// decides the outcome: a snapped preview floats where it snapped, otherwise the content docks
    /// into the zone under the cursor, or floats at the preview rectangle.
    ///
    /// # Errors
    ///
    /// [`DragError::NotDragging`] if no drag is in progress.
    pub fn finish_dragging(
        &mut self,
        host: &mut dyn DockHost,
        cursor: Pos2,
    ) -> Result<DragOutcome, DragError> {
        // Resolved while the source is still hidden, so a window never targets itself.
        self.update_drag(host, cursor)?;
        let Some(mut drag) = self.session.end() else {
            return Err(DragError::NotDragging);
        };
        let candidate = drag.drop_candidate;

        drag.revert_side_effects(host);

        let decision = candidate.and_then(|candidate| {
            let zone = candidate.zone?;
            Some(DockDecision {
                container: candidate.container,
                zone,
                area: candidate.area,
                tab_index: candidate.tab_index,
            })
        });

        if let Some(owner) = drag.auto_hide_container {
            let stays_in_side_bar = decision
                .is_some_and(|d| d.zone.is_auto_hide() && d.container == owner);
            if (decision.is_some() || drag.features.floatable) && !stays_in_side_bar {
                host.tear_down_auto_hide(drag.content);
            }
        }

        let outcome = match decision {
            Some(mut decision) => {
                if decision.area.is_none() && decision.zone == DockZone::Center {
                    let areas = visible_open_areas(host, decision.container);
                    if areas.len() <= 1 {
                        decision.area = areas.first().map(|(id, _)| *id);
                    }
                }
                host.perform_drop(drag.content, &decision);
                DragOutcome::Docked(decision)
            }
            None if drag.features.floatable => {
                let mut rect = drag.preview.rect;
                if !self.options.drag_preview_has_window_frame {
                    rect.min.y += host.window_frame_height();
                }
                host.create_floating_window(drag.content, rect);
                DragOutcome::Floated { rect }
            }
            None => DragOutcome::Aborted,
        };

        self.overlay.hide();
        self.intercept.uninstall(host);
        self.phase = match outcome {
            DragOutcome::Docked(_) => DragPhase::Docked,
            DragOutcome::Floated { .. } => DragPhase::Floated,
            DragOutcome::Aborted => DragPhase::Idle,
            DragOutcome::Canceled => DragPhase::Canceled,
        };
        self.last_outcome = Some(outcome);

        log::debug!("drag {} finished: {outcome:?}", drag.id);
        self.debug_log_event(format!("finish cursor={cursor:?} outcome={outcome:?}"));
        self.debug_check_integrity(host);
        Ok(outcome)
    }

    /// Route one intercepted input event to the drag.
    ///
    /// Returns the outcome if the event ended the drag. Events arriving while idle are ignored.
    pub fn handle_input(
        &mut self,
        host: &mut dyn DockHost,
        input: DragInput,
    ) -> Option<DragOutcome> {
        if !self.session.is_active() {
            return None;
        }

        match input {
            _ if input.cancels() => {
                self.debug_log_event(format!("cancel input={input:?}"));
                self.cancel_dragging(host).then_some(DragOutcome::Canceled)
            }
            DragInput::PointerMoved(cursor) => {
                self.update_drag(host, cursor).ok();
                None
            }
            DragInput::PrimaryReleased(cursor) => self.finish_dragging(host, cursor).ok(),
            _ => None,
        }
    }

    fn update_drag(&mut self, host: &mut dyn DockHost, cursor: Pos2) -> Result<(), DragError> {
        let Self {
            options,
            session,
            overlay,
            ..
        } = self;
        let Some(drag) = session.active_mut() else {
            return Err(DragError::NotDragging);
        };

        let snap = if options.snapping_enabled {
            let candidates: Vec<(ContainerId, Rect)> = host
                .floating_containers()
                .into_iter()
                .filter(|(id, _)| {
                    Some(*id) != drag.whole_window
                        && !drag.snap_group.as_ref().is_some_and(|g| g.contains(*id))
                })
                .collect();
            try_snap(
                drag.preview.rect,
                &candidates,
                drag.grab_offset,
                cursor,
                options.snap_distance,
            )
        } else {
            None
        };
        let snapped = snap.as_ref().is_some_and(|s| !s.released);
        let top_left = snap
            .as_ref()
            .map_or(cursor - drag.grab_offset, |s| s.top_left);
        if let Some(snap) = snap.as_ref().filter(|_| snapped) {
            log::trace!("snap order={} to {:?}", snap.order, snap.candidates);
        }

        let delta = top_left - drag.preview.rect.min;
        let displays = host.displays();
        let display = display_under_cursor(&displays, cursor);

        let applied = match &mut drag.snap_group {
            Some(group) => {
                let changed_display = match (drag.current_display, display) {
                    (Some(prev), Some(now)) => prev != now,
                    _ => false,
                };
                let applied = if changed_display {
                    let moved = move_group(group, delta, None);
                    let available = display.map(|i| displays[i].available_rect);
                    moved + available.map_or(Vec2::ZERO, |r| relocate_to_display(group, r))
                } else {
                    let bounds = display.map(|i| displays[i].available_rect);
                    move_group(group, delta, bounds)
                };
                move_group_members(host, group, drag.whole_window);
                applied
            }
            None => delta,
        };
        drag.preview.rect = drag.preview.rect.translate(applied);
        if display.is_some() {
            drag.current_display = display;
        }
        drag.snapped = snapped;

        let hovered = if snapped {
            drag.drop_candidate = None;
            None
        } else {
            let resolved = resolve_drop(host, cursor, drag.features, options);
            drag.drop_candidate = resolved.map(|(candidate, _)| candidate);
            resolved.and_then(|(_, hovered)| hovered)
        };

        drag.preview.opacity = options.preview_opacity(hovered.is_some());
        match hovered {
            Some(hovered) => {
                if overlay.show(hovered) {
                    log::trace!("hover {:?} {:?}", hovered.target, hovered.zone);
                }
            }
            None => {
                overlay.hide();
            }
        }

        log::trace!("move cursor={cursor:?} preview={:?}", drag.preview.rect);
        Ok(())
    }
}

/// The floating container the drag moves as a whole, if the content is all that container
/// holds.
fn whole_window_container(
    host: &dyn DockHost,
    content: DragContent,
    info: &ContentInfo,
) -> Option<ContainerId> {
    if info.auto_hide_container.is_some() {
        return None;
    }
    let area = host.area(info.area?)?;
    let container = host.container(area.container)?;
    if !container.is_floating {
        return None;
    }

    let takes_area = match content {
        DragContent::Area(_) => true,
        DragContent::Panel(_) => area.tab_count() == 1,
    };
    let only_area = visible_open_areas(host, area.container).len() == 1;
    (takes_area && only_area).then_some(area.container)
}

/// Hide what is being dragged so the source does not look duplicated.
///
/// A tab of a multi-tab area is hidden and a sibling becomes current; the tab bar goes too if
/// only one tab would be left. Anything else hides its whole area.
fn hide_drag_source(host: &mut dyn DockHost, drag: &mut ActiveDrag, content: DragContent) {
    let Some(area) = drag.source_area else {
        return;
    };
    let Some(area_info) = host.area(area) else {
        return;
    };

    let tab = match content {
        DragContent::Panel(panel) => area_info.panels.iter().position(|p| *p == panel),
        DragContent::Area(_) => None,
    };

    match tab {
        Some(index) if area_info.tab_count() > 1 => {
            let sibling = if index == 0 { 1 } else { index - 1 };
            drag.record(SourceSideEffect::CurrentTabChanged {
                area,
                previous: area_info.current_tab,
            });
            host.set_current_tab(area, sibling);

            drag.record(SourceSideEffect::TabHidden { area, index });
            host.set_tab_visible(area, index, false);

            if area_info.tab_count() <= 2 {
                drag.record(SourceSideEffect::TabBarHidden { area });
                host.set_tab_bar_visible(area, false);
            }
        }
        _ => {
            drag.record(SourceSideEffect::AreaHidden { area });
            host.set_area_visible(area, false);
        }
    }
}

fn visible_open_areas(host: &dyn DockHost, container: ContainerId) -> Vec<(AreaId, Rect)> {
    host.open_areas(container)
        .into_iter()
        .filter_map(|id| {
            let area = host.area(id)?;
            area.visible.then_some((id, area.rect))
        })
        .collect()
}

fn move_group_members(host: &mut dyn DockHost, group: &SnapGroup, skip: Option<ContainerId>) {
    for member in group.members() {
        if Some(member.container) != skip {
            host.move_floating(member.container, member.rect.min);
        }
    }
}

/// Resolve the drop target and zone under `cursor`.
///
/// The area under the cursor is asked first, then its container. Auto-hide zones are dropped for
/// content that may not be pinned.
fn resolve_drop(
    host: &dyn DockHost,
    cursor: Pos2,
    features: DockFeatures,
    options: &FloatingDragOptions,
) -> Option<(DropCandidate, Option<HoveredDropZone>)> {
    let (container, area) = target_under_cursor(host, cursor)?;

    let usable = |hit: &ZoneHit| match hit.zone {
        Some(zone) => !zone.is_auto_hide() || features.pinnable,
        None => false,
    };

    let hit_on = |target: DropTarget| {
        Some((target, zone_under_cursor(host, target, cursor, options)))
            .filter(|(_, hit)| usable(hit))
    };
    let area_hit = area.and_then(|area| hit_on(DropTarget::Area(area)));
    let container_hit = || hit_on(DropTarget::Container(container));

    let Some((target, hit)) = area_hit.or_else(container_hit) else {
        return Some((
            DropCandidate {
                container,
                area,
                zone: None,
                tab_index: None,
            },
            None,
        ));
    };

    let candidate = DropCandidate {
        container,
        area: match target {
            DropTarget::Area(area) => Some(area),
            DropTarget::Container(_) => None,
        },
        zone: hit.zone,
        tab_index: hit.tab_index,
    };

    let hovered = hit.zone.zip(hit.region).and_then(|(zone, region)| {
        let target_rect = match target {
            DropTarget::Area(area) => host.area(area)?.rect,
            DropTarget::Container(container) => host.container(container)?.rect,
        };
        let highlight_rect = match zone.side_bar() {
            Some(location) => overlay::side_strip(
                target_rect,
                location,
                overlay::side_bar_overlay_size(host, container, location, options),
            ),
            None => highlight_rect(zone, region, target_rect, options.drop_strip_detect_size),
        };
        Some(HoveredDropZone {
            target,
            zone,
            highlight_rect,
        })
    });

    Some((candidate, hovered))
}
