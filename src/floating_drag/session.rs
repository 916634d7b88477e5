use egui::Vec2;

use crate::dock_host::{AreaId, ContainerId, DockFeatures, DockHost, DragContent};

use super::snap_group::SnapGroup;
use super::types::{DragError, DragPreview, DropCandidate};

/// A visibility change applied to the drag source when the drag started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SourceSideEffect {
    CurrentTabChanged { area: AreaId, previous: Option<usize> },
    TabHidden { area: AreaId, index: usize },
    TabBarHidden { area: AreaId },
    AreaHidden { area: AreaId },
}

impl SourceSideEffect {
    fn revert(self, host: &mut dyn DockHost) {
        match self {
            Self::CurrentTabChanged { area, previous } => {
                if let Some(previous) = previous {
                    host.set_current_tab(area, previous);
                }
            }
            Self::TabHidden { area, index } => host.set_tab_visible(area, index, true),
            Self::TabBarHidden { area } => host.set_tab_bar_visible(area, true),
            Self::AreaHidden { area } => host.set_area_visible(area, true),
        }
    }
}

#[derive(Debug)]
pub(super) struct ActiveDrag {
    pub(super) id: u64,
    pub(super) content: DragContent,
    pub(super) features: DockFeatures,
    pub(super) source_area: Option<AreaId>,
    pub(super) auto_hide_container: Option<ContainerId>,

    /// Set when the drag carries all content of a floating container, i.e. moves that window.
    pub(super) whole_window: Option<ContainerId>,

    pub(super) grab_offset: Vec2,
    pub(super) preview: DragPreview,
    pub(super) drop_candidate: Option<DropCandidate>,
    pub(super) snap_group: Option<SnapGroup>,
    pub(super) current_display: Option<usize>,

    /// The last move snapped the preview to another window.
    pub(super) snapped: bool,

    side_effects: Vec<SourceSideEffect>,
}

impl ActiveDrag {
    pub(super) fn record(&mut self, effect: SourceSideEffect) {
        self.side_effects.push(effect);
    }

    /// Undo the source side effects, most recent first. Calling this again is a no-op.
    pub(super) fn revert_side_effects(&mut self, host: &mut dyn DockHost) {
        for effect in std::mem::take(&mut self.side_effects).into_iter().rev() {
            effect.revert(host);
        }
    }
}

/// Holds the single in-flight drag.
#[derive(Debug, Default)]
pub(super) struct DragSession {
    next_id: u64,
    active: Option<ActiveDrag>,
}

pub(super) struct NewDrag {
    pub(super) content: DragContent,
    pub(super) features: DockFeatures,
    pub(super) source_area: Option<AreaId>,
    pub(super) auto_hide_container: Option<ContainerId>,
    pub(super) whole_window: Option<ContainerId>,
    pub(super) grab_offset: Vec2,
    pub(super) preview: DragPreview,
}

impl DragSession {
    pub(super) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub(super) fn begin(&mut self, new: NewDrag) -> Result<&mut ActiveDrag, DragError> {
        if self.active.is_some() {
            return Err(DragError::AlreadyDragging);
        }

        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);

        let NewDrag {
            content,
            features,
            source_area,
            auto_hide_container,
            whole_window,
            grab_offset,
            preview,
        } = new;

        Ok(self.active.insert(ActiveDrag {
            id,
            content,
            features,
            source_area,
            auto_hide_container,
            whole_window,
            grab_offset,
            preview,
            drop_candidate: None,
            snap_group: None,
            current_display: None,
            snapped: false,
            side_effects: Vec::new(),
        }))
    }

    pub(super) fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut ActiveDrag> {
        self.active.as_mut()
    }

    pub(super) fn end(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock_host::PanelId;
    use egui::Rect;

    fn new_drag() -> NewDrag {
        NewDrag {
            content: DragContent::Panel(PanelId(1)),
            features: DockFeatures::default(),
            source_area: None,
            auto_hide_container: None,
            whole_window: None,
            grab_offset: Vec2::ZERO,
            preview: DragPreview {
                rect: Rect::NOTHING,
                opacity: 1.0,
            },
        }
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut session = DragSession::default();
        let first = session.begin(new_drag()).expect("first drag starts").id;
        assert_eq!(session.begin(new_drag()).err(), Some(DragError::AlreadyDragging));
        assert_eq!(session.active().map(|a| a.id), Some(first));

        let ended = session.end().expect("active drag");
        assert_eq!(ended.id, first);
        assert!(!session.is_active());
        assert!(session.end().is_none());

        let second = session.begin(new_drag()).expect("second drag starts").id;
        assert!(second > first);
    }
}
