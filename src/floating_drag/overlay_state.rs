use egui::Rect;

use crate::dock_host::DropTarget;

use super::zones::DockZone;

/// The zone currently highlighted for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoveredDropZone {
    pub target: DropTarget,
    pub zone: DockZone,

    /// Where to paint the highlight, in global points.
    pub highlight_rect: Rect,
}

/// Advisory hover state. The drop decision never reads it; finish re-resolves at the release point.
#[derive(Debug, Default)]
pub(super) struct OverlayState {
    hovered: Option<HoveredDropZone>,
}

impl OverlayState {
    /// Returns `true` if the hovered zone changed.
    pub(super) fn show(&mut self, hovered: HoveredDropZone) -> bool {
        let changed = self.hovered != Some(hovered);
        self.hovered = Some(hovered);
        changed
    }

    /// Returns `true` if something was hovered before.
    pub(super) fn hide(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub(super) fn hovered(&self) -> Option<HoveredDropZone> {
        self.hovered
    }
}
