use egui::Rect;

use crate::dock_host::{AreaId, ContainerId, DockDecision, DragContent};

use super::zones::DockZone;

/// Lifecycle of the drag controller.
///
/// `Docked`, `Floated` and `Canceled` describe how the last drag ended; a new drag may start from
/// any of them just like from `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Docked,
    Floated,
    Canceled,
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// Released over a valid zone; [`crate::DockHost::perform_drop`] was issued.
    Docked(DockDecision),

    /// Released outside any zone; [`crate::DockHost::create_floating_window`] was issued.
    Floated { rect: Rect },

    /// Released outside any zone, but the content may not float. Nothing changed.
    Aborted,

    /// Escape, secondary click or focus loss. Nothing changed.
    Canceled,
}

/// The preview window that follows the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPreview {
    pub rect: Rect,

    /// Advisory: translucent while hovering a valid dock zone.
    pub opacity: f32,
}

/// What the cursor is currently over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropCandidate {
    pub container: ContainerId,
    pub area: Option<AreaId>,
    pub zone: Option<DockZone>,
    pub tab_index: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragError {
    /// A drag is already in progress; only one may exist at a time.
    AlreadyDragging,

    /// The operation requires an active drag.
    NotDragging,

    /// The host does not know the content.
    UnknownContent(DragContent),
}

impl std::fmt::Display for DragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDragging => write!(f, "a drag is already in progress"),
            Self::NotDragging => write!(f, "no drag in progress"),
            Self::UnknownContent(content) => write!(f, "unknown drag content: {content:?}"),
        }
    }
}

impl std::error::Error for DragError {}
