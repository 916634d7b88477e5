//! Drag engine for docking layouts.
//!
//! [`DockDragController`] runs a floating drag against any layout that implements [`DockHost`]:
//! it resolves the drop zone under the cursor, snaps floating windows to each other, moves
//! attached windows along as a group, and on release issues a single dock or float call.

#![forbid(unsafe_code)]

pub mod dock_host;
pub mod floating_drag;
pub mod simple_host;

pub use dock_host::{
    AreaId, AreaInfo, ContainerId, ContainerInfo, ContentInfo, Display, DockDecision,
    DockFeatures, DockHost, DragContent, DropTarget, PanelId, SideBarInfo,
};
pub use floating_drag::{
    DockDragController, DockZone, DockZones, DragError, DragInput, DragOutcome, DragPhase,
    DragPreview, DropCandidate, FloatingDragOptions, HoveredDropZone, SideBarLocation, SnapGroup,
};
pub use simple_host::{HostCall, SimpleDockHost};
