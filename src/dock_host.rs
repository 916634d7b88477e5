use egui::{Pos2, Rect};

use crate::floating_drag::{DockZone, DockZones, SideBarLocation};

/// Identifies a dock container (the main dock or a floating window).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ContainerId(pub u64);

/// Identifies a dock area: a leaf region holding a stack of tabbed panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AreaId(pub u64);

/// Identifies a single dockable panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelId(pub u64);

/// What is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragContent {
    /// A single panel (usually torn off by its tab).
    Panel(PanelId),

    /// A whole area with all of its tabs (usually dragged by its title bar).
    Area(AreaId),
}

/// Something the resolver can query drop zones for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Container(ContainerId),
    Area(AreaId),
}

/// Capabilities of the dragged content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DockFeatures {
    /// May be released as a new floating window.
    pub floatable: bool,

    /// May be pinned into an auto-hide side bar.
    pub pinnable: bool,
}

impl Default for DockFeatures {
    fn default() -> Self {
        Self {
            floatable: true,
            pinnable: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerInfo {
    pub rect: Rect,
    pub is_floating: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaInfo {
    pub container: ContainerId,
    pub rect: Rect,

    /// `None` while the title bar is hidden.
    pub title_bar_rect: Option<Rect>,

    /// Tab rectangles in the title bar, in tab order.
    pub tab_rects: Vec<Rect>,

    pub panels: Vec<PanelId>,
    pub current_tab: Option<usize>,
    pub tab_bar_visible: bool,
    pub visible: bool,
}

impl AreaInfo {
    pub fn tab_count(&self) -> usize {
        self.panels.len()
    }
}

/// Geometry and state of an auto-hide side bar.
#[derive(Clone, Debug, PartialEq)]
pub struct SideBarInfo {
    pub visible: bool,

    /// Height for top/bottom bars, width for left/right bars.
    pub thickness: f32,

    pub tab_rects: Vec<Rect>,
}

/// Capability data of a piece of draggable content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentInfo {
    /// Current on-screen rectangle of the content.
    pub rect: Rect,

    pub features: DockFeatures,

    /// The area the content lives in (the area itself for [`DragContent::Area`]).
    pub area: Option<AreaId>,

    /// Set while the content is pinned into an auto-hide side bar of this container.
    pub auto_hide_container: Option<ContainerId>,
}

/// A physical display.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Display {
    pub rect: Rect,

    /// `rect` minus task bars, docks and other reserved space.
    pub available_rect: Rect,
}

/// The drop decision issued once, when a drag is released over a valid zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DockDecision {
    pub container: ContainerId,
    pub zone: DockZone,

    /// The area to split or tabify into. `None` means "relative to the whole container".
    pub area: Option<AreaId>,

    /// Where to insert the tab. `None` appends.
    pub tab_index: Option<usize>,
}

/// The container-management layer the drag engine runs against.
///
/// The engine only *reads* geometry through this trait while a drag is in flight. It mutates
/// through it in two ways:
/// - transient visibility changes of the drag source (reverted on cancel and on finish),
/// - exactly one structural call on finish ([`Self::perform_drop`] or
///   [`Self::create_floating_window`]), plus moving attached floating windows along.
///
/// All coordinates are global (desktop) points.
pub trait DockHost {
    /// All open containers, back-to-front.
    fn containers(&self) -> Vec<ContainerId>;

    fn container(&self, id: ContainerId) -> Option<ContainerInfo>;

    fn open_areas(&self, id: ContainerId) -> Vec<AreaId>;

    fn area(&self, id: AreaId) -> Option<AreaInfo>;

    /// Zones the target currently accepts. See [`crate::floating_drag::default_allowed_zones`].
    fn allowed_zones(&self, target: DropTarget) -> DockZones;

    fn side_bar(&self, container: ContainerId, location: SideBarLocation) -> Option<SideBarInfo>;

    fn content(&self, content: DragContent) -> Option<ContentInfo>;

    fn displays(&self) -> Vec<Display>;

    /// Height of the OS title bar a real floating window gets, in points.
    fn window_frame_height(&self) -> f32 {
        0.0
    }

    /// Floating containers with their rectangles, back-to-front.
    fn floating_containers(&self) -> Vec<(ContainerId, Rect)> {
        self.containers()
            .into_iter()
            .filter_map(|id| {
                let info = self.container(id)?;
                info.is_floating.then_some((id, info.rect))
            })
            .collect()
    }

    fn set_current_tab(&mut self, area: AreaId, index: usize);

    fn set_tab_visible(&mut self, area: AreaId, index: usize, visible: bool);

    fn set_tab_bar_visible(&mut self, area: AreaId, visible: bool);

    fn set_area_visible(&mut self, area: AreaId, visible: bool);

    fn move_floating(&mut self, container: ContainerId, top_left: Pos2);

    fn perform_drop(&mut self, content: DragContent, decision: &DockDecision);

    fn create_floating_window(&mut self, content: DragContent, rect: Rect);

    /// The drop moved the content out of its auto-hide side bar.
    fn tear_down_auto_hide(&mut self, content: DragContent);

    /// Start routing Escape, secondary clicks and pointer moves to the drag, application wide.
    fn register_global_intercept(&mut self);

    fn unregister_global_intercept(&mut self);
}
