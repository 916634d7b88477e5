use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Rect, Vec2};

use crate::dock_host::{
    AreaId, AreaInfo, ContainerId, ContainerInfo, ContentInfo, Display, DockDecision,
    DockFeatures, DockHost, DragContent, DropTarget, PanelId, SideBarInfo,
};
use crate::floating_drag::{DockZones, SideBarLocation, default_allowed_zones};

/// A call the drag engine made into a [`SimpleDockHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    SetCurrentTab { area: AreaId, index: usize },
    SetTabVisible { area: AreaId, index: usize, visible: bool },
    SetTabBarVisible { area: AreaId, visible: bool },
    SetAreaVisible { area: AreaId, visible: bool },
    MoveFloating { container: ContainerId, top_left: Pos2 },
    PerformDrop { content: DragContent, decision: DockDecision },
    CreateFloatingWindow { content: DragContent, rect: Rect },
    TearDownAutoHide { content: DragContent },
    RegisterGlobalIntercept,
    UnregisterGlobalIntercept,
}

#[derive(Clone, Debug)]
struct SimpleContainer {
    rect: Rect,
    is_floating: bool,
    areas: Vec<AreaId>,
}

#[derive(Clone, Debug)]
struct SimpleArea {
    container: ContainerId,
    rect: Rect,
    panels: Vec<PanelId>,
    current_tab: Option<usize>,
    hidden_tabs: BTreeSet<usize>,
    tab_bar_visible: bool,
    visible: bool,
}

/// An in-memory [`DockHost`]: containers, areas and panels as plain rectangles.
///
/// Visibility changes and floating-window moves are applied; drops, new floating windows and
/// auto-hide teardown are only recorded (see [`Self::calls`]). Useful for tests and for driving
/// the drag engine headless.
///
/// Tabs are laid out left to right in a title bar along the top of each area.
#[derive(Clone, Debug)]
pub struct SimpleDockHost {
    /// Height of the title bar of every area.
    pub title_bar_height: f32,

    /// Width of each tab in the title bar.
    pub tab_width: f32,

    next_id: u64,

    /// Back-to-front.
    z_order: Vec<ContainerId>,
    containers: BTreeMap<ContainerId, SimpleContainer>,
    areas: BTreeMap<AreaId, SimpleArea>,
    panel_features: BTreeMap<PanelId, DockFeatures>,
    central_area: Option<AreaId>,
    allowed_zones: ahash::HashMap<DropTarget, DockZones>,
    side_bars: BTreeMap<(ContainerId, SideBarLocation), SideBarInfo>,
    auto_hidden: ahash::HashMap<DragContent, ContainerId>,
    displays: Vec<Display>,
    window_frame_height: f32,

    intercept_registered: bool,
    calls: Vec<HostCall>,
}

impl Default for SimpleDockHost {
    fn default() -> Self {
        Self {
            title_bar_height: 28.0,
            tab_width: 80.0,
            next_id: 1,
            z_order: Vec::new(),
            containers: BTreeMap::new(),
            areas: BTreeMap::new(),
            panel_features: BTreeMap::new(),
            central_area: None,
            allowed_zones: ahash::HashMap::default(),
            side_bars: BTreeMap::new(),
            auto_hidden: ahash::HashMap::default(),
            displays: Vec::new(),
            window_frame_height: 0.0,
            intercept_registered: false,
            calls: Vec::new(),
        }
    }
}

impl SimpleDockHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a container in front of all existing ones.
    #[must_use]
    pub fn add_container(&mut self, rect: Rect, is_floating: bool) -> ContainerId {
        let id = ContainerId(self.next_id());
        self.containers.insert(
            id,
            SimpleContainer {
                rect,
                is_floating,
                areas: Vec::new(),
            },
        );
        self.z_order.push(id);
        id
    }

    /// Add an empty, visible area to `container`. Returns `None` for an unknown container.
    #[must_use]
    pub fn add_area(&mut self, container: ContainerId, rect: Rect) -> Option<AreaId> {
        if !self.containers.contains_key(&container) {
            return None;
        }
        let id = AreaId(self.next_id());
        self.areas.insert(
            id,
            SimpleArea {
                container,
                rect,
                panels: Vec::new(),
                current_tab: None,
                hidden_tabs: BTreeSet::new(),
                tab_bar_visible: true,
                visible: true,
            },
        );
        self.containers.get_mut(&container)?.areas.push(id);
        Some(id)
    }

    /// Add a panel as the last tab of `area`. The first panel becomes the current tab.
    #[must_use]
    pub fn add_panel(&mut self, area: AreaId, features: DockFeatures) -> Option<PanelId> {
        if !self.areas.contains_key(&area) {
            return None;
        }
        let id = PanelId(self.next_id());
        let area = self.areas.get_mut(&area)?;
        area.panels.push(id);
        area.current_tab.get_or_insert(0);
        self.panel_features.insert(id, features);
        Some(id)
    }

    /// The area that gets the "central area" allowed zones.
    pub fn set_central_area(&mut self, area: Option<AreaId>) {
        self.central_area = area;
    }

    /// Override the zones `target` allows.
    pub fn set_allowed_zones(&mut self, target: DropTarget, zones: DockZones) {
        self.allowed_zones.insert(target, zones);
    }

    pub fn set_side_bar(
        &mut self,
        container: ContainerId,
        location: SideBarLocation,
        side_bar: SideBarInfo,
    ) {
        self.side_bars.insert((container, location), side_bar);
    }

    /// Mark `content` as pinned into an auto-hide side bar of `container`.
    pub fn set_auto_hidden(&mut self, content: DragContent, container: ContainerId) {
        self.auto_hidden.insert(content, container);
    }

    pub fn add_display(&mut self, display: Display) {
        self.displays.push(display);
    }

    pub fn set_window_frame_height(&mut self, height: f32) {
        self.window_frame_height = height;
    }

    /// Every mutating call made so far, in order.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn is_intercept_registered(&self) -> bool {
        self.intercept_registered
    }

    /// Number of tabs currently shown in `area`.
    pub fn visible_tab_count(&self, area: AreaId) -> usize {
        self.areas
            .get(&area)
            .map_or(0, |a| a.panels.len() - a.hidden_tabs.len())
    }

    pub fn is_tab_visible(&self, area: AreaId, index: usize) -> bool {
        self.areas
            .get(&area)
            .is_some_and(|a| index < a.panels.len() && !a.hidden_tabs.contains(&index))
    }

    fn panel_area(&self, panel: PanelId) -> Option<AreaId> {
        self.areas
            .iter()
            .find(|(_, area)| area.panels.contains(&panel))
            .map(|(id, _)| *id)
    }

    fn title_bar_rect(&self, area: &SimpleArea) -> Rect {
        Rect::from_min_size(
            area.rect.min,
            Vec2::new(area.rect.width(), self.title_bar_height.min(area.rect.height())),
        )
    }
}

impl DockHost for SimpleDockHost {
    fn containers(&self) -> Vec<ContainerId> {
        self.z_order.clone()
    }

    fn container(&self, id: ContainerId) -> Option<ContainerInfo> {
        self.containers.get(&id).map(|c| ContainerInfo {
            rect: c.rect,
            is_floating: c.is_floating,
        })
    }

    fn open_areas(&self, id: ContainerId) -> Vec<AreaId> {
        self.containers
            .get(&id)
            .map(|c| c.areas.clone())
            .unwrap_or_default()
    }

    fn area(&self, id: AreaId) -> Option<AreaInfo> {
        let area = self.areas.get(&id)?;
        let title_bar_rect = self.title_bar_rect(area);
        let tab_rects = (0..area.panels.len())
            .map(|i| {
                Rect::from_min_size(
                    title_bar_rect.min + Vec2::new(i as f32 * self.tab_width, 0.0),
                    Vec2::new(self.tab_width, title_bar_rect.height()),
                )
            })
            .collect();

        Some(AreaInfo {
            container: area.container,
            rect: area.rect,
            title_bar_rect: area.visible.then_some(title_bar_rect),
            tab_rects,
            panels: area.panels.clone(),
            current_tab: area.current_tab,
            tab_bar_visible: area.tab_bar_visible,
            visible: area.visible,
        })
    }

    fn allowed_zones(&self, target: DropTarget) -> DockZones {
        if let Some(zones) = self.allowed_zones.get(&target) {
            return *zones;
        }
        match target {
            DropTarget::Container(_) => DockZones::OUTER,
            DropTarget::Area(id) => {
                let floating = self
                    .areas
                    .get(&id)
                    .and_then(|a| self.containers.get(&a.container))
                    .is_some_and(|c| c.is_floating);
                default_allowed_zones(self.central_area == Some(id), floating)
            }
        }
    }

    fn side_bar(&self, container: ContainerId, location: SideBarLocation) -> Option<SideBarInfo> {
        self.side_bars.get(&(container, location)).cloned()
    }

    fn content(&self, content: DragContent) -> Option<ContentInfo> {
        let (area, features) = match content {
            DragContent::Panel(panel) => {
                let features = *self.panel_features.get(&panel)?;
                (self.panel_area(panel)?, features)
            }
            DragContent::Area(area) => {
                let panels = &self.areas.get(&area)?.panels;
                let features = DockFeatures {
                    floatable: panels
                        .iter()
                        .all(|p| self.panel_features.get(p).is_some_and(|f| f.floatable)),
                    pinnable: panels
                        .iter()
                        .all(|p| self.panel_features.get(p).is_some_and(|f| f.pinnable)),
                };
                (area, features)
            }
        };

        Some(ContentInfo {
            rect: self.areas.get(&area)?.rect,
            features,
            area: Some(area),
            auto_hide_container: self.auto_hidden.get(&content).copied(),
        })
    }

    fn displays(&self) -> Vec<Display> {
        self.displays.clone()
    }

    fn window_frame_height(&self) -> f32 {
        self.window_frame_height
    }

    fn set_current_tab(&mut self, area: AreaId, index: usize) {
        self.calls.push(HostCall::SetCurrentTab { area, index });
        if let Some(area) = self.areas.get_mut(&area) {
            if index < area.panels.len() {
                area.current_tab = Some(index);
            }
        }
    }

    fn set_tab_visible(&mut self, area: AreaId, index: usize, visible: bool) {
        self.calls.push(HostCall::SetTabVisible { area, index, visible });
        if let Some(area) = self.areas.get_mut(&area) {
            if visible {
                area.hidden_tabs.remove(&index);
            } else if index < area.panels.len() {
                area.hidden_tabs.insert(index);
            }
        }
    }

    fn set_tab_bar_visible(&mut self, area: AreaId, visible: bool) {
        self.calls.push(HostCall::SetTabBarVisible { area, visible });
        if let Some(area) = self.areas.get_mut(&area) {
            area.tab_bar_visible = visible;
        }
    }

    fn set_area_visible(&mut self, area: AreaId, visible: bool) {
        self.calls.push(HostCall::SetAreaVisible { area, visible });
        if let Some(area) = self.areas.get_mut(&area) {
            area.visible = visible;
        }
    }

    fn move_floating(&mut self, container: ContainerId, top_left: Pos2) {
        self.calls.push(HostCall::MoveFloating {
            container,
            top_left,
        });
        let Some(c) = self.containers.get_mut(&container) else {
            return;
        };
        let delta = top_left - c.rect.min;
        c.rect = c.rect.translate(delta);
        for id in &c.areas {
            if let Some(area) = self.areas.get_mut(id) {
                area.rect = area.rect.translate(delta);
            }
        }
    }

    fn perform_drop(&mut self, content: DragContent, decision: &DockDecision) {
        self.calls.push(HostCall::PerformDrop {
            content,
            decision: *decision,
        });
    }

    fn create_floating_window(&mut self, content: DragContent, rect: Rect) {
        self.calls.push(HostCall::CreateFloatingWindow { content, rect });
    }

    fn tear_down_auto_hide(&mut self, content: DragContent) {
        self.calls.push(HostCall::TearDownAutoHide { content });
        self.auto_hidden.remove(&content);
    }

    fn register_global_intercept(&mut self) {
        self.calls.push(HostCall::RegisterGlobalIntercept);
        self.intercept_registered = true;
    }

    fn unregister_global_intercept(&mut self) {
        self.calls.push(HostCall::UnregisterGlobalIntercept);
        self.intercept_registered = false;
    }
}
