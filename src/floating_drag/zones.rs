use bitflags::bitflags;

/// A drop zone a dragged panel can be released into.
///
/// The five cardinal zones split or tabify the target, the four auto-hide zones pin the content
/// into a collapsible side bar of the target container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockZone {
    Top,
    Right,
    Bottom,
    Left,
    Center,
    TopAutoHide,
    RightAutoHide,
    BottomAutoHide,
    LeftAutoHide,
}

impl DockZone {
    pub const CARDINAL: [Self; 5] =
        [Self::Top, Self::Right, Self::Bottom, Self::Left, Self::Center];

    pub fn is_auto_hide(self) -> bool {
        self.side_bar().is_some()
    }

    /// The side bar an auto-hide zone pins into.
    pub fn side_bar(self) -> Option<SideBarLocation> {
        match self {
            Self::TopAutoHide => Some(SideBarLocation::Top),
            Self::RightAutoHide => Some(SideBarLocation::Right),
            Self::BottomAutoHide => Some(SideBarLocation::Bottom),
            Self::LeftAutoHide => Some(SideBarLocation::Left),
            Self::Top | Self::Right | Self::Bottom | Self::Left | Self::Center => None,
        }
    }
}

bitflags! {
    /// A set of [`DockZone`]s, e.g. the zones a target currently accepts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub struct DockZones: u16 {
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const CENTER = 1 << 4;
        const TOP_AUTO_HIDE = 1 << 5;
        const RIGHT_AUTO_HIDE = 1 << 6;
        const BOTTOM_AUTO_HIDE = 1 << 7;
        const LEFT_AUTO_HIDE = 1 << 8;

        /// Top, right, bottom and left: split the target, never tabify into it.
        const OUTER = Self::TOP.bits()
            | Self::RIGHT.bits()
            | Self::BOTTOM.bits()
            | Self::LEFT.bits();

        /// All cardinal zones including [`DockZone::Center`].
        const ALL_DOCK = Self::OUTER.bits() | Self::CENTER.bits();

        const AUTO_HIDE = Self::TOP_AUTO_HIDE.bits()
            | Self::RIGHT_AUTO_HIDE.bits()
            | Self::BOTTOM_AUTO_HIDE.bits()
            | Self::LEFT_AUTO_HIDE.bits();

        const ALL = Self::ALL_DOCK.bits() | Self::AUTO_HIDE.bits();
    }
}

impl DockZones {
    pub const NONE: Self = Self::empty();

    #[inline]
    pub fn allows(self, zone: DockZone) -> bool {
        self.contains(zone.into())
    }
}

impl From<DockZone> for DockZones {
    fn from(zone: DockZone) -> Self {
        match zone {
            DockZone::Top => Self::TOP,
            DockZone::Right => Self::RIGHT,
            DockZone::Bottom => Self::BOTTOM,
            DockZone::Left => Self::LEFT,
            DockZone::Center => Self::CENTER,
            DockZone::TopAutoHide => Self::TOP_AUTO_HIDE,
            DockZone::RightAutoHide => Self::RIGHT_AUTO_HIDE,
            DockZone::BottomAutoHide => Self::BOTTOM_AUTO_HIDE,
            DockZone::LeftAutoHide => Self::LEFT_AUTO_HIDE,
        }
    }
}

impl FromIterator<DockZone> for DockZones {
    fn from_iter<I: IntoIterator<Item = DockZone>>(iter: I) -> Self {
        iter.into_iter().map(Self::from).collect()
    }
}

/// The edge of a container an auto-hide side bar is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SideBarLocation {
    Top,
    Right,
    Bottom,
    Left,
}

impl SideBarLocation {
    /// Side bars are tested in this order; the first strip containing the cursor wins.
    pub const PROBE_ORDER: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    pub fn auto_hide_zone(self) -> DockZone {
        match self {
            Self::Top => DockZone::TopAutoHide,
            Self::Right => DockZone::RightAutoHide,
            Self::Bottom => DockZone::BottomAutoHide,
            Self::Left => DockZone::LeftAutoHide,
        }
    }

    /// Top and bottom bars lay their tabs out horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// The zones an area accepts by default, derived from its structural context.
///
/// - The central area can only be split from the outside (no tabbing into it).
/// - An area inside a floating container only accepts tabbing.
/// - Everything else accepts all cardinal zones.
pub fn default_allowed_zones(is_central_area: bool, container_is_floating: bool) -> DockZones {
    if is_central_area {
        DockZones::OUTER
    } else if container_is_floating {
        DockZones::CENTER
    } else {
        DockZones::ALL_DOCK
    }
}
