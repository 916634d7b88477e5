/// Options for [`super::DockDragController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FloatingDragOptions {
    /// If true, a dragged floating window magnetically snaps to nearby floating windows, and
    /// windows attached to it move along.
    pub snapping_enabled: bool,

    /// Corner-to-corner Manhattan distance (in points) within which windows snap.
    ///
    /// The same distance decides whether two floating windows count as attached when building
    /// the snap group, so "snaps to" and "moves along with" always agree.
    pub snap_distance: f32,

    /// Width (in points) of the fixed detection strips along the edges of a drop target.
    pub drop_strip_detect_size: f32,

    /// Height (in points) of an area's title bar. The center detection band spans the part of
    /// the title bar below the top strip.
    pub title_bar_height: f32,

    /// If true, dropping onto the edges of a container pins the content into an auto-hide
    /// side bar.
    pub auto_hide_enabled: bool,

    /// Width (in points) of the edge strip that targets a side bar that is not visible yet.
    pub auto_hide_mouse_zone: f32,

    /// Width (in points) of the highlight painted for a hovered side bar that is not visible yet.
    pub auto_hide_overlay_size: f32,

    /// Preview opacity while it hovers a valid dock zone.
    pub hovered_opacity: f32,

    /// Whether the drag preview is a framed OS window.
    ///
    /// If `false`, the floating window created on release is shifted down by the host's frame
    /// height so its content lands where the preview was.
    pub drag_preview_has_window_frame: bool,

    /// If true, record debug events in a small ring buffer (see
    /// [`super::DockDragController::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check the host model for consistency after every drag transition.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for FloatingDragOptions {
    fn default() -> Self {
        Self {
            snapping_enabled: true,
            snap_distance: 15.0,
            drop_strip_detect_size: 16.0,
            title_bar_height: 28.0,
            auto_hide_enabled: true,
            auto_hide_mouse_zone: 8.0,
            auto_hide_overlay_size: 32.0,
            hovered_opacity: 0.6,
            drag_preview_has_window_frame: false,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}

impl FloatingDragOptions {
    pub(crate) fn preview_opacity(&self, over_dock_zone: bool) -> f32 {
        if over_dock_zone {
            self.hovered_opacity.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}
