use egui::Pos2;

use crate::dock_host::DockHost;

/// Application-wide input routed to the drag while its intercept is installed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragInput {
    PointerMoved(Pos2),
    PrimaryReleased(Pos2),
    SecondaryPressed,
    EscapePressed,

    /// The application lost focus (e.g. the user alt-tabbed away).
    ApplicationDeactivated,
}

impl DragInput {
    /// Inputs that abort the drag without changing the layout.
    pub fn cancels(self) -> bool {
        matches!(
            self,
            Self::SecondaryPressed | Self::EscapePressed | Self::ApplicationDeactivated
        )
    }
}

/// Tracks whether the global input intercept is registered with the host.
#[derive(Debug, Default)]
pub(super) struct InputIntercept {
    installed: bool,
}

impl InputIntercept {
    pub(super) fn is_installed(&self) -> bool {
        self.installed
    }

    pub(super) fn install(&mut self, host: &mut dyn DockHost) {
        if self.installed {
            return;
        }
        host.register_global_intercept();
        self.installed = true;
    }

    pub(super) fn uninstall(&mut self, host: &mut dyn DockHost) {
        if !self.installed {
            return;
        }
        host.unregister_global_intercept();
        self.installed = false;
    }
}
