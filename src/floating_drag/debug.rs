use crate::dock_host::DockHost;

use super::DockDragController;
use super::integrity;

impl DockDragController {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn debug_integrity_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_integrity {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[drag {}] {}", self.debug_drag_serial, message));
    }

    /// The debug event log, oldest line first.
    ///
    /// Only filled when [`super::FloatingDragOptions::debug_event_log`] or
    /// [`super::FloatingDragOptions::debug_integrity`] is set.
    pub fn debug_log_text(&self) -> String {
        self.debug_log
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    pub(super) fn debug_check_integrity(&mut self, host: &dyn DockHost) {
        if !self.options.debug_integrity {
            return;
        }

        let mut issues = integrity::host_integrity_issues(host);
        if let Some(drag) = self.session.active() {
            if let Some(group) = &drag.snap_group {
                for member in group.members() {
                    let floating = host
                        .container(member.container)
                        .is_some_and(|info| info.is_floating);
                    if !floating {
                        issues.push(format!(
                            "integrity: snap group member {:?} is not a floating container",
                            member.container
                        ));
                    }
                }
            }
        }

        let hash = integrity::hash_issues(&issues);
        let prev = std::mem::replace(&mut self.debug_last_integrity_hash, hash);
        if prev == hash {
            return;
        }

        if issues.is_empty() {
            self.debug_integrity_log_event("integrity OK");
            return;
        }

        log::warn!("drag integrity failure: {} issue(s)", issues.len());
        self.debug_integrity_log_event(format!("integrity FAIL issues={}", issues.len()));
        for issue in &issues {
            self.debug_integrity_log_event(issue.clone());
        }

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!("egui_docking_drag integrity failure\n{}", issues.join("\n"));
        }
    }
}
