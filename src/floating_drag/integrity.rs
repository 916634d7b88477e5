use std::hash::{Hash as _, Hasher as _};

use crate::dock_host::{AreaId, ContainerId, DockHost, PanelId};

/// Consistency problems in the host model, one line each. Empty means consistent.
pub fn host_integrity_issues(host: &dyn DockHost) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let containers = host.containers();
    let mut seen_containers: ahash::HashSet<ContainerId> = ahash::HashSet::default();
    let mut owner_of_area: ahash::HashMap<AreaId, ContainerId> = ahash::HashMap::default();
    let mut area_of_panel: ahash::HashMap<PanelId, AreaId> = ahash::HashMap::default();

    for container in containers {
        if !seen_containers.insert(container) {
            issues.push(format!("integrity: container {container:?} listed twice"));
            continue;
        }
        let Some(info) = host.container(container) else {
            issues.push(format!("integrity: container {container:?} listed but missing"));
            continue;
        };
        if !info.rect.is_finite() {
            issues.push(format!(
                "integrity: container {container:?} rect {:?} not finite",
                info.rect
            ));
        }

        for area in host.open_areas(container) {
            if let Some(prev) = owner_of_area.insert(area, container) {
                issues.push(format!(
                    "integrity: area {area:?} open in both {prev:?} and {container:?}"
                ));
            }

            let Some(area_info) = host.area(area) else {
                issues.push(format!(
                    "integrity: container {container:?} references missing area {area:?}"
                ));
                continue;
            };

            if area_info.container != container {
                issues.push(format!(
                    "integrity: area {area:?} claims container {:?} but is open in {container:?}",
                    area_info.container
                ));
            }

            if let Some(current) = area_info.current_tab {
                if current >= area_info.tab_count() {
                    issues.push(format!(
                        "integrity: area {area:?} current tab {current} out of range (tabs={})",
                        area_info.tab_count()
                    ));
                }
            }

            if !area_info.tab_rects.is_empty()
                && area_info.tab_rects.len() != area_info.tab_count()
            {
                issues.push(format!(
                    "integrity: area {area:?} has {} tab rects for {} panels",
                    area_info.tab_rects.len(),
                    area_info.tab_count()
                ));
            }

            for &panel in &area_info.panels {
                if let Some(prev) = area_of_panel.insert(panel, area) {
                    issues.push(format!(
                        "integrity: panel {panel:?} in both {prev:?} and {area:?}"
                    ));
                }
            }
        }
    }

    issues
}

pub(super) fn hash_issues(lines: &[String]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for line in lines {
        line.hash(&mut hasher);
    }
    hasher.finish()
}
