use egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::{
    DockDragController, DockZone, DockZones, DragError, DragInput, DragOutcome, DragPhase,
    FloatingDragOptions,
};
use crate::dock_host::{
    AreaId, ContainerId, Display, DockDecision, DockFeatures, DockHost as _, DragContent,
    DropTarget, PanelId,
};
use crate::simple_host::{HostCall, SimpleDockHost};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_min_size(pos2(x, y), vec2(w, h))
}

fn display(r: Rect) -> Display {
    Display {
        rect: r,
        available_rect: r,
    }
}

struct Layout {
    host: SimpleDockHost,
    main: ContainerId,
    left: AreaId,
    left_panels: Vec<PanelId>,
    right: AreaId,
    right_panel: PanelId,
}

/// Main container with a three-tab area on the left and a single-panel area on the right.
fn main_layout() -> Layout {
    let mut host = SimpleDockHost::new();
    host.add_display(display(rect(0.0, 0.0, 1920.0, 1080.0)));

    let main = host.add_container(rect(0.0, 0.0, 1000.0, 700.0), false);
    let left = host.add_area(main, rect(0.0, 0.0, 500.0, 700.0)).expect("container");
    let right = host.add_area(main, rect(500.0, 0.0, 500.0, 700.0)).expect("container");
    let left_panels = (0..3)
        .map(|_| host.add_panel(left, DockFeatures::default()).expect("area"))
        .collect();
    let right_panel = host.add_panel(right, DockFeatures::default()).expect("area");

    Layout {
        host,
        main,
        left,
        left_panels,
        right,
        right_panel,
    }
}

/// A floating window holding one area with one panel.
fn add_window(host: &mut SimpleDockHost, r: Rect) -> (ContainerId, AreaId) {
    let window = host.add_container(r, true);
    let area = host.add_area(window, r).expect("container");
    host.add_panel(area, DockFeatures::default()).expect("area");
    (window, area)
}

fn count(host: &SimpleDockHost, f: impl Fn(&HostCall) -> bool) -> usize {
    host.calls().iter().filter(|c| f(c)).count()
}

#[test]
fn unknown_content_is_rejected_without_side_effects() {
    let Layout { mut host, .. } = main_layout();
    let mut drag = DockDragController::default();

    let content = DragContent::Panel(PanelId(999));
    assert_eq!(
        drag.start_floating(&mut host, content, Pos2::ZERO, vec2(100.0, 100.0)),
        Err(DragError::UnknownContent(content))
    );
    assert!(host.calls().is_empty());
    assert!(!drag.is_dragging());
    assert_eq!(drag.phase(), DragPhase::Idle);
}

#[test]
fn cancel_restores_the_source_tabs() {
    init_logging();
    let Layout {
        mut host,
        left,
        left_panels,
        ..
    } = main_layout();
    host.set_current_tab(left, 1);
    host.take_calls();

    let mut drag = DockDragController::default();
    let content = DragContent::Panel(left_panels[1]);
    drag.start_floating(&mut host, content, pos2(100.0, 10.0), vec2(300.0, 200.0))
        .expect("drag starts");

    assert!(drag.is_dragging());
    assert_eq!(drag.phase(), DragPhase::Dragging);
    assert_eq!(host.visible_tab_count(left), 2);
    assert!(!host.is_tab_visible(left, 1));
    assert_eq!(host.area(left).and_then(|a| a.current_tab), Some(0));
    assert_eq!(host.area(left).map(|a| a.tab_bar_visible), Some(true));
    assert!(host.is_intercept_registered());

    assert_eq!(
        drag.start_floating(&mut host, content, pos2(100.0, 10.0), vec2(300.0, 200.0)),
        Err(DragError::AlreadyDragging)
    );

    assert!(drag.cancel_dragging(&mut host));
    assert!(drag.is_canceled());
    assert!(!drag.is_dragging());
    assert_eq!(drag.last_outcome(), Some(DragOutcome::Canceled));
    assert_eq!(host.visible_tab_count(left), 3);
    assert_eq!(host.area(left).and_then(|a| a.current_tab), Some(1));
    assert!(!host.is_intercept_registered());
    assert_eq!(count(&host, |c| matches!(c, HostCall::PerformDrop { .. })), 0);
    assert_eq!(count(&host, |c| matches!(c, HostCall::CreateFloatingWindow { .. })), 0);

    assert!(!drag.cancel_dragging(&mut host), "second cancel is a no-op");
    assert_eq!(count(&host, |c| *c == HostCall::UnregisterGlobalIntercept), 1);
}

#[test]
fn dragging_the_first_of_two_tabs_hides_the_tab_bar() {
    let mut host = SimpleDockHost::new();
    let main = host.add_container(rect(0.0, 0.0, 800.0, 600.0), false);
    let area = host.add_area(main, rect(0.0, 0.0, 800.0, 600.0)).expect("container");
    let first = host.add_panel(area, DockFeatures::default()).expect("area");
    host.add_panel(area, DockFeatures::default()).expect("area");

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, DragContent::Panel(first), pos2(10.0, 10.0), vec2(200.0, 100.0))
        .expect("drag starts");

    assert_eq!(host.area(area).and_then(|a| a.current_tab), Some(1));
    assert_eq!(host.area(area).map(|a| a.tab_bar_visible), Some(false));
    assert!(!host.is_tab_visible(area, 0));

    drag.handle_input(&mut host, DragInput::EscapePressed);
    assert_eq!(host.area(area).map(|a| a.tab_bar_visible), Some(true));
    assert_eq!(host.area(area).and_then(|a| a.current_tab), Some(0));
    assert_eq!(host.visible_tab_count(area), 2);
}

#[test]
fn dragging_a_sole_panel_hides_its_area() {
    let Layout {
        mut host,
        right,
        right_panel,
        ..
    } = main_layout();

    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Panel(right_panel),
        pos2(600.0, 10.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");
    assert_eq!(host.area(right).map(|a| a.visible), Some(false));

    assert_eq!(
        drag.handle_input(&mut host, DragInput::SecondaryPressed),
        Some(DragOutcome::Canceled)
    );
    assert_eq!(host.area(right).map(|a| a.visible), Some(true));
}

#[test]
fn release_over_an_area_edge_docks() {
    init_logging();
    let Layout {
        mut host,
        main,
        right,
        left_panels,
        ..
    } = main_layout();
    let content = DragContent::Panel(left_panels[0]);

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, content, pos2(50.0, 10.0), vec2(300.0, 200.0))
        .expect("drag starts");

    drag.move_floating(&mut host, pos2(505.0, 300.0)).expect("dragging");
    let hovered = drag.hovered_zone().expect("over the left strip of the right area");
    assert_eq!(hovered.target, DropTarget::Area(right));
    assert_eq!(hovered.zone, DockZone::Left);
    assert_eq!(drag.preview().map(|p| p.opacity), Some(0.6));
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(455.0, 290.0)));

    let expected = DockDecision {
        container: main,
        zone: DockZone::Left,
        area: Some(right),
        tab_index: None,
    };
    assert_eq!(
        drag.finish_dragging(&mut host, pos2(505.0, 300.0)),
        Ok(DragOutcome::Docked(expected))
    );
    assert_eq!(drag.phase(), DragPhase::Docked);
    assert!(drag.hovered_zone().is_none());
    assert!(!host.is_intercept_registered());

    let calls = host.calls();
    let drop_at = calls
        .iter()
        .position(|c| *c == HostCall::PerformDrop { content, decision: expected })
        .expect("drop issued");
    let restore_at = calls
        .iter()
        .position(|c| matches!(c, HostCall::SetTabVisible { visible: true, .. }))
        .expect("tab restored");
    assert!(restore_at < drop_at, "source is restored before the drop");
    assert_eq!(count(&host, |c| matches!(c, HostCall::PerformDrop { .. })), 1);

    assert_eq!(
        drag.finish_dragging(&mut host, pos2(505.0, 300.0)),
        Err(DragError::NotDragging)
    );
}

#[test]
fn release_in_the_open_floats_below_the_frame() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    host.set_window_frame_height(20.0);
    let content = DragContent::Panel(left_panels[2]);

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, content, pos2(50.0, 10.0), vec2(300.0, 200.0))
        .expect("drag starts");
    drag.move_floating(&mut host, pos2(1500.0, 800.0)).expect("dragging");
    assert!(drag.hovered_zone().is_none());
    assert_eq!(drag.preview().map(|p| p.opacity), Some(1.0));

    let outcome = drag.finish_dragging(&mut host, pos2(1500.0, 800.0));
    let expected = Rect::from_min_max(pos2(1450.0, 810.0), pos2(1750.0, 990.0));
    assert_eq!(outcome, Ok(DragOutcome::Floated { rect: expected }));
    assert_eq!(drag.phase(), DragPhase::Floated);
    assert!(
        host.calls()
            .contains(&HostCall::CreateFloatingWindow { content, rect: expected })
    );
}

#[test]
fn framed_preview_floats_as_is() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    host.set_window_frame_height(20.0);

    let mut drag = DockDragController::new(FloatingDragOptions {
        drag_preview_has_window_frame: true,
        ..Default::default()
    });
    drag.start_floating(
        &mut host,
        DragContent::Panel(left_panels[0]),
        pos2(50.0, 10.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");

    drag.handle_input(&mut host, DragInput::PointerMoved(pos2(1500.0, 800.0)));
    let outcome = drag.handle_input(&mut host, DragInput::PrimaryReleased(pos2(1500.0, 800.0)));
    assert_eq!(
        outcome,
        Some(DragOutcome::Floated {
            rect: rect(1450.0, 790.0, 300.0, 200.0)
        })
    );
}

#[test]
fn non_floatable_content_aborts_outside_zones() {
    let mut host = SimpleDockHost::new();
    let main = host.add_container(rect(0.0, 0.0, 800.0, 600.0), false);
    let area = host.add_area(main, rect(0.0, 0.0, 800.0, 600.0)).expect("container");
    let pinned = DockFeatures {
        floatable: false,
        pinnable: true,
    };
    let a = host.add_panel(area, pinned).expect("area");
    host.add_panel(area, DockFeatures::default()).expect("area");

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, DragContent::Panel(a), pos2(10.0, 10.0), vec2(100.0, 100.0))
        .expect("drag starts");

    assert_eq!(
        drag.finish_dragging(&mut host, pos2(1500.0, 900.0)),
        Ok(DragOutcome::Aborted)
    );
    assert_eq!(drag.phase(), DragPhase::Idle);
    assert_eq!(host.visible_tab_count(area), 2);
    assert_eq!(count(&host, |c| matches!(c, HostCall::CreateFloatingWindow { .. })), 0);
    assert_eq!(count(&host, |c| matches!(c, HostCall::PerformDrop { .. })), 0);
}

#[test]
fn auto_hidden_content_is_torn_down_unless_it_stays_in_a_side_bar() {
    let Layout {
        mut host,
        main,
        left,
        right_panel,
        ..
    } = main_layout();
    let content = DragContent::Panel(right_panel);
    host.set_auto_hidden(content, main);
    // No tabbing into the left area, so its title bar does not swallow the corner.
    host.set_allowed_zones(DropTarget::Area(left), DockZones::OUTER);

    let mut drag = DockDragController::default();

    // Moving to another side bar of the same container keeps the auto-hide state.
    drag.start_floating(&mut host, content, pos2(600.0, 10.0), vec2(200.0, 200.0))
        .expect("drag starts");
    let outcome = drag.finish_dragging(&mut host, pos2(3.0, 3.0));
    assert_eq!(
        outcome,
        Ok(DragOutcome::Docked(DockDecision {
            container: main,
            zone: DockZone::LeftAutoHide,
            area: None,
            tab_index: None,
        }))
    );
    assert_eq!(count(&host, |c| matches!(c, HostCall::TearDownAutoHide { .. })), 0);

    // Docking anywhere else tears it down.
    drag.start_floating(&mut host, content, pos2(600.0, 10.0), vec2(200.0, 200.0))
        .expect("drag starts");
    drag.finish_dragging(&mut host, pos2(5.0, 300.0)).expect("dragging");
    assert_eq!(
        host.calls().iter().filter(|c| **c == HostCall::TearDownAutoHide { content }).count(),
        1
    );
}

#[test]
fn non_pinnable_content_ignores_side_bars() {
    let mut host = SimpleDockHost::new();
    let main = host.add_container(rect(0.0, 0.0, 800.0, 600.0), false);
    let area = host.add_area(main, rect(0.0, 0.0, 800.0, 600.0)).expect("container");
    let unpinnable = DockFeatures {
        floatable: true,
        pinnable: false,
    };
    let panel = host.add_panel(area, unpinnable).expect("area");
    host.add_panel(area, DockFeatures::default()).expect("area");
    host.set_allowed_zones(DropTarget::Area(area), DockZones::OUTER);

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, DragContent::Panel(panel), pos2(10.0, 10.0), vec2(100.0, 100.0))
        .expect("drag starts");
    drag.move_floating(&mut host, pos2(3.0, 3.0)).expect("dragging");
    assert!(drag.hovered_zone().is_none());
    assert_eq!(drag.drop_candidate().map(|c| c.zone), Some(None));

    assert!(matches!(
        drag.finish_dragging(&mut host, pos2(3.0, 3.0)),
        Ok(DragOutcome::Floated { .. })
    ));
}

#[test]
fn container_center_tabifies_into_its_only_area() {
    let mut host = SimpleDockHost::new();
    let main = host.add_container(rect(0.0, 0.0, 1000.0, 700.0), false);
    let main_area = host.add_area(main, rect(0.0, 0.0, 1000.0, 700.0)).expect("container");
    host.add_panel(main_area, DockFeatures::default()).expect("area");
    host.set_allowed_zones(DropTarget::Container(main), DockZones::ALL_DOCK);
    host.set_allowed_zones(DropTarget::Area(main_area), DockZones::OUTER);

    let (_window, window_area) = add_window(&mut host, rect(1200.0, 100.0, 300.0, 200.0));

    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Area(window_area),
        pos2(1210.0, 110.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");

    assert_eq!(
        drag.finish_dragging(&mut host, pos2(500.0, 20.0)),
        Ok(DragOutcome::Docked(DockDecision {
            container: main,
            zone: DockZone::Center,
            area: Some(main_area),
            tab_index: None,
        }))
    );
}

#[test]
fn attached_windows_ride_along_and_return_on_cancel() {
    init_logging();
    let mut host = SimpleDockHost::new();
    host.add_display(display(rect(0.0, 0.0, 1920.0, 1080.0)));
    let (w1, w1_area) = add_window(&mut host, rect(100.0, 100.0, 200.0, 150.0));
    let (w2, _) = add_window(&mut host, rect(305.0, 100.0, 200.0, 150.0));
    let (w3, _) = add_window(&mut host, rect(800.0, 500.0, 200.0, 150.0));

    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Area(w1_area),
        pos2(150.0, 110.0),
        vec2(200.0, 150.0),
    )
    .expect("drag starts");

    let group = drag.snap_group().expect("w2 is attached");
    assert_eq!(group.len(), 2);
    assert!(group.contains(w1) && group.contains(w2) && !group.contains(w3));

    drag.move_floating(&mut host, pos2(250.0, 160.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(200.0, 150.0)));
    assert_eq!(host.container(w2).map(|c| c.rect.min), Some(pos2(405.0, 150.0)));
    assert_eq!(host.container(w3).map(|c| c.rect.min), Some(pos2(800.0, 500.0)));
    assert_eq!(
        count(&host, |c| matches!(c, HostCall::MoveFloating { container, .. } if *container == w1)),
        0,
        "the dragged window follows the preview, not the group moves"
    );

    assert_eq!(
        drag.handle_input(&mut host, DragInput::ApplicationDeactivated),
        Some(DragOutcome::Canceled)
    );
    assert_eq!(host.container(w2).map(|c| c.rect.min), Some(pos2(305.0, 100.0)));
    assert!(drag.snap_group().is_none());
}

#[test]
fn group_is_reseated_at_the_display_edge() {
    let mut host = SimpleDockHost::new();
    host.add_display(display(rect(0.0, 0.0, 1000.0, 800.0)));
    let (_w1, w1_area) = add_window(&mut host, rect(500.0, 100.0, 150.0, 100.0));
    let (_w2, _) = add_window(&mut host, rect(650.0, 100.0, 150.0, 100.0));
    let (w3, _) = add_window(&mut host, rect(800.0, 100.0, 150.0, 100.0));

    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Area(w1_area),
        pos2(510.0, 110.0),
        vec2(150.0, 100.0),
    )
    .expect("drag starts");
    assert_eq!(drag.snap_group().map(|g| g.len()), Some(3));

    // 90pt to the right would push the group 40pt past the display edge.
    drag.move_floating(&mut host, pos2(600.0, 120.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(550.0, 110.0)));
    assert_eq!(host.container(w3).map(|c| c.rect.max.x), Some(1000.0));
}

#[test]
fn group_moves_onto_another_display() {
    let mut host = SimpleDockHost::new();
    host.add_display(display(rect(0.0, 0.0, 1000.0, 800.0)));
    host.add_display(display(rect(1000.0, 0.0, 800.0, 600.0)));
    let (_w1, w1_area) = add_window(&mut host, rect(500.0, 100.0, 150.0, 100.0));
    let (_w2, _) = add_window(&mut host, rect(650.0, 100.0, 150.0, 100.0));
    let (w3, _) = add_window(&mut host, rect(800.0, 100.0, 150.0, 100.0));

    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Area(w1_area),
        pos2(510.0, 110.0),
        vec2(150.0, 100.0),
    )
    .expect("drag starts");

    drag.move_floating(&mut host, pos2(1700.0, 110.0)).expect("dragging");
    let bbox = drag
        .snap_group()
        .and_then(|g| g.bounding_rect())
        .expect("group");
    assert!(rect(1000.0, 0.0, 800.0, 600.0).contains_rect(bbox));
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(1350.0, 100.0)));
    assert_eq!(host.container(w3).map(|c| c.rect.max.x), Some(1800.0));
}

#[test]
fn preview_snaps_to_a_nearby_window_and_floats_there() {
    let mut host = SimpleDockHost::new();
    host.add_display(display(rect(0.0, 0.0, 1920.0, 1080.0)));
    let (_w1, w1_area) = add_window(&mut host, rect(100.0, 100.0, 200.0, 150.0));
    let (w2, _) = add_window(&mut host, rect(330.0, 100.0, 200.0, 150.0));

    let mut drag = DockDragController::default();
    let content = DragContent::Area(w1_area);
    drag.start_floating(&mut host, content, pos2(110.0, 110.0), vec2(200.0, 150.0))
        .expect("drag starts");
    assert!(drag.snap_group().is_none(), "30pt apart is not attached");

    drag.move_floating(&mut host, pos2(128.0, 110.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(118.0, 100.0)));

    drag.move_floating(&mut host, pos2(129.0, 110.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(130.0, 100.0)));
    assert!(drag.drop_candidate().is_none());
    assert_eq!(host.container(w2).map(|c| c.rect.min), Some(pos2(330.0, 100.0)));

    let outcome = drag.finish_dragging(&mut host, pos2(129.0, 110.0));
    assert_eq!(
        outcome,
        Ok(DragOutcome::Floated {
            rect: rect(130.0, 100.0, 200.0, 150.0)
        })
    );
}

#[test]
fn release_far_from_a_snap_docks_at_the_release_point() {
    init_logging();
    let Layout {
        mut host,
        main,
        left,
        ..
    } = main_layout();
    let (_a, a_area) = add_window(&mut host, rect(1100.0, 200.0, 200.0, 150.0));
    add_window(&mut host, rect(1330.0, 200.0, 200.0, 150.0));

    let mut drag = DockDragController::default();
    let content = DragContent::Area(a_area);
    drag.start_floating(&mut host, content, pos2(1110.0, 210.0), vec2(200.0, 150.0))
        .expect("drag starts");
    drag.move_floating(&mut host, pos2(1128.0, 210.0)).expect("dragging");
    drag.move_floating(&mut host, pos2(1129.0, 210.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(1130.0, 200.0)));

    // Released straight over the left strip of the main left area, with no move there first.
    let expected = DockDecision {
        container: main,
        zone: DockZone::Left,
        area: Some(left),
        tab_index: None,
    };
    assert_eq!(
        drag.finish_dragging(&mut host, pos2(5.0, 300.0)),
        Ok(DragOutcome::Docked(expected))
    );
    assert_eq!(count(&host, |c| *c == HostCall::PerformDrop { content, decision: expected }), 1);
    assert_eq!(count(&host, |c| matches!(c, HostCall::CreateFloatingWindow { .. })), 0);
}

#[test]
fn release_without_a_prior_move_floats_at_the_release_point() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    let content = DragContent::Panel(left_panels[2]);

    let mut drag = DockDragController::default();
    drag.start_floating(&mut host, content, pos2(50.0, 10.0), vec2(300.0, 200.0))
        .expect("drag starts");
    drag.move_floating(&mut host, pos2(1300.0, 500.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(1250.0, 490.0)));

    let expected = rect(1650.0, 790.0, 300.0, 200.0);
    assert_eq!(
        drag.finish_dragging(&mut host, pos2(1700.0, 800.0)),
        Ok(DragOutcome::Floated { rect: expected })
    );
    assert!(
        host.calls()
            .contains(&HostCall::CreateFloatingWindow { content, rect: expected })
    );
}

#[test]
fn snapping_can_be_disabled() {
    let mut host = SimpleDockHost::new();
    let (_w1, w1_area) = add_window(&mut host, rect(100.0, 100.0, 200.0, 150.0));
    add_window(&mut host, rect(305.0, 100.0, 200.0, 150.0));

    let mut drag = DockDragController::new(FloatingDragOptions {
        snapping_enabled: false,
        ..Default::default()
    });
    drag.start_floating(
        &mut host,
        DragContent::Area(w1_area),
        pos2(110.0, 110.0),
        vec2(200.0, 150.0),
    )
    .expect("drag starts");
    assert!(drag.snap_group().is_none());

    drag.move_floating(&mut host, pos2(112.0, 110.0)).expect("dragging");
    assert_eq!(drag.preview().map(|p| p.rect.min), Some(pos2(102.0, 100.0)));
}

#[test]
fn intercept_is_registered_once_per_drag() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    let mut drag = DockDragController::default();

    assert_eq!(drag.handle_input(&mut host, DragInput::PointerMoved(Pos2::ZERO)), None);
    assert_eq!(drag.handle_input(&mut host, DragInput::EscapePressed), None);
    assert!(host.calls().is_empty(), "idle input is ignored");

    drag.start_floating(
        &mut host,
        DragContent::Panel(left_panels[0]),
        pos2(50.0, 10.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");
    assert!(drag.is_intercepting_input());
    for x in [100.0, 200.0, 300.0] {
        assert_eq!(drag.handle_input(&mut host, DragInput::PointerMoved(pos2(x, 300.0))), None);
    }
    drag.handle_input(&mut host, DragInput::PrimaryReleased(pos2(1500.0, 900.0)));
    drag.cancel_dragging(&mut host);

    assert!(!drag.is_intercepting_input());
    assert_eq!(count(&host, |c| *c == HostCall::RegisterGlobalIntercept), 1);
    assert_eq!(count(&host, |c| *c == HostCall::UnregisterGlobalIntercept), 1);
}

#[test]
fn every_abort_input_cancels_and_restores_the_source() {
    for input in [
        DragInput::SecondaryPressed,
        DragInput::EscapePressed,
        DragInput::ApplicationDeactivated,
    ] {
        let Layout {
            mut host,
            left,
            left_panels,
            ..
        } = main_layout();
        let mut drag = DockDragController::default();
        drag.start_floating(
            &mut host,
            DragContent::Panel(left_panels[0]),
            pos2(50.0, 10.0),
            vec2(300.0, 200.0),
        )
        .expect("drag starts");
        drag.handle_input(&mut host, DragInput::PointerMoved(pos2(505.0, 300.0)));

        assert_eq!(drag.handle_input(&mut host, input), Some(DragOutcome::Canceled), "{input:?}");
        assert!(drag.is_canceled());
        assert_eq!(host.visible_tab_count(left), 3);
        assert!(!host.is_intercept_registered());
        assert_eq!(count(&host, |c| matches!(c, HostCall::PerformDrop { .. })), 0);
    }
}

#[test]
fn debug_log_keeps_the_latest_lines() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    let mut drag = DockDragController::new(FloatingDragOptions {
        debug_event_log: true,
        debug_event_log_capacity: 2,
        debug_integrity: true,
        ..Default::default()
    });

    drag.start_floating(
        &mut host,
        DragContent::Panel(left_panels[0]),
        pos2(50.0, 10.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");
    drag.finish_dragging(&mut host, pos2(1500.0, 900.0)).expect("dragging");

    let text = drag.debug_log_text();
    assert_eq!(text.lines().count(), 2, "{text}");
    assert!(text.contains("finish"), "{text}");
    assert!(!text.contains("integrity FAIL"), "{text}");

    drag.debug_log_clear();
    assert!(drag.debug_log_text().is_empty());
}

#[test]
fn preview_keeps_the_grab_point_under_the_cursor() {
    let Layout {
        mut host,
        left_panels,
        ..
    } = main_layout();
    let mut drag = DockDragController::default();
    drag.start_floating(
        &mut host,
        DragContent::Panel(left_panels[0]),
        pos2(50.0, 10.0),
        vec2(300.0, 200.0),
    )
    .expect("drag starts");

    for cursor in [pos2(700.0, 400.0), pos2(1200.0, 50.0), pos2(20.0, 650.0)] {
        drag.move_floating(&mut host, cursor).expect("dragging");
        let preview = drag.preview().expect("dragging");
        assert_eq!(preview.rect.min + Vec2::new(50.0, 10.0), cursor);
        assert_eq!(preview.rect.size(), vec2(300.0, 200.0));
    }
}
