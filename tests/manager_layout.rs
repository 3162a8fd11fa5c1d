mod common;

use common::{
    CENTER, FILES, FakeHost, Manager, OUTLINE, OUTPUT, dock_index, left_stack, left_stack_with,
    part_of, record_events,
};
use term_dock::{
    CursorKind, DockConfig, DockDirection, DockEvent, DockManager, ManagerFlags, Pane, PaneButton,
    PaneState, PartKind, Point, Size,
};

#[test]
fn left_dock_takes_best_width_plus_border() {
    let manager = left_stack();
    let left = &manager.docks()[dock_index(&manager, DockDirection::Left)];
    assert_eq!(left.size, 10 + 2);
    assert_eq!(left.rect.x, 0);
    assert_eq!(left.rect.width, left.size);
    assert_eq!(left.rect.height, 24);

    let center = manager.pane(CENTER).unwrap();
    assert!(center.rect.x > left.rect.right());
    assert!(center.rect.right() < 80);
}

#[test]
fn new_dock_is_capped_by_the_size_constraint() {
    let mut manager = DockManager::new(FakeHost::new(80, 24), DockConfig::default());
    manager.host_mut().sizes.insert(FILES, Size::new(60, 5));
    manager.add_pane(CENTER, Pane::new().name("editor").center_pane());
    manager.add_pane(FILES, Pane::new().name("files").left());
    manager.update();

    let left = &manager.docks()[dock_index(&manager, DockDirection::Left)];
    assert_eq!(left.size, 24);
}

#[test]
fn stacked_panes_split_the_dock_height() {
    let manager = left_stack();
    let files = manager.pane(FILES).unwrap();
    let outline = manager.pane(OUTLINE).unwrap();
    assert_eq!(files.dock_pos, 0);
    assert_eq!(outline.dock_pos, 1);
    assert!(files.rect.bottom() < outline.rect.y);
    assert!(files.rect.height > 0);
    assert!(outline.rect.height > 0);

    let sash = manager
        .ui_parts()
        .iter()
        .find(|part| part.kind == PartKind::PaneSizer)
        .unwrap();
    assert!(sash.rect.y > files.rect.bottom());
    assert!(sash.rect.y < outline.rect.y);
}

#[test]
fn docked_windows_are_placed_at_their_pane_rect() {
    let manager = left_stack();
    for window in [CENTER, FILES, OUTLINE] {
        let pane = manager.pane(window).unwrap();
        assert_eq!(manager.host().placed.get(&window), Some(&pane.rect));
    }
}

#[test]
fn sparse_positions_become_dense() {
    let mut manager = DockManager::new(FakeHost::new(80, 24), DockConfig::default());
    manager.add_pane(1, Pane::new().name("a").bottom().position(0));
    manager.add_pane(2, Pane::new().name("b").bottom().position(9));
    manager.add_pane(3, Pane::new().name("c").bottom().position(5));
    manager.update();

    assert_eq!(manager.pane(1).unwrap().dock_pos, 0);
    assert_eq!(manager.pane(3).unwrap().dock_pos, 1);
    assert_eq!(manager.pane(2).unwrap().dock_pos, 2);
    let bottom = &manager.docks()[dock_index(&manager, DockDirection::Bottom)];
    assert_eq!(bottom.panes.len(), 3);
}

#[test]
fn hit_test_finds_caption_button_and_body() {
    let manager = left_stack();
    let caption = part_of(&manager, FILES, PartKind::Caption);
    let hit = manager.hit_test(caption.rect.position()).unwrap();
    assert_eq!(hit.kind, PartKind::Caption);
    assert_eq!(hit.pane, caption.pane);

    let button = part_of(&manager, FILES, PartKind::PaneButton);
    assert_eq!(button.button, Some(PaneButton::Close));
    let hit = manager.hit_test(button.rect.position()).unwrap();
    assert_eq!(hit.kind, PartKind::PaneButton);

    let body = manager.pane(FILES).unwrap().rect;
    let hit = manager.hit_test(Point::new(body.x + 1, body.y + 1)).unwrap();
    assert_eq!(hit.kind, PartKind::Pane);
}

#[test]
fn cursor_follows_sash_orientation() {
    let manager = left_stack();
    let dock_sash = manager
        .ui_parts()
        .iter()
        .find(|part| part.kind == PartKind::DockSizer)
        .unwrap();
    assert_eq!(manager.cursor_at(dock_sash.rect.position()), CursorKind::SizeWE);

    let pane_sash = manager
        .ui_parts()
        .iter()
        .find(|part| part.kind == PartKind::PaneSizer)
        .unwrap();
    assert_eq!(manager.cursor_at(pane_sash.rect.position()), CursorKind::SizeNS);

    let body = manager.pane(CENTER).unwrap().rect;
    assert_eq!(manager.cursor_at(body.position()), CursorKind::Default);
}

#[test]
fn hidden_pane_leaves_the_layout() {
    let mut manager = left_stack();
    let id = manager.pane(OUTLINE).unwrap().id();
    manager.edit_pane(id, |pane| pane.set_flag(PaneState::HIDDEN, true));
    manager.update();

    assert!(manager.ui_parts().iter().all(|part| part.pane != Some(id)));
    assert_eq!(manager.host().shown.get(&OUTLINE), Some(&false));
    assert!(manager.ui_parts().iter().all(|part| part.kind != PartKind::PaneSizer));
}

#[test]
fn maximize_hides_siblings_and_restore_brings_them_back() {
    let mut manager = left_stack();
    let files = manager.pane(FILES).unwrap().id();

    manager.maximize_pane(files);
    manager.update();
    assert!(manager.has_maximized());
    assert!(manager.pane(FILES).unwrap().is_maximized());
    assert!(!manager.pane(OUTLINE).unwrap().is_shown());
    assert!(!manager.pane(CENTER).unwrap().is_shown());
    assert!(manager.ui_parts().iter().all(|part| part.pane != Some(manager.pane(OUTLINE).unwrap().id())));

    manager.restore_pane(files);
    manager.update();
    assert!(!manager.has_maximized());
    assert!(manager.pane(OUTLINE).unwrap().is_shown());
    assert!(manager.pane(CENTER).unwrap().is_shown());
}

#[test]
fn restore_keeps_previously_hidden_panes_hidden() {
    let mut manager = left_stack();
    let files = manager.pane(FILES).unwrap().id();
    let outline = manager.pane(OUTLINE).unwrap().id();
    manager.edit_pane(outline, |pane| pane.set_flag(PaneState::HIDDEN, true));

    manager.maximize_pane(files);
    manager.restore_pane(files);
    manager.update();

    assert!(!manager.pane(OUTLINE).unwrap().is_shown());
    assert!(manager.pane(CENTER).unwrap().is_shown());
}

#[test]
fn docking_a_new_pane_restores_the_maximized_one() {
    let mut manager = left_stack();
    let files = manager.pane(FILES).unwrap().id();
    manager.maximize_pane(files);

    manager.add_pane(OUTPUT, Pane::new().name("output").bottom());

    assert!(!manager.has_maximized());
    assert!(manager.pane(OUTLINE).unwrap().is_shown());
}

#[test]
fn maximize_button_click_maximizes() {
    let mut manager = left_stack_with(Pane::new().maximize_button(true));
    let log = record_events(&mut manager, |_| false);
    let button = manager
        .ui_parts()
        .iter()
        .find(|part| part.button == Some(PaneButton::MaximizeRestore))
        .cloned()
        .unwrap();

    assert!(manager.on_left_down(button.rect.position()));
    manager.on_left_up(button.rect.position());

    assert!(manager.pane(OUTLINE).unwrap().is_maximized());
    assert!(!manager.pane(FILES).unwrap().is_shown());
    let outline = manager.pane(OUTLINE).unwrap().id();
    assert_eq!(
        log.borrow().as_slice(),
        &[
            DockEvent::PaneButton {
                pane: outline,
                window: OUTLINE,
                button: PaneButton::MaximizeRestore,
            },
            DockEvent::PaneMaximize {
                pane: outline,
                window: OUTLINE,
            },
        ]
    );
}

#[test]
fn vetoed_maximize_changes_nothing() {
    let mut manager = left_stack_with(Pane::new().maximize_button(true));
    record_events(&mut manager, |event| {
        matches!(event, DockEvent::PaneMaximize { .. })
    });
    let button = manager
        .ui_parts()
        .iter()
        .find(|part| part.button == Some(PaneButton::MaximizeRestore))
        .cloned()
        .unwrap();

    manager.on_left_down(button.rect.position());
    manager.on_left_up(button.rect.position());

    assert!(!manager.has_maximized());
    assert!(manager.pane(FILES).unwrap().is_shown());
}

#[test]
fn releasing_off_the_button_does_not_click() {
    let mut manager = left_stack();
    let log = record_events(&mut manager, |_| false);
    let button = part_of(&manager, FILES, PartKind::PaneButton);

    manager.on_left_down(button.rect.position());
    manager.on_left_up(manager.pane(CENTER).unwrap().rect.position());

    assert!(log.borrow().is_empty());
    assert!(manager.pane(FILES).unwrap().is_shown());
    assert_eq!(manager.host().captures, manager.host().releases);
}

#[test]
fn close_button_hides_the_pane() {
    let mut manager = left_stack();
    let button = part_of(&manager, FILES, PartKind::PaneButton);

    manager.on_left_down(button.rect.position());
    manager.on_left_up(button.rect.position());

    assert!(!manager.pane(FILES).unwrap().is_shown());
    assert_eq!(manager.host().shown.get(&FILES), Some(&false));
    assert!(manager.pane(OUTLINE).unwrap().is_shown());
}

#[test]
fn vetoed_close_keeps_the_pane() {
    let mut manager = left_stack();
    let log = record_events(&mut manager, |event| {
        matches!(event, DockEvent::PaneClose { .. })
    });
    let button = part_of(&manager, FILES, PartKind::PaneButton);

    manager.on_left_down(button.rect.position());
    manager.on_left_up(button.rect.position());

    assert!(manager.pane(FILES).unwrap().is_shown());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn vetoed_button_event_suppresses_default_handling() {
    let mut manager = left_stack();
    let log = record_events(&mut manager, |event| {
        matches!(event, DockEvent::PaneButton { .. })
    });
    let button = part_of(&manager, FILES, PartKind::PaneButton);

    manager.on_left_down(button.rect.position());
    manager.on_left_up(button.rect.position());

    assert!(manager.pane(FILES).unwrap().is_shown());
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn close_pane_emits_no_event() {
    let mut manager = left_stack();
    let log = record_events(&mut manager, |_| true);
    let id = manager.pane(FILES).unwrap().id();

    manager.close_pane(id);

    assert!(log.borrow().is_empty());
    assert!(!manager.pane(FILES).unwrap().is_shown());
}

#[test]
fn destroy_on_close_detaches_and_destroys() {
    let mut manager = left_stack_with(Pane::new().destroy_on_close(true));
    let id = manager.pane(OUTLINE).unwrap().id();

    manager.close_pane(id);
    manager.update();

    assert!(manager.pane(OUTLINE).is_none());
    assert_eq!(manager.host().destroyed_windows, vec![OUTLINE]);
}

#[test]
fn resize_of_managed_area_relays_out() {
    let mut manager = left_stack();
    let before = manager.pane(CENTER).unwrap().rect;

    manager.host_mut().size = Size::new(100, 30);
    manager.on_size();

    let after = manager.pane(CENTER).unwrap().rect;
    assert_eq!(after.width, before.width + 20);
    assert_eq!(after.height, before.height + 6);
}

#[test]
fn minimized_host_defers_layout_until_restored() {
    let mut manager = left_stack();
    let id = manager.pane(OUTLINE).unwrap().id();
    manager.host_mut().minimized = true;
    manager.edit_pane(id, |pane| pane.set_flag(PaneState::HIDDEN, true));
    manager.update();
    assert!(manager.is_dirty());
    assert!(manager.ui_parts().iter().any(|part| part.pane == Some(id)));

    manager.host_mut().minimized = false;
    manager.on_size();
    assert!(!manager.is_dirty());
    assert!(manager.ui_parts().iter().all(|part| part.pane != Some(id)));
}

fn allow_active(manager: &mut Manager) {
    let flags = manager.flags() | ManagerFlags::ALLOW_ACTIVE_PANE;
    manager.set_flags(flags);
}

#[test]
fn set_active_pane_marks_one_pane_and_notifies() {
    let mut manager = left_stack();
    allow_active(&mut manager);
    let log = record_events(&mut manager, |_| false);

    manager.set_active_pane(FILES);
    manager.set_active_pane(OUTLINE);

    assert!(manager.pane(OUTLINE).unwrap().is_active());
    assert!(!manager.pane(FILES).unwrap().is_active());
    let files = manager.pane(FILES).unwrap().id();
    let outline = manager.pane(OUTLINE).unwrap().id();
    assert_eq!(
        log.borrow().as_slice(),
        &[
            DockEvent::PaneActivated {
                pane: files,
                window: FILES,
            },
            DockEvent::PaneActivated {
                pane: outline,
                window: OUTLINE,
            },
        ]
    );

    manager.update();
    assert!(manager.pane(OUTLINE).unwrap().is_active());
}

#[test]
fn pressing_a_caption_activates_its_pane() {
    let mut manager = left_stack();
    allow_active(&mut manager);
    manager.set_active_pane(OUTLINE);
    let caption = part_of(&manager, FILES, PartKind::Caption);

    manager.on_left_down(caption.rect.position());
    manager.on_left_up(caption.rect.position());

    assert!(manager.pane(FILES).unwrap().is_active());
    assert!(!manager.pane(OUTLINE).unwrap().is_active());
}

#[test]
fn active_state_is_cleared_unless_allowed() {
    let mut manager = left_stack();
    manager.set_active_pane(FILES);
    assert!(manager.pane(FILES).unwrap().is_active());

    manager.update();

    assert!(!manager.pane(FILES).unwrap().is_active());
}
