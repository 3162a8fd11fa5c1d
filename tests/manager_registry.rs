mod common;

use common::{FakeHost, FakeToolbar, Manager, left_stack};
use term_dock::constants::MAX_DOCK_PROPORTION;
use term_dock::{
    DockConfig, DockDirection, DockManager, InsertLevel, Orientation, Pane, PaneState, Size,
};

fn empty() -> Manager {
    DockManager::new(FakeHost::new(80, 24), DockConfig::default())
}

#[test]
fn same_window_cannot_be_added_twice() {
    let mut manager = empty();
    assert!(manager.add_pane(7, Pane::new().name("seven")));
    assert!(!manager.add_pane(7, Pane::new().name("again")));
    assert_eq!(manager.all_panes().len(), 1);
    assert_eq!(manager.pane(7).map(|pane| pane.name.as_str()), Some("seven"));
}

#[test]
fn duplicate_and_empty_names_are_replaced() {
    let mut manager = empty();
    assert!(manager.add_pane(1, Pane::new().name("tools")));
    assert!(manager.add_pane(2, Pane::new().name("tools")));
    assert!(manager.add_pane(3, Pane::new()));

    let names: Vec<&str> = manager.all_panes().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names[0], "tools");
    assert_ne!(names[1], "tools");
    assert!(!names[1].is_empty());
    assert!(!names[2].is_empty());
    assert_ne!(names[1], names[2]);
}

#[test]
fn pane_ids_are_unique() {
    let mut manager = empty();
    for window in 0..5 {
        manager.add_pane(window, Pane::new().name(format!("p{window}")));
    }
    let mut ids: Vec<_> = manager.all_panes().iter().map(Pane::id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn unset_proportion_and_best_size_are_resolved() {
    let mut manager = empty();
    manager.host_mut().sizes.insert(4, Size::new(16, 6));
    manager.add_pane(4, Pane::new().name("p").proportion(0));
    let pane = manager.pane(4).unwrap();
    assert_eq!(pane.dock_proportion, MAX_DOCK_PROPORTION);
    assert_eq!(pane.best_size, Size::new(16, 6));
}

#[test]
fn add_pane_at_center_makes_center_pane() {
    let mut manager = empty();
    manager.add_pane_at(1, DockDirection::Center, "Main");
    manager.add_pane_at(2, DockDirection::Bottom, "Log");
    let main = manager.pane(1).unwrap();
    assert_eq!(main.dock_direction, DockDirection::Center);
    assert!(!main.has_caption());
    assert_eq!(main.caption, "Main");
    assert_eq!(manager.pane(2).unwrap().dock_direction, DockDirection::Bottom);
}

#[test]
fn vertical_toolbar_loses_top_and_bottom_docking() {
    let mut manager = empty();
    manager.host_mut().toolbars.insert(
        9,
        FakeToolbar {
            orientation: Some(Orientation::Vertical),
            size: Size::new(3, 12),
        },
    );
    manager.add_pane(9, Pane::new().name("palette").toolbar_pane().left());

    let pane = manager.pane(9).unwrap();
    assert!(pane.is_dockable_to(DockDirection::Left));
    assert!(pane.is_dockable_to(DockDirection::Right));
    assert!(!pane.is_dockable_to(DockDirection::Top));
    assert!(!pane.is_dockable_to(DockDirection::Bottom));
    assert!(!pane.has_gripper());
}

#[test]
fn insert_at_dock_level_shifts_only_that_side() {
    let mut manager = empty();
    manager.add_pane(1, Pane::new().name("a").left().layer(0));
    manager.add_pane(2, Pane::new().name("b").left().layer(1));
    manager.add_pane(3, Pane::new().name("c").right().layer(0));

    manager.insert_pane(4, Pane::new().name("new").left().layer(0), InsertLevel::Dock);

    assert_eq!(manager.pane(1).unwrap().dock_layer, 1);
    assert_eq!(manager.pane(2).unwrap().dock_layer, 2);
    assert_eq!(manager.pane(3).unwrap().dock_layer, 0);
    assert_eq!(manager.pane(4).unwrap().dock_layer, 0);
}

#[test]
fn insert_at_row_level_shifts_rows_in_the_layer() {
    let mut manager = empty();
    manager.add_pane(1, Pane::new().name("a").bottom().row(0));
    manager.add_pane(2, Pane::new().name("b").bottom().row(1));
    manager.add_pane(3, Pane::new().name("c").bottom().layer(1).row(0));

    manager.insert_pane(4, Pane::new().name("new").bottom().row(1), InsertLevel::Row);

    assert_eq!(manager.pane(1).unwrap().dock_row, 0);
    assert_eq!(manager.pane(2).unwrap().dock_row, 2);
    assert_eq!(manager.pane(3).unwrap().dock_row, 0);
    assert_eq!(manager.pane(4).unwrap().dock_row, 1);
}

#[test]
fn insert_moves_an_existing_pane() {
    let mut manager = empty();
    manager.add_pane(1, Pane::new().name("a").left());
    manager.add_pane(2, Pane::new().name("b").left().position(1));

    manager.insert_pane(2, Pane::new().left().position(0), InsertLevel::Pane);

    assert_eq!(manager.all_panes().len(), 2);
    assert_eq!(manager.pane(2).unwrap().dock_pos, 0);
    assert_eq!(manager.pane(1).unwrap().dock_pos, 1);
    assert_eq!(manager.pane(2).unwrap().name, "b");
}

#[test]
fn detach_renumbers_remaining_positions() {
    let mut manager = empty();
    manager.add_pane(1, Pane::new().name("a").left().position(0));
    manager.add_pane(2, Pane::new().name("b").left().position(1));
    manager.add_pane(3, Pane::new().name("c").left().position(2));
    manager.update();
    let detached = manager.pane(2).unwrap().id();

    assert!(manager.detach_pane(2));
    assert!(!manager.detach_pane(2));
    manager.update();

    let mut positions: Vec<i32> = manager.all_panes().iter().map(|p| p.dock_pos).collect();
    positions.sort();
    assert_eq!(positions, vec![0, 1]);
    assert!(manager.ui_parts().iter().all(|part| part.pane != Some(detached)));
}

#[test]
fn detach_destroys_floating_frame() {
    let mut manager = left_stack();
    let id = manager.pane(common::FILES).unwrap().id();
    manager.edit_pane(id, |pane| pane.set_flag(PaneState::FLOATING, true));
    manager.update();
    let frame = manager.pane(common::FILES).unwrap().frame().unwrap();

    manager.detach_pane(common::FILES);

    assert!(manager.host().destroyed_frames.contains(&frame));
    assert!(manager.host().frames.is_empty());
}

#[test]
fn edit_pane_marks_layout_dirty() {
    let mut manager = left_stack();
    assert!(!manager.is_dirty());
    let id = manager.pane(common::FILES).unwrap().id();
    assert!(manager.edit_pane(id, |pane| pane.caption = "Tree".into()));
    assert!(manager.is_dirty());
    manager.update_if_dirty();
    assert!(!manager.is_dirty());
}
