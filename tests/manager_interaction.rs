mod common;

use common::{
    BUILD, CENTER, FILES, Manager, OUTLINE, OUTPUT, TOOLS, dock_index, left_stack,
    left_stack_with, part_of, toolbar_strip,
};
use term_dock::constants::TOOLBAR_LAYER;
use term_dock::{
    Action, DockDirection, DockHost, ManagerFlags, Pane, PartKind, PaneState, Point, Size, UiPart,
};

fn part(manager: &Manager, kind: PartKind) -> UiPart {
    manager
        .ui_parts()
        .iter()
        .find(|part| part.kind == kind)
        .cloned()
        .unwrap_or_else(|| panic!("no {kind:?} part"))
}

fn left_size(manager: &Manager) -> i32 {
    manager.docks()[dock_index(manager, DockDirection::Left)].size
}

#[test]
fn dragging_the_dock_sash_resizes_the_dock() {
    let mut manager = left_stack();
    let sash = part(&manager, PartKind::DockSizer);
    let grab = Point::new(sash.rect.x, sash.rect.y + 5);

    assert!(manager.on_left_down(grab));
    assert_eq!(manager.action(), Action::Resize);
    assert!(manager.has_capture());

    manager.on_motion(Point::new(grab.x + 8, grab.y));
    let outline = manager.resize_hint().unwrap();
    assert_eq!(outline.x, sash.rect.x + 8);
    assert_eq!(left_size(&manager), 12);

    manager.on_left_up(Point::new(grab.x + 8, grab.y));

    assert_eq!(left_size(&manager), 20);
    assert_eq!(manager.action(), Action::None);
    assert!(manager.resize_hint().is_none());
    assert!(!manager.has_capture());
    assert_eq!(manager.host().captures, 1);
    assert_eq!(manager.host().releases, 1);
}

#[test]
fn dock_cannot_grow_past_the_managed_area() {
    let mut manager = left_stack();
    let sash = part(&manager, PartKind::DockSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_left_up(Point::new(79, sash.rect.y));

    // Every resizable dock keeps room for its sash.
    assert_eq!(left_size(&manager), 80 - 2);
}

#[test]
fn live_resize_applies_during_the_drag() {
    let mut manager = left_stack();
    let flags = manager.flags() | ManagerFlags::LIVE_RESIZE;
    manager.set_flags(flags);
    let sash = part(&manager, PartKind::DockSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_motion(Point::new(sash.rect.x + 4, sash.rect.y));
    assert_eq!(left_size(&manager), 16);
    assert!(manager.resize_hint().is_none());
    // Released around the relayout, then grabbed again.
    assert!(manager.has_capture());
    assert_eq!(manager.host().releases, 1);
    assert_eq!(manager.host().captures, 2);

    manager.on_motion(Point::new(sash.rect.x + 6, sash.rect.y));
    assert_eq!(left_size(&manager), 18);

    manager.on_left_up(Point::new(sash.rect.x + 6, sash.rect.y));
    assert_eq!(left_size(&manager), 18);
    assert!(!manager.has_capture());
    assert_eq!(manager.host().captures, manager.host().releases);
}

#[test]
fn lost_capture_abandons_the_resize() {
    let mut manager = left_stack();
    let sash = part(&manager, PartKind::DockSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_motion(Point::new(sash.rect.x + 5, sash.rect.y));
    manager.on_capture_lost();

    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
    manager.on_left_up(Point::new(sash.rect.x + 5, sash.rect.y));
    assert_eq!(left_size(&manager), 12);
}

#[test]
fn pane_sash_moves_proportion_between_neighbours() {
    let mut manager = left_stack();
    let before = manager.pane(FILES).unwrap().rect.height;
    let sash = part(&manager, PartKind::PaneSizer);
    let grab = Point::new(sash.rect.x + 2, sash.rect.y);

    manager.on_left_down(grab);
    manager.on_left_up(Point::new(grab.x, grab.y + 4));

    let files = manager.pane(FILES).unwrap();
    let outline = manager.pane(OUTLINE).unwrap();
    assert!(files.dock_proportion > outline.dock_proportion);
    assert_eq!(files.dock_proportion + outline.dock_proportion, 200_000);
    assert!(files.rect.height > before);
    assert_eq!(manager.host().captures, manager.host().releases);
}

#[test]
fn pane_sash_growth_stops_at_neighbour_minimum() {
    let mut manager = left_stack_with(Pane::new().min_size(Size::new(10, 2)));
    let sash = part(&manager, PartKind::PaneSizer);
    let dock_pixels = manager.docks()[dock_index(&manager, DockDirection::Left)]
        .rect
        .height
        - 1;

    manager.on_left_down(Point::new(sash.rect.x, sash.rect.y));
    manager.on_left_up(Point::new(sash.rect.x, 23));

    // Border on both sides, the body minimum, the caption and one extra cell.
    let outline_min = 1 + 1 + 2 + 1 + 1;
    let expected = (outline_min as i64 * 200_000 / dock_pixels as i64) as i32;
    let files = manager.pane(FILES).unwrap();
    let outline = manager.pane(OUTLINE).unwrap();
    assert_eq!(outline.dock_proportion, expected);
    assert_eq!(files.dock_proportion, 200_000 - expected);
}

#[test]
fn pane_sash_drag_is_abandoned_when_neighbour_has_no_room() {
    let mut manager = left_stack_with(Pane::new().min_size(Size::new(10, 12)));
    let sash = part(&manager, PartKind::PaneSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_left_up(Point::new(sash.rect.x, sash.rect.y + 4));

    assert_eq!(manager.pane(FILES).unwrap().dock_proportion, 100_000);
    assert_eq!(manager.pane(OUTLINE).unwrap().dock_proportion, 100_000);
    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
}

#[test]
fn abandoned_live_pane_resize_releases_the_pointer() {
    let mut manager = left_stack_with(Pane::new().min_size(Size::new(10, 12)));
    let flags = manager.flags() | ManagerFlags::LIVE_RESIZE;
    manager.set_flags(flags);
    let sash = part(&manager, PartKind::PaneSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_motion(Point::new(sash.rect.x, sash.rect.y + 4));

    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
    assert_eq!(manager.host().captures, 1);
    assert_eq!(manager.host().releases, 1);

    manager.on_left_up(Point::new(sash.rect.x, sash.rect.y + 4));
    assert_eq!(manager.host().releases, 1);
    assert_eq!(manager.pane(FILES).unwrap().dock_proportion, 100_000);
    assert_eq!(manager.pane(OUTLINE).unwrap().dock_proportion, 100_000);
}

#[test]
fn last_pane_sash_has_no_neighbour_to_borrow_from() {
    let mut manager = left_stack_with(Pane::new().resizable(false));
    let sash = part(&manager, PartKind::PaneSizer);

    manager.on_left_down(sash.rect.position());
    manager.on_left_up(Point::new(sash.rect.x, sash.rect.y + 3));

    assert_eq!(manager.pane(FILES).unwrap().dock_proportion, 100_000);
}

#[test]
fn hovering_a_button_tracks_it() {
    let mut manager = left_stack();
    let button = part_of(&manager, FILES, PartKind::PaneButton);

    manager.on_motion(button.rect.position());
    assert_eq!(
        manager.hover_button().map(|part| part.rect),
        Some(button.rect)
    );

    manager.on_motion(manager.pane(CENTER).unwrap().rect.position());
    assert!(manager.hover_button().is_none());
}

#[test]
fn caption_drag_floats_the_pane() {
    let mut manager = left_stack();
    let caption = part_of(&manager, FILES, PartKind::Caption);
    let grab = Point::new(caption.rect.x + 1, caption.rect.y);
    let release = Point::new(45, 12);

    assert!(manager.on_left_down(grab));
    assert_eq!(manager.action(), Action::ClickCaption);
    manager.on_motion(release);
    assert_eq!(manager.action(), Action::DragFloatingPane);
    manager.on_left_up(release);

    let files = manager.pane(FILES).unwrap();
    assert!(files.is_floating());
    let frame = files.frame().unwrap();
    let host = manager.host();
    let record = &host.frames[&frame];
    assert!(record.shown);
    assert_eq!(record.window, Some(FILES));
    assert_eq!(record.rect.position(), Point::new(44, 12));
    assert_eq!(host.captures, host.releases);

    let left = &manager.docks()[dock_index(&manager, DockDirection::Left)];
    assert_eq!(left.panes, vec![manager.pane(OUTLINE).unwrap().id()]);
}

#[test]
fn small_caption_moves_do_not_float() {
    let mut manager = left_stack();
    let caption = part_of(&manager, FILES, PartKind::Caption);

    manager.on_left_down(caption.rect.position());
    manager.on_motion(Point::new(caption.rect.x + 1, caption.rect.y));
    manager.on_left_up(Point::new(caption.rect.x + 1, caption.rect.y));

    assert!(!manager.pane(FILES).unwrap().is_floating());
    assert!(manager.host().frames.is_empty());
}

#[test]
fn caption_drag_respects_disabled_floating() {
    let mut manager = left_stack();
    let flags = manager.flags() - ManagerFlags::ALLOW_FLOATING;
    manager.set_flags(flags);
    let caption = part_of(&manager, FILES, PartKind::Caption);

    manager.on_left_down(caption.rect.position());
    manager.on_motion(Point::new(45, 12));
    manager.on_left_up(Point::new(45, 12));

    assert!(!manager.pane(FILES).unwrap().is_floating());
}

fn float_files(manager: &mut Manager, at: Point) {
    let id = manager.pane(FILES).unwrap().id();
    manager.edit_pane(id, |pane| {
        pane.set_flag(PaneState::FLOATING, true);
        pane.floating_pos = at;
    });
    manager.update();
}

#[test]
fn floating_pane_dropped_on_left_edge_docks_on_a_new_layer() {
    let mut manager = left_stack();
    float_files(&mut manager, Point::new(40, 6));
    let frame = manager.pane(FILES).unwrap().frame().unwrap();
    let pt = Point::new(0, 10);

    manager.on_floating_pane_move_start(FILES);
    manager.host_mut().move_floating_frame(frame, pt);
    manager.on_floating_pane_moving(FILES, pt);
    assert!(manager.hint().is_visible());

    manager.on_floating_pane_moved(FILES, pt);

    let files = manager.pane(FILES).unwrap();
    assert!(files.is_docked());
    assert_eq!(files.dock_direction, DockDirection::Left);
    assert_eq!(files.dock_layer, 1);
    assert!(files.frame().is_none());
    assert!(manager.host().destroyed_frames.contains(&frame));
    assert!(!manager.hint().is_visible());
}

#[test]
fn floating_pane_released_over_center_stays_floating() {
    let mut manager = left_stack();
    float_files(&mut manager, Point::new(40, 6));
    let frame = manager.pane(FILES).unwrap().frame().unwrap();
    let pt = Point::new(46, 12);

    manager.host_mut().move_floating_frame(frame, Point::new(44, 12));
    manager.on_floating_pane_moving(FILES, pt);
    assert!(!manager.hint().is_visible());
    manager.on_floating_pane_moved(FILES, pt);

    let files = manager.pane(FILES).unwrap();
    assert!(files.is_floating());
    assert_eq!(files.frame(), Some(frame));
    assert_eq!(files.floating_pos, Point::new(44, 12));
}

#[test]
fn hovering_over_a_docked_pane_previews_the_slot() {
    let mut manager = left_stack();
    float_files(&mut manager, Point::new(40, 6));
    let outline = manager
        .pane_part(manager.pane(OUTLINE).unwrap().id())
        .unwrap()
        .rect;

    let pt = Point::new(outline.x + 6, outline.y + 2);
    let above = manager.calculate_hint_rect(FILES, pt, Point::new(1, 0));

    assert!(!above.is_empty());
    assert!(above.y <= outline.y + 2);
}

#[test]
fn closing_a_floating_frame_can_be_vetoed() {
    let mut manager = left_stack();
    float_files(&mut manager, Point::new(40, 6));
    let log = common::record_events(&mut manager, |_| true);

    assert!(!manager.on_floating_pane_closed(FILES));
    assert!(manager.pane(FILES).unwrap().is_shown());
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn closing_the_pane_under_the_pointer_ends_the_press() {
    let mut manager = left_stack();
    let caption = part_of(&manager, FILES, PartKind::Caption);
    manager.on_left_down(caption.rect.position());
    assert_eq!(manager.action(), Action::ClickCaption);

    let id = manager.pane(FILES).unwrap().id();
    manager.close_pane(id);

    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
    assert_eq!(manager.host().releases, 1);

    manager.on_motion(Point::new(45, 12));
    manager.on_left_up(Point::new(45, 12));
    assert!(manager.host().frames.is_empty());
    assert_eq!(manager.host().releases, 1);
}

fn action_panes(manager: &Manager) -> usize {
    manager
        .all_panes()
        .iter()
        .filter(|pane| pane.has_flag(PaneState::ACTION_PANE))
        .count()
}

#[test]
fn toolbar_strip_lays_out_at_its_positions() {
    let manager = toolbar_strip();
    let top = &manager.docks()[dock_index(&manager, DockDirection::Top)];
    assert!(top.toolbar);
    assert!(top.fixed);
    assert_eq!(top.dock_layer, TOOLBAR_LAYER);
    assert_eq!(top.rect.height, 3);

    assert_eq!(manager.pane(TOOLS).unwrap().dock_pos, 0);
    assert_eq!(manager.pane(BUILD).unwrap().dock_pos, 20);
    assert!(!manager.pane(TOOLS).unwrap().has_gripper());
}

#[test]
fn dragged_toolbar_slides_along_its_dock() {
    let mut manager = toolbar_strip();

    assert!(manager.start_pane_drag(TOOLS, Point::new(2, 1)));
    assert_eq!(manager.action(), Action::DragToolbarPane);
    assert!(manager.has_capture());

    manager.on_motion(Point::new(45, 1));
    let tools = manager.pane(TOOLS).unwrap();
    assert_eq!(tools.dock_pos, 43);
    assert_eq!(tools.dock_row, 0);
    assert!(tools.has_flag(PaneState::ACTION_PANE));
    assert_eq!(manager.action(), Action::DragToolbarPane);

    manager.on_left_up(Point::new(45, 1));

    let tools = manager.pane(TOOLS).unwrap();
    assert_eq!(tools.dock_pos, 43);
    assert_eq!(tools.dock_direction, DockDirection::Top);
    assert_eq!(manager.pane(BUILD).unwrap().dock_pos, 20);
    assert_eq!(action_panes(&manager), 0);
    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
    assert_eq!(manager.host().captures, 1);
    assert_eq!(manager.host().releases, 1);
}

#[test]
fn start_pane_drag_ignores_unknown_windows() {
    let mut manager = toolbar_strip();
    assert!(!manager.start_pane_drag(OUTPUT, Point::new(0, 0)));
    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
}

#[test]
fn lost_capture_during_toolbar_drag_is_not_saved() {
    let mut manager = toolbar_strip();
    manager.start_pane_drag(TOOLS, Point::new(2, 1));
    manager.on_motion(Point::new(45, 1));
    assert_eq!(action_panes(&manager), 1);

    manager.on_capture_lost();

    assert_eq!(manager.action(), Action::None);
    assert!(!manager.has_capture());
    assert_eq!(action_panes(&manager), 0);
    assert!(manager.is_dirty());

    let text = manager.save_perspective();
    let mut restored = toolbar_strip();
    assert!(restored.load_perspective(&text, true));
    assert_eq!(action_panes(&restored), 0);
    assert_eq!(restored.pane(TOOLS).unwrap().dock_pos, 43);
}

#[test]
fn toolbar_dropped_on_the_far_edge_of_a_crowded_dock_opens_a_row() {
    let mut manager = toolbar_strip();
    manager.start_pane_drag(TOOLS, Point::new(2, 1));

    manager.on_motion(Point::new(45, 2));

    let tools = manager.pane(TOOLS).unwrap();
    assert_eq!(tools.dock_direction, DockDirection::Top);
    assert_eq!(tools.dock_layer, TOOLBAR_LAYER);
    assert_eq!(tools.dock_row, 1);
    assert_eq!(manager.pane(BUILD).unwrap().dock_row, 0);

    manager.on_left_up(Point::new(45, 2));
    assert_eq!(manager.pane(TOOLS).unwrap().dock_row, 1);
}

#[test]
fn toolbar_dragged_past_the_bottom_edge_docks_on_the_toolbar_layer() {
    let mut manager = toolbar_strip();
    manager.start_pane_drag(TOOLS, Point::new(2, 1));

    manager.on_motion(Point::new(40, 24));
    manager.on_left_up(Point::new(40, 24));

    let tools = manager.pane(TOOLS).unwrap();
    assert!(tools.is_docked());
    assert_eq!(tools.dock_direction, DockDirection::Bottom);
    assert_eq!(tools.dock_layer, TOOLBAR_LAYER);
    assert_eq!(tools.dock_row, 0);
    assert_eq!(manager.pane(BUILD).unwrap().dock_direction, DockDirection::Top);
}

#[test]
fn redocked_toolbar_takes_its_preferred_size() {
    let mut manager = toolbar_strip();
    if let Some(toolbar) = manager.host_mut().toolbars.get_mut(&TOOLS) {
        toolbar.size = Size::new(12, 1);
    }
    manager.start_pane_drag(TOOLS, Point::new(2, 1));

    manager.on_motion(Point::new(45, 1));

    let tools = manager.pane(TOOLS).unwrap();
    assert_eq!(tools.best_size, Size::new(12, 1));
    assert_eq!(tools.floating_size, Size::DEFAULT);
    assert_eq!(tools.floating_client_size, Size::DEFAULT);
}

#[test]
fn regular_pane_dropped_on_a_toolbar_dock_gets_its_own_row() {
    let mut manager = toolbar_strip();
    assert!(manager.add_pane(
        OUTPUT,
        Pane::new().name("output").caption("Output").float()
    ));
    manager.update();
    let frame = manager.pane(OUTPUT).unwrap().frame().unwrap();

    manager.on_floating_pane_moved(OUTPUT, Point::new(45, 1));

    let output = manager.pane(OUTPUT).unwrap();
    assert!(output.is_docked());
    assert_eq!(output.dock_direction, DockDirection::Top);
    assert_eq!(output.dock_layer, TOOLBAR_LAYER);
    assert_eq!(output.dock_row, 0);
    assert_eq!(output.dock_pos, 0);
    assert!(output.frame().is_none());
    assert!(manager.host().destroyed_frames.contains(&frame));

    assert_eq!(manager.pane(TOOLS).unwrap().dock_row, 1);
    assert_eq!(manager.pane(BUILD).unwrap().dock_row, 1);
}
