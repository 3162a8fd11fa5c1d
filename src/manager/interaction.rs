//! Pointer handling: sash drags, caption clicks and drags, caption buttons,
//! hover tracking and the floating-frame callbacks.

use crate::config::ManagerFlags;
use crate::dock::{FindDocks, find_docks};
use crate::drop::{DropContext, hit_test};
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::host::{DockEvent, DockHost, EventResponse};
use crate::layout::{LayoutContext, PartKind, UiPart, pane_positions_and_sizes};
use crate::pane::{DockDirection, Pane, PaneButton, PaneId, PaneState, WindowHandle};

use super::DockManager;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    /// Dragging a sash.
    Resize,
    /// Caption or gripper pressed, not yet dragged past the threshold.
    ClickCaption,
    ClickButton,
    DragFloatingPane,
    /// Dragging a toolbar that is redocked live as the pointer moves.
    DragToolbarPane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Default,
    /// Horizontal resize.
    SizeWE,
    /// Vertical resize.
    SizeNS,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hover,
    Pressed,
}

impl<W: WindowHandle, H: DockHost<W>> DockManager<W, H> {
    pub fn action(&self) -> Action {
        self.action
    }

    /// Part the current action started on.
    pub fn action_part(&self) -> Option<&UiPart> {
        self.action_part.and_then(|idx| self.ui_parts().get(idx))
    }

    pub fn action_part_index(&self) -> Option<usize> {
        self.action_part
    }

    /// Outline shown while a sash is dragged without live resize.
    pub fn resize_hint(&self) -> Option<Rect> {
        Some(self.action_hint_rect).filter(|rect| !rect.is_empty())
    }

    pub fn hover_button(&self) -> Option<&UiPart> {
        self.hover_button.and_then(|idx| self.ui_parts().get(idx))
    }

    /// How the caption button at part index `idx` should be drawn.
    pub fn button_state(&self, idx: usize) -> ButtonState {
        if self.hover_button != Some(idx) {
            ButtonState::Normal
        } else if self.action == Action::ClickButton && self.action_part == Some(idx) {
            ButtonState::Pressed
        } else {
            ButtonState::Hover
        }
    }

    fn hit_index(&self, pt: Point) -> Option<usize> {
        hit_test(self.ui_parts(), pt)
    }

    /// A dock whose only member is fixed cannot be resized.
    fn is_locked_sash(&self, part: &UiPart) -> bool {
        if part.kind == PartKind::DockSizer {
            let locked = part
                .dock
                .and_then(|idx| self.docks.get(idx))
                .filter(|dock| dock.panes.len() == 1)
                .and_then(|dock| self.pane_by_id(dock.panes[0]))
                .is_some_and(Pane::is_fixed);
            if locked {
                return true;
            }
        }
        part.pane
            .and_then(|id| self.pane_by_id(id))
            .is_some_and(Pane::is_fixed)
    }

    pub fn cursor_at(&self, pt: Point) -> CursorKind {
        let Some(part) = self.hit_test(pt) else {
            return CursorKind::Default;
        };
        match part.kind {
            PartKind::DockSizer | PartKind::PaneSizer => {
                if self.is_locked_sash(part) {
                    CursorKind::Default
                } else if part.orientation == Orientation::Vertical {
                    CursorKind::SizeWE
                } else {
                    CursorKind::SizeNS
                }
            }
            PartKind::Gripper => CursorKind::Move,
            _ => CursorKind::Default,
        }
    }

    /// Left button pressed. Returns whether the press was consumed.
    pub fn on_left_down(&mut self, pt: Point) -> bool {
        self.drag_item = None;

        let Some(idx) = self.hit_index(pt) else {
            return false;
        };
        let part = self.ui_parts()[idx].clone();

        match part.kind {
            PartKind::DockSizer | PartKind::PaneSizer => {
                if self.is_locked_sash(&part) {
                    return true;
                }
                self.action = Action::Resize;
                self.action_part = Some(idx);
                self.action_hint_rect = Rect::default();
                self.action_start = pt;
                self.action_offset = pt - part.rect.position();
                self.capture_pointer();
                true
            }
            PartKind::PaneButton => {
                self.action = Action::ClickButton;
                self.action_part = Some(idx);
                self.action_start = pt;
                self.hover_button = Some(idx);
                self.capture_pointer();
                self.repaint = true;
                true
            }
            PartKind::Caption | PartKind::Gripper => {
                if self.config.flags.contains(ManagerFlags::ALLOW_ACTIVE_PANE) {
                    let window = part
                        .pane
                        .and_then(|id| self.pane_by_id(id))
                        .and_then(|pane| pane.window);
                    if let Some(window) = window {
                        self.set_active_pane(window);
                    }
                }

                let in_center = part
                    .dock
                    .and_then(|idx| self.docks.get(idx))
                    .is_some_and(|dock| dock.dock_direction == DockDirection::Center);
                if in_center {
                    return true;
                }

                self.action = Action::ClickCaption;
                self.action_part = Some(idx);
                self.action_start = pt;
                self.action_offset = pt - part.rect.position();
                self.capture_pointer();
                true
            }
            _ => false,
        }
    }

    pub fn on_motion(&mut self, pt: Point) {
        if self.last_mouse_move == Some(pt) {
            return;
        }
        self.last_mouse_move = Some(pt);

        match self.action {
            Action::Resize => self.motion_resize(pt),
            Action::ClickCaption => self.motion_click_caption(pt),
            Action::DragFloatingPane => self.motion_drag_floating(pt),
            Action::DragToolbarPane => self.motion_drag_toolbar(pt),
            Action::None | Action::ClickButton => self.track_hover(pt),
        }
    }

    fn motion_resize(&mut self, pt: Point) {
        match self.drag_item {
            Some(idx) => self.action_part = Some(idx),
            None => self.drag_item = self.action_part,
        }
        let Some(part) = self.action_part().cloned() else {
            return;
        };

        if self.config.has_live_resize() {
            // The relayout may move the sash away from under the pointer.
            self.release_pointer();
            if self.do_end_resize_action(pt) {
                self.capture_pointer();
            }
            return;
        }

        let mut pos = part.rect.position();
        if part.orientation == Orientation::Horizontal {
            pos.y = (pt.y - self.action_offset.y).max(0);
        } else {
            pos.x = (pt.x - self.action_offset.x).max(0);
        }
        self.action_hint_rect = Rect::from_parts(pos, part.rect.size());
        self.repaint = true;
    }

    fn motion_click_caption(&mut self, pt: Point) {
        let dx = (pt.x - self.action_start.x).abs();
        let dy = (pt.y - self.action_start.y).abs();
        if dx <= self.config.drag_threshold_x && dy <= self.config.drag_threshold_y {
            return;
        }
        let Some(id) = self.action_part().and_then(|part| part.pane) else {
            return;
        };
        let Some(idx) = self.index_of(id) else {
            return;
        };

        if self.panes[idx].is_toolbar() {
            self.action = Action::DragToolbarPane;
            self.action_pane = Some(id);
            return;
        }

        let can_float = self.config.flags.contains(ManagerFlags::ALLOW_FLOATING)
            && self.panes[idx].is_floatable();
        if !can_float {
            return;
        }

        self.action = Action::DragFloatingPane;
        self.panes[idx].floating_pos = pt - self.action_offset;
        if self.panes[idx].is_maximized() {
            self.restore_pane(id);
        }
        self.panes[idx].set_flag(PaneState::FLOATING, true);
        tracing::debug!(pane = ?id, "floating pane by caption drag");
        self.update();

        self.action_pane = Some(id);
        let frame = self.pane_by_id(id).and_then(Pane::frame);
        if let Some(frame) = frame {
            let frame_size = self.host.floating_frame_rect(frame).size();
            if frame_size.width <= self.action_offset.x {
                self.action_offset.x = self.config.floating_grab_offset;
            }
        }
    }

    fn motion_drag_floating(&mut self, pt: Point) {
        let Some(pane) = self.action_pane.and_then(|id| self.pane_by_id(id)) else {
            return;
        };
        let (window, frame) = (pane.window, pane.frame);
        if let Some(frame) = frame {
            self.host.move_floating_frame(frame, pt - self.action_offset);
        }
        if let Some(window) = window {
            self.on_floating_pane_moving(window, pt);
        }
    }

    fn motion_drag_toolbar(&mut self, pt: Point) {
        let Some(id) = self.action_pane else {
            return;
        };
        let Some(idx) = self.index_of(id) else {
            return;
        };

        self.panes[idx].set_flag(PaneState::ACTION_PANE, true);
        self.drop_live(id, pt, self.action_offset);

        let floated = self.panes[idx].is_floating();
        if floated {
            self.panes[idx].floating_pos = pt - self.action_offset;
        }

        self.update();

        if floated {
            if let Some(idx) = self.index_of(id) {
                self.panes[idx].set_flag(PaneState::ACTION_PANE, false);
            }
            self.action = Action::DragFloatingPane;
        }
    }

    fn track_hover(&mut self, pt: Point) {
        let over_button = self
            .hit_index(pt)
            .filter(|idx| self.ui_parts()[*idx].kind == PartKind::PaneButton);
        match over_button {
            Some(idx) => {
                if self.hover_button != Some(idx) {
                    self.hover_button = Some(idx);
                    self.repaint = true;
                }
            }
            None => {
                if self.hover_button.take().is_some() {
                    self.repaint = true;
                }
            }
        }
    }

    pub fn on_left_up(&mut self, pt: Point) {
        match self.action {
            Action::Resize => {
                self.release_pointer();
                if !self.config.has_live_resize() {
                    self.action_hint_rect = Rect::default();
                    self.repaint = true;
                } else if let Some(idx) = self.drag_item {
                    self.action_part = Some(idx);
                }
                self.do_end_resize_action(pt);
                self.drag_item = None;
            }
            Action::ClickButton => {
                self.hover_button = None;
                self.release_pointer();
                self.repaint = true;

                let clicked = self
                    .action_part
                    .filter(|idx| self.hit_index(pt) == Some(*idx))
                    .and_then(|idx| self.ui_parts().get(idx))
                    .and_then(|part| part.pane.zip(part.button));
                if let Some((id, button)) = clicked {
                    self.click_pane_button(id, button);
                }
            }
            Action::ClickCaption => self.release_pointer(),
            Action::DragFloatingPane => {
                self.release_pointer();
                let window = self
                    .action_pane
                    .and_then(|id| self.pane_by_id(id))
                    .and_then(|pane| pane.window);
                if let Some(window) = window {
                    self.on_floating_pane_moved(window, pt);
                }
            }
            Action::DragToolbarPane => {
                self.release_pointer();
                self.commit_toolbar_positions();
                self.update();
            }
            Action::None => {}
        }

        self.action = Action::None;
        self.action_pane = None;
        self.last_mouse_move = None;
        self.clear_action_pane_flags();
    }

    /// Starts dragging the pane of `window` as if it had been grabbed
    /// `offset` cells from its top-left corner. Toolbars are redocked live
    /// as the pointer moves; other panes move their floating frame.
    ///
    /// This is how toolbar windows that draw their own gripper begin a drag.
    pub fn start_pane_drag(&mut self, window: W, offset: Point) -> bool {
        let Some(pane) = self.pane(window) else {
            return false;
        };
        let (id, toolbar, frame) = (pane.id, pane.is_toolbar(), pane.frame);

        self.action = if toolbar {
            Action::DragToolbarPane
        } else {
            Action::DragFloatingPane
        };
        self.action_pane = Some(id);
        self.action_part = None;
        self.action_offset = offset;
        self.last_mouse_move = None;
        self.capture_pointer();

        if let Some(frame) = frame {
            self.action_offset = self.action_offset + self.host.floating_frame_client_origin(frame);
        }
        tracing::debug!(pane = ?id, toolbar, "pane drag started");
        true
    }

    /// Abandons the current action. Whatever a live drag already applied
    /// stays applied.
    pub(crate) fn cancel_action(&mut self) {
        if self.action != Action::None {
            tracing::debug!(action = ?self.action, "cancelled pointer action");
        }
        self.release_pointer();
        self.action = Action::None;
        self.action_pane = None;
        self.action_hint_rect = Rect::default();
        self.drag_item = None;
        self.last_mouse_move = None;
        self.clear_action_pane_flags();
        self.hide_hint();
    }

    fn clear_action_pane_flags(&mut self) {
        for pane in self.panes.iter_mut() {
            if pane.has_flag(PaneState::ACTION_PANE) {
                pane.set_flag(PaneState::ACTION_PANE, false);
                self.dirty = true;
            }
        }
    }

    /// Stores the positions the dragged toolbar's dock settled on.
    fn commit_toolbar_positions(&mut self) {
        let Some(idx) = self.action_pane.and_then(|id| self.index_of(id)) else {
            return;
        };
        let pane = &self.panes[idx];
        let found = find_docks(
            &self.docks,
            Some(pane.dock_direction),
            Some(pane.dock_layer),
            Some(pane.dock_row),
            FindDocks::OnlyFirst,
        );
        for dock_idx in found {
            let dock = &self.docks[dock_idx];
            let (positions, _) = pane_positions_and_sizes(&self.config.metrics, dock, &self.panes);
            for (member, pos) in dock.panes.clone().into_iter().zip(positions) {
                if let Some(member) = self.panes.iter_mut().find(|p| p.id == member) {
                    member.dock_pos = pos;
                }
            }
        }
        self.panes[idx].set_flag(PaneState::ACTION_PANE, false);
        self.dirty = true;
    }

    fn click_pane_button(&mut self, id: PaneId, button: PaneButton) {
        let Some(window) = self.pane_by_id(id).and_then(|pane| pane.window) else {
            return;
        };
        let event = DockEvent::PaneButton {
            pane: id,
            window,
            button,
        };
        if self.emit(event) == EventResponse::Veto {
            return;
        }
        self.on_pane_button(id, button);
    }

    /// Default handling of a caption button.
    pub fn on_pane_button(&mut self, id: PaneId, button: PaneButton) {
        let Some(pane) = self.pane_by_id(id) else {
            return;
        };
        let Some(window) = pane.window else {
            return;
        };
        let maximized = pane.is_maximized();
        let floatable = pane.is_floatable();

        match button {
            PaneButton::Close => {
                if self.emit(DockEvent::PaneClose { pane: id, window }) == EventResponse::Veto {
                    return;
                }
                if self.pane_by_id(id).is_some() {
                    self.close_pane(id);
                }
                self.update();
            }
            PaneButton::MaximizeRestore if !maximized => {
                if self.emit(DockEvent::PaneMaximize { pane: id, window }) == EventResponse::Veto {
                    return;
                }
                self.maximize_pane(id);
                self.update();
            }
            PaneButton::MaximizeRestore => {
                if self.emit(DockEvent::PaneRestore { pane: id, window }) == EventResponse::Veto {
                    return;
                }
                self.restore_pane(id);
                self.update();
            }
            PaneButton::Pin => {
                if !self.config.flags.contains(ManagerFlags::ALLOW_FLOATING) || !floatable {
                    return;
                }
                if maximized {
                    if self.emit(DockEvent::PaneRestore { pane: id, window })
                        == EventResponse::Veto
                    {
                        return;
                    }
                    self.restore_pane(id);
                }
                self.edit_pane(id, |pane| pane.set_flag(PaneState::FLOATING, true));
                self.update();
            }
        }
    }

    /// The pointer grab was taken away; abandons whatever was in progress.
    pub fn on_capture_lost(&mut self) {
        self.captured = false;
        self.cancel_action();
    }

    pub fn on_leave_window(&mut self) {
        if self.hover_button.take().is_some() {
            self.repaint = true;
        }
    }

    /// A content window received focus.
    pub fn on_child_focus(&mut self, window: W) {
        if !self.config.flags.contains(ManagerFlags::ALLOW_ACTIVE_PANE) {
            return;
        }
        let inactive = self.pane(window).is_some_and(|pane| !pane.is_active());
        if inactive {
            self.set_active_pane(window);
        }
    }

    // Floating frames.

    pub fn on_floating_pane_move_start(&mut self, window: W) {
        let Some(frame) = self.pane(window).and_then(Pane::frame) else {
            return;
        };
        if self.config.flags.contains(ManagerFlags::TRANSPARENT_DRAG) {
            self.host.set_floating_frame_alpha(frame, 150);
        }
    }

    /// The floating frame of `window` is being dragged with the pointer at
    /// `pt`. Shows where it would dock; floating toolbars dock immediately.
    pub fn on_floating_pane_moving(&mut self, window: W, pt: Point) {
        let Some(idx) = self.index_of_window(window) else {
            return;
        };
        let Some(frame) = self.panes[idx].frame else {
            return;
        };
        let frame_pos = self.host.floating_frame_rect(frame).position();
        let offset = pt - frame_pos;

        if self.panes[idx].is_toolbar() && self.action == Action::DragFloatingPane {
            let Some(hint) = self.preview_drop(idx, pt) else {
                return;
            };
            let id = hint.id();
            self.panes[idx] = hint;
            self.action = Action::DragToolbarPane;
            self.action_pane = Some(id);
            self.dirty = true;
            self.update();
            return;
        }

        self.draw_hint_rect(window, pt, offset);
    }

    /// Where the pane at `idx` would dock if dropped at `pt`, computed on
    /// copies of the live state. `None` when it would stay floating.
    fn preview_drop(&self, idx: usize, pt: Point) -> Option<Pane<W>> {
        let mut panes = self.panes.clone();
        let mut hint = self.panes[idx].clone();

        let window_size = |window: W| self.host.window_size(window);
        let toolbar_hint = |window: W, direction: DockDirection| {
            self.host
                .toolbar(window)
                .map(|toolbar| toolbar.hint_size(direction))
        };
        let ctx = DropContext {
            layout: LayoutContext {
                config: &self.config,
                client_size: self.host.client_size(),
                has_maximized: self.has_maximized,
                window_size: &window_size,
            },
            parts: self.ui_parts(),
            docks: &self.docks,
            panes: &self.panes,
            toolbar_hint: &toolbar_hint,
        };
        if !ctx.do_drop(&self.docks, &mut panes, &mut hint, pt, Point::new(0, 0)) {
            return None;
        }
        Some(hint).filter(|hint| !hint.is_floating())
    }

    /// The floating frame of `window` was released with the pointer at `pt`.
    pub fn on_floating_pane_moved(&mut self, window: W, pt: Point) {
        let Some(idx) = self.index_of_window(window) else {
            return;
        };
        let Some(frame) = self.panes[idx].frame else {
            return;
        };
        let id = self.panes[idx].id;
        let frame_pos = self.host.floating_frame_rect(frame).position();
        self.drop_live(id, pt, pt - frame_pos);

        let Some(idx) = self.index_of(id) else {
            return;
        };
        if self.panes[idx].is_floating() {
            self.panes[idx].floating_pos = self.host.floating_frame_rect(frame).position();
            if self.config.flags.contains(ManagerFlags::TRANSPARENT_DRAG) {
                self.host.set_floating_frame_alpha(frame, 255);
            }
        } else {
            tracing::debug!(pane = ?id, "floating pane docked");
            if self.has_maximized {
                self.restore_maximized_pane();
            }
        }

        self.update();
        self.hide_hint();
    }

    /// The host resized or moved a floating frame to `rect`.
    pub fn on_floating_pane_resized(&mut self, window: W, rect: Rect) {
        let Some(idx) = self.index_of_window(window) else {
            return;
        };
        let Some(frame) = self.panes[idx].frame else {
            return;
        };
        let outer = self.host.floating_frame_rect(frame).size();
        let client = self.host.floating_frame_client_size(frame);
        let pane = &mut self.panes[idx];
        pane.floating_client_size = Size::new(
            rect.width - (outer.width - client.width),
            rect.height - (outer.height - client.height),
        );
        pane.floating_pos = rect.position();
    }

    /// The user asked to close a floating frame. Returns `false` when the
    /// close was vetoed.
    pub fn on_floating_pane_closed(&mut self, window: W) -> bool {
        let Some(id) = self.pane(window).map(Pane::id) else {
            return true;
        };
        if self.emit(DockEvent::PaneClose { pane: id, window }) == EventResponse::Veto {
            return false;
        }
        if self.pane_by_id(id).is_some() {
            self.close_pane(id);
        }
        true
    }

    pub fn on_floating_pane_activated(&mut self, window: W) {
        if self.config.flags.contains(ManagerFlags::ALLOW_ACTIVE_PANE)
            && self.pane(window).is_some()
        {
            self.set_active_pane(window);
        }
    }
}
