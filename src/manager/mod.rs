//! The dock manager: owns the panes, derives docks and UI parts from them and
//! drives the host's windows and floating frames.
//!
//! Mutations mark the layout dirty; nothing is laid out until [`DockManager::update`]
//! (or [`DockManager::update_if_dirty`]) runs. Pointer handling lives in
//! `interaction`, sash commits in `resize`.

mod interaction;
mod resize;

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::config::{DockConfig, ManagerFlags};
use crate::dock::{Dock, insert_dock_layer, insert_dock_row, insert_pane_slot, remove_pane_from_docks};
use crate::drop::{DropContext, hit_test, pane_part};
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::hint::HintFader;
use crate::host::{DockEvent, DockEventSink, DockHost, EventResponse};
use crate::layout::{Layout, LayoutContext, UiPart, layout_all};
use crate::pane::{DockDirection, Pane, PaneId, PaneState, WindowHandle};
use crate::perspective::{self, PerspectiveReader, Record};
use crate::snapshot::LayoutSnapshot;

pub use interaction::{Action, ButtonState, CursorKind};

static NAME_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// How far [`DockManager::insert_pane`] shifts existing panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertLevel {
    /// Open a slot at `dock_pos` in the pane's row.
    Pane,
    /// Open a row at `dock_row` in the pane's layer.
    Row,
    /// Open a layer at `dock_layer` on the pane's side.
    Dock,
}

pub struct DockManager<W, H> {
    host: H,
    config: DockConfig,
    panes: Vec<Pane<W>>,
    docks: Vec<Dock>,
    layout: Option<Layout>,
    events: Option<Box<dyn DockEventSink<W>>>,
    next_id: u64,

    has_maximized: bool,
    dirty: bool,
    repaint: bool,
    update_on_restore: bool,

    action: Action,
    action_start: Point,
    action_offset: Point,
    action_part: Option<usize>,
    /// Pane being dragged, floated or redocked by the current action.
    action_pane: Option<PaneId>,
    /// Outline of a deferred sash move.
    action_hint_rect: Rect,
    /// Part index kept across the relayouts of a live resize.
    drag_item: Option<usize>,
    hover_button: Option<usize>,
    last_mouse_move: Option<Point>,
    captured: bool,
    hint: HintFader,
}

impl<W: WindowHandle, H: DockHost<W>> DockManager<W, H> {
    pub fn new(host: H, config: DockConfig) -> Self {
        let hint = HintFader::new(
            config.hint_fade_max,
            Duration::from_millis(config.hint_fade_interval_ms),
        );
        Self {
            host,
            config,
            panes: Vec::new(),
            docks: Vec::new(),
            layout: None,
            events: None,
            next_id: 1,
            has_maximized: false,
            dirty: false,
            repaint: false,
            update_on_restore: false,
            action: Action::None,
            action_start: Point::default(),
            action_offset: Point::default(),
            action_part: None,
            action_pane: None,
            action_hint_rect: Rect::default(),
            drag_item: None,
            hover_button: None,
            last_mouse_move: None,
            captured: false,
            hint,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn set_event_sink(&mut self, sink: impl DockEventSink<W> + 'static) {
        self.events = Some(Box::new(sink));
    }

    pub fn flags(&self) -> ManagerFlags {
        self.config.flags
    }

    pub fn set_flags(&mut self, flags: ManagerFlags) {
        self.config.flags = flags;
        self.dirty = true;
    }

    pub fn set_dock_size_constraint(&mut self, width_pct: f64, height_pct: f64) {
        self.config.set_dock_size_constraint(width_pct, height_pct);
        self.dirty = true;
    }

    pub fn dock_size_constraint(&self) -> (f64, f64) {
        (self.config.dock_constraint_x, self.config.dock_constraint_y)
    }

    // Lookups.

    pub fn all_panes(&self) -> &[Pane<W>] {
        &self.panes
    }

    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    /// UI parts of the last layout pass.
    pub fn ui_parts(&self) -> &[UiPart] {
        self.layout
            .as_ref()
            .map_or(&[][..], |layout| layout.parts.as_slice())
    }

    pub fn pane(&self, window: W) -> Option<&Pane<W>> {
        self.panes.iter().find(|pane| pane.window == Some(window))
    }

    pub fn pane_by_name(&self, name: &str) -> Option<&Pane<W>> {
        self.panes.iter().find(|pane| pane.name == name)
    }

    pub fn pane_by_id(&self, id: PaneId) -> Option<&Pane<W>> {
        self.panes.iter().find(|pane| pane.id == id)
    }

    fn index_of_window(&self, window: W) -> Option<usize> {
        self.panes.iter().position(|pane| pane.window == Some(window))
    }

    fn index_of(&self, id: PaneId) -> Option<usize> {
        self.panes.iter().position(|pane| pane.id == id)
    }

    pub fn hit_test(&self, pt: Point) -> Option<&UiPart> {
        hit_test(self.ui_parts(), pt).map(|idx| &self.ui_parts()[idx])
    }

    /// Border part of the pane (or its body when it has no border).
    pub fn pane_part(&self, id: PaneId) -> Option<&UiPart> {
        pane_part(self.ui_parts(), id).map(|idx| &self.ui_parts()[idx])
    }

    pub fn has_maximized(&self) -> bool {
        self.has_maximized
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether anything visible changed since the last call.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    pub fn hint(&self) -> &HintFader {
        &self.hint
    }

    // Registry.

    /// Registers `window` with the given pane settings.
    ///
    /// Fails when the window is already managed. Does not lay out.
    pub fn add_pane(&mut self, window: W, pane: Pane<W>) -> bool {
        if self.index_of_window(window).is_some() {
            tracing::warn!(?window, "window is already managed");
            return false;
        }

        let duplicate = !pane.name.is_empty() && self.pane_by_name(&pane.name).is_some();
        if duplicate {
            tracing::warn!(name = %pane.name, "a pane with that name already exists");
        }

        if pane.is_docked() {
            self.restore_maximized_pane();
        }

        let mut pane = pane;
        if let Some(toolbar) = self.host.toolbar(window) {
            let default_dock = Pane::<W>::new().state & PaneState::DOCKABLE;
            if pane.state & PaneState::DOCKABLE == default_dock {
                pane = match toolbar.orientation() {
                    Some(Orientation::Vertical) => pane.top_dockable(false).bottom_dockable(false),
                    Some(Orientation::Horizontal) => pane.left_dockable(false).right_dockable(false),
                    None => pane,
                };
            } else if !toolbar.is_pane_valid(pane.state) {
                tracing::warn!(?window, "toolbar orientation and pane docking flags disagree");
                debug_assert!(false, "toolbar orientation and pane docking flags disagree");
            }
            pane.set_flag(PaneState::GRIPPER, false);
        }

        pane.id = PaneId(self.next_id);
        self.next_id += 1;
        pane.window = Some(window);
        pane.frame = None;

        if pane.name.is_empty() || duplicate {
            pane.name = self.synthesize_name(window);
        }
        pane.dock_proportion = pane.normalized_proportion();
        if pane.best_size == Size::DEFAULT {
            pane.best_size = self
                .host
                .window_size(window)
                .inc_to(self.host.window_best_size(window))
                .inc_to(pane.min_size);
        }

        tracing::debug!(pane = ?pane.id, name = %pane.name, "added pane");
        self.panes.push(pane);
        self.dirty = true;
        true
    }

    /// Adds a pane with default settings on the given side. `Center` makes it
    /// the center pane.
    pub fn add_pane_at(&mut self, window: W, direction: DockDirection, caption: &str) -> bool {
        let pane = Pane::new().caption(caption);
        let pane = match direction {
            DockDirection::Center => pane.center_pane(),
            DockDirection::None => pane,
            side => pane.direction(side),
        };
        self.add_pane(window, pane)
    }

    /// Adds a pane and docks it wherever a drop at `drop_pos` would put it.
    pub fn add_pane_floating(&mut self, window: W, pane: Pane<W>, drop_pos: Point) -> bool {
        if !self.add_pane(window, pane) {
            return false;
        }
        if let Some(id) = self.pane(window).map(Pane::id) {
            self.drop_live(id, drop_pos, Point::new(0, 0));
        }
        true
    }

    /// Makes room for `pane` at the requested level, then adds it (or moves
    /// the existing pane for `window` there).
    pub fn insert_pane(&mut self, window: W, pane: Pane<W>, level: InsertLevel) -> bool {
        match level {
            InsertLevel::Pane => insert_pane_slot(
                &mut self.panes,
                pane.dock_direction,
                pane.dock_layer,
                pane.dock_row,
                pane.dock_pos,
            ),
            InsertLevel::Row => insert_dock_row(
                &mut self.panes,
                pane.dock_direction,
                pane.dock_layer,
                pane.dock_row,
            ),
            InsertLevel::Dock => {
                insert_dock_layer(&mut self.panes, pane.dock_direction, pane.dock_layer)
            }
        }

        let Some(idx) = self.index_of_window(window) else {
            return self.add_pane(window, pane);
        };

        if pane.is_floating() {
            let existing = &mut self.panes[idx];
            existing.set_flag(PaneState::FLOATING, true);
            if !pane.floating_pos.is_default() {
                existing.floating_pos = pane.floating_pos;
            }
            if pane.floating_size != Size::DEFAULT {
                existing.floating_size = pane.floating_size;
            }
            if pane.floating_client_size != Size::DEFAULT {
                existing.floating_client_size = pane.floating_client_size;
            }
        } else {
            self.restore_maximized_pane();
            let existing = &mut self.panes[idx];
            existing.dock_direction = pane.dock_direction;
            existing.dock_layer = pane.dock_layer;
            existing.dock_row = pane.dock_row;
            existing.dock_pos = pane.dock_pos;
        }
        self.dirty = true;
        true
    }

    /// Stops managing `window`. The window itself is left alone apart from
    /// being moved out of its floating frame.
    pub fn detach_pane(&mut self, window: W) -> bool {
        let Some(idx) = self.index_of_window(window) else {
            return false;
        };
        let id = self.panes[idx].id;

        if let Some(frame) = self.panes[idx].frame.take() {
            if self.host.is_floating_frame_shown(frame) {
                self.host.show_floating_frame(frame, false);
            }
            if self.action_pane == Some(id) {
                self.action_pane = None;
            }
            self.host.reparent_to_root(window);
            self.host.destroy_floating_frame(frame);
        }

        if let Some(layout) = self.layout.as_mut() {
            let mut idx = 0;
            while idx < layout.parts.len() {
                if layout.parts[idx].pane != Some(id) {
                    idx += 1;
                    continue;
                }
                layout.parts.remove(idx);
                self.action_part = shift_part_index(self.action_part, idx);
                self.drag_item = shift_part_index(self.drag_item, idx);
                self.hover_button = shift_part_index(self.hover_button, idx);
            }
        }
        remove_pane_from_docks(&mut self.docks, id, None);

        let pane = self.panes.remove(idx);
        tracing::debug!(pane = ?id, name = %pane.name, "detached pane");
        self.dirty = true;
        true
    }

    /// Applies `edit` to the pane and marks the layout dirty.
    pub fn edit_pane(&mut self, id: PaneId, edit: impl FnOnce(&mut Pane<W>)) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        edit(&mut self.panes[idx]);
        self.dirty = true;
        true
    }

    // Pane operations.

    /// Hides the pane, or detaches and destroys it when it is
    /// destroy-on-close.
    pub fn close_pane(&mut self, id: PaneId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let in_action = self.action_pane == Some(id)
            || self.action_part().and_then(|part| part.pane) == Some(id);
        if in_action {
            self.cancel_action();
        }
        if self.panes[idx].is_maximized() {
            self.restore_pane(id);
        }

        let window = self.panes[idx].window;
        if let Some(window) = window {
            if self.host.is_window_shown(window) {
                self.host.show_window(window, false);
            }
            self.host.reparent_to_root(window);
        }
        if let Some(frame) = self.panes[idx].frame.take() {
            self.host.destroy_floating_frame(frame);
        }

        if self.panes[idx].is_destroy_on_close() {
            if let Some(window) = window {
                self.detach_pane(window);
                self.host.destroy_window(window);
            }
        } else {
            self.panes[idx].set_flag(PaneState::HIDDEN, true);
        }
        tracing::debug!(pane = ?id, "closed pane");
        self.dirty = true;
    }

    /// Shows only this pane among the docked, non-toolbar panes. Their
    /// visibility is remembered for [`DockManager::restore_pane`].
    pub fn maximize_pane(&mut self, id: PaneId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        for pane in self.panes.iter_mut() {
            if !pane.is_toolbar() && !pane.is_floating() {
                pane.set_flag(PaneState::MAXIMIZED, false);
                let hidden = pane.has_flag(PaneState::HIDDEN);
                pane.set_flag(PaneState::SAVED_HIDDEN, hidden);
                pane.set_flag(PaneState::HIDDEN, true);
            }
        }

        let pane = &mut self.panes[idx];
        pane.set_flag(PaneState::MAXIMIZED, true);
        pane.set_flag(PaneState::HIDDEN, false);
        self.has_maximized = true;
        self.show_pane_window(idx);
        self.dirty = true;
    }

    pub fn restore_pane(&mut self, id: PaneId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        for pane in self.panes.iter_mut() {
            if !pane.is_toolbar() && !pane.is_floating() {
                let hidden = pane.has_flag(PaneState::SAVED_HIDDEN);
                pane.set_flag(PaneState::HIDDEN, hidden);
            }
        }
        self.panes[idx].set_flag(PaneState::MAXIMIZED, false);
        self.has_maximized = false;
        self.show_pane_window(idx);
        self.dirty = true;
    }

    pub fn restore_maximized_pane(&mut self) {
        if let Some(id) = self.panes.iter().find(|p| p.is_maximized()).map(Pane::id) {
            self.restore_pane(id);
        }
    }

    fn show_pane_window(&mut self, idx: usize) {
        if let Some(window) = self.panes[idx].window {
            if !self.host.is_window_shown(window) {
                self.host.show_window(window, true);
            }
        }
    }

    /// Marks the pane owning `window` active and every other pane inactive.
    pub fn set_active_pane(&mut self, window: W) {
        let mut active = None;
        for pane in self.panes.iter_mut() {
            let is_target = pane.window == Some(window);
            pane.set_flag(PaneState::ACTIVE, is_target);
            if is_target {
                active = Some(pane.id);
            }
        }
        if let Some(pane) = active {
            self.emit(DockEvent::PaneActivated { pane, window });
        }
        self.repaint = true;
    }

    fn emit(&mut self, event: DockEvent<W>) -> EventResponse {
        match self.events.as_mut() {
            Some(sink) => sink.on_dock_event(&event),
            None => EventResponse::Proceed,
        }
    }

    // Layout.

    pub fn update_if_dirty(&mut self) {
        if self.dirty {
            self.update();
        }
    }

    /// Rebuilds docks and UI parts, syncs floating frames and window
    /// visibility with the panes and solves the geometry.
    pub fn update(&mut self) {
        if self.host.is_minimized() {
            tracing::debug!("managed window minimized, deferring layout");
            self.update_on_restore = true;
            return;
        }

        self.hover_button = None;
        self.action_part = None;

        for idx in 0..self.panes.len() {
            if self.panes[idx].is_floating() {
                continue;
            }
            let Some(frame) = self.panes[idx].frame.take() else {
                continue;
            };
            let id = self.panes[idx].id;
            if self.action == Action::DragFloatingPane && self.action_pane == Some(id) {
                self.release_pointer();
                self.action = Action::None;
                self.action_pane = None;
            }
            if self.host.is_floating_frame_shown(frame) {
                self.host.show_floating_frame(frame, false);
            }
            if let Some(window) = self.panes[idx].window {
                self.host.reparent_to_root(window);
            }
            self.host.destroy_floating_frame(frame);
        }

        let client_size = self.host.client_size();
        let host = &self.host;
        let window_size = |window: W| host.window_size(window);
        let ctx = LayoutContext {
            config: &self.config,
            client_size,
            has_maximized: self.has_maximized,
            window_size: &window_size,
        };
        let layout = layout_all(&ctx, &mut self.panes, &mut self.docks, false);

        let transparent_drag = self.config.flags.contains(ManagerFlags::TRANSPARENT_DRAG);
        let allow_active = self.config.flags.contains(ManagerFlags::ALLOW_ACTIVE_PANE);
        for pane in self.panes.iter_mut() {
            if pane.is_floating() {
                match pane.frame {
                    None => {
                        let frame = self.host.create_floating_frame(pane);
                        if self.action == Action::DragFloatingPane && transparent_drag {
                            self.host.set_floating_frame_alpha(frame, 150);
                        }
                        pane.frame = Some(frame);
                        if pane.is_shown() && !self.host.is_floating_frame_shown(frame) {
                            self.host.show_floating_frame(frame, true);
                        }
                    }
                    Some(frame) => sync_floating_frame(&mut self.host, pane, frame),
                }
            } else if let Some(window) = pane.window {
                if self.host.is_window_shown(window) != pane.is_shown() {
                    self.host.show_window(window, pane.is_shown());
                }
            }

            if !allow_active {
                pane.set_flag(PaneState::ACTIVE, false);
            }
        }

        self.layout = Some(layout);
        self.do_frame_layout();
        self.dirty = false;
        self.repaint = true;
    }

    /// Solves the current sizer tree into the managed area and places the
    /// docked windows.
    fn do_frame_layout(&mut self) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        let area = Rect::from_parts(Point::new(0, 0), self.host.client_size());
        layout.solve(area, &mut self.panes, &mut self.docks);

        for pane in &self.panes {
            let Some(window) = pane.window else {
                continue;
            };
            if pane.is_docked() && pane.is_shown() {
                self.host.place_window(window, pane.rect);
            }
        }
    }

    /// The managed area changed size.
    pub fn on_size(&mut self) {
        if self.update_on_restore {
            self.update_on_restore = false;
            self.update();
        } else {
            self.do_frame_layout();
            self.repaint = true;
        }
    }

    // Drops and hints.

    fn drop_context<'a>(
        &'a self,
        window_size: &'a dyn Fn(W) -> Size,
        toolbar_hint: &'a dyn Fn(W, DockDirection) -> Option<Size>,
    ) -> DropContext<'a, W> {
        DropContext {
            layout: LayoutContext {
                config: &self.config,
                client_size: self.host.client_size(),
                has_maximized: self.has_maximized,
                window_size,
            },
            parts: self.ui_parts(),
            docks: &self.docks,
            panes: &self.panes,
            toolbar_hint,
        }
    }

    /// Rectangle the pane would occupy when dropped at `pt`, empty when it
    /// would not dock.
    pub fn calculate_hint_rect(&self, window: W, pt: Point, offset: Point) -> Rect {
        let Some(id) = self.pane(window).map(Pane::id) else {
            return Rect::default();
        };
        let window_size = |window: W| self.host.window_size(window);
        let toolbar_hint = |window: W, direction: DockDirection| {
            self.host
                .toolbar(window)
                .map(|toolbar| toolbar.hint_size(direction))
        };
        self.drop_context(&window_size, &toolbar_hint)
            .calculate_hint_rect(id, pt, offset)
    }

    /// Resolves a drop of the pane on the live state.
    fn drop_live(&mut self, id: PaneId, pt: Point, offset: Point) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let parts = self.ui_parts().to_vec();
        let docks = self.docks.clone();
        let panes = self.panes.clone();
        let mut target = self.panes[idx].clone();

        let host = &self.host;
        let window_size = |window: W| host.window_size(window);
        let toolbar_hint = |window: W, direction: DockDirection| {
            host.toolbar(window).map(|toolbar| toolbar.hint_size(direction))
        };
        let ctx = DropContext {
            layout: LayoutContext {
                config: &self.config,
                client_size: host.client_size(),
                has_maximized: self.has_maximized,
                window_size: &window_size,
            },
            parts: &parts,
            docks: &docks,
            panes: &panes,
            toolbar_hint: &toolbar_hint,
        };

        let dropped = ctx.do_drop(&docks, &mut self.panes, &mut target, pt, offset);
        if dropped {
            self.panes[idx] = target;
            self.dirty = true;
        }
        dropped
    }

    fn draw_hint_rect(&mut self, window: W, pt: Point, offset: Point) {
        let rect = self.calculate_hint_rect(window, pt, offset);
        self.show_hint(rect);
    }

    /// Shows the docking hint at `rect`; an empty rectangle hides it.
    pub fn show_hint(&mut self, rect: Rect) {
        let flags = self.config.flags;
        let fade = flags.contains(ManagerFlags::HINT_FADE)
            && !flags.contains(ManagerFlags::RECTANGLE_HINT);
        if self.hint.update(rect, fade, Instant::now()) {
            self.repaint = true;
        }
    }

    pub fn hide_hint(&mut self) {
        if self.hint.is_visible() {
            self.repaint = true;
        }
        self.hint.hide();
    }

    /// Advances the hint fade. Returns whether a repaint is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.hint.tick(now);
        if changed {
            self.repaint = true;
        }
        changed
    }

    // Persistence.

    pub fn save_perspective(&self) -> String {
        perspective::save_perspective(&self.panes, &self.docks)
    }

    /// Restores a perspective produced by [`DockManager::save_perspective`].
    ///
    /// Panes are matched by name; records for unknown names are skipped.
    /// Records before a malformed one stay applied.
    pub fn load_perspective(&mut self, text: &str, update: bool) -> bool {
        let reader = match PerspectiveReader::new(text) {
            Ok(reader) => reader,
            Err(err) => {
                tracing::warn!(%err, "cannot load perspective");
                return false;
            }
        };

        for pane in self.panes.iter_mut() {
            if pane.is_dockable() {
                pane.set_flag(PaneState::FLOATING, false);
            }
            pane.set_flag(PaneState::HIDDEN, true);
        }
        self.docks.clear();
        self.has_maximized = false;
        self.dirty = true;

        for record in reader.records::<W>() {
            match record {
                Ok(Record::DockSize(dock)) => self.docks.push(dock),
                Ok(Record::Pane(loaded)) => {
                    if loaded.is_maximized() {
                        self.has_maximized = true;
                    }
                    match self.panes.iter_mut().find(|p| p.name == loaded.name) {
                        Some(pane) => pane.safe_set(loaded),
                        None => tracing::debug!(name = %loaded.name, "no pane for perspective record"),
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "malformed perspective record");
                    return false;
                }
            }
        }

        if update {
            self.update();
        }
        true
    }

    pub fn save_layout(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.panes, &self.docks)
    }

    /// Applies a snapshot to the panes with matching names. Dock sizes come
    /// back through the panes, so the dock list is cleared.
    pub fn load_layout(&mut self, snapshot: &LayoutSnapshot) {
        let mut panes = self.panes.clone();
        let mut maximized = None;
        for layout in &snapshot.panes {
            match panes.iter_mut().find(|pane| pane.name == layout.name) {
                Some(pane) => {
                    layout.apply_to(pane);
                    if layout.is_maximized {
                        maximized = Some(pane.id);
                    }
                }
                None => tracing::debug!(name = %layout.name, "no pane for snapshot entry"),
            }
        }
        self.panes = panes;
        if let Some(id) = maximized {
            self.maximize_pane(id);
        }
        self.docks.clear();
        self.dirty = true;
    }

    // Pointer capture.

    fn capture_pointer(&mut self) {
        if !self.captured {
            self.host.capture_pointer();
            self.captured = true;
        }
    }

    fn release_pointer(&mut self) {
        if self.captured {
            self.host.release_pointer();
            self.captured = false;
        }
    }

    pub fn has_capture(&self) -> bool {
        self.captured
    }

    fn synthesize_name(&self, window: W) -> String {
        let mut hasher = DefaultHasher::new();
        window.hash(&mut hasher);
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        loop {
            let seq = NAME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            let name = format!(
                "{:08x}{:08x}{:08x}{:08x}",
                hasher.finish() as u32,
                stamp as u32,
                seq as u32,
                self.panes.len() as u32
            );
            if self.pane_by_name(&name).is_none() {
                return name;
            }
        }
    }
}

/// Moves, resizes and relabels an existing floating frame to match its pane.
fn sync_floating_frame<W, H: DockHost<W>>(
    host: &mut H,
    pane: &Pane<W>,
    frame: crate::host::FrameId,
) {
    let rect = host.floating_frame_rect(frame);
    let client_size = pane.floating_client_size;
    let moved = rect.position() != pane.floating_pos
        || (pane.floating_size != Size::DEFAULT && rect.size() != pane.floating_size)
        || (client_size != Size::DEFAULT
            && host.floating_frame_client_size(frame) != client_size);
    if moved {
        host.move_floating_frame(frame, pane.floating_pos);
        if client_size != Size::DEFAULT {
            host.set_floating_frame_client_size(frame, client_size);
        } else {
            let size = Size::new(
                if pane.floating_size.width < 0 {
                    rect.width
                } else {
                    pane.floating_size.width
                },
                if pane.floating_size.height < 0 {
                    rect.height
                } else {
                    pane.floating_size.height
                },
            );
            host.resize_floating_frame(frame, size);
        }
    }

    host.set_floating_frame_resizable(frame, !pane.is_fixed());
    host.set_floating_frame_title(frame, &pane.caption);
    if host.is_floating_frame_shown(frame) != pane.is_shown() {
        host.show_floating_frame(frame, pane.is_shown());
    }
}

/// Index bookkeeping after the part at `removed` is deleted.
fn shift_part_index(index: Option<usize>, removed: usize) -> Option<usize> {
    match index {
        Some(idx) if idx == removed => None,
        Some(idx) if idx > removed => Some(idx - 1),
        other => other,
    }
}

