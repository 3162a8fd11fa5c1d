//! Pane descriptors: per-window docking metadata.
//!
//! A [`Pane`] is a plain value. The manager owns the authoritative copies and
//! hands out shared references; mutation goes through
//! [`DockManager::edit_pane`](crate::manager::DockManager::edit_pane) so the
//! layout is always marked dirty afterwards.

use std::fmt::Debug;
use std::hash::Hash;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DOCK_PROPORTION, TOOLBAR_LAYER};
use crate::geometry::{Point, Rect, Size};
use crate::host::FrameId;

/// Opaque window handle managed by a dock manager.
pub trait WindowHandle: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> WindowHandle for T {}

/// Stable pane identity. Docks and UI parts refer to panes through this
/// handle so they survive reordering of the pane collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PaneId(pub(crate) u64);

impl PaneId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockDirection {
    None = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    #[default]
    Left = 4,
    Center = 5,
}

impl DockDirection {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Top),
            2 => Some(Self::Right),
            3 => Some(Self::Bottom),
            4 => Some(Self::Left),
            5 => Some(Self::Center),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Top and bottom docks lay their panes out left to right.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Center)
    }
}

bitflags! {
    /// Pane state bits. The numeric values are part of the perspective
    /// format and must not change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaneState: u32 {
        const FLOATING         = 1 << 0;
        const HIDDEN           = 1 << 1;
        const LEFT_DOCKABLE    = 1 << 2;
        const RIGHT_DOCKABLE   = 1 << 3;
        const TOP_DOCKABLE     = 1 << 4;
        const BOTTOM_DOCKABLE  = 1 << 5;
        const FLOATABLE        = 1 << 6;
        const MOVABLE          = 1 << 7;
        const RESIZABLE        = 1 << 8;
        const PANE_BORDER      = 1 << 9;
        const CAPTION          = 1 << 10;
        const GRIPPER          = 1 << 11;
        const DESTROY_ON_CLOSE = 1 << 12;
        const TOOLBAR          = 1 << 13;
        const ACTIVE           = 1 << 14;
        const GRIPPER_TOP      = 1 << 15;
        const MAXIMIZED        = 1 << 16;
        const DOCK_FIXED       = 1 << 17;

        const BUTTON_CLOSE     = 1 << 21;
        const BUTTON_MAXIMIZE  = 1 << 22;
        const BUTTON_MINIMIZE  = 1 << 23;
        const BUTTON_PIN       = 1 << 24;

        const BUTTON_CUSTOM1   = 1 << 26;
        const BUTTON_CUSTOM2   = 1 << 27;
        const BUTTON_CUSTOM3   = 1 << 28;

        /// Internal: visibility before a maximize.
        const SAVED_HIDDEN     = 1 << 30;
        /// Internal: the pane currently being dragged in a fixed dock.
        const ACTION_PANE      = 1 << 31;

        const DOCKABLE = Self::LEFT_DOCKABLE.bits()
            | Self::RIGHT_DOCKABLE.bits()
            | Self::TOP_DOCKABLE.bits()
            | Self::BOTTOM_DOCKABLE.bits();
    }
}

/// Caption buttons, in the order they appear from left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneButton {
    MaximizeRestore,
    Pin,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pane<W> {
    pub(crate) id: PaneId,
    pub name: String,
    pub caption: String,
    pub(crate) window: Option<W>,
    pub(crate) frame: Option<FrameId>,

    pub dock_direction: DockDirection,
    pub dock_layer: i32,
    pub dock_row: i32,
    pub dock_pos: i32,
    pub dock_proportion: i32,
    /// Remembered dock thickness, 0 when unknown.
    pub dock_size: i32,

    pub best_size: Size,
    pub min_size: Size,
    pub max_size: Size,

    pub floating_pos: Point,
    pub floating_size: Size,
    pub floating_client_size: Size,

    pub state: PaneState,
    pub rect: Rect,
}

impl<W> Default for Pane<W> {
    fn default() -> Self {
        Self {
            id: PaneId::default(),
            name: String::new(),
            caption: String::new(),
            window: None,
            frame: None,
            dock_direction: DockDirection::Left,
            dock_layer: 0,
            dock_row: 0,
            dock_pos: 0,
            dock_proportion: 0,
            dock_size: 0,
            best_size: Size::DEFAULT,
            min_size: Size::DEFAULT,
            max_size: Size::DEFAULT,
            floating_pos: Point::DEFAULT,
            floating_size: Size::DEFAULT,
            floating_client_size: Size::DEFAULT,
            state: PaneState::empty(),
            rect: Rect::default(),
        }
        .default_pane()
    }
}

impl<W: Copy> Pane<W> {
    pub fn window(&self) -> Option<W> {
        self.window
    }
}

impl<W> Pane<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// A pane is valid once it is bound to a window.
    pub fn is_ok(&self) -> bool {
        self.window.is_some()
    }

    pub fn has_flag(&self, flag: PaneState) -> bool {
        self.state.contains(flag)
    }

    pub fn set_flag(&mut self, flag: PaneState, on: bool) {
        self.state.set(flag, on);
    }

    pub fn is_fixed(&self) -> bool {
        !self.has_flag(PaneState::RESIZABLE)
    }
    pub fn is_resizable(&self) -> bool {
        self.has_flag(PaneState::RESIZABLE)
    }
    pub fn is_shown(&self) -> bool {
        !self.has_flag(PaneState::HIDDEN)
    }
    pub fn is_floating(&self) -> bool {
        self.has_flag(PaneState::FLOATING)
    }
    pub fn is_docked(&self) -> bool {
        !self.is_floating()
    }
    pub fn is_toolbar(&self) -> bool {
        self.has_flag(PaneState::TOOLBAR)
    }
    pub fn is_floatable(&self) -> bool {
        self.has_flag(PaneState::FLOATABLE)
    }
    pub fn is_movable(&self) -> bool {
        self.has_flag(PaneState::MOVABLE)
    }
    pub fn is_maximized(&self) -> bool {
        self.has_flag(PaneState::MAXIMIZED)
    }
    pub fn is_active(&self) -> bool {
        self.has_flag(PaneState::ACTIVE)
    }
    pub fn is_destroy_on_close(&self) -> bool {
        self.has_flag(PaneState::DESTROY_ON_CLOSE)
    }
    pub fn is_dockable(&self) -> bool {
        self.state.intersects(PaneState::DOCKABLE)
    }
    pub fn has_caption(&self) -> bool {
        self.has_flag(PaneState::CAPTION)
    }
    pub fn has_gripper(&self) -> bool {
        self.has_flag(PaneState::GRIPPER)
    }
    pub fn has_gripper_top(&self) -> bool {
        self.has_flag(PaneState::GRIPPER_TOP)
    }
    pub fn has_border(&self) -> bool {
        self.has_flag(PaneState::PANE_BORDER)
    }
    pub fn has_close_button(&self) -> bool {
        self.has_flag(PaneState::BUTTON_CLOSE)
    }
    pub fn has_maximize_button(&self) -> bool {
        self.has_flag(PaneState::BUTTON_MAXIMIZE)
    }
    pub fn has_pin_button(&self) -> bool {
        self.has_flag(PaneState::BUTTON_PIN)
    }

    /// Whether the pane may dock on the given side. Only the four outer sides
    /// are ever accepted as a drop result.
    pub fn is_dockable_to(&self, direction: DockDirection) -> bool {
        match direction {
            DockDirection::Top => self.has_flag(PaneState::TOP_DOCKABLE),
            DockDirection::Bottom => self.has_flag(PaneState::BOTTOM_DOCKABLE),
            DockDirection::Left => self.has_flag(PaneState::LEFT_DOCKABLE),
            DockDirection::Right => self.has_flag(PaneState::RIGHT_DOCKABLE),
            DockDirection::Center | DockDirection::None => false,
        }
    }

    /// Copies every layout field from `source`, keeping this pane's identity,
    /// window and floating frame.
    pub fn safe_set(&mut self, mut source: Pane<W>) {
        source.id = self.id;
        source.window = self.window.take();
        source.frame = self.frame;
        *self = source;
    }

    // Builders.

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn direction(mut self, direction: DockDirection) -> Self {
        self.dock_direction = direction;
        self
    }

    pub fn left(self) -> Self {
        self.direction(DockDirection::Left)
    }
    pub fn right(self) -> Self {
        self.direction(DockDirection::Right)
    }
    pub fn top(self) -> Self {
        self.direction(DockDirection::Top)
    }
    pub fn bottom(self) -> Self {
        self.direction(DockDirection::Bottom)
    }
    pub fn center(self) -> Self {
        self.direction(DockDirection::Center)
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.dock_layer = layer;
        self
    }

    pub fn row(mut self, row: i32) -> Self {
        self.dock_row = row;
        self
    }

    pub fn position(mut self, pos: i32) -> Self {
        self.dock_pos = pos;
        self
    }

    pub fn proportion(mut self, proportion: i32) -> Self {
        self.dock_proportion = proportion;
        self
    }

    pub fn best_size(mut self, size: Size) -> Self {
        self.best_size = size;
        self
    }

    pub fn min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    pub fn max_size(mut self, size: Size) -> Self {
        self.max_size = size;
        self
    }

    pub fn floating_position(mut self, pos: Point) -> Self {
        self.floating_pos = pos;
        self
    }

    pub fn floating_size(mut self, size: Size) -> Self {
        self.floating_size = size;
        self
    }

    fn with_flag(mut self, flag: PaneState, on: bool) -> Self {
        self.state.set(flag, on);
        self
    }

    pub fn hide(self) -> Self {
        self.with_flag(PaneState::HIDDEN, true)
    }
    pub fn show(self, visible: bool) -> Self {
        self.with_flag(PaneState::HIDDEN, !visible)
    }
    pub fn float(self) -> Self {
        self.with_flag(PaneState::FLOATING, true)
    }
    pub fn dock(self) -> Self {
        self.with_flag(PaneState::FLOATING, false)
    }
    pub fn resizable(self, on: bool) -> Self {
        self.with_flag(PaneState::RESIZABLE, on)
    }
    pub fn fixed(self) -> Self {
        self.resizable(false)
    }
    pub fn caption_visible(self, on: bool) -> Self {
        self.with_flag(PaneState::CAPTION, on)
    }
    pub fn pane_border(self, on: bool) -> Self {
        self.with_flag(PaneState::PANE_BORDER, on)
    }
    pub fn gripper(self, on: bool) -> Self {
        self.with_flag(PaneState::GRIPPER, on)
    }
    pub fn gripper_top(self, on: bool) -> Self {
        self.with_flag(PaneState::GRIPPER_TOP, on)
    }
    pub fn close_button(self, on: bool) -> Self {
        self.with_flag(PaneState::BUTTON_CLOSE, on)
    }
    pub fn maximize_button(self, on: bool) -> Self {
        self.with_flag(PaneState::BUTTON_MAXIMIZE, on)
    }
    pub fn pin_button(self, on: bool) -> Self {
        self.with_flag(PaneState::BUTTON_PIN, on)
    }
    pub fn destroy_on_close(self, on: bool) -> Self {
        self.with_flag(PaneState::DESTROY_ON_CLOSE, on)
    }
    pub fn top_dockable(self, on: bool) -> Self {
        self.with_flag(PaneState::TOP_DOCKABLE, on)
    }
    pub fn bottom_dockable(self, on: bool) -> Self {
        self.with_flag(PaneState::BOTTOM_DOCKABLE, on)
    }
    pub fn left_dockable(self, on: bool) -> Self {
        self.with_flag(PaneState::LEFT_DOCKABLE, on)
    }
    pub fn right_dockable(self, on: bool) -> Self {
        self.with_flag(PaneState::RIGHT_DOCKABLE, on)
    }
    pub fn dockable(self, on: bool) -> Self {
        self.with_flag(PaneState::DOCKABLE, on)
    }
    pub fn floatable(self, on: bool) -> Self {
        self.with_flag(PaneState::FLOATABLE, on)
    }
    pub fn movable(self, on: bool) -> Self {
        self.with_flag(PaneState::MOVABLE, on)
    }
    pub fn dock_fixed(self, on: bool) -> Self {
        self.with_flag(PaneState::DOCK_FIXED, on)
    }

    // Presets.

    /// Dockable everywhere, floatable, movable, resizable, with caption,
    /// border and close button.
    pub fn default_pane(mut self) -> Self {
        self.state |= PaneState::DOCKABLE
            | PaneState::FLOATABLE
            | PaneState::MOVABLE
            | PaneState::RESIZABLE
            | PaneState::CAPTION
            | PaneState::PANE_BORDER
            | PaneState::BUTTON_CLOSE;
        self
    }

    /// The central content pane: no caption, not dockable elsewhere.
    pub fn center_pane(mut self) -> Self {
        self.state = PaneState::empty();
        self.center().pane_border(true).resizable(true)
    }

    pub fn toolbar_pane(mut self) -> Self {
        self = self.default_pane();
        self.state |= PaneState::TOOLBAR | PaneState::GRIPPER;
        self.state &= !(PaneState::RESIZABLE | PaneState::CAPTION);
        if self.dock_layer == 0 {
            self.dock_layer = TOOLBAR_LAYER;
        }
        self
    }

    /// Proportion with the "unset" sentinel resolved.
    pub(crate) fn normalized_proportion(&self) -> i32 {
        if self.dock_proportion == 0 {
            MAX_DOCK_PROPORTION
        } else {
            self.dock_proportion
        }
    }
}
