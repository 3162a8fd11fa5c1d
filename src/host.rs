//! Collaborators the manager talks to: the windowing host that owns the
//! content windows and floating frames, and the event sink that may veto
//! pane transitions.

use crate::geometry::{Orientation, Point, Rect, Size};
use crate::pane::{DockDirection, Pane, PaneButton, PaneId, PaneState};

/// Handle of a floating container created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

/// Optional capability of toolbar-like windows. Panes whose window answers
/// [`DockHost::toolbar`] get their docking flags and best size driven by it.
pub trait ToolbarCapability {
    /// `None` when the toolbar has no fixed orientation.
    fn orientation(&self) -> Option<Orientation>;

    /// Preferred size when docked on the given side.
    fn hint_size(&self, direction: DockDirection) -> Size;

    /// Whether the toolbar can honour the given pane docking flags.
    fn is_pane_valid(&self, _state: PaneState) -> bool {
        true
    }
}

/// The windowing system, as seen by the manager.
///
/// Coordinates are in the managed area's cells; floating frames are placed in
/// the same space.
pub trait DockHost<W> {
    /// Size of the managed area.
    fn client_size(&self) -> Size;

    /// Layout is postponed while this returns true.
    fn is_minimized(&self) -> bool {
        false
    }

    /// Rows taken by chrome at the bottom of the managed area (status bars).
    fn reserved_height(&self) -> i32 {
        0
    }

    fn window_size(&self, window: W) -> Size;

    fn window_best_size(&self, window: W) -> Size {
        self.window_size(window)
    }

    fn toolbar(&self, _window: W) -> Option<&dyn ToolbarCapability> {
        None
    }

    fn is_window_shown(&self, window: W) -> bool;
    fn show_window(&mut self, window: W, show: bool);

    /// Positions a docked content window.
    fn place_window(&mut self, window: W, rect: Rect);

    /// Moves a content window back under the managed root.
    fn reparent_to_root(&mut self, _window: W) {}

    /// Called for destroy-on-close panes once they are detached.
    fn destroy_window(&mut self, _window: W) {}

    fn create_floating_frame(&mut self, pane: &Pane<W>) -> FrameId;
    fn destroy_floating_frame(&mut self, frame: FrameId);
    fn floating_frame_rect(&self, frame: FrameId) -> Rect;
    fn floating_frame_client_size(&self, frame: FrameId) -> Size {
        self.floating_frame_rect(frame).size()
    }
    /// Offset of the client area from the frame's top-left corner.
    fn floating_frame_client_origin(&self, _frame: FrameId) -> Point {
        Point::new(0, 0)
    }
    fn move_floating_frame(&mut self, frame: FrameId, pos: Point);
    fn resize_floating_frame(&mut self, frame: FrameId, size: Size);
    fn set_floating_frame_client_size(&mut self, frame: FrameId, size: Size) {
        self.resize_floating_frame(frame, size);
    }
    fn is_floating_frame_shown(&self, frame: FrameId) -> bool;
    fn show_floating_frame(&mut self, frame: FrameId, show: bool);
    fn set_floating_frame_title(&mut self, _frame: FrameId, _title: &str) {}
    fn set_floating_frame_resizable(&mut self, _frame: FrameId, _resizable: bool) {}
    /// 255 is opaque.
    fn set_floating_frame_alpha(&mut self, _frame: FrameId, _alpha: u8) {}

    fn capture_pointer(&mut self) {}
    fn release_pointer(&mut self) {}
}

/// Notifications emitted by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent<W> {
    /// A caption button was clicked. Vetoing it suppresses the default
    /// handling (close, maximize, restore, pin).
    PaneButton {
        pane: PaneId,
        window: W,
        button: PaneButton,
    },
    PaneClose {
        pane: PaneId,
        window: W,
    },
    PaneMaximize {
        pane: PaneId,
        window: W,
    },
    PaneRestore {
        pane: PaneId,
        window: W,
    },
    PaneActivated {
        pane: PaneId,
        window: W,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResponse {
    #[default]
    Proceed,
    Veto,
}

pub trait DockEventSink<W> {
    fn on_dock_event(&mut self, event: &DockEvent<W>) -> EventResponse;
}

impl<W, F> DockEventSink<W> for F
where
    F: FnMut(&DockEvent<W>) -> EventResponse,
{
    fn on_dock_event(&mut self, event: &DockEvent<W>) -> EventResponse {
        self(event)
    }
}
