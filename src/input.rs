//! Routes crossterm input to a dock manager.
//!
//! Floating frames are drawn above the docked layout, so presses on a frame
//! are handled here first: its title row drags the frame and the right-most
//! title cell closes it. Everything else goes to the manager's pointer
//! handlers.

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::{Point, Rect};
use crate::host::DockHost;
use crate::manager::DockManager;
use crate::pane::{Pane, WindowHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameDrag<W> {
    window: W,
    offset: Point,
}

#[derive(Debug)]
pub struct MouseRouter<W> {
    frame_drag: Option<FrameDrag<W>>,
}

impl<W> Default for MouseRouter<W> {
    fn default() -> Self {
        Self { frame_drag: None }
    }
}

impl<W: WindowHandle> MouseRouter<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging_frame(&self) -> bool {
        self.frame_drag.is_some()
    }

    /// Dispatches a terminal event. Returns whether the layout consumed it.
    pub fn handle_event<H: DockHost<W>>(
        &mut self,
        manager: &mut DockManager<W, H>,
        event: &Event,
    ) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(manager, *mouse),
            Event::Resize(_, _) => {
                manager.on_size();
                true
            }
            Event::FocusLost => {
                manager.on_capture_lost();
                false
            }
            _ => false,
        }
    }

    pub fn handle_mouse<H: DockHost<W>>(
        &mut self,
        manager: &mut DockManager<W, H>,
        mouse: MouseEvent,
    ) -> bool {
        let pt = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((window, frame_rect)) = floating_frame_at(manager, pt) {
                    return self.press_frame(manager, window, frame_rect, pt);
                }
                manager.on_left_down(pt)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                match self.frame_drag {
                    Some(drag) => {
                        let frame = manager.pane(drag.window).and_then(Pane::frame);
                        if let Some(frame) = frame {
                            manager
                                .host_mut()
                                .move_floating_frame(frame, pt - drag.offset);
                        }
                        manager.on_floating_pane_moving(drag.window, pt);
                    }
                    None => manager.on_motion(pt),
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                match self.frame_drag.take() {
                    Some(drag) => manager.on_floating_pane_moved(drag.window, pt),
                    None => manager.on_left_up(pt),
                }
                true
            }
            MouseEventKind::Moved => {
                manager.on_motion(pt);
                false
            }
            _ => false,
        }
    }

    fn press_frame<H: DockHost<W>>(
        &mut self,
        manager: &mut DockManager<W, H>,
        window: W,
        frame_rect: Rect,
        pt: Point,
    ) -> bool {
        manager.on_floating_pane_activated(window);
        if pt.y != frame_rect.y {
            return true;
        }
        if pt.x == frame_rect.right() - 1 {
            tracing::debug!(?window, "close requested from floating frame");
            manager.on_floating_pane_closed(window);
            return true;
        }
        manager.on_floating_pane_move_start(window);
        self.frame_drag = Some(FrameDrag {
            window,
            offset: pt - frame_rect.position(),
        });
        true
    }
}

/// Top-most floating frame under `pt`. Later panes are drawn above earlier
/// ones.
fn floating_frame_at<W: WindowHandle, H: DockHost<W>>(
    manager: &DockManager<W, H>,
    pt: Point,
) -> Option<(W, Rect)> {
    manager
        .all_panes()
        .iter()
        .rev()
        .filter(|pane| pane.is_floating() && pane.is_shown())
        .find_map(|pane| {
            let rect = manager.host().floating_frame_rect(pane.frame()?);
            rect.contains(pt).then_some((pane.window()?, rect))
        })
}
