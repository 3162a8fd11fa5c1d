use crate::geometry::{Orientation, Rect};
use crate::layout::sizer::NodeId;
use crate::pane::{PaneButton, PaneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Caption,
    Gripper,
    /// Whole extent of a dock. Used for measurement only, never hit.
    Dock,
    /// Sash that resizes a dock.
    DockSizer,
    /// Content area of a pane.
    Pane,
    /// Sash between two panes of the same dock.
    PaneSizer,
    Background,
    PaneBorder,
    PaneButton,
}

/// One visible piece of the laid-out frame.
///
/// Parts are regenerated on every layout pass; `dock` indexes the dock list of
/// that same pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UiPart {
    pub kind: PartKind,
    pub orientation: Orientation,
    pub dock: Option<usize>,
    pub pane: Option<PaneId>,
    pub button: Option<PaneButton>,
    pub rect: Rect,
    pub(crate) node: NodeId,
}

impl UiPart {
    pub(crate) fn new(kind: PartKind, orientation: Orientation, node: NodeId) -> Self {
        Self {
            kind,
            orientation,
            dock: None,
            pane: None,
            button: None,
            rect: Rect::default(),
            node,
        }
    }

    pub(crate) fn in_dock(mut self, dock: usize) -> Self {
        self.dock = Some(dock);
        self
    }

    pub(crate) fn for_pane(mut self, pane: PaneId) -> Self {
        self.pane = Some(pane);
        self
    }

    pub(crate) fn with_button(mut self, button: PaneButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn is_sash(&self) -> bool {
        matches!(self.kind, PartKind::DockSizer | PartKind::PaneSizer)
    }

    /// Caption or gripper, the handles a pane is dragged by.
    pub fn is_drag_handle(&self) -> bool {
        matches!(self.kind, PartKind::Caption | PartKind::Gripper)
    }
}
