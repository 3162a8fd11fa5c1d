//! Dock descriptors and the helpers that shuffle panes between docks.
//!
//! Docks are derived from the pane collection on every layout pass. They
//! reference their member panes by [`PaneId`], so a dock list and a pane list
//! can be cloned together for preview layouts without any fix-ups.

use crate::geometry::{Orientation, Rect};
use crate::pane::{DockDirection, Pane, PaneId};

#[derive(Debug, Clone, PartialEq)]
pub struct Dock {
    pub dock_direction: DockDirection,
    pub dock_layer: i32,
    pub dock_row: i32,
    /// Thickness perpendicular to the dock's axis.
    pub size: i32,
    pub min_size: i32,
    pub resizable: bool,
    /// Every member is non-resizable, or one demands a fixed dock.
    pub fixed: bool,
    /// Every member is a toolbar.
    pub toolbar: bool,
    /// Members, ordered by `dock_pos` after a layout pass.
    pub panes: Vec<PaneId>,
    pub rect: Rect,
}

impl Default for Dock {
    fn default() -> Self {
        Self {
            dock_direction: DockDirection::None,
            dock_layer: 0,
            dock_row: 0,
            size: 0,
            min_size: 0,
            resizable: true,
            fixed: false,
            toolbar: false,
            panes: Vec::new(),
            rect: Rect::default(),
        }
    }
}

impl Dock {
    pub fn new(direction: DockDirection, layer: i32, row: i32) -> Self {
        Self {
            dock_direction: direction,
            dock_layer: layer,
            dock_row: row,
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.dock_direction != DockDirection::None
    }

    pub fn is_horizontal(&self) -> bool {
        self.dock_direction.is_horizontal()
    }

    pub fn is_vertical(&self) -> bool {
        self.dock_direction.is_vertical()
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_horizontal() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.panes.contains(&pane)
    }

    pub(crate) fn matches(&self, direction: DockDirection, layer: i32, row: i32) -> bool {
        self.dock_direction == direction && self.dock_layer == layer && self.dock_row == row
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FindDocks {
    All,
    OnlyFirst,
    /// Reversed result, used for right and bottom docks.
    Reverse,
}

/// Indices of the docks matching the filters, ordered by layer then row.
/// `None` filters match anything.
pub(crate) fn find_docks(
    docks: &[Dock],
    direction: Option<DockDirection>,
    layer: Option<i32>,
    row: Option<i32>,
    mode: FindDocks,
) -> Vec<usize> {
    let max_row = docks.iter().map(|d| d.dock_row).max().unwrap_or(0).max(0);
    let max_layer = docks.iter().map(|d| d.dock_layer).max().unwrap_or(0).max(0);

    let (begin_layer, end_layer) = match layer {
        Some(layer) => (layer, layer),
        None => (0, max_layer),
    };
    let (begin_row, end_row) = match row {
        Some(row) => (row, row),
        None => (0, max_row),
    };

    let mut found = Vec::new();
    for layer in begin_layer..=end_layer {
        for row in begin_row..=end_row {
            for (idx, dock) in docks.iter().enumerate() {
                if direction.is_some_and(|dir| dir != dock.dock_direction) {
                    continue;
                }
                if dock.dock_layer != layer || dock.dock_row != row {
                    continue;
                }
                match mode {
                    FindDocks::All => found.push(idx),
                    FindDocks::OnlyFirst => return vec![idx],
                    FindDocks::Reverse => found.insert(0, idx),
                }
            }
        }
    }
    found
}

/// Highest layer used by non-fixed docks on the given side.
pub fn max_layer(docks: &[Dock], direction: DockDirection) -> i32 {
    docks
        .iter()
        .filter(|d| d.dock_direction == direction && !d.fixed)
        .map(|d| d.dock_layer)
        .fold(0, i32::max)
}

/// Highest row used by panes on the given side and layer.
pub fn max_row<W>(panes: &[Pane<W>], direction: DockDirection, layer: i32) -> i32 {
    panes
        .iter()
        .filter(|p| p.dock_direction == direction && p.dock_layer == layer)
        .map(|p| p.dock_row)
        .fold(0, i32::max)
}

/// Opens a new layer by pushing docked panes at or beyond `layer` outwards.
pub fn insert_dock_layer<W>(panes: &mut [Pane<W>], direction: DockDirection, layer: i32) {
    for pane in panes.iter_mut() {
        if !pane.is_floating() && pane.dock_direction == direction && pane.dock_layer >= layer {
            pane.dock_layer += 1;
        }
    }
}

/// Opens a new row within a layer.
pub fn insert_dock_row<W>(panes: &mut [Pane<W>], direction: DockDirection, layer: i32, row: i32) {
    for pane in panes.iter_mut() {
        if !pane.is_floating()
            && pane.dock_direction == direction
            && pane.dock_layer == layer
            && pane.dock_row >= row
        {
            pane.dock_row += 1;
        }
    }
}

/// Opens a slot at `pos` within a row.
pub fn insert_pane_slot<W>(
    panes: &mut [Pane<W>],
    direction: DockDirection,
    layer: i32,
    row: i32,
    pos: i32,
) {
    for pane in panes.iter_mut() {
        if !pane.is_floating()
            && pane.dock_direction == direction
            && pane.dock_layer == layer
            && pane.dock_row == row
            && pane.dock_pos >= pos
        {
            pane.dock_pos += 1;
        }
    }
}

/// Drops `pane` from every dock except the one at `except`.
pub(crate) fn remove_pane_from_docks(docks: &mut [Dock], pane: PaneId, except: Option<usize>) {
    for (idx, dock) in docks.iter_mut().enumerate() {
        if Some(idx) == except {
            continue;
        }
        dock.panes.retain(|id| *id != pane);
    }
}
