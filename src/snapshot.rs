//! Structured layout snapshots, persisted as JSON.
//!
//! Unlike perspective strings a snapshot stores the dock thickness with each
//! pane and records maximize/hidden state explicitly, so it survives a
//! manager whose dock list has been rebuilt.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_DOCK_PROPORTION;
use crate::dock::Dock;
use crate::error::DockError;
use crate::geometry::{Point, Size};
use crate::pane::{DockDirection, Pane, PaneState};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub name: String,
    pub dock_direction: DockDirection,
    pub dock_layer: i32,
    pub dock_row: i32,
    pub dock_pos: i32,
    /// 0 stands for the "unset" maximum proportion.
    pub dock_proportion: i32,
    pub dock_size: i32,
    pub floating_pos: Point,
    pub floating_size: Size,
    pub floating_client_size: Size,
    #[serde(default)]
    pub is_maximized: bool,
    #[serde(default)]
    pub is_hidden: bool,
}

impl PaneLayout {
    pub fn capture<W>(pane: &Pane<W>, docks: &[Dock]) -> Self {
        let dock_size = docks
            .iter()
            .find(|dock| dock.contains(pane.id()))
            .map_or(0, |dock| dock.size);
        Self {
            name: pane.name.clone(),
            dock_direction: pane.dock_direction,
            dock_layer: pane.dock_layer,
            dock_row: pane.dock_row,
            dock_pos: pane.dock_pos,
            dock_proportion: if pane.dock_proportion == MAX_DOCK_PROPORTION {
                0
            } else {
                pane.dock_proportion
            },
            dock_size,
            floating_pos: pane.floating_pos,
            floating_size: pane.floating_size,
            floating_client_size: pane.floating_client_size,
            is_maximized: pane.is_maximized(),
            is_hidden: !pane.is_shown(),
        }
    }

    /// Writes the stored placement onto `pane`. Maximize state is left to
    /// the caller, which has to go through the manager to maximize.
    pub fn apply_to<W>(&self, pane: &mut Pane<W>) {
        pane.dock_direction = self.dock_direction;
        pane.dock_layer = self.dock_layer;
        pane.dock_row = self.dock_row;
        pane.dock_pos = self.dock_pos;
        pane.dock_proportion = self.dock_proportion;
        pane.dock_proportion = pane.normalized_proportion();
        pane.dock_size = self.dock_size;
        pane.floating_pos = self.floating_pos;
        pane.floating_size = self.floating_size;
        pane.floating_client_size = self.floating_client_size;
        pane.set_flag(PaneState::HIDDEN, self.is_hidden);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub version: u32,
    pub panes: Vec<PaneLayout>,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            panes: Vec::new(),
        }
    }
}

impl LayoutSnapshot {
    /// While a pane is maximized the others are only hidden for the time
    /// being, so their visibility is taken from before the maximize.
    pub fn capture<W>(panes: &[Pane<W>], docks: &[Dock]) -> Self {
        let maximized = panes.iter().any(Pane::is_maximized);
        Self {
            version: SNAPSHOT_VERSION,
            panes: panes
                .iter()
                .map(|pane| {
                    let mut layout = PaneLayout::capture(pane, docks);
                    if maximized
                        && !pane.is_maximized()
                        && !pane.is_toolbar()
                        && !pane.is_floating()
                    {
                        layout.is_hidden = pane.has_flag(PaneState::SAVED_HIDDEN);
                    }
                    layout
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, DockError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, DockError> {
        let snapshot: Self = serde_json::from_str(text)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DockError::SnapshotVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DockError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DockError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn pane(&self, name: &str) -> Option<&PaneLayout> {
        self.panes.iter().find(|layout| layout.name == name)
    }
}
