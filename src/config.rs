//! Manager configuration.
//!
//! Every tunable the layout and interaction code reads lives here, owned by
//! the manager that uses it. Configurations can be loaded from JSON; missing
//! fields fall back to the terminal defaults.

use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FLOATING_GRAB_OFFSET, HINT_FADE_MAX, INSERT_ROW_PIXELS, LAYER_INSERT_OFFSET,
    LAYER_INSERT_PIXELS, NEW_ROW_PIXELS,
};
use crate::error::DockError;

bitflags! {
    /// Behaviour switches for a dock manager.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ManagerFlags: u32 {
        const ALLOW_FLOATING          = 1 << 0;
        const ALLOW_ACTIVE_PANE       = 1 << 1;
        const TRANSPARENT_DRAG        = 1 << 2;
        const TRANSPARENT_HINT        = 1 << 3;
        const VENETIAN_BLINDS_HINT    = 1 << 4;
        const RECTANGLE_HINT          = 1 << 5;
        const HINT_FADE               = 1 << 6;
        const NO_VENETIAN_BLINDS_FADE = 1 << 7;
        const LIVE_RESIZE             = 1 << 8;
    }
}

impl Default for ManagerFlags {
    fn default() -> Self {
        ManagerFlags::ALLOW_FLOATING
            | ManagerFlags::TRANSPARENT_HINT
            | ManagerFlags::HINT_FADE
            | ManagerFlags::NO_VENETIAN_BLINDS_FADE
    }
}

/// Sizes of the chrome drawn around panes, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockMetrics {
    pub sash_size: i32,
    pub caption_size: i32,
    pub gripper_size: i32,
    pub pane_border_size: i32,
    pub pane_button_size: i32,
    /// Gap after the last caption button.
    pub button_padding: i32,
    /// Smallest thickness a newly created dock may get.
    pub min_dock_size: i32,
}

impl Default for DockMetrics {
    fn default() -> Self {
        Self {
            sash_size: 1,
            caption_size: 1,
            gripper_size: 1,
            pane_border_size: 1,
            pane_button_size: 3,
            button_padding: 1,
            min_dock_size: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub flags: ManagerFlags,
    /// Largest share of the client width a new vertical dock may take.
    pub dock_constraint_x: f64,
    /// Largest share of the client height a new horizontal dock may take.
    pub dock_constraint_y: f64,
    pub drag_threshold_x: i32,
    pub drag_threshold_y: i32,
    pub floating_grab_offset: i32,
    pub insert_row_pixels: i32,
    pub new_row_pixels: i32,
    pub layer_insert_pixels: i32,
    pub layer_insert_offset: i32,
    pub hint_fade_max: u8,
    pub hint_fade_interval_ms: u64,
    pub metrics: DockMetrics,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            flags: ManagerFlags::default(),
            dock_constraint_x: 0.3,
            dock_constraint_y: 0.3,
            drag_threshold_x: 1,
            drag_threshold_y: 1,
            floating_grab_offset: FLOATING_GRAB_OFFSET,
            insert_row_pixels: INSERT_ROW_PIXELS,
            new_row_pixels: NEW_ROW_PIXELS,
            layer_insert_pixels: LAYER_INSERT_PIXELS,
            layer_insert_offset: LAYER_INSERT_OFFSET,
            hint_fade_max: HINT_FADE_MAX,
            hint_fade_interval_ms: 10,
            metrics: DockMetrics::default(),
        }
    }
}

impl DockConfig {
    pub fn from_json(text: &str) -> Result<Self, DockError> {
        let mut config: DockConfig = serde_json::from_str(text)?;
        config.set_dock_size_constraint(config.dock_constraint_x, config.dock_constraint_y);
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DockError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Both values are clamped to `0.0..=1.0`.
    pub fn set_dock_size_constraint(&mut self, width_pct: f64, height_pct: f64) {
        self.dock_constraint_x = width_pct.clamp(0.0, 1.0);
        self.dock_constraint_y = height_pct.clamp(0.0, 1.0);
    }

    pub fn has_live_resize(&self) -> bool {
        self.flags.contains(ManagerFlags::LIVE_RESIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_match_classic_manager() {
        let flags = ManagerFlags::default();
        assert_eq!(flags.bits(), 1 | 8 | 64 | 128);
        assert!(!DockConfig::default().has_live_resize());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DockConfig::from_json(r#"{ "dock_constraint_x": 2.5, "metrics": { "sash_size": 2 } }"#)
            .unwrap();
        assert_eq!(config.dock_constraint_x, 1.0);
        assert_eq!(config.dock_constraint_y, 0.3);
        assert_eq!(config.metrics.sash_size, 2);
        assert_eq!(config.metrics.caption_size, 1);
        assert_eq!(config.flags, ManagerFlags::default());
    }

    #[test]
    fn flags_parse_from_names() {
        let config =
            DockConfig::from_json(r#"{ "flags": "ALLOW_FLOATING | LIVE_RESIZE" }"#).unwrap();
        assert!(config.has_live_resize());
        assert!(config.flags.contains(ManagerFlags::ALLOW_FLOATING));
        assert!(!config.flags.contains(ManagerFlags::HINT_FADE));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(DockConfig::from_json("{ nope").is_err());
    }
}
