//! Shared crate-wide constants.

/// Layer index reserved for toolbars. Toolbars always sit outside the
/// layers used by ordinary panes.
pub const TOOLBAR_LAYER: i32 = 10;

/// Proportion that is "infinitely" larger than any user value. A pane
/// proportion of 0 is normalized to this on registration and on load.
pub const MAX_DOCK_PROPORTION: i32 = 100_000;

/// Name given to the synthetic pane injected by drop-preview layouts.
pub const HINT_PANE_NAME: &str = "__HINT__";

/// Extra cell added to a pane's minimum extent before converting it into a
/// proportion during a sash drag.
///
/// Without it the resized pane ends up one cell short of its minimum after
/// the next layout. The source of the off-by-one has never been pinned down.
pub const MIN_PROPORTION_COMPENSATION: i32 = 1;

/// Width of the band along a pane's leading/trailing edge that inserts a new
/// dock row when a pane is dropped there.
///
/// Units: terminal cells.
pub const INSERT_ROW_PIXELS: i32 = 2;

/// Depth of the bands along the center pane's edges that create a new
/// layer-0 row. Capped at 20% of the center pane's extent.
pub const NEW_ROW_PIXELS: i32 = 4;

/// Width of the band outside the managed area's edges that docks a pane on a
/// new outermost layer.
pub const LAYER_INSERT_PIXELS: i32 = 4;

/// How far inside the managed area the outer-edge band starts. Toolbars
/// use 0 so they only snap when dragged right up to the edge.
pub const LAYER_INSERT_OFFSET: i32 = 1;

/// Grab offset used when a caption click position lies beyond the width of
/// the floating frame it turns into.
pub const FLOATING_GRAB_OFFSET: i32 = 3;

/// Fade steps a drop hint goes through before it is fully opaque.
pub const HINT_FADE_MAX: u8 = 64;
