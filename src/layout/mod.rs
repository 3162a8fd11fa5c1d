//! Layout: the box-sizer solver, UI parts and the pass that builds them from
//! panes and docks.

pub mod engine;
pub mod part;
pub mod sizer;

pub use engine::{Layout, LayoutContext, layout_all, pane_positions_and_sizes};
pub use part::{PartKind, UiPart};
pub use sizer::{NodeId, SizerTree};
