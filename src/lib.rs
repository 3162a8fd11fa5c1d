//! Docking-pane layout engine for terminal user interfaces.
//!
//! A [`DockManager`] arranges content windows around a central pane: docked
//! on any side in layers and rows, floating in frames, or maximized. Layout
//! produces a list of [`UiPart`]s that the [`render`] module draws into a
//! ratatui buffer and that pointer input is hit-tested against.

pub mod config;
pub mod constants;
pub mod dock;
pub mod drivers;
pub mod drop;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod hint;
pub mod host;
pub mod input;
pub mod layout;
pub mod manager;
pub mod pane;
pub mod perspective;
pub mod render;
pub mod snapshot;
pub mod theme;
pub mod tracing_sub;

pub use config::{DockConfig, DockMetrics, ManagerFlags};
pub use dock::Dock;
pub use error::{DockError, PerspectiveError};
pub use geometry::{Orientation, Point, Rect, Size};
pub use host::{DockEvent, DockEventSink, DockHost, EventResponse, FrameId, ToolbarCapability};
pub use layout::{PartKind, UiPart};
pub use manager::{Action, ButtonState, CursorKind, DockManager, InsertLevel};
pub use pane::{DockDirection, Pane, PaneButton, PaneId, PaneState, WindowHandle};
pub use snapshot::{LayoutSnapshot, PaneLayout};
