//! Hit testing and drop resolution.
//!
//! Hit tests and pane lookups always run against the live layout (the parts,
//! docks and panes the user sees). Drop mutations go to the collections
//! passed in, which are either clones (for previews) or the live state.

use crate::constants::{HINT_PANE_NAME, TOOLBAR_LAYER};
use crate::dock::{
    Dock, insert_dock_row, insert_pane_slot, max_layer, max_row, remove_pane_from_docks,
};
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::layout::{LayoutContext, PartKind, UiPart, layout_all};
use crate::pane::{DockDirection, Pane, PaneId, PaneState};

/// Index of the part under `pt`.
///
/// Dock parts are never hit. Pane and pane-border parts only count when
/// nothing more specific was hit before them; otherwise the last match wins.
pub fn hit_test(parts: &[UiPart], pt: Point) -> Option<usize> {
    let mut result = None;
    for (idx, part) in parts.iter().enumerate() {
        if part.kind == PartKind::Dock {
            continue;
        }
        if matches!(part.kind, PartKind::Pane | PartKind::PaneBorder) && result.is_some() {
            continue;
        }
        if part.rect.contains(pt) {
            result = Some(idx);
        }
    }
    result
}

/// Outermost part of `pane`: its border, or its body when it has none.
pub fn pane_part(parts: &[UiPart], pane: PaneId) -> Option<usize> {
    let find = |kind: PartKind| {
        parts
            .iter()
            .position(|part| part.kind == kind && part.pane == Some(pane))
    };
    find(PartKind::PaneBorder).or_else(|| find(PartKind::Pane))
}

/// The live layout a drop is resolved against.
pub struct DropContext<'a, W> {
    pub layout: LayoutContext<'a, W>,
    pub parts: &'a [UiPart],
    pub docks: &'a [Dock],
    pub panes: &'a [Pane<W>],
    /// Preferred size of a toolbar window docked on the given side, `None`
    /// for ordinary windows.
    pub toolbar_hint: &'a dyn Fn(W, DockDirection) -> Option<Size>,
}

impl<W: Copy> DropContext<'_, W> {
    fn client_size(&self) -> Size {
        self.layout.client_size
    }

    fn live_pane(&self, id: PaneId) -> Option<&Pane<W>> {
        self.panes.iter().find(|pane| pane.id == id)
    }

    pub fn hit_test(&self, pt: Point) -> Option<usize> {
        hit_test(self.parts, pt)
    }

    /// Offset of the dock `test` would land in, measured along the dock from
    /// the managed area's left edge (horizontal docks) or top edge.
    pub fn dock_pixel_offset(&self, test: &Pane<W>) -> i32 {
        let mut docks = self.docks.to_vec();
        let mut panes = self.panes.to_vec();
        panes.push(test.clone());

        let mut layout = layout_all(&self.layout, &mut panes, &mut docks, true);
        layout.solve(
            Rect::from_parts(Point::new(0, 0), self.client_size()),
            &mut panes,
            &mut docks,
        );

        docks
            .iter()
            .find(|dock| dock.matches(test.dock_direction, test.dock_layer, test.dock_row))
            .map(|dock| {
                if dock.is_vertical() {
                    dock.rect.y
                } else {
                    dock.rect.x
                }
            })
            .unwrap_or(0)
    }

    /// Copies `drop` into `target` when the target may dock on the drop's
    /// side. Toolbars pick up their preferred size for the new side.
    pub fn process_dock_result(&self, target: &mut Pane<W>, drop: Pane<W>) -> bool {
        if !target.is_dockable_to(drop.dock_direction) {
            return false;
        }
        *target = drop;

        let hint = target
            .window
            .and_then(|window| (self.toolbar_hint)(window, target.dock_direction));
        if let Some(hint) = hint.filter(|hint| *hint != target.best_size) {
            target.best_size = hint;
            target.floating_size = Size::DEFAULT;
            target.floating_client_size = Size::DEFAULT;
        }
        true
    }

    /// Works out where `target` lands when dropped at `pt`, with `offset`
    /// being the grab point inside the dragged item.
    ///
    /// On success `target` is updated and `panes` has rows or slots opened
    /// for it. `docks` is only read.
    pub fn do_drop(
        &self,
        docks: &[Dock],
        panes: &mut [Pane<W>],
        target: &mut Pane<W>,
        pt: Point,
        offset: Point,
    ) -> bool {
        let cli = self.client_size();
        let config = self.layout.config;

        let mut drop = target.clone();
        drop.set_flag(PaneState::HIDDEN, false);

        let insert_offset = if drop.is_toolbar() {
            0
        } else {
            config.layer_insert_offset
        };
        let insert_pixels = config.layer_insert_pixels;

        let outer_layer = |sides: [DockDirection; 3]| {
            sides
                .iter()
                .map(|side| max_layer(docks, *side))
                .fold(0, i32::max)
                + 1
        };

        let edge = if pt.x < insert_offset
            && pt.x > insert_offset - insert_pixels
            && pt.y > 0
            && pt.y < cli.height
        {
            Some((
                DockDirection::Left,
                outer_layer([DockDirection::Left, DockDirection::Bottom, DockDirection::Top]),
            ))
        } else if pt.y < insert_offset
            && pt.y > insert_offset - insert_pixels
            && pt.x > 0
            && pt.x < cli.width
        {
            Some((
                DockDirection::Top,
                outer_layer([DockDirection::Top, DockDirection::Left, DockDirection::Right]),
            ))
        } else if pt.x >= cli.width - insert_offset
            && pt.x < cli.width - insert_offset + insert_pixels
            && pt.y > 0
            && pt.y < cli.height
        {
            Some((
                DockDirection::Right,
                outer_layer([DockDirection::Right, DockDirection::Top, DockDirection::Bottom]),
            ))
        } else if pt.y >= cli.height - insert_offset
            && pt.y < cli.height - insert_offset + insert_pixels
            && pt.x > 0
            && pt.x < cli.width
        {
            Some((
                DockDirection::Bottom,
                outer_layer([DockDirection::Bottom, DockDirection::Left, DockDirection::Right]),
            ))
        } else {
            None
        };

        if let Some((direction, layer)) = edge {
            let layer = if drop.is_toolbar() { TOOLBAR_LAYER } else { layer };
            drop.set_flag(PaneState::FLOATING, false);
            drop.dock_direction = direction;
            drop.dock_layer = layer;
            drop.dock_row = 0;
            let along = if direction.is_vertical() {
                pt.y - offset.y
            } else {
                pt.x - offset.x
            };
            drop.dock_pos = along - self.dock_pixel_offset(&drop);
            tracing::trace!(?direction, layer, "drop on outer edge");
            return self.process_dock_result(target, drop);
        }

        let hit = self.hit_test(pt);

        if drop.is_toolbar() {
            let Some(dock) = hit.and_then(|idx| self.parts[idx].dock) else {
                return false;
            };
            let dock = &self.docks[dock];
            return self.drop_toolbar(dock, panes, target, drop, pt, offset);
        }

        let Some(mut part) = hit.map(|idx| &self.parts[idx]) else {
            return false;
        };

        if part.kind == PartKind::DockSizer {
            let Some(dock) = part.dock.map(|idx| &self.docks[idx]) else {
                return false;
            };
            if dock.panes.len() != 1 {
                return false;
            }
            let Some(idx) = pane_part(self.parts, dock.panes[0]) else {
                return false;
            };
            part = &self.parts[idx];
        }

        if let Some(dock) = part
            .dock
            .map(|idx| &self.docks[idx])
            .filter(|dock| dock.toolbar)
        {
            let sides = match dock.dock_direction {
                DockDirection::Left => [DockDirection::Left, DockDirection::Bottom, DockDirection::Top],
                DockDirection::Top => [DockDirection::Top, DockDirection::Left, DockDirection::Right],
                DockDirection::Right => [DockDirection::Right, DockDirection::Top, DockDirection::Bottom],
                DockDirection::Bottom => [DockDirection::Bottom, DockDirection::Left, DockDirection::Right],
                other => [other; 3],
            };
            let layer = sides
                .iter()
                .map(|side| max_layer(docks, *side))
                .fold(0, i32::max);
            insert_dock_row(panes, dock.dock_direction, layer, 0);
            drop.set_flag(PaneState::FLOATING, false);
            drop.dock_direction = dock.dock_direction;
            drop.dock_layer = layer;
            drop.dock_row = 0;
            drop.dock_pos = 0;
            return self.process_dock_result(target, drop);
        }

        let Some(idx) = part.pane.and_then(|id| pane_part(self.parts, id)) else {
            return false;
        };
        let part = &self.parts[idx];
        let Some(hovered) = part.pane.and_then(|id| self.live_pane(id)) else {
            return false;
        };

        let r = part.rect;
        let band = config.insert_row_pixels;
        let mut insert_row = hovered.dock_row;
        let mut insert_dir = hovered.dock_direction;
        let mut insert_layer = hovered.dock_layer;
        let insert_dock_row_here = match hovered.dock_direction {
            DockDirection::Top => pt.y >= r.y && pt.y < r.y + band,
            DockDirection::Bottom => pt.y > r.y + r.height - band && pt.y <= r.y + r.height,
            DockDirection::Left => pt.x >= r.x && pt.x < r.x + band,
            DockDirection::Right => pt.x > r.x + r.width - band && pt.x <= r.x + r.width,
            DockDirection::Center => {
                let band_x = config.new_row_pixels.min(r.width * 20 / 100);
                let band_y = config.new_row_pixels.min(r.height * 20 / 100);
                insert_layer = 0;
                insert_dir = if pt.x >= r.x && pt.x < r.x + band_x {
                    DockDirection::Left
                } else if pt.y >= r.y && pt.y < r.y + band_y {
                    DockDirection::Top
                } else if pt.x >= r.x + r.width - band_x && pt.x < r.x + r.width {
                    DockDirection::Right
                } else if pt.y >= r.y + r.height - band_y && pt.y < r.y + r.height {
                    DockDirection::Bottom
                } else {
                    return false;
                };
                insert_row = max_row(panes, insert_dir, insert_layer) + 1;
                true
            }
            DockDirection::None => false,
        };

        if insert_dock_row_here {
            insert_dock_row(panes, insert_dir, insert_layer, insert_row);
            drop.set_flag(PaneState::FLOATING, false);
            drop.dock_direction = insert_dir;
            drop.dock_layer = insert_layer;
            drop.dock_row = insert_row;
            drop.dock_pos = 0;
            return self.process_dock_result(target, drop);
        }

        let (mouse_offset, size) = match part.orientation {
            Orientation::Vertical => (pt.y - r.y, r.height),
            Orientation::Horizontal => (pt.x - r.x, r.width),
        };
        let drop_position = if mouse_offset <= size / 2 {
            hovered.dock_pos
        } else {
            hovered.dock_pos + 1
        };
        insert_pane_slot(
            panes,
            hovered.dock_direction,
            hovered.dock_layer,
            hovered.dock_row,
            drop_position,
        );

        let Some(dock) = part.dock.map(|idx| &self.docks[idx]) else {
            return false;
        };
        drop.set_flag(PaneState::FLOATING, false);
        drop.dock_direction = dock.dock_direction;
        drop.dock_layer = dock.dock_layer;
        drop.dock_row = dock.dock_row;
        drop.dock_pos = drop_position;
        self.process_dock_result(target, drop)
    }

    fn drop_toolbar(
        &self,
        dock: &Dock,
        panes: &mut [Pane<W>],
        target: &mut Pane<W>,
        mut drop: Pane<W>,
        pt: Point,
        offset: Point,
    ) -> bool {
        let cli = self.client_size();
        let dock_drop_offset = if dock.is_horizontal() {
            pt.x - dock.rect.x - offset.x
        } else {
            pt.y - dock.rect.y - offset.y
        };

        if !dock.fixed
            || dock.dock_direction == DockDirection::Center
            || pt.x >= cli.width
            || pt.x <= 0
            || pt.y >= cli.height
            || pt.y <= 0
        {
            if self
                .layout
                .config
                .flags
                .contains(crate::config::ManagerFlags::ALLOW_FLOATING)
                && drop.is_floatable()
            {
                drop.set_flag(PaneState::FLOATING, true);
            } else {
                drop.dock_pos = pt.x - self.dock_pixel_offset(&drop) - offset.x;
            }
            return self.process_dock_result(target, drop);
        }

        drop.set_flag(PaneState::FLOATING, false);
        drop.dock_direction = dock.dock_direction;
        drop.dock_layer = dock.dock_layer;
        drop.dock_row = dock.dock_row;
        drop.dock_pos = dock_drop_offset;

        let leading_side = matches!(dock.dock_direction, DockDirection::Top | DockDirection::Left);
        let crowded = dock.panes.len() > 1;
        let r = dock.rect;

        let near_start = (dock.is_horizontal() && pt.y < r.y + 1)
            || (dock.is_vertical() && pt.x < r.x + 1);
        if near_start && crowded {
            if leading_side {
                insert_dock_row(panes, dock.dock_direction, dock.dock_layer, dock.dock_row);
            } else {
                insert_dock_row(panes, dock.dock_direction, dock.dock_layer, dock.dock_row + 1);
                drop.dock_row = dock.dock_row + 1;
            }
        }

        let near_end = (dock.is_horizontal() && pt.y > r.y + r.height - 2)
            || (dock.is_vertical() && pt.x > r.x + r.width - 2);
        if near_end && crowded {
            if leading_side {
                insert_dock_row(panes, dock.dock_direction, dock.dock_layer, dock.dock_row + 1);
                drop.dock_row = dock.dock_row + 1;
            } else {
                insert_dock_row(panes, dock.dock_direction, dock.dock_layer, dock.dock_row);
            }
        }

        self.process_dock_result(target, drop)
    }

    /// Rectangle `pane` would occupy if dropped at `pt`, or an empty
    /// rectangle when the drop would not dock it.
    pub fn calculate_hint_rect(&self, pane: PaneId, pt: Point, offset: Point) -> Rect {
        let Some(source) = self.live_pane(pane) else {
            return Rect::default();
        };
        let mut hint = source.clone();
        hint.name = HINT_PANE_NAME.to_string();
        hint.set_flag(PaneState::PANE_BORDER, true);
        hint.set_flag(PaneState::HIDDEN, false);
        if !hint.is_ok() {
            return Rect::default();
        }

        let mut docks = self.docks.to_vec();
        let mut panes = self.panes.to_vec();
        if let Some(pos) = panes.iter().position(|p| p.id == pane) {
            remove_pane_from_docks(&mut docks, pane, None);
            panes.remove(pos);
        }

        if !self.do_drop(&docks, &mut panes, &mut hint, pt, offset) {
            return Rect::default();
        }
        panes.push(hint);

        let mut layout = layout_all(&self.layout, &mut panes, &mut docks, true);
        layout.solve(
            Rect::from_parts(Point::new(0, 0), self.client_size()),
            &mut panes,
            &mut docks,
        );

        let is_hint = |id: PaneId| {
            panes
                .iter()
                .any(|p| p.id == id && p.name == HINT_PANE_NAME)
        };
        layout
            .parts
            .iter()
            .find(|part| {
                part.kind == PartKind::PaneBorder && part.pane.is_some_and(|id| is_hint(id))
            })
            .map(|part| part.rect)
            .unwrap_or_default()
    }
}
