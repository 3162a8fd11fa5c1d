//! Turns the pane collection into docks, a sizer tree and the UI part list.
//!
//! Layers are built from the innermost outwards: each layer wraps the
//! previous one with its top, left, right and bottom docks, and layer 0 wraps
//! the center docks (or a background filler).

use std::collections::HashMap;

use crate::config::{DockConfig, DockMetrics};
use crate::dock::{Dock, FindDocks, find_docks, remove_pane_from_docks};
use crate::geometry::{Orientation, Rect, Size};
use crate::layout::part::{PartKind, UiPart};
use crate::layout::sizer::{NodeId, SizerTree};
use crate::pane::{DockDirection, Pane, PaneButton, PaneId, PaneState};

/// Everything a layout pass reads besides the panes and docks themselves.
pub struct LayoutContext<'a, W> {
    pub config: &'a DockConfig,
    pub client_size: Size,
    /// Some pane is maximized: sashes and the background filler are omitted.
    pub has_maximized: bool,
    /// Current size of a content window, the last fallback for dock sizing.
    pub window_size: &'a dyn Fn(W) -> Size,
}

/// Result of [`layout_all`]: the unsolved tree plus the parts pointing into
/// it. Call [`Layout::solve`] to compute rectangles.
#[derive(Debug, Clone)]
pub struct Layout {
    pub tree: SizerTree,
    pub root: NodeId,
    pub parts: Vec<UiPart>,
}

impl Layout {
    /// Solves the tree into `area` and copies the results into the parts,
    /// the docks and the panes.
    pub fn solve<W>(&mut self, area: Rect, panes: &mut [Pane<W>], docks: &mut [Dock]) {
        self.tree.layout(self.root, area);
        let lookup = pane_lookup(panes);
        for part in self.parts.iter_mut() {
            part.rect = self.tree.outer_rect(part.node);
            match part.kind {
                PartKind::Dock => {
                    if let Some(dock) = part.dock.and_then(|idx| docks.get_mut(idx)) {
                        dock.rect = part.rect;
                    }
                }
                PartKind::Pane => {
                    if let Some(idx) = part.pane.and_then(|id| lookup.get(&id).copied()) {
                        panes[idx].rect = part.rect;
                    }
                }
                _ => {}
            }
        }
    }

    /// Rectangle of a part's node without its border.
    pub fn node_rect(&self, part: &UiPart) -> Rect {
        self.tree.rect(part.node)
    }
}

pub(crate) fn pane_lookup<W>(panes: &[Pane<W>]) -> HashMap<PaneId, usize> {
    panes
        .iter()
        .enumerate()
        .map(|(idx, pane)| (pane.id, idx))
        .collect()
}

/// Positions and extents of the members of a fixed dock, along the dock.
///
/// Without an action pane the positions are the stored `dock_pos` values.
/// With one, panes before it are pulled back and panes from it onwards are
/// bumped forward so nothing overlaps.
pub fn pane_positions_and_sizes<W>(
    metrics: &DockMetrics,
    dock: &Dock,
    panes: &[Pane<W>],
) -> (Vec<i32>, Vec<i32>) {
    let lookup = pane_lookup(panes);
    let members: Vec<&Pane<W>> = dock
        .panes
        .iter()
        .filter_map(|id| lookup.get(id).map(|idx| &panes[*idx]))
        .collect();

    let mut positions = Vec::with_capacity(members.len());
    let mut sizes = Vec::with_capacity(members.len());
    let mut action_pane = None;
    for (idx, pane) in members.iter().enumerate() {
        if pane.has_flag(PaneState::ACTION_PANE) {
            debug_assert!(action_pane.is_none(), "more than one fixed action pane");
            action_pane = Some(idx);
        }
        positions.push(pane.dock_pos);
        let mut size = 0;
        if pane.has_border() {
            size += metrics.pane_border_size * 2;
        }
        if dock.is_horizontal() {
            if pane.has_gripper() && !pane.has_gripper_top() {
                size += metrics.gripper_size;
            }
            size += pane.best_size.width;
        } else {
            if pane.has_gripper() && pane.has_gripper_top() {
                size += metrics.gripper_size;
            }
            if pane.has_caption() {
                size += metrics.caption_size;
            }
            size += pane.best_size.height;
        }
        sizes.push(size);
    }

    let Some(action_pane) = action_pane else {
        return (positions, sizes);
    };

    for idx in (0..action_pane).rev() {
        let amount = positions[idx + 1] - (positions[idx] + sizes[idx]);
        if amount < 0 {
            positions[idx] += amount;
        }
    }

    let mut offset = 0;
    for idx in action_pane..members.len() {
        let amount = positions[idx] - offset;
        if amount >= 0 {
            offset += amount;
        } else {
            positions[idx] -= amount;
        }
        offset += sizes[idx];
    }

    (positions, sizes)
}

/// Rebuilds `docks` from `panes` and produces the sizer tree and UI parts.
///
/// With `spacer_only` the pane bodies are plain spacers, which is what the
/// drop previews use.
pub fn layout_all<W: Copy>(
    ctx: &LayoutContext<'_, W>,
    panes: &mut [Pane<W>],
    docks: &mut Vec<Dock>,
    spacer_only: bool,
) -> Layout {
    let metrics = &ctx.config.metrics;

    for dock in docks.iter_mut() {
        dock.panes.clear();
        if dock.fixed {
            dock.size = 0;
        }
    }

    for pane in panes.iter() {
        let found = find_docks(
            docks,
            Some(pane.dock_direction),
            Some(pane.dock_layer),
            Some(pane.dock_row),
            FindDocks::OnlyFirst,
        );
        let dock_idx = match found.first() {
            Some(&idx) => {
                if docks[idx].size == 0 {
                    docks[idx].size = pane.dock_size;
                }
                idx
            }
            None => {
                let mut dock = Dock::new(pane.dock_direction, pane.dock_layer, pane.dock_row);
                dock.size = pane.dock_size;
                docks.push(dock);
                docks.len() - 1
            }
        };

        if pane.is_docked() && pane.is_shown() {
            remove_pane_from_docks(docks, pane.id, Some(dock_idx));
            if !docks[dock_idx].contains(pane.id) {
                docks[dock_idx].panes.push(pane.id);
            }
        } else {
            remove_pane_from_docks(docks, pane.id, None);
        }
    }

    docks.retain(|dock| !dock.panes.is_empty());

    let lookup = pane_lookup(panes);
    for dock in docks.iter_mut() {
        dock.panes
            .sort_by_key(|id| lookup.get(id).map(|idx| panes[*idx].dock_pos).unwrap_or(0));

        if dock.size == 0 {
            dock.size = default_dock_size(ctx, dock, panes, &lookup);
        }

        let mut plus_border = false;
        let mut plus_caption = false;
        let mut dock_min_size = 0;
        for id in &dock.panes {
            let pane = &panes[lookup[id]];
            if pane.min_size.is_default() {
                continue;
            }
            plus_border |= pane.has_border();
            plus_caption |= pane.has_caption();
            let extent = if dock.is_horizontal() {
                pane.min_size.height
            } else {
                pane.min_size.width
            };
            dock_min_size = dock_min_size.max(extent);
        }
        if plus_border {
            dock_min_size += metrics.pane_border_size * 2;
        }
        if plus_caption && dock.is_horizontal() {
            dock_min_size += metrics.caption_size;
        }
        dock.min_size = dock_min_size;
        dock.size = dock.size.max(dock.min_size);

        let mut action_pane_marked = false;
        dock.fixed = true;
        dock.toolbar = true;
        for id in &dock.panes {
            let pane = &panes[lookup[id]];
            if !pane.is_fixed() {
                dock.fixed = false;
            }
            if !pane.is_toolbar() {
                dock.toolbar = false;
            }
            if pane.has_flag(PaneState::DOCK_FIXED) {
                dock.fixed = true;
            }
            if pane.has_flag(PaneState::ACTION_PANE) {
                action_pane_marked = true;
            }
        }

        if !dock.fixed {
            for (pos, id) in dock.panes.iter().enumerate() {
                panes[lookup[id]].dock_pos = pos as i32;
            }
        }

        if dock.fixed && !action_pane_marked {
            let (positions, sizes) = pane_positions_and_sizes(metrics, dock, panes);
            let mut offset = 0;
            for (j, id) in dock.panes.iter().enumerate() {
                let pane = &mut panes[lookup[id]];
                pane.dock_pos = positions[j];
                let amount = pane.dock_pos - offset;
                if amount >= 0 {
                    offset += amount;
                } else {
                    pane.dock_pos -= amount;
                }
                offset += sizes[j];
            }
        }
    }

    let mut builder = Builder {
        ctx,
        panes: &*panes,
        lookup: &lookup,
        docks: docks.as_slice(),
        tree: SizerTree::new(),
        parts: Vec::new(),
        spacer_only,
    };
    let root = builder.build();
    Layout {
        tree: builder.tree,
        root,
        parts: builder.parts,
    }
}

fn default_dock_size<W: Copy>(
    ctx: &LayoutContext<'_, W>,
    dock: &Dock,
    panes: &[Pane<W>],
    lookup: &HashMap<PaneId, usize>,
) -> i32 {
    let metrics = &ctx.config.metrics;
    let members: Vec<&Pane<W>> = dock.panes.iter().map(|id| &panes[lookup[id]]).collect();

    let mut size = 0;
    for pane in &members {
        let mut pane_size = pane.best_size;
        if pane_size.is_default() {
            pane_size = pane.min_size;
        }
        if pane_size.is_default() {
            pane_size = pane
                .window
                .map(|window| (ctx.window_size)(window))
                .unwrap_or_default();
        }
        size = size.max(if dock.is_horizontal() {
            pane_size.height
        } else {
            pane_size.width
        });
    }

    if members.iter().any(|p| p.has_border()) {
        size += metrics.pane_border_size * 2;
    }
    if dock.is_horizontal() && members.iter().any(|p| p.has_caption()) {
        size += metrics.caption_size;
    }

    let max_x = (ctx.config.dock_constraint_x * ctx.client_size.width as f64) as i32;
    let max_y = (ctx.config.dock_constraint_y * ctx.client_size.height as f64) as i32;
    size = if dock.is_horizontal() {
        size.min(max_y)
    } else {
        size.min(max_x)
    };
    size.max(metrics.min_dock_size)
}

struct Builder<'a, 'c, W> {
    ctx: &'a LayoutContext<'c, W>,
    panes: &'a [Pane<W>],
    lookup: &'a HashMap<PaneId, usize>,
    docks: &'a [Dock],
    tree: SizerTree,
    parts: Vec<UiPart>,
    spacer_only: bool,
}

impl<W> Builder<'_, '_, W> {
    fn build(&mut self) -> NodeId {
        let max_layer = self.docks.iter().map(|d| d.dock_layer).fold(0, i32::max);
        let mut cont: Option<NodeId> = None;

        for layer in 0..=max_layer {
            if find_docks(self.docks, None, Some(layer), None, FindDocks::OnlyFirst).is_empty() {
                continue;
            }
            let old_cont = cont;
            let layer_box = self.tree.new_box(Orientation::Vertical);
            cont = Some(layer_box);

            for dock in self.layer_docks(DockDirection::Top, layer, FindDocks::All) {
                self.add_dock(layer_box, dock);
            }

            let middle = self.tree.new_box(Orientation::Horizontal);
            let mut middle_len = 0;
            for dock in self.layer_docks(DockDirection::Left, layer, FindDocks::All) {
                self.add_dock(middle, dock);
                middle_len += 1;
            }

            match old_cont {
                None => {
                    let centers = find_docks(
                        self.docks,
                        Some(DockDirection::Center),
                        None,
                        None,
                        FindDocks::All,
                    );
                    let has_center = !centers.is_empty();
                    for dock in centers {
                        self.add_dock(middle, dock);
                        middle_len += 1;
                    }
                    if !has_center && !self.ctx.has_maximized {
                        let node = self.tree.add_spacer(middle, Size::new(1, 1), 1);
                        self.parts.push(UiPart::new(
                            PartKind::Background,
                            Orientation::Horizontal,
                            node,
                        ));
                        middle_len += 1;
                    }
                }
                Some(inner) => {
                    self.tree.add(middle, inner, 1, 0);
                    middle_len += 1;
                }
            }

            for dock in self.layer_docks(DockDirection::Right, layer, FindDocks::Reverse) {
                self.add_dock(middle, dock);
                middle_len += 1;
            }

            if middle_len > 0 {
                self.tree.add(layer_box, middle, 1, 0);
            }

            for dock in self.layer_docks(DockDirection::Bottom, layer, FindDocks::Reverse) {
                self.add_dock(layer_box, dock);
            }
        }

        match cont {
            Some(cont) => cont,
            None => {
                let cont = self.tree.new_box(Orientation::Vertical);
                let node = self.tree.add_spacer(cont, Size::new(1, 1), 1);
                self.parts.push(UiPart::new(
                    PartKind::Background,
                    Orientation::Horizontal,
                    node,
                ));
                cont
            }
        }
    }

    fn layer_docks(&self, direction: DockDirection, layer: i32, mode: FindDocks) -> Vec<usize> {
        find_docks(self.docks, Some(direction), Some(layer), None, mode)
    }

    fn add_dock(&mut self, cont: NodeId, dock_idx: usize) {
        let metrics = self.ctx.config.metrics;
        let docks = self.docks;
        let dock = &docks[dock_idx];
        let orientation = dock.orientation();
        let sash = Size::new(metrics.sash_size, metrics.sash_size);
        let has_sash = !self.ctx.has_maximized && !dock.fixed;

        if has_sash
            && matches!(
                dock.dock_direction,
                DockDirection::Bottom | DockDirection::Right
            )
        {
            let node = self.tree.add_spacer(cont, sash, 0);
            self.parts
                .push(UiPart::new(PartKind::DockSizer, orientation, node).in_dock(dock_idx));
        }

        let dock_box = self.tree.new_box(orientation);
        let mut has_maximized_pane = false;

        if dock.fixed {
            let (positions, sizes) = pane_positions_and_sizes(&metrics, dock, self.panes);
            let mut offset = 0;
            for (j, id) in dock.panes.iter().enumerate() {
                let pane_idx = self.lookup[id];
                has_maximized_pane |= self.panes[pane_idx].is_maximized();
                let amount = positions[j] - offset;
                if amount > 0 {
                    let gap = if dock.is_vertical() {
                        Size::new(1, amount)
                    } else {
                        Size::new(amount, 1)
                    };
                    let node = self.tree.add_spacer(dock_box, gap, 0);
                    self.parts.push(
                        UiPart::new(PartKind::Background, orientation.flipped(), node)
                            .in_dock(dock_idx),
                    );
                    offset += amount;
                }
                self.add_pane(dock_box, dock_idx, pane_idx);
                offset += sizes[j];
            }
            let node = self.tree.add_spacer(dock_box, Size::new(0, 0), 1);
            self.parts
                .push(UiPart::new(PartKind::Background, orientation, node).in_dock(dock_idx));
        } else {
            let mut last_pane: Option<PaneId> = None;
            for id in &dock.panes {
                let pane_idx = self.lookup[id];
                has_maximized_pane |= self.panes[pane_idx].is_maximized();
                if let Some(previous) = last_pane.filter(|_| !self.ctx.has_maximized) {
                    let node = self.tree.add_spacer(dock_box, sash, 0);
                    self.parts.push(
                        UiPart::new(PartKind::PaneSizer, orientation.flipped(), node)
                            .in_dock(dock_idx)
                            .for_pane(previous),
                    );
                }
                self.add_pane(dock_box, dock_idx, pane_idx);
                last_pane = Some(*id);
            }
        }

        let proportion = if dock.dock_direction == DockDirection::Center || has_maximized_pane {
            1
        } else {
            0
        };
        self.tree.add(cont, dock_box, proportion, 0);
        self.parts
            .push(UiPart::new(PartKind::Dock, orientation, dock_box).in_dock(dock_idx));
        if dock.is_horizontal() {
            self.tree.set_min_size(dock_box, Size::new(0, dock.size));
        } else {
            self.tree.set_min_size(dock_box, Size::new(dock.size, 0));
        }

        if has_sash && matches!(dock.dock_direction, DockDirection::Top | DockDirection::Left) {
            let node = self.tree.add_spacer(cont, sash, 0);
            self.parts
                .push(UiPart::new(PartKind::DockSizer, orientation, node).in_dock(dock_idx));
        }
    }

    fn add_pane(&mut self, cont: NodeId, dock_idx: usize, pane_idx: usize) {
        let metrics = self.ctx.config.metrics;
        let panes = self.panes;
        let pane = &panes[pane_idx];
        let orientation = self.docks[dock_idx].orientation();
        let part = |kind, node| {
            UiPart::new(kind, orientation, node)
                .in_dock(dock_idx)
                .for_pane(pane.id)
        };
        let mut proportion = pane.dock_proportion;

        let horz = self.tree.new_box(Orientation::Horizontal);
        let vert = self.tree.new_box(Orientation::Vertical);

        if pane.has_gripper() {
            let node = if pane.has_gripper_top() {
                self.tree
                    .add_spacer(vert, Size::new(1, metrics.gripper_size), 0)
            } else {
                self.tree
                    .add_spacer(horz, Size::new(metrics.gripper_size, 1), 0)
            };
            self.parts.push(part(PartKind::Gripper, node));
        }

        if pane.has_caption() {
            let caption_box = self.tree.new_box(Orientation::Horizontal);
            self.tree
                .add_spacer(caption_box, Size::new(1, metrics.caption_size), 1);
            let caption_idx = self.parts.len();
            self.parts.push(part(PartKind::Caption, caption_box));

            let buttons = [
                (PaneButton::MaximizeRestore, PaneState::BUTTON_MAXIMIZE),
                (PaneButton::Pin, PaneState::BUTTON_PIN),
                (PaneButton::Close, PaneState::BUTTON_CLOSE),
            ];
            let mut button_count = 0;
            for (button, flag) in buttons {
                if !pane.has_flag(flag) {
                    continue;
                }
                let node = self.tree.add_spacer(
                    caption_box,
                    Size::new(metrics.pane_button_size, metrics.caption_size),
                    0,
                );
                self.parts
                    .push(part(PartKind::PaneButton, node).with_button(button));
                button_count += 1;
            }
            if button_count > 0 {
                self.tree
                    .add_spacer(caption_box, Size::new(metrics.button_padding, 1), 0);
            }
            self.tree.add(vert, caption_box, 0, 0);
            self.parts[caption_idx].node = caption_box;
        }

        let body = if self.spacer_only {
            self.tree.add_spacer(vert, Size::new(1, 1), 1)
        } else {
            self.tree.add_window(vert, 1)
        };
        self.parts.push(part(PartKind::Pane, body));

        let mut min_size = pane.min_size;
        if pane.is_fixed() && min_size.is_default() {
            min_size = pane.best_size;
            proportion = 0;
        }
        if !min_size.is_default() {
            self.tree.set_min_size(body, min_size);
        }

        self.tree.add(horz, vert, 1, 0);

        if pane.has_border() {
            self.tree
                .add(cont, horz, proportion, metrics.pane_border_size);
            self.parts.push(part(PartKind::PaneBorder, horz));
        } else {
            self.tree.add(cont, horz, proportion, 0);
        }
    }
}
