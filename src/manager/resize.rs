//! Committing a sash drag: dock thickness for dock sashes, proportions for
//! the sashes between panes.

use crate::constants::MIN_PROPORTION_COMPENSATION;
use crate::geometry::{Orientation, Point};
use crate::host::DockHost;
use crate::layout::PartKind;
use crate::pane::{DockDirection, Pane, WindowHandle};

use super::DockManager;

impl<W: WindowHandle, H: DockHost<W>> DockManager<W, H> {
    /// Applies the sash position implied by the pointer at `pt`.
    ///
    /// Returns `false` when the resize was abandoned without changing
    /// anything.
    pub fn do_end_resize_action(&mut self, pt: Point) -> bool {
        let Some(part) = self.action_part().cloned() else {
            return true;
        };
        let new_pos = pt - self.action_offset;
        match part.kind {
            PartKind::DockSizer => {
                let Some(dock_idx) = part.dock else {
                    return true;
                };
                self.resize_dock(dock_idx, new_pos, part.rect.width, part.rect.height);
                self.update();
                true
            }
            PartKind::PaneSizer => {
                let (Some(dock_idx), Some(pane)) = (part.dock, part.pane) else {
                    return true;
                };
                if self.resize_pane(dock_idx, pane, new_pos) {
                    self.update();
                    true
                } else {
                    self.cancel_action();
                    false
                }
            }
            _ => true,
        }
    }

    /// New thickness for the dock, capped so every dock and sash still fits
    /// the managed area.
    fn resize_dock(&mut self, dock_idx: usize, new_pos: Point, sash_width: i32, sash_height: i32) {
        let sash = self.config.metrics.sash_size;
        let client = self.host.client_size();

        let mut used_width = 0;
        let mut used_height = 0;
        for dock in &self.docks {
            match dock.dock_direction {
                DockDirection::Top | DockDirection::Bottom => used_height += dock.size,
                DockDirection::Left | DockDirection::Right => used_width += dock.size,
                _ => {}
            }
            if dock.resizable {
                used_width += sash;
            }
        }
        let available_width = client.width - used_width;
        let available_height = client.height - used_height - self.host.reserved_height();

        let Some(dock) = self.docks.get_mut(dock_idx) else {
            return;
        };
        let rect = dock.rect;
        let old_size = dock.size;
        let (new_size, available) = match dock.dock_direction {
            DockDirection::Left => (new_pos.x - rect.x, available_width),
            DockDirection::Top => (new_pos.y - rect.y, available_height),
            DockDirection::Right => (rect.x + rect.width - new_pos.x - sash_width, available_width),
            DockDirection::Bottom => {
                (rect.y + rect.height - new_pos.y - sash_height, available_height)
            }
            _ => return,
        };
        dock.size = new_size.min(old_size + available);
        tracing::debug!(
            direction = ?dock.dock_direction,
            layer = dock.dock_layer,
            row = dock.dock_row,
            size = dock.size,
            "resized dock"
        );
    }

    /// Turns the sash position after `pane` into a new proportion, borrowed
    /// from the next resizable pane in the dock.
    fn resize_pane(&mut self, dock_idx: usize, pane_id: crate::pane::PaneId, new_pos: Point) -> bool {
        let metrics = self.config.metrics;
        let Some(dock) = self.docks.get(dock_idx) else {
            return false;
        };
        let Some(pane_part) = self.pane_part(pane_id).cloned() else {
            return false;
        };
        let horizontal = dock.is_horizontal();

        let new_pixsize = if horizontal {
            new_pos.x - pane_part.rect.x
        } else {
            new_pos.y - pane_part.rect.y
        };
        let mut dock_pixels = if horizontal {
            dock.rect.width
        } else {
            dock.rect.height
        };

        let members: Vec<&Pane<W>> = dock
            .panes
            .iter()
            .filter_map(|id| self.pane_by_id(*id))
            .collect();

        let mut total_proportion: i64 = 0;
        let mut pane_position = None;
        for (idx, member) in members.iter().enumerate() {
            if member.id == pane_id {
                pane_position = Some(idx);
            }
            if idx > 0 {
                dock_pixels -= metrics.sash_size;
            }
            if member.is_fixed() {
                dock_pixels -= if horizontal {
                    member.best_size.width
                } else {
                    member.best_size.height
                };
            } else {
                total_proportion += member.dock_proportion as i64;
            }
        }
        let Some(pane_position) = pane_position else {
            debug_assert!(false, "resized pane is not in its dock");
            return false;
        };
        let new_pixsize = new_pixsize.min(dock_pixels);

        let borrow = members
            .iter()
            .skip(pane_position + 1)
            .find(|member| !member.is_fixed())
            .map(|member| member.id);
        let Some(borrow) = borrow else {
            return false;
        };
        if dock_pixels <= 0 || total_proportion == 0 {
            return false;
        }

        let pane = members[pane_position];
        let neighbour = members
            .iter()
            .find(|member| member.id == borrow)
            .copied()
            .unwrap_or(pane);
        let to_proportion = |pixels: i32| pixels as i64 * total_proportion / dock_pixels as i64;

        let own_min = to_proportion(min_pixels(pane, pane_part.orientation, &metrics));
        let new_proportion = to_proportion(new_pixsize).max(own_min);
        let borrow_min = to_proportion(min_pixels(neighbour, pane_part.orientation, &metrics));

        let old_proportion = pane.dock_proportion as i64;
        let borrow_proportion = neighbour.dock_proportion as i64;
        let diff = new_proportion - old_proportion;

        let (new_proportion, new_borrow) = if diff > 0 {
            let room = borrow_proportion - borrow_min;
            if room <= 0 {
                return false;
            }
            let taken = diff.min(room);
            (old_proportion + taken, borrow_proportion - taken)
        } else {
            (new_proportion, borrow_proportion - diff)
        };

        for member in self.panes.iter_mut() {
            if member.id == pane_id {
                member.dock_proportion = new_proportion as i32;
            } else if member.id == borrow {
                member.dock_proportion = new_borrow as i32;
            }
        }
        tracing::debug!(
            pane = ?pane_id,
            proportion = new_proportion,
            neighbour = ?borrow,
            neighbour_proportion = new_borrow,
            "resized pane"
        );
        true
    }
}

/// Smallest extent of `pane` along the dock, decorations included. The
/// compensation keeps proportion rounding from shaving a cell off.
fn min_pixels<W>(
    pane: &Pane<W>,
    orientation: Orientation,
    metrics: &crate::config::DockMetrics,
) -> i32 {
    let mut min = 0;
    if pane.min_size.width >= 0 && pane.min_size.height >= 0 {
        if pane.has_border() {
            min += metrics.pane_border_size * 2;
        }
        if orientation == Orientation::Vertical {
            min += pane.min_size.height;
            if pane.has_caption() {
                min += metrics.caption_size;
            }
        } else {
            min += pane.min_size.width;
        }
    }
    min + MIN_PROPORTION_COMPENSATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DockMetrics;
    use crate::geometry::Size;

    #[test]
    fn compensation_is_one_cell() {
        assert_eq!(MIN_PROPORTION_COMPENSATION, 1);
    }

    #[test]
    fn min_pixels_counts_border_and_caption_when_vertical() {
        let metrics = DockMetrics::default();
        let pane: Pane<u32> = Pane::new().min_size(Size::new(4, 5));
        let expected = metrics.pane_border_size * 2 + 5 + metrics.caption_size + 1;
        assert_eq!(min_pixels(&pane, Orientation::Vertical, &metrics), expected);
        let expected = metrics.pane_border_size * 2 + 4 + 1;
        assert_eq!(min_pixels(&pane, Orientation::Horizontal, &metrics), expected);
    }

    #[test]
    fn unset_min_size_only_gets_compensation() {
        let pane: Pane<u32> = Pane::new();
        assert_eq!(
            min_pixels(&pane, Orientation::Vertical, &DockMetrics::default()),
            MIN_PROPORTION_COMPENSATION
        );
    }
}
