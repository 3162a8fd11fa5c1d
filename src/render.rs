//! Draws the laid-out frame into a ratatui buffer.
//!
//! Only the chrome is drawn: sashes, borders, captions, grippers and caption
//! buttons, plus the docking and resize hints. Pane content is left to the
//! caller, which finds each pane's body through the `Pane` parts.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as TermRect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::config::ManagerFlags;
use crate::geometry::{Orientation, Rect};
use crate::host::DockHost;
use crate::layout::{PartKind, UiPart};
use crate::manager::{Action, ButtonState, DockManager};
use crate::pane::{Pane, PaneButton, WindowHandle};
use crate::theme::DockTheme;

/// Renders every UI part of `manager` that falls inside `area`.
pub fn render_dock<W: WindowHandle, H: DockHost<W>>(
    manager: &DockManager<W, H>,
    area: TermRect,
    buf: &mut Buffer,
    theme: &DockTheme,
) {
    let bounds = area.intersection(buf.area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let resizing = manager.action() == Action::Resize;
    for (idx, part) in manager.ui_parts().iter().enumerate() {
        let rect = clip(part.rect, bounds);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        let pane = part.pane.and_then(|id| manager.pane_by_id(id));
        match part.kind {
            PartKind::Background => {
                buf.set_style(rect, Style::default().bg(theme.background));
            }
            PartKind::DockSizer | PartKind::PaneSizer => {
                let active = resizing && manager.action_part_index() == Some(idx);
                let color = if active { theme.sash_active } else { theme.sash };
                fill(buf, rect, sash_glyph(part.orientation), Style::default().fg(color));
            }
            PartKind::Caption => {
                let active = pane.is_some_and(Pane::is_active);
                let style = theme.caption(active);
                fill(buf, rect, " ", style);
                if let Some(pane) = pane {
                    let title = format!(" {}", caption_text(pane));
                    safe_set_string(buf, rect, rect.x, rect.y, &title, style);
                }
            }
            PartKind::Gripper => {
                fill(buf, rect, gripper_glyph(part), Style::default().fg(theme.gripper));
            }
            PartKind::PaneButton => {
                let (Some(pane), Some(button)) = (pane, part.button) else {
                    continue;
                };
                let active = pane.is_active();
                let style = match manager.button_state(idx) {
                    ButtonState::Normal => theme.caption(active).fg(theme.button_fg),
                    ButtonState::Hover => Style::default()
                        .bg(theme.button_hover_bg)
                        .fg(theme.button_fg),
                    ButtonState::Pressed => Style::default()
                        .bg(theme.button_pressed_bg)
                        .fg(theme.button_fg),
                };
                fill(buf, rect, " ", style);
                let glyph = button_glyph(button, pane.is_maximized());
                let x = rect.x + rect.width.saturating_sub(1) / 2;
                safe_set_string(buf, rect, x, rect.y, glyph, style);
            }
            PartKind::PaneBorder => {
                let active = pane.is_some_and(Pane::is_active);
                let color = if active {
                    theme.active_caption_bg
                } else {
                    theme.border
                };
                if rect == part.rect.to_term() {
                    Block::new()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .render(rect, buf);
                }
            }
            PartKind::Pane | PartKind::Dock => {}
        }
    }

    if let Some(rect) = manager.resize_hint() {
        let rect = clip(rect, bounds);
        fill(buf, rect, "░", Style::default().fg(theme.sash_active));
    }
    render_hint(manager, bounds, buf, theme);
}

/// Draws the docking hint, faded according to the manager's hint state.
fn render_hint<W: WindowHandle, H: DockHost<W>>(
    manager: &DockManager<W, H>,
    bounds: TermRect,
    buf: &mut Buffer,
    theme: &DockTheme,
) {
    let hint = manager.hint();
    if !hint.is_visible() {
        return;
    }
    let rect = clip(hint.rect(), bounds);
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let color = theme.hint_color(hint.amount(), hint.max());
    if !manager.flags().contains(ManagerFlags::RECTANGLE_HINT) {
        buf.set_style(rect, Style::default().bg(color));
    }
    Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(color))
        .render(rect, buf);
}

/// Draws the chrome of a floating frame and returns the client area inside
/// it.
pub fn render_floating_frame(
    rect: Rect,
    title: &str,
    active: bool,
    buf: &mut Buffer,
    theme: &DockTheme,
) -> TermRect {
    let area = clip(rect, buf.area);
    if area.width == 0 || area.height == 0 {
        return TermRect::default();
    }
    buf.set_style(area, Style::default().bg(theme.background));
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.caption(active))
        .title(format!(" {title} "));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

fn clip(rect: Rect, bounds: TermRect) -> TermRect {
    rect.to_term().intersection(bounds)
}

fn fill(buf: &mut Buffer, rect: TermRect, symbol: &str, style: Style) {
    let rect = rect.intersection(buf.area);
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

fn caption_text<W>(pane: &Pane<W>) -> &str {
    if pane.caption.is_empty() {
        &pane.name
    } else {
        &pane.caption
    }
}

/// A vertical sash separates columns and is drawn as a vertical line.
fn sash_glyph(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Vertical => "│",
        Orientation::Horizontal => "─",
    }
}

fn gripper_glyph(part: &UiPart) -> &'static str {
    if part.rect.width >= part.rect.height {
        "┅"
    } else {
        "┇"
    }
}

fn button_glyph(button: PaneButton, maximized: bool) -> &'static str {
    match button {
        PaneButton::Close => "×",
        PaneButton::MaximizeRestore if maximized => "▫",
        PaneButton::MaximizeRestore => "□",
        PaneButton::Pin => "⇱",
    }
}

fn safe_set_string(buffer: &mut Buffer, bounds: TermRect, x: u16, y: u16, text: &str, style: Style) {
    let bounds = bounds.intersection(buffer.area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x) as usize;
    let text: String = text.chars().take(available).collect();
    buffer.set_string(x, y, text, style);
}
