use ratatui::style::{Color, Modifier, Style};

// Colors used by the dock renderer. RGB values go through `rgb_to_color` so
// terminals without truecolor get the nearest xterm-256 entry.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const HINT_RGB: (u8, u8, u8) = (80, 140, 220);
pub const BACKGROUND_RGB: (u8, u8, u8) = (20, 20, 20);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockTheme {
    pub background: Color,
    pub border: Color,
    pub sash: Color,
    pub sash_active: Color,
    pub caption_bg: Color,
    pub caption_fg: Color,
    pub active_caption_bg: Color,
    pub active_caption_fg: Color,
    pub gripper: Color,
    pub button_fg: Color,
    pub button_hover_bg: Color,
    pub button_pressed_bg: Color,
    /// Drop hint at full opacity.
    pub hint: (u8, u8, u8),
    /// Color the hint fades in from.
    pub hint_base: (u8, u8, u8),
}

impl Default for DockTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            border: Color::DarkGray,
            sash: Color::DarkGray,
            sash_active: rgb_to_color(ACCENT_RGB),
            caption_bg: Color::DarkGray,
            caption_fg: Color::White,
            active_caption_bg: Color::Blue,
            active_caption_fg: Color::White,
            gripper: Color::Gray,
            button_fg: Color::White,
            button_hover_bg: Color::Gray,
            button_pressed_bg: rgb_to_color(ACCENT_RGB),
            hint: HINT_RGB,
            hint_base: BACKGROUND_RGB,
        }
    }
}

impl DockTheme {
    pub fn caption(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.active_caption_bg)
                .fg(self.active_caption_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.caption_bg).fg(self.caption_fg)
        }
    }

    /// Hint color at `amount` out of `max` opacity.
    pub fn hint_color(&self, amount: u8, max: u8) -> Color {
        let (r, g, b) = blend(self.hint_base, self.hint, amount, max);
        rgb_to_color((r, g, b))
    }
}

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    let truecolor = std::env::var("COLORTERM")
        .map(|value| {
            let value = value.to_lowercase();
            value.contains("truecolor") || value.contains("24bit")
        })
        .unwrap_or(false);
    if truecolor {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else {
        Color::Indexed(xterm_index(rgb))
    }
}

fn blend(from: (u8, u8, u8), to: (u8, u8, u8), amount: u8, max: u8) -> (u8, u8, u8) {
    if max == 0 || amount >= max {
        return to;
    }
    let mix = |a: u8, b: u8| {
        let a = a as i32;
        let b = b as i32;
        (a + (b - a) * amount as i32 / max as i32) as u8
    };
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Nearest entry of the 6x6x6 cube or the gray ramp.
fn xterm_index((r, g, b): (u8, u8, u8)) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let step = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    let (r6, g6, b6) = (step(r), step(g), step(b));
    let cube = (
        LEVELS[r6 as usize],
        LEVELS[g6 as usize],
        LEVELS[b6 as usize],
    );

    let average = (r as u16 + g as u16 + b as u16) / 3;
    let gray_step = (average.saturating_sub(3) / 10).min(23) as u8;
    let gray_level = 8 + gray_step * 10;
    let gray = (gray_level, gray_level, gray_level);

    if distance((r, g, b), gray) < distance((r, g, b), cube) {
        232 + gray_step
    } else {
        16 + 36 * r6 + 6 * g6 + b6
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> i32 {
    let d = |x: u8, y: u8| (x as i32 - y as i32).pow(2);
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
