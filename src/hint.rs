//! Docking hint state: the rectangle previewing where a dragged pane would
//! land, and its fade-in ramp.

use std::time::{Duration, Instant};

use crate::geometry::Rect;

#[derive(Debug, Clone)]
pub struct HintFader {
    rect: Rect,
    amount: u8,
    max: u8,
    interval: Duration,
    fading: bool,
    last_step: Option<Instant>,
}

impl HintFader {
    pub fn new(max: u8, interval: Duration) -> Self {
        Self {
            rect: Rect::default(),
            amount: 0,
            max,
            interval,
            fading: false,
            last_step: None,
        }
    }

    /// Moves the hint to `rect`. Returns `false` when nothing changed.
    ///
    /// An empty rectangle hides the hint. A new rectangle restarts the fade
    /// when `fade` is set and otherwise shows at full opacity.
    pub fn update(&mut self, rect: Rect, fade: bool, now: Instant) -> bool {
        if rect == self.rect {
            return false;
        }
        if rect.is_empty() {
            self.hide();
            return true;
        }
        self.rect = rect;
        self.amount = if fade { 0 } else { self.max };
        self.fading = self.amount < self.max;
        self.last_step = self.fading.then_some(now);
        true
    }

    pub fn hide(&mut self) {
        self.rect = Rect::default();
        self.fading = false;
        self.last_step = None;
    }

    /// Advances the fade by one step per elapsed interval. Returns `true`
    /// when the opacity changed and the hint needs repainting.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_step else {
            return false;
        };
        if !self.fading || self.interval.is_zero() {
            return false;
        }
        let elapsed = now.saturating_duration_since(last);
        let steps = (elapsed.as_millis() / self.interval.as_millis().max(1)) as u64;
        if steps == 0 {
            return false;
        }
        let next = (self.amount as u64 + steps).min(self.max as u64) as u8;
        self.last_step = Some(last + self.interval * steps as u32);
        let changed = next != self.amount;
        self.amount = next;
        if self.amount >= self.max {
            self.fading = false;
            self.last_step = None;
        }
        changed
    }

    pub fn is_visible(&self) -> bool {
        !self.rect.is_empty()
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current opacity, from 0 up to the configured maximum.
    pub fn amount(&self) -> u8 {
        self.amount
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fader() -> HintFader {
        HintFader::new(4, Duration::from_millis(10))
    }

    #[test]
    fn fade_ramps_to_max_then_stops() {
        let start = Instant::now();
        let mut hint = fader();
        assert!(hint.update(Rect::new(0, 0, 5, 5), true, start));
        assert_eq!(hint.amount(), 0);
        assert!(!hint.tick(start + Duration::from_millis(5)));
        assert!(hint.tick(start + Duration::from_millis(20)));
        assert_eq!(hint.amount(), 2);
        assert!(hint.tick(start + Duration::from_millis(100)));
        assert_eq!(hint.amount(), 4);
        assert!(!hint.is_fading());
        assert!(!hint.tick(start + Duration::from_millis(200)));
    }

    #[test]
    fn without_fade_hint_is_opaque_at_once() {
        let mut hint = fader();
        hint.update(Rect::new(1, 1, 3, 3), false, Instant::now());
        assert_eq!(hint.amount(), 4);
        assert!(!hint.is_fading());
    }

    #[test]
    fn same_rect_is_not_a_change_and_empty_hides() {
        let now = Instant::now();
        let mut hint = fader();
        let rect = Rect::new(2, 2, 4, 4);
        assert!(hint.update(rect, true, now));
        assert!(!hint.update(rect, true, now));
        assert!(hint.update(Rect::default(), true, now));
        assert!(!hint.is_visible());
    }
}
