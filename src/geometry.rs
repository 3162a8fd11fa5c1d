//! Signed cell geometry used by the layout engine.
//!
//! Layout math works in signed integers so intermediate values (offsets that
//! drift left of the managed area, negative drop deltas) never wrap. The
//! `-1` sentinel marks an unset size or position, matching how panes record
//! "no preference".

use ratatui::layout::Rect as TermRect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Unset position.
    pub const DEFAULT: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Unset size.
    pub const DEFAULT: Size = Size {
        width: -1,
        height: -1,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Component-wise maximum.
    pub fn inc_to(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Extent along the given orientation.
    pub fn along(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Inclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.y >= self.y && pt.x < self.x + self.width && pt.y < self.y + self.height
    }

    pub fn intersection(&self, other: Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn offset(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Grows the rectangle by `dx`/`dy` on every side.
    pub fn inflate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2,
            self.height + dy * 2,
        )
    }

    /// Clips to the unsigned terminal grid. Anything left of or above the
    /// origin is cut off.
    pub fn to_term(&self) -> TermRect {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + self.width).max(left);
        let bottom = (self.y + self.height).max(top);
        let clamp = |v: i32| v.clamp(0, u16::MAX as i32) as u16;
        TermRect {
            x: clamp(left),
            y: clamp(top),
            width: clamp(right - left),
            height: clamp(bottom - top),
        }
    }
}

impl From<TermRect> for Rect {
    fn from(rect: TermRect) -> Self {
        Rect::new(
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32,
        )
    }
}
