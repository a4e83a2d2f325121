//! Geometry primitives for window chrome.
//!
//! All coordinates are integer pixels. Rectangles use the
//! `(left, top, right, bottom)` convention with `right` and `bottom`
//! exclusive, matching what native windowing systems report.

use crate::error::ChromeError;

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point with both coordinates at zero.
    pub const ZERO: Point = Point::new(0, 0);

    /// Return this point expressed relative to `origin`.
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle with exclusive right and bottom edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rectangle {
    /// The empty rectangle at the origin.
    pub const ZERO: Rectangle = Rectangle::new(0, 0, 0, 0);

    /// Create a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from a top-left corner and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Width of the rectangle. Negative for inverted rectangles.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle. Negative for inverted rectangles.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Whether `point` lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        (self.left..self.right).contains(&point.x) && (self.top..self.bottom).contains(&point.y)
    }

    /// Return the rectangle moved by `dx`, `dy`.
    pub fn translate(&self, dx: i32, dy: i32) -> Rectangle {
        Rectangle::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

/// Configurable frame dimensions of a borderless window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Thickness of the invisible resize border along every edge.
    EdgeInsets,
    /// Height of the draggable title bar, measured from the top edge.
    TitleBar,
}

impl FrameKind {
    /// Every frame kind, in ordinal order.
    pub const ALL: [FrameKind; 2] = [FrameKind::EdgeInsets, FrameKind::TitleBar];

    /// Number of frame kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable index of this kind, equal to its embedder ordinal.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for FrameKind {
    type Error = ChromeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(ChromeError::InvalidOrdinal {
                kind: "FrameKind",
                value,
            })
    }
}

/// Embedder-drawn controls that live inside the title bar.
///
/// Clicks on a control must reach the toolkit, so controls always win over
/// caption and resize zones during hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// The close button.
    CloseButton,
    /// The back/navigation button.
    BackButton,
    /// The minimize button.
    MinimizeButton,
}

impl ControlKind {
    /// Every control kind, in ordinal order.
    pub const ALL: [ControlKind; 3] = [
        ControlKind::CloseButton,
        ControlKind::BackButton,
        ControlKind::MinimizeButton,
    ];

    /// Number of control kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable index of this kind, equal to its embedder ordinal.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i32> for ControlKind {
    type Error = ChromeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(ChromeError::InvalidOrdinal {
                kind: "ControlKind",
                value,
            })
    }
}
