/// A point in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Computed outer margins of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(margin: f32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// An axis-aligned box in viewport coordinates.
///
/// All six fields are stored so that a rect can carry a measured box verbatim,
/// including the margin-adjusted form where `left`/`top` move but the size does not.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.
    }

    /// Shift all four edges by the same offset. Width and height never change.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// The box the drag ghost is aligned to: left/top pulled out by the item's own
    /// left/top margins, everything else as measured.
    pub fn without_margins(&self, margins: Margins) -> Self {
        Self {
            left: self.left - margins.left,
            top: self.top - margins.top,
            ..*self
        }
    }

    /// Distance between the top-left corners of two rects.
    pub fn origin_distance(&self, other: &Rect) -> f32 {
        let dy = other.top - self.top;
        let dx = other.left - self.left;
        (dy * dy + dx * dx).sqrt()
    }
}
