#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle occupied by a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { origin: Point::new(x, y), width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.origin.x + self.width / 2.0, self.origin.y + self.height / 2.0)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.origin.x + dx, self.origin.y + dy, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.width
            && p.y <= self.origin.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowheadType {
    None,
    OpenTriangle,
    EmptyTriangle,
    EmptyRhombus,
    FullRhombus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    Solid,
    Dashed,
}
