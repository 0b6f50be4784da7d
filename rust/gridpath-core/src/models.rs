use serde::{Deserialize, Serialize};

/// World-space coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Point) -> f32 {
        Point::new(self.x - other.x, self.y - other.y).length()
    }
}

/// Grid coordinate, column `x` and row `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_length_and_distance() {
        assert_eq!(Point::ZERO.length(), 0.0);
        assert!((Point::new(3.0, 4.0).length() - 5.0).abs() < 1e-6);
        assert!((Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn cell_manhattan_is_symmetric() {
        let a = Cell::new(0, 0);
        let b = Cell::new(4, -3);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
    }

    #[test]
    fn point_serializes_as_xy_object() {
        let v = serde_json::to_value(Point::new(16.0, 48.0)).unwrap();
        assert_eq!(v["x"], serde_json::json!(16.0));
        assert_eq!(v["y"], serde_json::json!(48.0));
    }
}
