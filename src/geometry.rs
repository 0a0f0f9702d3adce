//! Face layout and hand geometry

/// A point in surface pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of a client area or render target in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (e.g. a minimized window)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Axis-aligned ellipse
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
}

impl Ellipse {
    pub fn circle(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
        }
    }
}

/// Center and radius of the clock face for a given surface size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub center: Point,
    pub radius: f32,
}

impl Layout {
    /// Largest circle centered in the surface
    pub fn from_size(size: Size) -> Self {
        let x = size.width as f32 / 2.0;
        let y = size.height as f32 / 2.0;
        Self {
            center: Point::new(x, y),
            radius: x.min(y),
        }
    }

    pub fn face(&self) -> Ellipse {
        Ellipse::circle(self.center, self.radius)
    }

    /// Tip of a hand `length` (fraction of the radius) long, rotated
    /// `angle` degrees clockwise from 12 o'clock
    pub fn hand_tip(&self, length: f32, angle: f32) -> Point {
        let reach = self.radius * length;
        let (sin, cos) = angle.to_radians().sin_cos();
        Point::new(self.center.x + reach * sin, self.center.y - reach * cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-3, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_square_layout() {
        let layout = Layout::from_size(Size::new(600, 600));
        assert_eq!(layout.center, Point::new(300.0, 300.0));
        assert_eq!(layout.radius, 300.0);
    }

    #[test]
    fn test_wide_layout_uses_shorter_side() {
        let layout = Layout::from_size(Size::new(400, 200));
        assert_eq!(layout.center, Point::new(200.0, 100.0));
        assert_eq!(layout.radius, 100.0);
    }

    #[test]
    fn test_empty_size_gives_zero_radius() {
        let layout = Layout::from_size(Size::new(0, 480));
        assert_eq!(layout.radius, 0.0);
        assert!(Size::new(0, 480).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_hand_tip_cardinal_directions() {
        let layout = Layout::from_size(Size::new(200, 200));
        assert_close(layout.hand_tip(1.0, 0.0), Point::new(100.0, 0.0));
        assert_close(layout.hand_tip(1.0, 90.0), Point::new(200.0, 100.0));
        assert_close(layout.hand_tip(0.5, 180.0), Point::new(100.0, 150.0));
        assert_close(layout.hand_tip(1.0, 270.0), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_zero_length_hand_stays_at_center() {
        let layout = Layout::from_size(Size::new(300, 300));
        assert_close(layout.hand_tip(0.0, 123.0), layout.center);
    }
}
