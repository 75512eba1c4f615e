/// An axis-aligned rectangle, x/y is the top-left corner.
///
/// This is the region-of-interest box exchanged with tracking backends,
/// so it keeps the flat x/y/w/h layout those APIs use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T> Rect<T> {
    pub fn new(x: T, y: T, w: T, h: T) -> Self {
        Self { x, y, w, h }
    }
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            x: T::default(),
            y: T::default(),
            w: T::default(),
            h: T::default(),
        }
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.w * self.h
    }
}

impl<T: std::ops::Add<Output = T> + std::ops::Div<Output = T> + Copy + From<u8>> Rect<T> {
    pub fn center_x(&self) -> T {
        self.x + self.w / T::from(2u8)
    }

    pub fn center_y(&self) -> T {
        self.y + self.h / T::from(2u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area() {
        let r = Rect::new(10.0f32, 20.0, 40.0, 30.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn test_center() {
        let r = Rect::new(140.0f32, 100.0, 40.0, 40.0);
        assert_eq!(r.center_x(), 160.0);
        assert_eq!(r.center_y(), 120.0);
    }

    #[test]
    fn test_default_is_zeroed() {
        let r: Rect<f32> = Rect::default();
        assert_eq!(r, Rect::new(0.0, 0.0, 0.0, 0.0));
    }
}
