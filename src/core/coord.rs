use std::ops::{Add, Mul, Sub};

/// A signed board offset or coordinate pair, used for move deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn chebyshev_norm(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Unit step towards this offset along a rank, file or diagonal.
    ///
    /// `None` for the origin and for offsets that are not on a line.
    #[inline]
    pub fn line_step(self) -> Option<(Coord, i32)> {
        let (ax, ay) = (self.x.abs(), self.y.abs());
        if self == Coord::ORIGIN {
            return None;
        }
        if self.x == 0 || self.y == 0 || ax == ay {
            Some((Coord::new(self.x.signum(), self.y.signum()), ax.max(ay)))
        } else {
            None
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    #[inline]
    fn mul(self, rhs: i32) -> Coord {
        Coord {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_step_covers_ranks_files_and_diagonals() {
        assert_eq!(Coord::new(0, 5).line_step(), Some((Coord::new(0, 1), 5)));
        assert_eq!(Coord::new(-3, 0).line_step(), Some((Coord::new(-1, 0), 3)));
        assert_eq!(Coord::new(-2, 2).line_step(), Some((Coord::new(-1, 1), 2)));
        assert_eq!(Coord::new(2, 1).line_step(), None);
        assert_eq!(Coord::ORIGIN.line_step(), None);
    }
}
