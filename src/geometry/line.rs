use geo::{
    kernels::{Kernel, RobustKernel},
    line_intersection::{line_intersection, LineIntersection},
    Coord, Orientation,
};

/// Straight segment between two coordinates
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub start: Coord,
    pub end: Coord,
}

impl Line {
    pub fn new(start: Coord, end: Coord) -> Line {
        Line { start, end }
    }

    pub fn length_squared(&self) -> f64 {
        (self.end.x - self.start.x).powi(2) + (self.end.y - self.start.y).powi(2)
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    /// The point where the two segments cross in both of their interiors.
    /// Touching at an endpoint and collinear overlap are not crossings.
    pub fn crossing(&self, other: &Line) -> Option<Coord> {
        match line_intersection(
            geo::Line::new(self.start, self.end),
            geo::Line::new(other.start, other.end),
        )? {
            LineIntersection::SinglePoint {
                intersection,
                is_proper: true,
            } => Some(intersection),
            _ => None,
        }
    }

    /// True if `p` lies exactly on the segment, excluding its endpoints
    pub fn contains_interior(&self, p: Coord) -> bool {
        if p == self.start || p == self.end {
            return false;
        }
        if RobustKernel::orient2d(self.start, self.end, p) != Orientation::Collinear {
            return false;
        }
        p.x >= self.start.x.min(self.end.x)
            && p.x <= self.start.x.max(self.end.x)
            && p.y >= self.start.y.min(self.end.y)
            && p.y <= self.start.y.max(self.end.y)
    }

    /// Position of the projection of `p` along the segment, 0 at start and 1 at end
    pub fn parameter(&self, p: Coord) -> f64 {
        let len2 = self.length_squared();
        if len2 == 0. {
            return 0.;
        }
        let t = ((p.x - self.start.x) * (self.end.x - self.start.x)
            + (p.y - self.start.y) * (self.end.y - self.start.y))
            / len2;
        t.clamp(0., 1.)
    }

    /// Linear interpolation of the endpoint values at the projection of `p`
    pub fn interpolate(&self, p: Coord, start_value: f64, end_value: f64) -> f64 {
        let t = self.parameter(p);
        start_value + t * (end_value - start_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line {
        Line::new(Coord { x: a.0, y: a.1 }, Coord { x: b.0, y: b.1 })
    }

    #[test]
    fn crossing_in_the_middle() {
        let a = line((0., 0.), (2., 2.));
        let b = line((0., 2.), (2., 0.));

        let p = a.crossing(&b).expect("segments cross");
        assert!((p.x - 1.).abs() < 1e-12);
        assert!((p.y - 1.).abs() < 1e-12);
    }

    #[test]
    fn touching_is_not_crossing() {
        let a = line((0., 0.), (2., 0.));
        let b = line((1., 0.), (1., 2.));
        let c = line((2., 0.), (3., 1.));

        assert!(a.crossing(&b).is_none());
        assert!(a.crossing(&c).is_none());
    }

    #[test]
    fn collinear_overlap_is_not_crossing() {
        let a = line((0., 0.), (2., 0.));
        let b = line((1., 0.), (3., 0.));

        assert!(a.crossing(&b).is_none());
        assert!(a.contains_interior(b.start));
        assert!(b.contains_interior(a.end));
    }

    #[test]
    fn interior_excludes_endpoints() {
        let a = line((0., 0.), (4., 2.));

        assert!(a.contains_interior(Coord { x: 2., y: 1. }));
        assert!(!a.contains_interior(Coord { x: 0., y: 0. }));
        assert!(!a.contains_interior(Coord { x: 6., y: 3. }));
        assert!(!a.contains_interior(Coord { x: 2., y: 1.5 }));
    }

    #[test]
    fn interpolate_along() {
        let a = line((0., 0.), (4., 0.));
        assert_eq!(a.interpolate(Coord { x: 1., y: 0. }, 10., 30.), 15.);
        assert_eq!(a.interpolate(Coord { x: 8., y: 0. }, 10., 30.), 30.);
    }
}
