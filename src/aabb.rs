use crate::Point;

/// One of the four equal parts of a region, named by its offset from the region's origin.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Quadrant {
    /// `origin`
    MinXMinY,
    /// `origin + (0, half_h)`
    MinXMaxY,
    /// `origin + (half_w, 0)`
    MaxXMinY,
    /// `origin + (half_w, half_h)`
    MaxXMaxY,
}

impl Quadrant {
    /// Construction order of child nodes. Insertion, queries and traversals all walk children in
    /// this order, so the first child accepting a point on a shared edge is always the same one.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::MinXMinY,
        Quadrant::MinXMaxY,
        Quadrant::MaxXMinY,
        Quadrant::MaxXMaxY,
    ];

    /// `[x, y]` multipliers of the half extent.
    fn offset(self) -> [f64; 2] {
        match self {
            Quadrant::MinXMinY => [0.0, 0.0],
            Quadrant::MinXMaxY => [0.0, 1.0],
            Quadrant::MaxXMinY => [1.0, 0.0],
            Quadrant::MaxXMaxY => [1.0, 1.0],
        }
    }
}

/// Axis aligned rectangle given by its origin corner and its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub origin: Point,
    pub size: Point,
}

impl Aabb {
    pub fn new(origin: Point, size: Point) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(Point::new(x, y), Point::new(w, h))
    }

    /// `center` is the middle of the returned box.
    pub fn from_center(center: Point, size: Point) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn min(&self) -> Point {
        self.origin
    }

    pub fn max(&self) -> Point {
        self.origin + self.size
    }

    /// `[x, y, w, h]`
    pub fn tuple(&self) -> [f64; 4] {
        [self.origin[0], self.origin[1], self.size[0], self.size[1]]
    }

    /// Return wether point is within the box, edges included
    pub fn contains(&self, point: &Point) -> bool {
        let [x, y] = **point;
        let [fromx, fromy] = *self.origin;
        let [tox, toy] = *self.max();

        fromx <= x && x <= tox && fromy <= y && y <= toy
    }

    /// Boxes touching on an edge intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (from, to) = (self.min(), self.max());
        let (ofrom, oto) = (other.min(), other.max());

        if to[0] < ofrom[0] || oto[0] < from[0] {
            return false;
        }
        if to[1] < ofrom[1] || oto[1] < from[1] {
            return false;
        }
        true
    }

    /// The quarter of this box a child node owns.
    pub fn quadrant(&self, quadrant: Quadrant) -> Aabb {
        let half = self.size / 2.0;
        let [mx, my] = quadrant.offset();
        Self::new(self.origin + Point::new(half[0] * mx, half[1] * my), half)
    }

    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn bounding<'a, It>(points: It) -> Option<Self>
    where
        It: IntoIterator<Item = &'a Point>,
    {
        let mut it = points.into_iter();
        let first = *it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min.0[0] = min[0].min(p[0]);
            min.0[1] = min[1].min(p[1]);
            max.0[0] = max[0].max(p[0]);
            max.0[1] = max[1].max(p[1]);
        }
        Some(Self::new(min, max - min))
    }
}
