//! Field of view over a viewport-sized property map.
//!
//! A [`FovMap`] stores, per cell, whether light passes through it and
//! whether it can be walked on, and the in-view bitmap of the last
//! [`compute`](FovMap::compute). Visibility is computed with symmetric
//! shadow casting (Albert Ford's algorithm) with expansive walls, then
//! clipped to a Euclidean circle.

use tsmi_core::{Point, Range};

/// Visibility map of a fixed size.
#[derive(Debug, Clone)]
pub struct FovMap {
    width: i32,
    height: i32,
    transparent: Vec<bool>,
    walkable: Vec<bool>,
    in_view: Vec<bool>,
    visible: Vec<Point>,
}

impl FovMap {
    /// A map where every cell blocks light and movement.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let n = Range::new(0, 0, width, height).len();
        Self {
            width,
            height,
            transparent: vec![false; n],
            walkable: vec![false; n],
            in_view: vec![false; n],
            visible: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    fn idx(&self, p: Point) -> Option<usize> {
        self.bounds()
            .contains(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Reset every property to blocking and empty the view.
    pub fn clear(&mut self) {
        self.transparent.fill(false);
        self.walkable.fill(false);
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.in_view.fill(false);
        self.visible.clear();
    }

    /// Set the properties of `p`. Ignored outside the map.
    pub fn set_properties(&mut self, p: Point, transparent: bool, walkable: bool) {
        if let Some(i) = self.idx(p) {
            self.transparent[i] = transparent;
            self.walkable[i] = walkable;
        }
    }

    pub fn is_transparent(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.transparent[i])
    }

    pub fn is_walkable(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.walkable[i])
    }

    /// Compute the cells visible from `origin`.
    ///
    /// `radius <= 0` means no distance limit inside the map. The origin is
    /// always visible. Opaque cells bordering the lit area are visible only
    /// when `light_walls` is set.
    pub fn compute(&mut self, origin: Point, radius: i32, light_walls: bool) {
        self.reset_view();
        if self.idx(origin).is_none() {
            return;
        }
        let reach = if radius > 0 {
            radius
        } else {
            self.width.max(self.height)
        };
        self.reveal(origin);
        for q in Quadrant::ALL {
            self.cast(origin, q, reach);
        }

        let r2 = i64::from(reach) * i64::from(reach);
        let keep = |p: Point, transparent: bool| {
            let d = p - origin;
            let near = radius <= 0 || i64::from(d.x).pow(2) + i64::from(d.y).pow(2) <= r2;
            p == origin || (near && (light_walls || transparent))
        };
        let (kept, dropped): (Vec<Point>, Vec<Point>) = std::mem::take(&mut self.visible)
            .into_iter()
            .partition(|&p| keep(p, self.is_transparent(p)));
        for p in dropped {
            if let Some(i) = self.idx(p) {
                self.in_view[i] = false;
            }
        }
        self.visible = kept;
    }

    fn reveal(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            if !self.in_view[i] {
                self.in_view[i] = true;
                self.visible.push(p);
            }
        }
    }

    fn cast(&mut self, origin: Point, q: Quadrant, reach: i32) {
        let (cols, depth_max) = q.extent(origin, self.bounds());
        let depth_max = depth_max.min(reach);
        if depth_max <= 0 {
            return;
        }
        let mut rows = vec![Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }];
        while let Some(mut row) = rows.pop() {
            let mut prev_wall = None;
            for col in row.cols(cols) {
                let p = q.transform(origin, row.depth, col);
                let wall = !self.is_transparent(p);
                if wall || row.is_symmetric(col) {
                    self.reveal(p);
                }
                match prev_wall {
                    Some(true) if !wall => row.start = Slope::diamond(row.depth, col),
                    Some(false) if wall => {
                        let mut next = row.next();
                        next.end = Slope::diamond(row.depth, col);
                        if next.depth <= depth_max {
                            rows.push(next);
                        }
                    }
                    _ => {}
                }
                prev_wall = Some(wall);
            }
            if prev_wall == Some(false) && row.depth < depth_max {
                rows.push(row.next());
            }
        }
    }

    /// Whether `p` was visible in the last computation.
    pub fn is_in_fov(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.in_view[i])
    }

    /// Visible cells of the last computation, origin first.
    pub fn iter_visible(&self) -> impl Iterator<Item = Point> + '_ {
        self.visible.iter().copied()
    }
}

/// One of the four 90° sectors scanned from the origin. Within a sector,
/// `depth` grows away from the origin and `col` runs across.
#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::North, Quadrant::East, Quadrant::South, Quadrant::West];

    fn transform(self, o: Point, depth: i32, col: i32) -> Point {
        match self {
            Quadrant::North => Point::new(o.x + col, o.y - depth),
            Quadrant::East => Point::new(o.x + depth, o.y + col),
            Quadrant::South => Point::new(o.x + col, o.y + depth),
            Quadrant::West => Point::new(o.x - depth, o.y + col),
        }
    }

    /// Column bounds and maximum depth that stay inside `rg`.
    fn extent(self, o: Point, rg: Range) -> ((i32, i32), i32) {
        let xcols = (rg.min.x - o.x, rg.max.x - o.x - 1);
        let ycols = (rg.min.y - o.y, rg.max.y - o.y - 1);
        match self {
            Quadrant::North => (xcols, o.y - rg.min.y),
            Quadrant::South => (xcols, rg.max.y - o.y - 1),
            Quadrant::East => (ycols, rg.max.x - o.x - 1),
            Quadrant::West => (ycols, o.x - rg.min.x),
        }
    }
}

/// A rational slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the left corner of the cell at `(depth, col)`.
    const fn diamond(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    /// Columns covered by the row, ties rounded towards the centre.
    fn cols(&self, (lo, hi): (i32, i32)) -> std::ops::RangeInclusive<i32> {
        let (s, e) = (self.start, self.end);
        // floor(depth * s + 1/2)
        let min = (2 * self.depth * s.num + s.den).div_euclid(2 * s.den);
        // ceil(depth * e - 1/2)
        let max = -(e.den - 2 * self.depth * e.num).div_euclid(2 * e.den);
        min.max(lo)..=max.min(hi)
    }

    fn next(self) -> Row {
        Row {
            depth: self.depth + 1,
            ..self
        }
    }

    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}
