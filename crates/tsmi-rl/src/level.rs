//! The tile store of a single level.
//!
//! A [`Level`] owns a row-major array of [`Tile`]s whose dimensions are fixed
//! at creation. Every cell starts as the null tile. Reads outside the level
//! are always safe and return a synthesized null tile; writes outside the
//! level are logged and ignored.

use rand::Rng;
use tsmi_core::{Direction, Point, Range};

use crate::tile::{Tile, TileId, TileSeed};

/// A rectangular view of a level used to scope generator operations.
pub type Area = Range;

/// A 2D grid of [`Tile`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl Level {
    /// Create a new level with every cell set to the null tile.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            tiles: vec![Tile::null(); Range::new(0, 0, width, height).len()],
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The whole level as an [`Area`].
    pub fn bounds(&self) -> Area {
        Range::new(0, 0, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Instantiate a tile from `seed` at `p`.
    ///
    /// Returns `false` (and logs a warning) if `p` is outside the level; the
    /// level is left untouched and no random draw is made.
    pub fn set<R: Rng>(&mut self, p: Point, seed: &TileSeed, rng: &mut R) -> bool {
        match self.index(p) {
            Some(i) => {
                self.tiles[i] = Tile::instantiate(seed, rng);
                true
            }
            None => {
                log::warn!("attempted to set a tile outside the level at {p}");
                false
            }
        }
    }

    /// The tile at `p`, or a null tile if `p` is outside the level.
    pub fn get(&self, p: Point) -> Tile {
        self.at(p).copied().unwrap_or_else(Tile::null)
    }

    /// The tile at `p + offset`.
    pub fn get_relative(&self, p: Point, offset: Point) -> Tile {
        self.get(p + offset)
    }

    /// Borrow the tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// Mutably borrow the tile at `p`, or `None` if out of bounds.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Tile> {
        self.index(p).map(|i| &mut self.tiles[i])
    }

    /// Whether a creature may stand at `p`. Outside the level this is
    /// always false, since the null tile is solid.
    pub fn walkable(&self, p: Point) -> bool {
        !self.get(p).solid
    }

    /// Whether any of the eight cells around `p` is of type `kind`.
    pub fn has_neighbor(&self, p: Point, kind: TileId) -> bool {
        Direction::ALL
            .iter()
            .any(|d| self.get_relative(p, d.offset()).is(kind))
    }

    /// Number of cells around `p` (0–8) of type `kind`.
    pub fn count_neighbors(&self, p: Point, kind: TileId) -> usize {
        Direction::ALL
            .iter()
            .filter(|d| self.get_relative(p, d.offset()).is(kind))
            .count()
    }

    /// Number of cells in the level of type `kind`.
    pub fn count(&self, kind: TileId) -> usize {
        self.tiles.iter().filter(|t| t.is(kind)).count()
    }

    /// Clear the fog-of-war memory of every tile.
    pub fn forget(&mut self) {
        for t in &mut self.tiles {
            t.seen = false;
        }
    }

    /// Iterate over `(Point, &Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        self.bounds().iter().zip(self.tiles.iter())
    }
}
