//! Procedural fill generators for a [`Level`].
//!
//! Provides:
//! - **Uniform fill** and **two-way probabilistic fill**.
//! - **Cluster scatter** ("tree pattern"): random placements that never
//!   land next to an existing placement of either candidate.
//! - **Avoiding scatter** ("vegetation pattern"): random placements kept
//!   away from a single obstacle template.
//! - **Cellular automata smoothing** with simultaneous updates.
//!
//! All operations take an [`Area`] and only touch cells inside it; the area
//! is clipped to the level first.

use rand::Rng;
use tsmi_core::Point;

use crate::error::{Result, check_percentage, check_threshold};
use crate::level::{Area, Level};
use crate::tile::{TileId, TileSeed};

/// Map generator operating on a [`Level`].
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub level: Level,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen with the given level.
    pub fn with_level(level: Level, rng: R) -> Self {
        Self { rng, level }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Give the generated level back to the caller.
    pub fn into_level(self) -> Level {
        self.level
    }

    pub(crate) fn clip(&self, area: Area) -> Area {
        self.level.bounds().intersect(area)
    }

    pub(crate) fn put(&mut self, p: Point, seed: &TileSeed) -> bool {
        self.level.set(p, seed, &mut self.rng)
    }

    /// Draw a percentage in `[0, 100)` and pick `a` if it is at least
    /// `ratio`, `b` otherwise.
    fn pick<'s>(&mut self, a: &'s TileSeed, b: &'s TileSeed, ratio: i32) -> &'s TileSeed {
        if self.rng.random_range(0..100) >= ratio { a } else { b }
    }

    /// Set every cell of `area` to `seed`.
    pub fn fill(&mut self, area: Area, seed: &TileSeed) {
        for p in self.clip(area) {
            self.put(p, seed);
        }
    }

    /// Fill `area` with a random mix of `a` and `b`. Roughly
    /// `100 - ratio` percent of the cells become `a`.
    pub fn fill_two(&mut self, area: Area, a: &TileSeed, b: &TileSeed, ratio: i32) -> Result<()> {
        check_percentage(ratio)?;
        for p in self.clip(area) {
            let seed = self.pick(a, b, ratio);
            self.put(p, seed);
        }
        Ok(())
    }

    /// Make `count` placement attempts of `a` or `b` at random cells of
    /// `area`. An attempt is dropped (not retried) when the drawn cell is
    /// next to an `a` or `b` tile, so placements end up spread out.
    ///
    /// Returns the number of tiles placed.
    pub fn scatter_clusters(
        &mut self,
        area: Area,
        a: &TileSeed,
        b: &TileSeed,
        count: usize,
        ratio: i32,
    ) -> Result<usize> {
        check_percentage(ratio)?;
        let (ka, kb) = (a.id(), b.id());
        Ok(self.scatter(area, a, b, count, ratio, |level, p| {
            level.has_neighbor(p, ka) || level.has_neighbor(p, kb)
        }))
    }

    /// Like [`scatter_clusters`](Self::scatter_clusters), but an attempt is
    /// only dropped when the drawn cell is next to an `avoid` tile.
    pub fn scatter_avoiding(
        &mut self,
        area: Area,
        a: &TileSeed,
        b: &TileSeed,
        count: usize,
        ratio: i32,
        avoid: &TileSeed,
    ) -> Result<usize> {
        check_percentage(ratio)?;
        let kavoid = avoid.id();
        Ok(self.scatter(area, a, b, count, ratio, |level, p| {
            level.has_neighbor(p, kavoid)
        }))
    }

    fn scatter(
        &mut self,
        area: Area,
        a: &TileSeed,
        b: &TileSeed,
        count: usize,
        ratio: i32,
        blocked: impl Fn(&Level, Point) -> bool,
    ) -> usize {
        let area = self.clip(area);
        if area.is_empty() {
            return 0;
        }
        let mut placed = 0;
        for _ in 0..count {
            let x = self.rng.random_range(area.min.x..area.max.x);
            let y = self.rng.random_range(area.min.y..area.max.y);
            let p = Point::new(x, y);
            if blocked(&self.level, p) {
                continue;
            }
            let seed = self.pick(a, b, ratio);
            self.put(p, seed);
            placed += 1;
        }
        placed
    }

    /// Apply one cellular automata pass to `area`.
    ///
    /// A cell becomes `a` if it is `a` with at least `keep` `a`-neighbors,
    /// or is not `a` with at least `birth` `a`-neighbors; otherwise it
    /// becomes `b`. Every decision is taken on the grid as it was before
    /// the pass, then all cells are written.
    ///
    /// The classic cave rule is `keep = 4`, `birth = 5`.
    pub fn smooth(
        &mut self,
        area: Area,
        a: &TileSeed,
        b: &TileSeed,
        keep: i32,
        birth: i32,
    ) -> Result<()> {
        check_threshold(keep)?;
        check_threshold(birth)?;
        let area = self.clip(area);
        let ka: TileId = a.id();

        // Decisions first, in a scratch buffer the size of the area.
        let decisions: Vec<bool> = area
            .iter()
            .map(|p| {
                let n = self.level.count_neighbors(p, ka) as i32;
                if self.level.get(p).is(ka) {
                    n >= keep
                } else {
                    n >= birth
                }
            })
            .collect();

        for (p, becomes_a) in area.iter().zip(decisions) {
            self.put(p, if becomes_a { a } else { b });
        }
        Ok(())
    }

    /// Apply [`smooth`](Self::smooth) `passes` times.
    pub fn smooth_n(
        &mut self,
        area: Area,
        a: &TileSeed,
        b: &TileSeed,
        keep: i32,
        birth: i32,
        passes: usize,
    ) -> Result<()> {
        for _ in 0..passes {
            self.smooth(area, a, b, keep, birth)?;
        }
        Ok(())
    }
}
