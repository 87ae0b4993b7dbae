//! Binary space partitioning of a rectangle into room-sized leaves.
//!
//! The tree is stored as an arena: nodes reference their parent and
//! children by [`NodeId`]. Leaves are recorded in the order they are
//! produced, depth first with the left child before the right one, and that
//! order is the one [`MapGen::carve_rooms`] follows.

use std::ops::RangeInclusive;

use rand::Rng;
use tsmi_core::{Point, Range};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::level::Area;
use crate::mapgen::MapGen;
use crate::tile::TileSeed;

/// Margin range drawn for each side of a leaf when carving a room.
pub const ROOM_MARGIN: RangeInclusive<i32> = 0..=2;

/// Index of a node inside a [`BspTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BspNode {
    pub rect: Range,
    pub parent: Option<NodeId>,
    /// Left (or top) and right (or bottom) halves. `None` for leaves.
    pub children: Option<(NodeId, NodeId)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Split along x: the hyperplane is a vertical line.
    X,
    /// Split along y: the hyperplane is a horizontal line.
    Y,
}

/// A binary partition tree.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    leaves: Vec<NodeId>,
}

impl BspTree {
    /// Partition `rect` until no node can be split into two children that
    /// are both at least `min_size` wide and high.
    ///
    /// A node is split only when it is more than twice the minimum on both
    /// axes; the orientation is then drawn 50/50.
    ///
    /// Each split consumes one unit of `budget`. Running out of budget while
    /// a node is still splittable is reported as
    /// [`Error::BspBudgetExhausted`].
    pub fn build<R: Rng>(rect: Range, min_size: Point, budget: usize, rng: &mut R) -> Result<Self> {
        // A zero minimum would allow empty children.
        let min_size = Point::new(min_size.x.max(1), min_size.y.max(1));
        let mut tree = BspTree {
            nodes: vec![BspNode {
                rect,
                parent: None,
                children: None,
            }],
            leaves: Vec::new(),
        };
        let mut left = budget;
        tree.split(NodeId(0), min_size, &mut left, budget, rng)?;
        log::debug!(
            "bsp: {} nodes, {} leaves, {} splits",
            tree.nodes.len(),
            tree.leaves.len(),
            budget - left
        );
        Ok(tree)
    }

    fn split<R: Rng>(
        &mut self,
        id: NodeId,
        min_size: Point,
        left: &mut usize,
        budget: usize,
        rng: &mut R,
    ) -> Result<()> {
        let rect = self.nodes[id.0].rect;
        let x_ok = rect.width() > 2 * min_size.x;
        let y_ok = rect.height() > 2 * min_size.y;
        // Cut only when both axes are splittable.
        if !(x_ok && y_ok) {
            self.leaves.push(id);
            return Ok(());
        }
        let axis = if rng.random_bool(0.5) { Axis::X } else { Axis::Y };
        if *left == 0 {
            log::error!("bsp: split budget of {budget} exhausted at {rect}");
            return Err(Error::BspBudgetExhausted { budget });
        }
        *left -= 1;

        let (lo, hi) = match axis {
            Axis::X => {
                let hp = rng.random_range(rect.min.x + min_size.x..=rect.max.x - min_size.x);
                log::debug!("bsp: split {rect} at x = {hp}");
                (
                    Range::from_corners(rect.min, Point::new(hp, rect.max.y)),
                    Range::from_corners(Point::new(hp, rect.min.y), rect.max),
                )
            }
            Axis::Y => {
                let hp = rng.random_range(rect.min.y + min_size.y..=rect.max.y - min_size.y);
                log::debug!("bsp: split {rect} at y = {hp}");
                (
                    Range::from_corners(rect.min, Point::new(rect.max.x, hp)),
                    Range::from_corners(Point::new(rect.min.x, hp), rect.max),
                )
            }
        };
        let l = self.push(lo, id);
        let r = self.push(hi, id);
        self.nodes[id.0].children = Some((l, r));
        self.split(l, min_size, left, budget, rng)?;
        self.split(r, min_size, left, budget, rng)
    }

    fn push(&mut self, rect: Range, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(BspNode {
            rect,
            parent: Some(parent),
            children: None,
        });
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &BspNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    /// Leaves in construction order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_none()
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.nodes[p.0].parent;
        }
        depth
    }
}

impl<R: Rng> MapGen<R> {
    /// Carve one room per leaf of `tree`, in leaf order.
    ///
    /// For each leaf, four margins are drawn from `margin` (start x, start
    /// y, end x, end y) and the inset rectangle is set to `seed`. Leaves
    /// whose inset is empty carve nothing. A leaf whose inset covers more
    /// than `limit` cells stops the carve with
    /// [`Error::CarveLimitExceeded`].
    ///
    /// Returns the number of cells carved. An empty `margin` is rejected
    /// with [`Error::InvalidMargin`] before anything is drawn.
    pub fn carve_rooms(
        &mut self,
        tree: &BspTree,
        seed: &TileSeed,
        margin: RangeInclusive<i32>,
        limit: usize,
    ) -> Result<usize> {
        if margin.is_empty() {
            return Err(Error::InvalidMargin {
                min: *margin.start(),
                max: *margin.end(),
            });
        }
        let mut carved = 0;
        for (i, &leaf) in tree.leaves().iter().enumerate() {
            let rect = tree.node(leaf).rect;
            let x0 = rect.min.x + self.rng.random_range(margin.clone());
            let y0 = rect.min.y + self.rng.random_range(margin.clone());
            let x1 = rect.max.x - self.rng.random_range(margin.clone());
            let y1 = rect.max.y - self.rng.random_range(margin.clone());
            if x0 >= x1 || y0 >= y1 {
                log::debug!("bsp: leaf {i} at {rect} too small to carve");
                continue;
            }
            let room = self.clip(Range::new(x0, y0, x1, y1));
            if room.len() > limit {
                log::error!("bsp: carving leaf {i} ({room}) exceeds {limit} cells");
                return Err(Error::CarveLimitExceeded { limit, leaf: i });
            }
            log::debug!("bsp: carve leaf {i} as {room}");
            for p in room {
                self.put(p, seed);
            }
            carved += room.len();
        }
        Ok(carved)
    }

    /// Partition `area` and carve a room into every leaf, using the limits
    /// of `config` and [`ROOM_MARGIN`].
    pub fn bsp_dungeon(
        &mut self,
        area: Area,
        min_size: Point,
        seed: &TileSeed,
        config: &Config,
    ) -> Result<BspTree> {
        let area = self.clip(area);
        let tree = BspTree::build(area, min_size, config.bsp_split_budget, &mut self.rng)?;
        self.carve_rooms(&tree, seed, ROOM_MARGIN, config.carve_cell_limit)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::tile::{TileId, TileSet, TileSpec};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_partition(tree: &BspTree, root: Range) {
        let mut covered = vec![0u8; root.len()];
        for &leaf in tree.leaves() {
            assert!(tree.is_leaf(leaf));
            for p in tree.node(leaf).rect {
                assert!(root.contains(p), "{p} escapes {root}");
                let i = ((p.y - root.min.y) * root.width() + p.x - root.min.x) as usize;
                covered[i] += 1;
            }
        }
        assert!(covered.iter().all(|&c| c == 1), "leaves overlap or leave gaps");
    }

    #[test]
    fn ten_by_ten_min_five() {
        let root = Range::new(0, 0, 10, 10);
        for s in 0..20 {
            let mut rng = StdRng::seed_from_u64(s);
            let tree = BspTree::build(root, Point::new(5, 5), 50, &mut rng).unwrap();
            assert_partition(&tree, root);
            for &leaf in tree.leaves() {
                let r = tree.node(leaf).rect;
                assert!(r.width() >= 5 && r.height() >= 5);
            }
        }
    }

    #[test]
    fn leaves_partition_larger_regions() {
        let root = Range::new(3, 2, 63, 42);
        let min = Point::new(5, 4);
        for s in 0..20 {
            let mut rng = StdRng::seed_from_u64(s);
            let tree = BspTree::build(root, min, 200, &mut rng).unwrap();
            assert!(tree.leaves().len() > 1);
            assert_partition(&tree, root);
            for &leaf in tree.leaves() {
                let r = tree.node(leaf).rect;
                assert!(r.width() >= min.x && r.height() >= min.y, "{r}");
                // unsplittable
                assert!(r.width() <= 2 * min.x || r.height() <= 2 * min.y, "{r}");
            }
        }
    }

    #[test]
    fn children_split_parent_exactly() {
        let mut rng = StdRng::seed_from_u64(4);
        let tree = BspTree::build(Range::new(0, 0, 40, 30), Point::new(4, 4), 100, &mut rng).unwrap();
        for (i, node) in tree.nodes().iter().enumerate() {
            if let Some((l, r)) = node.children {
                let (lr, rr) = (tree.node(l).rect, tree.node(r).rect);
                assert_eq!(tree.node(l).parent, Some(NodeId(i)));
                assert!(!lr.overlaps(rr));
                assert_eq!(lr.len() + rr.len(), node.rect.len());
                assert_eq!(tree.depth(l), tree.depth(NodeId(i)) + 1);
            }
        }
        assert_eq!(tree.depth(tree.root()), 0);
    }

    #[test]
    fn leaves_are_depth_first_left_to_right() {
        let mut rng = StdRng::seed_from_u64(8);
        let tree = BspTree::build(Range::new(0, 0, 60, 40), Point::new(5, 5), 100, &mut rng).unwrap();
        let mut expected = Vec::new();
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            match tree.node(id).children {
                Some((l, r)) => {
                    stack.push(r);
                    stack.push(l);
                }
                None => expected.push(id),
            }
        }
        assert_eq!(tree.leaves(), expected.as_slice());
    }

    #[test]
    fn unsplittable_root_is_single_leaf() {
        let mut rng = StdRng::seed_from_u64(1);
        let root = Range::new(0, 0, 8, 3);
        let tree = BspTree::build(root, Point::new(4, 4), 0, &mut rng).unwrap();
        assert_eq!(tree.leaves(), &[NodeId(0)]);
        assert_eq!(tree.nodes().len(), 1);
    }

    #[test]
    fn one_short_axis_makes_a_leaf() {
        // 30 wide is splittable, but 8 high is not more than twice 5.
        let root = Range::new(0, 0, 30, 8);
        for s in 0..10 {
            let mut rng = StdRng::seed_from_u64(s);
            let tree = BspTree::build(root, Point::new(5, 5), 50, &mut rng).unwrap();
            assert_eq!(tree.leaves(), &[NodeId(0)]);
            // no orientation was drawn
            let mut fresh = StdRng::seed_from_u64(s);
            assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
        }
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let mut rng = StdRng::seed_from_u64(2);
        let res = BspTree::build(Range::new(0, 0, 200, 200), Point::new(1, 1), 50, &mut rng);
        assert_eq!(res.unwrap_err(), Error::BspBudgetExhausted { budget: 50 });
    }

    fn floor_set() -> (TileSet, TileId) {
        let mut set = TileSet::new();
        let floor = set.create(TileSpec::new('.')).unwrap();
        (set, floor)
    }

    #[test]
    fn carve_stays_inside_leaves() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(50, 40), StdRng::seed_from_u64(5));
        let cfg = Config::default().with_bsp_split_budget(200);
        let all = mg.level.bounds();
        let tree = mg
            .bsp_dungeon(all, Point::new(6, 6), set.get(floor), &cfg)
            .unwrap();
        assert!(mg.level.count(floor) > 0);
        for &l in tree.leaves() {
            let rect = tree.node(l).rect;
            // margins never exceed 2, so this core is always carved
            for p in rect.shift(2, 2, -2, -2) {
                assert!(mg.level.get(p).is(floor), "{p} not carved");
            }
        }
    }

    #[test]
    fn carve_returns_cell_count() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(30, 30), StdRng::seed_from_u64(6));
        let mut rng = StdRng::seed_from_u64(6);
        let tree = BspTree::build(mg.level.bounds(), Point::new(5, 5), 50, &mut rng).unwrap();
        let carved = mg.carve_rooms(&tree, set.get(floor), 1..=4, 4096).unwrap();
        assert_eq!(carved, mg.level.count(floor));
    }

    #[test]
    fn inverted_inset_carves_nothing() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(10, 10), StdRng::seed_from_u64(7));
        let mut rng = StdRng::seed_from_u64(7);
        let tree = BspTree::build(Range::new(0, 0, 3, 3), Point::new(2, 2), 10, &mut rng).unwrap();
        // a 3x3 leaf with margins of exactly 2 leaves start >= end
        let carved = mg.carve_rooms(&tree, set.get(floor), 2..=2, 4096).unwrap();
        assert_eq!(carved, 0);
        assert_eq!(mg.level.count(TileId::NULL), 100);
    }

    #[test]
    fn empty_margin_is_rejected() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(30, 30), StdRng::seed_from_u64(11));
        let mut rng = StdRng::seed_from_u64(11);
        let tree = BspTree::build(mg.level.bounds(), Point::new(5, 5), 50, &mut rng).unwrap();
        #[allow(clippy::reversed_empty_ranges)]
        let res = mg.carve_rooms(&tree, set.get(floor), 3..=1, 4096);
        assert_eq!(res, Err(Error::InvalidMargin { min: 3, max: 1 }));
        assert_eq!(mg.level.count(TileId::NULL), 900);
    }

    #[test]
    fn carve_limit_is_enforced() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(20, 20), StdRng::seed_from_u64(9));
        let mut rng = StdRng::seed_from_u64(9);
        let tree = BspTree::build(mg.level.bounds(), Point::new(10, 10), 10, &mut rng).unwrap();
        let res = mg.carve_rooms(&tree, set.get(floor), 0..=0, 100);
        assert_eq!(res, Err(Error::CarveLimitExceeded { limit: 100, leaf: 0 }));
    }

    #[test]
    fn dungeon_budget_comes_from_config() {
        let (set, floor) = floor_set();
        let mut mg = MapGen::with_level(Level::new(100, 100), StdRng::seed_from_u64(10));
        let cfg = Config::default().with_bsp_split_budget(3);
        let all = mg.level.bounds();
        let res = mg.bsp_dungeon(all, Point::new(4, 4), set.get(floor), &cfg);
        assert_eq!(res.unwrap_err(), Error::BspBudgetExhausted { budget: 3 });
    }
}
