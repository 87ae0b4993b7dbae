//! Generation and rendering configuration.
//!
//! A [`Config`] is built once by the host and passed by reference to the
//! generation and rendering entry points. It carries the viewport size,
//! the seed of the random stream and the safety limits of the BSP layout.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{Error, Result};

pub const DEFAULT_SCREEN_WIDTH: i32 = 80;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 50;
pub const DEFAULT_BSP_SPLIT_BUDGET: usize = 50;
pub const DEFAULT_CARVE_CELL_LIMIT: usize = 4096;

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Viewport width in cells.
    pub screen_width: i32,
    /// Viewport height in cells.
    pub screen_height: i32,
    /// Seed of the generation stream. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Maximum number of splits one BSP tree build may perform.
    pub bsp_split_budget: usize,
    /// Maximum number of cells one BSP leaf carve may touch.
    pub carve_cell_limit: usize,
    /// Whether opaque cells at the edge of the lit area count as visible.
    pub light_walls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            seed: None,
            bsp_split_budget: DEFAULT_BSP_SPLIT_BUDGET,
            carve_cell_limit: DEFAULT_CARVE_CELL_LIMIT,
            light_walls: true,
        }
    }
}

impl Config {
    /// Create a configuration for a `width` × `height` viewport.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let cfg = Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Set the seed (builder).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the BSP split budget (builder).
    pub fn with_bsp_split_budget(mut self, budget: usize) -> Self {
        self.bsp_split_budget = budget;
        self
    }

    /// Set the per-leaf carve cell limit (builder).
    pub fn with_carve_cell_limit(mut self, limit: usize) -> Self {
        self.carve_cell_limit = limit;
        self
    }

    /// Set whether walls bordering the lit area are visible (builder).
    pub fn with_light_walls(mut self, light_walls: bool) -> Self {
        self.light_walls = light_walls;
        self
    }

    /// Check a configuration that was built or deserialized by hand.
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(Error::InvalidScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        Ok(())
    }

    /// Midpoint of the viewport, where the player is drawn.
    pub fn screen_mid(&self) -> tsmi_core::Point {
        tsmi_core::Point::new(self.screen_width / 2, self.screen_height / 2)
    }

    /// Create the random stream for a generation run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
