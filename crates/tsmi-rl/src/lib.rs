//! Procedural level generation for tile-based roguelikes.
//!
//! - [`tile`]: tile templates ([`TileSeed`]) registered in a [`TileSet`],
//!   and the [`Tile`] instances drawn from them.
//! - [`level`]: the [`Level`] tile store and its neighbour queries.
//! - [`mapgen`]: fills, scatters and cellular automata over a [`MapGen`].
//! - [`bsp`]: binary space partitioning and room carving.
//! - [`fov`]: the [`FovMap`] shadow-casting visibility map.
//! - [`creature`] and [`render`]: a player with a facing, and the
//!   composition of one viewport frame with fog of war and day/night
//!   colours.

pub mod bsp;
pub mod config;
pub mod creature;
pub mod error;
pub mod fov;
pub mod level;
pub mod mapgen;
pub mod render;
pub mod tile;

pub use bsp::{BspNode, BspTree, NodeId, ROOM_MARGIN};
pub use config::Config;
pub use creature::Creature;
pub use error::{Error, Result};
pub use fov::FovMap;
pub use level::{Area, Level};
pub use mapgen::MapGen;
pub use render::{compute_fov, day_night_factor, render, scan_rect};
pub use tile::{Tile, TileId, TileSeed, TileSet, TileSpec};
