//! Tile templates of the demo world.

use tsmi_core::Color;
use tsmi_rl::{Result, TileId, TileSet, TileSpec};

/// Ids of the demo templates inside their [`TileSet`].
pub struct Palette {
    pub grass: TileId,
    pub flowers: TileId,
    pub trees: TileId,
    pub bushes: TileId,
    pub stone: TileId,
    pub rock: TileId,
}

impl Palette {
    pub fn register(set: &mut TileSet) -> Result<Self> {
        let grass = set.create(
            TileSpec::new('.')
                .day(Color::from_rgb(40, 110, 30), Color::from_rgb(70, 150, 40))
                .night(Color::from_rgb(10, 25, 20))
                .day_visible(Color::from_rgb(70, 170, 50), Color::from_rgb(110, 210, 70))
                .night_visible(Color::from_rgb(30, 60, 50))
                .blend(0.0, 1.0),
        )?;
        let flowers = set.create(
            TileSpec::new(',')
                .day(Color::from_rgb(150, 120, 40), Color::from_rgb(170, 60, 120))
                .night(Color::from_rgb(30, 20, 35))
                .day_visible(Color::from_rgb(230, 200, 60), Color::from_rgb(240, 90, 170))
                .night_visible(Color::from_rgb(70, 50, 80))
                .blend(0.0, 1.0),
        )?;
        let trees = set.create(
            TileSpec::new('T')
                .solid(true)
                .opaque(true)
                .day(Color::from_rgb(20, 70, 20), Color::from_rgb(30, 90, 25))
                .night(Color::from_rgb(5, 15, 10))
                .day_visible(Color::from_rgb(30, 120, 30), Color::from_rgb(50, 150, 40))
                .night_visible(Color::from_rgb(15, 40, 30))
                .blend(0.2, 0.8),
        )?;
        let bushes = set.create(
            TileSpec::new('"')
                .opaque(true)
                .day(Color::from_rgb(50, 90, 30), Color::from_rgb(70, 100, 30))
                .night(Color::from_rgb(10, 20, 10))
                .day_visible(Color::from_rgb(80, 140, 40), Color::from_rgb(110, 150, 40))
                .night_visible(Color::from_rgb(25, 45, 30))
                .blend(0.0, 1.0),
        )?;
        let stone = set.create(
            TileSpec::new('.')
                .day(Color::from_rgb(90, 90, 95), Color::from_rgb(110, 105, 100))
                .night(Color::from_rgb(20, 20, 30))
                .day_visible(Color::from_rgb(150, 150, 155), Color::from_rgb(170, 165, 160))
                .night_visible(Color::from_rgb(50, 50, 70))
                .blend(0.0, 1.0),
        )?;
        let rock = set.create(
            TileSpec::new('#')
                .solid(true)
                .opaque(true)
                .day(Color::from_rgb(80, 70, 60), Color::from_rgb(100, 85, 70))
                .night(Color::from_rgb(15, 15, 20))
                .day_visible(Color::from_rgb(140, 120, 100), Color::from_rgb(160, 140, 115))
                .night_visible(Color::from_rgb(40, 40, 55))
                .blend(0.0, 1.0),
        )?;
        Ok(Self {
            grass,
            flowers,
            trees,
            bushes,
            stone,
            rock,
        })
    }
}
