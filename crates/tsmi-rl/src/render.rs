//! Viewport composition: directional field of view, day/night blending and
//! fog-of-war memory.
//!
//! The viewport is `config.screen_width` × `config.screen_height` cells.
//! Screen cell `p` shows world cell `camera + p`, and the player is always
//! drawn at the viewport midpoint.

use tsmi_core::{Color, Console, Direction, Point, Range};

use crate::config::Config;
use crate::creature::Creature;
use crate::error::{Error, Result};
use crate::fov::FovMap;
use crate::level::Level;
use crate::tile::TileSet;

/// The part of a `width` × `height` viewport a creature facing `facing`
/// looks at. Without `directional`, the whole viewport.
///
/// Diagonal facings get a quadrant that includes the midpoint row and
/// column; cardinal facings get the half-plane in front of the midpoint.
pub fn scan_rect(facing: Direction, directional: bool, width: i32, height: i32) -> Range {
    let (w, h) = (width, height);
    let (mx, my) = (w / 2, h / 2);
    if !directional {
        return Range::new(0, 0, w, h);
    }
    match facing {
        Direction::North => Range::new(0, 0, w, my),
        Direction::NorthEast => Range::new(mx, 0, w, my + 1),
        Direction::East => Range::new(mx + 1, 0, w, h),
        Direction::SouthEast => Range::new(mx, my, w, h),
        Direction::South => Range::new(0, my + 1, w, h),
        Direction::SouthWest => Range::new(0, my, mx + 1, h),
        Direction::West => Range::new(0, 0, mx, h),
        Direction::NorthWest => Range::new(0, 0, mx + 1, my + 1),
    }
}

/// Recompute the field of view of `creature`, seen from the viewport
/// midpoint with the level shifted by `camera`.
///
/// Only the scan rectangle of the creature's facing lets light through;
/// every other viewport cell blocks it.
pub fn compute_fov(
    config: &Config,
    creature: &mut Creature,
    level: &Level,
    camera: Point,
    directional: bool,
) {
    let (w, h) = (config.screen_width, config.screen_height);
    if creature.fov.width() != w || creature.fov.height() != h {
        creature.fov = FovMap::new(w, h);
    } else {
        creature.fov.clear();
    }
    let scan = scan_rect(creature.facing, directional, w, h);
    log::debug!("fov: scanning {scan} facing {:?}", creature.facing);
    for (world, p) in (scan + camera).iter().zip(scan) {
        let t = level.get(world);
        creature.fov.set_properties(p, !t.opaque, !t.solid);
    }
    creature
        .fov
        .compute(config.screen_mid(), creature.radius, config.light_walls);
}

/// Day/night blend coefficient for a game tick measured in degrees:
/// 1.0 at noon (0°), 0.2 at midnight (180°).
pub fn day_night_factor(tick: i64) -> f64 {
    0.4 * (tick as f64).to_radians().cos() + 0.6
}

/// Draw one frame of `level` into `console`.
///
/// `time` blends night (0.0) to day (1.0) colours. Cells in the player's
/// field of view use the visible colours and are remembered as seen.
/// Other cells use the remembered colours, or black when `fog_of_war` is
/// on and the cell was never seen. World cells outside the level are drawn
/// as the null tile. The player is drawn last, at the midpoint.
#[allow(clippy::too_many_arguments)]
pub fn render<C: Console>(
    config: &Config,
    level: &mut Level,
    tiles: &TileSet,
    camera: Point,
    player: &mut Creature,
    time: f32,
    fog_of_war: bool,
    directional: bool,
    console: &mut C,
) -> Result<()> {
    if !(0.0..=1.0).contains(&time) {
        return Err(Error::InvalidTime(time));
    }
    compute_fov(config, player, level, camera, directional);

    let t = f64::from(time);
    let view = Range::new(0, 0, config.screen_width, config.screen_height);
    for p in view {
        let world = camera + p;
        let tile = level.get(world);
        let fg = if player.fov.is_in_fov(p) {
            if let Some(cell) = level.at_mut(world) {
                cell.seen = true;
            }
            Color::lerp(tile.night_visible(tiles), tile.day_visible, t)
        } else if !fog_of_war || tile.seen {
            Color::lerp(tile.night(tiles), tile.day, t)
        } else {
            Color::BLACK
        };
        console.put_char(p, tile.glyph, fg, Color::BLACK);
    }
    console.put_char(config.screen_mid(), player.glyph, player.fg, player.bg);
    Ok(())
}
