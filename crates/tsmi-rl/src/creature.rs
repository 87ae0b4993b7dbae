//! A single creature moving over a [`Level`].

use tsmi_core::{Color, Direction, Point};

use crate::config::Config;
use crate::fov::FovMap;
use crate::level::Level;

/// A creature with a position, a facing and its own field of view.
///
/// The field of view is sized to the viewport, not to the level: it is
/// expressed in screen coordinates relative to a camera.
#[derive(Debug, Clone)]
pub struct Creature {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
    pub pos: Point,
    pub facing: Direction,
    /// Sight radius; zero or less means unlimited.
    pub radius: i32,
    pub fov: FovMap,
}

impl Creature {
    pub fn new(
        config: &Config,
        glyph: char,
        pos: Point,
        facing: Direction,
        fg: Color,
        bg: Color,
        radius: i32,
    ) -> Self {
        Self {
            glyph,
            fg,
            bg,
            pos,
            facing,
            radius,
            fov: FovMap::new(config.screen_width, config.screen_height),
        }
    }

    /// Move by `delta` if the destination is walkable. Returns whether the
    /// creature moved.
    pub fn step(&mut self, level: &Level, delta: Point) -> bool {
        let to = self.pos + delta;
        if !level.walkable(to) {
            return false;
        }
        self.pos = to;
        true
    }

    /// Rotate the facing one step to the left or right.
    pub fn turn(&mut self, left: bool) {
        self.facing = if left {
            self.facing.turn_left()
        } else {
            self.facing.turn_right()
        };
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }
}
