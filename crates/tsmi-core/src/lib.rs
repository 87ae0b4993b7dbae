//! **tsmi-core** — shared types for the tsmi level-generation engine.
//!
//! This crate provides geometry primitives, colours, styled cells and the
//! character-console output seam consumed by the renderer in `tsmi-rl`.

pub mod cell;
pub mod console;
pub mod geom;
pub mod style;

pub use cell::Cell;
pub use console::{Canvas, Console};
pub use geom::{Direction, Point, Range};
pub use style::{Color, Style};
