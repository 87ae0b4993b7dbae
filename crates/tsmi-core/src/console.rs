//! Console output: the [`Console`] trait and an in-memory [`Canvas`].
//!
//! The engine never talks to a terminal or window directly. It writes one
//! character cell at a time through [`Console::put_char`]; back-ends decide
//! how the cells reach the screen.

use crate::cell::Cell;
use crate::geom::{Point, Range};
use crate::style::{Color, Style};

/// A character-cell output surface.
pub trait Console {
    /// Size of the surface in cells.
    fn size(&self) -> Point;

    /// Draw `ch` at screen position `p`. Positions outside
    /// [`size`](Self::size) are ignored.
    fn put_char(&mut self, p: Point, ch: char, fg: Color, bg: Color);
}

/// A fixed-size, row-major buffer of [`Cell`]s implementing [`Console`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Canvas {
    /// Create a canvas of the given size filled with blank cells.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![Cell::default(); Range::new(0, 0, width, height).len()],
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

    /// Bounding range `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.bounds().contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// The cell at `p`, or `None` outside the canvas.
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Iterate over rows as slices of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// The characters of each row, without styling.
    pub fn text_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }
}

impl Console for Canvas {
    fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn put_char(&mut self, p: Point, ch: char, fg: Color, bg: Color) {
        if let Some(i) = self.index(p) {
            self.cells[i] = Cell::default()
                .with_char(ch)
                .with_style(Style::default().with_fg(fg).with_bg(bg));
        }
    }
}
