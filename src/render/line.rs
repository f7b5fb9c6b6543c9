//! Integer Bresenham line rasterization

use super::Canvas;
use crate::color::Rgb;
use crate::grid::Cell;

/// Iterator over the cells of a Bresenham line, endpoints included
///
/// Endpoints are truncated to integer cells. Cells are yielded whether or
/// not they are on the grid; callers decide what to do with off-grid ones.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i32,
    y: i32,
    end_x: i32,
    end_y: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl LinePoints {
    pub fn new(start: Cell, end: Cell) -> Self {
        let dx = (end.col - start.col).abs();
        let dy = (end.row - start.row).abs();
        Self {
            x: start.col,
            y: start.row,
            end_x: end.col,
            end_y: end.row,
            dx,
            dy,
            sx: if start.col < end.col { 1 } else { -1 },
            sy: if start.row < end.row { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }

    /// Line between two fractional positions
    pub fn between(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Cell::from_position(x1, y1), Cell::from_position(x2, y2))
    }
}

impl Iterator for LinePoints {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }

        let current = Cell::new(self.x, self.y);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

/// Draw a line between two fractional positions
///
/// Off-grid cells along the path are skipped rather than clamped, so a line
/// leaving the panel never smears along the edge.
pub fn draw_line(canvas: &mut Canvas<'_>, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb) {
    for cell in LinePoints::between(x1, y1, x2, y2) {
        canvas.plot(cell, color);
    }
}
