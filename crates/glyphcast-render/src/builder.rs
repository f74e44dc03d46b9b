//! Shared frame construction helper.

use glyphcast_frame::{Cell, Frame};
use rayon::prelude::*;

/// Builds a frame row by row, serially or on the rayon pool.
///
/// Every renderer arm funnels through this: allocate the grid, fill each
/// row from a pure closure, freeze into a [`Frame`]. Rows write to disjoint
/// cell ranges, so the parallel path shares nothing mutable.
pub(crate) struct FrameBuilder {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl FrameBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(); (width * height) as usize],
        }
    }

    /// Fills every row with `f(row_index, row_cells)`.
    ///
    /// `parallel` decides whether rows run on the rayon pool; callers gate
    /// it on source pixel height so tiny images skip the fork-join cost.
    pub fn fill_rows<F>(&mut self, parallel: bool, f: F)
    where
        F: Fn(u32, &mut [Cell]) + Sync,
    {
        if self.width == 0 {
            return;
        }
        let width = self.width as usize;
        if parallel {
            self.cells
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| f(y as u32, row));
        } else {
            for (y, row) in self.cells.chunks_mut(width).enumerate() {
                f(y as u32, row);
            }
        }
    }

    /// Applies an in-place transform over all cells (palette snapping).
    pub fn map_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Cell),
    {
        for cell in &mut self.cells {
            f(cell);
        }
    }

    /// All cells built so far, in reading order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Freezes the grid into an immutable frame.
    pub fn build(self, delay_ms: u32) -> Frame {
        Frame::from_cells(self.width, self.height, self.cells, delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_and_parallel_fills_agree() {
        let fill = |y: u32, row: &mut [Cell]| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = Cell::new(char::from_u32('a' as u32 + ((x as u32 + y) % 26)).unwrap());
            }
        };
        let mut serial = FrameBuilder::new(17, 9);
        serial.fill_rows(false, fill);
        let mut parallel = FrameBuilder::new(17, 9);
        parallel.fill_rows(true, fill);
        assert_eq!(serial.build(0), parallel.build(0));
    }

    #[test]
    fn zero_width_builds_empty() {
        let mut b = FrameBuilder::new(0, 0);
        b.fill_rows(false, |_, _| unreachable!());
        let frame = b.build(0);
        assert!(frame.is_empty());
    }
}
