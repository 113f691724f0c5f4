use rayon::prelude::*;

use crate::grid::{Grid, Nearest};

/// Dense displacement field, logical shape `[B, H, W, 2]`.
///
/// Cell `(x, y)` of batch element `b` holds `(owner.x - x, owner.y - y)`,
/// the vector from the cell to its nearest seed. Cells with no owner (a
/// batch element with zero seeds) hold the sentinel `(0.0, 0.0)`.
#[derive(Clone, Debug)]
pub struct OffsetField {
    data: Vec<f32>,
    batch: usize,
    h: usize,
    w: usize,
}

impl OffsetField {
    pub(crate) fn new(data: Vec<f32>, batch: usize, h: usize, w: usize) -> Self {
        debug_assert_eq!(data.len(), batch * h * w * 2);
        Self { data, batch, h, w }
    }

    pub fn shape(&self) -> [usize; 4] {
        [self.batch, self.h, self.w, 2]
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn w(&self) -> usize {
        self.w
    }

    /// The whole field, flat row-major `[B, H, W, 2]`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// One batch element, flat row-major `[H, W, 2]`.
    pub fn element(&self, b: usize) -> &[f32] {
        let n = self.h * self.w * 2;
        &self.data[b * n..(b + 1) * n]
    }

    /// Displacement vector at one cell.
    pub fn get(&self, b: usize, x: usize, y: usize) -> (f32, f32) {
        let i = ((b * self.h + y) * self.w + x) * 2;
        (self.data[i], self.data[i + 1])
    }
}

/// Write the displacement channels for one owner grid into `out`
/// (length `w * h * 2`). Unowned cells emit the `(0.0, 0.0)` sentinel.
pub fn extract_offsets(grid: &Grid<Nearest>, out: &mut [f32]) {
    let w = grid.w;
    debug_assert_eq!(out.len(), grid.w * grid.h * 2);
    out.par_chunks_mut(w * 2).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let n = grid.data[y * w + x];
            let (u, v) = if n.is_none() {
                (0.0, 0.0)
            } else {
                (n.x as f32 - x as f32, n.y as f32 - y as f32)
            };
            row[x * 2] = u;
            row[x * 2 + 1] = v;
        }
    });
}
