//! Dispersed-dot index matrix generation for ordered dithering.

use crate::error::Error;
use tracing::trace;

/// A Bayer-style dispersed-dot index matrix.
///
/// The matrix is square with a power-of-two side length and contains each
/// rank in `0..size²` exactly once. It is built once per ordered-dithering
/// run and consumed read-only by [`OrderedDither`](crate::OrderedDither).
///
/// The construction is recursive: the base matrix is
///
/// ```text
/// | 0 2 |
/// | 3 1 |
/// ```
///
/// and each doubling places `4D`, `4D+2`, `4D+3` and `4D+1` in the top-left,
/// top-right, bottom-left and bottom-right quadrants respectively.
///
/// # Example
///
/// ```
/// use halftone::IndexMatrix;
///
/// let matrix = IndexMatrix::dispersed(2).unwrap();
/// assert_eq!(matrix.rank(0, 0), 0);
/// assert_eq!(matrix.rank(1, 0), 3);
/// assert!(IndexMatrix::dispersed(6).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMatrix {
    size: u32,
    ranks: Vec<u32>,
}

impl IndexMatrix {
    /// Builds the dispersed-dot matrix of the given side length.
    ///
    /// The size must be a power of two and at least 2; anything else is
    /// rejected before any allocation happens. Recursion depth is bounded by
    /// `log2(size)`.
    pub fn dispersed(size: u32) -> Result<Self, Error> {
        if size < 2 || !size.is_power_of_two() {
            return Err(Error::InvalidMatrixSize(size));
        }
        let matrix = Self {
            size,
            ranks: build(size),
        };
        trace!(size, "built dispersed-dot index matrix");
        Ok(matrix)
    }

    /// Side length of the matrix.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rank at the 0-based `(row, col)` cell.
    #[inline]
    pub fn rank(&self, row: u32, col: u32) -> u32 {
        debug_assert!(row < self.size && col < self.size);
        self.ranks[(row * self.size + col) as usize]
    }
}

fn build(size: u32) -> Vec<u32> {
    if size == 2 {
        return vec![0, 2, 3, 1];
    }
    let prev = build(size / 2);
    let n = size as usize;
    let h = n / 2;
    let mut ranks = vec![0u32; n * n];
    for row in 0..h {
        for col in 0..h {
            let base = 4 * prev[row * h + col];
            ranks[row * n + col] = base;
            ranks[row * n + col + h] = base + 2;
            ranks[(row + h) * n + col] = base + 3;
            ranks[(row + h) * n + col + h] = base + 1;
        }
    }
    ranks
}
