//! Stateful error-diffusion engines.
//!
//! Both engines quantize against the half-gray cut of
//! [`Threshold`](crate::Threshold) but add the error carried from previously
//! visited pixels before deciding, then pass the residual error on to pixels
//! the traversal has not reached yet. The carried state makes them strictly
//! sequential: pixels must be visited in the exact order the
//! [`Walk`](crate::Walk) produces.
//!
//! All error buffers are allocated by the constructors, before the first
//! pixel is visited.

use crate::traversal::{Direction, PixelOp, Step};
use crate::{BLACK, WHITE};

#[inline]
fn half_gray_cut(max_gray: u8) -> i32 {
    (max_gray as i32 + 1) / 2
}

/// Naive full error diffusion with a single scalar carry.
///
/// The whole quantization error travels to the next pixel in the current
/// scan direction, and only there. At the last pixel of a row the carry is
/// reset to zero instead of propagating, so error never crosses a row
/// boundary; the propagation is strictly one-dimensional even though it
/// covers whole rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaiveDiffusion {
    width: u32,
    cut: i32,
    carry: i32,
}

impl NaiveDiffusion {
    /// Creates the engine for a raster of the given width and gray range.
    pub fn new(width: u32, max_gray: u8) -> Self {
        Self {
            width,
            cut: half_gray_cut(max_gray),
            carry: 0,
        }
    }

    /// The error waiting for the next pixel in scan direction.
    #[inline]
    pub fn carry(&self) -> i32 {
        self.carry
    }
}

impl PixelOp for NaiveDiffusion {
    fn apply(&mut self, sample: u8, step: &Step) -> u8 {
        let effective = sample as i32 + self.carry;
        let output = if effective > self.cut { WHITE } else { BLACK };
        let row_end = match step.dir {
            Direction::Forward => step.col == self.width,
            Direction::Backward => step.col == 1,
        };
        if row_end {
            self.carry = 0;
        } else {
            self.carry = effective - output as i32;
        }
        output
    }
}

/// Floyd-Steinberg error diffusion over two row buffers.
///
/// The quantization error is split 7/16 to the next pixel in scan
/// direction, 3/16 below-behind, 5/16 below, and 1/16 below-ahead; shares
/// aimed outside the raster are dropped. `current` holds the error pending
/// for the row being scanned, `below` collects error for the row beneath;
/// at the last pixel of a row the two are swapped and the fresh `below` is
/// zeroed.
///
/// Under serpentine traversal the offsets mirror with the scan direction:
///
/// ```text
/// forward:  |      |  X   | 7/16 |     backward: | 7/16 |  X   |      |
///           | 3/16 | 5/16 | 1/16 |               | 1/16 | 5/16 | 3/16 |
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloydSteinberg {
    width: u32,
    cut: i32,
    current: Vec<i32>,
    below: Vec<i32>,
}

impl FloydSteinberg {
    /// Creates the engine with both row buffers sized to the raster width.
    pub fn new(width: u32, max_gray: u8) -> Self {
        Self {
            width,
            cut: half_gray_cut(max_gray),
            current: vec![0; width as usize],
            below: vec![0; width as usize],
        }
    }

    fn advance_row(&mut self) {
        std::mem::swap(&mut self.current, &mut self.below);
        self.below.fill(0);
    }
}

impl PixelOp for FloydSteinberg {
    fn apply(&mut self, sample: u8, step: &Step) -> u8 {
        let i = (step.col - 1) as usize;
        let effective = sample as i32 + self.current[i];
        let output = if effective > self.cut { WHITE } else { BLACK };
        let err = effective - output as i32;
        match step.dir {
            Direction::Forward => {
                if step.col < self.width {
                    self.current[i + 1] += err * 7 / 16;
                    self.below[i + 1] += err / 16;
                }
                self.below[i] += err * 5 / 16;
                if step.col > 1 {
                    self.below[i - 1] += err * 3 / 16;
                }
                if step.col == self.width {
                    self.advance_row();
                }
            }
            Direction::Backward => {
                if step.col > 1 {
                    self.current[i - 1] += err * 7 / 16;
                    self.below[i - 1] += err / 16;
                }
                self.below[i] += err * 5 / 16;
                if step.col < self.width {
                    self.below[i + 1] += err * 3 / 16;
                }
                if step.col == 1 {
                    self.advance_row();
                }
            }
        }
        output
    }
}
