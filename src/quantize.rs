//! Stateless per-pixel quantizers.
//!
//! All three quantizers decide each pixel independently of every other
//! pixel: a fixed half-gray cut, a fresh random cut per pixel, or a
//! position-dependent cut from a dispersed-dot [`IndexMatrix`]. They share
//! the [`PixelOp`] seam with the diffusion engines, and the deterministic
//! two also implement [`PointQuantize`] for the row-parallel path.

use crate::matrix::IndexMatrix;
#[cfg(feature = "rayon")]
use crate::raster::Raster;
use crate::traversal::{PixelOp, Step};
use crate::{BLACK, WHITE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A quantizer whose decision is a pure function of sample and position.
///
/// Implemented by [`Threshold`] and [`OrderedDither`] but not by
/// [`RandomDither`], whose decisions consume generator state. Pure deciders
/// can be applied to rows in any order, which is what `par_quantize`
/// exploits.
pub trait PointQuantize {
    /// Decides the output level for the sample at 1-based `(row, col)`.
    fn decide(&self, sample: u8, row: u32, col: u32) -> u8;
}

/// Static half-gray thresholding.
///
/// The cut is `(max_gray + 1) / 2`, computed once per run; a sample strictly
/// above it becomes white, anything else black.
///
/// # Example
///
/// ```
/// use halftone::{PointQuantize, Threshold};
///
/// let threshold = Threshold::new(255);
/// assert_eq!(threshold.decide(128, 1, 1), 0);
/// assert_eq!(threshold.decide(129, 1, 1), 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    cut: u8,
}

impl Threshold {
    /// Creates the quantizer for the given maximum gray level.
    pub fn new(max_gray: u8) -> Self {
        Self {
            cut: ((max_gray as u16 + 1) / 2) as u8,
        }
    }

    /// The computed cut level.
    #[inline]
    pub fn cut(&self) -> u8 {
        self.cut
    }
}

impl PointQuantize for Threshold {
    #[inline]
    fn decide(&self, sample: u8, _row: u32, _col: u32) -> u8 {
        if sample > self.cut { WHITE } else { BLACK }
    }
}

impl PixelOp for Threshold {
    #[inline]
    fn apply(&mut self, sample: u8, step: &Step) -> u8 {
        self.decide(sample, step.row, step.col)
    }
}

/// Random dithering with a per-pixel uniform cut in `[0, max_gray)`.
///
/// The generator is injected so runs can be reproduced: production callers
/// seed from OS entropy via [`RandomDither::new`], tests pin a seed via
/// [`RandomDither::with_seed`], and any other [`Rng`] can be supplied with
/// [`RandomDither::with_rng`].
#[derive(Debug, Clone)]
pub struct RandomDither<R: Rng = SmallRng> {
    rng: R,
    max_gray: u8,
}

impl RandomDither<SmallRng> {
    /// Creates the quantizer with a generator seeded from OS entropy.
    pub fn new(max_gray: u8) -> Self {
        Self::with_rng(max_gray, SmallRng::from_os_rng())
    }

    /// Creates the quantizer with a deterministic seed.
    pub fn with_seed(max_gray: u8, seed: u64) -> Self {
        Self::with_rng(max_gray, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomDither<R> {
    /// Creates the quantizer around a caller-supplied generator.
    pub fn with_rng(max_gray: u8, rng: R) -> Self {
        Self { rng, max_gray }
    }
}

impl<R: Rng> PixelOp for RandomDither<R> {
    #[inline]
    fn apply(&mut self, sample: u8, _step: &Step) -> u8 {
        let cut = self.rng.random_range(0..self.max_gray);
        if sample > cut { WHITE } else { BLACK }
    }
}

/// Ordered dithering against a dispersed-dot index matrix.
///
/// The cut for `(row, col)` is `rank[(row-1) mod N][(col-1) mod N] *
/// max_gray / N²` in integer arithmetic, so the matrix tiles the raster with
/// period N in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedDither {
    matrix: IndexMatrix,
    max_gray: u8,
}

impl OrderedDither {
    /// Creates the quantizer from a prebuilt matrix.
    pub fn new(matrix: IndexMatrix, max_gray: u8) -> Self {
        Self { matrix, max_gray }
    }
}

impl PointQuantize for OrderedDither {
    #[inline]
    fn decide(&self, sample: u8, row: u32, col: u32) -> u8 {
        let n = self.matrix.size();
        let rank = self.matrix.rank((row - 1) % n, (col - 1) % n);
        let cut = rank * self.max_gray as u32 / (n * n);
        if sample as u32 > cut { WHITE } else { BLACK }
    }
}

impl PixelOp for OrderedDither {
    #[inline]
    fn apply(&mut self, sample: u8, step: &Step) -> u8 {
        self.decide(sample, step.row, step.col)
    }
}

/// Applies a pure per-pixel quantizer to whole rows in parallel.
///
/// Row order does not matter for a [`PointQuantize`] decider, so the rows
/// are farmed out to the rayon pool. The output is bit-identical to driving
/// the same quantizer sequentially.
#[cfg(feature = "rayon")]
pub fn par_quantize<Q>(raster: &mut Raster, op: &Q)
where
    Q: PointQuantize + Sync,
{
    use rayon::prelude::*;

    let width = raster.width() as usize;
    raster
        .samples_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, samples)| {
            let row = row as u32 + 1;
            for (col, sample) in samples.iter_mut().enumerate() {
                *sample = op.decide(*sample, row, col as u32 + 1);
            }
        });
}
