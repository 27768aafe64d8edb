//! Grayscale-to-monochrome halftoning.
//!
//! This crate turns a grayscale raster into a black/white raster in place,
//! using one of four algorithm families:
//!
//! - **Static threshold** -- one fixed half-gray cut for the whole image.
//! - **Random dithering** -- a fresh uniform cut per pixel from an injected,
//!   seedable random source.
//! - **Ordered dithering** -- a position-dependent cut from a recursively
//!   built dispersed-dot [`IndexMatrix`].
//! - **Error diffusion** -- stateful engines ([`NaiveDiffusion`],
//!   [`FloydSteinberg`]) that carry quantization error to pixels not yet
//!   visited, in unidirectional or serpentine scan order.
//!
//! The crate never performs I/O: [`pgm::decode`] materializes a [`Raster`]
//! from bytes the caller obtained elsewhere, [`run`] mutates it in place,
//! and [`pgm::encode`] hands bytes back for the caller to persist.
//!
//! # Example
//!
//! ```
//! use halftone::{Algorithm, Raster, run};
//!
//! let mut raster = Raster::new(2, 2, 255, vec![10, 200, 50, 220]).unwrap();
//! run(&mut raster, Algorithm::Threshold).unwrap();
//! assert_eq!(raster.samples(), &[0, 255, 0, 255]);
//! ```
//!
//! Every operator implements [`PixelOp`]; [`drive`] applies one over a
//! raster in a chosen [`Scan`] order, so the pieces can also be combined
//! directly:
//!
//! ```
//! use halftone::{FloydSteinberg, Raster, Scan, drive};
//!
//! let mut raster = Raster::new(4, 1, 255, vec![100; 4]).unwrap();
//! let mut engine = FloydSteinberg::new(raster.width(), raster.max_gray());
//! drive(&mut raster, Scan::Sequential, &mut engine);
//! assert_eq!(raster.samples(), &[0, 255, 0, 0]);
//! ```

pub mod diffusion;
mod error;
pub mod matrix;
pub mod pgm;
pub mod quantize;
pub mod raster;
pub mod traversal;

pub use diffusion::{FloydSteinberg, NaiveDiffusion};
pub use error::Error;
pub use matrix::IndexMatrix;
pub use pgm::ParseError;
#[cfg(feature = "rayon")]
pub use quantize::par_quantize;
pub use quantize::{OrderedDither, PointQuantize, RandomDither, Threshold};
pub use raster::Raster;
pub use traversal::{Direction, PixelOp, Scan, Step, Walk, drive};

use enum_dispatch::enum_dispatch;
use std::str::FromStr;
use tracing::debug;

/// Output level for a sample at or below its cut.
pub const BLACK: u8 = 0;
/// Output level for a sample above its cut.
pub const WHITE: u8 = 255;

/// Matrix side length used when an ordered-dithering selector names none.
pub const DEFAULT_MATRIX_SIZE: u32 = 8;

/// Selects a quantization algorithm for [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Static half-gray thresholding.
    Threshold,
    /// Random dithering with a fresh uniform cut per pixel.
    Random,
    /// Ordered dithering with a dispersed-dot matrix of the given size.
    Ordered {
        /// Side length of the index matrix; must be a power of two >= 2.
        matrix_size: u32,
    },
    /// Naive full error diffusion in the given scan order.
    Naive(Scan),
    /// Floyd-Steinberg error diffusion in the given scan order.
    FloydSteinberg(Scan),
}

impl Algorithm {
    /// Ordered dithering with the default matrix size.
    pub fn ordered() -> Self {
        Algorithm::Ordered {
            matrix_size: DEFAULT_MATRIX_SIZE,
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses an external selector string.
    ///
    /// Recognized selectors: `threshold`, `random`, `ordered`,
    /// `ordered:<size>`, `naive`, `naive-serpentine`, `floyd` and
    /// `floyd-serpentine`. Anything else is [`Error::UnknownAlgorithm`].
    fn from_str(selector: &str) -> Result<Self, Error> {
        match selector {
            "threshold" => Ok(Algorithm::Threshold),
            "random" => Ok(Algorithm::Random),
            "ordered" => Ok(Algorithm::ordered()),
            "naive" => Ok(Algorithm::Naive(Scan::Sequential)),
            "naive-serpentine" => Ok(Algorithm::Naive(Scan::Serpentine)),
            "floyd" => Ok(Algorithm::FloydSteinberg(Scan::Sequential)),
            "floyd-serpentine" => Ok(Algorithm::FloydSteinberg(Scan::Serpentine)),
            _ => match selector.strip_prefix("ordered:") {
                Some(size) => size
                    .parse()
                    .map(|matrix_size| Algorithm::Ordered { matrix_size })
                    .map_err(|_| Error::UnknownAlgorithm(selector.to_owned())),
                None => Err(Error::UnknownAlgorithm(selector.to_owned())),
            },
        }
    }
}

/// The closed set of per-pixel operators the traversal engine dispatches.
///
/// Each variant carries its own typed state: the stateless quantizers hold
/// their configuration, the diffusion engines their carried error.
#[enum_dispatch(PixelOp)]
pub enum Operator {
    /// Static half-gray thresholding.
    Threshold(Threshold),
    /// Random dithering.
    Random(RandomDither),
    /// Ordered dithering.
    Ordered(OrderedDither),
    /// Naive full error diffusion.
    Naive(NaiveDiffusion),
    /// Floyd-Steinberg error diffusion.
    FloydSteinberg(FloydSteinberg),
}

/// Runs the selected algorithm over the raster, mutating it in place.
///
/// Random dithering is seeded from OS entropy once per run; use
/// [`run_seeded`] for reproducible output. Configuration errors (an invalid
/// matrix size) abort before any pixel is touched.
pub fn run(raster: &mut Raster, algorithm: Algorithm) -> Result<(), Error> {
    run_inner(raster, algorithm, None)
}

/// Like [`run`], but seeds random dithering deterministically.
///
/// The seed only affects [`Algorithm::Random`]; every other algorithm is
/// already deterministic and ignores it.
pub fn run_seeded(raster: &mut Raster, algorithm: Algorithm, seed: u64) -> Result<(), Error> {
    run_inner(raster, algorithm, Some(seed))
}

fn run_inner(raster: &mut Raster, algorithm: Algorithm, seed: Option<u64>) -> Result<(), Error> {
    debug!(
        ?algorithm,
        width = raster.width(),
        height = raster.height(),
        "quantizing raster"
    );
    let max_gray = raster.max_gray();
    let (scan, mut op) = match algorithm {
        Algorithm::Threshold => (Scan::Sequential, Operator::from(Threshold::new(max_gray))),
        Algorithm::Random => {
            let dither = match seed {
                Some(seed) => RandomDither::with_seed(max_gray, seed),
                None => RandomDither::new(max_gray),
            };
            (Scan::Sequential, Operator::from(dither))
        }
        Algorithm::Ordered { matrix_size } => {
            let matrix = IndexMatrix::dispersed(matrix_size)?;
            (
                Scan::Sequential,
                Operator::from(OrderedDither::new(matrix, max_gray)),
            )
        }
        Algorithm::Naive(scan) => (
            scan,
            Operator::from(NaiveDiffusion::new(raster.width(), max_gray)),
        ),
        Algorithm::FloydSteinberg(scan) => (
            scan,
            Operator::from(FloydSteinberg::new(raster.width(), max_gray)),
        ),
    };
    drive(raster, scan, &mut op);
    Ok(())
}
