//! PGM codec for grayscale rasters.
//!
//! [`decode`] parses a PGM byte stream into a [`Raster`]; [`encode`] writes a
//! raster back out as binary PGM. The codec is the only place bytes are
//! interpreted; the quantizers never see the file format.
//!
//! The header is the magic token `P2` or `P5` followed by width, height and
//! max gray as decimal integers, separated by whitespace and `#` comments
//! that run to end of line. The pixmap that follows is always one byte per
//! sample in row-major order, for both magics.

use crate::raster::Raster;
use thiserror::Error;
use tracing::debug;

/// Errors reported while decoding a PGM byte stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The magic token is neither `P2` nor `P5`.
    #[error("not a PGM image: bad magic token")]
    BadMagic,

    /// A header field is missing or malformed.
    #[error("malformed PGM header: {0}")]
    Header(&'static str),

    /// The max gray field is outside 1..=255.
    #[error("max gray level {0} is outside 1..=255")]
    MaxGrayOutOfRange(u32),

    /// The pixmap holds fewer samples than the header promises.
    #[error("pixmap truncated: expected {expected} samples, found {found}")]
    Truncated {
        /// Sample count promised by the header.
        expected: usize,
        /// Samples actually present.
        found: usize,
    },
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Skips separator bytes and `#` comments between header tokens.
    fn skip_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'#' {
                while let Some(byte) = self.peek() {
                    self.pos += 1;
                    if byte == b'\n' {
                        break;
                    }
                }
            } else if byte <= b' ' || byte >= 0x7f {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Reads a decimal integer token.
    fn next_uint(&mut self, field: &'static str) -> Result<u32, ParseError> {
        self.skip_separators();
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((byte - b'0') as u32))
                .ok_or(ParseError::Header(field))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::Header(field));
        }
        Ok(value)
    }

    /// Advances past the next newline; the pixmap starts right after it.
    fn skip_line(&mut self) -> Result<(), ParseError> {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\n' {
                return Ok(());
            }
        }
        Err(ParseError::Header("missing pixmap"))
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

/// Decodes a PGM byte stream into a [`Raster`].
///
/// Both `P2` and `P5` magics are accepted and the pixmap is read as one byte
/// per sample either way. On any error no raster is produced and the caller
/// must not run an algorithm or persist anything.
///
/// # Example
///
/// ```
/// let bytes = b"P5\n# flat gray\n2 2\n255\n\x64\x64\x64\x64";
/// let raster = halftone::pgm::decode(bytes).unwrap();
/// assert_eq!((raster.width(), raster.height()), (2, 2));
/// assert_eq!(raster.samples(), &[100, 100, 100, 100]);
/// ```
pub fn decode(bytes: &[u8]) -> Result<Raster, ParseError> {
    let mut scanner = Scanner::new(bytes);

    scanner.skip_separators();
    let magic = scanner.rest();
    if magic.starts_with(b"P2") || magic.starts_with(b"P5") {
        scanner.pos += 2;
    } else {
        return Err(ParseError::BadMagic);
    }
    match scanner.peek() {
        // The magic must be a whole token: reject e.g. `P55`.
        Some(byte) if byte > b' ' && byte < 0x7f && byte != b'#' => {
            return Err(ParseError::BadMagic);
        }
        _ => {}
    }

    let width = scanner.next_uint("width")?;
    let height = scanner.next_uint("height")?;
    let max_gray = scanner.next_uint("max gray")?;
    scanner.skip_line()?;

    if width == 0 || height == 0 {
        return Err(ParseError::Header("zero dimension"));
    }
    if !(1..=255).contains(&max_gray) {
        return Err(ParseError::MaxGrayOutOfRange(max_gray));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(ParseError::Header("image too large"))?;

    let pixmap = scanner.rest();
    if pixmap.len() < expected {
        return Err(ParseError::Truncated {
            expected,
            found: pixmap.len(),
        });
    }

    debug!(width, height, max_gray, "decoded PGM header");
    Ok(Raster::from_raw(
        width,
        height,
        max_gray as u8,
        pixmap[..expected].to_vec(),
    ))
}

/// Encodes a raster as binary PGM (`P5`).
///
/// The counterpart of [`decode`] for callers that persist the quantized
/// raster; the crate itself never touches storage.
pub fn encode(raster: &Raster) -> Vec<u8> {
    let header = format!(
        "P5\n{} {}\n{}\n",
        raster.width(),
        raster.height(),
        raster.max_gray()
    );
    let mut bytes = Vec::with_capacity(header.len() + raster.samples().len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(raster.samples());
    bytes
}
