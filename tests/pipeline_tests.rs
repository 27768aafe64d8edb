//! Load -> validate -> mutate -> persist as explicit sequential stages.

use halftone::*;

#[test]
fn decode_run_encode_pipeline() {
    let bytes = b"P5\n# camera capture\n4 1\n255\n\x64\x64\x64\x64";
    let mut raster = pgm::decode(bytes).unwrap();
    run(&mut raster, Algorithm::FloydSteinberg(Scan::Sequential)).unwrap();
    assert_eq!(
        pgm::encode(&raster),
        b"P5\n4 1\n255\n\x00\xff\x00\x00"
    );
}

#[test]
fn ascii_magic_pixmap_is_still_one_byte_per_sample() {
    let mut raster = pgm::decode(b"P2\n2 2\n255\n\x0a\xc8\x32\xdc").unwrap();
    run(&mut raster, Algorithm::Threshold).unwrap();
    assert_eq!(raster.samples(), &[0, 255, 0, 255]);
}

#[test]
fn failed_parse_yields_no_raster_to_run() {
    let result = pgm::decode(b"BM\x00\x00");
    assert!(matches!(result, Err(ParseError::BadMagic)));
}

#[test]
fn parse_errors_propagate_into_the_crate_error() {
    fn load_and_run(bytes: &[u8]) -> Result<Raster, Error> {
        let mut raster = pgm::decode(bytes)?;
        run(&mut raster, Algorithm::Threshold)?;
        Ok(raster)
    }

    assert!(matches!(
        load_and_run(b"P7\n1 1\n255\n\x00"),
        Err(Error::Parse(ParseError::BadMagic))
    ));
    let quantized = load_and_run(b"P5\n1 1\n255\n\x90").unwrap();
    assert_eq!(quantized.samples(), &[255]);
}

#[test]
fn truncated_pixmap_is_rejected_up_front() {
    // The header promises 9 samples but only 4 follow; nothing downstream
    // may see a half-loaded raster.
    let result = pgm::decode(b"P5\n3 3\n255\n\x01\x02\x03\x04");
    assert!(matches!(
        result,
        Err(ParseError::Truncated {
            expected: 9,
            found: 4
        })
    ));
}

#[test]
fn header_comments_and_padding_are_tolerated() {
    let bytes = b"P5 # binary gray\n  # dimensions follow\n 3\t1 # three wide\n255\n\x00\x80\xff";
    let raster = pgm::decode(bytes).unwrap();
    assert_eq!((raster.width(), raster.height()), (3, 1));
    assert_eq!(raster.max_gray(), 255);
    assert_eq!(raster.samples(), &[0, 128, 255]);
}

#[test]
fn trailing_bytes_beyond_the_pixmap_are_ignored() {
    let raster = pgm::decode(b"P5\n2 1\n255\n\x01\x02extra").unwrap();
    assert_eq!(raster.samples(), &[1, 2]);
}
