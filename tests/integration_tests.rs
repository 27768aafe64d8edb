use halftone::*;

#[test]
fn threshold_splits_at_half_gray() {
    let mut raster = Raster::new(2, 2, 255, vec![10, 200, 50, 220]).unwrap();
    run(&mut raster, Algorithm::Threshold).unwrap();
    // Cut is 128: 10 and 50 fall to black, 200 and 220 rise to white.
    assert_eq!(raster.samples(), &[0, 255, 0, 255]);
}

#[test]
fn threshold_outputs_full_scale_even_for_narrow_gray_ranges() {
    // max_gray 100 puts the cut at 50; outputs are still 0/255.
    let mut raster = Raster::new(2, 1, 100, vec![30, 60]).unwrap();
    run(&mut raster, Algorithm::Threshold).unwrap();
    assert_eq!(raster.samples(), &[0, 255]);
}

#[test]
fn threshold_boundary_sample_stays_black() {
    // A sample equal to the cut is not strictly above it.
    let mut raster = Raster::new(2, 1, 255, vec![128, 129]).unwrap();
    run(&mut raster, Algorithm::Threshold).unwrap();
    assert_eq!(raster.samples(), &[0, 255]);
}

#[test]
fn ordered_dithering_tiles_a_uniform_image_with_matrix_period() {
    // 4x4 uniform gray against the 2x2 matrix: cuts are 0/127 on odd rows
    // and 191/63 on even rows, so the pattern repeats every 2 pixels.
    let mut raster = Raster::new(4, 4, 255, vec![93; 16]).unwrap();
    run(&mut raster, Algorithm::Ordered { matrix_size: 2 }).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        255, 0, 255, 0,
        0, 255, 0, 255,
        255, 0, 255, 0,
        0, 255, 0, 255,
    ];
    assert_eq!(raster.samples(), expected.as_slice());
}

#[test]
fn ordered_dithering_periodicity_holds_for_larger_matrices() {
    for size in [4u32, 8] {
        let span = size * 2;
        let mut raster = Raster::new(span, span, 255, vec![140; (span * span) as usize]).unwrap();
        run(&mut raster, Algorithm::Ordered { matrix_size: size }).unwrap();
        let width = span as usize;
        let period = size as usize;
        for row in 0..width - period {
            for col in 0..width {
                let here = raster.samples()[row * width + col];
                assert_eq!(here, raster.samples()[(row + period) * width + col]);
                if col + period < width {
                    assert_eq!(here, raster.samples()[row * width + col + period]);
                }
            }
        }
    }
}

#[test]
fn ordered_selector_defaults_to_an_eight_matrix() {
    let algorithm: Algorithm = "ordered".parse().unwrap();
    assert_eq!(algorithm, Algorithm::Ordered { matrix_size: 8 });
    let mut raster = Raster::new(8, 8, 255, vec![120; 64]).unwrap();
    run(&mut raster, algorithm).unwrap();
    assert!(raster.samples().iter().all(|&s| s == 0 || s == 255));
}

#[test]
fn random_dithering_is_reproducible_with_a_seed() {
    let source = Raster::new(16, 16, 255, vec![120; 256]).unwrap();

    let mut first = source.clone();
    run_seeded(&mut first, Algorithm::Random, 42).unwrap();
    let mut second = source.clone();
    run_seeded(&mut second, Algorithm::Random, 42).unwrap();
    assert_eq!(first, second);

    assert!(first.samples().iter().all(|&s| s == 0 || s == 255));
    // A mid-gray image should not collapse to a single level.
    assert!(first.samples().iter().any(|&s| s == 0));
    assert!(first.samples().iter().any(|&s| s == 255));
}

#[test]
fn random_dithering_pins_the_extremes() {
    // Cuts are drawn from [0, max_gray), so a zero sample never exceeds one
    // and a full-scale sample always does.
    let mut samples = vec![0; 8];
    samples.extend([255; 8]);
    let mut raster = Raster::new(8, 2, 255, samples).unwrap();
    run_seeded(&mut raster, Algorithm::Random, 7).unwrap();
    assert_eq!(&raster.samples()[..8], &[0; 8]);
    assert_eq!(&raster.samples()[8..], &[255; 8]);
}

#[test]
fn unknown_selector_reports_before_touching_anything() {
    assert!(matches!(
        "halfton".parse::<Algorithm>(),
        Err(Error::UnknownAlgorithm(_))
    ));
}

#[test]
fn invalid_matrix_size_aborts_without_mutation() {
    let mut raster = Raster::new(4, 4, 255, vec![93; 16]).unwrap();
    let before = raster.clone();
    for size in [0u32, 1, 3, 10] {
        let result = run(&mut raster, Algorithm::Ordered { matrix_size: size });
        assert!(matches!(result, Err(Error::InvalidMatrixSize(_))));
        assert_eq!(raster, before);
    }
}
